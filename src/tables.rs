use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{band::Band, point::PricePoint, series::PriceSeries, settlement::Schedule},
    quantity::price::{KilowattHourPrice, MegawattHourPrice},
};

pub fn build_prices_table(points: &[PricePoint], spot: Option<&PriceSeries>) -> Table {
    let mean_price = mean_price(points);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    let mut header = vec!["Start", "End", "Band", "Price"];
    if spot.is_some() {
        header.push("Retail from spot");
    }
    table.set_header(header);

    for point in points {
        let band = point.band();
        let mut row = vec![
            Cell::new(point.label()),
            Cell::new(point.end().format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(band).fg(band.color()),
            Cell::new(KilowattHourPrice::from(point.price))
                .set_alignment(CellAlignment::Right)
                .fg(if point.price > mean_price { Color::Red } else { Color::Green }),
        ];
        if let Some(spot) = spot {
            let retail = spot
                .points
                .iter()
                .find(|spot_point| spot_point.timestamp == point.timestamp)
                .map(|spot_point| retail_price(spot_point.price, band));
            row.push(match retail {
                Some(retail) => Cell::new(retail).set_alignment(CellAlignment::Right),
                None => Cell::new("-").add_attribute(Attribute::Dim),
            });
        }
        table.add_row(row);
    }
    table
}

pub fn build_schedule_table(schedule: &Schedule) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Start", "Band", "Price", "Minutes", "Energy", "Cost"]);
    for slice in schedule {
        let band = slice.point.band();
        table.add_row(vec![
            Cell::new(slice.label()),
            Cell::new(band).fg(band.color()),
            Cell::new(KilowattHourPrice::from(slice.point.price)).set_alignment(CellAlignment::Right),
            Cell::new(slice.minutes).set_alignment(CellAlignment::Right),
            Cell::new(slice.energy).set_alignment(CellAlignment::Right),
            Cell::new(slice.cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(schedule.total_minutes()).set_alignment(CellAlignment::Right),
        Cell::new(schedule.total_energy()).set_alignment(CellAlignment::Right),
        Cell::new(schedule.total_cost())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

/// Spot price with the band's access toll and the retail margin on top.
fn retail_price(spot: MegawattHourPrice, band: Band) -> KilowattHourPrice {
    KilowattHourPrice::from(spot) + band.toll() + Band::RETAIL_MARGIN
}

#[expect(clippy::cast_precision_loss)]
fn mean_price(points: &[PricePoint]) -> MegawattHourPrice {
    if points.is_empty() {
        return MegawattHourPrice::default();
    }
    points.iter().map(|point| point.price).sum::<MegawattHourPrice>() / points.len() as f64
}
