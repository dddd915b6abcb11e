use chrono::Local;
use clap::Parser;

use crate::{
    cli::source::SourceArgs,
    core::ordering::Ordering,
    prelude::*,
    tables::build_prices_table,
};

#[derive(Parser)]
pub struct PricesArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Row order of the listing.
    #[clap(long, env = "ORDERING", value_enum, default_value_t)]
    pub ordering: Ordering,
}

#[instrument(skip_all)]
pub async fn prices(args: &PricesArgs) -> Result {
    let now = Local::now().fixed_offset();
    let on = args.source.target_day(now);
    let payload = args.source.fetch(on).await;
    let series = args.source.resolve(&payload);
    ensure!(!series.is_empty(), "no prices available for {on}");
    if !series.is_well_formed() {
        warn!(len = series.len(), "unexpected number of hours");
    }

    let points = args.ordering.apply(&series);
    println!("{}", build_prices_table(&points, payload.spot().as_ref()));
    info!(
        date = %series.date,
        provenance = %series.provenance,
        min = ?series.min_price(),
        max = ?series.max_price(),
        "listed",
    );
    Ok(())
}
