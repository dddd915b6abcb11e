use chrono::Local;
use clap::Parser;

use crate::{
    cli::source::SourceArgs,
    core::{
        appliance::{ApplianceDescriptor, Priority},
        savings::Savings,
        scheduler::Scheduler,
        strategy::Strategy,
    },
    prelude::*,
    quantity::power::Watts,
    tables::build_schedule_table,
};

#[derive(Parser)]
pub struct PlanArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Appliance power draw in watts.
    #[clap(long = "power-watts", env = "POWER_WATTS")]
    pub power: Watts,

    /// How long one run takes.
    #[clap(long = "usage-minutes", env = "USAGE_MINUTES")]
    pub usage_minutes: i32,

    /// `high` starts within 07:00–22:59, `medium` within 06:00–23:59, anything else anytime.
    #[clap(long, env = "PRIORITY", default_value = "low")]
    pub priority: Priority,

    #[clap(long, env = "STRATEGY", value_enum, default_value = "cheapest-hour")]
    pub strategy: Strategy,
}

#[instrument(skip_all)]
pub async fn plan(args: &PlanArgs) -> Result {
    let now = Local::now().fixed_offset();
    let on = args.source.target_day(now);
    let payload = args.source.fetch(on).await;
    let series = args.source.resolve(&payload);
    ensure!(!series.is_empty(), "no prices available for {on}");
    info!(provenance = %series.provenance, len = series.len(), "resolved");

    // Another day is planned as a whole.
    let now = if on == now.date_naive() {
        now
    } else {
        series.chronological().first().map_or(now, |point| point.timestamp)
    };

    let appliance = ApplianceDescriptor::builder()
        .power(args.power)
        .usage_minutes(args.usage_minutes)
        .priority(args.priority)
        .build();
    info!(
        power = %appliance.power,
        energy = %appliance.energy(),
        priority = %appliance.priority,
        "planning…",
    );
    let schedule = Scheduler::builder()
        .series(&series)
        .appliance(appliance)
        .now(now)
        .build()
        .schedule(args.strategy);
    if schedule.is_empty() {
        return Ok(());
    }
    debug!(breakdown = ?schedule.breakdown(), "settled");
    println!("{}", build_schedule_table(&schedule));
    info!(
        total_cost = %schedule.total_cost(),
        total_energy = %schedule.total_energy(),
        total_minutes = schedule.total_minutes(),
        "planned",
    );
    if schedule.total_minutes() < args.usage_minutes {
        warn!(missing_minutes = args.usage_minutes - schedule.total_minutes(), "ran out of hours");
    }

    if let Some(savings) = Savings::estimate(&schedule, &series)
        && savings.is_noticeable()
    {
        info!(
            per_run = %savings.per_run(),
            monthly = %savings.monthly(),
            share_of_bill = format!("{:.0}%", savings.share_of_monthly_bill() * 100.0),
            "saving compared to the most expensive hour",
        );
    }
    Ok(())
}
