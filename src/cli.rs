mod plan;
mod prices;
mod source;

use clap::{Parser, Subcommand};

pub use self::{
    plan::{PlanArgs, plan},
    prices::{PricesArgs, prices},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the day's hourly prices and list them.
    #[clap(name = "prices")]
    Prices(Box<PricesArgs>),

    /// Find the cheapest hours to run an appliance in.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),
}
