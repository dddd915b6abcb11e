use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use clap::ValueEnum;
use itertools::Itertools;

use crate::prelude::*;

/// How to pick the hours to run an appliance in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Strategy {
    /// Start at the cheapest hour of the day.
    #[value(name = "cheapest-hour")]
    CheapestHour,

    /// Start at the cheapest hour from the current hour onwards.
    #[value(name = "nearest-cheapest")]
    NearestCheapest,

    /// Run one hour in each of the three cheapest hours.
    #[value(name = "top-3-cheapest")]
    TopThreeCheapest,

    /// Start at the cheapest hour outside of 18:00–20:59.
    #[value(name = "avoid-peak")]
    AvoidPeak,

    /// Cheapest two contiguous hours.
    #[value(name = "window-2h")]
    Window2,

    /// Cheapest three contiguous hours.
    #[value(name = "window-3h")]
    Window3,

    /// Cheapest five contiguous hours.
    #[value(name = "window-5h")]
    Window5,

    /// Run through the allowed hours in order.
    #[value(name = "chronological")]
    Chronological,
}

impl Strategy {
    /// Window size of the contiguous strategies.
    #[must_use]
    pub const fn window_size(self) -> Option<usize> {
        match self {
            Self::Window2 => Some(2),
            Self::Window3 => Some(3),
            Self::Window5 => Some(5),
            _ => None,
        }
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CheapestHour => "cheapest-hour",
            Self::NearestCheapest => "nearest-cheapest",
            Self::TopThreeCheapest => "top-3-cheapest",
            Self::AvoidPeak => "avoid-peak",
            Self::Window2 => "window-2h",
            Self::Window3 => "window-3h",
            Self::Window5 => "window-5h",
            Self::Chronological => "chronological",
        }
    }
}

/// Strict parsing: unknown identifiers are rejected.
impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| {
            let known = Self::value_variants().iter().map(|strategy| strategy.id()).join(", ");
            anyhow!("unknown strategy `{s}`, expected one of: {known}")
        })
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
