use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    ops::RangeInclusive,
    str::FromStr,
};

use bon::Builder;
use chrono::TimeDelta;

use crate::quantity::{energy::KilowattHours, power::Watts};

/// How strongly the appliance run must stay within waking hours.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Priority {
    High,
    Medium,

    #[default]
    Low,
}

impl Priority {
    /// Allowed start hours, [`None`] for no restriction.
    #[must_use]
    pub const fn hours(self) -> Option<RangeInclusive<u32>> {
        match self {
            Self::High => Some(7..=22),
            Self::Medium => Some(6..=23),
            Self::Low => None,
        }
    }

    #[must_use]
    pub fn allows(self, hour: u32) -> bool {
        self.hours().is_none_or(|hours| hours.contains(&hour))
    }
}

/// Lenient parsing: anything unrecognized means no restriction.
impl FromStr for Priority {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "high" | "alta" => Self::High,
            "medium" | "media" => Self::Medium,
            _ => Self::Low,
        })
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// An appliance to schedule.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct ApplianceDescriptor {
    pub power: Watts,

    /// Run duration in minutes.
    pub usage_minutes: i32,

    #[builder(default)]
    pub priority: Priority,
}

impl ApplianceDescriptor {
    /// Whether there is anything to schedule at all.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.power.is_positive() && self.usage_minutes > 0
    }

    #[must_use]
    pub fn usage(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.usage_minutes))
    }

    /// Energy of one full run.
    #[must_use]
    pub fn energy(&self) -> KilowattHours {
        self.power * self.usage()
    }
}
