use std::fmt::{Display, Formatter};

use comfy_table::Color;

use crate::quantity::price::KilowattHourPrice;

/// Time-of-use tariff band («periodo») of an hour.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Band {
    /// «Valle», 00:00–07:59.
    OffPeak,

    /// «Llano», 08:00–09:59, 14:00–17:59, and 22:00–23:59.
    MidPeak,

    /// «Punta», 10:00–13:59 and 18:00–21:59.
    Peak,

    /// The hour is outside `0..=23`.
    Unknown,
}

impl Band {
    /// Retailer margin added on top of the access toll.
    pub const RETAIL_MARGIN: KilowattHourPrice = KilowattHourPrice(0.001);

    #[must_use]
    pub const fn classify(hour: u32) -> Self {
        match hour {
            0..=7 => Self::OffPeak,
            8..=9 | 14..=17 | 22..=23 => Self::MidPeak,
            10..=13 | 18..=21 => Self::Peak,
            _ => Self::Unknown,
        }
    }

    /// Band used for coloring and costing. [`Band::Unknown`] behaves as mid-peak.
    #[must_use]
    pub const fn effective(self) -> Self {
        match self {
            Self::Unknown => Self::MidPeak,
            band => band,
        }
    }

    /// Indicative access toll of the band.
    #[must_use]
    pub const fn toll(self) -> KilowattHourPrice {
        match self.effective() {
            Self::OffPeak => KilowattHourPrice(0.030),
            Self::Peak => KilowattHourPrice(0.060),
            Self::MidPeak | Self::Unknown => KilowattHourPrice(0.045),
        }
    }

    pub const fn color(self) -> Color {
        match self.effective() {
            Self::OffPeak => Color::Green,
            Self::Peak => Color::Red,
            Self::MidPeak | Self::Unknown => Color::DarkYellow,
        }
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OffPeak => write!(f, "Off-peak"),
            Self::MidPeak => write!(f, "Mid-peak"),
            Self::Peak => write!(f, "Peak"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
