use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Reporting window that partitions performance requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    #[default]
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

impl Timeframe {
    pub const ALL: [Self; 4] = [Self::OneMonth, Self::SixMonths, Self::OneYear, Self::All];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
            Self::All => "ALL",
        }
    }

    /// Calendar days of history the backend covers for this window.
    ///
    /// `ALL` is capped at five years upstream.
    pub const fn lookback_days(self) -> u16 {
        match self {
            Self::OneMonth => 30,
            Self::SixMonths => 180,
            Self::OneYear => 365,
            Self::All => 1825,
        }
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(Self::OneMonth),
            "6M" => Ok(Self::SixMonths),
            "1Y" => Ok(Self::OneYear),
            "ALL" => Ok(Self::All),
            _ => Err(ValidationError::InvalidTimeframe {
                value: value.trim().to_owned(),
            }),
        }
    }
}
