use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

/// Signed microsecond duration as reported by the tracing backend.
/// Negative values occur when clocks across services are skewed; they are
/// valid output, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Micros(pub i64);

impl Micros {
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = Duration::from_micros(self.0.unsigned_abs());
        if self.0 < 0 {
            write!(f, "-{}", humantime::format_duration(magnitude))
        } else {
            write!(f, "{}", humantime::format_duration(magnitude))
        }
    }
}

pub fn parse_duration_str(input: &str) -> Result<Duration> {
    humantime::parse_duration(input)
        .map_err(|e| SheetError::Parse(format!("invalid duration {input}: {e}")))
}

/// Whole-hour figure sent on the wire. Rounds up so a sub-hour window
/// still queries one hour.
pub fn lookback_hours(lookback: Duration) -> u64 {
    lookback.as_secs().div_ceil(3600).max(1)
}
