//! Reporting primitives: qualitative bucketing and report records.
//!
//! The five-level scales map a value inside a `[min, max]` range onto
//! equal-width fifths, with the top bucket absorbing anything at or past the
//! fourth boundary. Narrative strings belong to the front end; the core only
//! classifies.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::endgame::TermStatus;
use crate::state::CumulativeStats;

/// Classify a value into one of five equal-width buckets over `[min, max]`.
///
/// Values below the range land in bucket 0, values at or above the fourth
/// boundary land in bucket 4. A degenerate range is bucket 0.
#[must_use]
pub fn fifth(value: f64, min: f64, max: f64) -> usize {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() || !value.is_finite() {
        return 0;
    }
    let pos = (value - min) * 5.0 / range;
    if pos <= 0.0 {
        return 0;
    }
    let bucket = crate::numbers::trunc_f64_to_i64(pos);
    usize::try_from(bucket.min(4)).unwrap_or(4)
}

/// Quantity scale: how much of a thing there was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Abundance {
    Negligible,
    Little,
    Average,
    Much,
    Loads,
}

impl Abundance {
    /// Classify a value against its expected range.
    #[must_use]
    pub fn classify(value: f64, min: f64, max: f64) -> Self {
        match fifth(value, min, max) {
            0 => Self::Negligible,
            1 => Self::Little,
            2 => Self::Average,
            3 => Self::Much,
            _ => Self::Loads,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Little => "little",
            Self::Average => "average",
            Self::Much => "much",
            Self::Loads => "loads",
        }
    }
}

impl fmt::Display for Abundance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality scale: how good an outcome was, used for harvest yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Worst,
    Bad,
    Average,
    Good,
    Excellent,
}

impl Quality {
    /// Classify a value against its expected range.
    #[must_use]
    pub fn classify(value: f64, min: f64, max: f64) -> Self {
        match fifth(value, min, max) {
            0 => Self::Worst,
            1 => Self::Bad,
            2 => Self::Average,
            3 => Self::Good,
            _ => Self::Excellent,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worst => "worst",
            Self::Bad => "bad",
            Self::Average => "average",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price scale: how dear the land market is this year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceLevel {
    Cheap,
    Moderate,
    Average,
    High,
    Expensive,
}

impl PriceLevel {
    /// Classify a value against its expected range.
    #[must_use]
    pub fn classify(value: f64, min: f64, max: f64) -> Self {
        match fifth(value, min, max) {
            0 => Self::Cheap,
            1 => Self::Moderate,
            2 => Self::Average,
            3 => Self::High,
            _ => Self::Expensive,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cheap => "cheap",
            Self::Moderate => "moderate",
            Self::Average => "average",
            Self::High => "high",
            Self::Expensive => "expensive",
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot handed to the front end at the opening of each year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearReport {
    /// Year being opened.
    pub year: u32,
    /// People starved during the previous year.
    pub starved: u32,
    /// People who arrived at the start of this year.
    pub immigrants: u32,
    /// People killed by plague during the previous year.
    pub plague_deaths: u32,
    /// Population after arrivals.
    pub population: u32,
    /// Acres the city owns.
    pub acres: u32,
    /// Bushels per acre of the most recent harvest.
    pub grain_yield: u32,
    /// Quality classification of that yield.
    pub yield_quality: Quality,
    /// Bushels lost to rats in the most recent year.
    pub rat_loss: u32,
    /// Whole bushels in store.
    pub store: i64,
}

/// Final accounting rendered when the term ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSummary {
    /// How the term ended.
    pub status: TermStatus,
    /// Years in office, counting the seeded first report.
    pub years: u32,
    /// Seed the session was started from.
    pub seed: u64,
    /// Reign-wide totals.
    pub stats: CumulativeStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifths_split_the_range_evenly() {
        assert_eq!(fifth(1.0, 1.0, 5.0), 0);
        assert_eq!(fifth(2.0, 1.0, 5.0), 1);
        assert_eq!(fifth(3.0, 1.0, 5.0), 2);
        assert_eq!(fifth(4.0, 1.0, 5.0), 3);
        assert_eq!(fifth(5.0, 1.0, 5.0), 4);
    }

    #[test]
    fn top_bucket_absorbs_overflow() {
        assert_eq!(fifth(50.0, 1.0, 5.0), 4);
        assert_eq!(Quality::classify(50.0, 1.0, 5.0), Quality::Excellent);
    }

    #[test]
    fn below_range_and_degenerate_ranges_hit_the_floor() {
        assert_eq!(fifth(0.0, 1.0, 5.0), 0);
        assert_eq!(fifth(3.0, 5.0, 5.0), 0);
        assert_eq!(Abundance::classify(-10.0, 0.0, 100.0), Abundance::Negligible);
    }

    #[test]
    fn price_scale_matches_classic_market() {
        // Prices roll in [17, 27); the scale spans the same window.
        assert_eq!(PriceLevel::classify(17.0, 17.0, 27.0), PriceLevel::Cheap);
        assert_eq!(PriceLevel::classify(21.0, 17.0, 27.0), PriceLevel::Average);
        assert_eq!(
            PriceLevel::classify(26.0, 17.0, 27.0),
            PriceLevel::Expensive
        );
    }

    #[test]
    fn labels_round_trip_display() {
        assert_eq!(Abundance::Loads.to_string(), "loads");
        assert_eq!(Quality::Worst.to_string(), "worst");
        assert_eq!(PriceLevel::High.to_string(), "high");
    }
}
