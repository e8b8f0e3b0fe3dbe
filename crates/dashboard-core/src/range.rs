use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};

use crate::types::PriceRecord;

/// Trailing window for the price/volume chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    M1,
    M3,
    M6,
    Y1,
    Y5,
    All,
}

/// Selector order for the range control bar.
pub const ALL_RANGES: [PriceRange; 6] = [
    PriceRange::M1,
    PriceRange::M3,
    PriceRange::M6,
    PriceRange::Y1,
    PriceRange::Y5,
    PriceRange::All,
];

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::M1 => "1M",
            PriceRange::M3 => "3M",
            PriceRange::M6 => "6M",
            PriceRange::Y1 => "1Y",
            PriceRange::Y5 => "5Y",
            PriceRange::All => "ALL",
        }
    }

    /// Earliest date included in the window, or `None` for `All`.
    ///
    /// Month arithmetic clamps to the last valid day (chrono `Months`), so
    /// e.g. one month before 2024-03-31 is 2024-02-29.
    pub fn cutoff(&self, reference: NaiveDate) -> Option<NaiveDate> {
        let months = match self {
            PriceRange::M1 => 1,
            PriceRange::M3 => 3,
            PriceRange::M6 => 6,
            PriceRange::Y1 => 12,
            PriceRange::Y5 => 60,
            PriceRange::All => return None,
        };
        reference.checked_sub_months(Months::new(months))
    }

    /// Next range in selector order, wrapping around.
    pub fn next(&self) -> PriceRange {
        let idx = ALL_RANGES.iter().position(|r| r == self).unwrap_or(0);
        ALL_RANGES[(idx + 1) % ALL_RANGES.len()]
    }

    /// Previous range in selector order, wrapping around.
    pub fn prev(&self) -> PriceRange {
        let idx = ALL_RANGES.iter().position(|r| r == self).unwrap_or(0);
        ALL_RANGES[(idx + ALL_RANGES.len() - 1) % ALL_RANGES.len()]
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1M" => Ok(PriceRange::M1),
            "3M" => Ok(PriceRange::M3),
            "6M" => Ok(PriceRange::M6),
            "1Y" => Ok(PriceRange::Y1),
            "5Y" => Ok(PriceRange::Y5),
            "ALL" => Ok(PriceRange::All),
            other => Err(format!("unknown price range: {other}")),
        }
    }
}

/// The five parallel data arrays of the price/volume chart plus their
/// shared labels. All vectors always have equal length.
#[derive(Debug, Clone, Default)]
pub struct PriceSeriesBundle {
    pub labels: Vec<String>,
    pub close: Vec<f64>,
    pub ma20: Vec<Option<f64>>,
    pub ma50: Vec<Option<f64>>,
    pub ma200: Vec<Option<f64>>,
    pub volume: Vec<f64>,
}

impl PriceSeriesBundle {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Slice the price history to the requested trailing window, measured back
/// from `reference`, and project it into chart-ready arrays in ascending
/// date order. Input order does not matter; an empty window yields empty
/// arrays rather than an error.
pub fn filter_prices(
    records: &[PriceRecord],
    range: PriceRange,
    reference: NaiveDate,
) -> PriceSeriesBundle {
    let cutoff = range.cutoff(reference);
    let mut kept: Vec<&PriceRecord> = records
        .iter()
        .filter(|rec| cutoff.map_or(true, |c| rec.date >= c))
        .collect();
    kept.sort_by_key(|rec| rec.date);

    PriceSeriesBundle {
        labels: kept.iter().map(|rec| rec.date.to_string()).collect(),
        close: kept.iter().map(|rec| rec.adj_close).collect(),
        ma20: kept.iter().map(|rec| rec.adj_close_20ma).collect(),
        ma50: kept.iter().map(|rec| rec.adj_close_50ma).collect(),
        ma200: kept.iter().map(|rec| rec.adj_close_200ma).collect(),
        volume: kept
            .iter()
            .map(|rec| rec.volume.unwrap_or(0) as f64)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn price(day: &str, close: f64) -> PriceRecord {
        PriceRecord {
            date: date(day),
            adj_close: close,
            adj_close_20ma: None,
            adj_close_50ma: None,
            adj_close_200ma: None,
            volume: None,
        }
    }

    #[test]
    fn round_trips_through_strings() {
        for range in ALL_RANGES {
            assert_eq!(range.as_str().parse::<PriceRange>().unwrap(), range);
        }
        assert!("2W".parse::<PriceRange>().is_err());
    }

    #[test]
    fn cutoff_subtracts_calendar_months() {
        let reference = date("2025-02-27");
        assert_eq!(PriceRange::M1.cutoff(reference), Some(date("2025-01-27")));
        assert_eq!(PriceRange::M6.cutoff(reference), Some(date("2024-08-27")));
        assert_eq!(PriceRange::Y1.cutoff(reference), Some(date("2024-02-27")));
        assert_eq!(PriceRange::Y5.cutoff(reference), Some(date("2020-02-27")));
        assert_eq!(PriceRange::All.cutoff(reference), None);
    }

    #[test]
    fn cutoff_clamps_end_of_month() {
        assert_eq!(PriceRange::M1.cutoff(date("2024-03-31")), Some(date("2024-02-29")));
    }

    #[test]
    fn all_returns_everything_in_ascending_order() {
        // Newest-first input, as the backend sends it.
        let records = vec![
            price("2025-02-01", 280.0),
            price("2020-01-03", 145.6),
            price("2020-01-02", 140.2),
        ];
        let bundle = filter_prices(&records, PriceRange::All, date("2025-02-27"));
        assert_eq!(bundle.labels, vec!["2020-01-02", "2020-01-03", "2025-02-01"]);
        assert_eq!(bundle.close, vec![140.2, 145.6, 280.0]);
    }

    #[test]
    fn window_excludes_older_records() {
        let records = vec![
            price("2025-02-01", 280.0),
            price("2024-11-15", 260.0),
            price("2020-01-02", 140.2),
        ];
        let bundle = filter_prices(&records, PriceRange::Y1, date("2025-02-27"));
        assert_eq!(bundle.labels, vec!["2024-11-15", "2025-02-01"]);
    }

    #[test]
    fn empty_input_yields_empty_arrays() {
        let bundle = filter_prices(&[], PriceRange::M3, date("2025-02-27"));
        assert!(bundle.is_empty());
        assert!(bundle.close.is_empty());
        assert!(bundle.volume.is_empty());
    }

    #[test]
    fn missing_volume_extracts_as_zero() {
        let records = vec![PriceRecord {
            volume: None,
            ..price("2025-02-01", 280.0)
        }];
        let bundle = filter_prices(&records, PriceRange::All, date("2025-02-27"));
        assert_eq!(bundle.volume, vec![0.0]);
    }

    #[test]
    fn range_cycling_wraps() {
        let mut range = PriceRange::M1;
        for _ in 0..ALL_RANGES.len() {
            range = range.next();
        }
        assert_eq!(range, PriceRange::M1);
        assert_eq!(PriceRange::M1.prev(), PriceRange::All);
        assert_eq!(PriceRange::All.next(), PriceRange::M1);
    }
}
