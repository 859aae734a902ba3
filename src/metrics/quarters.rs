//! Quarterly rollups and best/worst quarter selection.

use super::series::{PeriodKey, PeriodSeries};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Quarter from its 1-based number.
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Quarter::Q1),
            2 => Some(Quarter::Q2),
            3 => Some(Quarter::Q3),
            4 => Some(Quarter::Q4),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.index() + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuarterEntry {
    pub quarter: Quarter,
    pub value: f64,
}

/// Where a rollup's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupSource {
    /// Passed through from the backend's quarterly map.
    Backend,
    /// Summed from monthly data.
    Monthly,
}

// ---------------------------------------------------------------------------
// QuarterlyRollup
// ---------------------------------------------------------------------------

/// Four quarter sums for one measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterlyRollup {
    values: [f64; 4],
    source: RollupSource,
}

impl QuarterlyRollup {
    /// Take the backend's quarterly map as-is. Missing quarters count as `0`.
    pub fn from_backend(map: &BTreeMap<String, f64>) -> Self {
        let mut values = [0.0; 4];
        for (key, value) in map {
            match PeriodKey::parse(key) {
                PeriodKey::Quarter(q) => values[q as usize - 1] = *value,
                _ => log::debug!("Ignoring non-quarter key {} in quarterly data", key),
            }
        }
        Self {
            values,
            source: RollupSource::Backend,
        }
    }

    /// Sum monthly values into quarters.
    ///
    /// Periods whose label carries a calendar month land in that month's
    /// quarter. Otherwise periods are taken three at a time in series order.
    /// A rollup covers one year: `YYYY-MM` periods from a year other than the
    /// first such period's are skipped.
    pub fn from_monthly(series: &PeriodSeries) -> Self {
        let mut values = [0.0; 4];
        let mut year = None;
        for (i, point) in series.points().iter().enumerate() {
            let key = PeriodKey::parse(&point.label);
            if let PeriodKey::YearMonth { year: y, .. } = key {
                match year {
                    None => year = Some(y),
                    Some(first) if first != y => {
                        log::warn!(
                            "Skipping period {} outside {} in quarterly rollup",
                            point.label,
                            first
                        );
                        continue;
                    }
                    Some(_) => {}
                }
            }
            let q = key
                .quarter()
                .map(|q| q as usize - 1)
                .unwrap_or(i / 3);
            if q < 4 {
                values[q] += point.value;
            }
        }
        Self {
            values,
            source: RollupSource::Monthly,
        }
    }

    /// Backend quarters when the map has any, monthly sums otherwise.
    pub fn from_backend_or_monthly(map: &BTreeMap<String, f64>, monthly: &PeriodSeries) -> Self {
        if map.is_empty() {
            Self::from_monthly(monthly)
        } else {
            Self::from_backend(map)
        }
    }

    pub fn source(&self) -> RollupSource {
        self.source
    }

    pub fn get(&self, quarter: Quarter) -> f64 {
        self.values[quarter.index()]
    }

    pub fn entries(&self) -> Vec<QuarterEntry> {
        Quarter::ALL
            .iter()
            .map(|q| QuarterEntry {
                quarter: *q,
                value: self.values[q.index()],
            })
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Compare against another rollup and report quarters that differ by more
    /// than `tolerance`.
    pub fn reconcile(&self, other: &QuarterlyRollup, tolerance: f64) -> Vec<QuarterMismatch> {
        Quarter::ALL
            .iter()
            .filter_map(|q| {
                let ours = self.get(*q);
                let theirs = other.get(*q);
                if (ours - theirs).abs() > tolerance {
                    Some(QuarterMismatch {
                        quarter: *q,
                        expected: ours,
                        actual: theirs,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterMismatch {
    pub quarter: Quarter,
    pub expected: f64,
    pub actual: f64,
}

// ---------------------------------------------------------------------------
// Best / worst quarter
// ---------------------------------------------------------------------------

/// The quarter with the strictly greatest value, scanning left to right.
///
/// On ties the earlier quarter is kept.
pub fn compute_best_quarter(quarters: &[QuarterEntry]) -> Option<QuarterEntry> {
    let (first, rest) = quarters.split_first()?;
    Some(
        rest.iter()
            .fold(*first, |best, q| if q.value > best.value { *q } else { best }),
    )
}

/// The quarter with the strictly smallest value; ties keep the earlier quarter.
pub fn compute_worst_quarter(quarters: &[QuarterEntry]) -> Option<QuarterEntry> {
    let (first, rest) = quarters.split_first()?;
    Some(
        rest.iter()
            .fold(*first, |worst, q| if q.value < worst.value { *q } else { worst }),
    )
}
