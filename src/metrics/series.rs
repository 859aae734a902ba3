//! Period series and measure sets.
//!
//! Backend maps are keyed by strings (`"2023-01"`, `"March"`, `"Q2"`), so a
//! plain string sort would put April before January. [`PeriodKey`] recognises
//! the shapes the backend produces and orders them chronologically.

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

// ---------------------------------------------------------------------------
// PeriodKey
// ---------------------------------------------------------------------------

/// A parsed period label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodKey {
    /// `YYYY-MM`
    YearMonth { year: i32, month: u32 },
    /// `January`, `jan`, ... (month 1-12)
    Month(u32),
    /// `Q1`..`Q4` (quarter 1-4)
    Quarter(u32),
    /// Anything else; ordered lexically after the recognised shapes.
    Other(String),
}

impl PeriodKey {
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
            return PeriodKey::YearMonth {
                year: date.year(),
                month: date.month(),
            };
        }
        let lower = s.to_ascii_lowercase();
        if lower.len() >= 3 {
            if let Some(idx) = MONTHS
                .iter()
                .position(|m| *m == lower || (lower.len() == 3 && m.starts_with(&lower)))
            {
                return PeriodKey::Month(idx as u32 + 1);
            }
        }
        if let Some(n) = lower.strip_prefix('q').and_then(|d| d.parse::<u32>().ok()) {
            if (1..=4).contains(&n) {
                return PeriodKey::Quarter(n);
            }
        }
        PeriodKey::Other(s.to_string())
    }

    /// Calendar month (1-12) if the key carries one.
    pub fn month(&self) -> Option<u32> {
        match self {
            PeriodKey::YearMonth { month, .. } | PeriodKey::Month(month) => Some(*month),
            _ => None,
        }
    }

    /// Quarter (1-4) the key falls into, if it carries a month or quarter.
    pub fn quarter(&self) -> Option<u32> {
        match self {
            PeriodKey::Quarter(q) => Some(*q),
            other => other.month().map(|m| (m - 1) / 3 + 1),
        }
    }

    fn sort_key(&self) -> (u8, i32, u32, &str) {
        match self {
            PeriodKey::YearMonth { year, month } => (0, *year, *month, ""),
            PeriodKey::Month(m) => (1, 0, *m, ""),
            PeriodKey::Quarter(q) => (2, 0, *q, ""),
            PeriodKey::Other(s) => (3, 0, 0, s.as_str()),
        }
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort period labels chronologically.
pub fn sort_period_labels<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut keyed: Vec<(PeriodKey, &String)> = labels
        .into_iter()
        .map(|l| (PeriodKey::parse(l), l))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    keyed.into_iter().map(|(_, l)| l.clone()).collect()
}

// ---------------------------------------------------------------------------
// PeriodSeries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodPoint {
    pub label: String,
    pub value: f64,
}

/// Chronologically ordered `(label, value)` pairs for one measure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSeries {
    points: Vec<PeriodPoint>,
}

impl PeriodSeries {
    /// Build a series from a backend period map, sorting keys chronologically.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Self {
        let points = sort_period_labels(map.keys())
            .into_iter()
            .map(|label| {
                let value = map[&label];
                PeriodPoint { label, value }
            })
            .collect();
        Self { points }
    }

    /// Build a series from values already in order.
    pub fn from_points<I, S>(points: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            points: points
                .into_iter()
                .map(|(label, value)| PeriodPoint {
                    label: label.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn points(&self) -> &[PeriodPoint] {
        &self.points
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.points.first().map(|p| p.value)
    }

    pub fn last(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.points.iter().find(|p| p.label == label).map(|p| p.value)
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Mean value per period, `0` for an empty series.
    pub fn average(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.total() / self.points.len() as f64
    }
}

// ---------------------------------------------------------------------------
// MeasureSet
// ---------------------------------------------------------------------------

/// The closed set of measures a report can display.
///
/// Implemented by each report's view selector enum. `ALL` lists every variant
/// in display order and `index` must be the variant's position in `ALL`.
pub trait MeasureView: Copy + Eq + Hash + Debug + 'static {
    const ALL: &'static [Self];

    fn index(self) -> usize;

    /// Column/legend label, e.g. `"Cash Flow"`.
    fn label(self) -> &'static str;
}

/// One [`PeriodSeries`] per measure of a report.
///
/// Construction goes through [`MeasureSet::from_fn`], which visits every
/// variant of `V`, so every view always has a series.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureSet<V: MeasureView> {
    series: Vec<PeriodSeries>,
    _view: PhantomData<V>,
}

impl<V: MeasureView> MeasureSet<V> {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(V) -> PeriodSeries,
    {
        let mut series = vec![PeriodSeries::default(); V::ALL.len()];
        for view in V::ALL {
            series[view.index()] = f(*view);
        }
        Self {
            series,
            _view: PhantomData,
        }
    }

    pub fn get(&self, view: V) -> &PeriodSeries {
        &self.series[view.index()]
    }

    /// Chronologically sorted union of every measure's period labels.
    pub fn periods(&self) -> Vec<String> {
        let mut labels: Vec<&String> = Vec::new();
        for s in &self.series {
            for p in s.points() {
                if !labels.contains(&&p.label) {
                    labels.push(&p.label);
                }
            }
        }
        sort_period_labels(labels)
    }

    /// One row per period with a value for every measure, in `V::ALL` order.
    ///
    /// Rows are aligned by label rather than by position. A measure missing a
    /// period contributes `0` for it.
    pub fn aligned_rows(&self) -> Vec<(String, Vec<f64>)> {
        self.periods()
            .into_iter()
            .map(|label| {
                let values = V::ALL
                    .iter()
                    .map(|v| {
                        self.get(*v).get(&label).unwrap_or_else(|| {
                            log::debug!("{:?} has no value for period {}", v, label);
                            0.0
                        })
                    })
                    .collect();
                (label, values)
            })
            .collect()
    }
}

/// Return the series backing the selected view.
pub fn select_active_series<V: MeasureView>(measures: &MeasureSet<V>, view: V) -> &PeriodSeries {
    measures.get(view)
}
