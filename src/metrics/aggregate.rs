//! Derived metrics over the active period series.

use super::format::{format_currency, format_percent, round2};
use super::quarters::{compute_best_quarter, compute_worst_quarter, QuarterEntry, QuarterlyRollup};
use super::series::PeriodSeries;
use serde::Serialize;

/// Percentage change from the first to the last value of `series`.
///
/// Computed as `(last - first) / |first| * 100`, rounded to two decimals.
/// A zero first value divides by `1` instead, so `[0, 50]` gives `5000`.
/// Series with fewer than two points give `0`.
pub fn compute_growth_rate(series: &PeriodSeries) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return 0.0,
    };
    let divisor = if first == 0.0 { 1.0 } else { first.abs() };
    round2((last - first) / divisor * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn from_growth(growth_rate: f64) -> Self {
        if growth_rate > 0.0 {
            Trend::Up
        } else if growth_rate < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Trend::Up => "trending up",
            Trend::Down => "trending down",
            Trend::Flat => "flat",
        }
    }
}

// ---------------------------------------------------------------------------
// DerivedMetrics
// ---------------------------------------------------------------------------

/// Summary of one measure for KPI cards and insight text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub total: f64,
    pub growth_rate: f64,
    pub trend: Trend,
    pub average: f64,
    pub period_count: usize,
    pub quarters: Vec<QuarterEntry>,
    pub best_quarter: Option<QuarterEntry>,
    pub worst_quarter: Option<QuarterEntry>,
    pub formatted_total: String,
    pub formatted_growth: String,
}

/// Compute metrics for `series`.
///
/// `reported_total` is the backend's own yearly figure; when absent the total
/// is the sum of the series.
pub fn derive_metrics(
    series: &PeriodSeries,
    rollup: &QuarterlyRollup,
    reported_total: Option<f64>,
) -> DerivedMetrics {
    let total = reported_total.unwrap_or_else(|| series.total());
    let growth_rate = compute_growth_rate(series);
    let quarters = rollup.entries();
    DerivedMetrics {
        total,
        growth_rate,
        trend: Trend::from_growth(growth_rate),
        average: series.average(),
        period_count: series.len(),
        best_quarter: compute_best_quarter(&quarters),
        worst_quarter: compute_worst_quarter(&quarters),
        quarters,
        formatted_total: format_currency(total),
        formatted_growth: format_percent(growth_rate),
    }
}

/// Insight sentences shared by every report for the measure named `label`.
pub fn base_insights(label: &str, metrics: &DerivedMetrics) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(best) = metrics.best_quarter {
        out.push(format!(
            "Best quarter for {} was {} at {}",
            label.to_lowercase(),
            best.quarter,
            format_currency(best.value)
        ));
    }
    if let Some(worst) = metrics.worst_quarter {
        out.push(format!(
            "Weakest quarter was {} at {}",
            worst.quarter,
            format_currency(worst.value)
        ));
    }
    if metrics.period_count >= 2 {
        out.push(format!(
            "{} is {} ({} over the period)",
            label,
            metrics.trend.describe(),
            metrics.formatted_growth
        ));
    }
    out
}
