//! Derived metrics aggregator shared by every report.
//!
//! Everything here is a pure function of a [`MeasureSet`], a view selector and
//! (optionally) backend-supplied quarterly figures. Nothing performs I/O and
//! nothing mutates its input.

pub mod aggregate;
pub mod format;
pub mod quarters;
pub mod series;

pub use aggregate::{base_insights, compute_growth_rate, derive_metrics, DerivedMetrics, Trend};
pub use format::{format_amount, format_currency, format_percent, round2, sign_of, Sign};
pub use quarters::{
    compute_best_quarter, compute_worst_quarter, Quarter, QuarterEntry, QuarterMismatch,
    QuarterlyRollup, RollupSource,
};
pub use series::{
    select_active_series, sort_period_labels, MeasureSet, MeasureView, PeriodKey, PeriodPoint,
    PeriodSeries,
};
