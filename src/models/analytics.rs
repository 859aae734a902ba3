use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Backend period map: period key (`"2023-01"`, `"January"`, `"Q1"`) to value.
pub type PeriodMap = BTreeMap<String, f64>;

/// Read a period map where the map itself or any value may be `null`.
///
/// A `null` map is empty; a `null` value becomes `NaN` so the period still
/// shows up and the gap stays visible downstream.
fn lenient_period_map<'de, D>(deserializer: D) -> Result<PeriodMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<f64>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(period, value)| (period, value.unwrap_or(f64::NAN)))
        .collect())
}

// ---------------------------------------------------------------------------
// CashFlowResponse — analytics/cash-flow?year=YYYY
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowResponse {
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub monthly_cash_flow: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub monthly_inflow: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub monthly_outflow: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub quarterly_cash_flow: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub quarterly_inflow: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub quarterly_outflow: PeriodMap,
    pub total_cash_flow: Option<f64>,
    pub yearly_inflow: Option<f64>,
    pub yearly_outflow: Option<f64>,
}

// ---------------------------------------------------------------------------
// ProfitAnalysisResponse — analytics/profit-analysis?year=YYYY
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitAnalysisResponse {
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub monthly_gross_profit: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub monthly_net_profit: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub quarterly_gross_profit: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub quarterly_net_profit: PeriodMap,
    pub total_gross_profit: Option<f64>,
    pub total_net_profit: Option<f64>,
}

// ---------------------------------------------------------------------------
// FinancialOverviewResponse — financial-overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialOverviewResponse {
    pub total_revenue: Option<f64>,
    pub total_expenses: Option<f64>,
    pub net_profit: Option<f64>,
    pub cash_balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub monthly_revenue: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub monthly_expenses: PeriodMap,
    #[serde(default, deserialize_with = "lenient_period_map")]
    pub monthly_profit: PeriodMap,
}
