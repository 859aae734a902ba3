//! Financial analytics endpoints: cash flow, profit analysis and overview.

use crate::client::ApiClient;
use crate::config;
use crate::error::Result;
use crate::models::{CashFlowResponse, FinancialOverviewResponse, ProfitAnalysisResponse};
use crate::reports::{CashFlowReport, OverviewReport, ProfitReport};

// ---------------------------------------------------------------------------
// AnalyticsApi
// ---------------------------------------------------------------------------

/// Read-only access to the backend's pre-aggregated financial data.
pub struct AnalyticsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalyticsApi<'a> {
    /// Create a new `AnalyticsApi` bound to the given client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Raw cash flow payload for `year`.
    pub fn cash_flow(&self, year: i32) -> Result<CashFlowResponse> {
        self.client
            .get_json(config::CASH_FLOW_PATH, &[("year", year.to_string())])
    }

    /// Raw profit analysis payload for `year`.
    pub fn profit_analysis(&self, year: i32) -> Result<ProfitAnalysisResponse> {
        self.client
            .get_json(config::PROFIT_ANALYSIS_PATH, &[("year", year.to_string())])
    }

    /// Raw financial overview payload (KPIs and monthly trends).
    pub fn financial_overview(&self) -> Result<FinancialOverviewResponse> {
        self.client.get_json(config::FINANCIAL_OVERVIEW_PATH, &[])
    }

    // -- Report loaders ----------------------------------------------------
    //
    // Shaped for `ReportPage::mount` / `select_year`, which pass the year as
    // an `Option`. A missing year means the current calendar year.

    pub fn cash_flow_report(&self, year: Option<i32>) -> Result<CashFlowReport> {
        self.cash_flow(year.unwrap_or_else(current_year))
            .map(CashFlowReport::new)
    }

    pub fn profit_report(&self, year: Option<i32>) -> Result<ProfitReport> {
        self.profit_analysis(year.unwrap_or_else(current_year))
            .map(ProfitReport::new)
    }

    /// The overview has no year selector; `_year` is ignored.
    pub fn overview_report(&self, _year: Option<i32>) -> Result<OverviewReport> {
        self.financial_overview().map(OverviewReport::new)
    }
}

/// Current calendar year in local time.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}
