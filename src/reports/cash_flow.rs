//! Cash flow report: monthly cash flow, inflow and outflow for one year.

use serde::Serialize;

use super::Report;
use crate::export::{chart_for_view, ChartData, CsvTable, TableRow};
use crate::metrics::{
    base_insights, derive_metrics, format_currency, DerivedMetrics, MeasureSet, MeasureView,
    PeriodSeries, QuarterMismatch, QuarterlyRollup,
};
use crate::models::{CashFlowResponse, PeriodMap};

/// Allowed drift between backend quarters and summed months before it is reported.
const RECONCILE_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowView {
    Flow,
    Inflow,
    Outflow,
}

impl MeasureView for CashFlowView {
    const ALL: &'static [Self] = &[CashFlowView::Flow, CashFlowView::Inflow, CashFlowView::Outflow];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            CashFlowView::Flow => "Cash Flow",
            CashFlowView::Inflow => "Inflow",
            CashFlowView::Outflow => "Outflow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowMetrics {
    pub derived: DerivedMetrics,
    pub yearly_inflow: f64,
    pub yearly_outflow: f64,
    pub net_flow: f64,
    /// Average monthly outflow.
    pub burn_rate: f64,
    /// Inflow divided by outflow; `None` when there was no outflow.
    pub inflow_outflow_ratio: Option<f64>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowReport {
    response: CashFlowResponse,
    measures: MeasureSet<CashFlowView>,
}

impl CashFlowReport {
    pub fn new(response: CashFlowResponse) -> Self {
        let measures = MeasureSet::from_fn(|view| PeriodSeries::from_map(monthly(&response, view)));
        let report = Self { response, measures };
        for view in CashFlowView::ALL {
            for m in report.quarter_mismatches(*view) {
                log::warn!(
                    "{} {}: backend reports {}, months sum to {}",
                    view.label(),
                    m.quarter,
                    m.actual,
                    m.expected
                );
            }
        }
        report
    }

    pub fn response(&self) -> &CashFlowResponse {
        &self.response
    }

    pub fn measures(&self) -> &MeasureSet<CashFlowView> {
        &self.measures
    }

    /// Quarterly figures for `view`: the backend's when supplied, else summed months.
    pub fn quarterly(&self, view: CashFlowView) -> QuarterlyRollup {
        QuarterlyRollup::from_backend_or_monthly(quarterly(&self.response, view), self.measures.get(view))
    }

    /// Quarters where the backend's quarterly figure disagrees with its months.
    pub fn quarter_mismatches(&self, view: CashFlowView) -> Vec<QuarterMismatch> {
        let supplied = quarterly(&self.response, view);
        if supplied.is_empty() {
            return Vec::new();
        }
        QuarterlyRollup::from_monthly(self.measures.get(view))
            .reconcile(&QuarterlyRollup::from_backend(supplied), RECONCILE_TOLERANCE)
    }

    fn reported_total(&self, view: CashFlowView) -> Option<f64> {
        match view {
            CashFlowView::Flow => self.response.total_cash_flow,
            CashFlowView::Inflow => self.response.yearly_inflow,
            CashFlowView::Outflow => self.response.yearly_outflow,
        }
    }

    fn yearly(&self, view: CashFlowView) -> f64 {
        self.reported_total(view)
            .unwrap_or_else(|| self.measures.get(view).total())
    }
}

impl Report for CashFlowReport {
    type View = CashFlowView;
    type Metrics = CashFlowMetrics;

    fn metrics(&self, view: CashFlowView) -> CashFlowMetrics {
        let series = self.measures.get(view);
        let derived = derive_metrics(series, &self.quarterly(view), self.reported_total(view));

        let yearly_inflow = self.yearly(CashFlowView::Inflow);
        let yearly_outflow = self.yearly(CashFlowView::Outflow);
        let months = self.measures.get(CashFlowView::Outflow).len();
        let burn_rate = if months == 0 {
            0.0
        } else {
            yearly_outflow / months as f64
        };
        let inflow_outflow_ratio = if yearly_outflow != 0.0 {
            Some(yearly_inflow / yearly_outflow)
        } else {
            None
        };

        let mut insights = base_insights(view.label(), &derived);
        if months > 0 {
            insights.push(format!(
                "Average monthly burn rate is {}",
                format_currency(burn_rate)
            ));
        }
        if let Some(ratio) = inflow_outflow_ratio {
            insights.push(format!("Inflows cover outflows {:.2}x", ratio));
        }

        CashFlowMetrics {
            derived,
            yearly_inflow,
            yearly_outflow,
            net_flow: yearly_inflow - yearly_outflow,
            burn_rate,
            inflow_outflow_ratio,
            insights,
        }
    }

    fn chart(&self, view: CashFlowView) -> ChartData {
        chart_for_view(&self.measures, view)
    }

    /// Columns: Cash Flow, Inflow, Outflow, Net Flow.
    fn table(&self) -> Vec<TableRow> {
        self.measures
            .aligned_rows()
            .into_iter()
            .map(|(period, mut values)| {
                let net = values[CashFlowView::Inflow.index()] - values[CashFlowView::Outflow.index()];
                values.push(net);
                TableRow { period, values }
            })
            .collect()
    }

    fn csv(&self) -> CsvTable {
        let headers = ["Month", "Cash Flow", "Inflow", "Outflow", "Net Flow"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        CsvTable::with_column_totals(headers, self.table())
    }
}

fn monthly(response: &CashFlowResponse, view: CashFlowView) -> &PeriodMap {
    match view {
        CashFlowView::Flow => &response.monthly_cash_flow,
        CashFlowView::Inflow => &response.monthly_inflow,
        CashFlowView::Outflow => &response.monthly_outflow,
    }
}

fn quarterly(response: &CashFlowResponse, view: CashFlowView) -> &PeriodMap {
    match view {
        CashFlowView::Flow => &response.quarterly_cash_flow,
        CashFlowView::Inflow => &response.quarterly_inflow,
        CashFlowView::Outflow => &response.quarterly_outflow,
    }
}
