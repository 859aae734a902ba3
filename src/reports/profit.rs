//! Profit analysis report: gross and net profit by month for one year.

use serde::Serialize;

use super::Report;
use crate::export::{chart_for_view, ChartData, CsvTable, TableRow, TOTAL_ROW_LABEL};
use crate::metrics::{
    base_insights, derive_metrics, format_percent, round2, DerivedMetrics, MeasureSet,
    MeasureView, PeriodSeries, QuarterlyRollup,
};
use crate::models::{PeriodMap, ProfitAnalysisResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitView {
    Gross,
    Net,
}

impl MeasureView for ProfitView {
    const ALL: &'static [Self] = &[ProfitView::Gross, ProfitView::Net];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            ProfitView::Gross => "Gross Profit",
            ProfitView::Net => "Net Profit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitMetrics {
    pub derived: DerivedMetrics,
    pub total_gross_profit: f64,
    pub total_net_profit: f64,
    /// Net over gross profit, in percent; `None` when gross profit is zero.
    pub net_margin: Option<f64>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfitReport {
    response: ProfitAnalysisResponse,
    measures: MeasureSet<ProfitView>,
}

impl ProfitReport {
    pub fn new(response: ProfitAnalysisResponse) -> Self {
        let measures = MeasureSet::from_fn(|view| PeriodSeries::from_map(monthly(&response, view)));
        Self { response, measures }
    }

    pub fn response(&self) -> &ProfitAnalysisResponse {
        &self.response
    }

    pub fn measures(&self) -> &MeasureSet<ProfitView> {
        &self.measures
    }

    pub fn quarterly(&self, view: ProfitView) -> QuarterlyRollup {
        QuarterlyRollup::from_backend_or_monthly(quarterly(&self.response, view), self.measures.get(view))
    }

    fn reported_total(&self, view: ProfitView) -> Option<f64> {
        match view {
            ProfitView::Gross => self.response.total_gross_profit,
            ProfitView::Net => self.response.total_net_profit,
        }
    }

    fn total(&self, view: ProfitView) -> f64 {
        self.reported_total(view)
            .unwrap_or_else(|| self.measures.get(view).total())
    }
}

fn margin(net: f64, gross: f64) -> Option<f64> {
    if gross == 0.0 {
        None
    } else {
        Some(round2(net / gross * 100.0))
    }
}

impl Report for ProfitReport {
    type View = ProfitView;
    type Metrics = ProfitMetrics;

    fn metrics(&self, view: ProfitView) -> ProfitMetrics {
        let series = self.measures.get(view);
        let derived = derive_metrics(series, &self.quarterly(view), self.reported_total(view));
        let total_gross_profit = self.total(ProfitView::Gross);
        let total_net_profit = self.total(ProfitView::Net);
        let net_margin = margin(total_net_profit, total_gross_profit);

        let mut insights = base_insights(view.label(), &derived);
        if let Some(m) = net_margin {
            insights.push(format!("Net margin for the year is {}", format_percent(m)));
        }

        ProfitMetrics {
            derived,
            total_gross_profit,
            total_net_profit,
            net_margin,
            insights,
        }
    }

    fn chart(&self, view: ProfitView) -> ChartData {
        chart_for_view(&self.measures, view)
    }

    /// Columns: Gross Profit, Net Profit, Net Margin (%). A month with no
    /// gross profit shows a margin of `0`.
    fn table(&self) -> Vec<TableRow> {
        self.measures
            .aligned_rows()
            .into_iter()
            .map(|(period, mut values)| {
                let m = margin(values[ProfitView::Net.index()], values[ProfitView::Gross.index()]);
                values.push(m.unwrap_or(0.0));
                TableRow { period, values }
            })
            .collect()
    }

    fn csv(&self) -> CsvTable {
        let rows = self.table();
        let gross: f64 = rows.iter().map(|r| r.values[0]).sum();
        let net: f64 = rows.iter().map(|r| r.values[1]).sum();
        CsvTable {
            headers: ["Month", "Gross Profit", "Net Profit", "Net Margin (%)"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows,
            total: TableRow {
                period: TOTAL_ROW_LABEL.to_string(),
                values: vec![gross, net, margin(net, gross).unwrap_or(0.0)],
            },
        }
    }
}

fn monthly(response: &ProfitAnalysisResponse, view: ProfitView) -> &PeriodMap {
    match view {
        ProfitView::Gross => &response.monthly_gross_profit,
        ProfitView::Net => &response.monthly_net_profit,
    }
}

fn quarterly(response: &ProfitAnalysisResponse, view: ProfitView) -> &PeriodMap {
    match view {
        ProfitView::Gross => &response.quarterly_gross_profit,
        ProfitView::Net => &response.quarterly_net_profit,
    }
}
