//! Financial overview: headline KPIs plus monthly revenue, expense and profit trends.

use serde::Serialize;

use super::Report;
use crate::export::{chart_for_view, ChartData, CsvTable, Dataset, TableRow};
use crate::metrics::{
    base_insights, derive_metrics, format_currency, sign_of, DerivedMetrics, MeasureSet,
    MeasureView, PeriodSeries, QuarterlyRollup, Sign,
};
use crate::models::{FinancialOverviewResponse, PeriodMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverviewView {
    Revenue,
    Expenses,
    Profit,
}

impl MeasureView for OverviewView {
    const ALL: &'static [Self] = &[OverviewView::Revenue, OverviewView::Expenses, OverviewView::Profit];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            OverviewView::Revenue => "Revenue",
            OverviewView::Expenses => "Expenses",
            OverviewView::Profit => "Profit",
        }
    }
}

/// One KPI card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: f64,
    pub formatted: String,
    pub sign: Sign,
}

impl KpiCard {
    fn new(title: &'static str, value: f64) -> Self {
        Self {
            title,
            value,
            formatted: format_currency(value),
            sign: sign_of(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub derived: DerivedMetrics,
    pub kpis: Vec<KpiCard>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewReport {
    response: FinancialOverviewResponse,
    measures: MeasureSet<OverviewView>,
}

impl OverviewReport {
    pub fn new(response: FinancialOverviewResponse) -> Self {
        let measures = MeasureSet::from_fn(|view| PeriodSeries::from_map(monthly(&response, view)));
        Self { response, measures }
    }

    pub fn response(&self) -> &FinancialOverviewResponse {
        &self.response
    }

    pub fn measures(&self) -> &MeasureSet<OverviewView> {
        &self.measures
    }

    fn total(&self, view: OverviewView) -> f64 {
        let reported = match view {
            OverviewView::Revenue => self.response.total_revenue,
            OverviewView::Expenses => self.response.total_expenses,
            OverviewView::Profit => self.response.net_profit,
        };
        reported.unwrap_or_else(|| self.measures.get(view).total())
    }

    /// Headline cards: revenue, expenses, net profit and, when reported, cash balance.
    pub fn kpis(&self) -> Vec<KpiCard> {
        let mut cards = vec![
            KpiCard::new("Total Revenue", self.total(OverviewView::Revenue)),
            KpiCard::new("Total Expenses", self.total(OverviewView::Expenses)),
            KpiCard::new("Net Profit", self.total(OverviewView::Profit)),
        ];
        if let Some(balance) = self.response.cash_balance {
            cards.push(KpiCard::new("Cash Balance", balance));
        }
        cards
    }

    /// Revenue and expenses on one chart, for the P&L widget.
    pub fn revenue_vs_expenses(&self) -> ChartData {
        let labels = self.measures.periods();
        let datasets = [OverviewView::Revenue, OverviewView::Expenses]
            .iter()
            .map(|v| {
                let series = self.measures.get(*v);
                Dataset {
                    label: v.label().to_string(),
                    data: labels.iter().map(|l| series.get(l).unwrap_or(0.0)).collect(),
                }
            })
            .collect();
        ChartData { labels, datasets }
    }
}

impl Report for OverviewReport {
    type View = OverviewView;
    type Metrics = OverviewMetrics;

    fn metrics(&self, view: OverviewView) -> OverviewMetrics {
        let series = self.measures.get(view);
        let rollup = QuarterlyRollup::from_monthly(series);
        let derived = derive_metrics(series, &rollup, Some(self.total(view)));
        let insights = base_insights(view.label(), &derived);
        OverviewMetrics {
            derived,
            kpis: self.kpis(),
            insights,
        }
    }

    fn chart(&self, view: OverviewView) -> ChartData {
        chart_for_view(&self.measures, view)
    }

    /// Columns: Revenue, Expenses, Profit.
    fn table(&self) -> Vec<TableRow> {
        self.measures
            .aligned_rows()
            .into_iter()
            .map(|(period, values)| TableRow { period, values })
            .collect()
    }

    fn csv(&self) -> CsvTable {
        let headers = ["Month", "Revenue", "Expenses", "Profit"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        CsvTable::with_column_totals(headers, self.table())
    }
}

fn monthly(response: &FinancialOverviewResponse, view: OverviewView) -> &PeriodMap {
    match view {
        OverviewView::Revenue => &response.monthly_revenue,
        OverviewView::Expenses => &response.monthly_expenses,
        OverviewView::Profit => &response.monthly_profit,
    }
}
