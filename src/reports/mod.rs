//! Report pages: load state, view selection and per-report adapters.
//!
//! A [`ReportController`] tracks one report's `Idle → Loading → Ready | Error`
//! lifecycle. Each load is stamped with a generation number and a response is
//! only applied if its generation is still the latest, so switching years
//! quickly can never leave an older year's data on screen.

pub mod cash_flow;
pub mod overview;
pub mod profit;

pub use cash_flow::{CashFlowMetrics, CashFlowReport, CashFlowView};
pub use overview::{KpiCard, OverviewMetrics, OverviewReport, OverviewView};
pub use profit::{ProfitMetrics, ProfitReport, ProfitView};

use crate::error::Result;
use crate::export::{ChartData, CsvTable, TableRow};
use crate::metrics::MeasureView;

// ---------------------------------------------------------------------------
// LoadState
// ---------------------------------------------------------------------------

/// Lifecycle of one report's data. `year` is `None` for reports without a
/// year selector.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading { year: Option<i32> },
    Ready { year: Option<i32>, data: T },
    Error { year: Option<i32>, message: String },
}

/// Handle for one in-flight load. Pass it back to
/// [`ReportController::resolve`] with the fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub year: Option<i32>,
}

// ---------------------------------------------------------------------------
// ReportController
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ReportController<T> {
    state: LoadState<T>,
    generation: u64,
}

impl<T> Default for ReportController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ReportController<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Year of the current (or last requested) load.
    pub fn year(&self) -> Option<i32> {
        match &self.state {
            LoadState::Idle => None,
            LoadState::Loading { year }
            | LoadState::Ready { year, .. }
            | LoadState::Error { year, .. } => *year,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, LoadState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// Data of the last successful load; `None` while loading or after an error.
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Enter `Loading` for `year` and return the ticket for this load.
    ///
    /// Any ticket handed out earlier becomes stale.
    pub fn begin(&mut self, year: Option<i32>) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading { year };
        LoadTicket {
            generation: self.generation,
            year,
        }
    }

    /// Apply a fetch result. Returns `false` (and changes nothing) if the
    /// ticket is stale.
    pub fn resolve(&mut self, ticket: LoadTicket, result: Result<T>) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "Discarding stale response for {:?} (generation {} < {})",
                ticket.year,
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(data) => LoadState::Ready {
                year: ticket.year,
                data,
            },
            Err(e) => {
                log::warn!("Report load for {:?} failed: {}", ticket.year, e);
                LoadState::Error {
                    year: ticket.year,
                    message: e.to_string(),
                }
            }
        };
        true
    }

    /// Begin a load, run `fetch` synchronously and apply its result.
    pub fn load_with<F>(&mut self, year: Option<i32>, fetch: F) -> &LoadState<T>
    where
        F: FnOnce(Option<i32>) -> Result<T>,
    {
        let ticket = self.begin(year);
        let result = fetch(year);
        self.resolve(ticket, result);
        &self.state
    }
}

// ---------------------------------------------------------------------------
// Report / ReportPage
// ---------------------------------------------------------------------------

/// A loaded report that can be rendered under any of its views.
pub trait Report {
    type View: MeasureView;
    type Metrics;

    fn metrics(&self, view: Self::View) -> Self::Metrics;
    fn chart(&self, view: Self::View) -> ChartData;
    /// One row per period with every measure, in `View::ALL` order.
    fn table(&self) -> Vec<TableRow>;
    fn csv(&self) -> CsvTable;
}

/// A report page: its load controller plus the selected view.
#[derive(Debug)]
pub struct ReportPage<R: Report> {
    controller: ReportController<R>,
    view: R::View,
}

impl<R: Report> ReportPage<R> {
    pub fn new(view: R::View) -> Self {
        Self {
            controller: ReportController::new(),
            view,
        }
    }

    pub fn controller(&self) -> &ReportController<R> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ReportController<R> {
        &mut self.controller
    }

    pub fn view(&self) -> R::View {
        self.view
    }

    /// Switch the active measure. Derived output is recomputed on next access.
    pub fn set_view(&mut self, view: R::View) {
        self.view = view;
    }

    /// Initial load when the page is first shown.
    pub fn mount<F>(&mut self, year: Option<i32>, fetch: F) -> &LoadState<R>
    where
        F: FnOnce(Option<i32>) -> Result<R>,
    {
        self.controller.load_with(year, fetch)
    }

    /// Change the selected year, reloading only if it actually changed.
    ///
    /// Selecting the year already shown does not refetch, which also means an
    /// error for that year stays until a different year is picked.
    pub fn select_year<F>(&mut self, year: i32, fetch: F) -> &LoadState<R>
    where
        F: FnOnce(Option<i32>) -> Result<R>,
    {
        if !self.controller.is_idle() && self.controller.year() == Some(year) {
            return self.controller.state();
        }
        self.controller.load_with(Some(year), fetch)
    }

    pub fn report(&self) -> Option<&R> {
        self.controller.data()
    }

    pub fn metrics(&self) -> Option<R::Metrics> {
        self.report().map(|r| r.metrics(self.view))
    }

    pub fn chart(&self) -> Option<ChartData> {
        self.report().map(|r| r.chart(self.view))
    }

    pub fn table(&self) -> Option<Vec<TableRow>> {
        self.report().map(|r| r.table())
    }

    pub fn csv(&self) -> Option<CsvTable> {
        self.report().map(|r| r.csv())
    }
}

pub type CashFlowPage = ReportPage<CashFlowReport>;
pub type ProfitPage = ReportPage<ProfitReport>;
pub type OverviewPage = ReportPage<OverviewReport>;
