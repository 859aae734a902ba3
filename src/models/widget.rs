use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ChartType — Rendering style of a dashboard widget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Area,
    Pie,
    Doughnut,
}

// ---------------------------------------------------------------------------
// WidgetConfig — One entry of the widget save payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub widget_name: String,
    pub chart_type: ChartType,
    pub chart_enable_or_disable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWidgetsRequest {
    pub widgets: Vec<WidgetConfig>,
}
