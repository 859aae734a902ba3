//! Dashboard widget layout: display order, chart type and visibility per widget.
//!
//! The layout lives in memory only. A new [`WidgetLayout`] always starts from
//! [`DEFAULT_WIDGETS`], so reordering does not survive a restart.

use std::collections::HashMap;

use crate::error::{FinboardError, Result};
use crate::models::{ChartType, WidgetConfig};

/// Initial dashboard widgets and their chart types, in display order.
pub const DEFAULT_WIDGETS: &[(&str, ChartType)] = &[
    ("revenue", ChartType::Line),
    ("cash-flow", ChartType::Bar),
    ("profit", ChartType::Line),
    ("profit-and-loss", ChartType::Bar),
    ("expenses", ChartType::Pie),
];

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetLayout {
    order: Vec<String>,
    chart_types: HashMap<String, ChartType>,
    enabled: HashMap<String, bool>,
}

impl Default for WidgetLayout {
    fn default() -> Self {
        Self::with_widgets(DEFAULT_WIDGETS.iter().map(|(id, t)| (id.to_string(), *t)))
    }
}

impl WidgetLayout {
    /// Layout with the default widgets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout with the given widgets, all enabled. Later duplicates are ignored.
    pub fn with_widgets<I>(widgets: I) -> Self
    where
        I: IntoIterator<Item = (String, ChartType)>,
    {
        let mut order = Vec::new();
        let mut chart_types = HashMap::new();
        let mut enabled = HashMap::new();
        for (id, chart_type) in widgets {
            if chart_types.contains_key(&id) {
                continue;
            }
            chart_types.insert(id.clone(), chart_type);
            enabled.insert(id.clone(), true);
            order.push(id);
        }
        Self {
            order,
            chart_types,
            enabled,
        }
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Move the widget at `source` so it ends up at `destination`.
    ///
    /// The widget is removed first and then inserted, so moving index 0 to 2
    /// in `[A, B, C, D]` gives `[B, C, A, D]`. Equal indexes change nothing.
    pub fn reorder(&mut self, source: usize, destination: usize) -> Result<()> {
        let len = self.order.len();
        if source >= len || destination >= len {
            return Err(FinboardError::InvalidArgument(format!(
                "cannot move widget {} to {} in a layout of {}",
                source, destination, len
            )));
        }
        if source == destination {
            return Ok(());
        }
        let id = self.order.remove(source);
        self.order.insert(destination, id);
        Ok(())
    }

    pub fn chart_type(&self, id: &str) -> Option<ChartType> {
        self.chart_types.get(id).copied()
    }

    pub fn set_chart_type(&mut self, id: &str, chart_type: ChartType) -> Result<()> {
        match self.chart_types.get_mut(id) {
            Some(t) => {
                *t = chart_type;
                Ok(())
            }
            None => Err(FinboardError::NotFound(format!("widget '{}'", id))),
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.get(id).copied().unwrap_or(false)
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        match self.enabled.get_mut(id) {
            Some(e) => {
                *e = enabled;
                Ok(())
            }
            None => Err(FinboardError::NotFound(format!("widget '{}'", id))),
        }
    }

    /// Enabled widget ids in display order.
    pub fn visible(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|id| self.is_enabled(id))
            .map(String::as_str)
            .collect()
    }

    /// Widget save payload, one entry per widget in display order.
    pub fn to_configs(&self) -> Vec<WidgetConfig> {
        self.order
            .iter()
            .map(|id| WidgetConfig {
                widget_name: id.clone(),
                chart_type: self.chart_types[id],
                chart_enable_or_disable: self.is_enabled(id),
            })
            .collect()
    }
}
