//! Dashboard widget configuration endpoint.

use crate::client::ApiClient;
use crate::config;
use crate::error::{FinboardError, Result};
use crate::layout::WidgetLayout;
use crate::models::{SaveWidgetsRequest, WidgetConfig};

pub struct WidgetApi<'a> {
    client: &'a ApiClient,
}

impl<'a> WidgetApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Save widget chart types and visibility.
    ///
    /// Fails with [`FinboardError::Validation`] before sending anything if the
    /// list is empty or a widget has no name.
    pub fn save(&self, widgets: &[WidgetConfig]) -> Result<()> {
        if widgets.is_empty() {
            return Err(FinboardError::Validation("at least one widget is required".into()));
        }
        if let Some(w) = widgets.iter().find(|w| w.widget_name.trim().is_empty()) {
            return Err(FinboardError::Validation(format!(
                "widget with chart type {:?} has no name",
                w.chart_type
            )));
        }
        let body = SaveWidgetsRequest {
            widgets: widgets.to_vec(),
        };
        let _: serde_json::Value = self.client.post_json(config::WIDGETS_PATH, &body)?;
        log::info!("Saved {} widget(s)", widgets.len());
        Ok(())
    }

    /// Save every widget of `layout` in its current order.
    pub fn save_layout(&self, layout: &WidgetLayout) -> Result<()> {
        self.save(&layout.to_configs())
    }
}
