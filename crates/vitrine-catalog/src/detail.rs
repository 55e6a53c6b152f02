//! Detail panel (modal) for a single product

use crate::config::Labels;
use crate::error::{CatalogError, Result};
use crate::model::{Product, ProductId};
use serde::Serialize;
use std::cell::RefCell;

/// Hands a download link to something that can follow it.
pub trait Navigator {
    fn navigate(&self, link: &str) -> Result<()>;
}

/// Opens links with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn navigate(&self, link: &str) -> Result<()> {
        open::that(link).map_err(|source| CatalogError::Navigation {
            link: link.to_string(),
            source,
        })
    }
}

/// Records links instead of following them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, link: &str) -> Result<()> {
        self.visited.borrow_mut().push(link.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open { product_id: ProductId },
    /// Download triggered; stays here until the panel is closed
    DownloadPending { product_id: ProductId },
}

/// The panel's single action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionControl {
    pub label: String,
    pub enabled: bool,
    pub pending: bool,
}

/// Field values shown by the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub id: ProductId,
    pub title: String,
    pub size: String,
    pub version: String,
    pub compatibility: String,
    pub description_lines: Vec<String>,
    pub download_link: String,
}

impl DetailView {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            size: product.size.clone(),
            version: product.version.clone(),
            compatibility: product.compatibility.clone(),
            description_lines: product
                .description_lines()
                .into_iter()
                .map(str::to_string)
                .collect(),
            download_link: product.download_link.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailPanel {
    state: PanelState,
    view: Option<DetailView>,
    action: ActionControl,
    download_label: String,
    downloading_label: String,
}

impl DetailPanel {
    pub fn new(labels: &Labels) -> Self {
        Self {
            state: PanelState::Closed,
            view: None,
            action: default_action(&labels.download),
            download_label: labels.download.clone(),
            downloading_label: labels.downloading.clone(),
        }
    }

    /// Show `product`. The action control is reset before anything is shown.
    pub fn open(&mut self, product: &Product) {
        self.action = default_action(&self.download_label);
        self.view = Some(DetailView::from_product(product));
        self.state = PanelState::Open {
            product_id: product.id,
        };
    }

    /// Start the download for the open product.
    ///
    /// Returns `Ok(false)` when the panel is closed or a download is already
    /// pending. The control stays pending even if navigation fails.
    pub fn trigger_download(&mut self, navigator: &dyn Navigator) -> Result<bool> {
        let product_id = match self.state {
            PanelState::Open { product_id } => product_id,
            PanelState::Closed | PanelState::DownloadPending { .. } => return Ok(false),
        };
        let Some(view) = &self.view else {
            return Ok(false);
        };

        self.action = ActionControl {
            label: self.downloading_label.clone(),
            enabled: false,
            pending: true,
        };
        self.state = PanelState::DownloadPending { product_id };

        log::debug!("Navigating to {}", view.download_link);
        navigator.navigate(&view.download_link)?;
        Ok(true)
    }

    pub fn close(&mut self) {
        self.state = PanelState::Closed;
        self.view = None;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, PanelState::Closed)
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn view(&self) -> Option<&DetailView> {
        self.view.as_ref()
    }

    pub fn action(&self) -> &ActionControl {
        &self.action
    }
}

fn default_action(label: &str) -> ActionControl {
    ActionControl {
        label: label.to_string(),
        enabled: true,
        pending: false,
    }
}
