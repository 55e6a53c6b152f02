//! Catalog browsing core: loading, filtering, pagination, card rendering and
//! the detail panel, plus the terminal front end in [`tui`].

pub mod browser;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod model;
pub mod paginate;
pub mod render;
pub mod search;
pub mod source;
pub mod tui;

pub use browser::Browser;
pub use catalog::{Catalog, LoadReport, RejectedRecord};
pub use config::{Labels, VitrineConfig};
pub use debounce::Debouncer;
pub use detail::{
    ActionControl, DetailPanel, DetailView, Navigator, PanelState, RecordingNavigator,
    SystemNavigator,
};
pub use error::{CatalogError, Result};
pub use model::{Product, ProductId};
pub use paginate::Paginator;
pub use render::{CardFragment, CardList, ListChange, RenderUpdate};
pub use search::filter;
pub use source::CatalogSource;
