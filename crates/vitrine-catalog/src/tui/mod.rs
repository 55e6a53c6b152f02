//! Interactive terminal browser for the catalog
//!
//! Architecture:
//! - Main thread: handles UI rendering, input events and the debounced search
//! - Loader thread: fetches and validates the catalog document once
//! - Communication via an mpsc channel (load result <- loader)
//!
//! Layout:
//! ```text
//! ╭─────────────────────────────────────────────────────────────╮
//! │ ▌ cam█                                 [Pesquisar] [Limpar] │
//! ╰─────────────────────────────────────────────────────────────╯
//! ╭ Catalog [6/8] ──────────────────────────────────────────────╮
//! │▌ Webcam Driver                                              │
//! │  img/webcam.png                                             │
//! │  [Ver Mais]                                                 │
//! │  ...                                                        │
//! ╰─────────────────────────────────────────────────────────────╯
//!                        [Carregar Mais]
//!   8 matches │ page 1 [Tab focus] [↑↓ select] [Esc quit]
//!   [toast]
//! ```

mod app;
mod input;
mod loader;
mod ui;

pub use app::run;
