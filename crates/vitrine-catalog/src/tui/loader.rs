//! Background catalog loader thread

use crate::catalog::{Catalog, LoadReport};
use crate::source::CatalogSource;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

/// Outcome of the one-shot catalog load
#[derive(Debug)]
pub enum LoadEvent {
    Loaded { catalog: Catalog, report: LoadReport },
    Failed(String),
}

/// Spawn the loader thread. It sends exactly one event and exits.
pub fn spawn_loader(source: CatalogSource, tx: Sender<LoadEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let event = match Catalog::load(&source) {
            Ok((catalog, report)) => LoadEvent::Loaded { catalog, report },
            Err(e) => {
                log::error!("Failed to load catalog from {source}: {e}");
                LoadEvent::Failed(e.to_string())
            }
        };
        let _ = tx.send(event);
    })
}
