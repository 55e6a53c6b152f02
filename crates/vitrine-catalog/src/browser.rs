//! Browsing state: query, debounced search, pagination, card list and detail panel
//!
//! `Browser` is front-end agnostic. Every user action is a method call, time
//! is passed in explicitly, and each method that changes the card list returns
//! the [`RenderUpdate`] describing the change (also applied to the
//! browser's own [`CardList`]).

use crate::catalog::Catalog;
use crate::config::{Labels, VitrineConfig};
use crate::debounce::Debouncer;
use crate::detail::{DetailPanel, Navigator};
use crate::error::Result;
use crate::model::{Product, ProductId};
use crate::paginate::Paginator;
use crate::render::{self, CardList, ListChange, RenderUpdate};
use crate::search;
use std::time::Instant;

pub struct Browser {
    labels: Labels,
    catalog: Option<Catalog>,
    /// Current text of the search input
    query: String,
    /// Query the card list was last rendered for
    applied_query: String,
    /// Search requested before the catalog finished loading
    deferred: Option<String>,
    debouncer: Debouncer<String>,
    paginator: Paginator<ProductId>,
    list: CardList,
    detail: DetailPanel,
    searches_run: usize,
}

impl Browser {
    pub fn new(config: &VitrineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            labels: config.labels.clone(),
            catalog: None,
            query: String::new(),
            applied_query: String::new(),
            deferred: None,
            debouncer: Debouncer::new(config.debounce_window()),
            paginator: Paginator::new(config.page_size)?,
            list: CardList::loading(),
            detail: DetailPanel::new(&config.labels),
            searches_run: 0,
        })
    }

    /// A browser with `catalog` already loaded and shown unfiltered.
    pub fn with_catalog(config: &VitrineConfig, catalog: Catalog) -> Result<Self> {
        let mut browser = Self::new(config)?;
        browser.load_catalog(catalog);
        Ok(browser)
    }

    /// Install the loaded catalog and render the first page. A search
    /// requested while loading is applied now; otherwise the catalog is
    /// shown unfiltered. The catalog is installed once; later calls are
    /// ignored and return `None`.
    pub fn load_catalog(&mut self, catalog: Catalog) -> Option<RenderUpdate> {
        if self.is_loaded() {
            log::warn!(
                "Ignoring second catalog load ({} products), catalog already installed",
                catalog.len()
            );
            return None;
        }
        let query = self.deferred.take().unwrap_or_default();
        log::debug!(
            "Catalog ready with {} products, initial query {:?}",
            catalog.len(),
            query
        );
        let catalog = self.catalog.insert(catalog);
        let update = render_query(catalog, &mut self.paginator, &self.labels, &query);
        self.finish_search(query, &update);
        Some(update)
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// Record typed text and (re)start the debounce window.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.query = text.into();
        self.debouncer.schedule(self.query.clone(), now);
    }

    /// Run the debounced search if its quiet window has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<RenderUpdate> {
        let query = self.debouncer.poll(now)?;
        self.run_search(query)
    }

    /// Search for the current input right away, dropping any pending
    /// debounced search.
    pub fn search(&mut self) -> Option<RenderUpdate> {
        self.debouncer.cancel();
        self.run_search(self.query.clone())
    }

    /// Replace the input text and search immediately.
    pub fn search_for(&mut self, query: impl Into<String>) -> Option<RenderUpdate> {
        self.query = query.into();
        self.search()
    }

    /// Empty the query and show the whole catalog again.
    pub fn clear(&mut self) -> Option<RenderUpdate> {
        self.query.clear();
        self.search()
    }

    fn run_search(&mut self, query: String) -> Option<RenderUpdate> {
        let Some(catalog) = self.catalog.as_ref() else {
            log::debug!("Catalog not loaded yet, deferring search {query:?}");
            self.deferred = Some(query);
            return None;
        };
        let update = render_query(catalog, &mut self.paginator, &self.labels, &query);
        self.finish_search(query, &update);
        Some(update)
    }

    fn finish_search(&mut self, query: String, update: &RenderUpdate) {
        self.list.apply(update);
        self.applied_query = query;
        self.searches_run += 1;
    }

    /// Show the next page. `None` when nothing is left or the catalog is
    /// not loaded.
    pub fn load_more(&mut self) -> Option<RenderUpdate> {
        self.grow(|p| {
            p.advance();
        })
    }

    /// Grow the window until `page` is shown (or the list is exhausted).
    pub fn advance_to(&mut self, page: usize) -> Option<RenderUpdate> {
        self.grow(|p| p.advance_to(page))
    }

    fn grow(&mut self, step: impl FnOnce(&mut Paginator<ProductId>)) -> Option<RenderUpdate> {
        let catalog = self.catalog.as_ref()?;
        let before = self.paginator.visible_window().len();
        step(&mut self.paginator);
        let window = self.paginator.visible_window();
        if window.len() == before {
            return None;
        }

        let products = resolve(catalog, window);
        let fragments = render::render_increment(&products[..before], &products, &self.labels);
        let update = RenderUpdate {
            change: ListChange::Append(fragments),
            load_more_visible: self.paginator.has_more(),
        };
        self.list.apply(&update);
        Some(update)
    }

    /// Open the detail panel for the card carrying `id`.
    pub fn view_more(&mut self, id: ProductId) -> Result<()> {
        let Some(catalog) = self.catalog.as_ref() else {
            return Ok(());
        };
        match catalog.get(id) {
            Ok(product) => {
                self.detail.open(product);
                Ok(())
            }
            Err(e) => {
                log::warn!("View more for unknown product: {e}");
                Err(e)
            }
        }
    }

    pub fn trigger_download(&mut self, navigator: &dyn Navigator) -> Result<bool> {
        self.detail.trigger_download(navigator).inspect_err(|e| {
            log::warn!("Download navigation failed: {e}");
        })
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn list(&self) -> &CardList {
        &self.list
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn applied_query(&self) -> &str {
        &self.applied_query
    }

    /// The clear control is shown for a non-empty applied query.
    pub fn clear_visible(&self) -> bool {
        !self.applied_query.is_empty()
    }

    pub fn load_more_visible(&self) -> bool {
        self.is_loaded() && self.paginator.has_more()
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        match &self.catalog {
            Some(catalog) => resolve(catalog, self.paginator.visible_window()),
            None => Vec::new(),
        }
    }

    /// Size of the filtered list behind the visible window.
    pub fn filtered_len(&self) -> usize {
        self.paginator.source().len()
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Number of searches executed so far, including the initial one on load.
    pub fn searches_run(&self) -> usize {
        self.searches_run
    }
}

fn render_query(
    catalog: &Catalog,
    paginator: &mut Paginator<ProductId>,
    labels: &Labels,
    query: &str,
) -> RenderUpdate {
    let filtered = search::filter(catalog, query);
    paginator.reset(filtered.iter().map(|p| p.id).collect());
    let shown = paginator.visible_window().len();
    render::render_fresh(&filtered[..shown], paginator.has_more(), labels)
}

fn resolve<'a>(catalog: &'a Catalog, ids: &[ProductId]) -> Vec<&'a Product> {
    ids.iter().filter_map(|&id| catalog.find_by_id(id)).collect()
}
