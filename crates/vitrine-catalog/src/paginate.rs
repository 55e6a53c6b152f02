//! Growing-window pagination

use crate::error::{CatalogError, Result};

/// A fixed-size window over a list that only grows, one page at a time.
///
/// The visible window is always the prefix
/// `source[..min(current_page * page_size, len)]`.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    page_size: usize,
    current_page: usize,
    source: Vec<T>,
}

impl<T> Paginator<T> {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(CatalogError::Config(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            page_size,
            current_page: 1,
            source: Vec::new(),
        })
    }

    /// Replace the source list and go back to page 1.
    pub fn reset(&mut self, source: Vec<T>) {
        self.source = source;
        self.current_page = 1;
    }

    fn window_len(&self) -> usize {
        self.current_page
            .saturating_mul(self.page_size)
            .min(self.source.len())
    }

    pub fn visible_window(&self) -> &[T] {
        &self.source[..self.window_len()]
    }

    pub fn has_more(&self) -> bool {
        self.source.len() > self.current_page.saturating_mul(self.page_size)
    }

    /// Show one more page. Returns false (and changes nothing) when the
    /// window already covers the whole list.
    pub fn advance(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Advance until `page` is reached or nothing is left to show.
    pub fn advance_to(&mut self, page: usize) {
        while self.current_page < page && self.advance() {}
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }
}
