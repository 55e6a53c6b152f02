//! Card projection and incremental list updates

use crate::config::Labels;
use crate::model::{Product, ProductId};
use serde::Serialize;

/// Number of placeholder cards shown while the catalog is loading.
pub const SKELETON_CARDS: usize = 3;

/// What a single card shows. `id` is the key its action dispatches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFragment {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub action_label: String,
}

impl CardFragment {
    pub fn from_product(product: &Product, labels: &Labels) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            action_label: labels.view_more.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// Clear the surface, then append these cards
    Replace(Vec<CardFragment>),
    /// Append these cards after the existing ones
    Append(Vec<CardFragment>),
    /// Clear the surface and show a single placeholder message
    NoResults(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderUpdate {
    pub change: ListChange,
    pub load_more_visible: bool,
}

/// Fragments for the products in `next` that are not already shown by
/// `previous`. `next` is expected to extend `previous`.
pub fn render_increment(
    previous: &[&Product],
    next: &[&Product],
    labels: &Labels,
) -> Vec<CardFragment> {
    let shared = previous
        .iter()
        .zip(next)
        .take_while(|(a, b)| a.id == b.id)
        .count();
    next[shared..]
        .iter()
        .map(|p| CardFragment::from_product(p, labels))
        .collect()
}

/// Update for a freshly filtered list: either the first page or the
/// no-results placeholder.
pub fn render_fresh(window: &[&Product], has_more: bool, labels: &Labels) -> RenderUpdate {
    if window.is_empty() {
        return RenderUpdate {
            change: ListChange::NoResults(labels.no_results.clone()),
            load_more_visible: false,
        };
    }
    RenderUpdate {
        change: ListChange::Replace(render_increment(&[], window, labels)),
        load_more_visible: has_more,
    }
}

/// The card container as the user sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardList {
    cards: Vec<CardFragment>,
    placeholder: Option<String>,
    loading: bool,
    load_more_visible: bool,
}

impl CardList {
    /// A list showing skeleton cards until the first update arrives.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, update: &RenderUpdate) {
        self.loading = false;
        match &update.change {
            ListChange::Replace(cards) => {
                self.cards = cards.clone();
                self.placeholder = None;
            }
            ListChange::Append(cards) => {
                self.cards.extend(cards.iter().cloned());
            }
            ListChange::NoResults(message) => {
                self.cards.clear();
                self.placeholder = Some(message.clone());
            }
        }
        self.load_more_visible = update.load_more_visible;
    }

    pub fn cards(&self) -> &[CardFragment] {
        &self.cards
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn skeleton_count(&self) -> usize {
        if self.loading { SKELETON_CARDS } else { 0 }
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }
}
