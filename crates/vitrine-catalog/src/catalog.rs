//! In-memory catalog store
//!
//! The catalog is loaded once and never mutated afterwards. Records are
//! validated one by one; anything malformed is excluded and described in the
//! [`LoadReport`] instead of failing the whole load.

use crate::error::{CatalogError, Result};
use crate::model::{Product, ProductId};
use crate::source::CatalogSource;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

/// A record excluded at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// Position in the source array
    pub index: usize,
    pub id: Option<ProductId>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl Catalog {
    /// Fetch and parse the document behind `source`.
    pub fn load(source: &CatalogSource) -> Result<(Self, LoadReport)> {
        let text = source.fetch()?;
        let (catalog, report) = Self::from_json(&text)?;
        log::info!(
            "Loaded {} products from {} ({} rejected)",
            report.accepted,
            source,
            report.rejected.len()
        );
        Ok((catalog, report))
    }

    pub fn from_json(text: &str) -> Result<(Self, LoadReport)> {
        let document: Value = serde_json::from_str(text)?;
        let records = match document {
            Value::Array(records) => records,
            other => return Err(CatalogError::NotAnArray(json_kind(&other))),
        };

        let mut products = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());
        let mut report = LoadReport::default();

        for (position, record) in records.into_iter().enumerate() {
            let raw_id = record.get("id").and_then(Value::as_i64);
            let product = match serde_json::from_value::<Product>(record) {
                Ok(product) => product,
                Err(e) => {
                    log::warn!("Skipping catalog record {position}: {e}");
                    report.rejected.push(RejectedRecord {
                        index: position,
                        id: raw_id,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if index.contains_key(&product.id) {
                log::warn!(
                    "Skipping catalog record {position}: duplicate id {}",
                    product.id
                );
                report.rejected.push(RejectedRecord {
                    index: position,
                    id: Some(product.id),
                    reason: format!("duplicate id {}", product.id),
                });
                continue;
            }

            index.insert(product.id, products.len());
            products.push(product);
        }

        report.accepted = products.len();
        Ok((Self { products, index }, report))
    }

    /// Build a catalog from already-validated products. Later duplicates are dropped.
    pub fn from_products(items: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::default();
        for product in items {
            if catalog.index.contains_key(&product.id) {
                continue;
            }
            catalog.index.insert(product.id, catalog.products.len());
            catalog.products.push(product);
        }
        catalog
    }

    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&i| &self.products[i])
    }

    pub fn get(&self, id: ProductId) -> Result<&Product> {
        self.find_by_id(id).ok_or(CatalogError::UnknownProduct(id))
    }

    /// Products in document order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
