//! Catalog documents for tests

use serde_json::{Value, json};

/// A complete, valid product record.
pub fn product(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "image": format!("img/{id}.png"),
        "title": format!("{name} Setup"),
        "size": "12 MB",
        "version": "2.1",
        "compatibility": "Windows 10+",
        "download_link": format!("https://downloads.example.com/{id}.zip"),
    })
}

pub fn product_with_description(id: i64, name: &str, description: &str) -> Value {
    let mut record = product(id, name);
    record["description"] = Value::String(description.to_string());
    record
}

/// Serialize records as a catalog document.
pub fn catalog_json<I: IntoIterator<Item = Value>>(records: I) -> String {
    Value::Array(records.into_iter().collect()).to_string()
}

/// `n` products named "Product 1".."Product n".
pub fn numbered_catalog(n: i64) -> String {
    catalog_json((1..=n).map(|i| product(i, &format!("Product {i}"))))
}
