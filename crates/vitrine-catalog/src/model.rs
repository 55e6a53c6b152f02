use serde::{Deserialize, Serialize};

pub type ProductId = i64;

/// A single catalog record as published in the catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Long-form text; may contain line breaks
    #[serde(default)]
    pub description: Option<String>,
    /// Image resource reference (path or URL), shown on the card
    pub image: String,
    pub title: String,
    pub size: String,
    pub version: String,
    pub compatibility: String,
    pub download_link: String,
}

impl Product {
    /// Description split on line breaks. An absent description yields no lines.
    pub fn description_lines(&self) -> Vec<&str> {
        match self.description.as_deref() {
            Some(text) => text
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
pub(crate) fn product(id: ProductId, name: &str, description: Option<&str>) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        image: format!("img/{id}.png"),
        title: format!("{name} title"),
        size: "10 MB".to_string(),
        version: "1.0".to_string(),
        compatibility: "All".to_string(),
        download_link: format!("https://example.com/{id}.zip"),
    }
}
