//! Wire models for the platform's entity endpoints

use serde::Deserialize;
use serde_json::Value;

/// One page of an entity listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    /// Raw entity documents; the `name` attribute identifies each entity.
    pub items: Vec<Value>,
    /// Total number of pages for the listing, including this one.
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_response_deserializes() {
        let raw = json!({
            "items": [{ "name": "author", "type": "STRING" }],
            "totalPages": 3
        });
        let page: PageResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_page_response_defaults_total_pages() {
        let raw = json!({ "items": [] });
        let page: PageResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(page.total_pages, 0);
    }
}
