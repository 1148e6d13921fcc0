//! The outbound results-page URL, the flow's only externally visible output.

use std::fmt;

use url::form_urlencoded;

use partshop_core::types::SearchMeta;

use crate::path::CompletePath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsLink(String);

impl ResultsLink {
    /// Product-list shortcut: `<results_path>?query=<query>`.
    pub fn for_query(results_path: &str, query: &str) -> Self {
        let qs = form_urlencoded::Serializer::new(String::new()).append_pair("query", query).finish();
        Self(format!("{}?{}", results_path, qs))
    }

    /// Full selection. Search-type metadata and the original query are only
    /// forwarded when the backend tagged the search with a type.
    pub fn for_selection(
        results_path: &str,
        path: &CompletePath,
        meta: Option<&SearchMeta>,
        original_query: Option<&str>,
    ) -> Self {
        let mut qs = form_urlencoded::Serializer::new(String::new());
        qs.append_pair("brand", &path.brand.id)
            .append_pair("model", &path.model.id)
            .append_pair("variant", &path.variant.id)
            .append_pair("category", &path.category.id);
        if let Some(meta) = meta {
            qs.append_pair("searchType", &meta.search_type);
            if let Some(details) = &meta.details {
                qs.append_pair("searchTypeDetails", &details.to_string());
            }
            if let Some(query) = original_query {
                qs.append_pair("originalQuery", query);
            }
        }
        Self(format!("{}?{}", results_path, qs.finish()))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Decoded query parameters in order.
    pub fn params(&self) -> Vec<(String, String)> {
        let query = self.0.split_once('?').map_or("", |(_, q)| q);
        form_urlencoded::parse(query.as_bytes()).into_owned().collect()
    }

    pub fn param(&self, key: &str) -> Option<String> {
        self.params().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl fmt::Display for ResultsLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partshop_core::types::{Brand, Category, Model, Variant};
    use serde_json::json;

    fn path() -> CompletePath {
        CompletePath {
            brand: Brand { id: "b1".into(), name: "Maruti Suzuki".into() },
            model: Model { id: "m1".into(), name: "Swift".into() },
            category: Category { id: "c1".into(), name: "Brakes".into() },
            variant: Variant { id: "v1".into(), name: "VXi".into() },
        }
    }

    #[test]
    fn selection_without_metadata_has_four_ids() {
        let link = ResultsLink::for_selection("/shop/search-results", &path(), None, Some("swift"));
        assert_eq!(link.as_str(), "/shop/search-results?brand=b1&model=m1&variant=v1&category=c1");
    }

    #[test]
    fn metadata_and_original_query_are_appended() {
        let meta = SearchMeta { search_type: "model".into(), details: Some(json!({"matched": "swift"})) };
        let link = ResultsLink::for_selection("/shop/search-results", &path(), Some(&meta), Some("swift vxi"));
        assert_eq!(link.param("searchType").as_deref(), Some("model"));
        assert_eq!(link.param("searchTypeDetails").as_deref(), Some(r#"{"matched":"swift"}"#));
        assert_eq!(link.param("originalQuery").as_deref(), Some("swift vxi"));
        assert!(link.as_str().contains("originalQuery=swift+vxi"));
    }

    #[test]
    fn query_link_is_encoded() {
        let link = ResultsLink::for_query("/shop/search-results", "brake pad & disc");
        assert_eq!(link.as_str(), "/shop/search-results?query=brake+pad+%26+disc");
    }
}
