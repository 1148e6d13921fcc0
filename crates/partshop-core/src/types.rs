//! Catalog records and the classification endpoint's wire format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

pub type EntityId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawRecord")]
pub struct Brand {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawRecord")]
pub struct Model {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawRecord")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

/// Variant records prefer `variant_name` over `name` when both are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawRecord")]
pub struct Variant {
    pub id: EntityId,
    pub name: String,
}

/// Catalog record as the backend sends it. Either id spelling and either
/// name spelling may appear, alone or together.
#[derive(Deserialize)]
struct RawRecord {
    id: Option<EntityId>,
    #[serde(rename = "_id")]
    object_id: Option<EntityId>,
    name: Option<String>,
    brand_name: Option<String>,
    model_name: Option<String>,
    category_name: Option<String>,
    variant_name: Option<String>,
}

impl RawRecord {
    /// Resolves `(id, name)`. A record without any name is labelled by its id.
    fn resolve(self, kind_name: fn(&Self) -> Option<&String>, kind_first: bool) -> std::result::Result<(EntityId, String), String> {
        let specific = kind_name(&self).filter(|n| !n.is_empty()).cloned();
        let generic = self.name.clone().filter(|n| !n.is_empty());
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .or(self.object_id.filter(|id| !id.is_empty()))
            .ok_or_else(|| "catalog record has neither `id` nor `_id`".to_string())?;
        let name = if kind_first { specific.or(generic) } else { generic.or(specific) };
        let name = name.unwrap_or_else(|| id.clone());
        Ok((id, name))
    }
}

impl TryFrom<RawRecord> for Brand {
    type Error = String;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, String> {
        let (id, name) = raw.resolve(|r| r.brand_name.as_ref(), false)?;
        Ok(Self { id, name })
    }
}

impl TryFrom<RawRecord> for Model {
    type Error = String;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, String> {
        let (id, name) = raw.resolve(|r| r.model_name.as_ref(), false)?;
        Ok(Self { id, name })
    }
}

impl TryFrom<RawRecord> for Category {
    type Error = String;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, String> {
        let (id, name) = raw.resolve(|r| r.category_name.as_ref(), false)?;
        Ok(Self { id, name })
    }
}

impl TryFrom<RawRecord> for Variant {
    type Error = String;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, String> {
        let (id, name) = raw.resolve(|r| r.variant_name.as_ref(), true)?;
        Ok(Self { id, name })
    }
}

/// Body of the classification request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifyRequest {
    pub query: String,
    pub limit: u32,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Brand,
    Model,
    Variant,
    Products,
    None,
    #[serde(other)]
    Unknown,
}

/// Prefix of the selection path the backend inferred on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectedPath {
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub model: Option<Model>,
}

/// `data` member of the classification response, before `results` is typed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationData {
    #[serde(rename = "type")]
    pub kind: MatchKind,
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub detected_path: Option<DetectedPath>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub search_type: Option<String>,
    #[serde(default)]
    pub search_type_details: Option<Value>,
}

/// The backend's guess at what a free-text query refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectedMatch {
    Brand(Vec<Brand>),
    Model { models: Vec<Model>, brand: Option<Brand> },
    Variant { variants: Vec<Variant>, brand: Option<Brand>, model: Option<Model> },
    ProductList { total: Option<u64> },
    None,
}

/// Search-type metadata forwarded untouched to the results page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMeta {
    pub search_type: String,
    pub details: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub matched: DetectedMatch,
    pub meta: Option<SearchMeta>,
}

impl Classification {
    pub fn new(matched: DetectedMatch) -> Self { Self { matched, meta: None } }

    pub fn with_meta(mut self, search_type: &str, details: Option<Value>) -> Self {
        self.meta = Some(SearchMeta { search_type: search_type.to_string(), details });
        self
    }
}

fn typed_results<T: serde::de::DeserializeOwned>(results: Vec<Value>) -> Result<Vec<T>> {
    results
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(Error::from))
        .collect()
}

impl TryFrom<ClassificationData> for Classification {
    type Error = Error;

    fn try_from(data: ClassificationData) -> Result<Self> {
        let path = data.detected_path.unwrap_or_default();
        let matched = match data.kind {
            MatchKind::Brand => DetectedMatch::Brand(typed_results(data.results)?),
            MatchKind::Model => DetectedMatch::Model { models: typed_results(data.results)?, brand: path.brand },
            MatchKind::Variant => DetectedMatch::Variant {
                variants: typed_results(data.results)?,
                brand: path.brand,
                model: path.model,
            },
            MatchKind::Products => DetectedMatch::ProductList { total: data.total },
            MatchKind::None | MatchKind::Unknown => DetectedMatch::None,
        };
        let meta = data
            .search_type
            .filter(|s| !s.is_empty())
            .map(|search_type| SearchMeta { search_type, details: data.search_type_details });
        Ok(Self { matched, meta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: Value) -> Classification {
        let data: ClassificationData = serde_json::from_value(value).expect("wire data");
        Classification::try_from(data).expect("typed")
    }

    #[test]
    fn model_match_carries_detected_brand() {
        let c = classify(json!({
            "type": "model",
            "results": [{"_id": "m1", "model_name": "Swift"}],
            "detectedPath": {"brand": {"id": "b1", "name": "Maruti Suzuki"}},
            "searchType": "model",
            "searchTypeDetails": {"confidence": 0.9}
        }));
        match c.matched {
            DetectedMatch::Model { models, brand } => {
                assert_eq!(models, vec![Model { id: "m1".into(), name: "Swift".into() }]);
                assert_eq!(brand.map(|b| b.id), Some("b1".to_string()));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(c.meta.map(|m| m.search_type), Some("model".to_string()));
    }

    #[test]
    fn variant_name_preferred_over_name() {
        let v: Variant = serde_json::from_value(json!({"id": "v1", "name": "x", "variant_name": "VXi"})).unwrap();
        assert_eq!(v.name, "VXi");
        let v: Variant = serde_json::from_value(json!({"_id": "v2", "name": "ZXi"})).unwrap();
        assert_eq!(v, Variant { id: "v2".into(), name: "ZXi".into() });
    }

    #[test]
    fn records_with_both_id_and_name_spellings_decode() {
        let b: Brand = serde_json::from_value(json!({"_id": "b1", "id": "b1", "brand_name": "Maruti Suzuki"})).unwrap();
        assert_eq!(b, Brand { id: "b1".into(), name: "Maruti Suzuki".into() });
        let b: Brand = serde_json::from_value(json!({"_id": "b2", "name": "Hyundai", "brand_name": "Hyundai Motors"})).unwrap();
        assert_eq!(b.name, "Hyundai");
        let c: Category = serde_json::from_value(json!({"_id": "c1", "category_name": "Brakes"})).unwrap();
        assert_eq!(c.name, "Brakes");
    }

    #[test]
    fn classification_with_duplicate_spellings_lists_brands() {
        let c = classify(json!({
            "type": "brand",
            "results": [
                {"_id": "b1", "id": "b1", "brand_name": "Maruti Suzuki"},
                {"_id": "b2", "name": "Tata", "brand_name": "Tata Motors"}
            ]
        }));
        match c.matched {
            DetectedMatch::Brand(brands) => {
                let names: Vec<_> = brands.iter().map(|b| b.name.as_str()).collect();
                assert_eq!(names, vec!["Maruti Suzuki", "Tata"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nameless_variant_is_labelled_by_id() {
        let v: Variant = serde_json::from_value(json!({"_id": "v9"})).unwrap();
        assert_eq!(v, Variant { id: "v9".into(), name: "v9".into() });
    }

    #[test]
    fn record_without_id_is_rejected() {
        let err = serde_json::from_value::<Model>(json!({"model_name": "Swift"})).unwrap_err();
        assert!(err.to_string().contains("neither `id` nor `_id`"));
    }

    #[test]
    fn unknown_type_is_no_match() {
        let c = classify(json!({"type": "something-new", "results": []}));
        assert_eq!(c.matched, DetectedMatch::None);
        assert!(c.meta.is_none());
    }
}
