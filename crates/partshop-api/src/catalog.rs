use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use partshop_core::traits::CatalogApi;
use partshop_core::types::{Category, Classification, ClassificationData, ClassifyRequest, Variant};
use partshop_core::Result;

use crate::envelope::Envelope;
use crate::ApiClient;

#[derive(Deserialize)]
struct CategoryList {
    #[serde(default)]
    categories: Vec<Category>,
}

/// The variants endpoint answers with either a bare array or an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum VariantsBody {
    Bare(Vec<Variant>),
    Wrapped(Envelope<Vec<Variant>>),
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn classify(&self, request: &ClassifyRequest) -> Result<Classification> {
        tracing::debug!(query = %request.query, limit = request.limit, page = request.page, "classifying query");
        let req = self.request(Method::POST, &["category", "api", "search", "classify"])?.json(request);
        let data: ClassificationData = self.send(req).await?;
        Classification::try_from(data)
    }

    async fn categories_for_vehicle_type(&self, vehicle_type_id: &str) -> Result<Vec<Category>> {
        let req = self.request(Method::GET, &["category", "api", "category", "type", vehicle_type_id])?;
        let list: CategoryList = self.send(req).await?;
        Ok(list.categories)
    }

    async fn variants_for_model(&self, model_id: &str) -> Result<Vec<Variant>> {
        let req = self.request(Method::GET, &["category", "api", "variant", "model", model_id])?;
        match self.send_raw::<VariantsBody>(req).await? {
            VariantsBody::Bare(variants) => Ok(variants),
            VariantsBody::Wrapped(env) => env.into_data(),
        }
    }
}
