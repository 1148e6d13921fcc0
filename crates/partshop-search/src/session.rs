use partshop_core::traits::CatalogApi;

use crate::error::Result;
use crate::flow::{FlowContext, GuidedSearch, Resolution, SearchCommand, SearchRequest, SearchResponse};
use crate::link::ResultsLink;

/// Drives a [`GuidedSearch`] against a catalog backend, one request at a time.
pub struct SearchSession<C: CatalogApi> {
    api: C,
    flow: GuidedSearch,
}

impl<C: CatalogApi> SearchSession<C> {
    pub fn new(api: C, context: FlowContext) -> Self { Self { api, flow: GuidedSearch::new(context) } }

    pub fn flow(&self) -> &GuidedSearch { &self.flow }

    pub fn api(&self) -> &C { &self.api }

    /// Classify a query. Returns the results link when the query matched a
    /// product list directly.
    pub async fn submit(&mut self, query: &str) -> Result<Option<ResultsLink>> {
        let request = self.flow.submit(query)?;
        self.run(request).await
    }

    pub async fn choose_brand(&mut self, brand_id: &str) -> Result<()> {
        let request = self.flow.select_brand(brand_id)?;
        self.run(request).await.map(|_| ())
    }

    pub async fn choose_model(&mut self, model_id: &str) -> Result<()> {
        let request = self.flow.select_model(model_id)?;
        self.run(request).await.map(|_| ())
    }

    pub async fn choose_category(&mut self, category_id: &str) -> Result<()> {
        let request = self.flow.select_category(category_id)?;
        self.run(request).await.map(|_| ())
    }

    pub fn choose_variant(&mut self, variant_id: &str) -> Result<ResultsLink> { self.flow.select_variant(variant_id) }

    pub fn back(&mut self) -> bool { self.flow.back() }

    pub fn reset(&mut self) { self.flow.reset() }

    async fn run(&mut self, request: SearchRequest) -> Result<Option<ResultsLink>> {
        let response = match &request.command {
            SearchCommand::Classify(body) => self.api.classify(body).await.map(SearchResponse::Classified),
            SearchCommand::Categories { vehicle_type_id } => {
                self.api.categories_for_vehicle_type(vehicle_type_id).await.map(SearchResponse::Categories)
            }
            SearchCommand::Variants { model_id } => {
                self.api.variants_for_model(model_id).await.map(SearchResponse::Variants)
            }
        }
        .unwrap_or_else(SearchResponse::Failed);

        match self.flow.resolve(request.generation, response) {
            Resolution::Navigate(link) => Ok(Some(link)),
            Resolution::Stale => Ok(None),
            Resolution::Applied => match self.flow.error() {
                Some(error) => Err(error.clone()),
                None => Ok(None),
            },
        }
    }
}

impl<C: CatalogApi> std::fmt::Debug for SearchSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession").field("flow", &self.flow).finish_non_exhaustive()
    }
}
