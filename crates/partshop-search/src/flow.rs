//! Sans-IO guided search machine.
//!
//! Callers ask the machine for a [`SearchRequest`], perform it however they
//! like, and hand the result back through [`GuidedSearch::resolve`] together
//! with the request's generation. Every new request and every back
//! navigation bumps the generation; a response carrying an older generation
//! is dropped.

use partshop_core::config::Settings;
use partshop_core::types::{
    Brand, Category, Classification, ClassifyRequest, DetectedMatch, Model, SearchMeta, Variant,
};

use crate::error::{FlowError, Result, StepKind};
use crate::link::ResultsLink;
use crate::path::SelectionPath;
use crate::state::{BrandStep, CategoryStep, ModelStep, SearchState, VariantOrigin, VariantStep};

/// Inputs the flow needs from outside the search modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowContext {
    pub vehicle_type_id: Option<String>,
    pub limit: u32,
    pub page: u32,
    pub results_path: String,
}

impl FlowContext {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            vehicle_type_id: settings.session.vehicle_type_id.clone(),
            limit: settings.search.limit,
            page: settings.search.page,
            results_path: settings.search.results_path.clone(),
        }
    }
}

impl Default for FlowContext {
    fn default() -> Self { Self::from_settings(&Settings::default()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Classify(ClassifyRequest),
    Categories { vehicle_type_id: String },
    Variants { model_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub command: SearchCommand,
}

#[derive(Debug)]
pub enum SearchResponse {
    Classified(Classification),
    Categories(Vec<Category>),
    Variants(Vec<Variant>),
    Failed(partshop_core::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The response updated the flow (possibly into an error banner).
    Applied,
    /// The response belonged to an outdated request and was ignored.
    Stale,
    /// The flow is finished; navigate here.
    Navigate(ResultsLink),
}

#[derive(Debug, Clone)]
enum Pending {
    Query,
    ModelsOf(Brand),
    CategoriesFor(Model),
    VariantsFor(Category),
}

#[derive(Debug)]
pub struct GuidedSearch {
    context: FlowContext,
    state: SearchState,
    generation: u64,
    pending: Option<Pending>,
    error: Option<FlowError>,
    query: Option<String>,
    meta: Option<SearchMeta>,
}

impl GuidedSearch {
    pub fn new(context: FlowContext) -> Self {
        Self { context, state: SearchState::Search, generation: 0, pending: None, error: None, query: None, meta: None }
    }

    pub fn state(&self) -> &SearchState { &self.state }

    pub fn step(&self) -> StepKind { self.state.kind() }

    pub fn path(&self) -> SelectionPath { self.state.path() }

    pub fn error(&self) -> Option<&FlowError> { self.error.as_ref() }

    pub fn is_loading(&self) -> bool { self.pending.is_some() }

    pub fn generation(&self) -> u64 { self.generation }

    pub fn query(&self) -> Option<&str> { self.query.as_deref() }

    pub fn context(&self) -> &FlowContext { &self.context }

    /// Drop everything and start over on an empty search step.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::new(self.context.clone());
        self.generation = generation;
    }

    pub fn submit(&mut self, query: &str) -> Result<SearchRequest> {
        self.require_step(StepKind::Search)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(self.fail(FlowError::EmptyQuery));
        }
        self.query = Some(query.to_string());
        self.meta = None;
        Ok(self.issue(Pending::Query, self.classify_command(query)))
    }

    pub fn select_brand(&mut self, brand_id: &str) -> Result<SearchRequest> {
        self.require_idle(StepKind::Brand)?;
        let brand = match &self.state {
            SearchState::Brand(step) => step.find(brand_id).cloned(),
            _ => None,
        };
        let brand = brand.ok_or_else(|| self.fail(FlowError::UnknownOption(brand_id.to_string())))?;
        let command = self.classify_command(&brand.name);
        Ok(self.issue(Pending::ModelsOf(brand), command))
    }

    pub fn select_model(&mut self, model_id: &str) -> Result<SearchRequest> {
        self.require_idle(StepKind::Model)?;
        let model = match &self.state {
            SearchState::Model(step) => step.find(model_id).cloned(),
            _ => None,
        };
        let model = model.ok_or_else(|| self.fail(FlowError::UnknownOption(model_id.to_string())))?;
        let vehicle_type_id = self
            .context
            .vehicle_type_id
            .clone()
            .ok_or_else(|| self.fail(FlowError::NoVehicleType))?;
        Ok(self.issue(Pending::CategoriesFor(model), SearchCommand::Categories { vehicle_type_id }))
    }

    pub fn select_category(&mut self, category_id: &str) -> Result<SearchRequest> {
        self.require_idle(StepKind::Category)?;
        let (category, model_id) = match &self.state {
            SearchState::Category(step) => (step.find(category_id).cloned(), step.model().id.clone()),
            _ => (None, String::new()),
        };
        let category = category.ok_or_else(|| self.fail(FlowError::UnknownOption(category_id.to_string())))?;
        Ok(self.issue(Pending::VariantsFor(category), SearchCommand::Variants { model_id }))
    }

    /// Finish the flow. Brand, model and category must all be known.
    pub fn select_variant(&mut self, variant_id: &str) -> Result<ResultsLink> {
        self.require_idle(StepKind::Variant)?;
        let (variant, prefix) = match &self.state {
            SearchState::Variant(step) => (step.find(variant_id).cloned(), step.prefix()),
            _ => (None, SelectionPath::default()),
        };
        let variant = variant.ok_or_else(|| self.fail(FlowError::UnknownOption(variant_id.to_string())))?;
        let complete = SelectionPath { variant: Some(variant), ..prefix }
            .complete()
            .map_err(|e| self.fail(e))?;
        let link = ResultsLink::for_selection(
            &self.context.results_path,
            &complete,
            self.meta.as_ref(),
            self.query.as_deref(),
        );
        Ok(self.close(link))
    }

    /// Go to the immediately preceding step. Any request in flight becomes stale.
    pub fn back(&mut self) -> bool {
        let current = std::mem::take(&mut self.state);
        match current.clone().previous() {
            Some(previous) => {
                tracing::debug!(from = %current.kind(), to = %previous.kind(), "search step back");
                self.state = previous;
                self.generation += 1;
                self.pending = None;
                self.error = None;
                true
            }
            None => {
                self.state = current;
                false
            }
        }
    }

    pub fn resolve(&mut self, generation: u64, response: SearchResponse) -> Resolution {
        if generation != self.generation || self.pending.is_none() {
            tracing::debug!(generation, current = self.generation, "discarding stale search response");
            return Resolution::Stale;
        }
        let Some(pending) = self.pending.take() else { return Resolution::Stale };

        match (pending, response) {
            (_, SearchResponse::Failed(e)) => {
                tracing::warn!(error = %e, step = %self.step(), "search request failed");
                self.error = Some(FlowError::Request);
                Resolution::Applied
            }
            (Pending::Query, SearchResponse::Classified(c)) => self.apply_classification(c),
            (Pending::ModelsOf(brand), SearchResponse::Classified(c)) => {
                self.meta = c.meta.or(self.meta.take());
                match c.matched {
                    DetectedMatch::Model { models, .. } if !models.is_empty() => {
                        let previous = match std::mem::take(&mut self.state) {
                            SearchState::Brand(step) => step,
                            _ => BrandStep::default(),
                        };
                        self.enter(SearchState::Model(ModelStep { previous, brand: Some(brand), models }))
                    }
                    _ => self.refuse(FlowError::NoModels),
                }
            }
            (Pending::CategoriesFor(model), SearchResponse::Categories(categories)) => {
                if categories.is_empty() {
                    return self.refuse(FlowError::NoCategories);
                }
                match std::mem::take(&mut self.state) {
                    SearchState::Model(previous) => {
                        self.enter(SearchState::Category(CategoryStep { previous, model, categories }))
                    }
                    other => self.mismatch(other),
                }
            }
            (Pending::VariantsFor(category), SearchResponse::Variants(variants)) => {
                if variants.is_empty() {
                    return self.refuse(FlowError::NoVariants);
                }
                match std::mem::take(&mut self.state) {
                    SearchState::Category(previous) => self.enter(SearchState::Variant(VariantStep {
                        origin: VariantOrigin::Selected { previous, category },
                        variants,
                    })),
                    other => self.mismatch(other),
                }
            }
            (_, response) => {
                tracing::warn!(?response, step = %self.step(), "response does not match the pending request");
                self.error = Some(FlowError::Request);
                Resolution::Applied
            }
        }
    }

    fn apply_classification(&mut self, classification: Classification) -> Resolution {
        self.meta = classification.meta;
        let query = self.query.clone().unwrap_or_default();
        match classification.matched {
            DetectedMatch::Brand(brands) if !brands.is_empty() => {
                self.enter(SearchState::Brand(BrandStep { brands }))
            }
            DetectedMatch::Model { models, brand } if !models.is_empty() => {
                self.enter(SearchState::Model(ModelStep::inferred(brand, models)))
            }
            DetectedMatch::Variant { variants, brand, model } if !variants.is_empty() => {
                self.enter(SearchState::Variant(VariantStep { origin: VariantOrigin::Inferred { brand, model }, variants }))
            }
            DetectedMatch::ProductList { .. } => {
                let link = ResultsLink::for_query(&self.context.results_path, &query);
                Resolution::Navigate(self.close(link))
            }
            _ => self.refuse(FlowError::NoResults(query)),
        }
    }

    fn classify_command(&self, query: &str) -> SearchCommand {
        SearchCommand::Classify(ClassifyRequest {
            query: query.to_string(),
            limit: self.context.limit,
            page: self.context.page,
        })
    }

    fn issue(&mut self, pending: Pending, command: SearchCommand) -> SearchRequest {
        self.generation += 1;
        self.pending = Some(pending);
        self.error = None;
        tracing::debug!(generation = self.generation, step = %self.step(), ?command, "search request issued");
        SearchRequest { generation: self.generation, command }
    }

    fn enter(&mut self, state: SearchState) -> Resolution {
        tracing::debug!(step = %state.kind(), "search step entered");
        self.state = state;
        self.error = None;
        Resolution::Applied
    }

    fn refuse(&mut self, error: FlowError) -> Resolution {
        self.error = Some(error);
        Resolution::Applied
    }

    fn mismatch(&mut self, state: SearchState) -> Resolution {
        tracing::warn!(step = %state.kind(), "search state changed under a pending request");
        self.state = state;
        self.refuse(FlowError::Request)
    }

    fn close(&mut self, link: ResultsLink) -> ResultsLink {
        tracing::info!(link = %link, "search flow finished");
        self.state = SearchState::Closed(link.clone());
        self.pending = None;
        self.error = None;
        link
    }

    fn fail(&mut self, error: FlowError) -> FlowError {
        self.error = Some(error.clone());
        error
    }

    fn require_step(&self, step: StepKind) -> Result<()> {
        if self.step() == step { Ok(()) } else { Err(FlowError::WrongStep(self.step())) }
    }

    fn require_idle(&self, step: StepKind) -> Result<()> {
        self.require_step(step)?;
        if self.is_loading() { Err(FlowError::Busy) } else { Ok(()) }
    }
}

impl Default for GuidedSearch {
    fn default() -> Self { Self::new(FlowContext::default()) }
}
