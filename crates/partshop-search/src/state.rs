//! Steps of the guided search as a tagged union.
//!
//! Each step owns the step it was entered from, so going back restores the
//! previous list without refetching. A category step always knows its model,
//! and a variant step entered by explicit selection always knows its category.

use partshop_core::types::{Brand, Category, Model, Variant};

use crate::error::StepKind;
use crate::link::ResultsLink;
use crate::path::SelectionPath;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandStep {
    pub(crate) brands: Vec<Brand>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStep {
    pub(crate) previous: BrandStep,
    pub(crate) brand: Option<Brand>,
    pub(crate) models: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStep {
    pub(crate) previous: ModelStep,
    pub(crate) model: Model,
    pub(crate) categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantOrigin {
    /// Reached by picking a category.
    Selected { previous: CategoryStep, category: Category },
    /// Reached straight from a `variant` classification; holds whatever
    /// prefix the backend inferred.
    Inferred { brand: Option<Brand>, model: Option<Model> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantStep {
    pub(crate) origin: VariantOrigin,
    pub(crate) variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Search,
    Brand(BrandStep),
    Model(ModelStep),
    Category(CategoryStep),
    Variant(VariantStep),
    /// The flow navigated away; nothing else can happen.
    Closed(ResultsLink),
}

impl BrandStep {
    pub fn brands(&self) -> &[Brand] { &self.brands }

    pub(crate) fn find(&self, id: &str) -> Option<&Brand> { self.brands.iter().find(|b| b.id == id) }
}

impl ModelStep {
    pub(crate) fn inferred(brand: Option<Brand>, models: Vec<Model>) -> Self {
        Self { previous: BrandStep::default(), brand, models }
    }

    pub fn brand(&self) -> Option<&Brand> { self.brand.as_ref() }

    pub fn models(&self) -> &[Model] { &self.models }

    pub(crate) fn find(&self, id: &str) -> Option<&Model> { self.models.iter().find(|m| m.id == id) }
}

impl CategoryStep {
    pub fn brand(&self) -> Option<&Brand> { self.previous.brand() }

    pub fn model(&self) -> &Model { &self.model }

    pub fn categories(&self) -> &[Category] { &self.categories }

    pub(crate) fn find(&self, id: &str) -> Option<&Category> { self.categories.iter().find(|c| c.id == id) }
}

impl VariantStep {
    pub fn origin(&self) -> &VariantOrigin { &self.origin }

    pub fn variants(&self) -> &[Variant] { &self.variants }

    pub(crate) fn find(&self, id: &str) -> Option<&Variant> { self.variants.iter().find(|v| v.id == id) }

    /// Path up to, but not including, the variant.
    pub fn prefix(&self) -> SelectionPath {
        match &self.origin {
            VariantOrigin::Selected { previous, category } => SelectionPath {
                brand: previous.brand().cloned(),
                model: Some(previous.model.clone()),
                category: Some(category.clone()),
                variant: None,
            },
            VariantOrigin::Inferred { brand, model } => SelectionPath {
                brand: brand.clone(),
                model: model.clone(),
                category: None,
                variant: None,
            },
        }
    }
}

impl SearchState {
    pub fn kind(&self) -> StepKind {
        match self {
            SearchState::Search => StepKind::Search,
            SearchState::Brand(_) => StepKind::Brand,
            SearchState::Model(_) => StepKind::Model,
            SearchState::Category(_) => StepKind::Category,
            SearchState::Variant(_) => StepKind::Variant,
            SearchState::Closed(_) => StepKind::Closed,
        }
    }

    /// Selections committed by the steps behind the current one.
    pub fn path(&self) -> SelectionPath {
        match self {
            SearchState::Search | SearchState::Brand(_) | SearchState::Closed(_) => SelectionPath::default(),
            SearchState::Model(step) => SelectionPath { brand: step.brand.clone(), ..SelectionPath::default() },
            SearchState::Category(step) => SelectionPath {
                brand: step.brand().cloned(),
                model: Some(step.model.clone()),
                ..SelectionPath::default()
            },
            SearchState::Variant(step) => step.prefix(),
        }
    }

    /// The immediately preceding step, with the selection made there cleared.
    ///
    /// Steps skipped by a backend inference come back with empty lists. A
    /// variant step inferred without a model has no category step to return
    /// to, so it falls back to the model step.
    pub(crate) fn previous(self) -> Option<SearchState> {
        match self {
            SearchState::Search | SearchState::Closed(_) => None,
            SearchState::Brand(_) => Some(SearchState::Search),
            SearchState::Model(step) => Some(SearchState::Brand(step.previous)),
            SearchState::Category(step) => Some(SearchState::Model(step.previous)),
            SearchState::Variant(step) => Some(match step.origin {
                VariantOrigin::Selected { previous, .. } => SearchState::Category(previous),
                VariantOrigin::Inferred { brand, model: Some(model) } => SearchState::Category(CategoryStep {
                    previous: ModelStep::inferred(brand, Vec::new()),
                    model,
                    categories: Vec::new(),
                }),
                VariantOrigin::Inferred { brand, model: None } => {
                    SearchState::Model(ModelStep::inferred(brand, Vec::new()))
                }
            }),
        }
    }
}
