use partshop_core::types::{Brand, Category, Model, Variant};

use crate::error::{FlowError, Result};

/// Brand, model, category and variant picked so far. Any of them may be
/// missing; [`SelectionPath::complete`] is the only way to get all four.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPath {
    pub brand: Option<Brand>,
    pub model: Option<Model>,
    pub category: Option<Category>,
    pub variant: Option<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletePath {
    pub brand: Brand,
    pub model: Model,
    pub category: Category,
    pub variant: Variant,
}

impl SelectionPath {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.model.is_none() && self.category.is_none() && self.variant.is_none()
    }

    pub fn complete(self) -> Result<CompletePath> {
        match self {
            SelectionPath { brand: Some(brand), model: Some(model), category: Some(category), variant: Some(variant) } => {
                Ok(CompletePath { brand, model, category, variant })
            }
            _ => Err(FlowError::MissingPathSegment),
        }
    }
}
