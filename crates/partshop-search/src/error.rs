use std::fmt;

use thiserror::Error;

/// Which step of the guided search is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Search,
    Brand,
    Model,
    Category,
    Variant,
    Closed,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Search => "search",
            StepKind::Brand => "brand",
            StepKind::Model => "model",
            StepKind::Category => "category",
            StepKind::Variant => "variant",
            StepKind::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Banner errors of the guided search. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Please enter a search term")]
    EmptyQuery,

    #[error("No results found for \"{0}\"")]
    NoResults(String),

    #[error("No models found for this brand")]
    NoModels,

    #[error("No categories found for this vehicle type")]
    NoCategories,

    #[error("No variants found for this model")]
    NoVariants,

    #[error("No vehicle type selected")]
    NoVehicleType,

    #[error("Missing brand, model, or category information")]
    MissingPathSegment,

    /// Network or decode failure; details go to the log, not the banner.
    #[error("Something went wrong while searching. Please try again.")]
    Request,

    #[error("Still loading, please wait")]
    Busy,

    #[error("\"{0}\" is not an option on this step")]
    UnknownOption(String),

    #[error("This action is not available on the {0} step")]
    WrongStep(StepKind),
}

pub type Result<T> = std::result::Result<T, FlowError>;
