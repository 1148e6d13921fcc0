//! Guided vehicle/part search: brand → model → category → variant.
//!
//! [`GuidedSearch`] is the pure state machine; [`SearchSession`] runs it
//! against any [`partshop_core::traits::CatalogApi`].

pub mod error;
pub mod flow;
pub mod link;
pub mod path;
pub mod session;
pub mod state;

pub use error::{FlowError, StepKind};
pub use flow::{FlowContext, GuidedSearch, Resolution, SearchCommand, SearchRequest, SearchResponse};
pub use link::ResultsLink;
pub use path::{CompletePath, SelectionPath};
pub use session::SearchSession;
pub use state::SearchState;
