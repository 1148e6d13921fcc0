//! Order-side workflows: tracking timeline, returns, reviews and the cart.

pub mod cart;
pub mod error;
pub mod returns;
pub mod reviews;
pub mod timeline;

pub use error::{Result, WorkflowError};
