//! Shared domain for the partshop storefront and admin clients.

pub mod access;
pub mod admin;
pub mod commerce;
pub mod config;
pub mod error;
pub mod table;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
