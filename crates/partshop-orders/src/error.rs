use chrono::{DateTime, Utc};
use thiserror::Error;

use partshop_core::commerce::ReturnStatus;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Order has not been delivered yet")]
    NotDelivered,

    #[error("The return window closed on {}", .0.format("%Y-%m-%d"))]
    ReturnWindowClosed(DateTime<Utc>),

    #[error("Select at least one item to return")]
    NoItems,

    #[error("Item {0} is not part of this order")]
    UnknownItem(String),

    #[error("Return quantity for {item} must be between 1 and {max}")]
    InvalidQuantity { item: String, max: u32 },

    #[error("Please tell us why you are returning these items")]
    MissingReason,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Review title is required")]
    MissingTitle,

    #[error("Review comment is too long ({0} characters, max 2000)")]
    CommentTooLong(usize),

    #[error("Cannot move a return from {from:?} to {to:?}")]
    InvalidTransition { from: ReturnStatus, to: ReturnStatus },

    #[error("Only requested returns can be cancelled (this one is {0:?})")]
    NotCancellable(ReturnStatus),

    #[error("{0} is not in the cart")]
    NotInCart(String),

    #[error(transparent)]
    Api(#[from] partshop_core::Error),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
