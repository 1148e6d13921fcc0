use partshop_core::commerce::{NewReview, Order, Review};
use partshop_core::traits::OrderApi;

use crate::error::{Result, WorkflowError};

const MAX_COMMENT_CHARS: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub title: String,
    pub comment: String,
}

impl ReviewDraft {
    pub fn new(rating: u8, title: &str, comment: &str) -> Self {
        Self { rating, title: title.to_string(), comment: comment.to_string() }
    }

    /// Reviews are only accepted for products of a delivered order.
    pub fn validate(&self, order: &Order, product_id: &str) -> Result<NewReview> {
        if !order.is_delivered() {
            return Err(WorkflowError::NotDelivered);
        }
        if !order.items.iter().any(|i| i.product_id == product_id) {
            return Err(WorkflowError::UnknownItem(product_id.to_string()));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(WorkflowError::InvalidRating(self.rating));
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(WorkflowError::MissingTitle);
        }
        let comment = self.comment.trim();
        let len = comment.chars().count();
        if len > MAX_COMMENT_CHARS {
            return Err(WorkflowError::CommentTooLong(len));
        }
        Ok(NewReview {
            product_id: product_id.to_string(),
            order_id: order.id.clone(),
            rating: self.rating,
            title: title.to_string(),
            comment: comment.to_string(),
        })
    }

    pub async fn submit<A>(&self, api: &A, order: &Order, product_id: &str) -> Result<Review>
    where
        A: OrderApi + ?Sized,
    {
        let body = self.validate(order, product_id)?;
        let review = api.submit_review(&body).await?;
        tracing::info!(order_id = %order.id, product_id, rating = body.rating, "review submitted");
        Ok(review)
    }
}
