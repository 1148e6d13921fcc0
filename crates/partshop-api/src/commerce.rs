use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use partshop_core::commerce::{Cart, NewReturn, NewReview, Order, ReturnRequest, Review};
use partshop_core::traits::{CartApi, OrderApi};
use partshop_core::Result;

use crate::ApiClient;

#[derive(Serialize)]
struct QuantityBody {
    quantity: u32,
}

#[async_trait]
impl CartApi for ApiClient {
    async fn cart(&self) -> Result<Cart> {
        self.send(self.request(Method::GET, &["cart", "api", "cart"])?).await
    }

    async fn set_quantity(&self, product_id: &str, quantity: u32) -> Result<Cart> {
        let req = self
            .request(Method::PUT, &["cart", "api", "cart", "items", product_id])?
            .json(&QuantityBody { quantity });
        self.send(req).await
    }

    async fn remove_item(&self, product_id: &str) -> Result<Cart> {
        self.send(self.request(Method::DELETE, &["cart", "api", "cart", "items", product_id])?).await
    }
}

#[async_trait]
impl OrderApi for ApiClient {
    async fn order(&self, order_id: &str) -> Result<Order> {
        self.send(self.request(Method::GET, &["order", "api", "orders", order_id])?).await
    }

    async fn submit_return(&self, order_id: &str, request: &NewReturn) -> Result<ReturnRequest> {
        let req = self.request(Method::POST, &["order", "api", "orders", order_id, "returns"])?.json(request);
        self.send(req).await
    }

    async fn return_request(&self, return_id: &str) -> Result<ReturnRequest> {
        self.send(self.request(Method::GET, &["order", "api", "returns", return_id])?).await
    }

    async fn cancel_return(&self, return_id: &str) -> Result<ReturnRequest> {
        self.send(self.request(Method::POST, &["order", "api", "returns", return_id, "cancel"])?).await
    }

    async fn submit_review(&self, review: &NewReview) -> Result<Review> {
        self.send(self.request(Method::POST, &["review", "api", "reviews"])?.json(review)).await
    }
}
