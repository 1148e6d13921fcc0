use async_trait::async_trait;

use crate::admin::{AppUser, Dealer, Employee, SlaViolation};
use crate::commerce::{Cart, NewReturn, NewReview, Order, ReturnRequest, Review};
use crate::error::Result;
use crate::types::{Category, Classification, ClassifyRequest, Variant};

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn classify(&self, request: &ClassifyRequest) -> Result<Classification>;
    async fn categories_for_vehicle_type(&self, vehicle_type_id: &str) -> Result<Vec<Category>>;
    async fn variants_for_model(&self, model_id: &str) -> Result<Vec<Variant>>;
}

/// Cart mutations are applied by the backend; each call answers with the full cart.
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn cart(&self) -> Result<Cart>;
    async fn set_quantity(&self, product_id: &str, quantity: u32) -> Result<Cart>;
    async fn remove_item(&self, product_id: &str) -> Result<Cart>;
}

#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn order(&self, order_id: &str) -> Result<Order>;
    async fn submit_return(&self, order_id: &str, request: &NewReturn) -> Result<ReturnRequest>;
    async fn return_request(&self, return_id: &str) -> Result<ReturnRequest>;
    async fn cancel_return(&self, return_id: &str) -> Result<ReturnRequest>;
    async fn submit_review(&self, review: &NewReview) -> Result<Review>;
}

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn dealers(&self) -> Result<Vec<Dealer>>;
    async fn set_dealer_active(&self, dealer_id: &str, active: bool) -> Result<Dealer>;
    async fn employees(&self) -> Result<Vec<Employee>>;
    async fn set_employee_active(&self, employee_id: &str, active: bool) -> Result<Employee>;
    async fn app_users(&self) -> Result<Vec<AppUser>>;
    async fn sla_violations(&self) -> Result<Vec<SlaViolation>>;
}
