use async_trait::async_trait;
use reqwest::Method;

use partshop_core::admin::{AppUser, Dealer, Employee, SlaViolation, StatusUpdate};
use partshop_core::traits::AdminApi;
use partshop_core::Result;

use crate::ApiClient;

#[async_trait]
impl AdminApi for ApiClient {
    async fn dealers(&self) -> Result<Vec<Dealer>> {
        self.send(self.request(Method::GET, &["admin", "api", "dealers"])?).await
    }

    async fn set_dealer_active(&self, dealer_id: &str, active: bool) -> Result<Dealer> {
        let req = self
            .request(Method::PATCH, &["admin", "api", "dealers", dealer_id, "status"])?
            .json(&StatusUpdate { is_active: active });
        self.send(req).await
    }

    async fn employees(&self) -> Result<Vec<Employee>> {
        self.send(self.request(Method::GET, &["admin", "api", "employees"])?).await
    }

    async fn set_employee_active(&self, employee_id: &str, active: bool) -> Result<Employee> {
        let req = self
            .request(Method::PATCH, &["admin", "api", "employees", employee_id, "status"])?
            .json(&StatusUpdate { is_active: active });
        self.send(req).await
    }

    async fn app_users(&self) -> Result<Vec<AppUser>> {
        self.send(self.request(Method::GET, &["admin", "api", "app-users"])?).await
    }

    async fn sla_violations(&self) -> Result<Vec<SlaViolation>> {
        self.send(self.request(Method::GET, &["admin", "api", "reports", "sla-violations"])?).await
    }
}
