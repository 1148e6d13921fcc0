//! Records behind the admin dashboard tables.

use serde::{Deserialize, Serialize};

use crate::table::{SortValue, TableRow};
use crate::types::EntityId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(alias = "is_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(alias = "is_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(alias = "is_active")]
    pub is_active: bool,
}

/// An order that missed a dispatch or delivery bound. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlaViolation {
    pub order_id: EntityId,
    pub stage: String,
    pub expected_hours: f64,
    pub actual_hours: f64,
}

impl SlaViolation {
    pub fn overrun_hours(&self) -> f64 { (self.actual_hours - self.expected_hours).max(0.0) }
}

/// Body of the enable/disable row action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub is_active: bool,
}

impl TableRow for Dealer {
    fn search_cells(&self) -> Vec<&str> {
        let mut cells = vec![self.name.as_str(), self.email.as_str()];
        if let Some(city) = &self.city { cells.push(city.as_str()); }
        cells
    }

    fn sort_value(&self, column: &str) -> Option<SortValue> {
        match column {
            "name" => Some(SortValue::text(&self.name)),
            "email" => Some(SortValue::text(&self.email)),
            "city" => self.city.as_deref().map(SortValue::text),
            "active" => Some(SortValue::Flag(self.is_active)),
            _ => None,
        }
    }
}

impl TableRow for Employee {
    fn search_cells(&self) -> Vec<&str> { vec![self.name.as_str(), self.email.as_str(), self.role.as_str()] }

    fn sort_value(&self, column: &str) -> Option<SortValue> {
        match column {
            "name" => Some(SortValue::text(&self.name)),
            "email" => Some(SortValue::text(&self.email)),
            "role" => Some(SortValue::text(&self.role)),
            "active" => Some(SortValue::Flag(self.is_active)),
            _ => None,
        }
    }
}

impl TableRow for AppUser {
    fn search_cells(&self) -> Vec<&str> {
        let mut cells = vec![self.name.as_str()];
        if let Some(phone) = &self.phone { cells.push(phone.as_str()); }
        cells
    }

    fn sort_value(&self, column: &str) -> Option<SortValue> {
        match column {
            "name" => Some(SortValue::text(&self.name)),
            "active" => Some(SortValue::Flag(self.is_active)),
            _ => None,
        }
    }
}

impl TableRow for SlaViolation {
    fn search_cells(&self) -> Vec<&str> { vec![self.order_id.as_str(), self.stage.as_str()] }

    fn sort_value(&self, column: &str) -> Option<SortValue> {
        match column {
            "order" => Some(SortValue::text(&self.order_id)),
            "stage" => Some(SortValue::text(&self.stage)),
            "overrun" => Some(SortValue::Number(self.overrun_hours())),
            _ => None,
        }
    }
}
