//! Role names and the single capability check used by admin actions.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin,
    InventoryAdmin,
    FulfillmentAdmin,
    CustomerSupport,
    Dealer,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ToggleDealer,
    EditDealer,
    ToggleEmployee,
    ViewReports,
    ManageInventory,
    ProcessReturns,
}

impl Role {
    /// Parse a backend role name. Case, spaces, `-` and `_` are ignored, so
    /// `"Super-admin"`, `"super_admin"` and `"SUPER ADMIN"` are the same role.
    pub fn parse(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "superadmin" => Role::SuperAdmin,
            "inventoryadmin" => Role::InventoryAdmin,
            "fulfillmentadmin" => Role::FulfillmentAdmin,
            "customersupport" => Role::CustomerSupport,
            "dealer" => Role::Dealer,
            _ => Role::Other(name.trim().to_string()),
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Role::SuperAdmin => true,
            Role::InventoryAdmin => matches!(capability, ToggleDealer | EditDealer | ManageInventory | ViewReports),
            Role::FulfillmentAdmin => matches!(capability, ViewReports | ProcessReturns),
            Role::CustomerSupport => matches!(capability, ProcessReturns),
            Role::Dealer => matches!(capability, ManageInventory),
            Role::Other(_) => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::SuperAdmin => f.write_str("Super-admin"),
            Role::InventoryAdmin => f.write_str("Inventory-Admin"),
            Role::FulfillmentAdmin => f.write_str("Fulfillment-Admin"),
            Role::CustomerSupport => f.write_str("Customer-Support"),
            Role::Dealer => f.write_str("Dealer"),
            Role::Other(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_normalize() {
        assert_eq!(Role::parse("Super-admin"), Role::SuperAdmin);
        assert_eq!(Role::parse("inventory_ADMIN"), Role::InventoryAdmin);
        assert_eq!(Role::parse(" Auditor "), Role::Other("Auditor".into()));
    }

    #[test]
    fn unknown_roles_get_nothing() {
        let role = Role::parse("Intern");
        assert!(!role.can(Capability::ViewReports));
        assert!(!role.can(Capability::ToggleDealer));
    }

    #[test]
    fn inventory_admin_can_toggle_dealers_but_not_employees() {
        let role = Role::parse("Inventory-Admin");
        assert!(role.can(Capability::ToggleDealer));
        assert!(!role.can(Capability::ToggleEmployee));
    }
}
