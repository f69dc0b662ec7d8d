use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Shopkeeper,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Shopkeeper => "shopkeeper",
            Role::Admin => "admin",
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Customer => "/customer/dashboard",
            Role::Shopkeeper => "/shop/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }

    /// Flash text shown when an anonymous visitor hits a role-gated route.
    pub fn login_prompt(&self) -> &'static str {
        match self {
            Role::Customer => "Login as customer.",
            Role::Shopkeeper => "Login as shopkeeper.",
            Role::Admin => "Admin access only.",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "shopkeeper" => Ok(Role::Shopkeeper),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order workflow states. `Completed` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Rejected)
    }

    /// Whether the workflow permits moving from `self` to `next`.
    pub fn allows(&self, next: OrderStatus) -> bool {
        match self {
            OrderStatus::Pending => {
                matches!(next, OrderStatus::Processing | OrderStatus::Rejected)
            }
            OrderStatus::Processing => {
                matches!(next, OrderStatus::Completed | OrderStatus::Rejected)
            }
            OrderStatus::Completed | OrderStatus::Rejected => false,
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "rejected" => Ok(OrderStatus::Rejected),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub pwd_hash: String,
    pub role: Role,
    pub shop_name: Option<String>,
    pub created_at: String,
}

/// Identity view handed to templates; leaves the credential hash behind.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub shop_name: Option<String>,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        CurrentUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            shop_name: user.shop_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub cost: f64,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub shop_id: i64,
    pub service_id: Option<i64>,
    pub doc_filename: Option<String>,
    pub paper_size: Option<String>,
    pub sides: Option<String>,
    pub color: String,
    pub copies: i64,
    pub additional: String,
    pub status: OrderStatus,
    pub created_at: String,
}

/// An order joined with the display names the dashboards need. Columns a
/// given listing does not resolve come back NULL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderView {
    pub id: i64,
    pub customer_id: i64,
    pub shop_id: i64,
    pub service_id: Option<i64>,
    pub doc_filename: Option<String>,
    pub paper_size: Option<String>,
    pub sides: Option<String>,
    pub color: String,
    pub copies: i64,
    pub additional: String,
    pub status: OrderStatus,
    pub created_at: String,
    pub customer_name: Option<String>,
    pub service_name: Option<String>,
    pub shop_name: Option<String>,
    pub shopkeeper_name: Option<String>,
    pub qr_filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QrCode {
    pub id: i64,
    pub shop_id: i64,
    pub qr_filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShopSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub shop_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShopOrderCount {
    pub shop_id: i64,
    pub shop_name: String,
    pub order_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Customer, Role::Shopkeeper, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn status_vocabulary_is_closed() {
        assert_eq!(
            OrderStatus::from_str("Processing"),
            Ok(OrderStatus::Processing)
        );
        assert!(OrderStatus::from_str("shipped").is_err());
        assert!(OrderStatus::from_str("").is_err());
    }

    #[test]
    fn pending_moves_to_processing_or_rejected() {
        assert!(OrderStatus::Pending.allows(OrderStatus::Processing));
        assert!(OrderStatus::Pending.allows(OrderStatus::Rejected));
        assert!(!OrderStatus::Pending.allows(OrderStatus::Completed));
        assert!(!OrderStatus::Pending.allows(OrderStatus::Pending));
    }

    #[test]
    fn processing_moves_to_completed_or_rejected() {
        assert!(OrderStatus::Processing.allows(OrderStatus::Completed));
        assert!(OrderStatus::Processing.allows(OrderStatus::Rejected));
        assert!(!OrderStatus::Processing.allows(OrderStatus::Pending));
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for terminal in [OrderStatus::Completed, OrderStatus::Rejected] {
            assert!(terminal.is_terminal());
            for next in [
                OrderStatus::Pending,
                OrderStatus::Processing,
                OrderStatus::Completed,
                OrderStatus::Rejected,
            ] {
                assert!(!terminal.allows(next));
            }
        }
    }
}
