//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employee role
///
/// Serialized with the display names the dashboards use
/// (`"StoreKeeper"`, `"Driver Assistant"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum Role {
    Packer,
    StoreKeeper,
    Manager,
    Driver,
    #[serde(rename = "Driver Assistant")]
    #[cfg_attr(feature = "db", sqlx(rename = "Driver Assistant"))]
    DriverAssistant,
    Receptionist,
    Loader,
    Admin,
    Director,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Packer,
        Role::StoreKeeper,
        Role::Manager,
        Role::Driver,
        Role::DriverAssistant,
        Role::Receptionist,
        Role::Loader,
        Role::Admin,
        Role::Director,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Packer => "Packer",
            Role::StoreKeeper => "StoreKeeper",
            Role::Manager => "Manager",
            Role::Driver => "Driver",
            Role::DriverAssistant => "Driver Assistant",
            Role::Receptionist => "Receptionist",
            Role::Loader => "Loader",
            Role::Admin => "Admin",
            Role::Director => "Director",
        }
    }

    /// Roles that may act on another employee's submission
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Manager | Role::Admin | Role::Director)
    }

    /// Roles paid per bag sold on a delivery run
    pub fn is_delivery_crew(&self) -> bool {
        matches!(self, Role::Driver | Role::DriverAssistant)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Employee entity (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: Role,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub display_name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

/// Query for `GET /api/employees`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    pub role: Option<Role>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: Employee,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_uses_display_names() {
        assert_eq!(
            serde_json::to_string(&Role::DriverAssistant).unwrap(),
            "\"Driver Assistant\""
        );
        assert_eq!(
            serde_json::to_string(&Role::StoreKeeper).unwrap(),
            "\"StoreKeeper\""
        );
        let role: Role = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn test_role_from_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("Chef".parse::<Role>().is_err());
    }

    #[test]
    fn test_elevated_roles() {
        assert!(Role::Manager.is_elevated());
        assert!(Role::Director.is_elevated());
        assert!(!Role::StoreKeeper.is_elevated());
        assert!(!Role::Packer.is_elevated());
    }
}
