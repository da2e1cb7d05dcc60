//! Account types shared by the auth endpoints.

use serde::{Deserialize, Serialize};

/// Account role as served by the API (`"USER"` / `"ADMIN"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

/// The authenticated account, as returned by login, signup, and `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_in_upper_case() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"name":"Ada","email":"ada@example.com","role":"ADMIN"}"#,
        )
        .expect("user should decode");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(
            serde_json::to_value(&user).expect("user should encode")["role"],
            "ADMIN"
        );
    }
}
