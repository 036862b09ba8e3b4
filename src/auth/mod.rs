use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const NOT_LOGGED_IN: &str = "Not logged in";
pub const INSUFFICIENT_ROLE: &str = "Forbidden: insufficient role";

/// Access roles, totally ordered: guest < user < admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    User,
    Admin,
}

impl Role {
    pub fn level(self) -> u8 {
        match self {
            Role::Guest => 0,
            Role::User => 1,
            Role::Admin => 2,
        }
    }

    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "guest" => Some(Role::Guest),
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Level of a stored role string. Unrecognized roles rank as `user`.
pub fn level_of(role: &str) -> u8 {
    Role::parse(role).unwrap_or(Role::User).level()
}

/// Identity materialized at login and held in the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl Identity {
    pub fn new(id: i64, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: role.into(),
        }
    }

    pub fn level(&self) -> u8 {
        level_of(&self.role)
    }
}

/// Allow iff a session identity is present.
pub fn require_login(identity: Option<&Identity>) -> Result<&Identity, ApiError> {
    identity.ok_or_else(|| ApiError::unauthorized(NOT_LOGGED_IN))
}

/// Login check first, then `level(identity) >= level(min_role)`.
pub fn require_role(identity: Option<&Identity>, min_role: Role) -> Result<&Identity, ApiError> {
    authorize(identity, min_role.as_str())
}

/// Authorization decision for a minimum role given by name. Unknown names rank as `user`.
pub fn authorize<'a>(identity: Option<&'a Identity>, min_role: &str) -> Result<&'a Identity, ApiError> {
    let identity = require_login(identity)?;
    if identity.level() < level_of(min_role) {
        tracing::debug!(
            "Role check failed for {}: '{}' is below '{}'",
            identity.email,
            identity.role,
            min_role
        );
        return Err(ApiError::forbidden(INSUFFICIENT_ROLE));
    }
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [Role; 3] = [Role::Guest, Role::User, Role::Admin];

    #[test]
    fn levels_are_totally_ordered() {
        assert_eq!(level_of("guest"), 0);
        assert_eq!(level_of("user"), 1);
        assert_eq!(level_of("admin"), 2);
        assert!(Role::Guest < Role::User && Role::User < Role::Admin);
    }

    #[test]
    fn unknown_roles_rank_as_user() {
        assert_eq!(level_of("superuser"), 1);
        assert_eq!(level_of(""), 1);
        assert_eq!(level_of("Admin"), 1);
    }

    #[test]
    fn missing_identity_is_unauthenticated() {
        for min in ROLES {
            let err = require_role(None, min).unwrap_err();
            assert_eq!(err, ApiError::unauthorized("Not logged in"));
        }
        assert_eq!(require_login(None).unwrap_err().status_code(), 401);
    }

    #[test]
    fn role_check_allows_iff_level_is_high_enough() {
        for stored in ["guest", "user", "admin", "owner", "root", ""] {
            let identity = Identity::new(1, "a@b.co", stored);
            for min in ROLES {
                let result = require_role(Some(&identity), min);
                if level_of(stored) >= min.level() {
                    assert!(result.is_ok(), "{} should pass {:?}", stored, min);
                } else {
                    assert_eq!(result.unwrap_err(), ApiError::forbidden("Forbidden: insufficient role"));
                }
            }
        }
    }

    #[test]
    fn unknown_minimum_role_requires_user() {
        let guest = Identity::new(1, "g@b.co", "guest");
        let user = Identity::new(2, "u@b.co", "user");
        assert_eq!(authorize(Some(&guest), "staff").unwrap_err().status_code(), 403);
        assert!(authorize(Some(&user), "staff").is_ok());
    }
}
