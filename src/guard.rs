use actix_identity::Identity;
use actix_session::Session;
use actix_web::HttpResponse;
use sqlx::SqlitePool;

use crate::db;
use crate::errors::AppError;
use crate::structs::{Role, User};
use crate::utils::{flash, see_other};

/// Resolves the session identity to a user record. A missing, forged, or
/// stale token resolves to anonymous rather than an error.
pub async fn resolve_identity(
    pool: &SqlitePool,
    identity: Option<Identity>,
) -> Result<Option<User>, AppError> {
    let Some(identity) = identity else {
        return Ok(None);
    };
    let Ok(raw) = identity.id() else {
        return Ok(None);
    };
    let Ok(user_id) = raw.parse::<i64>() else {
        return Ok(None);
    };
    Ok(db::users::get_user_by_id(pool, user_id).await?)
}

/// Outcome of a role check. `Anonymous` and `Forbidden` are distinct: the
/// former goes to the login page, the latter back to the actor's own
/// dashboard.
pub enum Gate {
    Authorized(User),
    Anonymous { required: Role },
    Forbidden { user: User },
}

pub fn require_role(user: Option<User>, required: Role) -> Gate {
    match user {
        None => Gate::Anonymous { required },
        Some(user) if user.role == required => Gate::Authorized(user),
        Some(user) => Gate::Forbidden { user },
    }
}

impl Gate {
    pub fn deny(self, session: &Session) -> HttpResponse {
        match self {
            Gate::Authorized(user) => see_other(user.role.dashboard_path()),
            Gate::Anonymous { required } => {
                flash(session, required.login_prompt());
                see_other("/login")
            }
            Gate::Forbidden { user } => {
                flash(session, "You do not have access to that page.");
                see_other(user.role.dashboard_path())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 7,
            name: "Pat".into(),
            email: "pat@example.com".into(),
            pwd_hash: String::new(),
            role,
            shop_name: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn anonymous_is_not_authorized() {
        assert!(matches!(
            require_role(None, Role::Admin),
            Gate::Anonymous { required: Role::Admin }
        ));
    }

    #[test]
    fn matching_role_passes() {
        assert!(matches!(
            require_role(Some(user(Role::Shopkeeper)), Role::Shopkeeper),
            Gate::Authorized(_)
        ));
    }

    #[test]
    fn wrong_role_is_forbidden_not_anonymous() {
        assert!(matches!(
            require_role(Some(user(Role::Customer)), Role::Admin),
            Gate::Forbidden { .. }
        ));
    }
}
