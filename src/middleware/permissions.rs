use uuid::Uuid;

use crate::error::{Error, Result};
use crate::utils::jwt::TokenUser;

/// Owner-scoped authorization: strict equality between the acting identity
/// and the resource's recorded owner. No role overrides.
pub fn check_ownership(user: &TokenUser, resource_owner: Uuid) -> Result<()> {
    if user.user_id == resource_owner {
        return Ok(());
    }
    Err(Error::Unauthorized(
        "Not authorized to access this resource".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn identity(id: Uuid) -> TokenUser {
        TokenUser {
            user_id: id,
            name: "A".into(),
            role: Role::Employer,
        }
    }

    #[test]
    fn owner_passes() {
        let id = Uuid::new_v4();
        assert!(check_ownership(&identity(id), id).is_ok());
    }

    #[test]
    fn non_owner_is_rejected() {
        let err = check_ownership(&identity(Uuid::new_v4()), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }
}
