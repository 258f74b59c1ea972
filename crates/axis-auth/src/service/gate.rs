//! Access control gate
//!
//! Stateless token checks evaluated once per request, before any storage
//! access. The admin secret is a superset credential: anything it may write,
//! it may also read.

use tracing::{debug, warn};

use crate::model::{AccessLevel, AuthConfig, AuthError};

/// Compare two byte strings without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Checks presented tokens against the admin and service secrets
#[derive(Clone, Debug)]
pub struct AccessGate {
    config: AuthConfig,
}

impl AccessGate {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    fn is_admin(&self, token: &str) -> bool {
        constant_time_eq(token.as_bytes(), self.config.admin_token.as_bytes())
    }

    fn is_service(&self, token: &str) -> bool {
        constant_time_eq(token.as_bytes(), self.config.service_token.as_bytes())
    }

    /// Passes iff the token equals the admin secret. Governs writes.
    pub fn check_admin(&self, token: Option<&str>) -> Result<(), AuthError> {
        let Some(token) = token else {
            debug!(level = "admin", "Rejected request without token");
            return Err(AuthError::MissingToken);
        };

        if self.is_admin(token) {
            Ok(())
        } else {
            warn!(level = "admin", "Rejected request with invalid token");
            Err(AuthError::InvalidAdminToken)
        }
    }

    /// Passes iff the token equals the service secret or the admin secret. Governs reads.
    pub fn check_service(&self, token: Option<&str>) -> Result<(), AuthError> {
        let Some(token) = token else {
            debug!(level = "service", "Rejected request without token");
            return Err(AuthError::MissingToken);
        };

        // Evaluate both so timing does not reveal which secret matched.
        let service = self.is_service(token);
        let admin = self.is_admin(token);
        if service | admin {
            Ok(())
        } else {
            warn!(level = "service", "Rejected request with invalid token");
            Err(AuthError::InvalidServiceToken)
        }
    }

    pub fn check(&self, level: AccessLevel, token: Option<&str>) -> Result<(), AuthError> {
        match level {
            AccessLevel::Admin => self.check_admin(token),
            AccessLevel::Service => self.check_service(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::AuthContext;

    const ADMIN: &str = "admin-secret";
    const SERVICE: &str = "service-secret";

    fn gate() -> AccessGate {
        AccessGate::new(AuthConfig::new(ADMIN, SERVICE))
    }

    #[test]
    fn test_admin_check() {
        let gate = gate();
        assert_eq!(gate.check_admin(Some(ADMIN)), Ok(()));
        assert_eq!(
            gate.check_admin(Some(SERVICE)),
            Err(AuthError::InvalidAdminToken)
        );
        assert_eq!(gate.check_admin(None), Err(AuthError::MissingToken));
    }

    #[test]
    fn test_service_check() {
        let gate = gate();
        assert_eq!(gate.check_service(Some(ADMIN)), Ok(()));
        assert_eq!(gate.check_service(Some(SERVICE)), Ok(()));
        assert_eq!(
            gate.check_service(Some("wrong")),
            Err(AuthError::InvalidServiceToken)
        );
        assert_eq!(gate.check_service(None), Err(AuthError::MissingToken));
    }

    #[test]
    fn test_check_dispatches_by_level() {
        let gate = gate();
        assert!(gate.check(AccessLevel::Admin, Some(SERVICE)).is_err());
        assert!(gate.check(AccessLevel::Service, Some(SERVICE)).is_ok());
    }

    #[test]
    fn test_prefix_of_secret_is_rejected() {
        let gate = gate();
        assert!(gate.check_admin(Some("admin-secre")).is_err());
        assert!(gate.check_admin(Some("admin-secrets")).is_err());
    }

    #[test]
    fn test_padded_secret_is_rejected() {
        let gate = gate();
        let context = AuthContext::from_header_value(Some(" admin-secret "));
        assert_eq!(
            gate.check_admin(context.token()),
            Err(AuthError::InvalidAdminToken)
        );
        assert_eq!(
            gate.check_service(context.token()),
            Err(AuthError::InvalidServiceToken)
        );
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }

    proptest! {
        #[test]
        fn prop_admin_authorized_implies_service_authorized(token in ".*") {
            let gate = gate();
            if gate.check_admin(Some(&token)).is_ok() {
                prop_assert!(gate.check_service(Some(&token)).is_ok());
            }
        }

        #[test]
        fn prop_unknown_token_is_rejected(token in "[a-z0-9-]{0,24}") {
            prop_assume!(token != ADMIN && token != SERVICE);
            let gate = gate();
            prop_assert_eq!(gate.check_admin(Some(&token)), Err(AuthError::InvalidAdminToken));
            prop_assert_eq!(gate.check_service(Some(&token)), Err(AuthError::InvalidServiceToken));
        }
    }
}
