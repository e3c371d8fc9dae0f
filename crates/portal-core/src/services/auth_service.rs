// ============================================================================
// Portal Core - Authentication Service
// File: crates/portal-core/src/services/auth_service.rs
// ============================================================================
//! Login and logout flows that open and close a [`Session`]

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use super::access_resolver::AccessPolicy;
use super::menu_store::MenuStoreSettings;
use super::session::Session;
use crate::domain::Credentials;
use crate::error::DomainError;
use crate::repositories::{AuthRepository, LocalStore, MenuRepository};
use portal_shared::utils::mask_email;

/// Authentication service for handling login/logout flows
pub struct AuthService {
    auth_repo: Arc<dyn AuthRepository>,
    menu_repo: Arc<dyn MenuRepository>,
    storage: Arc<dyn LocalStore>,
    menu_settings: MenuStoreSettings,
    policy: AccessPolicy,
}

impl AuthService {
    pub fn new(
        auth_repo: Arc<dyn AuthRepository>,
        menu_repo: Arc<dyn MenuRepository>,
        storage: Arc<dyn LocalStore>,
        menu_settings: MenuStoreSettings,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            auth_repo,
            menu_repo,
            storage,
            menu_settings,
            policy,
        }
    }

    /// Login with email and password
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, DomainError> {
        credentials.validate()?;
        let masked = mask_email(&credentials.email);
        info!("Login attempt for email: {}", masked);

        let result = self.auth_repo.login(credentials).await.map_err(|e| {
            warn!("Login failed for {}: {}", masked, e);
            e
        })?;

        let session = Session::start(
            result,
            self.menu_repo.clone(),
            self.storage.clone(),
            &self.menu_settings,
            self.policy.clone(),
        );

        info!("Login successful for: {} (session {})", masked, session.id());
        Ok(session)
    }

    /// Logout. The backend call is best-effort; local state is always
    /// cleared.
    pub async fn logout(&self, session: &Session) {
        if let Err(e) = self.auth_repo.logout(session.token()).await {
            warn!("Backend logout failed for user {}: {}", session.user().id, e);
        }
        session.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoginResult, UserPreferences};
    use crate::repositories::{MockAuthRepository, MockMenuRepository};
    use crate::services::test_support::{raw_menus, token, user, InMemoryStore};

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials { email: email.into(), password: password.into() }
    }

    fn service(auth: MockAuthRepository, storage: Arc<InMemoryStore>) -> AuthService {
        AuthService::new(
            Arc::new(auth),
            Arc::new(MockMenuRepository::new()),
            storage,
            MenuStoreSettings::default(),
            AccessPolicy::default(),
        )
    }

    fn successful_login() -> MockAuthRepository {
        let mut auth = MockAuthRepository::new();
        auth.expect_login().times(1).returning(|_| {
            Ok(LoginResult {
                token: token(),
                user: user(),
                preferences: UserPreferences { menu_items: Some(raw_menus()), ..Default::default() },
            })
        });
        auth
    }

    #[tokio::test]
    async fn test_login_opens_seeded_session() {
        let service = service(successful_login(), Arc::new(InMemoryStore::default()));

        let session = service.login(&credentials("siti@example.com", "secret")).await.unwrap();
        assert_eq!(session.user().name, "Siti Rahma");
        assert_eq!(session.menu().menu_items().len(), 3);
        assert!(session.menu().is_cache_fresh());
    }

    #[tokio::test]
    async fn test_login_rejects_invalid_form_without_backend_call() {
        let mut auth = MockAuthRepository::new();
        auth.expect_login().times(0);
        let service = service(auth, Arc::new(InMemoryStore::default()));

        let result = service.login(&credentials("not-an-email", "")).await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_login_propagates_invalid_credentials() {
        let mut auth = MockAuthRepository::new();
        auth.expect_login().returning(|_| Err(DomainError::InvalidCredentials));
        let service = service(auth, Arc::new(InMemoryStore::default()));

        let result = service.login(&credentials("siti@example.com", "wrong")).await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_logout_clears_state_even_if_backend_fails() {
        let storage = Arc::new(InMemoryStore::default());
        let mut auth = successful_login();
        auth.expect_logout()
            .times(1)
            .returning(|_| Err(DomainError::BackendError("timeout".into())));
        let service = service(auth, storage.clone());

        let session = service.login(&credentials("siti@example.com", "secret")).await.unwrap();
        assert!(storage.raw("menu_state:7").is_some());

        service.logout(&session).await;
        assert!(storage.raw("menu_state:7").is_none());
        assert!(session.menu().menu_items().is_empty());
    }
}
