use std::sync::Arc;

use portal_core::session::{
    AUTH_CHECK_FAILED_MESSAGE, AuthGateway, AuthOutcome, Credentials, LOGIN_FAILED_MESSAGE,
    LOGOUT_ADVISORY_MESSAGE, SessionStatus,
};
use portal_core::user::CurrentUser;
use tokio::sync::watch;

/// Owns the authentication state of the whole application.
///
/// One instance is constructed at startup and handed to every part of the
/// view layer that needs it. It is the only writer of [`SessionStatus`];
/// everything else reads it through [`SessionManager::status`] or a
/// [`SessionManager::subscribe`] receiver.
///
/// Session operations are not expected to overlap. If they do, each one
/// settles the status when it finishes and the last one to finish wins.
pub struct SessionManager {
    gateway: Arc<dyn AuthGateway>,
    status: watch::Sender<SessionStatus>,
}

impl SessionManager {
    /// Creates a manager in the initial `loading` state. Call
    /// [`SessionManager::check_status`] right after to settle it.
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        let (status, _) = watch::channel(SessionStatus::initial());
        Self { gateway, status }
    }

    /// Current `{user, loading, error}` snapshot.
    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// A receiver notified on every status change.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.status.borrow().user.clone()
    }

    fn update(&self, apply: impl FnOnce(&mut SessionStatus)) {
        self.status.send_modify(apply);
    }

    /// Asks the backend who is logged in.
    ///
    /// "No session" and "forbidden" answers leave the session anonymous
    /// without an error. Any other failure also ends anonymous, with a generic
    /// message. Never fails.
    pub async fn check_status(&self) {
        self.update(SessionStatus::begin);

        match self.gateway.current_user().await {
            Ok(Some(user)) => {
                tracing::info!(user_id = %user.id, "Session check found a logged-in user");
                self.update(|status| status.settle_authenticated(user));
            }
            Ok(None) => {
                tracing::debug!("Session check returned no user");
                self.update(|status| status.settle_anonymous(None));
            }
            Err(e) if e.is_unauthenticated() => {
                tracing::debug!(status = ?e.status(), "No backend session");
                self.update(|status| status.settle_anonymous(None));
            }
            Err(e) => {
                tracing::error!(error = %e, "Auth check failed");
                self.update(|status| {
                    status.settle_anonymous(Some(AUTH_CHECK_FAILED_MESSAGE.to_string()))
                });
            }
        }
    }

    /// Logs in. A failure carries the backend's detail message when there is
    /// one and leaves the current user untouched.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        self.update(SessionStatus::begin);

        match self.gateway.login(credentials).await {
            Ok(user) => {
                self.update(|status| status.settle_authenticated(user));
                AuthOutcome::success()
            }
            Err(e) => {
                tracing::warn!(username = %credentials.username, error = %e, "Login failed");
                let message = e.detail_or(LOGIN_FAILED_MESSAGE);
                self.update(|status| status.settle_login_failure(message.clone()));
                AuthOutcome::failure(message)
            }
        }
    }

    /// Logs out. Always succeeds: the local session is dropped whatever the
    /// backend answers, and a failed backend call only leaves an advisory
    /// message behind.
    pub async fn logout(&self) -> AuthOutcome {
        self.update(SessionStatus::begin);

        let result = self.gateway.logout().await;
        self.gateway.clear_session_artifacts().await;

        let advisory = match result {
            Ok(()) => {
                tracing::info!("Logged out");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logout request failed, logged out locally");
                Some(LOGOUT_ADVISORY_MESSAGE.to_string())
            }
        };
        self.update(|status| status.settle_anonymous(advisory));
        AuthOutcome::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use portal_core::error::{PortalError, Result};
    use portal_core::session::{Access, SessionPhase};
    use std::sync::Mutex;

    /// Gateway whose answers are scripted per call.
    #[derive(Default)]
    struct ScriptedGateway {
        login: Mutex<Vec<Result<CurrentUser>>>,
        logout: Mutex<Vec<Result<()>>>,
        current_user: Mutex<Vec<Result<Option<CurrentUser>>>>,
        cleared: Mutex<usize>,
    }

    impl ScriptedGateway {
        fn next<T>(queue: &Mutex<Vec<Result<T>>>, fallback: Result<T>) -> Result<T> {
            let mut queue = queue.lock().unwrap();
            if queue.is_empty() { fallback } else { queue.remove(0) }
        }
    }

    #[async_trait]
    impl AuthGateway for ScriptedGateway {
        async fn login(&self, _credentials: &Credentials) -> Result<CurrentUser> {
            Self::next(&self.login, Err(PortalError::transport("unscripted")))
        }

        async fn logout(&self) -> Result<()> {
            Self::next(&self.logout, Ok(()))
        }

        async fn current_user(&self) -> Result<Option<CurrentUser>> {
            Self::next(&self.current_user, Ok(None))
        }

        async fn clear_session_artifacts(&self) {
            *self.cleared.lock().unwrap() += 1;
        }
    }

    fn alice() -> CurrentUser {
        serde_json::from_value(serde_json::json!({"id": 1, "username": "alice"})).unwrap()
    }

    fn build(gateway: ScriptedGateway) -> (SessionManager, Arc<ScriptedGateway>) {
        let gateway = Arc::new(gateway);
        (SessionManager::new(gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let (manager, _) = build(ScriptedGateway::default());
        let status = manager.status();
        assert!(status.loading);
        assert_eq!(status.user, None);
        assert_eq!(status.access(), Access::Loading);
    }

    #[tokio::test]
    async fn test_check_status_with_user() {
        let gateway = ScriptedGateway::default();
        gateway.current_user.lock().unwrap().push(Ok(Some(alice())));
        let (manager, _) = build(gateway);

        manager.check_status().await;

        let status = manager.status();
        assert_eq!(status.user, Some(alice()));
        assert!(!status.loading);
        assert_eq!(status.phase, SessionPhase::Authenticated);
    }

    #[tokio::test]
    async fn test_check_status_unauthenticated_is_not_an_error() {
        for code in [401, 403] {
            let gateway = ScriptedGateway::default();
            gateway
                .current_user
                .lock()
                .unwrap()
                .push(Err(PortalError::unauthenticated(code, None)));
            let (manager, _) = build(gateway);

            manager.check_status().await;

            let status = manager.status();
            assert_eq!(status.user, None);
            assert!(!status.loading);
            assert_eq!(status.error, None);
            assert_eq!(status.access(), Access::RedirectToLogin);
        }
    }

    #[tokio::test]
    async fn test_check_status_other_failure_sets_generic_error() {
        let gateway = ScriptedGateway::default();
        gateway
            .current_user
            .lock()
            .unwrap()
            .push(Err(PortalError::rejected(500, Some("boom".to_string()))));
        let (manager, _) = build(gateway);

        manager.check_status().await;

        let status = manager.status();
        assert_eq!(status.user, None);
        assert_eq!(status.error.as_deref(), Some(AUTH_CHECK_FAILED_MESSAGE));
        assert_eq!(status.phase, SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_detail() {
        let gateway = ScriptedGateway::default();
        gateway
            .login
            .lock()
            .unwrap()
            .push(Err(PortalError::rejected(400, Some("Invalid credentials".to_string()))));
        let (manager, _) = build(gateway);

        let outcome = manager.login(&Credentials::new("alice", "wrong")).await;

        assert_eq!(outcome, AuthOutcome::failure("Invalid credentials"));
        let status = manager.status();
        assert_eq!(status.user, None);
        assert!(!status.loading);
        assert_eq!(status.error.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_login_network_failure_uses_fallback() {
        let (manager, _) = build(ScriptedGateway::default());

        let outcome = manager.login(&Credentials::new("alice", "pw")).await;

        assert_eq!(outcome, AuthOutcome::failure(LOGIN_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_login_success_then_error_cleared() {
        let gateway = ScriptedGateway::default();
        gateway.login.lock().unwrap().push(Err(PortalError::rejected(400, None)));
        gateway.login.lock().unwrap().push(Ok(alice()));
        let (manager, _) = build(gateway);

        assert!(!manager.login(&Credentials::new("alice", "x")).await.success);
        let outcome = manager.login(&Credentials::new("alice", "pw")).await;

        assert_eq!(outcome, AuthOutcome::success());
        let status = manager.status();
        assert_eq!(status.user, Some(alice()));
        assert_eq!(status.error, None);
        assert_eq!(manager.current_user(), Some(alice()));
    }

    #[tokio::test]
    async fn test_logout_always_succeeds() {
        let outcomes: Vec<Result<()>> = vec![
            Ok(()),
            Err(PortalError::rejected(500, None)),
            Err(PortalError::transport("connection reset")),
        ];

        for backend in outcomes {
            let failed = backend.is_err();
            let gateway = ScriptedGateway::default();
            gateway.login.lock().unwrap().push(Ok(alice()));
            gateway.logout.lock().unwrap().push(backend);
            let (manager, gateway) = build(gateway);
            manager.login(&Credentials::new("alice", "pw")).await;

            let outcome = manager.logout().await;

            assert_eq!(outcome, AuthOutcome::success());
            let status = manager.status();
            assert_eq!(status.user, None);
            assert!(!status.loading);
            assert_eq!(*gateway.cleared.lock().unwrap(), 1);
            if failed {
                assert_eq!(status.error.as_deref(), Some(LOGOUT_ADVISORY_MESSAGE));
            } else {
                assert_eq!(status.error, None);
            }
        }
    }

    #[tokio::test]
    async fn test_logout_twice_is_idempotent() {
        let gateway = ScriptedGateway::default();
        gateway.logout.lock().unwrap().push(Err(PortalError::transport("down")));
        let (manager, gateway) = build(gateway);

        assert!(manager.logout().await.success);
        assert!(manager.logout().await.success);

        assert_eq!(manager.status().user, None);
        assert_eq!(*gateway.cleared.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_settled_status() {
        let gateway = ScriptedGateway::default();
        gateway.current_user.lock().unwrap().push(Ok(Some(alice())));
        let (manager, _) = build(gateway);
        let mut receiver = manager.subscribe();

        manager.check_status().await;

        assert!(receiver.has_changed().unwrap());
        let seen = receiver.borrow_and_update().clone();
        assert_eq!(seen.user, Some(alice()));
        assert!(!seen.loading);
    }
}
