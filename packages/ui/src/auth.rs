//! Session context and the route gate.
//!
//! [`Session`] only changes through its transition methods, each returning the
//! next state. The side effects (backend calls and the stored credential) live
//! in [`Authenticator`], which is generic over the backend and the store so
//! tests can run without a browser or a server.

use std::future::Future;

use api::{ApiClient, ApiError, AuthUser, LoginResponse};
use dioxus::prelude::*;
use store::LocalStore;

use crate::context::{local_store, use_api, Api};
use crate::icons::FaRightFromBracket;
use crate::Icon;

/// Who is signed in, and whether that is still being checked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub user: Option<AuthUser>,
    pub loading: bool,
}

/// What a gated route should do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Still checking the stored credential: show a placeholder.
    Pending,
    /// Nobody is signed in: go to the login view.
    Redirect,
    Allow,
}

impl Session {
    /// Initial state. Loading only while a stored credential awaits checking.
    pub fn start(has_token: bool) -> Self {
        Self {
            user: None,
            loading: has_token,
        }
    }

    pub fn profile_loaded(self, user: AuthUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// The stored credential was rejected. The caller discards it.
    pub fn profile_failed(self) -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn logged_in(self, user: AuthUser) -> Self {
        self.profile_loaded(user)
    }

    pub fn logged_out(self) -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn gate(&self) -> Gate {
        match (&self.user, self.loading) {
            (_, true) => Gate::Pending,
            (None, false) => Gate::Redirect,
            (Some(_), false) => Gate::Allow,
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }
}

/// The two backend calls a session needs.
pub trait AuthBackend {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>>;

    /// Resolve `token` to its user.
    fn fetch_profile(&self, token: &str) -> impl Future<Output = Result<AuthUser, ApiError>>;
}

impl AuthBackend for ApiClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.clone().with_token(None).login(email, password).await
    }

    async fn fetch_profile(&self, token: &str) -> Result<AuthUser, ApiError> {
        self.clone()
            .with_token(Some(token.to_string()))
            .profile()
            .await
    }
}

/// Session side effects over a backend `B` and a credential store `S`.
pub struct Authenticator<B, S> {
    backend: B,
    store: S,
}

impl<B: AuthBackend, S: LocalStore> Authenticator<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self { backend, store }
    }

    pub fn initial(&self) -> Session {
        Session::start(self.store.token().is_some())
    }

    /// Check the stored credential against the backend.
    pub async fn restore(&self, session: Session) -> Session {
        let Some(token) = self.store.token() else {
            return Session {
                loading: false,
                ..session
            };
        };
        match self.backend.fetch_profile(&token).await {
            Ok(user) => {
                tracing::info!("Restored session for {}", user.email);
                session.profile_loaded(user)
            }
            Err(e) => {
                tracing::warn!("Stored credential rejected: {e}");
                self.store.clear_token();
                session.profile_failed()
            }
        }
    }

    /// Sign in. The credential is stored only on success; on failure the
    /// backend's message (or "Login failed") comes back untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, String> {
        match self.backend.sign_in(email, password).await {
            Ok(LoginResponse { token, user }) => {
                self.store.set_token(&token);
                tracing::info!("Signed in as {}", user.email);
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("Login failed: {e}");
                Err(e.user_message("Login failed"))
            }
        }
    }

    pub fn logout(&self, session: Session) -> Session {
        self.store.clear_token();
        session.logged_out()
    }

    /// A call made with the stored credential failed. A 401/403 means the
    /// credential is no longer good: drop it and end the session. Any other
    /// failure leaves the session alone.
    pub fn expire(&self, session: Session, error: &ApiError) -> Session {
        if !error.is_unauthorized() {
            return session;
        }
        tracing::warn!("Credential rejected mid-session: {error}");
        self.logout(session)
    }
}

fn authenticator(api: &Api) -> Authenticator<ApiClient, impl LocalStore> {
    Authenticator::new(api.client(), local_store())
}

/// Get the current session.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Sign in and update `session`. Returns the message to show on failure.
pub async fn sign_in(
    mut session: Signal<Session>,
    api: &Api,
    email: &str,
    password: &str,
) -> Result<(), String> {
    let user = authenticator(api).login(email, password).await?;
    let current = session.peek().clone();
    session.set(current.logged_in(user));
    Ok(())
}

pub fn sign_out(mut session: Signal<Session>, api: &Api) {
    let current = session.peek().clone();
    session.set(authenticator(api).logout(current));
}

/// Feed a page fetch outcome back into the session; a rejected credential
/// sends the user to the login view.
pub fn expire_on_unauthorized(
    mut session: Signal<Session>,
    api: &Api,
    outcome: Result<(), ApiError>,
) {
    let Err(error) = outcome else {
        return;
    };
    let current = session.peek().clone();
    let next = authenticator(api).expire(current.clone(), &error);
    if next != current {
        session.set(next);
    }
}

/// Provides the session to everything below it and checks the stored
/// credential once on mount.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let api = use_api();
    let mut session = use_signal(move || authenticator(&api).initial());

    use_hook(move || {
        spawn(async move {
            let current = session.peek().clone();
            if !current.loading {
                return;
            }
            let restored = authenticator(&api).restore(current).await;
            session.set(restored);
        })
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_auth();
    let api = use_api();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| sign_out(session, &api),
            Icon { icon: FaRightFromBracket, width: 16, height: 16 }
            span { "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use store::MemoryStore;

    fn admin() -> AuthUser {
        AuthUser {
            id: "1".into(),
            name: Some("Admin".into()),
            email: "admin@example.com".into(),
            role: Some("admin".into()),
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        calls: Cell<u32>,
    }

    impl AuthBackend for FakeBackend {
        async fn sign_in(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
            self.calls.set(self.calls.get() + 1);
            if password != "secret" {
                return Err(ApiError::Status {
                    status: 401,
                    message: "Invalid credentials".into(),
                });
            }
            Ok(LoginResponse {
                token: format!("token-for-{email}"),
                user: admin(),
            })
        }

        async fn fetch_profile(&self, token: &str) -> Result<AuthUser, ApiError> {
            self.calls.set(self.calls.get() + 1);
            if token != "good" {
                return Err(ApiError::Status {
                    status: 401,
                    message: "Unauthorized".into(),
                });
            }
            Ok(admin())
        }
    }

    #[test]
    fn test_gate_follows_session() {
        assert_eq!(Session::start(true).gate(), Gate::Pending);
        assert_eq!(Session::start(false).gate(), Gate::Redirect);
        assert_eq!(Session::start(true).profile_loaded(admin()).gate(), Gate::Allow);
        assert_eq!(Session::start(true).profile_failed().gate(), Gate::Redirect);
        assert_eq!(
            Session::start(false).logged_in(admin()).logged_out().gate(),
            Gate::Redirect
        );
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let auth = Authenticator::new(FakeBackend::default(), MemoryStore::with_token("good"));
        let session = auth.initial();
        assert!(session.loading);

        let session = auth.restore(session).await;
        assert_eq!(session.user, Some(admin()));
        assert!(!session.loading);
    }

    #[tokio::test]
    async fn test_restore_failure_discards_token() {
        let store = MemoryStore::with_token("expired");
        let auth = Authenticator::new(FakeBackend::default(), store.clone());
        let session = auth.restore(auth.initial()).await;
        assert_eq!(session.gate(), Gate::Redirect);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_expire_only_on_rejected_credential() {
        let store = MemoryStore::with_token("good");
        let auth = Authenticator::new(FakeBackend::default(), store.clone());
        let signed_in = Session::start(true).profile_loaded(admin());

        let offline = ApiError::Network("offline".into());
        assert_eq!(auth.expire(signed_in.clone(), &offline), signed_in);
        assert_eq!(store.token().as_deref(), Some("good"));

        let expired = ApiError::Status {
            status: 401,
            message: "jwt expired".into(),
        };
        assert_eq!(auth.expire(signed_in, &expired).gate(), Gate::Redirect);
        assert_eq!(store.token(), None);
    }

    #[tokio::test]
    async fn test_restore_without_token_skips_backend() {
        let auth = Authenticator::new(FakeBackend::default(), MemoryStore::new());
        let session = auth.restore(auth.initial()).await;
        assert!(!session.loading);
        assert_eq!(auth.backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let store = MemoryStore::new();
        let auth = Authenticator::new(FakeBackend::default(), store.clone());
        let user = auth.login("admin@example.com", "secret").await.unwrap();
        assert_eq!(user.display_name(), "Admin");
        assert_eq!(store.token().as_deref(), Some("token-for-admin@example.com"));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_stored_state() {
        let store = MemoryStore::with_token("previous");
        let auth = Authenticator::new(FakeBackend::default(), store.clone());
        let err = auth.login("admin@example.com", "wrong").await.unwrap_err();
        assert_eq!(err, "Invalid credentials");
        assert_eq!(store.token().as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn test_login_network_failure_uses_fallback_message() {
        let auth = Authenticator::new(ApiClient::new("http://127.0.0.1:9"), MemoryStore::new());
        let err = auth.login("a@b.c", "pw").await.unwrap_err();
        assert_eq!(err, "Login failed");
    }

    #[test]
    fn test_logout_is_unconditional() {
        let store = MemoryStore::with_token("good");
        let auth = Authenticator::new(FakeBackend::default(), store.clone());
        let session = auth.logout(Session::start(true).profile_loaded(admin()));
        assert_eq!(session, Session::default());
        assert_eq!(store.token(), None);
    }
}
