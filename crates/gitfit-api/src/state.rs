//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use gitfit_auth::authenticator::RequestAuthenticator;
use gitfit_auth::secret::SecretIssuer;
use gitfit_auth::store::AccountStore;
use gitfit_auth::token::SessionTokenCodec;
use gitfit_auth::verifier::KeyVerifier;
use gitfit_core::config::AppConfig;
use gitfit_core::traits::ActivitySink;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. The account store
/// and activity sink are trait objects, injected once at startup —
/// production wires the PostgreSQL repositories, tests wire the
/// in-memory store.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Account persistence.
    pub store: Arc<dyn AccountStore>,
    /// Secret generation and rotation.
    pub issuer: Arc<SecretIssuer>,
    /// The shared per-request authentication pipeline.
    pub authenticator: Arc<RequestAuthenticator>,
    /// Engagement bookkeeping collaborator.
    pub activity: Arc<dyn ActivitySink>,
}

impl AppState {
    /// Wire the authentication components over the given store.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn AccountStore>,
        activity: Arc<dyn ActivitySink>,
    ) -> Self {
        let issuer = Arc::new(SecretIssuer::new(Arc::clone(&store)));
        let authenticator = Arc::new(RequestAuthenticator::new(
            KeyVerifier::new(Arc::clone(&store)),
            SessionTokenCodec::new(&config.auth),
        ));

        Self {
            config,
            store,
            issuer,
            authenticator,
            activity,
        }
    }
}
