//! Scripted push provider for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::push::{AuthorizationStatus, PushError, PushMessaging};

#[derive(Debug, Clone)]
pub struct MockPushMessaging {
    status: AuthorizationStatus,
    token: Option<String>,
    token_requests: Arc<AtomicUsize>,
}

impl MockPushMessaging {
    /// `token: None` makes `get_token` fail.
    pub fn new(status: AuthorizationStatus, token: Option<&str>) -> Self {
        Self {
            status,
            token: token.map(str::to_string),
            token_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushMessaging for MockPushMessaging {
    async fn request_permission(&self) -> AuthorizationStatus {
        self.status
    }

    async fn get_token(&self) -> Result<String, PushError> {
        self.token_requests.fetch_add(1, Ordering::SeqCst);
        self.token
            .clone()
            .ok_or_else(|| PushError::TokenUnavailable("no token scripted".into()))
    }
}
