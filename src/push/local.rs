//! Config-driven push provider.

use async_trait::async_trait;

use crate::config::PushConfig;
use crate::push::{AuthorizationStatus, PushError, PushMessaging};

/// Push provider answering from configuration.
///
/// Permission comes from `push.permission`. The token is
/// `push.device_token` when set, otherwise a UUID issued once per session.
#[derive(Debug, Clone)]
pub struct LocalPushMessaging {
    permission: AuthorizationStatus,
    token: String,
}

impl LocalPushMessaging {
    pub fn from_config(config: &PushConfig) -> Self {
        let token = config
            .device_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Self {
            permission: config.permission,
            token,
        }
    }
}

#[async_trait]
impl PushMessaging for LocalPushMessaging {
    async fn request_permission(&self) -> AuthorizationStatus {
        self.permission
    }

    async fn get_token(&self) -> Result<String, PushError> {
        Ok(self.token.clone())
    }
}
