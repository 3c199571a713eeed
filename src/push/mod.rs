//! Push messaging layer
//!
//! The notifications screen only needs two calls from a push provider:
//! ask for permission, then fetch the device token. Both sit behind
//! [`PushMessaging`] so the provider can be swapped or scripted.

pub mod local;

#[cfg(test)]
pub mod mock;

pub use local::LocalPushMessaging;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer to a notification permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    Denied,
    Authorized,
    Provisional,
    Ephemeral,
}

impl AuthorizationStatus {
    /// Whether a device token may be requested
    pub fn is_enabled(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::Authorized | AuthorizationStatus::Provisional
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::NotDetermined => "Not determined",
            AuthorizationStatus::Denied => "Denied",
            AuthorizationStatus::Authorized => "Authorized",
            AuthorizationStatus::Provisional => "Provisional",
            AuthorizationStatus::Ephemeral => "Ephemeral",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum PushError {
    #[error("device token unavailable: {0}")]
    TokenUnavailable(String),
}

/// Outcome of registering the device for push messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRegistration {
    pub status: AuthorizationStatus,
    /// Present only when permission was granted
    pub token: Option<String>,
}

#[async_trait]
pub trait PushMessaging: Send + Sync {
    async fn request_permission(&self) -> AuthorizationStatus;

    async fn get_token(&self) -> Result<String, PushError>;
}

/// Ask for permission and, when granted, fetch the device token.
///
/// A denied permission is not an error: the registration simply carries
/// no token and `get_token` is never called.
pub async fn register(messaging: &dyn PushMessaging) -> Result<PushRegistration, PushError> {
    let status = messaging.request_permission().await;
    if !status.is_enabled() {
        tracing::info!(status = status.as_str(), "Push permission not granted");
        return Ok(PushRegistration { status, token: None });
    }

    tracing::info!(status = status.as_str(), "Push permission granted");
    let token = messaging.get_token().await?;
    tracing::info!("Push token acquired");

    Ok(PushRegistration {
        status,
        token: Some(token),
    })
}
