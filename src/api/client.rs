//! Typed client for the finance services
//!
//! Each call builds its JSON body and POSTs it through the injected
//! [`HttpClient`]. Fraud and savings replies are status-checked before
//! decoding. The notification reply only has to arrive.

use crate::api::error::ApiError;
use crate::api::http::{json_headers, HttpClient, Response};
use crate::config::ApiConfig;
use crate::types::{
    Expense, FraudCheckRequest, FraudCheckResponse, LowBalanceNotice, SavingsRequest,
    SavingsResponse, Transaction,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Client for the fraud, savings and notification endpoints
#[derive(Clone)]
pub struct FinanceApi {
    http: Arc<dyn HttpClient>,
    base_url: String,
    notify_url: String,
}

impl FinanceApi {
    pub fn new(http: Arc<dyn HttpClient>, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.base_url().to_string(),
            notify_url: config.notify_url().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the fraud service whether any of `transactions` look suspicious
    pub async fn check_fraud(&self, transactions: Vec<Transaction>) -> Result<bool, ApiError> {
        let url = format!("{}/check-fraud", self.base_url);
        let request = FraudCheckRequest { transactions };
        let response: FraudCheckResponse = self.post_json(&url, &request).await?;
        Ok(response.fraud_detected)
    }

    /// Ask the savings service for a recommended monthly savings amount
    pub async fn recommend_savings(
        &self,
        income: f64,
        expenses: Vec<Expense>,
    ) -> Result<f64, ApiError> {
        let url = format!("{}/recommend-savings", self.base_url);
        let request = SavingsRequest { income, expenses };
        let response: SavingsResponse = self.post_json(&url, &request).await?;
        Ok(response.recommended_savings)
    }

    /// Ask the notification service to push a low-balance alert to `token`.
    /// Any reply counts as sent; only a transport failure is an error.
    pub async fn notify_low_balance(&self, balance: f64, token: &str) -> Result<(), ApiError> {
        let url = format!("{}/notify-low-balance", self.notify_url);
        let notice = LowBalanceNotice {
            balance,
            token: token.to_string(),
        };

        let response = self.send(&url, &notice).await?;
        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                body = %response.text(),
                "Notification service replied with an error status"
            );
        }
        Ok(())
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.post(url, body).await?;
        response.json().map_err(ApiError::Parse)
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<Response, ApiError> {
        let response = self.send(url, body).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.text(),
            });
        }
        Ok(response)
    }

    async fn send<B: Serialize>(&self, url: &str, body: &B) -> Result<Response, ApiError> {
        let body = serde_json::to_string(body).map_err(ApiError::Encode)?;
        tracing::debug!(url, "POST");

        Ok(self.http.post(url, &body, &json_headers()).await?)
    }
}
