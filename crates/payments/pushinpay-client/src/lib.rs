//! # pushinpay-client
//!
//! Minimal client for the PushinPay PIX cash-in API: one call turns an amount
//! (and optionally the payer's e-mail) into a pending charge with a scannable
//! QR code and a copy-paste code.
//!
//! Failures are surfaced to the caller as [`PushinPayError`] and are never
//! retried here; the surface shows a generic notice and the visitor
//! re-triggers checkout manually.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Production API base URL.
pub const DEFAULT_API_URL: &str = "https://api.pushinpay.com.br";

#[derive(Error, Debug)]
pub enum PushinPayError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PushinPay API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("PushinPay API token is not configured")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, PushinPayError>;

#[derive(Debug, Serialize)]
struct Payer {
    email: String,
}

#[derive(Debug, Serialize)]
struct CashInRequest {
    /// Amount in cents (e.g. 2700 for R$27.00).
    value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    payer: Option<Payer>,
}

/// A pending PIX charge.
#[derive(Debug, Clone, Deserialize)]
pub struct PixCharge {
    /// Copy-paste ("copia e cola") code.
    pub qr_code: String,
    /// Base64-encoded QR code image, ready to render.
    pub qr_code_base64: String,
}

/// PushinPay API client. Cheap to clone; the inner HTTP client is shared.
#[derive(Clone)]
pub struct PushinPayClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl PushinPayClient {
    /// Creates a client against the production API.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Creates a client against a custom base URL (tests point this at a mock
    /// server).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(PushinPayError::MissingToken);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        })
    }

    /// Creates a pending PIX charge for `value_cents`, optionally tagged with
    /// the payer's e-mail for identification.
    #[instrument(skip(self, payer_email))]
    pub async fn create_pix_charge(
        &self,
        value_cents: u64,
        payer_email: Option<&str>,
    ) -> Result<PixCharge> {
        let url = format!("{}/api/pix/cashIn", self.base_url.trim_end_matches('/'));
        let request = CashInRequest {
            value: value_cents,
            payer: payer_email.map(|email| Payer {
                email: email.to_string(),
            }),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "PIX charge request rejected");
            return Err(PushinPayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let charge: PixCharge = response.json().await?;
        info!(value_cents, "PIX charge created");
        Ok(charge)
    }
}
