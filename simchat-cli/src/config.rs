use anyhow::Result;
use std::env;

/// Funnel configuration, loaded from environment variables.
pub struct FunnelConfig {
    /// PushinPay bearer token. Optional: without it, checkout falls back to
    /// the static link instead of generating a PIX charge.
    pub pushinpay_token: Option<String>,
    pub pushinpay_api_url: String,
    /// Charge amount in cents (2700 = R$27.00).
    pub checkout_value_cents: u64,
    /// Static checkout link used when no API token is configured.
    pub checkout_url: String,
    /// Dwell time before the payment prompt surfaces, in seconds.
    pub escalation_delay_secs: u64,
    /// Delay before the follow-up reminder after the prompt is dismissed.
    pub reminder_delay_secs: u64,
    pub log_file: String,
}

impl FunnelConfig {
    /// Loads configuration from the environment. Everything has a default
    /// except the PushinPay token, which is genuinely optional.
    pub fn load() -> Result<Self> {
        let pushinpay_token = env::var("PUSHINPAY_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let pushinpay_api_url = env::var("PUSHINPAY_API_URL")
            .unwrap_or_else(|_| pushinpay_client::DEFAULT_API_URL.to_string());
        let checkout_value_cents = env::var("CHECKOUT_VALUE_CENTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2700);
        let checkout_url = env::var("CHECKOUT_URL")
            .unwrap_or_else(|_| "https://checkout.example.com/club".to_string());
        let escalation_delay_secs = env::var("ESCALATION_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        let reminder_delay_secs = env::var("REMINDER_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(90);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/simchat.log".to_string());

        Ok(Self {
            pushinpay_token,
            pushinpay_api_url,
            checkout_value_cents,
            checkout_url,
            escalation_delay_secs,
            reminder_delay_secs,
            log_file,
        })
    }
}
