//! Checkout hand-off: e-mail validation and the PIX charge flow. API failure
//! details go to the log; the visitor only sees a generic notice and can
//! re-trigger checkout manually; nothing is retried here.

use anyhow::Result;
use pushinpay_client::PushinPayClient;
use tracing::warn;

use crate::config::FunnelConfig;

/// Basic shape check, the same the checkout form applies: no whitespace, one
/// `@` with a non-empty local part, and a dot inside the domain.
pub fn is_valid_email(s: &str) -> bool {
    if s.is_empty() || s.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Generates a PIX charge for `email` and prints the copy-paste code. Used by
/// the `checkout` subcommand; requires the API token.
pub async fn run_direct_checkout(config: &FunnelConfig, email: &str) -> Result<()> {
    if !is_valid_email(email) {
        anyhow::bail!("'{email}' does not look like a valid e-mail");
    }
    let token = config
        .pushinpay_token
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("PUSHINPAY_API_TOKEN is not set"))?;
    let client = PushinPayClient::with_base_url(token, &config.pushinpay_api_url)?;

    match client
        .create_pix_charge(config.checkout_value_cents, Some(email))
        .await
    {
        Ok(charge) => {
            print_charge(&charge, config.checkout_value_cents);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "PIX charge failed");
            anyhow::bail!("could not generate a payment code; try again in a moment")
        }
    }
}

pub(crate) fn print_charge(charge: &pushinpay_client::PixCharge, value_cents: u64) {
    println!(
        "PIX charge created for R${},{:02}. Copy-paste code:",
        value_cents / 100,
        value_cents % 100
    );
    println!("{}", charge.qr_code);
    println!(
        "(scannable QR image available, {} base64 chars)",
        charge.qr_code_base64.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails_accepted() {
        assert!(is_valid_email("visitor@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn test_invalid_emails_rejected() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@missing-local.com"));
        assert!(!is_valid_email("no-dot@domain"));
        assert!(!is_valid_email("trailing-dot@domain."));
        assert!(!is_valid_email("spaces in@domain.com"));
    }
}
