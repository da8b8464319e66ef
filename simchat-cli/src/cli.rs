//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "simchat")]
#[command(about = "Scripted conversation funnel", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a funnel variant in the terminal (config from env).
    Run {
        /// Persona id (see `personas`); defaults to the first in the roster.
        #[arg(short, long)]
        persona: Option<String>,
        /// Funnel variant id; defaults to "preview-funnel".
        #[arg(short, long)]
        variant: Option<String>,
        /// Override the payment-prompt dwell time, in seconds.
        #[arg(long)]
        escalation_secs: Option<u64>,
    },
    /// List the persona roster.
    Personas,
    /// Generate a PIX charge directly (requires PUSHINPAY_API_TOKEN).
    Checkout {
        /// Payer e-mail attached to the charge.
        #[arg(short, long)]
        email: String,
    },
}
