//! # simchat-cli
//!
//! Terminal surface for the conversation funnel: renders the sequencer's
//! output as chat lines, reads quick-reply selections from stdin, arms the
//! escalation trigger on open, and hands terminal checkout actions to the
//! PushinPay client. Configuration comes from the environment.

pub mod checkout;
pub mod cli;
pub mod config;
pub mod surface;
pub mod terminal;
pub mod urgency;

pub use checkout::{is_valid_email, run_direct_checkout};
pub use cli::{Cli, Commands};
pub use config::FunnelConfig;
pub use surface::run_surface;
pub use terminal::{SurfaceEvent, TerminalSink};
pub use urgency::UrgencyCounter;
