//! # sequencer
//!
//! Plays a validated branching [`script::Script`] into an append-only message
//! log with realistic pacing, halting at quick-reply decision points, plus the
//! [`EscalationTrigger`] that surfaces a payment prompt after a fixed dwell
//! time regardless of conversation progress.
//!
//! All "concurrency" here is cooperative timers on one tokio runtime; the
//! suspension points are exactly the typing and post-message waits. Closing
//! the surface cancels every pending timer through one
//! [`tokio_util::sync::CancellationToken`], so nothing is rendered after
//! close.

pub mod escalation;
pub mod sequencer;
pub mod session;

pub use escalation::EscalationTrigger;
pub use sequencer::Sequencer;
pub use session::SessionSnapshot;
