//! # simchat-core
//!
//! Core types and traits for the simulated-chat funnel: conversation [`Message`]
//! types, the [`ConversationSink`] presentation boundary, error types, and
//! tracing initialization. Surface-agnostic; used by the sequencer, the script
//! catalog, and the terminal CLI.

pub mod error;
pub mod logger;
pub mod sink;
pub mod types;

pub use error::{Result, SimchatError};
pub use logger::init_tracing;
pub use sink::ConversationSink;
pub use types::{Action, Author, Message, MessageKind};
