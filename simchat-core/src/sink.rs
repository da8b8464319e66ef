//! Presentation boundary for the conversation surface.
//!
//! [`ConversationSink`] is surface-agnostic: the terminal CLI implements it,
//! tests use a recording double. Implementations render state changes; the
//! only way they drive playback is by forwarding the visitor's clicks back to
//! the sequencer's `select_choice`.

use crate::error::Result;
use crate::types::{Action, Message};
use async_trait::async_trait;

/// Renders conversation state changes onto a surface.
#[async_trait]
pub trait ConversationSink: Send + Sync {
    /// The typing indicator turned on or off. At most one indicator is ever
    /// active, and it always precedes the message it announces.
    async fn typing_changed(&self, typing: bool) -> Result<()>;

    /// A message was appended to the conversation log.
    async fn message_appended(&self, message: &Message) -> Result<()>;

    /// Quick-reply choices are pending; playback is halted until one of the
    /// given labels is selected.
    async fn choices_presented(&self, labels: &[String]) -> Result<()>;

    /// The script reached a terminal directive; control passes to the
    /// checkout collaborator.
    async fn action_triggered(&self, action: &Action) -> Result<()>;

    /// The escalation timer expired: surface the payment prompt.
    async fn payment_prompt_requested(&self) -> Result<()>;
}
