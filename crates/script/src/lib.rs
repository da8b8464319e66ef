//! # script
//!
//! Declarative conversation scripts for the funnel: what the persona says, in
//! what order, with what pacing, and which quick-reply branches are offered.
//!
//! ## Shape
//!
//! A [`Script`] is an ordered list of [`Step`]s. A step optionally carries a
//! message body (text, image, or call-to-action), pacing (`typing_ms`,
//! `post_delay_ms`), and at most one terminal directive: quick-reply
//! [`Choice`]s (each leading to a recursive branch of further steps) or an
//! [`Action`](simchat_core::Action) handing control to checkout.
//!
//! ## Validation
//!
//! Scripts are static, locally-defined data; malformed shapes are authoring
//! errors caught by [`Script::validate`] at load time, never at playback
//! time. The playback engine assumes a validated script.
//!
//! ## Variants
//!
//! The shipped funnels differ only in copy and timing constants, so each one
//! is a data instance of this single schema; see [`variants`].

pub mod persona;
pub mod step;
pub mod template;
pub mod variants;

pub use persona::{find, roster, Persona};
pub use step::{Choice, Script, ScriptError, Step};
pub use template::{personalize, render, NAME_PLACEHOLDER};
