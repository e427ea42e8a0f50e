//! Scripted replays against a single `pokerlib` table.

pub mod script;

pub use script::{Rejection, Replay, Script, ScriptError, ScriptPlayer, replay};
