//! Game transitions, the bot opponent, and move enumeration.

pub mod actions;
pub mod bot;
pub mod error;
pub mod moves;

pub use actions::{declare, discard, draw, form_meld};
pub use bot::{bot_turn, BotMove, BotOutcome};
pub use error::GameError;
pub use moves::{advisor_context, available_moves, AdvisorContext, CandidateMove};
