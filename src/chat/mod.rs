//! Chat with Melody, the mood-matching music companion
//!
//! - `provider`: the hosted-model seam (Gemini generateContent behind a trait)
//! - `session`: the append-only transcript and its manager

pub mod provider;
pub mod session;

pub use provider::{ChatRequest, GeminiProvider, GenerationConfig, HistoryMessage, Provider, ProviderError};
pub use session::{ChatError, ChatManager, ChatTurn, Role};

/// Persona instructions delivered as the one-time system turn.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are Melody, a friendly music companion who matches songs to moods.\n\
Ask the user how they feel, suggest tracks, artists, or playlists that fit,\n\
and keep the tone of your replies in step with the mood they describe:\n\
upbeat for happy moods, gentle for calm or melancholic ones. When helpful,\n\
ask about favorite genres and how the user wants to feel, and tailor your\n\
recommendations to the answers.";
