//! Reading session coordinator and narrative synthesis for Nebula Tarot.
//!
//! A [`ReadingSession`] deals a spread with the `tarot-core` draw engine,
//! tracks which cards have been revealed, and fetches a synthesis of the
//! whole reading from a [`NarrativeProvider`] in the background.

/// Session and narrative service settings.
pub mod config;
/// Error types for sessions and narrative requests.
pub mod error;
/// The narrative provider trait, prompt, and HTTP client.
pub mod narrative;
/// The reading lifecycle.
pub mod session;

/// Re-export configuration types.
pub use config::{NarrativeConfig, ReadingConfig};
/// Re-export error types.
pub use error::{NarrativeError, NarrativeResult, ReadingError, ReadingResult};
/// Re-export narrative types.
pub use narrative::{
    ChatCompletionsProvider, DisabledProvider, NarrativeProvider, NarrativeRequest,
    NarrativeStatus, StaticProvider,
};
/// Re-export session types.
pub use session::{ReadingId, ReadingPhase, ReadingSession, ReadingSnapshot, RevealOutcome};
