//! Error types for the card catalog and draw engine.

/// Alias for `Result<T, TarotError>`.
pub type TarotResult<T> = Result<T, TarotError>;

/// Errors raised by the deck, spread, and draw modules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TarotError {
    /// A spread's layout cannot be dealt (label mismatch, empty, or larger than the deck).
    #[error("invalid spread: {0}")]
    InvalidSpread(String),

    /// A draw asked for more cards than the shuffled deck holds.
    #[error("cannot draw {requested} cards from a deck of {available}")]
    DeckExhausted {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards in the shuffled deck.
        available: usize,
    },

    /// A spread name did not match any built-in spread.
    #[error("unknown spread: {0}")]
    UnknownSpread(String),

    /// A card name did not match any card in the deck.
    #[error("unknown card: \"{0}\"")]
    UnknownCard(String),
}
