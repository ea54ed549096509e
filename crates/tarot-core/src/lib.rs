//! Card catalog, spread layouts, and the draw engine for Nebula Tarot.
//!
//! This crate is pure and synchronous. It knows the 78 cards of the deck,
//! the built-in spreads, and how to shuffle and deal a reading. Everything
//! that talks to the network or tracks a reading over time lives in
//! `tarot-reading`.

/// Arcana, suits, and the immutable card definition.
pub mod card;
/// The static 78-card catalog and lookups.
pub mod deck;
/// Shuffling, orientation, and dealing.
pub mod draw;
/// Error types used throughout the crate.
pub mod error;
/// Spread layouts and the built-in spread catalog.
pub mod spread;

/// Re-export card identity types.
pub use card::{ArcanaType, CardDefinition, Suit};
/// Re-export the catalog entry point.
pub use deck::{DECK_SIZE, all_cards};
/// Re-export draw engine types and operations.
pub use draw::{DrawOptions, DrawnCard, Orientation, deal, draw, shuffle};
/// Re-export error types.
pub use error::{TarotError, TarotResult};
/// Re-export spread types.
pub use spread::{SpreadConfig, SpreadKind, all_spreads};
