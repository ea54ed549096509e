//! The draw engine: shuffle the deck, assign orientations, deal a spread.
//!
//! A reading is produced in two steps. [`shuffle`] permutes the whole deck
//! with an unbiased Fisher-Yates pass and flips an independent coin per card
//! for its orientation. [`draw`] then takes the top `count` cards and gives
//! each its position in the spread. Nothing is remembered between calls, so
//! every reading starts from the full 78-card deck.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::CardDefinition;
use crate::error::{TarotError, TarotResult};
use crate::spread::SpreadConfig;

/// Default probability that a card is drawn reversed.
pub const DEFAULT_REVERSAL_CHANCE: f64 = 0.5;

/// Knobs for the draw engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Probability (0.0-1.0) that any single card is reversed.
    pub reversal_chance: f64,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            reversal_chance: DEFAULT_REVERSAL_CHANCE,
        }
    }
}

impl DrawOptions {
    /// Set the reversal probability (clamped to 0.0-1.0, NaN falls back to the default).
    pub fn with_reversal_chance(mut self, chance: f64) -> Self {
        self.reversal_chance = sanitize_chance(chance);
        self
    }
}

fn sanitize_chance(chance: f64) -> f64 {
    if chance.is_nan() {
        DEFAULT_REVERSAL_CHANCE
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Which way up a card landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Drawn the right way up.
    Upright,
    /// Drawn upside down.
    Reversed,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upright => write!(f, "Upright"),
            Self::Reversed => write!(f, "Reversed"),
        }
    }
}

/// A card instance within one reading.
///
/// Borrows its [`CardDefinition`] from the catalog and adds the three
/// per-reading fields. Orientation and position are fixed once dealt;
/// `is_revealed` only ever goes from `false` to `true` via [`DrawnCard::reveal`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnCard<'a> {
    #[serde(flatten)]
    card: &'a CardDefinition,
    is_reversed: bool,
    position_index: Option<usize>,
    is_revealed: bool,
}

impl<'a> DrawnCard<'a> {
    /// The underlying card definition.
    pub fn card(&self) -> &'a CardDefinition {
        self.card
    }

    /// Whether this card was drawn reversed.
    pub fn is_reversed(&self) -> bool {
        self.is_reversed
    }

    /// The card's orientation.
    pub fn orientation(&self) -> Orientation {
        if self.is_reversed {
            Orientation::Reversed
        } else {
            Orientation::Upright
        }
    }

    /// Position within the spread, or `None` while still in the shuffled deck.
    pub fn position_index(&self) -> Option<usize> {
        self.position_index
    }

    /// Whether the card has been turned face up.
    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    /// Turn the card face up. Returns `true` if it was face down before.
    pub fn reveal(&mut self) -> bool {
        let newly = !self.is_revealed;
        self.is_revealed = true;
        newly
    }

    /// The meaning text matching this card's orientation.
    pub fn meaning(&self) -> &'a str {
        self.card.meaning(self.is_reversed)
    }
}

/// Shuffle the full deck and assign an independent orientation to every card.
///
/// Every ordering of `deck` is equally likely given a uniform `rng`. The
/// returned cards have no position and are face down.
pub fn shuffle<'a, R: Rng + ?Sized>(
    deck: &'a [CardDefinition],
    rng: &mut R,
    options: &DrawOptions,
) -> Vec<DrawnCard<'a>> {
    let mut order: Vec<&'a CardDefinition> = deck.iter().collect();

    // Fisher-Yates
    for i in (1..order.len()).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }

    let chance = sanitize_chance(options.reversal_chance);
    order
        .into_iter()
        .map(|card| DrawnCard {
            card,
            is_reversed: rng.random_bool(chance),
            position_index: None,
            is_revealed: false,
        })
        .collect()
}

/// Take the top `count` cards of a shuffled deck and number them 0..count.
///
/// Asking for more cards than the deck holds is a misconfigured spread and
/// fails instead of dealing a short hand.
pub fn draw<'a>(shuffled: &[DrawnCard<'a>], count: usize) -> TarotResult<Vec<DrawnCard<'a>>> {
    if count > shuffled.len() {
        return Err(TarotError::DeckExhausted {
            requested: count,
            available: shuffled.len(),
        });
    }

    Ok(shuffled[..count]
        .iter()
        .enumerate()
        .map(|(i, drawn)| DrawnCard {
            position_index: Some(i),
            ..drawn.clone()
        })
        .collect())
}

/// Validate `spread`, shuffle `deck`, and deal one card per position.
pub fn deal<'a, R: Rng + ?Sized>(
    deck: &'a [CardDefinition],
    spread: &SpreadConfig,
    rng: &mut R,
    options: &DrawOptions,
) -> TarotResult<Vec<DrawnCard<'a>>> {
    spread.validate(deck.len())?;
    let shuffled = shuffle(deck, rng, options);
    draw(&shuffled, spread.card_count)
}
