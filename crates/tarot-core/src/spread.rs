//! Spread layouts: how many cards are drawn and what each position means.

use serde::{Deserialize, Serialize};

use crate::error::{TarotError, TarotResult};

/// The built-in spread variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpreadKind {
    /// One card of direct guidance.
    Single,
    /// Past, present, and future.
    ThreeCard,
    /// The classic ten-card layout.
    CelticCross,
    /// A caller-defined layout.
    Custom,
}

impl SpreadKind {
    /// The built-in kinds in catalog order.
    pub const BUILT_IN: [SpreadKind; 3] = [Self::Single, Self::ThreeCard, Self::CelticCross];

    /// Parse a spread kind from user input.
    pub fn parse(s: &str) -> TarotResult<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "single" | "one" | "1" => Ok(Self::Single),
            "three-card" | "three" | "3" => Ok(Self::ThreeCard),
            "celtic-cross" | "celtic" | "10" => Ok(Self::CelticCross),
            _ => Err(TarotError::UnknownSpread(s.to_string())),
        }
    }

    /// The catalog configuration for a built-in kind.
    ///
    /// Returns `None` for [`SpreadKind::Custom`], which has no catalog entry.
    pub fn config(self) -> Option<SpreadConfig> {
        match self {
            Self::Single => Some(SpreadConfig::new(
                self,
                "One Card (单张指引)",
                "The most direct answer, for a daily draw or a specific question.",
                &["Core guidance"],
            )),
            Self::ThreeCard => Some(SpreadConfig::new(
                self,
                "Flow of Time (时间之流)",
                "Insight into past influences, the present situation, and the coming trend.",
                &["Past influence", "Present situation", "Future trend"],
            )),
            Self::CelticCross => Some(SpreadConfig::new(
                self,
                "Celtic Cross (凯尔特十字)",
                "The classic in-depth spread: causes, obstacles, and outcome.",
                &[
                    "Present situation",
                    "Challenge",
                    "Subconscious foundation",
                    "Past experience",
                    "Conscious goal",
                    "Near future",
                    "Self",
                    "Environment",
                    "Hopes and fears",
                    "Final outcome",
                ],
            )),
            Self::Custom => None,
        }
    }
}

impl std::fmt::Display for SpreadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::ThreeCard => write!(f, "three-card"),
            Self::CelticCross => write!(f, "celtic-cross"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A named layout: `card_count` positions, each with a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadConfig {
    /// Which spread this is.
    pub kind: SpreadKind,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Number of positions.
    pub card_count: usize,
    /// Label for each position; index `i` labels position `i`.
    pub position_meanings: Vec<String>,
}

impl SpreadConfig {
    fn new(kind: SpreadKind, name: &str, description: &str, positions: &[&str]) -> Self {
        Self {
            kind,
            name: name.to_string(),
            description: description.to_string(),
            card_count: positions.len(),
            position_meanings: positions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Build a custom spread from a name and its position labels.
    pub fn custom(name: impl Into<String>, positions: Vec<String>) -> Self {
        Self {
            kind: SpreadKind::Custom,
            name: name.into(),
            description: String::new(),
            card_count: positions.len(),
            position_meanings: positions,
        }
    }

    /// Check that the layout can be dealt from a deck of `deck_size` cards.
    pub fn validate(&self, deck_size: usize) -> TarotResult<()> {
        if self.card_count == 0 {
            return Err(TarotError::InvalidSpread(format!(
                "'{}' has no positions",
                self.name
            )));
        }
        if self.card_count != self.position_meanings.len() {
            return Err(TarotError::InvalidSpread(format!(
                "'{}' declares {} cards but labels {} positions",
                self.name,
                self.card_count,
                self.position_meanings.len()
            )));
        }
        if self.card_count > deck_size {
            return Err(TarotError::InvalidSpread(format!(
                "'{}' needs {} cards but the deck holds {deck_size}",
                self.name, self.card_count
            )));
        }
        Ok(())
    }

    /// The label of position `index`, or "Position N" if it has none.
    pub fn position_label(&self, index: usize) -> String {
        self.position_meanings
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Position {}", index + 1))
    }
}

/// All built-in spreads in catalog order.
pub fn all_spreads() -> Vec<SpreadConfig> {
    SpreadKind::BUILT_IN
        .iter()
        .filter_map(|kind| kind.config())
        .collect()
}
