//! Card identity types: arcana, suits, and the immutable card definition.

use serde::{Deserialize, Serialize};

/// The two card categories of a tarot deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArcanaType {
    /// The 22 trump cards, numbered 0 (The Fool) through 21 (The World).
    Major,
    /// The 56 suited cards.
    Minor,
}

impl std::fmt::Display for ArcanaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "Major Arcana"),
            Self::Minor => write!(f, "Minor Arcana"),
        }
    }
}

/// A card suit. Major arcana cards carry [`Suit::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    /// Wands (fire).
    Wands,
    /// Cups (water).
    Cups,
    /// Swords (air).
    Swords,
    /// Pentacles (earth).
    Pentacles,
    /// No suit: major arcana only.
    None,
}

impl Suit {
    /// The four minor suits in catalog order.
    pub const MINOR: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    /// The classical element associated with this suit.
    pub fn element(self) -> Option<&'static str> {
        match self {
            Self::Wands => Some("Fire"),
            Self::Cups => Some("Water"),
            Self::Swords => Some("Air"),
            Self::Pentacles => Some("Earth"),
            Self::None => None,
        }
    }

    /// Parse a suit from user input (case-insensitive, singular or plural).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wands" | "wand" => Some(Self::Wands),
            "cups" | "cup" => Some(Self::Cups),
            "swords" | "sword" => Some(Self::Swords),
            "pentacles" | "pentacle" | "coins" => Some(Self::Pentacles),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wands => write!(f, "Wands"),
            Self::Cups => write!(f, "Cups"),
            Self::Swords => write!(f, "Swords"),
            Self::Pentacles => write!(f, "Pentacles"),
            Self::None => write!(f, "None"),
        }
    }
}

/// One slot of the deck. Never mutated once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique id: 0-21 for major arcana, 101-156 for minor arcana.
    pub id: u32,
    /// English display name.
    pub name_en: String,
    /// Chinese display name.
    pub name_cn: String,
    /// Major or minor arcana.
    pub arcana: ArcanaType,
    /// Suit, [`Suit::None`] iff major.
    pub suit: Suit,
    /// Rank 1-14 for minor cards (1 = Ace, 11-14 = court); `None` for major.
    pub rank: Option<u8>,
    /// Meaning when drawn upright.
    pub meaning_upright: String,
    /// Meaning when drawn reversed.
    pub meaning_reversed: String,
    /// Short tags, in display order.
    pub keywords: Vec<String>,
}

impl CardDefinition {
    /// Whether this is a major arcana card.
    pub fn is_major(&self) -> bool {
        self.arcana == ArcanaType::Major
    }

    /// The meaning text for the given orientation.
    pub fn meaning(&self, reversed: bool) -> &str {
        if reversed {
            &self.meaning_reversed
        } else {
            &self.meaning_upright
        }
    }

    /// English rank name ("Ace" through "King") for minor cards.
    pub fn rank_name(&self) -> Option<&'static str> {
        self.rank.and_then(rank_name)
    }

    /// Whether this is a court card (Page, Knight, Queen, King).
    pub fn is_court(&self) -> bool {
        matches!(self.rank, Some(11..=14))
    }
}

impl std::fmt::Display for CardDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name_en, self.name_cn)
    }
}

/// English name for a minor arcana rank.
pub fn rank_name(rank: u8) -> Option<&'static str> {
    let name = match rank {
        1 => "Ace",
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Page",
        12 => "Knight",
        13 => "Queen",
        14 => "King",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fool() -> CardDefinition {
        CardDefinition {
            id: 0,
            name_en: "The Fool".to_string(),
            name_cn: "愚人".to_string(),
            arcana: ArcanaType::Major,
            suit: Suit::None,
            rank: None,
            meaning_upright: "beginnings".to_string(),
            meaning_reversed: "recklessness".to_string(),
            keywords: vec!["Beginnings".to_string()],
        }
    }

    #[test]
    fn suit_elements() {
        assert_eq!(Suit::Wands.element(), Some("Fire"));
        assert_eq!(Suit::Cups.element(), Some("Water"));
        assert_eq!(Suit::Swords.element(), Some("Air"));
        assert_eq!(Suit::Pentacles.element(), Some("Earth"));
        assert_eq!(Suit::None.element(), None);
    }

    #[test]
    fn suit_parse() {
        assert_eq!(Suit::parse("Cups"), Some(Suit::Cups));
        assert_eq!(Suit::parse("sword"), Some(Suit::Swords));
        assert_eq!(Suit::parse("coins"), Some(Suit::Pentacles));
        assert_eq!(Suit::parse("hearts"), None);
    }

    #[test]
    fn meaning_follows_orientation() {
        let card = fool();
        assert_eq!(card.meaning(false), "beginnings");
        assert_eq!(card.meaning(true), "recklessness");
    }

    #[test]
    fn rank_names() {
        assert_eq!(rank_name(1), Some("Ace"));
        assert_eq!(rank_name(11), Some("Page"));
        assert_eq!(rank_name(14), Some("King"));
        assert_eq!(rank_name(0), None);
        assert_eq!(rank_name(15), None);
        assert_eq!(fool().rank_name(), None);
    }

    #[test]
    fn serde_uses_screaming_case() {
        let json = serde_json::to_string(&ArcanaType::Major).unwrap();
        assert_eq!(json, "\"MAJOR\"");
        let suit: Suit = serde_json::from_str("\"PENTACLES\"").unwrap();
        assert_eq!(suit, Suit::Pentacles);
    }

    #[test]
    fn display_shows_both_names() {
        assert_eq!(fool().to_string(), "The Fool (愚人)");
    }
}
