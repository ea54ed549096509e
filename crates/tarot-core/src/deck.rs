//! The static 78-card catalog.
//!
//! The deck is generated once from two tables: the 22 major arcana entries,
//! and the cross product of 4 suits with 14 rank templates. The result is a
//! stable, read-only ordering that the draw engine uses as its unshuffled seed.

use std::sync::LazyLock;

use strsim::jaro_winkler;

use crate::card::{ArcanaType, CardDefinition, Suit};

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 78;

/// Number of major arcana cards.
pub const MAJOR_COUNT: usize = 22;

/// Ranks per minor suit (Ace through King).
pub const RANKS_PER_SUIT: u8 = 14;

/// Id offset for minor arcana cards: `MINOR_ID_BASE + suit_index * 14 + rank`.
pub const MINOR_ID_BASE: u32 = 100;

/// Minimum similarity score for name suggestions (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.7;

struct MajorEntry {
    name_en: &'static str,
    name_cn: &'static str,
    upright: &'static str,
    reversed: &'static str,
    keywords: [&'static str; 3],
}

struct SuitEntry {
    suit: Suit,
    name_cn: &'static str,
    keywords: [&'static str; 3],
}

struct RankEntry {
    rank: u8,
    name_cn: &'static str,
    upright: &'static str,
    reversed: &'static str,
}

const fn major(
    name_en: &'static str,
    name_cn: &'static str,
    upright: &'static str,
    reversed: &'static str,
    keywords: [&'static str; 3],
) -> MajorEntry {
    MajorEntry {
        name_en,
        name_cn,
        upright,
        reversed,
        keywords,
    }
}

const fn rank(
    rank: u8,
    name_cn: &'static str,
    upright: &'static str,
    reversed: &'static str,
) -> RankEntry {
    RankEntry {
        rank,
        name_cn,
        upright,
        reversed,
    }
}

/// Major arcana, indexed by their ordinal (which is also the card id).
const MAJOR_ARCANA: [MajorEntry; MAJOR_COUNT] = [
    major(
        "The Fool",
        "愚人",
        "New beginnings, adventure, innocence, boundless potential.",
        "Recklessness, a failed gamble, naivety, carelessness.",
        ["Beginnings", "Innocence", "Spontaneity"],
    ),
    major(
        "The Magician",
        "魔术师",
        "Creativity, willpower, skill, focus.",
        "Manipulation, untapped talent, poor planning.",
        ["Manifestation", "Power", "Action"],
    ),
    major(
        "The High Priestess",
        "女祭司",
        "Intuition, the subconscious, mystery, inner knowing.",
        "Surface knowledge, ignored intuition, repressed feelings.",
        ["Intuition", "Mystery", "Subconscious"],
    ),
    major(
        "The Empress",
        "皇后",
        "Abundance, nurturing, nature, sensual pleasure.",
        "Dependence, blocked creativity, emptiness.",
        ["Fertility", "Nature", "Abundance"],
    ),
    major(
        "The Emperor",
        "皇帝",
        "Authority, structure, control, fatherhood.",
        "Tyranny, rigidity, coldness, lack of discipline.",
        ["Authority", "Structure", "Control"],
    ),
    major(
        "The Hierophant",
        "教皇",
        "Tradition, spiritual guidance, faith, conformity.",
        "Rebellion, broken convention, new beliefs.",
        ["Tradition", "Conformity", "Beliefs"],
    ),
    major(
        "The Lovers",
        "恋人",
        "Love, harmony, relationships, a choice of values.",
        "Disharmony, imbalance, the wrong choice.",
        ["Love", "Harmony", "Values"],
    ),
    major(
        "The Chariot",
        "战车",
        "Victory, willpower, self-control, determination.",
        "Loss of control, aggression, lack of direction.",
        ["Victory", "Willpower", "Action"],
    ),
    major(
        "Strength",
        "力量",
        "Courage, patience, compassion, inner strength.",
        "Self-doubt, weakness, insecurity.",
        ["Courage", "Persuasion", "Influence"],
    ),
    major(
        "The Hermit",
        "隐士",
        "Introspection, solitude, the search for truth, guidance.",
        "Isolation, loneliness, withdrawal from reality.",
        ["Soul-searching", "Introspection", "Guidance"],
    ),
    major(
        "Wheel of Fortune",
        "命运之轮",
        "Good luck, karma, life cycles, a turning point.",
        "Bad luck, resistance, breaking the cycle.",
        ["Luck", "Karma", "Cycles"],
    ),
    major(
        "Justice",
        "正义",
        "Fairness, truth, cause and effect, law.",
        "Injustice, lack of accountability, dishonesty.",
        ["Fairness", "Truth", "Law"],
    ),
    major(
        "The Hanged Man",
        "倒吊人",
        "Pause, surrender, a new perspective, sacrifice.",
        "Delay, resistance, stagnation.",
        ["Suspension", "Restriction", "Letting Go"],
    ),
    major(
        "Death",
        "死神",
        "Endings, transformation, letting go, rebirth.",
        "Resisting change, inability to let go, stagnation.",
        ["Endings", "Change", "Transformation"],
    ),
    major(
        "Temperance",
        "节制",
        "Balance, moderation, patience, clear purpose.",
        "Imbalance, excess, haste.",
        ["Balance", "Moderation", "Patience"],
    ),
    major(
        "The Devil",
        "恶魔",
        "Bondage, addiction, materialism, the shadow self.",
        "Breaking free, regained freedom, facing the shadow.",
        ["Bondage", "Addiction", "Materialism"],
    ),
    major(
        "The Tower",
        "高塔",
        "Sudden upheaval, chaos, revelation, awakening.",
        "Disaster averted, fear of change, delayed pain.",
        ["Disaster", "Upheaval", "Sudden Change"],
    ),
    major(
        "The Star",
        "星星",
        "Hope, inspiration, serenity, spiritual strength.",
        "Despair, lack of faith, discouragement.",
        ["Hope", "Faith", "Rejuvenation"],
    ),
    major(
        "The Moon",
        "月亮",
        "Illusion, fear, anxiety, the subconscious.",
        "Released fear, solved mysteries, clarity.",
        ["Illusion", "Fear", "Anxiety"],
    ),
    major(
        "The Sun",
        "太阳",
        "Joy, success, positivity, vitality.",
        "Temporary gloom, lack of success, pessimism.",
        ["Positivity", "Fun", "Warmth"],
    ),
    major(
        "Judgement",
        "审判",
        "Reflection, awakening, rebirth, decisiveness.",
        "Self-doubt, refusal to change, ignoring the call.",
        ["Judgment", "Rebirth", "Inner Calling"],
    ),
    major(
        "The World",
        "世界",
        "Completion, integration, accomplishment, travel.",
        "Incompletion, lack of closure, stagnation.",
        ["Completion", "Integration", "Accomplishment"],
    ),
];

const SUITS: [SuitEntry; 4] = [
    SuitEntry {
        suit: Suit::Wands,
        name_cn: "权杖",
        keywords: ["Inspiration", "Energy", "Passion"],
    },
    SuitEntry {
        suit: Suit::Cups,
        name_cn: "圣杯",
        keywords: ["Emotion", "Relationships", "Feelings"],
    },
    SuitEntry {
        suit: Suit::Swords,
        name_cn: "宝剑",
        keywords: ["Intellect", "Thoughts", "Conflict"],
    },
    SuitEntry {
        suit: Suit::Pentacles,
        name_cn: "星币",
        keywords: ["Material", "Work", "Stability"],
    },
];

const RANKS: [RankEntry; RANKS_PER_SUIT as usize] = [
    rank(1, "首牌", "A new opportunity, potential.", "A missed chance, delay."),
    rank(2, "二", "Balance, decisions, partnership.", "Imbalance, indecision."),
    rank(3, "三", "Collaboration, growth, first results.", "Delays, lack of teamwork."),
    rank(4, "四", "Stability, control, conservatism.", "Greed, instability, letting go."),
    rank(5, "五", "Conflict, loss, change.", "Resolved conflict, recovery."),
    rank(6, "六", "Harmony, generosity, memories of the past.", "Selfishness, held back by the past."),
    rank(7, "七", "Assessment, patience, investment.", "Impatience, a failed investment."),
    rank(8, "八", "Diligence, detail, growing skill.", "Perfectionism, lack of focus."),
    rank(9, "九", "Achievement, contentment, independence.", "Discontent, dependence, money troubles."),
    rank(10, "十", "Completion, fulfilment, legacy.", "Breakdown, unfinished business, family trouble."),
    rank(11, "侍从", "New messages, curiosity, youthful energy.", "Bad news, immaturity, procrastination."),
    rank(12, "骑士", "Action, pursuit, impulse.", "Recklessness, stagnation, unreliability."),
    rank(13, "皇后", "Nurturing, maturity, receptive energy.", "Jealousy, dependence, coldness."),
    rank(14, "国王", "Authority, mastery, active energy.", "Tyranny, weakness, abuse of power."),
];

static CATALOG: LazyLock<Vec<CardDefinition>> = LazyLock::new(build_catalog);

/// The full deck in catalog order: major arcana 0-21, then Wands, Cups,
/// Swords, Pentacles, each Ace through King.
///
/// Built once per process; every call returns the same slice.
pub fn all_cards() -> &'static [CardDefinition] {
    &CATALOG
}

/// Look up a card by id.
pub fn find_by_id(id: u32) -> Option<&'static CardDefinition> {
    all_cards().iter().find(|c| c.id == id)
}

/// Look up a card by English or Chinese name (case-insensitive).
pub fn find_by_name(name: &str) -> Option<&'static CardDefinition> {
    let needle = name.trim().to_lowercase();
    all_cards()
        .iter()
        .find(|c| c.name_en.to_lowercase() == needle || c.name_cn == needle)
}

/// Suggest card names similar to `partial`, best match first.
pub fn suggest(partial: &str, limit: usize) -> Vec<&'static str> {
    let partial_lower = partial.trim().to_lowercase();
    let mut scored: Vec<(&'static str, f64)> = all_cards()
        .iter()
        .filter_map(|card| {
            let name_lower = card.name_en.to_lowercase();
            let score = if name_lower.starts_with(&partial_lower) {
                2.0
            } else if name_lower.contains(&partial_lower) {
                1.5
            } else {
                jaro_winkler(&partial_lower, &name_lower)
            };
            (score >= SUGGEST_THRESHOLD).then_some((card.name_en.as_str(), score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(limit).map(|(name, _)| name).collect()
}

fn build_catalog() -> Vec<CardDefinition> {
    let mut cards = Vec::with_capacity(DECK_SIZE);

    for (ordinal, entry) in MAJOR_ARCANA.iter().enumerate() {
        cards.push(CardDefinition {
            id: ordinal as u32,
            name_en: entry.name_en.to_string(),
            name_cn: entry.name_cn.to_string(),
            arcana: ArcanaType::Major,
            suit: Suit::None,
            rank: None,
            meaning_upright: entry.upright.to_string(),
            meaning_reversed: entry.reversed.to_string(),
            keywords: entry.keywords.iter().map(|k| k.to_string()).collect(),
        });
    }

    for (suit_index, suit) in SUITS.iter().enumerate() {
        let element = suit.suit.element().unwrap_or_default();
        for rank in &RANKS {
            let rank_name = crate::card::rank_name(rank.rank).unwrap_or_default();
            let mut keywords: Vec<String> = suit.keywords.iter().map(|k| k.to_string()).collect();
            keywords.push(rank_name.to_string());

            cards.push(CardDefinition {
                id: MINOR_ID_BASE + suit_index as u32 * u32::from(RANKS_PER_SUIT) + u32::from(rank.rank),
                name_en: format!("{rank_name} of {}", suit.suit),
                name_cn: format!("{}{}", suit.name_cn, rank.name_cn),
                arcana: ArcanaType::Minor,
                suit: suit.suit,
                rank: Some(rank.rank),
                meaning_upright: format!("{} ({element} element)", rank.upright),
                meaning_reversed: format!("{} ({element} element)", rank.reversed),
                keywords,
            });
        }
    }

    cards
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn deck_has_78_cards() {
        assert_eq!(all_cards().len(), DECK_SIZE);
    }

    #[test]
    fn major_arcana_ids_are_ordinals() {
        let majors: Vec<_> = all_cards().iter().filter(|c| c.is_major()).collect();
        assert_eq!(majors.len(), MAJOR_COUNT);
        for (i, card) in majors.iter().enumerate() {
            assert_eq!(card.id, i as u32);
            assert_eq!(card.suit, Suit::None);
            assert_eq!(card.rank, None);
        }
    }

    #[test]
    fn one_minor_card_per_suit_and_rank() {
        let pairs: HashSet<(Suit, u8)> = all_cards()
            .iter()
            .filter(|c| !c.is_major())
            .map(|c| (c.suit, c.rank.unwrap_or(0)))
            .collect();
        assert_eq!(pairs.len(), 56);
        for suit in Suit::MINOR {
            for rank in 1..=RANKS_PER_SUIT {
                assert!(pairs.contains(&(suit, rank)), "missing {rank} of {suit}");
            }
        }
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<u32> = all_cards().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn minor_ids_follow_suit_offsets() {
        let ace_of_wands = find_by_name("Ace of Wands").unwrap();
        assert_eq!(ace_of_wands.id, 101);
        let king_of_pentacles = find_by_name("King of Pentacles").unwrap();
        assert_eq!(king_of_pentacles.id, 156);
        assert_eq!(king_of_pentacles.name_cn, "星币国王");
    }

    #[test]
    fn minor_text_is_composed_from_tables() {
        let card = find_by_name("Queen of Cups").unwrap();
        assert_eq!(card.name_cn, "圣杯皇后");
        assert!(card.meaning_upright.ends_with("(Water element)"));
        assert_eq!(
            card.keywords,
            vec!["Emotion", "Relationships", "Feelings", "Queen"]
        );
        assert!(card.is_court());
    }

    #[test]
    fn catalog_order_is_stable() {
        let first: Vec<u32> = all_cards().iter().map(|c| c.id).collect();
        let second: Vec<u32> = all_cards().iter().map(|c| c.id).collect();
        assert_eq!(first, second);
        assert!(std::ptr::eq(all_cards(), all_cards()));
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        assert_eq!(find_by_name("the tower").unwrap().id, 16);
        assert_eq!(find_by_name("  THE SUN ").unwrap().id, 19);
        assert_eq!(find_by_name("世界").unwrap().id, 21);
        assert!(find_by_name("The Jester").is_none());
    }

    #[test]
    fn find_by_id_lookup() {
        assert_eq!(find_by_id(0).unwrap().name_en, "The Fool");
        assert!(find_by_id(22).is_none());
    }

    #[test]
    fn suggestions_rank_prefix_matches_first() {
        let hints = suggest("The Hi", 3);
        assert_eq!(hints.first(), Some(&"The High Priestess"));
        assert!(suggest("zzzzzz", 3).is_empty());
    }
}
