//! The fixed prompt template sent to the narrative service.

use super::NarrativeRequest;

/// The user turn that follows the system prompt.
pub const USER_PROMPT: &str = "Reveal the guidance behind the cards.";

/// One line per card: `- <position>: <cn name> (<en name>) [<orientation>]`.
pub fn describe_cards(request: &NarrativeRequest) -> String {
    request
        .cards
        .iter()
        .map(|card| {
            format!(
                "- {}: {} ({}) [{}]",
                card.position, card.name_cn, card.name_en, card.orientation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the system prompt for a reading.
pub fn build_system_prompt(request: &NarrativeRequest, language: &str) -> String {
    format!(
        "You are a tarot master versed in mysticism, Jungian psychology, and symbolism.\n\
         Give a reading for the spread \"{spread}\".\n\
         \n\
         Requirements:\n\
         1. Tone: mysterious, deep, and empathetic, like an ancient sage speaking softly.\n\
         2. Structure: do not explain the cards one by one. Write a single coherent, \
         literary final synthesis.\n\
         3. Content: weave the symbolism of all the cards into one story about the \
         seeker's present situation, the currents beneath it, and what may come.\n\
         4. Language: {language}.\n\
         \n\
         Cards:\n\
         {cards}\n\
         \n\
         Begin the reading directly, without any greeting.",
        spread = request.spread_name,
        cards = describe_cards(request),
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tarot_core::{DrawOptions, Orientation, SpreadKind, all_cards, deal};

    use super::*;
    use crate::narrative::NarrativeCard;

    fn request() -> NarrativeRequest {
        let card = |position: &str, en: &str, cn: &str, orientation| NarrativeCard {
            position: position.to_string(),
            name_en: en.to_string(),
            name_cn: cn.to_string(),
            orientation,
        };
        NarrativeRequest {
            spread_name: "Flow of Time".to_string(),
            cards: vec![
                card("Past influence", "The Fool", "愚人", Orientation::Upright),
                card("Present situation", "The Magician", "魔术师", Orientation::Reversed),
                card("Future trend", "King of Pentacles", "星币国王", Orientation::Upright),
            ],
        }
    }

    #[test]
    fn card_lines() {
        insta::assert_snapshot!(describe_cards(&request()), @r"
        - Past influence: 愚人 (The Fool) [Upright]
        - Present situation: 魔术师 (The Magician) [Reversed]
        - Future trend: 星币国王 (King of Pentacles) [Upright]
        ");
    }

    #[test]
    fn system_prompt_embeds_spread_cards_and_language() {
        let prompt = build_system_prompt(&request(), "English");
        assert!(prompt.contains("the spread \"Flow of Time\""));
        assert!(prompt.contains("4. Language: English."));
        assert!(prompt.contains("Cards:\n- Past influence: 愚人 (The Fool) [Upright]\n"));
        assert!(prompt.ends_with("without any greeting."));
    }

    #[test]
    fn prompt_omits_meanings() {
        let spread = SpreadKind::CelticCross.config().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let cards = deal(all_cards(), &spread, &mut rng, &DrawOptions::default()).unwrap();
        let prompt = build_system_prompt(&NarrativeRequest::from_reading(&spread, &cards), "English");

        for drawn in &cards {
            let card = drawn.card();
            assert!(prompt.contains(&card.name_en));
            assert!(!prompt.contains(&card.meaning_upright), "{}", card.name_en);
            assert!(!prompt.contains(&card.meaning_reversed), "{}", card.name_en);
        }
    }
}
