//! The narrative-generation collaborator.
//!
//! A reading's synthesis comes from an external text-generation service.
//! The session only needs one capability from it: turn a spread and its
//! drawn cards into a block of text, or fail. That capability is the
//! [`NarrativeProvider`] trait; [`ChatCompletionsProvider`] is the HTTP
//! implementation, and the other providers here cover offline use.

pub mod client;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tarot_core::{DrawnCard, Orientation, SpreadConfig};

use crate::error::{NarrativeError, NarrativeResult};

pub use client::ChatCompletionsProvider;

/// One card as the narrative service sees it: identity, orientation, position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeCard {
    /// Label of the spread position the card occupies.
    pub position: String,
    /// English card name.
    pub name_en: String,
    /// Chinese card name.
    pub name_cn: String,
    /// Upright or reversed.
    pub orientation: Orientation,
}

/// Everything the narrative service is given about a reading.
///
/// Meanings and keywords are deliberately absent: the service interprets
/// the cards from their names, orientations, and positions alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    /// Display name of the spread.
    pub spread_name: String,
    /// The dealt cards in position order.
    pub cards: Vec<NarrativeCard>,
}

impl NarrativeRequest {
    /// Build a request from a spread and the cards dealt into it.
    pub fn from_reading(spread: &SpreadConfig, cards: &[DrawnCard<'_>]) -> Self {
        let cards = cards
            .iter()
            .enumerate()
            .map(|(i, drawn)| {
                let index = drawn.position_index().unwrap_or(i);
                NarrativeCard {
                    position: spread.position_label(index),
                    name_en: drawn.card().name_en.clone(),
                    name_cn: drawn.card().name_cn.clone(),
                    orientation: drawn.orientation(),
                }
            })
            .collect();

        Self {
            spread_name: spread.name.clone(),
            cards,
        }
    }
}

/// Where a reading's synthesis currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum NarrativeStatus {
    /// The request is still in flight.
    Pending,
    /// The service returned this text.
    Ready(String),
    /// The request failed; the string describes why.
    Failed(String),
}

impl NarrativeStatus {
    /// Whether the request has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A source of reading syntheses.
///
/// Called once per reading, from a background task. Implementations should
/// not retry: a failure is reported to the session and shown as a fallback.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    /// Produce the synthesis for `request`.
    async fn request_narrative(&self, request: &NarrativeRequest) -> NarrativeResult<String>;
}

/// A provider for offline use: every request fails as not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProvider;

#[async_trait]
impl NarrativeProvider for DisabledProvider {
    async fn request_narrative(&self, _request: &NarrativeRequest) -> NarrativeResult<String> {
        Err(NarrativeError::NotConfigured("narrative service disabled"))
    }
}

/// A provider that always answers with the same text.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    text: String,
}

impl StaticProvider {
    /// Create a provider answering with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl NarrativeProvider for StaticProvider {
    async fn request_narrative(&self, _request: &NarrativeRequest) -> NarrativeResult<String> {
        if self.text.trim().is_empty() {
            return Err(NarrativeError::EmptyResponse);
        }
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tarot_core::{DrawOptions, SpreadKind, all_cards, deal};

    use super::*;

    fn three_card_request() -> NarrativeRequest {
        let spread = SpreadKind::ThreeCard.config().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let cards = deal(all_cards(), &spread, &mut rng, &DrawOptions::default()).unwrap();
        NarrativeRequest::from_reading(&spread, &cards)
    }

    #[test]
    fn request_carries_positions_in_order() {
        let request = three_card_request();
        assert_eq!(request.spread_name, "Flow of Time (时间之流)");
        let positions: Vec<&str> = request.cards.iter().map(|c| c.position.as_str()).collect();
        assert_eq!(
            positions,
            vec!["Past influence", "Present situation", "Future trend"]
        );
    }

    #[test]
    fn status_serializes_with_tag() {
        let json = serde_json::to_value(NarrativeStatus::Ready("text".into())).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["detail"], "text");
        let json = serde_json::to_value(NarrativeStatus::Pending).unwrap();
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn settled_states() {
        assert!(!NarrativeStatus::Pending.is_settled());
        assert!(NarrativeStatus::Ready(String::new()).is_settled());
        assert!(NarrativeStatus::Failed(String::new()).is_settled());
    }

    #[tokio::test]
    async fn disabled_provider_fails() {
        let result = DisabledProvider.request_narrative(&three_card_request()).await;
        assert!(matches!(result, Err(NarrativeError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn static_provider_answers() {
        let provider = StaticProvider::new("The stars align.");
        let text = provider
            .request_narrative(&three_card_request())
            .await
            .unwrap();
        assert_eq!(text, "The stars align.");

        let empty = StaticProvider::new("   ");
        assert!(matches!(
            empty.request_narrative(&three_card_request()).await,
            Err(NarrativeError::EmptyResponse)
        ));
    }
}
