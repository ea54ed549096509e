//! Reading session management.
//!
//! `ReadingSession` owns one reading at a time, from the deal to the final
//! synthesis. Starting a reading shuffles, deals, and immediately spawns
//! the narrative request in the background, so the service works while the
//! cards are being turned over. Each reading carries a fresh [`ReadingId`];
//! results from the background task are tagged with it, and anything that
//! arrives for a reading that has since been reset or replaced is dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use tarot_core::{DrawOptions, DrawnCard, SpreadConfig, all_cards, deal};

use crate::config::ReadingConfig;
use crate::error::{NarrativeError, ReadingError, ReadingResult};
use crate::narrative::{NarrativeProvider, NarrativeRequest, NarrativeStatus};

/// Identifies one dealt reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReadingId(Uuid);

impl ReadingId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ReadingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of the session's reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingPhase {
    /// Nothing dealt yet, or the last reading was reset.
    Empty,
    /// Cards are on the table and at least one is still face down.
    Drawn,
    /// Every card has been revealed.
    Complete,
}

impl std::fmt::Display for ReadingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Drawn => write!(f, "drawn"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// What a call to [`ReadingSession::reveal`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The card was turned face up; others remain face down.
    Revealed,
    /// The card was already face up; nothing changed.
    AlreadyRevealed,
    /// The card was the last one face down. Returned once per reading.
    Completed,
}

/// A serializable view of the current reading.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingSnapshot {
    /// Reading identifier.
    pub id: ReadingId,
    /// Lifecycle phase.
    pub phase: ReadingPhase,
    /// The spread the cards were dealt into.
    pub spread: SpreadConfig,
    /// The dealt cards in position order.
    pub cards: Vec<DrawnCard<'static>>,
    /// State of the synthesis request.
    pub narrative: NarrativeStatus,
    /// When the cards were dealt.
    pub drawn_at: DateTime<Utc>,
    /// When the last card was revealed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// A narrative result, tagged with the reading it was requested for.
struct NarrativeDelivery {
    reading_id: ReadingId,
    result: Result<String, NarrativeError>,
}

struct ActiveReading {
    id: ReadingId,
    spread: SpreadConfig,
    cards: Vec<DrawnCard<'static>>,
    narrative: NarrativeStatus,
    task: JoinHandle<()>,
    drawn_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Drives one reading at a time: deal, reveal, synthesize, reset.
pub struct ReadingSession {
    provider: Arc<dyn NarrativeProvider>,
    config: ReadingConfig,
    draw_options: DrawOptions,
    rng: StdRng,
    results_tx: mpsc::UnboundedSender<NarrativeDelivery>,
    results_rx: mpsc::UnboundedReceiver<NarrativeDelivery>,
    active: Option<ActiveReading>,
}

impl ReadingSession {
    /// Create an empty session that requests syntheses from `provider`.
    pub fn new(provider: Arc<dyn NarrativeProvider>, config: ReadingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Self {
            provider,
            draw_options: config.draw_options(),
            config,
            rng,
            results_tx,
            results_rx,
            active: None,
        }
    }

    /// Get the session configuration.
    pub fn config(&self) -> &ReadingConfig {
        &self.config
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> ReadingPhase {
        match &self.active {
            None => ReadingPhase::Empty,
            Some(reading) if reading.completed_at.is_some() => ReadingPhase::Complete,
            Some(_) => ReadingPhase::Drawn,
        }
    }

    /// Id of the current reading.
    pub fn reading_id(&self) -> Option<ReadingId> {
        self.active.as_ref().map(|r| r.id)
    }

    /// The spread of the current reading.
    pub fn spread(&self) -> Option<&SpreadConfig> {
        self.active.as_ref().map(|r| &r.spread)
    }

    /// The dealt cards, in position order. Empty when no reading is active.
    pub fn cards(&self) -> &[DrawnCard<'static>] {
        self.active.as_ref().map_or(&[], |r| r.cards.as_slice())
    }

    /// The text to show when the synthesis failed.
    pub fn fallback_text(&self) -> &str {
        &self.config.fallback_text
    }

    /// Deal a new reading into `spread` and start its narrative request.
    ///
    /// Any reading already in progress is reset first, unless `spread` is
    /// rejected, in which case it is left untouched. Must be called from
    /// within a Tokio runtime; the narrative request runs as a spawned task
    /// and this method returns without waiting for it.
    pub fn start(&mut self, spread: &SpreadConfig) -> ReadingResult<ReadingId> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ReadingError::NoRuntime)?;
        let cards = deal(all_cards(), spread, &mut self.rng, &self.draw_options)?;
        self.reset();

        let id = ReadingId::new();
        debug!(reading = %id, spread = %spread.kind, cards = cards.len(), "dealt reading");

        let request = NarrativeRequest::from_reading(spread, &cards);
        let provider = Arc::clone(&self.provider);
        let results_tx = self.results_tx.clone();
        let task = runtime.spawn(async move {
            let result = provider.request_narrative(&request).await;
            // The receiver lives as long as the session; a send error only
            // means the session is gone and nobody is waiting.
            let _ = results_tx.send(NarrativeDelivery {
                reading_id: id,
                result,
            });
        });

        self.active = Some(ActiveReading {
            id,
            spread: spread.clone(),
            cards,
            narrative: NarrativeStatus::Pending,
            task,
            drawn_at: Utc::now(),
            completed_at: None,
        });

        Ok(id)
    }

    /// Turn the card at `index` face up.
    ///
    /// Revealing an already revealed card is a no-op. The reveal that turns
    /// the last face-down card returns [`RevealOutcome::Completed`]; the
    /// caller then awaits the synthesis with [`ReadingSession::wait_narrative`].
    pub fn reveal(&mut self, index: usize) -> ReadingResult<RevealOutcome> {
        let reading = self.active.as_mut().ok_or(ReadingError::NoActiveReading)?;
        let len = reading.cards.len();
        let card = reading
            .cards
            .get_mut(index)
            .ok_or(ReadingError::InvalidPosition { index, len })?;

        if !card.reveal() {
            return Ok(RevealOutcome::AlreadyRevealed);
        }
        debug!(reading = %reading.id, index, card = %card.card().name_en, "revealed card");

        if reading.cards.iter().all(DrawnCard::is_revealed) {
            reading.completed_at = Some(Utc::now());
            debug!(reading = %reading.id, "all cards revealed");
            Ok(RevealOutcome::Completed)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Reveal every face-down card in position order.
    ///
    /// Returns `true` if this call completed the reading.
    pub fn reveal_all(&mut self) -> ReadingResult<bool> {
        let mut completed = false;
        for index in 0..self.cards().len() {
            if self.reveal(index)? == RevealOutcome::Completed {
                completed = true;
            }
        }
        Ok(completed)
    }

    /// Apply any results that have arrived and return the synthesis status.
    ///
    /// Never blocks. Returns `None` when no reading is active. A request
    /// task that ended without delivering (panicked or cancelled) is
    /// recorded as a failure.
    pub fn narrative_status(&mut self) -> Option<&NarrativeStatus> {
        // Checked before draining: a task only finishes after its send.
        let finished = self.active.as_ref().is_some_and(|r| r.task.is_finished());
        while let Ok(delivery) = self.results_rx.try_recv() {
            self.apply(delivery);
        }

        if let Some(reading) = self
            .active
            .as_mut()
            .filter(|r| finished && !r.narrative.is_settled())
        {
            let error = NarrativeError::TaskEnded;
            warn!(reading = %reading.id, error = %error, "narrative request failed");
            reading.narrative = NarrativeStatus::Failed(error.to_string());
        }
        self.active.as_ref().map(|r| &r.narrative)
    }

    /// Wait until the current reading's synthesis has settled.
    pub async fn wait_narrative(&mut self) -> ReadingResult<NarrativeStatus> {
        loop {
            match self.narrative_status() {
                None => return Err(ReadingError::NoActiveReading),
                Some(status) if status.is_settled() => return Ok(status.clone()),
                Some(_) => {}
            }

            let Some(reading) = self.active.as_mut() else {
                return Err(ReadingError::NoActiveReading);
            };
            // Wake on a delivery or on the task ending; a task that ends
            // without delivering is settled by the next status check.
            let delivery = tokio::select! {
                delivery = self.results_rx.recv() => Some(delivery),
                _ = &mut reading.task => None,
            };
            match delivery {
                Some(Some(delivery)) => self.apply(delivery),
                // Unreachable while the session holds a sender.
                Some(None) => return Err(ReadingError::NoActiveReading),
                None => {}
            }
        }
    }

    /// Discard the current reading and abort its narrative request.
    ///
    /// Safe in any phase. A result already in flight for the discarded
    /// reading is ignored when it arrives.
    pub fn reset(&mut self) {
        if let Some(reading) = self.active.take() {
            if !reading.narrative.is_settled() {
                reading.task.abort();
            }
            debug!(reading = %reading.id, "reading reset");
        }
    }

    /// A serializable copy of the current reading.
    pub fn snapshot(&mut self) -> Option<ReadingSnapshot> {
        self.narrative_status();
        let phase = self.phase();
        self.active.as_ref().map(|r| ReadingSnapshot {
            id: r.id,
            phase,
            spread: r.spread.clone(),
            cards: r.cards.clone(),
            narrative: r.narrative.clone(),
            drawn_at: r.drawn_at,
            completed_at: r.completed_at,
        })
    }

    fn apply(&mut self, delivery: NarrativeDelivery) {
        let Some(reading) = self
            .active
            .as_mut()
            .filter(|r| r.id == delivery.reading_id && !r.narrative.is_settled())
        else {
            debug!(reading = %delivery.reading_id, "dropping stale narrative result");
            return;
        };

        reading.narrative = match delivery.result {
            Ok(text) => {
                info!(reading = %reading.id, chars = text.chars().count(), "narrative ready");
                NarrativeStatus::Ready(text)
            }
            Err(e) => {
                warn!(reading = %reading.id, error = %e, "narrative request failed");
                NarrativeStatus::Failed(e.to_string())
            }
        };
    }
}

impl Drop for ReadingSession {
    fn drop(&mut self) {
        self.reset();
    }
}
