//! Dishwashing turn view

use hh_common::{DishwashingEvent, Person};

use super::surface;
use crate::api::HouseholdClient;
use crate::turn::{person_shares, recent_events, PersonShare, RECENT_LIMIT};

#[derive(Debug, Default)]
pub struct DishwashingView {
    events: Vec<DishwashingEvent>,
    whose_turn: Option<String>,
    loaded: bool,
    error: Option<String>,
}

impl DishwashingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the event log and the turn value together
    ///
    /// Both are replaced only when both calls succeed.
    pub async fn refresh(&mut self, api: &HouseholdClient) {
        let (events, turn) = tokio::join!(api.list_dishwashing_events(), api.whose_turn());

        match (events, turn) {
            (Ok(events), Ok(turn)) => {
                tracing::debug!(count = events.len(), turn = %turn, "Fetched dishwashing data");
                self.events = events;
                self.whose_turn = Some(turn).filter(|t| !t.trim().is_empty());
                self.loaded = true;
                self.error = None;
            }
            (Err(e), _) | (_, Err(e)) => surface(&mut self.error, "Failed to fetch dishwashing data", &e),
        }
    }

    /// Record that `person` washed up, then refetch
    pub async fn record(&mut self, api: &HouseholdClient, person: Person) {
        match api.record_dishwashing(person).await {
            Ok(()) => self.refresh(api).await,
            Err(e) => surface(
                &mut self.error,
                format!("Failed to add dishwashing event for {}", person),
                &e,
            ),
        }
    }

    pub fn events(&self) -> &[DishwashingEvent] {
        &self.events
    }

    /// Server-computed next person; `None` until known
    pub fn whose_turn(&self) -> Option<&str> {
        self.whose_turn.as_deref()
    }

    /// Up to ten most recent named events, newest first
    pub fn recent(&self) -> Vec<&DishwashingEvent> {
        recent_events(&self.events, RECENT_LIMIT)
    }

    /// Per-person share; `None` when the log is empty
    pub fn shares(&self) -> Option<Vec<PersonShare>> {
        person_shares(&self.events)
    }

    pub fn total(&self) -> usize {
        self.events.len()
    }

    /// True when the history list is truncated
    pub fn is_truncated(&self) -> bool {
        self.events.len() > RECENT_LIMIT
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
