//! Dishwashing history display computations
//!
//! Who is due next comes from the backend; this module only orders the log
//! for display and computes each person's share of it.

use hh_common::time::parse_event_time;
use hh_common::{DishwashingEvent, Person};
use std::cmp::Ordering;

/// Number of events shown in the history list
pub const RECENT_LIMIT: usize = 10;

/// Most recent named events, newest first
///
/// Events with a null or empty name are left out. Events whose time cannot be parsed
/// sort after every parseable one, keeping their log order.
pub fn recent_events(events: &[DishwashingEvent], limit: usize) -> Vec<&DishwashingEvent> {
    let mut named: Vec<_> = events
        .iter()
        .filter(|e| e.name.as_deref().is_some_and(|n| !n.is_empty()))
        .map(|e| (parse_event_time(&e.time), e))
        .collect();

    named.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    named.into_iter().take(limit).map(|(_, e)| e).collect()
}

/// One person's part of the whole log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonShare {
    pub person: Person,
    pub count: usize,
    /// Percentage of all events, rounded to one decimal
    pub percentage: f64,
}

/// Share of the log per known person
///
/// The denominator is every event, named or not. `None` for an empty log.
pub fn person_shares(events: &[DishwashingEvent]) -> Option<Vec<PersonShare>> {
    if events.is_empty() {
        return None;
    }
    let total = events.len();

    let shares = Person::ALL
        .into_iter()
        .map(|person| {
            let count = events
                .iter()
                .filter(|e| e.name.as_deref() == Some(person.name()))
                .count();
            PersonShare {
                person,
                count,
                percentage: round_one_decimal(count as f64 / total as f64 * 100.0),
            }
        })
        .collect();

    Some(shares)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
