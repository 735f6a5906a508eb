//! Board state: everything the activity page renders.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the local projection of the last successful `GET /activities`
//! plus the form fields and the status banner. It is always rebuilt from a
//! fresh directory in one step, never patched entry by entry, so a render
//! can not mix rows from two different fetches.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use crate::net::types::{Activity, ActivityDirectory};
use crate::state::status::StatusMessage;

/// Label of the blank first option in the activity select.
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

/// Progress of the activity listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch has completed yet.
    #[default]
    Loading,
    /// `activities` mirrors the last successful fetch.
    Ready,
    /// The last fetch failed; the list area shows the failure notice.
    Failed,
}

/// Display projection of one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub email: String,
    pub initials: String,
}

impl ParticipantEntry {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_owned(),
            initials: initials(email),
        }
    }
}

/// Display projection of one activity card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityEntry {
    pub name: String,
    pub description: String,
    pub schedule: String,
    /// May be zero or negative; the service owns capacity checks.
    pub spots_left: i64,
    pub participants: Vec<ParticipantEntry>,
}

impl ActivityEntry {
    pub fn project(name: &str, activity: &Activity) -> Self {
        Self {
            name: name.to_owned(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: spots_left(activity),
            participants: activity
                .participants
                .iter()
                .map(|email| ParticipantEntry::new(email))
                .collect(),
        }
    }
}

/// Signup form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    /// Selected activity name; empty while the placeholder is selected.
    pub activity: String,
    pub email: String,
}

/// Everything the board page renders.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    pub load: LoadState,
    /// Cards in service order.
    pub activities: Vec<ActivityEntry>,
    /// Activity names offered by the select, after the placeholder.
    pub options: Vec<String>,
    pub form: SignupForm,
    pub status: StatusMessage,
}

impl BoardState {
    /// Replace cards and select options with a fresh directory.
    pub fn apply_directory(&mut self, directory: &ActivityDirectory) {
        self.activities = directory
            .iter()
            .map(|(name, activity)| ActivityEntry::project(name, activity))
            .collect();
        self.options = directory.names().map(str::to_owned).collect();
        self.load = LoadState::Ready;
    }

    /// Drop the cards in favor of the failure notice. Select options stay.
    pub fn mark_load_failed(&mut self) {
        self.activities.clear();
        self.load = LoadState::Failed;
    }

    pub fn reset_form(&mut self) {
        self.form = SignupForm::default();
    }

    pub fn activity(&self, name: &str) -> Option<&ActivityEntry> {
        self.activities.iter().find(|entry| entry.name == name)
    }
}

/// Remaining capacity: `max_participants - participants.len()`.
pub fn spots_left(activity: &Activity) -> i64 {
    let taken = i64::try_from(activity.participants.len()).unwrap_or(i64::MAX);
    activity.max_participants.saturating_sub(taken)
}

/// Avatar label: first character of each whitespace-separated token, at
/// most two, uppercased.
pub fn initials(identifier: &str) -> String {
    identifier
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
