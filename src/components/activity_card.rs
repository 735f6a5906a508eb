//! Card for one activity: details, availability, and the participant roster.

#[cfg(test)]
#[path = "activity_card_test.rs"]
mod activity_card_test;

use leptos::prelude::*;

use crate::state::board::{ActivityEntry, ParticipantEntry};

/// One `.activity-card`.
///
/// Each participant row carries its own delete button; clicking it hands
/// `(activity name, email)` to `on_unregister`. Rows are rebuilt on every
/// render, so handlers never outlive the data they were bound to.
#[component]
pub fn ActivityCard(entry: ActivityEntry, on_unregister: Callback<(String, String)>) -> impl IntoView {
    let ActivityEntry {
        name,
        description,
        schedule,
        spots_left,
        participants,
    } = entry;
    let list_label = format!("Participants for {name}");

    let rows = if participants.is_empty() {
        view! { <li class="empty">"No participants yet"</li> }.into_any()
    } else {
        participants
            .into_iter()
            .map(|participant| {
                view! { <ParticipantRow activity=name.clone() participant=participant on_unregister=on_unregister/> }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="activity-card">
            <h4>{name}</h4>
            <p>{description}</p>
            <p><strong>"Schedule:"</strong>" "{schedule}</p>
            <p><strong>"Availability:"</strong>" "{format!("{spots_left} spots left")}</p>
            <p class="participants-title"><strong>"Participants:"</strong></p>
            <ul class="participant-list" aria-label=list_label>
                {rows}
            </ul>
        </div>
    }
}

#[component]
fn ParticipantRow(
    activity: String,
    participant: ParticipantEntry,
    on_unregister: Callback<(String, String)>,
) -> impl IntoView {
    let ParticipantEntry { email, initials } = participant;
    let button_label = format!("Unregister {email}");
    let row_email = email.clone();
    let button_email = email.clone();
    let target = (activity.clone(), email.clone());

    view! {
        <li class="participant-item" data-email=row_email>
            <span class="avatar" aria-hidden="true">{initials}</span>
            <span class="name">{email}</span>
            <button
                class="delete-participant"
                data-activity=activity
                data-email=button_email
                aria-label=button_label
                on:click=move |_| on_unregister.run(target.clone())
            >
                "🗑️"
            </button>
        </li>
    }
}
