//! Status banner under the signup form.

use leptos::prelude::*;

use crate::state::board::BoardState;

/// `#message`: the single live status message. Hidden via the `hidden` class.
#[component]
pub fn StatusBanner() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();

    let class_name = move || board.with(|s| s.status.class_name());
    let text = move || board.with(|s| s.status.text.clone());

    view! { <div id="message" class=class_name>{text}</div> }
}
