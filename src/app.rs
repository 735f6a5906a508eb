//! Root application component with context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::config::BoardConfig;
use crate::pages::board::ActivityBoardPage;

/// Root application component.
///
/// Provides the board configuration to the page and sets the document title.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(BoardConfig::from_build_env());

    view! {
        <Title text="Mergington High School Activities"/>
        <ActivityBoardPage/>
    }
}
