//! Activity board page: activity cards, signup form, and status banner.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use leptos::prelude::*;

use crate::components::activity_card::ActivityCard;
use crate::components::signup_form::SignupForm;
use crate::components::status_banner::StatusBanner;
use crate::state::board::{ActivityEntry, BoardState, LoadState, SignupForm as SignupFields};

/// The single page of the app.
///
/// Owns the `BoardState` signal and, in the browser, the `ActivityBoard`
/// controller that loads the activities on mount and runs every user action.
#[component]
pub fn ActivityBoardPage() -> impl IntoView {
    let board = RwSignal::new(BoardState::default());
    provide_context(board);

    #[cfg(feature = "csr")]
    let controller = {
        use crate::board_sync::{ActivityBoard, BrowserTimer};
        use crate::config::BoardConfig;
        use crate::net::api::HttpBackend;

        let config = use_context::<BoardConfig>().unwrap_or_default();
        let backend = HttpBackend::new(config.api_base.clone());
        let controller = StoredValue::new_local(ActivityBoard::new(backend, board, BrowserTimer, config));
        leptos::task::spawn_local(async move {
            controller.get_value().load_and_render().await;
        });
        controller
    };

    let on_unregister = Callback::new(move |(activity, email): (String, String)| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            controller.get_value().submit_unregister(&activity, &email).await;
        });
        #[cfg(not(feature = "csr"))]
        log::warn!("unregister {email} from {activity} ignored outside the browser");
    });

    let on_signup = Callback::new(move |form: SignupFields| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            controller.get_value().submit_signup(&form.activity, &form.email).await;
        });
        #[cfg(not(feature = "csr"))]
        log::warn!("signup {} for {} ignored outside the browser", form.email, form.activity);
    });

    let cards = listing(board);
    let activity_list = move || match cards.get() {
        (LoadState::Loading, _) => view! { <p>"Loading activities..."</p> }.into_any(),
        (LoadState::Failed, _) => view! { <p>"Failed to load activities. Please try again later."</p> }.into_any(),
        (LoadState::Ready, activities) => activities
            .into_iter()
            .map(|entry| view! { <ActivityCard entry=entry on_unregister=on_unregister/> })
            .collect_view()
            .into_any(),
    };

    view! {
        <header>
            <h1>"Mergington High School"</h1>
            <h2>"Extracurricular Activities"</h2>
        </header>
        <main>
            <section id="activities-container">
                <h3>"Available Activities"</h3>
                <div id="activities-list">{activity_list}</div>
            </section>
            <section id="signup-container">
                <h3>"Sign Up for an Activity"</h3>
                <SignupForm on_submit=on_signup/>
                <StatusBanner/>
            </section>
        </main>
    }
}

/// Load state and cards, isolated from form and banner writes.
pub(crate) fn listing(board: RwSignal<BoardState>) -> Memo<(LoadState, Vec<ActivityEntry>)> {
    Memo::new(move |_| board.with(|s| (s.load, s.activities.clone())))
}
