//! Signup form: email input plus activity select.

#[cfg(test)]
#[path = "signup_form_test.rs"]
mod signup_form_test;

use leptos::prelude::*;

use crate::state::board::{BoardState, SELECT_PLACEHOLDER, SignupForm as SignupFields};

/// `#signup-form`.
///
/// Field values live in `BoardState::form` so the controller can reset them
/// after a successful signup. The select is rebuilt from `BoardState::options`
/// on every load, placeholder first.
#[component]
pub fn SignupForm(on_submit: Callback<SignupFields>) -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(board.with_untracked(|s| s.form.clone()));
    };

    let names = option_names(board);
    let options = move || {
        names
            .get()
            .into_iter()
            .map(|name| {
                let label = name.clone();
                view! { <option value=name>{label}</option> }
            })
            .collect_view()
    };

    view! {
        <form id="signup-form" on:submit=on_form_submit>
            <div class="form-group">
                <label for="email">"Student Email:"</label>
                <input
                    type="email"
                    id="email"
                    required=true
                    placeholder="your-email@mergington.edu"
                    prop:value=move || board.with(|s| s.form.email.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        board.update(|s| s.form.email = value);
                    }
                />
            </div>
            <div class="form-group">
                <label for="activity">"Select Activity:"</label>
                <select
                    id="activity"
                    required=true
                    prop:value=move || board.with(|s| s.form.activity.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        board.update(|s| s.form.activity = value);
                    }
                >
                    <option value="">{SELECT_PLACEHOLDER}</option>
                    {options}
                </select>
            </div>
            <button type="submit">"Sign Up"</button>
        </form>
    }
}

/// The select's activity names, isolated from form and banner writes.
pub(crate) fn option_names(board: RwSignal<BoardState>) -> Memo<Vec<String>> {
    Memo::new(move |_| board.with(|s| s.options.clone()))
}
