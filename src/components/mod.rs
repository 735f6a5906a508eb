//! UI components for the activity board page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read `RwSignal<BoardState>` from context and report user
//! actions through callbacks; none of them talk to the network.

pub mod activity_card;
pub mod signup_form;
pub mod status_banner;
