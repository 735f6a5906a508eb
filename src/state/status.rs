//! Single-slot status banner shown under the signup form.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

/// Outcome class of a status message. Doubles as the banner's CSS class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// The one live status message.
///
/// Hiding only flips visibility; the last text and kind stay in place until
/// the next message overwrites them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    /// `None` until the first message is shown.
    pub kind: Option<StatusKind>,
    pub visible: bool,
}

impl StatusMessage {
    /// Overwrite text and kind and make the banner visible.
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.text = text.into();
        self.kind = Some(kind);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Class attribute for the banner element, e.g. `"error"` or `"success hidden"`.
    pub fn class_name(&self) -> String {
        match (self.kind, self.visible) {
            (Some(kind), true) => kind.css_class().to_owned(),
            (Some(kind), false) => format!("{} hidden", kind.css_class()),
            (None, _) => "hidden".to_owned(),
        }
    }
}
