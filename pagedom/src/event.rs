/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click on the element with id `target`
    Click { target: String, button: MouseButton },
}

impl Event {
    /// A primary-button click on `target`.
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
            button: MouseButton::Left,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Click { target, .. } => target,
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Per-dispatch state shared by every handler that sees one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    default_prevented: bool,
}

impl EventContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the default action (e.g. link navigation) for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
