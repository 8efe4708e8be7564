//! Accordion settings and JSON overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pagedom::{Easing, Selector, SelectorError, TransitionConfig};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading settings overrides.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The overrides are not valid JSON or contain unknown/mistyped options.
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),

    /// The overrides file could not be read.
    #[error("failed to read settings from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for one accordion attachment.
///
/// Built from [`Settings::default`] plus optional overrides; every field has a
/// default, so callers only set what they need.
///
/// # Example
///
/// ```
/// use link_accordion::Settings;
///
/// let settings = Settings::default()
///     .heading_element("h3")
///     .default_content(Some(-1))
///     .toggle_all(false);
/// assert_eq!(settings.open_text, "Open");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Class applied to a closed heading and its toggle link.
    pub closed_class: String,

    /// Class applied to an open heading and its toggle link.
    pub opened_class: String,

    /// Toggle link label while its section is open.
    pub close_text: String,

    /// Toggle link label while its section is closed.
    pub open_text: String,

    /// Selector for heading elements within the container.
    pub heading_element: String,

    /// true: the heading itself is the click target.
    /// false: a separate toggle link is appended to each heading.
    pub link_headings: bool,

    /// Section open after attach. Negative values count from the end;
    /// out-of-range values (and `None`) leave every section closed.
    pub default_content: Option<isize>,

    /// Show/hide animation speed.
    pub slide_toggle: SlideSpeed,

    /// Class on generated toggle links.
    pub toggle_link_class: String,

    /// Class on the wrapper generated around each section's content.
    pub toggle_section_class: String,

    /// Whether opening one section closes all others.
    pub toggle_all: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            closed_class: "toggled-closed".to_string(),
            opened_class: "toggled-open".to_string(),
            close_text: "Close".to_string(),
            open_text: "Open".to_string(),
            heading_element: "h2".to_string(),
            link_headings: false,
            default_content: None,
            slide_toggle: SlideSpeed::default(),
            toggle_link_class: "section-toggle".to_string(),
            toggle_section_class: "toggle-section".to_string(),
            toggle_all: true,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse JSON overrides and apply them over the defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(Self::default().merge(SettingsOverrides::from_json(json)?))
    }

    /// Read JSON overrides from a file and apply them over the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Replace every field that `overrides` provides; keep the rest.
    pub fn merge(mut self, overrides: SettingsOverrides) -> Self {
        let SettingsOverrides {
            closed_class,
            opened_class,
            close_text,
            open_text,
            heading_element,
            link_headings,
            default_content,
            slide_toggle,
            toggle_link_class,
            toggle_section_class,
            toggle_all,
        } = overrides;

        if let Some(v) = closed_class {
            self.closed_class = v;
        }
        if let Some(v) = opened_class {
            self.opened_class = v;
        }
        if let Some(v) = close_text {
            self.close_text = v;
        }
        if let Some(v) = open_text {
            self.open_text = v;
        }
        if let Some(v) = heading_element {
            self.heading_element = v;
        }
        if let Some(v) = link_headings {
            self.link_headings = v;
        }
        if default_content.is_some() {
            self.default_content = default_content;
        }
        if let Some(v) = slide_toggle {
            self.slide_toggle = v;
        }
        if let Some(v) = toggle_link_class {
            self.toggle_link_class = v;
        }
        if let Some(v) = toggle_section_class {
            self.toggle_section_class = v;
        }
        if let Some(v) = toggle_all {
            self.toggle_all = v;
        }
        self
    }

    pub fn heading_selector(&self) -> Result<Selector, SelectorError> {
        Selector::parse(&self.heading_element)
    }

    pub fn transition(&self) -> TransitionConfig {
        self.slide_toggle.transition()
    }

    /// Label for a toggle link whose section is `open`.
    pub fn label(&self, open: bool) -> &str {
        if open { &self.close_text } else { &self.open_text }
    }

    /// State class for a section that is `open`.
    pub fn state_class(&self, open: bool) -> &str {
        if open { &self.opened_class } else { &self.closed_class }
    }

    // Builder setters

    pub fn closed_class(mut self, class: impl Into<String>) -> Self {
        self.closed_class = class.into();
        self
    }

    pub fn opened_class(mut self, class: impl Into<String>) -> Self {
        self.opened_class = class.into();
        self
    }

    pub fn close_text(mut self, text: impl Into<String>) -> Self {
        self.close_text = text.into();
        self
    }

    pub fn open_text(mut self, text: impl Into<String>) -> Self {
        self.open_text = text.into();
        self
    }

    pub fn heading_element(mut self, selector: impl Into<String>) -> Self {
        self.heading_element = selector.into();
        self
    }

    pub fn link_headings(mut self, link_headings: bool) -> Self {
        self.link_headings = link_headings;
        self
    }

    pub fn default_content(mut self, index: Option<isize>) -> Self {
        self.default_content = index;
        self
    }

    pub fn slide_toggle(mut self, speed: SlideSpeed) -> Self {
        self.slide_toggle = speed;
        self
    }

    pub fn toggle_link_class(mut self, class: impl Into<String>) -> Self {
        self.toggle_link_class = class.into();
        self
    }

    pub fn toggle_section_class(mut self, class: impl Into<String>) -> Self {
        self.toggle_section_class = class.into();
        self
    }

    pub fn toggle_all(mut self, toggle_all: bool) -> Self {
        self.toggle_all = toggle_all;
        self
    }
}

/// Caller-supplied overrides, deserialised from the camelCase option names.
///
/// Unknown option names are rejected rather than silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsOverrides {
    pub closed_class: Option<String>,
    pub opened_class: Option<String>,
    pub close_text: Option<String>,
    pub open_text: Option<String>,
    pub heading_element: Option<String>,
    pub link_headings: Option<bool>,
    pub default_content: Option<isize>,
    #[serde(alias = "speed")]
    pub slide_toggle: Option<SlideSpeed>,
    pub toggle_link_class: Option<String>,
    pub toggle_section_class: Option<String>,
    pub toggle_all: Option<bool>,
}

impl SettingsOverrides {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Named animation speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedSpeed {
    Slow,
    Normal,
    Fast,
}

impl NamedSpeed {
    pub fn duration(self) -> Duration {
        match self {
            NamedSpeed::Slow => Duration::from_millis(600),
            NamedSpeed::Normal => Duration::from_millis(400),
            NamedSpeed::Fast => Duration::from_millis(200),
        }
    }
}

/// Show/hide animation configuration: a named speed, a duration in
/// milliseconds, or an explicit `{ "duration": ms, "easing": "..." }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SlideSpeed {
    Named(NamedSpeed),
    Millis(u64),
    Custom {
        duration: u64,
        #[serde(default = "default_easing")]
        easing: Easing,
    },
}

impl Default for SlideSpeed {
    fn default() -> Self {
        SlideSpeed::Named(NamedSpeed::Slow)
    }
}

fn default_easing() -> Easing {
    Easing::EaseInOut
}

impl SlideSpeed {
    pub fn transition(&self) -> TransitionConfig {
        match *self {
            SlideSpeed::Named(named) => TransitionConfig::new(named.duration(), default_easing()),
            SlideSpeed::Millis(ms) => {
                TransitionConfig::new(Duration::from_millis(ms), default_easing())
            }
            SlideSpeed::Custom { duration, easing } => {
                TransitionConfig::new(Duration::from_millis(duration), easing)
            }
        }
    }
}
