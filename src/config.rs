//! Engine configuration.
//!
//! Option names serialize in camelCase (`containerSelector`, `dragDelay`, ...) so JSON
//! written for the browser build of the widget loads unchanged. Every field has a default;
//! a partial document only overrides what it names.

use crate::constants::{
    DEFAULT_CLONE_CLASS, DEFAULT_CONTAINER_SELECTOR, DEFAULT_DRAGGING_CLASS, DEFAULT_DRAG_DELAY_MS,
    DEFAULT_GHOST_CLASS, DEFAULT_ITEM_SELECTOR, DEFAULT_SCROLL_SPEED, DEFAULT_SCROLL_THRESHOLD,
};
use crate::error::ConfigError;
use crate::selector::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Recognized options. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortConfig {
    /// Identifies containers that hold orderable items
    pub container_selector: String,
    /// Identifies draggable items
    pub item_selector: String,
    /// Restricts press-start to a sub-region of the item
    pub handle_selector: Option<String>,
    /// Class for placeholder clones
    pub ghost_class: String,
    /// Class that hides the real item while dragging
    pub dragging_class: String,
    /// Class for the clone following the pointer
    pub clone_class: String,
    /// Milliseconds before a press becomes a drag
    pub drag_delay: u64,
    /// Pixels from a container edge that trigger autoscroll
    pub scroll_threshold: f32,
    /// Pixels scrolled per move inside the threshold band
    pub scroll_speed: f32,
    /// Drive the host's debug overlay with resolver decisions
    pub debug: bool,
    /// Hovering a non-empty container between items appends the placeholder at its end
    pub append_on_container_background: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
            handle_selector: None,
            ghost_class: DEFAULT_GHOST_CLASS.to_string(),
            dragging_class: DEFAULT_DRAGGING_CLASS.to_string(),
            clone_class: DEFAULT_CLONE_CLASS.to_string(),
            drag_delay: DEFAULT_DRAG_DELAY_MS,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            debug: false,
            append_on_container_background: false,
        }
    }
}

/// Selectors parsed once at validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorSet {
    pub container: Selector,
    pub item: Selector,
    pub handle: Option<Selector>,
}

impl SelectorSet {
    /// Selector a press target must be inside of to start a session.
    pub fn press(&self) -> &Selector {
        self.handle.as_ref().unwrap_or(&self.item)
    }
}

impl SortConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn drag_delay(&self) -> Duration {
        Duration::from_millis(self.drag_delay)
    }

    /// Parse selectors and check numeric options.
    pub fn validate(&self) -> Result<SelectorSet, ConfigError> {
        for (option, value) in [
            ("scrollThreshold", self.scroll_threshold),
            ("scrollSpeed", self.scroll_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { option, value });
            }
        }

        let parse = |option: &'static str, value: &str| {
            Selector::parse(value).map_err(|source| ConfigError::Selector { option, source })
        };

        Ok(SelectorSet {
            container: parse("containerSelector", &self.container_selector)?,
            item: parse("itemSelector", &self.item_selector)?,
            handle: self
                .handle_selector
                .as_deref()
                .map(|handle| parse("handleSelector", handle))
                .transpose()?,
        })
    }
}
