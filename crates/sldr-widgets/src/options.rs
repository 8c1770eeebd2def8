//! Construction options for [`Slider`](crate::Slider).

use serde::{Deserialize, Serialize};

/// How a pointer position maps to a value while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMapping {
    /// `clamp(fraction, 0, 100) * (max - min)`, with no `min` offset.
    ///
    /// Only lines up with the visual range when `min` is 0; kept as the
    /// default for compatibility with existing sliders.
    #[default]
    Legacy,
    /// `min + clamp(fraction, 0, 1) * (max - min)`.
    Range,
}

/// Options for building a slider.
///
/// Missing bounds default to `0..=100` and a missing value to 0. An
/// explicit 0 is always honoured.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderOptions {
    /// Initial value, clamped into range
    pub value: Option<f64>,
    /// Lower bound
    pub min: Option<f64>,
    /// Upper bound
    pub max: Option<f64>,
    /// Suppress `"change"` notifications from the value setter
    pub skip_emit: bool,
    /// Pointer-to-value mapping used while dragging
    pub drag_mapping: DragMapping,
    /// Replacement markup for the widget structure
    pub template: Option<String>,
}

impl SliderOptions {
    /// Options with every field defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial value.
    #[must_use]
    pub const fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the lower bound.
    #[must_use]
    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound.
    #[must_use]
    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the skip-emit flag.
    #[must_use]
    pub const fn skip_emit(mut self, skip: bool) -> Self {
        self.skip_emit = skip;
        self
    }

    /// Set the drag mapping.
    #[must_use]
    pub const fn drag_mapping(mut self, mapping: DragMapping) -> Self {
        self.drag_mapping = mapping;
        self
    }

    /// Use custom markup for the widget structure.
    #[must_use]
    pub fn template(mut self, markup: impl Into<String>) -> Self {
        self.template = Some(markup.into());
        self
    }
}
