//! Error types for sldr-widgets.

use sldr_core::{SelectorError, TemplateError};
use thiserror::Error;

/// Errors that can occur while building a widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliderError {
    /// The widget template did not parse.
    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),

    /// A lookup selector did not parse.
    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),

    /// The template lacks a node the widget renders into.
    #[error("template has no element matching `{selector}`")]
    MissingElement {
        /// Selector that found nothing
        selector: &'static str,
    },
}
