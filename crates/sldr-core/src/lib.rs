//! Core types for the sldr widget toolkit.
//!
//! This crate provides the host-side collaborators a widget is built on:
//! - Geometric primitives: [`Point`], [`Rect`]
//! - Input events: [`Event`], [`EventType`], [`DomEvent`]
//! - A retained-mode node tree: [`Scene`] with markup parsing and
//!   CSS-like lookup through [`Selector`]
//! - Event binding tables: [`Events`]
//! - Per-instance notifications: [`Emitter`]
//! - Numeric helpers: [`constrain`], [`js_number_string`], [`round_hundredths`]
//!
//! # Examples
//!
//! ```
//! use sldr_core::{Length, Scene};
//!
//! let mut scene = Scene::new();
//! let root = scene
//!     .parse(r#"<div class="box"><span class="fill"></span></div>"#)
//!     .expect("valid markup");
//! let fill = scene.find(".fill", root).expect("valid selector").expect("present");
//!
//! scene.translate(fill, Length::Percent(-40.0), 0.0);
//! assert_eq!(
//!     scene.transform(fill).map(|t| t.to_css()).as_deref(),
//!     Some("translate3d(-40%, 0px, 0)")
//! );
//! ```

pub mod bindings;
pub mod emitter;
mod event;
mod geometry;
mod number;
pub mod scene;
pub mod selector;
pub mod template;

pub use bindings::{BindError, BindingId, Events};
pub use emitter::{Emitter, ListenerId};
pub use event::{DomEvent, Event, EventType, TouchId, UnknownEventType};
pub use geometry::{Point, Rect};
pub use number::{constrain, js_number_string, round_hundredths};
pub use scene::{Length, Node, NodeId, Scene, TextMetrics, Translate};
pub use selector::{Selector, SelectorError};
pub use template::TemplateError;
