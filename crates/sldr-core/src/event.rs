//! Input events delivered by the host to scene nodes.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input event types.
///
/// Positions are page coordinates. Touch events carry the position of the
/// touch point that triggered them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
    },
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
    },
    /// Touch started
    TouchStart {
        /// Touch identifier
        id: TouchId,
        /// Touch position
        position: Point,
    },
    /// Touch moved
    TouchMove {
        /// Touch identifier
        id: TouchId,
        /// New position
        position: Point,
    },
    /// Touch ended
    TouchEnd {
        /// Touch identifier
        id: TouchId,
        /// Final position
        position: Point,
    },
}

/// Touch identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TouchId(pub u32);

impl TouchId {
    /// Create a new touch ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl Event {
    /// Shorthand for a mouse down at `(x, y)`.
    #[must_use]
    pub const fn mouse_down(x: f64, y: f64) -> Self {
        Self::MouseDown {
            position: Point::new(x, y),
        }
    }

    /// Shorthand for a mouse move to `(x, y)`.
    #[must_use]
    pub const fn mouse_move(x: f64, y: f64) -> Self {
        Self::MouseMove {
            position: Point::new(x, y),
        }
    }

    /// Shorthand for a mouse up at `(x, y)`.
    #[must_use]
    pub const fn mouse_up(x: f64, y: f64) -> Self {
        Self::MouseUp {
            position: Point::new(x, y),
        }
    }

    /// The binding key for this event.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::MouseDown { .. } => EventType::MouseDown,
            Self::MouseMove { .. } => EventType::MouseMove,
            Self::MouseUp { .. } => EventType::MouseUp,
            Self::TouchStart { .. } => EventType::TouchStart,
            Self::TouchMove { .. } => EventType::TouchMove,
            Self::TouchEnd { .. } => EventType::TouchEnd,
        }
    }

    /// Page position of the event.
    #[must_use]
    pub const fn position(&self) -> Point {
        match self {
            Self::MouseMove { position }
            | Self::MouseDown { position }
            | Self::MouseUp { position }
            | Self::TouchStart { position, .. }
            | Self::TouchMove { position, .. }
            | Self::TouchEnd { position, .. } => *position,
        }
    }

    /// Horizontal page coordinate of the event.
    #[must_use]
    pub const fn page_x(&self) -> f64 {
        self.position().x
    }
}

/// Event names listeners are bound by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// `mousedown`
    MouseDown,
    /// `mousemove`
    MouseMove,
    /// `mouseup`
    MouseUp,
    /// `touchstart`
    TouchStart,
    /// `touchmove`
    TouchMove,
    /// `touchend`
    TouchEnd,
}

impl EventType {
    /// The DOM-style event name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an event name is not one the scene dispatches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mousedown" => Ok(Self::MouseDown),
            "mousemove" => Ok(Self::MouseMove),
            "mouseup" => Ok(Self::MouseUp),
            "touchstart" => Ok(Self::TouchStart),
            "touchmove" => Ok(Self::TouchMove),
            "touchend" => Ok(Self::TouchEnd),
            other => Err(UnknownEventType(other.to_string())),
        }
    }
}

/// An event in flight through a dispatch, with its default-action flag.
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    event: Event,
    default_prevented: bool,
}

impl DomEvent {
    /// Wrap an event for dispatch.
    #[must_use]
    pub const fn new(event: Event) -> Self {
        Self {
            event,
            default_prevented: false,
        }
    }

    /// The wrapped event.
    #[must_use]
    pub const fn event(&self) -> &Event {
        &self.event
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler called [`Self::prevent_default`].
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl From<Event> for DomEvent {
    fn from(event: Event) -> Self {
        Self::new(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_start() {
        let event = Event::TouchStart {
            id: TouchId::new(1),
            position: Point::new(100.0, 200.0),
        };
        assert_eq!(event.position(), Point::new(100.0, 200.0));
        assert_eq!(event.event_type(), EventType::TouchStart);
    }

    #[test]
    fn test_event_page_x() {
        let event = Event::TouchEnd {
            id: TouchId::default(),
            position: Point::new(42.5, 7.0),
        };
        assert_eq!(event.page_x(), 42.5);
    }

    #[test]
    fn test_event_type_mapping() {
        assert_eq!(Event::mouse_down(1.0, 1.0).event_type(), EventType::MouseDown);
        assert_eq!(Event::mouse_move(1.0, 1.0).event_type(), EventType::MouseMove);
        assert_eq!(Event::mouse_up(1.0, 1.0).event_type(), EventType::MouseUp);
    }

    #[test]
    fn test_event_type_parse() {
        for ty in [
            EventType::MouseDown,
            EventType::MouseMove,
            EventType::MouseUp,
            EventType::TouchStart,
            EventType::TouchMove,
            EventType::TouchEnd,
        ] {
            assert_eq!(ty.as_str().parse::<EventType>(), Ok(ty));
        }
    }

    #[test]
    fn test_event_type_parse_unknown() {
        let err = "click".parse::<EventType>().unwrap_err();
        assert_eq!(err, UnknownEventType("click".to_string()));
        assert_eq!(err.to_string(), "unknown event type: click");
    }

    #[test]
    fn test_dom_event_prevent_default() {
        let mut event = DomEvent::from(Event::mouse_down(5.0, 5.0));
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
        assert_eq!(event.event().page_x(), 5.0);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&EventType::TouchMove).unwrap();
        assert_eq!(json, "\"touchmove\"");
    }
}
