//! Draggable range slider.
//!
//! The slider renders into a [`Scene`] from a small markup template: a
//! value label and a gauge inside a `.wrap` node, plus min and max labels.
//! Pointer presses on the root start a drag; moves and releases are then
//! tracked on the document body until the gesture ends.

use crate::error::SliderError;
use crate::options::{DragMapping, SliderOptions};
use sldr_core::{
    constrain, js_number_string, round_hundredths, DomEvent, Emitter, EventType, Events, Length,
    ListenerId, NodeId, Scene,
};

/// Markup the slider builds itself from.
pub const TEMPLATE: &str = r#"<div class="sldr">
  <div class="wrap">
    <div class="label-value"></div>
    <div class="gauge"></div>
  </div>
  <div class="label-wrap">
    <span class="label-min"></span><span class="label-max"></span>
  </div>
</div>
"#;

/// Event name used for value notifications.
pub const CHANGE: &str = "change";

/// Class set on the root while a drag is moving.
pub const ACTIVE_CLASS: &str = "is-active";

/// Class set on the value label when it sits right of the fill edge.
pub const CLOSE_ZERO_CLASS: &str = "is-close-zero";

/// Minimum room, in pixels, the value label needs left of the fill edge.
const LABEL_PADDING: f64 = 20.0;

/// Message emitted when slider value changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderChanged {
    /// The new value
    pub value: f64,
}

/// Root geometry captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    /// Client width of the root
    pub width: f64,
    /// Left offset of the root on the page
    pub left: f64,
}

/// Pointer gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Between a press and its release
    Dragging(DragOrigin),
}

/// Nodes the slider renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderParts {
    /// Root container
    pub root: NodeId,
    /// Track wrapper
    pub wrap: NodeId,
    /// Current value label
    pub value_label: NodeId,
    /// Fill gauge
    pub gauge: NodeId,
    /// Lower bound label
    pub min_label: NodeId,
    /// Upper bound label
    pub max_label: NodeId,
}

impl SliderParts {
    fn find(scene: &Scene, root: NodeId) -> Result<Self, SliderError> {
        let lookup = |selector: &'static str| -> Result<NodeId, SliderError> {
            scene
                .find(selector, root)?
                .ok_or(SliderError::MissingElement { selector })
        };
        Ok(Self {
            root,
            wrap: lookup(".wrap")?,
            value_label: lookup(".label-value")?,
            gauge: lookup(".gauge")?,
            min_label: lookup(".label-min")?,
            max_label: lookup(".label-max")?,
        })
    }
}

/// Handler methods reachable through event bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    TouchStart,
    TouchMove,
    TouchEnd,
}

/// Slider widget for selecting a value from a range.
#[derive(Debug)]
pub struct Slider {
    /// Current value
    value: f64,
    /// Minimum value
    min: f64,
    /// Maximum value
    max: f64,
    /// Suppress change notifications from the setter
    skip_emit: bool,
    /// Pointer-to-value mapping
    drag_mapping: DragMapping,
    /// Gesture state
    drag: DragState,
    /// Rendered nodes, released on destroy
    parts: Option<SliderParts>,
    /// Bindings on the root
    events: Events<Handler>,
    /// Bindings on the document body, live only while dragging
    body_events: Events<Handler>,
    /// Change listeners
    emitter: Emitter<SliderChanged>,
}

impl Slider {
    /// Create a slider with value 0 in `0..=100`.
    ///
    /// # Errors
    ///
    /// Never fails with the built-in template.
    pub fn new(scene: &mut Scene) -> Result<Self, SliderError> {
        Self::with_options(scene, &SliderOptions::default())
    }

    /// Create a slider from an optional value and bounds.
    ///
    /// # Errors
    ///
    /// Never fails with the built-in template.
    pub fn create(
        scene: &mut Scene,
        value: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<Self, SliderError> {
        let options = SliderOptions {
            value,
            min,
            max,
            ..SliderOptions::default()
        };
        Self::with_options(scene, &options)
    }

    /// Create a slider from options.
    ///
    /// The root is left detached; append [`Slider::root`] to the scene body
    /// (or any attached node) to show it.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom template does not parse or lacks one of
    /// the nodes the slider renders into.
    pub fn with_options(scene: &mut Scene, options: &SliderOptions) -> Result<Self, SliderError> {
        let markup = options.template.as_deref().unwrap_or(TEMPLATE);
        let root = scene.parse(markup)?;
        let parts = match SliderParts::find(scene, root) {
            Ok(parts) => parts,
            Err(err) => {
                scene.remove_subtree(root);
                return Err(err);
            }
        };

        let min = options.min.unwrap_or(0.0);
        let max = options.max.unwrap_or(100.0);
        let mut slider = Self {
            value: constrain(options.value.unwrap_or(0.0), min, max),
            min,
            max,
            skip_emit: options.skip_emit,
            drag_mapping: options.drag_mapping,
            drag: DragState::Idle,
            parts: Some(parts),
            events: Events::new(root),
            body_events: Events::new(scene.body()),
            emitter: Emitter::new(),
        };
        slider.bind();
        slider.render(scene);

        tracing::debug!(
            root = root.index(),
            value = slider.value,
            min,
            max,
            "slider created"
        );
        Ok(slider)
    }

    fn bind(&mut self) {
        self.events.bind(EventType::MouseDown, Handler::TouchStart);
        self.events.bind(EventType::TouchStart, Handler::TouchStart);
    }

    fn bind_body(&mut self) {
        self.body_events.unbind_all();
        self.body_events.bind(EventType::MouseMove, Handler::TouchMove);
        self.body_events.bind(EventType::MouseUp, Handler::TouchEnd);
        self.body_events.bind(EventType::TouchMove, Handler::TouchMove);
        self.body_events.bind(EventType::TouchEnd, Handler::TouchEnd);
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Get current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Set the value, clamped into `[min, max]`, re-render and notify.
    pub fn set_value(&mut self, scene: &mut Scene, value: f64) {
        self.value = constrain(value, self.min, self.max);
        self.render(scene);
        if !self.skip_emit {
            self.emitter.emit(CHANGE, &SliderChanged { value: self.value });
        }
    }

    /// Get minimum value.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Set the lower bound and re-render. The value is not re-clamped.
    pub fn set_min(&mut self, scene: &mut Scene, min: f64) {
        self.min = min;
        self.render(scene);
    }

    /// Get maximum value.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Set the upper bound and re-render. The value is not re-clamped.
    pub fn set_max(&mut self, scene: &mut Scene, max: f64) {
        self.max = max;
        self.render(scene);
    }

    /// Position of the value within the range, in percent.
    ///
    /// NaN or infinite when `min == max`.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        (self.value - self.min) / (self.max - self.min) * 100.0
    }

    /// Label text for a value: rounded to two decimals, with `.00`
    /// appended when the result has no decimal point.
    #[must_use]
    pub fn format(value: f64) -> String {
        let mut text = js_number_string(round_hundredths(value));
        if !text.contains('.') {
            text.push_str(".00");
        }
        text
    }

    /// Whether the value setter skips notifications.
    #[must_use]
    pub const fn skip_emit(&self) -> bool {
        self.skip_emit
    }

    /// Enable or disable notifications from the value setter.
    pub fn set_skip_emit(&mut self, skip: bool) {
        self.skip_emit = skip;
    }

    /// Pointer-to-value mapping used while dragging.
    #[must_use]
    pub const fn drag_mapping(&self) -> DragMapping {
        self.drag_mapping
    }

    /// Current gesture state.
    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// Rendered nodes, `None` once destroyed.
    #[must_use]
    pub const fn parts(&self) -> Option<SliderParts> {
        self.parts
    }

    /// Root node, `None` once destroyed.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.parts.map(|p| p.root)
    }

    /// Whether [`Slider::destroy`] has run.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.parts.is_none()
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Listen on a slider event.
    pub fn on(
        &mut self,
        event: &str,
        callback: impl FnMut(&SliderChanged) + 'static,
    ) -> ListenerId {
        self.emitter.on(event, callback)
    }

    /// Listen on a slider event for one emission.
    pub fn once(
        &mut self,
        event: &str,
        callback: impl FnMut(&SliderChanged) + 'static,
    ) -> ListenerId {
        self.emitter.once(event, callback)
    }

    /// Listen for value changes.
    pub fn on_change(&mut self, callback: impl FnMut(&SliderChanged) + 'static) -> ListenerId {
        self.emitter.on(CHANGE, callback)
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        self.emitter.off(event, id)
    }

    /// Remove every listener of `event`.
    pub fn off_event(&mut self, event: &str) {
        self.emitter.off_event(event);
    }

    /// Whether anything listens on `event`.
    #[must_use]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.emitter.has_listeners(event)
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Deliver an event dispatched at `target`.
    ///
    /// Root bindings run before body bindings, mirroring bubbling order.
    /// Bindings added by a handler apply to the rest of the same dispatch.
    pub fn handle_event(&mut self, scene: &mut Scene, target: NodeId, event: &mut DomEvent) {
        let ty = event.event().event_type();
        for handler in self.events.handlers(scene, target, ty) {
            self.call(handler, scene, event);
        }
        for handler in self.body_events.handlers(scene, target, ty) {
            self.call(handler, scene, event);
        }
    }

    fn call(&mut self, handler: Handler, scene: &mut Scene, event: &mut DomEvent) {
        match handler {
            Handler::TouchStart => self.touch_start(scene, event),
            Handler::TouchMove => self.touch_move(scene, event),
            Handler::TouchEnd => self.touch_end(scene, event),
        }
    }

    fn touch_start(&mut self, scene: &mut Scene, event: &mut DomEvent) {
        event.prevent_default();
        let Some(parts) = self.parts else {
            return;
        };

        let origin = DragOrigin {
            width: scene.client_width(parts.root),
            left: scene.offset_left(parts.root),
        };
        self.drag = DragState::Dragging(origin);
        tracing::debug!(width = origin.width, left = origin.left, "drag start");

        let value = self.value_at(origin, event.event().page_x());
        self.set_value(scene, value);
        self.bind_body();
    }

    fn touch_move(&mut self, scene: &mut Scene, event: &mut DomEvent) {
        event.prevent_default();
        let (DragState::Dragging(origin), Some(parts)) = (self.drag, self.parts) else {
            return;
        };

        scene.add_class(parts.root, ACTIVE_CLASS);
        let value = self.value_at(origin, event.event().page_x());
        tracing::trace!(page_x = event.event().page_x(), value, "drag move");
        self.set_value(scene, value);
    }

    fn touch_end(&mut self, scene: &mut Scene, event: &mut DomEvent) {
        event.prevent_default();
        if let Some(parts) = self.parts {
            scene.remove_class(parts.root, ACTIVE_CLASS);
        }
        self.body_events.unbind_all();
        self.drag = DragState::Idle;
        tracing::debug!(value = self.value, "drag end");
    }

    /// Value for a pointer at `page_x` relative to `origin`.
    fn value_at(&self, origin: DragOrigin, page_x: f64) -> f64 {
        let fraction = (page_x - origin.left) / origin.width;
        let range = self.max - self.min;
        match self.drag_mapping {
            DragMapping::Legacy => constrain(fraction, 0.0, 100.0) * range,
            DragMapping::Range => constrain(fraction, 0.0, 1.0).mul_add(range, self.min),
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render(&self, scene: &mut Scene) {
        let Some(parts) = self.parts else {
            return;
        };
        let percentage = self.percentage();

        scene.set_text(parts.value_label, Self::format(self.value));
        self.position_label(scene, parts, percentage);

        scene.translate(parts.gauge, Length::Percent(-(100.0 - percentage)), 0.0);

        scene.set_text(parts.min_label, Self::format(self.min));
        scene.set_text(parts.max_label, Self::format(self.max));

        tracing::trace!(value = self.value, percentage, "render");
    }

    fn position_label(&self, scene: &mut Scene, parts: SliderParts, percentage: f64) {
        let width = match self.drag {
            DragState::Dragging(origin) => origin.width,
            DragState::Idle => scene.client_width(parts.root),
        };
        let label_width = scene.client_width(parts.value_label);
        let offset = percentage / 100.0 * width;

        let x = if label_width + LABEL_PADDING < offset {
            scene.remove_class(parts.value_label, CLOSE_ZERO_CLASS);
            offset - label_width - LABEL_PADDING / 2.0
        } else {
            scene.add_class(parts.value_label, CLOSE_ZERO_CLASS);
            offset + LABEL_PADDING / 2.0
        };
        scene.translate(parts.value_label, x, 0.0);
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Unbind every listener, detach the root and free its nodes.
    ///
    /// Later calls are no-ops. Setters keep updating the numeric state but
    /// nothing is rendered or emitted afterwards.
    pub fn destroy(&mut self, scene: &mut Scene) {
        self.events.unbind_all();
        self.body_events.unbind_all();
        self.emitter.off_all();
        self.drag = DragState::Idle;
        if let Some(parts) = self.parts.take() {
            scene.remove_subtree(parts.root);
            tracing::debug!(root = parts.root.index(), "slider destroyed");
        }
    }
}
