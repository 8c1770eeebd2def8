//! Slider widget for sldr.
//!
//! ```
//! use sldr_core::{DomEvent, Event, Rect, Scene};
//! use sldr_widgets::Slider;
//!
//! let mut scene = Scene::new();
//! let mut slider = Slider::create(&mut scene, Some(10.0), None, None).unwrap();
//! let root = slider.root().unwrap();
//! scene.append_child(scene.body(), root);
//! scene.set_layout(root, Rect::new(0.0, 0.0, 200.0, 40.0));
//!
//! let mut press = DomEvent::new(Event::mouse_down(150.0, 20.0));
//! slider.handle_event(&mut scene, root, &mut press);
//! assert_eq!(slider.value(), 75.0);
//! ```

pub mod error;
pub mod options;
pub mod slider;

pub use error::SliderError;
pub use options::{DragMapping, SliderOptions};
pub use slider::{
    DragOrigin, DragState, Slider, SliderChanged, SliderParts, ACTIVE_CLASS, CHANGE,
    CLOSE_ZERO_CLASS, TEMPLATE,
};
