//! Integration tests for sldr-widgets.
//!
//! These tests mount sliders in a scene and drive them through dispatched
//! pointer events, the way a host page would.

use sldr_core::{DomEvent, Event, Length, NodeId, Rect, Scene};
use sldr_widgets::{DragMapping, Slider, SliderError, SliderOptions, CHANGE};
use std::cell::RefCell;
use std::rc::Rc;

fn mount(scene: &mut Scene, slider: &Slider, bounds: Rect) -> NodeId {
    let root = slider.root().expect("live slider");
    let body = scene.body();
    scene.append_child(body, root);
    scene.set_layout(root, bounds);
    root
}

fn send(slider: &mut Slider, scene: &mut Scene, target: NodeId, event: Event) -> bool {
    let mut event = DomEvent::new(event);
    slider.handle_event(scene, target, &mut event);
    event.default_prevented()
}

// =============================================================================
// Slider Integration Tests
// =============================================================================

#[test]
fn test_slider_drag_end_to_end() {
    let mut scene = Scene::new();
    let mut slider = Slider::new(&mut scene).unwrap();
    let root = mount(&mut scene, &slider, Rect::new(20.0, 0.0, 200.0, 40.0));
    let body = scene.body();

    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    slider.on(CHANGE, move |msg| sink.borrow_mut().push(msg.value));

    assert!(send(&mut slider, &mut scene, root, Event::mouse_down(120.0, 10.0)));
    assert!(send(&mut slider, &mut scene, body, Event::mouse_move(170.0, 10.0)));
    assert!(send(&mut slider, &mut scene, body, Event::mouse_up(170.0, 10.0)));
    assert!(!send(&mut slider, &mut scene, body, Event::mouse_move(20.0, 10.0)));

    assert_eq!(*values.borrow(), vec![50.0, 75.0]);
    assert_eq!(slider.value(), 75.0);

    let parts = slider.parts().unwrap();
    assert_eq!(scene.text(parts.value_label), "75.00");
    assert_eq!(scene.transform(parts.gauge).unwrap().x, Length::Percent(-25.0));
}

#[test]
fn test_two_sliders_are_independent() {
    let mut scene = Scene::new();
    let mut left = Slider::new(&mut scene).unwrap();
    let mut right = Slider::new(&mut scene).unwrap();
    let left_root = mount(&mut scene, &left, Rect::new(0.0, 0.0, 100.0, 40.0));
    mount(&mut scene, &right, Rect::new(200.0, 0.0, 100.0, 40.0));
    let body = scene.body();

    send(&mut left, &mut scene, left_root, Event::mouse_down(50.0, 5.0));
    send(&mut right, &mut scene, left_root, Event::mouse_down(50.0, 5.0));
    assert!(left.is_dragging());
    assert!(!right.is_dragging());

    send(&mut left, &mut scene, body, Event::mouse_move(80.0, 5.0));
    send(&mut right, &mut scene, body, Event::mouse_move(80.0, 5.0));
    assert_eq!(left.value(), 80.0);
    assert_eq!(right.value(), 0.0);
}

#[test]
fn test_options_from_json() {
    let options: SliderOptions =
        serde_json::from_str(r#"{"value": 5, "min": 0, "max": 10, "drag_mapping": "range"}"#)
            .unwrap();
    let mut scene = Scene::new();
    let slider = Slider::with_options(&mut scene, &options).unwrap();
    assert_eq!(slider.value(), 5.0);
    assert_eq!(slider.drag_mapping(), DragMapping::Range);
    assert_eq!(slider.percentage(), 50.0);
}

#[test]
fn test_bad_template_leaves_scene_clean() {
    let mut scene = Scene::new();
    let options = SliderOptions::new().template(r#"<div class="sldr"></div>"#);
    let err = Slider::with_options(&mut scene, &options).unwrap_err();
    assert_eq!(err, SliderError::MissingElement { selector: ".wrap" });
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_destroy_then_remount_new_slider() {
    let mut scene = Scene::new();
    let mut first = Slider::new(&mut scene).unwrap();
    mount(&mut scene, &first, Rect::new(0.0, 0.0, 100.0, 40.0));
    first.destroy(&mut scene);
    assert!(scene.node(scene.body()).unwrap().children().is_empty());

    let mut second = Slider::new(&mut scene).unwrap();
    let root = mount(&mut scene, &second, Rect::new(0.0, 0.0, 100.0, 40.0));
    send(&mut second, &mut scene, root, Event::mouse_down(30.0, 5.0));
    assert_eq!(second.value(), 30.0);
}
