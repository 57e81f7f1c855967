// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Drag gestures through [`ResizeDriver`]
//!
//! Uses chord Shift+Right, values 0..=1000 and a 100 px drag span unless a
//! test says otherwise.

use crate::config::ResizeSettings;
use crate::core::{ChordSet, DragRange, Key, MouseButton};
use crate::driver::{DriverEvent, InputEvent, ResizeDriver, ValueHost};

const EPSILON: f64 = 1e-9;

/// In-memory host recording every value it receives
struct MockHost {
    value: f64,
    adjustable: bool,
    received: Vec<f64>,
}

impl MockHost {
    fn new(value: f64) -> Self {
        Self {
            value,
            adjustable: true,
            received: Vec::new(),
        }
    }
}

impl ValueHost for MockHost {
    fn current_value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        self.value = value;
        self.received.push(value);
    }

    fn can_adjust(&self) -> bool {
        self.adjustable
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn chord(text: &str) -> ChordSet {
    ChordSet::parse(text).unwrap()
}

fn default_driver() -> ResizeDriver {
    ResizeDriver::new(&ResizeSettings::default()).unwrap()
}

/// Arms at x=500 with the host at 50 (anchor 495)
fn armed_driver(host: &mut MockHost) -> ResizeDriver {
    let mut driver = default_driver();
    driver.handle(InputEvent::PointerMove(500.0), host);
    assert_eq!(driver.press(Key::Shift, host), None);
    let event = driver.press(MouseButton::Right, host);
    assert!(matches!(event, Some(DriverEvent::Armed { .. })));
    driver
}

fn value_of(event: Option<DriverEvent>) -> f64 {
    match event {
        Some(DriverEvent::ValueChanged(value)) => value,
        other => panic!("expected a value change, got {:?}", other),
    }
}

// ============================================================================
// Arming
// ============================================================================

#[test]
fn test_arm_preserves_value_at_press_point() {
    let mut host = MockHost::new(50.0);
    let mut driver = default_driver();

    driver.handle(InputEvent::PointerMove(500.0), &mut host);
    driver.press(Key::Shift, &mut host);
    let event = driver.press(MouseButton::Right, &mut host);

    let Some(DriverEvent::Armed { anchor_x, value }) = event else {
        panic!("expected Armed, got {:?}", event);
    };
    assert_close(anchor_x, 495.0);
    assert_close(value, 50.0);
    assert!(driver.is_armed());
    // Arming alone does not touch the host
    assert!(host.received.is_empty());
}

#[test]
fn test_press_order_does_not_matter() {
    let mut host = MockHost::new(50.0);
    let mut driver = default_driver();

    driver.handle(InputEvent::PointerMove(500.0), &mut host);
    assert_eq!(driver.press(MouseButton::Right, &mut host), None);
    let event = driver.press(Key::Shift, &mut host);

    assert!(matches!(event, Some(DriverEvent::Armed { .. })));
}

#[test]
fn test_repeated_press_arms_once() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    // Auto-repeat while the chord is held
    assert_eq!(driver.press(Key::Shift, &mut host), None);
    assert_eq!(driver.press(MouseButton::Right, &mut host), None);
    assert_eq!(driver.session().anchor_x().map(|x| x.round()), Some(495.0));
}

#[test]
fn test_unrelated_inputs_are_ignored() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    assert_eq!(driver.press(Key::Ctrl, &mut host), None);
    assert_eq!(driver.release(MouseButton::Left, &mut host), None);
    assert!(driver.is_armed());
}

#[test]
fn test_host_that_cannot_adjust_never_arms() {
    let mut host = MockHost::new(50.0);
    host.adjustable = false;
    let mut driver = default_driver();

    driver.press(Key::Shift, &mut host);
    assert_eq!(driver.press(MouseButton::Right, &mut host), None);

    assert!(driver.tracker().is_complete());
    assert!(!driver.is_armed());
    assert_eq!(driver.handle(InputEvent::PointerMove(600.0), &mut host), None);
}

#[test]
fn test_invalid_range_stays_idle() {
    let mut host = MockHost::new(50.0);
    let range = DragRange {
        value_min: 10.0,
        value_max: 10.0,
        drag_span: 100.0,
    };
    let mut driver = ResizeDriver::with_parts(chord("Shift+Right"), range);

    driver.press(Key::Shift, &mut host);
    assert_eq!(driver.press(MouseButton::Right, &mut host), None);

    assert!(!driver.is_armed());
    assert_eq!(driver.handle(InputEvent::PointerMove(600.0), &mut host), None);
    assert!(host.received.is_empty());
}

#[test]
fn test_value_outside_range_is_clamped_at_arm() {
    let mut host = MockHost::new(5000.0);
    let mut driver = default_driver();

    driver.handle(InputEvent::PointerMove(500.0), &mut host);
    driver.press(Key::Shift, &mut host);
    let event = driver.press(MouseButton::Right, &mut host);

    let Some(DriverEvent::Armed { anchor_x, value }) = event else {
        panic!("expected Armed, got {:?}", event);
    };
    assert_close(value, 1000.0);
    assert_close(anchor_x, 400.0);
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn test_full_span_right_reaches_maximum() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    let value = value_of(driver.handle(InputEvent::PointerMove(600.0), &mut host));

    assert_close(value, 1000.0);
    assert_close(host.value, 1000.0);
}

#[test]
fn test_back_at_press_point_restores_value() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    driver.handle(InputEvent::PointerMove(550.0), &mut host);
    let value = value_of(driver.handle(InputEvent::PointerMove(500.0), &mut host));

    assert_close(value, 50.0);
}

#[test]
fn test_anchor_maps_to_minimum() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    assert_close(value_of(driver.handle(InputEvent::PointerMove(495.0), &mut host)), 0.0);
    // Further left stays clamped
    assert_close(value_of(driver.handle(InputEvent::PointerMove(100.0), &mut host)), 0.0);
}

#[test]
fn test_values_are_linear_between_bounds() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    for (x, expected) in [(520.0, 250.0), (545.0, 500.0), (570.0, 750.0)] {
        assert_close(value_of(driver.handle(InputEvent::PointerMove(x), &mut host)), expected);
    }
    assert_eq!(host.received.len(), 3);
}

#[test]
fn test_overlay_radius_follows_value() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    assert_close(driver.overlay_radius().unwrap(), 25.0);

    let event = driver.handle(InputEvent::PointerMove(545.0), &mut host);
    assert_close(event.and_then(|e| e.overlay_radius()).unwrap(), 250.0);
    assert_close(driver.overlay_radius().unwrap(), 250.0);
    assert_eq!(DriverEvent::Disarmed.overlay_radius(), None);
}

#[test]
fn test_emitted_values_are_not_rounded() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    let value = value_of(driver.handle(InputEvent::PointerMove(500.25), &mut host));
    assert_close(value, 52.5);
    assert_close(host.value, 52.5);
}

#[test]
fn test_non_finite_pointer_is_ignored() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    assert_eq!(driver.handle(InputEvent::PointerMove(f64::NAN), &mut host), None);
    assert!(host.received.is_empty());
    assert_close(host.value, 50.0);

    // The last finite position is kept as the next press point
    driver.release(Key::Shift, &mut host);
    let event = driver.press(Key::Shift, &mut host);
    let Some(DriverEvent::Armed { anchor_x, .. }) = event else {
        panic!("expected Armed, got {:?}", event);
    };
    assert_close(anchor_x, 495.0);
}

#[test]
fn test_non_finite_host_value_does_not_arm() {
    let mut host = MockHost::new(f64::NAN);
    let mut driver = default_driver();

    driver.handle(InputEvent::PointerMove(500.0), &mut host);
    driver.press(Key::Shift, &mut host);
    assert_eq!(driver.press(MouseButton::Right, &mut host), None);

    assert!(!driver.is_armed());
    assert_eq!(driver.handle(InputEvent::PointerMove(600.0), &mut host), None);
    assert!(host.received.is_empty());
}

// ============================================================================
// Disarming
// ============================================================================

#[test]
fn test_release_disarms() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    assert_eq!(driver.release(Key::Shift, &mut host), Some(DriverEvent::Disarmed));
    assert!(!driver.is_armed());

    assert_eq!(driver.handle(InputEvent::PointerMove(700.0), &mut host), None);
    assert!(host.received.is_empty());
    assert_eq!(driver.overlay_radius(), None);
}

#[test]
fn test_second_release_is_silent() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    driver.release(Key::Shift, &mut host);
    assert_eq!(driver.release(MouseButton::Right, &mut host), None);
    assert_eq!(driver.release(Key::Shift, &mut host), None);
}

#[test]
fn test_rearm_uses_new_value_and_position() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    driver.handle(InputEvent::PointerMove(545.0), &mut host);
    driver.release(MouseButton::Right, &mut host);

    driver.handle(InputEvent::PointerMove(200.0), &mut host);
    let event = driver.press(MouseButton::Right, &mut host);

    let Some(DriverEvent::Armed { anchor_x, value }) = event else {
        panic!("expected Armed, got {:?}", event);
    };
    assert_close(value, 500.0);
    assert_close(anchor_x, 150.0);
}

#[test]
fn test_set_chord_mid_gesture_disarms() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    assert_eq!(driver.set_chord(chord("Ctrl+Left")), Some(DriverEvent::Disarmed));
    assert!(!driver.is_armed());
    assert_eq!(driver.session().anchor_x(), None);
    assert_eq!(driver.tracker().pressed_count(), 0);

    assert_eq!(driver.handle(InputEvent::PointerMove(600.0), &mut host), None);
}

#[test]
fn test_set_chord_while_idle_reports_nothing() {
    let mut driver = default_driver();
    assert_eq!(driver.set_chord(chord("Ctrl+Left")), None);
    assert_eq!(driver.chord(), &chord("Left+Ctrl"));
}

// ============================================================================
// apply_settings
// ============================================================================

#[test]
fn test_apply_range_only_keeps_live_session() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    let settings = ResizeSettings {
        max_brush_size: 2000,
        ..ResizeSettings::default()
    };
    assert_eq!(driver.apply_settings(&settings).unwrap(), None);
    assert!(driver.is_armed());
    assert_close(driver.range().value_max, 2000.0);

    // The live session keeps the range it captured
    assert_close(value_of(driver.handle(InputEvent::PointerMove(600.0), &mut host)), 1000.0);

    // The next gesture uses the new one
    driver.release(Key::Shift, &mut host);
    driver.press(Key::Shift, &mut host);
    assert_close(value_of(driver.handle(InputEvent::PointerMove(700.0), &mut host)), 2000.0);
}

#[test]
fn test_apply_changed_chord_disarms() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    let settings = ResizeSettings {
        shortcut: "Alt+Middle".to_string(),
        ..ResizeSettings::default()
    };
    assert_eq!(driver.apply_settings(&settings).unwrap(), Some(DriverEvent::Disarmed));
    assert_eq!(driver.chord(), &chord("Middle+Alt"));
}

#[test]
fn test_apply_invalid_settings_changes_nothing() {
    let mut host = MockHost::new(50.0);
    let mut driver = armed_driver(&mut host);

    let settings = ResizeSettings {
        shortcut: "Alt+Middle".to_string(),
        max_size: 0,
        ..ResizeSettings::default()
    };
    assert!(driver.apply_settings(&settings).is_err());

    assert!(driver.is_armed());
    assert_eq!(driver.chord(), &chord("Shift+Right"));
    assert_close(driver.range().drag_span, 100.0);
}

#[test]
fn test_new_rejects_bad_shortcut() {
    let settings = ResizeSettings {
        shortcut: "Nonsense+Key".to_string(),
        ..ResizeSettings::default()
    };
    assert!(ResizeDriver::new(&settings).is_err());
}
