//! Discrete input events dispatched to widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
///
/// Events are delivered synchronously, one at a time, by whoever owns the
/// widget tree (the application shell or the test harness).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Widget gained focus
    FocusIn,
    /// Widget lost focus
    FocusOut,
    /// The control committed a new value (native `change`).
    Change {
        /// Raw value as produced by the control
        value: String,
    },
    /// Key pressed while focused
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Pointer pressed
    MouseDown {
        /// Position of the press
        position: PointerPosition,
    },
}

impl Event {
    /// Convenience constructor for [`Event::Change`].
    pub fn change(value: impl Into<String>) -> Self {
        Self::Change {
            value: value.into(),
        }
    }
}

/// Integer pointer position, so `Event` stays `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    /// X in logical pixels
    pub x: i32,
    /// Y in logical pixels
    pub y: i32,
}

impl From<PointerPosition> for Point {
    fn from(p: PointerPosition) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

/// Keys relevant to form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Tab
    Tab,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_change_constructor() {
        assert_eq!(
            Event::change("2010-01-04"),
            Event::Change {
                value: "2010-01-04".to_string()
            }
        );
    }

    #[test]
    fn test_pointer_position_into_point() {
        let p: Point = PointerPosition { x: 3, y: 4 }.into();
        assert_eq!(p, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_event_serde_roundtrip_tagged() {
        let json = serde_json::to_string(&Event::FocusOut).expect("serialize");
        assert_eq!(json, "\"FocusOut\"");
    }
}
