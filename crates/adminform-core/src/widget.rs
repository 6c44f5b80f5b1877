//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle and react to discrete
//! [`Event`]s. Widgets whose state lives in a shared store (form inputs)
//! re-read it in [`Widget::rebuild`], which the owner of the tree calls after
//! every dispatched event. Query accessors (`display_value`, `text_content`,
//! `accessible_name`) must reflect the state as of the last rebuild.
//!
//! # Examples
//!
//! ```
//! use adminform_core::TypeId;
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::brick::Brick;
use crate::color::Color;
use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait.
pub trait Widget: Brick + Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size given constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Position self and children within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Emit draw commands.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle an input event, optionally emitting a message.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Child widgets for tree traversal.
    fn children(&self) -> &[Box<dyn Widget>];

    /// Mutable child widgets.
    fn children_mut(&mut self) -> &mut [Box<dyn Widget>];

    /// Re-read shared state. The default rebuilds children.
    fn rebuild(&mut self) {
        for child in self.children_mut() {
            child.rebuild();
        }
    }

    /// Whether the widget reacts to input.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Whether the widget can receive keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Whether the widget currently holds keyboard focus.
    fn has_focus(&self) -> bool {
        false
    }

    /// Whether the widget is disabled.
    fn is_disabled(&self) -> bool {
        false
    }

    /// Accessible name; for labelled controls this is the label text.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// HTML input type for form controls (`"date"`, `"text"`, ...).
    fn input_type(&self) -> Option<&str> {
        None
    }

    /// Value currently displayed by a form control.
    fn display_value(&self) -> Option<&str> {
        None
    }

    /// Text content of non-control nodes (labels, messages).
    fn text_content(&self) -> Option<&str> {
        None
    }

    /// Test ID (`data-testid`).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Bounds from the last layout.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Minimal paint backend.
pub trait Canvas {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw a run of text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

impl TextStyle {
    /// Same style with another color.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Same style with another size.
    #[must_use]
    pub const fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    Normal,
    /// Medium (500)
    Medium,
    /// Bold (700)
    Bold,
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Form landmark
    Form,
    /// Label text
    Label,
    /// Text-like input (text, date, number)
    TextInput,
    /// Live error message
    Alert,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id() {
        assert_eq!(TypeId::of::<u32>(), TypeId::of::<u32>());
        assert_ne!(TypeId::of::<u32>(), TypeId::of::<String>());
    }

    #[test]
    fn test_text_style_builders() {
        let style = TextStyle::default().with_color(Color::ERROR).with_size(12.0);
        assert_eq!(style.color, Color::ERROR);
        assert_eq!(style.size, 12.0);
        assert_eq!(style.weight, FontWeight::Normal);
    }

    #[test]
    fn test_accessible_role_default() {
        assert_eq!(AccessibleRole::default(), AccessibleRole::Generic);
    }
}
