//! Text node widget: labels, error messages and helper lines.

use adminform_core::{
    escape_html,
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, Event, Rect, Size,
    TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// A run of styled text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    /// Text content
    content: String,
    /// Text color
    color: Color,
    /// Font size in pixels
    font_size: f32,
    /// Font weight
    font_weight: FontWeight,
    /// Line height multiplier
    line_height: f32,
    /// Role exposed to assistive technology
    role: AccessibleRole,
    /// HTML tag used by `to_html`
    tag: String,
    /// CSS class used by `to_html`
    class: Option<String>,
    /// HTML id
    element_id: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl Text {
    /// Create new text widget.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: Color::BLACK,
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            line_height: 1.2,
            role: AccessibleRole::Generic,
            tag: "span".to_string(),
            class: None,
            element_id: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Set text color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set font weight.
    #[must_use]
    pub const fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Set accessible role.
    #[must_use]
    pub const fn role(mut self, role: AccessibleRole) -> Self {
        self.role = role;
        self
    }

    /// Set the HTML tag and class.
    #[must_use]
    pub fn element(mut self, tag: impl Into<String>, class: impl Into<String>) -> Self {
        self.tag = tag.into();
        self.class = Some(class.into());
        self
    }

    /// Set the HTML id.
    #[must_use]
    pub fn element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the text color.
    #[must_use]
    pub const fn get_color(&self) -> Color {
        self.color
    }

    /// Estimate text size (~0.6 em per character, single line).
    fn estimate_size(&self, max_width: f32) -> Size {
        let line_height = self.font_size * self.line_height;
        if self.content.is_empty() {
            return Size::new(0.0, line_height);
        }
        let width = self.content.chars().count() as f32 * self.font_size * 0.6;
        Size::new(width.min(max_width), line_height)
    }
}

impl Widget for Text {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.estimate_size(constraints.max_width))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let style = TextStyle {
            size: self.font_size,
            color: self.color,
            weight: self.font_weight,
        };
        canvas.draw_text(&self.content, self.bounds.origin(), &style);
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn accessible_role(&self) -> AccessibleRole {
        self.role
    }

    fn text_content(&self) -> Option<&str> {
        Some(&self.content)
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Text {
    fn brick_name(&self) -> &'static str {
        "Text"
    }

    fn assertions(&self) -> Vec<BrickAssertion> {
        vec![BrickAssertion::TextVisible, self.budget().assertion()]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::TextVisible,
            !self.content.is_empty(),
            "Text content is empty",
        );
        verification.check(self.budget().assertion(), true, "");
        verification
    }

    fn to_html(&self) -> String {
        let mut attrs = String::new();
        if let Some(class) = &self.class {
            attrs.push_str(&format!(r#" class="{}""#, escape_html(class)));
        }
        if let Some(id) = &self.element_id {
            attrs.push_str(&format!(r#" id="{}""#, escape_html(id)));
        }
        if self.role == AccessibleRole::Alert {
            attrs.push_str(r#" role="alert""#);
        }
        if let Some(test_id) = &self.test_id_value {
            attrs.push_str(&format!(r#" data-testid="{}""#, escape_html(test_id)));
        }
        format!(
            "<{tag}{attrs}>{content}</{tag}>",
            tag = self.tag,
            content = escape_html(&self.content)
        )
    }

    fn to_css(&self) -> String {
        format!(
            ".{} {{ color: {}; font-size: {}px; }}",
            self.class.as_deref().unwrap_or("adminform-text"),
            self.color.to_hex(),
            self.font_size
        )
    }
}
