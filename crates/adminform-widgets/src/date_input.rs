//! `DateInput` widget: a labelled `<input type="date">` bound to a form field.
//!
//! The displayed value is derived from the form value on every rebuild and is
//! never written back, so mounting an input over an existing record leaves
//! the form pristine. User edits are written verbatim.
//!
//! Error display: an error is shown only when a validator is attached, it
//! currently reports an error, and the field is touched (focused then
//! blurred) or the form validates on blur and the field has been blurred.

use crate::form::FormContext;
use crate::text::Text;
use adminform_core::{
    escape_html, field_label, format_input_date,
    widget::{AccessibleRole, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, Event, FieldState,
    FormResult, Point, Rect, SharedValidator, Size, TranslateArgs, TypeId, Validator, Widget,
};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

const LABEL_SIZE: f32 = 12.0;
const MESSAGE_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 1.2;
const ROW_GAP: f32 = 4.0;

/// Message emitted when the user commits a new date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateChanged {
    /// Field path
    pub source: String,
    /// Raw value from the control (`YYYY-MM-DD` or empty)
    pub value: String,
}

/// Whether a field's error should be displayed.
#[must_use]
pub fn should_show_error(field: &FieldState, validate_on_blur: bool) -> bool {
    field.has_validator
        && field.error.as_ref().is_some_and(|e| !e.key.is_empty())
        && (field.touched || (validate_on_blur && field.blurred))
}

/// Date input bound to `source` within `resource`.
pub struct DateInput {
    /// Form this input writes to
    context: FormContext,
    /// Resource name, for the label key
    resource: String,
    /// Field path
    source: String,
    /// Label key overriding the resource field key
    label: Option<String>,
    /// Helper text key
    helper_text: Option<String>,
    /// Whether the input is disabled
    disabled: bool,
    /// Test ID
    test_id_value: Option<String>,
    /// Background color
    background_color: Color,
    /// Border color
    border_color: Color,
    /// Focused border color
    focus_border_color: Color,
    /// Padding inside the input box
    padding: f32,
    /// Minimum width
    min_width: f32,
    /// Resolved label, including the required marker
    label_text: String,
    /// Value shown in the control
    display: String,
    /// Translated error, when shown
    error_text: Option<String>,
    /// Whether the attached validator makes the field mandatory
    required: bool,
    /// Whether focused
    focused: bool,
    /// Label, then error or helper text
    children: Vec<Box<dyn Widget>>,
    /// Cached bounds
    bounds: Rect,
    /// Cached bounds of the input box
    input_bounds: Rect,
}

impl DateInput {
    /// Create an input for `source` and register it with the form.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not a valid field path.
    pub fn new(
        context: &FormContext,
        resource: impl Into<String>,
        source: impl Into<String>,
    ) -> FormResult<Self> {
        let resource = resource.into();
        let source = source.into();
        context.form().register_field(&source, None)?;
        log::debug!("date input mounted for {resource}.{source}");

        let mut input = Self {
            context: context.clone(),
            resource,
            source,
            label: None,
            helper_text: None,
            disabled: false,
            test_id_value: None,
            background_color: Color::WHITE,
            border_color: Color::BORDER,
            focus_border_color: Color::FOCUS,
            padding: 8.0,
            min_width: 160.0,
            label_text: String::new(),
            display: String::new(),
            error_text: None,
            required: false,
            focused: false,
            children: Vec::new(),
            bounds: Rect::default(),
            input_bounds: Rect::default(),
        };
        input.refresh();
        Ok(input)
    }

    /// Attach a validator. Use [`adminform_core::compose`] for several.
    #[must_use]
    pub fn validate<V: Validator + 'static>(self, validator: V) -> Self {
        self.validate_shared(Arc::new(validator))
    }

    /// Attach a shared validator.
    #[must_use]
    pub fn validate_shared(mut self, validator: SharedValidator) -> Self {
        if let Err(e) = self
            .context
            .form()
            .set_field_validator(&self.source, validator)
        {
            log::warn!("cannot attach validator to {}: {e}", self.source);
        }
        self.refresh();
        self
    }

    /// Override the label key.
    #[must_use]
    pub fn label(mut self, key: impl Into<String>) -> Self {
        self.label = Some(key.into());
        self.refresh();
        self
    }

    /// Helper text key, shown below the input when no error is shown.
    #[must_use]
    pub fn helper_text(mut self, key: impl Into<String>) -> Self {
        self.helper_text = Some(key.into());
        self.refresh();
        self
    }

    /// Set disabled state.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        if disabled {
            self.focused = false;
        }
        self
    }

    /// Value used when the record has none. Does not make the form dirty.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        if let Err(e) = self
            .context
            .form()
            .set_field_default(&self.source, value.into())
        {
            log::warn!("cannot seed default for {}: {e}", self.source);
        }
        self.refresh();
        self
    }

    /// Set background color.
    #[must_use]
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set border color.
    #[must_use]
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Set minimum width.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(0.0);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Field path.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resource name.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Resolved label, including the `" *"` marker.
    #[must_use]
    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    /// Value shown in the control.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Translated error, when shown.
    #[must_use]
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// Check if focused.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current field state.
    #[must_use]
    pub fn field(&self) -> Option<FieldState> {
        self.context.form().field(&self.source)
    }

    fn helper_id(&self) -> String {
        format!("{}-helper-text", self.source)
    }

    /// Re-derive label, display value, error and child nodes from the form.
    fn refresh(&mut self) {
        let Some(field) = self.context.form().field(&self.source) else {
            log::warn!("date input {} is not registered", self.source);
            return;
        };
        let translator = self.context.translator();

        let mut label = field_label(
            translator,
            &self.resource,
            &self.source,
            self.label.as_deref(),
        );
        if field.has_validator {
            label.push_str(" *");
        }
        self.label_text = label;
        self.required = field.required;
        self.display = format_input_date(&field.value);
        self.error_text = if should_show_error(&field, self.context.config().validate_on_blur) {
            field
                .error
                .as_ref()
                .map(|e| translator.translate_error(e))
                .filter(|text| !text.is_empty())
        } else {
            None
        };

        let mut children: Vec<Box<dyn Widget>> = vec![Box::new(
            Text::new(self.label_text.clone())
                .font_size(LABEL_SIZE)
                .color(if self.error_text.is_some() {
                    Color::ERROR
                } else {
                    Color::MUTED
                })
                .role(AccessibleRole::Label)
                .element("label", "ra-input-label"),
        )];
        if let Some(error) = &self.error_text {
            children.push(Box::new(
                Text::new(error.clone())
                    .font_size(MESSAGE_SIZE)
                    .color(Color::ERROR)
                    .role(AccessibleRole::Alert)
                    .element("p", "ra-input-error")
                    .element_id(self.helper_id()),
            ));
        } else if let Some(helper) = &self.helper_text {
            let text = self.context.translator().translate(helper, &TranslateArgs::new());
            children.push(Box::new(
                Text::new(text)
                    .font_size(MESSAGE_SIZE)
                    .color(Color::MUTED)
                    .element("p", "ra-input-helper-text")
                    .element_id(self.helper_id()),
            ));
        }
        self.children = children;

        if self.bounds != Rect::default() {
            self.layout_rows(self.bounds);
        }
        log::trace!("date input {} rebuilt: {:?}", self.source, self.display);
    }

    fn input_height(&self) -> f32 {
        2.0f32.mul_add(self.padding, TextStyle::default().size)
    }

    fn layout_rows(&mut self, bounds: Rect) {
        let (label_row, rest) = bounds.split_top(LABEL_SIZE * LINE_HEIGHT);
        let (_, rest) = rest.split_top(ROW_GAP);
        let (input_row, rest) = rest.split_top(self.input_height());
        let (_, message_row) = rest.split_top(ROW_GAP);
        self.input_bounds = input_row;

        if let Some(label) = self.children.first_mut() {
            label.layout(label_row);
        }
        if let Some(message) = self.children.get_mut(1) {
            message.layout(Rect::new(
                message_row.x,
                message_row.y,
                message_row.width,
                MESSAGE_SIZE * LINE_HEIGHT,
            ));
        }
    }

    fn focus_in(&mut self) {
        if self.focused {
            return;
        }
        self.focused = true;
        if let Err(e) = self.context.form().focus(&self.source) {
            log::warn!("focus on {} failed: {e}", self.source);
        }
    }

    fn focus_out(&mut self) {
        self.focused = false;
        if let Err(e) = self.context.form().blur(&self.source) {
            log::warn!("blur on {} failed: {e}", self.source);
        }
    }

    fn commit(&mut self, value: &str) -> Option<Box<dyn Any + Send>> {
        if let Err(e) = self
            .context
            .form()
            .change(&self.source, Value::String(value.to_string()))
        {
            log::warn!("change on {} failed: {e}", self.source);
            return None;
        }
        Some(Box::new(DateChanged {
            source: self.source.clone(),
            value: value.to_string(),
        }))
    }
}

impl Widget for DateInput {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let mut height = LABEL_SIZE.mul_add(LINE_HEIGHT, ROW_GAP) + self.input_height();
        if self.children.len() > 1 {
            height += MESSAGE_SIZE.mul_add(LINE_HEIGHT, ROW_GAP);
        }
        let width = self.min_width.max(constraints.min_width);
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.layout_rows(bounds);
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(label) = self.children.first() {
            label.paint(canvas);
        }

        canvas.fill_rect(self.input_bounds, self.background_color);
        let border_color = if self.error_text.is_some() {
            Color::ERROR
        } else if self.focused {
            self.focus_border_color
        } else {
            self.border_color
        };
        canvas.stroke_rect(self.input_bounds, border_color, 1.0);

        if !self.display.is_empty() {
            let position = Point::new(
                self.input_bounds.x + self.padding,
                self.input_bounds.y + self.padding,
            );
            let style = if self.disabled {
                TextStyle::default().with_color(Color::MUTED)
            } else {
                TextStyle::default()
            };
            canvas.draw_text(&self.display, position, &style);
        }

        if let Some(message) = self.children.get(1) {
            message.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }

        let message = match event {
            Event::FocusIn => {
                self.focus_in();
                None
            }
            Event::FocusOut => {
                if self.focused {
                    self.focus_out();
                } else if let Err(e) = self.context.form().blur(&self.source) {
                    log::warn!("blur on {} failed: {e}", self.source);
                }
                None
            }
            Event::MouseDown { position } => {
                let point: Point = (*position).into();
                if self.bounds.contains_point(&point) {
                    self.focus_in();
                } else if self.focused {
                    self.focus_out();
                }
                None
            }
            Event::Change { value } => self.commit(value),
            Event::KeyDown { .. } => None,
        };

        self.refresh();
        message
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn rebuild(&mut self) {
        self.refresh();
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.label_text)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TextInput
    }

    fn input_type(&self) -> Option<&str> {
        Some("date")
    }

    fn display_value(&self) -> Option<&str> {
        Some(&self.display)
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for DateInput {
    fn brick_name(&self) -> &'static str {
        "DateInput"
    }

    fn assertions(&self) -> Vec<BrickAssertion> {
        let mut assertions = vec![
            BrickAssertion::LabelAssociated,
            BrickAssertion::element_present("input[type=date]"),
        ];
        if !self.disabled {
            assertions.push(BrickAssertion::Focusable);
        }
        assertions.push(self.budget().assertion());
        assertions
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::LabelAssociated,
            !self.label_text.trim().is_empty(),
            "label is empty",
        );
        verification.check(
            BrickAssertion::element_present("input[type=date]"),
            self.to_html().contains(r#"type="date""#),
            "no date input rendered",
        );
        if !self.disabled {
            verification.check(
                BrickAssertion::Focusable,
                self.is_focusable(),
                "enabled input is not focusable",
            );
        }
        verification.check(self.budget().assertion(), true, "");
        verification
    }

    fn to_html(&self) -> String {
        let id = escape_html(&self.source);
        let helper_id = escape_html(&self.helper_id());

        let mut attrs = format!(
            r#"type="date" id="{id}" name="{id}" value="{}""#,
            escape_html(&self.display)
        );
        if self.error_text.is_some() {
            attrs.push_str(&format!(r#" aria-invalid="true" aria-describedby="{helper_id}""#));
        } else if self.children.len() > 1 {
            attrs.push_str(&format!(r#" aria-describedby="{helper_id}""#));
        }
        if self.required {
            attrs.push_str(r#" aria-required="true""#);
        }
        if self.disabled {
            attrs.push_str(" disabled");
        }

        let test_id = self
            .test_id_value
            .as_deref()
            .map(|t| format!(r#" data-testid="{}""#, escape_html(t)))
            .unwrap_or_default();
        let message = self
            .children
            .get(1)
            .map(|m| m.to_html())
            .unwrap_or_default();

        format!(
            r#"<div class="ra-input ra-input-{id}"{test_id}><label for="{id}">{label}</label><input {attrs}/>{message}</div>"#,
            label = escape_html(&self.label_text)
        )
    }

    fn to_css(&self) -> String {
        format!(
            r".ra-input input[type=date] {{
    background: {};
    border: 1px solid {};
    padding: {}px;
    min-width: {}px;
}}
.ra-input input[type=date]:focus {{ border-color: {}; }}
.ra-input input[aria-invalid=true] {{ border-color: {}; }}
.ra-input-error {{ color: {}; font-size: {}px; }}",
            self.background_color.to_hex(),
            self.border_color.to_hex(),
            self.padding,
            self.min_width,
            self.focus_border_color.to_hex(),
            Color::ERROR.to_hex(),
            Color::ERROR.to_hex(),
            MESSAGE_SIZE,
        )
    }
}

impl Drop for DateInput {
    fn drop(&mut self) {
        if let Err(e) = self.context.form().unregister_field(&self.source) {
            log::debug!("unmounting {}: {e}", self.source);
        }
    }
}
