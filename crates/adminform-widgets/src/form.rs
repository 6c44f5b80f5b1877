//! Form container and the context its inputs share.

use adminform_core::{
    escape_html,
    widget::{AccessibleRole, LayoutResult},
    Brick, BrickAssertion, BrickVerification, Canvas, Constraints, Event, FormConfig, FormHandle,
    FormResult, IdentityTranslator, Key, Point, Rect, Size, Translator, TypeId, Widget,
};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// What every input of a form needs: the form state and a translator.
#[derive(Clone)]
pub struct FormContext {
    form: FormHandle,
    translator: Arc<dyn Translator>,
}

impl FormContext {
    /// Context over an existing form, translating with [`IdentityTranslator`].
    #[must_use]
    pub fn new(form: FormHandle) -> Self {
        Self {
            form,
            translator: Arc::new(IdentityTranslator),
        }
    }

    /// Context over a fresh form initialized from `record`.
    ///
    /// # Errors
    ///
    /// Fails if `record` is neither an object nor `null`.
    pub fn from_record(record: &Value, config: FormConfig) -> FormResult<Self> {
        Ok(Self::new(FormHandle::with_record(record, config)?))
    }

    /// Replace the translator.
    #[must_use]
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    /// Replace the translator with a shared one.
    #[must_use]
    pub fn with_shared_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Form state handle.
    #[must_use]
    pub const fn form(&self) -> &FormHandle {
        &self.form
    }

    /// Translator.
    #[must_use]
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    /// Form configuration.
    #[must_use]
    pub fn config(&self) -> FormConfig {
        self.form.config()
    }
}

impl fmt::Debug for FormContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormContext")
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

/// Message emitted by [`Form`] on every submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmitted {
    /// Values at submit time
    pub values: Value,
    /// Whether validation passed and the submit callback ran
    pub accepted: bool,
}

type SubmitFn = Box<dyn Fn(&Value) + Send + Sync>;

/// Vertical container owning a form's inputs.
pub struct Form {
    context: FormContext,
    children: Vec<Box<dyn Widget>>,
    gap: f32,
    on_submit: Option<SubmitFn>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl Form {
    /// Empty form over `context`.
    #[must_use]
    pub fn new(context: FormContext) -> Self {
        Self {
            context,
            children: Vec::new(),
            gap: 16.0,
            on_submit: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Add an input.
    #[must_use]
    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(Box::new(widget));
        self
    }

    /// Vertical gap between inputs.
    #[must_use]
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    /// Callback run with the values of an accepted submit.
    #[must_use]
    pub fn on_submit<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.on_submit = Some(Box::new(callback));
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Shared context.
    #[must_use]
    pub const fn context(&self) -> &FormContext {
        &self.context
    }

    /// Index of the input holding focus.
    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.children.iter().position(|child| child.has_focus())
    }

    /// Send `FocusOut` to every focused input other than `keep`.
    fn blur_all_except(&mut self, keep: Option<usize>) {
        for (i, child) in self.children.iter_mut().enumerate() {
            if Some(i) != keep && child.has_focus() {
                log::debug!("form moves focus away from input {i}");
                child.event(&Event::FocusOut);
            }
        }
    }

    /// Move focus to the next focusable input. Past the last one focus
    /// leaves the form.
    fn focus_next(&mut self) {
        let start = self.focused_index().map_or(0, |i| i + 1);
        let next = (start..self.children.len()).find(|&i| self.children[i].is_focusable());
        self.blur_all_except(next);
        if let Some(i) = next {
            self.children[i].event(&Event::FocusIn);
        }
    }

    /// Validate and submit. Every field becomes touched, so errors show.
    pub fn submit(&mut self) -> FormSubmitted {
        let callback = self.on_submit.as_ref();
        let accepted = self.context.form().submit(|values| {
            if let Some(callback) = callback {
                callback(values);
            }
        });
        self.rebuild();
        FormSubmitted {
            values: self.context.form().get_state().values,
            accepted,
        }
    }
}

impl Widget for Form {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for (i, child) in self.children.iter().enumerate() {
            let size = child.measure(Constraints::new(
                0.0,
                constraints.max_width,
                0.0,
                (constraints.max_height - height).max(0.0),
            ));
            width = width.max(size.width);
            height += size.height;
            if i + 1 < self.children.len() {
                height += self.gap;
            }
        }
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let mut y = bounds.y;
        for child in &mut self.children {
            let size = child.measure(Constraints::loose(bounds.size()));
            child.layout(Rect::new(bounds.x, y, bounds.width, size.height));
            y += size.height + self.gap;
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for child in &self.children {
            child.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let message: Option<Box<dyn Any + Send>> = match event {
            Event::KeyDown { key: Key::Enter } => Some(Box::new(self.submit())),
            Event::KeyDown { key: Key::Tab } => {
                self.focus_next();
                None
            }
            Event::MouseDown { position } => {
                let point: Point = (*position).into();
                let hit = self
                    .children
                    .iter()
                    .position(|child| child.bounds().contains_point(&point));
                self.blur_all_except(hit);
                hit.and_then(|i| self.children[i].event(event))
            }
            _ => None,
        };
        self.rebuild();
        message
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Form
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Form {
    fn brick_name(&self) -> &'static str {
        "Form"
    }

    fn assertions(&self) -> Vec<BrickAssertion> {
        vec![BrickAssertion::element_present("form")]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        let children_ok = self.children.iter().all(|c| c.verify().is_valid());
        verification.check(
            BrickAssertion::element_present("form"),
            children_ok,
            "an input failed verification",
        );
        verification
    }

    fn to_html(&self) -> String {
        let test_id = self
            .test_id_value
            .as_deref()
            .map(|id| format!(r#" data-testid="{}""#, escape_html(id)))
            .unwrap_or_default();
        let inner: String = self.children.iter().map(|c| c.to_html()).collect();
        format!(r#"<form class="simple-form"{test_id} novalidate>{inner}</form>"#)
    }

    fn to_css(&self) -> String {
        let mut css = format!(
            ".simple-form {{ display: flex; flex-direction: column; gap: {}px; }}",
            self.gap
        );
        for child in &self.children {
            let child_css = child.to_css();
            if !child_css.is_empty() && !css.contains(&child_css) {
                css.push('\n');
                css.push_str(&child_css);
            }
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DateInput;
    use adminform_core::{required, PointerPosition};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn context(record: Value) -> FormContext {
        FormContext::from_record(&record, FormConfig::new()).expect("object record")
    }

    #[test]
    fn test_context_defaults_to_identity() {
        let ctx = context(json!({}));
        assert_eq!(ctx.translator().translate("a.b", &Default::default()), "a.b");
        assert_eq!(ctx.config(), FormConfig::new());
    }

    #[test]
    fn test_context_rejects_scalar_record() {
        assert!(FormContext::from_record(&json!("nope"), FormConfig::new()).is_err());
    }

    #[test]
    fn test_form_layout_stacks_children() {
        let ctx = context(json!({}));
        let mut form = Form::new(ctx.clone())
            .gap(10.0)
            .child(DateInput::new(&ctx, "posts", "publishedAt").expect("valid source"))
            .child(DateInput::new(&ctx, "posts", "updatedAt").expect("valid source"));
        form.layout(Rect::new(0.0, 0.0, 300.0, 400.0));
        let first = form.children()[0].bounds();
        let second = form.children()[1].bounds();
        assert!(second.y >= first.y + first.height + 10.0 - f32::EPSILON);
        assert!(form.measure(Constraints::loose(Size::new(300.0, 400.0))).height > 0.0);
    }

    #[test]
    fn test_submit_rejected_then_accepted() {
        let ctx = context(json!({}));
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut form = Form::new(ctx.clone())
            .child(
                DateInput::new(&ctx, "posts", "publishedAt")
                    .expect("valid source")
                    .validate(required()),
            )
            .on_submit(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            });

        let result = form.submit();
        assert!(!result.accepted);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(form.to_html().contains("ra.validation.required"));

        ctx.form().change("publishedAt", json!("2010-01-04")).expect("change");
        let result = form.submit();
        assert!(result.accepted);
        assert_eq!(result.values, json!({ "publishedAt": "2010-01-04" }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.form().get_state().submit_count, 2);
    }

    #[test]
    fn test_enter_submits() {
        let ctx = context(json!({ "publishedAt": "2010-01-01" }));
        let mut form = Form::new(ctx.clone())
            .child(DateInput::new(&ctx, "posts", "publishedAt").expect("valid source"));
        let message = form
            .event(&Event::KeyDown { key: Key::Enter })
            .expect("submit message");
        let submitted = message.downcast::<FormSubmitted>().expect("FormSubmitted");
        assert!(submitted.accepted);
    }

    #[test]
    fn test_mouse_down_focuses_hit_child() {
        let ctx = context(json!({}));
        let mut form = Form::new(ctx.clone())
            .child(DateInput::new(&ctx, "posts", "publishedAt").expect("valid source"));
        form.layout(Rect::new(0.0, 0.0, 300.0, 200.0));
        let bounds = form.children()[0].bounds();
        form.event(&Event::MouseDown {
            position: PointerPosition {
                x: (bounds.x + 5.0) as i32,
                y: (bounds.y + bounds.height - 5.0) as i32,
            },
        });
        assert!(ctx.form().field("publishedAt").expect("registered").visited);
    }

    fn press_centre_of(form: &mut Form, index: usize) {
        let bounds = form.children()[index].bounds();
        form.event(&Event::MouseDown {
            position: PointerPosition {
                x: (bounds.x + bounds.width / 2.0) as i32,
                y: (bounds.y + bounds.height / 2.0) as i32,
            },
        });
    }

    fn two_inputs(ctx: &FormContext) -> Form {
        let mut form = Form::new(ctx.clone())
            .child(DateInput::new(ctx, "posts", "publishedAt").expect("valid source"))
            .child(DateInput::new(ctx, "posts", "updatedAt").expect("valid source"));
        form.layout(Rect::new(0.0, 0.0, 300.0, 400.0));
        form
    }

    #[test]
    fn test_mouse_down_on_another_input_blurs_the_focused_one() {
        let ctx = context(json!({}));
        let mut form = two_inputs(&ctx);

        press_centre_of(&mut form, 0);
        assert_eq!(form.focused_index(), Some(0));
        press_centre_of(&mut form, 1);

        assert_eq!(form.focused_index(), Some(1));
        assert!(ctx.form().field("publishedAt").expect("registered").touched);
        assert!(!ctx.form().field("updatedAt").expect("registered").touched);
    }

    #[test]
    fn test_mouse_down_outside_every_input_blurs() {
        let ctx = context(json!({}));
        let mut form = two_inputs(&ctx);

        press_centre_of(&mut form, 0);
        form.event(&Event::MouseDown {
            position: PointerPosition { x: 290, y: 399 },
        });

        assert_eq!(form.focused_index(), None);
        assert!(ctx.form().field("publishedAt").expect("registered").touched);
    }

    #[test]
    fn test_tab_walks_focusable_inputs() {
        let ctx = context(json!({}));
        let mut form = Form::new(ctx.clone())
            .child(DateInput::new(&ctx, "posts", "publishedAt").expect("valid source"))
            .child(
                DateInput::new(&ctx, "posts", "createdAt")
                    .expect("valid source")
                    .disabled(true),
            )
            .child(DateInput::new(&ctx, "posts", "updatedAt").expect("valid source"));
        let tab = Event::KeyDown { key: Key::Tab };

        form.event(&tab);
        assert_eq!(form.focused_index(), Some(0));
        form.event(&tab);
        assert_eq!(form.focused_index(), Some(2));
        assert!(ctx.form().field("publishedAt").expect("registered").touched);
        assert!(!ctx.form().field("createdAt").expect("registered").visited);

        form.event(&tab);
        assert_eq!(form.focused_index(), None);
        assert!(ctx.form().field("updatedAt").expect("registered").touched);
    }

    #[test]
    fn test_form_html_and_css() {
        let ctx = context(json!({}));
        let form = Form::new(ctx.clone())
            .with_test_id("post-edit")
            .child(DateInput::new(&ctx, "posts", "publishedAt").expect("valid source"));
        let html = form.to_html();
        assert!(html.starts_with(r#"<form class="simple-form" data-testid="post-edit" novalidate>"#));
        assert!(html.contains(r#"type="date""#));
        assert!(form.to_css().contains(".simple-form"));
        assert!(form.verify().is_valid());
        assert_eq!(form.accessible_role(), AccessibleRole::Form);
    }
}
