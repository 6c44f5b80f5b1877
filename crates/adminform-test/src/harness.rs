//! Test harness for adminform widgets.
//!
//! Renders a widget tree, finds nodes the way a user would (by label, by
//! displayed value, by text) and fires DOM-like events at them. After every
//! event the whole tree is rebuilt from shared form state and laid out again,
//! so queries always observe the current render.

use adminform_core::{
    Constraints, Event, Key, PointerPosition, RecordingCanvas, Rect, Widget,
};
use std::collections::VecDeque;

use crate::selector::Selector;

/// Path of child indices from the root to a widget.
type WidgetPath = Vec<usize>;

/// Test harness for interacting with adminform widgets.
pub struct Harness {
    /// Root widget being tested
    root: Box<dyn Widget>,
    /// Pending events and their targets
    event_queue: VecDeque<(WidgetPath, Event)>,
    /// Current viewport size
    viewport: Rect,
}

impl Harness {
    /// Create a new harness with a root widget and render it.
    pub fn new(root: impl Widget + 'static) -> Self {
        let mut harness = Self {
            root: Box::new(root),
            event_queue: VecDeque::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
        };
        harness.render();
        harness
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.render();
        self
    }

    /// Replace the root widget. The previous tree is dropped after the new one
    /// is in place.
    pub fn rerender(&mut self, root: impl Widget + 'static) -> &mut Self {
        let previous = std::mem::replace(&mut self.root, Box::new(root));
        self.render();
        drop(previous);
        self
    }

    /// Re-read shared state and lay the tree out again.
    pub fn render(&mut self) -> &mut Self {
        self.root.rebuild();
        let size = self.root.measure(Constraints::loose(self.viewport.size()));
        self.root.layout(Rect::new(
            self.viewport.x,
            self.viewport.y,
            size.width.max(self.viewport.width),
            size.height,
        ));
        self
    }

    /// Root widget.
    #[must_use]
    pub fn root(&self) -> &dyn Widget {
        &*self.root
    }

    // === Event Simulation ===

    /// Fire an event at the first widget matching the selector.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn fire_event(&mut self, selector: &str, event: Event) -> &mut Self {
        let path = self.require_path(selector);
        self.event_queue.push_back((path, event));
        self.process_events();
        self
    }

    /// Commit a new value into a control (`fireEvent.change`).
    pub fn change(&mut self, selector: &str, value: &str) -> &mut Self {
        self.fire_event(selector, Event::change(value))
    }

    /// Move focus into a control. Whichever widget held focus before is
    /// blurred first.
    pub fn focus(&mut self, selector: &str) -> &mut Self {
        let path = self.require_path(selector);
        let mut focused = Vec::new();
        if find_focused_path(&*self.root, &mut focused) && focused != path {
            self.event_queue.push_back((focused, Event::FocusOut));
        }
        self.event_queue.push_back((path, Event::FocusIn));
        self.process_events();
        self
    }

    /// Move focus out of a control.
    pub fn blur(&mut self, selector: &str) -> &mut Self {
        self.fire_event(selector, Event::FocusOut)
    }

    /// Press at the centre of a widget. The press goes to the root, which
    /// hit-tests its children.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        let bounds = self.get(selector).bounds();
        let position = PointerPosition {
            x: (bounds.x + bounds.width / 2.0) as i32,
            y: (bounds.y + bounds.height / 2.0) as i32,
        };
        self.event_queue
            .push_back((Vec::new(), Event::MouseDown { position }));
        self.process_events();
        self
    }

    /// Press a key on the root.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue
            .push_back((Vec::new(), Event::KeyDown { key }));
        self.process_events();
        self
    }

    // === Queries ===

    /// Query for a widget matching the selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<&dyn Widget> {
        let sel = Selector::parse(selector).ok()?;
        self.query_selector(&sel)
    }

    /// Query for all widgets matching the selector.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<&dyn Widget> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        find_all_widgets(&*self.root, &sel, &mut results);
        results
    }

    /// Get a widget matching the selector.
    ///
    /// # Panics
    ///
    /// Panics if the selector is invalid or nothing matches.
    pub fn get(&self, selector: &str) -> &dyn Widget {
        let sel = match Selector::parse(selector) {
            Ok(sel) => sel,
            Err(e) => panic!("Invalid selector '{selector}': {e}"),
        };
        self.query_selector(&sel)
            .unwrap_or_else(|| panic!("Expected widget matching '{selector}' to exist"))
    }

    /// Control whose label reads exactly `label`.
    #[must_use]
    pub fn query_by_label_text(&self, label: &str) -> Option<&dyn Widget> {
        self.query_selector(&Selector::Label(label.to_string()))
    }

    /// Control whose label reads exactly `label`.
    ///
    /// # Panics
    ///
    /// Panics if no control carries that label.
    pub fn get_by_label_text(&self, label: &str) -> &dyn Widget {
        self.query_by_label_text(label).unwrap_or_else(|| {
            panic!(
                "Unable to find a control labelled '{label}'. Labels present: {:?}",
                self.labels()
            )
        })
    }

    /// Control currently displaying `value`.
    #[must_use]
    pub fn query_by_display_value(&self, value: &str) -> Option<&dyn Widget> {
        self.query_selector(&Selector::DisplayValue(value.to_string()))
    }

    /// Control currently displaying `value`.
    ///
    /// # Panics
    ///
    /// Panics if no control displays that value.
    pub fn get_by_display_value(&self, value: &str) -> &dyn Widget {
        self.query_by_display_value(value)
            .unwrap_or_else(|| panic!("Unable to find a control displaying '{value}'"))
    }

    /// Text node reading exactly `text`.
    #[must_use]
    pub fn query_by_text(&self, text: &str) -> Option<&dyn Widget> {
        self.query_selector(&Selector::Text(text.to_string()))
    }

    /// Text node reading exactly `text`.
    ///
    /// # Panics
    ///
    /// Panics if no text node reads that text.
    pub fn get_by_text(&self, text: &str) -> &dyn Widget {
        self.query_by_text(text)
            .unwrap_or_else(|| panic!("Unable to find an element with the text '{text}'"))
    }

    /// Get text from a widget: its text content, else its accessible name.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .and_then(|widget| widget.text_content().or_else(|| widget.accessible_name()))
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Accessible names of every labelled control, in tree order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_labels(&*self.root, &mut names);
        names
    }

    /// Check if a widget exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// HTML of the whole tree.
    #[must_use]
    pub fn html(&self) -> String {
        self.root.to_html()
    }

    /// Paint the tree into a fresh recording canvas.
    #[must_use]
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    // === Assertions ===

    /// Assert that a widget exists.
    ///
    /// # Panics
    ///
    /// Panics if the widget does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected widget matching '{selector}' to exist"
        );
        self
    }

    /// Assert that a widget does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the widget exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected widget matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert that text contains a substring.
    ///
    /// # Panics
    ///
    /// Panics if the text does not contain the substring.
    pub fn assert_text_contains(&self, selector: &str, substring: &str) -> &Self {
        let actual = self.text(selector);
        assert!(
            actual.contains(substring),
            "Expected text for '{selector}' to contain '{substring}' but got '{actual}'"
        );
        self
    }

    /// Assert the displayed value of a control.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches or the value differs.
    pub fn assert_display_value(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.get(selector).display_value().unwrap_or_default();
        assert_eq!(
            actual, expected,
            "Expected value '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching widgets.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} widgets matching '{selector}' but found {actual}"
        );
        self
    }

    // === Internal ===

    fn query_selector(&self, selector: &Selector) -> Option<&dyn Widget> {
        find_widget(&*self.root, selector)
    }

    fn require_path(&self, selector: &str) -> WidgetPath {
        let sel = match Selector::parse(selector) {
            Ok(sel) => sel,
            Err(e) => panic!("Invalid selector '{selector}': {e}"),
        };
        let mut path = Vec::new();
        if find_path(&*self.root, &sel, &mut path) {
            path
        } else {
            panic!("Expected widget matching '{selector}' to exist")
        }
    }

    fn process_events(&mut self) {
        while let Some((path, event)) = self.event_queue.pop_front() {
            match widget_at_mut(&mut self.root, &path) {
                Some(target) => {
                    log::trace!("dispatching {event:?} to {}", target.brick_name());
                    target.event(&event);
                }
                None => log::warn!("event target at {path:?} vanished before dispatch"),
            }
            self.render();
        }
    }
}

fn find_widget<'a>(widget: &'a dyn Widget, selector: &Selector) -> Option<&'a dyn Widget> {
    if selector.matches(widget) {
        return Some(widget);
    }

    for child in widget.children() {
        if let Some(found) = find_widget(child.as_ref(), selector) {
            return Some(found);
        }
    }

    None
}

fn find_all_widgets<'a>(
    widget: &'a dyn Widget,
    selector: &Selector,
    results: &mut Vec<&'a dyn Widget>,
) {
    if selector.matches(widget) {
        results.push(widget);
    }

    for child in widget.children() {
        find_all_widgets(child.as_ref(), selector, results);
    }
}

fn find_path(widget: &dyn Widget, selector: &Selector, path: &mut WidgetPath) -> bool {
    if selector.matches(widget) {
        return true;
    }

    for (i, child) in widget.children().iter().enumerate() {
        path.push(i);
        if find_path(child.as_ref(), selector, path) {
            return true;
        }
        path.pop();
    }

    false
}

fn find_focused_path(widget: &dyn Widget, path: &mut WidgetPath) -> bool {
    if widget.has_focus() {
        return true;
    }

    for (i, child) in widget.children().iter().enumerate() {
        path.push(i);
        if find_focused_path(child.as_ref(), path) {
            return true;
        }
        path.pop();
    }

    false
}

fn widget_at_mut<'a>(root: &'a mut Box<dyn Widget>, path: &[usize]) -> Option<&'a mut dyn Widget> {
    let mut current: &mut dyn Widget = root.as_mut();
    for &index in path {
        current = current.children_mut().get_mut(index)?.as_mut();
    }
    Some(current)
}

fn collect_labels(widget: &dyn Widget, names: &mut Vec<String>) {
    if let Some(name) = widget.accessible_name() {
        names.push(name.to_string());
    }
    for child in widget.children() {
        collect_labels(child.as_ref(), names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminform_core::{
        widget::LayoutResult, Brick, BrickAssertion, BrickVerification, Canvas, Color, FormConfig,
        FormHandle, Size, TextStyle, TypeId,
    };
    use serde_json::{json, Value};
    use std::any::Any;
    use std::sync::{Arc, Mutex};

    type EventLog = Arc<Mutex<Vec<(String, Event)>>>;

    // Mock widget for testing
    struct MockWidget {
        test_id: Option<String>,
        accessible_name: Option<String>,
        text: Option<String>,
        children: Vec<Box<dyn Widget>>,
        log: Option<EventLog>,
        focused: bool,
        bounds: Rect,
    }

    impl MockWidget {
        fn new() -> Self {
            Self {
                test_id: None,
                accessible_name: None,
                text: None,
                children: Vec::new(),
                log: None,
                focused: false,
                bounds: Rect::default(),
            }
        }

        fn with_test_id(mut self, id: &str) -> Self {
            self.test_id = Some(id.to_string());
            self
        }

        fn with_name(mut self, name: &str) -> Self {
            self.accessible_name = Some(name.to_string());
            self
        }

        fn with_text(mut self, text: &str) -> Self {
            self.text = Some(text.to_string());
            self
        }

        fn with_child(mut self, child: impl Widget + 'static) -> Self {
            self.children.push(Box::new(child));
            self
        }

        fn with_log(mut self, log: &EventLog) -> Self {
            self.log = Some(Arc::clone(log));
            self
        }
    }

    impl Brick for MockWidget {
        fn brick_name(&self) -> &'static str {
            "Mock"
        }
        fn assertions(&self) -> Vec<BrickAssertion> {
            Vec::new()
        }
        fn verify(&self) -> BrickVerification {
            BrickVerification::default()
        }
        fn to_html(&self) -> String {
            let inner: String = self.children.iter().map(|c| c.to_html()).collect();
            format!("<div>{}{inner}</div>", self.text.as_deref().unwrap_or(""))
        }
    }

    impl Widget for MockWidget {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }
        fn measure(&self, c: Constraints) -> Size {
            c.constrain(Size::new(100.0, 50.0))
        }
        fn layout(&mut self, b: Rect) -> LayoutResult {
            self.bounds = b;
            let mut y = b.y;
            for child in &mut self.children {
                child.layout(Rect::new(b.x, y, b.width, 50.0));
                y += 50.0;
            }
            LayoutResult { size: b.size() }
        }
        fn paint(&self, canvas: &mut dyn Canvas) {
            if let Some(text) = &self.text {
                canvas.draw_text(text, self.bounds.origin(), &TextStyle::default());
            }
        }
        fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
            match event {
                Event::FocusIn => self.focused = true,
                Event::FocusOut => self.focused = false,
                _ => {}
            }
            if let Some(log) = &self.log {
                let id = self.test_id.clone().unwrap_or_default();
                log.lock().expect("event log").push((id, event.clone()));
            }
            None
        }
        fn children(&self) -> &[Box<dyn Widget>] {
            &self.children
        }
        fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
            &mut self.children
        }
        fn test_id(&self) -> Option<&str> {
            self.test_id.as_deref()
        }
        fn has_focus(&self) -> bool {
            self.focused
        }
        fn accessible_name(&self) -> Option<&str> {
            self.accessible_name.as_deref()
        }
        fn text_content(&self) -> Option<&str> {
            self.text.as_deref()
        }
        fn bounds(&self) -> Rect {
            self.bounds
        }
    }

    // Control bound to a form field; shows whatever the form holds.
    struct BoundField {
        form: FormHandle,
        name: String,
        shown: String,
    }

    impl BoundField {
        fn new(form: &FormHandle, name: &str) -> Self {
            form.register_field(name, None).expect("valid path");
            Self {
                form: form.clone(),
                name: name.to_string(),
                shown: String::new(),
            }
        }
    }

    impl Brick for BoundField {
        fn brick_name(&self) -> &'static str {
            "BoundField"
        }
        fn assertions(&self) -> Vec<BrickAssertion> {
            Vec::new()
        }
        fn verify(&self) -> BrickVerification {
            BrickVerification::default()
        }
        fn to_html(&self) -> String {
            format!(r#"<input name="{}" value="{}"/>"#, self.name, self.shown)
        }
    }

    impl Widget for BoundField {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }
        fn measure(&self, c: Constraints) -> Size {
            c.constrain(Size::new(100.0, 30.0))
        }
        fn layout(&mut self, b: Rect) -> LayoutResult {
            LayoutResult { size: b.size() }
        }
        fn paint(&self, canvas: &mut dyn Canvas) {
            canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        }
        fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
            if let Event::Change { value } = event {
                self.form
                    .change(&self.name, Value::String(value.clone()))
                    .expect("registered");
            }
            None
        }
        fn children(&self) -> &[Box<dyn Widget>] {
            &[]
        }
        fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
            &mut []
        }
        fn rebuild(&mut self) {
            self.shown = self
                .form
                .value(&self.name)
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
        }
        fn accessible_name(&self) -> Option<&str> {
            Some(&self.name)
        }
        fn input_type(&self) -> Option<&str> {
            Some("text")
        }
        fn display_value(&self) -> Option<&str> {
            Some(&self.shown)
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[test]
    fn test_harness_exists() {
        let widget = MockWidget::new().with_test_id("root");
        let harness = Harness::new(widget);
        assert!(harness.exists("[data-testid='root']"));
        assert!(!harness.exists("[data-testid='nonexistent']"));
    }

    #[test]
    fn test_harness_query_nested() {
        let widget = MockWidget::new()
            .with_test_id("root")
            .with_child(MockWidget::new().with_test_id("child1"))
            .with_child(
                MockWidget::new()
                    .with_test_id("child2")
                    .with_child(MockWidget::new().with_test_id("grandchild")),
            );
        let harness = Harness::new(widget);
        harness
            .assert_exists("[data-testid='child1']")
            .assert_exists("[data-testid='grandchild']")
            .assert_count("Mock", 4);
    }

    #[test]
    fn test_invalid_selector_queries_nothing() {
        let harness = Harness::new(MockWidget::new());
        assert!(harness.query("#nope").is_none());
        assert!(harness.query_all("#nope").is_empty());
    }

    #[test]
    fn test_query_by_label_and_text() {
        let widget = MockWidget::new()
            .with_child(MockWidget::new().with_name("Published at"))
            .with_child(MockWidget::new().with_text("Required"));
        let harness = Harness::new(widget);
        assert!(harness.query_by_label_text("Published at").is_some());
        assert!(harness.query_by_label_text("Published").is_none());
        assert!(harness.query_by_text("Required").is_some());
        assert_eq!(harness.get_by_text("Required").text_content(), Some("Required"));
        assert_eq!(harness.labels(), vec!["Published at".to_string()]);
    }

    #[test]
    #[should_panic(expected = "Unable to find a control labelled 'Missing'")]
    fn test_get_by_label_text_panics() {
        let harness = Harness::new(MockWidget::new());
        let _ = harness.get_by_label_text("Missing");
    }

    #[test]
    #[should_panic(expected = "Unable to find an element with the text 'x'")]
    fn test_get_by_text_panics() {
        let harness = Harness::new(MockWidget::new());
        let _ = harness.get_by_text("x");
    }

    #[test]
    fn test_text_prefers_content_then_name() {
        let widget = MockWidget::new()
            .with_child(MockWidget::new().with_test_id("t").with_text("hello"))
            .with_child(MockWidget::new().with_test_id("n").with_name("label"));
        let harness = Harness::new(widget);
        harness
            .assert_text("[data-testid='t']", "hello")
            .assert_text("[data-testid='n']", "label")
            .assert_text_contains("[data-testid='t']", "ell");
        assert_eq!(harness.text("[data-testid='missing']"), "");
    }

    #[test]
    #[should_panic(expected = "Expected widget matching")]
    fn test_assert_exists_fails() {
        let harness = Harness::new(MockWidget::new());
        harness.assert_exists("[data-testid='nonexistent']");
    }

    #[test]
    fn test_assert_not_exists() {
        let harness = Harness::new(MockWidget::new());
        harness.assert_not_exists("[data-testid='nonexistent']");
    }

    // =========================================================================
    // Events
    // =========================================================================

    #[test]
    fn test_fire_event_reaches_nested_target() {
        let log = EventLog::default();
        let widget = MockWidget::new()
            .with_test_id("root")
            .with_log(&log)
            .with_child(MockWidget::new().with_test_id("a").with_log(&log))
            .with_child(
                MockWidget::new()
                    .with_log(&log)
                    .with_child(MockWidget::new().with_test_id("b").with_log(&log)),
            );
        let mut harness = Harness::new(widget);
        harness.focus("[data-testid='b']").blur("[data-testid='b']");

        let events = log.lock().expect("event log").clone();
        assert_eq!(
            events,
            vec![
                ("b".to_string(), Event::FocusIn),
                ("b".to_string(), Event::FocusOut),
            ]
        );
    }

    #[test]
    fn test_focus_blurs_the_previous_focus() {
        let log = EventLog::default();
        let widget = MockWidget::new()
            .with_child(MockWidget::new().with_test_id("a").with_log(&log))
            .with_child(MockWidget::new().with_test_id("b").with_log(&log));
        let mut harness = Harness::new(widget);
        harness
            .focus("[data-testid='a']")
            .focus("[data-testid='a']")
            .focus("[data-testid='b']");

        let events = log.lock().expect("event log").clone();
        assert_eq!(
            events,
            vec![
                ("a".to_string(), Event::FocusIn),
                ("a".to_string(), Event::FocusIn),
                ("a".to_string(), Event::FocusOut),
                ("b".to_string(), Event::FocusIn),
            ]
        );
        assert!(harness.get("[data-testid='b']").has_focus());
        assert!(!harness.get("[data-testid='a']").has_focus());
    }

    #[test]
    #[should_panic(expected = "to exist")]
    fn test_fire_event_without_target_panics() {
        let mut harness = Harness::new(MockWidget::new());
        harness.change("[data-testid='ghost']", "x");
    }

    #[test]
    fn test_change_rebuilds_from_form_state() {
        let form = FormHandle::new(FormConfig::new());
        let mut harness = Harness::new(
            MockWidget::new()
                .with_child(BoundField::new(&form, "title"))
                .with_child(BoundField::new(&form, "subtitle")),
        );
        harness.assert_display_value("[aria-label='title']", "");

        harness.change("[aria-label='title']", "Hello");
        assert_eq!(form.value("title"), Some(json!("Hello")));
        harness.assert_display_value("[aria-label='title']", "Hello");
        assert!(harness.query_by_display_value("Hello").is_some());

        // Changes made outside the tree show up on the next render.
        form.change("subtitle", json!("World")).expect("registered");
        assert!(harness.query_by_display_value("World").is_none());
        harness.render();
        assert_eq!(
            harness.get_by_display_value("World").accessible_name(),
            Some("subtitle")
        );
    }

    #[test]
    fn test_click_hits_widget_centre() {
        let log = EventLog::default();
        let widget = MockWidget::new()
            .with_test_id("root")
            .with_log(&log)
            .with_child(MockWidget::new().with_test_id("first"))
            .with_child(MockWidget::new().with_test_id("second"));
        let mut harness = Harness::new(widget).viewport(200.0, 200.0);
        let bounds = harness.get("[data-testid='second']").bounds();
        assert_eq!(bounds.y, 50.0);
        harness.click("[data-testid='second']").press_key(Key::Enter);

        let events = log.lock().expect("event log").clone();
        assert_eq!(
            events,
            vec![
                (
                    "root".to_string(),
                    Event::MouseDown {
                        position: PointerPosition { x: 100, y: 75 }
                    }
                ),
                ("root".to_string(), Event::KeyDown { key: Key::Enter }),
            ]
        );
    }

    #[test]
    fn test_rerender_replaces_root() {
        let mut harness = Harness::new(MockWidget::new().with_test_id("old"));
        harness.rerender(MockWidget::new().with_test_id("new"));
        harness
            .assert_not_exists("[data-testid='old']")
            .assert_exists("[data-testid='new']");
    }

    // =========================================================================
    // Output
    // =========================================================================

    #[test]
    fn test_html_and_paint() {
        let widget = MockWidget::new()
            .with_text("outer")
            .with_child(MockWidget::new().with_text("inner"));
        let harness = Harness::new(widget);
        assert_eq!(harness.html(), "<div>outer<div>inner</div></div>");
        let canvas = harness.paint();
        assert_eq!(canvas.texts(), vec!["outer"]);
        assert_eq!(canvas.command_count(), 1);
    }
}
