//! Brick contract: every widget declares falsifiable assertions about its
//! rendered output and can emit deterministic HTML/CSS for it.
//!
//! The HTML produced by [`Brick::to_html`] is the observable DOM contract of a
//! widget (label association, input type, error node). It is not meant to be
//! a complete renderer.

/// An assertion a widget makes about its own rendered state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrickAssertion {
    /// Text content must be non-empty.
    TextVisible,
    /// Element must be keyboard focusable.
    Focusable,
    /// The control must have an associated, non-empty label.
    LabelAssociated,
    /// An element matching the selector must be present in `to_html`.
    ElementPresent(String),
    /// Maximum render latency in milliseconds.
    MaxLatencyMs(u32),
}

impl BrickAssertion {
    /// Create an element presence assertion.
    #[must_use]
    pub fn element_present(selector: impl Into<String>) -> Self {
        Self::ElementPresent(selector.into())
    }
}

/// Per-frame time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickBudget {
    /// Total budget in milliseconds
    pub total_ms: u32,
}

impl BrickBudget {
    /// Budget with the given total.
    #[must_use]
    pub const fn uniform(total_ms: u32) -> Self {
        Self { total_ms }
    }

    /// Latency assertion for this budget.
    #[must_use]
    pub const fn assertion(&self) -> BrickAssertion {
        BrickAssertion::MaxLatencyMs(self.total_ms)
    }
}

impl Default for BrickBudget {
    fn default() -> Self {
        // 60fps
        Self::uniform(16)
    }
}

/// Outcome of [`Brick::verify`].
#[derive(Debug, Clone, Default)]
pub struct BrickVerification {
    /// Assertions that held
    pub passed: Vec<BrickAssertion>,
    /// Assertions that failed, with a reason
    pub failed: Vec<(BrickAssertion, String)>,
}

impl BrickVerification {
    /// Record the outcome of a single assertion.
    pub fn check(&mut self, assertion: BrickAssertion, ok: bool, reason: impl Into<String>) {
        if ok {
            self.passed.push(assertion);
        } else {
            self.failed.push((assertion, reason.into()));
        }
    }

    /// True when nothing failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Contract every widget implements.
pub trait Brick: Send + Sync {
    /// Stable type name, also used for type selectors (`"DateInput"`).
    fn brick_name(&self) -> &'static str;

    /// Assertions this widget makes.
    fn assertions(&self) -> Vec<BrickAssertion>;

    /// Render budget.
    fn budget(&self) -> BrickBudget {
        BrickBudget::default()
    }

    /// Check every assertion against the current state.
    fn verify(&self) -> BrickVerification;

    /// Deterministic HTML for the current state.
    fn to_html(&self) -> String;

    /// Scoped CSS rules.
    fn to_css(&self) -> String {
        String::new()
    }

    /// Whether the widget may be painted.
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}

/// Escape text for inclusion in HTML text nodes and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_check() {
        let mut v = BrickVerification::default();
        v.check(BrickAssertion::TextVisible, true, "");
        assert!(v.is_valid());
        v.check(BrickAssertion::LabelAssociated, false, "label is empty");
        assert!(!v.is_valid());
        assert_eq!(v.passed, vec![BrickAssertion::TextVisible]);
        assert_eq!(v.failed[0].1, "label is empty");
    }

    #[test]
    fn test_budget_default_is_one_frame() {
        assert_eq!(BrickBudget::default().assertion(), BrickAssertion::MaxLatencyMs(16));
        assert_eq!(BrickBudget::uniform(8).total_ms, 8);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_element_present_constructor() {
        assert_eq!(
            BrickAssertion::element_present("input[type=date]"),
            BrickAssertion::ElementPresent("input[type=date]".into())
        );
    }
}
