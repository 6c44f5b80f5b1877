//! BDD-style helpers: `describe`, `it` and `expect`.
//!
//! ```rust
//! use adminform_test::bdd::*;
//!
//! describe_and_assert("<DateInput />", |ctx| {
//!     ctx.it("renders a date control", |_| {
//!         expect("date").to_equal("date");
//!     });
//!
//!     ctx.it("is pristine on mount", |_| {
//!         expect(false).to_be_false();
//!     });
//! });
//! ```

use std::cell::{Cell, RefCell};
use std::fmt::Debug;

/// A suite of cases run under one description.
#[derive(Default)]
pub struct TestContext {
    description: String,
    passed: Cell<u32>,
    failures: RefCell<Vec<String>>,
}

impl TestContext {
    /// Create a new test context.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Suite description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run one case. A panic inside `test` is recorded as a failure.
    pub fn it<F: Fn(&Self)>(&self, description: &str, test: F) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| test(self)));

        match result {
            Ok(()) => {
                log::debug!("ok: {} {}", self.description, description);
                self.passed.set(self.passed.get() + 1);
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "test panicked".to_string());
                log::debug!("FAILED: {} {}: {reason}", self.description, description);
                self.failures
                    .borrow_mut()
                    .push(format!("{} - {}: {}", self.description, description, reason));
            }
        }
    }

    /// Cases that passed.
    #[must_use]
    pub fn passed(&self) -> u32 {
        self.passed.get()
    }

    /// Cases that failed.
    #[must_use]
    pub fn failed(&self) -> u32 {
        self.failures.borrow().len() as u32
    }

    /// Failure messages, one per failed case.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }

    /// True when no case failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.borrow().is_empty()
    }
}

/// Build and run a suite.
pub fn describe<F: FnOnce(&mut TestContext)>(description: &str, f: F) -> TestContext {
    let mut ctx = TestContext::new(description);
    f(&mut ctx);
    ctx
}

/// Run a suite and panic with every failure if any case failed.
///
/// # Panics
///
/// Panics if any case failed.
pub fn describe_and_assert<F: FnOnce(&mut TestContext)>(description: &str, f: F) {
    let ctx = describe(description, f);
    assert!(
        ctx.all_passed(),
        "Test suite '{}' failed: {} passed, {} failed\n{}",
        description,
        ctx.passed(),
        ctx.failed(),
        ctx.failures().join("\n")
    );
}

// =============================================================================
// Expectations API
// =============================================================================

/// Wrapper for making assertions.
#[derive(Debug)]
pub struct Expectation<T> {
    value: T,
    negated: bool,
}

/// Create an expectation from a value.
pub const fn expect<T>(value: T) -> Expectation<T> {
    Expectation {
        value,
        negated: false,
    }
}

impl<T> Expectation<T> {
    /// Negate the expectation.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    fn check(&self, holds: bool, describe: impl FnOnce(&str) -> String) {
        if holds == self.negated {
            let verb = if self.negated { "not to" } else { "to" };
            panic!("{}", describe(verb));
        }
    }
}

impl<T: PartialEq + Debug> Expectation<T> {
    /// Assert equality.
    ///
    /// # Panics
    ///
    /// Panics when the outcome differs from the expectation.
    pub fn to_equal(self, expected: T) {
        self.check(self.value == expected, |verb| {
            format!("Expected {:?} {verb} equal {:?}", self.value, expected)
        });
    }
}

impl Expectation<bool> {
    /// Assert true.
    ///
    /// # Panics
    ///
    /// Panics when the outcome differs from the expectation.
    pub fn to_be_true(self) {
        self.check(self.value, |verb| format!("Expected {verb} be true"));
    }

    /// Assert false.
    ///
    /// # Panics
    ///
    /// Panics when the outcome differs from the expectation.
    pub fn to_be_false(self) {
        self.check(!self.value, |verb| format!("Expected {verb} be false"));
    }
}

impl<T: Debug> Expectation<Option<T>> {
    /// Assert Some.
    ///
    /// # Panics
    ///
    /// Panics when the outcome differs from the expectation.
    pub fn to_be_some(self) {
        self.check(self.value.is_some(), |verb| {
            format!("Expected {:?} {verb} be Some", self.value)
        });
    }

    /// Assert None.
    ///
    /// # Panics
    ///
    /// Panics when the outcome differs from the expectation.
    pub fn to_be_none(self) {
        self.check(self.value.is_none(), |verb| {
            format!("Expected {:?} {verb} be None", self.value)
        });
    }
}

impl<S: AsRef<str>> Expectation<S> {
    /// Assert the string ends with `suffix`.
    ///
    /// # Panics
    ///
    /// Panics when the outcome differs from the expectation.
    pub fn to_end_with(self, suffix: &str) {
        let haystack = self.value.as_ref();
        self.check(haystack.ends_with(suffix), |verb| {
            format!("Expected {haystack:?} {verb} end with {suffix:?}")
        });
    }
}
