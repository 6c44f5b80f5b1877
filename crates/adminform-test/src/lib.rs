#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::float_cmp)]
#![allow(clippy::manual_assert)]
#![allow(clippy::type_complexity)]
#![allow(clippy::test_attr_in_doctest)]
//! Testing harness for adminform widgets.
//!
//! Render a tree, find controls by what the user sees and fire events at
//! them:
//!
//! ```ignore
//! use adminform_test::{form_test, Harness};
//!
//! #[form_test]
//! fn test_published_at() {
//!     let ctx = FormContext::from_record(&json!({}), FormConfig::new()).expect("object");
//!     let mut harness = Harness::new(Form::new(ctx.clone()).child(
//!         DateInput::new(&ctx, "posts", "publishedAt").expect("valid source"),
//!     ));
//!     harness.change("[aria-label='resources.posts.fields.publishedAt']", "2010-01-04");
//!     harness.get_by_display_value("2010-01-04");
//! }
//! ```

pub mod bdd;
mod harness;
mod logging;
mod selector;

pub use bdd::{describe, describe_and_assert, expect, Expectation, TestContext};
pub use harness::Harness;
pub use logging::init_logging;
pub use selector::{role_name, Selector, SelectorError, SelectorParser};

pub use adminform_test_macros::form_test;
