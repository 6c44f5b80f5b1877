//! Form input widgets for adminform.
//!
//! Inputs are bound to a [`FormContext`]: they register their field on
//! construction, write user edits to the shared form state, and re-read it
//! on [`adminform_core::Widget::rebuild`].

pub mod date_input;
pub mod form;
pub mod text;

pub use date_input::{DateChanged, DateInput};
pub use form::{Form, FormContext, FormSubmitted};
pub use text::Text;
