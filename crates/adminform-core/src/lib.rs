//! Core types and traits for adminform.
//!
//! This crate provides the pieces form inputs are built from:
//! - Rendering model: [`Widget`], [`Brick`], [`Canvas`], [`Event`]
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Constraints`]
//! - Form state: [`FormHandle`], [`FieldState`], [`FormState`]
//! - Validation: [`Validator`], [`ValidationError`], [`required`], [`compose`]
//! - Translation: [`Translator`], [`IdentityTranslator`], [`MessageCatalog`]
//! - Date display: [`format_input_date`]

pub mod brick;
pub mod canvas;
mod color;
pub mod config;
mod constraints;
pub mod date;
pub mod error;
mod event;
pub mod form;
mod geometry;
pub mod i18n;
pub mod path;
pub mod validation;
pub mod widget;

pub use brick::{escape_html, Brick, BrickAssertion, BrickBudget, BrickVerification};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::Color;
pub use config::{FormConfig, ValidateOn};
pub use constraints::Constraints;
pub use date::{format_input_date, format_input_date_in, INPUT_DATE_FORMAT};
pub use error::{ConfigError, FormError, FormResult};
pub use event::{Event, Key, PointerPosition};
pub use form::{FieldState, FormHandle, FormState, SharedValidator, SubscriptionId};
pub use geometry::{Point, Rect, Size};
pub use i18n::{
    field_label, field_label_key, humanize, IdentityTranslator, MessageCatalog, TranslateArgs,
    Translator,
};
pub use path::FieldPath;
pub use validation::{
    compose, required, Composed, Custom, MaxValue, MinValue, Required, ValidationError, Validator,
};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget,
};
