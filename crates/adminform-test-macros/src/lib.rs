//! Proc macros for the adminform test harness.
//!
//! Provides `#[form_test]`, a `#[test]` that installs the test logger first.
//!
//! # Example
//!
//! ```ignore
//! use adminform_test::{form_test, Harness};
//!
//! #[form_test]
//! fn test_label_renders() {
//!     let harness = Harness::new(form);
//!     harness.assert_exists("[type=date]");
//! }
//!
//! #[form_test(should_panic = "Unable to find")]
//! fn test_missing_label() {
//!     harness.get_by_label_text("nope");
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Ident, ItemFn, LitStr, Token,
};

/// Parsed arguments of `#[form_test]`.
#[derive(Default)]
struct FormTestAttrs {
    /// `None`: no panic expected. `Some(None)`: any panic. `Some(Some(m))`: panic containing `m`.
    should_panic: Option<Option<String>>,
    ignore: Option<Option<String>>,
}

impl Parse for FormTestAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = Self::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            let value = if input.peek(Token![=]) {
                input.parse::<Token![=]>()?;
                Some(input.parse::<LitStr>()?.value())
            } else {
                None
            };

            match ident.to_string().as_str() {
                "should_panic" => attrs.should_panic = Some(value),
                "ignore" => attrs.ignore = Some(value),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown form_test argument: {other}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(attrs)
    }
}

/// Test attribute for adminform widget tests.
///
/// # Arguments
///
/// - `should_panic` or `should_panic = "message"` - Expect the test to panic
/// - `ignore` or `ignore = "reason"` - Skip this test by default
///
/// The function may return `()` or a `Result`; the logger is installed
/// before the body runs.
#[proc_macro_attribute]
pub fn form_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let attrs = parse_macro_input!(attr as FormTestAttrs);

    match impl_form_test(&input, &attrs) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => TokenStream::from(e.to_compile_error()),
    }
}

fn impl_form_test(input: &ItemFn, attrs: &FormTestAttrs) -> syn::Result<TokenStream2> {
    if input.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            input.sig.fn_token,
            "form_test functions must be synchronous",
        ));
    }
    if !input.sig.inputs.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.sig.inputs,
            "form_test functions take no arguments",
        ));
    }

    let fn_body = &input.block;
    let fn_attrs = &input.attrs;
    let fn_vis = &input.vis;
    let fn_sig = &input.sig;

    let panic_attr = match &attrs.should_panic {
        None => quote! {},
        Some(None) => quote! { #[should_panic] },
        Some(Some(message)) => quote! { #[should_panic(expected = #message)] },
    };

    let ignore_attr = match &attrs.ignore {
        None => quote! {},
        Some(None) => quote! { #[ignore] },
        Some(Some(reason)) => quote! { #[ignore = #reason] },
    };

    Ok(quote! {
        #(#fn_attrs)*
        #[test]
        #panic_attr
        #ignore_attr
        #fn_vis #fn_sig {
            ::adminform_test::init_logging();
            #fn_body
        }
    })
}
