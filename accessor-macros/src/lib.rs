//! `#[derive(Accessor)]` registers the `accessor` field attribute and checks
//! every tag at compile time. The methods themselves come from
//! `accessor-build`, which writes them into the module's `accessor.rs`.
//!
//! ```
//! use accessor_macros::Accessor;
//!
//! #[derive(Accessor)]
//! pub struct User {
//!     #[accessor = "Get,Set"]
//!     name: String,
//!     #[accessor(get)]
//!     age: u32,
//!     #[accessor]
//!     email: String,
//! }
//! # fn main() {}
//! ```
//!
//! A tag naming two methods is rejected where it is written:
//!
//! ```compile_fail
//! use accessor_macros::Accessor;
//!
//! #[derive(Accessor)]
//! pub struct User {
//!     #[accessor = "get,FooName,BarName"]
//!     name: String,
//! }
//! # fn main() {}
//! ```
//!
//! Both spellings of a marker may appear together; each becomes its own
//! method (`getName` and `GetName` here):
//!
//! ```
//! use accessor_macros::Accessor;
//!
//! #[derive(Accessor)]
//! pub struct User {
//!     #[accessor(get, Get)]
//!     name: String,
//! }
//! # fn main() {}
//! ```
//!
//! A method name that is not an identifier is rejected:
//!
//! ```compile_fail
//! use accessor_macros::Accessor;
//!
//! #[derive(Accessor)]
//! pub struct User {
//!     #[accessor = "get,foo bar"]
//!     name: String,
//! }
//! # fn main() {}
//! ```

use accessor_build::AccessorSpec;
use accessor_build::scanner::{ATTRIBUTE, accessor_tag};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Error, Fields, Result, parse_macro_input};

#[proc_macro_derive(Accessor, attributes(accessor))]
pub fn derive_accessor(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match check_tags(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn check_tags(input: &DeriveInput) -> Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "Accessor can only be derived for structs"));
    };

    let mut errors: Option<Error> = None;
    let mut push = |err: Error| match errors.as_mut() {
        Some(existing) => existing.combine(err),
        None => errors = Some(err),
    };

    match &data.fields {
        Fields::Named(named) => {
            for field in &named.named {
                let Some(ident) = &field.ident else { continue };
                let tag = match accessor_tag(&field.attrs) {
                    Ok(Some(tag)) => tag,
                    Ok(None) => continue,
                    Err(err) => {
                        push(err);
                        continue;
                    }
                };
                if let Err(err) = AccessorSpec::parse(&tag, &ident.unraw().to_string()) {
                    let attr = field.attrs.iter().find(|attr| attr.path().is_ident(ATTRIBUTE));
                    let message = format!("{}.{}: {err}", input.ident, ident);
                    push(match attr {
                        Some(attr) => Error::new_spanned(attr, message),
                        None => Error::new_spanned(ident, message),
                    });
                }
            }
        }
        Fields::Unnamed(unnamed) => {
            for field in &unnamed.unnamed {
                if let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident(ATTRIBUTE)) {
                    push(Error::new_spanned(attr, "accessor tags need a named field"));
                }
            }
        }
        Fields::Unit => {}
    }

    match errors {
        Some(err) => Err(err),
        None => Ok(TokenStream2::new()),
    }
}
