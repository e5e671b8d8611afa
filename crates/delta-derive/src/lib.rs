//! Derive macro for the Delta member accessor capability.
//!
//! `#[derive(Members)]` generates, for a struct with named fields:
//!
//! - a `static` member table built once per type, exposed through
//!   `delta_types::Members::type_descriptor`;
//! - a `delta_types::MemberAccessor` impl whose `try_get` / `try_set` match
//!   member names to fields and convert values through serde.
//!
//! # Attributes
//!
//! - `#[members(name = "Person")]` on the struct overrides the type name.
//! - `#[member(rename = "Name")]` on a field overrides the member name.
//! - `#[member(readonly)]` exposes a field for reading only.
//! - `#[member(skip)]` hides a field from the accessor entirely.
//!
//! # Example
//!
//! ```ignore
//! use delta_derive::Members;
//!
//! #[derive(Members)]
//! struct Person {
//!     #[member(rename = "Name")]
//!     name: String,
//!     #[member(readonly)]
//!     id: u64,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod members;

#[proc_macro_derive(Members, attributes(member, members))]
pub fn derive_members(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    members::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
