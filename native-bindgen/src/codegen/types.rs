//! Mapping of Java types to the Rust types used in generated signatures.

use std::collections::BTreeMap;

use crate::{model::TypeName, Error, Result};

/// Handle type used for every reference type without an explicit mapping
pub const DEFAULT_OBJECT_TYPE: &str = "*mut ::core::ffi::c_void";

/// Resolved Rust types for Java types.
///
/// Rust types are kept as text: `syn` values are not `Send`, and the map is
/// shared by all worker threads. Every entry is checked with [`parse_rust_type`]
/// before it gets here.
#[derive(Debug, Clone)]
pub(crate) struct TypeMap {
    object_type: String,
    /// Keyed by the Java type as printed by `TypeName`'s `Display`
    overrides: BTreeMap<String, String>,
}

impl TypeMap {
    pub fn new(object_type: impl Into<String>, overrides: BTreeMap<String, String>) -> Self {
        Self {
            object_type: object_type.into(),
            overrides,
        }
    }

    /// Rust type of a parameter or return value.
    ///
    /// Overrides win over the primitive table, so `int` can be remapped too.
    pub fn rust_type(&self, ty: &TypeName) -> Result<syn::Type> {
        if let Some(mapped) = self.overrides.get(&ty.to_string()) {
            return parse_rust_type(mapped);
        }
        if ty.is_primitive() {
            if let Some(primitive) = primitive_type(&ty.name) {
                return Ok(primitive);
            }
        }
        parse_rust_type(&self.object_type)
    }
}

pub(crate) fn parse_rust_type(text: &str) -> Result<syn::Type> {
    syn::parse_str(text)
        .map_err(|e| Error::InvalidConfig(format!("`{text}` is not a Rust type: {e}")))
}

fn primitive_type(name: &str) -> Option<syn::Type> {
    Some(match name {
        "boolean" => syn::parse_quote!(bool),
        "byte" => syn::parse_quote!(i8),
        "char" => syn::parse_quote!(u16),
        "short" => syn::parse_quote!(i16),
        "int" => syn::parse_quote!(i32),
        "long" => syn::parse_quote!(i64),
        "float" => syn::parse_quote!(f32),
        "double" => syn::parse_quote!(f64),
        _ => return None,
    })
}
