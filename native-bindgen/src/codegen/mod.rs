//! Emission of Rust accessor code for modeled interfaces.
//!
//! For an interface `Natives` nested in `Sample` and tagged `module` the emitter
//! produces, in this order:
//!
//! - `pub struct SampleJni` with one `unsafe extern "C" fn` field per method,
//!   the registration table of the binding;
//! - a `static SAMPLE_JNI_INSTANCE: OnceLock<SampleJni>` holding the shared table;
//! - `impl SampleJni` with `get()`, optionally `set_for_testing()`, and one
//!   delegating method per declared method, in declaration order;
//! - the `extern "C"` block declaring the native functions the table binds to.

pub(crate) mod names;
pub(crate) mod registry;
pub(crate) mod types;

use std::collections::{HashMap, HashSet};

use proc_macro2::{Span, TokenStream};
use quote::quote;

use crate::{
    error::{Origin, Result},
    model::{BindingInterface, MethodSignature},
    Error, RustEdition, SourceLocation,
};
use names::{escape_identifier, native_symbol, rust_ident, screaming_snake};
use types::TypeMap;

/// Name of the accessor function
const GET: &str = "get";
/// Name of the test hook installing a replacement table
const SET_FOR_TESTING: &str = "set_for_testing";

/// Emitter settings, derived from the generator builder
#[derive(Debug, Clone)]
pub(crate) struct EmitConfig {
    pub accessor_suffix: String,
    pub edition: RustEdition,
    pub types: TypeMap,
    pub testing_hooks: bool,
}

/// Generated code for one [`BindingInterface`]
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    interface: String,
    accessor: String,
    static_name: String,
    tag: String,
    methods: Vec<String>,
    native_symbols: Vec<String>,
    text: String,
    source_location: SourceLocation,
}

impl GeneratedUnit {
    /// Qualified name of the interface the unit was generated from
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Name of the generated accessor type
    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Delegating methods as emitted, in declaration order
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Native function names, parallel to [`methods`](Self::methods)
    pub fn native_symbols(&self) -> &[String] {
        &self.native_symbols
    }

    /// Parse the generated text back into items
    pub fn to_file(&self) -> syn::Result<syn::File> {
        syn::parse_file(&self.text)
    }

    /// Generated source text, formatted with `prettyplease`
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_location(&self) -> &SourceLocation {
        &self.source_location
    }

    pub(crate) fn origin(&self) -> Origin {
        Origin::new(&self.interface, self.source_location.clone())
    }

    /// Names this unit defines in the shared output namespace
    pub(crate) fn global_names(&self) -> Vec<String> {
        let mut names = vec![self.accessor.clone(), self.static_name.clone()];
        names.extend(self.native_symbols.iter().cloned());
        names
    }
}

/// Member conflicts inside one accessor
fn member_conflict(
    interface: &BindingInterface,
    accessor: &str,
    member: &str,
    locations: &[&SourceLocation],
) -> Error {
    Error::EmissionConflict {
        name: format!("{accessor}::{member}"),
        origins: locations
            .iter()
            .map(|location| Origin::new(&interface.qualified_name, (*location).clone()))
            .collect(),
    }
}

struct EmittedMethod {
    ident: syn::Ident,
    symbol: syn::Ident,
    params: Vec<(syn::Ident, syn::Type)>,
    output: syn::ReturnType,
    doc: String,
}

fn emit_method(
    interface: &BindingInterface,
    accessor: &str,
    method: &MethodSignature,
    config: &EmitConfig,
) -> Result<EmittedMethod> {
    let ident = rust_ident(&method.name);
    let mut seen = HashSet::new();
    let mut params = Vec::with_capacity(method.params.len());
    for param in &method.params {
        let param_ident = rust_ident(&param.name);
        if !seen.insert(param_ident.to_string()) {
            return Err(member_conflict(
                interface,
                accessor,
                &format!("{ident}({param_ident})"),
                &[&method.source_location],
            ));
        }
        params.push((param_ident, config.types.rust_type(&param.ty)?));
    }
    let output = match &method.return_type {
        None => syn::ReturnType::Default,
        Some(ty) => {
            syn::ReturnType::Type(Default::default(), Box::new(config.types.rust_type(ty)?))
        }
    };
    let symbol = native_symbol(&interface.tag, &interface.qualified_name, &method.name);
    Ok(EmittedMethod {
        ident,
        symbol: syn::Ident::new(&symbol, Span::call_site()),
        params,
        output,
        doc: format!(" Calls `{}` through the binding table.", method.descriptor()),
    })
}

/// Generate the accessor code for `interface`.
///
/// Fails with `EmissionConflict` when two members of the accessor would get
/// the same Rust name. Collisions across interfaces are the caller's concern
/// (see [`GeneratedUnit::global_names`]).
#[tracing::instrument(skip_all, fields(interface = %interface.qualified_name))]
pub(crate) fn emit_interface(
    interface: &BindingInterface,
    config: &EmitConfig,
) -> Result<GeneratedUnit> {
    let accessor_name =
        escape_identifier(&format!("{}{}", interface.holder, config.accessor_suffix));
    let accessor = rust_ident(&accessor_name);
    let accessor_name = accessor.to_string();
    let static_name = format!("{}_INSTANCE", screaming_snake(&accessor_name));
    let instance = syn::Ident::new(&static_name, Span::call_site());

    let mut reserved: HashMap<String, &SourceLocation> = HashMap::new();
    reserved.insert(GET.to_string(), &interface.source_location);
    if config.testing_hooks {
        reserved.insert(SET_FOR_TESTING.to_string(), &interface.source_location);
    }

    let mut methods = Vec::with_capacity(interface.methods.len());
    for method in &interface.methods {
        let emitted = emit_method(interface, &accessor_name, method, config)?;
        if let Some(first) = reserved.insert(emitted.ident.to_string(), &method.source_location) {
            return Err(member_conflict(
                interface,
                &accessor_name,
                &emitted.ident.to_string(),
                &[first, &method.source_location],
            ));
        }
        methods.push(emitted);
    }

    let fields = methods.iter().map(|m| {
        let ident = &m.ident;
        let doc = &m.doc;
        let types = m.params.iter().map(|(_, ty)| ty);
        let output = &m.output;
        quote! {
            #[doc = #doc]
            pub #ident: unsafe extern "C" fn(#(#types),*) #output
        }
    });
    let bindings = methods.iter().map(|m| {
        let ident = &m.ident;
        let symbol = &m.symbol;
        quote! { #ident: #symbol }
    });
    let delegates = methods.iter().map(|m| {
        let ident = &m.ident;
        let doc = &m.doc;
        let names = m.params.iter().map(|(name, _)| name);
        let args = m.params.iter().map(|(name, ty)| quote! { #name: #ty });
        let output = &m.output;
        quote! {
            #[doc = #doc]
            pub fn #ident(&self, #(#args),*) #output {
                unsafe { (self.#ident)(#(#names),*) }
            }
        }
    });
    let externs = methods.iter().map(|m| {
        let symbol = &m.symbol;
        let args = m.params.iter().map(|(name, ty)| quote! { #name: #ty });
        let output = &m.output;
        quote! { fn #symbol(#(#args),*) #output; }
    });

    let struct_doc = format!(
        " Accessor for `{}` (tag `{}`).",
        interface.qualified_name, interface.tag
    );
    let test_hook = config.testing_hooks.then(|| {
        quote! {
            /// Installs `instance` instead of the native bindings.
            ///
            /// Must run before the first call to `get`, otherwise the rejected
            /// instance is handed back.
            pub fn set_for_testing(instance: Self) -> ::core::result::Result<(), Self> {
                #instance.set(instance)
            }
        }
    });
    let extern_block: TokenStream = if methods.is_empty() {
        TokenStream::new()
    } else if config.edition == RustEdition::Edition2024 {
        quote! {
            #[allow(non_snake_case)]
            unsafe extern "C" { #(#externs)* }
        }
    } else {
        quote! {
            #[allow(non_snake_case)]
            extern "C" { #(#externs)* }
        }
    };

    let file = parse_generated(
        interface,
        quote! {
            #[doc = #struct_doc]
            #[allow(non_snake_case)]
            pub struct #accessor {
                #(#fields,)*
            }

            static #instance: ::std::sync::OnceLock<#accessor> = ::std::sync::OnceLock::new();

            #[allow(non_snake_case)]
            impl #accessor {
                /// Returns the shared instance, binding the native functions on first use.
                pub fn get() -> &'static Self {
                    #instance.get_or_init(|| Self {
                        #(#bindings,)*
                    })
                }

                #test_hook

                #(#delegates)*
            }

            #extern_block
        },
    )?;

    let text = prettyplease::unparse(&file);
    tracing::debug!(accessor = %accessor_name, methods = methods.len(), "emitted");
    Ok(GeneratedUnit {
        interface: interface.qualified_name.clone(),
        accessor: accessor_name,
        static_name,
        tag: interface.tag.clone(),
        methods: methods.iter().map(|m| m.ident.to_string()).collect(),
        native_symbols: methods.iter().map(|m| m.symbol.to_string()).collect(),
        text,
        source_location: interface.source_location.clone(),
    })
}

/// Check the emitted tokens form a file.
///
/// Scanned names are escaped before they get here, so a failure comes from a
/// configured Rust type that parses alone but not in the generated position.
fn parse_generated(interface: &BindingInterface, tokens: TokenStream) -> Result<syn::File> {
    syn::parse2(tokens).map_err(|e| {
        Error::InvalidConfig(format!(
            "generated code for `{}` does not parse: {e}",
            interface.qualified_name
        ))
    })
}
