//! Typed intermediate representation of annotated interfaces.

pub(crate) mod types;

use std::collections::HashMap;

pub use types::TypeName;

use crate::{
    api::record::{RawDeclaration, RawMethod},
    error::Result,
    Error, SourceLocation,
};

/// One annotated interface, ready for emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInterface {
    pub qualified_name: String,
    /// Simple name of the enclosing type, the accessor is named after it
    pub holder: String,
    /// Opaque grouping key taken from the annotation
    pub tag: String,
    /// Methods in declaration order
    pub methods: Vec<MethodSignature>,
    pub source_location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<Parameter>,
    /// `None` for `void`
    pub return_type: Option<TypeName>,
    pub source_location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeName,
}

impl MethodSignature {
    /// `name(T1,T2)ret`, used in logs and test diagnostics
    pub fn descriptor(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| p.ty.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let ret = self
            .return_type
            .as_ref()
            .map_or_else(|| "void".to_string(), TypeName::to_string);
        format!("{}({}){}", self.name, params, ret)
    }
}

/// Resolve a scanned declaration into a [`BindingInterface`].
#[tracing::instrument(skip_all, fields(interface = %raw.qualified_name))]
pub fn build_interface(raw: &RawDeclaration) -> Result<BindingInterface> {
    let mut seen: HashMap<&str, &SourceLocation> = HashMap::new();
    let mut methods = Vec::with_capacity(raw.methods.len());
    for method in &raw.methods {
        if let Some(first) = seen.insert(&method.name, &method.source_location) {
            return Err(Error::DuplicateMethod {
                source_location: method.source_location.clone(),
                interface: raw.qualified_name.clone(),
                method: method.name.clone(),
                first: first.clone(),
            });
        }
        methods.push(build_method(raw, method)?);
    }
    tracing::debug!(methods = methods.len(), "modeled");
    Ok(BindingInterface {
        qualified_name: raw.qualified_name.clone(),
        holder: raw.holder.clone(),
        tag: raw.tag.clone(),
        methods,
        source_location: raw.source_location.clone(),
    })
}

fn build_method(raw: &RawDeclaration, method: &RawMethod) -> Result<MethodSignature> {
    let unresolved = |location: &SourceLocation, text: &str, reason: String| {
        Error::UnresolvedType {
            source_location: location.clone(),
            interface: raw.qualified_name.clone(),
            type_text: text.to_string(),
            reason,
        }
    };

    let return_type = match method.return_type.trim() {
        "void" => None,
        text if text.contains("...") => {
            return Err(unresolved(
                &method.source_location,
                text,
                "varargs are only allowed on the last parameter".to_string(),
            ))
        }
        text => Some(
            TypeName::resolve(text, &raw.imports, &raw.package)
                .map_err(|reason| unresolved(&method.source_location, text, reason))?,
        ),
    };

    let last = method.params.len().saturating_sub(1);
    let params = method
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            if index != last && param.type_text.contains("...") {
                return Err(unresolved(
                    &param.source_location,
                    &param.type_text,
                    "varargs are only allowed on the last parameter".to_string(),
                ));
            }
            let ty = TypeName::resolve(&param.type_text, &raw.imports, &raw.package)
                .map_err(|reason| unresolved(&param.source_location, &param.type_text, reason))?;
            Ok(Parameter {
                name: param.name.clone(),
                ty,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MethodSignature {
        name: method.name.clone(),
        params,
        return_type,
        source_location: method.source_location.clone(),
    })
}
