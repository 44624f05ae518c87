use crate::codegen::GeneratedUnit;

/// Collector merging generated units into one Rust source file.
///
/// `Destination` is the target of a `collect()` over generated units; the
/// merged file is rendered with `prettyplease`. Writing it somewhere (e.g. to
/// `OUT_DIR` for `include!`) is up to the caller:
///
/// ```
/// use native_bindgen::{collect::Destination, Generator, Source};
///
/// let source = Source::new().unit(
///     "Sample.java",
///     r#"class Sample { @NativeMethods("module") interface Natives { void foo(); } }"#,
/// );
/// let report = Generator::builder().build().unwrap().generate(&source);
/// let destination: Destination = report.units().iter().collect();
/// let code = destination.to_source_string().unwrap();
/// assert!(code.contains("pub struct SampleJni"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Destination {
    units: Vec<GeneratedUnit>,
}

impl FromIterator<GeneratedUnit> for Destination {
    fn from_iter<T: IntoIterator<Item = GeneratedUnit>>(iter: T) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a GeneratedUnit> for Destination {
    fn from_iter<T: IntoIterator<Item = &'a GeneratedUnit>>(iter: T) -> Self {
        iter.into_iter().cloned().collect()
    }
}

impl Destination {
    /// Accessor types in the file, in collection order
    pub fn accessors(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(GeneratedUnit::accessor)
    }

    /// All items of all units as one file
    pub fn to_file(&self) -> syn::Result<syn::File> {
        let mut items = Vec::new();
        for unit in &self.units {
            items.extend(unit.to_file()?.items);
        }
        Ok(syn::File {
            shebang: None,
            attrs: vec![],
            items,
        })
    }

    /// The merged file formatted with `prettyplease`
    pub fn to_source_string(&self) -> syn::Result<String> {
        Ok(prettyplease::unparse(&self.to_file()?))
    }
}
