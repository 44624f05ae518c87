use roxygen::roxygen;

/// Set of compilation units to generate bindings from.
///
/// Units are kept in insertion order, which is also the order of units and
/// errors in the resulting [`GenerationReport`](crate::GenerationReport).
/// Reading files is left to the caller:
///
/// ```
/// let source = native_bindgen::Source::new()
///     .unit("Sample.java", "package org.example; class Sample {}");
/// assert_eq!(source.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Source {
    units: Vec<(String, String)>,
}

impl Source {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a compilation unit
    #[roxygen]
    pub fn unit(
        mut self,
        /// Name reported in source locations, usually the file path
        name: impl Into<String>,
        /// Java-syntax source text
        text: impl Into<String>,
    ) -> Self {
        self.push(name, text);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.units.push((name.into(), text.into()));
    }

    /// Units as `(name, text)` pairs, in insertion order
    pub fn units(&self) -> impl Iterator<Item = (&str, &str)> {
        self.units
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for Source {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        Self {
            units: iter
                .into_iter()
                .map(|(name, text)| (name.into(), text.into()))
                .collect(),
        }
    }
}
