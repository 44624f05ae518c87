//! Batch generation driver.
//!
//! A [`Generator`] runs every compilation unit of a [`Source`] through
//! scan, model and emit. Units are independent until the very end, where the
//! names they define are checked against each other; colliding units are
//! withheld and reported as `EmissionConflict`.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use roxygen::roxygen;

use crate::{
    api::{
        record::{CallSite, RawDeclaration},
        source::Source,
    },
    codegen::{
        emit_interface,
        names::rust_ident,
        registry::NameRegistry,
        types::{parse_rust_type, TypeMap, DEFAULT_OBJECT_TYPE},
        EmitConfig, GeneratedUnit,
    },
    model::{build_interface, types::identifier_regex, TypeName},
    scanner::{scan_unit, ScanConfig, ScannedUnit},
    Error, Result, RustEdition,
};

/// Default marker annotation
pub const DEFAULT_ANNOTATION: &str = "NativeMethods";
/// Default accessor suffix, `Sample` gets `SampleJni`
pub const DEFAULT_ACCESSOR_SUFFIX: &str = "Jni";

/// Builder for [`Generator`]
///
/// # Example
///
/// ```
/// let generator = native_bindgen::Generator::builder()
///     .annotation("NativeMethods")
///     .accessor_suffix("Jni")
///     .edition(native_bindgen::RustEdition::Edition2021)
///     .object_type("jni_sys::jobject")
///     .map_type("java.lang.String", "jni_sys::jstring")
///     .jobs(4)
///     .build()
///     .unwrap();
/// # let _ = generator;
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    annotation: String,
    accessor_suffix: String,
    edition: RustEdition,
    object_type: String,
    type_overrides: Vec<(String, String)>,
    testing_hooks: bool,
    jobs: usize,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            annotation: DEFAULT_ANNOTATION.to_string(),
            accessor_suffix: DEFAULT_ACCESSOR_SUFFIX.to_string(),
            edition: RustEdition::default(),
            object_type: DEFAULT_OBJECT_TYPE.to_string(),
            type_overrides: Vec::new(),
            testing_hooks: true,
            jobs: 1,
            cancel_flag: None,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker annotation
    ///
    /// Matched by simple name; a qualified name such as
    /// `org.example.NativeMethods` is reduced to its last segment.
    #[roxygen]
    pub fn annotation<S: AsRef<str>>(
        mut self,
        /// Annotation name, without the `@`
        name: S,
    ) -> Self {
        self.annotation = name.as_ref().to_string();
        self
    }

    /// Set the suffix appended to the holder name to form the accessor name
    #[roxygen]
    pub fn accessor_suffix<S: AsRef<str>>(
        mut self,
        /// Non-empty identifier suffix, `Jni` by default
        suffix: S,
    ) -> Self {
        self.accessor_suffix = suffix.as_ref().to_string();
        self
    }

    /// Set the Rust edition of the generated code
    ///
    /// Edition 2024 requires `unsafe extern "C"` blocks. Defaults to 2024 when
    /// the compiler building this crate supports it.
    #[roxygen]
    pub fn edition(
        mut self,
        /// Target edition
        edition: RustEdition,
    ) -> Self {
        self.edition = edition;
        self
    }

    /// Set the Rust type used for every reference type without a mapping
    #[roxygen]
    pub fn object_type<S: AsRef<str>>(
        mut self,
        /// Rust type, e.g. `jni_sys::jobject`
        rust_type: S,
    ) -> Self {
        self.object_type = rust_type.as_ref().to_string();
        self
    }

    /// Map one Java type to a Rust type
    ///
    /// The Java type is matched after resolution, so reference types must be
    /// given fully qualified (`java.lang.String`, `int[]`). Mappings apply to
    /// primitives too. A later mapping of the same type replaces an earlier one.
    #[roxygen]
    pub fn map_type<J: AsRef<str>, R: AsRef<str>>(
        mut self,
        /// Java type as it would be resolved
        java_type: J,
        /// Rust type to use in signatures
        rust_type: R,
    ) -> Self {
        self.type_overrides
            .push((java_type.as_ref().to_string(), rust_type.as_ref().to_string()));
        self
    }

    /// Enable or disable the generated `set_for_testing` hook
    #[roxygen]
    pub fn testing_hooks(
        mut self,
        /// `true` by default
        enabled: bool,
    ) -> Self {
        self.testing_hooks = enabled;
        self
    }

    /// Set the number of worker threads
    #[roxygen]
    pub fn jobs(
        mut self,
        /// At least 1
        jobs: usize,
    ) -> Self {
        self.jobs = jobs;
        self
    }

    /// Share a cancellation flag with the generator
    ///
    /// Once the flag is set no new unit is started; units already in progress
    /// complete and the rest are counted as skipped in the report.
    #[roxygen]
    pub fn cancel_flag(
        mut self,
        /// Flag set by the caller to stop the run
        flag: Arc<AtomicBool>,
    ) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Validate the configuration and build the [`Generator`]
    pub fn build(self) -> Result<Generator> {
        let annotation = self
            .annotation
            .trim()
            .trim_start_matches('@')
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        if !identifier_regex().is_match(&annotation) {
            return Err(Error::InvalidConfig(format!(
                "`{}` is not a valid annotation name",
                self.annotation
            )));
        }

        // The suffix follows an identifier, so it may start with a digit
        if self.accessor_suffix.is_empty()
            || !identifier_regex().is_match(&format!("_{}", self.accessor_suffix))
        {
            return Err(Error::InvalidConfig(format!(
                "`{}` is not a valid accessor suffix",
                self.accessor_suffix
            )));
        }

        if self.jobs == 0 {
            return Err(Error::InvalidConfig("jobs must be at least 1".to_string()));
        }

        parse_rust_type(&self.object_type)?;
        let mut overrides = BTreeMap::new();
        for (java, rust) in self.type_overrides {
            let (name, array_dims) = TypeName::parse(&java).map_err(|reason| {
                Error::InvalidConfig(format!("cannot map Java type `{java}`: {reason}"))
            })?;
            parse_rust_type(&rust)?;
            overrides.insert(TypeName { name, array_dims }.to_string(), rust);
        }

        Ok(Generator {
            annotation,
            emit: EmitConfig {
                accessor_suffix: self.accessor_suffix,
                edition: self.edition,
                types: TypeMap::new(self.object_type, overrides),
                testing_hooks: self.testing_hooks,
            },
            jobs: self.jobs,
            cancel_flag: self.cancel_flag,
        })
    }
}

/// Progress of one declaration through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitStage {
    Scanned,
    Modeled,
    Emitted,
}

impl std::fmt::Display for UnitStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UnitStage::Scanned => "scanned",
            UnitStage::Modeled => "modeled",
            UnitStage::Emitted => "emitted",
        })
    }
}

/// One piece of work handed to a worker
enum WorkItem<'a> {
    Text { name: &'a str, text: &'a str },
    Declaration(&'a RawDeclaration),
}

/// What a worker produced for one [`WorkItem`]
struct WorkOutcome {
    units: Vec<Result<GeneratedUnit>>,
    call_sites: Vec<CallSite>,
}

/// Configured generator, see [`Builder`]
#[derive(Debug, Clone)]
pub struct Generator {
    annotation: String,
    emit: EmitConfig,
    jobs: usize,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl Generator {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Scan one compilation unit without modeling or emitting anything
    ///
    /// Useful to export declarations with [`to_jsonl`](crate::to_jsonl) and
    /// generate from them later.
    pub fn scan(&self, name: &str, text: &str) -> ScannedUnit {
        scan_unit(name, text, self.scan_config())
    }

    /// Generate accessors for every annotated interface in `source`
    #[tracing::instrument(skip_all, fields(units = source.len(), jobs = self.jobs))]
    pub fn generate(&self, source: &Source) -> GenerationReport {
        let items = source
            .units()
            .map(|(name, text)| WorkItem::Text { name, text })
            .collect::<Vec<_>>();
        self.run(&items, |_| {})
    }

    /// Generate accessors from declarations scanned earlier
    #[tracing::instrument(skip_all, fields(declarations = declarations.len(), jobs = self.jobs))]
    pub fn generate_declarations(&self, declarations: &[RawDeclaration]) -> GenerationReport {
        let items = declarations
            .iter()
            .map(WorkItem::Declaration)
            .collect::<Vec<_>>();
        self.run(&items, |_| {})
    }

    fn scan_config(&self) -> ScanConfig<'_> {
        ScanConfig {
            annotation: &self.annotation,
            accessor_suffix: &self.emit.accessor_suffix,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Process `items` on the worker pool, calling `item_done` with the index
    /// of every item once its outcome is stored
    fn run(&self, items: &[WorkItem<'_>], item_done: impl Fn(usize) + Sync) -> GenerationReport {
        let registry = NameRegistry::new();
        let next = AtomicUsize::new(0);
        let outcomes: Mutex<Vec<Option<WorkOutcome>>> =
            Mutex::new(std::iter::repeat_with(|| None).take(items.len()).collect());

        let workers = self.jobs.min(items.len()).max(1);
        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    if self.is_cancelled() {
                        break;
                    }
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(item) = items.get(index) else {
                        break;
                    };
                    let outcome = self.process(index, item, &registry);
                    outcomes.lock().unwrap_or_else(PoisonError::into_inner)[index] = Some(outcome);
                    item_done(index);
                });
            }
        });

        let outcomes = outcomes.into_inner().unwrap_or_else(PoisonError::into_inner);
        let skipped = outcomes.iter().filter(|o| o.is_none()).count();
        if skipped > 0 {
            tracing::warn!(skipped, "run cancelled");
        }

        let mut withheld = BTreeSet::new();
        let mut conflicts = Vec::new();
        for (units, error) in registry.into_conflicts() {
            tracing::debug!(%error, "withholding conflicting units");
            withheld.extend(units);
            conflicts.push(error);
        }

        let mut report = GenerationReport {
            skipped,
            ..Default::default()
        };
        for (index, outcome) in outcomes.into_iter().enumerate() {
            let Some(outcome) = outcome else {
                continue;
            };
            report.call_sites.extend(outcome.call_sites);
            for (position, unit) in outcome.units.into_iter().enumerate() {
                match unit {
                    Ok(_) if withheld.contains(&(index, position)) => {}
                    Ok(unit) => report.units.push(unit),
                    Err(e) => report.errors.push(e),
                }
            }
        }
        report.errors.extend(conflicts);

        for call_site in report.dangling_call_sites() {
            tracing::warn!(
                %call_site,
                "call site references a method the accessor does not expose"
            );
        }
        tracing::debug!(
            units = report.units.len(),
            errors = report.errors.len(),
            "generation finished"
        );
        report
    }

    /// Run one work item through the pipeline and claim the names it emits
    fn process(&self, index: usize, item: &WorkItem<'_>, registry: &NameRegistry) -> WorkOutcome {
        let (declarations, call_sites) = match item {
            WorkItem::Text { name, text } => {
                let scanned = self.scan(name, text);
                (scanned.declarations, scanned.call_sites)
            }
            WorkItem::Declaration(raw) => (vec![Ok((*raw).clone())], Vec::new()),
        };

        let units = declarations
            .into_iter()
            .enumerate()
            .map(|(position, declaration)| -> Result<GeneratedUnit> {
                let raw = declaration?;
                tracing::debug!(
                    interface = %raw.qualified_name,
                    stage = %UnitStage::Scanned,
                    "unit advanced"
                );
                let interface = build_interface(&raw)?;
                tracing::debug!(
                    interface = %interface.qualified_name,
                    stage = %UnitStage::Modeled,
                    "unit advanced"
                );
                let unit = emit_interface(&interface, &self.emit)?;
                registry.claim((index, position), &unit.origin(), unit.global_names());
                tracing::debug!(
                    interface = %unit.interface(),
                    stage = %UnitStage::Emitted,
                    "unit advanced"
                );
                Ok(unit)
            })
            .collect();
        WorkOutcome { units, call_sites }
    }
}

/// Result of a generation run
///
/// Units and errors are ordered by input position; emission conflicts are
/// reported after the per-unit errors, sorted by the conflicting name.
#[derive(Debug, Default)]
pub struct GenerationReport {
    units: Vec<GeneratedUnit>,
    errors: Vec<Error>,
    call_sites: Vec<CallSite>,
    skipped: usize,
}

impl GenerationReport {
    pub fn units(&self) -> &[GeneratedUnit] {
        &self.units
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Accessor call sites found in the scanned text
    pub fn call_sites(&self) -> &[CallSite] {
        &self.call_sites
    }

    /// Number of work items not processed because the run was cancelled
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// `false` when the run was cancelled before every item was processed
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }

    /// Call sites naming a generated accessor but a method it does not expose
    pub fn dangling_call_sites(&self) -> Vec<&CallSite> {
        let exposed: HashMap<&str, HashSet<&str>> = self
            .units
            .iter()
            .map(|unit| {
                (
                    unit.accessor(),
                    unit.methods().iter().map(String::as_str).collect(),
                )
            })
            .collect();
        self.call_sites
            .iter()
            .filter(|call_site| {
                exposed.get(call_site.accessor.as_str()).is_some_and(|methods| {
                    !methods.contains(rust_ident(&call_site.method).to_string().as_str())
                })
            })
            .collect()
    }

    /// Concatenated text of all units, in order
    pub fn text(&self) -> String {
        self.units.iter().map(GeneratedUnit::text).collect::<Vec<_>>().join("\n")
    }

    /// The generated units, or every error of the run
    pub fn into_result(self) -> std::result::Result<Vec<GeneratedUnit>, Vec<Error>> {
        if self.errors.is_empty() {
            Ok(self.units)
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
package org.example;

class Sample {
    @NativeMethods("module")
    interface Natives {
        void foo();
        boolean bar(int x);
    }

    void run() {
        SampleJni.get().foo();
        SampleJni.get().baz(1);
        OtherJni.get().qux();
    }
}
"#;

    fn generator() -> Generator {
        Generator::builder()
            .edition(RustEdition::Edition2021)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_validation() {
        assert!(matches!(
            Generator::builder().accessor_suffix("").build(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Generator::builder().accessor_suffix("J-ni").build(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Generator::builder().annotation("Native Methods").build(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Generator::builder().jobs(0).build(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Generator::builder().object_type("not a type").build(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Generator::builder().map_type("List<", "u8").build(),
            Err(Error::InvalidConfig(_))
        ));

        let generator = Generator::builder()
            .annotation("@org.example.NativeMethods")
            .accessor_suffix("2")
            .build()
            .unwrap();
        assert_eq!(generator.annotation, "NativeMethods");
    }

    #[test]
    fn test_generate_sample() {
        let report = generator().generate(&Source::new().unit("Sample.java", SAMPLE));
        assert!(report.is_success(), "{:?}", report.errors());
        assert!(report.is_complete());
        assert_eq!(report.units().len(), 1);
        assert_eq!(report.units()[0].methods(), ["foo", "bar"]);
        assert_eq!(report.call_sites().len(), 3);

        let dangling = report.dangling_call_sites();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].method, "baz");
    }

    #[test]
    fn test_type_mapping_from_builder() {
        let generator = Generator::builder()
            .edition(RustEdition::Edition2021)
            .object_type("jobject")
            .map_type("int", "jint")
            .build()
            .unwrap();
        let report = generator.generate(&Source::new().unit("Sample.java", SAMPLE));
        let text = report.text();
        assert!(text.contains("pub fn bar(&self, x: jint) -> bool"), "{text}");
    }

    #[test]
    fn test_cancelled_before_start() {
        let flag = Arc::new(AtomicBool::new(true));
        let generator = Generator::builder().cancel_flag(flag).build().unwrap();
        let report = generator.generate(
            &Source::new()
                .unit("Sample.java", SAMPLE)
                .unit("Other.java", SAMPLE),
        );
        assert_eq!(report.skipped(), 2);
        assert!(!report.is_complete());
        assert!(report.units().is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_cancelled_mid_run() {
        let flag = Arc::new(AtomicBool::new(false));
        let generator = Generator::builder()
            .edition(RustEdition::Edition2021)
            .jobs(1)
            .cancel_flag(flag.clone())
            .build()
            .unwrap();
        let texts = ["First", "Second", "Third"].map(|class| SAMPLE.replace("Sample", class));
        let items = texts
            .iter()
            .map(|text| WorkItem::Text { name: "Sample.java", text: text.as_str() })
            .collect::<Vec<_>>();

        let report = generator.run(&items, |index| {
            if index == 0 {
                flag.store(true, Ordering::SeqCst);
            }
        });
        assert_eq!(report.skipped(), 2);
        assert!(!report.is_complete());
        assert!(report.is_success());
        let accessors = report
            .units()
            .iter()
            .map(|unit| unit.accessor())
            .collect::<Vec<_>>();
        assert_eq!(accessors, ["FirstJni"]);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(UnitStage::Scanned.to_string(), "scanned");
        assert_eq!(UnitStage::Modeled.to_string(), "modeled");
        assert_eq!(UnitStage::Emitted.to_string(), "emitted");
    }
}
