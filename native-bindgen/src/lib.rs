//! # native-bindgen
//!
//! Generates the Rust side of native method bindings declared in Java-syntax
//! sources.
//!
//! ## Problem
//!
//! Java code calling into native code often declares the native surface as a
//! nested interface marked with an annotation, and calls it through a generated
//! accessor:
//!
//! ```java
//! package org.example;
//!
//! class Sample {
//!     @NativeMethods("module")
//!     interface Natives {
//!         void foo();
//!         boolean bar(int x);
//!     }
//!
//!     void run() {
//!         SampleJni.get().foo();
//!     }
//! }
//! ```
//!
//! Writing the matching accessor by hand, and keeping it in sync with the
//! interface, is tedious and error-prone.
//!
//! ## Solution
//!
//! `native-bindgen` scans the sources for annotated interfaces, resolves their
//! method signatures and emits, for each interface, an accessor type named after
//! the enclosing class: a table of `extern "C"` function pointers, a lazily
//! initialised shared instance reachable through `get()`, one delegating method
//! per declared method and the `extern "C"` declarations of the native symbols.
//!
//! Generation is pure: sources come in as text, code goes out as text.
//!
//! ## Usage example
//!
//! ```rust
//! use native_bindgen::{collect::Destination, Generator, RustEdition, Source};
//!
//! let source = Source::new().unit(
//!     "org/example/Sample.java",
//!     r#"
//!     package org.example;
//!     class Sample {
//!         @NativeMethods("module")
//!         interface Natives {
//!             void foo();
//!             boolean bar(int x);
//!         }
//!     }
//!     "#,
//! );
//!
//! let generator = Generator::builder()
//!     .edition(RustEdition::Edition2021)
//!     .build()
//!     .unwrap();
//! let report = generator.generate(&source);
//! assert!(report.is_success());
//!
//! let unit = &report.units()[0];
//! assert_eq!(unit.accessor(), "SampleJni");
//! assert_eq!(unit.methods(), ["foo", "bar"]);
//! assert_eq!(unit.native_symbols()[0], "Java_module_org_example_Sample_Natives_foo");
//!
//! // Merge all accessors into one file, e.g. to be written to OUT_DIR
//! let code = report
//!     .units()
//!     .iter()
//!     .collect::<Destination>()
//!     .to_source_string()
//!     .unwrap();
//! assert!(code.contains("pub fn bar(&self, x: i32) -> bool"));
//! ```
//!
//! Errors never abort a run: every interface that fails to scan, resolve or
//! emit is reported in [`GenerationReport::errors`] and the others are still
//! generated.

pub(crate) mod api;
pub(crate) mod codegen;
pub(crate) mod error;
pub(crate) mod model;
pub(crate) mod scanner;
pub(crate) mod utils;

pub use crate::api::generator::{
    Builder, GenerationReport, Generator, DEFAULT_ACCESSOR_SUFFIX, DEFAULT_ANNOTATION,
};
pub use crate::api::record::{CallSite, RawDeclaration, RawMethod, RawParam, SourceLocation};
pub use crate::api::source::Source;
pub use crate::codegen::types::DEFAULT_OBJECT_TYPE;
pub use crate::codegen::GeneratedUnit;
pub use crate::error::{Error, Origin, Result};
pub use crate::model::{build_interface, BindingInterface, MethodSignature, Parameter, TypeName};
pub use crate::scanner::ScannedUnit;
pub use crate::utils::edition::RustEdition;
pub use crate::utils::jsonl::{from_jsonl, to_jsonl};

/// Collectors for generated units produced by `collect`
pub mod collect {
    pub use crate::api::collect::destination::Destination;
}
