use std::sync::{atomic::AtomicBool, Arc};

use native_bindgen::{
    collect::Destination, from_jsonl, to_jsonl, Error, Generator, RustEdition, Source,
};

const FIXTURE: &str = include_str!("fixtures/SampleForAnnotationProcessor.java");

fn generator() -> Generator {
    Generator::builder()
        .edition(RustEdition::Edition2021)
        .build()
        .unwrap()
}

fn holder(package: &str, class: &str, tag: &str, methods: &str) -> String {
    [
        format!("package {package};"),
        String::new(),
        format!("class {class} {{"),
        format!("    @NativeMethods(\"{tag}\")"),
        "    interface Natives {".to_string(),
        format!("        {methods}"),
        "    }".to_string(),
        "}".to_string(),
        String::new(),
    ]
    .join("\n")
}

fn generate_fixture(generator: &Generator) -> native_bindgen::GenerationReport {
    generator.generate(&Source::new().unit("SampleForAnnotationProcessor.java", FIXTURE))
}

#[test]
fn test_fixture_end_to_end() {
    let report = generate_fixture(&generator());
    assert!(report.is_success(), "{:?}", report.errors());
    assert_eq!(report.units().len(), 1);

    let unit = &report.units()[0];
    assert_eq!(
        unit.interface(),
        "org.chromium.example.SampleForAnnotationProcessor.Natives"
    );
    assert_eq!(unit.accessor(), "SampleForAnnotationProcessorJni");
    assert_eq!(unit.tag(), "module");
    assert_eq!(unit.methods(), ["foo", "bar", "names", "echo", "sample"]);
    assert_eq!(
        unit.native_symbols()[..2],
        [
            "Java_module_org_chromium_example_SampleForAnnotationProcessor_Natives_foo",
            "Java_module_org_chromium_example_SampleForAnnotationProcessor_Natives_bar",
        ]
    );
    assert_eq!(unit.source_location().line, 14);

    let text = unit.text();
    assert!(text.contains("pub fn foo(&self)"));
    assert!(text.contains("pub fn bar(&self, x: i32) -> bool"));
    for fragment in ["b: i8", "c: u16", "s: i16", "f: f32", "rest: *mut ::core::ffi::c_void"] {
        assert!(text.contains(fragment), "missing `{fragment}` in\n{text}");
    }
    let foo = text.find("pub fn foo(").unwrap();
    let bar = text.find("pub fn bar(").unwrap();
    let names = text.find("pub fn names(").unwrap();
    assert!(foo < bar && bar < names);

    // The string literal is not a call site
    assert_eq!(report.call_sites().len(), 2);
    assert!(report.dangling_call_sites().is_empty());
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let source = Source::new().unit("SampleForAnnotationProcessor.java", FIXTURE);
    let first = generator().generate(&source).text();
    let second = generator().generate(&source).text();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_worker_count_does_not_change_output() {
    let source: Source = (0..12)
        .map(|i| {
            let class = format!("Holder{i}");
            let text = holder("org.example", &class, "module", "void foo(); int bar(long x);");
            (format!("{class}.java"), text)
        })
        .collect();
    let sequential = generator().generate(&source);
    let parallel = Generator::builder()
        .edition(RustEdition::Edition2021)
        .jobs(4)
        .build()
        .unwrap()
        .generate(&source);

    assert_eq!(sequential.units().len(), 12);
    assert_eq!(sequential.text(), parallel.text());
    let accessors = parallel
        .units()
        .iter()
        .map(|unit| unit.accessor().to_string())
        .collect::<Vec<_>>();
    let expected = (0..12).map(|i| format!("Holder{i}Jni")).collect::<Vec<_>>();
    assert_eq!(accessors, expected);
}

#[test]
fn test_duplicate_method_yields_no_unit() {
    let text = holder("p", "Dup", "", "void foo(); int foo(int x);");
    let report = generator().generate(&Source::new().unit("Dup.java", text));
    assert!(report.units().is_empty());
    assert_eq!(report.errors().len(), 1);
    let Error::DuplicateMethod {
        method,
        interface,
        source_location,
        first,
    } = &report.errors()[0]
    else {
        panic!("expected DuplicateMethod, got {}", report.errors()[0]);
    };
    assert_eq!(method, "foo");
    assert_eq!(interface, "p.Dup.Natives");
    assert_eq!(first.line, 6);
    assert_eq!(source_location.line, 6);
    assert!(first.column < source_location.column);
}

#[test]
fn test_colliding_accessors_are_withheld() {
    let source = Source::new()
        .unit("a/Sample.java", holder("a", "Sample", "", "void foo();"))
        .unit("b/Sample.java", holder("b", "Sample", "", "void bar();"))
        .unit("c/Other.java", holder("c", "Other", "", "void baz();"));
    let report = generator().generate(&source);

    assert_eq!(report.units().len(), 1);
    assert_eq!(report.units()[0].accessor(), "OtherJni");

    // The static instance collides too, but is not reported separately
    let [Error::EmissionConflict { name, origins }] = report.errors() else {
        panic!("expected one conflict, got {:?}", report.errors());
    };
    assert_eq!(name, "SampleJni");
    let interfaces = origins
        .iter()
        .map(|o| o.interface.as_str())
        .collect::<Vec<_>>();
    assert_eq!(interfaces, ["a.Sample.Natives", "b.Sample.Natives"]);
}

#[test]
fn test_two_interfaces_in_one_class_conflict_once() {
    let text = r#"
package p;
class Holder {
    @NativeMethods("x")
    interface First { void a(); }
    @NativeMethods("x")
    interface Second { void b(); }
}
"#;
    let report = generator().generate(&Source::new().unit("Holder.java", text));
    assert!(report.units().is_empty());
    let [Error::EmissionConflict { name, origins }] = report.errors() else {
        panic!("expected one conflict, got {:?}", report.errors());
    };
    assert_eq!(name, "HolderJni");
    assert_eq!(origins.len(), 2);
}

#[test]
fn test_annotated_and_c_style_array_parameters() {
    let methods = "void a(@IntRange(from = 0, to = 10) int x, @SuppressWarnings({\"a\"}) int y); \
                   void b(int values[], String names[][]);";
    let generator = Generator::builder()
        .edition(RustEdition::Edition2021)
        .map_type("int[]", "*mut i32")
        .build()
        .unwrap();
    let report = generator.generate(&Source::new().unit("A.java", holder("p", "A", "", methods)));
    assert!(report.is_success(), "{:?}", report.errors());
    assert_eq!(report.units().len(), 1);

    let text = report.units()[0].text();
    assert!(text.contains("pub fn a(&self, x: i32, y: i32)"), "{text}");
    assert!(
        text.contains("pub fn b(&self, values: *mut i32, names: *mut ::core::ffi::c_void)"),
        "{text}"
    );
}

#[test]
fn test_annotation_on_class_yields_no_unit() {
    let text = r#"
package p;
class Holder {
    @NativeMethods("module")
    static class Natives {
        native void foo();
    }
}
"#;
    let report = generator().generate(&Source::new().unit("Holder.java", text));
    assert!(report.units().is_empty());
    assert!(matches!(
        report.errors(),
        [Error::MalformedDeclaration { .. }]
    ));
    assert!(report.into_result().is_err());
}

#[test]
fn test_errors_do_not_stop_other_units() {
    let source = Source::new()
        .unit("Bad.java", holder("p", "Bad", "", "void foo(Strin<g x);"))
        .unit("Good.java", holder("p", "Good", "", "void foo();"));
    let report = generator().generate(&source);
    assert_eq!(report.units().len(), 1);
    assert_eq!(report.units()[0].accessor(), "GoodJni");
    assert!(matches!(
        report.errors(),
        [Error::UnresolvedType { .. }]
    ));
}

#[test]
fn test_cancelled_run_skips_units() {
    let flag = Arc::new(AtomicBool::new(true));
    let generator = Generator::builder()
        .jobs(2)
        .cancel_flag(flag)
        .build()
        .unwrap();
    let report = generate_fixture(&generator);
    assert_eq!(report.skipped(), 1);
    assert!(!report.is_complete());
    assert!(report.units().is_empty());
}

#[test]
fn test_generate_from_exported_declarations() {
    let generator = generator();
    let scanned = generator.scan("SampleForAnnotationProcessor.java", FIXTURE);
    let declarations = scanned
        .declarations
        .iter()
        .map(|d| d.as_ref().unwrap())
        .collect::<Vec<_>>();
    let jsonl = to_jsonl(declarations).unwrap();
    let restored = from_jsonl(&jsonl).unwrap();

    let from_records = generator.generate_declarations(&restored);
    let from_text = generate_fixture(&generator);
    assert_eq!(from_records.text(), from_text.text());
    assert!(from_records.call_sites().is_empty());
}

#[test]
fn test_destination_merges_units() {
    let source = Source::new()
        .unit("A.java", holder("p", "A", "x", "void foo();"))
        .unit("B.java", holder("p", "B", "x", "void foo();"));
    let report = generator().generate(&source);
    let destination: Destination = report.into_result().unwrap().into_iter().collect();
    assert_eq!(destination.accessors().collect::<Vec<_>>(), ["AJni", "BJni"]);

    let code = destination.to_source_string().unwrap();
    assert!(code.contains("fn Java_x_p_A_Natives_foo()"));
    assert!(code.contains("fn Java_x_p_B_Natives_foo()"));
    assert_eq!(destination.to_file().unwrap().items.len(), 8);
}

#[test]
fn test_edition_2024_and_disabled_hooks() {
    let generator = Generator::builder()
        .edition(RustEdition::Edition2024)
        .testing_hooks(false)
        .build()
        .unwrap();
    let source = Source::new().unit("A.java", holder("p", "A", "", "void foo();"));
    let report = generator.generate(&source);
    let text = report.text();
    assert!(text.contains("unsafe extern \"C\" {"));
    assert!(!text.contains("set_for_testing"));
}
