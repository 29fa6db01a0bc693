//! End-to-end generation over a small counter library: one opaque handle
//! with a constructor, a mutator, an accessor and a destructor.

use bindforge_codegen::{generate_all, BindingGenerator, Target};
use bindforge_model::{
    Field, FunctionSignature, InterfaceModel, OwnershipKind, ParamRef, Primitive, StructDef,
    TypeRef,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn counter_model() -> InterfaceModel {
    let mut model = InterfaceModel::new("counter");
    model.add_struct(StructDef::new(
        "Counter",
        vec![Field::new("count", TypeRef::Primitive(Primitive::U32))],
    ));
    model
        .add_constructor(
            "Counter",
            vec![ParamRef::new("initial", TypeRef::Primitive(Primitive::U32))],
        )
        .add_mutator(
            "Counter",
            "count",
            vec![ParamRef::new("amount", TypeRef::Primitive(Primitive::U32))],
        )
        .add_accessor("Counter", "count", TypeRef::Primitive(Primitive::U32))
        .add_destructor("Counter");
    model
}

#[test]
fn test_c_tree_declares_all_four_symbols() {
    let generator = BindingGenerator::new(Target::C).unwrap();
    let bindings = generator.generate(&counter_model()).unwrap();

    let header = bindings.files().get("include/Counter.h").unwrap();
    assert!(header.contains("CCounter Counter_new(uint32_t initial);"));
    assert!(header.contains("void Counter_count(CCounter self, uint32_t amount);"));
    assert!(header.contains("uint32_t Counter_get_count(CCounter self);"));
    assert!(header.contains("void Counter_drop(CCounter self);"));

    let manifest = bindings.files().get("CMakeLists.txt").unwrap();
    assert!(manifest.contains("project(counter_bindings C)"));
}

#[test]
fn test_cpp_tree_wraps_the_handle_in_raii() {
    let generator = BindingGenerator::new(Target::Cpp).unwrap();
    let bindings = generator.generate(&counter_model()).unwrap();

    let header = bindings.files().get("include/Counter.hpp").unwrap();
    assert!(header.contains("class Counter {"));
    assert!(header.contains("~Counter()"));
    assert!(header.contains("Counter(const Counter&) = delete;"));
    assert!(header.contains("std::uint32_t get_count() const {"));

    let manifest = bindings.files().get("CMakeLists.txt").unwrap();
    assert!(manifest.contains("project(counter_bindings CXX)"));
}

#[test]
fn test_csharp_tree_wraps_the_handle_in_idisposable() {
    let generator = BindingGenerator::new(Target::CSharp).unwrap();
    let bindings = generator.generate(&counter_model()).unwrap();

    let class = bindings.files().get("Counter.cs").unwrap();
    assert!(class.contains("public sealed class Counter : IDisposable"));
    assert!(class.contains("public void Dispose()"));
    assert!(class.contains("CallingConvention.Cdecl"));

    let project = bindings.files().get("WordCount.csproj").is_none();
    assert!(project);
    assert!(bindings.files().contains_key("Counter.csproj"));
}

#[test]
fn test_generation_is_deterministic() {
    for target in Target::ALL {
        let generator = BindingGenerator::new(target).unwrap();
        let first = generator.generate(&counter_model()).unwrap();
        let second = generator.generate(&counter_model()).unwrap();
        assert_eq!(first, second, "{:?} output must be byte-identical", target);
    }
}

#[test]
fn test_owned_string_gets_a_distinct_release_path() {
    let mut model = counter_model();
    model.add_function(FunctionSignature {
        name: "Counter_label".to_string(),
        params: vec![
            ParamRef::new(
                "self",
                TypeRef::OpaqueHandle {
                    name: "Counter".to_string(),
                },
            ),
            ParamRef::new("prefix", TypeRef::BorrowedStringView),
        ],
        ret: Some(TypeRef::OwnedString),
        ownership: OwnershipKind::Borrows,
    });

    let generator = BindingGenerator::new(Target::C).unwrap();
    let bindings = generator.generate(&model).unwrap();

    // The owned string releases through its own symbol.
    let owned = bindings.files().get("include/OwnedStr.h").unwrap();
    assert!(owned.contains("void OwnedStr_drop(COwnedStr self);"));

    // The borrowed view crosses as a plain pointer and never gains one.
    let header = bindings.files().get("include/Counter.h").unwrap();
    assert!(header.contains("const char* prefix"));
    assert!(!header.contains("prefix_drop"));
}

#[test]
fn test_cmake_manifest_has_literal_cmake_syntax() {
    let generator = BindingGenerator::new(Target::C).unwrap();
    let bindings = generator.generate(&counter_model()).unwrap();
    let manifest = bindings.files().get("CMakeLists.txt").unwrap();

    assert!(manifest.contains("${CMAKE_CURRENT_SOURCE_DIR}"));
    assert!(manifest.contains("${CMAKE_BINARY_DIR}"));
    assert!(!manifest.contains("{{"));
    assert!(!manifest.contains("}}"));
}

#[test]
fn test_run_report_writes_independent_target_trees() {
    let report = generate_all(&counter_model(), &Target::ALL);
    assert!(report.all_succeeded());

    let dir = tempdir().unwrap();
    report.write_to_disk(dir.path()).unwrap();

    assert!(dir.path().join("c/include/Counter.h").exists());
    assert!(dir.path().join("c/CMakeLists.txt").exists());
    assert!(dir.path().join("cpp/include/Counter.hpp").exists());
    assert!(dir.path().join("cpp/CMakeLists.txt").exists());
    assert!(dir.path().join("csharp/Counter.cs").exists());
    assert!(dir.path().join("csharp/Counter.csproj").exists());
}

#[test]
fn test_model_round_trips_through_json_before_generation() {
    let model = counter_model();
    let json = model.to_json().unwrap();
    let reloaded = InterfaceModel::from_json(&json).unwrap();

    let generator = BindingGenerator::new(Target::C).unwrap();
    let from_original = generator.generate(&model).unwrap();
    let from_reloaded = generator.generate(&reloaded).unwrap();
    assert_eq!(from_original, from_reloaded);
}
