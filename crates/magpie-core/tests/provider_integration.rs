//! Lint tests that drive the checker-bridge path through the public API.
//!
//! A small hand-built `TypeProvider` stands in for a host compiler. It
//! answers every member-access query with the same receiver, which is
//! all these sources need: each contains exactly one access.

use magpie_core::linter::{LintConfig, Linter};
use magpie_core::syntax::Parser;
use magpie_core::typing::{ObjectFlags, SymbolFlags, TypeFlags, TypeHandle, TypeProvider};
use magpie_core::LintResult;

#[derive(Default)]
struct FakeType {
    flags: TypeFlags,
    object: ObjectFlags,
    symbol: SymbolFlags,
    calls: usize,
    constituents: Vec<TypeHandle>,
    target: Option<TypeHandle>,
    constraint: Option<TypeHandle>,
    declared: Option<&'static str>,
    qualified: Option<&'static str>,
    display: &'static str,
}

struct World {
    types: Vec<FakeType>,
    receiver: Option<TypeHandle>,
    owners: Vec<TypeHandle>,
}

impl World {
    fn new(types: Vec<FakeType>) -> Self {
        Self {
            types,
            receiver: None,
            owners: vec![],
        }
    }

    fn with_receiver(mut self, handle: TypeHandle) -> Self {
        self.receiver = Some(handle);
        self
    }

    fn with_owner(mut self, handle: TypeHandle) -> Self {
        self.owners.push(handle);
        self
    }

    fn ty(&self, handle: TypeHandle) -> &FakeType {
        &self.types[handle.0 as usize]
    }
}

impl TypeProvider for World {
    fn receiver_type(&self, _member: magpie_core::syntax::ExprId) -> Option<TypeHandle> {
        self.receiver
    }

    fn property_owner_types(&self, _member: magpie_core::syntax::ExprId) -> Vec<TypeHandle> {
        self.owners.clone()
    }

    fn type_flags(&self, ty: TypeHandle) -> TypeFlags {
        self.ty(ty).flags
    }

    fn object_flags(&self, ty: TypeHandle) -> ObjectFlags {
        self.ty(ty).object
    }

    fn symbol_flags(&self, ty: TypeHandle) -> SymbolFlags {
        self.ty(ty).symbol
    }

    fn call_signature_count(&self, ty: TypeHandle) -> usize {
        self.ty(ty).calls
    }

    fn constituents(&self, ty: TypeHandle) -> Vec<TypeHandle> {
        self.ty(ty).constituents.clone()
    }

    fn reference_target(&self, ty: TypeHandle) -> Option<TypeHandle> {
        self.ty(ty).target
    }

    fn constraint_of(&self, ty: TypeHandle) -> Option<TypeHandle> {
        self.ty(ty).constraint
    }

    fn declared_name(&self, ty: TypeHandle) -> Option<String> {
        self.ty(ty).declared.map(str::to_string)
    }

    fn qualified_name(&self, ty: TypeHandle) -> Option<String> {
        self.ty(ty).qualified.map(str::to_string)
    }

    fn display_name(&self, ty: TypeHandle) -> String {
        self.ty(ty).display.to_string()
    }
}

fn interface(name: &'static str) -> FakeType {
    FakeType {
        flags: TypeFlags::OBJECT,
        object: ObjectFlags::INTERFACE,
        declared: Some(name),
        display: name,
        ..FakeType::default()
    }
}

fn lint_with(source: &str, provider: &World) -> LintResult {
    let (program, interner) = Parser::parse_source(source).unwrap();
    Linter::new().lint_program_with_types(&program, source, &interner, "test.ts", provider)
}

#[test]
fn test_string_like_receiver_matches_string_rules() {
    let world = World::new(vec![FakeType {
        flags: TypeFlags::STRING_LIKE,
        display: "string",
        ..FakeType::default()
    }])
    .with_receiver(TypeHandle(0));

    let result = lint_with("name.replaceAll(\"-\", \"_\");", &world);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "M1005");
}

#[test]
fn test_union_with_string_constituent_matches() {
    let world = World::new(vec![
        FakeType {
            flags: TypeFlags::STRING_LIKE,
            display: "string",
            ..FakeType::default()
        },
        FakeType {
            display: "Number",
            ..FakeType::default()
        },
        FakeType {
            flags: TypeFlags::UNION,
            constituents: vec![TypeHandle(0), TypeHandle(1)],
            display: "string | Number",
            ..FakeType::default()
        },
    ])
    .with_receiver(TypeHandle(2));

    let result = lint_with("value.replaceAll(\"-\", \"_\");", &world);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "M1005");
}

#[test]
fn test_readonly_array_alias_matches_array_rules() {
    let world = World::new(vec![
        interface("ReadonlyArray"),
        FakeType {
            flags: TypeFlags::OBJECT,
            object: ObjectFlags::REFERENCE,
            target: Some(TypeHandle(0)),
            display: "ReadonlyArray<number>",
            ..FakeType::default()
        },
    ])
    .with_receiver(TypeHandle(1));

    let result = lint_with("rows.flat();", &world);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "M1002");
}

#[test]
fn test_promise_interface_receiver() {
    let world = World::new(vec![interface("Promise")]).with_receiver(TypeHandle(0));

    let result = lint_with("task.finally(done);", &world);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "M1007");
}

#[test]
fn test_any_receiver_is_indeterminate() {
    let types = || {
        vec![FakeType {
            flags: TypeFlags::ANY,
            display: "any",
            ..FakeType::default()
        }]
    };

    let world = World::new(types()).with_receiver(TypeHandle(0));
    let result = lint_with("value.flat();", &world);
    assert!(result.diagnostics.is_empty(), "got: {:?}", result.diagnostics);

    // Aggressive mode turns the indeterminate answer into a report.
    let world = World::new(types()).with_receiver(TypeHandle(0));
    let mut config = LintConfig::new();
    config.set_aggressive(true);
    let (program, interner) = Parser::parse_source("value.flat();").unwrap();
    let result = Linter::with_config(config).lint_program_with_types(
        &program,
        "value.flat();",
        &interner,
        "test.ts",
        &world,
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert!(!result.diagnostics[0].notes.is_empty());
}

#[test]
fn test_property_owner_type_wins_over_opaque_receiver() {
    // The receiver reads as `any`, but the property's declaration lives
    // on the Array interface; that is enough for an exact report.
    let world = World::new(vec![
        FakeType {
            flags: TypeFlags::ANY,
            display: "any",
            ..FakeType::default()
        },
        interface("Array"),
    ])
    .with_receiver(TypeHandle(0))
    .with_owner(TypeHandle(1));

    let result = lint_with("items.flat();", &world);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "M1002");
}

#[test]
fn test_mismatched_receiver_is_not_reported() {
    let world = World::new(vec![interface("Map")]).with_receiver(TypeHandle(0));

    let result = lint_with("lookup.flat();", &world);
    assert!(result.diagnostics.is_empty(), "got: {:?}", result.diagnostics);
}
