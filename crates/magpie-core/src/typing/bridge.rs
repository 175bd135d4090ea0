//! Classification against an external type checker.
//!
//! When the host has resolved type information for the file (for
//! example from a TypeScript language service), a [`TypeProvider`]
//! exposes it and [`CheckerBridge`] folds the provider's view of a
//! receiver down to the same [`TypeTag`] vocabulary the syntactic
//! inferencer uses. All checker-specific naming quirks are translated
//! in one place here; nothing outside this module sees a provider type.

use bitflags::bitflags;

use crate::syntax::ast::ExprId;

use super::tag::TypeTag;

/// Recursion bound for type unfolding. Reference targets and
/// constraints come from the provider, so a misbehaving provider could
/// otherwise feed us an unbounded chain.
const MAX_CLASSIFY_DEPTH: usize = 32;

/// Opaque handle to a type inside the external checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHandle(pub u32);

bitflags! {
    /// Coarse type categories reported by the provider.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypeFlags: u32 {
        const ANY = 1 << 0;
        const UNKNOWN = 1 << 1;
        const STRING_LIKE = 1 << 2;
        const OBJECT = 1 << 3;
        const TYPE_PARAMETER = 1 << 4;
        const UNION = 1 << 5;
        const INTERSECTION = 1 << 6;

        const UNION_OR_INTERSECTION = Self::UNION.bits() | Self::INTERSECTION.bits();
    }
}

bitflags! {
    /// Shape details for types carrying [`TypeFlags::OBJECT`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ObjectFlags: u32 {
        const CLASS = 1 << 0;
        const INTERFACE = 1 << 1;
        const REFERENCE = 1 << 2;
        const ANONYMOUS = 1 << 3;
        const ARRAY_LITERAL = 1 << 4;
        const EVOLVING_ARRAY = 1 << 5;
        const TUPLE = 1 << 6;

        const CLASS_OR_INTERFACE = Self::CLASS.bits() | Self::INTERFACE.bits();
        const ARRAY_LIKE =
            Self::ARRAY_LITERAL.bits() | Self::EVOLVING_ARRAY.bits() | Self::TUPLE.bits();
    }
}

bitflags! {
    /// Flags of the symbol a type was declared by, if any.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SymbolFlags: u32 {
        const FUNCTION = 1 << 0;
        const METHOD = 1 << 1;

        const CALLABLE = Self::FUNCTION.bits() | Self::METHOD.bits();
    }
}

impl Default for TypeFlags {
    fn default() -> Self {
        TypeFlags::empty()
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        ObjectFlags::empty()
    }
}

impl Default for SymbolFlags {
    fn default() -> Self {
        SymbolFlags::empty()
    }
}

/// Outcome of a bridge classification query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatch {
    /// The resolved type is the requested class.
    Match,
    /// The resolved type is definitely not the requested class.
    NoMatch,
    /// The checker could not pin the type down (`any`, `unknown`,
    /// missing information). The caller decides what this means.
    Indeterminate,
}

impl TypeMatch {
    fn from_bool(matched: bool) -> TypeMatch {
        if matched {
            TypeMatch::Match
        } else {
            TypeMatch::NoMatch
        }
    }

    /// Fold two partial answers: a definite match on either side wins,
    /// then uncertainty, then a definite miss.
    fn or(self, other: TypeMatch) -> TypeMatch {
        match (self, other) {
            (TypeMatch::Match, _) | (_, TypeMatch::Match) => TypeMatch::Match,
            (TypeMatch::Indeterminate, _) | (_, TypeMatch::Indeterminate) => {
                TypeMatch::Indeterminate
            }
            _ => TypeMatch::NoMatch,
        }
    }
}

/// External type information for one analyzed file.
///
/// Queries are keyed by the member-access expression id; the adapter
/// owns the mapping from tree nodes to its internal nodes. Absence of a
/// provider is the normal mode, and every method is allowed to answer
/// "don't know" for nodes it has no information about.
pub trait TypeProvider {
    /// Resolved type of the receiver (object operand) of the member
    /// access with this id.
    fn receiver_type(&self, member: ExprId) -> Option<TypeHandle>;

    /// Declared types enclosing each declaration of the accessed
    /// property's symbol. A method inherited from `interface Array`
    /// reports the `Array` interface type here even when the receiver
    /// type itself is opaque.
    fn property_owner_types(&self, member: ExprId) -> Vec<TypeHandle>;

    fn type_flags(&self, ty: TypeHandle) -> TypeFlags;

    /// Object flags, meaningful only when [`TypeFlags::OBJECT`] is set.
    fn object_flags(&self, ty: TypeHandle) -> ObjectFlags;

    /// Flags of the symbol that declared the type, empty when the type
    /// has no symbol.
    fn symbol_flags(&self, ty: TypeHandle) -> SymbolFlags;

    fn call_signature_count(&self, ty: TypeHandle) -> usize;

    /// Constituents of a union or intersection type.
    fn constituents(&self, ty: TypeHandle) -> Vec<TypeHandle>;

    /// Target of a reference type (`ReadonlyArray<number>` points at
    /// the `ReadonlyArray` interface).
    fn reference_target(&self, ty: TypeHandle) -> Option<TypeHandle>;

    /// Declared constraint of a type parameter, if one exists.
    fn constraint_of(&self, ty: TypeHandle) -> Option<TypeHandle>;

    /// Declared name of a class or interface type's symbol.
    fn declared_name(&self, ty: TypeHandle) -> Option<String>;

    /// Fully qualified symbol name, for dotted targets like
    /// `Intl.NumberFormat`.
    fn qualified_name(&self, ty: TypeHandle) -> Option<String>;

    /// Checker-rendered name of the type, used as the last resort.
    fn display_name(&self, ty: TypeHandle) -> String;

    /// Whether the checker ran with full type information. Without it,
    /// array types can degrade to anonymous object types and
    /// unconstrained type parameters stay opaque.
    fn has_full_types(&self) -> bool {
        true
    }
}

/// Classifies member-access receivers through a [`TypeProvider`].
pub struct CheckerBridge<'a> {
    provider: &'a dyn TypeProvider,
}

impl<'a> CheckerBridge<'a> {
    pub fn new(provider: &'a dyn TypeProvider) -> Self {
        Self { provider }
    }

    /// Decide whether the receiver of the given member access is of the
    /// target class. Tries the declared owner types of the accessed
    /// property first, then the receiver expression's own type.
    pub fn classify(&self, member: ExprId, target: TypeTag) -> TypeMatch {
        let mut result = TypeMatch::NoMatch;
        for owner in self.provider.property_owner_types(member) {
            result = result.or(self.type_equals(owner, target, 0));
            if result == TypeMatch::Match {
                return result;
            }
        }
        if let Some(receiver) = self.provider.receiver_type(member) {
            result = result.or(self.type_equals(receiver, target, 0));
        }
        result
    }

    fn type_equals(&self, ty: TypeHandle, target: TypeTag, depth: usize) -> TypeMatch {
        if depth >= MAX_CLASSIFY_DEPTH {
            return TypeMatch::Indeterminate;
        }
        let flags = self.provider.type_flags(ty);

        if self.is_callable(ty) {
            return TypeMatch::from_bool(target == TypeTag::Function);
        }
        if flags.intersects(TypeFlags::ANY | TypeFlags::UNKNOWN) {
            return TypeMatch::Indeterminate;
        }
        if self.has_object_flag(ty, flags, ObjectFlags::ANONYMOUS) {
            // Without full type information, array types can surface as
            // anonymous object types.
            return if self.provider.has_full_types() {
                TypeMatch::NoMatch
            } else {
                TypeMatch::Indeterminate
            };
        }
        if flags.contains(TypeFlags::STRING_LIKE) {
            return TypeMatch::from_bool(target == TypeTag::String);
        }
        if self.has_object_flag(ty, flags, ObjectFlags::ARRAY_LIKE) {
            return TypeMatch::from_bool(target == TypeTag::Array);
        }
        if self.has_object_flag(ty, flags, ObjectFlags::REFERENCE) {
            if let Some(inner) = self.provider.reference_target(ty) {
                if inner != ty {
                    return self.type_equals(inner, target, depth + 1);
                }
            }
        }
        if flags.contains(TypeFlags::TYPE_PARAMETER) {
            if let Some(constraint) = self.provider.constraint_of(ty) {
                return self.type_equals(constraint, target, depth + 1);
            }
            return if self.provider.has_full_types() {
                TypeMatch::NoMatch
            } else {
                TypeMatch::Indeterminate
            };
        }
        if flags.intersects(TypeFlags::UNION_OR_INTERSECTION) {
            let mut result = TypeMatch::NoMatch;
            for constituent in self.provider.constituents(ty) {
                result = result.or(self.type_equals(constituent, target, depth + 1));
                if result == TypeMatch::Match {
                    return result;
                }
            }
            return result;
        }
        if self.has_object_flag(ty, flags, ObjectFlags::CLASS_OR_INTERFACE) {
            return self.declared_name_equals(ty, target);
        }
        TypeMatch::from_bool(self.provider.display_name(ty) == target.name())
    }

    fn is_callable(&self, ty: TypeHandle) -> bool {
        self.provider
            .symbol_flags(ty)
            .intersects(SymbolFlags::CALLABLE)
            || self.provider.call_signature_count(ty) > 0
    }

    fn has_object_flag(&self, ty: TypeHandle, flags: TypeFlags, wanted: ObjectFlags) -> bool {
        flags.contains(TypeFlags::OBJECT) && self.provider.object_flags(ty).intersects(wanted)
    }

    /// Name comparison for class and interface types. This is the single
    /// point where checker naming conventions are translated: dotted
    /// targets compare against the fully qualified name, `Readonly`
    /// wrappers count as the wrapped class, and the callable-function
    /// interface counts as `Function`.
    fn declared_name_equals(&self, ty: TypeHandle, target: TypeTag) -> TypeMatch {
        let target_name = target.name();
        if target_name.contains('.') {
            let qualified = self.provider.qualified_name(ty);
            return TypeMatch::from_bool(qualified.as_deref() == Some(target_name));
        }
        let Some(name) = self.provider.declared_name(ty) else {
            return TypeMatch::NoMatch;
        };
        if name == target_name {
            return TypeMatch::Match;
        }
        if let Some(stripped) = name.strip_prefix("Readonly") {
            if stripped == target_name {
                return TypeMatch::Match;
            }
        }
        TypeMatch::from_bool(target == TypeTag::Function && name == "CallableFunction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[derive(Default)]
    struct FakeType {
        flags: TypeFlags,
        object_flags: ObjectFlags,
        symbol_flags: SymbolFlags,
        call_signatures: usize,
        constituents: Vec<TypeHandle>,
        reference_target: Option<TypeHandle>,
        constraint: Option<TypeHandle>,
        declared_name: Option<&'static str>,
        qualified_name: Option<&'static str>,
        display_name: &'static str,
    }

    #[derive(Default)]
    struct FakeProvider {
        types: Vec<FakeType>,
        receivers: FxHashMap<ExprId, TypeHandle>,
        owners: FxHashMap<ExprId, Vec<TypeHandle>>,
        full: bool,
    }

    impl FakeProvider {
        fn full() -> Self {
            Self {
                full: true,
                ..Default::default()
            }
        }

        fn add(&mut self, ty: FakeType) -> TypeHandle {
            self.types.push(ty);
            TypeHandle(self.types.len() as u32 - 1)
        }

        fn interface(&mut self, name: &'static str) -> TypeHandle {
            self.add(FakeType {
                flags: TypeFlags::OBJECT,
                object_flags: ObjectFlags::INTERFACE,
                declared_name: Some(name),
                display_name: name,
                ..Default::default()
            })
        }

        fn get(&self, ty: TypeHandle) -> &FakeType {
            &self.types[ty.0 as usize]
        }
    }

    impl TypeProvider for FakeProvider {
        fn receiver_type(&self, member: ExprId) -> Option<TypeHandle> {
            self.receivers.get(&member).copied()
        }

        fn property_owner_types(&self, member: ExprId) -> Vec<TypeHandle> {
            self.owners.get(&member).cloned().unwrap_or_default()
        }

        fn type_flags(&self, ty: TypeHandle) -> TypeFlags {
            self.get(ty).flags
        }

        fn object_flags(&self, ty: TypeHandle) -> ObjectFlags {
            self.get(ty).object_flags
        }

        fn symbol_flags(&self, ty: TypeHandle) -> SymbolFlags {
            self.get(ty).symbol_flags
        }

        fn call_signature_count(&self, ty: TypeHandle) -> usize {
            self.get(ty).call_signatures
        }

        fn constituents(&self, ty: TypeHandle) -> Vec<TypeHandle> {
            self.get(ty).constituents.clone()
        }

        fn reference_target(&self, ty: TypeHandle) -> Option<TypeHandle> {
            self.get(ty).reference_target
        }

        fn constraint_of(&self, ty: TypeHandle) -> Option<TypeHandle> {
            self.get(ty).constraint
        }

        fn declared_name(&self, ty: TypeHandle) -> Option<String> {
            self.get(ty).declared_name.map(str::to_owned)
        }

        fn qualified_name(&self, ty: TypeHandle) -> Option<String> {
            self.get(ty).qualified_name.map(str::to_owned)
        }

        fn display_name(&self, ty: TypeHandle) -> String {
            self.get(ty).display_name.to_owned()
        }

        fn has_full_types(&self) -> bool {
            self.full
        }
    }

    const MEMBER: ExprId = ExprId(1);

    fn classify_receiver(provider: &mut FakeProvider, ty: TypeHandle, target: TypeTag) -> TypeMatch {
        provider.receivers.insert(MEMBER, ty);
        CheckerBridge::new(provider).classify(MEMBER, target)
    }

    #[test]
    fn interface_name_comparison() {
        let mut provider = FakeProvider::full();
        let array = provider.interface("Array");
        assert_eq!(
            classify_receiver(&mut provider, array, TypeTag::Array),
            TypeMatch::Match
        );
        assert_eq!(
            classify_receiver(&mut provider, array, TypeTag::String),
            TypeMatch::NoMatch
        );
    }

    #[test]
    fn readonly_wrapper_counts_as_wrapped_class() {
        let mut provider = FakeProvider::full();
        let readonly_array = provider.interface("ReadonlyArray");
        let reference = provider.add(FakeType {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE,
            reference_target: Some(readonly_array),
            display_name: "ReadonlyArray<number>",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut provider, reference, TypeTag::Array),
            TypeMatch::Match
        );
    }

    #[test]
    fn callable_interface_counts_as_function() {
        let mut provider = FakeProvider::full();
        let callable = provider.interface("CallableFunction");
        assert_eq!(
            classify_receiver(&mut provider, callable, TypeTag::Function),
            TypeMatch::Match
        );
    }

    #[test]
    fn call_signatures_mean_function() {
        let mut provider = FakeProvider::full();
        let lambda = provider.add(FakeType {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::ANONYMOUS,
            call_signatures: 1,
            display_name: "() => void",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut provider, lambda, TypeTag::Function),
            TypeMatch::Match
        );
        assert_eq!(
            classify_receiver(&mut provider, lambda, TypeTag::Array),
            TypeMatch::NoMatch
        );
    }

    #[test]
    fn any_and_unknown_are_indeterminate() {
        let mut provider = FakeProvider::full();
        let any = provider.add(FakeType {
            flags: TypeFlags::ANY,
            display_name: "any",
            ..Default::default()
        });
        let unknown = provider.add(FakeType {
            flags: TypeFlags::UNKNOWN,
            display_name: "unknown",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut provider, any, TypeTag::Array),
            TypeMatch::Indeterminate
        );
        assert_eq!(
            classify_receiver(&mut provider, unknown, TypeTag::String),
            TypeMatch::Indeterminate
        );
    }

    #[test]
    fn anonymous_object_depends_on_type_information_mode() {
        let mut full = FakeProvider::full();
        let anonymous = full.add(FakeType {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::ANONYMOUS,
            display_name: "{ x: number }",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut full, anonymous, TypeTag::Array),
            TypeMatch::NoMatch
        );

        let mut partial = FakeProvider::default();
        let anonymous = partial.add(FakeType {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::ANONYMOUS,
            display_name: "any[]",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut partial, anonymous, TypeTag::Array),
            TypeMatch::Indeterminate
        );
    }

    #[test]
    fn string_like_and_array_like_flags() {
        let mut provider = FakeProvider::full();
        let literal = provider.add(FakeType {
            flags: TypeFlags::STRING_LIKE,
            display_name: "\"abc\"",
            ..Default::default()
        });
        let tuple = provider.add(FakeType {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::TUPLE,
            display_name: "[number, number]",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut provider, literal, TypeTag::String),
            TypeMatch::Match
        );
        assert_eq!(
            classify_receiver(&mut provider, tuple, TypeTag::Array),
            TypeMatch::Match
        );
    }

    #[test]
    fn union_matches_any_constituent() {
        let mut provider = FakeProvider::full();
        let string = provider.interface("String");
        let number = provider.interface("Number");
        let union = provider.add(FakeType {
            flags: TypeFlags::UNION,
            constituents: vec![string, number],
            display_name: "String | Number",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut provider, union, TypeTag::String),
            TypeMatch::Match
        );
        assert_eq!(
            classify_receiver(&mut provider, union, TypeTag::Number),
            TypeMatch::Match
        );
        assert_eq!(
            classify_receiver(&mut provider, union, TypeTag::Boolean),
            TypeMatch::NoMatch
        );
    }

    #[test]
    fn union_with_any_constituent_is_indeterminate() {
        let mut provider = FakeProvider::full();
        let any = provider.add(FakeType {
            flags: TypeFlags::ANY,
            display_name: "any",
            ..Default::default()
        });
        let number = provider.interface("Number");
        let union = provider.add(FakeType {
            flags: TypeFlags::UNION,
            constituents: vec![any, number],
            display_name: "any | Number",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut provider, union, TypeTag::Boolean),
            TypeMatch::Indeterminate
        );
    }

    #[test]
    fn type_parameter_uses_constraint() {
        let mut provider = FakeProvider::full();
        let string = provider.interface("String");
        let constrained = provider.add(FakeType {
            flags: TypeFlags::TYPE_PARAMETER,
            constraint: Some(string),
            display_name: "T",
            ..Default::default()
        });
        let unconstrained = provider.add(FakeType {
            flags: TypeFlags::TYPE_PARAMETER,
            display_name: "U",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(&mut provider, constrained, TypeTag::String),
            TypeMatch::Match
        );
        assert_eq!(
            classify_receiver(&mut provider, unconstrained, TypeTag::String),
            TypeMatch::NoMatch
        );
    }

    #[test]
    fn qualified_name_for_dotted_targets() {
        let mut provider = FakeProvider::full();
        let formatter = provider.add(FakeType {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::INTERFACE,
            declared_name: Some("NumberFormat"),
            qualified_name: Some("Intl.NumberFormat"),
            display_name: "Intl.NumberFormat",
            ..Default::default()
        });
        assert_eq!(
            classify_receiver(
                &mut provider,
                formatter,
                TypeTag::IntlFormatter(crate::typing::tag::IntlFormatterKind::NumberFormat)
            ),
            TypeMatch::Match
        );
    }

    #[test]
    fn property_owner_type_wins_over_opaque_receiver() {
        let mut provider = FakeProvider::full();
        let any = provider.add(FakeType {
            flags: TypeFlags::ANY,
            display_name: "any",
            ..Default::default()
        });
        let string = provider.interface("String");
        provider.receivers.insert(MEMBER, any);
        provider.owners.insert(MEMBER, vec![string]);
        let bridge = CheckerBridge::new(&provider);
        assert_eq!(bridge.classify(MEMBER, TypeTag::String), TypeMatch::Match);
    }

    #[test]
    fn no_information_is_no_match() {
        let provider = FakeProvider::full();
        let bridge = CheckerBridge::new(&provider);
        assert_eq!(bridge.classify(MEMBER, TypeTag::Array), TypeMatch::NoMatch);
    }

    #[test]
    fn reference_cycles_bottom_out() {
        let mut provider = FakeProvider::full();
        let first = provider.add(FakeType {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE,
            display_name: "A",
            ..Default::default()
        });
        let second = provider.add(FakeType {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE,
            reference_target: Some(first),
            display_name: "B",
            ..Default::default()
        });
        provider.types[first.0 as usize].reference_target = Some(second);
        assert_eq!(
            classify_receiver(&mut provider, first, TypeTag::Array),
            TypeMatch::Indeterminate
        );
    }
}
