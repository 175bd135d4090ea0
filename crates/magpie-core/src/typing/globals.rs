//! Registry of well-known global bindings and the types they produce.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::tag::{IntlFormatterKind, TypeTag, TypedArrayKind};

/// What a well-known global name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownGlobal {
    /// A constructor. Calling or constructing it yields `returns`.
    Constructor { returns: TypeTag },
    /// A namespace object holding further well-known members.
    Namespace {
        members: &'static [(&'static str, WellKnownGlobal)],
    },
    /// A plain value of a fixed type.
    Value(TypeTag),
}

impl WellKnownGlobal {
    /// The type of a bare reference to the global, without calling it.
    /// Constructors are functions, namespaces are ordinary objects.
    pub fn reference_type(&self) -> TypeTag {
        match self {
            WellKnownGlobal::Constructor { .. } => TypeTag::Function,
            WellKnownGlobal::Namespace { .. } => TypeTag::Object,
            WellKnownGlobal::Value(tag) => *tag,
        }
    }

    /// The type produced by `name(...)` or `new name(...)`.
    pub fn construction_type(&self) -> Option<TypeTag> {
        match self {
            WellKnownGlobal::Constructor { returns } => Some(*returns),
            _ => None,
        }
    }

    pub fn member(&self, name: &str) -> Option<&WellKnownGlobal> {
        match self {
            WellKnownGlobal::Namespace { members } => members
                .iter()
                .find(|(member, _)| *member == name)
                .map(|(_, global)| global),
            _ => None,
        }
    }
}

const fn constructor(returns: TypeTag) -> WellKnownGlobal {
    WellKnownGlobal::Constructor { returns }
}

static INTL_MEMBERS: [(&str, WellKnownGlobal); 7] = [
    (
        "Collator",
        constructor(TypeTag::IntlFormatter(IntlFormatterKind::Collator)),
    ),
    (
        "DateTimeFormat",
        constructor(TypeTag::IntlFormatter(IntlFormatterKind::DateTimeFormat)),
    ),
    (
        "ListFormat",
        constructor(TypeTag::IntlFormatter(IntlFormatterKind::ListFormat)),
    ),
    (
        "NumberFormat",
        constructor(TypeTag::IntlFormatter(IntlFormatterKind::NumberFormat)),
    ),
    (
        "PluralRules",
        constructor(TypeTag::IntlFormatter(IntlFormatterKind::PluralRules)),
    ),
    (
        "RelativeTimeFormat",
        constructor(TypeTag::IntlFormatter(IntlFormatterKind::RelativeTimeFormat)),
    ),
    (
        "Segmenter",
        constructor(TypeTag::IntlFormatter(IntlFormatterKind::Segmenter)),
    ),
];

static GLOBALS: [(&str, WellKnownGlobal); 23] = [
    ("String", constructor(TypeTag::String)),
    ("Number", constructor(TypeTag::Number)),
    ("Boolean", constructor(TypeTag::Boolean)),
    ("BigInt", constructor(TypeTag::BigInt)),
    ("Symbol", constructor(TypeTag::Symbol)),
    ("Object", constructor(TypeTag::Object)),
    ("Array", constructor(TypeTag::Array)),
    ("Function", constructor(TypeTag::Function)),
    ("RegExp", constructor(TypeTag::RegExp)),
    ("Date", constructor(TypeTag::Date)),
    ("Promise", constructor(TypeTag::Promise)),
    (
        "Int8Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::Int8)),
    ),
    (
        "Uint8Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::Uint8)),
    ),
    (
        "Uint8ClampedArray",
        constructor(TypeTag::TypedArray(TypedArrayKind::Uint8Clamped)),
    ),
    (
        "Int16Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::Int16)),
    ),
    (
        "Uint16Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::Uint16)),
    ),
    (
        "Int32Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::Int32)),
    ),
    (
        "Uint32Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::Uint32)),
    ),
    (
        "Float32Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::Float32)),
    ),
    (
        "Float64Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::Float64)),
    ),
    (
        "BigInt64Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::BigInt64)),
    ),
    (
        "BigUint64Array",
        constructor(TypeTag::TypedArray(TypedArrayKind::BigUint64)),
    ),
    (
        "Intl",
        WellKnownGlobal::Namespace {
            members: &INTL_MEMBERS,
        },
    ),
];

static BY_NAME: Lazy<FxHashMap<&'static str, &'static WellKnownGlobal>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for (name, global) in &GLOBALS {
        map.insert(*name, global);
    }
    map.insert("undefined", &WellKnownGlobal::Value(TypeTag::Undefined));
    map.insert("NaN", &WellKnownGlobal::Value(TypeTag::Number));
    map.insert("Infinity", &WellKnownGlobal::Value(TypeTag::Number));
    map
});

/// Look up a global by name. Only meaningful for identifiers that did
/// not resolve to a local binding.
pub fn lookup(name: &str) -> Option<&'static WellKnownGlobal> {
    BY_NAME.get(name).copied()
}
