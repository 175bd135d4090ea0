//! The closed set of runtime type categories the classifier reasons
//! about.

use std::fmt;

/// A recognized runtime type category.
///
/// Equality between an inferred tag and a rule's target tag is the
/// fundamental classification query; everything else in the typing layer
/// exists to produce one of these (or to admit it cannot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Array,
    Function,
    RegExp,
    Date,
    Promise,
    TypedArray(TypedArrayKind),
    IntlFormatter(IntlFormatterKind),
    Null,
    Undefined,
}

/// The eleven typed-array constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl TypedArrayKind {
    pub const ALL: [TypedArrayKind; 11] = [
        TypedArrayKind::Int8,
        TypedArrayKind::Uint8,
        TypedArrayKind::Uint8Clamped,
        TypedArrayKind::Int16,
        TypedArrayKind::Uint16,
        TypedArrayKind::Int32,
        TypedArrayKind::Uint32,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
        TypedArrayKind::BigInt64,
        TypedArrayKind::BigUint64,
    ];

    pub fn constructor_name(&self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
            TypedArrayKind::BigInt64 => "BigInt64Array",
            TypedArrayKind::BigUint64 => "BigUint64Array",
        }
    }
}

/// The formatter constructors under the `Intl` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntlFormatterKind {
    Collator,
    DateTimeFormat,
    ListFormat,
    NumberFormat,
    PluralRules,
    RelativeTimeFormat,
    Segmenter,
}

impl IntlFormatterKind {
    pub const ALL: [IntlFormatterKind; 7] = [
        IntlFormatterKind::Collator,
        IntlFormatterKind::DateTimeFormat,
        IntlFormatterKind::ListFormat,
        IntlFormatterKind::NumberFormat,
        IntlFormatterKind::PluralRules,
        IntlFormatterKind::RelativeTimeFormat,
        IntlFormatterKind::Segmenter,
    ];

    /// The member name under `Intl`.
    pub fn member_name(&self) -> &'static str {
        match self {
            IntlFormatterKind::Collator => "Collator",
            IntlFormatterKind::DateTimeFormat => "DateTimeFormat",
            IntlFormatterKind::ListFormat => "ListFormat",
            IntlFormatterKind::NumberFormat => "NumberFormat",
            IntlFormatterKind::PluralRules => "PluralRules",
            IntlFormatterKind::RelativeTimeFormat => "RelativeTimeFormat",
            IntlFormatterKind::Segmenter => "Segmenter",
        }
    }

    pub fn qualified_name(&self) -> &'static str {
        match self {
            IntlFormatterKind::Collator => "Intl.Collator",
            IntlFormatterKind::DateTimeFormat => "Intl.DateTimeFormat",
            IntlFormatterKind::ListFormat => "Intl.ListFormat",
            IntlFormatterKind::NumberFormat => "Intl.NumberFormat",
            IntlFormatterKind::PluralRules => "Intl.PluralRules",
            IntlFormatterKind::RelativeTimeFormat => "Intl.RelativeTimeFormat",
            IntlFormatterKind::Segmenter => "Intl.Segmenter",
        }
    }
}

impl TypeTag {
    /// The display name, matching the global constructor where one
    /// exists (`"Array"`, `"Int8Array"`, `"Intl.NumberFormat"`).
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::String => "String",
            TypeTag::Number => "Number",
            TypeTag::Boolean => "Boolean",
            TypeTag::BigInt => "BigInt",
            TypeTag::Symbol => "Symbol",
            TypeTag::Object => "Object",
            TypeTag::Array => "Array",
            TypeTag::Function => "Function",
            TypeTag::RegExp => "RegExp",
            TypeTag::Date => "Date",
            TypeTag::Promise => "Promise",
            TypeTag::TypedArray(kind) => kind.constructor_name(),
            TypeTag::IntlFormatter(kind) => kind.qualified_name(),
            TypeTag::Null => "null",
            TypeTag::Undefined => "undefined",
        }
    }

    /// Resolve a class name to a tag. This is the single point where
    /// external names (rule tables, compiler display names) are
    /// translated into the closed tag set.
    pub fn from_name(name: &str) -> Option<TypeTag> {
        let tag = match name {
            "String" => TypeTag::String,
            "Number" => TypeTag::Number,
            "Boolean" => TypeTag::Boolean,
            "BigInt" => TypeTag::BigInt,
            "Symbol" => TypeTag::Symbol,
            "Object" => TypeTag::Object,
            "Array" => TypeTag::Array,
            "Function" => TypeTag::Function,
            "RegExp" => TypeTag::RegExp,
            "Date" => TypeTag::Date,
            "Promise" => TypeTag::Promise,
            "null" => TypeTag::Null,
            "undefined" => TypeTag::Undefined,
            _ => {
                for kind in TypedArrayKind::ALL {
                    if kind.constructor_name() == name {
                        return Some(TypeTag::TypedArray(kind));
                    }
                }
                for kind in IntlFormatterKind::ALL {
                    if kind.qualified_name() == name || kind.member_name() == name {
                        return Some(TypeTag::IntlFormatter(kind));
                    }
                }
                return None;
            }
        };
        Some(tag)
    }

    /// Whether values of this type coerce to a string under `+`.
    /// Primitives other than strings coerce to numbers; objects, arrays,
    /// dates and the rest stringify.
    pub fn is_object_like(&self) -> bool {
        matches!(
            self,
            TypeTag::Object
                | TypeTag::Array
                | TypeTag::Function
                | TypeTag::RegExp
                | TypeTag::Date
                | TypeTag::Promise
                | TypeTag::TypedArray(_)
                | TypeTag::IntlFormatter(_)
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
