//! Semantic types for GLSL declarations.
//!
//! A small closed set of value kinds: builtin scalars, vectors, matrices and
//! samplers, registered struct types, and array types carrying a flattened
//! dimension list. [`Type::Unknown`] is the absorbing sentinel for everything
//! resolution cannot make sense of; it is an ordinary variant, so every
//! exhaustive match is forced to decide what degraded information means for
//! it.

use std::fmt;

use serde::Serialize;

use crate::registry::StructId;
use crate::NameId;

/// Builtin GLSL type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuiltinType {
    Void,
    Bool,
    Int,
    UInt,
    Float,
    Double,
    Vec2,
    Vec3,
    Vec4,
    DVec2,
    DVec3,
    DVec4,
    BVec2,
    BVec3,
    BVec4,
    IVec2,
    IVec3,
    IVec4,
    UVec2,
    UVec3,
    UVec4,
    Mat2,
    Mat3,
    Mat4,
    Mat2x3,
    Mat2x4,
    Mat3x2,
    Mat3x4,
    Mat4x2,
    Mat4x3,
    Sampler1D,
    Sampler2D,
    Sampler3D,
    SamplerCube,
    Sampler2DShadow,
    SamplerCubeShadow,
}

impl BuiltinType {
    /// Every builtin, in declaration order. Seeds the registry's name table.
    pub const ALL: [BuiltinType; 36] = [
        BuiltinType::Void,
        BuiltinType::Bool,
        BuiltinType::Int,
        BuiltinType::UInt,
        BuiltinType::Float,
        BuiltinType::Double,
        BuiltinType::Vec2,
        BuiltinType::Vec3,
        BuiltinType::Vec4,
        BuiltinType::DVec2,
        BuiltinType::DVec3,
        BuiltinType::DVec4,
        BuiltinType::BVec2,
        BuiltinType::BVec3,
        BuiltinType::BVec4,
        BuiltinType::IVec2,
        BuiltinType::IVec3,
        BuiltinType::IVec4,
        BuiltinType::UVec2,
        BuiltinType::UVec3,
        BuiltinType::UVec4,
        BuiltinType::Mat2,
        BuiltinType::Mat3,
        BuiltinType::Mat4,
        BuiltinType::Mat2x3,
        BuiltinType::Mat2x4,
        BuiltinType::Mat3x2,
        BuiltinType::Mat3x4,
        BuiltinType::Mat4x2,
        BuiltinType::Mat4x3,
        BuiltinType::Sampler1D,
        BuiltinType::Sampler2D,
        BuiltinType::Sampler3D,
        BuiltinType::SamplerCube,
        BuiltinType::Sampler2DShadow,
        BuiltinType::SamplerCubeShadow,
    ];

    /// Canonical GLSL spelling; doubles as the registry lookup key.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinType::Void => "void",
            BuiltinType::Bool => "bool",
            BuiltinType::Int => "int",
            BuiltinType::UInt => "uint",
            BuiltinType::Float => "float",
            BuiltinType::Double => "double",
            BuiltinType::Vec2 => "vec2",
            BuiltinType::Vec3 => "vec3",
            BuiltinType::Vec4 => "vec4",
            BuiltinType::DVec2 => "dvec2",
            BuiltinType::DVec3 => "dvec3",
            BuiltinType::DVec4 => "dvec4",
            BuiltinType::BVec2 => "bvec2",
            BuiltinType::BVec3 => "bvec3",
            BuiltinType::BVec4 => "bvec4",
            BuiltinType::IVec2 => "ivec2",
            BuiltinType::IVec3 => "ivec3",
            BuiltinType::IVec4 => "ivec4",
            BuiltinType::UVec2 => "uvec2",
            BuiltinType::UVec3 => "uvec3",
            BuiltinType::UVec4 => "uvec4",
            BuiltinType::Mat2 => "mat2",
            BuiltinType::Mat3 => "mat3",
            BuiltinType::Mat4 => "mat4",
            BuiltinType::Mat2x3 => "mat2x3",
            BuiltinType::Mat2x4 => "mat2x4",
            BuiltinType::Mat3x2 => "mat3x2",
            BuiltinType::Mat3x4 => "mat3x4",
            BuiltinType::Mat4x2 => "mat4x2",
            BuiltinType::Mat4x3 => "mat4x3",
            BuiltinType::Sampler1D => "sampler1D",
            BuiltinType::Sampler2D => "sampler2D",
            BuiltinType::Sampler3D => "sampler3D",
            BuiltinType::SamplerCube => "samplerCube",
            BuiltinType::Sampler2DShadow => "sampler2DShadow",
            BuiltinType::SamplerCubeShadow => "samplerCubeShadow",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One array dimension, as written or as inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    /// Explicit or inferred element count.
    Sized(usize),
    /// Written `[]`; may still be resolved by clarification.
    Unsized,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Sized(n) => write!(f, "[{n}]"),
            Dimension::Unsized => f.write_str("[]"),
        }
    }
}

/// An array over a non-array element type.
///
/// Dimensions are kept flattened, outermost first: `float[3][4]` is one
/// `ArrayType` with base `float` and dimensions `[3, 4]`, never an array of
/// arrays. The constructor folds an array base into the dimension list to
/// keep that invariant, which is also what merges type-level and
/// declarator-level suffixes (`int[3] a[4]` lands as `int[3][4]`).
///
/// Values are immutable; clarification builds a new `ArrayType` instead of
/// touching dimensions in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArrayType {
    base: Box<Type>,
    dimensions: Vec<Dimension>,
}

impl ArrayType {
    pub fn new(base: Type, dimensions: Vec<Dimension>) -> Self {
        debug_assert!(!dimensions.is_empty(), "array type needs at least one dimension");
        match base {
            Type::Array(inner) => {
                let mut all = inner.dimensions;
                all.extend(dimensions);
                ArrayType { base: inner.base, dimensions: all }
            }
            other => ArrayType {
                base: Box::new(other),
                dimensions,
            },
        }
    }

    pub fn base(&self) -> &Type {
        &self.base
    }

    /// Outermost dimension first.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for dim in &self.dimensions {
            write!(f, "{dim}")?;
        }
        Ok(())
    }
}

/// Resolved type of a declared name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    /// Sentinel for anything resolution could not make sense of: missing
    /// enclosing declaration, missing or unresolvable type specifier. Never
    /// a crash condition; downstream code matches on it and degrades.
    Unknown,
    Builtin(BuiltinType),
    /// A registered struct type. Equality follows the definition identity,
    /// not the spelling: two registrations named `S` compare unequal.
    Struct {
        #[serde(serialize_with = "crate::serialize_name")]
        name: NameId,
        def: StructId,
    },
    Array(ArrayType),
}

impl Type {
    /// Whether this is a usable, fully specified type. `Unknown` is not,
    /// including as an array element.
    pub fn is_valid(&self) -> bool {
        match self {
            Type::Unknown => false,
            Type::Array(array) => array.base().is_valid(),
            _ => true,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Unknown => f.write_str("(unknown)"),
            Type::Builtin(builtin) => f.write_str(builtin.name()),
            Type::Struct { name, .. } => write!(f, "{name}"),
            Type::Array(array) => write!(f, "{array}"),
        }
    }
}

/// One qualifier keyword as written in a qualifier list.
///
/// Declaration order is the canonical GLSL ordering (invariance,
/// interpolation, storage, memory, precision); [`QualifierSet`] renders in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Qualifier {
    Invariant,
    Precise,
    // interpolation
    Smooth,
    Flat,
    NoPerspective,
    // storage
    Const,
    In,
    Out,
    InOut,
    Centroid,
    Patch,
    Sample,
    Uniform,
    Buffer,
    Shared,
    Attribute,
    Varying,
    // memory
    Coherent,
    Volatile,
    Restrict,
    ReadOnly,
    WriteOnly,
    // precision
    Highp,
    Mediump,
    Lowp,
}

impl Qualifier {
    /// Every qualifier, in canonical rendering order.
    pub const ALL: [Qualifier; 25] = [
        Qualifier::Invariant,
        Qualifier::Precise,
        Qualifier::Smooth,
        Qualifier::Flat,
        Qualifier::NoPerspective,
        Qualifier::Const,
        Qualifier::In,
        Qualifier::Out,
        Qualifier::InOut,
        Qualifier::Centroid,
        Qualifier::Patch,
        Qualifier::Sample,
        Qualifier::Uniform,
        Qualifier::Buffer,
        Qualifier::Shared,
        Qualifier::Attribute,
        Qualifier::Varying,
        Qualifier::Coherent,
        Qualifier::Volatile,
        Qualifier::Restrict,
        Qualifier::ReadOnly,
        Qualifier::WriteOnly,
        Qualifier::Highp,
        Qualifier::Mediump,
        Qualifier::Lowp,
    ];

    /// GLSL keyword spelling.
    pub const fn keyword(self) -> &'static str {
        match self {
            Qualifier::Invariant => "invariant",
            Qualifier::Precise => "precise",
            Qualifier::Smooth => "smooth",
            Qualifier::Flat => "flat",
            Qualifier::NoPerspective => "noperspective",
            Qualifier::Const => "const",
            Qualifier::In => "in",
            Qualifier::Out => "out",
            Qualifier::InOut => "inout",
            Qualifier::Centroid => "centroid",
            Qualifier::Patch => "patch",
            Qualifier::Sample => "sample",
            Qualifier::Uniform => "uniform",
            Qualifier::Buffer => "buffer",
            Qualifier::Shared => "shared",
            Qualifier::Attribute => "attribute",
            Qualifier::Varying => "varying",
            Qualifier::Coherent => "coherent",
            Qualifier::Volatile => "volatile",
            Qualifier::Restrict => "restrict",
            Qualifier::ReadOnly => "readonly",
            Qualifier::WriteOnly => "writeonly",
            Qualifier::Highp => "highp",
            Qualifier::Mediump => "mediump",
            Qualifier::Lowp => "lowp",
        }
    }

    pub const fn flag(self) -> QualifierSet {
        match self {
            Qualifier::Invariant => QualifierSet::INVARIANT,
            Qualifier::Precise => QualifierSet::PRECISE,
            Qualifier::Smooth => QualifierSet::SMOOTH,
            Qualifier::Flat => QualifierSet::FLAT,
            Qualifier::NoPerspective => QualifierSet::NO_PERSPECTIVE,
            Qualifier::Const => QualifierSet::CONST,
            Qualifier::In => QualifierSet::IN,
            Qualifier::Out => QualifierSet::OUT,
            Qualifier::InOut => QualifierSet::INOUT,
            Qualifier::Centroid => QualifierSet::CENTROID,
            Qualifier::Patch => QualifierSet::PATCH,
            Qualifier::Sample => QualifierSet::SAMPLE,
            Qualifier::Uniform => QualifierSet::UNIFORM,
            Qualifier::Buffer => QualifierSet::BUFFER,
            Qualifier::Shared => QualifierSet::SHARED,
            Qualifier::Attribute => QualifierSet::ATTRIBUTE,
            Qualifier::Varying => QualifierSet::VARYING,
            Qualifier::Coherent => QualifierSet::COHERENT,
            Qualifier::Volatile => QualifierSet::VOLATILE,
            Qualifier::Restrict => QualifierSet::RESTRICT,
            Qualifier::ReadOnly => QualifierSet::READ_ONLY,
            Qualifier::WriteOnly => QualifierSet::WRITE_ONLY,
            Qualifier::Highp => QualifierSet::HIGHP,
            Qualifier::Mediump => QualifierSet::MEDIUMP,
            Qualifier::Lowp => QualifierSet::LOWP,
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

bitflags::bitflags! {
    /// Set of qualifier keywords attached to a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct QualifierSet: u32 {
        const INVARIANT = 1 << 0;
        const PRECISE = 1 << 1;
        const SMOOTH = 1 << 2;
        const FLAT = 1 << 3;
        const NO_PERSPECTIVE = 1 << 4;
        const CONST = 1 << 5;
        const IN = 1 << 6;
        const OUT = 1 << 7;
        const INOUT = 1 << 8;
        const CENTROID = 1 << 9;
        const PATCH = 1 << 10;
        const SAMPLE = 1 << 11;
        const UNIFORM = 1 << 12;
        const BUFFER = 1 << 13;
        const SHARED = 1 << 14;
        const ATTRIBUTE = 1 << 15;
        const VARYING = 1 << 16;
        const COHERENT = 1 << 17;
        const VOLATILE = 1 << 18;
        const RESTRICT = 1 << 19;
        const READ_ONLY = 1 << 20;
        const WRITE_ONLY = 1 << 21;
        const HIGHP = 1 << 22;
        const MEDIUMP = 1 << 23;
        const LOWP = 1 << 24;
    }
}

impl FromIterator<Qualifier> for QualifierSet {
    fn from_iter<I: IntoIterator<Item = Qualifier>>(iter: I) -> Self {
        iter.into_iter()
            .fold(QualifierSet::empty(), |set, qualifier| set | qualifier.flag())
    }
}

impl fmt::Display for QualifierSet {
    /// Keywords in canonical order, space separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for qualifier in Qualifier::ALL {
            if self.contains(qualifier.flag()) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(qualifier.keyword())?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A resolved type together with the qualifiers of its declaration.
///
/// The qualifier set is empty when no qualifier list applies, never absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedType {
    ty: Type,
    qualifiers: QualifierSet,
}

impl QualifiedType {
    pub fn new(ty: Type, qualifiers: QualifierSet) -> Self {
        QualifiedType { ty, qualifiers }
    }

    pub fn unqualified(ty: Type) -> Self {
        QualifiedType::new(ty, QualifierSet::empty())
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn qualifiers(&self) -> QualifierSet {
        self.qualifiers
    }
}

impl fmt::Display for QualifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.qualifiers.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.qualifiers, self.ty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique_lookup_keys() {
        let mut seen = std::collections::HashSet::new();
        for builtin in BuiltinType::ALL {
            assert!(seen.insert(builtin.name()), "duplicate name {}", builtin.name());
        }
        assert_eq!(seen.len(), BuiltinType::ALL.len());
    }

    #[test]
    fn array_constructor_flattens_array_base() {
        let inner = Type::Array(ArrayType::new(
            Type::Builtin(BuiltinType::Int),
            vec![Dimension::Sized(3)],
        ));
        let outer = ArrayType::new(inner, vec![Dimension::Sized(4)]);

        assert_eq!(outer.base(), &Type::Builtin(BuiltinType::Int));
        assert_eq!(outer.dimensions(), &[Dimension::Sized(3), Dimension::Sized(4)]);
    }

    #[test]
    fn unknown_poisons_validity_through_arrays() {
        assert!(!Type::Unknown.is_valid());
        let arr = Type::Array(ArrayType::new(Type::Unknown, vec![Dimension::Sized(2)]));
        assert!(!arr.is_valid());
        assert!(Type::Builtin(BuiltinType::Vec3).is_valid());
    }

    #[test]
    fn type_display_renders_typenames() {
        let ty = Type::Array(ArrayType::new(
            Type::Builtin(BuiltinType::Float),
            vec![Dimension::Sized(3), Dimension::Unsized],
        ));
        assert_eq!(ty.to_string(), "float[3][]");
        assert_eq!(Type::Unknown.to_string(), "(unknown)");
        assert_eq!(Type::Builtin(BuiltinType::Sampler2DShadow).to_string(), "sampler2DShadow");
    }

    #[test]
    fn qualifier_set_renders_in_canonical_order() {
        let set: QualifierSet = [Qualifier::Highp, Qualifier::Const].into_iter().collect();
        assert_eq!(set.to_string(), "const highp");

        let qualified = QualifiedType::new(Type::Builtin(BuiltinType::Float), set);
        assert_eq!(qualified.to_string(), "const highp float");
        assert_eq!(
            QualifiedType::unqualified(Type::Builtin(BuiltinType::Float)).to_string(),
            "float"
        );
    }

    #[test]
    fn qualifier_flags_cover_every_keyword() {
        let all: QualifierSet = Qualifier::ALL.into_iter().collect();
        assert_eq!(all, QualifierSet::all());
    }
}
