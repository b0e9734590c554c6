//! Builtin and user type registry.
//!
//! A flat, single-scope name table seeded with the GLSL builtin vocabulary.
//! Struct types are registered here and identified by `StructId`, so two
//! registrations are distinct types even under the same spelling. Scope-aware
//! name resolution belongs to the embedding front end, not here.

use hashbrown::HashMap;
use log::debug;
use serde::Serialize;

use crate::types::{BuiltinType, Type};
use crate::NameId;

/// Identity of a registered struct definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StructId(u32);

/// One member of a registered struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructMember {
    #[serde(serialize_with = "crate::serialize_name")]
    pub name: NameId,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDef {
    #[serde(serialize_with = "crate::serialize_name")]
    pub name: NameId,
    pub members: Vec<StructMember>,
}

/// Name-to-type table consulted when a type specifier is resolved.
///
/// Invariants:
/// - builtins are present from construction on
/// - struct definitions are never removed; a `StructId` stays resolvable
/// - the name table holds the latest binding per spelling (last wins)
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    names: HashMap<NameId, Type>,
    structs: Vec<StructDef>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Registry pre-loaded with the builtin vocabulary.
    pub fn new() -> Self {
        let mut names = HashMap::with_capacity(BuiltinType::ALL.len());
        for builtin in BuiltinType::ALL {
            names.insert(NameId::from(builtin.name()), Type::Builtin(builtin));
        }
        TypeRegistry {
            names,
            structs: Vec::new(),
        }
    }

    /// Look up a spelled type name.
    pub fn resolve(&self, name: NameId) -> Option<&Type> {
        self.names.get(&name)
    }

    /// Register a struct type under `name` and return the type value to use
    /// in specifiers. Re-registration shadows the previous binding.
    pub fn declare_struct(&mut self, name: NameId, members: Vec<StructMember>) -> Type {
        let def = StructId(self.structs.len() as u32);
        self.structs.push(StructDef { name, members });
        let ty = Type::Struct { name, def };
        if self.names.insert(name, ty.clone()).is_some() {
            debug!("type name {name} redeclared, previous binding shadowed");
        }
        ty
    }

    /// Definition behind a struct type.
    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;

    #[test]
    fn builtins_resolve_by_spelling() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.resolve(NameId::from("vec3")),
            Some(&Type::Builtin(BuiltinType::Vec3))
        );
        assert_eq!(
            registry.resolve(NameId::from("samplerCube")),
            Some(&Type::Builtin(BuiltinType::SamplerCube))
        );
        assert_eq!(registry.resolve(NameId::from("half4")), None);
    }

    #[test]
    fn struct_identity_survives_shadowing() {
        let mut registry = TypeRegistry::new();
        let name = NameId::from("Light");
        let first = registry.declare_struct(
            name,
            vec![StructMember {
                name: NameId::from("color"),
                ty: Type::Builtin(BuiltinType::Vec3),
            }],
        );
        let second = registry.declare_struct(name, Vec::new());

        // Same spelling, different definitions: distinct types and the name
        // table now resolves to the newer one.
        assert_ne!(first, second);
        assert_eq!(registry.resolve(name), Some(&second));

        let Type::Struct { def, .. } = first else {
            panic!("expected struct type");
        };
        assert_eq!(registry.struct_def(def).members.len(), 1);
    }

    #[test]
    fn struct_members_may_use_any_type() {
        let mut registry = TypeRegistry::new();
        let ty = registry.declare_struct(
            NameId::from("Patch"),
            vec![StructMember {
                name: NameId::from("heights"),
                ty: Type::Array(crate::types::ArrayType::new(
                    Type::Builtin(BuiltinType::Float),
                    vec![Dimension::Sized(16)],
                )),
            }],
        );
        assert!(ty.is_valid());
        assert_eq!(ty.to_string(), "Patch");
    }
}
