//! Type-assignability oracle
//!
//! The classifier and the inheritance resolver never look at Java classes
//! directly. They ask a [`TypeOracle`] about supertypes, kinds and capability
//! markers. [`ManifestOracle`] answers from the manifest's type declarations
//! layered over a table of well-known platform types.

use crate::facts::{ClassKind, TypeDecl, Visibility};
use std::collections::{HashMap, HashSet, VecDeque};

pub const OBJECT: &str = "java.lang.Object";
pub const SERIALIZABLE: &str = "java.io.Serializable";
pub const PARCELABLE: &str = "android.os.Parcelable";
pub const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
pub const STRING: &str = "java.lang.String";

/// Answers capability queries about declared types
pub trait TypeOracle {
    /// Direct supertypes, superclass first
    fn supertypes(&self, name: &str) -> Vec<String>;

    /// The kind of a type, `None` if unknown
    fn class_kind(&self, name: &str) -> Option<ClassKind>;

    fn visibility(&self, name: &str) -> Option<Visibility>;

    /// Carries the opaque-transport marker annotation
    fn has_parcel_marker(&self, name: &str) -> bool;

    /// The direct superclass, skipping interfaces
    fn superclass(&self, name: &str) -> Option<String> {
        self.supertypes(name)
            .into_iter()
            .find(|s| self.class_kind(s).is_none_or(|k| k.is_class()))
    }

    /// Whether a value of type `name` may be assigned to `to`
    fn is_assignable(&self, name: &str, to: &str) -> bool {
        if name == to || to == OBJECT {
            return true;
        }
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([name.to_string()]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            for supertype in self.supertypes(&current) {
                if supertype == to {
                    return true;
                }
                queue.push_back(supertype);
            }
        }
        false
    }
}

/// Platform types every manifest may refer to without declaring them
const BUILTIN_TYPES: &[(&str, ClassKind, &[&str])] = &[
    (OBJECT, ClassKind::Class, &[]),
    (SERIALIZABLE, ClassKind::Interface, &[]),
    (PARCELABLE, ClassKind::Interface, &[]),
    (CHAR_SEQUENCE, ClassKind::Interface, &[]),
    (STRING, ClassKind::Class, &[OBJECT, SERIALIZABLE, CHAR_SEQUENCE]),
    ("java.lang.Number", ClassKind::Abstract, &[OBJECT, SERIALIZABLE]),
    ("java.lang.Boolean", ClassKind::Class, &[OBJECT, SERIALIZABLE]),
    ("java.lang.Character", ClassKind::Class, &[OBJECT, SERIALIZABLE]),
    ("java.lang.Byte", ClassKind::Class, &["java.lang.Number"]),
    ("java.lang.Short", ClassKind::Class, &["java.lang.Number"]),
    ("java.lang.Integer", ClassKind::Class, &["java.lang.Number"]),
    ("java.lang.Long", ClassKind::Class, &["java.lang.Number"]),
    ("java.lang.Float", ClassKind::Class, &["java.lang.Number"]),
    ("java.lang.Double", ClassKind::Class, &["java.lang.Number"]),
    ("java.util.Collection", ClassKind::Interface, &[]),
    ("java.util.List", ClassKind::Interface, &["java.util.Collection"]),
    ("java.util.Set", ClassKind::Interface, &["java.util.Collection"]),
    ("java.util.Map", ClassKind::Interface, &[]),
    ("java.util.ArrayList", ClassKind::Class, &[OBJECT, "java.util.List", SERIALIZABLE]),
    ("java.util.LinkedList", ClassKind::Class, &[OBJECT, "java.util.List", SERIALIZABLE]),
    ("java.util.HashSet", ClassKind::Class, &[OBJECT, "java.util.Set", SERIALIZABLE]),
    ("java.util.LinkedHashSet", ClassKind::Class, &["java.util.HashSet"]),
    ("java.util.TreeSet", ClassKind::Class, &[OBJECT, "java.util.Set", SERIALIZABLE]),
    ("java.util.HashMap", ClassKind::Class, &[OBJECT, "java.util.Map", SERIALIZABLE]),
    ("java.util.LinkedHashMap", ClassKind::Class, &["java.util.HashMap"]),
    ("java.util.TreeMap", ClassKind::Class, &[OBJECT, "java.util.Map", SERIALIZABLE]),
    ("android.util.SparseArray", ClassKind::Class, &[OBJECT]),
    ("android.os.Bundle", ClassKind::Class, &[OBJECT, PARCELABLE]),
];

#[derive(Debug, Clone)]
struct TypeInfo {
    kind: ClassKind,
    visibility: Visibility,
    supertypes: Vec<String>,
    parcel_marker: bool,
}

/// Oracle backed by manifest declarations
#[derive(Debug, Clone)]
pub struct ManifestOracle {
    types: HashMap<String, TypeInfo>,
}

impl ManifestOracle {
    /// Build an oracle; declarations override built-in entries of the same name
    pub fn new(decls: &[TypeDecl]) -> Self {
        let mut types: HashMap<String, TypeInfo> = BUILTIN_TYPES
            .iter()
            .map(|(name, kind, supertypes)| {
                let info = TypeInfo {
                    kind: *kind,
                    visibility: Visibility::Public,
                    supertypes: supertypes.iter().map(|s| s.to_string()).collect(),
                    parcel_marker: false,
                };
                (name.to_string(), info)
            })
            .collect();

        for decl in decls {
            let mut supertypes = decl.supertypes.clone();
            if decl.serializable && !supertypes.iter().any(|s| s == SERIALIZABLE) {
                supertypes.push(SERIALIZABLE.to_string());
            }
            if decl.parcelable && !supertypes.iter().any(|s| s == PARCELABLE) {
                supertypes.push(PARCELABLE.to_string());
            }
            types.insert(
                decl.name.clone(),
                TypeInfo {
                    kind: decl.kind,
                    visibility: decl.visibility,
                    supertypes,
                    parcel_marker: decl.parcel_marker,
                },
            );
        }

        Self { types }
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

impl TypeOracle for ManifestOracle {
    fn supertypes(&self, name: &str) -> Vec<String> {
        self.types
            .get(name)
            .map(|info| info.supertypes.clone())
            .unwrap_or_default()
    }

    fn class_kind(&self, name: &str) -> Option<ClassKind> {
        self.types.get(name).map(|info| info.kind)
    }

    fn visibility(&self, name: &str) -> Option<Visibility> {
        self.types.get(name).map(|info| info.visibility)
    }

    fn has_parcel_marker(&self, name: &str) -> bool {
        self.types.get(name).is_some_and(|info| info.parcel_marker)
    }
}
