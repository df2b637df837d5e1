//! In-memory model of the host runtime: types, their method tables and the
//! captured closures that `bmethod`/`dmethod` nodes point at.

use rhizome_ptree_ir::{Captured, CapturedClosure, CapturedClosures, ClosureRef, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Module,
}

/// A class or module and its method tables.
///
/// Method tables map a method name to the root node of its body, exactly as
/// the host stored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    /// `None` (or empty) for anonymous types.
    #[serde(default)]
    pub name: Option<String>,
    /// Host object id, used to name anonymous types.
    pub id: u64,
    pub kind: TypeKind,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub methods: BTreeMap<String, Node>,
    #[serde(default)]
    pub singleton_methods: BTreeMap<String, Node>,
}

impl TypeDef {
    pub fn class(name: impl Into<String>, id: u64, superclass: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            id,
            kind: TypeKind::Class,
            superclass: superclass.map(str::to_string),
            methods: BTreeMap::new(),
            singleton_methods: BTreeMap::new(),
        }
    }

    pub fn module(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: Some(name.into()),
            id,
            kind: TypeKind::Module,
            superclass: None,
            methods: BTreeMap::new(),
            singleton_methods: BTreeMap::new(),
        }
    }

    pub fn anonymous(kind: TypeKind, id: u64) -> Self {
        Self {
            name: None,
            id,
            kind,
            superclass: None,
            methods: BTreeMap::new(),
            singleton_methods: BTreeMap::new(),
        }
    }

    pub fn with_method(mut self, name: impl Into<String>, body: Node) -> Self {
        self.methods.insert(name.into(), body);
        self
    }

    pub fn with_singleton_method(mut self, name: impl Into<String>, body: Node) -> Self {
        self.singleton_methods.insert(name.into(), body);
        self
    }

    /// The type's name, or `UnnamedClass_<id>` for anonymous types.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("UnnamedClass_{}", self.id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Runtime {
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub closures: BTreeMap<ClosureRef, CapturedClosure>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, ty: TypeDef) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_closure(mut self, handle: ClosureRef, closure: CapturedClosure) -> Self {
        self.closures.insert(handle, closure);
        self
    }

    /// First type whose name is `name`.
    pub fn type_named(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|ty| ty.name.as_deref() == Some(name))
    }

    /// Load a runtime dump.
    pub fn from_json(dump: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(dump)
    }
}

impl CapturedClosures for Runtime {
    fn captured(&self, handle: ClosureRef) -> Option<Captured<'_>> {
        self.closures.captured(handle)
    }
}
