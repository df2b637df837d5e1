//! Method and type level entry points.

use crate::{Runtime, TreeError, TypeDef, TypeKind};
use rhizome_ptree_ir::Node;
use rhizome_ptree_sexpr::{Diagnostics, Options, SExpr, Serializer};
use std::collections::BTreeMap;

/// Forms for a batch of types, plus the errors of the types left out.
#[derive(Debug)]
pub struct TypesTree {
    /// One `(class ...)` or `(module ...)` form per type that serialized.
    pub forms: SExpr,
    pub errors: Vec<TreeError>,
}

/// Builds `(defn ...)`, `(class ...)` and `(module ...)` forms from a
/// [`Runtime`].
pub struct ParseTree<'d> {
    options: Options,
    diagnostics: Option<&'d mut dyn Diagnostics>,
}

impl<'d> ParseTree<'d> {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            diagnostics: None,
        }
    }

    /// Send unhandled-node reports to `diagnostics` instead of the log.
    pub fn with_diagnostics(mut self, diagnostics: &'d mut dyn Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// `(defn method body...)`, or `(nil)` when `ty` has no such method.
    pub fn tree_for_method(
        &mut self,
        runtime: &Runtime,
        ty: &TypeDef,
        method: &str,
    ) -> Result<SExpr, TreeError> {
        self.tree_for(runtime, ty, &ty.methods, method)
    }

    /// Same as [`ParseTree::tree_for_method`], over the class-level methods.
    pub fn tree_for_singleton_method(
        &mut self,
        runtime: &Runtime,
        ty: &TypeDef,
        method: &str,
    ) -> Result<SExpr, TreeError> {
        self.tree_for(runtime, ty, &ty.singleton_methods, method)
    }

    /// `(class Name Super (defn ...)...)` or `(module Name (defn ...)...)`,
    /// methods in lexicographic order.
    pub fn tree_for_type(&mut self, runtime: &Runtime, ty: &TypeDef) -> Result<SExpr, TreeError> {
        let name = SExpr::atom(ty.display_name());
        let mut form = match ty.kind {
            TypeKind::Class => {
                let superclass = ty
                    .superclass
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .map_or_else(SExpr::nil, SExpr::atom);
                vec![SExpr::atom("class"), name, superclass]
            }
            TypeKind::Module => vec![SExpr::atom("module"), name],
        };
        for method in ty.methods.keys() {
            form.push(self.tree_for_method(runtime, ty, method)?);
        }
        Ok(SExpr::Seq(form))
    }

    /// Serialize every type in `types`. A type with a failing method is
    /// dropped from the forms and its error recorded; the rest still run.
    pub fn tree_for_types(&mut self, runtime: &Runtime, types: &[&TypeDef]) -> TypesTree {
        let mut tree = TypesTree {
            forms: SExpr::Seq(Vec::new()),
            errors: Vec::new(),
        };
        for ty in types {
            self.collect(runtime, ty, &mut tree);
        }
        tree
    }

    /// [`ParseTree::tree_for_types`] over types looked up by name.
    pub fn tree_for_named_types(&mut self, runtime: &Runtime, names: &[&str]) -> TypesTree {
        let mut tree = TypesTree {
            forms: SExpr::Seq(Vec::new()),
            errors: Vec::new(),
        };
        for name in names {
            match runtime.type_named(name) {
                Some(ty) => self.collect(runtime, ty, &mut tree),
                None => {
                    tracing::warn!(type_name = name, "no such type");
                    tree.errors.push(TreeError::NoSuchType(name.to_string()));
                }
            }
        }
        tree
    }

    fn collect(&mut self, runtime: &Runtime, ty: &TypeDef, tree: &mut TypesTree) {
        match self.tree_for_type(runtime, ty) {
            Ok(form) => tree.forms.push(form),
            Err(err) => {
                tracing::warn!(type_name = %ty.display_name(), error = %err, "skipping type");
                tree.errors.push(err);
            }
        }
    }

    fn tree_for(
        &mut self,
        runtime: &Runtime,
        ty: &TypeDef,
        table: &BTreeMap<String, Node>,
        method: &str,
    ) -> Result<SExpr, TreeError> {
        let Some(body) = table.get(method) else {
            return Ok(SExpr::seq(vec![SExpr::nil()]));
        };
        tracing::debug!(owner = %ty.display_name(), method, "serializing method");

        let serializer = Serializer::new(self.options).with_closures(runtime);
        let mut serializer = match self.diagnostics.as_deref_mut() {
            Some(diagnostics) => serializer.with_diagnostics(diagnostics),
            None => serializer,
        };
        let mut forms = vec![SExpr::atom("defn"), SExpr::atom(method)];
        serializer
            .serialize_into(body, &mut forms)
            .map_err(|source| TreeError::Method {
                owner: ty.display_name(),
                method: method.to_string(),
                source,
            })?;
        Ok(SExpr::Seq(forms))
    }
}
