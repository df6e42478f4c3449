//! Syntactic name resolution for field types.
//!
//! There is no type checker here. A module's `use` declarations, `mod` items
//! and local item names are enough to tell which module a path in a field
//! type points into. Paths are re-rooted for the output file, which is a child
//! module of the scanned one: `self::` becomes `super::` and `super::`
//! becomes `super::super::`.

use std::collections::{HashMap, HashSet};

use proc_macro2::Span;
use syn::visit_mut::{self, VisitMut};
use syn::{Generics, Ident, Item, Path, PathArguments, PathSegment, TraitBound, Type, TypePath, UseTree};

use crate::imports::Package;

/// Root marker for paths that start at the extern prelude.
const EXTERN_ROOT: &str = "::";

/// Alias chains longer than this are treated as unresolvable.
const MAX_ALIAS_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Import {
    global: bool,
    segments: Vec<String>,
}

/// What a path in a field type refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Prelude, primitive, generic parameter or an item of the module itself.
    Local,
    /// Module part ends in a path keyword; printed in full, no import.
    Whole(Vec<String>),
    /// An item of another module, printed through that module's short name.
    Foreign { package: Package, item: String },
}

/// Names visible at the top level of one module.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    imports: HashMap<String, Import>,
    locals: HashSet<String>,
}

impl Scope {
    /// Build the scope from a module's (cfg-filtered) top-level items.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut scope = Scope::default();
        for item in items {
            match item {
                Item::Use(item_use) => {
                    let mut prefix = Vec::new();
                    collect_use(&item_use.tree, item_use.leading_colon.is_some(), &mut prefix, &mut scope.imports);
                }
                Item::ExternCrate(krate) => {
                    let name = krate
                        .rename
                        .as_ref()
                        .map_or_else(|| krate.ident.to_string(), |(_, rename)| rename.to_string());
                    if name != "_" && krate.ident != "self" {
                        scope.imports.insert(
                            name,
                            Import {
                                global: true,
                                segments: vec![krate.ident.to_string()],
                            },
                        );
                    }
                }
                Item::Mod(m) => {
                    scope.locals.insert(m.ident.to_string());
                }
                Item::Struct(s) => {
                    scope.locals.insert(s.ident.to_string());
                }
                Item::Enum(e) => {
                    scope.locals.insert(e.ident.to_string());
                }
                Item::Union(u) => {
                    scope.locals.insert(u.ident.to_string());
                }
                Item::Type(t) => {
                    scope.locals.insert(t.ident.to_string());
                }
                Item::Trait(t) => {
                    scope.locals.insert(t.ident.to_string());
                }
                _ => {}
            }
        }
        scope
    }

    /// Decide where `path` points. `params` are the owner's generic parameters.
    pub fn resolve(&self, path: &Path, params: &HashSet<String>) -> Resolution {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let Some(first) = segments.first() else {
            return Resolution::Local;
        };

        let absolute = if path.leading_colon.is_some() {
            prepend(EXTERN_ROOT, &segments)
        } else if params.contains(first) || first == "Self" {
            return Resolution::Local;
        } else if is_path_keyword(first) {
            segments.clone()
        } else if let Some(import) = self.imports.get(first) {
            match self.normalize_import(import, 0) {
                Some(mut full) => {
                    full.extend(segments[1..].iter().cloned());
                    full
                }
                None => return Resolution::Local,
            }
        } else if segments.len() == 1 {
            return Resolution::Local;
        } else if self.locals.contains(first) {
            prepend("self", &segments)
        } else {
            prepend(EXTERN_ROOT, &segments)
        };

        classify(relocate(absolute))
    }

    /// Print `ty` with every resolvable path routed through `qualifier`.
    pub fn render_type(
        &self,
        ty: &Type,
        params: &HashSet<String>,
        qualifier: &mut dyn FnMut(&Package) -> String,
    ) -> Type {
        let mut ty = ty.clone();
        Qualify {
            scope: self,
            params,
            qualifier,
        }
        .visit_type_mut(&mut ty);
        ty
    }

    /// Same as [`Scope::render_type`], applied to bounds and where-clauses.
    pub fn render_generics(
        &self,
        generics: &Generics,
        params: &HashSet<String>,
        qualifier: &mut dyn FnMut(&Package) -> String,
    ) -> Generics {
        let mut generics = generics.clone();
        Qualify {
            scope: self,
            params,
            qualifier,
        }
        .visit_generics_mut(&mut generics);
        generics
    }

    /// Expand an import into a path starting at `crate`, `self`, `super` or
    /// the extern root.
    fn normalize_import(&self, import: &Import, depth: usize) -> Option<Vec<String>> {
        let first = import.segments.first()?;
        if import.global {
            return Some(prepend(EXTERN_ROOT, &import.segments));
        }
        if is_path_keyword(first) {
            return Some(import.segments.clone());
        }
        if self.locals.contains(first) {
            return Some(prepend("self", &import.segments));
        }
        if let Some(inner) = self.imports.get(first) {
            // `use foo::bar; use bar::baz;` resolves through the first import,
            // but an import never resolves through itself.
            if inner != import && depth < MAX_ALIAS_DEPTH {
                let mut full = self.normalize_import(inner, depth + 1)?;
                full.extend(import.segments[1..].iter().cloned());
                return Some(full);
            }
        }
        Some(prepend(EXTERN_ROOT, &import.segments))
    }
}

fn collect_use(tree: &UseTree, global: bool, prefix: &mut Vec<String>, out: &mut HashMap<String, Import>) {
    match tree {
        UseTree::Path(p) => {
            prefix.push(p.ident.to_string());
            collect_use(&p.tree, global, prefix, out);
            prefix.pop();
        }
        UseTree::Name(n) => {
            let (name, segments) = if n.ident == "self" {
                match prefix.last() {
                    Some(last) => (last.clone(), prefix.clone()),
                    None => return,
                }
            } else {
                (n.ident.to_string(), prepend_all(prefix, &n.ident))
            };
            out.insert(name, Import { global, segments });
        }
        UseTree::Rename(r) => {
            if r.rename == "_" {
                return;
            }
            let segments = if r.ident == "self" {
                prefix.clone()
            } else {
                prepend_all(prefix, &r.ident)
            };
            if !segments.is_empty() {
                out.insert(r.rename.to_string(), Import { global, segments });
            }
        }
        UseTree::Glob(_) => {}
        UseTree::Group(g) => {
            for tree in &g.items {
                collect_use(tree, global, prefix, out);
            }
        }
    }
}

fn prepend(root: &str, segments: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(segments.len() + 1);
    out.push(root.to_string());
    out.extend(segments.iter().cloned());
    out
}

fn prepend_all(prefix: &[String], ident: &Ident) -> Vec<String> {
    let mut out = prefix.to_vec();
    out.push(ident.to_string());
    out
}

fn is_path_keyword(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// Re-root a path for use from a child module of the scanned one.
fn relocate(mut path: Vec<String>) -> Vec<String> {
    match path.first().map(String::as_str) {
        Some("self") => path[0] = "super".to_string(),
        Some("super") => path.insert(0, "super".to_string()),
        _ => {}
    }
    path
}

fn classify(path: Vec<String>) -> Resolution {
    let module = &path[..path.len().saturating_sub(1)];
    let module: Vec<&str> = module
        .iter()
        .map(String::as_str)
        .filter(|segment| *segment != EXTERN_ROOT)
        .collect();
    match (module.last(), path.last()) {
        (Some(last), Some(item)) if !is_path_keyword(last) => Resolution::Foreign {
            package: Package::new(module.join("::")),
            item: item.clone(),
        },
        _ => Resolution::Whole(path),
    }
}

struct Qualify<'s, 'q> {
    scope: &'s Scope,
    params: &'s HashSet<String>,
    qualifier: &'q mut dyn FnMut(&Package) -> String,
}

impl Qualify<'_, '_> {
    fn rewrite(&mut self, path: &mut Path) {
        let Some(arguments) = path.segments.last().map(|s| s.arguments.clone()) else {
            return;
        };
        let (mut rebuilt, item) = match self.scope.resolve(path, self.params) {
            Resolution::Local => return,
            Resolution::Whole(mut segments) => {
                let item = segments.pop().unwrap_or_default();
                (path_from(&segments), item)
            }
            Resolution::Foreign { package, item } => {
                let short = (self.qualifier)(&package);
                if short.is_empty() {
                    (path_from(&[]), item)
                } else {
                    (path_from(&[short]), item)
                }
            }
        };
        rebuilt.segments.push(PathSegment {
            ident: ident(&item),
            arguments,
        });
        *path = rebuilt;
    }
}

impl VisitMut for Qualify<'_, '_> {
    fn visit_type_path_mut(&mut self, node: &mut TypePath) {
        visit_mut::visit_type_path_mut(self, node);
        if node.qself.is_none() {
            self.rewrite(&mut node.path);
        }
    }

    fn visit_trait_bound_mut(&mut self, node: &mut TraitBound) {
        visit_mut::visit_trait_bound_mut(self, node);
        self.rewrite(&mut node.path);
    }
}

/// Inverse of `Ident::to_string`, which keeps the `r#` of raw identifiers.
fn ident(name: &str) -> Ident {
    match name.strip_prefix("r#") {
        Some(raw) => Ident::new_raw(raw, Span::call_site()),
        None => Ident::new(name, Span::call_site()),
    }
}

fn path_from(segments: &[String]) -> Path {
    let mut path = Path {
        leading_colon: None,
        segments: Default::default(),
    };
    for segment in segments.iter().filter(|s| s.as_str() != EXTERN_ROOT) {
        path.segments.push(PathSegment {
            ident: ident(segment),
            arguments: PathArguments::None,
        });
    }
    if segments.first().map(String::as_str) == Some(EXTERN_ROOT) {
        path.leading_colon = Some(Default::default());
    }
    path
}
