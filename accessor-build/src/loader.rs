//! Loads the module to generate accessors for.
//!
//! A unit is one module root file plus whatever it pulls in through
//! top-level `include!("...")`. Items, fields and whole files whose `#[cfg]`
//! is false under the enabled features are pruned while loading, so nothing
//! downstream needs to know about features.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Fields, Item, Lit, LitStr, Meta, Token};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::resolve::Scope;

/// File names that root a module inside a directory.
const ROOT_FILES: &[&str] = &["lib.rs", "main.rs", "mod.rs"];

/// What to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A directory holding exactly one of `lib.rs`, `main.rs`, `mod.rs`.
    Directory(PathBuf),
    /// Explicit files; all of them must name the same module.
    Files(Vec<PathBuf>),
}

impl Target {
    /// Interpret command-line style arguments: one directory, or a file list.
    pub fn from_args(args: &[PathBuf]) -> Result<Self> {
        if args.is_empty() {
            return Ok(Target::Directory(PathBuf::from(".")));
        }
        if let [single] = args
            && is_directory(single)?
        {
            return Ok(Target::Directory(single.clone()));
        }
        Ok(Target::Files(args.to_vec()))
    }
}

fn is_directory(path: &Path) -> Result<bool> {
    fs::metadata(path).map(|m| m.is_dir()).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// One parsed source file of a unit.
#[derive(Debug)]
pub struct UnitFile {
    pub path: PathBuf,
    pub syntax: syn::File,
}

/// A loaded, cfg-pruned module.
#[derive(Debug)]
pub struct Unit {
    /// The module root file.
    pub root: PathBuf,
    /// Absolute module path (`crate::models`) when the root sits under `src/`.
    pub module_path: Option<String>,
    /// Root first, then included files in include order.
    pub files: Vec<UnitFile>,
    pub scope: Scope,
}

impl Unit {
    /// Directory that holds this module's child modules.
    pub fn child_dir(&self) -> PathBuf {
        child_dir(&self.root)
    }
}

fn child_dir(root: &Path) -> PathBuf {
    let parent = root.parent().map(Path::to_path_buf).unwrap_or_default();
    let file_name = root.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if ROOT_FILES.contains(&file_name) {
        return parent;
    }
    match root.file_stem() {
        Some(stem) => parent.join(stem),
        None => parent,
    }
}

/// Load `target` with `features` enabled. `output_name` is the generated
/// file's name; it is never loaded even if the module includes it.
pub fn load_unit(target: &Target, features: &HashSet<String>, output_name: &str) -> Result<Unit> {
    let root = match target {
        Target::Directory(dir) => find_module_root(dir)?,
        Target::Files(files) => {
            if !features.is_empty() {
                return Err(Error::FeaturesWithFiles);
            }
            let mut distinct = Vec::new();
            for file in files {
                let canonical = canonicalize(file)?;
                if !distinct.contains(&canonical) {
                    distinct.push(canonical);
                }
            }
            match distinct.as_slice() {
                [single] => single.clone(),
                _ => return Err(Error::ModuleCount(distinct.len())),
            }
        }
    };

    let output = child_dir(&root).join(output_name);
    let mut files = Vec::new();
    let mut visited = HashSet::new();
    load_file(&root, &output, features, &mut visited, &mut files)?;

    let scope = Scope::from_items(files.iter().flat_map(|f| f.syntax.items.iter()));
    let module_path = compute_module_path(&root);
    log::debug!(
        "loaded {} ({} file(s), module {})",
        root.display(),
        files.len(),
        module_path.as_deref().unwrap_or("<unknown>")
    );

    Ok(Unit {
        root,
        module_path,
        files,
        scope,
    })
}

fn find_module_root(dir: &Path) -> Result<PathBuf> {
    let mut roots = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::Io {
            path: dir.to_path_buf(),
            source: err.into(),
        })?;
        let is_root = entry.file_type().is_file()
            && entry.file_name().to_str().is_some_and(|name| ROOT_FILES.contains(&name));
        if is_root {
            roots.push(entry.into_path());
        }
    }
    match roots.as_slice() {
        [single] => canonicalize(single),
        _ => Err(Error::ModuleCount(roots.len())),
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_file(
    path: &Path,
    output: &Path,
    features: &HashSet<String>,
    visited: &mut HashSet<PathBuf>,
    files: &mut Vec<UnitFile>,
) -> Result<()> {
    if !visited.insert(path.to_path_buf()) {
        return Ok(());
    }
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut syntax = syn::parse_file(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !cfg_enabled(&syntax.attrs, features) {
        log::debug!("skipping {}: disabled by cfg", path.display());
        return Ok(());
    }
    prune(&mut syntax, features);

    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let includes: Vec<PathBuf> = syntax
        .items
        .iter()
        .filter_map(include_path)
        .map(|relative| dir.join(relative))
        .collect();

    log::debug!("loaded {}", path.display());
    files.push(UnitFile {
        path: path.to_path_buf(),
        syntax,
    });

    for include in includes {
        if include == output {
            continue;
        }
        let include = canonicalize(&include)?;
        load_file(&include, output, features, visited, files)?;
    }
    Ok(())
}

/// `include!("x.rs")` at item position.
fn include_path(item: &Item) -> Option<String> {
    let Item::Macro(item_macro) = item else {
        return None;
    };
    if !item_macro.mac.path.is_ident("include") {
        return None;
    }
    item_macro.mac.parse_body::<LitStr>().ok().map(|lit| lit.value())
}

/// Drop items and struct fields whose cfg is false.
fn prune(file: &mut syn::File, features: &HashSet<String>) {
    file.items.retain(|item| cfg_enabled(item_attrs(item), features));
    for item in &mut file.items {
        if let Item::Struct(item_struct) = item {
            match &mut item_struct.fields {
                Fields::Named(named) => {
                    named.named = std::mem::take(&mut named.named)
                        .into_iter()
                        .filter(|field| cfg_enabled(&field.attrs, features))
                        .collect();
                }
                Fields::Unnamed(_) | Fields::Unit => {}
            }
        }
    }
}

fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[],
    }
}

/// True unless some `#[cfg(...)]` in `attrs` evaluates false.
pub fn cfg_enabled(attrs: &[Attribute], features: &HashSet<String>) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cfg"))
        .all(|attr| match attr.parse_args::<Meta>() {
            Ok(predicate) => eval_cfg(&predicate, features),
            Err(_) => true,
        })
}

/// `feature = "x"` checks the enabled set, `test` is off, anything else
/// unknown is on.
fn eval_cfg(predicate: &Meta, features: &HashSet<String>) -> bool {
    match predicate {
        Meta::Path(path) => !path.is_ident("test"),
        Meta::NameValue(nv) => {
            if !nv.path.is_ident("feature") {
                return true;
            }
            match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => features.contains(&s.value()),
                _ => true,
            }
        }
        Meta::List(list) => {
            let Ok(nested) = list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated) else {
                return true;
            };
            if list.path.is_ident("all") {
                nested.iter().all(|p| eval_cfg(p, features))
            } else if list.path.is_ident("any") {
                nested.iter().any(|p| eval_cfg(p, features))
            } else if list.path.is_ident("not") {
                !nested.iter().all(|p| eval_cfg(p, features))
            } else {
                true
            }
        }
    }
}

/// Compute the module path of a root file under the nearest `src/`.
/// e.g., "src/guild/models/domain.rs" -> "crate::guild::models::domain"
fn compute_module_path(file_path: &Path) -> Option<String> {
    let components: Vec<&str> = file_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    let src = components.iter().rposition(|c| *c == "src")?;

    let mut parts: Vec<String> = components[src + 1..].iter().map(|c| c.to_string()).collect();
    if let Some(last) = parts.last_mut()
        && let Some(stem) = last.strip_suffix(".rs")
    {
        *last = stem.to_string();
    }
    // mod.rs, lib.rs and main.rs name their directory
    if let Some(last) = parts.last()
        && (last == "mod" || last == "lib" || last == "main")
    {
        parts.pop();
    }

    if parts.is_empty() {
        Some("crate".to_string())
    } else {
        Some(format!("crate::{}", parts.join("::")))
    }
}
