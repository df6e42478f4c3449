//! Short names for foreign modules and the `use` block that declares them.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use syn::Ident;

/// Crates shipped with the toolchain. Their imports form the first group.
const SYSROOT_CRATES: &[&str] = &["std", "core", "alloc", "proc_macro", "test"];

/// A module that a printed type lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    /// Full module path as it must be written in the output, e.g. `std::time`.
    pub path: String,
}

impl Package {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Last path segment without any `r#`, the base of the short name.
    pub fn natural_name(&self) -> &str {
        natural_name(&self.path)
    }
}

fn natural_name(path: &str) -> &str {
    let last = last_segment(path);
    last.strip_prefix("r#").unwrap_or(last)
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Records which short name each foreign module was given.
///
/// Names are handed out on first use and never change afterwards, so the
/// registry must see every type of the output before it is rendered.
#[derive(Debug, Default)]
pub struct ImportRegistry {
    /// Absolute path of the module being generated for, when known.
    own: Option<String>,
    /// path -> assigned short name
    names: HashMap<String, String>,
    /// natural name -> number of modules that asked for it
    counts: HashMap<String, usize>,
    assigned: HashSet<String>,
}

impl ImportRegistry {
    pub fn new(own: Option<String>) -> Self {
        Self {
            own,
            ..Self::default()
        }
    }

    /// Short name to print before types from `package`.
    ///
    /// Empty for the module being generated for.
    pub fn qualify(&mut self, package: &Package) -> String {
        if self.own.as_deref() == Some(package.path.as_str()) {
            return String::new();
        }
        if let Some(name) = self.names.get(&package.path) {
            return name.clone();
        }

        let natural = package.natural_name().to_string();
        let mut count = self.counts.get(&natural).copied().unwrap_or(0);
        let mut name = suffixed(&natural, count);
        while self.assigned.contains(&name) {
            count += 1;
            name = suffixed(&natural, count);
        }
        self.counts.insert(natural, count + 1);
        self.assigned.insert(name.clone());
        self.names.insert(package.path.clone(), name.clone());
        log::debug!("import {} as {}", package.path, name);
        name
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Render the `use` block: sysroot imports, a blank line, everything else.
    /// Each group is sorted.
    pub fn render(&self) -> String {
        let mut std_imports = Vec::new();
        let mut ext_imports = Vec::new();
        for (path, name) in &self.names {
            let stmt = if name == last_segment(path) {
                format!("use {path};\n")
            } else {
                format!("use {path} as {name};\n")
            };
            if is_sysroot(path) {
                std_imports.push(stmt);
            } else {
                ext_imports.push(stmt);
            }
        }
        std_imports.sort();
        ext_imports.sort();

        let mut out = String::new();
        for stmt in &std_imports {
            out.push_str(stmt);
        }
        if !std_imports.is_empty() && !ext_imports.is_empty() {
            let _ = writeln!(out);
        }
        for stmt in &ext_imports {
            out.push_str(stmt);
        }
        out
    }
}

fn suffixed(name: &str, count: usize) -> String {
    let name = if count > 0 { format!("{name}{count}") } else { name.to_string() };
    // keywords such as `type` are only usable in raw form
    if syn::parse_str::<Ident>(&name).is_err() {
        format!("r#{name}")
    } else {
        name
    }
}

fn is_sysroot(path: &str) -> bool {
    let root = path.split("::").next().unwrap_or(path);
    SYSROOT_CRATES.contains(&root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_module_is_unqualified() {
        let mut registry = ImportRegistry::new(Some("crate::models".to_string()));
        assert_eq!(registry.qualify(&Package::new("crate::models")), "");
        assert!(registry.is_empty());
        assert_eq!(registry.render(), "");
    }

    #[test]
    fn test_repeat_lookups_are_stable() {
        let mut registry = ImportRegistry::default();
        let time = Package::new("std::time");
        assert_eq!(registry.qualify(&time), "time");
        assert_eq!(registry.qualify(&time), "time");
        assert_eq!(registry.render(), "use std::time;\n");
    }

    #[test]
    fn test_colliding_names_get_counter_suffix() {
        let mut registry = ImportRegistry::default();
        assert_eq!(registry.qualify(&Package::new("vendor::util")), "util");
        assert_eq!(registry.qualify(&Package::new("crate::shared::util")), "util1");
        assert_eq!(registry.qualify(&Package::new("other::util")), "util2");
        assert_eq!(registry.qualify(&Package::new("vendor::util")), "util");
    }

    #[test]
    fn test_suffix_skips_names_taken_naturally() {
        let mut registry = ImportRegistry::default();
        assert_eq!(registry.qualify(&Package::new("a::util1")), "util1");
        assert_eq!(registry.qualify(&Package::new("a::util")), "util");
        assert_eq!(registry.qualify(&Package::new("b::util")), "util2");
    }

    #[test]
    fn test_keyword_module_names_stay_raw() {
        let mut registry = ImportRegistry::default();
        let raw = Package::new("crate::r#type");
        assert_eq!(raw.natural_name(), "type");
        assert_eq!(registry.qualify(&raw), "r#type");
        assert_eq!(registry.qualify(&Package::new("vendor::r#type")), "type1");
        assert_eq!(registry.render(), "use crate::r#type;\nuse vendor::r#type as type1;\n");
    }

    #[test]
    fn test_render_groups_and_sorts() {
        let mut registry = ImportRegistry::default();
        registry.qualify(&Package::new("serde_json"));
        registry.qualify(&Package::new("std::time"));
        registry.qualify(&Package::new("vendor::util"));
        registry.qualify(&Package::new("std::collections"));
        registry.qualify(&Package::new("super::util"));

        assert_eq!(
            registry.render(),
            "use std::collections;\n\
             use std::time;\n\
             \n\
             use serde_json;\n\
             use super::util as util1;\n\
             use vendor::util;\n"
        );
    }

    #[test]
    fn test_render_single_group_has_no_blank_line() {
        let mut registry = ImportRegistry::default();
        registry.qualify(&Package::new("chrono"));
        registry.qualify(&Package::new("uuid"));
        assert_eq!(registry.render(), "use chrono;\nuse uuid;\n");

        let mut registry = ImportRegistry::default();
        registry.qualify(&Package::new("core::num"));
        registry.qualify(&Package::new("alloc::rc"));
        assert_eq!(registry.render(), "use alloc::rc;\nuse core::num;\n");
    }
}
