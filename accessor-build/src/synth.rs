//! Renders accessor methods for tagged fields.

use std::collections::HashSet;
use std::fmt::Write;

use quote::{ToTokens, quote};
use syn::ext::IdentExt;

use crate::error::{Error, Result};
use crate::imports::{ImportRegistry, Package};
use crate::resolve::Scope;
use crate::scanner::FieldDescriptor;
use crate::tag::{AccessorKind, AccessorSpec, Marker, TagError};

/// Marker comment opening every generated file.
pub const GENERATED_MARKER: &str = "// Code generated by accessor; DO NOT EDIT.";

/// Header and body of a generated file, kept apart until the body is done
/// because the body decides which imports the header needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    pub header: String,
    pub body: String,
}

/// One generation pass over a unit.
pub struct Synthesizer<'u> {
    scope: &'u Scope,
    registry: ImportRegistry,
    body: String,
    fields: usize,
}

impl<'u> Synthesizer<'u> {
    /// `module_path` is the absolute path of the scanned module, if known;
    /// types from it are printed unqualified.
    pub fn new(scope: &'u Scope, module_path: Option<String>) -> Self {
        Self {
            scope,
            registry: ImportRegistry::new(module_path),
            body: String::new(),
            fields: 0,
        }
    }

    /// Emit the provenance line and accessors for one field.
    pub fn emit(&mut self, descriptor: &FieldDescriptor<'_>) -> Result<()> {
        let field_name = descriptor.field.unraw().to_string();
        let spec = AccessorSpec::parse(&descriptor.tag, &field_name).map_err(|err| tag_error(err, descriptor))?;
        let Some(spec) = spec else {
            return Ok(());
        };
        self.fields += 1;

        let params: HashSet<String> = descriptor.generic_params.iter().cloned().collect();
        let registry = &mut self.registry;
        let mut qualify = |package: &Package| registry.qualify(package);

        let receiver = descriptor.receiver();
        let field = descriptor.field;
        let tag = descriptor.tag.trim().replace(['\n', '\r'], " ");
        let _ = writeln!(self.body, "/// {receiver}.{field}: {tag}");

        let generics = self.scope.render_generics(descriptor.generics, &params, &mut qualify);
        let owner = descriptor.owner;
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        let impl_head = quote! { impl #impl_generics #owner #ty_generics #where_clause };

        if spec.markers.is_empty() {
            let _ = writeln!(self.body, "{impl_head} {{}}");
            return Ok(());
        }

        let ty = self
            .scope
            .render_type(descriptor.ty, &params, &mut qualify)
            .into_token_stream();
        let _ = writeln!(self.body, "{impl_head} {{");
        for marker in &spec.markers {
            let method = spec.method_name(*marker);
            let vis = visibility(*marker);
            match marker.kind {
                AccessorKind::Getter => {
                    let _ = writeln!(self.body, "    {vis} fn {method}(&self) -> {ty} {{ self.{field}.clone() }}");
                }
                AccessorKind::Setter => {
                    let _ = writeln!(
                        self.body,
                        "    {vis} fn {method}(&mut self, value: {ty}) {{ self.{field} = value; }}"
                    );
                }
            }
        }
        let _ = writeln!(self.body, "}}");
        Ok(())
    }

    /// Number of fields that produced output so far.
    pub fn fields(&self) -> usize {
        self.fields
    }

    /// Render the header from everything the body asked for.
    pub fn finish(self) -> GeneratedOutput {
        let mut header = String::new();
        let _ = writeln!(header, "{GENERATED_MARKER}");
        let _ = writeln!(header);
        let _ = writeln!(header, "#![allow(non_snake_case, unused_imports, clippy::clone_on_copy)]");
        let _ = writeln!(header);
        let _ = writeln!(header, "use super::*;");
        if !self.registry.is_empty() {
            let _ = writeln!(header);
            header.push_str(&self.registry.render());
        }
        GeneratedOutput {
            header,
            body: self.body,
        }
    }
}

/// Capitalised markers are public; lowercase ones stay inside the owner's module.
fn visibility(marker: Marker) -> &'static str {
    if marker.exported { "pub" } else { "pub(super)" }
}

fn tag_error(err: TagError, descriptor: &FieldDescriptor<'_>) -> Error {
    let owner = descriptor.owner.to_string();
    let field = descriptor.field.to_string();
    match err {
        TagError::MultipleNames { .. } => Error::MultipleNames { owner, field },
        TagError::InvalidMethodName(name) => Error::InvalidMethodName { owner, field, name },
    }
}
