//! Finds struct fields tagged with `#[accessor]`.

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Field, Fields, GenericParam, Generics, Ident, Item, ItemStruct, Lit, Meta, Token, Type};

use crate::error::{Error, Result};
use crate::loader::Unit;

/// Name of the field attribute that requests accessors.
pub const ATTRIBUTE: &str = "accessor";

/// One tagged field, as found in the source.
#[derive(Debug, Clone)]
pub struct FieldDescriptor<'a> {
    /// The struct the field belongs to.
    pub owner: &'a Ident,
    /// The struct's generics, bounds and where-clause included.
    pub generics: &'a Generics,
    /// Parameter names in declaration order (`'a`, `T`, `N`).
    pub generic_params: Vec<String>,
    pub field: &'a Ident,
    pub ty: &'a Type,
    /// The raw tag text.
    pub tag: String,
}

impl FieldDescriptor<'_> {
    /// Owner with its parameter list, e.g. `Slot<'a, T>`.
    pub fn receiver(&self) -> String {
        if self.generic_params.is_empty() {
            self.owner.to_string()
        } else {
            format!("{}<{}>", self.owner, self.generic_params.join(", "))
        }
    }
}

/// Walk the unit in file order, then declaration order.
pub fn scan(unit: &Unit) -> impl Iterator<Item = Result<FieldDescriptor<'_>>> {
    unit.files
        .iter()
        .flat_map(|file| file.syntax.items.iter())
        .filter_map(|item| match item {
            Item::Struct(item_struct) => match &item_struct.fields {
                Fields::Named(named) => Some((item_struct, named)),
                Fields::Unnamed(_) | Fields::Unit => None,
            },
            _ => None,
        })
        .flat_map(|(item_struct, named)| {
            named
                .named
                .iter()
                .filter_map(move |field| describe(item_struct, field).transpose())
        })
}

fn describe<'a>(item: &'a ItemStruct, field: &'a Field) -> Result<Option<FieldDescriptor<'a>>> {
    let Some(name) = &field.ident else {
        return Ok(None);
    };
    let tag = accessor_tag(&field.attrs).map_err(|err| Error::InvalidAttribute {
        owner: item.ident.to_string(),
        field: name.to_string(),
        message: err.to_string(),
    })?;
    let Some(tag) = tag else {
        return Ok(None);
    };

    log::debug!("found {}.{}: {}", item.ident, name, tag);
    Ok(Some(FieldDescriptor {
        owner: &item.ident,
        generics: &item.generics,
        generic_params: param_names(&item.generics),
        field: name,
        ty: &field.ty,
        tag,
    }))
}

fn param_names(generics: &Generics) -> Vec<String> {
    generics
        .params
        .iter()
        .map(|param| match param {
            GenericParam::Lifetime(l) => l.lifetime.to_string(),
            GenericParam::Type(t) => t.ident.to_string(),
            GenericParam::Const(c) => c.ident.to_string(),
        })
        .collect()
}

/// Raw tag text of the field's `accessor` attribute, if it has one.
///
/// `#[accessor = "get,set"]` yields the literal, `#[accessor(get, set)]` the
/// identifiers joined by commas, and a bare `#[accessor]` an empty tag.
pub fn accessor_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut found: Option<String> = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate accessor attribute"));
        }
        let tag = match &attr.meta {
            Meta::Path(_) => String::new(),
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => s.value(),
                other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
            },
            Meta::List(list) => {
                let tokens = list.parse_args_with(Punctuated::<Ident, Token![,]>::parse_terminated)?;
                tokens.iter().map(Ident::to_string).collect::<Vec<_>>().join(",")
            }
        };
        found = Some(tag);
    }
    Ok(found)
}
