//! The `accessor` tag grammar.
//!
//! A tag is a comma separated token list. `get`/`Get` and `set`/`Set` request
//! a getter or setter; the spelling becomes the method name prefix and picks
//! the visibility (capitalised markers are `pub`). At most one other token may
//! appear, and it replaces the default method base name.

use std::fmt;

use syn::Ident;

/// Which accessor a marker requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// A recognised marker token, remembering how it was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: AccessorKind,
    pub exported: bool,
}

impl Marker {
    fn parse(token: &str) -> Option<Self> {
        let (kind, exported) = match token {
            "get" => (AccessorKind::Getter, false),
            "Get" => (AccessorKind::Getter, true),
            "set" => (AccessorKind::Setter, false),
            "Set" => (AccessorKind::Setter, true),
            _ => return None,
        };
        Some(Self { kind, exported })
    }

    /// The marker text exactly as it appears in a tag.
    pub fn spelling(self) -> &'static str {
        match (self.kind, self.exported) {
            (AccessorKind::Getter, false) => "get",
            (AccessorKind::Getter, true) => "Get",
            (AccessorKind::Setter, false) => "set",
            (AccessorKind::Setter, true) => "Set",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Reasons a tag is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    MultipleNames { first: String, second: String },
    InvalidMethodName(String),
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::MultipleNames { first, second } => write!(
                f,
                "cannot define multiple accessor names within a tag (`{first}` and `{second}`)"
            ),
            TagError::InvalidMethodName(name) => write!(f, "`{name}` is not a valid method name"),
        }
    }
}

impl std::error::Error for TagError {}

/// The parsed form of one field's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorSpec {
    /// Requested accessors, in tag order. Each spelling appears once.
    pub markers: Vec<Marker>,
    /// Explicit name token, or the capitalised field name.
    pub method_base: String,
}

impl AccessorSpec {
    /// Parse `tag` for a field called `field`.
    ///
    /// Returns `Ok(None)` when the tag holds no tokens at all.
    pub fn parse(tag: &str, field: &str) -> Result<Option<Self>, TagError> {
        let mut markers: Vec<Marker> = Vec::new();
        let mut explicit: Option<&str> = None;

        for token in tag.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match Marker::parse(token) {
                Some(marker) => {
                    if !markers.contains(&marker) {
                        markers.push(marker);
                    }
                }
                None => {
                    if let Some(first) = explicit {
                        return Err(TagError::MultipleNames {
                            first: first.to_string(),
                            second: token.to_string(),
                        });
                    }
                    explicit = Some(token);
                }
            }
        }

        if markers.is_empty() && explicit.is_none() {
            return Ok(None);
        }

        let spec = Self {
            markers,
            method_base: explicit.map_or_else(|| default_base(field), str::to_string),
        };
        for marker in &spec.markers {
            let name = spec.method_name(*marker);
            if syn::parse_str::<Ident>(&name).is_err() {
                return Err(TagError::InvalidMethodName(name));
            }
        }
        Ok(Some(spec))
    }

    pub fn wants_getter(&self) -> bool {
        self.markers.iter().any(|m| m.kind == AccessorKind::Getter)
    }

    pub fn wants_setter(&self) -> bool {
        self.markers.iter().any(|m| m.kind == AccessorKind::Setter)
    }

    /// Marker spelling followed by the base name, e.g. `getFoo`.
    pub fn method_name(&self, marker: Marker) -> String {
        format!("{}{}", marker.spelling(), self.method_base)
    }
}

/// Upper-case an ASCII lowercase first character; leave anything else alone.
fn default_base(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut base = String::with_capacity(field.len());
            base.push(first.to_ascii_uppercase());
            base.push_str(chars.as_str());
            base
        }
        _ => field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tag: &str, field: &str) -> AccessorSpec {
        AccessorSpec::parse(tag, field).unwrap().unwrap()
    }

    #[test]
    fn test_get_and_set_markers() {
        let spec = parse("get,set", "name");
        assert!(spec.wants_getter());
        assert!(spec.wants_setter());
        assert_eq!(spec.method_base, "Name");
        assert_eq!(spec.method_name(spec.markers[0]), "getName");
        assert_eq!(spec.method_name(spec.markers[1]), "setName");
    }

    #[test]
    fn test_capitalised_markers_are_exported() {
        let spec = parse("Get,Set", "name");
        assert!(spec.markers.iter().all(|m| m.exported));
        assert_eq!(spec.method_name(spec.markers[0]), "GetName");
        assert_eq!(spec.method_name(spec.markers[1]), "SetName");
    }

    #[test]
    fn test_explicit_name() {
        let spec = parse("get,Custom", "name");
        assert!(spec.wants_getter());
        assert!(!spec.wants_setter());
        assert_eq!(spec.method_name(spec.markers[0]), "getCustom");
    }

    #[test]
    fn test_explicit_name_position_does_not_matter() {
        let spec = parse("Custom,Set", "name");
        assert_eq!(spec.method_name(spec.markers[0]), "SetCustom");
    }

    #[test]
    fn test_snake_case_via_explicit_name() {
        let spec = parse("get,_name", "name");
        assert_eq!(spec.method_name(spec.markers[0]), "get_name");
    }

    #[test]
    fn test_multiple_names_rejected() {
        let err = AccessorSpec::parse("get,FooName,BarName", "name").unwrap_err();
        assert_eq!(
            err,
            TagError::MultipleNames {
                first: "FooName".to_string(),
                second: "BarName".to_string(),
            }
        );
    }

    #[test]
    fn test_both_spellings_request_two_accessors() {
        let spec = parse("get,Get,get", "name");
        assert_eq!(spec.markers.len(), 2);
        assert!(!spec.markers[0].exported);
        assert!(spec.markers[1].exported);
        assert_eq!(spec.method_name(spec.markers[0]), "getName");
        assert_eq!(spec.method_name(spec.markers[1]), "GetName");
    }

    #[test]
    fn test_repeated_marker_is_idempotent() {
        let spec = parse("set, set ,get", "count");
        assert_eq!(spec.markers.len(), 2);
        assert_eq!(spec.markers[0].kind, AccessorKind::Setter);
        assert_eq!(spec.markers[1].kind, AccessorKind::Getter);
    }

    #[test]
    fn test_tokens_are_trimmed_and_empties_dropped() {
        let spec = parse(" get , ,set,", "name");
        assert_eq!(spec.markers.len(), 2);
        assert_eq!(spec.method_base, "Name");
    }

    #[test]
    fn test_empty_tag_is_skipped() {
        assert_eq!(AccessorSpec::parse("", "name").unwrap(), None);
        assert_eq!(AccessorSpec::parse("  ,  ", "name").unwrap(), None);
    }

    #[test]
    fn test_name_only_tag_requests_nothing() {
        let spec = parse("Custom", "name");
        assert!(spec.markers.is_empty());
        assert_eq!(spec.method_base, "Custom");
    }

    #[test]
    fn test_invalid_method_name() {
        let err = AccessorSpec::parse("get,foo bar", "name").unwrap_err();
        assert_eq!(err, TagError::InvalidMethodName("getfoo bar".to_string()));
    }

    #[test]
    fn test_default_base_capitalisation() {
        assert_eq!(default_base("name"), "Name");
        assert_eq!(default_base("Name"), "Name");
        assert_eq!(default_base("_hidden"), "_hidden");
        assert_eq!(default_base("émoji"), "émoji");
        assert_eq!(default_base("x"), "X");
    }
}
