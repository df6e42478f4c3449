use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions raised while loading a module or generating accessors.
#[derive(Debug, Error)]
pub enum Error {
    /// The target did not resolve to exactly one module.
    #[error("{0} modules found")]
    ModuleCount(usize),

    /// Feature filters were combined with an explicit file list.
    #[error("features apply only to directories, not when files are specified")]
    FeaturesWithFiles,

    /// A tag named more than one accessor.
    #[error("{owner}.{field}: cannot define multiple accessor names within a tag")]
    MultipleNames { owner: String, field: String },

    /// The derived method name is not a Rust identifier.
    #[error("{owner}.{field}: `{name}` is not a valid method name")]
    InvalidMethodName { owner: String, field: String, name: String },

    /// The `accessor` attribute has a shape the scanner does not understand.
    #[error("{owner}.{field}: invalid accessor attribute: {message}")]
    InvalidAttribute {
        owner: String,
        field: String,
        message: String,
    },

    /// The synthesized text is not valid Rust. This is a generator bug.
    #[error("format: {message}")]
    Format { message: String, source_text: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },
}

impl Error {
    /// Raw generator output attached to a rendering failure.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Format { source_text, .. } => Some(source_text),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
