//! Build-time generator for field accessors.
//!
//! This crate loads one module, finds struct fields tagged with
//! `#[accessor = "..."]` and writes a child module `accessor.rs` holding the
//! getter and setter methods the tags ask for.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     accessor_build::generate()
//!         .target("src/models")
//!         .feature("serde")
//!         .run()
//!         .expect("Failed to generate accessors");
//!
//!     println!("cargo:rerun-if-changed=src/models/");
//! }
//! ```
//!
//! and in `src/models/mod.rs`:
//!
//! ```ignore
//! use accessor_macros::Accessor;
//!
//! mod accessor;
//!
//! #[derive(Accessor)]
//! pub struct User {
//!     #[accessor = "Get,Set"]
//!     name: String,
//! }
//! ```

pub mod error;
pub mod format;
pub mod generator;
pub mod imports;
pub mod loader;
pub mod resolve;
pub mod scanner;
pub mod synth;
pub mod tag;

pub use error::{Error, Result};
pub use generator::{AccessorGenerator, DEFAULT_OUTPUT, generate_source};
pub use tag::AccessorSpec;

/// Create a new accessor generator with default settings.
///
/// # Example
///
/// ```no_run
/// let written = accessor_build::generate()
///     .target("src/models")
///     .run()
///     .expect("Failed to generate accessors");
/// println!("wrote {}", written.display());
/// ```
pub fn generate() -> AccessorGenerator {
    AccessorGenerator::new()
}
