//! Generation session and the builder used by build scripts and the CLI.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::error;
use crate::format::format_output;
use crate::loader::{Target, Unit, load_unit};
use crate::scanner::scan;
use crate::synth::Synthesizer;

/// File name used when none is configured.
pub const DEFAULT_OUTPUT: &str = "accessor.rs";

/// Generate the accessor module for an already loaded unit.
///
/// Fails on the first bad tag; nothing is produced in that case.
pub fn generate_source(unit: &Unit) -> error::Result<String> {
    let mut synth = Synthesizer::new(&unit.scope, unit.module_path.clone());
    for descriptor in scan(unit) {
        synth.emit(&descriptor?)?;
    }
    log::debug!("{}: {} tagged field(s)", unit.root.display(), synth.fields());
    format_output(&synth.finish())
}

/// Builder for configuring and running the accessor generator.
#[derive(Debug, Clone)]
pub struct AccessorGenerator {
    targets: Vec<PathBuf>,
    features: Vec<String>,
    output_file: String,
}

impl AccessorGenerator {
    /// Create a new generator with default settings.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            features: Vec::new(),
            output_file: DEFAULT_OUTPUT.to_string(),
        }
    }

    /// Add a directory or file to load.
    ///
    /// One directory selects the module rooted there; anything else is read
    /// as a file list. Default: the current directory.
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.targets.push(path.into());
        self
    }

    pub fn targets<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.targets.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Enable a cargo feature while evaluating `#[cfg]`. Directories only.
    pub fn feature(mut self, name: impl Into<String>) -> Self {
        self.features.push(name.into());
        self
    }

    pub fn features<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the output file name, relative to the module's child directory.
    ///
    /// Default: `accessor.rs`
    pub fn output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file = name.into();
        self
    }

    /// Load, generate and return the output path with its content.
    pub fn render(&self) -> Result<(PathBuf, String)> {
        let target = Target::from_args(&self.targets)?;
        let features: HashSet<String> = self
            .features
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        let unit = load_unit(&target, &features, &self.output_file).context("failed to load module")?;
        let code = generate_source(&unit).with_context(|| format!("failed to generate {}", unit.root.display()))?;
        Ok((unit.child_dir().join(&self.output_file), code))
    }

    /// Run the generator and write the output file.
    pub fn run(self) -> Result<PathBuf> {
        let (output_file, code) = self.render()?;

        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        // Only write if content has changed (avoids unnecessary recompilation)
        let should_write = match fs::read_to_string(&output_file) {
            Ok(existing) => existing != code,
            Err(_) => true,
        };

        if should_write {
            fs::write(&output_file, &code).with_context(|| format!("Failed to write {}", output_file.display()))?;
            log::info!("generated {}", output_file.display());
        } else {
            log::debug!("{} is up to date", output_file.display());
        }

        Ok(output_file)
    }
}

impl Default for AccessorGenerator {
    fn default() -> Self {
        Self::new()
    }
}
