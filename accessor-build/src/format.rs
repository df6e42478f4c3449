//! Validation and normalisation of generated text.

use crate::error::{Error, Result};
use crate::synth::GeneratedOutput;

/// Check that the whole output parses, then pretty-print the body.
///
/// The header is emitted in its final layout already; it is kept verbatim so
/// the blank line between import groups survives.
pub fn format_output(output: &GeneratedOutput) -> Result<String> {
    let raw = format!("{}\n{}", output.header, output.body);
    let invalid = |err: syn::Error| Error::Format {
        message: err.to_string(),
        source_text: raw.clone(),
    };

    syn::parse_file(&raw).map_err(invalid)?;
    if output.body.trim().is_empty() {
        return Ok(output.header.clone());
    }

    let body = syn::parse_file(&output.body).map_err(invalid)?;
    Ok(format!("{}\n{}", output.header, prettyplease::unparse(&body)))
}
