/// `ncmkit dump`: write recovered audio (and cover).
pub mod dump;
/// `ncmkit info`: show format and metadata.
pub mod info;

use crate::error::{CliError, Result};
use crate::util::ensure_file;
use std::path::Path;

/// Read and decode one container; failures carry the file name.
pub fn decode_file(input: &Path) -> Result<ncmkit::Decoded> {
    ensure_file(input)?;
    let data = std::fs::read(input)?;
    ncmkit::decode(&data).map_err(|source| CliError::Decode {
        file: input.display().to_string(),
        source,
    })
}
