//! Program image preloading.
//!
//! Loaders run before the machine does and never interleave with
//! execution: they populate memory through the same growth discipline the
//! interpreter uses, then hand the memory over.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::consts::LOAD_CHUNK_SIZE;
use crate::error::VmError;
use crate::memory::Memory;

/// Stream the file at `path` into memory at `*cursor`, advancing the
/// cursor by the number of bytes read.
///
/// Memory is grown one chunk ahead of each read, so the break can land up
/// to a chunk past the last byte loaded, and a file whose final chunk
/// would cross the ceiling fails even if its bytes alone would fit.
pub fn load_file(memory: &mut Memory, cursor: &mut u32, path: impl AsRef<Path>) -> Result<(), VmError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), offset = *cursor, "loading");

    let mut file = File::open(path).map_err(|source| VmError::Load {
        path: path.into(),
        source,
    })?;

    loop {
        memory.ensure_span(*cursor, LOAD_CHUNK_SIZE as u64)?;
        let read = file
            .read(memory.slice_mut(*cursor, LOAD_CHUNK_SIZE))
            .map_err(|source| VmError::Load {
                path: path.into(),
                source,
            })?;
        if read == 0 {
            return Ok(());
        }
        *cursor += read as u32;
    }
}
