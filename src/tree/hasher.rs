//! Content fingerprinting for files using BLAKE3

use crate::error::IndexError;
use crate::types::Fingerprint;
use blake3::Hasher;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Read size for streaming file content into the hasher
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the content fingerprint of a file
///
/// Streams the file in fixed 64 KiB chunks so memory stays bounded for
/// arbitrarily large files. The handle is closed when this returns, on
/// success and on error alike.
pub fn fingerprint(file_path: &Path) -> Result<Fingerprint, IndexError> {
    let io_err = |source| IndexError::Io {
        path: file_path.to_path_buf(),
        source,
    };

    let mut file = File::open(file_path).map_err(io_err)?;
    let mut hasher = Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(io_err(e)),
        };
        hasher.update(&buf[..n]);
    }

    Ok(Fingerprint::from_hasher(&hasher))
}
