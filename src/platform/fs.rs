// LogSheet - platform/fs.rs
//
// Filesystem helpers: lenient single-byte reads and atomic writes.

use std::io;
use std::path::Path;

/// Decode bytes as ISO-8859-1.
///
/// Every byte maps to the code point of the same value, so decoding never
/// fails regardless of what the instrument wrote into the preamble.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Read the full content of a file with single-byte decoding.
pub fn read_file_latin1(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_latin1(&bytes))
}

/// Write `bytes` to `path` atomically (write temp -> rename).
///
/// An existing file at `path` is replaced. If any step fails the
/// destination is left as it was and the temp file is removed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name")
        })?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    if let Err(e) = std::fs::write(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        e
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "File written");
    Ok(())
}
