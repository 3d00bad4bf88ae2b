//! Source document loading.
//!
//! Documents are returned as raw bytes; parsing is left to the resolver so
//! that each resolution builds its own tree.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads a source document from the filesystem.
///
/// Files ending in `.gz` are decompressed transparently.
///
/// # Examples
///
/// ```no_run
/// use iacline::file::loader::load_source_file;
///
/// let data = load_source_file("deployment.yaml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read (permissions, etc.)
/// - A `.gz` file is not valid gzip data
pub fn load_source_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_gzipped {
        read_gzipped_file(path_ref)
    } else {
        fs::read(path_ref).with_context(|| format!("Failed to read {}", path_ref.display()))
    }
}

/// Loads a source document from standard input.
///
/// Gzip input is detected by its magic bytes (0x1f 0x8b) and decompressed.
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - Gzip-looking input cannot be decompressed
pub fn load_source_from_stdin() -> Result<Vec<u8>> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        Ok(buffer)
    }
}

/// Loads a document from a path, where `-` means stdin.
pub fn load_source(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        load_source_from_stdin()
    } else {
        load_source_file(path)
    }
}

/// Replaces Windows `\r\n` line endings with `\n`.
///
/// Lone `\r` bytes are left untouched.
pub fn normalize_line_endings(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut bytes = input.iter().peekable();
    while let Some(&byte) = bytes.next() {
        if byte == b'\r' && bytes.peek() == Some(&&b'\n') {
            continue;
        }
        output.push(byte);
    }
    output
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = Vec::new();
    decoder
        .read_to_end(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = Vec::new();
    decoder
        .read_to_end(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(
            normalize_line_endings(b"kind: Pod\r\nspec:\r\n  a: 1\r\n"),
            b"kind: Pod\nspec:\n  a: 1\n".to_vec()
        );
    }

    #[test]
    fn test_normalize_line_endings_keeps_lone_carriage_returns() {
        assert_eq!(normalize_line_endings(b"a\rb\r\n"), b"a\rb\n".to_vec());
        assert_eq!(normalize_line_endings(b"trailing\r"), b"trailing\r".to_vec());
    }

    #[test]
    fn test_normalize_line_endings_unix_input_unchanged() {
        let input = b"metadata:\n  name: web\n";
        assert_eq!(normalize_line_endings(input), input.to_vec());
    }

    #[test]
    fn test_decompress_gzip_bytes() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"kind: Pod\n").unwrap();
        let compressed = encoder.finish().unwrap();

        assert!(compressed.starts_with(&[0x1f, 0x8b]));
        assert_eq!(decompress_gzip_bytes(&compressed).unwrap(), b"kind: Pod\n");
    }

    #[test]
    fn test_read_gzipped_file_corrupted() {
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let gz_path = temp_file.path().with_extension("yaml.gz");
        fs::write(&gz_path, b"not gzip data").unwrap();

        let result = read_gzipped_file(&gz_path);
        assert!(result.is_err());
        let err_msg = format!("{:#}", result.unwrap_err());
        assert!(err_msg.contains("decompress") || err_msg.contains("corrupted"));
        let _ = fs::remove_file(&gz_path);
    }
}
