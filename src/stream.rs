//! One-shot adapters over readers, files and paths.
//!
//! These are thin I/O shims around [`Hasher`]: read, feed, finalise.
//! Source failures surface as [`CtphError::SourceRead`]; the partial
//! hash state is dropped with the adapter.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::Result;
use crate::hasher::Hasher;

/// Chunk size for draining a byte source.
const READ_BLOCK_SIZE: usize = 64 * 1024;

/// Computes the fuzzy hash of everything a reader yields.
pub fn hash_reader<R: Read>(mut source: R) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut buf = vec![0u8; READ_BLOCK_SIZE];
    loop {
        let n = source.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        trace!(chunk = n, total = hasher.total_size(), "absorbed chunk");
    }
    debug!(total = hasher.total_size(), "source drained");
    hasher.digest()
}

/// Computes the fuzzy hash of an open file, from its current position.
pub fn hash_file(file: &mut File) -> Result<String> {
    hash_reader(file)
}

/// Opens the file at `path` and computes its fuzzy hash.
pub fn hash_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    debug!(path = %path.display(), "hashing file");
    let mut file = File::open(path)?;
    hash_file(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CtphError;
    use crate::hasher::hash_bytes;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content).unwrap();
        temp_file
    }

    /// A reader that fails after yielding a prefix.
    struct FailingReader {
        remaining: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.remaining == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "source went away",
                ));
            }
            let n = self.remaining.min(buf.len());
            buf[..n].fill(0xAB);
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_reader_matches_buffer() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i * 31 % 251) as u8).collect();
        let expected = hash_bytes(&data).unwrap();
        assert_eq!(hash_reader(&data[..]).unwrap(), expected);
    }

    #[test]
    fn test_path_matches_buffer() {
        let data = vec![0x5Au8; 8000];
        let file = create_temp_file(&data);
        assert_eq!(
            hash_path(file.path()).unwrap(),
            hash_bytes(&data).unwrap()
        );
    }

    #[test]
    fn test_file_hashes_from_current_position() {
        use std::io::Seek;
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 256) as u8).collect();
        let file = create_temp_file(&data);
        let mut handle = File::open(file.path()).unwrap();
        handle.seek(std::io::SeekFrom::Start(1000)).unwrap();
        assert_eq!(
            hash_file(&mut handle).unwrap(),
            hash_bytes(&data[1000..]).unwrap()
        );
    }

    #[test]
    fn test_missing_path_is_source_error() {
        let err = hash_path("definitely/not/a/real/path.bin").unwrap_err();
        assert!(matches!(err, CtphError::SourceRead(_)));
    }

    #[test]
    fn test_midstream_failure_is_source_error() {
        let err = hash_reader(FailingReader { remaining: 10_000 }).unwrap_err();
        assert!(matches!(err, CtphError::SourceRead(_)));
    }

    #[test]
    fn test_small_file_is_rejected() {
        let file = create_temp_file(&[0u8; 4096]);
        assert!(matches!(
            hash_path(file.path()),
            Err(CtphError::InputTooSmall { size: 4096 })
        ));
    }
}
