//! Context-triggered piecewise hashing (CTPH) producing ssdeep-compatible
//! fuzzy hashes.
//!
//! A fuzzy hash summarises a byte stream so that small localised edits
//! yield similar digests, which makes it possible to match related
//! artefacts (documents, binaries, malware variants) without exact
//! content equality. The digest text has the form `blocksize:s1:s2`,
//! where `s1` and `s2` are short base-64-alphabet strings computed at two
//! adjacent block sizes.
//!
//! The engine is a single-pass state machine: a 7-byte rolling hash
//! decides where pieces end, and one FNV-style digest per candidate block
//! size accumulates piece characters in parallel. The block size actually
//! emitted is chosen at finalisation from the total input length.
//!
//! ```no_run
//! let digest = ctph::hash_path("/usr/bin/true")?;
//! println!("{digest}");
//! # Ok::<(), ctph::CtphError>(())
//! ```
//!
//! Streaming use goes through [`Hasher`], which implements
//! [`std::io::Write`]:
//!
//! ```
//! use std::io::Write;
//!
//! let mut hasher = ctph::Hasher::new();
//! hasher.write_all(&vec![0x41; 8192]).unwrap();
//! let digest = hasher.digest().unwrap();
//! assert!(digest.starts_with(|c: char| c.is_ascii_digit()));
//! ```

/// Error types and error handling
pub mod error;

/// Opt-in logging bootstrap for the I/O adapters' events
pub mod logging;

/// The block-boundary rolling hash
pub mod rolling;

/// Per-block-size digest lanes
pub mod blockhash;

/// The streaming hash engine
pub mod hasher;

/// One-shot adapters over readers, files and paths
pub mod stream;

pub use error::{CtphError, Result};
pub use hasher::{hash_bytes, Hasher};
pub use stream::{hash_file, hash_path, hash_reader};
