//! Byte-level reversible transforms used by the sealpack pipeline.
//!
//! Layout:
//! - `rle.rs`: run-length compression codec
//! - `vigenere.rs`: cyclic-key substitution cipher and key validation
//! - `error.rs`: shared codec error type
#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod rle;
pub mod vigenere;

pub use error::{CodecError, CodecResult};
pub use vigenere::Key;
