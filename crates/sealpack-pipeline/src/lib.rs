//! File transform pipeline: operation descriptors, the single-file
//! dispatcher, the concurrent directory fan-out coordinator, and the
//! chained-operation orchestrator.
//!
//! Layout:
//! - `descriptor.rs`: validated operation and algorithm types
//! - `gateway.rs`: whole-file durable read/write primitives
//! - `dispatch.rs`: single-file read/transform/write dispatcher
//! - `fanout.rs`: per-file concurrent directory coordinator
//! - `chain.rs`: two-step orchestrator staging through a transient file
//! - `model.rs`: aggregate summary record
//! - `error.rs`: pipeline error type
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

pub mod chain;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod fanout;
pub mod gateway;
pub mod model;

pub use chain::{ChainOrder, process_chained};
pub use descriptor::{CipherAlgorithm, CompressionAlgorithm, Operation};
pub use dispatch::process_file;
pub use error::{PipelineError, PipelineResult};
pub use fanout::process_directory;
pub use model::Summary;
