//! # scoreprep-core — Shared Collaborators
//!
//! Capabilities consumed by the preprocessing pipeline in `scoreprep-ml` but
//! owned here, so the pipeline itself stays free of filesystem and logging
//! concerns:
//!
//! 1. **Persistence** — atomic JSON artifact save/load
//! 2. **Logging** — process-wide `tracing` initialization with a file sink
//! 3. **Hashing** — SHA-256 content fingerprints for written artifacts

pub mod hash;
pub mod logging;
pub mod persistence;

pub use hash::{hash_bytes, hash_file};
pub use logging::{LoggingGuard, init_logging};
pub use persistence::{atomic_write_json, load_json};
