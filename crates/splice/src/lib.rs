#![crate_name = "splice"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Benchmark of the splice decryption protocol.
//!
//! A processor holds a ciphertext encrypted under the key of a data owner.
//! In the baseline, the data owner decrypts and decodes it. In the splice
//! protocol, the processor first adds a layer of encryption under its own
//! key, so that the data owner only ever sees a midtext and the processor
//! alone recovers the result. Both protocols are timed step by step, and the
//! samples are reduced into a report.

mod config;
mod errors;
mod party;
pub mod protocol;
pub mod report;
mod stats;
mod timing;

pub use config::BenchConfig;
pub use errors::{Error, Result};
pub use party::{Party, Role};
pub use stats::{SampleVector, Summary};
pub use timing::{timed_step, timed_trial};
