#![crate_name = "ckks"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Approximate homomorphic encryption over the reals (RNS-CKKS).
//!
//! The library covers what a decryption protocol needs: parameters, keys,
//! encoding of real vectors, public and secret key encryption, decryption,
//! and direct access to the limbs of plaintexts and ciphertexts.

mod ciphertext;
mod encoding;
mod errors;
mod keys;
mod parameters;
mod plaintext;

pub use ciphertext::Ciphertext;
pub use errors::{Error, ParametersError, Result};
pub use keys::{PublicKey, SecretKey};
pub use parameters::{CkksParameters, CkksParametersBuilder};
pub use plaintext::{Encoding, Plaintext};
