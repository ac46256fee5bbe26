#![crate_name = "ckks_math"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Mathematical utilities for the ckks workspace: modular arithmetic,
//! negacyclic number-theoretic transforms, residue number systems and
//! polynomials over the resulting rings.

mod errors;

pub mod ntt;
pub mod rns;
pub mod rq;
pub mod zq;

pub use errors::{Error, Result};
