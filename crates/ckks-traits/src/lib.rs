#![crate_name = "ckks_traits"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Traits for approximate homomorphic encryption schemes.

use rand::{CryptoRng, RngCore};
use std::sync::Arc;

/// The homomorphic encryption parameters.
pub trait FheParameters {}

/// Indicates that an object is parametrized.
pub trait FheParametrized {
    /// The type of the FHE parameters.
    type Parameters: FheParameters;
}

/// Encoding used when encoding a [`FhePlaintext`].
pub trait FhePlaintextEncoding {}

/// A plaintext which will encode one (or more) value(s).
pub trait FhePlaintext
where
    Self: Sized + FheParametrized,
{
    /// The type of the encoding.
    type Encoding: FhePlaintextEncoding;
}

/// Encode a value using a specified encoding.
pub trait FheEncoder<V>
where
    Self: FhePlaintext,
{
    /// The type of error returned.
    type Error;

    /// Attempt to encode a value within a [`FhePlaintext`].
    fn try_encode(
        value: V,
        encoding: Self::Encoding,
        par: &Arc<Self::Parameters>,
    ) -> Result<Self, Self::Error>;
}

/// Decode the value in the plaintext with the specified (optional) encoding.
pub trait FheDecoder<P: FhePlaintext>
where
    Self: Sized,
{
    /// The type of error returned.
    type Error;

    /// Attempt to decode a [`FhePlaintext`] into a value, using an
    /// (optional) encoding. When no encoding is given, the one carried by
    /// the plaintext is used.
    fn try_decode<O>(pt: &P, encoding: O) -> Result<Self, Self::Error>
    where
        O: Into<Option<P::Encoding>>;
}

/// A ciphertext which will encrypt a plaintext.
pub trait FheCiphertext
where
    Self: Sized + FheParametrized,
{
}

/// Encrypt a plaintext into a ciphertext.
pub trait FheEncrypter<
    P: FhePlaintext<Parameters = Self::Parameters>,
    C: FheCiphertext<Parameters = Self::Parameters>,
>: FheParametrized
{
    /// The type of error returned.
    type Error;

    /// Try to encrypt an [`FhePlaintext`] into an [`FheCiphertext`].
    fn try_encrypt<R: RngCore + CryptoRng>(&self, pt: &P, rng: &mut R) -> Result<C, Self::Error>;
}

/// Decrypt a ciphertext into a plaintext
pub trait FheDecrypter<
    P: FhePlaintext<Parameters = Self::Parameters>,
    C: FheCiphertext<Parameters = Self::Parameters>,
>: FheParametrized
{
    /// The type of error returned.
    type Error;

    /// Try to decrypt an [`FheCiphertext`] into an [`FhePlaintext`].
    fn try_decrypt(&self, ct: &C) -> Result<P, Self::Error>;
}

/// Direct access to the limbs backing a plaintext or a ciphertext.
///
/// The limbs are exposed in their storage order: polynomial by polynomial,
/// then modulus by modulus, then coefficient by coefficient. The length of
/// the slice is fixed for the lifetime of the value, so writing through
/// [`RawLimbs::raw_limbs_mut`] can change the content but never the shape.
pub trait RawLimbs {
    /// The limbs, in storage order.
    fn raw_limbs(&self) -> &[u64];

    /// The limbs, in storage order, mutably.
    fn raw_limbs_mut(&mut self) -> &mut [u64];

    /// Number of limbs.
    fn raw_len(&self) -> usize {
        self.raw_limbs().len()
    }

    /// Size in bytes of the limbs.
    fn raw_size_in_bytes(&self) -> usize {
        self.raw_len() * std::mem::size_of::<u64>()
    }
}
