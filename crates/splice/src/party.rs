//! The two participants of a decryption protocol.

use crate::Result;
use ckks::{Ciphertext, CkksParameters, Plaintext, PublicKey, SecretKey};
use ckks_traits::{FheDecoder, FheDecrypter, FheEncoder, FheEncrypter};
use log::debug;
use rand::{CryptoRng, RngCore};
use std::fmt::{self, Display};
use std::sync::Arc;

/// Role of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Holds the ground truth and encrypted it.
    Owner,
    /// Holds the ciphertext and wants the decoded result.
    Processor,
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "data owner"),
            Role::Processor => write!(f, "processor"),
        }
    }
}

/// A participant with its own parameters and key pair.
#[derive(Debug)]
pub struct Party {
    role: Role,
    par: Arc<CkksParameters>,
    sk: SecretKey,
    pk: PublicKey,
}

impl Party {
    /// Generates a fresh key pair for the given parameters.
    pub fn generate<R: RngCore + CryptoRng>(
        role: Role,
        par: &Arc<CkksParameters>,
        rng: &mut R,
    ) -> Result<Self> {
        debug!("Creating keys and encoder for the {}", role);
        let sk = SecretKey::random(par, rng)?;
        let pk = PublicKey::new(&sk, rng)?;
        Ok(Self {
            role,
            par: par.clone(),
            sk,
            pk,
        })
    }

    /// Role of the party.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Parameters of the party.
    pub fn parameters(&self) -> &Arc<CkksParameters> {
        &self.par
    }

    /// Number of limbs of a plaintext.
    pub fn plaintext_width(&self) -> usize {
        self.par.ctx().limb_count()
    }

    /// Encodes at the default scale of the parameters.
    pub fn encode(&self, values: &[f64]) -> Result<Plaintext> {
        Ok(Plaintext::try_encode(values, self.par.encoding(), &self.par)?)
    }

    /// Decodes at the scale of the plaintext.
    pub fn decode(&self, pt: &Plaintext) -> Result<Vec<f64>> {
        Ok(Vec::<f64>::try_decode(pt, None)?)
    }

    /// Encrypts under the public key of this party.
    pub fn encrypt<R: RngCore + CryptoRng>(&self, pt: &Plaintext, rng: &mut R) -> Result<Ciphertext> {
        Ok(self.pk.try_encrypt(pt, rng)?)
    }

    /// Decrypts with the secret key of this party.
    pub fn decrypt(&self, ct: &Ciphertext) -> Result<Plaintext> {
        Ok(self.sk.try_decrypt(ct)?)
    }
}
