//! Splice protocol: the processor re-encrypts the first half of the
//! ciphertext under its own key before the data owner removes its layer of
//! encryption. Only the processor learns the result.
//!
//! For a ciphertext (c0, c1) under the key s_d of the data owner, the
//! processor encrypts c0 as (c0', c1') under its key s_p, and sends
//! C'' = (c0', c1). The data owner returns the midtext c0' + c1 * s_d, and
//! the processor decrypts C''' = (midtext, c1') with s_p:
//! c0' + c1' * s_p + c1 * s_d = c0 + c1 * s_d + noise.

use super::{Outcome, Partition, Transmission};
use crate::{timed_step, timed_trial, BenchConfig, Error, Party, Result, SampleVector};
use ckks::{Ciphertext, Plaintext};
use ckks_traits::RawLimbs;
use log::debug;
use rand::{CryptoRng, RngCore};

/// Samples accumulated over the trials of the splice protocol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpliceSamples {
    /// Latency of the split and re-encryption at the processor (step 1).
    pub split_encrypt: SampleVector,
    /// Latency of the structural decryption at the data owner (step 3).
    pub structural_decrypt: SampleVector,
    /// Latency of the recombination, decryption and decoding at the
    /// processor (step 5).
    pub recombine_finish: SampleVector,
    /// Absolute error of every decoded slot.
    pub errors: SampleVector,
}

impl SpliceSamples {
    /// Accumulators sized for `trials` trials over `slots` slots.
    pub fn with_capacity(trials: usize, slots: usize) -> Self {
        Self {
            split_encrypt: SampleVector::with_capacity(trials),
            structural_decrypt: SampleVector::with_capacity(trials),
            recombine_finish: SampleVector::with_capacity(trials),
            errors: SampleVector::with_capacity(trials * slots),
        }
    }

    /// Latency at the processor (steps 1 and 5), trial by trial.
    pub fn processor_latencies(&self) -> Result<SampleVector> {
        SampleVector::elementwise_sum(&[&self.split_encrypt, &self.recombine_finish])
    }

    /// Latency at the data owner (step 3), trial by trial.
    pub fn owner_latencies(&self) -> &SampleVector {
        &self.structural_decrypt
    }

    /// Total latency (steps 1, 3 and 5), trial by trial.
    pub fn total_latencies(&self) -> Result<SampleVector> {
        SampleVector::elementwise_sum(&[
            &self.split_encrypt,
            &self.structural_decrypt,
            &self.recombine_finish,
        ])
    }
}

/// Output of the first step, held by the processor.
#[derive(Debug, Clone)]
pub struct SplitCiphertext {
    /// C'': lower half of the re-encryption followed by the upper half of
    /// the source. Sent to the data owner.
    pub spliced: Ciphertext,
    /// The re-encryption of the lower half of the source, whose upper half
    /// the processor keeps for the last step.
    pub retained: Ciphertext,
}

/// Step 1: splits the limbs of `source`, reinterprets the lower half as a
/// plaintext at the scale of the processor and encrypts it under the
/// processor key.
pub fn split_and_encrypt<R: RngCore + CryptoRng>(
    source: &Ciphertext,
    processor: &Party,
    rng: &mut R,
) -> Result<SplitCiphertext> {
    let partition = Partition::of(source.raw_len());
    let (lower, upper) = partition.split(source.raw_limbs())?;
    if lower.len() != processor.plaintext_width() {
        return Err(Error::DimensionMismatch(format!(
            "a lower half of {} limbs does not fit a plaintext of {} limbs",
            lower.len(),
            processor.plaintext_width()
        )));
    }

    let par = processor.parameters();
    let lower = Plaintext::try_from_raw_limbs(lower, par.scale(), par)?;
    let retained = processor.encrypt(&lower, rng)?;

    let mut spliced = retained.clone();
    let (retained_lower, _) = partition.split(retained.raw_limbs())?;
    partition.splice_into(spliced.raw_limbs_mut(), retained_lower, upper)?;

    Ok(SplitCiphertext { spliced, retained })
}

/// Step 3: the data owner decrypts C'' into the midtext, which is neither
/// decoded nor validated.
pub fn structural_decrypt(spliced: &Ciphertext, owner: &Party) -> Result<Plaintext> {
    owner.decrypt(spliced)
}

/// Step 5: builds C''' from the midtext and the upper half of the retained
/// ciphertext, then decrypts and decodes it with the processor key.
pub fn recombine_and_finish(
    midtext: &Plaintext,
    retained: &Ciphertext,
    processor: &Party,
) -> Result<Vec<f64>> {
    let partition = Partition::of(retained.raw_len());
    let (_, upper) = partition.split(retained.raw_limbs())?;

    let mut recombined = retained.clone();
    partition.splice_into(recombined.raw_limbs_mut(), midtext.raw_limbs(), upper)?;

    let pt = processor.decrypt(&recombined)?;
    processor.decode(&pt)
}

/// What a single trial returns besides its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SpliceTrial {
    /// Size of C'' in bytes.
    pub spliced_bytes: usize,
    /// Size of the midtext in bytes.
    pub midtext_bytes: usize,
    /// The decoded vector.
    pub decoded: Vec<f64>,
}

/// Runs one trial, timing steps 1, 3 and 5.
pub fn run_once<R: RngCore + CryptoRng>(
    source: &Ciphertext,
    owner: &Party,
    processor: &Party,
    fill_value: f64,
    samples: &mut SpliceSamples,
    rng: &mut R,
) -> Result<SpliceTrial> {
    let (split, _) = timed_step(&mut samples.split_encrypt, || {
        split_and_encrypt(source, processor, rng)
    })?;

    let (midtext, _) = timed_step(&mut samples.structural_decrypt, || {
        structural_decrypt(&split.spliced, owner)
    })?;

    let (decoded, _) = timed_trial(
        &mut samples.recombine_finish,
        &mut samples.errors,
        fill_value,
        || recombine_and_finish(&midtext, &split.retained, processor),
    )?;

    Ok(SpliceTrial {
        spliced_bytes: split.spliced.raw_size_in_bytes(),
        midtext_bytes: midtext.raw_size_in_bytes(),
        decoded,
    })
}

/// Runs `config.execution_count` trials, calling `after_trial` with the
/// index of every completed trial.
pub fn run<R, F>(
    source: &Ciphertext,
    owner: &Party,
    processor: &Party,
    config: &BenchConfig,
    samples: &mut SpliceSamples,
    rng: &mut R,
    mut after_trial: F,
) -> Result<Outcome>
where
    R: RngCore + CryptoRng,
    F: FnMut(usize),
{
    config.validate()?;

    let mut outcome = Outcome {
        transmissions: vec![],
        exemplary: vec![],
    };
    for i in 0..config.execution_count {
        let trial = run_once(source, owner, processor, config.fill_value, samples, rng)?;

        if i == 0 {
            let to_owner = Transmission::new(
                "Transmission of c'' to the data owner",
                trial.spliced_bytes,
            );
            let to_processor = Transmission::new(
                "Transmission of the midtext to the processor",
                trial.midtext_bytes,
            );
            debug!("Step 1: Processor adds additional encryption to c");
            debug!("Step 2: {} ({} bytes)", to_owner.description, to_owner.bytes);
            debug!("Step 3: Data owner decrypts c'' to obtain the midtext");
            debug!(
                "Step 4: {} ({} bytes)",
                to_processor.description, to_processor.bytes
            );
            debug!("Step 5: Processor creates c''' from the midtext and c'_1, then decrypts it");
            outcome.transmissions = vec![to_owner, to_processor];
            outcome.exemplary = trial.decoded;
        }
        after_trial(i);
    }
    Ok(outcome)
}
