//! Baseline protocol: the ciphertext is sent to the data owner, which
//! decrypts and decodes it, and sends the decoded vector back.

use super::{Outcome, Transmission};
use crate::{timed_trial, BenchConfig, Party, Result, SampleVector};
use ckks::Ciphertext;
use ckks_traits::RawLimbs;
use log::debug;
use std::mem::size_of;

/// Samples accumulated over the trials of the baseline protocol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineSamples {
    /// Latency of the decryption and decoding at the data owner (step 2).
    pub decrypt_decode: SampleVector,
    /// Absolute error of every decoded slot.
    pub errors: SampleVector,
}

impl BaselineSamples {
    /// Accumulators sized for `trials` trials over `slots` slots.
    pub fn with_capacity(trials: usize, slots: usize) -> Self {
        Self {
            decrypt_decode: SampleVector::with_capacity(trials),
            errors: SampleVector::with_capacity(trials * slots),
        }
    }
}

/// Runs one trial: the data owner decrypts and decodes `ciphertext` in a
/// single timed span.
///
/// Returns the latency in nanoseconds and the decoded vector.
pub fn run_once(
    ciphertext: &Ciphertext,
    owner: &Party,
    fill_value: f64,
    samples: &mut BaselineSamples,
) -> Result<(f64, Vec<f64>)> {
    let (decoded, latency) = timed_trial(
        &mut samples.decrypt_decode,
        &mut samples.errors,
        fill_value,
        || {
            let pt = owner.decrypt(ciphertext)?;
            owner.decode(&pt)
        },
    )?;
    Ok((latency, decoded))
}

/// Runs `config.execution_count` trials, calling `after_trial` with the
/// index of every completed trial.
pub fn run<F>(
    ciphertext: &Ciphertext,
    owner: &Party,
    config: &BenchConfig,
    samples: &mut BaselineSamples,
    mut after_trial: F,
) -> Result<Outcome>
where
    F: FnMut(usize),
{
    config.validate()?;

    let mut outcome = Outcome {
        transmissions: vec![],
        exemplary: vec![],
    };
    for i in 0..config.execution_count {
        let (_, decoded) = run_once(ciphertext, owner, config.fill_value, samples)?;

        if i == 0 {
            let to_owner = Transmission::new(
                "Transmission of the encrypted computation result to the data owner",
                ciphertext.raw_size_in_bytes(),
            );
            let to_processor = Transmission::new(
                "Transmission of the plaintext result back to the processor",
                decoded.len() * size_of::<f64>(),
            );
            debug!("Step 1: {} ({} bytes)", to_owner.description, to_owner.bytes);
            debug!("Step 2: Data owner decrypts and decodes the vector");
            debug!(
                "Step 3: {} ({} bytes)",
                to_processor.description, to_processor.bytes
            );
            outcome.transmissions = vec![to_owner, to_processor];
            outcome.exemplary = decoded;
        }
        after_trial(i);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::{run, run_once, BaselineSamples};
    use crate::{BenchConfig, Error, Party, Role};
    use ckks::CkksParametersBuilder;
    use rand::thread_rng;
    use std::error::Error as StdError;

    fn setup(variance: usize) -> Result<(Party, ckks::Ciphertext), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let par = CkksParametersBuilder::new()
            .set_degree(64)
            .set_moduli_sizes(&[60, 40, 40, 60])
            .set_variance(variance)
            .build_arc()?;
        let owner = Party::generate(Role::Owner, &par, &mut rng)?;
        let ct = owner.encrypt(&owner.encode(&[9.0; 32])?, &mut rng)?;
        Ok((owner, ct))
    }

    #[test]
    fn single_trial() -> Result<(), Box<dyn StdError>> {
        let (owner, ct) = setup(0)?;
        let mut samples = BaselineSamples::default();
        let (latency, decoded) = run_once(&ct, &owner, 9.0, &mut samples)?;
        assert!(latency > 0.0);
        assert_eq!(decoded.len(), 32);
        assert_eq!(samples.decrypt_decode.as_slice(), &[latency]);
        assert_eq!(samples.errors.len(), 32);
        assert!(samples.errors.max()? < 1e-6);
        Ok(())
    }

    #[test]
    fn trials() -> Result<(), Box<dyn StdError>> {
        let (owner, ct) = setup(10)?;
        let config = BenchConfig {
            execution_count: 4,
            fill_value: 9.0,
        };
        let mut samples = BaselineSamples::with_capacity(4, 32);
        let mut completed = vec![];
        let outcome = run(&ct, &owner, &config, &mut samples, |i| completed.push(i))?;

        assert_eq!(completed, vec![0, 1, 2, 3]);
        assert_eq!(samples.decrypt_decode.len(), 4);
        assert_eq!(samples.errors.len(), 4 * 32);
        assert_eq!(outcome.exemplary.len(), 32);
        assert_eq!(outcome.transmissions.len(), 2);
        assert_eq!(outcome.transmissions[0].bytes, 2 * 4 * 64 * 8);
        assert_eq!(outcome.transmissions[1].bytes, 32 * 8);
        Ok(())
    }

    #[test]
    fn too_few_trials() -> Result<(), Box<dyn StdError>> {
        let (owner, ct) = setup(10)?;
        let config = BenchConfig {
            execution_count: 1,
            fill_value: 9.0,
        };
        let mut samples = BaselineSamples::default();
        assert!(matches!(
            run(&ct, &owner, &config, &mut samples, |_| ()),
            Err(Error::TooFewSamples(1, 2))
        ));
        assert!(samples.decrypt_decode.is_empty());
        Ok(())
    }
}
