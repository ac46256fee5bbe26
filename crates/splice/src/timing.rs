//! Timed spans of a protocol trial.

use crate::{Result, SampleVector};
use std::time::Instant;

/// Runs `step` and appends its wall-clock latency, in nanoseconds, to
/// `latencies`. Returns the output of the step with that latency.
///
/// Nothing is appended when the step fails.
pub fn timed_step<T, F>(latencies: &mut SampleVector, step: F) -> Result<(T, f64)>
where
    F: FnOnce() -> Result<T>,
{
    let start = Instant::now();
    let output = step();
    let elapsed = start.elapsed();

    let output = output?;
    let nanos = elapsed.as_nanos() as f64;
    latencies.push(nanos);
    Ok((output, nanos))
}

/// Runs a timed `step` producing a decoded vector, then appends the absolute
/// error of every slot with respect to `expected` to `errors`.
///
/// The errors are computed outside of the timed span.
pub fn timed_trial<F>(
    latencies: &mut SampleVector,
    errors: &mut SampleVector,
    expected: f64,
    step: F,
) -> Result<(Vec<f64>, f64)>
where
    F: FnOnce() -> Result<Vec<f64>>,
{
    let (decoded, nanos) = timed_step(latencies, step)?;
    errors.extend(decoded.iter().map(|d| (expected - d).abs()));
    Ok((decoded, nanos))
}

#[cfg(test)]
mod tests {
    use super::{timed_step, timed_trial};
    use crate::{Error, SampleVector};
    use std::{error::Error as StdError, thread::sleep, time::Duration};

    #[test]
    fn step_latency() -> Result<(), Box<dyn StdError>> {
        let mut latencies = SampleVector::new();
        let (output, nanos) = timed_step(&mut latencies, || {
            sleep(Duration::from_millis(2));
            Ok(42)
        })?;
        assert_eq!(output, 42);
        assert!(nanos >= 2e6);
        assert_eq!(latencies.as_slice(), &[nanos]);
        Ok(())
    }

    #[test]
    fn failed_step_records_nothing() {
        let mut latencies = SampleVector::new();
        let result = timed_step::<(), _>(&mut latencies, || Err(Error::EmptyInput("test")));
        assert!(matches!(result, Err(Error::EmptyInput("test"))));
        assert!(latencies.is_empty());
    }

    #[test]
    fn trial_errors() -> Result<(), Box<dyn StdError>> {
        let mut latencies = SampleVector::new();
        let mut errors = SampleVector::new();
        let (decoded, nanos) = timed_trial(&mut latencies, &mut errors, 9.0, || {
            Ok(vec![9.0, 8.5, 9.25])
        })?;
        assert_eq!(decoded, vec![9.0, 8.5, 9.25]);
        assert_eq!(latencies.as_slice(), &[nanos]);
        assert_eq!(errors.as_slice(), &[0.0, 0.5, 0.25]);

        let (_, second) = timed_trial(&mut latencies, &mut errors, 9.0, || Ok(vec![10.0; 3]))?;
        assert_eq!(latencies.last(), Some(second));
        assert_eq!(latencies.len(), 2);
        assert_eq!(errors.len(), 6);
        Ok(())
    }
}
