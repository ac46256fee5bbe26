//! Reduction of the samples into the printed report.

use crate::protocol::{baseline::BaselineSamples, splice::SpliceSamples, Outcome};
use crate::{BenchConfig, Error, Result, Summary};
use ckks::CkksParameters;
use std::fmt::Write as _;
use std::io::Write;

/// Number of decoded slots shown for each protocol.
pub const PREVIEW_LENGTH: usize = 5;

/// Converts nanoseconds into milliseconds.
pub fn nano_to_millisecond(x: f64) -> f64 {
    x / 1e6
}

/// Converts a ratio into a percentage.
pub fn to_percentage(x: f64) -> f64 {
    x * 100.0
}

/// Renders the first `count` values as `[a, b, ..., ...]`.
pub fn preview(values: &[f64], count: usize) -> Result<String> {
    if count > values.len() {
        return Err(Error::DimensionMismatch(format!(
            "cannot preview {} values of a vector of {}",
            count,
            values.len()
        )));
    }
    let mut s = String::from("[");
    for v in &values[..count] {
        // Writing into a String cannot fail.
        let _ = write!(s, "{:.15}, ", v);
    }
    s.push_str("...]");
    Ok(s)
}

fn duration_row<W: Write>(out: &mut W, label: &str, nanos: f64) -> Result<()> {
    writeln!(out, "{:<100}{:>30.6} ms", label, nano_to_millisecond(nanos))?;
    Ok(())
}

fn error_row<W: Write>(out: &mut W, label: &str, error: f64) -> Result<()> {
    writeln!(out, "{:<105}{:>30.15}", label, error)?;
    Ok(())
}

fn percentage_row<W: Write>(out: &mut W, label: &str, ratio: f64) -> Result<()> {
    writeln!(out, "{:<100}{:>30.4} %", label, to_percentage(ratio))?;
    Ok(())
}

/// The five labels of a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Labels([String; 5]);

impl Labels {
    /// Labels of the execution times of one or more steps, e.g.
    /// `of step 2` or `at the data owner (step 3)`.
    fn execution_times(subject: &str) -> Self {
        Self([
            format!("Minimum execution time {}:", subject),
            format!("Maximum execution time {}:", subject),
            format!("Median of the execution times {}:", subject),
            format!("Mean of the execution times {}:", subject),
            format!("Standard deviation of the execution times {}:", subject),
        ])
    }

    fn total_execution_times() -> Self {
        Self([
            "Minimum total execution time:".to_string(),
            "Maximum total execution time:".to_string(),
            "Median of the total execution times:".to_string(),
            "Mean of the total execution times:".to_string(),
            "Standard deviation of the total execution times:".to_string(),
        ])
    }

    fn errors() -> Self {
        Self([
            "Minimum error introduced to the vector:".to_string(),
            "Maximum error introduced to the vector:".to_string(),
            "Median of the errors introduced to the vector:".to_string(),
            "Mean of the errors introduced to the vector:".to_string(),
            "Standard deviation of the errors introduced to the vector:".to_string(),
        ])
    }

    fn rows(&self, summary: &Summary) -> impl Iterator<Item = (&str, f64)> {
        let values = [
            summary.min,
            summary.max,
            summary.median,
            summary.mean,
            summary.std_deviation,
        ];
        self.0.iter().map(String::as_str).zip(values)
    }

    fn write_durations<W: Write>(&self, out: &mut W, summary: &Summary) -> Result<()> {
        for (label, value) in self.rows(summary) {
            duration_row(out, label, value)?;
        }
        Ok(())
    }

    fn write_errors<W: Write>(&self, out: &mut W, summary: &Summary) -> Result<()> {
        for (label, value) in self.rows(summary) {
            error_row(out, label, value)?;
        }
        Ok(())
    }
}

/// A ratio between the splice protocol and the baseline, at the median and
/// at the mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relative {
    /// Ratio of the medians.
    pub median: f64,
    /// Ratio of the means.
    pub mean: f64,
}

impl Relative {
    /// Ratios of `splice` over `baseline`. Two zero statistics compare as
    /// unchanged.
    ///
    /// Fails if only the baseline statistic is zero.
    pub fn between(subject: &'static str, splice: &Summary, baseline: &Summary) -> Result<Self> {
        Ok(Self {
            median: ratio(subject, splice.median, baseline.median)?,
            mean: ratio(subject, splice.mean, baseline.mean)?,
        })
    }
}

fn ratio(subject: &'static str, splice: f64, baseline: f64) -> Result<f64> {
    if baseline != 0.0 {
        Ok(splice / baseline)
    } else if splice == 0.0 {
        Ok(1.0)
    } else {
        Err(Error::ZeroBaseline(subject))
    }
}

/// Summaries of the baseline protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineReport {
    /// Latency of step 2.
    pub decrypt_decode: Summary,
    /// Errors.
    pub errors: Summary,
    /// Transmissions and exemplary vector.
    pub outcome: Outcome,
}

/// Summaries of the splice protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct SpliceReport {
    /// Latency of step 1.
    pub split_encrypt: Summary,
    /// Latency of step 3.
    pub structural_decrypt: Summary,
    /// Latency of step 5.
    pub recombine_finish: Summary,
    /// Latency of steps 1 and 5.
    pub processor: Summary,
    /// Latency of steps 1, 3 and 5.
    pub total: Summary,
    /// Errors.
    pub errors: Summary,
    /// Transmissions and exemplary vector.
    pub outcome: Outcome,
}

/// Every statistic of a benchmark run, computed up front so that rendering
/// cannot fail on the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    parameters: Vec<(&'static str, String)>,
    /// Configuration of the run.
    pub config: BenchConfig,
    /// Baseline summaries.
    pub baseline: BaselineReport,
    /// Splice summaries.
    pub splice: SpliceReport,
    /// Latency at the data owner, splice over baseline.
    pub owner_change: Relative,
    /// Total latency, splice over baseline.
    pub total_change: Relative,
    /// Error, splice over baseline.
    pub error_change: Relative,
}

impl Report {
    /// Summarizes the samples of both protocols.
    ///
    /// Fails if any sample vector is too short for a statistic, if the step
    /// vectors of the splice protocol differ in length, or if a baseline
    /// statistic is zero while the splice one is not.
    pub fn new(
        par: &CkksParameters,
        config: &BenchConfig,
        baseline_samples: &BaselineSamples,
        baseline_outcome: Outcome,
        splice_samples: &SpliceSamples,
        splice_outcome: Outcome,
    ) -> Result<Self> {
        let baseline = BaselineReport {
            decrypt_decode: baseline_samples.decrypt_decode.summary()?,
            errors: baseline_samples.errors.summary()?,
            outcome: baseline_outcome,
        };
        let splice = SpliceReport {
            split_encrypt: splice_samples.split_encrypt.summary()?,
            structural_decrypt: splice_samples.structural_decrypt.summary()?,
            recombine_finish: splice_samples.recombine_finish.summary()?,
            processor: splice_samples.processor_latencies()?.summary()?,
            total: splice_samples.total_latencies()?.summary()?,
            errors: splice_samples.errors.summary()?,
            outcome: splice_outcome,
        };

        Ok(Self {
            parameters: describe(par, config),
            config: *config,
            owner_change: Relative::between(
                "execution time at the data owner",
                &splice.structural_decrypt,
                &baseline.decrypt_decode,
            )?,
            total_change: Relative::between(
                "total execution time",
                &splice.total,
                &baseline.decrypt_decode,
            )?,
            error_change: Relative::between(
                "introduced error",
                &splice.errors,
                &baseline.errors,
            )?,
            baseline,
            splice,
        })
    }

    /// Writes the report into `out`.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "--- Parameters ---")?;
        for (name, value) in &self.parameters {
            writeln!(out, "{}={}", name, value)?;
        }

        writeln!(out)?;
        writeln!(out, "--- Baseline ---")?;
        self.write_outcome(out, &self.baseline.outcome, "baseline")?;
        Labels::execution_times("of step 2").write_durations(out, &self.baseline.decrypt_decode)?;
        Labels::errors().write_errors(out, &self.baseline.errors)?;

        writeln!(out)?;
        writeln!(out, "--- Splice ---")?;
        self.write_outcome(out, &self.splice.outcome, "splice protocol")?;
        Labels::execution_times("of step 1").write_durations(out, &self.splice.split_encrypt)?;
        Labels::execution_times("of step 3")
            .write_durations(out, &self.splice.structural_decrypt)?;
        Labels::execution_times("of step 5").write_durations(out, &self.splice.recombine_finish)?;
        Labels::execution_times("at the processor (step 1 and 5)")
            .write_durations(out, &self.splice.processor)?;
        Labels::execution_times("at the data owner (step 3)")
            .write_durations(out, &self.splice.structural_decrypt)?;
        Labels::total_execution_times().write_durations(out, &self.splice.total)?;
        Labels::errors().write_errors(out, &self.splice.errors)?;

        writeln!(out)?;
        writeln!(out, "--- Relative evaluation ---")?;
        for (subject, change) in [
            ("execution time at the data owner", &self.owner_change),
            ("total execution time", &self.total_change),
            ("introduced error", &self.error_change),
        ] {
            percentage_row(
                out,
                &format!("Relative change in the {}: (considering the median)", subject),
                change.median,
            )?;
            percentage_row(
                out,
                &format!("Relative change in the {}: (considering the mean)", subject),
                change.mean,
            )?;
        }
        Ok(())
    }

    fn write_outcome<W: Write>(&self, out: &mut W, outcome: &Outcome, name: &str) -> Result<()> {
        for transmission in &outcome.transmissions {
            writeln!(out, "{}", transmission.description)?;
            writeln!(out, "--> Size of the data: {} Bytes", transmission.bytes)?;
        }
        let count = PREVIEW_LENGTH.min(outcome.exemplary.len());
        writeln!(out, "Exemplary resulting vector of the {}:", name)?;
        writeln!(out, "{}", preview(&outcome.exemplary, count)?)?;
        Ok(())
    }
}

fn describe(par: &CkksParameters, config: &BenchConfig) -> Vec<(&'static str, String)> {
    vec![
        ("polynomial_degree", par.degree().to_string()),
        ("slots", par.slots().to_string()),
        ("moduli_sizes", format!("{:?}", par.moduli_sizes())),
        ("moduli", format!("{:?}", par.moduli())),
        ("scale", format!("2^{}", par.scale().log2())),
        ("variance", par.variance().to_string()),
        ("execution_count", config.execution_count.to_string()),
        ("fill_value", config.fill_value.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::{
        nano_to_millisecond, preview, to_percentage, Labels, Relative, Report,
    };
    use crate::protocol::{baseline::BaselineSamples, splice::SpliceSamples, Outcome, Transmission};
    use crate::{BenchConfig, Error, SampleVector};
    use ckks::CkksParametersBuilder;
    use std::error::Error as StdError;

    #[test]
    fn conversions() {
        assert_eq!(nano_to_millisecond(2_500_000.0), 2.5);
        assert_eq!(to_percentage(0.25), 25.0);
    }

    #[test]
    fn previews() -> Result<(), Box<dyn StdError>> {
        assert_eq!(
            preview(&[1.0, 2.5, 3.0], 2)?,
            "[1.000000000000000, 2.500000000000000, ...]"
        );
        assert_eq!(preview(&[1.0], 0)?, "[...]");
        assert!(matches!(
            preview(&[1.0], 2),
            Err(Error::DimensionMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn labels() {
        let labels = Labels::execution_times("at the data owner (step 3)");
        assert_eq!(labels.0[0], "Minimum execution time at the data owner (step 3):");
        assert_eq!(
            labels.0[2],
            "Median of the execution times at the data owner (step 3):"
        );
        assert_eq!(Labels::total_execution_times().0[3], "Mean of the total execution times:");
    }

    fn samples() -> (BaselineSamples, SpliceSamples) {
        let baseline = BaselineSamples {
            decrypt_decode: SampleVector::from(vec![2e6, 4e6]),
            errors: SampleVector::from(vec![1e-6, 3e-6, 1e-6, 3e-6]),
        };
        let splice = SpliceSamples {
            split_encrypt: SampleVector::from(vec![3e6, 5e6]),
            structural_decrypt: SampleVector::from(vec![1e6, 2e6]),
            recombine_finish: SampleVector::from(vec![2e6, 2e6]),
            errors: SampleVector::from(vec![2e-6, 6e-6, 2e-6, 6e-6]),
        };
        (baseline, splice)
    }

    fn outcome() -> Outcome {
        Outcome {
            transmissions: vec![Transmission::new("Transmission", 64)],
            exemplary: vec![9.0, 9.0],
        }
    }

    #[test]
    fn summaries() -> Result<(), Box<dyn StdError>> {
        let par = CkksParametersBuilder::new()
            .set_degree(8)
            .set_moduli_sizes(&[60, 40])
            .build()?;
        let config = BenchConfig {
            execution_count: 2,
            fill_value: 9.0,
        };
        let (baseline, splice) = samples();
        let report = Report::new(&par, &config, &baseline, outcome(), &splice, outcome())?;

        assert_eq!(report.splice.processor.median, 6e6);
        assert_eq!(report.splice.total.mean, 7.5e6);
        assert_eq!(
            report.owner_change,
            Relative {
                median: 0.5,
                mean: 0.5
            }
        );
        assert_eq!(report.total_change.mean, 2.5);
        assert!((report.error_change.median - 2.0).abs() < 1e-12);

        let mut out = vec![];
        report.render(&mut out)?;
        let text = String::from_utf8(out)?;
        assert!(text.contains("polynomial_degree=8"));
        assert!(text.contains("--> Size of the data: 64 Bytes"));
        assert!(text.contains("[9.000000000000000, 9.000000000000000, ...]"));
        assert!(text.contains(&format!(
            "{:<100}{:>30.6} ms",
            "Median of the execution times of step 2:", 3.0
        )));
        assert!(text.contains(&format!(
            "{:<100}{:>30.4} %",
            "Relative change in the total execution time: (considering the mean)", 250.0
        )));
        assert!(text.contains(&format!(
            "{:<105}{:>30.15}",
            "Minimum error introduced to the vector:", 2e-6
        )));
        Ok(())
    }

    #[test]
    fn too_few_samples() -> Result<(), Box<dyn StdError>> {
        let par = CkksParametersBuilder::new()
            .set_degree(8)
            .set_moduli_sizes(&[60])
            .build()?;
        let (mut baseline, mut splice) = samples();
        baseline.decrypt_decode = SampleVector::from(vec![1e6]);
        assert!(matches!(
            Report::new(&par, &BenchConfig::default(), &baseline, outcome(), &splice, outcome()),
            Err(Error::TooFewSamples(1, 2))
        ));

        let (baseline, _) = samples();
        splice.recombine_finish.push(1e6);
        assert!(matches!(
            Report::new(&par, &BenchConfig::default(), &baseline, outcome(), &splice, outcome()),
            Err(Error::DimensionMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn exact_decryption_is_unchanged() -> Result<(), Box<dyn StdError>> {
        let par = CkksParametersBuilder::new()
            .set_degree(8)
            .set_moduli_sizes(&[60])
            .build()?;
        let config = BenchConfig {
            execution_count: 2,
            fill_value: 9.0,
        };
        let (mut baseline, mut splice) = samples();
        baseline.errors = SampleVector::from(vec![0.0; 4]);
        splice.errors = SampleVector::from(vec![0.0; 4]);
        let report = Report::new(&par, &config, &baseline, outcome(), &splice, outcome())?;
        assert_eq!(
            report.error_change,
            Relative {
                median: 1.0,
                mean: 1.0
            }
        );

        let mut out = vec![];
        report.render(&mut out)?;
        let text = String::from_utf8(out)?;
        assert!(!text.contains("NaN"));
        assert!(text.contains(&format!(
            "{:<100}{:>30.4} %",
            "Relative change in the introduced error: (considering the median)", 100.0
        )));

        splice.errors = SampleVector::from(vec![0.0, 1e-9, 0.0, 1e-9]);
        assert!(matches!(
            Report::new(&par, &config, &baseline, outcome(), &splice, outcome()),
            Err(Error::ZeroBaseline("introduced error"))
        ));
        Ok(())
    }
}
