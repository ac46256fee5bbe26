//! Compares the latency and the precision of the splice protocol with a
//! single-party decryption.

use ckks::CkksParameters;
use clap::Parser;
use console::style;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, LevelFilter};
use rand::thread_rng;
use splice::protocol::baseline::{self, BaselineSamples};
use splice::protocol::splice::{self as splice_protocol, SpliceSamples};
use splice::report::Report;
use splice::{BenchConfig, Party, Role};
use std::error::Error;
use std::io::{stdout, Write};

#[derive(Parser)]
#[command(
    name = "splice-bench",
    author,
    version,
    about = "Benchmark of the splice decryption protocol against a single-party decryption"
)]
struct Cli {
    /// Number of trials of each protocol.
    #[arg(short = 'n', long, default_value_t = BenchConfig::DEFAULT_EXECUTION_COUNT, value_parser = parse_execution_count)]
    execution_count: usize,
    /// Value of every slot of the encrypted vector.
    #[arg(short = 'f', long, default_value_t = BenchConfig::DEFAULT_FILL_VALUE, allow_negative_numbers = true)]
    fill_value: f64,
    /// Enables debug logging.
    #[arg(long)]
    debug: bool,
}

fn parse_execution_count(s: &str) -> Result<usize, String> {
    let count: usize = s.parse().map_err(|e| format!("{}", e))?;
    if count < BenchConfig::MIN_EXECUTION_COUNT {
        return Err(format!(
            "at least {} trials are needed",
            BenchConfig::MIN_EXECUTION_COUNT
        ));
    }
    Ok(count)
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn progress_bar(len: usize, name: &str) -> Result<ProgressBar, Box<dyn Error>> {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(ProgressStyle::with_template(
        "{msg:>10} [{bar:40.magenta/blue}] {pos}/{len} ({eta})",
    )?);
    bar.set_message(name.to_string());
    Ok(bar)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = BenchConfig {
        execution_count: cli.execution_count,
        fill_value: cli.fill_value,
    };
    config.validate()?;

    println!("{}", style("--- Preparations ---").magenta().bold());
    let mut rng = thread_rng();

    // Each party builds its own parameters.
    let owner_par = CkksParameters::benchmark()?;
    let processor_par = CkksParameters::benchmark()?;
    let owner = Party::generate(Role::Owner, &owner_par, &mut rng)?;
    let processor = Party::generate(Role::Processor, &processor_par, &mut rng)?;
    println!(
        "{} degree={} moduli_sizes={:?} scale=2^{}",
        style("parameters:").magenta().bold(),
        owner_par.degree(),
        owner_par.moduli_sizes(),
        owner_par.scale().log2()
    );

    let input = config.input_vector(owner_par.slots());
    let ciphertext = owner.encrypt(&owner.encode(&input)?, &mut rng)?;
    debug!(
        "Encrypted {} slots holding {} under the key of the {}",
        input.len(),
        config.fill_value,
        owner.role()
    );

    println!("{}", style("--- Baseline ---").magenta().bold());
    let mut baseline_samples = BaselineSamples::with_capacity(config.execution_count, input.len());
    let bar = progress_bar(config.execution_count, "baseline")?;
    let baseline_outcome = baseline::run(&ciphertext, &owner, &config, &mut baseline_samples, |_| {
        bar.inc(1)
    })?;
    bar.finish_and_clear();
    info!("Completed {} baseline trials", config.execution_count);

    println!("{}", style("--- Splice ---").magenta().bold());
    let mut splice_samples = SpliceSamples::with_capacity(config.execution_count, input.len());
    let bar = progress_bar(config.execution_count, "splice")?;
    let splice_outcome = splice_protocol::run(
        &ciphertext,
        &owner,
        &processor,
        &config,
        &mut splice_samples,
        &mut rng,
        |_| bar.inc(1),
    )?;
    bar.finish_and_clear();
    info!("Completed {} splice trials", config.execution_count);

    let report = Report::new(
        &owner_par,
        &config,
        &baseline_samples,
        baseline_outcome,
        &splice_samples,
        splice_outcome,
    )?;
    let mut out = stdout().lock();
    writeln!(out)?;
    report.render(&mut out)?;
    Ok(())
}
