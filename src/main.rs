use std::{
    io::{stdout, BufWriter, Write},
    process,
    time::Instant,
};

use clap::Parser;
use colored::Colorize;
use khist::{
    cli::{Args, OutputFormat},
    error::KhistError,
    histogram::Histogram,
    input::Input,
    pipeline::{self, RunSummary},
};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("khist=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = try_main(&args) {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn try_main(args: &Args) -> Result<(), KhistError> {
    let config = args.config();
    let input = Input::from_option(args.path.as_deref());

    let started = Instant::now();
    let reader = input.open()?;
    let (histogram, summary) = pipeline::run(reader, &config)?;

    write_histogram(&histogram, args.format)?;

    if !args.quiet {
        report(&input, &summary, started);
    }
    Ok(())
}

fn write_histogram(histogram: &Histogram, format: OutputFormat) -> Result<(), KhistError> {
    let mut buf = BufWriter::new(stdout());
    match format {
        OutputFormat::Tsv => histogram.write_tsv(&mut buf)?,
        OutputFormat::Json => histogram.write_json(&mut buf)?,
    }
    buf.flush()?;
    Ok(())
}

fn report(input: &Input, summary: &RunSummary, started: Instant) {
    eprintln!(
        "{} {} ({} lines, {} distinct k-mers, {} total, {:.2?})",
        "done:".green().bold(),
        input,
        summary.sequence_lines,
        summary.distinct_kmers,
        summary.total_kmers,
        started.elapsed()
    );
}
