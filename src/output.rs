use super::*;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

/// Write the histogram as TOML to `{name}histogram.toml`.
pub fn write_histogram(histogram: &Histogram, options: &Options) -> Result<()> {
    let file_name = format!("{}{}", options.name, "histogram.toml");
    let histogram_output_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&file_name)
        .with_context(|| format!("Output error: could not open {}.", file_name))?;
    let mut histogram_file_stream = BufWriter::with_capacity(WRITE_BUFFER_SIZE, histogram_output_file);

    let toml = toml::to_string(histogram).context("Output error: could not serialize histogram.")?;
    writeln!(histogram_file_stream, "{}", toml).with_context(|| format!("Output error: could not write to {}.", file_name))?;
    histogram_file_stream.flush().with_context(|| format!("Output error: could not flush {}.", file_name))?;

    info!("wrote {}", file_name);
    Ok(())
}

/// Print a short summary of the run, and the histogram when requested.
pub fn print_summary(result: &AnalysisResult, options: &Options) {
    let histogram = &result.histogram;
    println!("{}: {}", options.name, histogram.title);
    println!(
        "events: {}, empty: {}, entries: {}, underflow: {}, overflow: {}",
        result.totals.len(),
        result.empty_events,
        histogram.entries,
        histogram.underflows(),
        histogram.overflows()
    );
    if histogram.tsumw > 0. {
        let mean = histogram.tsumwx / histogram.tsumw;
        let variance = histogram.tsumwx2 / histogram.tsumw - mean * mean;
        println!("mean: {:.5}, std: {:.5}", mean, variance.max(0.).sqrt());
    }
    if options.print_histogram {
        println!("{}", histogram.show(options.print_width));
    }
}
