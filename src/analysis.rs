use super::*;
use anyhow::{ensure, Result};
use indicatif::{ProgressBar, ProgressStyle};

/// Per-event totals and the histogram filled from them.
pub struct AnalysisResult {
    /// Summed four-momentum of every event, empty events included.
    pub totals: TLorentzVectorArray,
    pub histogram: Histogram,
    /// Events with no particles; their totals are the zero vector and are not histogrammed.
    pub empty_events: usize,
}

/// Evaluate a per-event quantity on an array of four-vectors.
pub fn evaluate(quantity: Quantity, vectors: &TLorentzVectorArray) -> Array1<f64> {
    match quantity {
        Quantity::MASS => vectors.mass(),
        Quantity::PT => vectors.pt(),
        Quantity::ETA => vectors.eta(),
        Quantity::PHI => vectors.phi(),
        Quantity::ENERGY => vectors.energy(),
    }
}

/// Reduce every event to its total four-vector and histogram the chosen quantity.
///
/// Events are processed in `options.num_chunks` consecutive chunks.
pub fn analysis_loop(
    events: &JaggedArray<TLorentzVectorArray>,
    options: &Options,
    parameters: &HistogramParameters,
) -> Result<AnalysisResult> {
    let num_events = events.num_groups();
    println!("Processing {} events...", num_events);

    ensure!(options.num_chunks > 0, "Input error: num_chunks must be greater than zero.");
    let chunk_size = (num_events + options.num_chunks - 1) / options.num_chunks;

    let title = format!("{} of {}", parameters.quantity, options.name);
    let mut histogram = Histogram::new(parameters.bins, parameters.low, parameters.high, &title)?;
    let mut totals = TLorentzVectorArray::default();
    let mut empty_events = 0;

    //Create and configure progress bar
    let bar: ProgressBar = ProgressBar::new(options.num_chunks as u64);
    bar.set_style(ProgressStyle::default_bar()
        .template("[{elapsed_precise}][{bar:40.cyan/blue}][{eta_precise}] {percent}%")
        .progress_chars("#>-"));

    //Main loop
    for chunk_index in 0..options.num_chunks {
        let start = (chunk_index * chunk_size).min(num_events);
        let stop = ((chunk_index + 1) * chunk_size).min(num_events);
        let chunk = events.slice_groups(start..stop)?;

        let chunk_totals = chunk.sum();
        let values = evaluate(parameters.quantity, &chunk_totals);
        for (&count, &value) in chunk.counts().iter().zip(values.iter()) {
            if count == 0 {
                empty_events += 1;
            } else {
                histogram.fill(value, 1.);
            }
        }
        debug!(chunk_index, start, stop, "processed chunk");

        totals = totals.concat(&chunk_totals);
        bar.inc(1);
    }
    bar.finish();

    info!(num_events, empty_events, entries = histogram.entries, "analysis finished");
    Ok(AnalysisResult { totals, histogram, empty_events })
}
