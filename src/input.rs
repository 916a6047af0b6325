use super::*;
use anyhow::{ensure, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};
use std::fs::OpenOptions;
use std::io::Read;

/// Internal representation of an analysis input file.
#[derive(Deserialize, Clone)]
pub struct Input {
    pub options: Options,
    pub histogram: HistogramParameters,
    pub particle_parameters: ParticleParameters,
}

///This helper function is a workaround to issue #368 in serde
fn default_true() -> bool {
    true
}

///This helper function is a workaround to issue #368 in serde
fn one_usize() -> usize {
    1
}

///This helper function is a workaround to issue #368 in serde
fn one_u64() -> u64 {
    1
}

///This helper function is a workaround to issue #368 in serde
fn default_print_width() -> usize {
    DEFAULT_SHOW_WIDTH
}

///This helper function is a workaround to issue #368 in serde
fn default_quantity() -> Quantity {
    Quantity::MASS
}

/// Run-level options.
#[derive(Deserialize, Clone, Debug)]
pub struct Options {
    pub name: String,
    #[serde(default = "one_usize")]
    pub num_chunks: usize,
    #[serde(default = "default_true")]
    pub write_histogram: bool,
    #[serde(default = "default_true")]
    pub print_histogram: bool,
    #[serde(default = "default_print_width")]
    pub print_width: usize,
}

/// Which per-event quantity to histogram, and its binning.
#[derive(Deserialize, Clone, Debug)]
pub struct HistogramParameters {
    #[serde(default = "default_quantity")]
    pub quantity: Quantity,
    pub bins: usize,
    pub low: f64,
    pub high: f64,
}

/// Source of the events: explicit ragged arrays, or toy events drawn from distributions.
#[derive(Deserialize, Clone, Debug)]
pub enum ParticleParameters {
    /// Event `i` holds particles `offsets[i]..offsets[i + 1]`.
    EVENTS {
        offsets: Vec<usize>,
        pt: Vec<f64>,
        eta: Vec<f64>,
        phi: Vec<f64>,
        mass: Vec<f64>,
    },
    GENERATED {
        num_events: usize,
        #[serde(default = "one_u64")]
        seed: u64,
        multiplicity: Distributions,
        pt: Distributions,
        eta: Distributions,
        phi: Distributions,
        mass: Distributions,
    },
}

/// Parse and check an input file's contents.
pub fn parse_input(input_toml: &str) -> Result<Input> {
    let input: Input = toml::from_str(input_toml).context("Could not parse TOML input file.")?;

    //Ensure nonsensical chunk and binning options fail on input
    ensure!(input.options.num_chunks > 0, "Input error: num_chunks must be greater than zero.");
    ensure!(input.histogram.bins > 0, "Input error: histogram bins must be greater than zero.");
    ensure!(
        input.histogram.high > input.histogram.low,
        "Input error: histogram high ({}) must be greater than low ({}).",
        input.histogram.high,
        input.histogram.low
    );

    Ok(input)
}

/// Read the input file at `input_file` and build its events.
pub fn input(input_file: &str) -> Result<(JaggedArray<TLorentzVectorArray>, Options, HistogramParameters)> {
    //Read input file, convert to string, and open with toml
    let mut input_toml = String::new();
    let mut file = OpenOptions::new()
        .read(true)
        .open(input_file)
        .with_context(|| format!("Input error: could not open input file {}.", input_file))?;
    file.read_to_string(&mut input_toml).context("Could not convert TOML file to string.")?;

    let input = parse_input(&input_toml)?;
    let events = build_events(&input.particle_parameters)?;
    info!(
        events = events.num_groups(),
        particles = events.content_len(),
        "read input file {}",
        input_file
    );

    Ok((events, input.options, input.histogram))
}

/// Ragged four-vectors, one group per event.
pub fn build_events(particle_parameters: &ParticleParameters) -> Result<JaggedArray<TLorentzVectorArray>> {
    match particle_parameters {
        ParticleParameters::EVENTS { offsets, pt, eta, phi, mass } => {
            ensure!(pt.len() == eta.len(), "Input error: particle input arrays of unequal length.");
            ensure!(pt.len() == phi.len(), "Input error: particle input arrays of unequal length.");
            ensure!(pt.len() == mass.len(), "Input error: particle input arrays of unequal length.");

            let particles = TLorentzVectorArray::from_ptetaphim(
                Array1::from(pt.clone()),
                Array1::from(eta.clone()),
                Array1::from(phi.clone()),
                Array1::from(mass.clone()),
            );
            JaggedArray::from_offsets(offsets.clone(), particles).context("Input error: invalid event offsets.")
        }
        ParticleParameters::GENERATED { num_events, seed, multiplicity, pt, eta, phi, mass } => {
            let mut rng = StdRng::seed_from_u64(*seed);

            let counts = (0..*num_events)
                .map(|_| -> Result<usize> { Ok(sample(multiplicity, &mut rng)?.round().max(0.) as usize) })
                .collect::<Result<Vec<usize>>>()?;
            let num_particles: usize = counts.iter().sum();

            let mut columns = [pt, eta, phi, mass].map(|_| Vec::with_capacity(num_particles));
            for _ in 0..num_particles {
                for (column, distribution) in columns.iter_mut().zip([pt, eta, phi, mass]) {
                    column.push(sample(distribution, &mut rng)?);
                }
            }
            let [pt, eta, phi, mass] = columns;

            //Transverse momenta and masses are magnitudes
            let particles = TLorentzVectorArray::from_ptetaphim(
                Array1::from(pt).mapv(f64::abs),
                Array1::from(eta),
                Array1::from(phi),
                Array1::from(mass).mapv(f64::abs),
            );
            debug!(num_events, num_particles, seed, "generated events");
            JaggedArray::from_counts(&counts, particles).context("Input error: invalid generated multiplicities.")
        }
    }
}

/// Draw one value from `distribution`.
pub fn sample(distribution: &Distributions, rng: &mut StdRng) -> Result<f64> {
    Ok(match *distribution {
        Distributions::NORMAL { mean, std } => Normal::new(mean, std)
            .context("Input error: invalid normal distribution.")?
            .sample(rng),
        Distributions::UNIFORM { min, max } => {
            ensure!(min < max, "Input error: uniform distribution needs min < max, found [{}, {}).", min, max);
            Uniform::from(min..max).sample(rng)
        }
        Distributions::POINT(x) => x,
    })
}
