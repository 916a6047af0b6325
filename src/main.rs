use anyhow::{bail, Result};
use std::env;
use tracing_subscriber::EnvFilter;

use libRustHEPVec::{analysis, input, output};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let input_file = match args.len() {
        1 => "input.toml".to_string(),
        2 => args[1].clone(),
        _ => bail!("Too many command line arguments. Usage: RustHEPVec <input.toml>"),
    };

    let (events, options, histogram_parameters) = input::input(&input_file)?;

    let result = analysis::analysis_loop(&events, &options, &histogram_parameters)?;

    output::print_summary(&result, &options);
    if options.write_histogram {
        output::write_histogram(&result.histogram, &options)?;
    }

    println!("Finished!");
    Ok(())
}
