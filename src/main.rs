use anyhow::{anyhow, Context, Result};
use clap::{App, Arg};
use std::fs;
use tracing_subscriber::EnvFilter;

use sol721::config::ContractConfig;
use sol721::{generator, template};

fn main() -> Result<()> {
    let matches = App::new("sol721")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates ERC-721 Solidity contracts from a JSON configuration")
        .arg(
            Arg::with_name("CONFIG")
                .help("Contract configuration file (JSON)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Output file for the Solidity source, stdout if omitted")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("preview")
                .long("preview")
                .value_name("TOKEN_ID")
                .help("Print the metadata URI of TOKEN_ID instead of the contract")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Increase logging verbosity"),
        )
        .get_matches();

    init_tracing(matches.occurrences_of("verbose"));

    let config_path = matches
        .value_of("CONFIG")
        .ok_or_else(|| anyhow!("Missing configuration file"))?;
    let config = ContractConfig::from_path(config_path)?;

    // Template problems are user errors, report them before generating.
    template::parse_uri_template(&config.token_uri)
        .with_context(|| format!("Invalid token URI: {}", config.token_uri))?;

    if let Some(token_id) = matches.value_of("preview") {
        let token_id: u64 = token_id
            .parse()
            .with_context(|| format!("Invalid token id: {}", token_id))?;
        let uri = template::generate_uri(&config.token_uri, token_id, &config.token_parameters)?;
        println!("{}", uri);
        return Ok(());
    }

    let source = generator::generate_contract(&config);
    tracing::info!(
        custom_base_uri = %template::get_base_uri(&config.token_uri),
        "constructor argument customBaseURI_"
    );

    match matches.value_of("output") {
        Some(output_file) => {
            fs::write(output_file, &source)
                .with_context(|| format!("Failed to write output file: {}", output_file))?;
            println!("Successfully generated {}", output_file);
        }
        None => print!("{}", source),
    }

    Ok(())
}

fn init_tracing(verbosity: u64) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
