//! SDA map evolution CLI - Run the evolutionary search from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use sda_mapgen::{BitStream, OnesDensity, SearchConfig, SearchEngine};

/// Stream prefix scored by the built-in fitness.
const FITNESS_BITS: usize = 100;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [output-prefix]", args[0]);
        eprintln!();
        eprintln!("Evolve self-driving automata from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json    Path to search configuration file");
        eprintln!("  output-prefix  Prefix for the best-genome output (default: best)");
        eprintln!();
        eprintln!("The built-in fitness scores the density of 1 bits in the first");
        eprintln!("{FITNESS_BITS} generated bits. An example configuration is printed");
        eprintln!("with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let output_prefix = args.get(2).map(String::as_str).unwrap_or("best");

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: SearchConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    println!("SDA Map Evolution");
    println!("=================");
    println!("Automaton states: {}", config.sda_size);
    println!(
        "Population: {} (tournament {})",
        config.population_size, config.tournament_size
    );
    println!("Max mutations: {}", config.max_mutations);
    println!("Generations: {}", config.generations);
    println!();

    let mut engine =
        SearchEngine::new(config, OnesDensity::new(FITNESS_BITS)).unwrap_or_else(|e| {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        });

    println!("Running evolution...");
    let start = Instant::now();
    engine.evolve();
    let elapsed = start.elapsed();

    println!();
    println!("Best score: {}", engine.best_score());
    println!(
        "Time: {:.2}s ({:.1} generations/s)",
        elapsed.as_secs_f32(),
        engine.generation() as f32 / elapsed.as_secs_f32()
    );

    let best = engine.best();
    let genome_path = PathBuf::from(format!("{output_prefix}.genome.json"));
    let json = serde_json::to_string_pretty(best).unwrap();
    fs::write(&genome_path, json).unwrap_or_else(|e| {
        eprintln!("Error writing genome file: {}", e);
        std::process::exit(1);
    });
    println!("Best genome written to {}", genome_path.display());

    let mut stream = BitStream::new(best);
    let bits: String = stream
        .next_bits(64)
        .iter()
        .map(|&b| char::from(b'0' + b))
        .collect();
    println!("First 64 bits: {}", bits);
}

fn print_example_config() {
    let config = SearchConfig::default();
    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
