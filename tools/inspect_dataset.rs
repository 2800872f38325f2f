//! Dataset Inspection Tool
//!
//! Builds (or loads from cache) the prepared dataset and prints the label
//! class distribution plus the shapes of the train/validation/test
//! partitions. Use it to sanity-check a dataset and warm the cache before
//! training.
//!
//! # Usage
//!
//! ```bash
//! # Default paths (dataset/cullpdb+profile_6133.npy, cache in dataset/)
//! cargo run --release --bin inspect_dataset
//!
//! # From a TOML config
//! cargo run --release --bin inspect_dataset -- --config configs/cullpdb.toml
//!
//! # Generate a sample config
//! cargo run --release --bin inspect_dataset -- --generate-config configs/cullpdb.toml
//! ```

use ndarray::Axis;
use pssp_dataset::{Pipeline, PrepConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None => run(PrepConfig::default()),
        Some("--config") => {
            let Some(path) = args.get(2) else {
                eprintln!("Error: --config requires a path argument");
                std::process::exit(1);
            };
            match PrepConfig::load_toml(path) {
                Ok(config) => run(config),
                Err(e) => {
                    eprintln!("Error loading config {path}: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some("--generate-config") => {
            let Some(path) = args.get(2) else {
                eprintln!("Error: --generate-config requires a path argument");
                std::process::exit(1);
            };
            generate_sample_config(path);
        }
        Some("--help") | Some("-h") => print_usage(&args[0]),
        Some(other) => {
            eprintln!("Unknown argument: {other}");
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!(
        r#"
Dataset Inspection Tool

Usage:
    {program}                            Inspect with default paths
    {program} --config <path.toml>       Inspect using a config file
    {program} --generate-config <path>   Write a sample config file
    {program} --help                     Show this help
"#
    );
}

fn generate_sample_config(path: &str) {
    let config = PrepConfig::default();
    if let Err(e) = config.save_toml(path) {
        eprintln!("Error writing config: {e}");
        std::process::exit(1);
    }
    println!("✅ Sample config written to {path}");
}

fn run(config: PrepConfig) {
    println!("Collecting dataset...");

    let pipeline = match Pipeline::new(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let prepared = match pipeline.prepare() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error preparing dataset: {e}");
            std::process::exit(1);
        }
    };

    println!();
    print!("{}", prepared.distribution());
    println!();
    println!("Windows shape: {:?}", prepared.windows.dim());
    println!("Labels shape:  {:?}", prepared.labels.dim());

    let split = match pipeline.split(&prepared) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error splitting dataset: {e}");
            std::process::exit(1);
        }
    };

    println!();
    println!("Train:      {:?} windows / {:?} labels", split.x_train.dim(), split.y_train.dim());
    println!(
        "Validation: {:?} windows / {:?} labels",
        split.x_validation.dim(),
        split.y_validation.dim()
    );
    println!("Test:       {:?} windows / {:?} labels", split.x_test.dim(), split.y_test.dim());

    let total = split.total_rows();
    println!();
    println!(
        "✅ {} rows partitioned ({} train / {} validation / {} test)",
        total,
        split.x_train.len_of(Axis(0)),
        split.x_validation.len_of(Axis(0)),
        split.x_test.len_of(Axis(0)),
    );
}
