//! NACHA Encoder CLI
//!
//! Reads a CSV of payment entry rows, assembles them into batches, and
//! writes the encoded NACHA file to standard output.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- entries.csv 091000019 2123456789 "WELLS FARGO" "teamup sports, inc" > payments.ach
//! ```
//!
//! The optional sixth argument is the one-character file ID modifier
//! (defaults to `A`).
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use chrono::Local;
use nacha::{import_csv, FileParams, NachaError, Result, RoutingNumber};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process;
use std::str::FromStr;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 6 {
        return Err(NachaError::MissingArgument);
    }

    let input_path = &args[1];
    let params = FileParams {
        destination: RoutingNumber::from_str(&args[2])?,
        file_id: args[3].clone(),
        file_id_modifier: args
            .get(6)
            .and_then(|modifier| modifier.chars().next())
            .unwrap_or('A'),
        origination_bank: args[4].clone(),
        company_name: args[5].clone(),
        reference_code: String::new(),
        creation: Local::now().naive_local(),
    };

    let file = File::open(input_path)?;
    let nacha_file = import_csv(params, BufReader::new(file))?;

    println!("{}", nacha_file.render()?);
    Ok(())
}
