//! polylabel - label placement for SVG polygons
//!
//! Usage:
//!   polylabel label <svg> [-p <precision>]   Print a label point per polygon
//!   polylabel probe <svg> <x> <y>            Signed distance to each polygon
//!   polylabel help                           Show this message

use std::env;
use std::process;

mod cli;

use cli::{cmd_label, cmd_probe};

fn main() {
    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        Some("label") => cmd_label(&args[2..]),
        Some("probe") => cmd_probe(&args[2..]),
        Some("help" | "--help" | "-h") | None => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            print_usage();
            Err(format!("Unknown command: {}", other))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("polylabel - find label anchor points for SVG polygons");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  polylabel label <svg> [options]   Label every polygon (see `label --help`)");
    eprintln!("  polylabel probe <svg> <x> <y>     Signed distance from a point to each polygon");
    eprintln!("  polylabel help                    Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG to control log output (default: warn).");
}
