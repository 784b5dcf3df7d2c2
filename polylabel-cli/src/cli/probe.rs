//! Probe command: signed distance from one point to every polygon.

use polylabel::{Point, signed_distance};

use super::common::{init_logging, load_polygons};

/// Execute the probe command.
pub fn cmd_probe(args: &[String]) -> Result<(), String> {
    init_logging(false);

    if args.iter().any(|a| a == "-h" || a == "--help") || args.len() < 3 {
        eprintln!("Usage: polylabel probe <svg_file> <x> <y>");
        return if args.len() < 3 {
            Err("probe needs an SVG file and a point".to_string())
        } else {
            Ok(())
        };
    }

    let x: f64 = args[1].parse().map_err(|_| format!("Invalid x: {}", args[1]))?;
    let y: f64 = args[2].parse().map_err(|_| format!("Invalid y: {}", args[2]))?;
    let point = Point::new(x, y);

    let (_, polygons) = load_polygons(&args[0])?;

    for (index, polygon) in polygons.iter().enumerate() {
        let name = polygon.id.as_deref().unwrap_or("-");
        if let Err(e) = polygon.validate() {
            println!("{:>4}  {:<24} invalid: {}", index, name, e);
            continue;
        }
        let d = signed_distance(point, polygon);
        let side = if d > 0.0 {
            "inside"
        } else if d < 0.0 {
            "outside"
        } else {
            "on edge"
        };
        println!("{:>4}  {:<24} {:>12.4}  {}", index, name, d, side);
    }

    Ok(())
}
