//! Common utilities shared across CLI commands.

use std::fs;

use polylabel::{BatchLabels, Extent, Polygon, extract_polygons_from_svg};
use serde::{Deserialize, Serialize};

/// Output format for computed labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Svg,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

/// Install the stderr logger. `RUST_LOG` wins over `debug` when set.
///
/// Commands call this once their settings are resolved, so a `debug: true`
/// in a config file raises the level just like `--debug` does.
pub fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Read an SVG file and extract its polygons.
pub fn load_polygons(svg_path: &str) -> Result<(String, Vec<Polygon>), String> {
    let svg_content = fs::read_to_string(svg_path)
        .map_err(|e| format!("Failed to read {}: {}", svg_path, e))?;
    let polygons = extract_polygons_from_svg(&svg_content)
        .map_err(|e| format!("Failed to parse SVG: {}", e))?;
    Ok((svg_content, polygons))
}

#[derive(Serialize)]
struct LabelEntry<'a> {
    index: usize,
    id: Option<&'a str>,
    x: f64,
    y: f64,
    distance: f64,
    probes: usize,
    completed: bool,
}

#[derive(Serialize)]
struct SkippedEntry<'a> {
    index: usize,
    id: Option<&'a str>,
    error: String,
}

#[derive(Serialize)]
struct LabelReport<'a> {
    labels: Vec<LabelEntry<'a>>,
    skipped: Vec<SkippedEntry<'a>>,
    extent: Option<Extent>,
}

/// Convert batch labels to pretty-printed JSON.
pub fn labels_to_json(polygons: &[Polygon], batch: &BatchLabels) -> Result<String, String> {
    let mut report = LabelReport {
        labels: Vec::new(),
        skipped: Vec::new(),
        extent: batch.extent,
    };

    for (index, (polygon, result)) in polygons.iter().zip(&batch.labels).enumerate() {
        let id = polygon.id.as_deref();
        match result {
            Ok(label) => report.labels.push(LabelEntry {
                index,
                id,
                x: label.point.x,
                y: label.point.y,
                distance: label.distance,
                probes: label.probes,
                completed: label.completed,
            }),
            Err(e) => report.skipped.push(SkippedEntry {
                index,
                id,
                error: e.to_string(),
            }),
        }
    }

    serde_json::to_string_pretty(&report).map_err(|e| format!("Failed to serialize labels: {}", e))
}

/// Draw polygon outlines with a marker at each label.
pub fn labels_to_svg(polygons: &[Polygon], batch: &BatchLabels, original_svg: &str) -> String {
    let viewbox = extract_viewbox(original_svg)
        .or_else(|| {
            batch.extent.map(|e| format!("{} {} {} {}", e.min_x, e.min_y, e.width(), e.height()))
        })
        .unwrap_or_else(|| "0 0 1000 1000".to_string());

    let marker_radius = batch
        .extent
        .map(|e| (e.width().max(e.height()) / 200.0).max(0.5))
        .unwrap_or(1.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}">
<g stroke="#999999" stroke-width="0.5" fill="none" fill-rule="evenodd">
"##,
        viewbox
    ));

    for polygon in polygons {
        let mut d = String::new();
        for ring in polygon.rings() {
            for (i, pt) in ring.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                d.push_str(&format!("{}{:.2},{:.2} ", cmd, pt.x, pt.y));
            }
            d.push_str("Z ");
        }
        svg.push_str(&format!("  <path d=\"{}\"/>\n", d.trim_end()));
    }
    svg.push_str("</g>\n<g fill=\"red\" stroke=\"none\">\n");

    for (polygon, result) in polygons.iter().zip(&batch.labels) {
        if let Ok(label) = result {
            let id_attr = polygon
                .id
                .as_deref()
                .map(|id| format!(" data-polygon=\"{}\"", escape_xml(id)))
                .unwrap_or_default();
            svg.push_str(&format!(
                "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"{}/>\n",
                label.point.x, label.point.y, marker_radius, id_attr
            ));
        }
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Escape text for use inside an XML attribute value.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Extract viewBox from SVG content.
pub fn extract_viewbox(svg: &str) -> Option<String> {
    ["viewBox=\"", "viewbox=\""].iter().find_map(|attr| {
        let start = svg.find(attr)? + attr.len();
        let rest = &svg[start..];
        let end = rest.find('"')?;
        Some(rest[..end].to_string())
    })
}
