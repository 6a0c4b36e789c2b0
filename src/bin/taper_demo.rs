//! Runs the analysis on a generated outline and prints the result.
//!
//! `taper_demo [cone|waist] [points]`; defaults to a waisted leg of 400 points.
use std::env;
use taper_cut::synthetic::{cone_contour, tapered_contour, ContourSpec, Waist};
use taper_cut::{AnalysisParams, PointCloud, TaperAnalyzer};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let shape = args.next().unwrap_or_else(|| "waist".to_string());
    let points = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| format!("Invalid point count '{raw}': {e}"))?,
        None => 400,
    };

    let mut params = AnalysisParams::default();
    // Tool approaches from above the object.
    params.pose.reference_origin = [0.5, 0.0, 1.0];
    let outline = match shape.as_str() {
        "cone" => cone_contour(points, 1.0, 0.1),
        "waist" => {
            params.offset.distance = 0.5;
            tapered_contour(&ContourSpec {
                points,
                length: 1.0,
                tip_half_width: 0.02,
                base_half_width: 0.1,
                waist: Some(Waist {
                    position: 0.5,
                    depth: 0.5,
                    spread: 0.08,
                }),
            })
        }
        other => return Err(format!("Unknown shape '{other}' (expected cone or waist)")),
    };

    let cloud = PointCloud::from_contour(outline);
    let report = TaperAnalyzer::new(params)
        .analyze_with_diagnostics(&cloud)
        .map_err(|e| e.to_string())?;

    println!("{shape} outline, {points} points");
    for line in report.summary_lines() {
        println!("  {line}");
    }
    println!("Stage timings:");
    for stage in &report.trace.timings.stages {
        println!("  {:<14} {:>8.3} ms", stage.stage, stage.elapsed_ms);
    }
    Ok(())
}
