use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use taper_cut::config::analyze;
use taper_cut::diagnostics::{overlay_segments, resolve_segments, OverlayLine, OverlaySegment};
use taper_cut::io::{load_point_cloud, write_json_file};
use taper_cut::TaperAnalyzer;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlayDocument<'a> {
    input: &'a Path,
    segments: Vec<OverlaySegment>,
    lines: Vec<OverlayLine>,
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = analyze::load_config(Path::new(&config_path))?;

    let cloud = load_point_cloud(&config.input, config.order)?;
    let analyzer = TaperAnalyzer::new(config.params);
    let report = analyzer
        .analyze_with_diagnostics(&cloud)
        .map_err(|e| format!("Analysis of {} failed: {e}", config.input.display()))?;

    println!("Cut analysis for {}", config.input.display());
    for line in report.summary_lines() {
        println!("  {line}");
    }
    let pose = report.result.pose.to_array();
    println!(
        "  pose [x y z a b c]: [{:.5} {:.5} {:.5} {:.5} {:.5} {:.5}]",
        pose[0], pose[1], pose[2], pose[3], pose[4], pose[5]
    );

    write_json_file(&config.output.report_json, &report)?;
    println!("Report written to {}", config.output.report_json.display());

    if let Some(path) = &config.output.overlay_json {
        let segments = overlay_segments(&report);
        let lines = resolve_segments(&cloud, &segments).map_err(|e| e.to_string())?;
        write_json_file(
            path,
            &OverlayDocument {
                input: &config.input,
                segments,
                lines,
            },
        )?;
        println!("Overlay written to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    let program: PathBuf = env::args()
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("taper_analyze"));
    format!("Usage: {} <config.json>", program.display())
}
