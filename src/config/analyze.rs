use crate::analyzer::AnalysisParams;
use crate::cloud::PointOrder;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `taper_analyze` tool.
///
/// `order` has no default: whoever prepares the input has to state whether
/// the points follow the object's outline.
#[derive(Debug, Deserialize)]
pub struct AnalyzeToolConfig {
    pub input: PathBuf,
    pub order: PointOrder,
    #[serde(default)]
    pub params: AnalysisParams,
    pub output: AnalyzeOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    /// Line segments (with coordinates) for a viewer.
    #[serde(default, rename = "overlay_json")]
    pub overlay_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<AnalyzeToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Parses a configuration from JSON text.
pub fn parse_config(json: &str) -> Result<AnalyzeToolConfig, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_default_params() {
        let cfg = parse_config(
            r#"{
                "input": "leg.pcd",
                "order": "contour",
                "output": { "report_json": "out/report.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.order, PointOrder::Contour);
        assert_eq!(cfg.params.offset.distance, 0.18);
        assert!(cfg.output.overlay_json.is_none());
    }

    #[test]
    fn partial_params_override_single_knobs() {
        let cfg = parse_config(
            r#"{
                "input": "leg.ply",
                "order": "contour",
                "params": { "offset": { "distance": 0.25 }, "angleFilter": { "toleranceDeg": 20 } },
                "output": { "report_json": "r.json", "overlay_json": "o.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.params.offset.distance, 0.25);
        assert_eq!(cfg.params.offset.neighbor_exclusion, 30);
        assert_eq!(cfg.params.angle_filter.tolerance_deg, 20.0);
        assert_eq!(cfg.output.overlay_json, Some(PathBuf::from("o.json")));
    }

    #[test]
    fn order_is_required() {
        let err = parse_config(r#"{ "input": "a.xyz", "output": { "report_json": "r.json" } }"#)
            .unwrap_err();
        assert!(err.contains("order"), "{err}");
    }
}
