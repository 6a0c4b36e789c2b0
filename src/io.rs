//! File I/O for point clouds and JSON reports.
//!
//! - `load_point_cloud`: read `.pcd` (ASCII), `.ply` or `.xyz`/`.txt` into a
//!   [`PointCloud`] with the order the caller vouches for.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! Errors are plain strings with the offending path, suitable for printing
//! straight from a binary.
use crate::cloud::{PointCloud, PointOrder};
use log::{debug, warn};
use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Ply, Property};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Loads a point cloud, picking the reader from the file extension.
///
/// Points are kept in file order; `order` states whether that order follows
/// the object's boundary. Rows with non-finite coordinates are dropped.
pub fn load_point_cloud(path: &Path, order: PointOrder) -> Result<PointCloud, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let points = match ext.as_str() {
        "pcd" => parse_pcd_ascii(&read_text(path)?)
            .map_err(|e| format!("Failed to parse PCD {}: {e}", path.display()))?,
        "ply" => read_ply(path)?,
        "xyz" | "txt" => parse_xyz(&read_text(path)?)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?,
        _ => {
            return Err(format!(
                "Unsupported point cloud format {} (expected .pcd, .ply, .xyz or .txt)",
                path.display()
            ))
        }
    };
    let points = keep_finite(points, path);
    debug!("loaded {} points from {}", points.len(), path.display());
    Ok(PointCloud::new(points, order))
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
}

fn keep_finite(points: Vec<Point3<f32>>, path: &Path) -> Vec<Point3<f32>> {
    let total = points.len();
    let kept: Vec<Point3<f32>> = points
        .into_iter()
        .filter(|p| p.coords.iter().all(|c| c.is_finite()))
        .collect();
    if kept.len() < total {
        warn!(
            "dropped {} non-finite points from {}; contour order may be broken",
            total - kept.len(),
            path.display()
        );
    }
    kept
}

/// Parses the ASCII flavour of the PCD format.
///
/// `FIELDS` may list x, y and z in any position among other fields, and
/// `COUNT` widens a field to several columns. Binary data sections are
/// rejected.
pub fn parse_pcd_ascii(text: &str) -> Result<Vec<Point3<f32>>, String> {
    let mut lines = text.lines().enumerate();
    let mut fields: Option<Vec<String>> = None;
    let mut counts: Option<Vec<usize>> = None;
    let mut declared: Option<usize> = None;
    let mut data_seen = false;

    for (lineno, raw) in lines.by_ref() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let key = tokens.next().unwrap_or_default().to_ascii_uppercase();
        match key.as_str() {
            "FIELDS" => fields = Some(tokens.map(str::to_ascii_lowercase).collect()),
            "COUNT" => {
                counts = Some(
                    tokens
                        .map(|t| {
                            t.parse::<usize>()
                                .map_err(|e| format!("line {}: bad COUNT '{t}': {e}", lineno + 1))
                        })
                        .collect::<Result<_, _>>()?,
                );
            }
            "POINTS" => {
                let count = tokens
                    .next()
                    .ok_or_else(|| format!("line {}: POINTS without a count", lineno + 1))?;
                declared = Some(
                    count
                        .parse()
                        .map_err(|e| format!("line {}: bad POINTS count: {e}", lineno + 1))?,
                );
            }
            "DATA" => {
                let kind = tokens.next().unwrap_or_default();
                if !kind.eq_ignore_ascii_case("ascii") {
                    return Err(format!(
                        "DATA {kind} is not supported; convert the cloud to ASCII PCD"
                    ));
                }
                data_seen = true;
                break;
            }
            _ => {}
        }
    }

    let fields = fields.ok_or_else(|| "header has no FIELDS line".to_string())?;
    if !data_seen {
        return Err("header has no DATA line".to_string());
    }
    let [cx, cy, cz] = pcd_columns(&fields, counts.as_deref())?;
    let mut points = Vec::with_capacity(declared.unwrap_or(0));
    for (lineno, raw) in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split_whitespace().collect();
        let coord = |col: usize| -> Result<f32, String> {
            let token = values
                .get(col)
                .ok_or_else(|| format!("line {}: missing column {}", lineno + 1, col))?;
            parse_f32(token).map_err(|e| format!("line {}: {e}", lineno + 1))
        };
        points.push(Point3::new(coord(cx)?, coord(cy)?, coord(cz)?));
    }
    if let Some(expected) = declared {
        if expected != points.len() {
            warn!(
                "PCD header declares {} points but {} were read",
                expected,
                points.len()
            );
        }
    }
    Ok(points)
}

/// Data columns of x, y and z: each field occupies `COUNT` columns (1 when
/// the header has no COUNT line).
fn pcd_columns(fields: &[String], counts: Option<&[usize]>) -> Result<[usize; 3], String> {
    if let Some(counts) = counts {
        if counts.len() != fields.len() {
            return Err(format!(
                "COUNT lists {} values for {} FIELDS",
                counts.len(),
                fields.len()
            ));
        }
    }
    let column = |name: &str| -> Result<usize, String> {
        let idx = fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| format!("FIELDS has no '{name}' column"))?;
        if counts.map_or(false, |c| c[idx] != 1) {
            return Err(format!("field '{name}' must have COUNT 1"));
        }
        match counts {
            Some(c) => c[..idx]
                .iter()
                .try_fold(0usize, |acc, &w| acc.checked_add(w))
                .ok_or_else(|| "COUNT values overflow the column index".to_string()),
            None => Ok(idx),
        }
    };
    Ok([column("x")?, column("y")?, column("z")?])
}

/// Parses whitespace-separated `x y z` rows; `#` starts a comment line and
/// extra columns are ignored.
pub fn parse_xyz(text: &str) -> Result<Vec<Point3<f32>>, String> {
    let mut points = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut it = line.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty());
        let mut next = || -> Result<f32, String> {
            let token = it
                .next()
                .ok_or_else(|| format!("line {}: expected three coordinates", lineno + 1))?;
            parse_f32(token).map_err(|e| format!("line {}: {e}", lineno + 1))
        };
        let (x, y, z) = (next()?, next()?, next()?);
        points.push(Point3::new(x, y, z));
    }
    Ok(points)
}

fn parse_f32(token: &str) -> Result<f32, String> {
    token
        .parse::<f32>()
        .map_err(|e| format!("invalid number '{token}': {e}"))
}

fn read_ply(path: &Path) -> Result<Vec<Point3<f32>>, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let mut reader = BufReader::new(file);
    let parser = Parser::<DefaultElement>::new();
    let ply: Ply<DefaultElement> = parser
        .read_ply(&mut reader)
        .map_err(|e| format!("Failed to parse PLY {}: {e}", path.display()))?;
    let vertex = ply
        .payload
        .get("vertex")
        .ok_or_else(|| format!("PLY {} has no 'vertex' element", path.display()))?;
    vertex
        .iter()
        .map(|el| {
            Ok(Point3::new(
                ply_coord(el, "x")?,
                ply_coord(el, "y")?,
                ply_coord(el, "z")?,
            ))
        })
        .collect::<Result<Vec<_>, String>>()
        .map_err(|e| format!("Failed to read PLY {}: {e}", path.display()))
}

fn ply_coord(el: &DefaultElement, key: &str) -> Result<f32, String> {
    match el.get(key) {
        Some(Property::Float(v)) => Ok(*v),
        Some(Property::Double(v)) => Ok(*v as f32),
        Some(Property::Int(v)) => Ok(*v as f32),
        Some(Property::Short(v)) => Ok(*v as f32),
        Some(_) => Err(format!("vertex property '{key}' is not numeric")),
        None => Err(format!("vertex has no '{key}' property")),
    }
}

/// Writes an analysis report, overlay or any other serializable record as
/// pretty JSON. Missing output folders are created first.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    create_output_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Cannot encode {} as JSON: {e}", path.display()))?;
    debug!("writing {} bytes of JSON to {}", json.len(), path.display());
    fs::write(path, json).map_err(|e| format!("Cannot write {}: {e}", path.display()))
}

/// Creates the folder a report is written into; a bare file name needs none.
fn create_output_dir(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create output folder {}: {e}", dir.display())),
        _ => Ok(()),
    }
}
