// src/map.rs
//
// Loads the static centerline waypoint file: read-to-string, parse, bubble
// a typed error. Whitespace-delimited `x y s dx dy` format, one waypoint
// per line.

use thiserror::Error;

use crate::geometry::{FrenetCoordinates, GlobalCoordinates, MapCoordinates};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file '{path}': {source}")]
    Read { path: String, #[source] source: std::io::Error },
    #[error("malformed waypoint on line {line}: '{text}'")]
    MalformedLine { line: usize, text: String },
    #[error("map file '{path}' contains no waypoints")]
    Empty { path: String },
}

/// Load and parse the waypoint file at `path` into map coordinates, ordered
/// as they appear on disk. `dx, dy` are normalized to unit length.
///
/// This is a config error: callers should treat failure as fatal at
/// startup.
pub fn load_map(path: &str) -> Result<Vec<MapCoordinates>, MapError> {
    let contents = std::fs::read_to_string(path).map_err(|source| MapError::Read { path: path.to_string(), source })?;

    let mut waypoints = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        waypoints.push(parse_line(line, index + 1)?);
    }

    if waypoints.is_empty() {
        return Err(MapError::Empty { path: path.to_string() });
    }

    tracing::info!(path, count = waypoints.len(), "loaded map waypoints");
    Ok(waypoints)
}

fn parse_line(line: &str, line_number: usize) -> Result<MapCoordinates, MapError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(MapError::MalformedLine { line: line_number, text: line.to_string() });
    }

    let mut values = [0.0f64; 5];
    for (slot, field) in values.iter_mut().zip(fields.iter()) {
        *slot = field
            .parse()
            .map_err(|_| MapError::MalformedLine { line: line_number, text: line.to_string() })?;
    }
    let [x, y, s, dx, dy] = values;

    let norm = (dx * dx + dy * dy).sqrt();
    let (dx, dy) = if norm > 0.0 { (dx / norm, dy / norm) } else { (dx, dy) };

    Ok(MapCoordinates { global: GlobalCoordinates::new(x, y), frenet: FrenetCoordinates::with_normal(s, 0.0, dx, dy) })
}
