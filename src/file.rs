use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::find_planet;
use crate::model::registry::{color_from_hex, BodyDetails, BodyInfo, Registry};

#[derive(Debug, Error)]
pub enum RegistryFileError {
    #[error("couldn't read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: `{value}` is not a valid {field}")]
    BadNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: `{value}` is not a colour, expected rrggbb")]
    BadColor { line: usize, value: String },
    #[error("line {line}: {field} must be positive, got {value}")]
    NotPositive {
        line: usize,
        field: &'static str,
        value: f32,
    },
    #[error("line {line}: body `{name}` is listed twice")]
    DuplicateName { line: usize, name: String },
}

pub fn read_file(path: &Path) -> Result<Registry, RegistryFileError> {
    let text = fs::read_to_string(path).map_err(|source| RegistryFileError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_registry(&text)
}

/// Parses a body table. The first line is a header and is skipped, as are
/// blank lines and lines starting with `#`. Every other line reads
///
/// ```text
/// name  radius  orbit_radius  speed  color  texture
/// ```
///
/// where `color` is `rrggbb` hex and `texture` is a path, or `-` for none.
/// Bodies that share a name with one of the built-in planets pick up its
/// descriptive details.
pub fn parse_registry(text: &str) -> Result<Registry, RegistryFileError> {
    let mut registry = Registry::new();
    let mut seen_names = HashSet::new();

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = trimmed.split_ascii_whitespace();

        macro_rules! next_string {
            ($field:expr) => {
                fields.next().ok_or(RegistryFileError::MissingField {
                    line: line_no,
                    field: $field,
                })?
            };
        }

        macro_rules! next_f32 {
            ($field:expr) => {{
                let value = next_string!($field);
                // `parse` is happy with "inf" and "NaN"; we aren't
                value
                    .parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| RegistryFileError::BadNumber {
                        line: line_no,
                        field: $field,
                        value: value.to_owned(),
                    })?
            }};
        }

        let name = next_string!("name");
        let radius = positive(line_no, "radius", next_f32!("radius"))?;
        let orbit_radius = positive(line_no, "orbit radius", next_f32!("orbit radius"))?;
        let angular_speed = next_f32!("speed");
        let color = parse_color(line_no, next_string!("color"))?;
        let texture = match next_string!("texture") {
            "-" => None,
            path => Some(PathBuf::from(path)),
        };

        if !seen_names.insert(name.to_lowercase()) {
            return Err(RegistryFileError::DuplicateName {
                line: line_no,
                name: name.to_owned(),
            });
        }

        let details = match find_planet(name) {
            Some(planet) => BodyDetails {
                size: planet.size.to_owned(),
                distance: planet.distance.to_owned(),
                description: planet.description.to_owned(),
            },
            None => BodyDetails::default(),
        };

        registry.add_body(BodyInfo {
            name: name.to_owned(),
            radius,
            orbit_radius,
            angular_speed,
            color,
            texture,
            details,
        });
    }

    Ok(registry)
}

fn positive(line: usize, field: &'static str, value: f32) -> Result<f32, RegistryFileError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(RegistryFileError::NotPositive { line, field, value })
    }
}

fn parse_color(line: usize, s: &str) -> Result<nalgebra::Point3<f32>, RegistryFileError> {
    let bad_color = || RegistryFileError::BadColor {
        line,
        value: s.to_owned(),
    };
    if s.len() != 6 {
        return Err(bad_color());
    }
    let rgb = u32::from_str_radix(s, 16).map_err(|_| bad_color())?;
    Ok(color_from_hex(rgb))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const TABLE: &str = "name radius orbit speed color texture
Mercury 1.2 30 1   b0b0b0 textures/mercury.jpg

# a made-up one
Vulcan  0.8 20 2.5 ff0000 -
";

    #[test]
    fn test_parse_table() {
        let registry = parse_registry(TABLE).unwrap();
        assert_eq!(registry.len(), 2);

        let mercury = registry.find_by_name("Mercury").unwrap();
        assert_relative_eq!(mercury.info.radius, 1.2);
        assert_relative_eq!(mercury.info.orbit_radius, 30.0);
        assert_eq!(mercury.info.details.size, "4,879 km");
        assert!(mercury.info.texture.is_some());

        let vulcan = registry.find_by_name("Vulcan").unwrap();
        assert_relative_eq!(vulcan.info.angular_speed, 2.5);
        assert_relative_eq!(vulcan.info.color.x, 1.0);
        assert!(vulcan.info.texture.is_none());
        assert_eq!(vulcan.info.details, BodyDetails::default());
    }

    #[test]
    fn test_missing_field() {
        let err = parse_registry("header\nMars 1.5 54\n").unwrap_err();
        match err {
            RegistryFileError::MissingField { line, field } => {
                assert_eq!(line, 2);
                assert_eq!(field, "speed");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_values() {
        let err = parse_registry("header\nMars big 54 1 ff4d4d -\n").unwrap_err();
        assert!(matches!(err, RegistryFileError::BadNumber { field: "radius", .. }));

        let err = parse_registry("header\nMars 1.5 54 1 red -\n").unwrap_err();
        assert!(matches!(err, RegistryFileError::BadColor { line: 2, .. }));

        let err = parse_registry("header\nMars 1.5 -54 1 ff4d4d -\n").unwrap_err();
        assert!(matches!(err, RegistryFileError::NotPositive { .. }));
        assert_eq!(
            err.to_string(),
            "line 2: orbit radius must be positive, got -54"
        );
    }

    #[test]
    fn test_non_finite_values() {
        let err = parse_registry("header\nX 1.0 inf 1 ffffff -\n").unwrap_err();
        assert!(matches!(
            err,
            RegistryFileError::BadNumber { line: 2, field: "orbit radius", .. }
        ));

        let err = parse_registry("header\nY infinity 10 1 ffffff -\n").unwrap_err();
        assert!(matches!(err, RegistryFileError::BadNumber { field: "radius", .. }));

        let err = parse_registry("header\nZ 1.0 10 NaN ffffff -\n").unwrap_err();
        assert!(matches!(err, RegistryFileError::BadNumber { field: "speed", .. }));

        let err = parse_registry("header\nW 1.0 10 -inf ffffff -\n").unwrap_err();
        assert!(matches!(err, RegistryFileError::BadNumber { field: "speed", .. }));
    }

    #[test]
    fn test_duplicate_name() {
        let text = "header\nMars 1.5 54 1 ff4d4d -\nmars 1.0 60 1 ff4d4d -\n";
        let err = parse_registry(text).unwrap_err();
        assert!(matches!(err, RegistryFileError::DuplicateName { line: 3, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_file(Path::new("definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, RegistryFileError::Io { .. }));
    }
}
