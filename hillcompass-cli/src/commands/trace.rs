//! JSON-lines sensor trace parsing.
//!
//! Each non-empty line is either a sensor event
//! (`{"type": "fused_heading", "degrees": 12.5}`) or a permission change
//! (`{"permissions": {"camera": "granted", "location": "denied"}}`).
//! Fields a permission change leaves out stay granted.
//! Lines starting with `#` are comments.

use hillcompass::landmark::Landmark;
use hillcompass::permission::PermissionState;
use hillcompass::sensor::SensorEvent;
use serde_json::Value;

/// One parsed trace line.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceLine {
    Sensor(SensorEvent),
    Permissions(PermissionState),
}

/// Parse a trace line. `Ok(None)` for blanks and comments.
pub fn parse_line(line: &str) -> Result<Option<TraceLine>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    if let Some(permissions) = value.get("permissions") {
        return parse_permissions(permissions).map(|state| Some(TraceLine::Permissions(state)));
    }

    let event = serde_json::from_value(value).map_err(|e| e.to_string())?;
    Ok(Some(TraceLine::Sensor(event)))
}

fn parse_permissions(overrides: &Value) -> Result<PermissionState, String> {
    let overrides = overrides
        .as_object()
        .ok_or_else(|| "\"permissions\" must be an object".to_string())?;
    let mut merged = serde_json::to_value(PermissionState::granted()).map_err(|e| e.to_string())?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            fields.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(merged).map_err(|e| e.to_string())
}

/// Parse a landmark file: a bare array or a `{"results": [...]}` response.
///
/// Every entry must carry a usable distance and bearing; the first bad one
/// is reported by its position in the list.
pub fn parse_landmarks(content: &str) -> Result<Vec<Landmark>, String> {
    let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let list = match value {
        Value::Object(mut object) => object
            .remove("results")
            .ok_or_else(|| "expected an array or an object with \"results\"".to_string())?,
        other => other,
    };
    let landmarks: Vec<Landmark> = serde_json::from_value(list).map_err(|e| e.to_string())?;
    landmarks
        .into_iter()
        .enumerate()
        .map(|(index, landmark)| {
            let name = landmark.name.clone();
            landmark
                .validated()
                .map_err(|e| format!("entry {} ({}): {}", index + 1, name, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hillcompass::permission::Availability;

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# walking north").unwrap(), None);
    }

    #[test]
    fn test_sensor_line() {
        let line = parse_line(r#"{"type": "fused_heading", "degrees": 12.5}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            line,
            TraceLine::Sensor(SensorEvent::FusedHeading { degrees: 12.5 })
        );
    }

    #[test]
    fn test_permissions_line() {
        let line = parse_line(r#"{"permissions": {"camera": "granted", "location": "denied"}}"#)
            .unwrap()
            .unwrap();
        match line {
            TraceLine::Permissions(state) => {
                assert_eq!(state.camera, Availability::Granted);
                assert_eq!(state.location, Availability::Denied);
                assert_eq!(state.orientation, Availability::Granted);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_permissions_must_be_object() {
        assert!(parse_line(r#"{"permissions": "denied"}"#).is_err());
    }

    #[test]
    fn test_bad_line_reports_reason() {
        assert!(parse_line(r#"{"type": "fused_heading"}"#).is_err());
        assert!(parse_line("not json").is_err());
    }

    #[test]
    fn test_landmarks_both_shapes() {
        let bare = r#"[{"name": "Helvellyn", "distance": 3.2, "bearing": 88.0}]"#;
        let wrapped = r#"{"results": [{"name": "Helvellyn", "distance": 3.2, "bearing": 88.0}]}"#;
        assert_eq!(parse_landmarks(bare).unwrap(), parse_landmarks(wrapped).unwrap());
        assert!(parse_landmarks(r#"{"hills": []}"#).is_err());
    }

    #[test]
    fn test_landmarks_reject_negative_distance() {
        let content = r#"[
            {"name": "Real", "distance": 1.0, "bearing": 10.0},
            {"name": "Bogus", "distance": -5.0, "bearing": 370.0}
        ]"#;
        let err = parse_landmarks(content).unwrap_err();
        assert!(err.starts_with("entry 2 (Bogus)"), "{}", err);
    }

    #[test]
    fn test_landmarks_bearing_is_normalized() {
        let hills = parse_landmarks(r#"[{"name": "Fell", "distance": 1.0, "bearing": 365.0}]"#)
            .unwrap();
        assert!((hills[0].bearing - 5.0).abs() < 1e-9);
    }
}
