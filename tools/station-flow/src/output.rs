use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use std::path::Path;

use station_flow_traffic::{FlowFrame, StationMark};

/// Convert one station mark to a GeoJSON point feature
fn mark_to_feature(mark: &StationMark) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("short_name".to_string(), serde_json::json!(mark.id.as_str()));
    properties.insert("name".to_string(), serde_json::json!(mark.name.as_deref()));
    properties.insert("departures".to_string(), serde_json::json!(mark.traffic.departures));
    properties.insert("arrivals".to_string(), serde_json::json!(mark.traffic.arrivals));
    properties.insert(
        "total_traffic".to_string(),
        serde_json::json!(mark.traffic.total_traffic),
    );
    properties.insert("radius".to_string(), serde_json::json!(mark.radius));
    properties.insert(
        "departure_ratio_level".to_string(),
        serde_json::json!(mark.flow.value()),
    );
    properties.insert("tooltip".to_string(), serde_json::json!(mark.tooltip()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            mark.location.x(),
            mark.location.y(),
        ]))),
        id: Some(geojson::feature::Id::String(mark.id.to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Build a feature collection with one point per station
pub fn frame_to_geojson(frame: &FlowFrame) -> GeoJson {
    let features: Vec<Feature> = frame.marks.iter().map(mark_to_feature).collect();

    let mut foreign_members = JsonObject::new();
    foreign_members.insert("time_label".to_string(), serde_json::json!(frame.label));
    foreign_members.insert(
        "window".to_string(),
        serde_json::json!(frame
            .window
            .map(|w| serde_json::json!({ "start": w.start(), "end": w.end() }))),
    );

    GeoJson::from(FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    })
}

/// Write a frame's station marks to a GeoJSON file
pub fn write_frame_geojson(frame: &FlowFrame, output_path: &Path) -> Result<()> {
    log::info!(
        "Writing {} station features to {}",
        frame.marks.len(),
        output_path.display()
    );

    let geojson = frame_to_geojson(frame);
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
