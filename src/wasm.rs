use wasm_bindgen::prelude::*;

use crate::features::{parts_from_str, polygons_to_feature_collection};
use crate::PartMerger;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn merge_to_collection(geojson_str: &str, tolerance: f64) -> Result<geojson::FeatureCollection, JsValue> {
    let read = parts_from_str(geojson_str, tolerance)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse GeoJSON: {}", e)))?;

    let polygons = PartMerger::new(tolerance)
        .merge(read.parts)
        .map_err(|e| JsValue::from_str(&format!("Merge failed: {}", e)))?;

    Ok(polygons_to_feature_collection(&polygons))
}

/// Merges the line work of a GeoJSON document, returning a GeoJSON string.
#[wasm_bindgen]
pub fn merge_geojson(geojson_str: &str, tolerance: f64) -> Result<String, JsValue> {
    Ok(merge_to_collection(geojson_str, tolerance)?.to_string())
}

/// Same as [`merge_geojson`], returning a plain JS object instead of a string.
#[wasm_bindgen]
pub fn merge_geojson_object(geojson_str: &str, tolerance: f64) -> Result<JsValue, JsValue> {
    let fc = merge_to_collection(geojson_str, tolerance)?;
    serde_wasm_bindgen::to_value(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}
