//! GeoJSON in and out of the merge engine.
//!
//! Input features carry their entity id in a `handle` property (string or
//! number), falling back to the feature `id`. Output features are polygons
//! with `handles` and `area` properties.

use std::str::FromStr;

use geo::Area;
use geojson::{feature::Id, Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

use crate::error::{MergeError, Result};
use crate::part::{ClosedPolygon, Handle, Point, PolygonPart};

/// Parts read from a GeoJSON document, plus the entities that were skipped.
#[derive(Debug, Default)]
pub struct FeatureParts {
    pub parts: Vec<PolygonPart>,
    pub skipped: Vec<MergeError>,
}

impl FeatureParts {
    fn push(&mut self, part: Result<PolygonPart>) {
        match part {
            Ok(part) => self.parts.push(part),
            Err(err) => {
                log::warn!("skipping entity: {}", err);
                self.skipped.push(err);
            }
        }
    }
}

pub fn parts_from_str(geojson: &str, tol: f64) -> Result<FeatureParts> {
    let geojson = GeoJson::from_str(geojson).map_err(|e| MergeError::GeoJson(e.to_string()))?;
    Ok(parts_from_geojson(geojson, tol))
}

pub fn parts_from_geojson(geojson: GeoJson, tol: f64) -> FeatureParts {
    let mut out = FeatureParts::default();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for (index, feature) in fc.features.into_iter().enumerate() {
                add_feature(&mut out, feature, index, tol);
            }
        }
        GeoJson::Feature(feature) => add_feature(&mut out, feature, 0, tol),
        GeoJson::Geometry(geometry) => add_geometry(&mut out, geometry, Handle::new("feature-0"), tol),
    }
    out
}

fn add_feature(out: &mut FeatureParts, feature: Feature, index: usize, tol: f64) {
    let handle = feature_handle(&feature, index);
    match feature.geometry {
        Some(geometry) => add_geometry(out, geometry, handle, tol),
        None => out.push(Err(MergeError::DegenerateEntity {
            handle,
            reason: "feature has no geometry".to_owned(),
        })),
    }
}

fn feature_handle(feature: &Feature, index: usize) -> Handle {
    match feature.property("handle") {
        Some(JsonValue::String(s)) => return Handle::new(s.clone()),
        Some(JsonValue::Number(n)) => return Handle::new(n.to_string()),
        _ => {}
    }
    match &feature.id {
        Some(Id::String(s)) => Handle::new(s.clone()),
        Some(Id::Number(n)) => Handle::new(n.to_string()),
        None => Handle::new(format!("feature-{}", index)),
    }
}

fn add_geometry(out: &mut FeatureParts, geometry: Geometry, handle: Handle, tol: f64) {
    let converted: std::result::Result<geo_types::Geometry<f64>, geojson::Error> = geometry.try_into();
    let geom = match converted {
        Ok(geom) => geom,
        Err(err) => {
            out.push(Err(MergeError::DegenerateEntity { handle, reason: err.to_string() }));
            return;
        }
    };

    match geom {
        geo_types::Geometry::LineString(ls) => out.push(chain(&ls, handle, tol)),
        geo_types::Geometry::MultiLineString(mls) => {
            for ls in &mls {
                out.push(chain(ls, handle.clone(), tol));
            }
        }
        geo_types::Geometry::Polygon(poly) => out.push(chain(poly.exterior(), handle, tol)),
        other => out.push(Err(MergeError::DegenerateEntity {
            handle,
            reason: format!("unsupported geometry type {}", geometry_name(&other)),
        })),
    }
}

fn chain(ls: &geo_types::LineString<f64>, handle: Handle, tol: f64) -> Result<PolygonPart> {
    let points = ls.coords().map(|c| Point::from(*c)).collect();
    PolygonPart::from_entity(points, handle, tol)
}

fn geometry_name(geom: &geo_types::Geometry<f64>) -> &'static str {
    match geom {
        geo_types::Geometry::Point(_) => "Point",
        geo_types::Geometry::Line(_) => "Line",
        geo_types::Geometry::LineString(_) => "LineString",
        geo_types::Geometry::Polygon(_) => "Polygon",
        geo_types::Geometry::MultiPoint(_) => "MultiPoint",
        geo_types::Geometry::MultiLineString(_) => "MultiLineString",
        geo_types::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo_types::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo_types::Geometry::Rect(_) => "Rect",
        geo_types::Geometry::Triangle(_) => "Triangle",
    }
}

pub fn polygon_feature(polygon: &ClosedPolygon) -> Feature {
    let shape = polygon.to_polygon();
    let mut properties = JsonObject::new();
    properties.insert(
        "handles".to_owned(),
        JsonValue::Array(
            polygon
                .handles
                .iter()
                .map(|h| JsonValue::String(h.as_str().to_owned()))
                .collect(),
        ),
    );
    properties.insert("area".to_owned(), JsonValue::from(shape.unsigned_area()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&shape))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn polygons_to_feature_collection(polygons: &[ClosedPolygon]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: polygons.iter().map(polygon_feature).collect(),
        foreign_members: None,
    }
}
