//! GeoJSON の外接矩形
//!
//! 地図ライブラリを持たないホスト（端末・テスト）向け。
//! 座標は GeoJSON の規約どおり `[lng, lat]`。

use crate::config::LatLng;
use crate::error::{Error, Result};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    fn from_point(p: LatLng) -> Self {
        Self { south: p.lat, west: p.lng, north: p.lat, east: p.lng }
    }

    fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

/// GeoJSON（Geometry / Feature / FeatureCollection）の外接矩形を求める
///
/// 構造が壊れている場合は `InvalidGeometry`、座標が一つもない場合は `EmptyGeometry`。
pub fn bounds_of(geojson: &Value) -> Result<Bounds> {
    let mut bounds = None;
    collect(geojson, &mut bounds)?;
    bounds.ok_or(Error::EmptyGeometry)
}

fn collect(value: &Value, bounds: &mut Option<Bounds>) -> Result<()> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidGeometry("missing 'type'".into()))?;

    match kind {
        "FeatureCollection" => {
            let features = value
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| Error::InvalidGeometry("'features' must be an array".into()))?;
            for feature in features {
                collect(feature, bounds)?;
            }
        }
        "Feature" => match value.get("geometry") {
            Some(Value::Null) | None => {}
            Some(geometry) => collect(geometry, bounds)?,
        },
        "GeometryCollection" => {
            let geometries = value
                .get("geometries")
                .and_then(Value::as_array)
                .ok_or_else(|| Error::InvalidGeometry("'geometries' must be an array".into()))?;
            for geometry in geometries {
                collect(geometry, bounds)?;
            }
        }
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon" => {
            let coordinates = value
                .get("coordinates")
                .ok_or_else(|| Error::InvalidGeometry(format!("{} without coordinates", kind)))?;
            collect_positions(coordinates, bounds)?;
        }
        other => return Err(Error::InvalidGeometry(format!("unknown type '{}'", other))),
    }
    Ok(())
}

fn collect_positions(value: &Value, bounds: &mut Option<Bounds>) -> Result<()> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::InvalidGeometry("coordinates must be arrays".into()))?;

    // 先頭が数値なら position、配列ならさらに入れ子
    if items.first().is_some_and(Value::is_number) {
        let point = position(items)?;
        match bounds {
            Some(b) => b.extend(point),
            None => *bounds = Some(Bounds::from_point(point)),
        }
        return Ok(());
    }
    for item in items {
        collect_positions(item, bounds)?;
    }
    Ok(())
}

fn position(items: &[Value]) -> Result<LatLng> {
    match (items.first().and_then(Value::as_f64), items.get(1).and_then(Value::as_f64)) {
        (Some(lng), Some(lat)) => Ok(LatLng::new(lat, lng)),
        _ => Err(Error::InvalidGeometry("position needs [lng, lat]".into())),
    }
}
