//! 描画先を持たない地図バックエンド
//!
//! 端末表示とテストで使う。レイヤーとビューポートを記録し、
//! 外接矩形は `geo::bounds_of` で求める。

use crate::config::{BaseLayer, BoundaryStyle, LatLng, PointMarker};
use crate::error::{Error, Result};
use crate::geo::{self, Bounds};
use crate::map_view::MapBackend;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayId(u64);

#[derive(Debug, Clone)]
struct Overlay {
    id: OverlayId,
    bounds: Option<Bounds>,
    style: BoundaryStyle,
}

#[derive(Debug, Default)]
pub struct HeadlessMap {
    maps_created: usize,
    center: Option<LatLng>,
    zoom: Option<u8>,
    base_layers: Vec<String>,
    overlays: Vec<Overlay>,
    next_id: u64,
    overlays_added: usize,
    fitted: Option<Bounds>,
}

impl HeadlessMap {
    pub fn maps_created(&self) -> usize {
        self.maps_created
    }

    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    pub fn zoom(&self) -> Option<u8> {
        self.zoom
    }

    pub fn base_layers(&self) -> Vec<&str> {
        self.base_layers.iter().map(String::as_str).collect()
    }

    pub fn active_base_layer(&self) -> Option<&str> {
        self.base_layers.first().map(String::as_str)
    }

    /// 現在地図上にある境界オーバーレイの数
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// これまでに追加したオーバーレイの累計
    pub fn overlays_added(&self) -> usize {
        self.overlays_added
    }

    pub fn overlay_style(&self) -> Option<&BoundaryStyle> {
        self.overlays.last().map(|o| &o.style)
    }

    pub fn fitted(&self) -> Option<Bounds> {
        self.fitted
    }
}

impl MapBackend for HeadlessMap {
    type Layer = OverlayId;

    fn create_map(&mut self, center: LatLng, zoom: u8) -> Result<()> {
        self.maps_created += 1;
        self.center = Some(center);
        self.zoom = Some(zoom);
        Ok(())
    }

    fn add_base_layers(&mut self, layers: &[BaseLayer]) -> Result<()> {
        if layers.is_empty() {
            return Err(Error::Map("at least one base layer is required".into()));
        }
        self.base_layers = layers.iter().map(|l| l.name.clone()).collect();
        Ok(())
    }

    fn add_geojson(
        &mut self,
        geojson: &Value,
        style: &BoundaryStyle,
        _marker: &PointMarker,
    ) -> Result<OverlayId> {
        // 壊れた GeoJSON は追加しない。空のコレクションは追加できる
        let bounds = match geo::bounds_of(geojson) {
            Ok(b) => Some(b),
            Err(Error::EmptyGeometry) => None,
            Err(e) => return Err(e),
        };
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.overlays_added += 1;
        self.overlays.push(Overlay { id, bounds, style: style.clone() });
        Ok(id)
    }

    fn remove_layer(&mut self, layer: &OverlayId) {
        self.overlays.retain(|o| o.id != *layer);
    }

    fn layer_bounds(&self, layer: &OverlayId) -> Result<Bounds> {
        self.overlays
            .iter()
            .find(|o| o.id == *layer)
            .ok_or_else(|| Error::Map("layer is not on the map".into()))?
            .bounds
            .ok_or(Error::EmptyGeometry)
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        self.fitted = Some(*bounds);
        self.center = Some(bounds.center());
    }
}
