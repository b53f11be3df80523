//! ダッシュボード設定
//!
//! API の接続先と地図の既定値（初期表示位置、ベースレイヤー、境界線スタイル）。

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://backend-geodais.onrender.com/api";

/// 地理座標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 表示用文字列 "<lat>, <lng>"（小数6桁）
    pub fn display(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// ベースレイヤー（タイルプロバイダ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
}

/// 境界ポリゴンの描画スタイル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryStyle {
    pub color: String,
    pub weight: f64,
    pub fill_opacity: f64,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        Self {
            color: "#3880ff".into(),
            weight: 4.0,
            fill_opacity: 0.4,
        }
    }
}

/// Point ジオメトリをピンではなく小さな円で描くための設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    pub class_name: String,
    pub size_px: u32,
}

impl PointMarker {
    /// アイコンの中心に合わせたアンカー
    pub fn anchor_px(&self) -> u32 {
        self.size_px / 2
    }
}

impl Default for PointMarker {
    fn default() -> Self {
        Self {
            class_name: "custom-marker-point".into(),
            size_px: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub base_layers: Vec<BaseLayer>,
    pub boundary_style: BoundaryStyle,
    pub point_marker: PointMarker,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // ペルー全体が入る位置
            center: LatLng::new(-9.00, -70.0152),
            zoom: 6,
            base_layers: vec![
                BaseLayer {
                    name: "Calles".into(),
                    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
                    attribution: "© OpenStreetMap contributors".into(),
                },
                BaseLayer {
                    name: "Satélite".into(),
                    url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}".into(),
                    attribution: "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community".into(),
                },
            ],
            boundary_style: BoundaryStyle::default(),
            point_marker: PointMarker::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base: String,
    pub map: MapConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            map: MapConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn registros_url(&self) -> String {
        registros_url(&self.api_base)
    }
}

/// `GET {api_base}/registros` のURL
pub fn registros_url(api_base: &str) -> String {
    format!("{}/registros", api_base.trim_end_matches('/'))
}
