//! Leaflet バックエンド
//!
//! Leaflet 本体は `js/map-bridge.js` 経由で初回利用時に読み込む。
//! 読込は一度だけ行い、以降の呼び出しは同じ結果を共有する。

use crate::js_error::js_error_message;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use geodais_common::{BaseLayer, BoundaryStyle, Bounds, Error, LatLng, MapBackend, PointMarker, Result};
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

#[wasm_bindgen(module = "/js/map-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = "loadLeaflet")]
    fn load_leaflet_js() -> js_sys::Promise;

    #[wasm_bindgen(js_name = "createMap", catch)]
    fn create_map_js(
        leaflet: &JsValue,
        container: &HtmlElement,
        lat: f64,
        lng: f64,
        zoom: u8,
    ) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "addBaseLayers", catch)]
    fn add_base_layers_js(
        leaflet: &JsValue,
        map: &JsValue,
        names: &js_sys::Array,
        urls: &js_sys::Array,
        attributions: &js_sys::Array,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(js_name = "addGeoJson", catch)]
    fn add_geojson_js(
        leaflet: &JsValue,
        map: &JsValue,
        data: &JsValue,
        color: &str,
        weight: f64,
        fill_opacity: f64,
        marker_class: &str,
        marker_size: u32,
        marker_anchor: u32,
    ) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "removeLayer")]
    fn remove_layer_js(map: &JsValue, layer: &JsValue);

    #[wasm_bindgen(js_name = "layerBounds", catch)]
    fn layer_bounds_js(layer: &JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "fitBounds")]
    fn fit_bounds_js(map: &JsValue, south: f64, west: f64, north: f64, east: f64);
}

type LoadFuture = Shared<LocalBoxFuture<'static, std::result::Result<JsValue, String>>>;

thread_local! {
    static LEAFLET: RefCell<Option<LoadFuture>> = const { RefCell::new(None) };
}

/// 読込済みの Leaflet モジュール
#[derive(Clone)]
pub struct Leaflet(JsValue);

/// Leaflet を読み込む（一度だけ。同時に呼ばれても同じ読込を待つ）
pub async fn load_leaflet() -> Result<Leaflet> {
    let load = LEAFLET.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| {
                log::debug!("loading Leaflet module");
                async {
                    JsFuture::from(load_leaflet_js())
                        .await
                        .map_err(|e| js_error_message(&e))
                }
                .boxed_local()
                .shared()
            })
            .clone()
    });
    load.await.map(Leaflet).map_err(Error::Map)
}

fn js_array<'a>(items: impl Iterator<Item = &'a str>) -> js_sys::Array {
    items.map(JsValue::from_str).collect()
}

pub struct LeafletBackend {
    leaflet: Leaflet,
    container: HtmlElement,
    map: Option<JsValue>,
}

impl LeafletBackend {
    pub fn new(leaflet: Leaflet, container: HtmlElement) -> Self {
        Self { leaflet, container, map: None }
    }

    fn map(&self) -> Result<&JsValue> {
        self.map
            .as_ref()
            .ok_or_else(|| Error::Map("map has not been created".into()))
    }
}

impl MapBackend for LeafletBackend {
    type Layer = JsValue;

    fn create_map(&mut self, center: LatLng, zoom: u8) -> Result<()> {
        let map = create_map_js(&self.leaflet.0, &self.container, center.lat, center.lng, zoom)
            .map_err(|e| Error::Map(js_error_message(&e)))?;
        self.map = Some(map);
        Ok(())
    }

    fn add_base_layers(&mut self, layers: &[BaseLayer]) -> Result<()> {
        if layers.is_empty() {
            return Err(Error::Map("at least one base layer is required".into()));
        }
        let names = js_array(layers.iter().map(|l| l.name.as_str()));
        let urls = js_array(layers.iter().map(|l| l.url_template.as_str()));
        let attributions = js_array(layers.iter().map(|l| l.attribution.as_str()));
        add_base_layers_js(&self.leaflet.0, self.map()?, &names, &urls, &attributions)
            .map_err(|e| Error::Map(js_error_message(&e)))
    }

    fn add_geojson(
        &mut self,
        geojson: &Value,
        style: &BoundaryStyle,
        marker: &PointMarker,
    ) -> Result<JsValue> {
        // オブジェクトは Map ではなく素の JS オブジェクトとして渡す
        let data = geojson
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| Error::InvalidGeometry(e.to_string()))?;
        add_geojson_js(
            &self.leaflet.0,
            self.map()?,
            &data,
            &style.color,
            style.weight,
            style.fill_opacity,
            &marker.class_name,
            marker.size_px,
            marker.anchor_px(),
        )
        .map_err(|e| Error::InvalidGeometry(js_error_message(&e)))
    }

    fn remove_layer(&mut self, layer: &JsValue) {
        if let Some(map) = &self.map {
            remove_layer_js(map, layer);
        }
    }

    fn layer_bounds(&self, layer: &JsValue) -> Result<Bounds> {
        let raw = layer_bounds_js(layer).map_err(|e| Error::Map(js_error_message(&e)))?;
        let [south, west, north, east]: [f64; 4] = serde_wasm_bindgen::from_value(raw)
            .map_err(|e| Error::Map(e.to_string()))?;
        Ok(Bounds { south, west, north, east })
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        if let Some(map) = &self.map {
            fit_bounds_js(map, bounds.south, bounds.west, bounds.north, bounds.east);
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use geodais_common::{Environment, MapConfig, MapView, Registro};
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn container() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let div: HtmlElement = document.create_element("div").unwrap().unchecked_into();
        document.body().unwrap().append_child(&div).unwrap();
        div
    }

    async fn ready_backend() -> LeafletBackend {
        let leaflet = load_leaflet().await.expect("Leaflet should load");
        let config = MapConfig::default();
        let mut backend = LeafletBackend::new(leaflet, container());
        backend.create_map(config.center, config.zoom).unwrap();
        backend.add_base_layers(&config.base_layers).unwrap();
        backend
    }

    #[wasm_bindgen_test]
    async fn wasm_load_leaflet_returns_same_module() {
        let (first, second) = futures::join!(load_leaflet(), load_leaflet());
        let (first, second) = (first.unwrap(), second.unwrap());
        assert!(js_sys::Object::is(&first.0, &second.0));

        let third = load_leaflet().await.unwrap();
        assert!(js_sys::Object::is(&first.0, &third.0));
    }

    #[wasm_bindgen_test]
    async fn wasm_empty_collection_has_no_bounds() {
        let mut backend = ready_backend().await;
        let config = MapConfig::default();
        let empty = json!({"type": "FeatureCollection", "features": []});

        let layer = backend
            .add_geojson(&empty, &config.boundary_style, &config.point_marker)
            .unwrap();
        assert!(backend.layer_bounds(&layer).is_err());
    }

    #[wasm_bindgen_test]
    async fn wasm_map_view_clears_coordinates_for_empty_collection() {
        let leaflet = load_leaflet().await.unwrap();
        let mut view = MapView::new(LeafletBackend::new(leaflet, container()), MapConfig::default());
        assert!(view.initialize(Environment::Interactive).unwrap());

        let polygon = json!({
            "type": "Polygon",
            "coordinates": [[[-70.1, -9.1], [-70.0, -9.1], [-70.0, -9.0], [-70.1, -9.0], [-70.1, -9.1]]]
        });
        view.show_geometry(&Registro {
            internal_key: "p".into(),
            geojson: Some(polygon),
            ..Default::default()
        });
        assert_eq!(view.current_coordinates().as_deref(), Some("-9.050000, -70.050000"));

        view.show_geometry(&Registro {
            internal_key: "e".into(),
            geojson: Some(json!({"type": "FeatureCollection", "features": []})),
            ..Default::default()
        });
        assert_eq!(view.current_coordinates(), None);
    }
}
