//! 地図ビュー
//!
//! 選択中レコードの境界を地図に描き、外接矩形の中心座標を表示用に保持する。
//! 地図そのものの描画は `MapBackend`（Leaflet など）に委譲する。

use crate::config::{BaseLayer, BoundaryStyle, LatLng, MapConfig, PointMarker};
use crate::environment::Environment;
use crate::error::Result;
use crate::geo::Bounds;
use crate::observable::{Observable, SubscriptionId};
use crate::store::DataStore;
use crate::types::Registro;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// 地図ライブラリが提供する機能
pub trait MapBackend {
    type Layer;

    /// 表示面に地図を作り、初期位置へ移動する
    fn create_map(&mut self, center: LatLng, zoom: u8) -> Result<()>;

    /// ベースレイヤーを登録し、先頭を表示してレイヤー切替コントロールを付ける
    fn add_base_layers(&mut self, layers: &[BaseLayer]) -> Result<()>;

    /// GeoJSON をスタイル付きオーバーレイとして追加する
    fn add_geojson(
        &mut self,
        geojson: &Value,
        style: &BoundaryStyle,
        marker: &PointMarker,
    ) -> Result<Self::Layer>;

    fn remove_layer(&mut self, layer: &Self::Layer);

    fn layer_bounds(&self, layer: &Self::Layer) -> Result<Bounds>;

    fn fit_bounds(&mut self, bounds: &Bounds);
}

pub struct MapView<B: MapBackend> {
    backend: B,
    config: MapConfig,
    initialized: bool,
    boundary: Option<B::Layer>,
    coordinates: Observable<Option<String>>,
}

impl<B: MapBackend> MapView<B> {
    pub fn new(backend: B, config: MapConfig) -> Self {
        Self {
            backend,
            config,
            initialized: false,
            boundary: None,
            coordinates: Observable::new(None),
        }
    }

    /// 地図を作成する。対話的な環境で一度だけ。
    pub fn initialize(&mut self, env: Environment) -> Result<bool> {
        if !env.is_interactive() || self.initialized {
            return Ok(false);
        }
        self.backend.create_map(self.config.center, self.config.zoom)?;
        self.backend.add_base_layers(&self.config.base_layers)?;
        self.initialized = true;
        log::debug!(
            "map initialized at {} zoom {}",
            self.config.center.display(),
            self.config.zoom
        );
        Ok(true)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 前回の境界を消して新しい境界を描く
    ///
    /// ジオメトリがない・壊れている場合は座標表示をクリアするだけで、エラーは返さない。
    pub fn show_geometry(&mut self, registro: &Registro) {
        if let Some(previous) = self.boundary.take() {
            self.backend.remove_layer(&previous);
        }

        let Some(geojson) = registro.geometry() else {
            log::debug!("{} has no geometry, clearing coordinates", registro.internal_key);
            self.coordinates.set(None);
            return;
        };

        match self.draw(geojson) {
            Ok(center) => self.coordinates.set(Some(center.display())),
            Err(e) => {
                log::warn!("Geometría inválida o vacía ({}): {}", registro.internal_key, e);
                self.coordinates.set(None);
            }
        }
    }

    fn draw(&mut self, geojson: &Value) -> Result<LatLng> {
        let layer = self.backend.add_geojson(
            geojson,
            &self.config.boundary_style,
            &self.config.point_marker,
        )?;
        // 矩形が取れなくてもレイヤーは残し、次の選択時に消す
        let bounds = self.backend.layer_bounds(&layer);
        self.boundary = Some(layer);
        let bounds = bounds?;
        self.backend.fit_bounds(&bounds);
        Ok(bounds.center())
    }

    pub fn current_coordinates(&self) -> Option<String> {
        self.coordinates.get()
    }

    pub fn coordinates(&self) -> &Observable<Option<String>> {
        &self.coordinates
    }

    pub fn has_boundary(&self) -> bool {
        self.boundary.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }
}

/// 選択中レコードの変化に合わせて地図を描き直す
///
/// 地図が未初期化の間の選択は無視する（初期化後の次の選択から描く）。
pub fn follow_selection<S, B>(store: &DataStore<S>, view: Rc<RefCell<MapView<B>>>) -> SubscriptionId
where
    S: crate::store::RecordSource,
    B: MapBackend + 'static,
{
    store.selected().subscribe(move |selected| {
        let Some(registro) = selected else {
            return;
        };
        match view.try_borrow_mut() {
            Ok(mut view) if view.is_initialized() => view.show_geometry(registro),
            Ok(_) => log::debug!("map not initialized yet, skipping redraw"),
            Err(_) => log::warn!("map busy, skipping redraw of {}", registro.internal_key),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessMap;
    use crate::store::RecordSource;
    use serde_json::json;

    struct NoSource;

    impl RecordSource for NoSource {
        async fn fetch_registros(&self) -> Result<Vec<Registro>> {
            Ok(Vec::new())
        }
    }

    fn registro(key: &str, geojson: Option<Value>) -> Registro {
        Registro {
            internal_key: key.to_string(),
            geojson,
            ..Default::default()
        }
    }

    fn square_around(lat: f64, lng: f64) -> Value {
        let d = 0.001;
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [lng - d, lat - d], [lng + d, lat - d], [lng + d, lat + d], [lng - d, lat + d], [lng - d, lat - d]
                ]]
            }
        })
    }

    fn ready_view() -> MapView<HeadlessMap> {
        let mut view = MapView::new(HeadlessMap::default(), MapConfig::default());
        assert!(view.initialize(Environment::Interactive).unwrap());
        view
    }

    #[test]
    fn test_initialize_once() {
        let mut view = MapView::new(HeadlessMap::default(), MapConfig::default());
        assert!(view.initialize(Environment::Interactive).unwrap());
        assert!(!view.initialize(Environment::Interactive).unwrap());

        let map = view.backend();
        assert_eq!(map.maps_created(), 1);
        assert_eq!(map.base_layers(), ["Calles", "Satélite"]);
        assert_eq!(map.active_base_layer(), Some("Calles"));
        assert_eq!(map.center(), Some(LatLng::new(-9.00, -70.0152)));
        assert_eq!(map.zoom(), Some(6));
    }

    #[test]
    fn test_initialize_skipped_in_prerender() {
        let mut view = MapView::new(HeadlessMap::default(), MapConfig::default());
        assert!(!view.initialize(Environment::Prerender).unwrap());
        assert!(!view.is_initialized());
        assert_eq!(view.backend().maps_created(), 0);
    }

    #[test]
    fn test_coordinates_from_bounds_center() {
        let mut view = ready_view();
        view.show_geometry(&registro("a", Some(square_around(-9.000123, -70.015234))));

        assert_eq!(view.current_coordinates().as_deref(), Some("-9.000123, -70.015234"));
        assert_eq!(view.backend().overlay_count(), 1);
        assert!(view.has_boundary());
        assert!(view.backend().fitted().is_some());
        assert_eq!(view.backend().overlay_style(), Some(&view.config().boundary_style));
    }

    #[test]
    fn test_custom_boundary_style_reaches_backend() {
        let mut config = MapConfig::default();
        config.boundary_style = BoundaryStyle {
            color: "#ff0000".into(),
            weight: 4.0,
            fill_opacity: 0.5,
        };
        let mut view = MapView::new(HeadlessMap::default(), config);
        view.initialize(Environment::Interactive).unwrap();
        view.show_geometry(&registro("a", Some(square_around(-9.0, -70.0))));

        let style = view.backend().overlay_style().unwrap();
        assert_eq!(style.color, "#ff0000");
        assert_eq!(style.weight, 4.0);
        assert_eq!(view.config().boundary_style.fill_opacity, 0.5);
    }

    #[test]
    fn test_null_geometry_clears_coordinates() {
        let mut view = ready_view();
        view.show_geometry(&registro("a", Some(square_around(-9.0, -70.0))));
        assert!(view.current_coordinates().is_some());

        view.show_geometry(&registro("b", None));
        assert_eq!(view.current_coordinates(), None);
        assert_eq!(view.backend().overlay_count(), 0);
        assert!(!view.has_boundary());

        view.show_geometry(&registro("c", Some(Value::Null)));
        assert_eq!(view.current_coordinates(), None);
    }

    #[test]
    fn test_malformed_geometry_clears_coordinates() {
        let mut view = ready_view();
        view.show_geometry(&registro("a", Some(square_around(-9.0, -70.0))));

        view.show_geometry(&registro("bad", Some(json!({"type": "Polygon"}))));
        assert_eq!(view.current_coordinates(), None);
        assert_eq!(view.backend().overlay_count(), 0);

        // 空のコレクションは追加できるが矩形がない
        let empty = json!({"type": "FeatureCollection", "features": []});
        view.show_geometry(&registro("empty", Some(empty)));
        assert_eq!(view.current_coordinates(), None);
        assert_eq!(view.backend().overlay_count(), 1);
    }

    #[test]
    fn test_repeated_selection_keeps_single_layer() {
        let store = DataStore::new(NoSource);
        let view = Rc::new(RefCell::new(ready_view()));
        follow_selection(&store, Rc::clone(&view));

        let a = registro("a", Some(square_around(-12.05, -77.04)));
        store.select(a.clone());
        store.select(a.clone());
        store.select(a);

        let view = view.borrow();
        assert_eq!(view.backend().overlay_count(), 1);
        assert_eq!(view.backend().overlays_added(), 3);
        assert_eq!(view.current_coordinates().as_deref(), Some("-12.050000, -77.040000"));
    }

    #[test]
    fn test_selection_before_initialize_is_ignored() {
        let store = DataStore::new(NoSource);
        let view = Rc::new(RefCell::new(MapView::new(HeadlessMap::default(), MapConfig::default())));
        follow_selection(&store, Rc::clone(&view));

        store.select(registro("early", Some(square_around(-9.0, -70.0))));
        assert_eq!(view.borrow().backend().overlays_added(), 0);

        view.borrow_mut().initialize(Environment::Interactive).unwrap();
        store.select(registro("late", Some(square_around(-9.0, -70.0))));
        assert_eq!(view.borrow().backend().overlay_count(), 1);
    }
}
