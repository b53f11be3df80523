//! 地図パネルコンポーネント
//!
//! 表示面ができた後に一度だけ Leaflet を読み込んで地図を作り、
//! 以降は選択中レコードの変化に合わせて境界を描き直す。

use crate::app::Store;
use crate::map::{load_leaflet, LeafletBackend};
use geodais_common::{follow_selection, Environment, MapConfig, MapView};
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlElement;

#[component]
pub fn MapPanel(
    store: StoredValue<Rc<Store>, LocalStorage>,
    map_config: MapConfig,
    env: Environment,
    coordinates: ReadSignal<Option<String>>,
    set_coordinates: WriteSignal<Option<String>>,
) -> impl IntoView {
    let map_ref = NodeRef::<Div>::new();
    let started = StoredValue::new(false);

    Effect::new(move |_| {
        let Some(el) = map_ref.get() else {
            return;
        };
        if started.get_value() || !env.is_interactive() {
            return;
        }
        started.set_value(true);

        let container: HtmlElement = el.into();
        let store = store.get_value();
        let map_config = map_config.clone();
        spawn_local(async move {
            mount_map(container, store, map_config, env, set_coordinates).await;
        });
    });

    view! {
        <div class="map-panel">
            <div class="map-container" node_ref=map_ref style="height: 480px;" />
            <p class="map-coordinates">
                {move || match coordinates.get() {
                    Some(c) => format!("Coordenadas: {}", c),
                    None => "Coordenadas: -".to_string(),
                }}
            </p>
        </div>
    }
}

async fn mount_map(
    container: HtmlElement,
    store: Rc<Store>,
    map_config: MapConfig,
    env: Environment,
    set_coordinates: WriteSignal<Option<String>>,
) {
    let leaflet = match load_leaflet().await {
        Ok(leaflet) => leaflet,
        Err(e) => {
            log::error!("Error crítico: Leaflet no se cargó correctamente: {}", e);
            return;
        }
    };

    let mut view = MapView::new(LeafletBackend::new(leaflet, container), map_config);
    match view.initialize(env) {
        Ok(true) => {}
        Ok(false) => return,
        Err(e) => {
            log::error!("map initialization failed: {}", e);
            return;
        }
    }

    view.coordinates().subscribe(move |c| set_coordinates.set(c.clone()));
    follow_selection(&store, Rc::new(RefCell::new(view)));
}
