//! メインアプリケーションコンポーネント

use crate::api::HttpRecordSource;
use crate::components::{
    header::Header,
    loading_indicator::LoadingIndicator,
    map_panel::MapPanel,
    photo_lightbox::PhotoLightbox,
    record_list::RecordList,
};
use geodais_common::{DashboardConfig, DataStore, Environment, Lightbox, Registro};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

pub type Store = DataStore<HttpRecordSource>;

/// window と document があるときだけ対話的とみなす
pub fn browser_environment() -> Environment {
    let has_document = web_sys::window().and_then(|w| w.document()).is_some();
    Environment::from_interactive(has_document)
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::default();
    let env = browser_environment();
    let store = Rc::new(Store::new(HttpRecordSource::new(config.registros_url())));

    // ストアのセルを Leptos のシグナルへ中継する
    let (registros, set_registros) = signal(Vec::<Registro>::new());
    let (selected, set_selected) = signal(None::<Registro>);
    let (loading, set_loading) = signal(false);
    let (coordinates, set_coordinates) = signal(None::<String>);
    let (lightbox, set_lightbox) = signal(Lightbox::default());

    store.registros().subscribe(move |list| set_registros.set(list.clone()));
    store.loading().subscribe(move |value| set_loading.set(*value));
    store.selected().subscribe(move |value| {
        set_selected.set(value.clone());
        // 別レコードの写真を指さないよう閉じる
        set_lightbox.update(|lb| lb.close());
    });

    let store = StoredValue::new_local(store);

    // 起動時の読込（一度だけ）
    spawn_local(async move {
        let store = store.get_value();
        store.init(env).await;
    });

    let on_select = move |registro: Registro| {
        store.get_value().select(registro);
    };

    view! {
        <div class="container">
            <Header registros=registros />

            <div class="dashboard">
                <aside class="sidebar">
                    <LoadingIndicator loading=loading />
                    <RecordList
                        registros=registros
                        selected=selected
                        loading=loading
                        on_select=on_select
                    />
                </aside>

                <main class="content">
                    <MapPanel
                        store=store
                        map_config=config.map.clone()
                        env=env
                        coordinates=coordinates
                        set_coordinates=set_coordinates
                    />

                    <Show
                        when=move || selected.with(|s| s.is_some())
                        fallback=|| view! { <p class="text-muted">"Seleccione un registro"</p> }
                    >
                        <PhotoLightbox
                            selected=selected
                            lightbox=lightbox
                            set_lightbox=set_lightbox
                        />
                    </Show>
                </main>
            </div>
        </div>
    }
}
