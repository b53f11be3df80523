//! 登録一覧コンポーネント

use geodais_common::Registro;
use leptos::prelude::*;

#[component]
pub fn RecordList<F>(
    registros: ReadSignal<Vec<Registro>>,
    selected: ReadSignal<Option<Registro>>,
    loading: ReadSignal<bool>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(Registro) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="record-list">
            <Show
                when=move || !registros.with(|r| r.is_empty())
                fallback=move || view! {
                    <p class="text-muted">
                        {move || if loading.get() { "" } else { "No hay registros" }}
                    </p>
                }
            >
                <For
                    each=move || registros.get()
                    key=|registro| registro.internal_key.clone()
                    children={
                        let on_select = on_select.clone();
                        move |registro| {
                            let on_select = on_select.clone();
                            view! {
                                <RecordItem registro=registro selected=selected on_select=on_select />
                            }
                        }
                    }
                />
            </Show>
        </div>
    }
}

#[component]
fn RecordItem<F>(
    registro: Registro,
    selected: ReadSignal<Option<Registro>>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(Registro) + 'static + Clone + Send + Sync,
{
    let is_selected = {
        let key = registro.internal_key.clone();
        move || selected.with(|s| s.as_ref().is_some_and(|r| r.internal_key == key))
    };
    let fecha = registro.fecha_display();
    let foto_count = registro.fotos.len();

    view! {
        <div
            class="record-item"
            class:selected=is_selected
            on:click={
                let registro = registro.clone();
                move |_| on_select(registro.clone())
            }
        >
            <h4>{registro.nombre_completo.clone()}</h4>
            <div class="record-meta">
                <span class="crop-badge">{registro.tipo_cultivo.clone()}</span>
                <span>{format!("{:.2} ha", registro.area_ha)}</span>
                <span class="text-muted">{fecha}</span>
            </div>
            <p class="text-muted">
                {format!("DNI {} · {} fotos", registro.dni_productor, foto_count)}
            </p>
        </div>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn registro(key: &str) -> Registro {
        Registro {
            internal_key: key.to_string(),
            nombre_completo: format!("Productor {}", key),
            ..Default::default()
        }
    }

    #[wasm_bindgen_test]
    fn wasm_record_list_renders_and_selects() {
        let document = web_sys::window().unwrap().document().unwrap();
        let container: HtmlElement = document.create_element("div").unwrap().unchecked_into();
        document.body().unwrap().append_child(&container).unwrap();

        let picked = Arc::new(Mutex::new(Vec::<String>::new()));
        let on_select = {
            let picked = Arc::clone(&picked);
            move |registro: Registro| picked.lock().unwrap().push(registro.internal_key)
        };

        let _handle = leptos::mount::mount_to(container.clone(), move || {
            let (registros, _) = signal(vec![registro("R-1"), registro("R-2")]);
            let (selected, _) = signal(None::<Registro>);
            let (loading, _) = signal(false);
            view! {
                <RecordList registros=registros selected=selected loading=loading on_select=on_select />
            }
        });

        let items = container.query_selector_all(".record-item").unwrap();
        assert_eq!(items.length(), 2);

        let second: HtmlElement = items.item(1).unwrap().unchecked_into();
        second.click();
        assert_eq!(*picked.lock().unwrap(), vec!["R-2".to_string()]);
    }
}
