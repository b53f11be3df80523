//! 写真サムネイルとライトボックス

use geodais_common::{Lightbox, Registro};
use leptos::prelude::*;

#[component]
pub fn PhotoLightbox(
    selected: ReadSignal<Option<Registro>>,
    lightbox: ReadSignal<Lightbox>,
    set_lightbox: WriteSignal<Lightbox>,
) -> impl IntoView {
    let photo_count = move || selected.with(|s| s.as_ref().map_or(0, |r| r.fotos.len()));
    let current_url = move || {
        let lb = lightbox.get();
        selected.with(|s| {
            s.as_ref()
                .and_then(|r| lb.current_url(&r.fotos))
                .map(str::to_string)
        })
    };
    let caption = move || {
        let lb = lightbox.get();
        let index = lb.index()?;
        selected.with(|s| {
            let registro = s.as_ref()?;
            let tipo = registro.fotos.get(index).map(|f| f.tipo_foto.clone()).unwrap_or_default();
            Some(format!("{} ({}/{})", tipo, index + 1, registro.fotos.len()))
        })
    };

    let on_prev = move |_| set_lightbox.update(|lb| lb.previous(photo_count()));
    let on_next = move |_| set_lightbox.update(|lb| lb.next(photo_count()));
    let on_close = move |_| set_lightbox.update(|lb| lb.close());

    view! {
        <div class="photo-strip">
            <For
                each=move || {
                    selected.with(|s| {
                        s.as_ref()
                            .map(|r| r.fotos.iter().cloned().enumerate().collect::<Vec<_>>())
                            .unwrap_or_default()
                    })
                }
                key=|(i, foto)| (*i, foto.id)
                children=move |(i, foto)| {
                    view! {
                        <img
                            class="photo-thumb"
                            src=foto.url.clone()
                            alt=foto.tipo_foto.clone()
                            on:click=move |_| set_lightbox.update(|lb| lb.open(i))
                        />
                    }
                }
            />
        </div>

        <Show when=move || lightbox.get().is_open()>
            <div class="lightbox-overlay" on:click=on_close>
                <div class="lightbox-content" on:click=|ev| ev.stop_propagation()>
                    <Show
                        when=move || current_url().is_some()
                        fallback=|| view! { <p class="text-muted">"Foto no disponible"</p> }
                    >
                        <img class="lightbox-image" src=move || current_url().unwrap_or_default() />
                    </Show>
                    <p class="lightbox-caption">{move || caption().unwrap_or_default()}</p>
                    <div class="lightbox-controls">
                        <button class="btn btn-secondary" on:click=on_prev>"‹ Anterior"</button>
                        <button class="btn btn-secondary" on:click=on_next>"Siguiente ›"</button>
                        <button class="btn btn-tertiary" on:click=on_close>"Cerrar"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
