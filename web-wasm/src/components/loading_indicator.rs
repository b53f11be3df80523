//! 読込中インジケーター

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator(loading: ReadSignal<bool>) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="loading-indicator">
                <div class="spinner" />
                <p class="loading-text">"Cargando registros..."</p>
            </div>
        </Show>
    }
}
