//! ヘッダーコンポーネント

use geodais_common::Registro;
use leptos::prelude::*;

#[component]
pub fn Header(registros: ReadSignal<Vec<Registro>>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"GeoDais - Registros de parcelas"</h1>
            <span class="header-count">
                {move || format!("{} registros", registros.with(|r| r.len()))}
            </span>
        </header>
    }
}
