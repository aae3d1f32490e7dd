pub mod filter_bar;
pub mod global_context;

use filter_bar::FilterBar;
use leptos::prelude::*;

/// Каркас приложения.
///
/// ```text
/// +------------------------------------------+
/// |        TopHeader + FilterBar             |
/// +------------------------------------------+
/// |                 Content                  |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header class="top-header">
                <span class="top-header__title">"Análise de Vendas"</span>
                <FilterBar />
            </header>
            <div class="app-main">
                {children()}
            </div>
        </div>
    }
}
