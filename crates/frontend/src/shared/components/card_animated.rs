//! CardAnimated: Thaw Card с анимацией появления `card-appear`.

use leptos::prelude::*;
use thaw::Card;

#[component]
pub fn CardAnimated(
    /// Задержка анимации в мс (stagger)
    #[prop(optional)]
    delay_ms: u32,
    /// Дополнительные inline-стили
    #[prop(optional, into)]
    style: String,
    children: Children,
) -> impl IntoView {
    let full_style = if style.is_empty() {
        format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms)
    } else {
        format!(
            "animation: card-appear 0.28s ease-out {}ms both; {}",
            delay_ms, style
        )
    };

    view! {
        <Card attr:style=full_style>
            {children()}
        </Card>
    }
}
