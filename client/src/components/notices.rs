//! Create-failure banner and the transient write-failure toast.

use leptos::prelude::*;

use crate::state::board::BoardState;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let message = move || board.with(|b| b.banner.clone());

    view! {
        <Show when=move || message().is_some()>
            <div class="error-banner" role="alert">
                <span>{move || message().unwrap_or_default()}</span>
                <button class="error-banner__dismiss" title="Dismiss" on:click=move |_| board.update(BoardState::dismiss_banner)>
                    "\u{00D7}"
                </button>
            </div>
        </Show>
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let toast = move || board.with(|b| b.toast.clone());

    view! {
        <Show when=move || toast().is_some()>
            <div class="toast" role="status">
                {move || toast().map(|t| t.message).unwrap_or_default()}
            </div>
        </Show>
    }
}
