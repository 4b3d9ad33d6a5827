//! Board page: header, the live note snapshot, composer and player.
//!
//! SYSTEM CONTEXT
//! ==============
//! The frame client owns the websocket. `BoardPage` owns the live query:
//! it sends `notes:subscribe` for the local day when mounted and releases it
//! on cleanup, so switching user (which unmounts the page) tears the
//! subscription down.

use leptos::prelude::*;

use crate::app::FrameSender;
use crate::components::composer::Composer;
use crate::components::floating_hearts::FloatingHearts;
use crate::components::music_player::MusicPlayer;
use crate::components::notices::{ErrorBanner, Toast};
use crate::components::sticky_note::StickyNote;
use crate::net::requests;
use crate::state::board::{BoardState, ConnectionStatus, LoadState};
use crate::state::session::{self, SessionState};
use crate::util::time::local_day_start_ms;

#[component]
pub fn BoardPage() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let sender = expect_context::<RwSignal<FrameSender>>();

    // Subscribe once per mount; reconnects re-send it from the frame client.
    Effect::new(move || {
        let day_start = local_day_start_ms();
        let request = board.try_update(|b| {
            b.reset_view();
            requests::subscribe(b, day_start)
        });
        if let Some(request) = request {
            sender.get_untracked().send(&request);
        }
    });

    on_cleanup(move || {
        if let Some(request) = board.try_update(requests::unsubscribe).flatten() {
            sender.get_untracked().send(&request);
        }
        board.update(BoardState::reset_view);
    });

    let switch_user = move |_| {
        session::forget();
        session.update(SessionState::switch_user);
    };

    let avatar = move || session.with(|s| s.user.as_ref().map(|u| u.avatar.clone()).unwrap_or_default());
    let name = move || session.with(|s| s.user.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let status_class = move || match board.with(|b| b.connection_status) {
        ConnectionStatus::Connected => "status-dot status-dot--connected",
        ConnectionStatus::Connecting => "status-dot status-dot--connecting",
        ConnectionStatus::Disconnected => "status-dot status-dot--disconnected",
    };

    let body = move || match board.with(|b| b.load.clone()) {
        LoadState::Loading => view! {
            <div class="board-state">
                <div class="board-state__icon board-state__icon--pulse">"\u{2665}"</div>
                <p>"Loading your love notes..."</p>
            </div>
        }
        .into_any(),
        LoadState::Failed(message) => view! {
            <div class="board-state board-state--error">
                <div class="board-state__card">
                    <div class="board-state__icon">"\u{2665}"</div>
                    <h2>"Connection Error"</h2>
                    <p>{message}</p>
                    <button class="board-state__retry" on:click=move |_| reload_page()>
                        "Try Again"
                    </button>
                </div>
            </div>
        }
        .into_any(),
        LoadState::Ready => view! { <NoteLayer/> }.into_any(),
    };

    view! {
        <div class="board">
            <FloatingHearts/>

            <header class="board-header">
                <div class="board-header__brand">
                    <div class="board-header__logo">"\u{2665}"</div>
                    <div>
                        <h1>"Our Love Notes"</h1>
                        <p>"Today's sweet messages"</p>
                    </div>
                </div>
                <div class="board-header__right">
                    <span class=status_class></span>
                    <span class="board-header__playing">"\u{266B} Playing our playlist"</span>
                    <button class="board-header__user" on:click=switch_user>
                        <span class="board-header__avatar">{avatar}</span>
                        <span class="board-header__who">
                            <span class="board-header__name">{name}</span>
                            <span class="board-header__switch">"Switch user"</span>
                        </span>
                    </button>
                </div>
            </header>

            <ErrorBanner/>
            <main class="board-body">{body}</main>
            <Composer/>
            <MusicPlayer/>
            <Toast/>
        </div>
    }
}

/// Notes of the current snapshot, or the empty-day message.
#[component]
fn NoteLayer() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let ids = move || board.with(|b| b.notes.iter().map(|n| n.id).collect::<Vec<_>>());

    view! {
        <Show
            when=move || board.with(|b| !b.notes.is_empty())
            fallback=|| {
                view! {
                    <div class="board-state">
                        <div class="board-state__icon">"\u{2665}"</div>
                        <h2>"No notes yet today"</h2>
                        <p>"Start by adding your first sweet message!"</p>
                    </div>
                }
            }
        >
            <For each=ids key=|id| *id let:id>
                <StickyNote note_id=id/>
            </For>
        </Show>
    }
}

fn reload_page() {
    #[cfg(feature = "hydrate")]
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}
