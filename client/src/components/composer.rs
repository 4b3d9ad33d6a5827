//! Floating "+" control that expands into the note composer.

use leptos::prelude::*;
use notes::{NoteColor, Viewport};

use crate::app::FrameSender;
use crate::net::requests;
use crate::state::board::{BoardState, CREATE_FAILED_MESSAGE};
use crate::state::composer::ComposerState;
use crate::state::session::SessionState;

/// Browser viewport size, used to place new notes on screen.
fn current_viewport() -> Viewport {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return Viewport::default();
        };
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        match (width, height) {
            (Some(width), Some(height)) => Viewport { width, height },
            _ => Viewport::default(),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Viewport::default()
    }
}

#[component]
pub fn Composer() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let sender = expect_context::<RwSignal<FrameSender>>();
    let composer = RwSignal::new(ComposerState::default());

    let submit = move || {
        let Some(author) = session.with_untracked(|s| s.viewer_name().map(str::to_owned)) else {
            return;
        };
        let Some((content, color)) = composer.try_update(ComposerState::take_submission).flatten() else {
            return;
        };
        let frame = requests::create(&content, color, &author, current_viewport());
        if !sender.get_untracked().send(&frame) {
            leptos::logging::warn!("note:create not sent: socket unavailable");
            board.update(|b| b.show_banner(CREATE_FAILED_MESSAGE));
        }
    };

    view! {
        <Show
            when=move || composer.with(|c| c.expanded)
            fallback=move || {
                view! {
                    <button class="composer-trigger" title="Add a note" on:click=move |_| composer.update(ComposerState::expand)>
                        "+"
                    </button>
                }
            }
        >
            <div class="composer">
                <h3 class="composer__title">"Add a sweet note \u{1F495}"</h3>
                <textarea
                    class="composer__input"
                    placeholder="Write something lovely..."
                    autofocus=true
                    prop:value=move || composer.with(|c| c.content.clone())
                    on:input=move |ev| composer.update(|c| c.content = event_target_value(&ev))
                ></textarea>
                <div class="composer__swatches">
                    {NoteColor::ALL
                        .into_iter()
                        .map(|color| {
                            let class = move || {
                                if composer.with(|c| c.color == color) {
                                    "composer__swatch composer__swatch--selected"
                                } else {
                                    "composer__swatch"
                                }
                            };
                            view! {
                                <button
                                    class=class
                                    title=color.label()
                                    style=format!("background-color: {};", color.hex())
                                    on:click=move |_| composer.update(|c| c.color = color)
                                ></button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="composer__actions">
                    <button class="composer__cancel" on:click=move |_| composer.update(ComposerState::cancel)>
                        "Cancel"
                    </button>
                    <button
                        class="composer__send"
                        disabled=move || !composer.with(ComposerState::can_submit)
                        on:click=move |_| submit()
                    >
                        "Send"
                    </button>
                </div>
            </div>
        </Show>
    }
}
