//! One draggable sticky note with its reactions.
//!
//! DESIGN
//! ======
//! The note body renders from the board's latest snapshot, except for its
//! position, which comes from `BoardState::display_position` so an in-flight
//! drag shows the local overlay. Pointer moves update the overlay on every
//! event; `note:move` frames go out only when the drag throttle says so.
//! Delete is offered to the author only, which is a display rule and not an
//! access check.

use leptos::prelude::*;
use notes::{NoteId, Position, ReactionEmoji};

use crate::app::FrameSender;
use crate::net::requests;
use crate::state::board::{BoardState, DragOverlay};
use crate::state::session::SessionState;
use crate::util::decoration::note_tilt_deg;
use crate::util::time::{format_clock, local_utc_offset_minutes};

fn pointer_position(ev: &leptos::ev::PointerEvent) -> Position {
    Position::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

#[allow(clippy::cast_precision_loss)]
fn now_ms_f64() -> f64 {
    notes::now_ms() as f64
}

/// Commit a drag position and remember which request carries it.
fn send_move(
    board: RwSignal<BoardState>,
    sender: RwSignal<FrameSender>,
    note_id: NoteId,
    at: Position,
) {
    let frame = requests::move_to(note_id, at);
    if sender.get_untracked().send(&frame) {
        board.update(|b| b.track_move(note_id, frame.id));
    }
}

#[component]
pub fn StickyNote(note_id: NoteId) -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let sender = expect_context::<RwSignal<FrameSender>>();
    let picker_open = RwSignal::new(false);
    let hovered = RwSignal::new(false);

    let note = Memo::new(move |_| board.with(|b| b.note(note_id).cloned()));
    let viewer = move || session.with(|s| s.viewer_name().unwrap_or_default().to_owned());
    let position = move || {
        board.with(|b| {
            b.note(note_id)
                .map_or_else(|| Position::new(0.0, 0.0), |n| b.display_position(n))
        })
    };
    let dragging = move || board.with(|b| b.drags.get(&note_id).is_some_and(DragOverlay::is_dragging));
    let tilt = note_tilt_deg(note_id);
    let utc_offset = local_utc_offset_minutes();

    let on_pointer_down = move |ev: leptos::ev::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let started = board.try_update(|b| b.begin_drag(note_id, pointer_position(&ev))).unwrap_or(false);
        if !started {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            if let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
                let _ = el.set_pointer_capture(ev.pointer_id());
            }
        }
    };

    let on_pointer_move = move |ev: leptos::ev::PointerEvent| {
        if !dragging() {
            return;
        }
        let commit = board
            .try_update(|b| b.drag_to(note_id, pointer_position(&ev), now_ms_f64()))
            .flatten();
        if let Some(at) = commit {
            send_move(board, sender, note_id, at);
        }
    };

    let on_pointer_up = move |_ev: leptos::ev::PointerEvent| {
        if let Some(at) = board.try_update(|b| b.end_drag(note_id)).flatten() {
            send_move(board, sender, note_id, at);
        }
    };

    let on_delete = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        sender.get_untracked().send(&requests::delete(note_id));
    };

    let on_react = move |emoji: ReactionEmoji| {
        let author = viewer();
        if !author.is_empty() {
            sender.get_untracked().send(&requests::react(note_id, emoji, &author));
        }
        picker_open.set(false);
    };

    let container_class = move || {
        if dragging() {
            "sticky-note sticky-note--dragging"
        } else if hovered.get() {
            "sticky-note sticky-note--hovered"
        } else {
            "sticky-note"
        }
    };

    let container_style = move || {
        let at = position();
        let color = note.with(|n| n.as_ref().map_or("#FFE4E1", |n| n.color.hex()));
        format!("left: {}px; top: {}px; transform: rotate({tilt:.2}deg); --note-color: {color};", at.x, at.y)
    };

    view! {
        <Show when=move || note.with(Option::is_some)>
            <div
                class=container_class
                style=container_style
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointercancel=on_pointer_up
                on:mouseenter=move |_| hovered.set(true)
                on:mouseleave=move |_| hovered.set(false)
            >
                <div class="sticky-note__header">
                    <span class="sticky-note__author">
                        {move || note.with(|n| n.as_ref().map(|n| n.author.clone()).unwrap_or_default())}
                    </span>
                    <Show when=move || note.with(|n| n.as_ref().is_some_and(|n| n.is_owned_by(&viewer())))>
                        <button
                            class="sticky-note__delete"
                            title="Delete note"
                            on:pointerdown=|ev| ev.stop_propagation()
                            on:click=on_delete
                        >
                            "\u{00D7}"
                        </button>
                    </Show>
                </div>

                <div class="sticky-note__content">
                    {move || note.with(|n| n.as_ref().map(|n| n.content.clone()).unwrap_or_default())}
                </div>

                <div class="sticky-note__reactions">
                    {move || {
                        let tallies = note.with(|n| n.as_ref().map(|n| n.reaction_tallies(&viewer())).unwrap_or_default());
                        tallies
                            .into_iter()
                            .map(|tally| {
                                let class = if tally.reacted_by_viewer {
                                    "reaction-chip reaction-chip--mine"
                                } else {
                                    "reaction-chip"
                                };
                                view! { <span class=class>{tally.emoji.glyph()} " " {tally.count}</span> }
                            })
                            .collect_view()
                    }}
                </div>

                <div class="sticky-note__footer">
                    <button
                        class="sticky-note__react"
                        title="React"
                        on:pointerdown=|ev| ev.stop_propagation()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            picker_open.update(|open| *open = !*open);
                        }
                    >
                        "\u{2661}"
                    </button>
                    <span class="sticky-note__time">
                        {move || note.with(|n| n.as_ref().map(|n| format_clock(n.timestamp, utc_offset)).unwrap_or_default())}
                    </span>
                </div>

                <Show when=move || picker_open.get()>
                    <div class="reaction-picker" on:pointerdown=|ev| ev.stop_propagation()>
                        {ReactionEmoji::ALL
                            .into_iter()
                            .map(|emoji| {
                                view! {
                                    <button
                                        class="reaction-picker__option"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            on_react(emoji);
                                        }
                                    >
                                        {emoji.glyph()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </Show>
            </div>
        </Show>
    }
}
