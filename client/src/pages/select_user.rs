//! Profile picker shown until this browser has a local identity.

use leptos::prelude::*;
use notes::PROFILES;

use crate::state::session::{self, SessionState};

#[component]
pub fn SelectUserPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let select = move |index: usize| {
        session.update(|s| {
            if let Some(user) = s.select(index, notes::now_ms()) {
                session::persist(user);
            }
        });
    };

    view! {
        <div class="select-user">
            <div class="select-user__card">
                <div class="select-user__icon">"\u{2665}"</div>
                <h1>"Welcome to Our Love Notes"</h1>
                <p class="select-user__subtitle">"Choose who you are to start sharing sweet messages"</p>
                <div class="select-user__options">
                    {PROFILES
                        .iter()
                        .enumerate()
                        .map(|(index, profile)| {
                            view! {
                                <button
                                    class=format!("select-user__option {}", profile.gradient)
                                    on:click=move |_| select(index)
                                >
                                    <span class="select-user__avatar">{profile.avatar}</span>
                                    <span class="select-user__name">{profile.name}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}
