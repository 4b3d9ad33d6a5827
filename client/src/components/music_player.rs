//! Bottom-docked music player bound to a single `<audio>` element.

use leptos::html::Audio;
use leptos::prelude::*;

use crate::state::player::{PROGRESS_POLL_MS, PlayerState, VOLUME_STEP};

#[component]
pub fn MusicPlayer() -> impl IntoView {
    let player = RwSignal::new(PlayerState::default());
    let audio_ref = NodeRef::<Audio>::new();

    #[cfg(feature = "hydrate")]
    {
        // Keep the element's volume in step with the slider.
        Effect::new(move || {
            let volume = player.with(|p| p.volume);
            if let Some(audio) = audio_ref.get() {
                audio.set_volume(volume);
            }
        });

        let poll = set_interval_with_handle(
            move || {
                if let Some(audio) = audio_ref.get_untracked() {
                    let elapsed = audio.current_time();
                    if player.with_untracked(|p| (p.elapsed_s - elapsed).abs() > f64::EPSILON) {
                        player.update(|p| p.set_elapsed(elapsed));
                    }
                }
            },
            std::time::Duration::from_millis(u64::from(PROGRESS_POLL_MS)),
        );
        match poll {
            Ok(handle) => on_cleanup(move || handle.clear()),
            Err(e) => leptos::logging::warn!("player progress poll unavailable: {e:?}"),
        }
    }

    let toggle_play = move |_| {
        player.update(PlayerState::toggle_play);
        #[cfg(feature = "hydrate")]
        {
            let Some(audio) = audio_ref.get_untracked() else {
                return;
            };
            if player.with_untracked(|p| p.is_playing) {
                if let Err(e) = audio.play() {
                    leptos::logging::warn!("audio play failed: {e:?}");
                    player.update(|p| p.is_playing = false);
                }
            } else if let Err(e) = audio.pause() {
                leptos::logging::warn!("audio pause failed: {e:?}");
            }
        }
    };

    let change_track = move |forward: bool| {
        player.update(|p| if forward { p.next() } else { p.previous() });
        #[cfg(feature = "hydrate")]
        if let Some(audio) = audio_ref.get_untracked() {
            audio.set_current_time(0.0);
        }
    };

    let track_title = move || player.with(|p| p.track().title);
    let track_artist = move || player.with(|p| p.track().artist);
    let progress_style = move || format!("width: {:.2}%;", player.with(PlayerState::progress) * 100.0);

    view! {
        <div class="music-player">
            <audio node_ref=audio_ref src=move || player.with(|p| p.track().src) preload="metadata"></audio>

            <div class="music-player__art">"\u{2665}"</div>

            <div class="music-player__info">
                <h3 class="music-player__title">{track_title}</h3>
                <p class="music-player__artist">{track_artist}</p>
                <div class="music-player__progress">
                    <span>{move || player.with(PlayerState::elapsed_label)}</span>
                    <div class="music-player__bar">
                        <div class="music-player__bar-fill" style=progress_style></div>
                    </div>
                    <span>{move || player.with(PlayerState::duration_label)}</span>
                </div>
            </div>

            <div class="music-player__controls">
                <button class="music-player__button" title="Previous" on:click=move |_| change_track(false)>
                    "\u{23EE}"
                </button>
                <button class="music-player__button music-player__button--play" title="Play or pause" on:click=toggle_play>
                    {move || if player.with(|p| p.is_playing) { "\u{23F8}" } else { "\u{25B6}" }}
                </button>
                <button class="music-player__button" title="Next" on:click=move |_| change_track(true)>
                    "\u{23ED}"
                </button>
            </div>

            <div class="music-player__extras">
                <button
                    class=move || {
                        if player.with(|p| p.liked) { "music-player__like music-player__like--on" } else { "music-player__like" }
                    }
                    title="Like"
                    on:click=move |_| player.update(PlayerState::toggle_like)
                >
                    "\u{2764}"
                </button>
                <input
                    class="music-player__volume"
                    type="range"
                    min="0"
                    max="1"
                    step=VOLUME_STEP.to_string()
                    prop:value=move || player.with(|p| p.volume.to_string())
                    on:input=move |ev| {
                        if let Ok(volume) = event_target_value(&ev).parse::<f64>() {
                            player.update(|p| p.set_volume(volume));
                        }
                    }
                />
            </div>
        </div>
    }
}
