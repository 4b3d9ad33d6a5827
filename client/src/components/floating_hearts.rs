//! Ambient hearts drifting behind the board.

use leptos::prelude::*;

use crate::util::decoration::{HEART_COUNT, HEART_SEED, floating_hearts};

#[component]
pub fn FloatingHearts() -> impl IntoView {
    let hearts = floating_hearts(HEART_SEED, HEART_COUNT);

    view! {
        <div class="floating-hearts" aria-hidden="true">
            {hearts
                .into_iter()
                .map(|heart| {
                    let style = format!(
                        "left: {:.2}%; animation-delay: {:.2}s; animation-duration: {:.2}s;",
                        heart.left_pct, heart.delay_s, heart.duration_s,
                    );
                    view! { <div class="floating-hearts__heart" style=style>"\u{2665}"</div> }
                })
                .collect_view()}
        </div>
    }
}
