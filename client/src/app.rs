//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use notes::Frame;

use crate::pages::{board::BoardPage, select_user::SelectUserPage};
use crate::state::board::BoardState;
use crate::state::session::{self, SessionState};

/// Outbound half of the websocket, shared through context.
///
/// Empty during SSR and before the frame client starts; sends then report
/// `false` and are dropped.
#[derive(Clone, Default)]
pub struct FrameSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl FrameSender {
    /// Queue `frame` for the server. Returns whether it was accepted.
    pub fn send(&self, frame: &Frame) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.tx
                .as_ref()
                .is_some_and(|tx| crate::net::frame_client::send_frame(tx, frame))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = frame;
            false
        }
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts, starts the frame client in the
/// browser, and shows the selector until a local identity exists.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let board = RwSignal::new(BoardState::default());
    let sender = RwSignal::new(FrameSender::default());

    provide_context(session);
    provide_context(board);
    provide_context(sender);

    // Storage is only readable after hydration; restoring during render
    // would diverge from the server's markup.
    Effect::new(move || {
        session.set(session::load());
    });

    #[cfg(feature = "hydrate")]
    {
        let tx = crate::net::frame_client::spawn_frame_client(board);
        sender.set(FrameSender { tx: Some(tx) });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/love-notes.css"/>
        <Title text="Our Love Notes"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let has_user = move || session.with(|s| s.user.is_some());

    view! {
        <Show when=has_user fallback=|| view! { <SelectUserPage/> }>
            <BoardPage/>
        </Show>
    }
}
