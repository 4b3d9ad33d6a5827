use super::*;

#[test]
fn composer_starts_collapsed_with_blush() {
    let state = ComposerState::default();
    assert!(!state.expanded);
    assert_eq!(state.color, NoteColor::Blush);
    assert!(!state.can_submit());
}

#[test]
fn whitespace_only_content_cannot_submit() {
    let mut state = ComposerState { content: " \n\t ".into(), ..ComposerState::default() };
    assert!(!state.can_submit());
    assert_eq!(state.take_submission(), None);
    assert_eq!(state.content, " \n\t ");
}

#[test]
fn submit_clears_text_collapses_and_keeps_color() {
    let mut state = ComposerState::default();
    state.expand();
    state.color = NoteColor::Lavender;
    state.content = " thinking of you ".into();

    assert_eq!(state.take_submission(), Some((" thinking of you ".to_owned(), NoteColor::Lavender)));
    assert!(state.content.is_empty());
    assert!(!state.expanded);
    assert_eq!(state.color, NoteColor::Lavender);
}

#[test]
fn cancel_keeps_draft_and_color() {
    let mut state = ComposerState::default();
    state.expand();
    state.color = NoteColor::Mint;
    state.content = "draft".into();
    state.cancel();
    assert!(!state.expanded);
    assert_eq!(state.color, NoteColor::Mint);
    assert_eq!(state.content, "draft");
}
