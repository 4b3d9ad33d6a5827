use super::*;
use notes::{NoteColor, ReactionEmoji};
use tokio::time::{Duration, timeout};

fn draft(content: &str, timestamp: i64) -> NewNote {
    NewNote {
        content: content.to_owned(),
        author: "You".to_owned(),
        color: NoteColor::Peach,
        position: Position::new(5.0, 150.0),
        timestamp,
    }
}

async fn assert_notice(feed: &mut ChangeFeed) {
    timeout(Duration::from_millis(200), feed.changed())
        .await
        .expect("change notice timed out")
        .expect("feed open");
}

async fn assert_no_notice(feed: &mut ChangeFeed) {
    assert!(
        timeout(Duration::from_millis(50), feed.changed()).await.is_err(),
        "expected no change notice"
    );
}

#[tokio::test]
async fn insert_generates_distinct_ids() {
    let store = MemoryStore::new(8);
    let a = store.insert(draft("a", 1)).await.unwrap();
    let b = store.insert(draft("b", 2)).await.unwrap();
    assert_ne!(a.id, b.id);
    assert!(a.reactions.is_empty());
}

#[tokio::test]
async fn query_since_filters_and_orders_newest_first() {
    let store = MemoryStore::new(8);
    store.insert(draft("yesterday", 50)).await.unwrap();
    store.insert(draft("morning", 100)).await.unwrap();
    store.insert(draft("evening", 300)).await.unwrap();
    store.insert(draft("noon", 200)).await.unwrap();

    let notes = store.query_since(100).await.unwrap();
    let contents: Vec<&str> = notes.iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, vec!["evening", "noon", "morning"]);
}

#[tokio::test]
async fn set_position_overwrites_exactly() {
    let store = MemoryStore::new(8);
    let note = store.insert(draft("move me", 10)).await.unwrap();
    store
        .set_position(note.id, Position::new(-250.5, 99_999.0))
        .await
        .unwrap();

    let notes = store.query_since(0).await.unwrap();
    assert_eq!(notes[0].position(), Position::new(-250.5, 99_999.0));
}

#[tokio::test]
async fn mutations_on_missing_note_are_not_found() {
    let store = MemoryStore::new(8);
    let id = Uuid::new_v4();
    assert!(matches!(
        store.set_position(id, Position::default()).await,
        Err(StoreError::NotFound(missing)) if missing == id
    ));
    assert!(matches!(store.delete(id).await, Err(StoreError::NotFound(_))));
    let reaction = Reaction { id: Uuid::new_v4(), emoji: ReactionEmoji::Heart, author: "You".into(), timestamp: 1 };
    assert!(matches!(store.union_reaction(id, reaction).await, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn union_reaction_is_append_if_absent() {
    let store = MemoryStore::new(8);
    let note = store.insert(draft("react", 10)).await.unwrap();
    let reaction = Reaction { id: Uuid::new_v4(), emoji: ReactionEmoji::Kiss, author: "You".into(), timestamp: 11 };

    store.union_reaction(note.id, reaction.clone()).await.unwrap();
    store.union_reaction(note.id, reaction).await.unwrap();

    let notes = store.query_since(0).await.unwrap();
    assert_eq!(notes[0].reaction_count(ReactionEmoji::Kiss), 1);
}

#[tokio::test]
async fn every_mutation_fires_a_notice() {
    let store = MemoryStore::new(8);
    let mut feed = store.changes();

    let note = store.insert(draft("n", 1)).await.unwrap();
    assert_notice(&mut feed).await;

    store.set_position(note.id, Position::new(1.0, 2.0)).await.unwrap();
    assert_notice(&mut feed).await;

    let reaction = Reaction { id: Uuid::new_v4(), emoji: ReactionEmoji::Sparkles, author: "You".into(), timestamp: 2 };
    store.union_reaction(note.id, reaction.clone()).await.unwrap();
    assert_notice(&mut feed).await;

    // Re-adding the identical object changes nothing, so nothing is announced.
    store.union_reaction(note.id, reaction).await.unwrap();
    assert_no_notice(&mut feed).await;

    store.delete(note.id).await.unwrap();
    assert_notice(&mut feed).await;
}

#[tokio::test]
async fn failed_mutation_fires_no_notice() {
    let store = MemoryStore::new(8);
    let mut feed = store.changes();
    let _ = store.delete(Uuid::new_v4()).await;
    assert_no_notice(&mut feed).await;
}
