/// End-to-end tests driving the library API the way the editor does:
/// open a session over real storage, mutate, reopen, and verify what
/// survived on disk.
mod common;

use common::{MessageBuilder, StudioDirBuilder};
use transcript_studio::transcript::DropAnchor;
use transcript_studio::{Role, Session, Storage};

#[test]
fn test_session_round_trip_through_storage() {
    let dir = StudioDirBuilder::new().build();

    let cid = {
        let storage = Storage::open(dir.path()).unwrap();
        let mut session = Session::open(storage).unwrap();
        let cid = session.submit_user_turn("What is Rust?").unwrap().unwrap();
        session.save_assistant_reply(&cid, "A systems language.").unwrap();
        session.set_title("Rust Q&A").unwrap();
        cid
    };

    let storage = Storage::open(dir.path()).unwrap();
    let session = Session::open(storage).unwrap();
    assert_eq!(session.title(), "Rust Q&A");
    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].conversation_id.as_deref(), Some(cid.as_str()));
    assert_eq!(messages[1].conversation_id.as_deref(), Some(cid.as_str()));
}

#[test]
fn test_history_does_not_survive_reopen() {
    let dir = StudioDirBuilder::new().build();

    {
        let storage = Storage::open(dir.path()).unwrap();
        let mut session = Session::open(storage).unwrap();
        session.submit_user_turn("hello").unwrap();
        assert!(session.can_undo());
    }

    // The undo log is in-memory only; a fresh session starts at a floor.
    let storage = Storage::open(dir.path()).unwrap();
    let session = Session::open(storage).unwrap();
    assert!(!session.can_undo());
    assert_eq!(session.transcript().len(), 1);
}

#[test]
fn test_undo_restores_persisted_records() {
    let dir = StudioDirBuilder::new().build();

    {
        let storage = Storage::open(dir.path()).unwrap();
        let mut session = Session::open(storage).unwrap();
        session.submit_user_turn("first").unwrap();
        session.submit_user_turn("second").unwrap();
        assert!(session.undo().unwrap());
    }

    // The undone state is what persists.
    let storage = Storage::open(dir.path()).unwrap();
    let session = Session::open(storage).unwrap();
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript().messages()[0].content, "first");
}

#[test]
fn test_reorder_conversation_end_to_end() {
    let dir = StudioDirBuilder::new()
        .with_messages(&[
            MessageBuilder::user("U1", "c1"),
            MessageBuilder::assistant("A1", "c1"),
            MessageBuilder::user("U2", "c2"),
            MessageBuilder::assistant("A2", "c2"),
        ])
        .build();

    let storage = Storage::open(dir.path()).unwrap();
    let mut session = Session::open(storage).unwrap();

    // Drop c2 above c1: the target sits above the single anchor's midline.
    let anchors = vec![DropAnchor::new("c1", 10.0, 4.0)];
    session.reorder_conversation("c2", 10.5, &anchors).unwrap();

    let contents: Vec<&str> =
        session.transcript().messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["U2", "A2", "U1", "A1"]);

    // And the move is undoable.
    assert!(session.undo().unwrap());
    assert_eq!(session.transcript().messages()[0].content, "U1");
}

#[test]
fn test_export_import_round_trip() {
    let dir = StudioDirBuilder::new().build();
    let storage = Storage::open(dir.path()).unwrap();
    let mut session = Session::open(storage).unwrap();

    session.add_instruction("Answer briefly.").unwrap();
    let cid = session.submit_user_turn("hello").unwrap().unwrap();
    session.save_assistant_reply(&cid, "hi").unwrap();
    session.set_title("Round Trip").unwrap();

    let json = session.export_document().to_json_pretty().unwrap();

    let other_dir = StudioDirBuilder::new().build();
    let storage = Storage::open(other_dir.path()).unwrap();
    let mut imported = Session::open(storage).unwrap();
    imported.import_json(&json).unwrap();

    assert_eq!(imported.title(), "Round Trip");
    assert_eq!(imported.transcript().len(), 2);
    assert_eq!(imported.instructions().len(), 1);
    assert_eq!(imported.instructions()[0].content, "Answer briefly.");
}

#[test]
fn test_delete_from_cascades_and_persists() {
    let dir = StudioDirBuilder::new()
        .with_messages(&[
            MessageBuilder::user("U1", "c1"),
            MessageBuilder::assistant("A1", "c1"),
            MessageBuilder::user("U2", "c2"),
            MessageBuilder::assistant("A2", "c2"),
        ])
        .build();

    {
        let storage = Storage::open(dir.path()).unwrap();
        let mut session = Session::open(storage).unwrap();
        session.delete_from(1).unwrap();
    }

    let storage = Storage::open(dir.path()).unwrap();
    let session = Session::open(storage).unwrap();
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript().messages()[0].content, "U1");
    assert_eq!(session.transcript().messages()[0].role, Role::User);
}

#[test]
fn test_instructions_persist_independently_of_transcript() {
    let dir = StudioDirBuilder::new().build();

    {
        let storage = Storage::open(dir.path()).unwrap();
        let mut session = Session::open(storage).unwrap();
        session.add_instruction("Stay on topic.").unwrap();
        session.submit_user_turn("hello").unwrap();
        session.reset().unwrap();
    }

    let storage = Storage::open(dir.path()).unwrap();
    let session = Session::open(storage).unwrap();
    assert!(session.transcript().is_empty());
    assert!(session.instructions().is_empty());
    assert_eq!(session.title(), "Untitled Chat");
}
