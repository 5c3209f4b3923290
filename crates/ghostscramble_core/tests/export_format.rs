mod common;

use common::{FrozenClock, ScriptedPrompter};
use ghostscramble_core::{
    format_export, format_session_export, DirectoryExportSink, DraftBuffer,
    InMemorySnapshotStorage, SessionService, SessionStore, EXPORT_MIME_TYPE,
};

#[test]
fn export_lists_present_prompts_in_catalog_order_then_reflection() {
    let mut draft = DraftBuffer::new();
    draft.set_response("H", "steady").unwrap();
    draft.set_response("G", "hello world").unwrap();
    draft.set_reflection("it all fits");
    draft.set_title("My Day");

    let text = format_export(&draft, "2026-03-14");
    assert_eq!(
        text,
        "GHOST SCRAMBLE Session: My Day\n\
         Date: 2026-03-14\n\
         \n\
         G - Gedanke (Thought):\n\
         hello world\n\
         \n\
         H - Herz (Heart):\n\
         steady\n\
         \n\
         Reflection:\n\
         it all fits\n"
    );
    assert_eq!(text.matches(" - ").count(), 2);
}

#[test]
fn export_of_empty_draft_is_header_only() {
    let text = format_export(&DraftBuffer::new(), "2026-03-14");
    assert_eq!(text, "GHOST SCRAMBLE Session: Untitled\nDate: 2026-03-14\n\n");
}

#[test]
fn stored_session_export_uses_saved_date() {
    let storage = InMemorySnapshotStorage::new();
    let store = SessionStore::load(&storage).unwrap();
    let mut service =
        SessionService::with_clock(store, ScriptedPrompter::default(), FrozenClock::at(1));
    service.draft_mut().set_response("S2", "an open door").unwrap();
    service.draft_mut().set_title("Doors");
    let id = service.save().unwrap();

    let text = format_session_export(service.session(id).unwrap());
    assert!(text.starts_with("GHOST SCRAMBLE Session: Doors\nDate: 2026-03-14\n\n"));
    assert!(text.contains("S2 - Symbol (Logo/Symbol):\nan open door\n"));
    assert!(!text.contains("Reflection:"));
}

#[test]
fn export_to_directory_writes_named_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = InMemorySnapshotStorage::new();
    let store = SessionStore::load(&storage).unwrap();
    let mut service =
        SessionService::with_clock(store, ScriptedPrompter::default(), FrozenClock::at(1));
    service.draft_mut().set_response("A", "quiet").unwrap();
    service.draft_mut().set_title("Late Night");

    let document = service.export();
    assert_eq!(document.file_name, "ghost-scramble-Late-Night.txt");
    assert_eq!(document.mime_type, EXPORT_MIME_TYPE);

    let mut sink = DirectoryExportSink::new(dir.path().join("exports"));
    let path = service.export_to(&mut sink).unwrap().unwrap();
    assert_eq!(path, dir.path().join("exports").join(&document.file_name));
    assert_eq!(std::fs::read_to_string(path).unwrap(), document.text);
    assert_eq!(service.draft().title(), "Late Night");
}

#[test]
fn repeated_export_keeps_earlier_files() {
    let dir = tempfile::tempdir().unwrap();
    let storage = InMemorySnapshotStorage::new();
    let store = SessionStore::load(&storage).unwrap();
    let mut service =
        SessionService::with_clock(store, ScriptedPrompter::default(), FrozenClock::at(1));
    let mut sink = DirectoryExportSink::new(dir.path());

    service.draft_mut().set_title("Same");
    service.draft_mut().set_reflection("first pass");
    let first = service.export_to(&mut sink).unwrap().unwrap();
    let first_text = service.export().text;

    service.draft_mut().set_reflection("second pass");
    let second = service.export_to(&mut sink).unwrap().unwrap();
    let third = service.export_to(&mut sink).unwrap().unwrap();

    assert_eq!(first, dir.path().join("ghost-scramble-Same.txt"));
    assert_eq!(second, dir.path().join("ghost-scramble-Same-1.txt"));
    assert_eq!(third, dir.path().join("ghost-scramble-Same-2.txt"));
    assert_eq!(std::fs::read_to_string(&first).unwrap(), first_text);
    assert!(std::fs::read_to_string(&second)
        .unwrap()
        .contains("second pass"));
}
