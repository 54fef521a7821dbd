use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use std::path::PathBuf;

use crate::watch::is_relevant_event;

fn event(kind: EventKind, path: &str) -> notify::Result<Event> {
    Ok(Event::new(kind).add_path(PathBuf::from(path)))
}

#[test]
fn source_changes_trigger_a_run() {
    assert!(is_relevant_event(&event(EventKind::Modify(ModifyKind::Any), "/p/src/a.ts")));
    assert!(is_relevant_event(&event(EventKind::Create(CreateKind::File), "/p/b.tsx")));
    assert!(is_relevant_event(&event(EventKind::Remove(RemoveKind::File), "/p/c.mts")));
}

#[test]
fn config_changes_trigger_a_run() {
    assert!(is_relevant_event(&event(EventKind::Modify(ModifyKind::Any), "/p/tsconfig.json")));
    assert!(is_relevant_event(&event(
        EventKind::Modify(ModifyKind::Any),
        "/p/tsconfig.base.json"
    )));
}

#[test]
fn unrelated_events_are_ignored() {
    assert!(!is_relevant_event(&event(EventKind::Modify(ModifyKind::Any), "/p/readme.md")));
    assert!(!is_relevant_event(&event(EventKind::Access(AccessKind::Any), "/p/a.ts")));
    assert!(!is_relevant_event(&event(
        EventKind::Modify(ModifyKind::Any),
        "/p/node_modules/x/index.ts"
    )));
    assert!(!is_relevant_event(&Err(notify::Error::generic("watch failed"))));
}
