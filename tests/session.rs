use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use taskbot::{
    app::{console, Session},
    command::Outcome,
    error::InputError,
    notify::{MemoryNotifier, FILE_ERROR, UNKNOWN_TASK},
    persistence::{FileStore, MemoryStore, Store},
};

fn new_year() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap()
}

fn run_all<S: Store>(session: &mut Session<S>, ui: &mut MemoryNotifier, lines: &[&str]) {
    for line in lines {
        assert_eq!(session.handle_line(line, ui), Outcome::Continue, "{line}");
    }
}

#[test]
fn tasks_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.jsonl");
    let mut ui = MemoryNotifier::default();

    let mut session = Session::open(FileStore::new(&path), &mut ui).unwrap();
    run_all(
        &mut session,
        &mut ui,
        &[
            "todo read book",
            "deadline return book /by 2/12/2019 1800",
            "event project meeting /at Mon 2-4pm",
            "done 1",
        ],
    );
    drop(session);

    let mut ui = MemoryNotifier::default();
    let mut session = Session::open(FileStore::new(&path), &mut ui).unwrap();
    session.handle_line("list", &mut ui);
    assert_eq!(
        ui.last(),
        Some(
            "Here are the tasks in your list:\n\
             1.[T][✓] read book\n\
             2.[D][✗] return book (by: 2nd of December 2019, 6:00PM)\n\
             3.[E][✗] project meeting (at: Mon 2-4pm)"
        )
    );
}

#[test]
fn corrupt_records_are_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.jsonl");
    fs::write(
        &path,
        concat!(
            r#"{"type":"todo","done":false,"name":"keep me"}"#,
            "\n",
            r#"{"type":"chore","done":false,"name":"what"}"#,
            "\n",
        ),
    )
    .unwrap();

    let mut ui = MemoryNotifier::default();
    let session = Session::open(FileStore::new(&path), &mut ui).unwrap();
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(ui.unknown_tasks.len(), 1);
    assert_eq!(ui.unknown_tasks[0].line, 2);
    assert_eq!(ui.last(), Some(UNKNOWN_TASK));
}

#[test]
fn unreadable_store_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    // a directory where the file should be
    let mut ui = MemoryNotifier::default();
    assert!(Session::open(FileStore::new(dir.path()), &mut ui).is_err());
    assert_eq!(ui.file_errors, 1);
    assert_eq!(ui.last(), Some(FILE_ERROR));
}

#[test]
fn failed_saves_keep_the_session_going() {
    let mut ui = MemoryNotifier::default();
    let mut session = Session::open(MemoryStore::default(), &mut ui).unwrap();
    session.store().set_fail_saves(true);
    run_all(&mut session, &mut ui, &["todo a", "todo b"]);
    assert_eq!(ui.file_errors, 2);
    assert_eq!(session.tasks().len(), 2);
    assert!(session.store().saved().is_empty());

    session.store().set_fail_saves(false);
    session.handle_line("done 1", &mut ui);
    assert_eq!(session.store().saved().len(), 2);
}

#[test]
fn user_mistakes_never_touch_state() {
    let mut ui = MemoryNotifier::default();
    let mut session = Session::open(MemoryStore::default(), &mut ui).unwrap();
    run_all(
        &mut session,
        &mut ui,
        &[
            "todo",
            "deadline homework",
            "deadline homework /by friday",
            "event party",
            "done",
            "done x",
            "delete 3",
            "find",
            "what",
        ],
    );
    assert_eq!(
        ui.errors,
        vec![
            InputError::EmptyDescription,
            InputError::MissingDeadlineParam,
            InputError::InvalidDate,
            InputError::MissingEventParam,
            InputError::MissingIndex,
            InputError::InvalidIndex,
            InputError::IndexOutOfBounds,
            InputError::EmptySearchTerm,
            InputError::UnknownCommand,
        ]
    );
    assert!(session.tasks().is_empty());
    assert_eq!(session.store().save_count(), 0);
}

#[test]
fn reminders_follow_completion() {
    let store = MemoryStore::default();
    let mut ui = MemoryNotifier::default();
    let mut session = Session::open(store, &mut ui).unwrap().with_clock(new_year);
    run_all(
        &mut session,
        &mut ui,
        &[
            "deadline pay rent /by 2/1/2024 0900",
            "deadline file taxes /by 3/1/2024 1700",
            "deadline renew passport /by 9/1/2024 1200",
            "reminders",
        ],
    );
    let shown = ui.last().unwrap().to_string();
    assert!(shown.contains("1.[D][✗] pay rent"));
    assert!(shown.contains("2.[D][✗] file taxes"));
    assert!(!shown.contains("renew passport"));

    run_all(&mut session, &mut ui, &["done 1", "reminders"]);
    let shown = ui.last().unwrap();
    assert!(!shown.contains("pay rent"));
    assert!(shown.contains("1.[D][✗] file taxes"));
}

#[test]
fn console_session_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.jsonl");
    let mut session = Session::open(FileStore::new(&path), &mut MemoryNotifier::default()).unwrap();

    let input = "todo buy milk\nTODO walk dog\ndelete 1\nlist\nbye\ntodo ignored\n";
    let mut out = Vec::new();
    console::run(&mut session, input.as_bytes(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Hello! I'm Taskbot"));
    assert!(out.contains("Noted. I've removed this task:"));
    assert!(out.contains(" 1.[T][✗] walk dog"));
    assert!(out.contains("Bye. Hope to see you again soon!"));

    let saved = fs::read_to_string(&path).unwrap();
    assert_eq!(saved, "{\"type\":\"todo\",\"done\":false,\"name\":\"walk dog\"}\n");
}
