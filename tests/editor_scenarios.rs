// Integration tests for command application, replay and persistence

use strucedit::document::Record;
use strucedit::editor::{Editor, EditorError, Outcome};
use strucedit::storage::LogFile;

fn plain(editor: &Editor) -> String {
    editor.render().to_plain_text(4)
}

fn apply_all(editor: &mut Editor, commands: &[&str]) {
    for command in commands {
        editor
            .apply(command, true)
            .unwrap_or_else(|e| panic!("'{}' failed: {}", command, e));
    }
}

#[test]
fn test_build_then_delete_everything() {
    let mut editor = Editor::new();

    editor.apply("class Foo", true).expect("class header");
    assert_eq!(editor.document().line_count(), 2);
    assert_eq!(editor.cursor(), 1);

    editor.apply("int x", true).expect("field");
    assert_eq!(editor.document().line_count(), 3);
    assert_eq!(editor.cursor(), 2);

    editor.apply("#goto 0", true).expect("goto top");
    let outcome = editor.apply("#delete_line", true).expect("delete at top");
    assert_eq!(outcome, Outcome::Deleted(Default::default()));
    assert_eq!(editor.document().line_count(), 3);

    editor.apply("#goto 2", true).expect("goto after field");
    editor.apply("#delete_line", true).expect("delete field");
    assert_eq!(editor.document().line_count(), 2);
    assert_eq!(editor.cursor(), 1);

    editor.apply("#goto 1", true).expect("goto inside class");
    editor.apply("#delete_line", true).expect("delete class");
    assert_eq!(editor.document().line_count(), 0);
    assert_eq!(editor.cursor(), 0);

    assert_eq!(
        editor.log().entries(),
        [
            "class Foo",
            "int x",
            "#goto 0",
            "#delete_line",
            "#goto 2",
            "#delete_line",
            "#goto 1",
            "#delete_line",
        ]
    );
}

#[test]
fn test_nested_document_renders() {
    let mut editor = Editor::new();
    apply_all(
        &mut editor,
        &[
            "class Shape",
            "int sides",
            "void grow(int by, int times)",
            "int total = sides * (by + times)",
            "sides = total / 2",
            "#goto 7",
            "",
            "struct Point",
            "int x",
            "int y",
        ],
    );

    assert_eq!(
        plain(&editor),
        "class Shape {\n    int sides\n    void grow(int by, int times) {\n        int total = sides * (by + times)\n        sides = total / 2\n    }\n}\n\nstruct Point {\n    int x\n    int y\n}\n"
    );
    editor.document().check_balance().expect("balanced");
    assert_eq!(editor.breadcrumbs(), ["struct Point"]);
}

#[test]
fn test_context_decides_grammar() {
    let mut editor = Editor::new();
    apply_all(&mut editor, &["struct Point"]);

    // Struct bodies only take fields
    let err = editor.apply("void run()", true).unwrap_err();
    assert!(matches!(err, EditorError::Syntax(_)));

    // The root only takes class and struct headers
    editor.apply("#goto 2", true).expect("goto end");
    assert!(editor.apply("int x", true).is_err());
    editor.apply("class Other", true).expect("second class");
    assert_eq!(editor.document().line_count(), 4);
}

#[test]
fn test_failed_command_leaves_state_alone() {
    let mut editor = Editor::new();
    apply_all(&mut editor, &["class Foo", "int x"]);
    let document = editor.document().clone();
    let log = editor.log().clone();

    for bad in ["1 + 2", "int x = 'open", "#frobnicate", "#goto", "#goto x"] {
        assert!(editor.apply(bad, true).is_err(), "'{}' should fail", bad);
        assert_eq!(editor.document(), &document);
        assert_eq!(editor.cursor(), 2);
        assert_eq!(editor.log(), &log);
    }
}

#[test]
fn test_lexical_error_message() {
    let mut editor = Editor::new();
    let err = editor.apply("x = \"never closed", true).unwrap_err();
    assert!(matches!(err, EditorError::Lex(_)));
    assert!(err.to_string().contains("Unterminated"));
}

#[test]
fn test_cursor_roaming_coalesces() {
    let mut editor = Editor::new();
    apply_all(&mut editor, &["class Foo", "int a", "int b"]);
    editor.move_up().expect("up");
    editor.move_up().expect("up");
    editor.move_down().expect("down");
    assert_eq!(editor.cursor(), 2);
    assert_eq!(editor.log().entries(), ["class Foo", "int a", "int b", "#goto 2"]);
}

#[test]
fn test_undo_rebuilds_by_replay() {
    let mut editor = Editor::new();
    apply_all(&mut editor, &["class Foo", "int a", "#goto 0", "struct Bar"]);
    let before_struct = {
        let mut e = Editor::new();
        apply_all(&mut e, &["class Foo", "int a", "#goto 0"]);
        e
    };

    editor.undo().expect("undo struct");
    assert_eq!(editor.document(), before_struct.document());
    assert_eq!(editor.cursor(), before_struct.cursor());

    editor.undo().expect("undo goto");
    editor.undo().expect("undo field");
    editor.undo().expect("undo class");
    assert!(editor.document().is_empty());
    assert_eq!(editor.undo().unwrap_err(), EditorError::NothingToUndo);

    for _ in 0..4 {
        editor.redo().expect("redo");
    }
    assert_eq!(editor.document().line_count(), 5);
    assert!(matches!(editor.document().record(0), Some(Record::Content { .. })));
}

#[test]
fn test_save_text_replays_to_same_state() {
    let mut editor = Editor::new();
    apply_all(
        &mut editor,
        &["class Foo", "void run()", "int y = 'a'", "#goto 1", "", "int z"],
    );
    let text = editor.save_text();

    let mut restored = Editor::new();
    restored.load_text(&text);
    assert_eq!(restored.document(), editor.document());
    assert_eq!(restored.cursor(), editor.cursor());
    assert_eq!(restored.save_text(), text);
}

#[test]
fn test_replay_keeps_failing_commands_in_log() {
    let mut editor = Editor::new();
    editor.load_text("class Foo\nnot valid here +\nint x\n#bogus");
    assert_eq!(plain(&editor), "class Foo {\n    int x\n}\n");
    assert_eq!(editor.log().len(), 4);
}

#[test]
fn test_empty_text_loads_nothing() {
    let mut editor = Editor::new();
    apply_all(&mut editor, &["class Foo"]);
    editor.load_text("");
    assert!(editor.document().is_empty());
    assert!(editor.log().is_empty());
}

#[test]
fn test_single_empty_line_survives_reload() {
    let mut editor = Editor::new();
    apply_all(&mut editor, &[""]);
    assert_eq!(editor.document().line_count(), 1);

    let mut restored = Editor::new();
    restored.load_text(&editor.save_text());
    assert_eq!(restored.document(), editor.document());
    assert_eq!(restored.log().entries(), [""]);
    assert_eq!(restored.cursor(), 1);
}

#[test]
fn test_quote_with_line_break_is_rejected() {
    let mut editor = Editor::new();
    apply_all(&mut editor, &["class Foo", "void run()"]);
    let document = editor.document().clone();
    let saved = editor.save_text();

    let err = editor.apply("int x = \"a\nb\"", true).unwrap_err();
    assert!(matches!(err, EditorError::Lex(_)));
    assert_eq!(editor.document(), &document);
    assert_eq!(editor.save_text(), saved);

    let mut restored = Editor::new();
    restored.load_text(&saved);
    assert_eq!(restored.document(), &document);
}

#[test]
fn test_log_file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = LogFile::new(dir.path().join("save.txt"));

    let mut editor = Editor::new();
    apply_all(&mut editor, &["struct Point", "int x", "int y"]);
    file.save(&editor.save_text()).expect("save");

    let mut reopened = Editor::new();
    reopened.load_text(&file.load().expect("load"));
    assert_eq!(plain(&reopened), "struct Point {\n    int x\n    int y\n}\n");
}
