use std::path::PathBuf;

use texedit::app::{Message, Model, update};
use texedit::error::EditorError;

#[test]
fn test_open_edit_save_preserves_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, "héllo\n\twörld\n").unwrap();

    let mut model = Model::new((80, 24));
    model.open_file(&path).unwrap();
    assert_eq!(model.buffer.text(), "héllo\n\twörld\n");
    assert_eq!(model.title, format!("TexEdit - {}", path.display()));
    assert!(!model.buffer.is_dirty());

    let mut model = update(model, Message::MoveToEnd(false));
    assert!(!model.buffer.is_dirty());
    model = update(model, Message::InsertChar('!'));
    assert!(model.buffer.is_dirty());

    let out = dir.path().join("out.txt");
    model.save_file(&out).unwrap();
    assert!(!model.buffer.is_dirty());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "héllo\n\twörld\n!");
    assert_eq!(model.file_path.as_deref(), Some(out.as_path()));
}

#[test]
fn test_open_missing_file_reports_path() {
    let mut model = Model::new((80, 24));
    let path = PathBuf::from("/definitely/not/here.txt");
    let err = model.open_file(&path).unwrap_err();
    assert!(matches!(err, EditorError::Read { .. }));
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("not/here.txt"));
    assert_eq!(model.title, "TexEdit");
    assert!(model.file_path.is_none());
}

#[test]
fn test_save_into_missing_directory_fails_without_marking_clean() {
    let dir = tempfile::tempdir().unwrap();
    let model = Model::new((80, 24));
    let mut model = update(model, Message::InsertChar('x'));
    let err = model
        .save_file(&dir.path().join("missing").join("x.txt"))
        .unwrap_err();
    assert!(matches!(err, EditorError::Write { .. }));
    assert!(model.buffer.is_dirty());
    assert!(model.file_path.is_none());
}
