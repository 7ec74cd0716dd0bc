use mini_core::{ErrorKind, MiniError, MiniFile, ParseMode, Value};
use std::path::PathBuf;

/// Helper: a unique path in the system temp dir for this test.
fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("mini-core-{}-{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn parse_missing_file_is_io_error() {
    let mut file = MiniFile::new();
    let err = file
        .parse(temp_path("does-not-exist.mini"), ParseMode::Reset)
        .unwrap_err();
    assert!(matches!(err, MiniError::Io { .. }));
    assert_eq!(err.kind(), ErrorKind::FileIo);
}

#[test]
fn failed_read_leaves_tree_untouched() {
    let mut file = MiniFile::new();
    file.parse_str("[s]\nk = 1", ParseMode::Reset).unwrap();
    let _ = file.parse(temp_path("missing-again.mini"), ParseMode::Reset);
    assert_eq!(*file.root().get::<i64>("s.k").unwrap(), 1);
}

#[test]
fn write_then_parse_file() {
    let path = temp_path("roundtrip.mini");
    let mut file = MiniFile::new();
    file.parse_str(
        "# game\n[game]\nyear = 2025\nmask = 0ffh\n[game.window]\nsize = [640, 480]",
        ParseMode::Reset,
    )
    .unwrap();
    file.write(&path).unwrap();

    let mut back = MiniFile::new();
    back.parse(&path, ParseMode::Reset).unwrap();
    assert_eq!(back, file);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "# game\n[game]\nyear = 2025\nmask = ffh\n\n[game.window]\nsize = [640, 480]\n\n"
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn additional_parse_merges_files() {
    let base = temp_path("base.mini");
    let extra = temp_path("extra.mini");
    std::fs::write(&base, "[base]\nk = 1\n").unwrap();
    std::fs::write(&extra, "[extra]\nk = 2\n").unwrap();

    let mut file = MiniFile::new();
    file.parse(&base, ParseMode::Reset).unwrap();
    file.parse(&extra, ParseMode::Additional).unwrap();
    assert_eq!(file.root().get_or::<i64>("base.k", 0), 1);
    assert_eq!(file.root().get_or::<i64>("extra.k", 0), 2);

    file.parse(&extra, ParseMode::Reset).unwrap();
    assert_eq!(file.root().get_or::<i64>("base.k", 0), 0);

    let _ = std::fs::remove_file(&base);
    let _ = std::fs::remove_file(&extra);
}

#[test]
fn write_to_unwritable_path_is_io_error() {
    let mut file = MiniFile::new();
    file.parse_str("[s]\nk = 1", ParseMode::Reset).unwrap();
    let dir = std::env::temp_dir().join(format!("mini-core-{}-no-such-dir", std::process::id()));
    let err = file.write(dir.join("out.mini")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileIo);
    assert!(err.to_string().contains("out.mini"));
}

#[test]
fn serialization_error_does_not_create_file() {
    let path = temp_path("never-written.mini");
    let mut file = MiniFile::new();
    file.parse_str("[s]\nk = 1", ParseMode::Reset).unwrap();
    file.root_mut()
        .section_mut("s")
        .unwrap()
        .set_value("bad", f64::INFINITY, false)
        .unwrap();
    let err = file.write(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FloatValueInvalid);
    assert!(!path.exists());
}

#[test]
fn clear_and_to_text() {
    let mut file = MiniFile::new();
    file.parse_str("[s]\nv = [true, false]", ParseMode::Reset).unwrap();
    assert_eq!(file.to_text().unwrap(), "[s]\nv = [true, false]\n\n");
    assert_eq!(
        file.root().get::<Vec<Value>>("s.v").unwrap(),
        &vec![Value::Bool(true), Value::Bool(false)]
    );
    file.clear();
    assert_eq!(file.to_text().unwrap(), "");
}
