use mini_core::{is_valid_name, parse, Entry, ErrorKind, Outcome, Section, Value};

/// Helper: a small tree `a.b.c` with `x = 1` in `c` and `name = "root"` in `a`.
fn sample_tree() -> Section {
    let mut c = Section::new();
    c.set_value("x", 1i64, false).unwrap();
    let mut b = Section::new();
    b.set_section("c", c, false).unwrap();
    let mut a = Section::new();
    a.set_value("name", "root", false).unwrap();
    a.set_section("b", b, false).unwrap();
    let mut root = Section::new();
    root.set_section("a", a, false).unwrap();
    root
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn valid_names() {
    assert!(is_valid_name("abc"));
    assert!(is_valid_name("ABC_123"));
    assert!(is_valid_name("_"));
    assert!(is_valid_name("0"));
}

#[test]
fn invalid_names() {
    assert!(!is_valid_name(""));
    assert!(!is_valid_name("a b"));
    assert!(!is_valid_name("a.b"));
    assert!(!is_valid_name("a-b"));
    assert!(!is_valid_name("caf\u{e9}"));
}

// ============================================================================
// Path addressing
// ============================================================================

#[test]
fn get_value_through_path() {
    let root = sample_tree();
    assert_eq!(*root.get::<i64>("a.b.c.x").unwrap(), 1);
    assert_eq!(root.get::<String>("a.name").unwrap(), "root");
}

#[test]
fn get_value_from_intermediate_section() {
    let root = sample_tree();
    let b = root.section("a.b").unwrap();
    assert_eq!(*b.get::<i64>("c.x").unwrap(), 1);
}

#[test]
fn missing_section_in_path() {
    let root = sample_tree();
    let err = root.get::<i64>("a.b.x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotPresent);
    let err = root.get::<i64>("a.z.c.x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SectionNotPresent);
}

#[test]
fn missing_key() {
    let root = sample_tree();
    assert_eq!(
        root.get::<i64>("a.b.c.y").unwrap_err().kind(),
        ErrorKind::KeyNotPresent
    );
}

#[test]
fn wrong_type() {
    let root = sample_tree();
    assert_eq!(
        root.get::<String>("a.b.c.x").unwrap_err().kind(),
        ErrorKind::InvalidDataType
    );
    assert_eq!(
        root.get::<bool>("a.name").unwrap_err().kind(),
        ErrorKind::InvalidDataType
    );
}

#[test]
fn empty_path_segment_is_not_present() {
    let root = sample_tree();
    assert_eq!(
        root.get::<i64>("a..b").unwrap_err().kind(),
        ErrorKind::SectionNotPresent
    );
}

#[test]
fn get_or_default() {
    let root = sample_tree();
    assert_eq!(root.get_or::<i64>("a.b.c.x", 99), 1);
    assert_eq!(root.get_or::<i64>("a.b.c.missing", 99), 99);
    assert_eq!(root.get_or::<i64>("nowhere.x", 99), 99);
    assert_eq!(root.get_or::<String>("a.b.c.x", "fallback".into()), "fallback");
}

#[test]
fn get_array_payload() {
    let root = parse("[s]\nlist = [1, 2]").unwrap();
    let list = root.get::<Vec<Value>>("s.list").unwrap();
    assert_eq!(list, &vec![Value::int(1), Value::int(2)]);
}

#[test]
fn section_lookup() {
    let root = sample_tree();
    assert!(root.section("a").is_ok());
    assert!(root.section("a.b.c").is_ok());
    assert_eq!(
        root.section("a.c").unwrap_err().kind(),
        ErrorKind::SectionNotPresent
    );
}

#[test]
fn entry_mut_edits_in_place() {
    let mut root = sample_tree();
    root.entry_mut("a.b.c.x").unwrap().value = Value::hex(16);
    assert_eq!(*root.get::<i64>("a.b.c.x").unwrap(), 16);
}

// ============================================================================
// Insertion and overwrite
// ============================================================================

#[test]
fn set_value_reports_success() {
    let mut s = Section::new();
    assert_eq!(s.set_value("k", 1i64, false).unwrap(), Outcome::Success);
}

#[test]
fn set_value_duplicate_without_overwrite() {
    let mut s = Section::new();
    s.set_value("k", 1i64, false).unwrap();
    let err = s.set_value("k", 2i64, false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyAlreadyPresent);
    assert_eq!(*s.get::<i64>("k").unwrap(), 1);
}

#[test]
fn set_value_overwrite_reports_overwritten() {
    let mut s = Section::new();
    s.set_value("k", 1i64, false).unwrap();
    assert_eq!(
        s.set_value("k", "two", true).unwrap(),
        Outcome::ValueOverwritten
    );
    assert_eq!(s.get::<String>("k").unwrap(), "two");
    assert_eq!(s.value_count(), 1);
}

#[test]
fn set_value_with_overwrite_on_new_key_is_plain_success() {
    let mut s = Section::new();
    assert_eq!(s.set_value("k", true, true).unwrap(), Outcome::Success);
}

#[test]
fn set_value_does_not_traverse_paths() {
    let mut root = sample_tree();
    root.set_value("a.b", 5i64, false).unwrap();
    // Stored literally under the dotted name, unreachable by path lookup.
    assert!(root.values().any(|(k, _)| k == "a.b"));
    assert_eq!(
        root.get::<i64>("a.b").unwrap_err().kind(),
        ErrorKind::KeyNotPresent
    );
}

#[test]
fn set_entry_keeps_comments() {
    let mut s = Section::new();
    let entry = Entry::with_comments(Value::int(3), vec!["# three".into()]);
    s.set_entry("n", entry, false).unwrap();
    assert_eq!(s.entry("n").unwrap().comments, vec!["# three".to_string()]);
}

#[test]
fn set_section_duplicate_and_overwrite() {
    let mut root = sample_tree();
    let err = root.set_section("a", Section::new(), false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SectionAlreadyPresent);

    assert_eq!(
        root.set_section("a", Section::new(), true).unwrap(),
        Outcome::ValueOverwritten
    );
    // The old subtree is gone.
    assert_eq!(
        root.get::<i64>("a.b.c.x").unwrap_err().kind(),
        ErrorKind::SectionNotPresent
    );
}

#[test]
fn key_and_section_names_are_separate() {
    let mut s = Section::new();
    s.set_value("same", 1i64, false).unwrap();
    assert_eq!(
        s.set_section("same", Section::new(), false).unwrap(),
        Outcome::Success
    );
}

#[test]
fn remove_value_and_section() {
    let mut root = sample_tree();
    let a = root.section_mut("a").unwrap();
    assert!(a.remove_value("name").is_some());
    assert!(a.remove_value("name").is_none());
    assert!(root.remove_section("a").is_some());
    assert!(root.is_empty());
}

#[test]
fn insertion_order_is_kept() {
    let mut s = Section::new();
    for name in ["zeta", "alpha", "mid"] {
        s.set_value(name, 0i64, false).unwrap();
        s.set_section(name, Section::new(), false).unwrap();
    }
    let keys: Vec<&str> = s.values().map(|(k, _)| k).collect();
    let sections: Vec<&str> = s.sections().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    assert_eq!(sections, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn clear_drops_everything() {
    let mut root = sample_tree();
    root.comments_mut().push("# c".into());
    root.clear();
    assert!(root.is_empty());
    assert!(root.comments().is_empty());
}
