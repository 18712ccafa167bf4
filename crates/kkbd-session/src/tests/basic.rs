use super::*;
use crate::types::cyclic_index;

// --- Direct modes ---

#[test]
fn test_direct_mode_commits_each_char() {
    let mut session = make_session(InputMode::LatinHalf);
    let resps = type_string(&mut session, "ab");
    assert!(resps.iter().all(|r| r.consumed));
    assert_eq!(session.sink().committed(), ["a", "b"]);
    assert!(!session.is_composing());
    assert_eq!(session.buffer(), "");
}

#[test]
fn test_half_katakana_is_direct() {
    let mut session = make_session(InputMode::KatakanaHalf);
    type_string(&mut session, "ｶﾅ");
    assert_eq!(session.sink().committed(), ["ｶ", "ﾅ"]);
    assert!(!session.is_composing());
}

// --- Kana composing ---

#[test]
fn test_kana_accumulates() {
    let mut session = make_session(InputMode::HiraganaWide);
    type_string(&mut session, "たべる");
    assert!(session.is_composing());
    assert!(!session.is_selecting());
    assert_eq!(session.buffer(), "たべる");
    assert!(session.sink().committed().is_empty());
    assert_eq!(session.sink().last_composing(), Some("たべる"));
    assert_eq!(session.sink().last_space(), Some(SpaceAction::Convert));
}

#[test]
fn test_dakuten_combines_with_last_char() {
    let mut session = make_session(InputMode::HiraganaWide);
    type_string(&mut session, "か゛");
    assert_eq!(session.buffer(), "が");
    type_string(&mut session, "は゜");
    assert_eq!(session.buffer(), "がぱ");
}

#[test]
fn test_voicing_mark_without_partner_is_kept() {
    let mut session = make_session(InputMode::HiraganaWide);
    type_string(&mut session, "゛");
    assert_eq!(session.buffer(), "゛");
    type_string(&mut session, "あ゛");
    assert_eq!(session.buffer(), "゛あ゛");
    // handakuten only combines with the は row
    type_string(&mut session, "か゜");
    assert_eq!(session.buffer(), "゛あ゛か゜");
}

#[test]
fn test_katakana_wide_displays_katakana() {
    let mut session = make_session(InputMode::KatakanaWide);
    type_string(&mut session, "たべる");
    assert_eq!(session.buffer(), "たべる");
    assert_eq!(session.sink().last_composing(), Some("タベル"));
}

// --- Space ---

#[test]
fn test_space_on_empty_buffer() {
    let mut session = make_session(InputMode::HiraganaWide);
    assert!(session.handle_space().unwrap().consumed);
    assert_eq!(session.sink().committed(), ["\u{3000}"]);

    let mut session = make_session(InputMode::LatinHalf);
    session.handle_space().unwrap();
    assert_eq!(session.sink().committed(), [" "]);

    let mut session = make_session(InputMode::LatinWide);
    session.handle_space().unwrap();
    assert_eq!(session.sink().committed(), ["\u{3000}"]);

    let mut session = make_session(InputMode::KatakanaHalf);
    session.handle_space().unwrap();
    assert_eq!(session.sink().committed(), [" "]);
}

#[test]
fn test_space_narrow_when_wide_space_disabled() {
    let mut settings = test_settings();
    settings.input.wide_space = false;
    let mut session = make_session_with(InputMode::HiraganaWide, &settings);
    session.handle_space().unwrap();
    assert_eq!(session.sink().committed(), [" "]);
}

// --- Enter ---

#[test]
fn test_enter_on_empty_not_consumed() {
    let mut session = make_session(InputMode::HiraganaWide);
    assert!(!session.handle_enter().unwrap().consumed);
    let mut session = make_session(InputMode::LatinHalf);
    assert!(!session.handle_enter().unwrap().consumed);
}

#[test]
fn test_enter_commits_raw_and_learns() {
    let mut session = make_session(InputMode::HiraganaWide);
    type_string(&mut session, "ねこ");
    assert!(session.handle_enter().unwrap().consumed);
    assert_eq!(session.sink().committed(), ["ねこ"]);
    assert!(!session.is_composing());
    assert_eq!(session.sink().last_composing(), Some(""));
    assert_eq!(
        session.store().search_user("ねこ").unwrap(),
        Some(vec!["ねこ".to_string()])
    );
}

#[test]
fn test_enter_in_katakana_wide_commits_katakana() {
    let mut session = make_session(InputMode::KatakanaWide);
    type_string(&mut session, "ねこ");
    session.handle_enter().unwrap();
    assert_eq!(session.sink().committed(), ["ネコ"]);
    assert_eq!(
        session.store().search_user("ねこ").unwrap(),
        Some(vec!["ねこ".to_string()])
    );
}

// --- Backspace ---

#[test]
fn test_backspace_pops_last_char() {
    let mut session = make_session(InputMode::HiraganaWide);
    type_string(&mut session, "たべ");
    assert!(session.handle_backspace().unwrap().consumed);
    assert_eq!(session.buffer(), "た");
    assert_eq!(session.sink().last_composing(), Some("た"));
}

#[test]
fn test_backspace_to_empty_goes_idle() {
    let mut session = make_session(InputMode::HiraganaWide);
    type_string(&mut session, "た");
    assert!(session.handle_backspace().unwrap().consumed);
    assert!(!session.is_composing());
    assert_eq!(session.sink().last_composing(), Some(""));
    assert_eq!(session.sink().last_space(), Some(SpaceAction::Space));
    assert!(!session.handle_backspace().unwrap().consumed);
}

#[test]
fn test_backspace_in_direct_mode_not_consumed() {
    let mut session = make_session(InputMode::LatinHalf);
    assert!(!session.handle_backspace().unwrap().consumed);
}

// --- Cursor ---

#[test]
fn test_cursor_keys_left_to_host_when_idle() {
    let mut session = make_session(InputMode::HiraganaWide);
    assert!(!session.handle_cursor_left().unwrap().consumed);
    assert!(!session.handle_cursor_right().unwrap().consumed);
}

#[test]
fn test_cursor_keys_swallowed_while_typing() {
    let mut session = make_session(InputMode::HiraganaWide);
    type_string(&mut session, "たべ");
    assert!(session.handle_cursor_left().unwrap().consumed);
    assert!(session.handle_cursor_right().unwrap().consumed);
    assert_eq!(session.buffer(), "たべ");
    assert!(!session.is_selecting());
}

// --- Store failures ---

#[test]
fn test_learning_failure_still_commits() {
    let store = FlakyStore::new();
    store.fail_writes.set(true);
    let mut session =
        ComposingSession::with_settings(store, RecordingSink::default(), &test_settings());
    session.start_input(crate::FieldKind::Text).unwrap();

    type_string(&mut session, "ねこ");
    assert!(session.handle_enter().is_err());
    assert_eq!(session.sink().committed(), ["ねこ"]);
    assert!(!session.is_composing());
}

#[test]
fn test_lookup_failure_keeps_typed_text() {
    let store = FlakyStore::new();
    let mut session =
        ComposingSession::with_settings(store, RecordingSink::default(), &test_settings());
    session.start_input(crate::FieldKind::Text).unwrap();
    type_string(&mut session, "たべ");

    session.store().fail_reads.set(true);
    assert!(session.process_char('る').is_err());
    assert_eq!(session.buffer(), "たべる");
    assert!(session.candidates().is_empty());

    assert!(session.handle_space().is_err());
    assert!(!session.is_selecting());
    assert_eq!(session.buffer(), "たべる");

    session.store().fail_reads.set(false);
    session.handle_space().unwrap();
    assert!(session.is_selecting());
}

#[test]
fn test_cyclic_index() {
    assert_eq!(cyclic_index(0, 1, 3), 1);
    assert_eq!(cyclic_index(2, 1, 3), 0); // wrap
    assert_eq!(cyclic_index(0, -1, 3), 2); // wrap backwards
    assert_eq!(cyclic_index(0, 0, 0), 0); // empty
}
