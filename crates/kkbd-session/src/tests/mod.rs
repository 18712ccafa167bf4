mod basic;

use std::cell::{Cell, RefCell};
use std::io;
use std::sync::Arc;

use kkbd_core::dict::{DictionaryStore, LocalStore, MainDictionary, StoreError};
use kkbd_core::settings::{parse_settings_toml, Settings, DEFAULT_SETTINGS_TOML};
use kkbd_core::user_dict::UserDictionary;

use super::{ComposingSession, InputMode, KeyResponse, RenderSink, ShiftState, SpaceAction};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Event {
    Candidates(Vec<String>),
    Highlight(Option<usize>),
    Composing(String),
    Commit(String),
    Keyboard(InputMode, ShiftState),
    Space(SpaceAction),
}

/// Sink that records every call in order.
#[derive(Debug, Default)]
pub(super) struct RecordingSink {
    pub events: Vec<Event>,
}

impl RecordingSink {
    pub fn committed(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Commit(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_candidates(&self) -> Option<&[String]> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Candidates(c) => Some(c.as_slice()),
            _ => None,
        })
    }

    pub fn last_highlight(&self) -> Option<Option<usize>> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Highlight(i) => Some(*i),
            _ => None,
        })
    }

    pub fn last_composing(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Composing(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_keyboard(&self) -> Option<(InputMode, ShiftState)> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Keyboard(mode, shift) => Some((*mode, *shift)),
            _ => None,
        })
    }

    pub fn last_space(&self) -> Option<SpaceAction> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Space(action) => Some(*action),
            _ => None,
        })
    }
}

impl RenderSink for RecordingSink {
    fn set_candidates(&mut self, candidates: &[String]) {
        self.events.push(Event::Candidates(candidates.to_vec()));
    }

    fn select_candidate_highlight(&mut self, index: Option<usize>) {
        self.events.push(Event::Highlight(index));
    }

    fn set_composing_display(&mut self, text: &str) {
        self.events.push(Event::Composing(text.to_string()));
    }

    fn commit_text(&mut self, text: &str) {
        self.events.push(Event::Commit(text.to_string()));
    }

    fn set_keyboard(&mut self, mode: InputMode, shift: ShiftState) {
        self.events.push(Event::Keyboard(mode, shift));
    }

    fn set_space_action(&mut self, action: SpaceAction) {
        self.events.push(Event::Space(action));
    }
}

pub(super) fn make_test_dict() -> Arc<MainDictionary> {
    let entries: &[(&str, &[&str])] = &[
        ("たべr", &["食べ"]),
        ("た", &["田"]),
        ("かt", &["買", "勝"]),
        ("かな", &["仮名", "かな"]),
        ("きょう", &["今日", "京"]),
        ("い", &["胃"]),
        ("がっこう", &["学校"]),
    ];
    Arc::new(MainDictionary::from_entries(entries.iter().map(|(k, vs)| {
        (k.to_string(), vs.iter().map(|v| v.to_string()).collect())
    })))
}

pub(super) fn test_settings() -> Settings {
    parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap()
}

pub(super) type TestSession = ComposingSession<LocalStore, RecordingSink>;

pub(super) fn make_session(mode: InputMode) -> TestSession {
    make_session_with(mode, &test_settings())
}

pub(super) fn make_session_with(mode: InputMode, settings: &Settings) -> TestSession {
    let store = LocalStore::in_memory(make_test_dict(), UserDictionary::new());
    let mut session = ComposingSession::with_settings(store, RecordingSink::default(), settings);
    session.set_mode(mode).unwrap();
    session.sink_mut().events.clear();
    session
}

// Helper: type a string one character at a time
pub(super) fn type_string<D: DictionaryStore, R: RenderSink>(
    session: &mut ComposingSession<D, R>,
    s: &str,
) -> Vec<KeyResponse> {
    s.chars()
        .map(|ch| session.process_char(ch).unwrap())
        .collect()
}

/// A store that can be told to fail reads or writes.
pub(super) struct FlakyStore {
    pub inner: LocalStore,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: LocalStore::in_memory(make_test_dict(), UserDictionary::new()),
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
        }
    }

    fn check(&self, flag: &Cell<bool>) -> Result<(), StoreError> {
        if flag.get() {
            Err(StoreError::Unavailable(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only file system",
            )))
        } else {
            Ok(())
        }
    }
}

impl DictionaryStore for FlakyStore {
    fn search_main(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        self.check(&self.fail_reads)?;
        self.inner.search_main(key)
    }

    fn search_user(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        self.check(&self.fail_reads)?;
        self.inner.search_user(key)
    }

    fn add(&self, key: &str, surface: &str) -> Result<(), StoreError> {
        self.check(&self.fail_writes)?;
        self.inner.add(key, surface)
    }

    fn delete(&self, key: &str, surface: &str) -> Result<bool, StoreError> {
        self.check(&self.fail_writes)?;
        self.inner.delete(key, surface)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.check(&self.fail_reads)?;
        self.inner.keys_with_prefix(prefix)
    }

    fn commit(&self) -> Result<(), StoreError> {
        self.check(&self.fail_writes)?;
        self.inner.commit()
    }
}

/// A store that records every `add` it receives.
pub(super) struct CountingStore {
    pub inner: LocalStore,
    pub adds: RefCell<Vec<(String, String)>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: LocalStore::in_memory(make_test_dict(), UserDictionary::new()),
            adds: RefCell::new(Vec::new()),
        }
    }
}

impl DictionaryStore for CountingStore {
    fn search_main(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        self.inner.search_main(key)
    }

    fn search_user(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        self.inner.search_user(key)
    }

    fn add(&self, key: &str, surface: &str) -> Result<(), StoreError> {
        self.adds
            .borrow_mut()
            .push((key.to_string(), surface.to_string()));
        self.inner.add(key, surface)
    }

    fn delete(&self, key: &str, surface: &str) -> Result<bool, StoreError> {
        self.inner.delete(key, surface)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.inner.keys_with_prefix(prefix)
    }

    fn commit(&self) -> Result<(), StoreError> {
        self.inner.commit()
    }
}
