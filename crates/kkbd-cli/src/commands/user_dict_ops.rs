use std::path::Path;
use std::process;
use std::sync::Arc;

use kkbd_core::dict::{DictionaryStore, LocalStore, MainDictionary};

use super::{column_width, pad};
use crate::dict_source::is_dict_key;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn default_user_dict_path() -> String {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        if !data_home.is_empty() {
            return format!("{data_home}/kkbd/user_dict.kkud");
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.local/share/kkbd/user_dict.kkud")
}

/// Open the user dictionary alone; main-dictionary lookups are not needed here.
pub(crate) fn open_user_store(path: &Path) -> LocalStore {
    die!(
        LocalStore::open(Arc::new(MainDictionary::empty()), path),
        "Error opening user dictionary: {}"
    )
}

pub fn user_dict_add(path: &Path, key: &str, surface: &str) {
    if !is_dict_key(key) {
        eprintln!("Error: '{key}' is not a hiragana reading (optionally followed by one okuri letter)");
        process::exit(1);
    }
    let store = open_user_store(path);
    let first = store
        .user_dict()
        .lookup(key)
        .and_then(|list| list.into_iter().next());
    if first.as_deref() == Some(surface) {
        println!("Already exists: {key} → {surface}");
        return;
    }
    die!(store.add(key, surface), "Error writing user dictionary: {}");
    die!(store.commit(), "Error saving user dictionary: {}");
    println!("Added: {key} → {surface}");
}

pub fn user_dict_remove(path: &Path, key: &str, surface: &str) {
    let store = open_user_store(path);
    if die!(store.delete(key, surface), "Error writing user dictionary: {}") {
        die!(store.commit(), "Error saving user dictionary: {}");
        println!("Removed: {key} → {surface}");
    } else {
        println!("Not found: {key} → {surface}");
    }
}

pub fn user_dict_list(path: &Path) {
    let store = open_user_store(path);
    let entries = store.user_dict().list();
    if entries.is_empty() {
        println!("(empty)");
    } else {
        let width = column_width(entries.iter().map(|(key, _)| key.as_str()));
        for (key, surface) in &entries {
            println!("{}  {surface}", pad(key, width));
        }
        println!("---");
        println!("{} entries", entries.len());
    }
}
