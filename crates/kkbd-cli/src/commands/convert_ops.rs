use std::path::Path;
use std::process;
use std::sync::Arc;

use kkbd_core::converter::{convert, suggest, Candidate, DisplayForm};
use kkbd_core::dict::{LocalStore, MainDictionary};
use kkbd_core::user_dict::UserDictionary;

use super::{column_width, pad};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub struct ConvertOptions<'a> {
    pub user_file: Option<&'a str>,
    pub katakana: bool,
    /// Maximum number of candidates printed.
    pub n: usize,
    /// List live suggestions instead of conversion candidates.
    pub suggest: bool,
}

fn open_store(dict_file: &str, user_file: Option<&str>) -> LocalStore {
    let main = die!(
        MainDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    let main = Arc::new(main);
    match user_file {
        Some(path) => die!(
            LocalStore::open(main, Path::new(path)),
            "Error opening user dictionary: {}"
        ),
        None => LocalStore::in_memory(main, UserDictionary::new()),
    }
}

pub fn convert_cmd(dict_file: &str, reading: &str, opts: &ConvertOptions<'_>) {
    let store = open_store(dict_file, opts.user_file);
    let form = if opts.katakana {
        DisplayForm::Katakana
    } else {
        DisplayForm::Hiragana
    };

    let mut candidates = if opts.suggest {
        die!(
            suggest(&store, reading, form, opts.n),
            "Error reading dictionary: {}"
        )
    } else {
        die!(convert(&store, reading, form), "Error reading dictionary: {}")
    };
    candidates.truncate(opts.n);

    if candidates.is_empty() {
        println!("{reading}: no candidates");
        return;
    }
    print_candidates(&candidates);
}

fn print_candidates(candidates: &[Candidate]) {
    let display_width = column_width(candidates.iter().map(|c| c.display.as_str()));
    let key_width = column_width(candidates.iter().map(|c| c.key.as_str()));
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "#{:>2}: {}  {} → {}",
            i + 1,
            pad(&c.display, display_width),
            pad(&c.key, key_width),
            c.surface
        );
    }
}
