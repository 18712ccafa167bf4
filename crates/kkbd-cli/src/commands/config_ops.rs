use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", kkbd_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        kkbd_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: input.start_kana={}, input.shift_toggle={}, input.wide_space={}, candidates.max_suggestions={}",
        s.input.start_kana, s.input.shift_toggle, s.input.wide_space, s.candidates.max_suggestions
    );
}
