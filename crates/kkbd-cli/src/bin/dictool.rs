use std::path::Path;

use clap::{Parser, Subcommand};

use kkbd_cli::commands::{config_ops, convert_ops, dict_ops, user_dict_ops};

#[derive(Parser)]
#[command(name = "dictool", about = "kkbd dictionary tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a text dictionary into a main dictionary file
    Compile {
        /// Text format (skk, tsv)
        #[arg(long, default_value = "skk")]
        source: String,
        /// Input text file (UTF-8)
        input_file: String,
        /// Output file
        output_file: String,
    },
    /// Show main dictionary info
    Info {
        /// Dictionary file
        dict_file: String,
    },
    /// Look up a key in the main dictionary (exact match)
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Key to look up (hiragana, optionally with an okuri letter)
        key: String,
    },
    /// List main dictionary keys starting with a prefix
    Prefix {
        /// Dictionary file
        dict_file: String,
        /// Prefix (hiragana)
        query: String,
        /// Maximum number of keys
        #[arg(short, long, default_value = "20")]
        n: usize,
    },
    /// Convert a kana reading into candidates
    Convert {
        /// Dictionary file
        dict_file: String,
        /// Kana reading
        reading: String,
        /// User dictionary file (optional)
        #[arg(long)]
        user: Option<String>,
        /// Display candidates in katakana
        #[arg(long)]
        katakana: bool,
        /// Show live suggestions instead of conversion candidates
        #[arg(long)]
        suggest: bool,
        /// Number of candidates
        #[arg(short, long, default_value = "10")]
        n: usize,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Manage user dictionary
    UserDict {
        /// User dictionary file (default: ~/.local/share/kkbd/user_dict.kkud)
        #[arg(long)]
        file: Option<String>,
        #[command(subcommand)]
        action: UserDictAction,
    },
}

#[derive(Subcommand)]
enum UserDictAction {
    /// Add a word, or move it to the front of its key
    Add {
        /// Key (hiragana, optionally with an okuri letter)
        key: String,
        /// Surface form (kanji/kana)
        surface: String,
    },
    /// Remove a word
    Remove {
        /// Key (hiragana, optionally with an okuri letter)
        key: String,
        /// Surface form (kanji/kana)
        surface: String,
    },
    /// List all registered words
    List,
}

fn main() {
    kkbd_cli::trace_init::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            source,
            input_file,
            output_file,
        } => dict_ops::compile(&source, &input_file, &output_file),
        Command::Info { dict_file } => dict_ops::info(&dict_file),
        Command::Lookup { dict_file, key } => dict_ops::lookup(&dict_file, &key),
        Command::Prefix {
            dict_file,
            query,
            n,
        } => dict_ops::prefix(&dict_file, &query, n),
        Command::Convert {
            dict_file,
            reading,
            user,
            katakana,
            suggest,
            n,
        } => {
            let opts = convert_ops::ConvertOptions {
                user_file: user.as_deref(),
                katakana,
                n,
                suggest,
            };
            convert_ops::convert_cmd(&dict_file, &reading, &opts);
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::UserDict { file, action } => {
            let path_str = file.unwrap_or_else(user_dict_ops::default_user_dict_path);
            let path = Path::new(&path_str);
            match action {
                UserDictAction::Add { key, surface } => {
                    user_dict_ops::user_dict_add(path, &key, &surface)
                }
                UserDictAction::Remove { key, surface } => {
                    user_dict_ops::user_dict_remove(path, &key, &surface)
                }
                UserDictAction::List => user_dict_ops::user_dict_list(path),
            }
        }
    }
}
