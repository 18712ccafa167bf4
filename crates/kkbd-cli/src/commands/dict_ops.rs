use std::fs;
use std::path::Path;
use std::process;

use kkbd_core::dict::MainDictionary;

use super::{column_width, pad};
use crate::dict_source;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn compile(source_name: &str, input_file: &str, output_file: &str) {
    let source = dict_source::from_name(source_name).unwrap_or_else(|| {
        eprintln!("Error: unknown source '{source_name}' (available: skk, tsv)");
        process::exit(1);
    });

    eprintln!("Reading {input_file} ({source_name})...");
    let parsed = die!(
        dict_source::parse_dict_file(source.as_ref(), Path::new(input_file)),
        "Error parsing dictionary: {}"
    );
    eprintln!("  (skipped {} of {} lines)", parsed.skipped, parsed.lines);

    let dict = MainDictionary::from_entries(parsed.entries);
    let (key_count, surface_count) = dict.stats();
    eprintln!("Writing {key_count} keys ({surface_count} surfaces)...");
    die!(
        dict.save(Path::new(output_file)),
        "Error writing dictionary: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({:.1} KB)",
        file_size as f64 / 1024.0
    );
}

pub fn info(dict_file: &str) {
    let dict = die!(
        MainDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );

    let file_size = fs::metadata(dict_file).map(|m| m.len()).unwrap_or(0);
    let (key_count, surface_count) = dict.stats();
    let okuri_count = dict
        .iter()
        .filter(|(key, _)| kkbd_core::okuri::is_okuri_key(key))
        .count();

    println!("Dictionary: {dict_file}");
    println!("File size:  {:.1} KB", file_size as f64 / 1024.0);
    println!("Keys:       {key_count} ({okuri_count} okuri)");
    println!("Surfaces:   {surface_count}");

    let sample_keys = ["かんじ", "にほん", "たべr", "かk"];
    println!();
    println!("Sample lookups:");
    let width = column_width(sample_keys);
    for key in sample_keys {
        match dict.lookup(key) {
            Some(surfaces) => {
                let shown: Vec<&str> = surfaces.iter().take(5).map(String::as_str).collect();
                println!("  {} → {}", pad(key, width), shown.join(", "));
            }
            None => println!("  {} → (not found)", pad(key, width)),
        }
    }
}

pub fn lookup(dict_file: &str, key: &str) {
    let dict = die!(
        MainDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    match dict.lookup(key) {
        None => println!("{key}: not found"),
        Some(surfaces) => {
            println!("{key}: {} surfaces", surfaces.len());
            for (i, surface) in surfaces.iter().enumerate() {
                println!("  {:>2}. {surface}", i + 1);
            }
        }
    }
}

pub fn prefix(dict_file: &str, query: &str, max_results: usize) {
    let dict = die!(
        MainDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    let matches = dict.predict(query, max_results);
    if matches.is_empty() {
        println!("{query}: no keys with this prefix");
        return;
    }
    let width = column_width(matches.iter().map(|(key, _)| *key));
    for (key, surfaces) in &matches {
        println!("  {}  {}", pad(key, width), surfaces.join(" "));
    }
    println!("---");
    println!("{} keys", matches.len());
}
