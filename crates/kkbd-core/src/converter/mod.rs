//! Kana-to-kanji conversion by dictionary lookup.
//!
//! A reading is looked up whole, then split at every interior position into a
//! stem and a kana tail. The tail's head syllable picks an okuri letter, so
//! "たべる" also queries "たべr" (and the bare stem "たべ"), and every hit is
//! displayed with the tail reattached. User-dictionary hits come before
//! main-dictionary hits; the typed text itself (hiragana and katakana) is
//! always offered.

mod candidate;

#[cfg(test)]
mod tests;

use tracing::{debug, debug_span};

use crate::dict::{DictionaryStore, StoreError};
use crate::okuri::{is_okuri_key, okuri_key};
use crate::unicode::{to_wide_hiragana, to_wide_katakana};

pub use candidate::{Candidate, CandidateList, DisplayForm};

/// Convert `reading` into an ordered, deduplicated candidate list.
///
/// An empty reading yields no candidates; any other reading yields at least
/// its hiragana and katakana forms.
pub fn convert<D: DictionaryStore + ?Sized>(
    store: &D,
    reading: &str,
    form: DisplayForm,
) -> Result<Vec<Candidate>, StoreError> {
    let _span = debug_span!("convert", reading).entered();

    if reading.is_empty() {
        return Ok(Vec::new());
    }
    let hiragana = to_wide_hiragana(reading);

    let mut hits = CandidateList::new();
    collect_hits(&mut hits, &hiragana, form, |key| store.search_user(key))?;
    let user_hits = hits.len();
    collect_hits(&mut hits, &hiragana, form, |key| store.search_main(key))?;
    debug!(user_hits, main_hits = hits.len() - user_hits, "dictionary hits");

    let mut out = CandidateList::new();
    for baseline in baselines(&hiragana, form) {
        if !hits.contains(&baseline.display) {
            out.push(baseline);
        }
    }
    out.extend(hits.into_vec());
    Ok(out.into_vec())
}

/// Live suggestions for a partially typed `reading`.
///
/// The typed text first, then every learned surface whose key extends the
/// reading, longest key first. Okuri-keyed entries are not suggested.
pub fn suggest<D: DictionaryStore + ?Sized>(
    store: &D,
    reading: &str,
    form: DisplayForm,
    limit: usize,
) -> Result<Vec<Candidate>, StoreError> {
    let _span = debug_span!("suggest", reading).entered();

    if reading.is_empty() {
        return Ok(Vec::new());
    }
    let hiragana = to_wide_hiragana(reading);

    let mut out = CandidateList::new();
    out.extend(baselines(&hiragana, form));

    let mut keys: Vec<String> = store
        .keys_with_prefix(&hiragana)?
        .into_iter()
        .filter(|k| !is_okuri_key(k))
        .collect();
    keys.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });

    for key in &keys {
        if out.len() >= limit {
            break;
        }
        if let Some(surfaces) = store.search_user(key)? {
            for surface in &surfaces {
                out.push(Candidate::new(key, surface, "", form));
            }
        }
    }
    out.truncate(limit);
    debug!(keys = keys.len(), suggestions = out.len());
    Ok(out.into_vec())
}

/// The typed text as hiragana, then as katakana, both keyed by the reading.
fn baselines(hiragana: &str, form: DisplayForm) -> [Candidate; 2] {
    let katakana = to_wide_katakana(hiragana);
    [
        Candidate::new(hiragana, hiragana, "", form),
        Candidate::new(hiragana, &katakana, "", form),
    ]
}

/// Direct lookup of `reading`, then split lookups from the longest stem down.
fn collect_hits<F>(
    hits: &mut CandidateList,
    reading: &str,
    form: DisplayForm,
    mut search: F,
) -> Result<(), StoreError>
where
    F: FnMut(&str) -> Result<Option<Vec<String>>, StoreError>,
{
    if let Some(surfaces) = search(reading)? {
        for surface in &surfaces {
            hits.push(Candidate::new(reading, surface, "", form));
        }
    }

    // Byte offsets of every interior character boundary, longest stem first.
    let splits: Vec<usize> = reading.char_indices().skip(1).map(|(i, _)| i).collect();
    for &pos in splits.iter().rev() {
        let (stem, tail) = reading.split_at(pos);
        if let Some(key) = okuri_key(stem, tail) {
            if let Some(surfaces) = search(&key)? {
                for surface in &surfaces {
                    hits.push(Candidate::new(&key, surface, tail, form));
                }
            }
        }
        if let Some(surfaces) = search(stem)? {
            for surface in &surfaces {
                hits.push(Candidate::new(stem, surface, tail, form));
            }
        }
    }
    Ok(())
}
