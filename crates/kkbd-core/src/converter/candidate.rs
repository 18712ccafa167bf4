use std::collections::HashSet;

use crate::unicode::to_wide_katakana;

/// How candidate display text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayForm {
    #[default]
    Hiragana,
    /// Display text is converted to full-width katakana.
    Katakana,
}

impl DisplayForm {
    pub fn render(self, text: &str) -> String {
        match self {
            DisplayForm::Hiragana => text.to_string(),
            DisplayForm::Katakana => to_wide_katakana(text),
        }
    }
}

/// A conversion candidate.
///
/// `surface` is written back to the user dictionary under `key` when the
/// candidate is committed; `display` is what the host shows and commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub surface: String,
    pub display: String,
}

impl Candidate {
    /// Build a candidate whose display is `surface` followed by `tail`,
    /// rendered in `form`.
    pub fn new(key: &str, surface: &str, tail: &str, form: DisplayForm) -> Self {
        let mut text = String::with_capacity(surface.len() + tail.len());
        text.push_str(surface);
        text.push_str(tail);
        Self {
            key: key.to_string(),
            surface: surface.to_string(),
            display: form.render(&text),
        }
    }
}

/// Insertion-ordered candidates, unique by display text.
///
/// The first candidate pushed for a given display wins; later ones with the
/// same display are dropped.
#[derive(Debug, Default)]
pub struct CandidateList {
    items: Vec<Candidate>,
    seen: HashSet<String>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `candidate` unless its display text is already present.
    /// Returns whether it was added.
    pub fn push(&mut self, candidate: Candidate) -> bool {
        if !self.seen.insert(candidate.display.clone()) {
            return false;
        }
        self.items.push(candidate);
        true
    }

    pub fn contains(&self, display: &str) -> bool {
        self.seen.contains(display)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        for dropped in self.items.drain(len.min(self.items.len())..) {
            self.seen.remove(&dropped.display);
        }
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.items
    }
}

impl Extend<Candidate> for CandidateList {
    fn extend<I: IntoIterator<Item = Candidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.push(candidate);
        }
    }
}
