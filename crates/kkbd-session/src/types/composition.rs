use kkbd_core::converter::Candidate;
use kkbd_core::unicode::{combine_voicing, voicing_mark};

use super::{cyclic_index, InputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DirectMode {
    LatinHalf,
    LatinWide,
    KatakanaHalf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KanaMode {
    HiraganaWide,
    KatakanaWide,
}

/// Input mode together with its composing state. Direct modes never compose.
#[derive(Debug)]
pub(crate) enum ModeState {
    Direct(DirectMode),
    Kana(KanaMode, Compose),
}

impl ModeState {
    pub(crate) fn idle(mode: InputMode) -> Self {
        match mode {
            InputMode::LatinHalf => Self::Direct(DirectMode::LatinHalf),
            InputMode::LatinWide => Self::Direct(DirectMode::LatinWide),
            InputMode::KatakanaHalf => Self::Direct(DirectMode::KatakanaHalf),
            InputMode::HiraganaWide => Self::Kana(KanaMode::HiraganaWide, Compose::Idle),
            InputMode::KatakanaWide => Self::Kana(KanaMode::KatakanaWide, Compose::Idle),
        }
    }

    pub(crate) fn mode(&self) -> InputMode {
        match self {
            Self::Direct(DirectMode::LatinHalf) => InputMode::LatinHalf,
            Self::Direct(DirectMode::LatinWide) => InputMode::LatinWide,
            Self::Direct(DirectMode::KatakanaHalf) => InputMode::KatakanaHalf,
            Self::Kana(KanaMode::HiraganaWide, _) => InputMode::HiraganaWide,
            Self::Kana(KanaMode::KatakanaWide, _) => InputMode::KatakanaWide,
        }
    }

    pub(crate) fn compose(&self) -> Option<&Compose> {
        match self {
            Self::Direct(_) => None,
            Self::Kana(_, compose) => Some(compose),
        }
    }

    pub(crate) fn compose_mut(&mut self) -> Option<&mut Compose> {
        match self {
            Self::Direct(_) => None,
            Self::Kana(_, compose) => Some(compose),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) enum Compose {
    #[default]
    Idle,
    Accumulating(Composition),
    Selecting(Selection),
}

impl Compose {
    pub(crate) fn buffer(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Accumulating(c) => &c.buffer,
            Self::Selecting(s) => &s.composition.buffer,
        }
    }

    /// Candidates currently shown: suggestions while typing, conversion
    /// candidates while selecting.
    pub(crate) fn visible(&self) -> &[Candidate] {
        match self {
            Self::Idle => &[],
            Self::Accumulating(c) => &c.suggestions,
            Self::Selecting(s) => &s.candidates,
        }
    }
}

/// Kana typed since the last commit, with the live suggestions for it.
#[derive(Debug, Default)]
pub(crate) struct Composition {
    pub(crate) buffer: String,
    pub(crate) suggestions: Vec<Candidate>,
}

impl Composition {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `ch`. A voicing mark combines with the last character when it
    /// can; otherwise it is kept as typed.
    pub(crate) fn push_char(&mut self, ch: char) {
        if let (Some(mark), Some(last)) = (voicing_mark(ch), self.buffer.chars().last()) {
            if let Some(voiced) = combine_voicing(last, mark) {
                self.buffer.pop();
                self.buffer.push(voiced);
                return;
            }
        }
        self.buffer.push(ch);
    }

    pub(crate) fn pop_char(&mut self) -> Option<char> {
        self.buffer.pop()
    }
}

/// A conversion in progress. The candidate list is never empty and the
/// cursor always points into it.
#[derive(Debug)]
pub(crate) struct Selection {
    composition: Composition,
    candidates: Vec<Candidate>,
    cursor: usize,
}

impl Selection {
    /// Start selecting over `candidates`; hands the composition back when
    /// there is nothing to select.
    pub(crate) fn new(
        composition: Composition,
        candidates: Vec<Candidate>,
    ) -> Result<Self, Composition> {
        if candidates.is_empty() {
            return Err(composition);
        }
        Ok(Self {
            composition,
            candidates,
            cursor: 0,
        })
    }

    pub(crate) fn selected(&self) -> &Candidate {
        &self.candidates[self.cursor]
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub(crate) fn step(&mut self, delta: i32) {
        self.cursor = cyclic_index(self.cursor, delta, self.candidates.len());
    }

    pub(crate) fn into_selected(mut self) -> Candidate {
        self.candidates.swap_remove(self.cursor)
    }

    /// Abandon the selection, keeping the typed text.
    pub(crate) fn into_composition(self) -> Composition {
        Composition {
            buffer: self.composition.buffer,
            suggestions: Vec::new(),
        }
    }
}
