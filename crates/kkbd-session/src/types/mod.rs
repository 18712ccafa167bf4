mod composition;
pub(crate) use composition::*;

use kkbd_core::converter::DisplayForm;
use kkbd_core::dict::StoreError;

/// Keyboard input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    LatinHalf,
    LatinWide,
    HiraganaWide,
    KatakanaWide,
    KatakanaHalf,
}

impl InputMode {
    /// Modes that commit every character immediately, without composing.
    pub fn is_direct(self) -> bool {
        matches!(
            self,
            Self::LatinHalf | Self::LatinWide | Self::KatakanaHalf
        )
    }

    pub fn is_wide(self) -> bool {
        matches!(
            self,
            Self::LatinWide | Self::HiraganaWide | Self::KatakanaWide
        )
    }

    pub fn display_form(self) -> DisplayForm {
        match self {
            Self::KatakanaWide => DisplayForm::Katakana,
            _ => DisplayForm::Hiragana,
        }
    }

    /// The mode key: a1 <-> Ｗ for latin, あ -> ア -> ｶﾅ -> あ for kana.
    pub fn cycled(self) -> Self {
        match self {
            Self::LatinHalf => Self::LatinWide,
            Self::LatinWide => Self::LatinHalf,
            Self::HiraganaWide => Self::KatakanaWide,
            Self::KatakanaWide => Self::KatakanaHalf,
            Self::KatakanaHalf => Self::HiraganaWide,
        }
    }

    /// The keyboard key: latin <-> hiragana.
    pub fn keyboard_toggled(self) -> Self {
        match self {
            Self::LatinHalf | Self::LatinWide => Self::HiraganaWide,
            Self::HiraganaWide | Self::KatakanaWide | Self::KatakanaHalf => Self::LatinHalf,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftState {
    #[default]
    None,
    /// Reverts to `None` after the next character.
    Single,
    Locked,
}

impl ShiftState {
    /// Next state for a press of the shift key. With `toggle` the single-shot
    /// state is skipped.
    pub fn advanced(self, toggle: bool) -> Self {
        match (self, toggle) {
            (Self::None, true) => Self::Locked,
            (_, true) => Self::None,
            (Self::None, false) => Self::Single,
            (Self::Single, false) => Self::Locked,
            (Self::Locked, false) => Self::None,
        }
    }
}

/// What the space key does next, for labeling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceAction {
    Space,
    Convert,
    Next,
}

/// Class of the text field receiving input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    DateTime,
    Phone,
    Email,
    Password,
    Uri,
}

impl FieldKind {
    /// Whether kana input makes sense in this field.
    pub fn accepts_kana(self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Response from a key handler. `consumed == false` tells the host to
/// handle the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyResponse {
    pub consumed: bool,
}

impl KeyResponse {
    pub fn consumed() -> Self {
        Self { consumed: true }
    }

    pub fn not_consumed() -> Self {
        Self { consumed: false }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Receives everything the session wants shown. Implemented by the host UI.
pub trait RenderSink {
    /// Replace the candidate bar contents.
    fn set_candidates(&mut self, candidates: &[String]);

    fn select_candidate_highlight(&mut self, index: Option<usize>);

    /// Replace the in-line composing text (empty clears it).
    fn set_composing_display(&mut self, text: &str);

    /// Insert finished text into the host field.
    fn commit_text(&mut self, text: &str);

    fn set_keyboard(&mut self, _mode: InputMode, _shift: ShiftState) {}

    fn set_space_action(&mut self, _action: SpaceAction) {}
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn set_candidates(&mut self, candidates: &[String]) {
        (**self).set_candidates(candidates)
    }

    fn select_candidate_highlight(&mut self, index: Option<usize>) {
        (**self).select_candidate_highlight(index)
    }

    fn set_composing_display(&mut self, text: &str) {
        (**self).set_composing_display(text)
    }

    fn commit_text(&mut self, text: &str) {
        (**self).commit_text(text)
    }

    fn set_keyboard(&mut self, mode: InputMode, shift: ShiftState) {
        (**self).set_keyboard(mode, shift)
    }

    fn set_space_action(&mut self, action: SpaceAction) {
        (**self).set_space_action(action)
    }
}

pub(super) fn cyclic_index(current: usize, delta: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let c = current as i32;
    let n = count as i32;
    ((c + delta + n) % n) as usize
}
