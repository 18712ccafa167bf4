use tracing::debug_span;

use kkbd_core::dict::DictionaryStore;

use super::types::{
    FieldKind, InputMode, KeyResponse, ModeState, RenderSink, SessionError, ShiftState,
};
use super::ComposingSession;

impl<D: DictionaryStore, R: RenderSink> ComposingSession<D, R> {
    /// Switch to `mode`. Pending text is committed and the store flushed
    /// first; the switch happens even if either of those fails.
    pub fn set_mode(&mut self, mode: InputMode) -> Result<KeyResponse, SessionError> {
        let _span = debug_span!("set_mode", ?mode).entered();

        let flushed = self.flush();
        let committed = self.store.commit().map_err(SessionError::from);
        self.enter_mode(mode);
        flushed.and(committed).map(|()| KeyResponse::consumed())
    }

    pub fn set_shift(&mut self, shift: ShiftState) -> Result<KeyResponse, SessionError> {
        self.shift = shift;
        self.render_keyboard();
        Ok(KeyResponse::consumed())
    }

    /// The mode key.
    pub fn handle_mode(&mut self) -> Result<KeyResponse, SessionError> {
        self.set_mode(self.mode().cycled())
    }

    /// The keyboard key.
    pub fn handle_keyboard(&mut self) -> Result<KeyResponse, SessionError> {
        self.set_mode(self.mode().keyboard_toggled())
    }

    pub fn handle_shift(&mut self) -> Result<KeyResponse, SessionError> {
        self.set_shift(self.shift.advanced(self.input.shift_toggle))
    }

    /// A field gained focus. Anything left over from the previous field is
    /// dropped, not committed.
    pub fn start_input(&mut self, field: FieldKind) -> Result<KeyResponse, SessionError> {
        let mode = if self.input.start_kana && field.accepts_kana() {
            InputMode::HiraganaWide
        } else {
            InputMode::LatinHalf
        };
        self.enter_mode(mode);
        Ok(KeyResponse::consumed())
    }

    /// The field lost focus: commit pending text, return to latin-half and
    /// flush the store.
    pub fn finish_input(&mut self) -> Result<KeyResponse, SessionError> {
        self.set_mode(InputMode::LatinHalf)
    }

    fn enter_mode(&mut self, mode: InputMode) {
        self.state = ModeState::idle(mode);
        self.shift = ShiftState::None;
        self.render_idle();
        self.render_keyboard();
    }
}
