use tracing::debug_span;

use kkbd_core::converter::suggest;
use kkbd_core::dict::DictionaryStore;

use super::types::{
    Compose, Composition, KeyResponse, ModeState, RenderSink, SessionError, ShiftState,
};
use super::ComposingSession;

impl<D: DictionaryStore, R: RenderSink> ComposingSession<D, R> {
    /// Handle one typed character.
    ///
    /// Direct modes commit it immediately. Kana modes append it to the
    /// buffer, first committing any candidate being selected.
    pub fn process_char(&mut self, ch: char) -> Result<KeyResponse, SessionError> {
        let _span = debug_span!("process_char", %ch).entered();

        let result = match self.state {
            ModeState::Direct(_) => {
                let mut buf = [0u8; 4];
                self.sink.commit_text(ch.encode_utf8(&mut buf));
                Ok(())
            }
            ModeState::Kana(..) => self.compose_char(ch),
        };
        self.release_single_shift();
        result.map(|()| KeyResponse::consumed())
    }

    fn compose_char(&mut self, ch: char) -> Result<(), SessionError> {
        // Typing over a highlighted candidate accepts it.
        let learned = if self.is_selecting() {
            self.flush()
        } else {
            Ok(())
        };

        if let Some(compose) = self.state.compose_mut() {
            let mut composition = match std::mem::take(compose) {
                Compose::Accumulating(c) => c,
                Compose::Idle | Compose::Selecting(_) => Composition::new(),
            };
            composition.push_char(ch);
            *compose = Compose::Accumulating(composition);
        }

        let suggested = self.refresh_suggestions();
        learned.and(suggested)
    }

    /// Recompute suggestions for the buffer and redraw. On failure the
    /// buffer is kept and shown without suggestions.
    pub(super) fn refresh_suggestions(&mut self) -> Result<(), SessionError> {
        let form = self.display_form();
        let Some(Compose::Accumulating(c)) = self.state.compose() else {
            return Ok(());
        };
        let result = suggest(&self.store, &c.buffer, form, self.max_suggestions);
        let (suggestions, outcome) = match result {
            Ok(s) => (s, Ok(())),
            Err(e) => (Vec::new(), Err(SessionError::from(e))),
        };
        if let Some(Compose::Accumulating(c)) = self.state.compose_mut() {
            c.suggestions = suggestions;
        }
        self.render_accumulating();
        outcome
    }

    fn release_single_shift(&mut self) {
        if self.shift == ShiftState::Single {
            self.shift = ShiftState::None;
            self.render_keyboard();
        }
    }
}
