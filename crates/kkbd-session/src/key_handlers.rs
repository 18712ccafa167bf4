use tracing::{debug, debug_span};

use kkbd_core::converter::convert;
use kkbd_core::dict::DictionaryStore;

use super::types::{Compose, KeyResponse, RenderSink, Selection, SessionError};
use super::ComposingSession;

const IDEOGRAPHIC_SPACE: &str = "\u{3000}";

impl<D: DictionaryStore, R: RenderSink> ComposingSession<D, R> {
    /// Space: a space when nothing is typed, otherwise convert, then step
    /// through the candidates.
    pub fn handle_space(&mut self) -> Result<KeyResponse, SessionError> {
        let _span = debug_span!("handle_space").entered();

        match self.state.compose() {
            None | Some(Compose::Idle) => {
                let space = if self.input.wide_space && self.mode().is_wide() {
                    IDEOGRAPHIC_SPACE
                } else {
                    " "
                };
                self.sink.commit_text(space);
            }
            Some(Compose::Accumulating(_)) => self.start_conversion()?,
            Some(Compose::Selecting(_)) => self.move_cursor(1),
        }
        Ok(KeyResponse::consumed())
    }

    pub fn handle_enter(&mut self) -> Result<KeyResponse, SessionError> {
        let _span = debug_span!("handle_enter").entered();

        if !self.is_composing() {
            return Ok(KeyResponse::not_consumed());
        }
        self.flush()?;
        Ok(KeyResponse::consumed())
    }

    /// Backspace: leave selection keeping the typed text, or delete the
    /// last typed character.
    pub fn handle_backspace(&mut self) -> Result<KeyResponse, SessionError> {
        let _span = debug_span!("handle_backspace").entered();

        let Some(compose) = self.state.compose_mut() else {
            return Ok(KeyResponse::not_consumed());
        };
        match std::mem::take(compose) {
            Compose::Idle => return Ok(KeyResponse::not_consumed()),
            Compose::Selecting(s) => {
                *compose = Compose::Accumulating(s.into_composition());
                self.refresh_suggestions()?;
            }
            Compose::Accumulating(mut c) => {
                c.pop_char();
                if c.buffer.is_empty() {
                    self.reset_compose();
                } else {
                    *compose = Compose::Accumulating(c);
                    self.refresh_suggestions()?;
                }
            }
        }
        Ok(KeyResponse::consumed())
    }

    pub fn handle_cursor_left(&mut self) -> Result<KeyResponse, SessionError> {
        Ok(self.handle_cursor(-1))
    }

    pub fn handle_cursor_right(&mut self) -> Result<KeyResponse, SessionError> {
        Ok(self.handle_cursor(1))
    }

    fn handle_cursor(&mut self, delta: i32) -> KeyResponse {
        let _span = debug_span!("handle_cursor", delta).entered();

        match self.state.compose() {
            Some(Compose::Selecting(_)) => self.move_cursor(delta),
            Some(Compose::Accumulating(_)) => {}
            None | Some(Compose::Idle) => return KeyResponse::not_consumed(),
        }
        KeyResponse::consumed()
    }

    /// Commit the visible candidate at `index`. Out-of-range indices are
    /// ignored.
    pub fn select_candidate(&mut self, index: usize) -> Result<KeyResponse, SessionError> {
        let _span = debug_span!("select_candidate", index).entered();

        match self.candidates().get(index).cloned() {
            Some(candidate) => self.commit_candidate(candidate)?,
            None => debug!(index, count = self.candidates().len(), "no candidate at index"),
        }
        Ok(KeyResponse::consumed())
    }

    /// Convert the buffer and highlight the first candidate. On failure the
    /// session is left as it was.
    fn start_conversion(&mut self) -> Result<(), SessionError> {
        let form = self.display_form();
        let Some(Compose::Accumulating(c)) = self.state.compose() else {
            return Ok(());
        };
        let candidates = convert(&self.store, &c.buffer, form)?;

        if let Some(compose) = self.state.compose_mut() {
            if let Compose::Accumulating(c) = std::mem::take(compose) {
                *compose = match Selection::new(c, candidates) {
                    Ok(selection) => Compose::Selecting(selection),
                    Err(c) => Compose::Accumulating(c),
                };
            }
        }
        self.render_selecting();
        Ok(())
    }

    fn move_cursor(&mut self, delta: i32) {
        if let Some(Compose::Selecting(s)) = self.state.compose_mut() {
            s.step(delta);
        }
        self.render_cursor();
    }
}
