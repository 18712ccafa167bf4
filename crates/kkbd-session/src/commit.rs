use tracing::{debug, warn};

use kkbd_core::converter::Candidate;
use kkbd_core::dict::DictionaryStore;
use kkbd_core::unicode::to_wide_hiragana;

use super::types::{Compose, RenderSink, SessionError};
use super::ComposingSession;

impl<D: DictionaryStore, R: RenderSink> ComposingSession<D, R> {
    /// Commit a candidate and learn it under the key it was found under.
    ///
    /// The text reaches the host and the session resets even if the
    /// learning write fails; that failure is returned afterwards.
    pub(super) fn commit_candidate(&mut self, candidate: Candidate) -> Result<(), SessionError> {
        debug!(key = %candidate.key, surface = %candidate.surface, "commit candidate");
        self.sink.commit_text(&candidate.display);
        self.reset_compose();
        self.learn(&candidate.key, &candidate.surface)
    }

    /// Commit the typed text as-is, learning it under its hiragana reading.
    pub(super) fn commit_buffer(&mut self, buffer: String) -> Result<(), SessionError> {
        let text = self.display_form().render(&buffer);
        debug!(%buffer, "commit raw");
        self.sink.commit_text(&text);
        self.reset_compose();
        self.learn(&to_wide_hiragana(&buffer), &buffer)
    }

    /// Commit whatever is pending: the highlighted candidate while
    /// selecting, the raw buffer while typing.
    pub(super) fn flush(&mut self) -> Result<(), SessionError> {
        match self.take_compose() {
            Compose::Idle => Ok(()),
            Compose::Accumulating(c) => self.commit_buffer(c.buffer),
            Compose::Selecting(s) => self.commit_candidate(s.into_selected()),
        }
    }

    fn learn(&self, key: &str, surface: &str) -> Result<(), SessionError> {
        self.store.add(key, surface).map_err(|e| {
            warn!(error = %e, key, surface, "learning write failed");
            SessionError::from(e)
        })
    }

    fn take_compose(&mut self) -> Compose {
        self.state
            .compose_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub(super) fn reset_compose(&mut self) {
        if let Some(compose) = self.state.compose_mut() {
            *compose = Compose::Idle;
        }
        self.render_idle();
    }
}
