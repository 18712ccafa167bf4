//! Composing session for a kana keyboard.
//!
//! `ComposingSession` tracks the input mode, the kana typed so far and any
//! conversion in progress. Each key handler updates that state, drives the
//! conversion engine, and reports what to show through a `RenderSink`.

pub(crate) mod types;

mod commit;
mod composing;
mod key_handlers;
mod mode;
mod response;

#[cfg(test)]
mod tests;

use kkbd_core::converter::{Candidate, DisplayForm};
use kkbd_core::dict::DictionaryStore;
use kkbd_core::settings::{settings, InputSettings, Settings};

pub use types::{
    FieldKind, InputMode, KeyResponse, RenderSink, SessionError, ShiftState, SpaceAction,
};

use types::{Compose, ModeState};

/// Stateful input session over a dictionary store and a rendering sink.
pub struct ComposingSession<D, R> {
    store: D,
    sink: R,

    state: ModeState,
    shift: ShiftState,

    // Settings
    input: InputSettings,
    max_suggestions: usize,
}

impl<D: DictionaryStore, R: RenderSink> ComposingSession<D, R> {
    /// A session using the process-wide settings, starting in latin-half mode.
    pub fn new(store: D, sink: R) -> Self {
        Self::with_settings(store, sink, settings())
    }

    pub fn with_settings(store: D, sink: R, settings: &Settings) -> Self {
        Self {
            store,
            sink,
            state: ModeState::idle(InputMode::LatinHalf),
            shift: ShiftState::None,
            input: settings.input,
            max_suggestions: settings.candidates.max_suggestions,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.state.mode()
    }

    pub fn shift(&self) -> ShiftState {
        self.shift
    }

    /// True while there is typed kana not yet committed.
    pub fn is_composing(&self) -> bool {
        matches!(
            self.state.compose(),
            Some(Compose::Accumulating(_) | Compose::Selecting(_))
        )
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state.compose(), Some(Compose::Selecting(_)))
    }

    /// The raw composing buffer.
    pub fn buffer(&self) -> &str {
        self.state.compose().map_or("", Compose::buffer)
    }

    /// Candidates currently offered (suggestions or conversion candidates).
    pub fn candidates(&self) -> &[Candidate] {
        match self.state.compose() {
            Some(compose) => compose.visible(),
            None => &[],
        }
    }

    /// Index of the highlighted conversion candidate, if selecting.
    pub fn selected_index(&self) -> Option<usize> {
        match self.state.compose() {
            Some(Compose::Selecting(s)) => Some(s.cursor()),
            _ => None,
        }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    fn display_form(&self) -> DisplayForm {
        self.state.mode().display_form()
    }
}
