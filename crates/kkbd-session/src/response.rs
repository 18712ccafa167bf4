use kkbd_core::converter::Candidate;
use kkbd_core::dict::DictionaryStore;

use super::types::{Compose, RenderSink, SpaceAction};
use super::ComposingSession;

fn displays(candidates: &[Candidate]) -> Vec<String> {
    candidates.iter().map(|c| c.display.clone()).collect()
}

impl<D: DictionaryStore, R: RenderSink> ComposingSession<D, R> {
    pub(super) fn render_idle(&mut self) {
        self.sink.set_candidates(&[]);
        self.sink.select_candidate_highlight(None);
        self.sink.set_composing_display("");
        self.sink.set_space_action(SpaceAction::Space);
    }

    /// Composing text plus suggestions, nothing highlighted.
    pub(super) fn render_accumulating(&mut self) {
        let form = self.display_form();
        let Some(Compose::Accumulating(c)) = self.state.compose() else {
            return;
        };
        let surfaces = displays(&c.suggestions);
        let text = form.render(&c.buffer);

        self.sink.set_candidates(&surfaces);
        self.sink.select_candidate_highlight(None);
        self.sink.set_composing_display(&text);
        self.sink.set_space_action(SpaceAction::Convert);
    }

    /// Full candidate list with the cursor highlighted and shown in-line.
    pub(super) fn render_selecting(&mut self) {
        let Some(Compose::Selecting(s)) = self.state.compose() else {
            return;
        };
        let surfaces = displays(s.candidates());

        self.sink.set_candidates(&surfaces);
        self.sink.select_candidate_highlight(Some(s.cursor()));
        self.sink.set_composing_display(&s.selected().display);
        self.sink.set_space_action(SpaceAction::Next);
    }

    /// Cursor moved within an unchanged candidate list.
    pub(super) fn render_cursor(&mut self) {
        let Some(Compose::Selecting(s)) = self.state.compose() else {
            return;
        };
        self.sink.select_candidate_highlight(Some(s.cursor()));
        self.sink.set_composing_display(&s.selected().display);
    }

    pub(super) fn render_keyboard(&mut self) {
        let mode = self.state.mode();
        self.sink.set_keyboard(mode, self.shift);
    }
}
