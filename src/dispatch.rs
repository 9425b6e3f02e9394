//! Key handling for the story list.
//!
//! [`dispatch`] is a pure transition: it moves the cursor or hands back an
//! [`Effect`] for the shell to carry out, and never touches the terminal or
//! the browser itself.

use serde::{Deserialize, Serialize};

use crate::model::StoryList;

/// A single key press, already stripped of terminal specifics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Confirm,
    Esc,
    CtrlC,
    Char(char),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LaunchUrl(String),
    Terminate,
}

/// Which keys end the session.
///
/// `Standard` suits screens that accept typed text; `WithQ` also quits on a
/// plain `q`, which is only safe when no text entry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuitKeys {
    Standard,
    #[default]
    WithQ,
}

impl QuitKeys {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(QuitKeys::Standard),
            "with_q" | "with-q" | "q" => Some(QuitKeys::WithQ),
            _ => None,
        }
    }

    pub fn quits(self, input: Input) -> bool {
        match input {
            Input::Esc | Input::CtrlC => true,
            Input::Char('q') => self == QuitKeys::WithQ,
            _ => false,
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            QuitKeys::Standard => "ESC",
            QuitKeys::WithQ => "ESC or q",
        }
    }
}

pub fn dispatch(list: &mut StoryList, input: Input, quit_keys: QuitKeys) -> Option<Effect> {
    if quit_keys.quits(input) {
        return Some(Effect::Terminate);
    }
    match input {
        Input::Up => {
            list.move_up();
            None
        }
        Input::Down => {
            list.move_down();
            None
        }
        // An empty list has nothing to open.
        Input::Confirm => list
            .current()
            .map(|story| Effect::LaunchUrl(story.url.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_list, story};

    #[test]
    fn arrows_move_cursor_without_effect() {
        let mut list = sample_list();
        assert_eq!(dispatch(&mut list, Input::Down, QuitKeys::Standard), None);
        assert_eq!(list.cursor(), Some(1));
        assert_eq!(dispatch(&mut list, Input::Up, QuitKeys::Standard), None);
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn confirm_launches_current_url_and_leaves_model_alone() {
        let mut list = sample_list();
        dispatch(&mut list, Input::Down, QuitKeys::WithQ);
        let before = list.clone();
        let effect = dispatch(&mut list, Input::Confirm, QuitKeys::WithQ);
        assert_eq!(effect, Some(Effect::LaunchUrl("http://b".to_string())));
        assert_eq!(list, before);
        assert_eq!(list.cursor(), Some(1));
    }

    #[test]
    fn confirm_forwards_empty_url_unchanged() {
        let mut list = StoryList::new(vec![story(3, "Ask HN: anything", "")]);
        assert_eq!(
            dispatch(&mut list, Input::Confirm, QuitKeys::Standard),
            Some(Effect::LaunchUrl(String::new()))
        );
    }

    #[test]
    fn confirm_on_empty_list_is_noop() {
        let mut list = StoryList::new(Vec::new());
        assert_eq!(dispatch(&mut list, Input::Confirm, QuitKeys::WithQ), None);
    }

    #[test]
    fn standard_quit_keys() {
        let mut list = sample_list();
        for input in [Input::Esc, Input::CtrlC] {
            assert_eq!(
                dispatch(&mut list, input, QuitKeys::Standard),
                Some(Effect::Terminate)
            );
        }
        assert_eq!(dispatch(&mut list, Input::Char('q'), QuitKeys::Standard), None);
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn q_quits_when_enabled() {
        let mut list = sample_list();
        assert_eq!(
            dispatch(&mut list, Input::Char('q'), QuitKeys::WithQ),
            Some(Effect::Terminate)
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut list = sample_list();
        let before = list.clone();
        for input in [Input::Other, Input::Char('x'), Input::Char('Q')] {
            assert_eq!(dispatch(&mut list, input, QuitKeys::WithQ), None);
        }
        assert_eq!(list, before);
    }

    #[test]
    fn quit_keys_parse() {
        assert_eq!(QuitKeys::parse("standard"), Some(QuitKeys::Standard));
        assert_eq!(QuitKeys::parse("with-q"), Some(QuitKeys::WithQ));
        assert_eq!(QuitKeys::parse("none"), None);
    }
}
