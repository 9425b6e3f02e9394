use crate::dispatch::QuitKeys;
use crate::model::StoryList;

pub const DEFAULT_HEADER: &str = "Hacker News Front Page";
pub const CURSOR_MARKER: &str = "> ";
const BLANK_MARKER: &str = "  ";

/// Static text around the list; none of it depends on the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub header: String,
    pub quit_keys: QuitKeys,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            quit_keys: QuitKeys::default(),
        }
    }
}

impl ViewOptions {
    pub fn header_lines(&self) -> [String; 2] {
        let underline = "-".repeat(self.header.chars().count());
        [self.header.clone(), underline]
    }

    pub fn footer(&self) -> String {
        format!("Press ENTER to open, {} to quit", self.quit_keys.hint())
    }
}

/// One line per story, in list order, with the cursor row marked.
pub fn story_lines(list: &StoryList) -> Vec<String> {
    let cursor = list.cursor();
    list.items()
        .iter()
        .enumerate()
        .map(|(idx, story)| {
            let marker = if Some(idx) == cursor {
                CURSOR_MARKER
            } else {
                BLANK_MARKER
            };
            format!("{marker}[{}] {}", story.score, story.title)
        })
        .collect()
}

pub fn render(list: &StoryList, options: &ViewOptions) -> String {
    let mut out = String::new();
    for line in options.header_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    for line in story_lines(list) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&options.footer());
    out.push('\n');
    out
}
