use crate::hackernews;

/// One entry of the front page as the UI sees it.
///
/// `author`, `time` and `descendants` are carried along from the source but
/// never interpreted by the list, dispatcher or renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Story {
    pub id: i64,
    pub title: String,
    pub score: i64,
    pub url: String,
    pub author: String,
    pub time: i64,
    pub descendants: i64,
}

impl From<hackernews::Item> for Story {
    fn from(item: hackernews::Item) -> Self {
        Story {
            id: item.id,
            title: item.title.unwrap_or_default(),
            score: item.score.unwrap_or(0),
            url: item.url.unwrap_or_default(),
            author: item.by.unwrap_or_default(),
            time: item.time.unwrap_or(0),
            descendants: item.descendants.unwrap_or(0),
        }
    }
}

/// The ranked stories plus the highlighted row.
///
/// Items keep the order they were supplied in and are never modified; the
/// cursor is the only thing that moves, and it stays within
/// `0..items.len()` whenever the list is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryList {
    items: Vec<Story>,
    cursor: usize,
}

impl StoryList {
    pub fn new(items: Vec<Story>) -> Self {
        Self { items, cursor: 0 }
    }

    pub fn items(&self) -> &[Story] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cursor position, `None` when there is nothing to point at.
    pub fn cursor(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn current(&self) -> Option<&Story> {
        self.items.get(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::story;

    #[test]
    fn move_down_saturates_at_last_item() {
        let mut list = StoryList::new(vec![story(1, "a", ""), story(2, "b", ""), story(3, "c", "")]);
        for _ in 0..10 {
            list.move_down();
            assert!(list.cursor().unwrap() <= 2);
        }
        assert_eq!(list.cursor(), Some(2));
        assert_eq!(list.current().unwrap().title, "c");
    }

    #[test]
    fn move_up_saturates_at_zero() {
        let mut list = StoryList::new(vec![story(1, "a", ""), story(2, "b", "")]);
        list.move_down();
        for _ in 0..5 {
            list.move_up();
        }
        assert_eq!(list.cursor(), Some(0));
        assert_eq!(list.current().unwrap().title, "a");
    }

    #[test]
    fn empty_list_has_no_cursor() {
        let mut list = StoryList::new(Vec::new());
        list.move_down();
        list.move_up();
        assert_eq!(list.cursor(), None);
        assert!(list.current().is_none());
    }

    #[test]
    fn story_from_item_fills_missing_fields() {
        let item: hackernews::Item =
            serde_json::from_str(r#"{"id": 7, "type": "story", "title": "Ask HN: hi"}"#).unwrap();
        let story = Story::from(item);
        assert_eq!(story.id, 7);
        assert_eq!(story.title, "Ask HN: hi");
        assert_eq!(story.score, 0);
        assert!(story.url.is_empty());
    }
}
