//! Fakes shared by the unit tests. Only compiled under `cfg(test)`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::data::ItemSource;
use crate::launcher::{LaunchError, LinkLauncher};
use crate::model::{Story, StoryList};

pub fn story(score: i64, title: &str, url: &str) -> Story {
    Story {
        title: title.to_string(),
        score,
        url: url.to_string(),
        ..Story::default()
    }
}

/// Two stories, cursor on the first.
pub fn sample_list() -> StoryList {
    StoryList::new(vec![story(100, "A", "http://a"), story(50, "B", "http://b")])
}

/// In-memory item source that records what it was asked for.
#[derive(Default)]
pub struct FakeSource {
    ids: Vec<i64>,
    fail_on: Option<i64>,
    fail_ids: bool,
    jitter: bool,
    id_calls: AtomicUsize,
    fetched: Mutex<Vec<i64>>,
}

impl FakeSource {
    pub fn with_ids<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, id: i64) -> Self {
        self.fail_on = Some(id);
        self
    }

    pub fn failing_ids(mut self) -> Self {
        self.fail_ids = true;
        self
    }

    /// Makes item fetches finish out of order.
    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    pub fn id_calls(&self) -> usize {
        self.id_calls.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<i64> {
        self.fetched.lock().map(|ids| ids.clone()).unwrap_or_default()
    }
}

impl ItemSource for FakeSource {
    fn list_top_identifiers(&self) -> Result<Vec<i64>> {
        self.id_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_ids {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.ids.clone())
    }

    fn fetch_item(&self, id: i64) -> Result<Story> {
        if self.jitter {
            let delay = (id.unsigned_abs() * 7919) % 13;
            thread::sleep(Duration::from_micros(delay * 200));
        }
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(id);
        }
        if self.fail_on == Some(id) {
            return Err(anyhow!("item {id} not found"));
        }
        Ok(Story {
            id,
            ..story(id * 10, &format!("story {id}"), &format!("http://example.com/{id}"))
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LaunchOutcome {
    #[default]
    Succeed,
    Fail,
    Unsupported,
}

/// Launcher that records every URL it is handed.
#[derive(Debug, Clone, Default)]
pub struct FakeLauncher {
    outcome: LaunchOutcome,
    opened: Arc<Mutex<Vec<String>>>,
}

impl FakeLauncher {
    pub fn failing() -> Self {
        Self {
            outcome: LaunchOutcome::Fail,
            ..Self::default()
        }
    }

    pub fn unsupported() -> Self {
        Self {
            outcome: LaunchOutcome::Unsupported,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

impl LinkLauncher for FakeLauncher {
    fn open(&self, url: &str) -> Result<(), LaunchError> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
        match self.outcome {
            LaunchOutcome::Succeed => Ok(()),
            LaunchOutcome::Fail => Err(LaunchError::Failed {
                command: "fake-open".to_string(),
                status: "exit status: 3".to_string(),
            }),
            LaunchOutcome::Unsupported => Err(LaunchError::Unsupported("testos".to_string())),
        }
    }
}
