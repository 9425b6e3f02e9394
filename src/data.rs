use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::unbounded;

use crate::hackernews;
use crate::model::Story;

/// Largest number of stories the front page may be asked for.
pub const MAX_STORY_COUNT: usize = 500;

pub trait ItemSource: Send + Sync {
    /// Ranked identifiers, best first.
    fn list_top_identifiers(&self) -> Result<Vec<i64>>;
    fn fetch_item(&self, id: i64) -> Result<Story>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("requested {requested} stories but at most {max} are available")]
    CountTooLarge { requested: usize, max: usize },
    #[error("requested {requested} stories but the feed only lists {available}")]
    NotEnoughStories { requested: usize, available: usize },
}

pub struct HackerNewsSource {
    client: Arc<hackernews::Client>,
}

impl HackerNewsSource {
    pub fn new(client: Arc<hackernews::Client>) -> Self {
        Self { client }
    }
}

impl ItemSource for HackerNewsSource {
    fn list_top_identifiers(&self) -> Result<Vec<i64>> {
        self.client.story_ids().context("fetch story ids")
    }

    fn fetch_item(&self, id: i64) -> Result<Story> {
        self.client.get_item(id).map(Story::from)
    }
}

pub fn check_count(count: usize) -> Result<(), FetchError> {
    if count > MAX_STORY_COUNT {
        return Err(FetchError::CountTooLarge {
            requested: count,
            max: MAX_STORY_COUNT,
        });
    }
    Ok(())
}

/// Fetches the first `count` stories of `source` in rank order.
///
/// The count is checked before the source is touched. With more than one
/// worker the items are fetched concurrently, but nothing is returned until
/// every item has arrived, and any single failure fails the whole call.
pub fn fetch_top<S>(source: &S, count: usize, workers: usize) -> Result<Vec<Story>>
where
    S: ItemSource + ?Sized,
{
    check_count(count)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let ids = source.list_top_identifiers()?;
    if ids.len() < count {
        return Err(FetchError::NotEnoughStories {
            requested: count,
            available: ids.len(),
        }
        .into());
    }
    let ids = &ids[..count];

    log::debug!("fetching {} stories with {} workers", ids.len(), workers.max(1));
    if workers <= 1 {
        fetch_sequential(source, ids)
    } else {
        fetch_concurrent(source, ids, workers)
    }
}

fn fetch_sequential<S>(source: &S, ids: &[i64]) -> Result<Vec<Story>>
where
    S: ItemSource + ?Sized,
{
    ids.iter()
        .enumerate()
        .map(|(rank, id)| fetch_ranked(source, rank, *id))
        .collect()
}

fn fetch_concurrent<S>(source: &S, ids: &[i64], workers: usize) -> Result<Vec<Story>>
where
    S: ItemSource + ?Sized,
{
    let (job_tx, job_rx) = unbounded::<(usize, i64)>();
    for job in ids.iter().copied().enumerate() {
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let (result_tx, result_rx) = unbounded::<(usize, Result<Story>)>();
    let failed = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..workers.min(ids.len()) {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let failed = &failed;
            scope.spawn(move || {
                for (rank, id) in job_rx.iter() {
                    if failed.load(Ordering::Relaxed) {
                        break;
                    }
                    let result = fetch_ranked(source, rank, id);
                    if result.is_err() {
                        failed.store(true, Ordering::Relaxed);
                    }
                    if result_tx.send((rank, result)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<Story>> = vec![None; ids.len()];
    let mut first_error: Option<(usize, anyhow::Error)> = None;
    for (rank, result) in result_rx.iter() {
        match result {
            Ok(story) => slots[rank] = Some(story),
            Err(err) => {
                if first_error.as_ref().map_or(true, |(seen, _)| rank < *seen) {
                    first_error = Some((rank, err));
                }
            }
        }
    }
    if let Some((_, err)) = first_error {
        return Err(err);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(rank, slot)| slot.ok_or_else(|| anyhow!("story at rank {} was never fetched", rank + 1)))
        .collect()
}

fn fetch_ranked<S>(source: &S, rank: usize, id: i64) -> Result<Story>
where
    S: ItemSource + ?Sized,
{
    source
        .fetch_item(id)
        .with_context(|| format!("fetch story {id} (rank {})", rank + 1))
}
