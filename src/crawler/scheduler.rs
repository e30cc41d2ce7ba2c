//! Batched, concurrent discovery
//!
//! Schedule links are cut into contiguous batches and handed to a fixed pool
//! of worker tasks through a bounded queue. Each worker builds its own
//! renderer (its own HTTP session), crawls every link of a batch in order,
//! and sends the batch's stats links back tagged with the batch index.
//! Workers share nothing but the two channels.

use crate::crawler::discovery::{
    PageCrawler, DEFAULT_FIRST_STAGE_FILTER, DEFAULT_SECOND_STAGE_SELECTOR,
};
use crate::crawler::renderer::RendererFactory;
use crate::{HarvestError, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Splits `links` into contiguous batches of `batch_size`; the last may be shorter
///
/// # Panics
///
/// Panics if `batch_size` is zero. [`BatchScheduler::run`] validates it first.
pub fn create_batches<T: Clone>(links: &[T], batch_size: usize) -> Vec<Vec<T>> {
    links.chunks(batch_size).map(<[T]>::to_vec).collect()
}

type Job = (usize, Vec<String>);
type JobOutcome = (usize, Result<Vec<String>>);

/// Runs [`PageCrawler`] over batches of schedule links on a worker pool
pub struct BatchScheduler<F> {
    factory: Arc<F>,
    first_stage_filter: String,
    second_stage_selector: String,
}

impl<F: RendererFactory> BatchScheduler<F> {
    /// Creates a scheduler whose workers build renderers with `factory`
    pub fn new(factory: F) -> Self {
        Self {
            factory: Arc::new(factory),
            first_stage_filter: DEFAULT_FIRST_STAGE_FILTER.to_string(),
            second_stage_selector: DEFAULT_SECOND_STAGE_SELECTOR.to_string(),
        }
    }

    /// Overrides the discovery filters passed to every worker's crawler
    pub fn with_filters(
        mut self,
        first_stage_filter: impl Into<String>,
        second_stage_selector: impl Into<String>,
    ) -> Self {
        self.first_stage_filter = first_stage_filter.into();
        self.second_stage_selector = second_stage_selector.into();
        self
    }

    /// Discovers stats links for every schedule link, one batch per worker job
    ///
    /// # Arguments
    ///
    /// * `links` - Schedule page URLs
    /// * `batch_size` - Links per batch; required and non-zero
    /// * `worker_count` - Concurrent workers; required and non-zero
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Vec<String>>)` - Stats links per batch, in batch order
    /// * `Err(HarvestError::BatchConfig)` - A size was missing or zero
    /// * `Err(HarvestError::BatchFailed)` - A batch failed; the results of the
    ///   batches that completed are carried in the error
    pub async fn run(
        &self,
        links: &[String],
        batch_size: Option<usize>,
        worker_count: Option<usize>,
    ) -> Result<Vec<Vec<String>>> {
        let (batch_size, worker_count) = match (batch_size, worker_count) {
            (Some(size), Some(workers)) if size > 0 && workers > 0 => (size, workers),
            _ => {
                return Err(HarvestError::BatchConfig(format!(
                    "batch size and worker count must both be positive, got {:?} and {:?}",
                    batch_size, worker_count
                )))
            }
        };

        let batches = create_batches(links, batch_size);
        let total = batches.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let workers = worker_count.min(total);
        tracing::info!(
            "Crawling {} links in {} batches of up to {} with {} workers",
            links.len(),
            total,
            batch_size,
            workers
        );

        let (job_tx, job_rx) = mpsc::channel::<Job>(workers);
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<JobOutcome>();

        let mut pool = JoinSet::new();
        for worker_id in 0..workers {
            pool.spawn(worker(
                worker_id,
                Arc::clone(&self.factory),
                Arc::clone(&job_rx),
                outcome_tx.clone(),
                self.first_stage_filter.clone(),
                self.second_stage_selector.clone(),
            ));
        }
        drop(outcome_tx);

        for job in batches.into_iter().enumerate() {
            if job_tx.send(job).await.is_err() {
                return Err(HarvestError::Worker(
                    "every worker exited before all batches were queued".to_string(),
                ));
            }
        }
        drop(job_tx);

        let mut outcomes: Vec<Option<Result<Vec<String>>>> = (0..total).map(|_| None).collect();
        while let Some((index, outcome)) = outcome_rx.recv().await {
            outcomes[index] = Some(outcome);
        }

        while let Some(joined) = pool.join_next().await {
            joined.map_err(|e| HarvestError::Worker(e.to_string()))?;
        }

        collect_outcomes(outcomes)
    }
}

/// Pulls batches off the queue until it closes
async fn worker<F: RendererFactory>(
    worker_id: usize,
    factory: Arc<F>,
    jobs: Arc<Mutex<mpsc::Receiver<Job>>>,
    outcomes: mpsc::UnboundedSender<JobOutcome>,
    first_stage_filter: String,
    second_stage_selector: String,
) {
    let crawler = factory.create().map(PageCrawler::new);

    loop {
        let next = jobs.lock().await.recv().await;
        let Some((index, batch)) = next else {
            break;
        };
        tracing::debug!("Worker {} took batch {} ({} links)", worker_id, index, batch.len());

        let outcome = match &crawler {
            Ok(crawler) => {
                crawler
                    .discover_all(&batch, &first_stage_filter, &second_stage_selector)
                    .await
            }
            Err(e) => Err(HarvestError::Worker(format!(
                "worker {} could not build a renderer: {}",
                worker_id, e
            ))),
        };

        if let Err(e) = &outcome {
            tracing::warn!("Batch {} failed: {}", index, e);
        }

        if outcomes.send((index, outcome)).is_err() {
            break;
        }
    }
}

/// Orders batch results, failing on the first batch that did not succeed
fn collect_outcomes(outcomes: Vec<Option<Result<Vec<String>>>>) -> Result<Vec<Vec<String>>> {
    let total = outcomes.len();
    let mut completed = Vec::with_capacity(total);
    let mut failure = None;

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Some(Ok(links)) => completed.push((index, links)),
            Some(Err(e)) => {
                if failure.is_none() {
                    failure = Some((index, e));
                }
            }
            None => {
                if failure.is_none() {
                    failure = Some((
                        index,
                        HarvestError::Worker(format!("batch {} was never processed", index)),
                    ));
                }
            }
        }
    }

    match failure {
        None => Ok(completed.into_iter().map(|(_, links)| links).collect()),
        Some((batch, source)) => Err(HarvestError::BatchFailed {
            batch,
            total,
            completed: completed.len(),
            partial: completed,
            source: Box::new(source),
        }),
    }
}
