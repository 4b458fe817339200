//! Pipeline coordinator
//!
//! Drives every source through fetch, normalize, chunk, count and reduce,
//! then reduces the per-source tables into the global result. Sources run
//! concurrently; the chunks of a source are counted on a bounded pool of
//! blocking workers and joined before the source's table is reduced.
//!
//! Normalizing, chunking and counting all run off the async workers, so a
//! large body never holds up the fetches of its siblings. Every table is
//! owned by exactly one task until it is handed over at a join point, so
//! nothing here needs a lock. Results are collected by index,
//! which keeps the key order of the result stable from run to run.

use super::observer::{PipelineObserver, TracingObserver};
use super::report::{RunReport, SourceFailure, SourceOutcome, SourceStats, SourceSummary};
use super::retry::fetch_with_retry;
use super::state::SourceState;
use crate::config::PipelineConfig;
use crate::count::{count_words, merge_all, FrequencyTable};
use crate::error::{PipelineError, Result};
use crate::fetch::{Fetcher, HttpClient};
use crate::text::{chunk, normalize, Chunk};
use crate::types::Source;
use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinError};
use tracing::debug;

/// Runs the map-reduce word count over a set of sources
pub struct Coordinator<C> {
    fetcher: Fetcher<C>,
    config: PipelineConfig,
    observer: Arc<dyn PipelineObserver>,
    pub(crate) count: fn(&str) -> FrequencyTable,
}

impl<C: HttpClient> Coordinator<C> {
    pub fn new(client: C, config: PipelineConfig) -> Self {
        let fetcher = Fetcher::new(client).with_timeout(config.fetch_timeout);
        Self {
            fetcher,
            config,
            observer: Arc::new(TracingObserver),
            count: count_words,
        }
    }

    /// Report progress and failures to `observer` instead of tracing
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &Fetcher<C> {
        &self.fetcher
    }

    /// Count word frequencies across all `sources`
    ///
    /// Fails before doing any work when the source list is empty or the
    /// configuration is invalid. Otherwise always returns a report: sources
    /// that could not be fetched, or whose counting died, contribute an empty
    /// table and are listed in the report's failures.
    pub async fn run<I, S>(&self, sources: I) -> Result<RunReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<Source>,
    {
        let sources: Vec<Source> = sources.into_iter().map(Into::into).collect();
        if sources.is_empty() {
            return Err(PipelineError::invalid_input(
                "at least one source URL is required",
            ));
        }
        self.config.validate()?;

        let started = Instant::now();
        self.observer.on_run_started(sources.len());

        let workers = Arc::new(Semaphore::new(self.config.effective_workers()));
        let fetch_slots = self.config.max_concurrent_fetches.map(Semaphore::new);
        debug!(
            "Counting on {} worker(s), {} chunk(s) per source",
            self.config.effective_workers(),
            self.config.chunk_count
        );

        let outcomes = join_all(
            sources
                .iter()
                .map(|source| self.process_source(source, &workers, fetch_slots.as_ref())),
        )
        .await;

        let (tables, summaries): (Vec<FrequencyTable>, Vec<SourceSummary>) =
            outcomes.into_iter().unzip();
        let result = merge_all(tables);

        let report = RunReport {
            result,
            sources: summaries,
            top_k: self.config.top_k,
            elapsed: started.elapsed(),
        };
        self.observer
            .on_run_finished(report.succeeded(), report.failures().len());
        Ok(report)
    }

    async fn process_source(
        &self,
        source: &Source,
        workers: &Arc<Semaphore>,
        fetch_slots: Option<&Semaphore>,
    ) -> (FrequencyTable, SourceSummary) {
        let started = Instant::now();
        let mut tracker = StateTracker::new(source, self.observer.as_ref());

        tracker.advance(SourceState::Fetching);
        let (fetched, attempts) = fetch_with_retry(
            &self.fetcher,
            source,
            &self.config.retry,
            fetch_slots,
            self.observer.as_ref(),
        )
        .await;
        let raw = match fetched {
            Ok(raw) => raw,
            Err(e) => return self.fail(tracker, SourceFailure::fetch(&e, attempts), started),
        };

        tracker.advance(SourceState::Normalizing);
        let raw_bytes = raw.len();
        let text = match task::spawn_blocking(move || normalize(&raw)).await {
            Ok(text) => text,
            Err(e) => {
                let failure =
                    SourceFailure::internal(source, format!("normalization task failed: {e}"));
                return self.fail(tracker, failure, started);
            }
        };

        tracker.advance(SourceState::Chunking);
        let (shared, pieces) = (text.clone(), self.config.chunk_count);
        let chunks = match task::spawn_blocking(move || chunk(&shared, pieces)).await {
            Ok(chunks) => chunks,
            Err(e) => {
                let failure =
                    SourceFailure::internal(source, format!("chunking task failed: {e}"));
                return self.fail(tracker, failure, started);
            }
        };
        let chunk_count = chunks.len();

        let table = if chunks.is_empty() {
            FrequencyTable::new()
        } else {
            tracker.advance(SourceState::Counting);
            match count_on_pool(chunks, workers, self.count).await {
                Ok(tables) => merge_all(tables),
                Err(e) => {
                    let failure =
                        SourceFailure::internal(source, format!("counting task failed: {e}"));
                    return self.fail(tracker, failure, started);
                }
            }
        };
        tracker.advance(SourceState::Reduced);
        debug!(
            "Counted {} token(s) in {} chunk(s) for {}",
            table.total(),
            chunk_count,
            source
        );

        let summary = SourceSummary {
            url: source.clone(),
            outcome: SourceOutcome::Completed(SourceStats {
                raw_bytes,
                normalized_bytes: text.len(),
                chunks: chunk_count,
                tokens: table.total(),
                distinct_words: table.len(),
            }),
            duration: started.elapsed(),
        };
        tracker.advance(SourceState::Done);
        self.observer.on_source_finished(&summary);
        (table, summary)
    }

    fn fail(
        &self,
        mut tracker: StateTracker<'_>,
        failure: SourceFailure,
        started: Instant,
    ) -> (FrequencyTable, SourceSummary) {
        tracker.advance(SourceState::Failed);
        self.observer.on_failure(&failure);

        let summary = SourceSummary {
            url: failure.url.clone(),
            outcome: SourceOutcome::Failed(failure),
            duration: started.elapsed(),
        };
        tracker.advance(SourceState::Done);
        self.observer.on_source_finished(&summary);
        (FrequencyTable::new(), summary)
    }
}

/// Count every chunk on the blocking pool, at most `workers` at a time
///
/// All chunks are dispatched at once and joined in chunk order. If any task
/// dies the whole batch is an error; no partial tables are returned.
///
/// A permit lives inside its blocking task, so tasks left running after a
/// failed batch still count against `workers`.
async fn count_on_pool(
    chunks: Vec<Chunk>,
    workers: &Arc<Semaphore>,
    count: fn(&str) -> FrequencyTable,
) -> std::result::Result<Vec<FrequencyTable>, JoinError> {
    let jobs = chunks.into_iter().map(|chunk| async move {
        let permit = Arc::clone(workers).acquire_owned().await.ok();
        task::spawn_blocking(move || {
            let _permit = permit;
            count(chunk.as_str())
        })
        .await
    });
    try_join_all(jobs).await
}

/// Tracks one source's state and reports each step
struct StateTracker<'a> {
    source: &'a Source,
    state: SourceState,
    observer: &'a dyn PipelineObserver,
}

impl<'a> StateTracker<'a> {
    fn new(source: &'a Source, observer: &'a dyn PipelineObserver) -> Self {
        observer.on_transition(source, SourceState::Pending);
        Self {
            source,
            state: SourceState::Pending,
            observer,
        }
    }

    fn advance(&mut self, next: SourceState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {} for {}",
            self.state,
            next,
            self.source
        );
        self.state = next;
        self.observer.on_transition(self.source, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::fetch::FetchCause;
    use crate::pipeline::FailureKind;
    use std::time::Duration;
    use crate::testing::{MockHttpClient, ObservedEvent, RecordingObserver};

    fn config(chunk_count: usize) -> PipelineConfig {
        PipelineConfig {
            chunk_count,
            counting_workers: Some(2),
            ..Default::default()
        }
    }

    fn count_or_panic(text: &str) -> FrequencyTable {
        if text.contains("boom") {
            panic!("poisoned chunk");
        }
        count_words(text)
    }

    fn count_slowly_or_panic(text: &str) -> FrequencyTable {
        if text.contains("slow") {
            std::thread::sleep(Duration::from_millis(300));
        }
        count_or_panic(text)
    }

    #[tokio::test]
    async fn test_count_on_pool_keeps_chunk_order() {
        let text = normalize("one two three four five six seven eight");
        let chunks = chunk(&text, 4);
        let workers = Arc::new(Semaphore::new(1));

        let tables = count_on_pool(chunks.clone(), &workers, count_words)
            .await
            .unwrap();

        assert_eq!(tables.len(), 4);
        for (table, chunk) in tables.iter().zip(&chunks) {
            assert_eq!(*table, count_words(chunk.as_str()));
        }
    }

    #[tokio::test]
    async fn test_count_on_pool_surfaces_panics() {
        let text = normalize("fine words here boom and more fine words");
        let chunks = chunk(&text, 2);
        let workers = Arc::new(Semaphore::new(2));

        let err = count_on_pool(chunks, &workers, count_or_panic)
            .await
            .unwrap_err();

        assert!(err.is_panic());
    }

    #[tokio::test]
    async fn test_running_tasks_keep_permits_after_failed_batch() {
        let text = normalize("boom slow");
        let chunks = chunk(&text, 2);
        let workers = Arc::new(Semaphore::new(2));

        let err = count_on_pool(chunks, &workers, count_slowly_or_panic)
            .await
            .unwrap_err();

        assert!(err.is_panic());
        assert_eq!(workers.available_permits(), 1);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(workers.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_panicking_count_fails_only_that_source() {
        let client = MockHttpClient::new()
            .with_body("http://boom.example/", "all is fine until boom")
            .with_body("http://calm.example/", "calm calm sea");
        let observer = Arc::new(RecordingObserver::new());
        let mut coordinator =
            Coordinator::new(client, config(2)).with_observer(observer.clone());
        coordinator.count = count_or_panic;

        let report = coordinator
            .run(["http://boom.example/", "http://calm.example/"])
            .await
            .unwrap();

        assert_eq!(report.result, count_words("calm calm sea"));
        assert_eq!(report.result.get("fine"), 0);
        assert!(report.has_internal_failures());

        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].url.as_str(), "http://boom.example/");
        assert_eq!(failures[0].kind, FailureKind::Internal);

        use SourceState::*;
        assert_eq!(
            observer.states_of("http://boom.example/"),
            vec![Pending, Fetching, Normalizing, Chunking, Counting, Failed, Done]
        );
        assert!(observer.events().contains(&ObservedEvent::Failure {
            url: "http://boom.example/".to_string(),
            kind: FailureKind::Internal,
        }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_retry_backoff_does_not_hold_fetch_slot() {
        let client = MockHttpClient::new()
            .with_status("http://flaky.example/", 503)
            .with_body("http://flaky.example/", "late")
            .with_body("http://steady.example/", "steady");
        let coordinator = Coordinator::new(
            client,
            PipelineConfig {
                max_concurrent_fetches: Some(1),
                retry: RetryPolicy {
                    max_retries: 1,
                    initial_delay: Duration::from_millis(400),
                },
                ..config(1)
            },
        );

        let report = coordinator
            .run(["http://flaky.example/", "http://steady.example/"])
            .await
            .unwrap();

        assert_eq!(report.result.get("late"), 1);
        assert_eq!(report.result.get("steady"), 1);
        assert!(report.sources[1].duration < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_rejects_empty_source_list() {
        let coordinator = Coordinator::new(MockHttpClient::new(), config(4));

        let err = coordinator.run(Vec::<Source>::new()).await.unwrap_err();

        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_rejects_zero_chunks_before_fetching() {
        let client = Arc::new(MockHttpClient::new().with_body("http://a.example/", "text"));
        let coordinator = Coordinator::new(Arc::clone(&client), config(0));

        let err = coordinator.run(["http://a.example/"]).await.unwrap_err();

        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_transitions_for_success_and_failure() {
        let client = MockHttpClient::new()
            .with_body("http://ok.example/", "Hello hello")
            .with_error("http://down.example/", FetchCause::Transport("refused".into()));
        let observer = Arc::new(RecordingObserver::new());
        let coordinator =
            Coordinator::new(client, config(1)).with_observer(observer.clone());

        coordinator
            .run(["http://ok.example/", "http://down.example/"])
            .await
            .unwrap();

        use SourceState::*;
        assert_eq!(
            observer.states_of("http://ok.example/"),
            vec![Pending, Fetching, Normalizing, Chunking, Counting, Reduced, Done]
        );
        assert_eq!(
            observer.states_of("http://down.example/"),
            vec![Pending, Fetching, Failed, Done]
        );
        assert!(observer.events().contains(&ObservedEvent::RunFinished {
            succeeded: 1,
            failed: 1
        }));
    }

    #[tokio::test]
    async fn test_empty_text_skips_counting() {
        let client = MockHttpClient::new().with_body("http://blank.example/", "?!...,,,");
        let observer = Arc::new(RecordingObserver::new());
        let coordinator =
            Coordinator::new(client, config(4)).with_observer(observer.clone());

        let report = coordinator.run(["http://blank.example/"]).await.unwrap();

        assert!(report.result.is_empty());
        assert_eq!(report.succeeded(), 1);
        assert!(!observer
            .states_of("http://blank.example/")
            .contains(&SourceState::Counting));
        match &report.sources[0].outcome {
            SourceOutcome::Completed(stats) => assert_eq!(stats.chunks, 0),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_reported_to_observer() {
        let client = MockHttpClient::new().with_status("http://gone.example/", 410);
        let observer = Arc::new(RecordingObserver::new());
        let coordinator =
            Coordinator::new(client, config(4)).with_observer(observer.clone());

        let report = coordinator.run(["http://gone.example/"]).await.unwrap();

        assert!(report.result.is_empty());
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].kind, FailureKind::Fetch);
        assert!(observer.events().iter().any(|e| matches!(
            e,
            ObservedEvent::Failure { url, .. } if url == "http://gone.example/"
        )));
    }

    #[tokio::test]
    async fn test_bounded_fetches_still_process_everything() {
        let client = MockHttpClient::new()
            .with_body("http://a.example/", "a a")
            .with_body("http://b.example/", "b")
            .with_body("http://c.example/", "a c");
        let coordinator = Coordinator::new(
            client,
            PipelineConfig {
                max_concurrent_fetches: Some(1),
                ..config(1)
            },
        );

        let report = coordinator
            .run(["http://a.example/", "http://b.example/", "http://c.example/"])
            .await
            .unwrap();

        assert_eq!(report.result.get("a"), 3);
        assert_eq!(report.result.get("b"), 1);
        assert_eq!(report.result.get("c"), 1);
    }
}
