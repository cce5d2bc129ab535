//! Replica orchestration
//!
//! Sends the same request to the oracle several times in parallel. Each
//! replica retries on its own under the [`BackoffPolicy`]; the orchestrator
//! is the single consumer of completions and reports progress as they land.

use crate::config::BackoffPolicy;
use crate::ports::event_log::{EventLog, NoEventLog, PipelineEvent, event_types};
use crate::ports::oracle_gateway::{GatewayError, OracleGateway, OracleRequest};
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::errors::AnalysisError;
use score_domain::DomainError;
use serde_json::json;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Failure messages carried by [`AnalysisError::AllReplicasFailed`]
const FAILURE_SAMPLE_SIZE: usize = 3;

/// A replica that exhausted its attempts
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicaFailure {
    /// 1-based replica number, `None` if the task itself died
    pub replica: Option<usize>,
    pub attempts: u32,
    pub error: String,
}

/// Outcome of a replica run with at least one success
#[derive(Debug, Clone)]
pub struct ReplicaOutcome<T> {
    /// Parsed answers in completion order
    pub results: Vec<T>,
    pub failures: Vec<ReplicaFailure>,
}

impl<T> ReplicaOutcome<T> {
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Runs replicas against an oracle gateway
pub struct ReplicaOrchestrator<G: OracleGateway + 'static> {
    gateway: Arc<G>,
    backoff: BackoffPolicy,
    call_timeout: Option<Duration>,
    events: Arc<dyn EventLog>,
}

impl<G: OracleGateway + 'static> ReplicaOrchestrator<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            backoff: BackoffPolicy::default(),
            call_timeout: None,
            events: Arc::new(NoEventLog),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventLog>) -> Self {
        self.events = events;
        self
    }

    /// Run `replicates` copies of `request` and parse each answer.
    ///
    /// A parse failure counts as a failed attempt. Fails only when every
    /// replica failed.
    pub async fn run<T, P>(
        &self,
        request: &OracleRequest,
        replicates: usize,
        parse: P,
        progress: &dyn ProgressNotifier,
    ) -> Result<ReplicaOutcome<T>, AnalysisError>
    where
        T: Send + 'static,
        P: Fn(&str) -> Result<T, DomainError> + Send + Sync + Copy + 'static,
    {
        let total = replicates.max(1);
        info!("Starting {} replicas against {}", total, request.content);
        notify(progress, |p| p.on_replicas_start(total));

        let mut join_set = JoinSet::new();

        for replica in 1..=total {
            let gateway = Arc::clone(&self.gateway);
            let events = Arc::clone(&self.events);
            let request = request.clone();
            let backoff = self.backoff;
            let call_timeout = self.call_timeout;

            join_set.spawn(async move {
                let (attempts, result) = call_with_retry(
                    gateway.as_ref(),
                    &request,
                    backoff,
                    call_timeout,
                    events.as_ref(),
                    replica,
                    parse,
                )
                .await;
                (replica, attempts, result)
            });
        }

        let mut outcome = ReplicaOutcome {
            results: Vec::with_capacity(total),
            failures: Vec::new(),
        };
        let mut completed = 0;

        while let Some(joined) = join_set.join_next().await {
            completed += 1;
            let success = match joined {
                Ok((replica, attempts, Ok(value))) => {
                    info!("Replica {} succeeded after {} attempt(s)", replica, attempts);
                    self.events.record(PipelineEvent::new(
                        event_types::REPLICA_SUCCEEDED,
                        json!({ "replica": replica, "attempts": attempts }),
                    ));
                    outcome.results.push(value);
                    true
                }
                Ok((replica, attempts, Err(e))) => {
                    warn!("Replica {} failed after {} attempt(s): {}", replica, attempts, e);
                    self.events.record(PipelineEvent::new(
                        event_types::REPLICA_FAILED,
                        json!({ "replica": replica, "attempts": attempts, "error": e.to_string() }),
                    ));
                    outcome.failures.push(ReplicaFailure {
                        replica: Some(replica),
                        attempts,
                        error: e.to_string(),
                    });
                    false
                }
                Err(e) => {
                    warn!("Replica task join error: {}", e);
                    self.events.record(PipelineEvent::new(
                        event_types::REPLICA_FAILED,
                        json!({ "replica": null, "error": e.to_string() }),
                    ));
                    outcome.failures.push(ReplicaFailure {
                        replica: None,
                        attempts: 0,
                        error: e.to_string(),
                    });
                    false
                }
            };
            notify(progress, |p| p.on_replica_complete(completed, total, success));
        }

        let succeeded = outcome.results.len();
        notify(progress, |p| p.on_replicas_finished(succeeded, total));

        if succeeded == 0 {
            return Err(AnalysisError::AllReplicasFailed {
                attempted: total,
                sample: outcome
                    .failures
                    .iter()
                    .take(FAILURE_SAMPLE_SIZE)
                    .map(|f| f.error.clone())
                    .collect(),
            });
        }

        info!("{} of {} replicas succeeded", succeeded, total);
        Ok(outcome)
    }
}

/// One replica: call, parse, retry retryable failures until the policy
/// runs out. Returns the number of attempts made alongside the result.
async fn call_with_retry<G, T, P>(
    gateway: &G,
    request: &OracleRequest,
    backoff: BackoffPolicy,
    call_timeout: Option<Duration>,
    events: &dyn EventLog,
    replica: usize,
    parse: P,
) -> (u32, Result<T, GatewayError>)
where
    G: OracleGateway + ?Sized,
    P: Fn(&str) -> Result<T, DomainError>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        let result = match call_once(gateway, request, call_timeout).await {
            Ok(text) => {
                parse(&text).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(value) => return (attempt, Ok(value)),
            Err(e) if e.is_retryable() && backoff.should_retry(attempt) => {
                let delay = backoff.delay_for(attempt, rand::random::<f64>());
                debug!(
                    "Replica {} attempt {} failed ({}), retrying in {:?}",
                    replica, attempt, e, delay
                );
                events.record(PipelineEvent::new(
                    event_types::REPLICA_RETRY,
                    json!({
                        "replica": replica,
                        "attempt": attempt,
                        "error": e.to_string(),
                        "delay_ms": delay.as_millis() as u64,
                    }),
                ));
                tokio::time::sleep(delay).await;
            }
            Err(e) => return (attempt, Err(e)),
        }
    }
}

async fn call_once<G: OracleGateway + ?Sized>(
    gateway: &G,
    request: &OracleRequest,
    call_timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    match call_timeout {
        Some(limit) => tokio::time::timeout(limit, gateway.respond(request))
            .await
            .map_err(|_| GatewayError::Timeout)?,
        None => gateway.respond(request).await,
    }
}

/// Invoke a progress callback, surviving a panicking notifier
fn notify(progress: &dyn ProgressNotifier, call: impl FnOnce(&dyn ProgressNotifier)) {
    if catch_unwind(AssertUnwindSafe(|| call(progress))).is_err() {
        warn!("Progress notifier panicked; continuing without it");
    }
}
