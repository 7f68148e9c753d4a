//! Attempt loop: drive one logical request through physical attempts until a
//! final response, a transport failure, exhaustion, or cancellation.
//!
//! The transitions live in `RetryMachine` and never block, so they can be tested
//! without a transport or a clock. `Executor` owns the only suspension point
//! (the `Waiting` state).

use super::error::{ExecuteError, TransportError};
use super::policy::{Backoff, RetryPolicy};
use crate::cancel::CancelToken;
use crate::http::{Request, Response, Transport};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// State of one in-flight logical call.
#[derive(Debug)]
pub enum State {
    /// About to send physical attempt number `attempt` (1-based).
    Attempting { attempt: u32 },
    /// Attempt `attempt` got retriable `status`; sleep `delay` before the next one.
    Waiting {
        attempt: u32,
        status: u16,
        delay: Duration,
    },
    /// Final, non-retriable response (success or terminal error status).
    Succeeded(Response),
    /// Backoff ceiling reached while the server kept returning a retriable status.
    Exhausted { attempts: u32, last: Response },
    /// Request could not be built or sent.
    TransportFailed(TransportError),
    Cancelled,
}

impl State {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, State::Attempting { .. } | State::Waiting { .. })
    }
}

/// Pure transition function over `State`, holding the per-call backoff progress.
pub struct RetryMachine<'a> {
    policy: &'a RetryPolicy,
    backoff: Backoff,
}

impl<'a> RetryMachine<'a> {
    pub fn new(policy: &'a RetryPolicy, backoff: Backoff) -> Self {
        Self { policy, backoff }
    }

    /// Transition out of `Attempting { attempt }` given the attempt's outcome and
    /// the time spent on the call so far.
    pub fn after_attempt(
        &mut self,
        attempt: u32,
        outcome: Result<Response, TransportError>,
        elapsed: Duration,
    ) -> State {
        let response = match outcome {
            Ok(response) => response,
            Err(TransportError::Aborted) => return State::Cancelled,
            Err(e) => return State::TransportFailed(e),
        };
        if !self.policy.is_retriable(response.status) {
            return State::Succeeded(response);
        }
        match self.backoff.next_backoff(elapsed) {
            Some(delay) => State::Waiting {
                attempt,
                status: response.status,
                delay,
            },
            None => State::Exhausted {
                attempts: attempt,
                last: response,
            },
        }
    }

    /// Transition out of `Waiting { attempt, .. }`.
    pub fn after_wait(&self, attempt: u32, cancelled: bool) -> State {
        if cancelled {
            State::Cancelled
        } else {
            State::Attempting {
                attempt: attempt + 1,
            }
        }
    }
}

/// Executes requests with retry. Immutable after construction; safe to share.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the first non-retriable response. A returned response may still
    /// carry an error status; turning it into a domain error is the caller's job.
    pub fn execute(
        &self,
        request: &Request,
        cancel: Option<&CancelToken>,
    ) -> Result<Response, ExecuteError> {
        let started = Instant::now();
        let mut machine = RetryMachine::new(&self.policy, self.policy.backoff());
        let mut state = State::Attempting { attempt: 1 };

        loop {
            state = match state {
                State::Attempting { attempt } => {
                    if cancel.is_some_and(CancelToken::is_cancelled) {
                        State::Cancelled
                    } else {
                        let outcome = self.transport.send(request, cancel);
                        match &outcome {
                            Ok(r) => tracing::debug!(
                                method = %request.method,
                                url = %request.url,
                                attempt,
                                status = r.status,
                                "attempt finished"
                            ),
                            Err(e) => tracing::debug!(
                                method = %request.method,
                                url = %request.url,
                                attempt,
                                "attempt failed: {}",
                                e
                            ),
                        }
                        machine.after_attempt(attempt, outcome, started.elapsed())
                    }
                }
                State::Waiting {
                    attempt,
                    status,
                    delay,
                } => {
                    tracing::warn!(
                        url = %request.url,
                        attempt,
                        status,
                        "retriable status, backing off for {:?}",
                        delay
                    );
                    let cancelled = match cancel {
                        Some(token) => token.wait(delay),
                        None => {
                            std::thread::sleep(delay);
                            false
                        }
                    };
                    machine.after_wait(attempt, cancelled)
                }
                State::Succeeded(response) => return Ok(response),
                State::Exhausted { attempts, last } => {
                    let elapsed = started.elapsed();
                    tracing::warn!(
                        url = %request.url,
                        attempts,
                        status = last.status,
                        "retry ceiling reached after {:?}",
                        elapsed
                    );
                    return Err(ExecuteError::RetriesExhausted {
                        attempts,
                        elapsed,
                        last,
                    });
                }
                State::TransportFailed(e) => return Err(ExecuteError::Transport(e)),
                State::Cancelled => {
                    tracing::info!(url = %request.url, "request cancelled");
                    return Err(ExecuteError::Cancelled);
                }
            };
        }
    }
}
