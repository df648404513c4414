//! Serialized command queue and cancellable auto-advance.
//!
//! A session lives on one task and runs queued commands to completion, one
//! at a time. Callers talk to it through a cloneable [`SessionHandle`].

use crate::clock::AdvanceReport;
use crate::error::DriverError;
use crate::session::Session;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

const QUEUE_DEPTH: usize = 64;

type Job = Box<dyn FnOnce(&mut Session) + Send>;

/// Sender side of a session's command queue.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::Sender<Job>,
}

/// Move `session` onto its own task. The task ends, returning the session,
/// once every handle is dropped.
pub fn spawn(session: Session) -> (SessionHandle, JoinHandle<Session>) {
    let (tx, mut rx) = mpsc::channel::<Job>(QUEUE_DEPTH);
    let task = tokio::spawn(async move {
        let mut session = session;
        while let Some(job) = rx.recv().await {
            job(&mut session);
        }
        debug!("session queue drained");
        session
    });
    (SessionHandle { tx }, task)
}

impl SessionHandle {
    /// Queue `f` and wait for its result.
    pub async fn run<R, F>(&self, f: F) -> Result<R, DriverError>
    where
        F: FnOnce(&mut Session) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let job: Job = Box::new(move |session: &mut Session| {
            let _ = reply.send(f(session));
        });
        self.tx.send(job).await.map_err(|_| DriverError::Closed)?;
        rx.await.map_err(|_| DriverError::Dropped)
    }

    pub async fn advance(&self, days: f64) -> Result<AdvanceReport, DriverError> {
        self.run(move |s| s.advance_time(days)).await
    }
}

/// A repeating "advance N days" timer. Each advance completes before the
/// next is queued; after `stop` no further advance runs.
#[derive(Debug)]
pub struct AutoAdvance {
    stopped: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl AutoAdvance {
    pub fn start(handle: SessionHandle, days: f64, every: Duration) -> Self {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);
        let period = every.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick resolves immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                let gate = Arc::clone(&flag);
                let issued = handle
                    .run(move |s| {
                        if !gate.load(Ordering::SeqCst) {
                            s.advance_time(days);
                        }
                    })
                    .await;
                if issued.is_err() {
                    break;
                }
            }
        });
        debug!(days, ?period, "auto-advance started");
        Self {
            stopped,
            task: Some(task),
        }
    }

    /// Stop issuing advances. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("auto-advance stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
            && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.stop();
    }
}
