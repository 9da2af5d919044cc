use notimailer_domain::DispatchJob;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::error;

/// Receiving end of the dispatch job channel, drained by the dispatch
/// worker.
pub type DispatchJobReceiver = UnboundedReceiver<DispatchJob>;

/// Hands `DispatchJob`s over to the dispatch worker, either immediately
/// or after a delay. The delayed variant is what drives retry backoff.
pub trait IJobQueue: Send + Sync {
    fn enqueue(&self, job: DispatchJob);
    fn enqueue_delayed(&self, job: DispatchJob, delay: Duration);
}

/// Queue backed by an unbounded channel. Delayed jobs are parked on a
/// timer task and re-sent once the delay has passed.
pub struct ChannelJobQueue {
    tx: UnboundedSender<DispatchJob>,
}

impl ChannelJobQueue {
    pub fn create() -> (Self, DispatchJobReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl IJobQueue for ChannelJobQueue {
    fn enqueue(&self, job: DispatchJob) {
        if self.tx.send(job).is_err() {
            error!("Dispatch worker has shut down, dropping job");
        }
    }

    fn enqueue_delayed(&self, job: DispatchJob, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(job).is_err() {
                error!("Dispatch worker has shut down, dropping delayed job");
            }
        });
    }
}

/// A job recorded by `InMemoryJobQueue`, together with the delay it was
/// enqueued with (zero for immediate enqueues).
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedDispatch {
    pub job: DispatchJob,
    pub delay: Duration,
}

/// Queue that records jobs instead of handing them to a worker. Useful
/// for testing the enqueue contracts of the scan and dispatch tasks.
pub struct InMemoryJobQueue {
    jobs: Mutex<Vec<QueuedDispatch>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
        }
    }

    pub fn jobs(&self) -> Vec<QueuedDispatch> {
        self.jobs.lock().unwrap().clone()
    }

    pub fn drain(&self) -> Vec<QueuedDispatch> {
        std::mem::take(&mut *self.jobs.lock().unwrap())
    }
}

impl IJobQueue for InMemoryJobQueue {
    fn enqueue(&self, job: DispatchJob) {
        self.jobs.lock().unwrap().push(QueuedDispatch {
            job,
            delay: Duration::from_secs(0),
        });
    }

    fn enqueue_delayed(&self, job: DispatchJob, delay: Duration) {
        self.jobs.lock().unwrap().push(QueuedDispatch { job, delay });
    }
}
