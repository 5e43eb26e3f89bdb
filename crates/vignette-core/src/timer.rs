use std::cmp::{Ordering as CmpOrdering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::consts::TIMER_THREAD_NAME;
use crate::error::Result;
use crate::schedule::{VisibilityChange, VisibilitySchedule};

/// A scheduled change that has come due, addressed to the submitter's target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerEvent {
    pub target: usize,
    pub change: VisibilityChange,
}

/// Handle to one submitted schedule.
///
/// Cancelling stops every change that has not fired yet. Changes already
/// delivered to the channel are not recalled; callers that care check
/// `is_cancelled` before applying (as `Scene::tick` does).
#[derive(Clone, Debug)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
    pending: Arc<AtomicUsize>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Number of changes that have not fired yet.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// True once nothing more will fire for this submission.
    pub fn is_finished(&self) -> bool {
        self.is_cancelled() || self.pending() == 0
    }
}

/// Remaining changes of one submission, keyed by when the next one is due.
struct Job {
    due: Instant,
    seq: u64,
    target: usize,
    changes: VecDeque<VisibilityChange>,
    cancelled: Arc<AtomicBool>,
    pending: Arc<AtomicUsize>,
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Job {}

impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Job {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

enum TimerCommand {
    Submit(Job),
    Shutdown,
}

/// Host-owned timer that fires visibility schedules on a single background
/// thread and hands the changes back over a channel.
///
/// Nothing is mutated off the owning thread: fired changes wait in the
/// channel until the owner drains them and applies them itself.
pub struct TimerService {
    cmd_tx: mpsc::Sender<TimerCommand>,
    event_rx: mpsc::Receiver<TimerEvent>,
    thread: Option<JoinHandle<()>>,
    next_seq: u64,
}

impl TimerService {
    /// Start the timer thread.
    pub fn spawn() -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<TimerCommand>();
        let (event_tx, event_rx) = mpsc::channel::<TimerEvent>();

        let thread = std::thread::Builder::new()
            .name(TIMER_THREAD_NAME.into())
            .spawn(move || timer_loop(cmd_rx, event_tx))?;

        debug!("Timer service started");
        Ok(Self {
            cmd_tx,
            event_rx,
            thread: Some(thread),
            next_seq: 0,
        })
    }

    /// Queue `schedule` for `target`, with offsets counted from now.
    pub fn submit(&mut self, target: usize, schedule: &VisibilitySchedule) -> TimerHandle {
        let changes: VecDeque<VisibilityChange> = schedule.changes().iter().copied().collect();
        let cancelled = Arc::new(AtomicBool::new(false));
        let pending = Arc::new(AtomicUsize::new(changes.len()));
        let handle = TimerHandle {
            cancelled: Arc::clone(&cancelled),
            pending: Arc::clone(&pending),
        };

        let Some(first_at) = changes.front().map(|c| c.at) else {
            return handle;
        };

        let job = Job {
            due: Instant::now() + first_at,
            seq: self.next_seq,
            target,
            changes,
            cancelled,
            pending,
        };
        self.next_seq += 1;

        debug!(image = target, changes = job.changes.len(), "Schedule submitted");
        if self.cmd_tx.send(TimerCommand::Submit(job)).is_err() {
            // Timer thread is gone; nothing will ever fire.
            handle.pending.store(0, Ordering::Release);
        }
        handle
    }

    /// Every event fired so far, without blocking.
    pub fn drain(&self) -> Vec<TimerEvent> {
        self.event_rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<TimerEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(TimerCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn timer_loop(cmd_rx: mpsc::Receiver<TimerCommand>, event_tx: mpsc::Sender<TimerEvent>) {
    let mut queue: BinaryHeap<Reverse<Job>> = BinaryHeap::new();

    loop {
        let now = Instant::now();
        while queue.peek().is_some_and(|Reverse(job)| job.due <= now) {
            let Some(Reverse(job)) = queue.pop() else {
                break;
            };
            match fire(job, &event_tx) {
                Fired::Again(job) => queue.push(Reverse(job)),
                Fired::Done => {}
                Fired::Disconnected => return,
            }
        }

        let cmd = match queue.peek() {
            Some(Reverse(job)) => {
                match cmd_rx.recv_timeout(job.due.saturating_duration_since(Instant::now())) {
                    Ok(cmd) => cmd,
                    Err(mpsc::RecvTimeoutError::Timeout) => continue,
                    Err(mpsc::RecvTimeoutError::Disconnected) => return,
                }
            }
            None => match cmd_rx.recv() {
                Ok(cmd) => cmd,
                Err(_) => return,
            },
        };

        match cmd {
            TimerCommand::Submit(job) => queue.push(Reverse(job)),
            TimerCommand::Shutdown => return,
        }
    }
}

enum Fired {
    Again(Job),
    Done,
    Disconnected,
}

/// Fire the front change of `job`. The next change is re-armed relative to
/// the moment this one was delivered, so the gap between consecutive changes
/// is never shorter than the gap in the schedule even if this one fired late.
fn fire(mut job: Job, event_tx: &mpsc::Sender<TimerEvent>) -> Fired {
    if job.cancelled.load(Ordering::Acquire) {
        trace!(image = job.target, "Dropping cancelled schedule");
        job.pending.store(0, Ordering::Release);
        return Fired::Done;
    }

    let Some(change) = job.changes.pop_front() else {
        return Fired::Done;
    };

    let event = TimerEvent {
        target: job.target,
        change,
    };
    if event_tx.send(event).is_err() {
        return Fired::Disconnected;
    }
    let fired_at = Instant::now();
    job.pending.fetch_sub(1, Ordering::AcqRel);
    trace!(image = job.target, visible = change.visible, "Visibility change fired");

    match job.changes.front() {
        Some(next) => {
            job.due = fired_at + next.at.saturating_sub(change.at);
            Fired::Again(job)
        }
        None => Fired::Done,
    }
}
