//! Background dispatch of façade operations.
//!
//! One worker thread owns a `MovieClient` and runs queued units in order,
//! each to completion. Results come back over a channel and are handed to
//! the listener only when the owning thread drains them with
//! `dispatch_pending` or `wait_next`.

use std::thread;
use std::time::Duration;
use crossbeam::channel::{self, Receiver, Sender};
use super::listener::{MovieListener, Operation};
use super::MovieClient;
use crate::movie::{MovieForm, MovieId};
use crate::{Error, Result};

enum Job {
    Save(MovieForm),
    Load(MovieId),
    Remove(MovieId),
}

/// Outcome of one background unit
#[derive(Debug)]
pub enum Completion {
    Saved(MovieId),
    Deleted,
    Loaded(MovieForm),
    Failed { operation: Operation, error: Error },
}

pub struct Dispatcher {
    jobs: Option<Sender<Job>>,
    completions: Receiver<Completion>,
    listener: Option<Box<dyn MovieListener>>,
    pending: usize,
    worker: Option<thread::JoinHandle<()>>,
}

impl Dispatcher {
    /// Start the worker thread. The listener may be bound now or later with `attach`.
    pub fn new(client: MovieClient, listener: Option<Box<dyn MovieListener>>) -> Result<Self> {
        let (job_tx, job_rx) = channel::unbounded::<Job>();
        let (done_tx, done_rx) = channel::unbounded::<Completion>();

        let worker = thread::Builder::new()
            .name("movie-worker".into())
            .spawn(move || worker_loop(client, job_rx, done_tx))?;

        tracing::debug!("Movie worker started");
        Ok(Self {
            jobs: Some(job_tx),
            completions: done_rx,
            listener,
            pending: 0,
            worker: Some(worker),
        })
    }

    pub fn attach(&mut self, listener: Box<dyn MovieListener>) {
        self.listener = Some(listener);
    }

    /// Drop the listener. Units already queued still run; their completions are discarded.
    pub fn detach(&mut self) {
        self.listener = None;
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Units submitted whose completion has not been drained yet
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Validate and queue a save. Validation errors are returned here, before dispatch.
    pub fn submit_save(&mut self, form: MovieForm) -> Result<()> {
        MovieClient::validate(&form)?;
        self.submit(Job::Save(form))
    }

    pub fn submit_load(&mut self, id: MovieId) -> Result<()> {
        self.submit(Job::Load(id))
    }

    pub fn submit_remove(&mut self, id: MovieId) -> Result<()> {
        self.submit(Job::Remove(id))
    }

    fn submit(&mut self, job: Job) -> Result<()> {
        let sent = match &self.jobs {
            Some(jobs) => jobs.send(job).is_ok(),
            None => false,
        };
        if !sent {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "movie worker has stopped",
            )));
        }
        self.pending += 1;
        Ok(())
    }

    /// Deliver every completion that is already available. Never blocks.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.deliver(completion);
            delivered += 1;
        }
        delivered
    }

    /// Block up to `timeout` for the next completion and deliver it.
    /// Returns false when nothing arrived in time.
    pub fn wait_next(&mut self, timeout: Duration) -> bool {
        match self.completions.recv_timeout(timeout) {
            Ok(completion) => {
                self.deliver(completion);
                true
            }
            Err(_) => false,
        }
    }

    /// Drain until no unit is pending, waiting at most `timeout` for each one
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        while self.pending > 0 {
            if !self.wait_next(timeout) {
                return false;
            }
        }
        true
    }

    fn deliver(&mut self, completion: Completion) {
        self.pending = self.pending.saturating_sub(1);

        let Some(listener) = self.listener.as_mut() else {
            tracing::debug!("Discarding completion with no listener attached: {:?}", completion);
            return;
        };

        match completion {
            Completion::Saved(id) => listener.on_save_completed(id),
            Completion::Deleted => listener.on_delete_completed(),
            Completion::Loaded(form) => listener.on_load_completed(form),
            Completion::Failed { operation, error } => listener.on_failed(operation, error),
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // Closing the queue lets the worker finish what it has and exit
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("Movie worker panicked");
            }
        }
    }
}

fn worker_loop(client: MovieClient, jobs: Receiver<Job>, done: Sender<Completion>) {
    for job in jobs {
        let completion = run_job(&client, job);
        if let Completion::Failed { operation, error } = &completion {
            log_failure(*operation, error);
        }
        if done.send(completion).is_err() {
            break;
        }
    }
    tracing::debug!("Movie worker stopped");
}

/// Unknown ids are ordinary user input; only store faults are worth a warning
pub(crate) fn failure_level(error: &Error) -> tracing::Level {
    match error {
        Error::NotFound(_) | Error::Validation(_) => tracing::Level::DEBUG,
        Error::Storage(_) | Error::Io(_) => tracing::Level::WARN,
    }
}

fn log_failure(operation: Operation, error: &Error) {
    if failure_level(error) == tracing::Level::WARN {
        tracing::warn!("Background {} failed: {}", operation, error);
    } else {
        tracing::debug!("Background {} failed: {}", operation, error);
    }
}

fn run_job(client: &MovieClient, job: Job) -> Completion {
    let (operation, result) = match job {
        Job::Save(form) => (Operation::Save, client.save(&form).map(Completion::Saved)),
        Job::Load(id) => (Operation::Load, client.load_for_edit(id).map(Completion::Loaded)),
        Job::Remove(id) => (Operation::Remove, client.remove(id).map(|_| Completion::Deleted)),
    };
    result.unwrap_or_else(|error| Completion::Failed { operation, error })
}
