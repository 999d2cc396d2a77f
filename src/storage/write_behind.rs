use std::{
    collections::HashMap,
    sync::{
        mpsc::{self, Sender},
        Arc, Mutex, PoisonError,
    },
    thread::{self, JoinHandle},
};

use tracing::warn;

use crate::errors::{PlanningError, Result};

use super::KeyValueStore;

enum Job {
    Write {
        namespace: String,
        entries: Vec<(String, String)>,
    },
    Flush(mpsc::SyncSender<()>),
}

/// Decorator that applies writes to an in-memory cache immediately and hands
/// the backing write to a worker thread, keeping persistence off the
/// interaction path.
///
/// The cache is the source of truth once written: `get` answers from it before
/// consulting the inner store, so callers never need a read-after-write round
/// trip. A failed backing write is retried once, then logged and held until
/// [`WriteBehindStore::flush`] reports it; the cached value stays in place
/// either way, so the caller can re-issue the write.
pub struct WriteBehindStore {
    inner: Arc<dyn KeyValueStore>,
    cache: Arc<Mutex<HashMap<(String, String), String>>>,
    jobs: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
    last_failure: Arc<Mutex<Option<String>>>,
}

impl WriteBehindStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        let cache = Arc::new(Mutex::new(HashMap::new()));
        let last_failure = Arc::new(Mutex::new(None));
        let (jobs, job_queue) = mpsc::channel::<Job>();

        let worker_store = Arc::clone(&inner);
        let worker_failure = Arc::clone(&last_failure);
        let worker = thread::spawn(move || {
            for job in job_queue {
                match job {
                    Job::Write { namespace, entries } => {
                        let batch: Vec<(&str, String)> = entries
                            .iter()
                            .map(|(key, value)| (key.as_str(), value.clone()))
                            .collect();
                        let mut outcome = worker_store.set_many(&namespace, &batch);
                        if outcome.is_err() {
                            outcome = worker_store.set_many(&namespace, &batch);
                        }
                        if let Err(err) = outcome {
                            warn!(namespace = %namespace, error = %err, "write-behind persist failed");
                            let mut failure = worker_failure
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner);
                            *failure = Some(err.to_string());
                        }
                    }
                    Job::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self {
            inner,
            cache,
            jobs: Some(jobs),
            worker: Some(worker),
            last_failure,
        }
    }

    /// Blocks until every queued write has been attempted, then reports the
    /// most recent unrecovered failure, if any. Re-issuing the failed write is
    /// the caller's retry path; the cached value is still current.
    pub fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = mpsc::sync_channel(0);
        if self.enqueue(Job::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
        let failure = self
            .last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match failure {
            Some(message) => Err(PlanningError::Storage(message)),
            None => Ok(()),
        }
    }

    fn enqueue(&self, job: Job) -> Result<()> {
        fn stopped() -> PlanningError {
            PlanningError::Storage("write-behind worker stopped".into())
        }
        self.jobs
            .as_ref()
            .ok_or_else(stopped)?
            .send(job)
            .map_err(|_| stopped())
    }

    fn cache_insert(&self, namespace: &str, key: &str, value: &str) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.insert((namespace.to_owned(), key.to_owned()), value.to_owned());
    }
}

impl KeyValueStore for WriteBehindStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let cached = {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.get(&(namespace.to_owned(), key.to_owned())).cloned()
        };
        match cached {
            Some(value) => Ok(Some(value)),
            None => self.inner.get(namespace, key),
        }
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        self.cache_insert(namespace, key, value);
        self.enqueue(Job::Write {
            namespace: namespace.to_owned(),
            entries: vec![(key.to_owned(), value.to_owned())],
        })
    }

    fn set_many(&self, namespace: &str, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.cache_insert(namespace, key, value);
        }
        self.enqueue(Job::Write {
            namespace: namespace.to_owned(),
            entries: entries
                .iter()
                .map(|(key, value)| ((*key).to_owned(), value.clone()))
                .collect(),
        })
    }
}

impl Drop for WriteBehindStore {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            warn!(error = %err, "write-behind store dropped with unflushed failure");
        }
        // Closing the channel ends the worker loop.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
