use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::{log_d, log_w, AnalyticsErr};

const TAG: &str = stringify!(AnalyticsRuntime);

lazy_static::lazy_static! {
    static ref OWNED_TOKIO_RUNTIME: Mutex<Option<Weak<Runtime>>> = Mutex::new(None);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TaskId {
    tag: String,
    tokio_id: tokio::task::Id,
}

type SpawnedTasks = Arc<Mutex<HashMap<TaskId, JoinHandle<()>>>>;

pub struct AnalyticsRuntime {
    pub runtime_handle: Handle,
    inner_runtime: Mutex<Option<Arc<Runtime>>>,
    spawned_tasks: SpawnedTasks,
    shutdown_notify: Arc<Notify>,
    is_shutdown: Arc<AtomicBool>,
}

impl AnalyticsRuntime {
    /// Uses the caller's tokio runtime when there is one, otherwise a runtime shared
    /// by every instance created outside of tokio.
    pub fn get_runtime() -> Result<Arc<AnalyticsRuntime>, AnalyticsErr> {
        let (opt_runtime, runtime_handle) = create_runtime_if_required()?;

        Ok(Arc::new(AnalyticsRuntime {
            inner_runtime: Mutex::new(opt_runtime),
            runtime_handle,
            spawned_tasks: Arc::new(Mutex::new(HashMap::new())),
            shutdown_notify: Arc::new(Notify::new()),
            is_shutdown: Arc::new(AtomicBool::new(false)),
        }))
    }

    pub fn get_handle(&self) -> Handle {
        self.runtime_handle.clone()
    }

    pub fn get_num_active_tasks(&self) -> usize {
        self.spawned_tasks.lock().len()
    }

    pub fn is_shutdown(&self) -> bool {
        self.is_shutdown.load(Ordering::SeqCst)
    }

    pub fn shutdown(&self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
        self.shutdown_notify.notify_waiters();

        for (_, task) in self.spawned_tasks.lock().drain() {
            task.abort();
        }
    }

    pub fn spawn<F, Fut>(&self, tag: &str, task: F) -> Option<tokio::task::Id>
    where
        F: FnOnce(Arc<Notify>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_shutdown() {
            log_d!(TAG, "Runtime is shut down, not spawning task {}", tag);
            return None;
        }

        let tag_string = tag.to_string();
        let shutdown_notify = self.shutdown_notify.clone();
        let spawned_tasks = self.spawned_tasks.clone();

        log_d!(TAG, "Spawning task {}", tag);

        // held across the spawn so the task cannot finish before its handle is stored
        let mut tasks = self.spawned_tasks.lock();
        let handle = self.runtime_handle.spawn(async move {
            let task_id = tokio::task::id();
            log_d!(TAG, "Executing task {}.{}", tag_string, task_id);
            task(shutdown_notify).await;
            remove_join_handle_with_id(&spawned_tasks, tag_string, task_id);
        });

        let handle_id = handle.id();
        tasks.insert(
            TaskId {
                tag: tag.to_string(),
                tokio_id: handle_id,
            },
            handle,
        );

        Some(handle_id)
    }

    pub async fn await_tasks_with_tag(&self, tag: &str) {
        let handles: Vec<JoinHandle<()>> = {
            let mut tasks = self.spawned_tasks.lock();
            let keys: Vec<TaskId> = tasks.keys().filter(|k| k.tag == tag).cloned().collect();
            keys.iter().filter_map(|key| tasks.remove(key)).collect()
        };

        join_all(handles).await;
    }
}

fn remove_join_handle_with_id(spawned_tasks: &SpawnedTasks, tag: String, tokio_id: tokio::task::Id) {
    spawned_tasks.lock().remove(&TaskId { tag, tokio_id });
}

fn create_runtime_if_required() -> Result<(Option<Arc<Runtime>>, Handle), AnalyticsErr> {
    if let Ok(handle) = Handle::try_current() {
        log_d!(TAG, "Existing tokio runtime found");
        return Ok((None, handle));
    }

    let mut lock = OWNED_TOKIO_RUNTIME.lock();

    if let Some(rt) = lock.as_ref().and_then(Weak::upgrade) {
        let handle = rt.handle().clone();
        return Ok((Some(rt), handle));
    }

    let rt = Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("checkout-analytics")
        .enable_all()
        .build()
        .map_err(|e| AnalyticsErr::ThreadFailure(e.to_string()))?;

    let rt = Arc::new(rt);
    let handle = rt.handle().clone();
    lock.replace(Arc::downgrade(&rt));
    Ok((Some(rt), handle))
}

impl Drop for AnalyticsRuntime {
    fn drop(&mut self) {
        self.shutdown();

        let inner = match self.inner_runtime.lock().take() {
            Some(inner) => inner,
            None => {
                log_d!(TAG, "Runtime owned by tokio");
                return;
            }
        };

        if Arc::strong_count(&inner) > 1 {
            // still used by another instance
            return;
        }

        if Handle::try_current().is_err() {
            return;
        }

        log_w!(TAG, "Attempt to shutdown runtime from inside runtime");
        std::thread::spawn(move || {
            // dropping a runtime from inside one panics
            drop(inner);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_tasks_are_tracked_until_complete() {
        let runtime = AnalyticsRuntime::get_runtime().unwrap();
        runtime.spawn("test_task", |_| async {
            tokio::time::sleep(Duration::from_millis(10)).await;
        });

        assert_eq!(runtime.get_num_active_tasks(), 1);
        runtime.await_tasks_with_tag("test_task").await;
        assert_eq!(runtime.get_num_active_tasks(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_notifies_and_rejects_new_tasks() {
        let runtime = AnalyticsRuntime::get_runtime().unwrap();
        runtime.spawn("long_task", |shutdown| async move {
            shutdown.notified().await;
        });

        runtime.shutdown();

        assert_eq!(runtime.get_num_active_tasks(), 0);
        assert!(runtime.spawn("late_task", |_| async {}).is_none());
    }
}
