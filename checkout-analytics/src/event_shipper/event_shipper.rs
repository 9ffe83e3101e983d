use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tokio::time::{sleep, Duration};

use super::event_buffer::EventBuffer;
use super::shipper_state::{FlushRetries, ShipperState};
use super::shipper_stats::{ShipperStats, ShipperStatsSnapshot};
use crate::collector_adapter::{CollectorAdapter, CollectorRequest};
use crate::cookies::{read_app_analytics_data, CookieJar, IS_APP_COOKIE, SHOPPING_WEB_VIEW_COOKIE};
use crate::events::purchase_tracking::PURCHASE_EVENT;
use crate::events::TransportEvent;
use crate::identity::IdentityProvider;
use crate::{log_d, log_e, log_w, AnalyticsErr, AnalyticsOptions, AnalyticsRuntime};

const TAG: &str = stringify!(EventShipper);

const BG_FLUSH_TAG: &str = "event_shipper_bg_flush";
const IMMEDIATE_FLUSH_TAG: &str = "event_shipper_immediate_flush";

pub struct EventShipper {
    collector_adapter: Arc<dyn CollectorAdapter>,
    identity_provider: Arc<dyn IdentityProvider>,
    cookies: Arc<CookieJar>,
    buffer: EventBuffer,
    retries: FlushRetries,
    stats: ShipperStats,
    flush_interval_ms: u64,
    flush_lock: Mutex<()>,
    is_flushing: AtomicBool,
    in_flight_events: AtomicUsize,
    is_shutdown: AtomicBool,
    shutdown_notify: Arc<Notify>,
    runtime: Arc<AnalyticsRuntime>,
}

impl EventShipper {
    pub fn new(
        collector_adapter: Arc<dyn CollectorAdapter>,
        identity_provider: Arc<dyn IdentityProvider>,
        cookies: Arc<CookieJar>,
        options: &AnalyticsOptions,
        runtime: &Arc<AnalyticsRuntime>,
    ) -> Self {
        Self {
            collector_adapter,
            identity_provider,
            cookies,
            buffer: EventBuffer::new(),
            retries: FlushRetries::new(options.max_retries()),
            stats: ShipperStats::default(),
            flush_interval_ms: options.flush_interval_ms(),
            flush_lock: Mutex::new(()),
            is_flushing: AtomicBool::new(false),
            in_flight_events: AtomicUsize::new(0),
            is_shutdown: AtomicBool::new(false),
            shutdown_notify: Arc::new(Notify::new()),
            runtime: runtime.clone(),
        }
    }

    pub fn start_background_task(self: &Arc<Self>) {
        let weak_inst = Arc::downgrade(self);
        let shutdown_notify = self.shutdown_notify.clone();
        let interval = Duration::from_millis(self.flush_interval_ms);

        log_d!(TAG, "Starting background flush every {}ms", self.flush_interval_ms);

        self.runtime.spawn(BG_FLUSH_TAG, move |rt_shutdown_notify| async move {
            loop {
                tokio::select! {
                    () = sleep(interval) => {}
                    () = rt_shutdown_notify.notified() => {
                        log_d!(TAG, "Runtime shutdown. Stopping background flush");
                        break;
                    }
                    () = shutdown_notify.notified() => {
                        log_d!(TAG, "Stopping background flush");
                        break;
                    }
                }

                let Some(strong_self) = weak_inst.upgrade() else {
                    log_d!(TAG, "Shipper dropped. Stopping background flush");
                    break;
                };

                if strong_self.is_shutdown.load(Ordering::SeqCst) {
                    break;
                }

                strong_self.flush().await;

                if strong_self.retries.is_exhausted() {
                    log_w!(TAG, "Retries exhausted. Stopping background flush");
                    break;
                }
            }
        });
    }

    /// Buffers an event. The first event into an empty buffer is flushed right away
    /// instead of waiting for the timer.
    pub fn push(self: &Arc<Self>, event: TransportEvent) {
        if self.retries.is_exhausted() || self.is_shutdown.load(Ordering::SeqCst) {
            log_d!(TAG, "Dropping {}, shipper is {}", event.name, self.state());
            self.stats.record_dropped(1);
            return;
        }

        if self.buffer.push(event) != 1 {
            return;
        }

        let strong_self = self.clone();
        let spawned = self.runtime.spawn(IMMEDIATE_FLUSH_TAG, move |_| async move {
            strong_self.flush().await;
        });

        if spawned.is_none() {
            log_w!(TAG, "Could not schedule immediate flush");
        }
    }

    pub async fn flush(&self) {
        let _flush_guard = self.flush_lock.lock().await;

        if self.retries.is_exhausted() {
            return;
        }

        let events = self.buffer.take_all();
        if events.is_empty() {
            return;
        }

        self.is_flushing.store(true, Ordering::SeqCst);
        self.in_flight_events.store(events.len(), Ordering::SeqCst);
        self.send_batch(events).await;
        self.in_flight_events.store(0, Ordering::SeqCst);
        self.is_flushing.store(false, Ordering::SeqCst);
    }

    async fn send_batch(&self, events: Vec<TransportEvent>) {
        let is_app = self.cookies.is_flag_set(IS_APP_COOKIE);

        let (mut identity, app_analytics_data) = tokio::join!(
            self.identity_provider.resolve_identity(is_app),
            async { read_app_analytics_data(&self.cookies) }
        );

        // shutdown gave up on this batch while identity was resolving
        if self.in_flight_events.load(Ordering::SeqCst) == 0 {
            log_d!(TAG, "Batch was dropped during shutdown, not sending");
            return;
        }

        if is_app && app_analytics_data.app_instance_id().is_none() {
            log_w!(
                TAG,
                "No app instance id, dropping {} event(s)",
                events.len()
            );
            self.stats.record_dropped(events.len());
            return;
        }

        identity.app_instance_id = app_analytics_data.app_instance_id().map(str::to_string);

        if !is_app && !identity.has_client_id() {
            log_w!(TAG, "No client id, dropping {} event(s)", events.len());
            self.stats.record_dropped(events.len());
            return;
        }

        let fb_events = is_app
            && self.cookies.is_flag_set(SHOPPING_WEB_VIEW_COOKIE)
            && events.iter().any(|e| e.name == PURCHASE_EVENT);

        let request = CollectorRequest {
            fb_events,
            app_analytics_data,
            identity,
            events,
        };

        match self.collector_adapter.send_events(&request).await {
            Ok(()) => {
                log_d!(TAG, "Sent {} event(s)", request.event_count());
                self.retries.reset();
                self.stats.record_sent_batch();
            }
            Err(e) => {
                self.stats.record_failed_attempt();
                let exhausted = self.retries.record_failure();
                log_w!(
                    TAG,
                    "Failed to send {} event(s), attempt {}: {}",
                    request.event_count(),
                    self.retries.count(),
                    e
                );

                let CollectorRequest { events, .. } = request;
                if exhausted {
                    let dropped = events.len() + self.buffer.drain_count();
                    log_e!(TAG, "Retries exhausted, dropping {} event(s)", dropped);
                    self.stats.record_dropped(dropped);
                    return;
                }

                self.buffer.requeue_front(events);
            }
        }
    }

    /// Stops the timer, gives buffered events one last send within `timeout` and
    /// shuts the adapter down. Anything still unsent after that is counted as dropped,
    /// including a batch stuck behind a stalled flush.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), AnalyticsErr> {
        if self.is_shutdown.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.shutdown_notify.notify_one();

        let result = tokio::select! {
            () = sleep(timeout) => {
                log_w!(TAG, "Final flush did not finish within {}ms", timeout.as_millis());
                Err(AnalyticsErr::ShutdownFailure("Final flush timed out".to_string()))
            }
            () = self.flush() => Ok(()),
        };

        let pending = self.buffer.drain_count() + self.in_flight_events.swap(0, Ordering::SeqCst);
        if pending > 0 {
            log_w!(TAG, "Dropping {} unsent event(s) on shutdown", pending);
            self.stats.record_dropped(pending);
        }

        if let Err(e) = self.collector_adapter.shutdown().await {
            log_e!(TAG, "Failed to shut down collector adapter: {}", e);
        }

        result
    }

    pub fn state(&self) -> ShipperState {
        if self.retries.is_exhausted() {
            ShipperState::Exhausted
        } else if self.is_flushing.load(Ordering::SeqCst) {
            ShipperState::Flushing
        } else if self.buffer.is_empty() {
            ShipperState::Idle
        } else {
            ShipperState::Buffering
        }
    }

    pub fn retry_count(&self) -> u32 {
        self.retries.count()
    }

    pub fn pending_event_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn stats(&self) -> ShipperStatsSnapshot {
        self.stats.snapshot()
    }
}
