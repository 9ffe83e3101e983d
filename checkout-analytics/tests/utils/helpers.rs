use checkout_analytics::{
    AnalyticsOptions, CollectorAdapter, CookieJar, EventAnalytics, HostEnvironment,
};
use std::sync::Arc;
use std::time::Duration;

pub const FLUSH_INTERVAL_MS: u64 = 3000;

/// Lets spawned flushes run without reaching the next timer tick.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

pub async fn advance_one_interval() {
    tokio::time::sleep(Duration::from_millis(FLUSH_INTERVAL_MS)).await;
}

pub fn analytics_with_adapter(
    cookie_header: &str,
    host: HostEnvironment,
    adapter: Arc<dyn CollectorAdapter>,
) -> EventAnalytics {
    let options = AnalyticsOptions::builder()
        .collector_adapter(Some(adapter))
        .flush_interval_ms(Some(FLUSH_INTERVAL_MS))
        .build();

    EventAnalytics::new(
        Arc::new(CookieJar::from_cookie_header(cookie_header)),
        host,
        Some(options),
    )
    .unwrap()
}

pub async fn assert_eventually<F>(assertion: F, timeout: Duration)
where
    F: Fn() -> bool,
{
    let steps = timeout.as_millis() / 10;
    for _ in 0..steps {
        if assertion() {
            return;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("assertion timed out");
}
