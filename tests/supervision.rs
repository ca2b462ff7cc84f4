//! Supervised task failures are reported as unhandled rejections.
//!
//! No rejection handler is installed in this binary, so reported failures
//! fall back to an error-level event and the process keeps running.

use service_logger::lifecycle::hooks::spawn_supervised;

#[tokio::test]
async fn test_supervised_error_is_reported_and_process_continues() {
    let watcher = spawn_supervised(async { Err("boom".into()) });
    watcher.await.expect("watcher completes");
}

#[tokio::test]
async fn test_supervised_panic_is_reported_and_process_continues() {
    let watcher = spawn_supervised(async { panic!("boom") });
    watcher.await.expect("watcher completes");
}

#[tokio::test]
async fn test_supervised_success_is_silent() {
    let watcher = spawn_supervised(async { Ok(()) });
    watcher.await.expect("watcher completes");
}
