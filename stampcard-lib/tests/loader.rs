//! Tests for the shared loader.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use stampcard_lib::error::LoadError;
use stampcard_lib::loader::{LoadState, SharedLoader};

#[tokio::test]
async fn test_loads_once() {
    let loader = SharedLoader::new();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = Arc::clone(&calls);
        let value = loader
            .get_or_load(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, LoadError>(vec!["alice", "bob"])
            })
            .await
            .unwrap();
        assert_eq!(value.len(), 2);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(loader.state().await, LoadState::Ready);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_load() {
    let loader = SharedLoader::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let load = || {
        let calls = Arc::clone(&calls);
        move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(7u32)
        }
    };

    let (a, b, c) = tokio::join!(
        loader.get_or_load(load()),
        loader.get_or_load(load()),
        loader.get_or_load(load()),
    );

    assert_eq!(*a.unwrap(), 7);
    assert_eq!(*b.unwrap(), 7);
    assert_eq!(*c.unwrap(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failure_is_sticky_until_reset() {
    let loader: SharedLoader<String> = SharedLoader::new();

    let err = loader
        .get_or_load(|| async { Err(LoadError::new("file not found")) })
        .await
        .unwrap_err();
    assert_eq!(err.message, "file not found");
    assert_eq!(loader.state().await, LoadState::Failed);

    // A later caller gets the cached failure, not a new attempt
    let err = loader
        .get_or_load(|| async { Ok("loaded".to_string()) })
        .await
        .unwrap_err();
    assert_eq!(err.message, "file not found");

    loader.reset().await;
    assert_eq!(loader.state().await, LoadState::Empty);
    let value = loader
        .get_or_load(|| async { Ok("loaded".to_string()) })
        .await
        .unwrap();
    assert_eq!(value.as_str(), "loaded");
    assert_eq!(loader.get().await.as_deref().map(String::as_str), Some("loaded"));
}
