use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use wikipron_config::Config;
use wikipron_types::WordPronPair;

use super::mock::{MockBackend, line_extractor, members};
use crate::{ScrapeError, Scraper, spawn_scrape};

fn scraper(backend: &Arc<MockBackend>) -> Scraper<MockBackend> {
    let mut config = Config::for_language("English");
    config.scrape.cut_off_date = "2024-01-01".to_string();
    Scraper::with_backend(backend.clone(), config, Arc::new(line_extractor)).unwrap()
}

#[tokio::test]
async fn channel_delivers_every_pair() {
    let backend = Arc::new(
        MockBackend::new()
            .listing(None, &members(&[("cat", "2020-01-01")], Some("abc")))
            .listing(Some("abc"), &members(&[("dog", "2020-01-01")], None))
            .page("cat", "kæt")
            .page("dog", "dɔɡ"),
    );

    let handle = spawn_scrape(&scraper(&backend), 4);
    let mut pairs = Vec::new();
    while let Ok(item) = handle.receiver.recv().await {
        pairs.push(item.unwrap());
    }

    assert_eq!(
        pairs,
        vec![WordPronPair::new("cat", "kæt"), WordPronPair::new("dog", "dɔɡ")]
    );
    handle.join().await.unwrap();
}

#[tokio::test]
async fn first_error_closes_the_channel() {
    let backend = Arc::new(MockBackend::new().failing_listing(None, 500));

    let handle = spawn_scrape(&scraper(&backend), 4);

    let first = handle.receiver.recv().await.unwrap();
    assert!(matches!(first, Err(ScrapeError::Client(_))));
    assert!(handle.receiver.recv().await.is_err());
    handle.join().await.unwrap();
}

#[tokio::test]
async fn dropped_receiver_stops_the_producer() {
    let entries: Vec<(String, &str)> = (0..50).map(|i| (format!("w{}", "x".repeat(i)), "2020-01-01")).collect();
    let listed: Vec<(&str, &str)> = entries.iter().map(|(t, d)| (t.as_str(), *d)).collect();

    let mut backend = MockBackend::new().listing(None, &members(&listed, None));
    for (title, _) in &listed {
        backend = backend.page(title, "pron");
    }
    let backend = Arc::new(backend);

    let handle = spawn_scrape(&scraper(&backend), 1);
    assert!(handle.receiver.recv().await.unwrap().is_ok());
    timeout(Duration::from_secs(5), handle.join())
        .await
        .expect("producer kept running after the receiver was dropped")
        .unwrap();

    assert!(backend.page_fetches().len() < 50);
}

#[tokio::test]
async fn cancel_aborts_a_stuck_run() {
    let backend = Arc::new(
        MockBackend::new()
            .listing(None, &members(&[("cat", "2020-01-01")], None))
            .page("cat", "kæt")
            .page_delay(Duration::from_secs(30)),
    );

    let handle = spawn_scrape(&scraper(&backend), 4);
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.cancel();

    let item = timeout(Duration::from_secs(5), handle.receiver.recv())
        .await
        .expect("cancel did not reach the producer")
        .unwrap();
    assert!(matches!(item, Err(ScrapeError::Cancelled)));

    handle.join().await.unwrap();
}
