use futures::StreamExt;
use kanal::AsyncReceiver;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wikipron_client::WikiBackend;
use wikipron_types::WordPronPair;

use crate::error::ScrapeError;
use crate::pipeline::Scraper;

/// A scrape running on its own task, feeding a bounded channel
pub struct ScrapeHandle {
    pub receiver: AsyncReceiver<Result<WordPronPair, ScrapeError>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ScrapeHandle {
    /// Abort the run: requests in flight are dropped and the channel closes
    /// after a final [`ScrapeError::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the producer task to exit
    pub async fn join(self) -> Result<(), ScrapeError> {
        drop(self.receiver);
        self.task.await?;
        Ok(())
    }
}

/// Start a fresh run of `scraper` on a tokio task.
///
/// At most `capacity` pairs are buffered ahead of the consumer. The producer
/// stops at its next send once the receiver is dropped, and after forwarding
/// the first error.
pub fn spawn_scrape<B>(scraper: &Scraper<B>, capacity: usize) -> ScrapeHandle
where
    B: WikiBackend + ?Sized + 'static,
{
    let cancel = scraper.cancellation_token().child_token();
    let stream = scraper.scrape_with_token(cancel.clone());
    let (tx, rx) = kanal::bounded_async(capacity);

    let task = tokio::spawn(async move {
        let mut stream = std::pin::pin!(stream);

        while let Some(item) = stream.next().await {
            let failed = item.is_err();

            if tx.send(item).await.is_err() {
                tracing::debug!("Pair receiver dropped, stopping scrape");
                break;
            }
            if failed {
                break;
            }
        }
    });

    ScrapeHandle {
        receiver: rx,
        cancel,
        task,
    }
}
