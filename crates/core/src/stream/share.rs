use futures::stream::{BoxStream, Stream, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Multicast without replay: one upstream subscription forwarded to
/// every registered subscriber, in production order.
///
/// Subscribers must be registered before [`Fanout::spawn`] starts the
/// driver task; a subscriber dropped later simply stops receiving.
pub struct Fanout<T> {
    upstream: BoxStream<'static, T>,
    senders: Vec<mpsc::UnboundedSender<T>>,
}

impl<T: Clone + Send + 'static> Fanout<T> {
    pub fn new(upstream: impl Stream<Item = T> + Send + 'static) -> Self {
        Self {
            upstream: upstream.boxed(),
            senders: Vec::new(),
        }
    }

    /// Register a subscriber that will see every upstream value in order.
    pub fn subscribe(&mut self) -> UnboundedReceiverStream<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.push(tx);
        UnboundedReceiverStream::new(rx)
    }

    /// Start the driver task. Requires a tokio runtime.
    pub fn spawn(self) {
        let Fanout {
            mut upstream,
            senders,
        } = self;
        tokio::spawn(async move {
            while let Some(value) = upstream.next().await {
                for tx in &senders {
                    let _ = tx.send(value.clone());
                }
            }
        });
    }
}

/// Multicast-with-replay(1): a driver task folds the stream into a watch
/// channel, so every subscriber immediately observes the most recent
/// value and then live updates. Requires a tokio runtime.
///
/// Slow subscribers observe the latest value rather than every
/// intermediate one; this is the replay-1 sharing point, not a queue.
pub fn share_latest<S>(initial: S::Item, upstream: S) -> watch::Receiver<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Clone + Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(initial);
    let mut upstream = upstream.boxed();
    tokio::spawn(async move {
        while let Some(value) = upstream.next().await {
            if tx.send(value).is_err() {
                break;
            }
        }
    });
    rx
}
