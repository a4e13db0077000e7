use actix_web::web::Bytes;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::models::CarUpdate;

/// Fan-out feed of catalog change events
///
/// Thin wrapper over a broadcast channel. There is no backpressure: a slow
/// subscriber lags and the skipped events are simply dropped from its stream.
pub struct UpdateFeed {
    tx: broadcast::Sender<CarUpdate>,
}

impl UpdateFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish one event; returns how many subscribers saw it
    pub fn publish(&self, update: CarUpdate) -> usize {
        match self.tx.send(update) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::debug!("Catalog update published with no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CarUpdate> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Turn a subscription into a stream of SSE `data:` frames
pub fn sse_frames(
    receiver: broadcast::Receiver<CarUpdate>,
) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
    BroadcastStream::new(receiver).filter_map(|message| match message {
        Ok(update) => match serde_json::to_string(&update) {
            Ok(json) => Some(Ok(Bytes::from(format!("data: {}\n\n", json)))),
            Err(e) => {
                tracing::warn!("Failed to serialize catalog update: {}", e);
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!("Update subscriber lagged, {} events dropped", skipped);
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_update() -> CarUpdate {
        CarUpdate::CarUpdated { car_id: "1".to_string(), timestamp: chrono::Utc::now() }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let feed = UpdateFeed::new(16);
        let mut rx = feed.subscribe();

        assert_eq!(feed.publish(sample_update()), 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.car_id(), "1");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let feed = UpdateFeed::new(16);
        assert_eq!(feed.publish(sample_update()), 0);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_sse_frame_format() {
        let feed = UpdateFeed::new(16);
        let rx = feed.subscribe();
        feed.publish(sample_update());
        drop(feed);

        let frames: Vec<_> = sse_frames(rx).collect().await;

        assert_eq!(frames.len(), 1);
        let bytes = frames[0].as_ref().unwrap();
        let text = std::str::from_utf8(bytes).unwrap();
        assert!(text.starts_with("data: "));
        assert!(text.contains(r#""type":"car_updated""#));
        assert!(text.ends_with("\n\n"));
    }
}
