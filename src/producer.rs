use std::time::Duration;

use rdkafka::error::{KafkaError, KafkaResult};
use rdkafka::producer::{
    BaseRecord, DeliveryResult, Producer as _, ProducerContext, ThreadedProducer,
};
use rdkafka::{ClientConfig, ClientContext, Message};
use tracing::warn;

use crate::config::brokers_to_str;

/// The slice of the broker client this crate uses: hand a message to an
/// asynchronous pipeline without blocking, and drain it on shutdown.
pub trait Producer: Send + Sync {
    fn enqueue(&self, topic: &str, payload: &[u8]);
    fn flush(&self, timeout: Duration);
}

/// Logs delivery reports from the producer's background poller. Callers of
/// `publish` never see these; the log is the only place they surface.
pub struct DeliveryLogger;

impl ClientContext for DeliveryLogger {}

impl ProducerContext for DeliveryLogger {
    type DeliveryOpaque = ();

    fn delivery(&self, result: &DeliveryResult<'_>, _opaque: ()) {
        if let Err((err, msg)) = result {
            warn!(topic = %msg.topic(), %err, "message delivery failed");
        }
    }
}

/// Non-blocking Kafka producer: `enqueue` buffers locally and returns, a
/// background thread carries the network I/O.
pub struct KafkaProducer {
    inner: ThreadedProducer<DeliveryLogger>,
}

pub fn connect(brokers: &[String]) -> KafkaResult<KafkaProducer> {
    let inner = ClientConfig::new()
        .set("bootstrap.servers", brokers_to_str(brokers))
        // Leader acknowledgment only: low latency over durability.
        .set("acks", "1")
        .set("message.timeout.ms", "5000")
        .create_with_context(DeliveryLogger)?;
    Ok(KafkaProducer { inner })
}

impl Producer for KafkaProducer {
    fn enqueue(&self, topic: &str, payload: &[u8]) {
        let record = BaseRecord::<(), [u8]>::to(topic).payload(payload);
        if let Err((err, _)) = self.inner.send(record) {
            match err {
                KafkaError::MessageProduction(code) => {
                    warn!(%topic, %code, "producer queue rejected message")
                }
                err => warn!(%topic, %err, "enqueue failed"),
            }
        }
    }

    fn flush(&self, timeout: Duration) {
        if let Err(err) = self.inner.flush(timeout) {
            warn!(%err, "producer flush incomplete");
        }
    }
}
