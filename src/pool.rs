use std::sync::RwLock;
use std::time::Duration;

use rdkafka::error::KafkaError;
use thiserror::Error;

use crate::config::{brokers_to_str, resolve, ProducerConfig, TopicName};
use crate::producer::{self, KafkaProducer, Producer};

const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to connect producer for brokers [{brokers}]: {source}")]
    Connect {
        brokers: String,
        #[source]
        source: KafkaError,
    },
}

struct Binding<P> {
    producer: P,
    topic: TopicName,
}

/// A set of live producers, one per configured destination. Every publish
/// fans the payload out to all of them.
///
/// Owned by whatever assembles the application; create with [`new`], then
/// [`initialize`] once, [`publish`] any number of times, [`shutdown`] on
/// teardown.
///
/// [`new`]: ProducerPool::new
/// [`initialize`]: ProducerPool::initialize
/// [`publish`]: ProducerPool::publish
/// [`shutdown`]: ProducerPool::shutdown
pub struct ProducerPool<P = KafkaProducer> {
    bindings: RwLock<Vec<Binding<P>>>,
}

impl<P: Producer> ProducerPool<P> {
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(Vec::new()),
        }
    }

    /// Connects one producer per config and stores the (producer, topic)
    /// bindings. If the pool already holds bindings this is a no-op, so
    /// repeat calls are safe and cheap; the first caller wins. Concurrent
    /// callers serialize on the write lock, the loser observes the winner's
    /// bindings.
    ///
    /// On a connection failure the error is returned and bindings already
    /// created in the same call are kept, not rolled back. Callers that need
    /// all-or-nothing semantics must treat any error here as fatal.
    pub fn initialize_with<E>(
        &self,
        configs: Vec<ProducerConfig>,
        mut connect: impl FnMut(&ProducerConfig) -> Result<P, E>,
    ) -> Result<(), E> {
        let mut bindings = self.bindings.write().expect("bindings lock poisoned");
        if !bindings.is_empty() {
            return Ok(());
        }
        for config in configs {
            let producer = connect(&config)?;
            bindings.push(Binding {
                producer,
                topic: config.topic,
            });
        }
        Ok(())
    }

    /// Enqueues the payload to every binding, in the order their configs
    /// were resolved. Fire-and-forget: returns as soon as each producer has
    /// the message in its local pipeline, without waiting for broker
    /// acknowledgment. With zero bindings the payload is silently dropped;
    /// callers are responsible for sequencing `initialize` before `publish`.
    pub fn publish(&self, payload: &str) {
        let bindings = self.bindings.read().expect("bindings lock poisoned");
        for binding in bindings.iter() {
            binding.producer.enqueue(&binding.topic.0, payload.as_bytes());
        }
    }

    /// Flushes and releases every producer. Idempotent; publishing after
    /// shutdown drops the payload like a never-initialized pool would.
    pub fn shutdown(&self) {
        let mut bindings = self.bindings.write().expect("bindings lock poisoned");
        for binding in bindings.drain(..) {
            binding.producer.flush(FLUSH_TIMEOUT);
        }
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.read().expect("bindings lock poisoned").len()
    }
}

impl<P: Producer> Default for ProducerPool<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl ProducerPool<KafkaProducer> {
    /// Connects to the given Kafka brokers, one non-blocking producer per
    /// resolved config. `brokers_csv` is a comma-delimited list of
    /// `host:port` addresses.
    pub fn initialize(&self, brokers_csv: &str, topic: &str) -> Result<(), PoolError> {
        self.initialize_with(resolve(brokers_csv, topic), |config| {
            producer::connect(&config.brokers).map_err(|source| PoolError::Connect {
                brokers: brokers_to_str(&config.brokers),
                source,
            })
        })
    }
}
