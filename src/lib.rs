//! Fan-out Kafka publisher: one non-blocking producer per configured
//! (broker set, topic) destination, with every published payload enqueued
//! to all of them.

pub mod config;
pub mod pool;
pub mod producer;

pub use config::{resolve, ProducerConfig, TopicName};
pub use pool::{PoolError, ProducerPool};
