use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::FromStr)]
pub struct TopicName(pub String);

/// One publish destination: a set of brokers and the topic to write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerConfig {
    pub brokers: Vec<String>,
    pub topic: TopicName,
}

/// Resolves a comma-delimited broker list and a topic into producer
/// configurations, one per destination.
///
/// Broker addresses are not validated here; a malformed address is only
/// discovered when the connection is attempted. Callers must not pass an
/// empty broker string.
///
/// Example:
///     brokers="192.168.100.51:9092,192.168.100.52:9092"
///     topic="awesomeness"
pub fn resolve(brokers_csv: &str, topic: &str) -> Vec<ProducerConfig> {
    vec![ProducerConfig {
        brokers: brokers_csv.split(',').map(str::to_string).collect(),
        topic: TopicName(topic.to_string()),
    }]
}

pub fn brokers_to_str(brokers: &[String]) -> String {
    brokers.iter().join(",")
}
