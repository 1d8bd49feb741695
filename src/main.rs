//! How to run:
//!
//! ```
//! $ echo hello | cargo run -- --brokers=localhost:9092,localhost:9093 --topic=example
//! ```
//!
//! Each line read from stdin is published to every configured destination.

use clap::Parser;
use kafka_fanout::ProducerPool;
use rdkafka::util::get_rdkafka_version;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn, Level};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Brokers <host>:<port>(,<host>:<port>)*
    #[arg(
        short,
        long,
        env = "KAFKA_BROKERS",
        default_value = "localhost:9092"
    )]
    brokers: String,
    /// Destination topic
    #[arg(short, long, env = "KAFKA_TOPIC", default_value = "example")]
    topic: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let (_, version_s) = get_rdkafka_version();
    info!("rd_kafka_version {version_s}");

    let pool = ProducerPool::new();
    if let Err(e) = pool.initialize(&args.brokers, &args.topic) {
        error!("producer initialization failed: {e}");
        std::process::exit(1);
    }
    info!(brokers = %args.brokers, topic = %args.topic, "producers ready");

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => pool.publish(&line),
                Ok(None) => break,
                Err(e) => {
                    warn!("stdin read failed: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    pool.shutdown();
    info!("producers flushed, exiting");
}
