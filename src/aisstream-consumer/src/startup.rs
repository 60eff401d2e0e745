use aisstream_core::Delta;
use async_channel::Receiver;
use snafu::ResultExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

use crate::{
    consumer::Consumer,
    error::{Result, error::JoinWriterSnafu},
    position::position_samples,
    settings::Settings,
    sink::{DeltaSink, delta_channel, write_loop},
    websocket::WebSocketTransport,
};

pub struct App {
    consumer: Consumer<WebSocketTransport, DeltaSink>,
    receiver: Receiver<Delta>,
}

impl App {
    pub fn build(settings: &Settings) -> App {
        let (sink, receiver) = delta_channel(settings.sink_buffer_size);
        let transport = WebSocketTransport::new(settings.stream_url.clone());

        App {
            consumer: Consumer::new(settings, transport, sink),
            receiver,
        }
    }

    /// Tracks positions read from stdin and writes deltas to stdout until stdin closes or the
    /// process is interrupted.
    #[instrument(skip_all)]
    pub async fn run(self) -> Result<()> {
        let shutdown = CancellationToken::new();

        let signal = tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    shutdown.cancel();
                }
            }
        });

        let writer = tokio::spawn(write_loop(self.receiver, tokio::io::stdout()));

        info!("starting aisstream consumer");
        self.consumer
            .run(position_samples(tokio::io::stdin()), shutdown)
            .await;
        signal.abort();

        // The consumer owned the last sink sender, the writer drains what is left and exits.
        writer.await.context(JoinWriterSnafu)?
    }
}

/// Installs a stderr fmt subscriber, `RUST_LOG` takes precedence over `log_level`.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
