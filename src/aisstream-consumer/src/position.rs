use futures::{Stream, StreamExt, future};
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::warn;

use crate::tracker::PositionSample;

/// Upper bound for one line of position input.
static MAX_LINE_LENGTH: usize = 1000;

/// Reads newline-delimited JSON position samples, skipping lines that cannot be parsed.
pub fn position_samples(source: impl AsyncRead) -> impl Stream<Item = PositionSample> {
    FramedRead::new(source, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)).filter_map(|line| {
        future::ready(match line {
            Err(e) => {
                warn!("failed to read position sample: {e:?}");
                None
            }
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => match serde_json::from_str(&line) {
                Ok(sample) => Some(sample),
                Err(e) => {
                    warn!("failed to parse position sample '{line}': {e:?}");
                    None
                }
            },
        })
    })
}
