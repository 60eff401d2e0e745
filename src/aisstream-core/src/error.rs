use snafu::{Location, Snafu};

pub type CoreResult<T> = std::result::Result<T, Error>;

#[derive(Snafu, Debug)]
#[snafu(module(core_error), visibility(pub))]
pub enum Error {
    #[snafu(display("Ingestion sink is full, dropping delta for '{target}'"))]
    SinkFull {
        #[snafu(implicit)]
        location: Location,
        target: String,
    },
    #[snafu(display("Ingestion sink is closed"))]
    SinkClosed {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed to serialize payload"))]
    Serialize {
        #[snafu(implicit)]
        location: Location,
        source: serde_json::Error,
    },
    #[snafu(display("Transport connection is gone"))]
    ConnectionGone {
        #[snafu(implicit)]
        location: Location,
    },
}
