use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Snafu, Debug)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to encode delta"))]
    EncodeDelta {
        #[snafu(implicit)]
        location: Location,
        source: serde_json::Error,
    },
    #[snafu(display("Failed to write delta to output"))]
    WriteDelta {
        #[snafu(implicit)]
        location: Location,
        source: std::io::Error,
    },
    #[snafu(display("Failed to join delta writer"))]
    JoinWriter {
        #[snafu(implicit)]
        location: Location,
        source: tokio::task::JoinError,
    },
}
