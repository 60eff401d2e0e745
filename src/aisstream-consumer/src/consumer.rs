use aisstream_core::{AisTransport, IngestionSink, RawReport, TransportEvent, normalize};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::{
    emitter::Emitter,
    session::{SessionManager, watchdog_expiry},
    settings::Settings,
    tracker::{PositionSample, TrackingAction, TrackingController},
};

/// Event loop owning the tracker and the session, the only place either is mutated.
pub struct Consumer<T: AisTransport, S> {
    tracker: TrackingController,
    session: SessionManager<T>,
    events: UnboundedReceiver<TransportEvent>,
    emitter: Emitter<S>,
}

impl<T: AisTransport, S: IngestionSink> Consumer<T, S> {
    pub fn new(settings: &Settings, transport: T, sink: S) -> Consumer<T, S> {
        let (sender, events) = unbounded_channel();
        Consumer {
            tracker: TrackingController::from_settings(settings),
            session: SessionManager::new(transport, sender, settings.watchdog_period()),
            events,
            emitter: Emitter::new(sink),
        }
    }

    /// Runs until the position source ends or `shutdown` is cancelled, closing the session on
    /// the way out.
    #[instrument(skip_all)]
    pub async fn run(
        mut self,
        positions: impl Stream<Item = PositionSample>,
        shutdown: CancellationToken,
    ) {
        let mut positions = std::pin::pin!(positions);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("shutdown requested");
                    break;
                }
                sample = positions.next() => match sample {
                    Some(sample) => self.on_position_sample(sample),
                    None => {
                        info!("position source ended");
                        break;
                    }
                },
                Some(event) = self.events.recv() => {
                    if let Some(report) = self.session.handle_event(event) {
                        publish_report(&self.emitter, report).await;
                    }
                }
                _ = watchdog_expiry(self.session.watchdog_deadline()) => {
                    self.session.on_watchdog_expired();
                }
            }
        }

        self.session.close();
        self.tracker.reset();
    }

    fn on_position_sample(&mut self, sample: PositionSample) {
        match self
            .tracker
            .on_position_sample(sample, self.session.is_open())
        {
            Some(TrackingAction::Open(filter)) => self.session.open(filter),
            Some(TrackingAction::Update(filter)) => self.session.update(filter),
            None => {}
        }
    }
}

async fn publish_report<S: IngestionSink>(emitter: &Emitter<S>, report: RawReport) {
    let Some(normalized) = normalize(&report) else {
        debug!("dropping report without mmsi");
        return;
    };

    if let Err(e) = emitter.publish(normalized).await {
        error!("failed to publish delta: {e:?}");
    }
}
