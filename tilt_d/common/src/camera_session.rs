//! Ownership of the single capture stream / landmark detector pair.
//!
//! Every `start` and every `stop` bumps the session generation. Frames and
//! detector results carry the generation they were produced under and are
//! discarded unless it matches the live one, which is what keeps a torn-down
//! session from ever emitting another gesture.

use api::{CameraBackend, CaptureStream, FrameSink, LandmarkDetector, LandmarkSet, TaggedFrame};
use log::{debug, info, trace};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::timeout;

use crate::{
    AcquisitionError, GestureDebouncer, GestureEvent, Subscription, TiltClassifier, TiltSample,
};

pub const DEFAULT_ACQUISITION_TIMEOUT: Duration = Duration::from_secs(10);

struct ActiveCapture {
    stream: Box<dyn CaptureStream>,
    detector: Box<dyn LandmarkDetector>,
    generation: u64,
}

pub struct CameraSession<B: CameraBackend> {
    backend: B,
    classifier: TiltClassifier,
    debouncer: GestureDebouncer,
    acquisition_timeout: Duration,
    active: Option<ActiveCapture>,
    generation: u64,
}

impl<B: CameraBackend> CameraSession<B> {
    pub fn new(backend: B, classifier: TiltClassifier, debouncer: GestureDebouncer) -> Self {
        Self {
            backend,
            classifier,
            debouncer,
            acquisition_timeout: DEFAULT_ACQUISITION_TIMEOUT,
            active: None,
            generation: 0,
        }
    }

    pub fn with_acquisition_timeout(mut self, acquisition_timeout: Duration) -> Self {
        self.acquisition_timeout = acquisition_timeout;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the running capture, `None` when stopped.
    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.generation)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(GestureEvent) + Send + 'static,
    {
        self.debouncer.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        self.debouncer.unsubscribe(subscription)
    }

    pub fn clear_subscription(&mut self) {
        self.debouncer.clear();
    }

    /// Brings up a fresh stream and detector, tearing down any running pair first.
    ///
    /// On failure nothing stays acquired: a stream opened before the detector
    /// failed is stopped before the error is returned.
    pub async fn start(
        &mut self,
        frames: UnboundedSender<TaggedFrame>,
    ) -> Result<(), AcquisitionError> {
        if self.active.is_some() {
            info!("Camera session restarting; releasing previous capture first");
            self.stop();
        }

        self.generation += 1;
        let generation = self.generation;
        let limit = self.acquisition_timeout;
        info!("Starting camera session (generation {})", generation);

        let sink = FrameSink::new(generation, frames);
        let mut stream = match timeout(limit, self.backend.open_stream(sink)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(AcquisitionError::Stream(format!("{:#}", e))),
            Err(_) => return Err(AcquisitionError::Timeout(limit)),
        };

        let detector = match timeout(limit, self.backend.create_detector()).await {
            Ok(Ok(detector)) => detector,
            Ok(Err(e)) => {
                stream.stop();
                return Err(AcquisitionError::Detector(format!("{:#}", e)));
            }
            Err(_) => {
                stream.stop();
                return Err(AcquisitionError::Timeout(limit));
            }
        };

        self.active = Some(ActiveCapture {
            stream,
            detector,
            generation,
        });
        info!("✓ Camera session tracking (generation {})", generation);
        Ok(())
    }

    /// Releases the stream and detector. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.generation += 1;
        match self.active.take() {
            Some(mut active) => {
                active.stream.stop();
                active.detector.close();
                info!("Camera session stopped (generation {})", active.generation);
            }
            None => debug!("Camera session already stopped"),
        }
    }

    /// Runs one delivered frame through detection, classification and debouncing.
    pub fn process_frame(&mut self, tagged: &TaggedFrame) -> Option<TiltSample> {
        let active = match self.active.as_mut() {
            Some(active) if active.generation == tagged.generation => active,
            _ => {
                trace!("Dropping frame from generation {}", tagged.generation);
                return None;
            }
        };

        let faces = match active.detector.detect(&tagged.frame) {
            Ok(faces) => faces,
            Err(e) => {
                debug!("Landmark detection failed: {:#}", e);
                Vec::new()
            }
        };

        self.route_result(tagged.generation, faces.first(), tagged.frame.captured_at)
    }

    /// Entry point for detector results produced off the frame path.
    ///
    /// A result from any generation other than the running one is discarded.
    pub fn route_result(
        &mut self,
        generation: u64,
        face: Option<&LandmarkSet>,
        at: Instant,
    ) -> Option<TiltSample> {
        if self.generation() != Some(generation) {
            trace!("Discarding detector result from generation {}", generation);
            return None;
        }

        let sample = self.classifier.classify(face);
        #[cfg(feature = "xtralog")]
        trace!(
            "Tilt {:.2} deg -> {:?}",
            sample.angle_degrees,
            sample.direction
        );
        self.debouncer.process(&sample, at);
        Some(sample)
    }
}

impl<B: CameraBackend> Drop for CameraSession<B> {
    fn drop(&mut self) {
        if self.active.is_some() {
            self.stop();
        }
    }
}
