//! Contracts for the capture device and the landmark detector.
//!
//! A backend hands out one capture stream and one detector per camera
//! session. Frames are pushed by the stream into a [`FrameSink`] on whatever
//! schedule the device runs at; the sink stamps each frame with the session
//! generation it was opened for so that frames outliving their session can be
//! recognised and dropped.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

use crate::LandmarkSet;

#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub captured_at: Instant,
}

impl VideoFrame {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            captured_at: Instant::now(),
        }
    }

    pub fn with_timestamp(data: Vec<u8>, captured_at: Instant) -> Self {
        Self { data, captured_at }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedFrame {
    pub generation: u64,
    pub frame: VideoFrame,
}

#[derive(Debug, Clone)]
pub struct FrameSink {
    generation: u64,
    tx: UnboundedSender<TaggedFrame>,
}

impl FrameSink {
    pub fn new(generation: u64, tx: UnboundedSender<TaggedFrame>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `false` once the receiving side is gone.
    pub fn push(&self, frame: VideoFrame) -> bool {
        self.tx
            .send(TaggedFrame {
                generation: self.generation,
                frame,
            })
            .is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub trait CaptureStream: Send {
    /// Stop delivering frames and release the device. Must be idempotent.
    fn stop(&mut self);
}

pub trait LandmarkDetector: Send {
    /// Zero or more faces found in `frame`.
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>>;
    fn close(&mut self);
}

#[async_trait]
pub trait CameraBackend: Send {
    async fn open_stream(&mut self, sink: FrameSink) -> Result<Box<dyn CaptureStream>>;
    async fn create_detector(&mut self) -> Result<Box<dyn LandmarkDetector>>;
}
