//! Landmark input from an out-of-process face-mesh detector.
//!
//! The detector process sends one JSON [`LandmarkPacket`] per camera frame as
//! a UDP datagram. The socket plays the role of the capture device and the
//! JSON decoder plays the role of the landmark detector.

use anyhow::{Context, Result};
use api::{
    CameraBackend, CaptureStream, FrameSink, LandmarkDetector, LandmarkPacket, LandmarkSet,
    VideoFrame,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

const MAX_DATAGRAM: usize = 65535;

pub struct UdpCameraBackend {
    bind_address: String,
    bound: Option<SocketAddr>,
}

impl UdpCameraBackend {
    pub fn new(bind_address: String) -> Self {
        Self {
            bind_address,
            bound: None,
        }
    }

    /// Address of the most recently opened stream.
    pub fn bound_address(&self) -> Option<SocketAddr> {
        self.bound
    }
}

pub struct UdpCaptureStream {
    pump: Option<JoinHandle<()>>,
    local_addr: SocketAddr,
}

impl CaptureStream for UdpCaptureStream {
    fn stop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
            info!("Stopped landmark listener on {}", self.local_addr);
        }
    }
}

impl Drop for UdpCaptureStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Default)]
pub struct JsonLandmarkDecoder {
    frames: u64,
}

impl LandmarkDetector for JsonLandmarkDecoder {
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>> {
        self.frames += 1;
        let packet: LandmarkPacket =
            serde_json::from_slice(&frame.data).context("Malformed landmark packet")?;
        Ok(packet.faces)
    }

    fn close(&mut self) {
        debug!("Landmark decoder closed after {} frame(s)", self.frames);
    }
}

#[async_trait]
impl CameraBackend for UdpCameraBackend {
    async fn open_stream(&mut self, sink: FrameSink) -> Result<Box<dyn CaptureStream>> {
        let socket = UdpSocket::bind(&self.bind_address)
            .await
            .with_context(|| format!("Failed to bind landmark socket on {}", self.bind_address))?;
        let local_addr = socket.local_addr().context("Failed to read socket address")?;
        self.bound = Some(local_addr);
        info!("Listening for landmark frames on {}", local_addr);

        let pump = tokio::spawn(async move {
            let mut buf = vec![0u8; MAX_DATAGRAM];
            loop {
                match socket.recv_from(&mut buf).await {
                    Ok((amt, _src)) => {
                        if !sink.push(VideoFrame::new(buf[..amt].to_vec())) {
                            debug!("Frame receiver gone; landmark listener exiting");
                            break;
                        }
                    }
                    Err(e) => warn!("Error receiving landmark frame: {}", e),
                }
            }
        });

        Ok(Box::new(UdpCaptureStream {
            pump: Some(pump),
            local_addr,
        }))
    }

    async fn create_detector(&mut self) -> Result<Box<dyn LandmarkDetector>> {
        Ok(Box::new(JsonLandmarkDecoder::default()))
    }
}
