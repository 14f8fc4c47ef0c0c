use anyhow::{Context, Result};
use api::{LandmarkPacket, LandmarkSet, FACE_MESH_POINTS, LEFT_EYE_INDEX, RIGHT_EYE_INDEX};
use glam::Vec2;
use log::info;
use std::net::UdpSocket;
use std::thread;
use std::time::{Duration, Instant};

const FPS: u64 = 30;
const EYE_HALF_SPAN: f32 = 0.07;

#[derive(Debug, Clone, Copy)]
enum Pose {
    Level,
    Left,
    Right,
    Away,
}

impl Pose {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "n" | "level" => Some(Self::Level),
            "l" | "left" => Some(Self::Left),
            "r" | "right" => Some(Self::Right),
            "x" | "away" => Some(Self::Away),
            _ => None,
        }
    }

    /// Roll in the mirrored camera frame: positive reads as a left tilt.
    fn roll_degrees(self) -> f32 {
        match self {
            Self::Level | Self::Away => 0.0,
            Self::Left => 22.0,
            Self::Right => -22.0,
        }
    }
}

fn face(roll_degrees: f32) -> LandmarkSet {
    let center = Vec2::new(0.5, 0.45);
    let (sin, cos) = roll_degrees.to_radians().sin_cos();
    let half = Vec2::new(cos, sin) * EYE_HALF_SPAN;
    let mut points = vec![center; FACE_MESH_POINTS];
    points[LEFT_EYE_INDEX] = center - half;
    points[RIGHT_EYE_INDEX] = center + half;
    LandmarkSet::new(points)
}

fn packet(pose: Pose) -> LandmarkPacket {
    match pose {
        Pose::Away => LandmarkPacket::default(),
        _ => LandmarkPacket {
            faces: vec![face(pose.roll_degrees())],
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let target = args
        .first()
        .cloned()
        .unwrap_or_else(|| "127.0.0.1:9400".to_string());
    let script: Vec<Pose> = match args.get(1) {
        Some(s) => s
            .split(',')
            .map(|step| {
                Pose::parse(step.trim()).with_context(|| format!("Unknown pose '{}'", step))
            })
            .collect::<Result<_>>()?,
        None => vec![Pose::Level, Pose::Left, Pose::Level, Pose::Right],
    };
    let hold = Duration::from_millis(1500);

    let socket = UdpSocket::bind("0.0.0.0:0").context("Failed to bind UDP socket")?;
    socket
        .connect(&target)
        .with_context(|| format!("Failed to connect to {}", target))?;

    println!("Sending simulated landmarks to {} at {} FPS...", target, FPS);
    let frame_time = Duration::from_millis(1000 / FPS);

    loop {
        for pose in &script {
            info!("Pose: {:?}", pose);
            let payload = serde_json::to_vec(&packet(*pose))?;
            let started = Instant::now();
            while started.elapsed() < hold {
                if let Err(e) = socket.send(&payload) {
                    eprintln!("Error sending frame: {}", e);
                }
                thread::sleep(frame_time);
            }
        }
    }
}
