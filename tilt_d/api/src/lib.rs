mod camera;
pub use camera::{
    CameraBackend, CaptureStream, FrameSink, LandmarkDetector, TaggedFrame, VideoFrame,
};

use anyhow::Result;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Face-mesh index of the left eye reference point.
pub const LEFT_EYE_INDEX: usize = 33;
/// Face-mesh index of the right eye reference point.
pub const RIGHT_EYE_INDEX: usize = 263;
/// Points in a refined face mesh (468 face points plus 10 iris points).
pub const FACE_MESH_POINTS: usize = 478;

/// One face's landmarks in normalized image coordinates ([0, 1] per axis).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    pub points: Vec<Vec2>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    pub fn left_eye(&self) -> Option<Vec2> {
        self.get(LEFT_EYE_INDEX)
    }

    pub fn right_eye(&self) -> Option<Vec2> {
        self.get(RIGHT_EYE_INDEX)
    }

    /// Both eye reference points, or `None` if the set is too short to hold them.
    pub fn eyes(&self) -> Option<(Vec2, Vec2)> {
        Some((self.left_eye()?, self.right_eye()?))
    }
}

/// Wire format of one detector result: zero or more faces, first one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPacket {
    #[serde(default)]
    pub faces: Vec<LandmarkSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub unit_id: u64,
    pub text: String,
    pub correct_answer: String,
    pub wrong_answer: String,
    #[serde(default)]
    pub disabled: bool,
}

pub trait QuestionBank {
    /// Enabled questions, optionally restricted to `unit_ids`, shuffled and truncated to `limit`.
    fn game_questions(
        &self,
        shuffle: bool,
        limit: Option<usize>,
        unit_ids: Option<&[u64]>,
    ) -> Result<Vec<Question>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

/// Completion callback handed to a feedback presenter. Call it exactly once.
pub type FeedbackDone = Box<dyn FnOnce() + Send>;

pub trait FeedbackPresenter: Send {
    /// Play the verdict and invoke `on_complete` once it has finished.
    fn present(&mut self, kind: FeedbackKind, on_complete: FeedbackDone);

    /// Show a question with its answers in the left and right slots.
    fn announce_question(
        &mut self,
        _number: usize,
        _total: usize,
        _text: &str,
        _left: &str,
        _right: &str,
    ) {
    }
}
