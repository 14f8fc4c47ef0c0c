use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{GestureDebouncer, TiltClassifier, DEFAULT_TILT_THRESHOLD_DEG};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizConfig {
    /// Roll angle beyond which a tilt counts as left or right.
    pub tilt_threshold_deg: f64,
    /// Minimum gap between two gesture events.
    pub debounce_ms: u64,

    #[serde(default = "default_feedback_ms")]
    pub correct_feedback_ms: u64,
    #[serde(default = "default_feedback_ms")]
    pub incorrect_feedback_ms: u64,

    #[serde(default = "default_acquisition_timeout_ms")]
    pub acquisition_timeout_ms: u64,

    #[serde(default = "default_landmark_address")]
    pub landmark_bind_address: String,
    #[serde(default = "default_landmark_port")]
    pub landmark_port: u16,

    #[serde(default = "default_question_bank_path")]
    pub question_bank_path: String,
    pub shuffle: bool,
    pub question_limit: Option<usize>,
    pub unit_ids: Option<Vec<u64>>,
}

fn default_feedback_ms() -> u64 {
    1500
}

fn default_acquisition_timeout_ms() -> u64 {
    10_000
}

fn default_landmark_address() -> String {
    "127.0.0.1".to_string()
}

fn default_landmark_port() -> u16 {
    9400
}

fn default_question_bank_path() -> String {
    "questions.json".to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            tilt_threshold_deg: DEFAULT_TILT_THRESHOLD_DEG,
            debounce_ms: 800,
            correct_feedback_ms: default_feedback_ms(),
            incorrect_feedback_ms: default_feedback_ms(),
            acquisition_timeout_ms: default_acquisition_timeout_ms(),
            landmark_bind_address: default_landmark_address(),
            landmark_port: default_landmark_port(),
            question_bank_path: default_question_bank_path(),
            shuffle: true,
            question_limit: None,
            unit_ids: None,
        }
    }
}

impl QuizConfig {
    pub fn classifier(&self) -> TiltClassifier {
        TiltClassifier::new(self.tilt_threshold_deg)
    }

    pub fn debouncer(&self) -> GestureDebouncer {
        GestureDebouncer::new(Duration::from_millis(self.debounce_ms))
    }

    pub fn acquisition_timeout(&self) -> Duration {
        Duration::from_millis(self.acquisition_timeout_ms)
    }

    pub fn correct_feedback(&self) -> Duration {
        Duration::from_millis(self.correct_feedback_ms)
    }

    pub fn incorrect_feedback(&self) -> Duration {
        Duration::from_millis(self.incorrect_feedback_ms)
    }

    pub fn landmark_address(&self) -> String {
        format!("{}:{}", self.landmark_bind_address, self.landmark_port)
    }
}
