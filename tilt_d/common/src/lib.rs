pub use api::{
    CameraBackend, FeedbackKind, FeedbackPresenter, LandmarkSet, Question, QuestionBank, Side,
    TaggedFrame, VideoFrame,
};

mod camera_session;
mod classifier;
mod config;
mod controller;
mod debouncer;
mod error;
mod prepare;
pub mod question_bank;
mod quiz;
mod result;

pub use camera_session::{CameraSession, DEFAULT_ACQUISITION_TIMEOUT};
pub use classifier::{TiltClassifier, TiltDirection, TiltSample, DEFAULT_TILT_THRESHOLD_DEG};
pub use config::QuizConfig;
pub use controller::{ControllerEvent, ControllerHandle, SessionController};
pub use debouncer::{
    GestureCallback, GestureDebouncer, GestureEvent, Subscription, DEFAULT_DEBOUNCE,
};
pub use error::{AcquisitionError, SessionError};
pub use prepare::{prepare_questions, PreparedQuestion};
pub use quiz::{Advance, AnswerOutcome, FeedbackTicket, QuizSession, SessionPhase};
pub use result::{ResultBand, SessionResult};
