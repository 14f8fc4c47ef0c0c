use api::{LandmarkSet, Side};
use glam::Vec2;

pub const DEFAULT_TILT_THRESHOLD_DEG: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiltDirection {
    #[default]
    Neutral,
    Left,
    Right,
}

impl TiltDirection {
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Neutral => None,
            Self::Left => Some(Side::Left),
            Self::Right => Some(Side::Right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltSample {
    pub angle_degrees: f64,
    pub direction: TiltDirection,
}

/// Turns the eye line of one face into a signed roll angle and a direction.
///
/// The feed is a mirrored selfie view, so a negative angle is a tilt to the
/// subject's right and a positive one a tilt to their left. There is no
/// hysteresis here; chatter around the threshold is the debouncer's problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltClassifier {
    threshold_deg: f64,
}

impl Default for TiltClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TILT_THRESHOLD_DEG)
    }
}

impl TiltClassifier {
    pub fn new(threshold_deg: f64) -> Self {
        Self {
            threshold_deg: threshold_deg.abs(),
        }
    }

    pub fn threshold_deg(&self) -> f64 {
        self.threshold_deg
    }

    /// Angle in degrees of the line from the left eye to the right eye.
    pub fn tilt_angle(left_eye: Vec2, right_eye: Vec2) -> f64 {
        let dx = f64::from(right_eye.x) - f64::from(left_eye.x);
        let dy = f64::from(right_eye.y) - f64::from(left_eye.y);
        dy.atan2(dx).to_degrees()
    }

    /// Both bounds are exclusive: an angle exactly at the threshold is neutral.
    pub fn direction_for_angle(&self, angle_degrees: f64) -> TiltDirection {
        if angle_degrees < -self.threshold_deg {
            TiltDirection::Right
        } else if angle_degrees > self.threshold_deg {
            TiltDirection::Left
        } else {
            TiltDirection::Neutral
        }
    }

    pub fn classify(&self, face: Option<&LandmarkSet>) -> TiltSample {
        match face.and_then(LandmarkSet::eyes) {
            Some((left, right)) => {
                let angle_degrees = Self::tilt_angle(left, right);
                TiltSample {
                    angle_degrees,
                    direction: self.direction_for_angle(angle_degrees),
                }
            }
            None => TiltSample::default(),
        }
    }
}
