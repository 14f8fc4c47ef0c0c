use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultBand {
    NoAnswers,
    Outstanding,
    Great,
    Good,
    KeepPracticing,
}

impl ResultBand {
    /// Lower bounds are inclusive: 90, 70 and 50.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Outstanding
        } else if percentage >= 70.0 {
            Self::Great
        } else if percentage >= 50.0 {
            Self::Good
        } else {
            Self::KeepPracticing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoAnswers => "No answers",
            Self::Outstanding => "Outstanding!",
            Self::Great => "Great job!",
            Self::Good => "Good effort",
            Self::KeepPracticing => "Keep practicing",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::NoAnswers => "No questions were answered this time.",
            Self::Outstanding => "You really know this material.",
            Self::Great => "Solid work, just a few slips.",
            Self::Good => "More than half right. Another round will help.",
            Self::KeepPracticing => "Review the unit and give it another go.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u32,
    pub total_answered: usize,
    /// `None` when nothing was answered.
    pub percentage: Option<f64>,
    pub band: ResultBand,
}

impl SessionResult {
    pub fn new(score: u32, total_answered: usize) -> Self {
        if total_answered == 0 {
            return Self {
                score,
                total_answered,
                percentage: None,
                band: ResultBand::NoAnswers,
            };
        }

        // An early end while feedback is still playing counts the score of
        // the answer in flight but not the question itself; cap the ratio.
        let percentage = (f64::from(score) / total_answered as f64 * 100.0).min(100.0);
        Self {
            score,
            total_answered,
            percentage: Some(percentage),
            band: ResultBand::for_percentage(percentage),
        }
    }
}
