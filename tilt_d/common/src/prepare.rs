use api::{Question, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A question with its two answers placed in the left and right slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedQuestion {
    pub question_id: u64,
    pub text: String,
    pub left_answer: String,
    pub right_answer: String,
    pub correct_side: Side,
}

impl PreparedQuestion {
    pub fn new(question: &Question, correct_side: Side) -> Self {
        let (left_answer, right_answer) = match correct_side {
            Side::Left => (&question.correct_answer, &question.wrong_answer),
            Side::Right => (&question.wrong_answer, &question.correct_answer),
        };
        Self {
            question_id: question.id,
            text: question.text.clone(),
            left_answer: left_answer.clone(),
            right_answer: right_answer.clone(),
            correct_side,
        }
    }

    pub fn answer(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_answer,
            Side::Right => &self.right_answer,
        }
    }

    pub fn correct_answer(&self) -> &str {
        self.answer(self.correct_side)
    }
}

/// Picks the correct side of every question with a fair coin. Order is kept.
pub fn prepare_questions<R: Rng + ?Sized>(
    questions: &[Question],
    rng: &mut R,
) -> Vec<PreparedQuestion> {
    questions
        .iter()
        .map(|question| {
            let side = if rng.random_bool(0.5) {
                Side::Left
            } else {
                Side::Right
            };
            PreparedQuestion::new(question, side)
        })
        .collect()
}
