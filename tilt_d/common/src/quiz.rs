use api::{FeedbackKind, Side};
use log::{debug, info, trace};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{PreparedQuestion, SessionError, SessionResult};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingAnswer(usize),
    Advancing(usize),
    Finished,
}

/// Identifies the feedback run for one answered question of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTicket {
    session: u64,
    index: usize,
}

impl FeedbackTicket {
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub index: usize,
    pub chosen: Side,
    pub correct: bool,
    pub score: u32,
    pub ticket: FeedbackTicket,
}

impl AnswerOutcome {
    pub fn feedback_kind(&self) -> FeedbackKind {
        if self.correct {
            FeedbackKind::Correct
        } else {
            FeedbackKind::Incorrect
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Next(usize),
    Finished(SessionResult),
    /// Completion for a question that is no longer advancing, or a session that is gone.
    Ignored,
}

pub struct QuizSession {
    id: u64,
    questions: Vec<PreparedQuestion>,
    current_index: usize,
    score: u32,
    accepting_input: bool,
    phase: SessionPhase,
    result: Option<SessionResult>,
}

impl QuizSession {
    pub fn start(questions: Vec<PreparedQuestion>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        info!("Quiz session {} started with {} question(s)", id, questions.len());
        Ok(Self {
            id,
            questions,
            current_index: 0,
            score: 0,
            accepting_input: true,
            phase: SessionPhase::AwaitingAnswer(0),
            result: None,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn accepting_input(&self) -> bool {
        self.accepting_input
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[PreparedQuestion] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&PreparedQuestion> {
        match self.phase {
            SessionPhase::Finished => None,
            _ => self.questions.get(self.current_index),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Scores a gesture against the current question.
    ///
    /// The input gate is closed before anything else happens, so a second
    /// gesture for the same question is always dropped.
    pub fn answer(&mut self, side: Side) -> Option<AnswerOutcome> {
        let index = match self.phase {
            SessionPhase::AwaitingAnswer(index) if self.accepting_input => index,
            _ => {
                debug!("Ignoring {} gesture; not accepting input", side.as_str());
                return None;
            }
        };
        self.accepting_input = false;

        let correct = self.questions[index].correct_side == side;
        if correct {
            self.score += 1;
        }
        self.phase = SessionPhase::Advancing(index);

        info!(
            "Question {}/{} answered {} ({}), score {}",
            index + 1,
            self.questions.len(),
            side.as_str(),
            if correct { "correct" } else { "incorrect" },
            self.score
        );

        Some(AnswerOutcome {
            index,
            chosen: side,
            correct,
            score: self.score,
            ticket: FeedbackTicket {
                session: self.id,
                index,
            },
        })
    }

    /// Moves past the question the feedback was played for.
    pub fn feedback_complete(&mut self, ticket: FeedbackTicket) -> Advance {
        if ticket.session != self.id || self.phase != SessionPhase::Advancing(ticket.index) {
            trace!(
                "Discarding stale feedback completion for question {} of session {}",
                ticket.index + 1,
                ticket.session
            );
            return Advance::Ignored;
        }

        let next = ticket.index + 1;
        if next < self.questions.len() {
            self.current_index = next;
            self.accepting_input = true;
            self.phase = SessionPhase::AwaitingAnswer(next);
            debug!("Advancing to question {}/{}", next + 1, self.questions.len());
            Advance::Next(next)
        } else {
            Advance::Finished(self.finish(self.questions.len()))
        }
    }

    /// Ends the session now. Only questions already moved past count as answered.
    pub fn end_session(&mut self) -> SessionResult {
        if let Some(result) = &self.result {
            return result.clone();
        }
        info!("Quiz session {} ended early", self.id);
        self.finish(self.current_index)
    }

    fn finish(&mut self, total_answered: usize) -> SessionResult {
        self.accepting_input = false;
        self.phase = SessionPhase::Finished;
        let result = SessionResult::new(self.score, total_answered);
        info!(
            "Quiz session {} finished: {}/{} ({})",
            self.id,
            result.score,
            result.total_answered,
            result.band.label()
        );
        self.result = Some(result.clone());
        result
    }
}
