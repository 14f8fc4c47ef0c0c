//! Async driver that connects gestures, feedback and "end session" requests
//! to a [`QuizSession`].
//!
//! All inputs arrive on one channel and are handled one at a time, so the
//! input gate is checked and closed without any await in between.

use api::{FeedbackPresenter, Side};
use log::{debug, trace};
use std::time::Instant;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::{Advance, FeedbackTicket, GestureEvent, QuizSession, SessionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    Gesture(GestureEvent),
    FeedbackComplete(FeedbackTicket),
    EndSession,
}

#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: UnboundedSender<ControllerEvent>,
}

impl ControllerHandle {
    /// Returns `false` if the controller has already finished.
    pub fn send_gesture(&self, direction: Side) -> bool {
        self.tx
            .send(ControllerEvent::Gesture(GestureEvent {
                direction,
                timestamp: Instant::now(),
            }))
            .is_ok()
    }

    pub fn end_session(&self) -> bool {
        self.tx.send(ControllerEvent::EndSession).is_ok()
    }

    /// A debouncer callback forwarding every gesture into this controller.
    pub fn gesture_sink(&self) -> impl FnMut(GestureEvent) + Send + 'static {
        let tx = self.tx.clone();
        move |event| {
            if tx.send(ControllerEvent::Gesture(event)).is_err() {
                trace!("Gesture after controller shutdown dropped");
            }
        }
    }
}

pub struct SessionController<F: FeedbackPresenter> {
    session: QuizSession,
    presenter: F,
    tx: UnboundedSender<ControllerEvent>,
    rx: UnboundedReceiver<ControllerEvent>,
    announced: bool,
}

impl<F: FeedbackPresenter> SessionController<F> {
    pub fn new(session: QuizSession, presenter: F) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            presenter,
            tx,
            rx,
            announced: false,
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn presenter(&self) -> &F {
        &self.presenter
    }

    /// Applies one event. Returns the result once the session has finished.
    pub fn handle_event(&mut self, event: ControllerEvent) -> Option<SessionResult> {
        if !self.announced {
            self.announce_current();
        }

        if let Some(result) = self.session.result() {
            trace!("Session finished; dropping {:?}", event);
            return Some(result.clone());
        }

        match event {
            ControllerEvent::Gesture(gesture) => {
                let outcome = self.session.answer(gesture.direction)?;
                let tx = self.tx.clone();
                let ticket = outcome.ticket;
                self.presenter.present(
                    outcome.feedback_kind(),
                    Box::new(move || {
                        let _ = tx.send(ControllerEvent::FeedbackComplete(ticket));
                    }),
                );
                None
            }
            ControllerEvent::FeedbackComplete(ticket) => {
                match self.session.feedback_complete(ticket) {
                    Advance::Next(_) => {
                        self.announce_current();
                        None
                    }
                    Advance::Finished(result) => Some(result),
                    Advance::Ignored => None,
                }
            }
            ControllerEvent::EndSession => Some(self.session.end_session()),
        }
    }

    /// Handles everything already queued without waiting.
    pub fn process_pending(&mut self) -> Option<SessionResult> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if let Some(result) = self.handle_event(event) {
                        return Some(result);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Drives the session to completion.
    pub async fn run(mut self) -> SessionResult {
        if !self.announced {
            self.announce_current();
        }

        while let Some(event) = self.rx.recv().await {
            if let Some(result) = self.handle_event(event) {
                debug!("Session controller exiting");
                return result;
            }
        }
        self.session.end_session()
    }

    fn announce_current(&mut self) {
        self.announced = true;
        let total = self.session.len();
        let number = self.session.current_index() + 1;
        if let Some(question) = self.session.current_question() {
            self.presenter.announce_question(
                number,
                total,
                &question.text,
                &question.left_answer,
                &question.right_answer,
            );
        }
    }
}
