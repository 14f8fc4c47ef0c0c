use api::{FeedbackDone, FeedbackKind, FeedbackPresenter, Question, Side};
use common::{prepare_questions, QuizSession, ResultBand, SessionController};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

fn session(count: u64) -> QuizSession {
    let questions: Vec<Question> = (1..=count)
        .map(|id| Question {
            id,
            unit_id: 1,
            text: format!("Q{}", id),
            correct_answer: "yes".to_string(),
            wrong_answer: "no".to_string(),
            disabled: false,
        })
        .collect();
    QuizSession::start(prepare_questions(&questions, &mut StdRng::seed_from_u64(3))).unwrap()
}

/// Completes feedback synchronously inside `present`.
#[derive(Default)]
struct InstantFeedback {
    verdicts: Arc<Mutex<Vec<FeedbackKind>>>,
    announced: Arc<Mutex<Vec<usize>>>,
}

impl FeedbackPresenter for InstantFeedback {
    fn present(&mut self, kind: FeedbackKind, on_complete: FeedbackDone) {
        self.verdicts.lock().unwrap().push(kind);
        on_complete();
    }

    fn announce_question(
        &mut self,
        number: usize,
        _total: usize,
        _text: &str,
        _left: &str,
        _right: &str,
    ) {
        self.announced.lock().unwrap().push(number);
    }
}

/// Hands each completion to the test so it decides when feedback ends.
struct ManualFeedback {
    pending: mpsc::UnboundedSender<(FeedbackKind, FeedbackDone)>,
}

impl FeedbackPresenter for ManualFeedback {
    fn present(&mut self, kind: FeedbackKind, on_complete: FeedbackDone) {
        let _ = self.pending.send((kind, on_complete));
    }
}

#[test]
fn synchronous_feedback_drives_session_to_finish() {
    let session = session(3);
    let sides: Vec<Side> = session.questions().iter().map(|q| q.correct_side).collect();
    let presenter = InstantFeedback::default();
    let verdicts = presenter.verdicts.clone();
    let announced = presenter.announced.clone();
    let mut controller = SessionController::new(session, presenter);
    let handle = controller.handle();

    let mut result = None;
    for side in sides {
        assert!(result.is_none());
        handle.send_gesture(side);
        result = controller.process_pending();
    }

    let result = result.expect("session should have finished");
    assert_eq!(result.score, 3);
    assert_eq!(result.total_answered, 3);
    assert_eq!(result.band, ResultBand::Outstanding);
    assert_eq!(*verdicts.lock().unwrap(), vec![FeedbackKind::Correct; 3]);
    assert_eq!(*announced.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn burst_of_gestures_scores_only_one_answer() {
    let session = session(3);
    let wrong = session.questions()[0].correct_side.opposite();
    let right = wrong.opposite();
    let mut controller = SessionController::new(session, InstantFeedback::default());
    let handle = controller.handle();

    handle.send_gesture(wrong);
    handle.send_gesture(right);
    handle.send_gesture(right);
    assert!(controller.process_pending().is_none());

    assert_eq!(controller.session().score(), 0);
    assert_eq!(controller.session().current_index(), 1);
}

#[test]
fn end_session_finalizes_with_answered_count() {
    let session = session(10);
    let first = session.questions()[0].correct_side;
    let mut controller = SessionController::new(session, InstantFeedback::default());
    let handle = controller.handle();

    handle.send_gesture(first);
    assert!(controller.process_pending().is_none());
    handle.end_session();
    let result = controller.process_pending().expect("end should finish the session");

    assert_eq!(result.total_answered, 1);
    assert_eq!(result.score, 1);
}

#[test]
fn gesture_sink_feeds_the_controller() {
    let session = session(2);
    let first = session.questions()[0].correct_side;
    let mut controller = SessionController::new(session, InstantFeedback::default());
    let mut sink = controller.handle().gesture_sink();

    sink(common::GestureEvent {
        direction: first,
        timestamp: std::time::Instant::now(),
    });
    controller.process_pending();

    assert_eq!(controller.session().score(), 1);
    assert_eq!(controller.session().current_index(), 1);
}

#[tokio::test]
async fn run_waits_for_feedback_before_advancing() {
    let session = session(2);
    let sides: Vec<Side> = session.questions().iter().map(|q| q.correct_side).collect();
    let (pending_tx, mut pending_rx) = mpsc::unbounded_channel();
    let controller = SessionController::new(session, ManualFeedback { pending: pending_tx });
    let handle = controller.handle();
    let task = tokio::spawn(controller.run());

    handle.send_gesture(sides[0]);
    let (kind, done) = pending_rx.recv().await.unwrap();
    assert_eq!(kind, FeedbackKind::Correct);

    // Still in feedback: this one must be dropped.
    handle.send_gesture(sides[0].opposite());
    done();

    handle.send_gesture(sides[1].opposite());
    let (kind, done) = pending_rx.recv().await.unwrap();
    assert_eq!(kind, FeedbackKind::Incorrect);
    done();

    let result = task.await.unwrap();
    assert_eq!(result.score, 1);
    assert_eq!(result.total_answered, 2);
    assert_eq!(result.percentage, Some(50.0));
    assert_eq!(result.band, ResultBand::Good);
    assert!(pending_rx.try_recv().is_err());
}

#[tokio::test]
async fn completion_after_end_is_harmless() {
    let session = session(3);
    let first = session.questions()[0].correct_side;
    let (pending_tx, mut pending_rx) = mpsc::unbounded_channel();
    let controller = SessionController::new(session, ManualFeedback { pending: pending_tx });
    let handle = controller.handle();
    let task = tokio::spawn(controller.run());

    handle.send_gesture(first);
    let (_, done) = pending_rx.recv().await.unwrap();
    handle.end_session();
    let result = task.await.unwrap();

    // The controller is gone; completing late must not panic.
    done();
    assert_eq!(result.total_answered, 0);
    assert!(!handle.send_gesture(first));
}
