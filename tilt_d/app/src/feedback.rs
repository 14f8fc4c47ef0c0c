use api::{FeedbackDone, FeedbackKind, FeedbackPresenter};
use log::info;
use std::time::Duration;

/// Prints questions and verdicts to the terminal and holds each verdict on
/// screen for a fixed time before reporting completion.
pub struct ConsoleFeedback {
    correct: Duration,
    incorrect: Duration,
}

impl ConsoleFeedback {
    pub fn new(correct: Duration, incorrect: Duration) -> Self {
        Self { correct, incorrect }
    }
}

impl FeedbackPresenter for ConsoleFeedback {
    fn present(&mut self, kind: FeedbackKind, on_complete: FeedbackDone) {
        let hold = match kind {
            FeedbackKind::Correct => {
                println!("  ✓ Correct!");
                self.correct
            }
            FeedbackKind::Incorrect => {
                println!("  ✗ Not quite.");
                self.incorrect
            }
        };

        tokio::spawn(async move {
            tokio::time::sleep(hold).await;
            on_complete();
        });
    }

    fn announce_question(
        &mut self,
        number: usize,
        total: usize,
        text: &str,
        left: &str,
        right: &str,
    ) {
        info!("Showing question {}/{}", number, total);
        println!();
        println!("Question {}/{}: {}", number, total, text);
        println!("  ◀ tilt left:  {}", left);
        println!("  ▶ tilt right: {}", right);
    }
}
