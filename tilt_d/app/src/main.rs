use anyhow::{Context, Result};
use api::QuestionBank;
use common::question_bank::JsonQuestionBank;
use common::{prepare_questions, CameraSession, QuizConfig, QuizSession, SessionController};
use log::{debug, error, info};
use std::path::Path;
use tilt_d::feedback::ConsoleFeedback;
use tilt_d::load_config;
use tilt_d::udp_backend::UdpCameraBackend;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting...");
    debug!("Debug logging is active");

    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
        .unwrap_or("config.json");

    let config = load_config(Path::new(config_path)).unwrap_or_else(|e| {
        error!("Failed to load config: {:#}. Using defaults.", e);
        QuizConfig::default()
    });
    info!("Loaded Config: {:?}", config);

    let bank_path = Path::new(&config.question_bank_path);
    let bank = JsonQuestionBank::open(bank_path)?;
    let questions = bank.game_questions(
        config.shuffle,
        config.question_limit,
        config.unit_ids.as_deref(),
    )?;
    let session = match QuizSession::start(prepare_questions(&questions, &mut rand::rng())) {
        Ok(session) => session,
        Err(e) => {
            error!("✗ {}. Add or enable questions in {:?}.", e, bank_path);
            return Err(e.into());
        }
    };

    let mut camera = CameraSession::new(
        UdpCameraBackend::new(config.landmark_address()),
        config.classifier(),
        config.debouncer(),
    )
    .with_acquisition_timeout(config.acquisition_timeout());

    let controller = SessionController::new(
        session,
        ConsoleFeedback::new(config.correct_feedback(), config.incorrect_feedback()),
    );
    let handle = controller.handle();
    let subscription = camera.subscribe(handle.gesture_sink());

    let ctrlc_handle = handle.clone();
    ctrlc::set_handler(move || {
        info!("Received Ctrl-C, ending session...");
        ctrlc_handle.end_session();
    })
    .context("Error setting Ctrl-C handler")?;

    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();
    if let Err(e) = camera.start(frame_tx).await {
        error!("✗ Could not start camera session: {}", e);
        return Err(e.into());
    }

    let mut session_task = tokio::spawn(controller.run());
    let mut frame_count: u64 = 0;
    let log_interval: u64 = 900;
    let mut last_log = std::time::Instant::now();

    let result = loop {
        tokio::select! {
            joined = &mut session_task => break joined.context("Quiz session task failed")?,
            Some(tagged) = frame_rx.recv() => {
                if camera.process_frame(&tagged).is_some() {
                    frame_count += 1;
                    if frame_count.is_multiple_of(log_interval) {
                        let fps = log_interval as f32 / last_log.elapsed().as_secs_f32();
                        info!(
                            "Tracking Active: Processed {} frames (approx {:.1} FPS)",
                            frame_count, fps
                        );
                        last_log = std::time::Instant::now();
                    }
                }
            }
        }
    };

    camera.unsubscribe(&subscription);
    camera.stop();

    println!();
    println!("{}", result.band.label());
    match result.percentage {
        Some(percentage) => println!(
            "Score: {}/{} ({:.0}%)",
            result.score, result.total_answered, percentage
        ),
        None => println!("Score: -"),
    }
    println!("{}", result.band.message());

    info!("Shutting down...");
    Ok(())
}
