use std::path::Path;
use std::sync::Arc;

use lifeplan::backend::{CoachingBackend, HttpBackend};
use lifeplan::cli::{SessionEnd, TerminalSession};
use lifeplan::config::ClientConfig;
use lifeplan::questionnaire::QuestionnaireEngine;
use lifeplan::render;
use lifeplan::results::{ProfileId, ResultsOrchestrator};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the stderr subscriber, plus a daily log file when `log_dir` is set.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "lifeplan.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(file)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr).init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("  export LIFEPLAN_BACKEND_URL=https://your-coach-host");
        std::process::exit(1);
    });

    let _log_guard = init_tracing(config.log_dir.as_deref());

    let http = HttpBackend::new(&config)?;
    match http.health().await {
        Ok(message) => tracing::info!(service = %message, "Coaching service reachable"),
        Err(e) => tracing::warn!("Coaching service health check failed: {}", e),
    }
    let backend: Arc<dyn CoachingBackend> = Arc::new(http);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => run_assessment(backend).await,
        [command, profile_id] if command == "plan" => show_plan(backend, profile_id).await,
        _ => {
            eprintln!("Usage: lifeplan            run the assessment");
            eprintln!("       lifeplan plan <id>  show the plan for a profile");
            std::process::exit(2);
        }
    }
}

async fn run_assessment(backend: Arc<dyn CoachingBackend>) -> anyhow::Result<()> {
    eprintln!("🧭 LifePlan v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   12 questions, about 5 minutes.");
    eprintln!("   Empty line = next, :back = previous, :quit = leave.");
    eprintln!("   Multi-choice: 1,3 or +N/-N to toggle, :none to clear.\n");

    let mut engine = QuestionnaireEngine::standard(Arc::clone(&backend));
    let mut session = TerminalSession::new();

    let questionnaire_id = match session.run(&mut engine).await {
        SessionEnd::Completed(id) => id,
        SessionEnd::Failed => {
            eprintln!("\nYour answers could not be submitted. Please try again later.");
            std::process::exit(1);
        }
        SessionEnd::Abandoned => {
            eprintln!("\nAssessment abandoned; nothing was submitted.");
            return Ok(());
        }
    };

    let mut orchestrator = ResultsOrchestrator::new(backend);
    println!("\n{}", render::render_results(&orchestrator.view()));
    let view = orchestrator.run(&questionnaire_id).await;
    println!("\n{}", render::render_results(&view));
    Ok(())
}

async fn show_plan(backend: Arc<dyn CoachingBackend>, profile_id: &str) -> anyhow::Result<()> {
    let plan = backend.fetch_plan(&ProfileId::new(profile_id)).await?;
    println!("{}", render::render_plan(&plan));
    Ok(())
}
