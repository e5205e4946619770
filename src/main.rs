use anyhow::Context;
use course_advisor::config::SkillConfig;
use course_advisor::driver::serve;
use course_advisor::kernel::telemetry::recorder::TelemetryRecorder;
use course_advisor::skill::handler::SkillHandler;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries responses.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = SkillConfig::from_env().context("loading skill config")?;
    tracing::info!(skill = %config.skill_name, "Course Advisor booting...");

    let mut recorder = TelemetryRecorder::with_capacity(config.telemetry_capacity);
    let handler = SkillHandler::new(config);

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let turns = serve(&handler, stdin, stdout, &mut recorder).await?;

    let snapshot = recorder.snapshot();
    tracing::info!(turns, snapshot = ?snapshot, "Session summary");
    Ok(())
}
