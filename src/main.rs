use anyhow::Context;
use bondlabel::config::ConfigManager;
use bondlabel::pipeline::PipelineRunner;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("loading config {}", path))?;
    }

    let runner = PipelineRunner::new(manager.get());
    let summary = runner.run()?;

    if summary.batches_failed > 0 {
        anyhow::bail!(
            "{} of {} batches failed",
            summary.batches_failed,
            summary.batches_total
        );
    }

    Ok(())
}
