use std::path::PathBuf;

use anyhow::Result;
use showroom::app::App;
use showroom::formatter::FrameFormatter;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Sets up tracing, builds the scene and runs it until the input script is exhausted.
///
/// The only argument is an optional path to an input script; without it a short demo plays.
pub fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().event_format(FrameFormatter::default()))
        .with(ErrorLayer::default())
        .try_init()?;

    let script = std::env::args_os().nth(1).map(PathBuf::from);
    let mut app = App::new(script.as_deref())?;

    info!(loop_time = ?showroom::constants::LOOP_TIME, "Starting frame loop");
    while app.run()? {}

    let sim = app.simulation();
    info!(
        gate = ?sim.gate_state(),
        state = ?sim.locomotion_state(),
        "Script complete"
    );
    Ok(())
}
