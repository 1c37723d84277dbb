// Focuswatch demo
// Runs the measurement loop over synthetic frames and prints each verdict.

use focuswatch::config::FocusWatchConfig;
use focuswatch::scheduler::{FocusScheduler, PresentationSink};
use focuswatch::testing::{checkerboard_frame, solid_frame, ScriptedSource};
use focuswatch::types::{ResponseMap, Verdict};
use focuswatch::FocusError;

/// Sink that prints the status line for every cycle
struct PrintSink;

impl PresentationSink for PrintSink {
    async fn present(&mut self, verdict: &Verdict, response: &ResponseMap) {
        println!(
            "{}  (response map {}x{})",
            verdict.status_line(),
            response.width,
            response.height
        );
    }

    async fn report_error(&mut self, error: &FocusError) {
        println!("source error: {}", error);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    focuswatch::init_logging();

    let config = FocusWatchConfig::load_or_default();
    config.validate().map_err(FocusError::InvalidConfig)?;
    let [width, height] = config.capture.resolution;

    println!("focuswatch demo");
    println!(
        "  {}x{} at {} fps, blur threshold {}",
        width, height, config.capture.fps, config.analysis.blur_threshold
    );
    println!();

    // Alternate sharp and blurred synthetic frames, then let the script
    // run out so the scheduler stops on its own.
    let mut frames = Vec::new();
    for i in 0..30 {
        if i % 2 == 0 {
            frames.push(checkerboard_frame(width, height, 8));
        } else {
            frames.push(solid_frame(width, height, [128, 128, 128, 255]));
        }
    }

    let source = ScriptedSource::new(frames);
    let mut scheduler = FocusScheduler::from_config(source, PrintSink, &config)?;

    let summary = scheduler.run().await?;
    println!();
    println!(
        "done: {} cycles, {} skipped, stopped because {:?}",
        summary.cycles, summary.skipped, summary.reason
    );

    Ok(())
}
