//! Bound entry point
//!
//! Loads settings, wires the regions and runs the fixed-period loop with
//! note output going to the log.
//!
//! Usage: `bound [settings.json]`

use std::time::Instant;

use bound::audio::{LogOutput, NoteScheduler};
use bound::frame::Frame;
use bound::{Settings, SettingsError, TickDriver};

fn load_settings() -> Result<Settings, SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => {
            log::info!("Using default settings");
            Ok(Settings::default())
        }
    }
}

fn run(settings: &Settings) -> Result<(), SettingsError> {
    let mut graph = settings.build_graph()?;
    let mut sink = NoteScheduler::new(LogOutput).with_gate_ticks(settings.gate_ticks);
    sink.set_volume(settings.volume);
    sink.set_muted(settings.muted);
    let mut driver = TickDriver::new(settings.tick_period(), settings.max_substeps);

    log::info!(
        "{} region(s), {} ball(s), period {:?}",
        graph.len(),
        graph.ball_count(),
        driver.period()
    );

    let mut last = Instant::now();
    loop {
        std::thread::sleep(driver.period().saturating_sub(driver.pending()));
        let now = Instant::now();
        let elapsed = now.duration_since(last);
        last = now;

        let steps = driver.advance(elapsed, &mut graph, &mut sink);
        for _ in 0..steps {
            sink.service();
        }

        if settings.print_frames && steps > 0 {
            for (id, region) in graph.regions() {
                println!("region {id} (tick {})", driver.ticks());
                print!("{}", Frame::capture(region));
            }
        }

        if settings.run_ticks > 0 && driver.ticks() >= settings.run_ticks {
            break;
        }
    }

    log::info!(
        "Stopped after {} ticks with {} ball(s)",
        driver.ticks(),
        graph.ball_count()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Bound starting...");

    let result = load_settings().and_then(|settings| run(&settings));
    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("bound: {e}");
        std::process::exit(1);
    }
}
