//! Output formatting and logging utilities

use crate::history::History;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // HH:MM:SS
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => match File::create(path) {
            Ok(log) => {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false);
                Registry::default().with(file_layer).init();
                info!("Output will be written to: {}", path);
            }
            Err(err) => eprintln!("Could not create output file {}: {}", path, err),
        },
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stdout_layer).init();
        }
    }
}

/// Write the recorded trajectory as a whitespace-separated table, one row per snapshot
pub fn write_history<W: Write>(writer: &mut W, history: &History) -> std::io::Result<()> {
    writeln!(
        writer,
        "# {:>10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>14} {:>14} {:>14} {:>6} {:>6}",
        "time", "x1", "y1", "x2", "y2", "vx1", "vy1", "vx2", "vy2", "kinetic", "potential", "total",
        "walls1", "walls2"
    )?;
    for s in history {
        let [p1, p2] = s.positions;
        let [v1, v2] = s.velocities;
        writeln!(
            writer,
            "  {:>10.3} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>14.8} {:>14.8} {:>14.8} {:>6} {:>6}",
            s.time,
            p1.x,
            p1.y,
            p2.x,
            p2.y,
            v1.x,
            v1.y,
            v2.x,
            v2.y,
            s.energies.kinetic,
            s.energies.potential,
            s.energies.total,
            s.wall_collisions.particle1,
            s.wall_collisions.particle2
        )?;
    }
    Ok(())
}
