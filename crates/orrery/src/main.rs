use std::io;

use color_eyre::Report;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use orrery_config::Config;
use tracing::{info, warn};

mod app;
mod logging;
mod login;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let log_path = logging::init()?;
    info!(log = %log_path.display(), ?config, "loaded config");

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(Report::from)
        .and_then(|()| App::new(config).run(terminal));
    log_failure(
        execute!(io::stdout(), DisableMouseCapture),
        "could not disable mouse capture",
    );
    ratatui::restore();
    result
}

/// Log an error that must not stop terminal restoration. Returns whether
/// `result` was ok.
fn log_failure(result: io::Result<()>, what: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!("{what}: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_errors_are_reported_not_dropped() {
        assert!(log_failure(Ok(()), "unused"));
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        assert!(!log_failure(Err(err), "could not disable mouse capture"));
    }
}
