//! Spinner shown while sources download.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Start a ticking spinner with `msg`. Hidden when `quiet` is set.
fn start(msg: impl Into<String>, quiet: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `f` under a spinner, clearing it when done.
pub(crate) fn with_spinner<T>(msg: impl Into<String>, quiet: bool, f: impl FnOnce() -> T) -> T {
    let pb = start(msg, quiet);
    let result = f();
    pb.finish_and_clear();
    result
}
