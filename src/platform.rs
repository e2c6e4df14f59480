//! Platform-specific frame pacing.

use std::time::Duration;

/// Sleeps for `duration`, spinning for the tail end when the window has focus.
#[cfg(not(target_os = "emscripten"))]
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

#[cfg(target_os = "emscripten")]
pub fn sleep(duration: Duration, _focused: bool) {
    std::thread::sleep(duration);
}
