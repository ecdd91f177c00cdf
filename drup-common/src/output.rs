//! Unified routines to print data.

use ansi_term::{Colour, Style};
use atty::{self, Stream};
use libc::{self, signal};
use std::{fmt::Display, time::Instant};

/// Write a solution line (`"s ..."`) to stdout.
pub fn print_solution(verdict: &str) {
    write_to_stdout!("s {}\n", verdict);
}

/// Write a key-value pair to stdout.
pub fn print_key_value(key: &str, value: impl Display) {
    requires!(key.len() < 35);
    comment!("{:<35} {:>15}", format!("{}:", key), value);
}

/// Restore the default SIGPIPE action, so a closed pipe ends the process.
pub fn install_signal_handler() {
    assert!(unsafe { signal(libc::SIGPIPE, libc::SIG_DFL) } != libc::SIG_ERR);
}

/// Panic on code that cannot be reached.
pub fn unreachable() -> ! {
    invariant!(false, "unreachable");
    panic!("unreachable code reached")
}

/// Colour output only when stdout is a terminal.
fn style(colour: Colour) -> Style {
    if atty::is(Stream::Stdout) {
        colour.normal()
    } else {
        Style::default()
    }
}

pub fn warning_style() -> Style {
    style(Colour::Yellow)
}

pub fn error_style() -> Style {
    style(Colour::Red)
}

/// Prints the time since its creation when dropped, unless disabled.
pub struct Timer {
    name: &'static str,
    start: Instant,
    pub disabled: bool,
}

impl Timer {
    pub fn name(name: &'static str) -> Timer {
        Timer {
            name,
            start: Instant::now(),
            disabled: false,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.disabled {
            return;
        }
        let elapsed = self.start.elapsed();
        print_key_value(
            &format!("{} (s)", self.name),
            format!("{}.{:03}", elapsed.as_secs(), elapsed.subsec_millis()),
        );
    }
}
