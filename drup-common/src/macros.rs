//! Macros and other utility code.

/// This should be used for every write to stdout.
#[macro_export]
macro_rules! write_to_stdout {
    ($($arg:tt)*) => ({
        use std::io::Write;
        match write!(std::io::stdout(), $($arg)*) {
            Ok(()) => (),
            // Don't panic on SIGPIPE.
            Err(ref err) if err.kind() == std::io::ErrorKind::BrokenPipe => std::process::exit(141),
            Err(ref err) => panic!("{}", err),
        };
    })
}

/// Print to stdout, without newline.
#[macro_export]
macro_rules! puts {
    ($($arg:tt)*) => ({
        $crate::write_to_stdout!($($arg)*);
    })
}

/// Print a line if the flags ask for verbose output.
#[macro_export]
macro_rules! log {
    ($flags:expr, $($arg:tt)*) => {
        if $crate::config::ENABLE_LOGGING && $flags.verbose {
            $crate::write_to_stdout!($($arg)*);
            $crate::write_to_stdout!("\n");
        }
    };
}

/// Print to stdout, prefixed by "c ".
#[macro_export]
macro_rules! comment {
    ($($arg:tt)*) => ({
        $crate::write_to_stdout!("c ");
        $crate::write_to_stdout!($($arg)*);
        $crate::write_to_stdout!("\n");
    })
}

/// Run some printing code with yellow font color (if stdout is a terminal).
#[macro_export]
macro_rules! as_warning {
    ($what:expr) => {{
        let style = $crate::output::warning_style();
        $crate::write_to_stdout!("{}", style.prefix());
        $what;
        $crate::write_to_stdout!("{}", style.suffix());
    }};
}

/// Run some printing code with red font color (if stdout is a terminal).
#[macro_export]
macro_rules! as_error {
    ($what:expr) => {{
        let style = $crate::output::error_style();
        $crate::write_to_stdout!("{}", style.prefix());
        $what;
        $crate::write_to_stdout!("{}", style.suffix());
    }};
}

/// Print a warning line to stdout.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => ({
        $crate::as_warning!({
            $crate::write_to_stdout!("c Warning: ");
            $crate::write_to_stdout!($($arg)*);
        });
        $crate::write_to_stdout!("\n");
    })
}

/// Report a fatal error and exit.
#[macro_export]
macro_rules! die {
    ($($arg:tt)*) => ({
        $crate::as_error!({
            $crate::write_to_stdout!("Error: ");
            $crate::write_to_stdout!($($arg)*);
        });
        $crate::write_to_stdout!("\n");
        std::process::exit(2);
    })
}

/// Native assertions cannot be disabled, that's why we prefer to use this
/// macro.
#[macro_export]
macro_rules! invariant {
    ($($arg:tt)*) => ({
        if $crate::config::CHECK_INVARIANTS {
            assert!($($arg)*);
        }
    })
}

/// Like invariant, but for preconditions.
#[macro_export]
macro_rules! requires {
    ($($arg:tt)*) => ({
        if $crate::config::CHECK_PRECONDITIONS {
            assert!($($arg)*);
        }
    })
}
