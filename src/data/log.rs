use std::sync::atomic::{AtomicU8, Ordering};

pub const QUIET: u8 = 0;
pub const NORMAL: u8 = 1;
pub const VERBOSE: u8 = 2;

static LOG_LEVEL: AtomicU8 = AtomicU8::new(NORMAL);

pub fn set_log_level(level: u8) {
    LOG_LEVEL.store(level.min(VERBOSE), Ordering::Relaxed);
}

pub fn log_level() -> u8 {
    LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn enabled(level: u8) -> bool {
    log_level() >= level
}

macro_rules! info {
    ($($arg:tt)*) => {
        if $crate::data::log::enabled($crate::data::log::NORMAL) {
            println!($($arg)*);
        }
    };
}

/// Yellow notice on stderr. Muted by `--quiet`.
macro_rules! alert {
    ($($arg:tt)*) => {
        if $crate::data::log::enabled($crate::data::log::NORMAL) {
            eprintln!("\x1B[33;1m{}\x1B[0m", format_args!($($arg)*));
        }
    };
}

/// Red message on stderr, then exit with status 1. Never muted.
macro_rules! error {
    ($($arg:tt)*) => {{
        eprintln!("\x1B[31;1m{}\x1B[0m", format_args!($($arg)*));
        std::process::exit(1)
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::data::log::enabled($crate::data::log::VERBOSE) {
            println!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_capped() {
        let before = log_level();

        set_log_level(200);
        assert_eq!(log_level(), VERBOSE);
        assert!(enabled(NORMAL));

        set_log_level(QUIET);
        assert!(!enabled(NORMAL));
        assert!(enabled(QUIET));

        set_log_level(before);
    }
}
