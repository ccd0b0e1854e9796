pub mod windowed_mode;

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Mode {
    Win,
    /// Fixed number of frames against a manual scheduler, no window.
    Headless(u64),
}

impl Mode {
    pub fn default() -> Mode {
        Mode::Win
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Mode::Win => "window",
            Mode::Headless(_) => "headless",
        }
    }
}
