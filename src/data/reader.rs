use std::fmt;

use crate::{
    bubbles::input::Region,
    data::{log, Program},
};

const HELP: &str = "\
Usage: bubblefield [OPTIONS]

Options:
  --size WxH              Window size (default 960x640)
  --reduced-motion        Fewer, calmer bubbles; the pointer does not push them
  --nav-inset PX          Keep the top PX pixels free of bubbles
  --exclude WxH+X+Y       Mark a region as an interactive element (repeatable)
  --background R G B      Page color the bubbles are tinted against
  --random-background     Pick a random print-like page color
  --seed N                Seed for the random generator
  --fps F                 Frame rate (default 60)
  --frames N              Run N frames without a window and print a summary
  --quiet                 Only print errors
  --verbose               Print debug messages
  --help                  Show this message

Controls:
  Left click              Pop a bubble
  Escape                  Quit
";

const RESO_WARNING: &str = "\
	Bubblefield draws on the CPU, it is not advised \
	to run it at a very large size.\
	";

#[derive(Debug, PartialEq)]
pub enum ArgError {
    MissingValue(&'static str),
    InvalidValue(&'static str, String),
    UnknownOption(String),
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::MissingValue(what) => write!(f, "Expected value for {what}."),
            ArgError::InvalidValue(what, got) => write!(f, "Invalid value for {what}: {got}"),
            ArgError::UnknownOption(arg) => write!(f, "Unknown option {arg}"),
        }
    }
}

type Args<'a, 'b> = std::iter::Peekable<&'b mut dyn Iterator<Item = &'a String>>;

fn value<'a>(args: &mut Args<'a, '_>, what: &'static str) -> Result<&'a String, ArgError> {
    args.next().ok_or(ArgError::MissingValue(what))
}

fn parse<T: std::str::FromStr>(args: &mut Args<'_, '_>, what: &'static str) -> Result<T, ArgError> {
    let v = value(args, what)?;
    v.parse::<T>()
        .map_err(|_| ArgError::InvalidValue(what, v.clone()))
}

fn parse_size(s: &str) -> Option<(u16, u16)> {
    let (w, h) = s.split_once('x')?;
    let (w, h) = (w.parse::<u16>().ok()?, h.parse::<u16>().ok()?);
    (w > 0 && h > 0).then_some((w, h))
}

impl Program {
    /// Apply the command line, reporting bad arguments in red and exiting.
    pub fn eval_args(self, args: &mut dyn Iterator<Item = &String>) -> Self {
        match self.try_eval_args(args) {
            Ok(prog) => prog,
            Err(e) => error!("Argument error: {e}\nRun with --help to see the options."),
        }
    }

    pub fn try_eval_args(
        mut self,
        args: &mut dyn Iterator<Item = &String>,
    ) -> Result<Self, ArgError> {
        let mut size = self.window_size();

        let mut args = args.peekable();
        args.next();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--size" => {
                    let s = value(&mut args, "size")?;
                    size = parse_size(s).ok_or_else(|| ArgError::InvalidValue("size", s.clone()))?;
                }

                "--reduced-motion" => self.REDUCED_MOTION = true,

                "--nav-inset" => {
                    let inset: f32 = parse(&mut args, "nav inset")?;
                    if !(inset >= 0.0) {
                        return Err(ArgError::InvalidValue("nav inset", inset.to_string()));
                    }
                    self.NAV_INSET = inset;
                }

                "--exclude" => {
                    let s = value(&mut args, "region")?;
                    let region = Region::parse(s)
                        .ok_or_else(|| ArgError::InvalidValue("region", s.clone()))?;
                    self.regions.push(region);
                }

                "--background" => {
                    let mut color = [0u8; 3];
                    for (channel, name) in color.iter_mut().zip(["red", "green", "blue"]) {
                        *channel = parse(&mut args, name)?;
                    }
                    self.BACKGROUND = Some(color);
                }

                "--random-background" => self.RANDOM_BACKGROUND = true,

                "--seed" => self.SEED = Some(parse(&mut args, "seed")?),

                "--fps" => {
                    let rate: f64 = parse(&mut args, "refresh rate")?;
                    if !(rate > 0.0) {
                        return Err(ArgError::InvalidValue("refresh rate", rate.to_string()));
                    }
                    self.change_fps_frac((rate * 1000.0) as u32);
                }

                "--frames" => self.HEADLESS_FRAMES = Some(parse(&mut args, "frames")?),

                "--quiet" => log::set_log_level(log::QUIET),

                "--verbose" => log::set_log_level(log::VERBOSE),

                "--help" | "-h" => {
                    print!("{HELP}");
                    std::process::exit(0);
                }

                other => return Err(ArgError::UnknownOption(other.to_string())),
            }
        }

        if size.0 as u32 * size.1 as u32 > 2560 * 1440 {
            alert!("{}", RESO_WARNING);
        }

        self.update_size(size);
        self.rebuild_field();

        Ok(self)
    }
}
