#[macro_use]
mod data;

mod bubbles;
mod graphics;
mod math;
mod modes;

use data::Program;
use modes::{windowed_mode::winit_main, Mode};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut prog = Program::new().eval_args(&mut args.iter());

    prog.print_startup_info();

    match prog.mode() {
        Mode::Headless(frames) => {
            let summary = prog.run_headless(frames);
            info!("{}", summary);
        }

        Mode::Win => winit_main(prog),
    }
}
