use learn_gl::{config::Config, logging, window::Window};

fn main() {
    logging::init_logging();

    if let Err(error) = run() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn run() -> Result<(), learn_gl::Error> {
    let config = Config::read_cli(
        "hello_window",
        "Opens a window and clears it every frame",
        Config::default(),
    )?;

    let mut window = Window::new(config)?;

    // clearing is all there is to it
    window.run(|_frame| Ok(()))
}
