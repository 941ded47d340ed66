use learn_gl::{
    config::Config,
    exercises, logging,
    rasterize::{drawable::Drawable, shader::builtins},
    window::Window,
};

fn main() {
    logging::init_logging();

    if let Err(error) = run() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn run() -> Result<(), learn_gl::Error> {
    let config = Config::read_cli(
        "shader_uniform",
        "Draws a triangle colored through a uniform that changes over time",
        Config::default(),
    )?;

    let mut window = Window::new(config)?;

    let shader = builtins::load_uniform_color_shader()?;
    let triangle = exercises::triangle_mesh()?;

    window.run(|frame| {
        // uniforms are set on the program in use
        shader.use_shader();
        shader.set_vec4("our_color", &exercises::pulsing_green(frame.time));
        triangle.draw(&mut ())?;
        Ok(())
    })
}
