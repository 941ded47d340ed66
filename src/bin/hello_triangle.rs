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
        "hello_triangle",
        "Draws a rectangle from two indexed triangles, as wireframe by default",
        exercises::hello_triangle_config(),
    )?;

    let mut window = Window::new(config)?;

    let shader = builtins::load_flat_orange_shader()?;
    let quad = exercises::quad_mesh()?;

    window.run(|_frame| {
        shader.use_shader();
        quad.draw(&mut ())?;
        Ok(())
    })
}
