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
        "hello_triangle_exercise",
        "Draws two meshes with two different shader programs",
        Config::default(),
    )?;

    let mut window = Window::new(config)?;

    let orange_shader = builtins::load_flat_orange_shader()?;
    let blue_shader = builtins::load_flat_blue_shader()?;

    let quad = exercises::quad_mesh()?;
    let second_triangle = exercises::second_triangle_mesh()?;

    window.run(|_frame| {
        orange_shader.use_shader();
        quad.draw(&mut ())?;

        blue_shader.use_shader();
        second_triangle.draw(&mut ())?;

        Ok(())
    })
}
