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
        "shader_vertex_color",
        "Draws a triangle with a color per vertex, interpolated across the face",
        Config::default(),
    )?;

    let mut window = Window::new(config)?;

    let shader = builtins::load_vertex_color_shader()?;
    let triangle = exercises::colored_triangle_mesh()?;

    window.run(|_frame| {
        shader.use_shader();
        triangle.draw(&mut ())?;
        Ok(())
    })?;

    log::info!(
        "maximum number of vertex attributes supported: {}",
        window.max_vertex_attribs()
    );

    Ok(())
}
