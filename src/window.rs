use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

use glfw::{Action, Context, Key};

use crate::config::{Config, PolygonMode};
use crate::fps::FPS;
use crate::screenshot;
use crate::util::duration_to_string;
use crate::viewport::Viewport;
use crate::Error;

#[derive(Debug)]
pub enum WindowError {
    Init(glfw::InitError),
    Creation,
    /// OpenGL function pointers couldn't be loaded
    GlLoad,
    ZeroSizedFramebuffer,
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::Init(error) => write!(f, "failed to initialize glfw: {:?}", error),
            WindowError::Creation => write!(f, "failed to create glfw window"),
            WindowError::GlLoad => write!(f, "failed to load OpenGL functions"),
            WindowError::ZeroSizedFramebuffer => write!(f, "window framebuffer has no area"),
        }
    }
}

impl std::error::Error for WindowError {}

/// Passed to the draw function of [`Window::run()`] every frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Number of frames drawn before this one
    pub index: u64,
    /// Seconds since glfw was initialized
    pub time: f64,
}

/// A single window with a current OpenGL core profile context.
///
/// Field order matters, the window is destroyed before glfw.
pub struct Window {
    window: glfw::Window,
    events: Receiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,

    config: Config,
    viewport: Viewport,
    polygon_mode: PolygonMode,
    interrupted: Arc<AtomicBool>,
}

impl Window {
    pub fn new(config: Config) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::LOG_ERRORS).map_err(WindowError::Init)?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        // creating window
        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::Creation)?;

        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);
        window.make_current();

        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        gl::load_with(|symbol| window.get_proc_address(symbol));
        if !(gl::Viewport::is_loaded()
            && gl::CreateShader::is_loaded()
            && gl::GenVertexArrays::is_loaded())
        {
            return Err(WindowError::GlLoad);
        }

        log::info!(
            "OpenGL {} on {}",
            get_gl_string(gl::VERSION),
            get_gl_string(gl::RENDERER)
        );

        let viewport = {
            let (framebuffer_width, framebuffer_height) = window.get_framebuffer_size();
            Viewport::from_framebuffer_size(framebuffer_width, framebuffer_height)
                .ok_or(WindowError::ZeroSizedFramebuffer)?
        };
        viewport.set_opengl_viewport();

        let interrupted = Arc::new(AtomicBool::new(false));
        {
            let interrupted = interrupted.clone();
            if let Err(error) = ctrlc::set_handler(move || {
                interrupted.store(true, Ordering::SeqCst);
            }) {
                log::warn!("couldn't set interrupt handler: {}", error);
            }
        }

        let polygon_mode = config.polygon_mode;
        let res = Self {
            window,
            events,
            glfw,
            config,
            viewport,
            polygon_mode,
            interrupted,
        };
        res.apply_polygon_mode();

        Ok(res)
    }

    /// Maximum number of vertex attributes the driver supports
    pub fn max_vertex_attribs(&self) -> gl::types::GLint {
        let mut max_attribs = 0;
        unsafe {
            gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut max_attribs);
        }
        max_attribs
    }

    pub fn set_polygon_mode(&mut self, polygon_mode: PolygonMode) {
        self.polygon_mode = polygon_mode;
        self.apply_polygon_mode();
    }

    fn apply_polygon_mode(&self) {
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, self.polygon_mode.to_gl());
        }
    }

    /// Run the render loop until the window is asked to close.
    ///
    /// Every frame the framebuffer is cleared to the configured
    /// color before `draw` is called.
    pub fn run<F>(&mut self, mut draw: F) -> Result<(), Error>
    where
        F: FnMut(&Frame) -> Result<(), Error>,
    {
        let start = Instant::now();
        let mut fps = FPS::default();
        let mut frame = Frame {
            index: 0,
            time: self.glfw.get_time(),
        };
        let mut screenshot_taken = false;

        while !self.window.should_close() {
            self.process_input();

            unsafe {
                let clear_color = &self.config.clear_color;
                gl::ClearColor(
                    clear_color[0],
                    clear_color[1],
                    clear_color[2],
                    clear_color[3],
                );
                gl::Clear(gl::COLOR_BUFFER_BIT);
            }

            frame.time = self.glfw.get_time();
            draw(&frame)?;
            frame.index += 1;

            if self
                .config
                .frames
                .map_or(false, |frames| frame.index >= frames)
            {
                self.window.set_should_close(true);
            }

            // back buffer is only defined until the swap
            if self.window.should_close() {
                if let Some(path) = self.config.screenshot.as_ref() {
                    screenshot::save_framebuffer(path, &self.viewport)?;
                    screenshot_taken = true;
                }
            }

            self.window.swap_buffers();
            self.glfw.poll_events();

            let events: Vec<_> = glfw::flush_messages(&self.events)
                .map(|(_, event)| event)
                .collect();
            events
                .into_iter()
                .for_each(|event| self.handle_event(event));

            fps.update_and_get(self.config.max_fps);
        }

        if self.config.screenshot.is_some() && !screenshot_taken {
            log::warn!("window closed by the window manager, no screenshot saved");
        }

        log::info!(
            "rendered {} frames in {} ({:.2} fps)",
            frame.index,
            duration_to_string(start.elapsed()),
            fps.get_last_processed()
        );

        Ok(())
    }

    fn process_input(&mut self) {
        if self.window.get_key(Key::Escape) == Action::Press {
            self.window.set_should_close(true);
        }
        if self.interrupted.swap(false, Ordering::SeqCst) {
            log::info!("interrupted, closing window");
            self.window.set_should_close(true);
        }
    }

    fn handle_event(&mut self, event: glfw::WindowEvent) {
        match event {
            glfw::WindowEvent::FramebufferSize(width, height) => {
                if let Some(viewport) = Viewport::from_framebuffer_size(width, height) {
                    log::debug!("framebuffer resized to {}x{}", width, height);
                    viewport.set_opengl_viewport();
                    self.viewport = viewport;
                }
            }
            glfw::WindowEvent::Key(Key::W, _, Action::Press, _) => {
                self.set_polygon_mode(self.polygon_mode.toggled());
                log::debug!("polygon mode {:?}", self.polygon_mode);
            }
            _ => {}
        }
    }
}

/// `glGetString()` as an owned `String`, empty if unavailable
fn get_gl_string(name: gl::types::GLenum) -> String {
    unsafe {
        let string = gl::GetString(name);
        if string.is_null() {
            String::new()
        } else {
            std::ffi::CStr::from_ptr(string as *const std::os::raw::c_char)
                .to_string_lossy()
                .into_owned()
        }
    }
}
