use crate::config::ConfigError;
use crate::rasterize::gl_mesh::MeshError;
use crate::rasterize::shader::ShaderError;
use crate::screenshot::ScreenshotError;
use crate::window::WindowError;

/// Any error an exercise can run into, lets `main()` use `?` across
/// the modules.
#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Window(WindowError),
    Shader(ShaderError),
    Mesh(MeshError),
    Screenshot(ScreenshotError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(error) => write!(f, "config: {}", error),
            Error::Window(error) => write!(f, "window: {}", error),
            Error::Shader(error) => write!(f, "shader: {}", error),
            Error::Mesh(error) => write!(f, "mesh: {}", error),
            Error::Screenshot(error) => write!(f, "screenshot: {}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(error) => Some(error),
            Error::Window(error) => Some(error),
            Error::Shader(error) => Some(error),
            Error::Mesh(error) => Some(error),
            Error::Screenshot(error) => Some(error),
        }
    }
}

macro_rules! impl_from_error {
    ( $variant:ident ; $error:ty ) => {
        impl From<$error> for Error {
            fn from(error: $error) -> Self {
                Error::$variant(error)
            }
        }
    };
}

impl_from_error!(Config; ConfigError);
impl_from_error!(Window; WindowError);
impl_from_error!(Shader; ShaderError);
impl_from_error!(Mesh; MeshError);
impl_from_error!(Screenshot; ScreenshotError);
