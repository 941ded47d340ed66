pub mod config;
pub mod error;
pub mod exercises;
pub mod fps;
pub mod logging;
pub mod rasterize;
pub mod screenshot;
pub mod util;
pub mod viewport;
pub mod window;

pub use error::Error;
pub use nalgebra_glm as glm;
