/// Region of the framebuffer that OpenGL renders to. It always
/// covers the whole framebuffer starting at the bottom left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: gl::types::GLsizei,
    height: gl::types::GLsizei,
}

impl Viewport {
    /// `None` for a zero sized framebuffer, glfw reports one when
    /// the window is minimized and it must not reach `glViewport()`.
    pub fn from_framebuffer_size(
        width: gl::types::GLsizei,
        height: gl::types::GLsizei,
    ) -> Option<Self> {
        if width > 0 && height > 0 {
            Some(Self { width, height })
        } else {
            None
        }
    }

    pub fn get_width(&self) -> gl::types::GLsizei {
        self.width
    }

    pub fn get_height(&self) -> gl::types::GLsizei {
        self.height
    }

    /// Sets the opengl viewport
    pub fn set_opengl_viewport(&self) {
        unsafe {
            gl::Viewport(0, 0, self.width, self.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_from_framebuffer_size() {
        let viewport = Viewport::from_framebuffer_size(800, 600).unwrap();
        assert_eq!(viewport.get_width(), 800);
        assert_eq!(viewport.get_height(), 600);
    }

    #[test]
    fn viewport_ignores_minimized_framebuffer() {
        assert_eq!(Viewport::from_framebuffer_size(0, 0), None);
        assert_eq!(Viewport::from_framebuffer_size(800, 0), None);
        assert_eq!(Viewport::from_framebuffer_size(-1, 600), None);
    }
}
