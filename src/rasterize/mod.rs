pub mod drawable;
pub mod gl_mesh;
pub mod shader;

/// Any struct/enum that stores any OpenGL related memory (buffers,
/// vertex arrays, programs, etc.) must implement [`Rasterize`] to
/// ensure appropriate cleanup can be done. The OpenGL data should be
/// wrapped by an [`Option`], [`Rasterize::cleanup_opengl()`] frees
/// it from the GPU and sets it to [`None`] so that [`Drop::drop()`]
/// can call it again without a double free.
pub trait Rasterize {
    /// Cleanup any OpenGL related data (buffers, etc.).
    fn cleanup_opengl(&mut self);
}
