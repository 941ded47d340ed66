use std::convert::TryInto;

use memoffset::offset_of;

use crate::glm;

use super::drawable::Drawable;
use super::Rasterize;

/// A single float vertex attribute in an interleaved vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertAttribute {
    /// `layout (location = N)` in the vertex shader
    pub location: gl::types::GLuint,
    /// number of floats
    pub components: gl::types::GLint,
    /// byte offset from the start of the vertex
    pub offset: usize,
}

impl VertAttribute {
    pub const fn new(location: gl::types::GLuint, components: gl::types::GLint, offset: usize) -> Self {
        Self {
            location,
            components,
            offset,
        }
    }
}

/// Vertex types that can be uploaded to a vertex buffer as is.
pub trait VertexLayout: Copy {
    fn attributes() -> Vec<VertAttribute>;

    fn stride() -> usize {
        std::mem::size_of::<Self>()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosVert {
    pos: glm::Vec3,
}

impl PosVert {
    pub fn new(pos: glm::Vec3) -> Self {
        Self { pos }
    }

    pub fn get_pos(&self) -> &glm::Vec3 {
        &self.pos
    }
}

impl VertexLayout for PosVert {
    fn attributes() -> Vec<VertAttribute> {
        // positions at attribute location 0
        vec![VertAttribute::new(0, 3, offset_of!(PosVert, pos))]
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosColorVert {
    pos: glm::Vec3,
    color: glm::Vec3,
}

impl PosColorVert {
    pub fn new(pos: glm::Vec3, color: glm::Vec3) -> Self {
        Self { pos, color }
    }

    pub fn get_pos(&self) -> &glm::Vec3 {
        &self.pos
    }

    pub fn get_color(&self) -> &glm::Vec3 {
        &self.color
    }
}

impl VertexLayout for PosColorVert {
    fn attributes() -> Vec<VertAttribute> {
        vec![
            // positions at attribute location 0
            VertAttribute::new(0, 3, offset_of!(PosColorVert, pos)),
            // colors at attribute location 1
            VertAttribute::new(1, 3, offset_of!(PosColorVert, color)),
        ]
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    i1: gl::types::GLuint,
    i2: gl::types::GLuint,
    i3: gl::types::GLuint,
}

impl Triangle {
    pub const fn new(i1: gl::types::GLuint, i2: gl::types::GLuint, i3: gl::types::GLuint) -> Self {
        Self { i1, i2, i3 }
    }

    pub fn indices(&self) -> [gl::types::GLuint; 3] {
        [self.i1, self.i2, self.i3]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    NoVerts,
    IndexOutOfRange { index: gl::types::GLuint, num_verts: usize },
    /// Too much data for the sizes OpenGL accepts
    TooLarge,
    BufferCreation,
    /// Drawn after [`Rasterize::cleanup_opengl()`]
    Released,
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::NoVerts => write!(f, "mesh has no verts"),
            MeshError::IndexOutOfRange { index, num_verts } => write!(
                f,
                "index {} out of range for mesh with {} verts",
                index, num_verts
            ),
            MeshError::TooLarge => write!(f, "mesh data too large for OpenGL"),
            MeshError::BufferCreation => write!(f, "vao, vbo, or ebo couldn't be initialized"),
            MeshError::Released => write!(f, "mesh opengl data already released"),
        }
    }
}

impl std::error::Error for MeshError {}

/// Checks that the data can be uploaded and drawn as is.
pub fn validate<V>(verts: &[V], triangles: Option<&[Triangle]>) -> Result<(), MeshError> {
    if verts.is_empty() {
        return Err(MeshError::NoVerts);
    }
    let max_count = gl::types::GLsizei::MAX as usize;
    if verts.len() > max_count {
        return Err(MeshError::TooLarge);
    }

    if let Some(triangles) = triangles {
        if triangles.len() > max_count / 3 {
            return Err(MeshError::TooLarge);
        }
        if let Some(index) = triangles
            .iter()
            .flat_map(|triangle| triangle.indices())
            .find(|index| *index as usize >= verts.len())
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                num_verts: verts.len(),
            });
        }
    }

    Ok(())
}

#[derive(Debug)]
struct GLBuffers {
    vao: gl::types::GLuint,
    vbo: gl::types::GLuint,
    ebo: Option<gl::types::GLuint>,
}

/// Static vertex data (and optionally index data) uploaded to the
/// GPU, bundled by a vertex array object.
#[derive(Debug)]
pub struct GLMesh {
    // the verts and indices are not stored on the CPU, there is no
    // way to update them after upload.
    num_verts: usize,
    num_triangles: Option<usize>,

    buffers: Option<GLBuffers>,
}

impl GLMesh {
    /// Mesh drawn with `glDrawArrays()`, every 3 verts form a
    /// triangle.
    pub fn new<V: VertexLayout>(verts: &[V]) -> Result<Self, MeshError> {
        validate(verts, None)?;
        Self::setup(verts, None)
    }

    /// Mesh drawn with `glDrawElements()`.
    pub fn with_indices<V: VertexLayout>(
        verts: &[V],
        triangles: &[Triangle],
    ) -> Result<Self, MeshError> {
        validate(verts, Some(triangles))?;
        Self::setup(verts, Some(triangles))
    }

    fn setup<V: VertexLayout>(
        verts: &[V],
        triangles: Option<&[Triangle]>,
    ) -> Result<Self, MeshError> {
        let verts_size: gl::types::GLsizeiptr = (verts.len() * V::stride())
            .try_into()
            .map_err(|_| MeshError::TooLarge)?;
        let stride: gl::types::GLsizei = V::stride().try_into().map_err(|_| MeshError::TooLarge)?;
        let triangles_size: Option<gl::types::GLsizeiptr> = triangles
            .map(|triangles| {
                std::mem::size_of_val(triangles)
                    .try_into()
                    .map_err(|_| MeshError::TooLarge)
            })
            .transpose()?;

        let (vao, vbo, ebo) = unsafe {
            let mut vao: gl::types::GLuint = 0;
            let mut vbo: gl::types::GLuint = 0;
            // generate the buffers needed
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            let ebo = triangles_size.map(|_| {
                let mut ebo: gl::types::GLuint = 0;
                gl::GenBuffers(1, &mut ebo);
                ebo
            });
            (vao, vbo, ebo)
        };

        let buffers = GLBuffers { vao, vbo, ebo };
        if vao == 0 || vbo == 0 || ebo == Some(0) {
            delete_buffers(&buffers);
            return Err(MeshError::BufferCreation);
        }

        unsafe {
            gl::BindVertexArray(vao);

            // bind verts array
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                verts_size,
                verts.as_ptr() as *const gl::types::GLvoid,
                gl::STATIC_DRAW,
            );

            // bind indices array, stays bound to the vao
            if let (Some(ebo), Some(triangles), Some(triangles_size)) =
                (ebo, triangles, triangles_size)
            {
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    triangles_size,
                    triangles.as_ptr() as *const gl::types::GLvoid,
                    gl::STATIC_DRAW,
                );
            }

            V::attributes().iter().for_each(|attribute| {
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    attribute.offset as *const gl::types::GLvoid,
                );
                gl::EnableVertexAttribArray(attribute.location);
            });

            // vbo is registered with the vao by glVertexAttribPointer,
            // safe to unbind. The ebo must not be unbound while the
            // vao is bound.
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        log::debug!(
            "uploaded mesh: vao {} with {} verts, {} triangles",
            vao,
            verts.len(),
            triangles.map_or(verts.len() / 3, |triangles| triangles.len()),
        );

        Ok(Self {
            num_verts: verts.len(),
            num_triangles: triangles.map(|triangles| triangles.len()),
            buffers: Some(buffers),
        })
    }
}

fn delete_buffers(buffers: &GLBuffers) {
    unsafe {
        if buffers.vao != 0 {
            gl::DeleteVertexArrays(1, &buffers.vao);
        }
        if buffers.vbo != 0 {
            gl::DeleteBuffers(1, &buffers.vbo);
        }
        if let Some(ebo) = buffers.ebo.filter(|ebo| *ebo != 0) {
            gl::DeleteBuffers(1, &ebo);
        }
    }
}

impl Drawable for GLMesh {
    type ExtraData = ();
    type Error = MeshError;

    fn draw(&self, _extra_data: &mut Self::ExtraData) -> Result<(), Self::Error> {
        let buffers = self.buffers.as_ref().ok_or(MeshError::Released)?;

        // counts were checked against GLsizei::MAX on creation
        unsafe {
            gl::BindVertexArray(buffers.vao);
            match self.num_triangles {
                Some(num_triangles) => gl::DrawElements(
                    gl::TRIANGLES,
                    (3 * num_triangles) as gl::types::GLsizei,
                    gl::UNSIGNED_INT,
                    std::ptr::null(),
                ),
                None => gl::DrawArrays(gl::TRIANGLES, 0, self.num_verts as gl::types::GLsizei),
            }
            gl::BindVertexArray(0);
        }
        Ok(())
    }
}

impl Rasterize for GLMesh {
    fn cleanup_opengl(&mut self) {
        if let Some(buffers) = self.buffers.take() {
            delete_buffers(&buffers);
        }
    }
}

impl Drop for GLMesh {
    fn drop(&mut self) {
        self.cleanup_opengl();
    }
}
