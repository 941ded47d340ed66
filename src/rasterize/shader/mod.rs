use std::convert::TryFrom;
use std::ffi::CString;

use super::Rasterize;
use crate::glm;
use crate::util::info_log_to_string;

pub mod builtins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_gl(self) -> gl::types::GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ShaderError {
    /// Source code has a nul byte in it, cannot be handed to OpenGL
    InteriorNul(ShaderStage),
    VertexCompile(String),
    FragmentCompile(String),
    ProgramLinker(String),
}

impl std::fmt::Display for ShaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderError::InteriorNul(stage) => {
                write!(f, "{} shader source contains a nul byte", stage)
            }
            ShaderError::VertexCompile(error_log) => {
                write!(f, "vertex shader compile error with log: {}", error_log)
            }
            ShaderError::FragmentCompile(error_log) => {
                write!(f, "fragment shader compile error with log: {}", error_log)
            }
            ShaderError::ProgramLinker(error_log) => {
                write!(f, "program linker error with log: {}", error_log)
            }
        }
    }
}

impl std::error::Error for ShaderError {}

type GetObjectIv = unsafe fn(gl::types::GLuint, gl::types::GLenum, *mut gl::types::GLint);
type GetObjectInfoLog = unsafe fn(
    gl::types::GLuint,
    gl::types::GLsizei,
    *mut gl::types::GLsizei,
    *mut gl::types::GLchar,
);

/// Fetch the complete info log of a shader or program object. Works
/// for both since the query functions only differ by name.
fn get_info_log(
    object: gl::types::GLuint,
    get_iv: GetObjectIv,
    get_log: GetObjectInfoLog,
) -> String {
    let mut max_length: gl::types::GLint = 0;
    unsafe {
        get_iv(object, gl::INFO_LOG_LENGTH, &mut max_length);
    }

    let buffer_len = usize::try_from(max_length).unwrap_or(0);
    if buffer_len == 0 {
        return String::new();
    }

    let mut log: Vec<u8> = vec![0; buffer_len];
    let mut written: gl::types::GLsizei = 0;
    unsafe {
        get_log(
            object,
            max_length,
            &mut written,
            log.as_mut_ptr() as *mut gl::types::GLchar,
        );
    }

    info_log_to_string(&log, usize::try_from(written).unwrap_or(0))
}

fn compile_stage(stage: ShaderStage, code: &str) -> Result<gl::types::GLuint, ShaderError> {
    let code = CString::new(code).map_err(|_| ShaderError::InteriorNul(stage))?;

    let shader = unsafe {
        let shader = gl::CreateShader(stage.to_gl());
        gl::ShaderSource(shader, 1, &code.as_ptr(), std::ptr::null());
        gl::CompileShader(shader);
        shader
    };

    let mut success: gl::types::GLint = -10;
    unsafe {
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    }
    if success != gl::types::GLint::from(gl::TRUE) {
        let log = get_info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog);
        log::error!("{} shader didn't compile:\n{}", stage, log);

        unsafe {
            gl::DeleteShader(shader);
        }

        return Err(match stage {
            ShaderStage::Vertex => ShaderError::VertexCompile(log),
            ShaderStage::Fragment => ShaderError::FragmentCompile(log),
        });
    }

    Ok(shader)
}

/// A linked vertex + fragment program. The program is deleted when
/// dropped so it must not outlive the OpenGL context.
#[derive(Debug)]
pub struct Shader {
    program_id: Option<gl::types::GLuint>,
}

impl Shader {
    pub fn from_strings(vertex_code: &str, fragment_code: &str) -> Result<Shader, ShaderError> {
        let vertex_shader = compile_stage(ShaderStage::Vertex, vertex_code)?;
        let fragment_shader = match compile_stage(ShaderStage::Fragment, fragment_code) {
            Ok(fragment_shader) => fragment_shader,
            Err(error) => {
                unsafe {
                    gl::DeleteShader(vertex_shader);
                }
                return Err(error);
            }
        };

        let shader_program: gl::types::GLuint;
        unsafe {
            shader_program = gl::CreateProgram();
            gl::AttachShader(shader_program, vertex_shader);
            gl::AttachShader(shader_program, fragment_shader);
            gl::LinkProgram(shader_program);
        }

        // stages are not needed once linking is done, successful or not
        unsafe {
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);
        }

        let mut success: gl::types::GLint = -10;
        unsafe {
            gl::GetProgramiv(shader_program, gl::LINK_STATUS, &mut success);
        }
        if success != gl::types::GLint::from(gl::TRUE) {
            let log = get_info_log(shader_program, gl::GetProgramiv, gl::GetProgramInfoLog);
            log::error!("program not linked:\n{}", log);

            unsafe {
                gl::DeleteProgram(shader_program);
            }

            return Err(ShaderError::ProgramLinker(log));
        }

        let shader = Shader {
            program_id: Some(shader_program),
        };

        log::debug!(
            "linked program {}: uniforms: {:?} attributes: {:?}",
            shader_program,
            shader.get_uniforms(),
            shader.get_attributes(),
        );

        Ok(shader)
    }

    /// Binds the program, does nothing once the program has been
    /// cleaned up.
    pub fn use_shader(&self) {
        if let Some(program_id) = self.program_id {
            unsafe {
                gl::UseProgram(program_id);
            }
        }
    }

    /// Location of the uniform with the given name, -1 if no such
    /// active uniform exists (OpenGL silently ignores -1).
    fn uniform_location(&self, name: &str) -> gl::types::GLint {
        let program_id = match self.program_id {
            Some(program_id) => program_id,
            None => return -1,
        };
        match CString::new(name) {
            Ok(name) => unsafe { gl::GetUniformLocation(program_id, name.as_ptr()) },
            Err(_) => {
                log::warn!("uniform name {:?} contains a nul byte", name);
                -1
            }
        }
    }

    pub fn set_vec4(&self, name: &str, value: &glm::Vec4) {
        if self.program_id.is_none() {
            return;
        }
        unsafe {
            gl::Uniform4f(
                self.uniform_location(name),
                value[0],
                value[1],
                value[2],
                value[3],
            );
        }
    }

    /// `None` after [`Rasterize::cleanup_opengl()`]
    pub fn get_id(&self) -> Option<gl::types::GLuint> {
        self.program_id
    }

    pub fn get_attributes(&self) -> Vec<String> {
        self.get_active_names(gl::ACTIVE_ATTRIBUTES, gl::GetActiveAttrib)
    }

    pub fn get_uniforms(&self) -> Vec<String> {
        self.get_active_names(gl::ACTIVE_UNIFORMS, gl::GetActiveUniform)
    }

    #[allow(clippy::type_complexity)]
    fn get_active_names(
        &self,
        count_query: gl::types::GLenum,
        get_active: unsafe fn(
            gl::types::GLuint,
            gl::types::GLuint,
            gl::types::GLsizei,
            *mut gl::types::GLsizei,
            *mut gl::types::GLint,
            *mut gl::types::GLenum,
            *mut gl::types::GLchar,
        ),
    ) -> Vec<String> {
        const MAX_LENGTH: usize = 100;

        let program_id = match self.program_id {
            Some(program_id) => program_id,
            None => return Vec::new(),
        };

        let mut count: gl::types::GLint = 0;
        unsafe {
            gl::GetProgramiv(program_id, count_query, &mut count);
        }

        (0..gl::types::GLuint::try_from(count).unwrap_or(0))
            .map(|index| {
                let mut name = [0_u8; MAX_LENGTH];
                let mut length: gl::types::GLsizei = 0;
                let mut size: gl::types::GLint = 0;
                let mut var_type: gl::types::GLenum = gl::NONE;
                unsafe {
                    get_active(
                        program_id,
                        index,
                        MAX_LENGTH as gl::types::GLsizei,
                        &mut length,
                        &mut size,
                        &mut var_type,
                        name.as_mut_ptr() as *mut gl::types::GLchar,
                    );
                }
                info_log_to_string(&name, usize::try_from(length).unwrap_or(0))
            })
            .collect()
    }
}

impl Rasterize for Shader {
    fn cleanup_opengl(&mut self) {
        if let Some(program_id) = self.program_id.take() {
            unsafe {
                gl::DeleteProgram(program_id);
            }
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.cleanup_opengl();
    }
}
