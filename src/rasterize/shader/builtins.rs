//! Builtin shaders of the exercises
//!
//! Sources are embedded at compile time, each pair gets
//! `get_<name>_vert_code()`, `get_<name>_frag_code()` and
//! `load_<name>_shader()`. Loading compiles and links, so it needs
//! a current OpenGL context.

use paste::paste;

use super::{Shader, ShaderError};

macro_rules! load_builtin_shader {
    ( $load_shader:ident ; $get_vert_code:ident ; $get_frag_code:ident ; $vert_location:tt ; $frag_location:tt ) => {
        pub fn $get_vert_code() -> &'static str {
            include_str!($vert_location)
        }

        pub fn $get_frag_code() -> &'static str {
            include_str!($frag_location)
        }

        pub fn $load_shader() -> Result<Shader, ShaderError> {
            Shader::from_strings($get_vert_code(), $get_frag_code())
        }
    };
}

macro_rules! load_builtin_shader_easy {
    ( $name:ident ; $vert_location:tt ; $frag_location:tt ) => {
        paste! {
            load_builtin_shader!([<load_ $name _shader>]; [<get_ $name _vert_code>]; [<get_ $name _frag_code>]; $vert_location; $frag_location);
        }
    }
}

load_builtin_shader_easy!(
    flat_orange;
    "../../../shaders/position.vert";
    "../../../shaders/flat_orange.frag"
);

load_builtin_shader_easy!(
    flat_blue;
    "../../../shaders/position.vert";
    "../../../shaders/flat_blue.frag"
);

load_builtin_shader_easy!(
    uniform_color;
    "../../../shaders/position.vert";
    "../../../shaders/uniform_color.frag"
);

load_builtin_shader_easy!(
    vertex_color;
    "../../../shaders/vertex_color.vert";
    "../../../shaders/vertex_color.frag"
);

/// `(location, name)` of every `layout (location = N) in <type> <name>;`
/// declaration in the given GLSL source.
#[cfg(test)]
pub(crate) fn attribute_locations(code: &str) -> Vec<(u32, String)> {
    code.lines()
        .filter_map(|line| {
            let line = line.trim();
            let rest = line.strip_prefix("layout")?.trim_start();
            let rest = rest.strip_prefix('(')?;
            let (qualifiers, declaration) = rest.split_once(')')?;
            let location = qualifiers
                .split(',')
                .filter_map(|qualifier| qualifier.split_once('='))
                .find(|(key, _)| key.trim() == "location")?
                .1
                .trim()
                .parse()
                .ok()?;

            let mut words = declaration.trim().trim_end_matches(';').split_whitespace();
            if words.next()? != "in" {
                return None;
            }
            let _type = words.next()?;
            let name = words.next()?;

            Some((location, name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources_target_glsl_330_core() {
        [
            get_flat_orange_vert_code(),
            get_flat_orange_frag_code(),
            get_flat_blue_frag_code(),
            get_uniform_color_frag_code(),
            get_vertex_color_vert_code(),
            get_vertex_color_frag_code(),
        ]
        .iter()
        .for_each(|code| {
            assert!(code.starts_with("#version 330 core"));
            assert!(!code.contains('\0'));
        });
    }

    #[test]
    fn flat_fragment_colors() {
        assert!(get_flat_orange_frag_code().contains("vec4(1.0, 0.5, 0.2, 1.0)"));
        assert!(get_flat_blue_frag_code().contains("vec4(0.3, 0.5, 1.0, 1.0)"));
    }

    #[test]
    fn uniform_color_declares_uniform() {
        assert!(get_uniform_color_frag_code().contains("uniform vec4 our_color;"));
    }

    #[test]
    fn attribute_locations_position_only() {
        assert_eq!(
            attribute_locations(get_flat_orange_vert_code()),
            vec![(0, "in_pos".to_string())]
        );
    }

    #[test]
    fn attribute_locations_position_and_color() {
        assert_eq!(
            attribute_locations(get_vertex_color_vert_code()),
            vec![(0, "in_pos".to_string()), (1, "in_color".to_string())]
        );
    }

    #[test]
    fn attribute_locations_skips_outputs_and_uniforms() {
        let code = "layout(location=2) out vec4 color;\n\
                    uniform mat4 model;\n\
                    layout (std140, location = 3) in vec2 in_uv;\n";
        assert_eq!(attribute_locations(code), vec![(3, "in_uv".to_string())]);
    }
}
