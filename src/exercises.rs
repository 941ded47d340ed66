//! Vertex data of the exercises, in normalized device coordinates.

use lazy_static::lazy_static;

use crate::config::{Config, PolygonMode};
use crate::glm;
use crate::rasterize::gl_mesh::{GLMesh, MeshError, PosColorVert, PosVert, Triangle};

lazy_static! {
    static ref QUAD_VERTS: Vec<PosVert> = vec![
        PosVert::new(glm::vec3(0.5, 0.5, 0.0)),   // top right
        PosVert::new(glm::vec3(0.5, -0.5, 0.0)),  // bottom right
        PosVert::new(glm::vec3(-0.5, -0.5, 0.0)), // bottom left
        PosVert::new(glm::vec3(-0.5, 0.5, 0.0)),  // top left
    ];
    static ref TRIANGLE_VERTS: Vec<PosVert> = vec![
        PosVert::new(glm::vec3(-0.5, -0.5, 0.0)),
        PosVert::new(glm::vec3(0.5, -0.5, 0.0)),
        PosVert::new(glm::vec3(0.0, 0.5, 0.0)),
    ];
    static ref SECOND_TRIANGLE_VERTS: Vec<PosVert> = vec![
        PosVert::new(glm::vec3(0.0, -0.5, 0.0)),  // left
        PosVert::new(glm::vec3(0.9, -0.5, 0.0)),  // right
        PosVert::new(glm::vec3(0.45, 0.5, 0.0)),  // top
    ];
    static ref COLORED_TRIANGLE_VERTS: Vec<PosColorVert> = vec![
        PosColorVert::new(glm::vec3(0.5, -0.5, 0.0), glm::vec3(1.0, 0.0, 0.0)),
        PosColorVert::new(glm::vec3(-0.5, -0.5, 0.0), glm::vec3(0.0, 1.0, 0.0)),
        PosColorVert::new(glm::vec3(0.0, 0.5, 0.0), glm::vec3(0.0, 0.0, 1.0)),
    ];
}

/// Indices start at 0
pub const QUAD_TRIANGLES: [Triangle; 2] = [Triangle::new(0, 1, 3), Triangle::new(1, 2, 3)];

pub fn get_quad_verts() -> &'static [PosVert] {
    &QUAD_VERTS
}

pub fn get_triangle_verts() -> &'static [PosVert] {
    &TRIANGLE_VERTS
}

pub fn get_second_triangle_verts() -> &'static [PosVert] {
    &SECOND_TRIANGLE_VERTS
}

pub fn get_colored_triangle_verts() -> &'static [PosColorVert] {
    &COLORED_TRIANGLE_VERTS
}

/// Rectangle made of two triangles sharing verts through an index
/// buffer.
pub fn quad_mesh() -> Result<GLMesh, MeshError> {
    GLMesh::with_indices(get_quad_verts(), &QUAD_TRIANGLES)
}

pub fn triangle_mesh() -> Result<GLMesh, MeshError> {
    GLMesh::new(get_triangle_verts())
}

pub fn second_triangle_mesh() -> Result<GLMesh, MeshError> {
    GLMesh::new(get_second_triangle_verts())
}

pub fn colored_triangle_mesh() -> Result<GLMesh, MeshError> {
    GLMesh::new(get_colored_triangle_verts())
}

/// Defaults of the indexed quad exercise, drawn as wireframe to show
/// the two triangles.
pub fn hello_triangle_config() -> Config {
    Config {
        polygon_mode: PolygonMode::Line,
        ..Default::default()
    }
}

/// Color that pulses between black and green over time
pub fn pulsing_green(time: f64) -> glm::Vec4 {
    let green = (time.sin() / 2.0 + 0.5) as f32;
    glm::vec4(0.0, green, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterize::gl_mesh::{self, VertexLayout};
    use crate::rasterize::shader::builtins;

    #[test]
    fn quad_triangles_index_quad_verts() {
        assert_eq!(gl_mesh::validate(get_quad_verts(), Some(&QUAD_TRIANGLES[..])), Ok(()));

        // every vert of the quad is used, the diagonal ones twice
        let mut uses = [0; 4];
        QUAD_TRIANGLES
            .iter()
            .flat_map(|triangle| triangle.indices())
            .for_each(|index| uses[index as usize] += 1);
        assert_eq!(uses, [1, 2, 1, 2]);
    }

    #[test]
    fn triangles_have_three_verts() {
        assert_eq!(get_triangle_verts().len(), 3);
        assert_eq!(get_second_triangle_verts().len(), 3);
        assert_eq!(get_colored_triangle_verts().len(), 3);
    }

    #[test]
    fn verts_inside_normalized_device_coordinates() {
        let positions = get_quad_verts()
            .iter()
            .chain(get_triangle_verts())
            .chain(get_second_triangle_verts())
            .map(|vert| *vert.get_pos())
            .chain(get_colored_triangle_verts().iter().map(|vert| *vert.get_pos()));

        positions.for_each(|pos| {
            assert!(pos.iter().all(|component| (-1.0..=1.0).contains(component)));
            assert_eq!(pos[2], 0.0);
        });
    }

    #[test]
    fn second_triangle_right_of_quad_center() {
        assert_eq!(
            get_second_triangle_verts()[2].get_pos(),
            &glm::vec3(0.45, 0.5, 0.0)
        );
    }

    #[test]
    fn colored_triangle_primary_colors() {
        let colors: Vec<_> = get_colored_triangle_verts()
            .iter()
            .map(|vert| *vert.get_color())
            .collect();
        assert_eq!(
            colors,
            vec![
                glm::vec3(1.0, 0.0, 0.0),
                glm::vec3(0.0, 1.0, 0.0),
                glm::vec3(0.0, 0.0, 1.0)
            ]
        );
    }

    #[test]
    fn vertex_layouts_match_shader_locations() {
        let locations = |attributes: Vec<gl_mesh::VertAttribute>| -> Vec<u32> {
            attributes
                .iter()
                .map(|attribute| attribute.location)
                .collect()
        };
        let shader_locations = |code: &str| -> Vec<u32> {
            builtins::attribute_locations(code)
                .into_iter()
                .map(|(location, _)| location)
                .collect()
        };

        assert_eq!(
            locations(PosVert::attributes()),
            shader_locations(builtins::get_flat_orange_vert_code())
        );
        assert_eq!(
            locations(PosColorVert::attributes()),
            shader_locations(builtins::get_vertex_color_vert_code())
        );
    }

    #[test]
    fn hello_triangle_config_wireframe() {
        let config = hello_triangle_config();
        assert_eq!(config.polygon_mode, PolygonMode::Line);
        assert_eq!(
            Config {
                polygon_mode: PolygonMode::Fill,
                ..config
            },
            Config::default()
        );
    }

    #[test]
    fn pulsing_green_range() {
        assert_eq!(pulsing_green(0.0), glm::vec4(0.0, 0.5, 0.0, 1.0));
        assert_eq!(
            pulsing_green(std::f64::consts::FRAC_PI_2),
            glm::vec4(0.0, 1.0, 0.0, 1.0)
        );
        (0..100).map(|i| i as f64 * 0.37).for_each(|time| {
            let color = pulsing_green(time);
            assert!((0.0..=1.0).contains(&color[1]));
        });
    }
}
