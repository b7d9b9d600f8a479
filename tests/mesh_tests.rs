// Host-side tests for procedural mesh builders.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod mesh {
    include!("../src/core/mesh.rs");
}

use glam::Vec3;
use mesh::*;

fn assert_well_formed(name: &str, m: &MeshData) {
    assert!(!m.vertices.is_empty(), "{name}: no vertices");
    assert_eq!(m.indices.len() % 3, 0, "{name}: partial triangle");
    let n = m.vertices.len() as u32;
    assert!(m.indices.iter().all(|&i| i < n), "{name}: index out of range");
    for v in &m.vertices {
        let len = Vec3::from(v.normal).length();
        assert!((len - 1.0).abs() < 1e-4, "{name}: normal length {len}");
    }
    assert_eq!(m.index_count() as usize, m.indices.len());
}

#[test]
fn all_builders_produce_valid_meshes() {
    assert_well_formed("plane", &plane(200.0, 200.0));
    assert_well_formed("cone", &cone(6.0, 8.0, 16));
    assert_well_formed("cylinder", &cylinder(1.5, 6.0, 8));
    assert_well_formed("sphere", &sphere(0.28, 16, 16));
    assert_well_formed("star", &star_prism(5, 1.8, 0.9, 0.5));
}

#[test]
fn vertex_layout_is_tightly_packed() {
    assert_eq!(std::mem::size_of::<Vertex>(), 24);
}

#[test]
fn cone_spans_its_height_around_origin() {
    let (min, max) = cone(6.0, 8.0, 16).bounds();
    assert!((min.y + 4.0).abs() < 1e-5);
    assert!((max.y - 4.0).abs() < 1e-5);
    assert!((max.x - 6.0).abs() < 1e-4);
}

#[test]
fn cylinder_spans_its_height_around_origin() {
    let (min, max) = cylinder(1.5, 6.0, 8).bounds();
    assert!((min.y + 3.0).abs() < 1e-5);
    assert!((max.y - 3.0).abs() < 1e-5);
}

#[test]
fn sphere_vertices_sit_on_radius() {
    let m = sphere(0.5, 12, 8);
    for v in &m.vertices {
        assert!((Vec3::from(v.position).length() - 0.5).abs() < 1e-5);
    }
}

#[test]
fn plane_faces_up() {
    let m = plane(10.0, 4.0);
    assert!(m.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    let (min, max) = m.bounds();
    assert_eq!(max - min, Vec3::new(10.0, 0.0, 4.0));
}

#[test]
fn star_outline_alternates_radii() {
    let pts = star_outline(5, 1.8, 0.9);
    assert_eq!(pts.len(), 10);
    for (i, p) in pts.iter().enumerate() {
        let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
        let expected = if i % 2 == 0 { 1.8 } else { 0.9 };
        assert!((r - expected).abs() < 1e-5);
    }
    assert!((pts[0][0] - 1.8).abs() < 1e-6 && pts[0][1].abs() < 1e-6);
}

#[test]
fn star_prism_is_centred() {
    let (min, max) = star_prism(5, 1.8, 0.9, 0.5).bounds();
    let c = (min + max) * 0.5;
    assert!(c.length() < 1e-4);
    assert!((max.z - min.z - 0.5).abs() < 1e-5);
}

#[test]
fn translate_moves_bounds() {
    let mut m = sphere(1.0, 8, 6);
    m.translate(Vec3::new(0.0, 2.0, 0.0));
    let (min, max) = m.bounds();
    assert!((min.y - 1.0).abs() < 1e-5);
    assert!((max.y - 3.0).abs() < 1e-5);
}
