// Procedural geometry for the scene: every mesh is generated at startup, no
// assets are loaded.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        });
        (self.vertices.len() - 1) as u32
    }

    fn tri(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            let p = Vec3::from_array(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = (Vec3::from_array(v.position) + offset).to_array();
        }
    }

    /// Move the bounding box centre to the origin.
    pub fn center(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let (min, max) = self.bounds();
        self.translate(-(min + max) * 0.5);
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Flat `width × depth` plane on XZ facing +Y.
pub fn plane(width: f32, depth: f32) -> MeshData {
    let (hw, hd) = (width * 0.5, depth * 0.5);
    let mut m = MeshData::default();
    let a = m.push(Vec3::new(-hw, 0.0, -hd), Vec3::Y);
    let b = m.push(Vec3::new(-hw, 0.0, hd), Vec3::Y);
    let c = m.push(Vec3::new(hw, 0.0, hd), Vec3::Y);
    let d = m.push(Vec3::new(hw, 0.0, -hd), Vec3::Y);
    m.tri(a, b, c);
    m.tri(a, c, d);
    m
}

/// Cone centred on the origin: base at `-height/2`, apex at `+height/2`.
pub fn cone(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = radius / height;
    let mut m = MeshData::default();
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * TAU;
        let a1 = (i + 1) as f32 / segments as f32 * TAU;
        let am = (a0 + a1) * 0.5;
        let side_normal = |a: f32| Vec3::new(a.cos(), slope, a.sin());
        let p0 = Vec3::new(a0.cos() * radius, -half, a0.sin() * radius);
        let p1 = Vec3::new(a1.cos() * radius, -half, a1.sin() * radius);
        let i0 = m.push(p0, side_normal(a0));
        let i1 = m.push(p1, side_normal(a1));
        let apex = m.push(Vec3::new(0.0, half, 0.0), side_normal(am));
        m.tri(i0, apex, i1);
    }
    cap(&mut m, radius, -half, segments, -Vec3::Y);
    m
}

/// Cylinder centred on the origin along Y.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut m = MeshData::default();
    let base = m.vertices.len() as u32;
    for i in 0..=segments {
        let a = i as f32 / segments as f32 * TAU;
        let n = Vec3::new(a.cos(), 0.0, a.sin());
        m.push(Vec3::new(n.x * radius, -half, n.z * radius), n);
        m.push(Vec3::new(n.x * radius, half, n.z * radius), n);
    }
    for i in 0..segments {
        let b0 = base + i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        m.tri(b0, t0, b1);
        m.tri(b1, t0, t1);
    }
    cap(&mut m, radius, half, segments, Vec3::Y);
    cap(&mut m, radius, -half, segments, -Vec3::Y);
    m
}

fn cap(m: &mut MeshData, radius: f32, y: f32, segments: u32, normal: Vec3) {
    let centre = m.push(Vec3::new(0.0, y, 0.0), normal);
    let ring = m.vertices.len() as u32;
    for i in 0..=segments {
        let a = i as f32 / segments as f32 * TAU;
        m.push(Vec3::new(a.cos() * radius, y, a.sin() * radius), normal);
    }
    for i in 0..segments {
        if normal.y > 0.0 {
            m.tri(centre, ring + i + 1, ring + i);
        } else {
            m.tri(centre, ring + i, ring + i + 1);
        }
    }
}

/// UV sphere centred on the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut m = MeshData::default();
    for y in 0..=hs {
        let v = y as f32 / hs as f32;
        let theta = v * PI;
        for x in 0..=ws {
            let u = x as f32 / ws as f32;
            let phi = u * TAU;
            let n = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            m.push(n * radius, n);
        }
    }
    let row = ws + 1;
    for y in 0..hs {
        for x in 0..ws {
            let a = y * row + x + 1;
            let b = y * row + x;
            let c = (y + 1) * row + x;
            let d = (y + 1) * row + x + 1;
            if y != 0 {
                m.tri(a, b, d);
            }
            if y != hs - 1 {
                m.tri(b, c, d);
            }
        }
    }
    m
}

/// Star outline with `points` tips alternating between `outer` and `inner`
/// radius, starting with a tip on +X.
pub fn star_outline(points: u32, outer: f32, inner: f32) -> Vec<[f32; 2]> {
    let n = points.max(2) * 2;
    (0..n)
        .map(|i| {
            let a = i as f32 * PI / points.max(2) as f32;
            let r = if i % 2 == 0 { outer } else { inner };
            [a.cos() * r, a.sin() * r]
        })
        .collect()
}

/// Star outline extruded along Z by `depth`, centred on its bounding box.
pub fn star_prism(points: u32, outer: f32, inner: f32, depth: f32) -> MeshData {
    let outline = star_outline(points, outer, inner);
    let half = depth * 0.5;
    let mut m = MeshData::default();

    // Front and back faces: the outline is star-shaped around the origin so a
    // fan from the centre covers it.
    for (z, normal) in [(half, Vec3::Z), (-half, -Vec3::Z)] {
        let centre = m.push(Vec3::new(0.0, 0.0, z), normal);
        let ring = m.vertices.len() as u32;
        for p in &outline {
            m.push(Vec3::new(p[0], p[1], z), normal);
        }
        let n = outline.len() as u32;
        for i in 0..n {
            let j = (i + 1) % n;
            if normal.z > 0.0 {
                m.tri(centre, ring + i, ring + j);
            } else {
                m.tri(centre, ring + j, ring + i);
            }
        }
    }

    // Side walls with flat normals
    for i in 0..outline.len() {
        let p = outline[i];
        let q = outline[(i + 1) % outline.len()];
        let edge = Vec3::new(q[0] - p[0], q[1] - p[1], 0.0);
        let normal = Vec3::new(edge.y, -edge.x, 0.0);
        let a = m.push(Vec3::new(p[0], p[1], half), normal);
        let b = m.push(Vec3::new(p[0], p[1], -half), normal);
        let c = m.push(Vec3::new(q[0], q[1], -half), normal);
        let d = m.push(Vec3::new(q[0], q[1], half), normal);
        m.tri(a, b, c);
        m.tri(a, c, d);
    }

    m.center();
    m
}
