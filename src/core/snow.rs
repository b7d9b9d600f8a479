use glam::Vec3;
use rand::Rng;

/// Snowfall volume and speeds, in world units per frame.
#[derive(Clone, Debug)]
pub struct SnowParams {
    pub count: usize,
    /// Flakes spawn in `[-half_extent, half_extent)` on X and Z.
    pub half_extent: f32,
    /// Respawn altitude and upper bound of the initial fill.
    pub ceiling: f32,
    /// Flakes below this height are recycled.
    pub ground: f32,
    /// Full width of the horizontal velocity range, centred on zero.
    pub drift_span: f32,
    pub fall_min: f32,
    pub fall_span: f32,
}

impl Default for SnowParams {
    fn default() -> Self {
        Self {
            count: 1500,
            half_extent: 50.0,
            ceiling: 60.0,
            ground: 0.0,
            drift_span: 0.05,
            fall_min: 0.05,
            fall_span: 0.05,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Fixed pool of falling flakes. Flakes are never added or removed; a flake
/// that reaches the ground is moved back to the ceiling.
pub struct SnowField {
    params: SnowParams,
    particles: Vec<Particle>,
    respawned: u64,
}

impl SnowField {
    pub fn new<R: Rng>(params: SnowParams, rng: &mut R) -> Self {
        let particles = (0..params.count)
            .map(|_| Particle {
                position: Vec3::new(
                    rng.gen::<f32>() * 2.0 * params.half_extent - params.half_extent,
                    rng.gen::<f32>() * params.ceiling,
                    rng.gen::<f32>() * 2.0 * params.half_extent - params.half_extent,
                ),
                velocity: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * params.drift_span,
                    -(rng.gen::<f32>() * params.fall_span + params.fall_min),
                    (rng.gen::<f32>() - 0.5) * params.drift_span,
                ),
            })
            .collect();
        Self {
            params,
            particles,
            respawned: 0,
        }
    }

    /// Advance every flake by its velocity and recycle the ones that fell
    /// through the ground. Returns how many were recycled this step.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> usize {
        let p = &self.params;
        let mut recycled = 0;
        for flake in &mut self.particles {
            flake.position += flake.velocity;
            if flake.position.y < p.ground {
                flake.position.y = p.ceiling;
                flake.position.x = rng.gen::<f32>() * 2.0 * p.half_extent - p.half_extent;
                flake.position.z = rng.gen::<f32>() * 2.0 * p.half_extent - p.half_extent;
                recycled += 1;
            }
        }
        self.respawned += recycled as u64;
        recycled
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn params(&self) -> &SnowParams {
        &self.params
    }

    /// Total recycles since construction.
    #[inline]
    pub fn respawned(&self) -> u64 {
        self.respawned
    }
}
