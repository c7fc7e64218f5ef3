use glam::{Vec3, Vec4};

/// A simulation particle as seen by the constraint functions.
///
/// Layout matches a `float4` buffer element: `xyz` is the position and `w`
/// the inverse mass (weight). A weight of 0 pins the particle.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub position: Vec3,
    pub weight: f32,
}

impl Particle {
    pub fn new(position: Vec3, weight: f32) -> Self {
        Self { position, weight }
    }

    /// Infinite-mass particle that constraints never move.
    pub fn pinned(position: Vec3) -> Self {
        Self {
            position,
            weight: 0.0,
        }
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.weight == 0.0
    }
}

impl From<Vec4> for Particle {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self {
            position: v.truncate(),
            weight: v.w,
        }
    }
}

impl From<Particle> for Vec4 {
    #[inline]
    fn from(p: Particle) -> Self {
        p.position.extend(p.weight)
    }
}

/// View a particle slice as a flat `f32` buffer (4 floats per particle).
pub fn as_floats(particles: &[Particle]) -> &[f32] {
    bytemuck::cast_slice(particles)
}

/// View a flat `float4` buffer as particles. Panics if the length is not a multiple of 4.
pub fn from_floats(data: &[f32]) -> &[Particle] {
    bytemuck::cast_slice(data)
}
