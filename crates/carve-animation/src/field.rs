use carve_geometry::Vec2;

/// Tuning for the background particle field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldSpec {
    /// Pointer influence radius, in viewport px.
    pub radius: f64,
    /// Velocity impulse applied right at the pointer.
    pub impulse: f64,
    /// Per-frame velocity multiplier.
    pub friction: f64,
    /// Velocity retained after bouncing off a bound.
    pub restitution: f64,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            radius: 150.0,
            impulse: 2.0,
            friction: 0.95,
            restitution: 0.8,
        }
    }
}

/// A free-floating background shape with its own velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Particle {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }
}

/// Velocity-based particle field that scatters away from the pointer.
///
/// Unlike the stateless repulsor this keeps momentum: pointer movement
/// injects an impulse, then each frame integrates velocity, applies
/// friction and bounces the particles off the viewport bounds.
#[derive(Debug, Clone)]
pub struct Field {
    spec: FieldSpec,
    bounds: Vec2,
    particles: Vec<Particle>,
}

impl Field {
    pub fn new(spec: FieldSpec, bounds: Vec2) -> Self {
        Self {
            spec,
            bounds,
            particles: Vec::new(),
        }
    }

    pub fn push(&mut self, position: Vec2) {
        self.particles.push(Particle::at(position));
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    /// Kicks every particle within the influence radius away from the
    /// pointer, with linear falloff. Call once per pointer-move event.
    pub fn nudge(&mut self, pointer: Vec2) {
        if self.spec.radius <= 0.0 {
            return;
        }
        for particle in &mut self.particles {
            let d = particle.position - pointer;
            let distance = d.length();
            if distance == 0.0 || distance >= self.spec.radius {
                continue;
            }
            let force = (self.spec.radius - distance) / self.spec.radius;
            particle.velocity += (d / distance) * force * self.spec.impulse;
        }
    }

    /// Advances the simulation by one frame: integrate, damp, bounce.
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.position += particle.velocity;
            particle.velocity *= self.spec.friction;

            if particle.position.x < 0.0 || particle.position.x > self.bounds.x {
                particle.velocity.x *= -self.spec.restitution;
            }
            if particle.position.y < 0.0 || particle.position.y > self.bounds.y {
                particle.velocity.y *= -self.spec.restitution;
            }

            particle.position.x = particle.position.x.clamp(0.0, self.bounds.x);
            particle.position.y = particle.position.y.clamp(0.0, self.bounds.y);
        }
    }
}
