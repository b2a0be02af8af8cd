//! Cosmetic particle bursts

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::{PARTICLE_COUNT, PARTICLE_DECAY, PARTICLE_SPEED};

/// Spawn a burst of particles at `origin`, evicting the oldest past `cap`
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    color: [f32; 4],
    cap: usize,
) {
    if cap == 0 {
        return;
    }
    for _ in 0..PARTICLE_COUNT {
        if particles.len() >= cap {
            particles.remove(0);
        }
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * PARTICLE_SPEED,
            (rng.random::<f32>() - 0.5) * PARTICLE_SPEED,
        );
        particles.push(Particle {
            pos: origin,
            vel,
            life: 1.0,
            color,
            radius: rng.random::<f32>() * 4.0 + 2.0,
        });
    }
}

/// Move and age every particle, dropping dead ones
pub fn update(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.life -= PARTICLE_DECAY;
        particle.pos += particle.vel;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_size_and_shape() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::new(10.0, 20.0), [1.0; 4], 256);
        assert_eq!(particles.len(), PARTICLE_COUNT);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert!(p.vel.x.abs() <= PARTICLE_SPEED / 2.0);
            assert!((2.0..6.0).contains(&p.radius));
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, [1.0; 4], 20);
        spawn_burst(&mut particles, &mut rng, Vec2::ONE, [1.0; 4], 20);
        assert_eq!(particles.len(), 20);
        // Oldest were evicted first
        assert_eq!(particles.last().map(|p| p.pos), Some(Vec2::ONE));

        let mut none = Vec::new();
        spawn_burst(&mut none, &mut rng, Vec2::ZERO, [1.0; 4], 0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, [1.0; 4], 256);
        // 1.0 / 0.03 = 33.3 ticks
        for _ in 0..33 {
            update(&mut particles);
        }
        assert_eq!(particles.len(), PARTICLE_COUNT);
        update(&mut particles);
        assert!(particles.is_empty());
    }
}
