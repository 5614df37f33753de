//! Noise events, ambient and self-emitted, and the perceived-angle model
//! observers derive from them.

use rand_distr::{Distribution, Normal};
use sv_core::{position::normalize_deg, AgentId, Position, SimRng, Tick};

/// A noise in the world: either ambient (`source = None`) or emitted by an
/// agent's own movement.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseEvent {
    pub location: Position,
    pub source: Option<AgentId>,
    pub radius: f32,
    pub time: Tick,
}

impl NoiseEvent {
    pub fn ambient(location: Position, radius: f32, time: Tick) -> Self {
        Self {
            location,
            source: None,
            radius,
            time,
        }
    }

    pub fn from_agent(location: Position, source: AgentId, radius: f32, time: Tick) -> Self {
        Self {
            location,
            source: Some(source),
            radius,
            time,
        }
    }
}

/// What an observer actually perceives of a [`NoiseEvent`]: only a noisy
/// angle estimate, never the true location.
#[derive(Clone, Copy, Debug)]
pub struct PerceivedNoise {
    pub perceived_angle: f32,
    pub time: Tick,
}

impl PerceivedNoise {
    /// Derive the perceived angle of `event` as seen by an observer standing
    /// at `observer_loc`, adding Gaussian noise with standard deviation 10
    /// degrees. Returns `0.0` when the event is within `1e-5` of the
    /// observer (degenerate direction).
    pub fn observe(observer_loc: Position, event: &NoiseEvent, rng: &mut SimRng) -> Self {
        let perceived_angle = if observer_loc.distance_to(event.location) <= 1e-5 {
            0.0
        } else {
            let true_angle = observer_loc.angle_to(event.location);
            let normal = Normal::new(0.0_f32, 10.0).expect("fixed, valid std-dev");
            normalize_deg(true_angle + normal.sample(rng.inner()))
        };
        Self {
            perceived_angle,
            time: event.time,
        }
    }
}

/// Self-noise radius band by current movement speed.
pub fn self_noise_radius(move_speed: f32) -> f32 {
    let mut radius = 0.0;
    if move_speed > 0.0 {
        radius = 0.5;
    }
    if move_speed > 0.5 {
        radius = 1.5;
    }
    if move_speed > 1.0 {
        radius = 2.5;
    }
    if move_speed > 2.0 {
        radius = 5.0;
    }
    radius
}

/// Probability of emitting ambient or self-noise on a single tick, given the
/// map's cell count: rate `λ = (0.1/60) * (W*H/25)` events per second.
pub fn emission_chance_per_tick(map_cells: u32, time_per_tick: f32) -> f32 {
    const EVENT_RATE: f32 = 0.1;
    let events_per_second = (EVENT_RATE / 60.0) * (map_cells as f32 / 25.0);
    events_per_second * time_per_tick
}
