//! `World` — the tick scheduler.
//!
//! Each call to `tick()` runs a fixed six-phase pipeline: noise rotation,
//! per-agent percept+hook dispatch (built from a start-of-tick snapshot so
//! no agent observes another's in-progress motion), collision resolution,
//! capture arbitration, target-reach arbitration, and next-tick message
//! routing.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use sv_core::position::normalize_deg;
use sv_core::{AgentId, Position, SimRng, Tick, WorldConfig, TIME_PER_TICK};
use sv_spatial::{Map, MapView};

use sv_agent::{
    emission_chance_per_tick, resolve_collision, Agent, AgentBehavior, AgentKind, AgentView,
    Message, NoiseEvent, PerceivedNoise,
};
use sv_spatial::MarkerType;

use crate::error::{WorldError, WorldResult};
use crate::partition;

/// Which side won the run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// All intruders were captured.
    GuardsWin,
    /// An intruder dwelled at (or double-visited) a target.
    IntrudersWin,
}

/// Snapshot of one agent's percept-relevant state at the *start* of a tick.
/// Built once per tick before any agent acts, so every agent's percepts are
/// computed against the same moment rather than against partially-updated
/// neighbors.
struct PerceptSnapshot {
    id: AgentId,
    view: AgentView,
    location: Position,
    effective_view_range: f32,
    view_angle: f32,
    visibility_range: f32,
}

/// The shared simulation state and tick scheduler.
///
/// Owns the immutable [`Map`] (as `Arc` so every agent's [`MapView`] can
/// share it without cloning the grid), the agent table (keyed by dense
/// [`AgentId`], iterated in insertion order for the percept/hook phase),
/// the current/past/pending noise lists, and the single deterministic
/// [`SimRng`] stream shared by every source of randomness in a run.
///
/// Construct via [`WorldBuilder`], or `World::new` directly.
pub struct World {
    map: Arc<Map>,
    agents: BTreeMap<AgentId, Agent>,
    next_agent_id: AgentId,

    /// Noises perceivable *this* tick.
    noises: Vec<NoiseEvent>,
    /// Noises from the previous "current" list, kept for inspection/tests.
    past_noises: Vec<NoiseEvent>,
    /// Noises emitted during the tick in progress (ambient + agent
    /// self-noise); promoted to `noises` at the *next* tick's rotation, so a
    /// noise is never perceivable on the same tick it was emitted.
    pending_noises: Vec<NoiseEvent>,

    markers: Vec<(MarkerType, Position)>,

    time_ticks: Tick,
    rng: SimRng,
    outcome: Option<Outcome>,
}

impl World {
    pub fn new(map: Map, config: WorldConfig) -> Self {
        Self {
            map: Arc::new(map),
            agents: BTreeMap::new(),
            next_agent_id: AgentId::FIRST,
            noises: Vec::new(),
            past_noises: Vec::new(),
            pending_noises: Vec::new(),
            markers: Vec::new(),
            time_ticks: Tick::ZERO,
            rng: SimRng::new(config.seed),
            outcome: None,
        }
    }

    // ---- Accessors --------------------------------------------------------

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn time_ticks(&self) -> Tick {
        self.time_ticks
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn markers(&self) -> &[(MarkerType, Position)] {
        &self.markers
    }

    /// Noises perceivable in the tick currently in progress (or the tick
    /// just finished). Exposed for tests and observers, not part of any
    /// agent-facing API.
    pub fn current_noises(&self) -> &[NoiseEvent] {
        &self.noises
    }

    pub fn past_noises(&self) -> &[NoiseEvent] {
        &self.past_noises
    }

    // ---- Construction & lifecycle ------------------------------------------

    /// Allocates a dense [`AgentId`], instantiates an [`Agent`] with its own
    /// [`MapView`] over the shared map, and stores it.
    pub fn add_agent(
        &mut self,
        kind: AgentKind,
        strategy_tag: Option<String>,
        behavior: Box<dyn AgentBehavior>,
    ) -> AgentId {
        let id = self.next_agent_id;
        self.next_agent_id = id.next();
        let view = MapView::new(Arc::clone(&self.map));
        let agent = Agent::new(id, kind, strategy_tag, view, behavior);
        self.agents.insert(id, agent);
        id
    }

    /// Partitions the map into patrol areas for patroller-tagged agents,
    /// assigns tower positions to camera-tagged agents, then runs each
    /// agent's `on_pick_start`/`on_setup`.
    pub fn setup(&mut self) -> WorldResult<()> {
        self.assign_patrol_areas();
        self.assign_towers();

        let ids: Vec<AgentId> = self.agents.keys().copied().collect();
        for id in ids {
            let pos = {
                let agent = self.agents.get_mut(&id).expect("agent exists");
                agent.run_setup(&mut self.rng)
            };
            let tile = (pos.x.floor() as i32, pos.y.floor() as i32);
            if self.map.is_wall(tile.0, tile.1) {
                return Err(WorldError::BadPosition(pos));
            }
        }
        Ok(())
    }

    fn assign_patrol_areas(&mut self) {
        let patroller_ids: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, a)| is_patroller_tag(&a.strategy_tag))
            .map(|(&id, _)| id)
            .collect();
        let areas = partition::partition(
            patroller_ids.len(),
            self.map.width() as f32,
            self.map.height() as f32,
        );
        for (id, area) in patroller_ids.iter().zip(areas.iter()) {
            if let Some(agent) = self.agents.get_mut(id) {
                agent.patrol_area = Some((area.corner_a, area.corner_b));
            }
        }
    }

    /// Assigns tower positions to camera-tagged agents in order, wrapping
    /// round-robin if there are more camera agents than towers.
    fn assign_towers(&mut self) {
        if self.map.towers.is_empty() {
            return;
        }
        let camera_ids: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, a)| is_camera_tag(&a.strategy_tag))
            .map(|(&id, _)| id)
            .collect();
        for (i, id) in camera_ids.iter().enumerate() {
            let tower = self.map.towers[i % self.map.towers.len()];
            if let Some(agent) = self.agents.get_mut(id) {
                agent.assigned_tower = Some(tower);
            }
        }
    }

    // ---- Messaging & noise (public API) -------------------------------------

    /// Appends `msg` to the recipient's inbound queue. Delivered at the
    /// recipient's next `tick()` invocation, because by the time this is
    /// called from within `tick()` (phase 5) or by an external caller
    /// between ticks, the recipient's own percept/hook phase for the
    /// current tick (if any) has already run.
    pub fn transmit_message(&mut self, msg: Message) {
        if let Some(agent) = self.agents.get_mut(&msg.target) {
            agent.deliver(msg);
        }
    }

    /// Stamps `n.time` with the current tick and appends it to the active
    /// noise list.
    pub fn add_noise(&mut self, mut n: NoiseEvent) {
        n.time = self.time_ticks;
        self.pending_noises.push(n);
    }

    fn emit_random_noise(&mut self) {
        let map_cells = self.map.width() * self.map.height();
        let chance = emission_chance_per_tick(map_cells, TIME_PER_TICK);
        if self.rng.gen_bool(chance as f64) {
            let x = self.rng.gen_range(0..self.map.width() as i32) as f32 + 0.5;
            let y = self.rng.gen_range(0..self.map.height() as i32) as f32 + 0.5;
            let noise = NoiseEvent::ambient(Position::new(x, y), 2.5, self.time_ticks);
            self.add_noise(noise);
        }
    }

    // ---- The tick loop ------------------------------------------------------

    /// Runs one simulation step. Returns `true` once a win condition has
    /// fired (`outcome()` reports which side and stays set for the remainder
    /// of the run).
    pub fn tick(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }

        // Phase 1: rotate noise lists and emit ambient noise.
        self.past_noises = std::mem::replace(&mut self.noises, std::mem::take(&mut self.pending_noises));
        self.emit_random_noise();

        // Phase 2: per-agent percept computation + hook dispatch, using
        // start-of-tick positions for every agent.
        let snapshot: Vec<PerceptSnapshot> = self
            .agents
            .values()
            .map(|a| PerceptSnapshot {
                id: a.id,
                view: a.as_view(),
                location: a.location,
                effective_view_range: a.effective_view_range(),
                view_angle: a.view_angle,
                visibility_range: a.visibility_range,
            })
            .collect();
        let current_noises = self.noises.clone();
        let ids: Vec<AgentId> = self.agents.keys().copied().collect();
        let map_cells = self.map.width() * self.map.height();
        let now = self.time_ticks;

        let mut outgoing_messages: Vec<Message> = Vec::new();

        for id in ids {
            let self_snap = snapshot
                .iter()
                .find(|s| s.id == id)
                .expect("agent present in its own tick's snapshot");
            let seen = visible_to(self_snap, &snapshot);
            let perceived = perceived_to(id, self_snap.location, &current_noises, &mut self.rng);

            let agent = self.agents.get_mut(&id).expect("agent exists");
            let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
                agent.tick(now, &seen, &perceived, map_cells, &mut self.rng);
            }));

            match outcome {
                Ok(()) => {
                    outgoing_messages.extend(agent.drain_outbox());
                    if let Some(noise) = agent.take_pending_noise() {
                        self.add_noise(noise);
                    }
                    for (kind, loc) in agent.drain_markers() {
                        self.markers.push((kind, loc));
                    }
                }
                Err(_) => {
                    tracing::error!(agent = ?id, "agent strategy panicked; discarding this tick's actions");
                }
            }
        }

        // Phase 3: collision resolution, after every agent has moved.
        let collisions: Vec<(AgentId, Position, bool)> = self
            .agents
            .values()
            .map(|a| {
                let outcome = resolve_collision(&self.map, a.location, a.width);
                (a.id, outcome.location, outcome.collided)
            })
            .collect();
        for (id, location, collided) in collisions {
            if let Some(agent) = self.agents.get_mut(&id) {
                agent.location = location;
                if collided {
                    agent.set_collided();
                }
            }
        }

        // Route this tick's outgoing messages before arbitrating the win
        // condition, so a win-ending tick never silently drops mail —
        // delivered messages are only visible at each recipient's next
        // `tick()` call regardless, since every agent's own percept/hook
        // phase for *this* tick has already run above.
        for msg in outgoing_messages {
            self.transmit_message(msg);
        }

        // Phase 4: capture check, on post-collision positions.
        if self.evaluate_capture() {
            self.outcome = Some(Outcome::GuardsWin);
            self.time_ticks += 1;
            return true;
        }

        // Phase 5: target-reach check.
        if self.evaluate_target_reach() {
            self.outcome = Some(Outcome::IntrudersWin);
            self.time_ticks += 1;
            return true;
        }

        // Phase 6.
        self.time_ticks += 1;
        false
    }

    /// Runs `tick()` up to `max_ticks` times (or until a win condition
    /// fires), calling `observer`'s hooks at each boundary.
    pub fn run<O: crate::observer::WorldObserver>(&mut self, observer: &mut O, max_ticks: u64) -> Option<Outcome> {
        for _ in 0..max_ticks {
            observer.on_tick_start(self.time_ticks);
            let finished = self.tick();
            observer.on_tick_end(self.time_ticks, finished);
            if finished {
                break;
            }
        }
        observer.on_sim_end(self.time_ticks, self.outcome);
        self.outcome
    }

    fn evaluate_capture(&mut self) -> bool {
        let intruder_ids: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, a)| a.kind == AgentKind::Intruder)
            .map(|(&id, _)| id)
            .collect();
        let guard_ids: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, a)| a.kind == AgentKind::Guard)
            .map(|(&id, _)| id)
            .collect();

        for &iid in &intruder_ids {
            let (i_loc, already) = {
                let intr = &self.agents[&iid];
                (intr.location, intr.is_captured)
            };
            if already {
                continue;
            }
            for &gid in &guard_ids {
                let captured = {
                    let guard = &self.agents[&gid];
                    if guard.location.distance_to(i_loc) <= 0.5 {
                        let (gx, gy) = (guard.location.x.floor() as i32, guard.location.y.floor() as i32);
                        let (ix, iy) = (i_loc.x.floor() as i32, i_loc.y.floor() as i32);
                        guard.view.has_los(gx, gy, ix, iy)
                    } else {
                        false
                    }
                };
                if captured {
                    if let Some(intr) = self.agents.get_mut(&iid) {
                        intr.is_captured = true;
                        intr.move_speed = 0.0;
                    }
                    break;
                }
            }
        }

        !intruder_ids.is_empty() && intruder_ids.iter().all(|id| self.agents[id].is_captured)
    }

    /// An intruder counts as "in target" when within distance 1 of *any*
    /// entry in the map's target list, since a map may place more than one
    /// target point.
    fn evaluate_target_reach(&mut self) -> bool {
        let targets: Vec<Position> = self.map.targets.clone();
        let intruder_ids: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, a)| a.kind == AgentKind::Intruder)
            .map(|(&id, _)| id)
            .collect();

        for &iid in &intruder_ids {
            let intr = self.agents.get_mut(&iid).expect("agent exists");
            if intr.is_captured || intr.reached_target {
                continue;
            }
            let in_target = targets.iter().any(|t| intr.location.distance_to(*t) < 1.0);

            if in_target {
                if intr.ticks_in_target == 0 {
                    let first_visit = intr.times_visited_target == 0;
                    if first_visit || (intr.ticks_since_target as f32 * TIME_PER_TICK >= 3.0) {
                        intr.times_visited_target += 1;
                    }
                    intr.ticks_since_target = 0;
                }
                intr.ticks_in_target += 1;
            } else {
                if intr.ticks_in_target > 0 {
                    intr.ticks_in_target = 0;
                    intr.ticks_since_target = 0;
                }
                intr.ticks_since_target += 1;
            }

            let dwelled = (intr.ticks_in_target as f32) * TIME_PER_TICK >= 3.0;
            let double_visited = intr.times_visited_target >= 2;
            if dwelled || double_visited {
                intr.reached_target = true;
            }
        }

        intruder_ids.iter().any(|id| self.agents[id].reached_target)
    }
}

fn is_patroller_tag(tag: &Option<String>) -> bool {
    tag.as_deref()
        .map(|t| t.to_ascii_lowercase().contains("patrol"))
        .unwrap_or(false)
}

fn is_camera_tag(tag: &Option<String>) -> bool {
    tag.as_deref()
        .map(|t| t.to_ascii_lowercase().contains("camera"))
        .unwrap_or(false)
}

/// Visible agents for `self_snap`: within view range and half-angle of the
/// cone, or within the 1.0-unit adjacency override. No line-of-sight term:
/// the percept check is deliberately weaker than capture's, which is the
/// one predicate that adds "and there's an unbroken line of sight" on top
/// of range/cone.
fn visible_to(self_snap: &PerceptSnapshot, others: &[PerceptSnapshot]) -> Vec<AgentView> {
    others
        .iter()
        .filter(|o| o.id != self_snap.id)
        .filter_map(|o| {
            let dist = self_snap.location.distance_to(o.location);
            if dist <= 1.0 {
                return Some(o.view);
            }
            if dist > self_snap.effective_view_range || dist > o.visibility_range {
                return None;
            }
            let heading_to_other = self_snap.location.angle_to(o.location);
            let rel = normalize_deg(heading_to_other - self_snap.view.heading);
            if rel.abs() <= self_snap.view_angle / 2.0 {
                Some(o.view)
            } else {
                None
            }
        })
        .collect()
}

/// Perceived noises for an observer at `self_loc`.
fn perceived_to(
    self_id: AgentId,
    self_loc: Position,
    noises: &[NoiseEvent],
    rng: &mut SimRng,
) -> Vec<PerceivedNoise> {
    noises
        .iter()
        .filter(|n| n.source != Some(self_id))
        .filter(|n| self_loc.distance_to(n.location) < n.radius)
        .map(|n| PerceivedNoise::observe(self_loc, n, rng))
        .collect()
}

/// Fluent builder for [`World`], with a single configurable input (the
/// PRNG seed).
pub struct WorldBuilder {
    map: Map,
    config: WorldConfig,
}

impl WorldBuilder {
    pub fn new(map: Map) -> Self {
        Self {
            map,
            config: WorldConfig::default(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn build(self) -> World {
        World::new(self.map, self.config)
    }
}
