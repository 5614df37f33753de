//! `Agent` — per-agent state machine: vision, movement, tower interaction,
//! sprint, messaging, noise, and the fixed per-tick hook order that drives
//! strategy dispatch through [`crate::behavior::AgentBehavior`].

use sv_core::{AgentId, Position, SimRng, Tick, TIME_PER_TICK};
use sv_spatial::{MapView, MarkerType};

use crate::behavior::{AgentBehavior, AgentKind, AgentView};
use crate::message::Message;
use crate::movement::{self, CollisionOutcome};
use crate::noise::{self, NoiseEvent, PerceivedNoise};

/// A single agent: identity, kinematics, vision, sprint/tower timers,
/// messaging queues, and (for intruders) capture/target-reach bookkeeping.
///
/// Owns exactly one [`MapView`] and one boxed [`AgentBehavior`]; holds no
/// reference back to the owning world.
pub struct Agent {
    pub id: AgentId,
    pub kind: AgentKind,
    pub strategy_tag: Option<String>,
    pub color: [f32; 3],

    pub location: Position,
    pub heading: f32,
    last_heading: f32,
    pub base_speed: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
    pub turn_speed_sprinting: f32,
    move_target: f32,
    turn_target: f32,

    pub view: MapView,
    last_tile: (i32, i32),
    pub view_range: f32,
    pub view_angle: f32,
    pub base_view_angle: f32,
    pub tower_view_range: f32,
    pub tower_view_angle: f32,
    current_view_range: f32,
    pub visibility_range: f32,
    pub decreased_visibility_range: f32,
    dec_vision_time: u32,
    fast_turning: bool,
    turn_blindness_time: u32,

    can_sprint: bool,
    sprint_time: f32,
    sprint_rest_time: f32,
    sprint_start_time: i64,
    sprint_stop_time: i64,

    in_tower: bool,
    interacting_with_tower: bool,
    tower_start_time: i64,
    tower_interaction_time: f32,

    is_deaf: bool,

    pub width: f32,
    has_collided: bool,
    has_ticked: bool,
    /// The tick currently being processed, stamped at the top of `tick()`.
    /// Read by `set_movement_speed`/`enter_tower`/`leave_tower` so those
    /// methods are callable from strategy hooks without a tick parameter.
    now: Tick,

    inbox: Vec<Message>,
    outbox: Vec<Message>,
    pending_noise: Option<NoiseEvent>,
    pending_markers: Vec<(MarkerType, Position)>,

    pub is_captured: bool,
    pub reached_target: bool,
    reported_captured: bool,
    reported_reached_target: bool,
    pub ticks_in_target: u32,
    pub ticks_since_target: u32,
    pub times_visited_target: u32,

    /// Two opposite corners of this agent's assigned patrol rectangle
    /// set by `World::setup()` for patroller-tagged agents before
    /// `on_pick_start`/`on_setup` run.
    pub patrol_area: Option<(Position, Position)>,
    /// Tower position assigned to this agent during `World::setup()` for
    /// camera-tagged agents.
    pub assigned_tower: Option<Position>,

    behavior: Option<Box<dyn AgentBehavior>>,
}

impl Agent {
    pub fn new(
        id: AgentId,
        kind: AgentKind,
        strategy_tag: Option<String>,
        view: MapView,
        behavior: Box<dyn AgentBehavior>,
    ) -> Self {
        let (view_range, can_sprint, color) = match kind {
            AgentKind::Guard => (6.0, false, [0.0, 0.2, 0.65]),
            AgentKind::Intruder => (7.5, true, [1.0, 0.6, 0.0]),
        };
        Self {
            id,
            kind,
            strategy_tag,
            color,
            location: Position::new(0.0, 0.0),
            heading: 0.0,
            last_heading: 0.0,
            base_speed: 1.4,
            move_speed: 1.4,
            turn_speed: 180.0,
            turn_speed_sprinting: 10.0,
            move_target: 0.0,
            turn_target: 0.0,
            view,
            last_tile: (0, 0),
            view_range,
            view_angle: 45.0,
            base_view_angle: 45.0,
            tower_view_range: 15.0,
            tower_view_angle: 30.0,
            current_view_range: view_range,
            visibility_range: 15.0,
            decreased_visibility_range: 1.0,
            dec_vision_time: 0,
            fast_turning: false,
            turn_blindness_time: 0,
            can_sprint,
            sprint_time: 5.0,
            sprint_rest_time: 10.0,
            sprint_start_time: 0,
            sprint_stop_time: -100_000,
            in_tower: false,
            interacting_with_tower: false,
            tower_start_time: 0,
            tower_interaction_time: 3.0,
            is_deaf: false,
            width: 0.9,
            has_collided: false,
            has_ticked: false,
            now: Tick::ZERO,
            inbox: Vec::new(),
            outbox: Vec::new(),
            pending_noise: None,
            pending_markers: Vec::new(),
            is_captured: false,
            reached_target: false,
            reported_captured: false,
            reported_reached_target: false,
            ticks_in_target: 0,
            ticks_since_target: 0,
            times_visited_target: 0,
            patrol_area: None,
            assigned_tower: None,
            behavior: Some(behavior),
        }
    }

    /// Runs `on_pick_start`, places the agent, seeds its `MapView` at the
    /// chosen starting tile, and runs `on_setup` (part of `World::setup()`,
    /// before patrol/tower assignment has any effect on this agent's own
    /// hooks). Returns the chosen starting position so the caller can
    /// validate it against the map.
    pub fn run_setup(&mut self, rng: &mut SimRng) -> Position {
        let mut behavior = self.behavior.take().expect("agent always owns a behavior");
        let (x, y) = behavior.on_pick_start(self, rng);
        self.location = Position::new(x, y);
        self.last_tile = (x.floor() as i32, y.floor() as i32);
        self.last_heading = self.heading;
        self.update_vision(true);
        behavior.on_setup(self, rng);
        self.behavior = Some(behavior);
        self.location
    }

    /// The agent's current effective view range, after fast-turning and
    /// tower-transition vision modulation. Read by the world's per-tick
    /// visibility computation.
    #[inline]
    pub fn effective_view_range(&self) -> f32 {
        self.current_view_range
    }

    // ---- Agent API -------------------------------------------------------

    pub fn turn(&mut self, delta_deg: f32) {
        self.turn_target = self.heading + delta_deg;
    }

    pub fn turn_to(&mut self, absolute_deg: f32) {
        self.turn_target = absolute_deg;
    }

    pub fn turn_to_point(&mut self, target: Position) {
        if self.location.distance_to(target) > 1e-5 {
            let angle = self.location.angle_to(target);
            self.turn_to(angle);
        } else {
            self.turn_to(self.heading);
        }
    }

    pub fn move_by(&mut self, distance: f32) {
        self.move_target = distance;
    }

    pub fn turn_remaining(&self) -> f32 {
        movement::turn_remaining(self.heading, self.turn_target)
    }

    pub fn move_remaining(&self) -> f32 {
        movement::move_remaining(self.move_target)
    }

    /// Fails silently (with a log warning) when `target == self.id`.
    pub fn send_message(&mut self, target: AgentId, payload: impl Into<String>) {
        if target == self.id {
            tracing::warn!(agent = ?self.id, "dropped a message addressed to itself");
            return;
        }
        self.outbox.push(Message::new(self.id, target, payload));
    }

    /// `speed` must fall in `[0, 3]`; silently ignored while resting.
    pub fn set_movement_speed(&mut self, speed: f32) -> crate::error::AgentResult<()> {
        if !(0.0..=3.0).contains(&speed) {
            return Err(crate::error::AgentError::BadSpeed(speed));
        }
        let now = self.now.0 as i64;
        if self.is_resting(now) {
            return Ok(());
        }
        if self.move_speed > self.base_speed && speed <= self.base_speed {
            self.sprint_stop_time = now;
        }
        if !self.is_sprinting() && speed > self.base_speed {
            self.sprint_start_time = now;
        }
        self.move_speed = speed;
        Ok(())
    }

    /// Succeeds only if within `1.1 * width` of some tower and not already
    /// interacting with one; begins the blind/deaf 3s transition.
    pub fn enter_tower(&mut self) -> bool {
        if self.in_tower || self.interacting_with_tower {
            return false;
        }
        let width = self.width;
        let tower_pos = self
            .view
            .map()
            .towers
            .iter()
            .copied()
            .find(|&t| self.in_tower_range(t));
        let Some(tower_pos) = tower_pos else {
            return false;
        };

        self.in_tower = true;
        self.interacting_with_tower = true;
        self.tower_start_time = self.now.0 as i64;
        self.is_deaf = true;
        self.view_angle = self.tower_view_angle;
        self.current_view_range = 0.0;
        self.move_speed = 0.0;
        self.location = Position::new(tower_pos.x + width / 2.0, tower_pos.y + width / 2.0);
        true
    }

    pub fn leave_tower(&mut self) -> bool {
        if !self.in_tower || self.interacting_with_tower {
            return false;
        }
        self.in_tower = false;
        self.interacting_with_tower = true;
        self.tower_start_time = self.now.0 as i64;
        self.is_deaf = true;
        self.view_angle = self.base_view_angle;
        self.current_view_range = 0.0;
        self.move_speed = 0.0;
        true
    }

    pub fn leave_marker(&mut self, kind: MarkerType) {
        self.pending_markers.push((kind, self.location));
    }

    #[inline]
    fn in_tower_range(&self, tower: Position) -> bool {
        self.location.distance_to(tower) < self.width * 1.1
    }

    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.move_speed > self.base_speed
    }

    fn is_resting(&self, now: i64) -> bool {
        ((now - self.sprint_stop_time) as f32) < self.sprint_rest_time / TIME_PER_TICK
    }

    // ---- World-facing drains --------------------------------------------

    pub fn deliver(&mut self, message: Message) {
        self.inbox.push(message);
    }

    pub fn drain_outbox(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }

    pub fn take_pending_noise(&mut self) -> Option<NoiseEvent> {
        self.pending_noise.take()
    }

    pub fn drain_markers(&mut self) -> Vec<(MarkerType, Position)> {
        std::mem::take(&mut self.pending_markers)
    }

    pub fn set_collided(&mut self) {
        self.has_collided = true;
    }

    pub fn apply_collision(&mut self, outcome: CollisionOutcome) {
        self.location = outcome.location;
        if outcome.collided {
            self.has_collided = true;
        }
    }

    // ---- Internal per-tick phases ---------------------------------------

    fn update_sprint(&mut self, now: i64) {
        if !self.can_sprint {
            return;
        }
        if self.is_sprinting() && (now - self.sprint_start_time) as f32 > self.sprint_time / TIME_PER_TICK {
            self.sprint_stop_time = now;
        }
        if self.is_resting(now) {
            self.move_speed = 0.0;
        }
    }

    fn update_tower_interaction(&mut self, now: i64) {
        if !self.interacting_with_tower {
            return;
        }
        if (now - self.tower_start_time) as f32 < self.tower_interaction_time / TIME_PER_TICK {
            return;
        }
        self.interacting_with_tower = false;
        self.is_deaf = false;
        if self.in_tower {
            self.current_view_range = self.tower_view_range;
            self.move_speed = 0.0;
        } else {
            self.current_view_range = self.view_range;
            self.move_speed = self.base_speed;
        }
    }

    /// Returns whether `reveal_visible` actually ran this tick.
    fn update_vision(&mut self, force: bool) -> bool {
        let current_tile = (self.location.x.floor() as i32, self.location.y.floor() as i32);

        let remaining = self.turn_remaining();
        let mut current_turn_speed = 0.0;
        if remaining != 0.0 {
            current_turn_speed = self.turn_speed.min(remaining.abs() / TIME_PER_TICK);
        }

        if current_turn_speed > 45.0 {
            self.fast_turning = true;
            self.current_view_range = 0.0;
        } else if self.fast_turning {
            if self.turn_blindness_time as f32 * TIME_PER_TICK < 0.5 {
                self.current_view_range = 0.0;
                self.turn_blindness_time += 1;
            } else {
                self.current_view_range = self.view_range;
                self.fast_turning = false;
                self.turn_blindness_time = 0;
            }
        }

        let vision_modifier = self.view.map().vision_modifier(current_tile.0, current_tile.1);

        if vision_modifier < 1.0 && self.move_target != 0.0 {
            if self.dec_vision_time as f32 * TIME_PER_TICK > 10.0 {
                self.visibility_range = self.decreased_visibility_range;
            }
            self.dec_vision_time += 1;
        } else {
            self.dec_vision_time = 0;
            self.visibility_range = self.tower_view_range;
        }

        let heading_delta = (self.heading - self.last_heading).abs();
        if force || self.last_tile != current_tile || heading_delta > 5.0 || self.in_tower {
            self.last_tile = current_tile;
            let radius = self.current_view_range * vision_modifier;
            self.view.reveal_visible(
                current_tile.0,
                current_tile.1,
                radius,
                self.view_angle,
                self.heading,
                self.in_tower,
            );
            self.last_heading = self.heading;
            true
        } else {
            false
        }
    }

    fn process_movement(&mut self, now: Tick, map_cells: u32, rng: &mut SimRng) {
        self.update_sprint(now.0 as i64);

        let turn_speed = if self.is_sprinting() {
            self.turn_speed_sprinting
        } else {
            self.turn_speed
        };
        self.heading = movement::step_turn(self.heading, self.turn_target, turn_speed, TIME_PER_TICK);

        let (new_location, new_target, _distance) =
            movement::step_move(self.location, self.heading, self.move_target, self.move_speed, TIME_PER_TICK);
        self.location = new_location;
        self.move_target = new_target;

        self.make_noise(now, map_cells, rng);
    }

    fn make_noise(&mut self, now: Tick, map_cells: u32, rng: &mut SimRng) {
        let chance = noise::emission_chance_per_tick(map_cells, TIME_PER_TICK);
        if rng.gen_bool(chance as f64) {
            let radius = noise::self_noise_radius(self.move_speed);
            self.pending_noise = Some(NoiseEvent::from_agent(self.location, self.id, radius, now));
        }
    }

    /// The fixed per-tick hook order.
    pub fn tick(
        &mut self,
        now: Tick,
        seen_agents: &[AgentView],
        noises: &[PerceivedNoise],
        map_cells: u32,
        rng: &mut SimRng,
    ) {
        let mut behavior = self.behavior.take().expect("agent always owns a behavior");
        self.now = now;
        let force_vision = !self.has_ticked;
        self.has_ticked = true;

        if self.kind == AgentKind::Intruder && self.reached_target {
            if !self.reported_reached_target {
                self.reported_reached_target = true;
                behavior.on_reached_target(self, rng);
            }
            self.behavior = Some(behavior);
            return;
        }
        if self.kind == AgentKind::Intruder && self.is_captured {
            if !self.reported_captured {
                self.reported_captured = true;
                behavior.on_captured(self, rng);
            }
            self.behavior = Some(behavior);
            return;
        }

        self.update_tower_interaction(now.0 as i64);

        if self.update_vision(force_vision) {
            behavior.on_vision_update(self, rng);
        }

        if !noises.is_empty() && !self.is_deaf {
            behavior.on_noise(self, noises, rng);
        }

        let inbox = std::mem::take(&mut self.inbox);
        for message in &inbox {
            behavior.on_message(self, message, rng);
        }

        if self.has_collided {
            behavior.on_collide(self, rng);
            self.has_collided = false;
        }

        behavior.on_tick(self, seen_agents, rng);

        self.process_movement(now, map_cells, rng);

        self.behavior = Some(behavior);
    }

    pub fn as_view(&self) -> AgentView {
        AgentView::of(self)
    }
}
