//! Unit tests for sv-agent.

#[cfg(test)]
mod movement_tests {
    use approx::assert_relative_eq;
    use sv_core::Position;
    use sv_spatial::MapBuilder;

    use crate::movement::{resolve_collision, step_move, step_turn, turn_remaining};

    #[test]
    fn turn_step_clamps_to_max_speed() {
        let h = step_turn(0.0, 90.0, 20.0, 1.0 / 20.0);
        assert_relative_eq!(h, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn turn_step_reaches_target_without_overshoot() {
        let h = step_turn(89.0, 90.0, 180.0, 1.0 / 20.0);
        assert_relative_eq!(h, 90.0, epsilon = 1e-4);
    }

    #[test]
    fn turn_remaining_wraps_into_shortest_path() {
        // from 170 to -170 the shortest remaining turn is +20, not -340.
        let remaining = turn_remaining(170.0, -170.0);
        assert_relative_eq!(remaining, 20.0, epsilon = 1e-4);
    }

    #[test]
    fn move_step_consumes_target() {
        let start = Position::new(1.0, 1.0);
        let (next, remaining, distance) = step_move(start, 0.0, 1.0, 1.4, 1.0 / 20.0);
        assert_relative_eq!(distance, 1.4 / 20.0, epsilon = 1e-5);
        assert_relative_eq!(remaining, 1.0 - distance, epsilon = 1e-5);
        assert_relative_eq!(next.y, start.y + distance, epsilon = 1e-5);
    }

    #[test]
    fn move_step_never_overshoots_small_remaining_distance() {
        let start = Position::new(1.0, 1.0);
        let (_next, remaining, distance) = step_move(start, 0.0, 0.01, 1.4, 1.0 / 20.0);
        assert!(distance <= 0.01 + 1e-6);
        assert!(remaining >= 0.0);
    }

    #[test]
    fn collision_pushes_agent_out_of_wall_edge() {
        let mut map = MapBuilder::new(5, 5).build();
        map.set_wall(2, 2, true);
        // agent overlapping the wall's left edge
        let outcome = resolve_collision(&map, Position::new(1.8, 2.5), 0.9);
        assert!(outcome.collided);
        assert!(outcome.location.x < 2.0);
    }

    #[test]
    fn collision_is_noop_in_open_space() {
        let map = MapBuilder::new(5, 5).build();
        let outcome = resolve_collision(&map, Position::new(2.5, 2.5), 0.9);
        assert!(!outcome.collided);
        assert_relative_eq!(outcome.location.x, 2.5, epsilon = 1e-6);
        assert_relative_eq!(outcome.location.y, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn collision_clips_to_bounds() {
        let map = MapBuilder::new(5, 5).build();
        let outcome = resolve_collision(&map, Position::new(-1.0, 2.0), 0.9);
        assert!(outcome.collided);
        assert!(outcome.location.x >= 0.0);
    }
}

#[cfg(test)]
mod noise_tests {
    use sv_core::{AgentId, Position, SimRng, Tick};

    use crate::noise::{emission_chance_per_tick, self_noise_radius, NoiseEvent, PerceivedNoise};

    #[test]
    fn self_noise_radius_bands_match_speed() {
        assert_eq!(self_noise_radius(0.0), 0.0);
        assert_eq!(self_noise_radius(0.3), 0.5);
        assert_eq!(self_noise_radius(0.7), 1.5);
        assert_eq!(self_noise_radius(1.5), 2.5);
        assert_eq!(self_noise_radius(2.5), 5.0);
    }

    #[test]
    fn emission_chance_matches_ambient_formula() {
        // lambda = (0.1/60) * (W*H/25), chance = lambda * TIME_PER_TICK
        let chance = emission_chance_per_tick(20 * 20, 1.0 / 20.0);
        let expected = (0.1_f32 / 60.0) * (400.0 / 25.0) * (1.0 / 20.0);
        assert!((chance - expected).abs() < 1e-9);
    }

    #[test]
    fn perceived_angle_degenerate_at_zero_distance() {
        let mut rng = SimRng::new(1);
        let observer = Position::new(5.0, 5.0);
        let event = NoiseEvent::ambient(observer, 2.5, Tick::ZERO);
        let perceived = PerceivedNoise::observe(observer, &event, &mut rng);
        assert_eq!(perceived.perceived_angle, 0.0);
    }

    #[test]
    fn perceived_angle_is_near_true_angle_within_noise_tolerance() {
        let mut rng = SimRng::new(7);
        let observer = Position::new(0.0, 0.0);
        let event = NoiseEvent::from_agent(Position::new(0.0, 5.0), AgentId::FIRST, 1.0, Tick::ZERO);
        let perceived = PerceivedNoise::observe(observer, &event, &mut rng);
        // true angle toward +y is 0; with sigma=10 this should rarely exceed ~60 degrees.
        assert!(perceived.perceived_angle.abs() < 60.0);
    }
}

#[cfg(test)]
mod agent_tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use sv_core::{AgentId, Position, SimRng, Tick};
    use sv_spatial::{MapBuilder, MapView};

    use crate::behavior::{AgentBehavior, AgentKind, AgentView};
    use crate::message::Message;
    use crate::noise::PerceivedNoise;
    use crate::Agent;

    fn open_view(w: u32, h: u32) -> MapView {
        MapView::new(Arc::new(MapBuilder::new(w, h).build()))
    }

    struct RecordingBehavior {
        start: (f32, f32),
        ticks: Rc<RefCell<u32>>,
        collisions: Rc<RefCell<u32>>,
        messages: Rc<RefCell<Vec<String>>>,
    }

    impl AgentBehavior for RecordingBehavior {
        fn on_pick_start(&mut self, _agent: &Agent, _rng: &mut SimRng) -> (f32, f32) {
            self.start
        }

        fn on_tick(&mut self, _agent: &mut Agent, _seen_agents: &[AgentView], _rng: &mut SimRng) {
            *self.ticks.borrow_mut() += 1;
        }

        fn on_collide(&mut self, _agent: &mut Agent, _rng: &mut SimRng) {
            *self.collisions.borrow_mut() += 1;
        }

        fn on_message(&mut self, _agent: &mut Agent, message: &Message, _rng: &mut SimRng) {
            self.messages.borrow_mut().push(message.payload.clone());
        }
    }

    #[test]
    fn run_setup_places_agent_at_chosen_start() {
        let ticks = Rc::new(RefCell::new(0));
        let behavior = RecordingBehavior {
            start: (3.5, 4.5),
            ticks: ticks.clone(),
            collisions: Rc::new(RefCell::new(0)),
            messages: Rc::new(RefCell::new(vec![])),
        };
        let mut agent = Agent::new(
            AgentId::FIRST,
            AgentKind::Guard,
            None,
            open_view(10, 10),
            Box::new(behavior),
        );
        let mut rng = SimRng::new(1);
        let placed = agent.run_setup(&mut rng);
        assert_eq!(placed, Position::new(3.5, 4.5));
        assert_eq!(agent.location, Position::new(3.5, 4.5));
    }

    #[test]
    fn tick_invokes_on_tick_every_time() {
        let ticks = Rc::new(RefCell::new(0));
        let behavior = RecordingBehavior {
            start: (2.5, 2.5),
            ticks: ticks.clone(),
            collisions: Rc::new(RefCell::new(0)),
            messages: Rc::new(RefCell::new(vec![])),
        };
        let mut agent = Agent::new(
            AgentId::FIRST,
            AgentKind::Guard,
            None,
            open_view(10, 10),
            Box::new(behavior),
        );
        let mut rng = SimRng::new(2);
        agent.run_setup(&mut rng);
        for t in 0..5u64 {
            agent.tick(Tick(t), &[], &[], 100, &mut rng);
        }
        assert_eq!(*ticks.borrow(), 5);
    }

    #[test]
    fn collision_flag_dispatches_on_collide_and_clears() {
        let collisions = Rc::new(RefCell::new(0));
        let behavior = RecordingBehavior {
            start: (2.5, 2.5),
            ticks: Rc::new(RefCell::new(0)),
            collisions: collisions.clone(),
            messages: Rc::new(RefCell::new(vec![])),
        };
        let mut agent = Agent::new(
            AgentId::FIRST,
            AgentKind::Guard,
            None,
            open_view(10, 10),
            Box::new(behavior),
        );
        let mut rng = SimRng::new(3);
        agent.run_setup(&mut rng);
        agent.set_collided();
        agent.tick(Tick(0), &[], &[], 100, &mut rng);
        assert_eq!(*collisions.borrow(), 1);
        agent.tick(Tick(1), &[], &[], 100, &mut rng);
        assert_eq!(*collisions.borrow(), 1, "flag must not re-trigger without a new collision");
    }

    #[test]
    fn inbound_messages_are_drained_once() {
        let messages = Rc::new(RefCell::new(vec![]));
        let behavior = RecordingBehavior {
            start: (2.5, 2.5),
            ticks: Rc::new(RefCell::new(0)),
            collisions: Rc::new(RefCell::new(0)),
            messages: messages.clone(),
        };
        let mut agent = Agent::new(
            AgentId::FIRST,
            AgentKind::Guard,
            None,
            open_view(10, 10),
            Box::new(behavior),
        );
        let mut rng = SimRng::new(4);
        agent.run_setup(&mut rng);
        agent.deliver(Message::new(AgentId(2), AgentId::FIRST, "hello"));
        agent.tick(Tick(0), &[], &[], 100, &mut rng);
        assert_eq!(&*messages.borrow(), &["hello".to_string()]);
        agent.tick(Tick(1), &[], &[], 100, &mut rng);
        assert_eq!(messages.borrow().len(), 1, "second tick must not redeliver");
    }

    #[test]
    fn send_message_to_self_is_dropped() {
        let behavior = RecordingBehavior {
            start: (2.5, 2.5),
            ticks: Rc::new(RefCell::new(0)),
            collisions: Rc::new(RefCell::new(0)),
            messages: Rc::new(RefCell::new(vec![])),
        };
        let mut agent = Agent::new(
            AgentId::FIRST,
            AgentKind::Guard,
            None,
            open_view(10, 10),
            Box::new(behavior),
        );
        agent.send_message(AgentId::FIRST, "oops");
        assert!(agent.drain_outbox().is_empty());
    }

    #[test]
    fn set_movement_speed_rejects_out_of_bounds() {
        let behavior = RecordingBehavior {
            start: (2.5, 2.5),
            ticks: Rc::new(RefCell::new(0)),
            collisions: Rc::new(RefCell::new(0)),
            messages: Rc::new(RefCell::new(vec![])),
        };
        let mut agent = Agent::new(
            AgentId::FIRST,
            AgentKind::Guard,
            None,
            open_view(10, 10),
            Box::new(behavior),
        );
        assert!(agent.set_movement_speed(3.5).is_err());
        assert!(agent.set_movement_speed(-0.1).is_err());
        assert!(agent.set_movement_speed(1.0).is_ok());
    }

    #[test]
    fn enter_tower_requires_proximity() {
        let mut map = MapBuilder::new(10, 10).build();
        map.add_tower(5, 5);
        let view = MapView::new(Arc::new(map));
        let behavior = RecordingBehavior {
            start: (0.5, 0.5),
            ticks: Rc::new(RefCell::new(0)),
            collisions: Rc::new(RefCell::new(0)),
            messages: Rc::new(RefCell::new(vec![])),
        };
        let mut agent = Agent::new(AgentId::FIRST, AgentKind::Guard, None, view, Box::new(behavior));
        let mut rng = SimRng::new(5);
        agent.run_setup(&mut rng);
        assert!(!agent.enter_tower(), "too far from any tower");

        agent.location = Position::new(5.1, 5.1);
        assert!(agent.enter_tower());
        assert!(!agent.enter_tower(), "already interacting, duplicate entry rejected");
    }

    #[test]
    fn reached_target_hook_fires_once() {
        struct CaptureBehavior(Rc<RefCell<u32>>);
        impl AgentBehavior for CaptureBehavior {
            fn on_pick_start(&mut self, _agent: &Agent, _rng: &mut SimRng) -> (f32, f32) {
                (0.5, 0.5)
            }
            fn on_tick(&mut self, _agent: &mut Agent, _seen_agents: &[AgentView], _rng: &mut SimRng) {}
            fn on_reached_target(&mut self, _agent: &mut Agent, _rng: &mut SimRng) {
                *self.0.borrow_mut() += 1;
            }
        }
        let fired = Rc::new(RefCell::new(0));
        let mut agent = Agent::new(
            AgentId::FIRST,
            AgentKind::Intruder,
            None,
            open_view(10, 10),
            Box::new(CaptureBehavior(fired.clone())),
        );
        let mut rng = SimRng::new(6);
        agent.run_setup(&mut rng);
        agent.reached_target = true;
        agent.tick(Tick(0), &[], &[], 100, &mut rng);
        agent.tick(Tick(1), &[], &[], 100, &mut rng);
        assert_eq!(*fired.borrow(), 1, "on_reached_target must fire exactly once");
    }

    #[test]
    fn noop_behavior_places_and_ticks_without_panicking() {
        use crate::behavior::NoopBehavior;
        let mut agent = Agent::new(
            AgentId::FIRST,
            AgentKind::Guard,
            None,
            open_view(5, 5),
            Box::new(NoopBehavior),
        );
        let mut rng = SimRng::new(8);
        agent.run_setup(&mut rng);
        let noises: Vec<PerceivedNoise> = vec![];
        agent.tick(Tick(0), &[], &noises, 25, &mut rng);
    }
}
