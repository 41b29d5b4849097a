//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is
//! one step; the step size is baked into entity speeds (pixels per tick).

use super::collision::{compact, overlapping_indices};
use super::state::{Burst, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// A joystick reading: heading in radians, deflection in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Directive {
    pub angle: f32,
    pub strength: f32,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New steering, if the stick moved since the last tick
    pub directive: Option<Directive>,
}

/// Advance the game state by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if let Some(directive) = input.directive {
        state.set_directive(directive.angle, directive.strength);
    }

    // Nothing moves once the craft is gone
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    // Motion
    state.craft.advance(&state.field);
    let target = state.craft.pos;
    for pursuer in &mut state.pursuers {
        pursuer.home_toward(target);
    }
    state.bursts.retain_mut(Burst::decay);

    // Bodies resolve before pursuers so a fatal tick still pays out
    collect_bodies(state, &mut events);
    let destroyed = check_pursuers(state, &mut events);

    if !destroyed && state.bodies.is_empty() {
        advance_level(state, &mut events);
    }

    events
}

fn collect_bodies(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let craft = &state.craft;
    let hits = overlapping_indices(&state.bodies, craft.pos, craft.radius, |b| {
        (b.pos, b.radius)
    });

    for &i in &hits {
        let body = &state.bodies[i];
        state.score = state.score.saturating_add(body.value);
        state.coins = state.coins.saturating_add(body.value);
        state.bursts.push(Burst::new(body.pos));
        log::debug!("Collected body worth {} at {:?}", body.value, body.pos);
        events.push(GameEvent::BodyCollected {
            value: body.value,
            pos: body.pos,
        });
    }

    compact(&mut state.bodies, &hits);
}

/// Returns true if the craft was destroyed this tick
fn check_pursuers(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let craft = &state.craft;
    let hits = overlapping_indices(&state.pursuers, craft.pos, craft.radius, |p| {
        (p.pos, p.radius)
    });
    if hits.is_empty() {
        return false;
    }

    let craft_pos = state.craft.pos;
    for _ in &hits {
        state.bursts.push(Burst::new(craft_pos));
        events.push(GameEvent::CraftDestroyed { pos: craft_pos });
    }
    compact(&mut state.pursuers, &hits);

    state.phase = GamePhase::GameOver;
    log::info!(
        "Craft destroyed on level {} after {} ticks (score {}, coins {})",
        state.level,
        state.time_ticks,
        state.score,
        state.coins
    );
    true
}

fn advance_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.level = state.level.saturating_add(1);
    let bonus = state.level as u64 * LEVEL_BONUS;
    state.coins = state.coins.saturating_add(bonus);
    state.populate_level();

    log::info!(
        "Level {} reached: +{} coins, {} bodies, {} pursuers at speed {}",
        state.level,
        bonus,
        state.bodies.len(),
        state.pursuers.len(),
        super::spawn::pursuer_speed(state.level)
    );
    events.push(GameEvent::LevelCleared {
        level: state.level,
        bonus,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Body, Field, Pursuer};
    use glam::Vec2;
    use proptest::prelude::*;

    fn body_at(x: f32, y: f32, radius: f32, value: u64) -> Body {
        Body {
            pos: Vec2::new(x, y),
            radius,
            value,
            color: [255, 255, 255],
        }
    }

    /// A body far from everything so the level never clears by accident
    fn parked_body() -> Body {
        body_at(1800.0, 100.0, 30.0, 1_000)
    }

    #[test]
    fn test_single_body_collection() {
        let mut state = GameState::empty(1);
        state.bodies.push(body_at(520.0, 500.0, 40.0, 3000));
        state.bodies.push(parked_body());

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 3000);
        assert_eq!(state.coins, 1_000_000 + 3000);
        assert_eq!(state.bodies.len(), 1);
        assert_eq!(state.bursts.len(), 1);
        assert_eq!(state.bursts[0].pos, Vec2::new(520.0, 500.0));
        assert_eq!(state.bursts[0].life, 1.0);
        assert_eq!(state.bursts[0].radius, BURST_RADIUS);
        assert_eq!(
            events,
            vec![GameEvent::BodyCollected {
                value: 3000,
                pos: Vec2::new(520.0, 500.0)
            }]
        );
    }

    #[test]
    fn test_simultaneous_bodies_all_resolve() {
        let mut state = GameState::empty(1);
        state.bodies.push(body_at(510.0, 500.0, 30.0, 1000));
        state.bodies.push(parked_body());
        state.bodies.push(body_at(500.0, 530.0, 30.0, 2000));
        state.bodies.push(body_at(490.0, 490.0, 30.0, 4000));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 7000);
        assert_eq!(state.coins, 1_007_000);
        assert_eq!(state.bodies.len(), 1);
        assert_eq!(state.bodies[0].pos, Vec2::new(1800.0, 100.0));
        assert_eq!(state.bursts.len(), 3);
    }

    #[test]
    fn test_pursuer_contact_ends_session() {
        let mut state = GameState::empty(1);
        state.bodies.push(parked_body());
        state.pursuers.push(Pursuer::new(Vec2::new(560.0, 500.0), 3.0, 10));
        state.pursuers.push(Pursuer::new(Vec2::new(-100.0, -100.0), 3.0, 10));

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.pursuers.len(), 1);
        assert_eq!(state.bursts.len(), 1);
        assert_eq!(state.bursts[0].pos, Vec2::new(500.0, 500.0));
        assert_eq!(
            events,
            vec![GameEvent::CraftDestroyed {
                pos: Vec2::new(500.0, 500.0)
            }]
        );
    }

    #[test]
    fn test_two_pursuers_two_bursts() {
        let mut state = GameState::empty(1);
        state.bodies.push(parked_body());
        state.pursuers.push(Pursuer::new(Vec2::new(560.0, 500.0), 3.0, 10));
        state.pursuers.push(Pursuer::new(Vec2::new(440.0, 500.0), 3.0, 10));

        tick(&mut state, &TickInput::default());

        assert!(state.is_game_over());
        assert!(state.pursuers.is_empty());
        assert_eq!(state.bursts.len(), 2);
    }

    #[test]
    fn test_last_body_and_pursuer_same_tick() {
        let mut state = GameState::empty(1);
        state.bodies.push(body_at(520.0, 500.0, 40.0, 3000));
        state.pursuers.push(Pursuer::new(Vec2::new(440.0, 500.0), 3.0, 10));

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 3000);
        assert_eq!(state.coins, 1_003_000);
        assert!(state.is_game_over());
        assert_eq!(state.level, 1);
        assert!(state.bodies.is_empty());
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::LevelCleared { .. }))
        );
    }

    #[test]
    fn test_level_completion() {
        let mut state = GameState::empty(1);
        state.bodies.push(body_at(500.0, 500.0, 30.0, 2500));

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.level, 2);
        assert_eq!(state.score, 2500);
        assert_eq!(state.coins, 1_000_000 + 2500 + 2_000_000);
        assert_eq!(state.bodies.len(), BODIES_PER_LEVEL);
        assert_eq!(state.pursuers.len(), PURSUERS_PER_LEVEL);
        assert!(state.pursuers.iter().all(|p| p.speed == 3.0));
        assert!(events.contains(&GameEvent::LevelCleared {
            level: 2,
            bonus: 2_000_000
        }));
    }

    #[test]
    fn test_level_counter_saturates() {
        let mut state = GameState::empty(1);
        state.level = u32::MAX;
        state.bodies.push(body_at(500.0, 500.0, 30.0, 10));

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.level, u32::MAX);
        assert_eq!(state.bodies.len(), BODIES_PER_LEVEL);
        assert!(state.pursuers.iter().all(|p| p.damage == u32::MAX));
        assert!(events.contains(&GameEvent::LevelCleared {
            level: u32::MAX,
            bonus: u32::MAX as u64 * LEVEL_BONUS
        }));
    }

    #[test]
    fn test_game_over_tick_is_noop() {
        let mut state = GameState::new(5);
        state.phase = GamePhase::GameOver;
        state.bursts.push(Burst::new(Vec2::ZERO));
        let craft_pos = state.craft.pos;
        let pursuer_pos: Vec<Vec2> = state.pursuers.iter().map(|p| p.pos).collect();

        let input = TickInput {
            directive: Some(Directive {
                angle: 0.0,
                strength: 1.0,
            }),
        };
        for _ in 0..10 {
            assert!(tick(&mut state, &input).is_empty());
        }

        assert_eq!(state.craft.pos, craft_pos);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.bursts[0].life, 1.0);
        let after: Vec<Vec2> = state.pursuers.iter().map(|p| p.pos).collect();
        assert_eq!(after, pursuer_pos);
    }

    #[test]
    fn test_directive_moves_craft() {
        let mut state = GameState::empty(1);
        state.bodies.push(parked_body());
        let input = TickInput {
            directive: Some(Directive {
                angle: 0.0,
                strength: 1.0,
            }),
        };
        tick(&mut state, &input);
        assert!((state.craft.pos.x - 508.0).abs() < 1e-4);
        tick(&mut state, &TickInput::default());
        assert!((state.craft.pos.x - 516.0).abs() < 1e-4);
    }

    #[test]
    fn test_pursuers_close_in() {
        let mut state = GameState::empty(1);
        state.bodies.push(parked_body());
        state.pursuers.push(Pursuer::new(Vec2::new(1500.0, 500.0), 4.0, 10));
        tick(&mut state, &TickInput::default());
        assert!((state.pursuers[0].pos.x - 1496.0).abs() < 1e-3);
        assert!((state.pursuers[0].pos.y - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                directive: Some(Directive {
                    angle: 0.5,
                    strength: 0.8,
                }),
            },
            TickInput::default(),
            TickInput {
                directive: Some(Directive {
                    angle: -2.0,
                    strength: 1.0,
                }),
            },
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.craft.pos, state2.craft.pos);
        assert_eq!(state1.pursuers.len(), state2.pursuers.len());
    }

    proptest! {
        #[test]
        fn prop_craft_stays_in_field(
            x in -500.0f32..2500.0,
            y in -500.0f32..1500.0,
            angle in -10.0f32..10.0,
            strength in 0.0f32..1.0,
            ticks in 1usize..200,
        ) {
            let mut state = GameState::empty(1);
            state.bodies.push(body_at(-1000.0, -1000.0, 1.0, 1));
            state.craft.pos = Vec2::new(x, y);
            state.set_directive(angle, strength);
            for _ in 0..ticks {
                tick(&mut state, &TickInput::default());
            }
            let r = state.craft.radius;
            let field = Field::default();
            if state.craft.moving {
                prop_assert!(state.craft.pos.x >= r && state.craft.pos.x <= field.width - r);
                prop_assert!(state.craft.pos.y >= r && state.craft.pos.y <= field.height - r);
            }
        }

        #[test]
        fn prop_score_and_coins_rise_together(seed in any::<u64>(), angle in -3.2f32..3.2) {
            let mut state = GameState::new(seed);
            state.pursuers.clear();
            state.set_directive(angle, 1.0);
            let mut paid = 0u64;
            for _ in 0..300 {
                let score_before = state.score;
                let coins_before = state.coins;
                let events = tick(&mut state, &TickInput::default());
                let collected: u64 = events
                    .iter()
                    .filter_map(|e| match e {
                        GameEvent::BodyCollected { value, .. } => Some(*value),
                        _ => None,
                    })
                    .sum();
                let bonus: u64 = events
                    .iter()
                    .filter_map(|e| match e {
                        GameEvent::LevelCleared { bonus, .. } => Some(*bonus),
                        _ => None,
                    })
                    .sum();
                prop_assert_eq!(state.score - score_before, collected);
                prop_assert_eq!(state.coins - coins_before, collected + bonus);
                paid += collected;
            }
            prop_assert_eq!(state.score, paid);
        }

        #[test]
        fn prop_game_over_ticks_change_nothing(
            seed in any::<u64>(),
            angle in -10.0f32..10.0,
            strength in 0.0f32..1.0,
            ticks in 1usize..50,
        ) {
            let mut state = GameState::new(seed);
            state.bursts.push(Burst::new(Vec2::new(10.0, 10.0)));
            state.phase = GamePhase::GameOver;
            let craft_pos = state.craft.pos;
            let pursuers: Vec<Vec2> = state.pursuers.iter().map(|p| p.pos).collect();
            let bodies = state.bodies.len();
            let (score, coins, level) = (state.score, state.coins, state.level);

            let input = TickInput {
                directive: Some(Directive { angle, strength }),
            };
            for _ in 0..ticks {
                prop_assert!(tick(&mut state, &input).is_empty());
            }

            prop_assert_eq!(state.craft.pos, craft_pos);
            prop_assert_eq!(state.pursuers.iter().map(|p| p.pos).collect::<Vec<_>>(), pursuers);
            prop_assert_eq!(state.bodies.len(), bodies);
            prop_assert_eq!((state.score, state.coins, state.level), (score, coins, level));
            prop_assert_eq!(state.bursts[0].life, 1.0);
            prop_assert_eq!(state.time_ticks, 0);
        }

        #[test]
        fn prop_bursts_expire_within_twenty_ticks(n in 1usize..5) {
            let mut state = GameState::empty(1);
            state.bodies.push(parked_body());
            for _ in 0..n {
                state.bursts.push(Burst::new(Vec2::ZERO));
            }
            for t in 1..=20 {
                let before: Vec<f32> = state.bursts.iter().map(|b| b.life).collect();
                tick(&mut state, &TickInput::default());
                if t < 20 {
                    prop_assert_eq!(state.bursts.len(), n);
                    for (b, prev) in state.bursts.iter().zip(before) {
                        prop_assert!((prev - b.life - BURST_DECAY).abs() < 1e-5);
                    }
                }
            }
            prop_assert!(state.bursts.is_empty());
        }
    }
}
