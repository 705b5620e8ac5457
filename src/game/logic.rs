//! The per-frame simulation step: entity integration, obstacle scrolling,
//! spawning, scoring and collision against the nearest obstacle.

use super::types::{Obstacle, World};
use rand::Rng;
use tracing::trace;

/// What happened during one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Obstacles that scrolled off the left edge (one point each).
    pub removed: u32,
    /// Whether a new obstacle was appended at the right edge.
    pub spawned: bool,
    /// Whether the entity hit the nearest obstacle. `running` is now false.
    pub collided: bool,
}

/// Advance the world to `now_ms`.
///
/// The elapsed time is measured against the last tick. A clock that moved
/// backward counts as no time passing.
pub fn update<R: Rng + ?Sized>(world: &mut World, now_ms: u64, rng: &mut R) -> StepOutcome {
    let diff = now_ms.saturating_sub(world.time);
    world.time = now_ms;
    world.age += diff;
    step(world, diff, rng)
}

/// Run one step with an explicit elapsed time in milliseconds.
///
/// Does not touch `time` or `age`; [`update`] owns the clock bookkeeping.
pub fn step<R: Rng + ?Sized>(world: &mut World, diff: u64, rng: &mut R) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    // Zero-length ticks leave the entity alone; gravity only accrues with time.
    if diff > 0 {
        integrate_entity(world, diff as f64);
    }

    outcome.removed = scroll_obstacles(world, diff as f64);

    if needs_spawn(world) {
        spawn_obstacle(world, rng);
        outcome.spawned = true;
    }

    if check_collision(world) {
        world.running = false;
        outcome.collided = true;
    }

    outcome
}

fn integrate_entity(world: &mut World, diff: f64) {
    let entity = &mut world.entity;
    let max = (world.height - world.tuning.entity_height).max(0.0);
    entity.position = (entity.position + entity.velocity * diff).clamp(0.0, max);
    if entity.position == 0.0 {
        entity.velocity = 0.0;
    }
    entity.velocity += world.tuning.gravity;
}

/// Scroll everything left and drop what left the screen. Returns the number
/// of obstacles removed.
fn scroll_obstacles(world: &mut World, diff: f64) -> u32 {
    let shift = world.tuning.base_speed * diff + world.age as f64 * world.tuning.age_speed_factor;
    let width = world.tuning.obstacle_width;

    let before = world.obstacles.len();
    world.obstacles.retain_mut(|obstacle| {
        obstacle.position -= shift;
        obstacle.position >= -width
    });
    let removed = (before - world.obstacles.len()) as u32;

    if removed > 0 {
        world.score += removed;
        trace!(removed, score = world.score, "obstacles passed");
    }
    removed
}

fn needs_spawn(world: &World) -> bool {
    match world.obstacles.last() {
        None => true,
        Some(last) => {
            last.position + world.tuning.obstacle_width < world.width - world.tuning.spacing
        }
    }
}

/// Append a new obstacle at the right edge with a random gap.
pub fn spawn_obstacle<R: Rng + ?Sized>(world: &mut World, rng: &mut R) {
    let offset = (rng.gen::<f64>() * world.height / 2.0).round();
    let span = world.tuning.opening_span(world.height);
    let opening = (world.tuning.min_opening + rng.gen::<f64>() * span).round();

    world.obstacles.push(Obstacle {
        position: world.width,
        offset,
        opening,
    });
    trace!(offset, opening, count = world.obstacles.len(), "obstacle spawned");
}

/// Whether the entity overlaps the blocks of the leftmost obstacle.
///
/// Only the leftmost obstacle is checked; see
/// [`Tuning::nearest_only_collision_is_sound`](super::types::Tuning::nearest_only_collision_is_sound).
/// Touching a gap edge exactly is not a collision.
pub fn check_collision(world: &World) -> bool {
    let Some(nearest) = world.obstacles.first() else {
        return false;
    };
    let tuning = &world.tuning;
    let left = tuning.entity_offset;
    let top = world.entity.position;

    let overlaps_horizontally =
        left + tuning.entity_width > nearest.position
            && left < nearest.position + tuning.obstacle_width;
    let outside_gap = top < nearest.offset || top + tuning.entity_height > nearest.gap_bottom();

    overlaps_horizontally && outside_gap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Variant;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn classic_world() -> World {
        World::new(Variant::Classic.tuning(), 800.0, 600.0, 0)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn obstacle(position: f64, offset: f64, opening: f64) -> Obstacle {
        Obstacle {
            position,
            offset,
            opening,
        }
    }

    #[test]
    fn test_entity_inside_gap_does_not_collide() {
        let mut world = classic_world();
        world.obstacles.push(obstacle(100.0, 50.0, 200.0));
        world.entity.position = 60.0;
        assert!(!check_collision(&world));
    }

    #[test]
    fn test_entity_above_gap_collides() {
        let mut world = classic_world();
        world.obstacles.push(obstacle(100.0, 50.0, 200.0));
        world.entity.position = 10.0;
        assert!(check_collision(&world));
    }

    #[test]
    fn test_entity_below_gap_collides() {
        let mut world = classic_world();
        world.obstacles.push(obstacle(100.0, 50.0, 200.0));
        world.entity.position = 240.0; // bottom at 270 > 250
        assert!(check_collision(&world));
    }

    #[test]
    fn test_flush_gap_edges_do_not_collide() {
        let mut world = classic_world();
        world.obstacles.push(obstacle(100.0, 50.0, 200.0));

        world.entity.position = 50.0; // top == offset
        assert!(!check_collision(&world));

        world.entity.position = 220.0; // bottom == offset + opening
        assert!(!check_collision(&world));
    }

    #[test]
    fn test_no_horizontal_overlap_no_collision() {
        let mut world = classic_world();
        // Entity spans 100..130; obstacle touching at 130 does not overlap.
        world.obstacles.push(obstacle(130.0, 300.0, 100.0));
        world.entity.position = 0.0;
        assert!(!check_collision(&world));

        world.obstacles[0].position = 129.0;
        assert!(check_collision(&world));
    }

    #[test]
    fn test_empty_obstacles_never_collide() {
        let world = classic_world();
        assert!(!check_collision(&world));
    }

    #[test]
    fn test_first_update_spawns_at_right_edge() {
        let mut world = classic_world();
        let outcome = update(&mut world, 0, &mut rng());
        assert!(outcome.spawned);
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles[0].position, 800.0);
    }

    #[test]
    fn test_offscreen_obstacle_is_removed_and_scored() {
        let mut world = classic_world();
        world.obstacles.push(obstacle(-101.0, 50.0, 200.0));
        let outcome = update(&mut world, 16, &mut rng());
        assert_eq!(outcome.removed, 1);
        assert_eq!(world.score, 1);
        // Replaced by a fresh spawn at the right edge.
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles[0].position, 800.0);
    }

    #[test]
    fn test_removal_keeps_order() {
        let mut world = classic_world();
        world.obstacles.push(obstacle(-150.0, 0.0, 100.0));
        world.obstacles.push(obstacle(300.0, 10.0, 100.0));
        world.obstacles.push(obstacle(600.0, 20.0, 100.0));
        step(&mut world, 0, &mut rng());
        assert_eq!(world.score, 1);
        let offsets: Vec<f64> = world.obstacles.iter().map(|o| o.offset).collect();
        assert_eq!(offsets, vec![10.0, 20.0]);
    }

    #[test]
    fn test_scroll_speeds_up_with_age() {
        let mut young = classic_world();
        young.obstacles.push(obstacle(500.0, 0.0, 100.0));
        step(&mut young, 10, &mut rng());

        let mut old = classic_world();
        old.age = 100_000;
        old.obstacles.push(obstacle(500.0, 0.0, 100.0));
        step(&mut old, 10, &mut rng());

        // 0.08 * 10 = 0.8 vs 0.8 + 100_000 * 0.0001 = 10.8
        assert!((young.obstacles[0].position - 499.2).abs() < 1e-9);
        assert!((old.obstacles[0].position - 489.2).abs() < 1e-9);
    }

    #[test]
    fn test_gravity_pulls_entity_down() {
        let mut world = classic_world();
        world.entity.position = 200.0;
        world.entity.velocity = 0.0;
        update(&mut world, 16, &mut rng());
        assert!((world.entity.velocity - 0.01).abs() < 1e-12);
        update(&mut world, 32, &mut rng());
        assert!(world.entity.position > 200.0);
    }

    #[test]
    fn test_ceiling_contact_zeroes_velocity_before_gravity() {
        let mut world = classic_world();
        world.entity.position = 5.0;
        world.entity.velocity = -1.0;
        update(&mut world, 16, &mut rng());
        assert_eq!(world.entity.position, 0.0);
        assert_eq!(world.entity.velocity, world.tuning.gravity);
    }

    #[test]
    fn test_floor_clamps_position() {
        let mut world = classic_world();
        world.entity.position = 560.0;
        world.entity.velocity = 5.0;
        update(&mut world, 16, &mut rng());
        assert_eq!(world.entity.position, world.max_position());
        // Gravity keeps accruing while resting on the floor.
        assert!(world.entity.velocity > 5.0);
    }

    #[test]
    fn test_zero_diff_leaves_entity_untouched() {
        let mut world = classic_world();
        world.time = 500;
        world.entity.position = 200.0;
        world.entity.velocity = 0.2;
        for _ in 0..100 {
            update(&mut world, 500, &mut rng());
        }
        assert_eq!(world.entity.position, 200.0);
        assert_eq!(world.entity.velocity, 0.2);
    }

    #[test]
    fn test_clock_going_backward_counts_as_zero() {
        let mut world = classic_world();
        world.time = 1_000;
        world.entity.position = 200.0;
        world.entity.velocity = 0.2;
        update(&mut world, 400, &mut rng());
        assert_eq!(world.entity.position, 200.0);
        assert_eq!(world.age, 0);
        assert_eq!(world.time, 400);
    }

    #[test]
    fn test_update_accumulates_age() {
        let mut world = classic_world();
        update(&mut world, 16, &mut rng());
        update(&mut world, 40, &mut rng());
        assert_eq!(world.age, 40);
        assert_eq!(world.time, 40);
    }

    #[test]
    fn test_collision_stops_running() {
        let mut world = classic_world();
        world.running = true;
        world.entity.position = 0.0;
        world.entity.velocity = 0.0;
        world.obstacles.push(obstacle(110.0, 300.0, 100.0));
        let outcome = step(&mut world, 1, &mut rng());
        assert!(outcome.collided);
        assert!(!world.running);
    }

    #[test]
    fn test_spawned_gap_within_bounds() {
        let mut world = classic_world();
        let mut rng = rng();
        for _ in 0..200 {
            world.obstacles.clear();
            spawn_obstacle(&mut world, &mut rng);
            let o = world.obstacles[0];
            assert!(o.offset >= 0.0 && o.offset <= 300.0);
            assert!(o.opening >= 100.0 && o.opening <= 300.0);
        }
    }

    #[test]
    fn test_spawned_gap_within_bounds_for_every_variant() {
        let mut rng = rng();
        for variant in Variant::ALL {
            let tuning = variant.tuning();
            let (w, h) = tuning.surface_size(800.0, 600.0);
            let mut world = World::new(tuning, w, h, 0);
            let max_opening = tuning.min_opening + tuning.opening_span(h);
            for _ in 0..200 {
                world.obstacles.clear();
                spawn_obstacle(&mut world, &mut rng);
                let o = world.obstacles[0];
                assert_eq!(o.position, w);
                assert!(o.offset >= 0.0 && o.offset <= h / 2.0, "{}", variant);
                assert!(o.opening >= tuning.min_opening, "{}", variant);
                assert!(o.opening <= max_opening, "{}: {}", variant, o.opening);
            }
        }
    }

    #[test]
    fn test_no_spawn_while_rightmost_is_close_to_edge() {
        let mut world = classic_world();
        // Right edge at 600 == width - spacing: not yet left of it.
        world.obstacles.push(obstacle(500.0, 0.0, 100.0));
        let outcome = step(&mut world, 0, &mut rng());
        assert!(!outcome.spawned);

        world.obstacles[0].position = 499.0;
        let outcome = step(&mut world, 0, &mut rng());
        assert!(outcome.spawned);
        assert_eq!(world.obstacles.len(), 2);
    }
}
