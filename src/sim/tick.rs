//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically and applies the
//! game state machine: flap / restart on input, score and crash on contact.

use glam::Vec2;

use super::category::{BodyFilter, Category};
use super::collision::{BodyId, Contact, collision_step};
use super::level::{advance_spawner, spawn_item};
use super::scroll::{advance_scroll, integrate};
use super::state::{DeathRoll, GameEvent, GamePhase, GameWorld};
use crate::highscores::ScoreCounter;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap / click / key
    pub activate: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut GameWorld, input: &TickInput, dt: f32) {
    world.time_ticks += 1;

    if input.activate {
        activate(world);
    }

    let scroll_dt = dt * world.world_speed;
    advance_spawner(world, scroll_dt);
    advance_scroll(world, scroll_dt);
    integrate(world, dt);
    advance_death_roll(world, dt);

    for contact in collision_step(world) {
        handle_contact(world, contact);
    }
}

/// Player input: flap while running, restart once settled
pub fn activate(world: &mut GameWorld) {
    match world.phase() {
        GamePhase::Running => {
            let bird = &mut world.bird;
            bird.vel = Vec2::ZERO;
            bird.vel.y += world.tuning.flap_velocity();
            spawn_item(world);
        }
        GamePhase::Settled => restart(world),
        // Wait for the death roll to finish
        GamePhase::Falling => {}
    }
}

/// React to a begun contact. Ignored unless the world is running.
pub fn handle_contact(world: &mut GameWorld, contact: Contact) {
    if world.world_speed <= 0.0 {
        return;
    }

    if contact.involves(Category::ScoreTrigger) {
        add_point(world, ScoreCounter::Obstacle);
    } else if let Some(item) = contact.body_of(Category::Item) {
        add_point(world, ScoreCounter::Item);
        if let BodyId::Item(item_id) = item {
            world.items.retain(|i| i.id != item_id);
            world.events.push(GameEvent::ItemCollected { item_id });
        }
    } else {
        crash(world);
    }
}

fn add_point(world: &mut GameWorld, counter: ScoreCounter) {
    let new_best = world.scores.increment(counter);
    world.events.push(GameEvent::ScoreChanged {
        counter,
        value: world.scores.current(counter),
    });
    if let Some(value) = new_best {
        world.events.push(GameEvent::NewBest { counter, value });
    }
}

/// Wall or ground hit: freeze the level, let the bird roll and fall
fn crash(world: &mut GameWorld) {
    log::info!(
        "crashed: score {} item score {}",
        world.scores.score,
        world.scores.item_score
    );
    world.world_speed = 0.0;
    let bird = &mut world.bird;
    bird.filter.collision = Category::Ground.mask();
    bird.death_roll = Some(DeathRoll {
        elapsed: 0.0,
        duration: world.tuning.death_roll_duration,
        start_rotation: bird.rotation,
        angle: std::f32::consts::PI * bird.pos.y * world.tuning.death_roll_factor,
    });
    world.events.push(GameEvent::Crashed);
}

fn advance_death_roll(world: &mut GameWorld, dt: f32) {
    let bird = &mut world.bird;
    let Some(roll) = bird.death_roll.as_mut() else {
        return;
    };
    roll.elapsed += dt * bird.anim_speed;
    bird.rotation = roll.start_rotation + roll.angle * roll.progress();
    if roll.is_finished() {
        bird.death_roll = None;
        bird.anim_speed = 0.0;
        world.events.push(GameEvent::Settled);
    }
}

/// Start a new run: zero current scores, reset the bird, clear walls
pub fn restart(world: &mut GameWorld) {
    world.scores.reset_current();
    for counter in [ScoreCounter::Obstacle, ScoreCounter::Item] {
        world.events.push(GameEvent::ScoreChanged { counter, value: 0 });
    }

    let start = world.tuning.bird_start();
    let bird = &mut world.bird;
    bird.pos = start;
    bird.vel = Vec2::ZERO;
    bird.filter = BodyFilter::BIRD;
    bird.rotation = 0.0;
    bird.death_roll = None;

    world.walls.clear();
    world.contacts.clear();

    bird.anim_speed = 1.0;
    world.world_speed = 1.0;
    world.events.push(GameEvent::Restarted);
    log::info!("restarted");
}
