//! Collision detection, response and contact events
//!
//! Dynamic bodies (bird, items) are tested against static bodies (ground
//! tiles, wall segments, score triggers) and against each other. Filters
//! decide whether an overlap pushes the dynamic body out, reports a contact,
//! or both. Contacts are "begin" events: a pair reports once when it starts
//! overlapping and again only after it has separated.

use std::collections::BTreeSet;

use glam::Vec2;

use super::category::{BodyFilter, Category};
use super::shape::{Penetration, Rect, circle_circle, circle_rect};
use super::state::GameWorld;

/// Identity of a body taking part in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BodyId {
    Bird,
    Ground(usize),
    Wall { pair: u32, upper: bool },
    ScoreTrigger(u32),
    Item(u32),
}

impl BodyId {
    pub fn category(&self) -> Category {
        match self {
            BodyId::Bird => Category::Bird,
            BodyId::Ground(_) => Category::Ground,
            BodyId::Wall { .. } => Category::Wall,
            BodyId::ScoreTrigger(_) => Category::ScoreTrigger,
            BodyId::Item(_) => Category::Item,
        }
    }
}

/// A reported contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
}

impl Contact {
    pub fn new(a: BodyId, b: BodyId) -> Self {
        Self { a, b }
    }

    /// Whether either side belongs to `category`
    pub fn involves(&self, category: Category) -> bool {
        self.a.category() == category || self.b.category() == category
    }

    /// The side belonging to `category`, if any
    pub fn body_of(&self, category: Category) -> Option<BodyId> {
        if self.a.category() == category {
            Some(self.a)
        } else if self.b.category() == category {
            Some(self.b)
        } else {
            None
        }
    }
}

/// Pairs that overlapped (and reported) on the previous step
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active: BTreeSet<(BodyId, BodyId)>,
}

impl ContactTracker {
    /// Replace the active set, returning pairs that were not active before
    fn update(&mut self, touching: BTreeSet<(BodyId, BodyId)>) -> Vec<Contact> {
        let begun = touching
            .difference(&self.active)
            .map(|&(a, b)| Contact::new(a, b))
            .collect();
        self.active = touching;
        begun
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

fn ordered(a: BodyId, b: BodyId) -> (BodyId, BodyId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Static body gathered for one step
struct StaticBody {
    id: BodyId,
    filter: BodyFilter,
    rect: Rect,
}

fn static_bodies(world: &GameWorld) -> Vec<StaticBody> {
    let mut bodies = Vec::with_capacity(world.ground.tiles.len() + world.walls.len() * 3);

    for (i, rect) in world.ground.rects().enumerate() {
        bodies.push(StaticBody {
            id: BodyId::Ground(i),
            filter: BodyFilter::GROUND,
            rect,
        });
    }

    for wall in &world.walls {
        bodies.push(StaticBody {
            id: BodyId::Wall {
                pair: wall.id,
                upper: false,
            },
            filter: BodyFilter::WALL,
            rect: wall.lower(),
        });
        bodies.push(StaticBody {
            id: BodyId::Wall {
                pair: wall.id,
                upper: true,
            },
            filter: BodyFilter::WALL,
            rect: wall.upper(),
        });
        bodies.push(StaticBody {
            id: BodyId::ScoreTrigger(wall.id),
            filter: BodyFilter::SCORE_TRIGGER,
            rect: wall.trigger_rect(),
        });
    }

    bodies
}

/// Push a dynamic body out along the penetration and cancel inbound velocity
fn resolve(pos: &mut Vec2, vel: &mut Vec2, hit: &Penetration) {
    *pos += hit.normal * hit.depth;
    let inbound = vel.dot(hit.normal);
    if inbound < 0.0 {
        *vel -= hit.normal * inbound;
    }
}

/// Run one collision step: resolve overlaps, return newly begun contacts in
/// deterministic order. Items are pushed out of the bird, never the bird
/// out of an item.
pub fn collision_step(world: &mut GameWorld) -> Vec<Contact> {
    let statics = static_bodies(world);
    let mut touching = BTreeSet::new();

    // Bird vs static
    let bird_filter = world.bird.filter;
    for body in &statics {
        let Some(hit) = circle_rect(&world.bird.circle(), &body.rect) else {
            continue;
        };
        if bird_filter.collides_with(&body.filter) {
            let bird = &mut world.bird;
            resolve(&mut bird.pos, &mut bird.vel, &hit);
        }
        if BodyFilter::reports_contact(&bird_filter, &body.filter) {
            touching.insert(ordered(BodyId::Bird, body.id));
        }
    }

    // Items vs static, then items vs bird
    let bird_circle = world.bird.circle();
    for item in &mut world.items {
        let item_id = BodyId::Item(item.id);
        for body in &statics {
            let Some(hit) = circle_rect(&item.circle(), &body.rect) else {
                continue;
            };
            if BodyFilter::ITEM.collides_with(&body.filter) {
                resolve(&mut item.pos, &mut item.vel, &hit);
            }
            if BodyFilter::reports_contact(&BodyFilter::ITEM, &body.filter) {
                touching.insert(ordered(item_id, body.id));
            }
        }

        let Some(hit) = circle_circle(&item.circle(), &bird_circle) else {
            continue;
        };
        // Only the item moves; the bird's mask never includes items
        if BodyFilter::ITEM.collides_with(&bird_filter) {
            resolve(&mut item.pos, &mut item.vel, &hit);
        }
        if BodyFilter::reports_contact(&BodyFilter::ITEM, &bird_filter) {
            touching.insert(ordered(BodyId::Bird, item_id));
        }
    }

    world.contacts.update(touching)
}
