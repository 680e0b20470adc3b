//! Collision categories and per-body filters
//!
//! Every body belongs to exactly one category (one bit of a 32-bit mask).
//! The collision mask says which categories a dynamic body is pushed out of;
//! the contact mask says which categories produce contact events. The two are
//! independent: score triggers report the bird without ever stopping it.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Physical kind of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Category {
    Bird = 1 << 0,
    Ground = 1 << 1,
    Wall = 1 << 2,
    ScoreTrigger = 1 << 3,
    Item = 1 << 4,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Bird,
        Category::Ground,
        Category::Wall,
        Category::ScoreTrigger,
        Category::Item,
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Single-category mask
    #[inline]
    pub const fn mask(self) -> CategoryMask {
        CategoryMask(self as u32)
    }
}

/// A set of categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bits() != 0
    }
}

impl From<Category> for CategoryMask {
    fn from(category: Category) -> Self {
        category.mask()
    }
}

impl BitOr for Category {
    type Output = CategoryMask;

    fn bitor(self, rhs: Category) -> CategoryMask {
        CategoryMask(self.bits() | rhs.bits())
    }
}

impl BitOr<Category> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: Category) -> CategoryMask {
        CategoryMask(self.0 | rhs.bits())
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 | rhs.0)
    }
}

/// Category plus collision/contact masks for one body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyFilter {
    pub category: Category,
    /// Categories this body is physically stopped by
    pub collision: CategoryMask,
    /// Categories this body reports contacts with
    pub contact: CategoryMask,
    /// Moved by gravity and collision response
    pub dynamic: bool,
}

impl BodyFilter {
    pub const BIRD: BodyFilter = BodyFilter {
        category: Category::Bird,
        collision: CategoryMask(Category::Ground.bits() | Category::Wall.bits()),
        contact: CategoryMask(Category::Ground.bits() | Category::Wall.bits()),
        dynamic: true,
    };

    pub const GROUND: BodyFilter = BodyFilter {
        category: Category::Ground,
        collision: CategoryMask::NONE,
        contact: CategoryMask::NONE,
        dynamic: false,
    };

    pub const WALL: BodyFilter = BodyFilter {
        category: Category::Wall,
        collision: CategoryMask::NONE,
        contact: CategoryMask::NONE,
        dynamic: false,
    };

    pub const SCORE_TRIGGER: BodyFilter = BodyFilter {
        category: Category::ScoreTrigger,
        collision: CategoryMask::NONE,
        contact: CategoryMask(Category::Bird.bits()),
        dynamic: false,
    };

    pub const ITEM: BodyFilter = BodyFilter {
        category: Category::Item,
        collision: CategoryMask(Category::Bird.bits() | Category::Wall.bits()),
        contact: CategoryMask(Category::Bird.bits()),
        dynamic: true,
    };

    /// Whether `self` is pushed out of `other`. Static bodies never move.
    #[inline]
    pub fn collides_with(&self, other: &BodyFilter) -> bool {
        self.dynamic && self.collision.contains(other.category)
    }

    /// Whether an overlap between `a` and `b` produces a contact event
    #[inline]
    pub fn reports_contact(a: &BodyFilter, b: &BodyFilter) -> bool {
        a.contact.contains(b.category) || b.contact.contains(a.category)
    }
}
