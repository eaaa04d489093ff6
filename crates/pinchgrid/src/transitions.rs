use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Which transforms a bound item follows while morphing into the next grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemTransitions(u8);

impl ItemTransitions {
    pub const NONE: ItemTransitions = ItemTransitions(0);
    pub const SCALE: ItemTransitions = ItemTransitions(1 << 0);
    pub const TRANSLATE: ItemTransitions = ItemTransitions(1 << 1);
    pub const ALL: ItemTransitions = ItemTransitions(Self::SCALE.0 | Self::TRANSLATE.0);

    /// True when any flag of `other` is set in `self`.
    pub const fn has(self, other: ItemTransitions) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: ItemTransitions) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn plus(self, other: ItemTransitions) -> ItemTransitions {
        ItemTransitions(self.0 | other.0)
    }

    pub const fn minus(self, other: ItemTransitions) -> ItemTransitions {
        ItemTransitions(self.0 & !other.0)
    }
}

impl Default for ItemTransitions {
    fn default() -> Self {
        Self::ALL
    }
}

impl Add for ItemTransitions {
    type Output = ItemTransitions;

    fn add(self, rhs: Self) -> Self::Output {
        self.plus(rhs)
    }
}

impl AddAssign for ItemTransitions {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.plus(rhs);
    }
}

impl Sub for ItemTransitions {
    type Output = ItemTransitions;

    fn sub(self, rhs: Self) -> Self::Output {
        self.minus(rhs)
    }
}

impl SubAssign for ItemTransitions {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.minus(rhs);
    }
}

#[cfg(test)]
#[path = "tests/transitions_tests.rs"]
mod tests;
