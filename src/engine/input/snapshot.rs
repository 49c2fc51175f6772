// Frozen per-tick view of a player's input

use super::action::Action;

/// Compact set of actions, one bit per `Action`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u32);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Actions present in `self` but not in `other`
    pub fn difference(&self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 & !other.0)
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::EMPTY;
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Input for one simulation tick: what is held and what was pressed this tick.
///
/// Built once per tick and only read by the character core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: ActionSet,
    pressed: ActionSet,
}

impl InputSnapshot {
    pub fn new(held: ActionSet, pressed: ActionSet) -> Self {
        Self { held, pressed }
    }

    /// Derive edges by diffing the held set against the previous tick's
    pub fn from_transition(previous: ActionSet, current: ActionSet) -> Self {
        Self {
            held: current,
            pressed: current.difference(previous),
        }
    }

    /// Snapshot with the given actions held and just pressed
    pub fn pressing(actions: &[Action]) -> Self {
        let set: ActionSet = actions.iter().copied().collect();
        Self::new(set, set)
    }

    /// Snapshot with the given actions held but not newly pressed
    pub fn holding(actions: &[Action]) -> Self {
        Self::new(actions.iter().copied().collect(), ActionSet::EMPTY)
    }

    pub fn held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    pub fn held_set(&self) -> ActionSet {
        self.held
    }

    /// Horizontal intent: -1 left, 1 right, 0 for none or both
    pub fn horizontal(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.held(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.held(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }
}
