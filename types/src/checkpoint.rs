//! Checkpoint identifiers and the binary numbering scheme.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a checkpoint round, starting at zero.
pub type RoundIndex = u64;

/// Identifies a candidate checkpoint.
///
/// Round `i` offers exactly two candidates: `2i + 1` (left) and `2i + 2`
/// (right). The numbering is a binary-tree layout, not a real block hash.
/// Ids saturate at `u64::MAX`, so the scheme is only distinct for rounds below
/// [`CheckpointId::MAX_DISTINCT_ROUND`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckpointId(u64);

impl CheckpointId {
    /// Last round whose two candidates are distinct and unsaturated.
    pub const MAX_DISTINCT_ROUND: RoundIndex = (u64::MAX - 2) / 2;

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Left candidate for `round`: `2 * round + 1`, saturating.
    pub const fn left_child(round: RoundIndex) -> Self {
        Self(round.saturating_mul(2).saturating_add(1))
    }

    /// Right candidate for `round`: `2 * round + 2`, saturating.
    pub const fn right_child(round: RoundIndex) -> Self {
        Self(round.saturating_mul(2).saturating_add(2))
    }

    /// Whether this id is one of the two candidates of `round`.
    pub fn is_candidate_of(&self, round: RoundIndex) -> bool {
        *self == Self::left_child(round) || *self == Self::right_child(round)
    }
}

impl fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The binary choice a validator makes in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    Left,
    Right,
}

impl Branch {
    /// The checkpoint this branch selects in `round`.
    pub const fn target(self, round: RoundIndex) -> CheckpointId {
        match self {
            Self::Left => CheckpointId::left_child(round),
            Self::Right => CheckpointId::right_child(round),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl From<bool> for Branch {
    /// `false` maps to [`Branch::Left`], `true` to [`Branch::Right`].
    fn from(right: bool) -> Self {
        if right {
            Self::Right
        } else {
            Self::Left
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_zero_children() {
        assert_eq!(CheckpointId::left_child(0), CheckpointId::new(1));
        assert_eq!(CheckpointId::right_child(0), CheckpointId::new(2));
    }

    #[test]
    fn children_saturate_instead_of_overflowing() {
        let last = CheckpointId::MAX_DISTINCT_ROUND;
        assert_eq!(CheckpointId::left_child(last), CheckpointId::new(u64::MAX - 2));
        assert_eq!(CheckpointId::right_child(last), CheckpointId::new(u64::MAX - 1));
        assert_eq!(CheckpointId::left_child(last + 1), CheckpointId::new(u64::MAX));
        assert_eq!(CheckpointId::left_child(u64::MAX), CheckpointId::new(u64::MAX));
        assert_eq!(CheckpointId::right_child(u64::MAX), CheckpointId::new(u64::MAX));
    }

    #[test]
    fn branch_targets_follow_numbering() {
        assert_eq!(Branch::Left.target(4), CheckpointId::new(9));
        assert_eq!(Branch::Right.target(4), CheckpointId::new(10));
    }

    #[test]
    fn candidates_do_not_overlap_between_rounds() {
        assert!(CheckpointId::new(3).is_candidate_of(1));
        assert!(!CheckpointId::new(3).is_candidate_of(0));
        assert!(!CheckpointId::new(3).is_candidate_of(2));
    }

    #[test]
    fn bool_maps_to_branch() {
        assert_eq!(Branch::from(false), Branch::Left);
        assert_eq!(Branch::from(true), Branch::Right);
    }

    #[test]
    fn checkpoint_serializes_as_plain_integer() {
        let json = serde_json::to_string(&CheckpointId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
