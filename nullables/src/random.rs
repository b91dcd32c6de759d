//! Nullable random — scripted branch choices.

use ffg_consensus::BranchSource;
use ffg_types::Branch;

/// A deterministic branch source for testing.
///
/// Returns pre-configured branches in order, wrapping around when the
/// script is exhausted.
pub struct NullBranchSource {
    branches: Vec<Branch>,
    index: usize,
}

impl NullBranchSource {
    /// Create with a sequence of scripted branches.
    ///
    /// An empty script behaves like [`NullBranchSource::constant`] with
    /// [`Branch::Left`].
    pub fn new(branches: Vec<Branch>) -> Self {
        let branches = if branches.is_empty() {
            vec![Branch::Left]
        } else {
            branches
        };
        Self { branches, index: 0 }
    }

    /// Create with a single branch that will be returned for every call.
    pub fn constant(branch: Branch) -> Self {
        Self::new(vec![branch])
    }

    /// Create from bits: `false` is left, `true` is right.
    pub fn from_bits(bits: &[bool]) -> Self {
        Self::new(bits.iter().map(|&b| Branch::from(b)).collect())
    }

    /// Number of branches handed out so far.
    pub fn calls(&self) -> usize {
        self.index
    }
}

impl BranchSource for NullBranchSource {
    fn next_branch(&mut self) -> Branch {
        let current = self.index % self.branches.len();
        self.index += 1;
        self.branches[current]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_wraps_around() {
        let mut source = NullBranchSource::new(vec![Branch::Left, Branch::Right]);
        let drawn: Vec<Branch> = (0..5).map(|_| source.next_branch()).collect();
        assert_eq!(
            drawn,
            vec![
                Branch::Left,
                Branch::Right,
                Branch::Left,
                Branch::Right,
                Branch::Left
            ]
        );
        assert_eq!(source.calls(), 5);
    }

    #[test]
    fn empty_script_defaults_to_left() {
        let mut source = NullBranchSource::new(Vec::new());
        assert_eq!(source.next_branch(), Branch::Left);
    }

    #[test]
    fn bits_map_to_branches() {
        let mut source = NullBranchSource::from_bits(&[true, false]);
        assert_eq!(source.next_branch(), Branch::Right);
        assert_eq!(source.next_branch(), Branch::Left);
    }
}
