use std::fmt;

/// Largest trick universe the planner will build tables for.
///
/// Every stage owns `2^MAX_TRICKS` table slots at this size, so the bound is
/// set by memory long before it is set by the width of the mask.
pub const MAX_TRICKS: usize = 20;

/// Bitmask over trick indices; bit `j` set means trick `j` is included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrickSet(u32);

impl TrickSet {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The set containing every one of the first `count` tricks.
    pub fn full(count: usize) -> Self {
        debug_assert!(count <= MAX_TRICKS);
        Self((1u32 << count) - 1)
    }

    /// Number of distinct sets over `count` tricks.
    pub fn subset_count(count: usize) -> usize {
        debug_assert!(count <= MAX_TRICKS);
        1usize << count
    }

    pub fn contains(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    pub fn with(mut self, index: usize) -> Self {
        self.0 |= 1 << index;
        self
    }

    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Trick indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut remaining = self.0;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let index = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            Some(index)
        })
    }

    /// Trick numbers as printed to users (1-based, ascending).
    pub fn one_based(self) -> Vec<usize> {
        self.iter().map(|index| index + 1).collect()
    }
}

impl FromIterator<usize> for TrickSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for TrickSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (position, number) in self.one_based().into_iter().enumerate() {
            if position > 0 {
                write!(f, ",")?;
            }
            write!(f, "{number}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::TrickSet;

    #[test]
    fn iterates_indices_in_ascending_order() {
        let set = TrickSet::from_bits(0b1010_0101);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2, 5, 7]);
        assert_eq!(set.one_based(), vec![1, 3, 6, 8]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn collects_from_indices() {
        let set: TrickSet = [3usize, 0, 3].into_iter().collect();
        assert_eq!(set, TrickSet::from_bits(0b1001));
        assert!(set.contains(0));
        assert!(!set.contains(1));
    }

    #[test]
    fn full_and_subset_count_agree() {
        assert_eq!(TrickSet::full(0), TrickSet::EMPTY);
        assert_eq!(TrickSet::full(3).bits(), 0b111);
        assert_eq!(TrickSet::subset_count(3), 8);
        assert_eq!(TrickSet::subset_count(0), 1);
    }

    #[test]
    fn displays_one_based_members() {
        assert_eq!(TrickSet::EMPTY.to_string(), "{}");
        assert_eq!(TrickSet::from_bits(0b110).to_string(), "{2,3}");
    }

    #[test]
    fn intersection_keeps_shared_bits() {
        let a = TrickSet::from_bits(0b1100);
        let b = TrickSet::from_bits(0b0110);
        assert_eq!(a.intersection(b), TrickSet::from_bits(0b0100));
        assert!(TrickSet::EMPTY.is_empty());
    }
}
