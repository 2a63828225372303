use crate::SyntaxKind;

const SIZE: usize = SyntaxKind::COUNT.div_ceil(u64::BITS as usize);

/// Bit set of kinds, usable in `const` recovery and first sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn slot_and_mask(kind: SyntaxKind) -> (usize, u64) {
        let kind = kind as u16;
        ((kind / Self::BITS_PER_SLOT) as usize, 1 << (kind % Self::BITS_PER_SLOT))
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }

        set
    }

    pub const fn with(mut self, kind: SyntaxKind) -> Self {
        let (slot, mask) = Self::slot_and_mask(kind);
        self.bits[slot] |= mask;
        self
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot, mask) = Self::slot_and_mask(kind);
        self.bits[slot] & mask != 0
    }

    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < self.bits.len() {
            if self.bits[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    const FIRST: SyntaxSet = SyntaxSet::new([LEFT_BRACE, NAME]);

    #[test]
    fn membership_across_slots() {
        let set = FIRST.union(&SyntaxSet::new([TOMBSTONE]));
        assert!(set.contains(LEFT_BRACE));
        assert!(set.contains(NAME));
        assert!(set.contains(TOMBSTONE));
        assert!(!set.contains(RIGHT_BRACE));
        assert!(SyntaxSet::EMPTY.is_empty());
        assert!(!SyntaxSet::EMPTY.with(EOF).is_empty());
    }
}
