//! By-object hashing.
//!
//! An object gets a number from the session's counter the first time it is
//! used as a key. That lazy stamp is the only write ever made to an otherwise
//! immutable tree element.

use std::cell::Cell;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::OnceLock;

use crate::KeyHasher;

/// Slot for a lazily assigned identity number.
#[derive(Default)]
pub struct IdentityStamp(OnceLock<NonZeroU32>);

impl IdentityStamp {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// The stamp, if this object was ever used as an identity key.
    pub fn get(&self) -> Option<NonZeroU32> {
        self.0.get().copied()
    }
}

impl fmt::Debug for IdentityStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(stamp) => write!(f, "#{stamp}"),
            None => f.write_str("#?"),
        }
    }
}

/// Objects that can key an identity map.
pub trait Identified {
    fn identity_stamp(&self) -> &IdentityStamp;

    /// `true` when both handles point at the same object.
    fn same_object(&self, other: &Self) -> bool;
}

/// Monotonic source of identity stamps, one per session.
#[derive(Debug, Default)]
pub struct IdentityCounter {
    next: Cell<u32>,
}

impl IdentityCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the object's stamp, assigning the next number on first use.
    pub fn stamp(&self, stamp: &IdentityStamp) -> NonZeroU32 {
        *stamp.0.get_or_init(|| self.bump())
    }

    /// Number of stamps handed out so far.
    pub fn issued(&self) -> u32 {
        self.next.get()
    }

    fn bump(&self) -> NonZeroU32 {
        let n = self.next.get();
        self.next.set(n.wrapping_add(1));
        NonZeroU32::MIN.saturating_add(n)
    }
}

/// [`KeyHasher`] keyed on object identity rather than content.
#[derive(Clone, Copy)]
pub struct IdentityHasher<'c> {
    counter: &'c IdentityCounter,
}

impl<'c> IdentityHasher<'c> {
    pub fn new(counter: &'c IdentityCounter) -> Self {
        Self { counter }
    }
}

impl<T: Identified> KeyHasher<T> for IdentityHasher<'_> {
    #[inline]
    fn hash(&self, key: &T) -> u32 {
        self.counter.stamp(key.identity_stamp()).get()
    }

    #[inline]
    fn eq(&self, a: &T, b: &T) -> bool {
        a.same_object(b)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::HashTable;

    #[derive(Clone)]
    struct Obj(Rc<(u32, IdentityStamp)>);

    impl Obj {
        fn new(value: u32) -> Self {
            Self(Rc::new((value, IdentityStamp::new())))
        }
    }

    impl Identified for Obj {
        fn identity_stamp(&self) -> &IdentityStamp {
            &self.0.1
        }

        fn same_object(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    #[test]
    fn equal_content_distinct_identity() {
        let counter = IdentityCounter::new();
        let mut table = HashTable::with_hasher(8, IdentityHasher::new(&counter));

        let a = Obj::new(1);
        let b = Obj::new(1);
        table.add(a.clone(), "a");
        table.add(b.clone(), "b");

        assert_eq!(table.get(&a), Some(&"a"));
        assert_eq!(table.get(&b), Some(&"b"));
        assert_eq!(table.get(&Obj::new(1)), None);
    }

    #[test]
    fn stamps_are_assigned_once() {
        let counter = IdentityCounter::new();
        let obj = Obj::new(0);
        assert_eq!(obj.identity_stamp().get(), None);

        let first = counter.stamp(obj.identity_stamp());
        let second = counter.stamp(obj.identity_stamp());
        assert_eq!(first, second);
        assert_eq!(counter.issued(), 1);
    }
}
