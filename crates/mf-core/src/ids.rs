use core::fmt;
use core::num::NonZeroU32;

/// Dense handle into an arena: schematic entity and channel tables, and
/// the variable registry, all hand these out in insertion order.
///
/// The `NonZeroU32` niche keeps `Option<Id>` at four bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Wrap a 0-based arena index.
    ///
    /// Panics if the 32-bit id space is exhausted; no realistic
    /// schematic approaches that.
    pub fn from_index(index: u32) -> Self {
        let raw = index.checked_add(1).expect("id space exhausted");
        // raw >= 1 by construction
        Self(NonZeroU32::new(raw).expect("raw is nonzero"))
    }

    /// The 0-based arena index this handle wraps.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

/// Aliases naming the arena an `Id` points into.
pub type EntityId = Id;
pub type ChannelId = Id;
pub type VarId = Id;
