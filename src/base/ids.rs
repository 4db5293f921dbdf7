//! Identifiers for compilation units and declared types.

use std::fmt;

/// An identifier for a compilation unit within a [`Project`](crate::hir::Project).
///
/// `UnitId` is a lightweight handle (just a u32): the position of the unit
/// in the project's unit list. Declared types refer back to their unit
/// through it instead of holding a pointer to the unit.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new UnitId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

impl From<u32> for UnitId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A unit-local declared type identifier.
///
/// Assigned sequentially by the builder as type declarations are entered,
/// so the ids follow source order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LocalDefId(pub u32);

impl LocalDefId {
    /// Create a new LocalDefId.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LocalDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDefId({})", self.0)
    }
}

impl From<u32> for LocalDefId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A project-wide identifier for a declared type.
///
/// Combines the unit the declaration lives in with its unit-local id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DeclId {
    /// The unit containing this declaration
    pub unit: UnitId,
    /// The local ID within the unit
    pub local: LocalDefId,
}

impl DeclId {
    /// Create a new DeclId.
    #[inline]
    pub const fn new(unit: UnitId, local: LocalDefId) -> Self {
        Self { unit, local }
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({:?}:{})", self.unit, self.local.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decl_id_equality() {
        let unit1 = UnitId::new(1);
        let unit2 = UnitId::new(2);

        let a = DeclId::new(unit1, LocalDefId::new(0));
        let b = DeclId::new(unit1, LocalDefId::new(0));
        let c = DeclId::new(unit1, LocalDefId::new(1));
        let d = DeclId::new(unit2, LocalDefId::new(0));

        assert_eq!(a, b);
        assert_ne!(a, c); // different local
        assert_ne!(a, d); // different unit
    }

    #[test]
    fn test_id_sizes() {
        assert_eq!(std::mem::size_of::<UnitId>(), 4);
        assert_eq!(std::mem::size_of::<DeclId>(), 8);
    }

    #[test]
    fn test_unit_id_display() {
        assert_eq!(UnitId::new(3).to_string(), "unit#3");
        assert_eq!(format!("{:?}", UnitId::new(3)), "UnitId(3)");
    }
}
