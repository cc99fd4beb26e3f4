use std::fmt;
use std::num::NonZero;

/// Identifies a template ("prefab") that instances are created from.
///
/// The pool never looks inside a template. It only uses the identifier as a map key and hands it
/// back to the [`Host`][crate::Host] when a new instance needs to be created.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TemplateId(u32);

impl TemplateId {
    /// Creates a template identifier from the raw value assigned by the host.
    #[must_use]
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value assigned by the host.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A generation-checked handle to a concrete instance created from a template.
///
/// The host decides what the slot index and generation mean. The usual arrangement is an arena
/// where a slot is reused after its occupant is destroyed and the generation is bumped on every
/// reuse, so a handle to a destroyed instance can never be confused with its successor.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InstanceId {
    index: u32,
    generation: NonZero<u32>,
}

impl InstanceId {
    /// Creates an instance handle from a slot index and the generation of that slot.
    #[must_use]
    #[inline]
    pub const fn new(index: u32, generation: NonZero<u32>) -> Self {
        Self { index, generation }
    }

    /// The slot index of the instance in the host's storage.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// The generation of the slot at the time this handle was issued.
    #[must_use]
    #[inline]
    pub const fn generation(self) -> NonZero<u32> {
        self.generation
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}v{}", self.index, self.generation)
    }
}

/// Identifies the container that holds inactive pooled instances.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ContainerId(u32);

impl ContainerId {
    /// Creates a container identifier from the raw value assigned by the host.
    #[must_use]
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value assigned by the host.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}
