//! The result of an overlap or containment query.

use crate::vector::Vector;

/// A push-out direction and how far to push.
///
/// Every query that can report a collision returns one of these. No
/// collision (or nothing to resolve) is [`Contact::NONE`]: a zero normal
/// with zero depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vector,
    pub depth: f64,
}

impl Contact {
    pub const NONE: Contact = Contact {
        normal: Vector::ZERO,
        depth: 0.0,
    };

    #[inline]
    pub fn new(normal: Vector, depth: f64) -> Self {
        Self { normal, depth }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.depth == 0.0
    }

    /// The displacement `normal * depth`.
    #[inline]
    pub fn translation(&self) -> Vector {
        self.normal.scale(self.depth)
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Contact> for (Vector, f64) {
    fn from(contact: Contact) -> Self {
        (contact.normal, contact.depth)
    }
}
