//! The closed numeric operation set.
//!
//! Modifier operators and bound clamping must work generically over the
//! numeric representations the engine supports without per-type duplication.
//! [`Num`] supplies the required operation set as compile-time trait bounds;
//! [`NumKind`] is the runtime face of the same closed list, for collaborators
//! (persistence, editors) that carry a kind as data and must validate it
//! before reconstructing values.

use std::fmt;
use std::str::FromStr;

use crate::error::AttributeError;

/// A numeric representation the engine can fold over.
///
/// The operation set is exactly what the modifier operators and
/// [`BoundedValue`](crate::BoundedValue) clamping need: `sum`, `times`,
/// `divide`, `negate`, `min`, `max`, and the two identities. Implemented for
/// `i32`, `f32` and `f64`. The list is closed: supporting a new
/// representation means adding an impl here and a [`NumKind`] variant.
pub trait Num: Copy + PartialEq + PartialOrd + fmt::Display + 'static {
    /// The runtime tag for this representation.
    const KIND: NumKind;

    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;

    fn sum(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    fn divide(self, rhs: Self) -> Self;
    fn negate(self) -> Self;
    fn min(self, rhs: Self) -> Self;
    fn max(self, rhs: Self) -> Self;
}

impl Num for i32 {
    const KIND: NumKind = NumKind::I32;
    const ZERO: Self = 0;
    const ONE: Self = 1;

    fn sum(self, rhs: Self) -> Self {
        self + rhs
    }

    fn times(self, rhs: Self) -> Self {
        self * rhs
    }

    fn divide(self, rhs: Self) -> Self {
        self / rhs
    }

    fn negate(self) -> Self {
        -self
    }

    fn min(self, rhs: Self) -> Self {
        Ord::min(self, rhs)
    }

    fn max(self, rhs: Self) -> Self {
        Ord::max(self, rhs)
    }
}

impl Num for f32 {
    const KIND: NumKind = NumKind::F32;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn sum(self, rhs: Self) -> Self {
        self + rhs
    }

    fn times(self, rhs: Self) -> Self {
        self * rhs
    }

    fn divide(self, rhs: Self) -> Self {
        self / rhs
    }

    fn negate(self) -> Self {
        -self
    }

    fn min(self, rhs: Self) -> Self {
        f32::min(self, rhs)
    }

    fn max(self, rhs: Self) -> Self {
        f32::max(self, rhs)
    }
}

impl Num for f64 {
    const KIND: NumKind = NumKind::F64;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn sum(self, rhs: Self) -> Self {
        self + rhs
    }

    fn times(self, rhs: Self) -> Self {
        self * rhs
    }

    fn divide(self, rhs: Self) -> Self {
        self / rhs
    }

    fn negate(self) -> Self {
        -self
    }

    fn min(self, rhs: Self) -> Self {
        f64::min(self, rhs)
    }

    fn max(self, rhs: Self) -> Self {
        f64::max(self, rhs)
    }
}

/// Runtime tag for a supported numeric representation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumKind {
    I32,
    F32,
    F64,
}

impl NumKind {
    /// The tag for a given `Num` type.
    pub fn of<T: Num>() -> Self {
        T::KIND
    }

    /// Parses a stored kind tag, rejecting anything outside the supported
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::UnsupportedNumericKind`] for an unknown tag.
    pub fn parse(kind: &str) -> Result<Self, AttributeError> {
        Self::from_str(kind).map_err(|_| AttributeError::UnsupportedNumericKind {
            kind: kind.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_set_for_i32() {
        assert_eq!(7.sum(3), 10);
        assert_eq!(7.times(3), 21);
        assert_eq!(7.divide(2), 3);
        assert_eq!(Num::negate(7), -7);
        assert_eq!(Num::min(7, 3), 3);
        assert_eq!(Num::max(7, 3), 7);
        assert_eq!(i32::ZERO, 0);
        assert_eq!(i32::ONE, 1);
    }

    #[test]
    fn operation_set_for_floats() {
        assert_eq!(1.5f32.times(2.0), 3.0);
        assert_eq!(9.0f64.divide(2.0), 4.5);
        assert_eq!(Num::negate(2.5f64), -2.5);
    }

    #[test]
    fn kind_round_trip() {
        assert_eq!(NumKind::of::<i32>(), NumKind::I32);
        assert_eq!(NumKind::F64.to_string(), "f64");
        assert_eq!(NumKind::parse("f32").unwrap(), NumKind::F32);
        assert_eq!(NumKind::parse("F32").unwrap(), NumKind::F32);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = NumKind::parse("u8").unwrap_err();
        assert_eq!(
            err,
            AttributeError::UnsupportedNumericKind { kind: "u8".into() }
        );
    }
}
