//! Ordering and equality capabilities shared by the other modules.
//!
//! Two traits live here:
//!
//! - [`Comparator`]: orders two values, or reports that they are
//!   incomparable by returning `None`. The search trees use it.
//! - [`Equivalence`]: decides whether two values are equal. `Collection`
//!   uses it for value-based lookups and removal.
//!
//! Values that expose explicit `equals` / `less_than` / `greater_than`
//! methods instead of `Ord` implement [`Comparable`] and are ordered with
//! [`CapabilityOrder`].
//!
//! # Examples
//!
//! ```rust
//! use indexkit::compare::{Comparator, NaturalOrder, PartialOrder, ReverseOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Some(Ordering::Less));
//! assert_eq!(ReverseOrder(NaturalOrder).compare(&1, &2), Some(Ordering::Greater));
//!
//! // NaN has no ordering
//! assert_eq!(PartialOrder.compare(&f64::NAN, &1.0), None);
//! ```

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Error returned when a comparator cannot order two values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompareError {
    /// Neither equal, less than, nor greater than.
    #[error("values are incomparable under the configured comparator")]
    Incomparable,
}

// =============================================================================
// Comparator
// =============================================================================

/// Orders two values of type `T`.
///
/// Returning `None` means the pair has no defined ordering. Callers that
/// maintain an ordering invariant treat this as a programmer error.
pub trait Comparator<T: ?Sized> {
    /// Compares `left` against `right`.
    fn compare(&self, left: &T, right: &T) -> Option<Ordering>;
}

impl<T: ?Sized, C: Comparator<T> + ?Sized> Comparator<T> for &C {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Option<Ordering> {
        (**self).compare(left, right)
    }
}

/// Compares two values and converts a missing ordering into an error.
///
/// # Errors
///
/// Returns [`CompareError::Incomparable`] when `comparator` yields `None`.
///
/// # Examples
///
/// ```rust
/// use indexkit::compare::{try_compare, CompareError, PartialOrder};
/// use std::cmp::Ordering;
///
/// assert_eq!(try_compare(&PartialOrder, &1.0, &2.0), Ok(Ordering::Less));
/// assert_eq!(try_compare(&PartialOrder, &f64::NAN, &2.0), Err(CompareError::Incomparable));
/// ```
pub fn try_compare<T, C>(comparator: &C, left: &T, right: &T) -> Result<Ordering, CompareError>
where
    T: ?Sized,
    C: Comparator<T> + ?Sized,
{
    comparator
        .compare(left, right)
        .ok_or(CompareError::Incomparable)
}

/// Total order from [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Option<Ordering> {
        Some(left.cmp(right))
    }
}

/// Partial order from [`PartialOrd`].
///
/// Useful for floating point values; a NaN operand is incomparable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PartialOrder;

impl<T: PartialOrd + ?Sized> Comparator<T> for PartialOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Option<Ordering> {
        left.partial_cmp(right)
    }
}

/// Inverts the ordering of the wrapped comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for ReverseOrder<C> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Option<Ordering> {
        self.0.compare(left, right).map(Ordering::reverse)
    }
}

/// Total order given by a closure.
///
/// # Examples
///
/// ```rust
/// use indexkit::compare::{Comparator, FnComparator};
/// use std::cmp::Ordering;
///
/// let by_length = FnComparator::new(|left: &&str, right: &&str| left.len().cmp(&right.len()));
/// assert_eq!(by_length.compare(&"abc", &"z"), Some(Ordering::Greater));
/// ```
#[derive(Clone, Copy)]
pub struct FnComparator<F> {
    function: F,
}

impl<F> FnComparator<F> {
    /// Wraps `function` as a comparator.
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<T: ?Sized, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Option<Ordering> {
        Some((self.function)(left, right))
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("FnComparator(<function>)")
    }
}

// =============================================================================
// Capability Dispatch
// =============================================================================

/// Values that expose explicit comparison predicates.
///
/// This is for types whose ordering is only partially defined through
/// business rules. A pair for which all three predicates are `false` is
/// incomparable.
pub trait Comparable {
    /// Returns `true` if `self` and `other` are equal.
    fn equals(&self, other: &Self) -> bool;

    /// Returns `true` if `self` orders strictly before `other`.
    fn less_than(&self, other: &Self) -> bool;

    /// Returns `true` if `self` orders strictly after `other`.
    fn greater_than(&self, other: &Self) -> bool;
}

/// Orders [`Comparable`] values by probing `equals`, `less_than` and
/// `greater_than`, in that order.
///
/// # Examples
///
/// ```rust
/// use indexkit::compare::{CapabilityOrder, Comparable, Comparator};
/// use std::cmp::Ordering;
///
/// struct Version(u32);
///
/// impl Comparable for Version {
///     fn equals(&self, other: &Self) -> bool { self.0 == other.0 }
///     fn less_than(&self, other: &Self) -> bool { self.0 < other.0 }
///     fn greater_than(&self, other: &Self) -> bool { self.0 > other.0 }
/// }
///
/// assert_eq!(CapabilityOrder.compare(&Version(1), &Version(3)), Some(Ordering::Less));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilityOrder;

impl<T: Comparable + ?Sized> Comparator<T> for CapabilityOrder {
    fn compare(&self, left: &T, right: &T) -> Option<Ordering> {
        if left.equals(right) {
            Some(Ordering::Equal)
        } else if left.less_than(right) {
            Some(Ordering::Less)
        } else if left.greater_than(right) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

// =============================================================================
// Equivalence
// =============================================================================

/// Decides whether two values are the same for lookup purposes.
pub trait Equivalence<V: ?Sized> {
    /// Returns `true` if `left` and `right` are equivalent.
    fn equivalent(&self, left: &V, right: &V) -> bool;
}

/// Equality from [`PartialEq`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DefaultEquality;

impl<V: PartialEq + ?Sized> Equivalence<V> for DefaultEquality {
    #[inline]
    fn equivalent(&self, left: &V, right: &V) -> bool {
        left == right
    }
}

/// Equality given by a closure.
#[derive(Clone, Copy)]
pub struct FnEquality<F> {
    function: F,
}

impl<F> FnEquality<F> {
    /// Wraps `function` as an equivalence test.
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<V: ?Sized, F> Equivalence<V> for FnEquality<F>
where
    F: Fn(&V, &V) -> bool,
{
    #[inline]
    fn equivalent(&self, left: &V, right: &V) -> bool {
        (self.function)(left, right)
    }
}

impl<F> fmt::Debug for FnEquality<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("FnEquality(<function>)")
    }
}

// =============================================================================
// Tests
// =============================================================================
