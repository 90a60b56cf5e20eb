use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// A natural number or infinity. Used for path lengths, where infinity means "unreachable".
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NaturalOrInfinite(Option<u64>);

impl NaturalOrInfinite {
    pub fn infinity() -> Self {
        Self(None)
    }

    pub fn is_finite(self) -> bool {
        self.0.is_some()
    }

    pub fn is_infinite(self) -> bool {
        self.0.is_none()
    }

    /// The finite value.
    ///
    /// # Panics
    /// If `self` is infinite.
    pub fn finite_value(self) -> u64 {
        self.0.expect("finite_value() called on infinity")
    }

    pub fn as_finite(self) -> Option<u64> {
        self.0
    }
}

impl From<u32> for NaturalOrInfinite {
    fn from(n: u32) -> Self {
        Self(Some(n.into()))
    }
}

impl From<u64> for NaturalOrInfinite {
    fn from(n: u64) -> Self {
        Self(Some(n))
    }
}

impl Add for NaturalOrInfinite {
    type Output = Self;

    /// Infinity absorbs everything. Overflowing sums are treated as infinite.
    fn add(self, rhs: Self) -> Self::Output {
        match (self.0, rhs.0) {
            (Some(a), Some(b)) => Self(a.checked_add(b)),
            _ => Self::infinity(),
        }
    }
}

impl Ord for NaturalOrInfinite {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for NaturalOrInfinite {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for NaturalOrInfinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "∞"),
        }
    }
}

#[cfg(test)]
pub(crate) type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let inf = NaturalOrInfinite::infinity();
        assert!(NaturalOrInfinite::from(0u32) < NaturalOrInfinite::from(1u32));
        assert!(NaturalOrInfinite::from(u64::MAX) < inf);
        assert_eq!(inf.cmp(&inf), Ordering::Equal);
        assert_eq!(
            [inf, 3u32.into(), 1u32.into()].iter().min(),
            Some(&NaturalOrInfinite::from(1u32))
        );
    }

    #[test]
    fn test_add() {
        let inf = NaturalOrInfinite::infinity();
        assert_eq!(
            NaturalOrInfinite::from(2u32) + NaturalOrInfinite::from(3u32),
            NaturalOrInfinite::from(5u32)
        );
        assert!((inf + NaturalOrInfinite::from(3u32)).is_infinite());
        assert!((NaturalOrInfinite::from(u64::MAX) + NaturalOrInfinite::from(1u32)).is_infinite());
    }
}
