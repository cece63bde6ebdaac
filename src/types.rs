//! Fundamental data types used throughout brainrun

use std::{
    num::Wrapping,
    ops::{AddAssign, SubAssign},
};

/// Newtype for a logical tape address.
///
/// The origin (the cell the program starts on) is address 0. Cells to the
/// left of it have negative addresses. Growing the tape never changes the
/// logical address of an existing cell.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TapeAddr(pub i64);

impl TapeAddr {
    pub fn new(val: i64) -> Self {
        Self(val)
    }
}

impl From<i32> for TapeAddr {
    fn from(value: i32) -> Self {
        Self(value as i64)
    }
}

impl From<i64> for TapeAddr {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<TapeAddr> for i64 {
    fn from(value: TapeAddr) -> Self {
        value.0
    }
}

/// A BF number (u8 with wrapping semantics).
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BfNum(Wrapping<u8>);

impl BfNum {
    pub const ZERO: BfNum = BfNum(Wrapping(0));
    pub const ONE: BfNum = BfNum(Wrapping(1));

    pub fn is_zero(&self) -> bool {
        self.0 .0 == 0
    }
}

impl AddAssign for BfNum {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for BfNum {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<u8> for BfNum {
    fn from(value: u8) -> Self {
        Self(Wrapping::<u8>(value))
    }
}

impl From<BfNum> for u8 {
    fn from(value: BfNum) -> Self {
        value.0 .0
    }
}

#[cfg(test)]
mod tests {
    use super::{BfNum, TapeAddr};

    #[test]
    fn test_bfnum_wraps() {
        let mut n = BfNum::from(255u8);
        n += BfNum::ONE;
        assert_eq!(n, BfNum::ZERO);
        n -= BfNum::ONE;
        assert_eq!(u8::from(n), 255);
        assert!(BfNum::default().is_zero());
    }

    #[test]
    fn test_tape_addr() {
        assert_eq!(i64::from(TapeAddr::from(7)), 7);
        assert_eq!(TapeAddr::from(-2), TapeAddr::new(-2));
    }
}
