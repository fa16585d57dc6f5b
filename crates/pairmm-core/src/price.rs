//! Integer price and volume types.
//!
//! The exchange quotes every price in whole cents and every quantity in
//! whole lots, so both are plain integers wrapped for type safety.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Price in cents.
///
/// Wraps `i64` so prices cannot be mixed with volumes in calculations.
/// Zero is used by the host to mean "no price at this level".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[inline]
    pub fn inner(&self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Round down to a multiple of `tick`.
    #[inline]
    pub fn floor_to_tick(&self, tick: i64) -> Self {
        if tick <= 0 {
            return *self;
        }
        Self(self.0.div_euclid(tick) * tick)
    }

    /// Shift by a whole number of ticks (negative moves down).
    #[inline]
    pub fn offset_ticks(&self, ticks: i64, tick: i64) -> Self {
        Self(self.0 + ticks * tick)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Price {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Quantity in lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(pub u32);

impl Volume {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(lots: u32) -> Self {
        Self(lots)
    }

    #[inline]
    pub fn inner(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Signed lot count, positive for buys and negative for sells when
    /// multiplied by [`crate::Side::sign`].
    #[inline]
    pub fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }

    /// Build a volume from a signed quantity, clamping negatives to zero.
    #[inline]
    pub fn from_signed(lots: i64) -> Self {
        Self(lots.clamp(0, i64::from(u32::MAX)) as u32)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Volume {
    fn from(lots: u32) -> Self {
        Self(lots)
    }
}

impl Add for Volume {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Volume {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}
