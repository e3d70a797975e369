//! Validation of eigenfunction orders.
//!
//! Every evaluator accepts its order through [`IntoOrder`], so callers may
//! pass any primitive numeric type. Unsigned integers always succeed; signed
//! integers fail when negative and floats fail when negative, non-integer, or
//! not finite.
//!
//! ```
//! use hermfn::order::{ IntoOrder, Order };
//!
//! assert_eq!(3_usize.into_order().unwrap(), Order(3));
//! assert_eq!(2.0_f64.into_order().unwrap(), Order(2));
//! assert!((-1_i32).into_order().unwrap_err().is_invalid_order());
//! assert!(2.5_f64.into_order().unwrap_err().is_invalid_order());
//! ```

use std::fmt;
use crate::error::HermError;

/// A validated, non-negative integer order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Order(pub usize);

impl Order {
    /// Get the order as a `usize`.
    pub fn get(self) -> usize { self.0 }

    /// Parity sign (−1)ⁿ.
    pub fn parity(self) -> f64 { if self.0 % 2 == 0 { 1.0 } else { -1.0 } }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Order> for usize {
    fn from(n: Order) -> Self { n.0 }
}

/// Conversion into a validated [`Order`].
pub trait IntoOrder {
    /// Perform the conversion, failing with [`HermError::InvalidOrder`] for
    /// negative or non-integer values.
    fn into_order(self) -> Result<Order, HermError>;
}

impl IntoOrder for Order {
    fn into_order(self) -> Result<Order, HermError> { Ok(self) }
}

// conversion is fallible only for signed types (negative values) and for
// 64-bit values on narrower targets
macro_rules! impl_into_order_int {
    ( $( $t:ty ),* ) => {
        $(
            impl IntoOrder for $t {
                fn into_order(self) -> Result<Order, HermError> {
                    usize::try_from(self)
                        .map(Order)
                        .map_err(|_| HermError::InvalidOrder(self as f64))
                }
            }
        )*
    }
}
impl_into_order_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoOrder for f64 {
    fn into_order(self) -> Result<Order, HermError> {
        let ok = self.is_finite()
            && self >= 0.0
            && self.fract() == 0.0
            && self < usize::MAX as f64;
        ok.then(|| Order(self as usize))
            .ok_or(HermError::InvalidOrder(self))
    }
}

impl IntoOrder for f32 {
    fn into_order(self) -> Result<Order, HermError> {
        f64::from(self).into_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_negative_integers() {
        assert_eq!(0_i64.into_order().unwrap(), Order(0));
        assert_eq!(7_u8.into_order().unwrap(), Order(7));
        assert_eq!(4.0_f32.into_order().unwrap(), Order(4));
        assert_eq!(Order(9).into_order().unwrap(), Order(9));
    }

    #[test]
    fn rejects_bad_orders() {
        for bad in [-1.0, 2.5, f64::NAN, f64::INFINITY, -0.5] {
            assert!(bad.into_order().unwrap_err().is_invalid_order(), "{bad}");
        }
        let past_end = usize::MAX as f64;
        assert!(past_end.into_order().unwrap_err().is_invalid_order());
        assert!(1e300_f64.into_order().unwrap_err().is_invalid_order());
        assert!((-1_i64).into_order().is_err());
        assert!((-3_isize).into_order().is_err());
    }

    #[test]
    fn parity() {
        assert_eq!(Order(0).parity(), 1.0);
        assert_eq!(Order(3).parity(), -1.0);
    }
}
