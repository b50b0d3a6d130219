/*
  Order-preserving translation of 64 bit floats to 64 bit unsigned integers
  and back.

  Positive floats get their sign bit set, negative floats have every bit
  flipped, so sorting the integers sorts the floats. The integer is then
  encrypted like any other big-endian u64.

  NaN has no place in the order and is refused by the callers of this module.
  Both zeros map to the same integer.

  Reference:
  https://lemire.me/blog/2020/12/14/converting-floating-point-numbers-to-integers-while-preserving-order
*/

const SIGN_BIT: u64 = 0x8000_0000_0000_0000;

pub(crate) trait ToOrderedInteger<T> {
    fn map_to(&self) -> T;
}

pub(crate) trait FromOrderedInteger<T> {
    fn map_from(input: T) -> Self;
}

impl ToOrderedInteger<u64> for f64 {
    fn map_to(&self) -> u64 {
        // -0.0 == 0.0, so they must not land on different integers
        let num = if *self == 0.0 { 0 } else { self.to_bits() };
        let mask = ((num as i64) >> 63) as u64 | SIGN_BIT;
        num ^ mask
    }
}

impl FromOrderedInteger<u64> for f64 {
    fn map_from(input: u64) -> f64 {
        let mask = (((input >> 63) as i64) - 1) as u64 | SIGN_BIT;
        f64::from_bits(input ^ mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    quickcheck! {
        fn roundtrip(x: f64) -> TestResult {
            if x.is_nan() || x == 0.0 {
                return TestResult::discard();
            }
            TestResult::from_bool(x.to_bits() == f64::map_from(x.map_to()).to_bits())
        }

        fn preserves_order(x: f64, y: f64) -> TestResult {
            if x.is_nan() || y.is_nan() {
                return TestResult::discard();
            }
            TestResult::from_bool(x.partial_cmp(&y) == Some(x.map_to().cmp(&y.map_to())))
        }
    }

    #[test]
    fn zeros_collapse() {
        assert_eq!((-0.0f64).map_to(), 0.0f64.map_to());
        assert_eq!(f64::map_from(0.0f64.map_to()).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn infinities_sit_at_the_ends() {
        let values = [f64::NEG_INFINITY, -1.5, -f64::MIN_POSITIVE, 0.0, 2.25, f64::INFINITY];
        for pair in values.windows(2) {
            assert!(pair[0].map_to() < pair[1].map_to());
        }
    }
}
