//! Log2

use num_traits::Num;

/// Trait to support base 2 logarithm
pub trait Log2Int<T: Num> {
    /// Returns log base 2 of a value in given type `T`.
    fn log2int(self) -> T;
}

impl Log2Int<i32> for u32 {
    /// Returns log base 2 of a value.
    #[inline(always)]
    fn log2int(self) -> i32 {
        31_i32 - self.leading_zeros() as i32
    }
}

impl Log2Int<i32> for i32 {
    /// Returns log base 2 of a value.
    #[inline(always)]
    fn log2int(self) -> i32 {
        Log2Int::log2int(self as u32)
    }
}

impl Log2Int<i64> for usize {
    /// Returns log base 2 of a value.
    #[inline(always)]
    fn log2int(self) -> i64 {
        63_i64 - self.leading_zeros() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log2int_of_powers_of_two() {
        assert_eq!(Log2Int::log2int(1_usize), 0);
        assert_eq!(Log2Int::log2int(2_usize), 1);
        assert_eq!(Log2Int::log2int(1024_usize), 10);
    }

    #[test]
    fn log2int_rounds_down() {
        assert_eq!(Log2Int::log2int(3_u32), 1);
        assert_eq!(Log2Int::log2int(1000_usize), 9);
    }
}
