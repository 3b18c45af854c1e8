//! Crate `assignment` provides the packed truth assignment (component C1):
//! a fixed-length bit vector with flip, read, hamming distance, and a
//! hexadecimal serialization compatible with the `c assgn 0x...` witness
//! comment used by [`crate::formula::Formula`].
use crate::types::{Lit, LiteralEncoding, VarId};
use bitvec::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// A total map from variables `1..=N` to booleans, packed one bit per
/// variable. Length is fixed for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    bits: BitVec<u8, Lsb0>,
}

impl Assignment {
    /// Builds an assignment of width `n` whose bit `i` is `(number >> i) & 1`,
    /// for variables that fit in a `u128`. For wider assignments use
    /// [`Assignment::from_hex`].
    pub fn new(number: u128, n: usize) -> Self {
        let mut bits = bitvec![u8, Lsb0; 0; n];
        for i in 0..n.min(128) {
            bits.set(i, (number >> i) & 1 == 1);
        }
        Assignment { bits }
    }

    /// Builds an assignment from a hexadecimal integer (as emitted by the
    /// `c assgn 0x...` comment), bit `i` = `(number >> i) & 1`. Tolerates an
    /// optional `0x`/`0X` prefix and an optional leading `-` (carried over
    /// from the reference format; the sign is discarded, the assignment is
    /// always taken from the magnitude).
    ///
    /// Returns `Err` if the trimmed string contains anything other than hex
    /// digits — a malformed witness comment is an input error, not a
    /// precondition violation, so the caller (`Formula::parse`) decides how
    /// to report it rather than this function panicking.
    pub fn from_hex(hex: &str, n: usize) -> Result<Self, ()> {
        let trimmed = hex.trim_start_matches('-');
        let trimmed = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(());
        }
        let mut bits = bitvec![u8, Lsb0; 0; n];
        for (k, ch) in trimmed.chars().rev().enumerate() {
            let nibble = ch.to_digit(16).expect("already validated as a hex digit");
            for b in 0..4 {
                let i = k * 4 + b;
                if i < n {
                    bits.set(i, (nibble >> b) & 1 == 1);
                }
            }
        }
        Ok(Assignment { bits })
    }

    /// Draws a uniform assignment of width `n` from a seeded, version-stable
    /// PRNG. Same seed, same assignment, forever.
    pub fn random(n: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut bits = bitvec![u8, Lsb0; 0; n];
        for mut b in bits.iter_mut() {
            *b = rng.gen_bool(0.5);
        }
        Assignment { bits }
    }

    /// The number of variables this assignment covers.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// `a[v]`. `v` must be in `1..=len()`.
    pub fn value(&self, v: VarId) -> bool {
        debug_assert!(v >= 1 && v <= self.len(), "variable {} out of range", v);
        self.bits[v - 1]
    }

    /// Toggles `a[v]` in place. `v` must be in `1..=len()`.
    pub fn flip(&mut self, v: VarId) {
        debug_assert!(v >= 1 && v <= self.len(), "variable {} out of range", v);
        let i = v - 1;
        let cur = self.bits[i];
        self.bits.set(i, !cur);
    }

    /// `a[|lit|] XOR (lit < 0)`. `lit` must be nonzero and `|lit| <= len()`.
    pub fn is_true(&self, lit: Lit) -> bool {
        debug_assert_ne!(lit, 0, "literal 0 has no truth value");
        let v = lit.vi();
        let a = self.value(v);
        if lit.positive() {
            a
        } else {
            !a
        }
    }

    /// Number of positions at which `self` and `other` differ. Both
    /// assignments must have equal length.
    pub fn hamming(&self, other: &Assignment) -> usize {
        assert_eq!(self.len(), other.len(), "hamming distance requires equal length");
        self.bits
            .iter()
            .by_vals()
            .zip(other.bits.iter().by_vals())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Serializes to the minimal hexadecimal string such that
    /// `Assignment::from_hex(&s, self.len()) == self`.
    pub fn to_hex(&self) -> String {
        let n = self.len();
        let nibble_count = ((n + 3) / 4).max(1);
        let mut out = String::with_capacity(nibble_count);
        for k in (0..nibble_count).rev() {
            let mut nib = 0u8;
            for b in 0..4 {
                let i = k * 4 + b;
                if i < n && self.bits[i] {
                    nib |= 1 << b;
                }
            }
            out.push(std::char::from_digit(nib as u32, 16).unwrap());
        }
        let trimmed = out.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_and_flip() {
        let mut a = Assignment::new(0b101, 3);
        assert!(a.value(1));
        assert!(!a.value(2));
        assert!(a.value(3));
        a.flip(2);
        assert!(a.value(2));
        a.flip(2);
        assert!(!a.value(2));
    }

    #[test]
    fn test_is_true() {
        let a = Assignment::new(0b101, 3);
        assert!(a.is_true(1));
        assert!(!a.is_true(-1));
        assert!(!a.is_true(2));
        assert!(a.is_true(-2));
    }

    #[test]
    fn test_hex_round_trip() {
        let a = Assignment::new(5, 3);
        assert_eq!(a.to_hex(), "5");
        let b = Assignment::from_hex("0x5", 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_hex_rejects_bad_digit() {
        assert!(Assignment::from_hex("0xzz", 3).is_err());
        assert!(Assignment::from_hex("-0xg1", 3).is_err());
    }

    // S6: hamming(0b1010, 0b1100) with N=4 is 2.
    #[test]
    fn test_hamming_s6() {
        let a = Assignment::new(0b1010, 4);
        let b = Assignment::new(0b1100, 4);
        assert_eq!(a.hamming(&b), 2);
    }

    #[test]
    fn test_random_is_deterministic() {
        let a = Assignment::random(40, 7);
        let b = Assignment::random(40, 7);
        assert_eq!(a, b);
    }
}
