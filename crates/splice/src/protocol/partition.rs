use crate::{Error, Result};

/// Split point of a sequence of raw limbs: the lower half holds the first
/// `floor(n / 2)` limbs and the upper half the remaining ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    lower: usize,
    upper: usize,
}

impl Partition {
    /// The partition of a sequence of `len` limbs.
    pub const fn of(len: usize) -> Self {
        Self {
            lower: len / 2,
            upper: len - len / 2,
        }
    }

    /// Length of the lower half.
    pub const fn lower(&self) -> usize {
        self.lower
    }

    /// Length of the upper half.
    pub const fn upper(&self) -> usize {
        self.upper
    }

    /// Length of the whole sequence.
    pub const fn len(&self) -> usize {
        self.lower + self.upper
    }

    /// Returns `true` for the partition of an empty sequence.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits `limbs` into its lower and upper halves.
    pub fn split<'a>(&self, limbs: &'a [u64]) -> Result<(&'a [u64], &'a [u64])> {
        if limbs.len() != self.len() {
            return Err(Error::DimensionMismatch(format!(
                "cannot split {} limbs at {} of {}",
                limbs.len(),
                self.lower,
                self.len()
            )));
        }
        Ok(limbs.split_at(self.lower))
    }

    /// Overwrites `destination` with `lower` followed by `upper`.
    pub fn splice_into(&self, destination: &mut [u64], lower: &[u64], upper: &[u64]) -> Result<()> {
        if lower.len() != self.lower || upper.len() != self.upper {
            return Err(Error::DimensionMismatch(format!(
                "halves of {} and {} limbs do not match a split at {} of {}",
                lower.len(),
                upper.len(),
                self.lower,
                self.len()
            )));
        }
        if destination.len() != self.len() {
            return Err(Error::DimensionMismatch(format!(
                "halves of {} limbs do not fill a destination of {} limbs",
                self.len(),
                destination.len()
            )));
        }

        let (destination_lower, destination_upper) = destination.split_at_mut(self.lower);
        destination_lower.copy_from_slice(lower);
        destination_upper.copy_from_slice(upper);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;
    use crate::Error;
    use proptest::prelude::*;
    use std::error::Error as StdError;

    #[test]
    fn odd_length() -> Result<(), Box<dyn StdError>> {
        let partition = Partition::of(5);
        assert_eq!(partition.lower(), 2);
        assert_eq!(partition.upper(), 3);

        let limbs = [1, 2, 3, 4, 5];
        let (lower, upper) = partition.split(&limbs)?;
        assert_eq!(lower, &[1, 2]);
        assert_eq!(upper, &[3, 4, 5]);

        let mut destination = [0; 5];
        partition.splice_into(&mut destination, &[6, 7], &[8, 9, 10])?;
        assert_eq!(destination, [6, 7, 8, 9, 10]);
        Ok(())
    }

    #[test]
    fn mismatches() {
        let partition = Partition::of(4);
        assert!(matches!(
            partition.split(&[1, 2, 3]),
            Err(Error::DimensionMismatch(_))
        ));

        let mut destination = [0; 4];
        assert!(matches!(
            partition.splice_into(&mut destination, &[1], &[2, 3, 4]),
            Err(Error::DimensionMismatch(_))
        ));
        assert!(matches!(
            partition.splice_into(&mut [0; 5], &[1, 2], &[3, 4]),
            Err(Error::DimensionMismatch(_))
        ));
        // Nothing is written on failure.
        assert_eq!(destination, [0; 4]);
    }

    #[test]
    fn empty() -> Result<(), Box<dyn StdError>> {
        let partition = Partition::of(0);
        assert!(partition.is_empty());
        let (lower, upper) = partition.split(&[])?;
        assert!(lower.is_empty() && upper.is_empty());
        Ok(())
    }

    proptest! {
        #[test]
        fn partition_law(limbs in proptest::collection::vec(any::<u64>(), 0..300)) {
            let n = limbs.len();
            let partition = Partition::of(n);
            prop_assert_eq!(partition.lower(), n / 2);
            prop_assert_eq!(partition.upper(), n - n / 2);
            prop_assert_eq!(partition.len(), n);

            let (lower, upper) = partition.split(&limbs).unwrap();
            prop_assert_eq!([lower, upper].concat(), limbs.clone());

            let mut destination = vec![0; n];
            partition.splice_into(&mut destination, lower, upper).unwrap();
            prop_assert_eq!(destination, limbs);
        }
    }
}
