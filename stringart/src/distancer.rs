use thiserror::Error;

/// Filters which pins may be linked to a given pin.
///
/// Two pins are linkable when their circular index distance is strictly
/// greater than `min`. With `min == 0` every pin except the pin itself is
/// linkable.
#[derive(Clone, Copy, Debug)]
pub struct PinDistancer {
    min: usize,
    max: usize,
}

impl PinDistancer {
    pub fn new(count: usize, distance: usize) -> Result<Self, Error> {
        if count < distance.saturating_mul(2).saturating_add(2) {
            Err(Error(count.saturating_sub(2) / 2))
        } else {
            Ok(Self {
                min: distance,
                max: count - distance,
            })
        }
    }

    //NOTE: This does not check if a_idx and b_idx are inside bounds.
    pub fn is_valid(&self, a_idx: usize, b_idx: usize) -> bool {
        let diff = a_idx.abs_diff(b_idx);
        diff > self.min && diff < self.max
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("The minimum distance between pins must be at most {0}.")]
pub struct Error(usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_only_rejects_self() {
        let distancer = PinDistancer::new(5, 0).unwrap();
        assert!(!distancer.is_valid(2, 2));
        for other in [0, 1, 3, 4] {
            assert!(distancer.is_valid(2, other));
        }
    }

    #[test]
    fn distance_is_circular() {
        let distancer = PinDistancer::new(10, 2).unwrap();
        assert!(!distancer.is_valid(0, 2));
        assert!(distancer.is_valid(0, 3));
        assert!(distancer.is_valid(0, 7));
        assert!(!distancer.is_valid(0, 8));
        assert!(!distancer.is_valid(9, 1));
    }

    #[test]
    fn too_large_distance_is_rejected() {
        assert!(PinDistancer::new(10, 4).is_ok());
        assert_eq!(PinDistancer::new(10, 5).unwrap_err(), Error(4));
    }
}
