//! Configuration for the Low Inter-reference Recency Set (LIRS) cache.
//!
//! LIRS splits its capacity into a LIR budget (stack S) and an HIR budget
//! (list Q). `hirs_ratio` is the fraction of the total capacity granted to
//! HIR-resident entries: `hir_capacity = floor(capacity * hirs_ratio)` and
//! `lir_capacity = capacity - hir_capacity`. The ratio must lie strictly
//! between 0 and 1 and both derived budgets must be at least one entry.
//! The LIRS paper suggests a small HIR share (around 1%); tiny caches need
//! a proportionally larger ratio so the HIR budget does not floor to zero.
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::LirsCacheConfig;
//! use policy_cache::LirsCache;
//!
//! let config = LirsCacheConfig {
//!     capacity: 100,
//!     hirs_ratio: 0.05,
//! };
//! let cache: LirsCache<String, i32> = LirsCache::init(config).unwrap();
//! ```

use core::num::NonZeroUsize;

use crate::error::CacheError;

/// Configuration for a LIRS cache.
#[derive(Debug, Clone, Copy)]
pub struct LirsCacheConfig {
    /// Total number of resident entries the cache can hold.
    pub capacity: usize,
    /// Fraction of `capacity` assigned to HIR-resident entries (list Q).
    pub hirs_ratio: f64,
}

impl LirsCacheConfig {
    /// Validates the configuration and returns the `(lir, hir)` budgets.
    pub fn budgets(&self) -> Result<(NonZeroUsize, NonZeroUsize), CacheError> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "capacity should be larger than 0",
            ));
        }

        if self.hirs_ratio <= 0.0 || self.hirs_ratio >= 1.0 {
            return Err(CacheError::InvalidArgument(
                "hirs ratio should be larger than 0 and less than 1.0",
            ));
        }

        let hir = (self.capacity as f64 * self.hirs_ratio) as usize;
        let lir = self.capacity - hir;

        match (NonZeroUsize::new(lir), NonZeroUsize::new(hir)) {
            (Some(lir), Some(hir)) => Ok((lir, hir)),
            _ => Err(CacheError::InvalidArgument("invalid hirs_ratio")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lirs_config_valid() {
        let config = LirsCacheConfig {
            capacity: 3,
            hirs_ratio: 0.34,
        };
        let (lir, hir) = config.budgets().unwrap();
        assert_eq!(lir.get(), 2);
        assert_eq!(hir.get(), 1);
    }

    #[test]
    fn test_lirs_config_zero_capacity() {
        let config = LirsCacheConfig {
            capacity: 0,
            hirs_ratio: 0.34,
        };
        assert!(config.budgets().is_err());
    }

    #[test]
    fn test_lirs_config_ratio_bounds() {
        for ratio in [0.0, 1.0, -0.5, 2.0] {
            let config = LirsCacheConfig {
                capacity: 10,
                hirs_ratio: ratio,
            };
            assert!(config.budgets().is_err());
        }
    }

    #[test]
    fn test_lirs_config_degenerate_budgets() {
        // HIR budget floors to zero.
        let config = LirsCacheConfig {
            capacity: 10,
            hirs_ratio: 0.01,
        };
        assert!(config.budgets().is_err());
    }
}
