//! Working-set size to table size mapping.
//!
//! Each supported N maps to a prime slot count of roughly 1.25 N, which keeps
//! the replayed table at a load factor of about 0.8 once the trace has filled
//! the cache.

use crate::error::{BenchError, Result};
use std::num::NonZeroUsize;

const TABLE_SIZES: [(u64, usize); 11] = [
    (1024, 1279),
    (2048, 2551),
    (4096, 5101),
    (8192, 10273),
    (16384, 20479),
    (32768, 40849),
    (65536, 81931),
    (131072, 163861),
    (262144, 327739),
    (524288, 655243),
    (1048576, 1310809),
];

/// Table size for a trace generated with working-set size `n`.
pub fn table_size_for(n: u64) -> Result<NonZeroUsize> {
    TABLE_SIZES
        .iter()
        .find(|(size, _)| *size == n)
        .and_then(|(_, m)| NonZeroUsize::new(*m))
        .ok_or(BenchError::UnsupportedN(n))
}

/// Every N that has a configured table size, ascending.
pub fn supported_sizes() -> impl Iterator<Item = u64> {
    TABLE_SIZES.iter().map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prime(m: usize) -> bool {
        m >= 2 && (2..).take_while(|d| d * d <= m).all(|d| m % d != 0)
    }

    #[test]
    fn test_known_sizes() {
        assert_eq!(table_size_for(1024).unwrap().get(), 1279);
        assert_eq!(table_size_for(65536).unwrap().get(), 81931);
        assert_eq!(table_size_for(1048576).unwrap().get(), 1310809);
    }

    #[test]
    fn test_unsupported_sizes() {
        for n in [0, 1, 1000, 1023, 1025, 3000, 2097152] {
            assert!(matches!(
                table_size_for(n),
                Err(BenchError::UnsupportedN(got)) if got == n
            ));
        }
    }

    #[test]
    fn test_table_is_prime_and_roomy() {
        let sizes: Vec<u64> = supported_sizes().collect();
        assert_eq!(sizes, (10..=20).map(|e| 1u64 << e).collect::<Vec<_>>());
        for n in sizes {
            let m = table_size_for(n).unwrap().get();
            assert!(is_prime(m), "{m} is not prime");
            assert!(m as u64 > n, "table for N = {n} is too small");
        }
    }

    #[test]
    fn test_default_workload_sizes_are_supported() {
        let config = crate::workload::WorkloadConfig::default();
        let supported: Vec<u64> = supported_sizes().collect();
        assert_eq!(config.sizes, supported);
    }
}
