//! Benchmark fixtures for the `contig` container.
//!
//! Provides element-count profiles shared by the benches so growth,
//! clone, and iteration are measured at comparable scales.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Element counts benchmarked across all operations.
pub const SIZES: [usize; 3] = [16, 1_024, 65_536];

/// Build an array of `n` sequential u64s by appending.
pub fn sequential(n: usize) -> contig::Array<u64> {
    let mut a = contig::Array::new();
    for i in 0..n as u64 {
        a.push(i);
    }
    a
}
