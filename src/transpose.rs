/*! Serial↔parallel byte/bit transposition.

`decompose` spreads a byte stream over eight basis planes so that plane
*k* holds bit *k* of every byte; `recompose` is its exact inverse. The
transposition is encoding-oblivious: a multi-byte UTF-8 code point
simply occupies that many consecutive bit positions, and it is up to the
class compiler to mark all of them.
*/

use crate::bitstream::BasisBits;

/// Transpose a byte stream into its eight basis bit streams.
pub fn decompose(bytes: &[u8]) -> BasisBits {
    let mut basis = BasisBits::with_len(bytes.len());
    for (p, &byte) in bytes.iter().enumerate() {
        for (k, plane) in basis.planes_mut().iter_mut().enumerate() {
            if byte & (1 << k) != 0 {
                plane.set(p);
            }
        }
    }
    basis
}

/// Reassemble `len` bytes from eight basis bit streams. Byte *p* is
/// rebuilt column-wise, LSB plane first, so for every input
/// `recompose(&decompose(x), x.len()) == x`.
pub fn recompose(basis: &BasisBits, len: usize) -> Vec<u8> {
    (0..len)
        .map(|p| {
            let mut byte = 0u8;
            for (k, plane) in basis.planes().iter().enumerate() {
                if plane.get(p) {
                    byte |= 1 << k;
                }
            }
            byte
        })
        .collect()
}
