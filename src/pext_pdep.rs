/*! Parallel extract and parallel deposit over unbounded bit streams.

`apply_pext` and `apply_pdep` are the software model of the x86 `PEXT`
and `PDEP` instructions, generalised to streams of any length. Both
walk the mask run by run rather than bit by bit: each maximal run of
mask ones moves a whole block of bits with two word-sized copies per
64-bit chunk, which is the shape a SIMD implementation takes.

The engine at the bottom applies the pair plane-wise: every CSV basis
plane is extracted with the field marker, and each extracted stream is
deposited into the corresponding template plane with the deposit mask.
The eight planes are completely independent, so they fan out over the
rayon pool.
*/

use rayon::prelude::*;

use crate::bitstream::{BasisBits, BitStream};
use crate::{Error, Result};

/// Gather the bits of `stream` at the positions where `mask` is set,
/// compacted to the low end of the result.
///
/// The result carries exactly `popcount(stream & mask)` set bits in
/// `popcount(mask)` positions.
pub fn apply_pext(stream: &BitStream, mask: &BitStream) -> BitStream {
    let mut out = BitStream::new();
    let mut out_pos = 0;
    for (start, width) in mask.runs() {
        copy_bits(stream, start, &mut out, out_pos, width);
        out_pos += width;
    }
    out
}

/// Scatter the low bits of `source` into `dest` at the positions where
/// `mask` is set, consuming `source` LSB-first. Each mask run is
/// zeroed in `dest` before the source bits are written; bits of `dest`
/// outside any run are preserved.
pub fn apply_pdep(dest: &mut BitStream, mask: &BitStream, source: &BitStream) {
    let mut src_pos = 0;
    for (start, width) in mask.runs() {
        copy_bits(source, src_pos, dest, start, width);
        src_pos += width;
    }
}

/// Copy `n` bits from `src` starting at `src_pos` into `dst` starting
/// at `dst_pos`, overwriting the destination region.
fn copy_bits(src: &BitStream, src_pos: usize, dst: &mut BitStream, dst_pos: usize, n: usize) {
    let mut copied = 0;
    while copied < n {
        let chunk = (n - copied).min(64);
        let v = src.peek_bits(src_pos + copied, chunk);
        dst.poke_bits(dst_pos + copied, chunk, v);
        copied += chunk;
    }
}

/// Run the extract/deposit half of the transduction: PEXT every CSV
/// basis plane with `extract_mask`, PDEP each result into the matching
/// template plane with `deposit_mask`, and return the filled planes.
///
/// The two masks must transport the same number of bits; a mismatch
/// means an upstream stage produced inconsistent streams and aborts
/// with [`Error::Internal`].
pub fn transduce_planes(
    csv: &BasisBits,
    extract_mask: &BitStream,
    template: &BasisBits,
    deposit_mask: &BitStream,
) -> Result<BasisBits> {
    let extract_bits = extract_mask.popcount();
    let deposit_bits = deposit_mask.popcount();
    if extract_bits != deposit_bits {
        return Err(Error::Internal(format!(
            "deposit mask transports {deposit_bits} bits per plane, extract mask {extract_bits}"
        )));
    }
    let mut out = template.clone();
    out.planes_mut()
        .par_iter_mut()
        .zip(csv.planes().par_iter())
        .for_each(|(plane, csv_plane)| {
            let extracted = apply_pext(csv_plane, extract_mask);
            apply_pdep(plane, deposit_mask, &extracted);
        });
    Ok(out)
}
