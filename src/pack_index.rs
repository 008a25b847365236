/*! Pack index streams.

An index stream summarises another stream at pack granularity: bit *j*
is set iff the *j*-th `pack_size`-bit window contains at least one set
bit. A pack-wise scanner can then hop straight to the packs worth
looking at, which is the whole trick behind the field-width scan.
*/

use crate::bitstream::BitStream;
use crate::{Result, validate};

/// Build the index stream of `stream` at `pack_size` granularity.
///
/// Scanning jumps from set bit to set bit, so wholly empty packs cost
/// nothing and the scan terminates as soon as the residual stream is
/// exhausted. Fails with [`InvalidArgument`](crate::Error::InvalidArgument)
/// unless `pack_size` is a positive power of two.
pub fn create_index(stream: &BitStream, pack_size: usize) -> Result<BitStream> {
    validate::check_pack_size(pack_size)?;
    let mut index = BitStream::new();
    let mut pos = 0;
    while let Some(p) = stream.next_set(pos) {
        let pack = p / pack_size;
        index.set(pack);
        pos = (pack + 1) * pack_size;
    }
    Ok(index)
}
