/*! Character-class marker stream construction.

A marker stream has one bit per document *byte*; a character whose
UTF-8 encoding spans several bytes marks (or clears) all of them, so
downstream bit arithmetic keeps working on non-ASCII documents. The
pipeline builds two classes over the delimiter set `{',', '\n'}`: the
delimiter marker itself, and its inversion marking field content.
*/

use crate::bitstream::BitStream;
use crate::{Error, Result};

/// The CSV delimiter class used by the transducer pipeline.
pub const DELIMITERS: &[char] = &[',', '\n'];

/// Build a marker stream for `charset` over `bytes`.
///
/// For each Unicode scalar whose UTF-8 encoding occupies `n` bytes at
/// position `p`, bits `p..p+n` are set iff membership in `charset`,
/// XORed with `invert`, holds. Fails with [`Error::InvalidInput`] if
/// `bytes` is not valid UTF-8.
pub fn create_marker(bytes: &[u8], charset: &[char], invert: bool) -> Result<BitStream> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::InvalidInput(format!("document is not valid UTF-8: {e}")))?;
    let mut marker = BitStream::with_len(bytes.len());
    for (p, ch) in text.char_indices() {
        if charset.contains(&ch) != invert {
            marker.set_run(p, ch.len_utf8());
        }
    }
    Ok(marker)
}
