/*! Structural validation of the input document.

Runs before the width scan so that a malformed document fails with
[`MalformedRow`](crate::Error::MalformedRow) instead of tripping an
internal invariant three stages later. The row-shape check works on the
extracted *delimiter bytes*: PEXT of every basis plane with the
delimiter marker compacts the document down to just its delimiters,
and in a well-formed document those read as `k − 1` commas followed by
a newline, over and over.
*/

use crate::bitstream::{BasisBits, BitStream};
use crate::{Error, Result, pext_pdep, transpose};

/// Check that `pack_size` is a positive power of two.
pub fn check_pack_size(pack_size: usize) -> Result<()> {
    if !pack_size.is_power_of_two() {
        return Err(Error::InvalidArgument(format!(
            "pack size must be a positive power of two, got {pack_size}"
        )));
    }
    Ok(())
}

/// Check that the document forms complete `num_columns`-field rows.
///
/// * The document must be non-empty and end with `\n`.
/// * The delimiter count must be a non-zero multiple of `num_columns`.
/// * Walking the extracted delimiters in order, every `num_columns`-th
///   one must be `\n` and all others `,`.
pub fn validate_document(
    csv: &[u8],
    basis: &BasisBits,
    delimiters: &BitStream,
    num_columns: usize,
) -> Result<()> {
    if csv.last() != Some(&b'\n') {
        return Err(Error::MalformedRow(
            "document does not end with a newline".into(),
        ));
    }
    let count = delimiters.popcount();
    if count == 0 || count % num_columns != 0 {
        return Err(Error::MalformedRow(format!(
            "{count} delimiters cannot form rows of {num_columns} fields"
        )));
    }

    let mut extracted = BasisBits::new();
    for k in 0..8 {
        extracted[k] = pext_pdep::apply_pext(&basis[k], delimiters);
    }
    let delim_bytes = transpose::recompose(&extracted, count);
    for (i, &b) in delim_bytes.iter().enumerate() {
        let row = i / num_columns + 1;
        let ends_row = (i + 1) % num_columns == 0;
        if ends_row && b != b'\n' {
            return Err(Error::MalformedRow(format!(
                "row {row} has more than {num_columns} fields"
            )));
        }
        if !ends_row && b != b',' {
            return Err(Error::MalformedRow(format!(
                "row {row} ends after {} of {num_columns} fields",
                (i % num_columns) + 1
            )));
        }
    }
    Ok(())
}
