/*! Pack-wise field-width scanner.

Recovers the byte width of every CSV field from the field marker
stream, in document order. A field is a maximal run of 1-bits in the
marker; adjacent delimiters encode an empty field of width zero; field
0 starts at bit position 0.

The scan works on the *inverse* stream, with delimiters as 1-bits:
counting trailing zeroes locates the next delimiter, and the distance
between consecutive delimiter positions is the enclosed field width
plus one. Only packs flagged by an index stream are visited, so long
runs of field content cost one index lookup instead of a bit-by-bit
walk — this is the part that becomes a SIMD scan in a real Parabix
pipeline.

Two wrinkles of the inverse representation are handled explicitly:

* The complement of an unbounded stream would carry ones forever, so
  the inversion is masked to one bit past the highest content bit.
  That synthetic terminator closes the final field.
* The mask also cuts off any *trailing* delimiters, so the widths list
  is padded with zeroes up to the delimiter count to restore trailing
  empty fields.

The index stream is rebuilt here over the inverted stream. An index
computed over the non-inverted marker must not drive this scan: a pack
holding only delimiters is empty in the marker but all ones after
inversion, and skipping it would silently drop fields.
*/

use log::trace;

use crate::bitstream::BitStream;
use crate::{Error, Result, pack_index};

/// Scan `field_marker` and return the width of every field in document
/// order, padded with zeroes to `delimiter_count` entries.
///
/// `delimiter_count` is the popcount of the delimiter marker the field
/// marker was inverted from. Fails with
/// [`InvalidArgument`](Error::InvalidArgument) unless `pack_size` is a
/// positive power of two, and with [`MalformedRow`](Error::MalformedRow)
/// if content continues past the final delimiter.
pub fn calculate_field_widths(
    field_marker: &BitStream,
    pack_size: usize,
    delimiter_count: usize,
) -> Result<Vec<usize>> {
    // One bit past the highest content bit; 1 when there is no content
    // at all, so the terminator alone survives.
    let scan_len = field_marker.highest_set().map_or(1, |h| h + 2);
    let inv = field_marker.not_masked(scan_len);
    let index = pack_index::create_index(&inv, pack_size)?;
    trace!(
        "field width scan over {scan_len} bits, {} of {} packs occupied",
        index.popcount(),
        scan_len.div_ceil(pack_size)
    );

    let mut widths = Vec::with_capacity(delimiter_count);
    // Conceptual delimiter just before bit 0.
    let mut last_delim: isize = -1;
    for pack in index.iter_ones() {
        let pack_end = (pack + 1) * pack_size;
        let mut pos = pack * pack_size;
        while let Some(delim) = inv.next_set(pos) {
            if delim >= pack_end {
                break;
            }
            widths.push((delim as isize - last_delim - 1) as usize);
            last_delim = delim as isize;
            pos = delim + 1;
        }
    }

    if widths.len() > delimiter_count {
        // The terminator closed a field no delimiter terminates.
        return Err(Error::MalformedRow(
            "final field is not newline-terminated".into(),
        ));
    }
    widths.resize(delimiter_count, 0);
    Ok(widths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charclass::{DELIMITERS, create_marker};

    /// Widths straight from CSV bytes, the way the pipeline wires the
    /// scanner up.
    fn widths_of(csv: &str, pack_size: usize) -> Result<Vec<usize>> {
        let delims = create_marker(csv.as_bytes(), DELIMITERS, false)?;
        let fields = create_marker(csv.as_bytes(), DELIMITERS, true)?;
        calculate_field_widths(&fields, pack_size, delims.popcount())
    }

    #[test]
    fn single_field() -> Result<()> {
        assert_eq!(widths_of("123\n", 64)?, vec![3]);
        Ok(())
    }

    #[test]
    fn three_fields() -> Result<()> {
        assert_eq!(widths_of("12,abc,flap\n", 64)?, vec![2, 3, 4]);
        Ok(())
    }

    #[test]
    fn trailing_empty_fields_are_restored() -> Result<()> {
        assert_eq!(widths_of("a,b,,\n", 64)?, vec![1, 1, 0, 0]);
        Ok(())
    }

    #[test]
    fn empty_fields_at_start_middle_and_end() -> Result<()> {
        assert_eq!(widths_of(",a,,b,\n", 64)?, vec![0, 1, 0, 1, 0]);
        Ok(())
    }

    #[test]
    fn long_mixed_row() -> Result<()> {
        let csv = ",123,123,123,123,1234567,123,,12,,,,123456789,12,123,1,12345,,,,1,12\n";
        let want = vec![0, 3, 3, 3, 3, 7, 3, 0, 2, 0, 0, 0, 9, 2, 3, 1, 5, 0, 0, 0, 1, 2];
        for pack_size in [4, 8, 64, 128] {
            assert_eq!(widths_of(csv, pack_size)?, want, "pack_size {pack_size}");
        }
        Ok(())
    }

    #[test]
    fn widths_account_for_every_content_byte() -> Result<()> {
        // Σ widths == document length − delimiter count, and the
        // widths list always has one entry per delimiter.
        for csv in ["123\n", "a,b,,\n", ",\n", "a,bb\nccc,\n", "12,abc,flap\n"] {
            let delims = create_marker(csv.as_bytes(), DELIMITERS, false)?;
            let widths = widths_of(csv, 8)?;
            assert_eq!(widths.len(), delims.popcount(), "{csv:?}");
            assert_eq!(
                widths.iter().sum::<usize>(),
                csv.len() - delims.popcount(),
                "{csv:?}"
            );
        }
        Ok(())
    }

    #[test]
    fn field_spanning_a_pack_boundary() -> Result<()> {
        // First field covers packs 0 and 1 at pack size 4.
        assert_eq!(widths_of("aaaaaaa,bb\n", 4)?, vec![7, 2]);
        Ok(())
    }

    #[test]
    fn pack_boundary_aligned_fields() -> Result<()> {
        // Delimiters land exactly on pack boundaries at pack size 4.
        assert_eq!(widths_of("abc,def,gh\n", 4)?, vec![3, 3, 2]);
        Ok(())
    }

    #[test]
    fn all_delimiter_pack_emits_zero_widths() -> Result<()> {
        // Bits 1..=8 of the inverted stream are solid ones, covering
        // two whole packs at pack size 4.
        assert_eq!(
            widths_of("a,,,,,,,,b\n", 4)?,
            vec![1, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        Ok(())
    }

    #[test]
    fn document_of_only_delimiters() -> Result<()> {
        assert_eq!(widths_of(",\n", 64)?, vec![0, 0]);
        Ok(())
    }

    #[test]
    fn multi_row_documents() -> Result<()> {
        assert_eq!(widths_of("a,bb\nccc,\n", 64)?, vec![1, 2, 3, 0]);
        assert_eq!(widths_of("1\n22\n333\n", 2)?, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn rejects_bad_pack_size() {
        let err = widths_of("a,b\n", 63).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");
    }

    #[test]
    fn rejects_unterminated_content() {
        // "ab" has content past the last (absent) delimiter.
        let err = widths_of("a,ab", 64).unwrap_err();
        assert!(matches!(err, Error::MalformedRow(_)), "got {err:?}");
    }
}
