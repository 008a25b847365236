/*! The transduction pipeline.

Wires the stages together in dependency order: class compilation and
transposition first, validation, then the field-width scan, then the
two template-side builders, and finally the extract/deposit engine and
the inverse transposition. Every intermediate stream lives exactly as
long as its last consumer.
*/

use std::time::Instant;

use itertools::Itertools;
use log::{debug, log_enabled, trace};

use crate::bitstream::fmt_aligned;
use crate::{
    Error, Result, Target, charclass, deposit, field_width, pext_pdep, template, transpose,
    validate,
};

/// Transduce a CSV document to a pretty-printed JSON array of objects.
///
/// `pack_size` is the scanner granularity in bits, typically 64.
/// `column_names` become the object keys, in field order; they may be
/// non-ASCII and are measured in UTF-8 bytes. The returned bytes are
/// the complete output document.
///
/// ```
/// let json = parabit::transduce(64, &["col1"], b"123\n")?;
/// assert_eq!(json, b"[\n    {\n        \"col1\": 123\n    }\n]");
/// # Ok::<(), parabit::Error>(())
/// ```
pub fn transduce<S: AsRef<str>>(
    pack_size: usize,
    column_names: &[S],
    csv: &[u8],
) -> Result<Vec<u8>> {
    transduce_to(Target::Json, pack_size, column_names, csv)
}

/// Like [`transduce`], for an explicit [`Target`]. Only
/// [`Target::Json`] is implemented; anything else fails with
/// [`Error::UnsupportedTarget`].
pub fn transduce_to<S: AsRef<str>>(
    target: Target,
    pack_size: usize,
    column_names: &[S],
    csv: &[u8],
) -> Result<Vec<u8>> {
    match target {
        Target::Json => {}
        other => return Err(Error::UnsupportedTarget(other)),
    }
    validate::check_pack_size(pack_size)?;
    let columns: Vec<&str> = column_names.iter().map(AsRef::as_ref).collect();
    if columns.is_empty() {
        return Err(Error::InvalidInput("column list is empty".into()));
    }

    let start = Instant::now();
    let delimiters = charclass::create_marker(csv, charclass::DELIMITERS, false)?;
    let fields = charclass::create_marker(csv, charclass::DELIMITERS, true)?;
    let basis = transpose::decompose(csv);
    if log_enabled!(log::Level::Trace) {
        trace!(
            "marker streams:\n{}",
            fmt_aligned(&[("delimiters", &delimiters), ("fields", &fields)], csv.len())
        );
    }

    validate::validate_document(csv, &basis, &delimiters, columns.len())?;

    let widths = field_width::calculate_field_widths(&fields, pack_size, delimiters.popcount())?;
    debug!(
        "scanned {} fields over {} rows: [{}]",
        widths.len(),
        widths.len() / columns.len(),
        widths.iter().join(", ")
    );

    let template = template::build_template(&widths, &columns)?;
    let deposit_mask = deposit::build_deposit_mask(&widths, &columns)?;
    let template_basis = transpose::decompose(&template);
    let out = pext_pdep::transduce_planes(&basis, &fields, &template_basis, &deposit_mask)?;
    let json = transpose::recompose(&out, template.len());
    debug!(
        "transduced {} CSV bytes to {} JSON bytes in {:?}",
        csv.len(),
        json.len(),
        start.elapsed()
    );
    Ok(json)
}
