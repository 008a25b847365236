/*! PDEP mask generation.

The deposit mask carries one run of set bits per field, positioned
exactly where the template's placeholder bytes sit. It is built with a
cursor walk over the same boilerplate table the template builder uses:
skip the preceding boilerplate, emit `width` ones, skip the following
boilerplate, repeat. Keeping the two builders on one table is what
guarantees deposited bits land on placeholders and nothing else.
*/

use crate::bitstream::BitStream;
use crate::{Result, template};

/// Build the deposit mask for the given field widths and column names.
///
/// The mask's set-bit count always equals the summed field widths.
/// Same shape requirements as
/// [`build_template`](template::build_template).
pub fn build_deposit_mask(widths: &[usize], columns: &[&str]) -> Result<BitStream> {
    let k = template::check_row_shape(widths, columns)?;
    let mut mask = BitStream::with_len(template::template_len(widths, columns));
    let mut cursor = 0;
    for (i, &width) in widths.iter().enumerate() {
        let (preceding, following) = template::padding(columns, i % k, i == 0);
        cursor += preceding;
        mask.set_run(cursor, width);
        cursor += width + following;
    }
    Ok(mask)
}
