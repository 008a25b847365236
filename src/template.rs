/*! JSON boilerplate template generation.

The template is the complete output document with every field value
replaced by a placeholder run sized to that field's width. The deposit
pass later overwrites exactly the placeholder bytes, so the template
fixes the shape of the output once and for all:

```text
[
    {
        "col A": __,
        "col B": ___
    },
    ...
]
```

The per-field byte counts of the boilerplate *around* each placeholder
are shared with the deposit-mask builder through [`padding`]; the two
must agree to the byte or deposited bits land on punctuation.
*/

use crate::{Error, Result};

/// The filler byte used for placeholder runs. Every placeholder bit is
/// overwritten by the deposit pass, so the choice only shows up when
/// dumping the raw template.
pub const PLACEHOLDER: u8 = b'_';

/// Boilerplate byte counts before and after the placeholder of field
/// `j` within its object: `(preceding, following)`.
///
/// The constant parts are `[\n` (2, document's first field only),
/// `    {\n` (6, first field of each object), `        "": ` (12 plus
/// the column name) and the `,\n` / `\n    }` continuations (2, or 8
/// for the last field of an object).
pub(crate) fn padding(columns: &[&str], j: usize, first_in_document: bool) -> (usize, usize) {
    let mut preceding = 12 + columns[j].len();
    let mut following = 2;
    if j == 0 {
        preceding += 6;
        if first_in_document {
            preceding += 2;
        }
    }
    if j == columns.len() - 1 {
        following += 6;
    }
    (preceding, following)
}

/// Build the template byte stream for the given field widths and
/// column names.
///
/// Requires the widths to fill a whole number of objects
/// (`widths.len() % columns.len() == 0`) and a non-empty column list,
/// else [`Error::InvalidInput`].
pub fn build_template(widths: &[usize], columns: &[&str]) -> Result<Vec<u8>> {
    let k = check_row_shape(widths, columns)?;
    let objects = widths.len() / k;
    let mut out = Vec::with_capacity(template_len(widths, columns));
    out.extend_from_slice(b"[\n");
    if objects == 0 {
        out.extend_from_slice(b"]");
        return Ok(out);
    }
    for (i, row) in widths.chunks(k).enumerate() {
        out.extend_from_slice(b"    {\n");
        for (j, &width) in row.iter().enumerate() {
            out.extend_from_slice(b"        \"");
            out.extend_from_slice(columns[j].as_bytes());
            out.extend_from_slice(b"\": ");
            out.resize(out.len() + width, PLACEHOLDER);
            if j + 1 < k {
                out.extend_from_slice(b",\n");
            }
        }
        out.extend_from_slice(b"\n    }");
        if i + 1 < objects {
            out.extend_from_slice(b",\n");
        } else {
            out.extend_from_slice(b"\n]");
        }
    }
    Ok(out)
}

/// Exact byte length of the template [`build_template`] would produce.
///
/// The sum of every field's preceding boilerplate, width and following
/// boilerplate: the document's first field accounts for the opening
/// `[\n`, and the last field's following bytes cover the closing `\n]`.
pub fn template_len(widths: &[usize], columns: &[&str]) -> usize {
    if widths.is_empty() {
        return 3; // [\n]
    }
    let k = columns.len().max(1);
    widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let (pre, post) = padding(columns, i % k, i == 0);
            pre + width + post
        })
        .sum()
}

pub(crate) fn check_row_shape(widths: &[usize], columns: &[&str]) -> Result<usize> {
    if columns.is_empty() {
        return Err(Error::InvalidInput("column list is empty".into()));
    }
    let k = columns.len();
    if widths.len() % k != 0 {
        return Err(Error::InvalidInput(format!(
            "{} fields cannot be packaged into objects of {} columns",
            widths.len(),
            k
        )));
    }
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_str(widths: &[usize], columns: &[&str]) -> Result<String> {
        Ok(String::from_utf8(build_template(widths, columns)?).unwrap())
    }

    #[test]
    fn single_field_object() -> Result<()> {
        assert_eq!(
            template_str(&[3], &["col1"])?,
            "[\n    {\n        \"col1\": ___\n    }\n]"
        );
        Ok(())
    }

    #[test]
    fn three_field_object() -> Result<()> {
        assert_eq!(
            template_str(&[2, 3, 4], &["col A", "col B", "col C"])?,
            "[\n    {\n        \"col A\": __,\n        \"col B\": ___,\n        \"col C\": ____\n    }\n]"
        );
        Ok(())
    }

    #[test]
    fn two_objects_are_comma_separated() -> Result<()> {
        assert_eq!(
            template_str(&[1, 0, 2, 1], &["a", "b"])?,
            "[\n    {\n        \"a\": _,\n        \"b\": \n    },\n    {\n        \"a\": __,\n        \"b\": _\n    }\n]"
        );
        Ok(())
    }

    #[test]
    fn zero_width_fields_leave_no_placeholder() -> Result<()> {
        let t = template_str(&[0], &["x"])?;
        assert_eq!(t, "[\n    {\n        \"x\": \n    }\n]");
        assert!(!t.contains('_'));
        Ok(())
    }

    #[test]
    fn multibyte_column_names_count_in_bytes() -> Result<()> {
        let t = build_template(&[1], &["나이"])?;
        // "나이" is six bytes of UTF-8.
        assert_eq!(t.len(), template_len(&[1], &["나이"]));
        assert_eq!(
            String::from_utf8(t).unwrap(),
            "[\n    {\n        \"나이\": _\n    }\n]"
        );
        Ok(())
    }

    #[test]
    fn template_len_matches_builder() -> Result<()> {
        for (widths, columns) in [
            (vec![3], vec!["col1"]),
            (vec![2, 3, 4], vec!["a", "bb", "ccc"]),
            (vec![0, 0, 0, 0], vec!["x", "y"]),
            (vec![5, 1, 0, 2, 7, 3], vec!["one", "two", "three"]),
        ] {
            let t = build_template(&widths, &columns)?;
            assert_eq!(t.len(), template_len(&widths, &columns), "{columns:?}");
            // Placeholder count equals the summed field widths.
            let placeholders = t.iter().filter(|&&b| b == PLACEHOLDER).count();
            assert_eq!(placeholders, widths.iter().sum::<usize>());
        }
        Ok(())
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = build_template(&[1, 2, 3], &["a", "b"]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "got {err:?}");
    }

    #[test]
    fn rejects_empty_column_list() {
        let err = build_template(&[1], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "got {err:?}");
    }
}
