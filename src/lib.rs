#![warn(missing_docs)]
/*! Parallel-bitstream CSV to JSON transducer.

This crate transduces a CSV document into a pretty-printed JSON array of
objects without running a byte-at-a-time state machine. Instead, in the
style of [Parabix][parabix], the document is transposed into eight
parallel bit streams and the whole transformation is expressed as bitwise
operations over those streams: character-class marker construction,
pack-wise scanning, parallel extract (PEXT) and parallel deposit (PDEP).
On real hardware each of these maps onto SIMD instructions; here they run
over growable `u64` pack vectors, so the crate is an algorithmic model
rather than a performance play.

# Architecture overview

Input flows through a fixed pipeline of stages, each consuming bit
streams produced earlier:

```text
      [ CSV bytes ]
           ↓
     [ Transpose ]            8 basis bit streams
           ↓
   [ ClassCompiler ]          delimiter / field marker streams
           ↓
    [ PackIndexer ]           one bit per non-empty pack
           ↓
 [ FieldWidthScanner ]        width in bytes of every field
        ↓       ↓
[ TemplateBuilder ] [ DepositMaskBuilder ]
        ↓       ↓
  [ PextPdepEngine ]          extract field bits, deposit into template
           ↓
     [ JSON bytes ]
```

A [`Validator`](validate) sits before the scanner and rejects documents
that do not form complete rows. All stages run to completion one after
the other; the only parallelism is the engine fanning the eight
independent basis planes out over a rayon pool.

# Example

```
use parabit::transduce;

let json = transduce(64, &["city", "population"], b"oslo,700000\n")?;
assert_eq!(
    String::from_utf8(json).unwrap(),
    "[\n    {\n        \"city\": oslo,\n        \"population\": 700000\n    }\n]",
);
# Ok::<(), parabit::Error>(())
```

Note that field values are deposited into the output verbatim, without
quoting or escaping; producing strictly valid JSON for arbitrary field
contents would take an extra escaping pass. Numeric fields come out as
valid JSON, arbitrary text may not.

[parabix]: https://parabix.costar.sfu.ca/
 */

pub mod bitstream;
pub mod charclass;
pub mod deposit;
pub mod field_width;
pub mod pack_index;
pub mod pext_pdep;
pub mod target;
pub mod template;
pub mod transducer;
pub mod transpose;
pub mod validate;

pub use bitstream::{BasisBits, BitStream};
pub use target::Target;
pub use transducer::{transduce, transduce_to};

/// Crate error type. All errors are fatal to the current transduction;
/// nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied parameter is out of range, e.g. a pack size
    /// that is not a positive power of two.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The document or column list cannot be interpreted at all, e.g.
    /// invalid UTF-8 or an empty column list.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The document does not form complete rows: missing terminal
    /// newline, field count not matching the column count, or a stray
    /// delimiter pattern.
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// The requested output format is recognised but not implemented.
    #[error("unsupported target format: {0}")]
    UnsupportedTarget(Target),

    /// An inter-stage invariant was violated. This is a bug in an
    /// upstream stage, not a problem with the input.
    #[error("internal invariant violated: {0}")]
    Internal(String),

    /// I/O failure in a collaborator (file read/write in the CLI).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
