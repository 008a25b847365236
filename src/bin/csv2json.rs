//! CSV to JSON transducer command line tool.
//!
//! ```text
//! $ csv2json --columns id,name,email --pack-size 64 in.csv out.json
//! $ csv2json --columns city,population in.csv        # JSON on stdout
//! ```
//!
//! Exit codes: 0 success, 2 invalid argument, 3 malformed input,
//! 1 anything else.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use parabit::{Error, Target};

#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Opt {
    #[arg(long = "pack-size", default_value = "64", help = "Scanner pack size in bits")]
    pack_size: usize,

    #[arg(
        long,
        required = true,
        use_value_delimiter = true,
        help = "Comma separated column names, in field order"
    )]
    columns: Vec<String>,

    #[arg(long, default_value = "json", help = "Output format")]
    target: String,

    #[arg(short = 'v', default_value = "0", help = "Verbosity. Repeatable")]
    verbose: usize,

    #[arg(help = "Input CSV file")]
    input: PathBuf,

    #[arg(help = "Output file. Omit to write to stdout")]
    output: Option<PathBuf>,
}

fn run(opt: &Opt) -> parabit::Result<()> {
    let target: Target = opt.target.parse()?;
    let csv = std::fs::read(&opt.input)?;
    let json = parabit::transduce_to(target, opt.pack_size, &opt.columns, &csv)?;
    match &opt.output {
        Some(path) => write_atomic(path, &json)?,
        None => std::io::stdout().write_all(&json)?,
    }
    Ok(())
}

/// Write through a temporary file in the destination directory, so a
/// failed run never leaves a half-written output behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> parabit::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| Error::from(e.error))?;
    Ok(())
}

fn main() -> ExitCode {
    let opt = Opt::parse();
    stderrlog::new()
        .module(module_path!())
        .module("parabit")
        .verbosity(opt.verbose)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
        .expect("logger init");

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("csv2json: {e}");
            let code = match e {
                Error::InvalidArgument(_) | Error::UnsupportedTarget(_) => 2,
                Error::InvalidInput(_) | Error::MalformedRow(_) => 3,
                Error::Internal(_) | Error::Io(_) => 1,
            };
            ExitCode::from(code)
        }
    }
}
