//! `exact-lu`: computes the exact LU decomposition of a matrix given on the command line.
//!
//! ```text
//! exact-lu [--pivoting none|greatest|magnitude] "4 3; 6 3"
//! ```
//!
//! Rows are separated by `;`, elements by whitespace. Elements use the scalar syntax `a`, `-a`,
//! `a/b` or `-a/b`. If `--pivoting` is not given, the `EXACT_LINALG_PIVOTING` environment variable
//! is consulted, and pivoting by magnitude is used if that is unset too. `RUST_LOG` configures
//! logging as usual.

use std::env::{self, VarError};

use anyhow::{bail, Context};
use exact_linalg::{lu_decompose, Matrix, Pivoting, Scalar, Vector};
use log::LevelFilter;

const PIVOTING_VAR: &str = "EXACT_LINALG_PIVOTING";

const USAGE: &str = "usage: exact-lu [--pivoting none|greatest|magnitude] \"<row>; <row>; ...\"";

fn main() -> anyhow::Result<()> {
    init_logger();

    let mut pivoting = None;
    let mut input = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            "--pivoting" => {
                let value = args.next().context("`--pivoting` requires a value")?;
                pivoting = Some(value.parse::<Pivoting>()?);
            }
            _ if input.is_none() => input = Some(arg),
            _ => bail!("unexpected argument `{arg}`\n{USAGE}"),
        }
    }

    let Some(input) = input else {
        bail!("no matrix given\n{USAGE}");
    };
    let pivoting = match pivoting {
        Some(pivoting) => pivoting,
        None => pivoting_from_env()?,
    };

    let matrix = parse_matrix(&input)?;
    log::debug!("input is a {}x{} matrix", matrix.rows(), matrix.columns());

    let lu = lu_decompose(&matrix, pivoting)
        .with_context(|| format!("failed to decompose matrix\n{matrix}"))?;

    println!("P =\n{}\n", lu.p);
    println!("L =\n{}\n", lu.l);
    println!("U =\n{}", lu.u);
    Ok(())
}

fn init_logger() {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .filter(Some("exact_linalg"), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

fn pivoting_from_env() -> anyhow::Result<Pivoting> {
    match env::var(PIVOTING_VAR) {
        Ok(v) => v
            .parse()
            .with_context(|| format!("invalid value set for `{PIVOTING_VAR}` variable")),
        Err(VarError::NotPresent) => Ok(Pivoting::default()),
        Err(VarError::NotUnicode(s)) => bail!(
            "invalid value set for `{PIVOTING_VAR}` variable: {}",
            s.to_string_lossy()
        ),
    }
}

/// Parses `"a b; c d"` into a matrix. Empty rows (eg. from a trailing `;`) are skipped.
fn parse_matrix(s: &str) -> anyhow::Result<Matrix> {
    let rows = s
        .split(';')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .enumerate()
        .map(|(i, row)| {
            row.split_whitespace()
                .map(str::parse::<Scalar>)
                .collect::<Result<Vector, _>>()
                .with_context(|| format!("invalid element in row {i}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Matrix::from_rows(rows)?)
}
