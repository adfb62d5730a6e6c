//! Overlap command implementation.
//!
//! Compares schemes by the stocks they hold in common.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundscope_ext_file::matrix_to_csv_string;
use fundscope_holdings::{compute_scheme_overlap, OverlapPair, OverlapPairRecord, SchemeOverlap};

use crate::commands::{truncate, validate_top, InputArgs, RunContext};
use crate::output::{print_grid, print_header};

/// Arguments for the overlap command.
#[derive(Args, Debug)]
pub struct OverlapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show the scheme × scheme matrix of common stock counts instead of pairs
    #[arg(long)]
    pub matrix: bool,

    /// Show at most N pairs, most similar first
    #[arg(short = 'n', long, value_name = "N", conflicts_with = "matrix")]
    pub top: Option<usize>,

    /// Hide pairs with fewer common stocks
    #[arg(long, value_name = "N", default_value = "0", conflicts_with = "matrix")]
    pub min_common: usize,
}

/// Table view of an overlap pair.
#[derive(Tabled)]
pub struct OverlapRow {
    #[tabled(rename = "Scheme A")]
    scheme_a: String,
    #[tabled(rename = "Scheme B")]
    scheme_b: String,
    #[tabled(rename = "Common")]
    common: usize,
    #[tabled(rename = "Jaccard")]
    jaccard: String,
    #[tabled(rename = "Common Stocks")]
    stocks: String,
}

impl From<&OverlapPair> for OverlapRow {
    fn from(pair: &OverlapPair) -> Self {
        Self {
            scheme_a: pair.scheme_a.clone(),
            scheme_b: pair.scheme_b.clone(),
            common: pair.common_stock_count,
            jaccard: format!("{:.4}", pair.jaccard),
            stocks: pair.common_stocks.join(", "),
        }
    }
}

/// JSON layout of the overlap matrix.
#[derive(Serialize)]
struct MatrixDocument<'a> {
    schemes: &'a [String],
    matrix: &'a [Vec<usize>],
}

/// Execute the overlap command.
pub fn execute(args: OverlapArgs, ctx: &RunContext) -> Result<()> {
    let top = validate_top(args.top)?;
    let rows = ctx.load_rows(&args.input)?;
    let overlap = compute_scheme_overlap(&rows, ctx.aggregator())?;

    if args.matrix {
        return emit_matrix(&overlap, ctx);
    }

    let pairs: Vec<&OverlapPair> = overlap
        .pairs_by_similarity()
        .into_iter()
        .filter(|p| p.common_stock_count >= args.min_common)
        .collect();
    let pairs = truncate(pairs, top);

    let records: Vec<OverlapPairRecord> = pairs.iter().map(|p| OverlapPairRecord::from(*p)).collect();
    let table: Vec<OverlapRow> = pairs.iter().map(|p| OverlapRow::from(*p)).collect();
    ctx.output().emit("Scheme Overlap", &records, &table)
}

fn emit_matrix(overlap: &SchemeOverlap, ctx: &RunContext) -> Result<()> {
    let output = ctx.output();

    if output.is_table() {
        if !ctx.quiet {
            print_header("Overlap Matrix (common stocks)");
        }
        let mut header = vec![String::new()];
        header.extend(overlap.schemes.iter().cloned());
        let rows = overlap
            .schemes
            .iter()
            .zip(&overlap.matrix)
            .map(|(scheme, counts)| {
                let mut row = vec![scheme.clone()];
                row.extend(counts.iter().map(ToString::to_string));
                row
            })
            .collect();
        print_grid(header, rows);
        return Ok(());
    }

    let document = MatrixDocument {
        schemes: &overlap.schemes,
        matrix: &overlap.matrix,
    };
    output.emit_document(&document, Some(matrix_to_csv_string(overlap)?))
}
