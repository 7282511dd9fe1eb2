use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdf_demos::{finish, init_logging, records_or, render, sample_invoice, RenderOptions};
use pdf_layout::{DocumentKind, RecordSet};

/// Render a single-page invoice with provider block, item table and totals.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct CliArguments {
    #[arg(value_name = "output_pdf", default_value = "invoice_example.pdf")]
    output: PathBuf,
    #[command(flatten)]
    options: RenderOptions,
}

fn main() -> ExitCode {
    init_logging();
    let arguments = CliArguments::parse();
    log::debug!("{:?}", arguments);

    finish(records_or(&arguments.options, sample_invoice).and_then(|invoice| {
        render(
            DocumentKind::Invoice,
            RecordSet::Invoice(&invoice),
            &arguments.output,
            arguments.options.compress,
        )
    }))
}
