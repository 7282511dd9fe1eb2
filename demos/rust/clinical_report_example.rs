use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdf_demos::{finish, init_logging, records_or, render, sample_clinical_report, RenderOptions};
use pdf_layout::{DocumentKind, RecordSet};

/// Render an ultrasound report with letterhead, findings and signatures.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct CliArguments {
    #[arg(value_name = "output_pdf", default_value = "clinical_report_example.pdf")]
    output: PathBuf,
    #[command(flatten)]
    options: RenderOptions,
}

fn main() -> ExitCode {
    init_logging();
    let arguments = CliArguments::parse();
    log::debug!("{:?}", arguments);

    finish(
        records_or(&arguments.options, sample_clinical_report).and_then(|report| {
            render(
                DocumentKind::ClinicalReport,
                RecordSet::ClinicalReport(&report),
                &arguments.output,
                arguments.options.compress,
            )
        }),
    )
}
