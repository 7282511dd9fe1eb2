use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdf_demos::{finish, init_logging, page_text, render};
use pdf_layout::{DocumentKind, PlainTextRecords, RecordSet};

/// Render the contents of a text file as one line of Helvetica 12.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct CliArguments {
    /// Falls back to built-in text when unreadable or zero bytes long
    #[arg(value_name = "text_file", default_value = "text/hello_world.txt")]
    input: PathBuf,
    #[arg(value_name = "output_pdf", default_value = "text_example.pdf")]
    output: PathBuf,
    /// Flate-compress page content streams
    #[arg(long)]
    compress: bool,
}

fn main() -> ExitCode {
    init_logging();
    let arguments = CliArguments::parse();
    log::debug!("{:?}", arguments);

    let content = match fs::read_to_string(&arguments.input) {
        Ok(content) => {
            if content.is_empty() {
                log::info!("{:?} is empty, using built-in text", arguments.input);
            }
            Some(content)
        }
        Err(error) => {
            log::info!(
                "could not read {:?} ({}), using built-in text",
                arguments.input,
                error
            );
            None
        }
    };
    let text = page_text(content);

    let records = PlainTextRecords { text };
    finish(render(
        DocumentKind::PlainText,
        RecordSet::PlainText(&records),
        &arguments.output,
        arguments.compress,
    ))
}
