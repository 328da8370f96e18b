//! CLI entry point for image quilting texture synthesis

use clap::Parser;
use quiltex::io::cli::{Cli, FileProcessor};

fn main() -> quiltex::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
