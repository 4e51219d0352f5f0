use std::env;
use std::path::Path;
use std::time::Instant;

use huffman_codec::files::{codes_path, compress_file};
use log::{error, info};

const DEFAULT_OUTPUT: &str = "output.huff";

struct Args<'a> {
    input: &'a str,
    output: &'a str,
    force: bool,
}

/// Accepts `<input_file> [output_file]` with `--force` anywhere.
fn parse_args(args: &[String]) -> Option<Args<'_>> {
    let force = args.iter().any(|a| a == "--force");
    let mut paths = args.iter().filter(|a| *a != "--force");

    let input = paths.next()?;
    let output = paths.next().map_or(DEFAULT_OUTPUT, |s| s.as_str());
    if paths.next().is_some() || [input.as_str(), output].iter().any(|p| p.starts_with("--")) {
        return None;
    }

    Some(Args {
        input: input.as_str(),
        output,
        force,
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(Args {
        input: input_filepath,
        output: output_filepath,
        force,
    }) = parse_args(args.get(1..).unwrap_or_default())
    else {
        error!("Usage: {} <input_file> [output_file] [--force]", args[0]);
        eprintln!("  📂 <input_file>:  path to the file to encode.");
        eprintln!("  💾 [output_file]: path to write the encoded output (default '{}').", DEFAULT_OUTPUT);
        eprintln!("                    The code table is written next to it with a '.codes' suffix.");
        eprintln!("  --force:          overwrite existing output files.");
        std::process::exit(1);
    };

    let output = Path::new(output_filepath);
    let codes = codes_path(output);
    if !force {
        for path in [output, codes.as_path()] {
            if path.exists() {
                error!(
                    "Output file {} already exists, pass --force to overwrite it.",
                    path.display()
                );
                std::process::exit(1);
            }
        }
    }

    info!("--- Start Encoding ---");
    let start_time = Instant::now();

    let report = match compress_file(Path::new(input_filepath), output) {
        Ok(report) => report,
        Err(e) => {
            error!("Encoding failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!(
        "\r\n✅ Encoding successful.\n\
         📂  Input:       {} ({} bytes)\n\
         💾  Output:      {} ({} bytes)\n\
         📖  Code table:  {} ({} bytes, {} symbols)\n\
         ℹ️  Entropy:     {:.4} bits/symbol\n\
         🗜️  Ratio:       {:.2}%\n\
         ⏱️  Time:        {:.2?}",
        input_filepath,
        report.original_size,
        output_filepath,
        report.compressed_size,
        codes.display(),
        report.codes_size,
        report.distinct_symbols,
        report.entropy,
        report.ratio(),
        start_time.elapsed()
    );

    info!("--- End ---");
}
