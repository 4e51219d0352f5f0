use std::env;
use std::path::Path;
use std::time::Instant;

use huffman_codec::files::{codes_path, decompress_file};
use log::{error, info};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let force = args.iter().skip(1).any(|a| a == "--force");
    let paths: Vec<&String> = args.iter().skip(1).filter(|a| *a != "--force").collect();

    if paths.len() != 2 || paths.iter().any(|p| p.starts_with("--")) {
        error!("Usage: {} <input_file> <output_file> [--force]", args[0]);
        eprintln!("  📂 <input_file>:  path to the encoded file (its '.codes' table must sit next to it).");
        eprintln!("  💾 <output_file>: path to write the decoded output.");
        eprintln!("  --force:          overwrite an existing output file.");
        std::process::exit(1);
    }

    let input_filepath = paths[0];
    let output_filepath = paths[1];
    let output = Path::new(output_filepath);

    if output.exists() && !force {
        error!(
            "Output file {} already exists, pass --force to overwrite it.",
            output.display()
        );
        std::process::exit(1);
    }

    info!("--- Start Decoding ---");
    let start_time = Instant::now();

    let report = match decompress_file(Path::new(input_filepath), output) {
        Ok(report) => report,
        Err(e) => {
            error!("Decoding failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!(
        "\r\n✅ decoding successful.\n\
         📂 input file:        {} ({} bytes)\n\
         📖 code table:        {}\n\
         💾 output file:       {} ({} bytes)\n\
         🗜️ compression ratio: {:.2}%\n\
         ⏱️ time:              {:.2?}",
        input_filepath,
        report.compressed_size,
        codes_path(Path::new(input_filepath)).display(),
        output_filepath,
        report.output_size,
        report.ratio(),
        start_time.elapsed()
    );

    info!("--- End ---");
}
