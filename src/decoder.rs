use std::env;

use log::{error, info};

use huffpack::cli::parse_decode_args;
use huffpack::decompress_file;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_decode_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(e) => {
            error!("{}", e);
            eprintln!(
                "Usage: {} <input_file> <output_file>",
                args.first().map_or("decode", String::as_str)
            );
            eprintln!("  📂 <input_file>:  path to the encoded file.");
            eprintln!("  💾 <output_file>: path to write the decoded output.");
            std::process::exit(1);
        }
    };

    info!("--- Start Decoding ---");

    let report = match decompress_file(&options.input, &options.output) {
        Ok(report) => report,
        Err(e) => {
            error!("Decoding failed: {}", e);
            std::process::exit(1);
        }
    };

    let ratio = if report.output_bytes > 0 {
        100.0 * (1.0 - (report.input_bytes as f64) / (report.output_bytes as f64))
    } else {
        0.0
    };

    println!(
        "\r\n✅ decoding successful.\n\
         📂 input file:        {} ({} bytes)\n\
         💾 output file:       {} ({} bytes)\n\
         🔣 alphabet:          {:?}\n\
         🗜️ compression ratio: {:.2}% (relative to decoded output)",
        options.input.display(),
        report.input_bytes,
        options.output.display(),
        report.output_bytes,
        report.symbols,
        ratio
    );

    info!("--- End ---");
}
