use std::env;

use log::{error, info};

use huffpack::cli::parse_encode_args;
use huffpack::compress_file;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_encode_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(e) => {
            error!("{}", e);
            eprintln!(
                "Usage: {} <input_file> [output_file] [--symbols=bytes|chars] [--print-codes]",
                args.first().map_or("encode", String::as_str)
            );
            eprintln!("  📂 <input_file>:  path to the file to encode.");
            eprintln!("  💾 [output_file]: path to write the container (default output.huff).");
            std::process::exit(1);
        }
    };

    info!("--- Start Encoding ({:?}) ---", options.symbols);

    let report = match compress_file(&options.input, &options.output, options.symbols) {
        Ok(report) => report,
        Err(e) => {
            error!("Encoding failed: {}", e);
            std::process::exit(1);
        }
    };

    if options.print_codes {
        println!("Huffman codes:");
        for (symbol, code) in &report.code_table {
            println!("  {:>10} => {}", symbol, code);
        }
    }

    if let Some(stats) = &report.stats {
        println!(
            "\r\n✅ Encoding successful.\n\
             📂  Input:       {} ({} bytes)\n\
             💾  Output:      {} ({} bytes)\n\
             🔣  Symbols:     {} ({} distinct)\n\
             ℹ️  Entropy:     {:.4} bits/symbol\n\
             📏  Avg. code:   {:.4} bits/symbol\n\
             🗜️  Ratio:       {:.4}%",
            options.input.display(),
            report.input_bytes,
            options.output.display(),
            report.output_bytes,
            stats.symbols,
            stats.distinct_symbols,
            stats.entropy,
            stats.average_code_length,
            stats.ratio()
        );
    }

    info!("--- End ---");
}
