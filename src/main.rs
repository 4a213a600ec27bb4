use ddlsynth::dialect::Dialect;
use ddlsynth::render_document;
use ddlsynth::synth::Synthesizer;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <request.json> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>          Output file (default: stdout)");
        eprintln!("  --dialect-version <version>  Server major version (default: 3)");
        eprintln!("  --quote-all                  Quote every identifier");
        eprintln!("  -v, --verbose                Debug logging");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut dialect = Dialect::default();
    let mut verbose = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "--dialect-version" => {
                i += 1;
                if i < args.len() {
                    let parsed = Dialect::from_version_str(&args[i]).unwrap_or_else(|| {
                        eprintln!("Invalid dialect version: {}", args[i]);
                        process::exit(1);
                    });
                    dialect.version = parsed.version;
                }
            }
            "--quote-all" => dialect.always_quote = true,
            "-v" | "--verbose" => verbose = true,
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let synth = Synthesizer::new(dialect);
    log::debug!(
        "dialect version {}, quote all: {}",
        synth.dialect().version,
        synth.dialect().always_quote
    );
    let sql = match render_document(&input, &synth) {
        Ok(sql) => sql,
        Err(e) => {
            eprintln!("{}: {}", input_path, e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &sql) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", sql),
    }
}
