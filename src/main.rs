//! codetint - colorize source code from the command line
//!
//! Reads a source file, tokenizes it with the rules for its language,
//! and writes syntax-highlighted HTML (or ANSI-colored text) to stdout
//! or a file.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use codetint::{render_ansi, Colorizer, ColorizerError, Result, RulesCollection, Theme};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Parsed command line arguments
struct CliArgs {
    input: Option<PathBuf>,
    language: Option<String>,
    rules_file: Option<PathBuf>,
    output: Option<PathBuf>,
    ansi: bool,
    page: bool,
    symbols: bool,
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    let args = parse_args(&args[1..])?;

    let collection = match &args.rules_file {
        Some(path) => RulesCollection::load(path)?,
        None => RulesCollection::with_builtin(),
    };

    let input = args
        .input
        .ok_or_else(|| ColorizerError::Message("no input file (try --help)".to_string()))?;

    let rules = match &args.language {
        Some(name) => collection
            .get(name)
            .ok_or_else(|| ColorizerError::UnknownLanguage(name.clone()))?,
        None => collection.detect(&input).ok_or_else(|| {
            ColorizerError::Message(format!(
                "cannot detect language for '{}'; use --language",
                input.display()
            ))
        })?,
    };

    let mut colorizer = Colorizer::new(rules)?;
    colorizer.keyword_class = Some("keyword".to_string());
    colorizer.symbol_class = Some("symbol".to_string());
    colorizer.string_class = Some("string".to_string());
    colorizer.operator_class = Some("operator".to_string());
    colorizer.comment_class = Some("comment".to_string());
    colorizer.options.unclassified_to_symbols = args.symbols;

    let source = fs::read_to_string(&input)?;

    let output = if args.ansi {
        render_ansi(&colorizer, &Theme::default(), &source)
    } else {
        let body = colorizer.transform(&source);
        if args.page {
            build_page(&body)
        } else {
            body
        }
    };

    match &args.output {
        Some(path) => fs::write(path, output)?,
        None => print!("{}", output),
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs {
        input: None,
        language: None,
        rules_file: None,
        output: None,
        ansi: false,
        page: false,
        symbols: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-l" | "--language" => {
                parsed.language = Some(next_value(&mut iter, arg)?);
            }
            "-r" | "--rules" => {
                parsed.rules_file = Some(PathBuf::from(next_value(&mut iter, arg)?));
            }
            "-o" | "--output" => {
                parsed.output = Some(PathBuf::from(next_value(&mut iter, arg)?));
            }
            "--ansi" => parsed.ansi = true,
            "--page" => parsed.page = true,
            "--symbols" => parsed.symbols = true,
            _ if arg.starts_with('-') => {
                return Err(ColorizerError::Message(format!(
                    "unknown option '{}' (try --help)",
                    arg
                )));
            }
            _ => {
                if parsed.input.is_some() {
                    return Err(ColorizerError::Message(
                        "more than one input file given".to_string(),
                    ));
                }
                parsed.input = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(parsed)
}

fn next_value(iter: &mut std::slice::Iter<String>, option: &str) -> Result<String> {
    iter.next().cloned().ok_or_else(|| {
        ColorizerError::Message(format!("option '{}' requires a value", option))
    })
}

/// Wrap colorized markup in a minimal standalone HTML page
fn build_page(body: &str) -> String {
    format!(
        "<html>\n<head>\n<style>\n\
         .keyword {{ color: blue; }}\n\
         .symbol {{ color: purple; }}\n\
         .string {{ color: red; }}\n\
         .operator {{ color: black; }}\n\
         .comment {{ color: green; }}\n\
         </style>\n</head>\n<body>\n<pre>\n{}</pre>\n</body>\n</html>\n",
        body
    )
}

fn print_usage() {
    println!(
        "codetint {} - rule-driven source code syntax colorizer",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage: codetint [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -l, --language NAME  Language to colorize as (default: detect from extension)");
    println!("  -r, --rules FILE     Load language rules from a TOML file");
    println!("  -o, --output FILE    Write output to FILE instead of stdout");
    println!("      --ansi           Emit ANSI-colored text instead of HTML");
    println!("      --page           Wrap HTML output in a standalone page");
    println!("      --symbols        Classify unlisted identifiers as symbols");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
}

fn print_version() {
    println!("codetint {}", env!("CARGO_PKG_VERSION"));
}
