use std::io::Read as _;
use std::process;

use serde::Serialize;

use lipi_core::{Options, Transliterator};

#[derive(Serialize)]
struct WordPair<'a> {
    source: &'a str,
    result: &'a str,
}

fn require_scheme(engine: &Transliterator, name: &str) {
    if engine.store().get(name).is_none() {
        eprintln!(
            "Unknown scheme '{}'. Run `lipitool schemes` for the available names.",
            name
        );
        process::exit(1);
    }
}

/// Read the positional text, or stdin when it is "-".
fn input_text(text: &str) -> String {
    if text != "-" {
        return text.to_string();
    }
    let mut data = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut data) {
        eprintln!("Error reading stdin: {}", e);
        process::exit(1);
    }
    data
}

#[allow(clippy::too_many_arguments)]
pub fn convert_cmd(
    text: &str,
    from: &str,
    to: &str,
    skip_sgml: bool,
    syncope: bool,
    wordwise: bool,
    json: bool,
) {
    let engine = Transliterator::with_bundled_schemes();
    require_scheme(&engine, from);
    require_scheme(&engine, to);

    let options = Options {
        skip_sgml,
        syncope,
        ..Options::default()
    };
    let data = input_text(text);

    if !wordwise {
        println!(
            "{}",
            engine.transliterate_with(data.trim_end_matches('\n'), from, to, &options)
        );
        return;
    }

    let pairs = engine.transliterate_wordwise_with(data.trim_end_matches('\n'), from, to, &options);
    if json {
        let pairs: Vec<WordPair> = pairs
            .iter()
            .map(|(source, result)| WordPair { source, result })
            .collect();
        match serde_json::to_string_pretty(&pairs) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error encoding JSON: {}", e);
                process::exit(1);
            }
        }
    } else {
        for (source, result) in &pairs {
            println!("{}\t{}", source, result);
        }
    }
}
