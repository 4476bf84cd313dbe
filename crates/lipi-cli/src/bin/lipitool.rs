use clap::{Parser, Subcommand};

use lipi_cli::commands::{convert_ops, scheme_ops};

#[derive(Parser)]
#[command(name = "lipitool", about = "Transliterate text between Indic writing schemes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate text (pass "-" to read stdin)
    Convert {
        text: String,
        /// Source scheme name
        #[arg(long)]
        from: String,
        /// Destination scheme name
        #[arg(long)]
        to: String,
        /// Pass <...> tags through unmodified
        #[arg(long)]
        skip_sgml: bool,
        /// Leave bare consonants without a virama
        #[arg(long)]
        syncope: bool,
        /// Transliterate word by word, one pair per line
        #[arg(long)]
        wordwise: bool,
        /// With --wordwise, emit JSON
        #[arg(long)]
        json: bool,
    },
    /// List available schemes
    Schemes,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            text,
            from,
            to,
            skip_sgml,
            syncope,
            wordwise,
            json,
        } => convert_ops::convert_cmd(&text, &from, &to, skip_sgml, syncope, wordwise, json),
        Command::Schemes => scheme_ops::schemes_cmd(),
    }
}
