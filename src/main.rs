use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;
use tabmaker::{render_document, Key, RenderOptions, TabDocument, TabError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Render a tab script (chords as scale degrees, pitches, lyrics) in any key.
#[derive(Parser, Debug)]
#[command(name = "tabmaker", version, about)]
struct Cli {
    /// Tab document: .json, .yaml/.yml, or a script with optional frontmatter
    #[arg(required_unless_present = "list_keys")]
    input: Option<PathBuf>,

    /// Key to view the tab in (defaults to the document's original key)
    #[arg(short, long)]
    key: Option<String>,

    /// Show pitch markers under the chords
    #[arg(long)]
    show_pitch: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// List the supported keys and exit
    #[arg(long)]
    list_keys: bool,
}

fn run(cli: &Cli) -> Result<(), TabError> {
    if cli.list_keys {
        for key in Key::ALL {
            println!("{}\t{}", key, key.scale().join(" "));
        }
        return Ok(());
    }

    let Some(input) = &cli.input else {
        return Ok(());
    };
    let doc = TabDocument::load(input)?;
    let key = doc.select_key(cli.key.as_deref())?;
    let options = RenderOptions {
        show_pitch: cli.show_pitch,
    };

    match cli.format {
        Format::Text => print!("{}", render_document(&doc, key, &options)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&doc.view(key))?),
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
