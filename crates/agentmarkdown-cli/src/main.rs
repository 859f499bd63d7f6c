//! agentmarkdown CLI
//!
//! Converts an HTML file, or HTML piped on standard input, to Markdown.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use agentmarkdown::{AgentMarkdown, LayoutOptions};
use anyhow::{Context, Result};
use clap::Parser;

const EXIT_ERR_USAGE: u8 = 1;
const EXIT_ERR_CONVERTING: u8 = 2;
const EXIT_ERR_STDOUT: u8 = 3;

const USAGE: &str = "Usage: agentmarkdown [filePath]

An application to convert HTML to markdown.

  filePath: The file to use as input.

If no file arguments are specified, the standard input is used.
";

#[derive(Parser, Debug)]
#[command(name = "agentmarkdown", version, about = "An application to convert HTML to markdown.")]
struct Cli {
    /// The file to use as input. Standard input is used when omitted.
    file_path: Option<PathBuf>,

    /// Marker for unordered list items (`*`, `-` or `+`)
    #[arg(long, default_value_t = '*', value_parser = parse_bullet)]
    bullet: char,

    /// Text of a thematic break
    #[arg(long, default_value = "* * *", allow_hyphen_values = true)]
    hr: String,

    /// Fence written around preformatted blocks
    #[arg(long, default_value = "```")]
    fence: String,
}

impl Cli {
    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            bullet_list_marker: self.bullet,
            hr: self.hr.clone(),
            fence: self.fence.clone(),
            ..LayoutOptions::default()
        }
    }
}

fn parse_bullet(value: &str) -> std::result::Result<char, String> {
    match value {
        "*" | "-" | "+" => Ok(value.chars().next().unwrap_or('*')),
        _ => Err(format!("expected one of `*`, `-` or `+`, got `{value}`")),
    }
}

/// The HTML to convert, or `None` when there is nothing to read.
fn read_input(cli: &Cli) -> Result<Option<String>> {
    if let Some(path) = &cli.file_path {
        let html = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(Some(html));
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut html = String::new();
    stdin
        .read_to_string(&mut html)
        .context("failed to read standard input")?;
    Ok(if html.is_empty() { None } else { Some(html) })
}

fn convert(cli: &Cli) -> Result<Option<String>> {
    let Some(html) = read_input(cli)? else {
        return Ok(None);
    };
    let service = AgentMarkdown::with_options(cli.layout_options());
    let output = service.render(&html)?;
    Ok(Some(output.markdown))
}

fn write_stdout(markdown: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(markdown.as_bytes())?;
    stdout.flush()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let markdown = match convert(&cli) {
        Ok(Some(markdown)) => markdown,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::from(EXIT_ERR_USAGE);
        }
        Err(err) => {
            eprintln!("Error converting HTML to markdown.");
            eprintln!("{err:#}");
            return ExitCode::from(EXIT_ERR_CONVERTING);
        }
    };

    if let Err(err) = write_stdout(&markdown) {
        eprintln!("Error writing to stdout.");
        eprintln!("{err}");
        return ExitCode::from(EXIT_ERR_STDOUT);
    }
    ExitCode::SUCCESS
}
