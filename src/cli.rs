use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookpage")]
#[command(about = "Build a Markdown book into a single navigable HTML page")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output directory for built pages
    #[arg(short, long, global = true, default_value = "./build")]
    pub output: PathBuf,

    /// Directory holding <name>.md books and _header.md/_footer.md partials
    #[arg(long, global = true, default_value = "docs/books")]
    pub books_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build one book, or every book with --all
    Build(BuildArgs),

    /// Print a book's numbered outline without writing HTML
    Outline(OutlineArgs),

    /// List the books found in the books directory
    List,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Book name (docs/books/<BOOK>.md)
    #[arg(value_name = "BOOK", required_unless_present = "all", conflicts_with = "all")]
    pub book: Option<String>,

    /// Build every book in the books directory
    #[arg(long)]
    pub all: bool,

    /// Open the built page in a browser
    #[arg(long)]
    pub open: bool,

    /// Minify the generated HTML
    #[arg(long)]
    pub release: bool,

    /// Handlebars page template replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Extra stylesheet appended to the page CSS
    #[arg(long, value_name = "FILE")]
    pub stylesheet: Option<PathBuf>,

    /// Code highlighting theme
    #[arg(long, default_value = "InspiredGitHub")]
    pub theme: String,
}

#[derive(Args)]
pub struct OutlineArgs {
    /// Book name (docs/books/<BOOK>.md)
    #[arg(required = true, value_name = "BOOK")]
    pub book: String,

    /// Write the document model to a JSON file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,
}
