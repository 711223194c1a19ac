mod cli;

use anyhow::Context;
use bookpage::{BookBuilder, BookError, BookSource, BuildConfig, Result};
use clap::Parser;
use cli::{BuildArgs, Cli, Commands, OutlineArgs};
use std::path::Path;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Build(args) => handle_build_command(args, &cli.books_dir, &cli.output).await,
        Commands::Outline(args) => handle_outline_command(args, &cli.books_dir).await,
        Commands::List => handle_list_command(&cli.books_dir),
    };

    if let Err(e) = result {
        if e.is_structural() {
            error!("Book structure is invalid: {}", e);
        } else {
            error!("Operation failed: {}", e);
        }
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn handle_build_command(args: &BuildArgs, books_dir: &Path, output_dir: &Path) -> Result<()> {
    let config = BuildConfig {
        books_dir: books_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        template: args.template.clone(),
        stylesheet: args.stylesheet.clone(),
        theme: args.theme.clone(),
        release: args.release,
        open: args.open,
    };
    let builder = BookBuilder::new(config);

    let results = match &args.book {
        Some(book) if !args.all => vec![builder.build(book).await?],
        _ => builder.build_all().await?,
    };

    for result in &results {
        info!(
            "Built '{}': {} sections, {} headings -> {}",
            result.book,
            result.sections,
            result.headings,
            result.output_file.display()
        );
    }

    info!("Build completed successfully ({} books)", results.len());
    Ok(())
}

async fn handle_outline_command(args: &OutlineArgs, books_dir: &Path) -> Result<()> {
    let config = BuildConfig {
        books_dir: books_dir.to_path_buf(),
        ..Default::default()
    };
    let model = BookBuilder::new(config).outline(&args.book).await?;

    println!("\n=== Outline for '{}' ===", model.main_title.text);
    println!("Sections: {}", model.sections.len());
    println!("Headings: {}", model.summary.len());
    println!();

    for heading in model.summary.iter().filter(|h| !h.is_title()) {
        let indent = "  ".repeat(heading.depth - 2);
        println!("{}{} {}  #{}", indent, heading.numbering, heading.text, heading.slug);
    }

    if let Some(json_path) = &args.json_output {
        let json_content = serde_json::to_string_pretty(&model)
            .context("Failed to serialize document model")?;

        tokio::fs::write(json_path, json_content)
            .await
            .map_err(|e| BookError::Write {
                path: json_path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!("Document model written to: {}", json_path.display());
    }

    Ok(())
}

fn handle_list_command(books_dir: &Path) -> Result<()> {
    let books = BookSource::discover(books_dir)?;

    if books.is_empty() {
        println!("No books found in {}", books_dir.display());
        return Ok(());
    }

    for book in books {
        println!("{}", book);
    }
    Ok(())
}
