//! Block command implementation
//!
//! Report the function, method or class enclosing a position.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::app::App;
use crate::cli::ParsedLocation;
use crate::cli::response::{BlockOutput, BlockResponse};
use crate::services::block::BlockQuery;
use crate::services::editor::SessionEditor;
use crate::services::navigator::BlockOutcome;

#[derive(Args, Debug)]
pub struct BlockArgs {
    /// File path with position (file:line[:column])
    pub location: String,

    /// Look for the enclosing class instead of the enclosing function
    #[arg(long)]
    pub class: bool,

    /// Saved documentSymbol response (default: sidecar next to the file)
    #[arg(long)]
    pub symbols: Option<PathBuf>,

    /// Speak the block summary through the configured command
    #[arg(long)]
    pub speak: bool,
}

pub async fn execute(args: BlockArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let loc = ParsedLocation::parse_absolute(&args.location)?;
    let document = app.load_document(&loc.file).await?;
    loc.validate_position_with_content(&document.text)?;

    let query = if args.class {
        BlockQuery::Class
    } else {
        BlockQuery::Callable
    };

    let editor = Arc::new(SessionEditor::new(loc.position()));
    let handle = app.navigator(app.provider(args.symbols.as_deref()), editor, args.speak);

    let outcome = handle.navigator.current_block(&document, query).await;
    if args.speak
        && let BlockOutcome::Found(block) = &outcome
    {
        handle.navigator.announce_block(block).await;
    }
    handle.navigator.settle().await;

    let (block, message) = match &outcome {
        BlockOutcome::Found(block) => (Some(BlockOutput::from(block)), None),
        other => (None, Some(other.message())),
    };

    ctx.print_success_flat(BlockResponse {
        file: ctx.relative_path(&loc.file),
        query: query.label(),
        found: block.is_some(),
        block,
        message,
        announced: handle.transcript.take().await,
    });

    Ok(())
}
