//! Jump command implementation
//!
//! Move from a position to the next or previous definition.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::app::App;
use crate::cli::ParsedLocation;
use crate::cli::response::{JumpResponse, MoveOutput};
use crate::services::editor::{EditorControl, SessionEditor};
use crate::services::navigator::Direction;

#[derive(Args, Debug)]
pub struct JumpArgs {
    /// next or prev
    pub direction: Direction,

    /// File path with position (file:line[:column])
    pub location: String,

    /// Saved documentSymbol response (default: sidecar next to the file)
    #[arg(long)]
    pub symbols: Option<PathBuf>,

    /// Speak the target name through the configured command
    #[arg(long)]
    pub speak: bool,
}

pub async fn execute(args: JumpArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let loc = ParsedLocation::parse_absolute(&args.location)?;
    let document = app.load_document(&loc.file).await?;
    loc.validate_position_with_content(&document.text)?;

    let editor = Arc::new(SessionEditor::new(loc.position()));
    let handle = app.navigator(
        app.provider(args.symbols.as_deref()),
        editor.clone(),
        args.speak,
    );

    let outcome = handle
        .navigator
        .move_cursor_to_symbol(&document, args.direction)
        .await;
    handle.navigator.settle().await;

    ctx.print_success_flat(JumpResponse {
        file: ctx.relative_path(&loc.file),
        direction: args.direction.to_string(),
        result: MoveOutput::new(&outcome, editor.active_cursor()),
        announced: handle.transcript.take().await,
    });

    Ok(())
}
