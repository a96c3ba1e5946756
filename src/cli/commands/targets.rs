//! Targets command implementation
//!
//! List every jump target of a file in document order.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::app::App;
use crate::cli::absolute_file;
use crate::cli::response::{TargetOutput, TargetsResponse};
use crate::services::editor::SessionEditor;

#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Source file
    pub file: PathBuf,

    /// Saved documentSymbol response (default: sidecar next to the file)
    #[arg(long)]
    pub symbols: Option<PathBuf>,
}

pub async fn execute(args: TargetsArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let file = absolute_file(&args.file)?;
    let document = app.load_document(&file).await?;

    let handle = app.navigator(
        app.provider(args.symbols.as_deref()),
        Arc::new(SessionEditor::default()),
        false,
    );

    match handle.navigator.jump_targets(&document).await {
        Ok(source) => {
            let targets: Vec<TargetOutput> =
                source.targets().iter().map(TargetOutput::from).collect();
            ctx.print_success_flat(TargetsResponse {
                file: ctx.relative_path(&file),
                count: targets.len(),
                degraded: source.is_degraded(),
                targets,
            });
        }
        Err(e) => ctx.print_error(&e.to_string()),
    }

    Ok(())
}
