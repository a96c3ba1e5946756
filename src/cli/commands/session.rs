//! Session command implementation
//!
//! Apply a stream of navigation steps against one persistent cursor.
//! Steps are read from stdin, one JSON object per line.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use serde::Deserialize;

use crate::app::App;
use crate::cli::response::{
    BlockOutput, MoveOutput, PositionOutput, SessionResponse, StepResult,
};
use crate::cli::{absolute_file, parse_line_col};
use crate::models::document::Document;
use crate::models::position::Position;
use crate::services::block::BlockQuery;
use crate::services::editor::{EditorControl, SessionEditor};
use crate::services::navigator::{BlockOutcome, Direction, Navigator};

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Source file
    pub file: PathBuf,

    /// Starting cursor (line[:column], 1-indexed)
    #[arg(long, default_value = "1:1")]
    pub at: String,

    /// Saved documentSymbol response (default: sidecar next to the file)
    #[arg(long)]
    pub symbols: Option<PathBuf>,

    /// Speak announcements through the configured command
    #[arg(long)]
    pub speak: bool,
}

/// A single session step
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionStep {
    Next,
    #[serde(alias = "prev")]
    Previous,
    Block {
        #[serde(default)]
        class: bool,
        #[serde(default)]
        speak: bool,
    },
    /// Place the cursor (1-indexed)
    Goto {
        line: u32,
        #[serde(default = "first_column")]
        column: u32,
    },
}

fn first_column() -> u32 {
    1
}

pub async fn execute(args: SessionArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let file = absolute_file(&args.file)?;
    let document = app.load_document(&file).await?;
    let start = parse_line_col(&args.at)?;

    let editor = Arc::new(SessionEditor::new(document.clamp(start)));
    let handle = app.navigator(
        app.provider(args.symbols.as_deref()),
        editor.clone(),
        args.speak,
    );

    let lines: Vec<String> = io::stdin()
        .lock()
        .lines()
        .map_while(Result::ok)
        .filter(|line| !line.trim().is_empty())
        .collect();

    let mut steps = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let step = match serde_json::from_str::<SessionStep>(line) {
            Ok(step) => step,
            Err(e) => {
                steps.push(StepResult {
                    index,
                    success: false,
                    result: None,
                    error: Some(format!("Invalid step: {}", e)),
                });
                continue;
            }
        };

        let result = apply_step(&handle.navigator, editor.as_ref(), &document, step).await;
        steps.push(StepResult {
            index,
            success: true,
            result: Some(result),
            error: None,
        });
    }

    handle.navigator.settle().await;

    ctx.print_success_flat(SessionResponse {
        file: ctx.relative_path(&file),
        total: steps.len(),
        failures: steps.iter().filter(|s| !s.success).count(),
        cursor: editor.active_cursor().into(),
        steps,
        announced: handle.transcript.take().await,
    });

    Ok(())
}

async fn apply_step(
    navigator: &Navigator,
    editor: &SessionEditor,
    document: &Document,
    step: SessionStep,
) -> serde_json::Value {
    match step {
        SessionStep::Next => step_move(navigator, editor, document, Direction::Next).await,
        SessionStep::Previous => step_move(navigator, editor, document, Direction::Previous).await,
        SessionStep::Block { class, speak } => {
            let query = if class {
                BlockQuery::Class
            } else {
                BlockQuery::Callable
            };
            match navigator.current_block(document, query).await {
                BlockOutcome::Found(block) => {
                    if speak {
                        navigator.announce_block(&block).await;
                    }
                    serde_json::json!({
                        "found": true,
                        "block": BlockOutput::from(&block),
                    })
                }
                other => serde_json::json!({
                    "found": false,
                    "message": other.message(),
                }),
            }
        }
        SessionStep::Goto { line, column } => {
            let position = document.clamp(Position::from_cli(line, column));
            editor.set_selection(position);
            editor.reveal_position(position);
            serde_json::json!({ "cursor": PositionOutput::from(position) })
        }
    }
}

async fn step_move(
    navigator: &Navigator,
    editor: &SessionEditor,
    document: &Document,
    direction: Direction,
) -> serde_json::Value {
    let outcome = navigator.move_cursor_to_symbol(document, direction).await;
    serde_json::to_value(MoveOutput::new(&outcome, editor.active_cursor())).unwrap_or_default()
}
