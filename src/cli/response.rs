//! Response types for CLI output
//!
//! All positions printed here are 1-indexed.

use serde::Serialize;

use crate::models::position::Position;
use crate::services::block::CurrentBlock;
use crate::services::jump::JumpTarget;
use crate::services::navigator::NavigationOutcome;

/// A 1-indexed line/column pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionOutput {
    pub line: u32,
    pub column: u32,
}

impl From<Position> for PositionOutput {
    fn from(position: Position) -> Self {
        let (line, column) = position.to_display();
        Self { line, column }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetOutput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl From<&JumpTarget> for TargetOutput {
    fn from(target: &JumpTarget) -> Self {
        let PositionOutput { line, column } = PositionOutput::from(target.position);
        Self {
            name: target.display_name.clone(),
            kind: target.kind.map(|k| k.to_string()),
            line,
            column,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockOutput {
    pub name: String,
    pub kind: String,
    pub start: PositionOutput,
    pub end: PositionOutput,
    pub in_class: bool,
    pub description: String,
    pub text: String,
}

impl From<&CurrentBlock> for BlockOutput {
    fn from(block: &CurrentBlock) -> Self {
        Self {
            name: block.name.clone(),
            kind: block.kind.to_string(),
            start: block.range.start.into(),
            end: block.range.end.into(),
            in_class: block.selection_in_class,
            description: block.describe(),
            text: block.text.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlockResponse {
    pub file: String,
    pub query: &'static str,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub announced: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    pub file: String,
    pub count: usize,
    pub degraded: bool,
    pub targets: Vec<TargetOutput>,
}

/// One navigation result
#[derive(Debug, Clone, Serialize)]
pub struct MoveOutput {
    pub outcome: &'static str,
    pub moved: bool,
    pub message: String,
    pub cursor: PositionOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetOutput>,
    pub degraded: bool,
}

impl MoveOutput {
    pub fn new(outcome: &NavigationOutcome, cursor: Position) -> Self {
        let (label, target, degraded) = match outcome {
            NavigationOutcome::Moved { target, degraded } => {
                ("moved", Some(TargetOutput::from(target)), *degraded)
            }
            NavigationOutcome::NoSymbols => ("no_symbols", None, false),
            NavigationOutcome::NoneInDirection { .. } => ("none_in_direction", None, false),
            NavigationOutcome::Superseded => ("superseded", None, false),
        };
        Self {
            outcome: label,
            moved: outcome.moved(),
            message: outcome.message(),
            cursor: cursor.into(),
            target,
            degraded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JumpResponse {
    pub file: String,
    pub direction: String,
    #[serde(flatten)]
    pub result: MoveOutput,
    pub announced: Vec<String>,
}

/// Result of one session step
#[derive(Debug, Serialize)]
pub struct StepResult {
    pub index: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub file: String,
    pub total: usize,
    pub failures: usize,
    pub cursor: PositionOutput,
    pub steps: Vec<StepResult>,
    /// What was actually spoken after debouncing
    pub announced: Vec<String>,
}
