//! Command line entry point: render conversations from a snapshot as JSON.

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use thiserror::Error;

use crate::{
    domain::{ConversationId, ConversationNamer, UserId},
    infrastructure::snapshot::{Snapshot, SnapshotError},
    usecase::{ListConversationsUseCase, ShowConversationUseCase, ViewConversationError},
};

/// Render chat conversations the way a given viewer sees them
#[derive(Debug, Clone, Parser)]
#[command(name = "kaiwa-render", version, about)]
pub struct Args {
    /// Path to the JSON snapshot ({users, conversations, messages})
    pub snapshot: PathBuf,

    /// User id of the viewer; private conversations are named after the other member
    #[arg(long)]
    pub viewer: Option<i64>,

    /// Render this conversation in detail instead of the viewer's list
    #[arg(long)]
    pub conversation: Option<i64>,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("--viewer is required to list conversations")]
    MissingViewer,

    #[error(transparent)]
    View(#[from] ViewConversationError),
}

/// Read the snapshot named in `args` and render it.
pub async fn run(args: &Args) -> Result<String, CliError> {
    let raw = tokio::fs::read_to_string(&args.snapshot)
        .await
        .map_err(|source| CliError::Read {
            path: args.snapshot.clone(),
            source,
        })?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    tracing::info!("Loaded snapshot from {}", args.snapshot.display());

    render(
        snapshot,
        args.viewer.map(UserId::new),
        args.conversation.map(ConversationId::new),
    )
    .await
}

/// Render a conversation detail, or the viewer's conversation list, as pretty JSON.
pub async fn render(
    snapshot: Snapshot,
    viewer: Option<UserId>,
    conversation: Option<ConversationId>,
) -> Result<String, CliError> {
    let store = Arc::new(snapshot.into_store()?);
    let namer = ConversationNamer::new(store.clone());

    let json = match conversation {
        Some(conversation_id) => {
            let usecase =
                ShowConversationUseCase::new(store.clone(), store.clone(), store.clone(), namer);
            let payload = usecase.execute(viewer.as_ref(), &conversation_id).await?;
            serde_json::to_string_pretty(&payload)?
        }
        None => {
            let viewer = viewer.ok_or(CliError::MissingViewer)?;
            let usecase = ListConversationsUseCase::new(store.clone(), namer);
            let payloads = usecase.execute(&viewer).await?;
            tracing::debug!("Rendered {} conversations for viewer {}", payloads.len(), viewer);
            serde_json::to_string_pretty(&payloads)?
        }
    };

    Ok(json)
}
