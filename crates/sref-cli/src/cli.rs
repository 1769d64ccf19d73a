use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sref",
    about = "Scene references: manage scenes in the build manifest",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Config file (defaults to sref.toml in the project root)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List scenes in the build manifest
    List,
    /// Show the build manifest status of a scene
    Status(SceneArgs),
    /// Add a scene to the build manifest
    Add(AddArgs),
    /// Remove a scene from the build manifest
    Remove(RemoveArgs),
    /// Enable a scene in the build manifest
    Enable(SceneArgs),
    /// Disable a scene in the build manifest
    Disable(SceneArgs),
    /// Report whether the build manifest is read-only
    Locked,
    /// Write identifier sidecars for scenes that lack one
    Import,
    /// Update manifest paths of scenes that have moved
    Refresh,
}

#[derive(Args)]
pub struct SceneArgs {
    /// Scene path relative to the project root
    pub scene: String,
}

#[derive(Args)]
pub struct AddArgs {
    pub scene: String,
    /// Add the scene disabled
    #[arg(long)]
    pub disabled: bool,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub scene: String,
    #[arg(short, long)]
    pub yes: bool,
}
