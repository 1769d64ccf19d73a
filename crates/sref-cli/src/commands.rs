use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use sref_sdk::{AssetPath, BuildScene, FsAssetStore, Project, SetEnabled};

use crate::cli::*;
use crate::config;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let options = config::load(&cli.project, cli.config.as_deref())?;
    let project = Project::open(&cli.project, &options);

    match cli.command {
        Command::List => cmd_list(&project),
        Command::Status(args) => cmd_status(&project, args),
        Command::Add(args) => cmd_add(&project, args),
        Command::Remove(args) => cmd_remove(&project, args),
        Command::Enable(args) => cmd_set_enabled(&project, args, true),
        Command::Disable(args) => cmd_set_enabled(&project, args, false),
        Command::Locked => cmd_locked(&project, &config::manifest_file(&cli.project, &options)),
        Command::Import => cmd_import(&cli.project),
        Command::Refresh => cmd_refresh(&project),
    }
}

fn cmd_list(project: &Project) -> anyhow::Result<()> {
    let scenes = project.scenes().context("failed to read build manifest")?;
    if scenes.is_empty() {
        println!("No scenes in build manifest.");
        return Ok(());
    }
    for listed in &scenes {
        let scene = &listed.scene;
        let marker = if scene.is_enabled() { "✓".green() } else { "✗".red() };
        let index = format!("{:>3}", scene.build_index()).yellow();
        if listed.is_missing() {
            println!("{} {} {} {}", marker, index, scene.path.as_str().dimmed(), "(missing)".red());
        } else if let Some(current) = listed.current_path.as_ref().filter(|_| listed.is_moved()) {
            println!("{} {} {} {} {}", marker, index, current.as_str().bold(), "moved from".dimmed(), scene.path);
        } else {
            println!("{} {} {}", marker, index, scene.path.as_str().bold());
        }
    }
    Ok(())
}

fn cmd_status(project: &Project, args: SceneArgs) -> anyhow::Result<()> {
    let scene = project.build_scene(&parse_scene(&args.scene)?)?;
    print_build_scene(&scene);
    Ok(())
}

fn cmd_add(project: &Project, args: AddArgs) -> anyhow::Result<()> {
    let path = parse_scene(&args.scene)?;
    project.ensure_addable(&path)?;
    let question = format!("Are you sure you want to add {path} to the Build Settings?");
    if !args.yes && !confirm(&question, &mut io::stdin().lock())? {
        println!("Cancelled.");
        return Ok(());
    }
    let scene = project.add_scene(&path, !args.disabled)?;
    println!(
        "{} Added {} at index {}",
        "✓".green().bold(),
        scene.path.as_str().bold(),
        scene.build_index().to_string().yellow()
    );
    Ok(())
}

fn cmd_remove(project: &Project, args: RemoveArgs) -> anyhow::Result<()> {
    let path = parse_scene(&args.scene)?;
    project.ensure_writable()?;
    let scene = project.build_scene(&path)?;
    if !scene.is_present() {
        println!("{} is not in the build manifest.", path.as_str().bold());
        return Ok(());
    }
    let question = format!(
        "Are you sure you want to remove {} at index {} from the Build Settings?",
        scene.path,
        scene.build_index()
    );
    if !args.yes && !confirm(&question, &mut io::stdin().lock())? {
        println!("Cancelled.");
        return Ok(());
    }
    let removed = project.remove_scene(&path)?;
    println!("{} Removed {} ({} entries)", "✓".green().bold(), path.as_str().bold(), removed);
    Ok(())
}

fn cmd_set_enabled(project: &Project, args: SceneArgs, enabled: bool) -> anyhow::Result<()> {
    let path = parse_scene(&args.scene)?;
    match project.set_scene_enabled(&path, enabled)? {
        SetEnabled::Modified => {
            let state = if enabled { "Enabled".green() } else { "Disabled".red() };
            println!("{} {} {}", "✓".green().bold(), state, path.as_str().bold());
        }
        SetEnabled::NotFound => {
            println!("{} is not in the build manifest.", path.as_str().bold());
        }
    }
    Ok(())
}

fn cmd_locked(project: &Project, manifest: &Path) -> anyhow::Result<()> {
    if project.is_read_only() {
        println!("{} {} is read-only", "✗".red().bold(), manifest.display());
    } else {
        println!("{} {} is writable", "✓".green().bold(), manifest.display());
    }
    Ok(())
}

fn cmd_import(root: &Path) -> anyhow::Result<()> {
    let imported = FsAssetStore::new(root)
        .import()
        .with_context(|| format!("failed to import scenes under {}", root.display()))?;
    if imported.is_empty() {
        println!("All scenes already have identifiers.");
    }
    for scene in &imported {
        println!("  {} {} {}", "imported:".green(), scene.path, scene.id.short_hex().dimmed());
    }
    Ok(())
}

fn cmd_refresh(project: &Project) -> anyhow::Result<()> {
    let changed = project.refresh_paths()?;
    println!("{} Updated {} manifest paths.", "✓".green().bold(), changed);
    Ok(())
}

fn print_build_scene(scene: &BuildScene) {
    println!("Scene: {}", scene.path.as_str().bold());
    println!("  Identifier: {}", scene.identifier.to_string().cyan());
    if scene.is_present() {
        println!("  Build index: {}", scene.build_index().to_string().yellow());
        let state = if scene.is_enabled() { "enabled".green() } else { "disabled".red() };
        println!("  State: {}", state);
    } else {
        println!("  Build index: {}", "-1 (not in build)".dimmed());
    }
}

fn parse_scene(raw: &str) -> anyhow::Result<AssetPath> {
    AssetPath::parse(raw).with_context(|| format!("invalid scene path {raw:?}"))
}

/// Ask a yes/no question; anything but `y`/`yes` is no.
fn confirm(question: &str, input: &mut impl BufRead) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
