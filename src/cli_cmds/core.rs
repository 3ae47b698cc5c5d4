use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::background::{current_wallpaper, Background};
use crate::error::WallError;
use crate::utils::move_file;
use crate::wallpaper::{selector, Category, Kind, Purity, Wallpaper};

/// Pick a stored wallpaper and make it the background.
pub fn cmd_choose_random<R: Rng + ?Sized>(
    background: &dyn Background,
    root: &Path,
    categories: &[Category],
    purity: &[Purity],
    rng: &mut R,
) -> Result<Wallpaper> {
    let path = selector::select_random(root, categories, purity, rng)?;
    let wallpaper = Wallpaper::from_path(&path)?;

    background
        .set_current(&path)
        .with_context(|| format!("Failed to set background to {}", path.display()))?;
    info!(id = %wallpaper.id, kind = %wallpaper.kind, "background changed");
    println!("{}", path.display());

    Ok(wallpaper)
}

pub fn cmd_show(background: &dyn Background) -> Result<()> {
    let wallpaper = current_wallpaper(background)?;
    println!("{}", wallpaper.path().display());
    println!("{}", wallpaper.web_url());
    Ok(())
}

/// Delete the current (fresh) background and replace it with a similar one.
pub fn cmd_delete<R: Rng + ?Sized>(background: &dyn Background, rng: &mut R) -> Result<()> {
    let wallpaper = current_wallpaper(background)?;
    let path = wallpaper.path();
    if wallpaper.kind != Kind::Fresh {
        return Err(WallError::Precondition { path }.into());
    }

    fs::remove_file(&path).with_context(|| format!("Failed to delete {}", path.display()))?;
    info!(path = %path.display(), "deleted wallpaper");
    println!("Deleted {}", path.display());

    cmd_choose_random(
        background,
        &wallpaper.root,
        &[wallpaper.category],
        &[wallpaper.purity],
        rng,
    )?;
    Ok(())
}

/// Move the current background into `<destination>/saved/<category>/`.
pub fn cmd_save(background: &dyn Background, destination: &Path) -> Result<PathBuf> {
    let current = current_wallpaper(background)?;
    let source = current.path();
    let target = Wallpaper {
        root: destination.to_path_buf(),
        ..current
    }
    .saved_path();

    if source == target {
        println!("Already saved: {}", target.display());
        return Ok(target);
    }

    move_file(&source, &target)?;
    background
        .set_current(&target)
        .with_context(|| format!("Failed to set background to {}", target.display()))?;
    info!(from = %source.display(), to = %target.display(), "saved wallpaper");
    println!("Saved to {}", target.display());

    Ok(target)
}
