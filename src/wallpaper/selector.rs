//! Weighted random pick over the stored wallpaper tree.
//!
//! Fresh downloads are drawn twice as often as saved ones so new material
//! rotates in while kept favourites still come back.

use super::{Category, Kind, Purity, Wallpaper};
use crate::error::WallError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

impl Kind {
    /// Relative selection weight of a stored file of this kind.
    pub fn weight(&self) -> u32 {
        match self {
            Kind::Fresh => 20,
            Kind::Saved => 10,
        }
    }
}

/// A file eligible for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub kind: Kind,
    pub weight: u32,
}

/// File-name filter `^.*-(p1|p2|...)\.\w+$` over the accepted purity levels.
pub fn purity_pattern(purity: &[Purity]) -> Result<Regex, regex::Error> {
    let alternation = purity
        .iter()
        .map(|p| regex::escape(p.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^.*-({alternation})\.\w+$"))
}

/// Gather the weighted pool under `<root>/fresh` and `<root>/saved`.
///
/// Missing subtrees contribute nothing. Symlinked files and directories are
/// followed. Entries are visited in file-name order so a seeded random
/// source always sees the same pool.
pub fn collect_candidates(
    root: &Path,
    categories: &[Category],
    purity: &[Purity],
) -> Result<Vec<Candidate>, WallError> {
    if categories.is_empty() || purity.is_empty() {
        return Ok(Vec::new());
    }
    let pattern =
        purity_pattern(purity).map_err(|e| WallError::format("purity filter", e.to_string()))?;

    let mut candidates = Vec::new();
    for kind in [Kind::Fresh, Kind::Saved] {
        let subtree = root.join(kind.as_str());
        let files = WalkDir::new(&subtree)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file());

        for entry in files {
            let in_category = entry
                .path()
                .parent()
                .and_then(|dir| dir.file_name())
                .and_then(|name| name.to_str())
                .and_then(|name| name.parse::<Category>().ok())
                .is_some_and(|category| categories.contains(&category));
            let name_matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| pattern.is_match(name));

            if in_category && name_matches {
                if let Err(e) = Wallpaper::from_path(entry.path()) {
                    warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "file matches the filters but is not a stored wallpaper"
                    );
                }
                candidates.push(Candidate {
                    path: entry.into_path(),
                    kind,
                    weight: kind.weight(),
                });
            }
        }
    }

    debug!(
        root = %root.display(),
        candidates = candidates.len(),
        "collected wallpaper pool"
    );
    Ok(candidates)
}

/// Draw one candidate with probability proportional to its weight.
pub fn choose<'a, R: Rng + ?Sized>(
    candidates: &'a [Candidate],
    rng: &mut R,
) -> Result<&'a Candidate, WallError> {
    let weights = WeightedIndex::new(candidates.iter().map(|c| c.weight))
        .map_err(|_| WallError::NotFound)?;
    Ok(&candidates[weights.sample(rng)])
}

/// Pick a stored wallpaper matching the filters.
pub fn select_random<R: Rng + ?Sized>(
    root: &Path,
    categories: &[Category],
    purity: &[Purity],
    rng: &mut R,
) -> Result<PathBuf, WallError> {
    let candidates = collect_candidates(root, categories, purity)?;
    choose(&candidates, rng).map(|c| c.path.clone())
}
