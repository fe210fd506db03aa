// src/steps/targets.rs

//! Reviewable target discovery.
//!
//! A target is the base name of a `.info` descriptor somewhere under the
//! Drupal root: modules, themes and installation profiles all have one.
//! Profiles are kept even though Coder ignores them.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::errors::{DrupalCiError, Result};
use crate::fs::FileSystem;

/// Matches module, theme and installation-profile descriptors at any depth.
pub const DESCRIPTOR_PATTERN: &str = "**/*.info";

/// Version-control metadata directories that are never scanned.
pub const SKIPPED_DIRS: [&str; 3] = [".git", ".svn", "CVS"];

/// User-supplied exclusions, compiled.
///
/// Syntax follows Ant file sets: patterns are separated by commas and/or
/// whitespace, `*` stays within one path segment, `**` spans any number of
/// segments, and a trailing `/` means "everything below".
#[derive(Clone)]
pub struct ExcludePatterns {
    patterns: Vec<String>,
    set: Option<GlobSet>,
}

impl fmt::Debug for ExcludePatterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludePatterns")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl ExcludePatterns {
    pub fn parse(spec: &str) -> Result<Self> {
        let patterns = split_exclusions(spec);
        let set = if patterns.is_empty() {
            None
        } else {
            Some(build_globset(&patterns)?)
        };
        Ok(Self { patterns, set })
    }

    /// `rel_path` uses forward slashes and is relative to the Drupal root.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        self.set.as_ref().is_some_and(|set| set.is_match(rel_path))
    }
}

/// Split an Ant-style exclusion list into individual glob patterns.
pub fn split_exclusions(spec: &str) -> Vec<String> {
    spec.split(|c: char| c == ',' || c.is_whitespace())
        .map(|p| p.trim().replace('\\', "/"))
        .filter(|p| !p.is_empty())
        .map(|p| {
            let p = p.trim_start_matches("./").to_string();
            if p.ends_with('/') { format!("{p}**") } else { p }
        })
        .collect()
}

/// Include + exclude rules for descriptor files.
#[derive(Debug, Clone)]
pub struct DescriptorMatcher {
    include: GlobSet,
    exclude: ExcludePatterns,
}

impl DescriptorMatcher {
    pub fn new(except: &str) -> Result<Self> {
        Ok(Self {
            include: build_globset(&[DESCRIPTOR_PATTERN.to_string()])?,
            exclude: ExcludePatterns::parse(except)?,
        })
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.include.is_match(rel_path) && !self.exclude.is_excluded(rel_path)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat).literal_separator(true).build()?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Walk `root` and return the relative paths (forward slashes, sorted) of
/// every descriptor the matcher accepts. Symlinked directories are not
/// entered.
pub fn collect_descriptors(
    fs: &dyn FileSystem,
    root: &Path,
    matcher: &DescriptorMatcher,
) -> Result<Vec<String>> {
    let mut found = Vec::new();
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = fs
            .read_dir(&dir)
            .map_err(|e| DrupalCiError::filesystem(&dir, e))?;

        for path in entries {
            if fs.is_dir(&path) {
                let skipped = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| SKIPPED_DIRS.contains(&n));
                if skipped {
                    continue;
                }
                // A link back to an ancestor would never end.
                if fs.is_symlink(&path) {
                    debug!(path = %path.display(), "not descending into symlinked directory");
                    continue;
                }
                stack.push(path);
            } else if fs.is_file(&path) {
                if let Ok(rel) = path.strip_prefix(root) {
                    let rel_str = rel.to_string_lossy().replace('\\', "/");
                    if matcher.matches(&rel_str) {
                        found.push(rel_str);
                    }
                }
            }
        }
    }

    found.sort();
    Ok(found)
}

/// `sites/all/modules/mymodule/mymodule.info` -> `mymodule`.
pub fn target_name(rel_path: &str) -> Option<String> {
    Path::new(rel_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// The set of reviewable targets under `root`, after exclusions.
pub fn reviewable_targets(
    fs: &dyn FileSystem,
    root: &Path,
    except: &str,
) -> Result<BTreeSet<String>> {
    let matcher = DescriptorMatcher::new(except)?;
    let descriptors = collect_descriptors(fs, root, &matcher)?;
    debug!(count = descriptors.len(), ?descriptors, "descriptor files matched");

    Ok(descriptors.iter().filter_map(|p| target_name(p)).collect())
}
