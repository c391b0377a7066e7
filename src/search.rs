//! Recursive file search under a root directory

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// First regular file under `root` matching `pattern`
///
/// A single-component pattern is compared against file names, either exactly
/// or as a glob (`*`, `?`, `[...]`). A pattern with several components
/// (`conf/settings.toml`, `conf/*.toml`) is compared component by component
/// against the trailing components of each file's path below `root`, so it
/// matches at any depth. A component that is not a valid glob is only
/// compared exactly. Entries are visited depth-first with siblings sorted by
/// name. Unreadable entries are skipped.
pub fn find_first(root: &Path, pattern: &str) -> Option<PathBuf> {
    let matcher = Matcher::new(pattern);

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(root = %root.display(), error = %err, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if matcher.matches(relative) {
            return Some(entry.into_path());
        }
    }

    None
}

/// One pattern component: exact text plus its glob, when valid
struct Component {
    text: String,
    glob: Option<Pattern>,
}

impl Component {
    fn matches(&self, name: &str) -> bool {
        name == self.text || self.glob.as_ref().is_some_and(|glob| glob.matches(name))
    }
}

struct Matcher {
    components: Vec<Component>,
}

impl Matcher {
    fn new(pattern: &str) -> Self {
        let components = pattern
            .split(['/', std::path::MAIN_SEPARATOR])
            .filter(|part| !part.is_empty() && *part != ".")
            .map(|part| Component {
                text: part.to_string(),
                glob: Pattern::new(part).ok(),
            })
            .collect();
        Self { components }
    }

    fn matches(&self, relative: &Path) -> bool {
        let Some(names) = relative
            .iter()
            .map(|name| name.to_str())
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };

        if self.components.is_empty() || names.len() < self.components.len() {
            return false;
        }

        names[names.len() - self.components.len()..]
            .iter()
            .zip(&self.components)
            .all(|(name, component)| component.matches(name))
    }
}
