//! Wrapper around globset's Glob type that couples Glob and GlobMatcher into a
//! single type and knows how to search a folder for matches.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

pub use globset::Error;

#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    matcher: GlobMatcher,
}

impl Glob {
    /// Compiles `glob`. A leading `./` is ignored and `*` never matches a path
    /// separator.
    pub fn new(glob: &str) -> Result<Self, Error> {
        let pattern = glob.strip_prefix("./").unwrap_or(glob).to_owned();

        let matcher = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()?
            .compile_matcher();

        Ok(Glob { pattern, matcher })
    }

    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> bool {
        self.matcher.is_match(path)
    }

    pub fn get_prefix(&self) -> PathBuf {
        get_non_pattern_prefix(Path::new(&self.pattern))
    }

    /// Every file under `folder` whose path relative to `folder` matches,
    /// sorted by path. An empty `folder` means the working directory.
    ///
    /// Absolute patterns ignore `folder` and are matched against absolute
    /// paths.
    pub fn find_matches(&self, folder: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
        let absolute = Path::new(&self.pattern).is_absolute();

        let root = if folder.as_os_str().is_empty() {
            Path::new(".")
        } else {
            folder
        };

        let base_path = root.join(self.get_prefix());
        log::trace!(
            "Searching for files in '{}' matching '{}'",
            base_path.display(),
            self
        );

        if !base_path.exists() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();

        for entry in WalkDir::new(&base_path).sort_by(|a, b| a.file_name().cmp(b.file_name())) {
            let entry = entry?;

            if !entry.file_type().is_file() {
                continue;
            }

            let match_path = if absolute {
                entry.path()
            } else {
                match entry.path().strip_prefix(root) {
                    Ok(path) => path,
                    Err(_) => continue,
                }
            };

            if self.is_match(match_path) {
                // Matches in the working directory stay relative, without "./".
                let path = if folder.as_os_str().is_empty() && !absolute {
                    match_path.to_path_buf()
                } else {
                    entry.path().to_path_buf()
                };

                matches.push(path);
            }
        }

        matches.sort();
        Ok(matches)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

// A basic set of characters that might indicate the use of glob pattern syntax.
// This is to distinguish portions of a glob that are fixed paths (e.g.
// "foo.png") from ones that are leveraging patterns (e.g. "*.png").
//
// This approach has false positives, as it will treat escape sequences like
// `[*]` as pattern syntax, but those should be rare enough to be acceptable
//
// Glob syntax described here: https://docs.rs/globset/0.4.4/globset/#syntax
const GLOB_PATTERN_CHARACTERS: &str = "*?{}[]";

fn get_non_pattern_prefix(glob_path: &Path) -> PathBuf {
    let mut prefix = PathBuf::new();

    for component in glob_path.iter() {
        let component_str = component.to_string_lossy();

        if GLOB_PATTERN_CHARACTERS
            .chars()
            .any(|special_char| component_str.contains(special_char))
        {
            break;
        }

        prefix.push(component);
    }

    prefix
}
