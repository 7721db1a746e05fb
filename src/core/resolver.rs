use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use super::scanner::ExclusionSet;
use super::{ImportToken, Language};

/// The outcome of resolving one token: either a file the project contains,
/// or an opaque reference to something outside it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResolvedDependency {
    /// Project-relative path of a target that existed at resolution time.
    ProjectPath(String),
    /// Cleaned original token for a library/module the project does not contain.
    ExternalRef(String),
}

impl ResolvedDependency {
    pub fn id(&self) -> &str {
        match self {
            ResolvedDependency::ProjectPath(s) | ResolvedDependency::ExternalRef(s) => s,
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self, ResolvedDependency::ProjectPath(_))
    }
}

/// Immutable alias-prefix -> absolute-path mapping, built during the config
/// phase and shared read-only by every worker for the rest of the scan.
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    entries: BTreeMap<String, PathBuf>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, target: impl Into<PathBuf>) {
        self.entries.insert(alias.into(), target.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(a, p)| (a.as_str(), p.as_path()))
    }

    /// Longest-prefix match. When several aliases are prefixes of the same
    /// token the longest wins; two distinct equal-length prefixes of one
    /// token cannot exist, so the result is deterministic regardless of
    /// insertion order.
    pub fn longest_prefix_match(&self, token: &str) -> Option<(&str, &Path)> {
        self.entries
            .iter()
            .filter(|(alias, _)| token.starts_with(alias.as_str()))
            .max_by_key(|(alias, _)| alias.len())
            .map(|(alias, target)| (alias.as_str(), target.as_path()))
    }
}

/// Where a candidate came from, which decides how existence is probed.
enum Candidate {
    /// Absolute path assembled from the current file's directory or an alias.
    Absolute(PathBuf),
    /// Project-root-relative name (namespace conversions, bare tokens).
    Relative(String),
}

/// Turns one extracted token into a `ResolvedDependency`, or discards it
/// (library-only kinds and targets under excluded directories).
pub struct PathResolver<'a> {
    root: &'a Path,
    aliases: &'a AliasTable,
    exclusions: &'a ExclusionSet,
}

impl<'a> PathResolver<'a> {
    pub fn new(root: &'a Path, aliases: &'a AliasTable, exclusions: &'a ExclusionSet) -> Self {
        Self {
            root,
            aliases,
            exclusions,
        }
    }

    pub fn resolve(
        &self,
        token: &ImportToken,
        current_dir: &Path,
        language: Language,
    ) -> Option<ResolvedDependency> {
        if !token.kind.is_resolvable() {
            return None;
        }

        let candidate = self.candidate_for(token, current_dir, language);
        self.finalize(candidate, &token.raw, language)
    }

    /// Resolution rule chain; the first rule that applies wins.
    fn candidate_for(
        &self,
        token: &ImportToken,
        current_dir: &Path,
        language: Language,
    ) -> Candidate {
        let raw = token.raw.as_str();

        // Quoted local includes resolve against the including file first.
        if matches!(language, Language::C | Language::Cpp)
            && token.kind == super::DeclarationKind::LocalInclude
        {
            let joined = normalize_path(&current_dir.join(raw));
            if joined.exists() {
                return Candidate::Absolute(joined);
            }
        }

        // C# namespace-style tokens map onto the source tree by convention.
        if language == Language::CSharp && raw.contains('.') && !raw.ends_with(".cs") {
            return Candidate::Relative(format!("{}.cs", raw.replace('.', "/")));
        }

        if let Some((alias, target)) = self.aliases.longest_prefix_match(raw) {
            let rest = &raw[alias.len()..];
            let substituted = format!("{}{}", target.display(), rest);
            return Candidate::Absolute(normalize_path(Path::new(&substituted)));
        }

        if raw.starts_with('.') || raw.starts_with('/') {
            return Candidate::Absolute(normalize_path(&current_dir.join(raw)));
        }

        Candidate::Relative(raw.to_string())
    }

    /// Directory/index fallback, existence check, project-relative
    /// conversion, and the exclusion filter.
    fn finalize(
        &self,
        candidate: Candidate,
        raw: &str,
        language: Language,
    ) -> Option<ResolvedDependency> {
        let mut path = match candidate {
            Candidate::Absolute(p) => p,
            Candidate::Relative(rel) => normalize_path(&self.root.join(rel)),
        };

        if path.is_dir() {
            // Probe index files in the language's extension order.
            for ext in language.extensions() {
                let index = path.join(format!("index.{ext}"));
                if index.is_file() {
                    path = index;
                    break;
                }
            }
        }

        let resolved = if path.exists() {
            match relative_id(&path, self.root) {
                Some(rel) => ResolvedDependency::ProjectPath(rel),
                // Exists but escapes the project root: treat as external.
                None => ResolvedDependency::ExternalRef(raw.to_string()),
            }
        } else {
            ResolvedDependency::ExternalRef(raw.to_string())
        };

        if self.exclusions.excludes_id(resolved.id()) {
            return None;
        }
        Some(resolved)
    }
}

/// Lexical normalization: collapses `.` and `..` without touching the
/// filesystem (symlinks are not resolved).
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Project-relative identifier with `/` separators, or `None` when the path
/// is not under the root.
pub fn relative_id(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    Some(parts.join("/"))
}
