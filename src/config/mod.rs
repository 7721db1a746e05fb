//! Alias harvesting from project configuration files.
//!
//! Three text-based sources seed the [`AliasTable`] before scanning starts:
//! CMake `include_directories(...)` entries, C# `<ProjectReference>` items,
//! and TypeScript/JavaScript `compilerOptions.paths`. Every source is
//! best-effort: an unreadable or malformed file costs resolution power, not
//! the scan.

use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::core::resolver::normalize_path;
use crate::core::AliasTable;
use crate::error::ScanError;

/// Build the alias table from every recognized config source under `root`.
pub fn load_aliases(root: &Path) -> AliasTable {
    let mut table = AliasTable::new();

    if let Err(err) = load_cmake_includes(root, &mut table) {
        warn!(error = %err, "skipping CMake include directories");
    }
    if let Err(err) = load_csproj_references(root, &mut table) {
        warn!(error = %err, "skipping C# project references");
    }
    for name in ["tsconfig.json", "jsconfig.json"] {
        if let Err(err) = load_compiler_paths(root, name, &mut table) {
            warn!(config = name, error = %err, "skipping path aliases");
        }
    }

    table
}

/// `include_directories(...)` entries from a root CMakeLists.txt. Each
/// existing directory becomes an alias to its absolute path.
fn load_cmake_includes(root: &Path, table: &mut AliasTable) -> Result<(), ScanError> {
    let cmake_path = root.join("CMakeLists.txt");
    if !cmake_path.is_file() {
        return Ok(());
    }
    let content = read_config(&cmake_path)?;

    let pattern = Regex::new(r"(?s)include_directories\((.*?)\)").expect("invalid builtin pattern");
    for captures in pattern.captures_iter(&content) {
        for dir in captures[1].split_whitespace() {
            let target = root.join(dir);
            if target.exists() {
                info!(alias = dir, "added include directory");
                table.insert(dir, normalize_path(&target));
            }
        }
    }
    Ok(())
}

/// `<ProjectReference Include="..."/>` items from every .csproj under the
/// root. The alias is the referenced project's file stem.
fn load_csproj_references(root: &Path, table: &mut AliasTable) -> Result<(), ScanError> {
    let pattern = Regex::new(r#"<ProjectReference\s+Include="([^"]+)""#)
        .expect("invalid builtin pattern");

    let csproj_files = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "csproj")
        });

    for entry in csproj_files {
        let content = match read_config(entry.path()) {
            Ok(content) => content,
            Err(err) => {
                warn!(file = %entry.path().display(), error = %err, "skipping csproj");
                continue;
            }
        };
        let csproj_dir = entry.path().parent().unwrap_or(root);

        for captures in pattern.captures_iter(&content) {
            // References typically use Windows separators.
            let reference = captures[1].replace('\\', "/");
            let target = normalize_path(&csproj_dir.join(&reference));
            let Some(stem) = target.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            info!(alias = stem, target = %target.display(), "added C# project reference");
            table.insert(stem.to_string(), target.clone());
        }
    }
    Ok(())
}

/// `compilerOptions.paths` from tsconfig.json / jsconfig.json, with `/*`
/// wildcard suffixes stripped on both sides. Targets are anchored at the
/// project root.
fn load_compiler_paths(root: &Path, name: &str, table: &mut AliasTable) -> Result<(), ScanError> {
    let config_path = root.join(name);
    if !config_path.is_file() {
        return Ok(());
    }
    let content = read_config(&config_path)?;

    let config: Value =
        serde_json::from_str(&clean_json(&content)).map_err(|err| ScanError::Config {
            path: config_path.clone(),
            message: err.to_string(),
        })?;

    let Some(paths) = config
        .get("compilerOptions")
        .and_then(|opts| opts.get("paths"))
        .and_then(Value::as_object)
    else {
        return Ok(());
    };

    for (alias, targets) in paths {
        let Some(first) = targets.as_array().and_then(|arr| arr.first()).and_then(Value::as_str)
        else {
            continue;
        };
        let clean_alias = alias.trim_end_matches("/*");
        let clean_target = first.trim_end_matches("/*").trim_start_matches("./");
        let target = normalize_path(&root.join(clean_target));
        info!(alias = clean_alias, target = %target.display(), "added path alias");
        table.insert(clean_alias.to_string(), target);
    }
    Ok(())
}

/// Strip `//` and `/* */` comments and trailing commas so lenient configs
/// (tsconfig allows them) survive strict JSON parsing.
fn clean_json(content: &str) -> String {
    let line_comments = Regex::new(r"//[^\n]*").expect("invalid builtin pattern");
    let block_comments = Regex::new(r"(?s)/\*.*?\*/").expect("invalid builtin pattern");
    let trailing_commas = Regex::new(r",\s*([}\]])").expect("invalid builtin pattern");

    let cleaned = line_comments.replace_all(content, "");
    let cleaned = block_comments.replace_all(&cleaned, "");
    trailing_commas.replace_all(&cleaned, "$1").into_owned()
}

fn read_config(path: &Path) -> Result<String, ScanError> {
    fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })
}
