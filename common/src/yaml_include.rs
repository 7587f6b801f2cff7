use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use yaml_rust2::{Yaml, YamlLoader, yaml::Hash};

const INCLUDE_DIRECTIVE: &str = "!include";

#[derive(Debug, Error)]
pub enum IncludeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: yaml_rust2::ScanError,
    },
    #[error("include cycle detected at {0}")]
    Cycle(PathBuf),
    #[error("empty include directive in {0}")]
    EmptyDirective(PathBuf),
}

/// Loads a YAML file, resolving `!include <relative path>` lines recursively.
///
/// Included documents are merged first, in order, and the including file's own
/// keys are merged on top so local values override included ones.
pub fn load_yaml_with_includes(path: &Path) -> Result<Yaml, IncludeError> {
    let mut stack = Vec::new();
    let resolved = resolve(path, &mut stack)?;
    tracing::debug!("Resolved config {:?}", path);
    Ok(resolved)
}

fn resolve(path: &Path, stack: &mut Vec<PathBuf>) -> Result<Yaml, IncludeError> {
    let canonical = fs::canonicalize(path).map_err(|source| IncludeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if stack.contains(&canonical) {
        return Err(IncludeError::Cycle(canonical));
    }
    stack.push(canonical);

    let contents = fs::read_to_string(path).map_err(|source| IncludeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_path = path.parent().unwrap_or(Path::new(""));

    let (includes, rest): (Vec<&str>, Vec<&str>) = contents
        .lines()
        .partition(|line| line.trim_start().starts_with(INCLUDE_DIRECTIVE));

    let mut merged = Yaml::Hash(Hash::new());
    for line in includes {
        let target = line
            .trim()
            .trim_start_matches(INCLUDE_DIRECTIVE)
            .trim();
        if target.is_empty() {
            return Err(IncludeError::EmptyDirective(path.to_path_buf()));
        }
        let included = resolve(&base_path.join(target), stack)?;
        merged = merge_yaml(&merged, &included);
    }

    let documents =
        YamlLoader::load_from_str(&rest.join("\n")).map_err(|source| IncludeError::Scan {
            path: path.to_path_buf(),
            source,
        })?;
    for document in documents {
        merged = merge_yaml(&merged, &document);
    }

    stack.pop();
    Ok(merged)
}

/// Deep-merges two mappings; on any non-mapping pair the override wins.
pub fn merge_yaml(base: &Yaml, override_yaml: &Yaml) -> Yaml {
    match (base, override_yaml) {
        (Yaml::Hash(base_hash), Yaml::Hash(override_hash)) => {
            let mut result = base_hash.clone();
            for (key, value) in override_hash {
                let merged = match base_hash.get(key) {
                    Some(base_value) => merge_yaml(base_value, value),
                    None => value.clone(),
                };
                result.insert(key.clone(), merged);
            }
            Yaml::Hash(result)
        }
        (base_value, Yaml::Null | Yaml::BadValue) => base_value.clone(),
        (_, override_value) => override_value.clone(),
    }
}
