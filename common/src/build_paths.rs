//! Path helpers for build scripts.

use std::path::{Path, PathBuf};

/// Finds `<target>/<profile>` above a build script's `OUT_DIR`.
///
/// `OUT_DIR` lives under `<target>/<profile>/build/<crate>/out`. The target
/// directory can be renamed through `CARGO_TARGET_DIR`, so it is matched by
/// the profile name and its `build` subdirectory, not by being called `target`.
pub fn profile_dir(out_dir: &Path, profile: &str) -> Option<PathBuf> {
    out_dir
        .ancestors()
        .find(|dir| dir.ends_with(profile) && dir.join("build").is_dir())
        .map(Path::to_path_buf)
}
