use common::{build_paths::profile_dir, yaml_include::load_yaml_with_includes};
use std::{error::Error, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=config");
    println!("cargo:rerun-if-env-changed=ORDERS_ENV");

    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let env = std::env::var("ORDERS_ENV").unwrap_or_else(|_| "dev".to_string());
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    let Some(target_dir) = profile_dir(&out_dir, &profile) else {
        println!(
            "cargo:warning=No {profile} build directory above {}; skipping total_config.yaml",
            out_dir.display()
        );
        return Ok(());
    };

    let source = manifest_dir.join("config").join(format!("{env}.yaml"));
    let config_yaml = load_yaml_with_includes(&source)?;

    let mut rendered = String::new();
    yaml_rust2::YamlEmitter::new(&mut rendered).dump(&config_yaml)?;

    let config_dir = target_dir.join("config");
    fs::create_dir_all(&config_dir)?;
    let destination = config_dir.join("total_config.yaml");
    fs::write(&destination, rendered)?;

    println!(
        "cargo:warning=Wrote {env} config for profile {profile} to {}",
        destination.display()
    );
    Ok(())
}

