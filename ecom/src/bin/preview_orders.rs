use std::error::Error;

use processing::executable_utils::{initialize_executable, run_preview};

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_executable()?;
    run_preview(&config)
}
