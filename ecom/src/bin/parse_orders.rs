use std::error::Error;

use processing::executable_utils::{initialize_executable, run_batch};

use ecom::normalizer::OrderNormalizer;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_executable()?;

    let normalizer = OrderNormalizer::new(config.normalizer.clone());
    run_batch(&config, &normalizer)?;

    Ok(())
}
