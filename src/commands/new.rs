use anyhow::bail;
use fs_err as fs;

use crate::{data::Parameters, options::NewOptions};

pub fn new(options: NewOptions) -> anyhow::Result<()> {
    if options.path.exists() {
        bail!(
            "{} already exists, refusing to overwrite it",
            options.path.display()
        );
    }

    let contents = Parameters::example().to_json()?;
    fs::write(&options.path, contents)?;

    log::info!("Created example parameters at {}", options.path.display());
    Ok(())
}
