use anyhow::Context;

use crate::{commands::pack_parameters, data::Parameters, options::FromOptions};

pub fn from(options: FromOptions) -> anyhow::Result<()> {
    let parameters = Parameters::read_from_file(&options.path)
        .with_context(|| format!("could not load parameters from {}", options.path.display()))?;

    log::debug!(
        "Loaded {} items from {}",
        parameters.items.len(),
        options.path.display()
    );

    pack_parameters(&parameters)
}
