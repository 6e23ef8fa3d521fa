//! Explain command implementation.

use tracing::debug;

use crate::cli::ExplainArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the explain command.
///
/// Prints, for one module path, the loaders that run on it (last `use`
/// entry first) and the highest-priority cache group it matches.
pub fn execute(args: ExplainArgs) -> Result<()> {
    let config = utils::load_config(&args.config)?;
    let module = args.module.replace('\\', "/");

    let matching = config.module.matching_rules(&module).count();
    debug!(module = %module, rules = matching, "matched module rules");

    let pipeline = config.module.pipeline_for(&module);
    let group = config.optimization.split_chunks.group_for(&module);
    ui::print_explanation(&module, &pipeline, group);

    if let Some((_, group)) = group {
        let chunks = config.optimization.split_chunks.chunks_for(group);
        println!("  chunks: {chunks}");
    }
    Ok(())
}
