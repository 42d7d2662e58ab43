use anyhow::{bail, Result};
use ir::Cfg;
use tracing::debug;

use crate::args::CfgArgs;
use crate::load_program;
use crate::output::CfgFormat;

/// Prints the control flow graphs of the program, optionally restricted to
/// one procedure.
pub fn export_cfg(args: CfgArgs) -> Result<()> {
    let (parsed, _) = load_program(&args.source)?;
    let selected: Vec<&Cfg> = match &args.procedure {
        Some(name) => parsed
            .cfgs
            .iter()
            .filter(|c| &c.procedure == name)
            .collect(),
        None => parsed.cfgs.iter().collect(),
    };
    if let Some(name) = &args.procedure {
        if selected.is_empty() {
            bail!("procedure '{name}' not found");
        }
    }
    debug!(graphs = selected.len(), format = ?args.format, "Exporting CFGs");
    println!("{}", render_all(args.format, &selected)?);
    Ok(())
}

/// DOT and Mermaid graphs are printed one after another, JSON as a single
/// array.
fn render_all(format: CfgFormat, cfgs: &[&Cfg]) -> Result<String> {
    if format == CfgFormat::Json {
        return Ok(serde_json::to_string_pretty(cfgs)?);
    }
    let rendered = cfgs
        .iter()
        .map(|c| format.render(c))
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join("\n"))
}
