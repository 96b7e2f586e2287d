use crate::commands::{CliError, FlattenCmd};
use conifer::tessellation::StripTessellator;

use std::io::Write;

pub fn flatten(mut cmd: FlattenCmd) -> Result<(), CliError> {
    let path = cmd.path.as_slice()?;

    let mut tessellator = StripTessellator::new();
    tessellator.set_logging(cmd.log);
    let boundary = tessellator.flatten(path.iter(), &cmd.options)?;

    log::info!(
        "{} verbs flattened into {} vertices",
        path.verbs().len(),
        boundary.len()
    );

    if cmd.count {
        writeln!(&mut *cmd.output, "vertices: {}", boundary.len())?;

        return Ok(());
    }

    for (i, p) in boundary.iter().enumerate() {
        let verb = if i == 0 { "M" } else { "L" };
        write!(&mut *cmd.output, "{} {} {} ", verb, p.x, p.y)?;
    }
    if !boundary.is_empty() {
        write!(&mut *cmd.output, "Z")?;
    }
    writeln!(&mut *cmd.output)?;

    Ok(())
}
