use crate::commands::{CliError, TessellateCmd};
use conifer::math::Point;
use conifer::tessellation::geometry_builder::{simple_builder, VertexBuffer};
use conifer::tessellation::StripTessellator;

use std::io::Write;

pub fn tessellate(mut cmd: TessellateCmd) -> Result<(), CliError> {
    let path = cmd.path.as_slice()?;

    let mut buffer: VertexBuffer<Point> = VertexBuffer::new();
    let mut tessellator = StripTessellator::new();
    tessellator.set_logging(cmd.log);

    let count = tessellator.tessellate_path(&path, &cmd.options, &mut simple_builder(&mut buffer))?;

    log::info!(
        "{} verbs tessellated into {} strip vertices",
        path.verbs().len(),
        count.vertices
    );

    if !cmd.count {
        write!(&mut *cmd.output, "strip: [")?;
        let mut is_first = true;
        for vertex in &buffer.vertices {
            if !is_first {
                write!(&mut *cmd.output, ", ")?;
            }
            write!(&mut *cmd.output, "({}, {})", vertex.x, vertex.y)?;
            is_first = false;
        }
        writeln!(&mut *cmd.output, "]")?;
    }

    writeln!(&mut *cmd.output, "vertices: {}", count.vertices)?;
    writeln!(&mut *cmd.output, "triangles: {}", count.triangles())?;

    Ok(())
}
