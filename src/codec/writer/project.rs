use std::io::Write;

use crate::codec::reader::project::C1_HEADER;
use crate::project::Project;
use crate::Result;

/// writes every rendered layer of a project as a `C1` file
pub struct ProjectWriter<W: Write> {
    writer: W,
}

impl<W: Write> ProjectWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_project(&mut self, project: &Project) -> Result<()> {
        writeln!(self.writer, "{}", C1_HEADER)?;
        writeln!(self.writer, "{} {}", project.width(), project.height())?;
        writeln!(self.writer, "{}", project.max_value())?;
        for layer in project.render_layers() {
            writeln!(self.writer, "{} {}", layer.name(), layer.filter())?;
            for row in layer.canvas().rows() {
                for pixel in row {
                    let [red, green, blue, alpha] = pixel.rgba();
                    write!(self.writer, "{} {} {} {} ", red, green, blue, alpha)?;
                }
                writeln!(self.writer)?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::ProjectWriter;
    use crate::project::Project;

    #[test]
    fn write_new_project() {
        let project = Project::new(2, 2, 255).unwrap();
        let mut writer = ProjectWriter::new(Vec::new());
        writer.write_project(&project).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            text,
            "C1\n2 2\n255\nbackground normal\n255 255 255 255 255 255 255 255 \n255 255 255 255 255 255 255 255 \n"
        );
    }

    #[test]
    fn layers_are_written_filtered() {
        let mut project = Project::new(1, 1, 255).unwrap();
        project.add_layer("top").unwrap();
        project.set_filter("top", "green-component").unwrap();
        let mut writer = ProjectWriter::new(Vec::new());
        writer.write_project(&project).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.ends_with("top green-component\n0 255 0 0 \n"), "was {}", text);
    }
}
