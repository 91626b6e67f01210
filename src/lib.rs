use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub use cli::{Action, Arguments, CLIParser};
use codec::{
    reader::{host::HostImageReader, ppm::PPMImageReader, project::ProjectReader},
    writer::{host::HostImageWriter, ppm::PPMImageWriter, project::ProjectWriter},
    FileFormat, ImageReader, ImageWriter,
};
pub use error::Error;
pub use filter::Filter;
pub use crate::image::{Image, PixelBuffer};
pub use layer::Layer;
pub use pixel::{Channel, Pixel};
pub use position::Position;
pub use project::{Project, DEFAULT_MAX_VALUE};

mod cli;
pub mod codec;
mod color;
mod error;
pub mod filter;
pub mod image;
pub mod layer;
mod logger;
pub mod pixel;
pub mod position;
pub mod project;

pub type Result<T> = std::result::Result<T, error::Error>;

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputFileNotFound(file_path.to_path_buf()),
        _ => Error::UnableToOpenInputFileForReading(file_path.to_path_buf(), e),
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(file_path.to_path_buf(), e))
}

/// reads a plain `P3` image
pub fn read_ppm(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let input_file = open_input_file(path)?;
    let buffer = PPMImageReader::new(BufReader::new(input_file)).read_image()?;
    log::info!(
        "Read {}x{} image from '{}'",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(buffer)
}

/// reads an image of any supported format, chosen by file extension
pub fn read_image(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let Some(host_format) = format.host_format() else {
        return read_ppm(path);
    };
    let input_file = open_input_file(path)?;
    let buffer = HostImageReader::new(BufReader::new(input_file), host_format).read_image()?;
    log::info!(
        "Decoded {}x{} image from '{}'",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(buffer)
}

pub fn read_project(path: impl AsRef<Path>) -> Result<Project> {
    let path = path.as_ref();
    let input_file = open_input_file(path)?;
    let project = ProjectReader::new(BufReader::new(input_file)).read_project()?;
    log::info!(
        "Loaded project '{}' with {} layers",
        path.display(),
        project.layers().len()
    );
    Ok(project)
}

/// writes the rendered layers of `project`
pub fn write_project(project: &Project, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let output_file = open_output_file(path)?;
    ProjectWriter::new(BufWriter::new(output_file)).write_project(project)?;
    log::info!("Saved project to '{}'", path.display());
    Ok(())
}

/// writes `buffer` in the format given by the file extension
pub fn write_image(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let output_file = open_output_file(path)?;
    let output_file_writer = BufWriter::new(output_file);
    match format.host_format() {
        Some(host_format) => {
            HostImageWriter::new(output_file_writer, host_format).write_image(buffer)?
        }
        None => PPMImageWriter::new(output_file_writer).write_image(buffer)?,
    }
    log::info!("Saved image to '{}'", path.display());
    Ok(())
}

fn modify_project(path: &Path, f: impl FnOnce(&mut Project) -> Result<()>) -> Result<()> {
    let mut project = read_project(path)?;
    f(&mut project)?;
    write_project(&project, path)
}

/// executes one command line action against the project file
pub fn run(arguments: &Arguments) -> Result<()> {
    let project_file: &PathBuf = &arguments.project_file;
    match &arguments.action {
        Action::New {
            height,
            width,
            max_value,
        } => write_project(&Project::new(*height, *width, *max_value)?, project_file),
        Action::AddLayer { name } => modify_project(project_file, |project| project.add_layer(name)),
        Action::RemoveLayer { name } => modify_project(project_file, |project| {
            if project.remove_layer(name).is_none() {
                log::warn!("Layer '{}' not present, nothing removed", name);
            }
            Ok(())
        }),
        Action::AddImage {
            layer,
            image_file,
            row,
            col,
        } => {
            let image = read_image(image_file)?;
            modify_project(project_file, |project| {
                project.add_image_to_layer(layer, image, *row, *col)
            })
        }
        Action::SetFilter { layer, filter } => modify_project(project_file, |project| {
            project.set_filter(layer, filter.identifier())
        }),
        Action::SaveImage { output_file } => {
            let project = read_project(project_file)?;
            let flattened = project.save_image()?;
            write_image(flattened.canvas(), output_file)
        }
    }
}
