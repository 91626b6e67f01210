use std::path::Path;

use crate::error::Error;
use crate::image::PixelBuffer;
use crate::Result;

pub mod reader;
pub mod writer;

pub trait ImageReader {
    fn read_image(&mut self) -> Result<PixelBuffer>;
}

pub trait ImageWriter {
    fn write_image(&mut self, buffer: &PixelBuffer) -> Result<()>;
}

/// image file formats, chosen by file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Ppm,
    Png,
    Jpeg,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("ppm") => Ok(Self::Ppm),
            Some("png") => Ok(Self::Png),
            Some("jpg" | "jpeg") => Ok(Self::Jpeg),
            _ => Err(Error::UnsupportedExtension(path.to_path_buf())),
        }
    }

    /// the host codec format, none for formats handled natively
    pub fn host_format(&self) -> Option<::image::ImageFormat> {
        match self {
            Self::Ppm => None,
            Self::Png => Some(::image::ImageFormat::Png),
            Self::Jpeg => Some(::image::ImageFormat::Jpeg),
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::FileFormat;
    use crate::error::Error;

    #[test]
    fn detect_formats_by_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.ppm")).unwrap(), FileFormat::Ppm);
        assert_eq!(FileFormat::from_path(Path::new("a.PNG")).unwrap(), FileFormat::Png);
        assert_eq!(FileFormat::from_path(Path::new("dir/a.jpg")).unwrap(), FileFormat::Jpeg);
        assert_eq!(FileFormat::from_path(Path::new("a.jpeg")).unwrap(), FileFormat::Jpeg);
    }

    #[test]
    fn reject_unknown_extensions() {
        for name in ["a.gif", "a", "ppm"] {
            let result = FileFormat::from_path(Path::new(name));
            assert!(matches!(result, Err(Error::UnsupportedExtension(_))), "{} accepted", name);
        }
    }
}
