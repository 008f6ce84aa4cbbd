use crate::encoder::AddressMode;
use std::path::{Path, PathBuf};

/// Suffix replacing the input's extension when no output path is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_vld.hex";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub delete_output: bool,
    /// Directory the input path is resolved against.
    pub base_dir: PathBuf,
    pub addressing: AddressMode,
}

impl Config {
    pub fn new<P: Into<PathBuf>>(input_path: P) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            delete_output: false,
            base_dir: PathBuf::from("."),
            addressing: AddressMode::default(),
        }
    }

    pub fn input(&self) -> PathBuf {
        self.base_dir.join(&self.input_path)
    }

    /// The explicit output path, or the resolved input path with its
    /// extension swapped for `_vld.hex`.
    pub fn output(&self) -> PathBuf {
        match self.output_path {
            Some(ref path) => path.clone(),
            None => default_output_path(&self.input()),
        }
    }
}

pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, DEFAULT_OUTPUT_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("pic.png")),
            PathBuf::from("pic_vld.hex")
        );
        assert_eq!(
            default_output_path(Path::new("dir/pic.png")),
            PathBuf::from("dir/pic_vld.hex")
        );
        assert_eq!(
            default_output_path(Path::new("archive.tar.gz")),
            PathBuf::from("archive.tar_vld.hex")
        );
        assert_eq!(
            default_output_path(Path::new("noext")),
            PathBuf::from("noext_vld.hex")
        );
    }

    #[test]
    fn explicit_output_wins() {
        let mut config = Config::new("pic.png");
        config.output_path = Some(PathBuf::from("out.hex"));
        assert_eq!(config.output(), PathBuf::from("out.hex"));
    }

    #[test]
    fn input_resolves_against_base_dir() {
        let mut config = Config::new("pic.png");
        config.base_dir = PathBuf::from("/data/images");
        assert_eq!(config.input(), PathBuf::from("/data/images/pic.png"));
        assert_eq!(config.output(), PathBuf::from("/data/images/pic_vld.hex"));
    }
}
