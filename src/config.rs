use clap::value_t;
use clap::{App, Arg};
use serde::Deserialize;

use std::path::{Path, PathBuf};

use crate::glm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonMode {
    Fill,
    Line,
}

impl PolygonMode {
    pub fn toggled(self) -> Self {
        match self {
            PolygonMode::Fill => PolygonMode::Line,
            PolygonMode::Line => PolygonMode::Fill,
        }
    }

    pub fn to_gl(self) -> gl::types::GLenum {
        match self {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
        }
    }
}

impl std::str::FromStr for PolygonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill" => Ok(PolygonMode::Fill),
            "line" => Ok(PolygonMode::Line),
            _ => Err(format!("unknown polygon mode: {}", s)),
        }
    }
}

/// Everything needed to bring up the window and run the render
/// loop of an exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// (major, minor) of the requested core profile context
    pub gl_version: (u32, u32),
    pub clear_color: glm::Vec4,
    pub polygon_mode: PolygonMode,
    pub vsync: bool,
    pub max_fps: Option<f64>,
    /// Close the window after this many frames
    pub frames: Option<u64>,
    /// Save the last rendered frame to this file
    pub screenshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "LearnOpenGL".to_string(),
            gl_version: (3, 3),
            clear_color: glm::vec4(0.2, 0.3, 0.3, 1.0),
            polygon_mode: PolygonMode::Fill,
            vsync: true,
            max_fps: None,
            frames: None,
            screenshot: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Cli(clap::Error),
    Io(PathBuf, std::io::Error),
    Json(PathBuf, serde_json::Error),
    InvalidSize { width: u32, height: u32 },
    InvalidMaxFps(f64),
    /// Frame limit of 0, the window would close before drawing
    NoFrames,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Cli(error) => write!(f, "{}", error),
            ConfigError::Io(path, error) => {
                write!(f, "couldn't read config {}: {}", path.display(), error)
            }
            ConfigError::Json(path, error) => {
                write!(f, "invalid config {}: {}", path.display(), error)
            }
            ConfigError::InvalidSize { width, height } => {
                write!(f, "invalid window size {}x{}", width, height)
            }
            ConfigError::InvalidMaxFps(max_fps) => write!(f, "invalid max fps: {}", max_fps),
            ConfigError::NoFrames => write!(f, "frame limit must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Cli(error) => Some(error),
            ConfigError::Io(_, error) => Some(error),
            ConfigError::Json(_, error) => Some(error),
            _ => None,
        }
    }
}

impl From<clap::Error> for ConfigError {
    fn from(error: clap::Error) -> Self {
        ConfigError::Cli(error)
    }
}

/// Config file contents, every field is optional and overrides the
/// exercise's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    width: Option<u32>,
    height: Option<u32>,
    title: Option<String>,
    gl_version: Option<(u32, u32)>,
    clear_color: Option<glm::Vec4>,
    polygon_mode: Option<PolygonMode>,
    vsync: Option<bool>,
    max_fps: Option<f64>,
    frames: Option<u64>,
    screenshot: Option<PathBuf>,
}

impl ConfigFile {
    pub fn from_json(json: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|error| ConfigError::Json(path.to_path_buf(), error))
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|error| ConfigError::Io(path.to_path_buf(), error))?;
        Self::from_json(&json, path)
    }

    pub fn apply(self, config: &mut Config) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
        if let Some(gl_version) = self.gl_version {
            config.gl_version = gl_version;
        }
        if let Some(clear_color) = self.clear_color {
            config.clear_color = clear_color;
        }
        if let Some(polygon_mode) = self.polygon_mode {
            config.polygon_mode = polygon_mode;
        }
        if let Some(vsync) = self.vsync {
            config.vsync = vsync;
        }
        if self.max_fps.is_some() {
            config.max_fps = self.max_fps;
        }
        if self.frames.is_some() {
            config.frames = self.frames;
        }
        if self.screenshot.is_some() {
            config.screenshot = self.screenshot;
        }
    }
}

#[derive(Debug, Default)]
pub struct InputArguments {
    config_file: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    title: Option<String>,
    polygon_mode: Option<PolygonMode>,
    no_vsync: bool,
    max_fps: Option<f64>,
    frames: Option<u64>,
    screenshot: Option<PathBuf>,
}

impl InputArguments {
    fn get_app(name: &str, about: &'static str) -> App<'static, 'static> {
        App::new(name.to_string())
            .version(env!("CARGO_PKG_VERSION"))
            .about(about)
            .arg(
                Arg::with_name("config")
                    .long("config")
                    .short("c")
                    .help("JSON config file, command line arguments override its values")
                    .takes_value(true)
                    .value_name("file"),
            )
            .arg(
                Arg::with_name("width")
                    .long("width")
                    .help("Window width")
                    .requires("height")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("height")
                    .long("height")
                    .help("Window height")
                    .requires("width")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("title")
                    .long("title")
                    .help("Window title")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("polygon-mode")
                    .long("polygon-mode")
                    .help("Rasterize triangles filled or as wireframe, toggle at runtime with W")
                    .takes_value(true)
                    .possible_values(&["fill", "line"]),
            )
            .arg(
                Arg::with_name("wireframe")
                    .long("wireframe")
                    .help("Start in wireframe mode, same as --polygon-mode line")
                    .conflicts_with("polygon-mode"),
            )
            .arg(
                Arg::with_name("no-vsync")
                    .long("no-vsync")
                    .help("Swap buffers without waiting for vertical sync"),
            )
            .arg(
                Arg::with_name("max-fps")
                    .long("max-fps")
                    .help("Limit the frame rate")
                    .takes_value(true)
                    .value_name("fps"),
            )
            .arg(
                Arg::with_name("frames")
                    .long("frames")
                    .help("Close the window after rendering this many frames")
                    .takes_value(true)
                    .value_name("count"),
            )
            .arg(
                Arg::with_name("screenshot")
                    .long("screenshot")
                    .help("Save the last rendered frame to an image file")
                    .takes_value(true)
                    .value_name("file"),
            )
    }

    fn from_matches(matches: &clap::ArgMatches) -> Result<Self, ConfigError> {
        Ok(InputArguments {
            config_file: matches.value_of("config").map(PathBuf::from),
            width: if matches.is_present("width") {
                Some(value_t!(matches, "width", u32)?)
            } else {
                None
            },
            height: if matches.is_present("height") {
                Some(value_t!(matches, "height", u32)?)
            } else {
                None
            },
            title: matches.value_of("title").map(str::to_string),
            polygon_mode: if matches.is_present("wireframe") {
                Some(PolygonMode::Line)
            } else if matches.is_present("polygon-mode") {
                Some(value_t!(matches, "polygon-mode", PolygonMode)?)
            } else {
                None
            },
            no_vsync: matches.is_present("no-vsync"),
            max_fps: if matches.is_present("max-fps") {
                Some(value_t!(matches, "max-fps", f64)?)
            } else {
                None
            },
            frames: if matches.is_present("frames") {
                Some(value_t!(matches, "frames", u64)?)
            } else {
                None
            },
            screenshot: matches.value_of("screenshot").map(PathBuf::from),
        })
    }

    /// read the input arguments from the command line arguments,
    /// exits on `--help`, `--version` or invalid arguments
    pub fn read_cli(name: &str, about: &'static str) -> Result<Self, ConfigError> {
        Self::from_matches(&Self::get_app(name, about).get_matches())
    }

    /// read the input arguments from the given arguments, the first
    /// is the binary name
    pub fn read_args<I, T>(name: &str, about: &'static str, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_matches(&Self::get_app(name, about).get_matches_from_safe(args)?)
    }

    /// Build the final config: `defaults` overridden by the config
    /// file (if given) overridden by the command line.
    pub fn into_config(self, defaults: Config) -> Result<Config, ConfigError> {
        let mut config = defaults;

        if let Some(config_file) = self.config_file.as_ref() {
            log::debug!("reading config file {}", config_file.display());
            ConfigFile::read(config_file)?.apply(&mut config);
        }

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
        if let Some(polygon_mode) = self.polygon_mode {
            config.polygon_mode = polygon_mode;
        }
        if self.no_vsync {
            config.vsync = false;
        }
        if self.max_fps.is_some() {
            config.max_fps = self.max_fps;
        }
        if self.frames.is_some() {
            config.frames = self.frames;
        }
        if self.screenshot.is_some() {
            config.screenshot = self.screenshot;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Config from the command line (and the config file it points
    /// to) on top of `defaults`.
    pub fn read_cli(name: &str, about: &'static str, defaults: Config) -> Result<Config, ConfigError> {
        InputArguments::read_cli(name, about)?.into_config(defaults)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(max_fps) = self.max_fps {
            if !max_fps.is_finite() || max_fps <= 0.0 {
                return Err(ConfigError::InvalidMaxFps(max_fps));
            }
        }
        if self.frames == Some(0) {
            return Err(ConfigError::NoFrames);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_args(args: &[&str]) -> Result<Config, ConfigError> {
        InputArguments::read_args("test", "test app", args)?.into_config(Config::default())
    }

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, "LearnOpenGL");
        assert_eq!(config.gl_version, (3, 3));
        assert_eq!(config.clear_color, glm::vec4(0.2, 0.3, 0.3, 1.0));
        assert_eq!(config.polygon_mode, PolygonMode::Fill);
        assert!(config.vsync);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn input_arguments_none_given() {
        assert_eq!(read_args(&["test"]).unwrap(), Config::default());
    }

    #[test]
    fn input_arguments_override_defaults() {
        let config = read_args(&[
            "test",
            "--width",
            "1024",
            "--height",
            "768",
            "--title",
            "hello",
            "--polygon-mode",
            "line",
            "--no-vsync",
            "--max-fps",
            "30",
            "--frames",
            "10",
            "--screenshot",
            "out.png",
        ])
        .unwrap();
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.title, "hello");
        assert_eq!(config.polygon_mode, PolygonMode::Line);
        assert!(!config.vsync);
        assert_eq!(config.max_fps, Some(30.0));
        assert_eq!(config.frames, Some(10));
        assert_eq!(config.screenshot, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn input_arguments_width_requires_height() {
        match read_args(&["test", "--width", "1024"]) {
            Err(ConfigError::Cli(_)) => (),
            _ => panic!("Should have gotten a cli error"),
        }
    }

    #[test]
    fn input_arguments_invalid_number() {
        match read_args(&["test", "--frames", "ten"]) {
            Err(ConfigError::Cli(_)) => (),
            _ => panic!("Should have gotten a cli error"),
        }
    }

    #[test]
    fn input_arguments_wireframe() {
        let config = read_args(&["test", "--wireframe"]).unwrap();
        assert_eq!(config.polygon_mode, PolygonMode::Line);

        // a filled default is overridden too
        let config = InputArguments::read_args("test", "test app", &["test", "--wireframe"])
            .unwrap()
            .into_config(Config {
                polygon_mode: PolygonMode::Fill,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.polygon_mode, PolygonMode::Line);
    }

    #[test]
    fn input_arguments_wireframe_conflicts_with_polygon_mode() {
        match read_args(&["test", "--wireframe", "--polygon-mode", "fill"]) {
            Err(ConfigError::Cli(_)) => (),
            _ => panic!("Should have gotten a cli error"),
        }
    }

    #[test]
    fn input_arguments_zero_frames() {
        match read_args(&["test", "--frames", "0"]) {
            Err(ConfigError::NoFrames) => (),
            _ => panic!("Should have gotten a no frames error"),
        }
        assert_eq!(read_args(&["test", "--frames", "1"]).unwrap().frames, Some(1));
    }

    #[test]
    fn config_file_zero_frames() {
        let mut config = Config::default();
        ConfigFile::from_json(r#"{ "frames": 0 }"#, Path::new("test.json"))
            .unwrap()
            .apply(&mut config);
        match config.validate() {
            Err(ConfigError::NoFrames) => (),
            _ => panic!("Should have gotten a no frames error"),
        }
    }

    #[test]
    fn input_arguments_invalid_polygon_mode() {
        assert!(read_args(&["test", "--polygon-mode", "point"]).is_err());
    }

    #[test]
    fn input_arguments_zero_size() {
        match read_args(&["test", "--width", "0", "--height", "600"]) {
            Err(ConfigError::InvalidSize { width, height }) => {
                assert_eq!((width, height), (0, 600))
            }
            _ => panic!("Should have gotten an invalid size error"),
        }
    }

    #[test]
    fn input_arguments_invalid_max_fps() {
        match read_args(&["test", "--max-fps", "0"]) {
            Err(ConfigError::InvalidMaxFps(max_fps)) => assert_eq!(max_fps, 0.0),
            _ => panic!("Should have gotten an invalid max fps error"),
        }
    }

    #[test]
    fn input_arguments_missing_config_file() {
        match read_args(&["test", "--config", "does/not/exist.json"]) {
            Err(ConfigError::Io(path, _)) => {
                assert_eq!(path, PathBuf::from("does/not/exist.json"))
            }
            _ => panic!("Should have gotten an io error"),
        }
    }

    #[test]
    fn config_file_partial_override() {
        let file = ConfigFile::from_json(
            r#"{ "title": "from file", "clear_color": [0.0, 0.0, 0.0, 1.0], "polygon_mode": "line" }"#,
            Path::new("test.json"),
        )
        .unwrap();
        let mut config = Config::default();
        file.apply(&mut config);
        assert_eq!(config.title, "from file");
        assert_eq!(config.clear_color, glm::vec4(0.0, 0.0, 0.0, 1.0));
        assert_eq!(config.polygon_mode, PolygonMode::Line);
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn config_file_unknown_field() {
        match ConfigFile::from_json(r#"{ "widht": 10 }"#, Path::new("test.json")) {
            Err(ConfigError::Json(path, _)) => assert_eq!(path, PathBuf::from("test.json")),
            _ => panic!("Should have gotten a json error"),
        }
    }

    #[test]
    fn command_line_overrides_config_file() {
        let path = std::env::temp_dir().join(format!(
            "learn_gl_config_test_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "width": 640, "height": 480, "title": "from file" }"#)
            .unwrap();

        let config = read_args(&[
            "test",
            "--config",
            path.to_str().unwrap(),
            "--title",
            "from cli",
        ]);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.title, "from cli");
    }

    #[test]
    fn polygon_mode_toggled() {
        assert_eq!(PolygonMode::Fill.toggled(), PolygonMode::Line);
        assert_eq!(PolygonMode::Line.toggled(), PolygonMode::Fill);
        assert_eq!(PolygonMode::Line.to_gl(), gl::LINE);
    }
}
