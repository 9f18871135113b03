//! Template sources
//!
//! Template text comes from one of four kinds of source, each handled by its own branch of
//! [`DefaultLoader`]:
//!
//! - `literal`: the identifier is the template text
//! - `resource`: a named string bundled with the program, registered in [`Resources`]
//! - `file`: a UTF-8 file, relative paths resolved against [`LoaderConfig::base_dir`]
//! - `url`: fetched with a blocking HTTP GET (requires the `http` feature)
//!
//! Callers with other needs implement [`Loader`] themselves.

use std::{
    collections::HashMap,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{SourceUnavailable, UnavailableCause};

/// Default timeout for URL requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent for URL requests
pub const USER_AGENT: &str = "guillemet";

/// The kind of place template text is loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Literal,
    Resource,
    File,
    Url,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Literal => "literal",
            SourceKind::Resource => "resource",
            SourceKind::File => "file",
            SourceKind::Url => "url",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown source kind `{0}`, expected one of literal, resource, file, url")]
pub struct UnknownSourceKind(pub String);

impl FromStr for SourceKind {
    type Err = UnknownSourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(SourceKind::Literal),
            "resource" => Ok(SourceKind::Resource),
            "file" => Ok(SourceKind::File),
            "url" => Ok(SourceKind::Url),
            other => Err(UnknownSourceKind(other.to_string())),
        }
    }
}

/// A source kind paired with its identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Literal(&'a str),
    Resource(&'a str),
    File(&'a Path),
    Url(&'a str),
}

impl<'a> Source<'a> {
    pub fn new(kind: SourceKind, identifier: &'a str) -> Self {
        match kind {
            SourceKind::Literal => Source::Literal(identifier),
            SourceKind::Resource => Source::Resource(identifier),
            SourceKind::File => Source::File(Path::new(identifier)),
            SourceKind::Url => Source::Url(identifier),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Literal(_) => SourceKind::Literal,
            Source::Resource(_) => SourceKind::Resource,
            Source::File(_) => SourceKind::File,
            Source::Url(_) => SourceKind::Url,
        }
    }

    /// The identifier as shown in logs and errors
    pub fn location(&self) -> String {
        match self {
            Source::Literal(text) | Source::Resource(text) | Source::Url(text) => text.to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

/// Fetches raw template text
pub trait Loader {
    fn load(&self, source: &Source<'_>) -> Result<String, SourceUnavailable>;
}

impl<L: Loader + ?Sized> Loader for &L {
    fn load(&self, source: &Source<'_>) -> Result<String, SourceUnavailable> {
        (**self).load(source)
    }
}

/// Named template texts compiled into the program
///
/// ```rust
/// use guillemet::Resources;
///
/// let resources = Resources::new().with("greeting", "Hello «Name»!");
/// assert_eq!(resources.get("greeting"), Some("Hello «Name»!"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resources {
    entries: HashMap<String, &'static str>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, text: &'static str) -> Self {
        self.insert(name, text);
        self
    }

    /// Registers `text` under `name`, returning the text it replaced
    pub fn insert(&mut self, name: impl Into<String>, text: &'static str) -> Option<&'static str> {
        self.entries.insert(name.into(), text)
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loader settings
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory relative file paths are resolved against; the working directory when unset
    pub base_dir: Option<PathBuf>,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Loads every [`SourceKind`]
#[derive(Debug, Clone, Default)]
pub struct DefaultLoader {
    config: LoaderConfig,
    resources: Resources,
}

impl DefaultLoader {
    pub fn new(config: LoaderConfig, resources: Resources) -> Self {
        Self { config, resources }
    }

    pub fn with_resources(resources: Resources) -> Self {
        Self::new(LoaderConfig::default(), resources)
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.config.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn load_resource(&self, name: &str) -> Result<String, UnavailableCause> {
        self.resources
            .get(name)
            .map(str::to_string)
            .ok_or(UnavailableCause::MissingResource)
    }

    fn load_file(&self, path: &Path) -> Result<String, UnavailableCause> {
        Ok(fs::read_to_string(self.resolve_path(path))?)
    }

    #[cfg(feature = "http")]
    fn load_url(&self, url: &str) -> Result<String, UnavailableCause> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .timeout(self.config.http_timeout)
            .build()?;
        let response = client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(UnavailableCause::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }

    #[cfg(not(feature = "http"))]
    fn load_url(&self, _url: &str) -> Result<String, UnavailableCause> {
        Err(UnavailableCause::HttpDisabled)
    }
}

impl Loader for DefaultLoader {
    fn load(&self, source: &Source<'_>) -> Result<String, SourceUnavailable> {
        debug!(kind = %source.kind(), location = %source.location(), "loading template");
        let loaded = match *source {
            Source::Literal(text) => Ok(text.to_string()),
            Source::Resource(name) => self.load_resource(name),
            Source::File(path) => self.load_file(path),
            Source::Url(url) => self.load_url(url),
        };
        loaded.map_err(|cause| {
            let err = SourceUnavailable::new(source.kind(), source.location(), cause);
            warn!(error = %err, cause = %err.cause, "template source unavailable");
            err
        })
    }
}
