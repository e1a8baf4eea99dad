use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PlanError};

/// Which transport layer a resource exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    #[default]
    Rest,
    Microservice,
    Ws,
    GraphqlCodeFirst,
    GraphqlSchemaFirst,
}

impl TransportKind {
    pub const ALL: [TransportKind; 5] = [
        TransportKind::Rest,
        TransportKind::Microservice,
        TransportKind::Ws,
        TransportKind::GraphqlCodeFirst,
        TransportKind::GraphqlSchemaFirst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Rest => "rest",
            TransportKind::Microservice => "microservice",
            TransportKind::Ws => "ws",
            TransportKind::GraphqlCodeFirst => "graphql-code-first",
            TransportKind::GraphqlSchemaFirst => "graphql-schema-first",
        }
    }

    pub fn is_graphql(&self) -> bool {
        matches!(
            self,
            TransportKind::GraphqlCodeFirst | TransportKind::GraphqlSchemaFirst
        )
    }
}

impl FromStr for TransportKind {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PlanError::UnknownTransport(s.to_string()))
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source language of the generated files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ts,
    Js,
}

impl Language {
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Ts => "ts",
            Language::Js => "js",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Inputs to a single resource generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub name: String,
    pub kind: TransportKind,
    /// Emit input/output/type files.
    pub crud: bool,
    /// Emit spec companions for the transport and service files.
    pub spec: bool,
    /// Infix of spec companion file names (`users.service.<suffix>.ts`).
    pub spec_file_suffix: String,
    /// Write into the invocation directory instead of a per-resource folder.
    pub flat: bool,
    /// Host has `@nestjs/swagger`; only affects rendered content.
    pub is_swagger_installed: bool,
    pub language: Language,
}

pub const DEFAULT_SPEC_FILE_SUFFIX: &str = "spec";

impl GenerationOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: TransportKind::Rest,
            crud: true,
            spec: true,
            spec_file_suffix: DEFAULT_SPEC_FILE_SUFFIX.to_string(),
            flat: false,
            is_swagger_installed: false,
            language: Language::Ts,
        }
    }
}

/// Project configuration loaded from `.nestgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NestgenConfig {
    /// Directory generated resources are written under.
    pub source_root: String,
    pub language: Language,
    pub defaults: ResourceDefaults,
}

impl Default for NestgenConfig {
    fn default() -> Self {
        Self {
            source_root: "src".to_string(),
            language: Language::Ts,
            defaults: ResourceDefaults::default(),
        }
    }
}

/// Per-project defaults for generation flags not given on the command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceDefaults {
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub crud: bool,
    pub spec: bool,
    pub spec_file_suffix: String,
    pub flat: bool,
}

impl Default for ResourceDefaults {
    fn default() -> Self {
        Self {
            kind: TransportKind::Rest,
            crud: true,
            spec: true,
            spec_file_suffix: DEFAULT_SPEC_FILE_SUFFIX.to_string(),
            flat: false,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".nestgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<NestgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: NestgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(Some(config))
}

/// Subset of `package.json` needed to inspect installed packages.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackageJson {
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<String, String>,
}

pub const SWAGGER_PACKAGE: &str = "@nestjs/swagger";

/// Nearest `package.json` in `start` or one of its ancestors.
pub fn find_package_json(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("package.json"))
        .find(|path| path.is_file())
}

/// Whether `@nestjs/swagger` is listed in the `package.json` of the project
/// containing `dir`.
///
/// A missing `package.json` counts as "not installed".
pub fn detect_swagger_installed(dir: &Path) -> Result<bool, ConfigError> {
    let Some(path) = find_package_json(dir) else {
        return Ok(false);
    };
    log::debug!("reading {}", path.display());
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let package: PackageJson = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let installed = package.dependencies.contains_key(SWAGGER_PACKAGE)
        || package.dev_dependencies.contains_key(SWAGGER_PACKAGE);
    log::debug!("{SWAGGER_PACKAGE} installed: {installed}");
    Ok(installed)
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# nestgen configuration
source_root: src      # resources are generated under this directory
language: ts          # ts | js

defaults:
  type: rest          # rest | microservice | ws | graphql-code-first | graphql-schema-first
  crud: true          # generate input/, output/ and type/ files
  spec: true          # generate spec companions for the transport and service files
  spec_file_suffix: spec
  flat: false         # write files without a per-resource directory
"#
}
