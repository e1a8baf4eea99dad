use std::cmp::Ordering;

use serde::Serialize;

use crate::config::{DEFAULT_SPEC_FILE_SUFFIX, GenerationOptions, Language, TransportKind};
use crate::error::PlanError;
use crate::naming::{self, ResourceName};
use crate::profile::{PrimaryKind, profile_for};

/// Identifies the template a manifest entry is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    Controller,
    Gateway,
    Resolver,
    ControllerSpec,
    GatewaySpec,
    ResolverSpec,
    GraphqlSchema,
    Module,
    Service,
    ServiceSpec,
    Args,
    CreateInput,
    UpdateInput,
    RemoveInput,
    CreateOutput,
    UpdateOutput,
    RemoveOutput,
    Type,
}

impl TemplateId {
    pub const ALL: [TemplateId; 18] = [
        TemplateId::Controller,
        TemplateId::Gateway,
        TemplateId::Resolver,
        TemplateId::ControllerSpec,
        TemplateId::GatewaySpec,
        TemplateId::ResolverSpec,
        TemplateId::GraphqlSchema,
        TemplateId::Module,
        TemplateId::Service,
        TemplateId::ServiceSpec,
        TemplateId::Args,
        TemplateId::CreateInput,
        TemplateId::UpdateInput,
        TemplateId::RemoveInput,
        TemplateId::CreateOutput,
        TemplateId::UpdateOutput,
        TemplateId::RemoveOutput,
        TemplateId::Type,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Controller => "controller",
            TemplateId::Gateway => "gateway",
            TemplateId::Resolver => "resolver",
            TemplateId::ControllerSpec => "controller.spec",
            TemplateId::GatewaySpec => "gateway.spec",
            TemplateId::ResolverSpec => "resolver.spec",
            TemplateId::GraphqlSchema => "schema.graphql",
            TemplateId::Module => "module",
            TemplateId::Service => "service",
            TemplateId::ServiceSpec => "service.spec",
            TemplateId::Args => "args",
            TemplateId::CreateInput => "input.create",
            TemplateId::UpdateInput => "input.update",
            TemplateId::RemoveInput => "input.remove",
            TemplateId::CreateOutput => "output.create",
            TemplateId::UpdateOutput => "output.update",
            TemplateId::RemoveOutput => "output.remove",
            TemplateId::Type => "type",
        }
    }

    fn primary(kind: PrimaryKind) -> Self {
        match kind {
            PrimaryKind::Controller => TemplateId::Controller,
            PrimaryKind::Gateway => TemplateId::Gateway,
            PrimaryKind::Resolver => TemplateId::Resolver,
        }
    }

    fn primary_spec(kind: PrimaryKind) -> Self {
        match kind {
            PrimaryKind::Controller => TemplateId::ControllerSpec,
            PrimaryKind::Gateway => TemplateId::GatewaySpec,
            PrimaryKind::Resolver => TemplateId::ResolverSpec,
        }
    }
}

/// One candidate output file. Disabled entries are never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileManifestEntry {
    /// Path relative to the manifest root.
    pub path: String,
    pub template: TemplateId,
    pub enabled: bool,
}

/// Values every template is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
    pub name: ResourceName,
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub primary: PrimaryKind,
    pub crud: bool,
    pub spec: bool,
    pub spec_file_suffix: String,
    pub is_swagger_installed: bool,
    pub language: Language,
    /// `dto` or `input`.
    pub input_suffix: &'static str,
    /// `Dto` or `Input`.
    pub input_class_suffix: &'static str,
    /// `Controller`, `Gateway` or `Resolver`.
    pub primary_class_suffix: &'static str,
}

/// Ordered list of files making up one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileManifest {
    /// Directory the entries live in: `users`, or `admin/users` for a name
    /// given as `admin/users`. Flat generation drops the resource folder, so
    /// only the directory part of the name remains (`None` for plain names).
    pub root: Option<String>,
    pub entries: Vec<FileManifestEntry>,
    #[serde(skip)]
    pub context: TemplateContext,
}

impl FileManifest {
    pub fn enabled(&self) -> impl Iterator<Item = &FileManifestEntry> {
        self.entries.iter().filter(|entry| entry.enabled)
    }

    /// Path of `entry` including the resource directory.
    pub fn full_path(&self, entry: &FileManifestEntry) -> String {
        match &self.root {
            Some(root) => format!("{root}/{}", entry.path),
            None => entry.path.clone(),
        }
    }

    /// Root-relative paths of the enabled entries, in manifest order.
    pub fn paths(&self) -> Vec<&str> {
        self.enabled().map(|entry| entry.path.as_str()).collect()
    }

    /// Full paths of the enabled entries, in manifest order.
    pub fn full_paths(&self) -> Vec<String> {
        self.enabled().map(|entry| self.full_path(entry)).collect()
    }
}

/// Derive the resource name from `options` and plan its files.
pub fn plan_resource(options: &GenerationOptions) -> Result<FileManifest, PlanError> {
    let name = naming::transform(&options.name)?;
    Ok(build_plan(&name, options))
}

/// Compute the file manifest for `name`.
///
/// Every candidate file is listed as a row gated by a boolean, evaluated in
/// this order:
///
/// 1. primary transport file (plus `<stem>.graphql` for schema-first)
/// 2. module file
/// 3. service file
/// 4. spec companions of the primary and service files, iff `spec`
/// 5. `args/` file
/// 6. `output/`, `input/` and `type/` files, iff `crud`
///
/// `flat` only drops the resource directory. Rows are then put in canonical
/// order (see [`canonical_order`]).
pub fn build_plan(name: &ResourceName, options: &GenerationOptions) -> FileManifest {
    let profile = profile_for(options.kind);
    let ext = options.language.extension();
    let stem = &name.file_stem;
    let single = &name.singular_stem;
    let primary = profile.primary.as_str();
    let input = profile.input_suffix.as_str();
    let spec_suffix = spec_file_suffix(&options.spec_file_suffix);
    let crud = options.crud;
    let spec = options.spec;

    let rows = [
        (
            format!("{stem}.{primary}.{ext}"),
            TemplateId::primary(profile.primary),
            true,
        ),
        (
            format!("{stem}.graphql"),
            TemplateId::GraphqlSchema,
            profile.schema_file,
        ),
        (format!("{stem}.module.{ext}"), TemplateId::Module, true),
        (format!("{stem}.service.{ext}"), TemplateId::Service, true),
        (
            format!("{stem}.{primary}.{spec_suffix}.{ext}"),
            TemplateId::primary_spec(profile.primary),
            spec,
        ),
        (
            format!("{stem}.service.{spec_suffix}.{ext}"),
            TemplateId::ServiceSpec,
            spec,
        ),
        (format!("args/{single}.args.{ext}"), TemplateId::Args, true),
        (
            format!("output/create-{single}.output.{ext}"),
            TemplateId::CreateOutput,
            crud,
        ),
        (
            format!("output/update-{single}.output.{ext}"),
            TemplateId::UpdateOutput,
            crud,
        ),
        (
            format!("output/remove-{single}.output.{ext}"),
            TemplateId::RemoveOutput,
            crud,
        ),
        (
            format!("input/create-{single}.{input}.{ext}"),
            TemplateId::CreateInput,
            crud,
        ),
        (
            format!("input/update-{single}.{input}.{ext}"),
            TemplateId::UpdateInput,
            crud,
        ),
        (
            format!("input/remove-{single}.input.{ext}"),
            TemplateId::RemoveInput,
            crud && profile.remove_input,
        ),
        (format!("type/{single}.type.{ext}"), TemplateId::Type, crud),
    ];

    let mut entries: Vec<FileManifestEntry> = rows
        .into_iter()
        .map(|(path, template, enabled)| FileManifestEntry {
            path,
            template,
            enabled,
        })
        .collect();
    entries.sort_by(|a, b| canonical_order(&a.path, &b.path));

    let root = match (&name.directory, options.flat) {
        (Some(dir), false) => Some(format!("{dir}/{stem}")),
        (None, false) => Some(stem.clone()),
        (dir, true) => dir.clone(),
    };

    let manifest = FileManifest {
        root,
        entries,
        context: TemplateContext {
            name: name.clone(),
            kind: options.kind,
            primary: profile.primary,
            crud,
            spec,
            spec_file_suffix: spec_suffix.to_string(),
            is_swagger_installed: options.is_swagger_installed,
            language: options.language,
            input_suffix: input,
            input_class_suffix: profile.input_suffix.class_suffix(),
            primary_class_suffix: profile.primary.class_suffix(),
        },
    };

    log::debug!(
        "planned {} of {} files for {} ({})",
        manifest.enabled().count(),
        manifest.entries.len(),
        name.raw,
        options.kind
    );

    manifest
}

/// An empty suffix would produce `users.service..ts`; fall back to `spec`.
/// Any other suffix is used verbatim.
fn spec_file_suffix(suffix: &str) -> &str {
    if suffix.is_empty() {
        DEFAULT_SPEC_FILE_SUFFIX
    } else {
        suffix
    }
}

/// Files directly in the root come first, then subdirectories by name; names
/// within a directory compare byte-wise.
pub fn canonical_order(a: &str, b: &str) -> Ordering {
    fn key(path: &str) -> (bool, &str, &str) {
        match path.rsplit_once('/') {
            Some((dir, file)) => (true, dir, file),
            None => (false, "", path),
        }
    }
    key(a).cmp(&key(b))
}
