pub mod config;
pub mod error;
pub mod naming;
pub mod plan;
pub mod profile;

use plan::{FileManifest, TemplateContext, TemplateId};

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Turns a template id and its context into file content.
///
/// Implementations must be pure: the same inputs always render the same text.
pub trait TemplateRenderer {
    type Error: std::error::Error;

    fn render(&self, template: TemplateId, context: &TemplateContext)
    -> Result<String, Self::Error>;
}

/// Render every enabled manifest entry, in manifest order.
///
/// Nothing is returned unless every entry renders, so callers never see a
/// partial file set.
pub fn materialize<R: TemplateRenderer>(
    manifest: &FileManifest,
    renderer: &R,
) -> Result<Vec<GeneratedFile>, R::Error> {
    manifest
        .enabled()
        .map(|entry| {
            log::debug!("rendering {} from {}", entry.path, entry.template.as_str());
            Ok(GeneratedFile {
                path: manifest.full_path(entry),
                content: renderer.render(entry.template, &manifest.context)?,
            })
        })
        .collect()
}
