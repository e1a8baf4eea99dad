use nestgen_core::config::Language;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("no {0} template set is available (only ts is supported)")]
    UnsupportedLanguage(Language),
}
