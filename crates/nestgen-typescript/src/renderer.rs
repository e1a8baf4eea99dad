use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use nestgen_core::TemplateRenderer;
use nestgen_core::config::Language;
use nestgen_core::plan::{TemplateContext, TemplateId};

use crate::error::RenderError;

/// Template sources, registered under [`TemplateId::as_str`].
const TEMPLATES: [(TemplateId, &str); 18] = [
    (TemplateId::Controller, include_str!("../templates/controller.j2")),
    (TemplateId::Gateway, include_str!("../templates/gateway.j2")),
    (TemplateId::Resolver, include_str!("../templates/resolver.j2")),
    (
        TemplateId::ControllerSpec,
        include_str!("../templates/controller.spec.j2"),
    ),
    (
        TemplateId::GatewaySpec,
        include_str!("../templates/gateway.spec.j2"),
    ),
    (
        TemplateId::ResolverSpec,
        include_str!("../templates/resolver.spec.j2"),
    ),
    (
        TemplateId::GraphqlSchema,
        include_str!("../templates/schema.graphql.j2"),
    ),
    (TemplateId::Module, include_str!("../templates/module.j2")),
    (TemplateId::Service, include_str!("../templates/service.j2")),
    (
        TemplateId::ServiceSpec,
        include_str!("../templates/service.spec.j2"),
    ),
    (TemplateId::Args, include_str!("../templates/args.j2")),
    (
        TemplateId::CreateInput,
        include_str!("../templates/input.create.j2"),
    ),
    (
        TemplateId::UpdateInput,
        include_str!("../templates/input.update.j2"),
    ),
    (
        TemplateId::RemoveInput,
        include_str!("../templates/input.remove.j2"),
    ),
    (
        TemplateId::CreateOutput,
        include_str!("../templates/output.create.j2"),
    ),
    (
        TemplateId::UpdateOutput,
        include_str!("../templates/output.update.j2"),
    ),
    (
        TemplateId::RemoveOutput,
        include_str!("../templates/output.remove.j2"),
    ),
    (TemplateId::Type, include_str!("../templates/type.j2")),
];

/// Renders NestJS TypeScript sources from the embedded template set.
pub struct NestRenderer {
    env: Environment<'static>,
}

impl NestRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        for (id, source) in TEMPLATES {
            env.add_template(id.as_str(), source)?;
        }
        log::debug!("registered {} templates", TEMPLATES.len());
        Ok(Self { env })
    }
}

impl TemplateRenderer for NestRenderer {
    type Error = RenderError;

    fn render(&self, template: TemplateId, context: &TemplateContext) -> Result<String, RenderError> {
        if context.language != Language::Ts {
            return Err(RenderError::UnsupportedLanguage(context.language));
        }
        let tmpl = self.env.get_template(template.as_str())?;
        Ok(tmpl.render(context)?)
    }
}
