//! Template engine for project scaffolding files.

use crate::error::{CodegenError, Result};
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

pub const INDEX_HTML_TEMPLATE: &str = "index.html";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="{{language}}">
  <head>
    <meta charset="utf-8" />
{{#each meta}}
    <meta name="{{name}}" content="{{content}}" />
{{/each}}
    <title>{{title}}</title>
  </head>
  <body>
    <div id="app"></div>
  </body>
</html>
"#;

/// Handlebars without HTML escaping; callers escape values where the
/// target format needs it.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);
        Self { handlebars }
    }

    /// An engine with the project scaffolding templates registered.
    pub fn with_project_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template(INDEX_HTML_TEMPLATE, INDEX_HTML)?;
        Ok(engine)
    }

    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}
