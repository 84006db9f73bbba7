//! Template engine for wrapping generated snippets.

use crate::error::{CodegenError, Result};
use crate::settings::{Framework, FlutterGenerationMode, PluginSettings, SwiftUIGenerationMode};
use handlebars::Handlebars;
use serde::Serialize;

const FLUTTER_WIDGET: &str = r#"class {{pascal_case name}} extends StatelessWidget {
  const {{pascal_case name}}({super.key});

  @override
  Widget build(BuildContext context) {
    return {{hanging_indent body 4}};
  }
}"#;

const FLUTTER_APP: &str = r#"import 'package:flutter/material.dart';

void main() {
  runApp(const FigmaToCodeApp());
}

class FigmaToCodeApp extends StatelessWidget {
  const FigmaToCodeApp({super.key});

  @override
  Widget build(BuildContext context) {
    return MaterialApp(
      theme: ThemeData.dark().copyWith(
        scaffoldBackgroundColor: const Color.fromARGB(255, 18, 32, 47),
      ),
      home: Scaffold(
        body: ListView(children: [
          {{pascal_case name}}(),
        ]),
      ),
    );
  }
}

{{> flutter_widget}}"#;

const SWIFTUI_VIEW: &str = r#"import SwiftUI

struct {{pascal_case name}}: View {
  var body: some View {
    {{hanging_indent body 4}}
  }
}"#;

const SWIFTUI_PREVIEW: &str = r#"{{> swiftui_view}}

#Preview {
  {{pascal_case name}}()
}"#;

/// Data the wrapping templates render.
#[derive(Debug, Serialize)]
struct WrapData<'a> {
    name: String,
    body: &'a str,
}

/// Template engine using Handlebars.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create an engine with the built-in wrapping templates registered.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // Output is source code, not HTML.
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_helpers(&mut handlebars);

        let mut engine = Self { handlebars };
        engine.register_template("flutter_widget", FLUTTER_WIDGET)?;
        engine.register_template("flutter_app", FLUTTER_APP)?;
        engine.register_template("swiftui_view", SWIFTUI_VIEW)?;
        engine.register_template("swiftui_preview", SWIFTUI_PREVIEW)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        if !self.handlebars.has_template(name) {
            return Err(CodegenError::TemplateNotFound(name.to_string()));
        }
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Wrap `body` per the framework's generation mode. Snippet modes and
    /// the markup targets return the body unchanged.
    pub fn wrap(&self, body: &str, layer_name: &str, settings: &PluginSettings) -> Result<String> {
        let template = match settings.framework {
            Framework::Flutter => match settings.flutter_generation_mode {
                FlutterGenerationMode::Snippet => None,
                FlutterGenerationMode::Stateless => Some("flutter_widget"),
                FlutterGenerationMode::FullApp => Some("flutter_app"),
            },
            Framework::SwiftUI => match settings.swiftui_generation_mode {
                SwiftUIGenerationMode::Snippet => None,
                SwiftUIGenerationMode::Struct => Some("swiftui_view"),
                SwiftUIGenerationMode::Preview => Some("swiftui_preview"),
            },
            Framework::Html | Framework::Tailwind => None,
        };

        match template {
            Some(template) => self.render(
                template,
                &WrapData {
                    name: component_name(layer_name),
                    body,
                },
            ),
            None => Ok(body.to_string()),
        }
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        // Pascal case helper
        handlebars.register_helper(
            "pascal_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&to_pascal_case(param))?;
                    Ok(())
                },
            ),
        );

        // Indents every line but the first, for content that continues a
        // line already indented by the template.
        handlebars.register_helper(
            "hanging_indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(4) as usize;

                    let indent = " ".repeat(spaces);
                    let indented = content
                        .lines()
                        .enumerate()
                        .map(|(i, line)| {
                            if i == 0 || line.trim().is_empty() {
                                line.to_string()
                            } else {
                                format!("{}{}", indent, line)
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("\n");
                    out.write(&indented)?;
                    Ok(())
                },
            ),
        );
    }
}

/// Convert to PascalCase.
fn to_pascal_case(s: &str) -> String {
    use convert_case::{Case, Casing};
    s.to_case(Case::Pascal)
}

/// A layer name usable as a type name once PascalCased.
fn component_name(layer_name: &str) -> String {
    let cleaned: String = layer_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "Component".to_string()
    } else if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Component {cleaned}")
    } else {
        cleaned.to_string()
    }
}
