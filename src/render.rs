//! Template lookup and execution for one output.
//!
//! The rendering pipeline proper lives with the caller; this module only
//! picks the first available layout and turns engine failures into
//! [`BuildError`]s carrying the render name.

use std::io::Write;
use std::sync::Arc;

use serde_json::Value;

use crate::site::{BuildError, Template, TemplateEngine, cause};

/// First layout in `layouts` the engine knows.
pub fn lookup_layouts(engine: &dyn TemplateEngine, layouts: &[&str]) -> Option<Arc<dyn Template>> {
    layouts.iter().find_map(|name| engine.lookup(name))
}

/// Execute `template` into `out`.
///
/// Without a template nothing is written: a `required` render fails, any
/// other is skipped with a diagnostic. Returns whether anything was
/// rendered.
pub fn render_for_template(
    engine: &dyn TemplateEngine,
    name: &str,
    output_format: &str,
    data: &Value,
    out: &mut dyn Write,
    template: Option<&dyn Template>,
    required: bool,
) -> Result<bool, BuildError> {
    let Some(template) = template else {
        if required {
            return Err(BuildError::MissingLayout {
                name: name.to_string(),
            });
        }
        log_missing_layout(name, output_format);
        return Ok(false);
    };

    engine
        .execute(template, out, data)
        .map_err(|e| BuildError::Render {
            name: name.to_string(),
            source: cause(e),
        })?;
    Ok(true)
}

fn log_missing_layout(name: &str, output_format: &str) {
    let message = format!("found no layout file for {output_format:?} for {name:?}");
    // most themes ship without a 404 layout
    if name == "404" {
        crate::log!("render"; "{message}");
    } else {
        crate::warn!("render"; "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use serde_json::json;
    use std::any::Any;

    struct Named(String);

    impl Template for Named {
        fn name(&self) -> &str {
            &self.0
        }
    }

    struct Engine;

    impl TemplateEngine for Engine {
        fn compile(&self, _: Option<&dyn TemplateEngine>) -> anyhow::Result<()> {
            Ok(())
        }

        fn has_template(&self, path: &str) -> bool {
            path.starts_with("_default/")
        }

        fn lookup(&self, name: &str) -> Option<Arc<dyn Template>> {
            self.has_template(name)
                .then(|| Arc::new(Named(name.to_string())) as Arc<dyn Template>)
        }

        fn execute(&self, template: &dyn Template, out: &mut dyn Write, data: &Value) -> anyhow::Result<()> {
            if data["fail"].as_bool() == Some(true) {
                bail!("can't evaluate field Title");
            }
            write!(out, "<{}>{}", template.name(), data["title"].as_str().unwrap_or(""))?;
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_lookup_takes_first_known_layout() {
        let found = lookup_layouts(&Engine, &["posts/single.html", "_default/single.html", "_default/list.html"]);
        assert_eq!(found.unwrap().name(), "_default/single.html");
        assert!(lookup_layouts(&Engine, &["posts/single.html"]).is_none());
        assert!(lookup_layouts(&Engine, &[]).is_none());
    }

    #[test]
    fn test_render_writes_output() {
        let template = lookup_layouts(&Engine, &["_default/single.html"]).unwrap();
        let mut out = Vec::new();
        let rendered = render_for_template(
            &Engine,
            "page",
            "html",
            &json!({"title": "Hello"}),
            &mut out,
            Some(template.as_ref()),
            false,
        )
        .unwrap();
        assert!(rendered);
        assert_eq!(String::from_utf8(out).unwrap(), "<_default/single.html>Hello");
    }

    #[test]
    fn test_missing_optional_layout_is_skipped() {
        let mut out = Vec::new();
        for name in ["404", "robots"] {
            let rendered =
                render_for_template(&Engine, name, "html", &json!({}), &mut out, None, false).unwrap();
            assert!(!rendered);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_required_layout_fails() {
        let mut out = Vec::new();
        let err = render_for_template(&Engine, "home", "html", &json!({}), &mut out, None, true)
            .unwrap_err();
        assert_eq!(err.to_string(), "found no layout for required render \"home\"");
    }

    #[test]
    fn test_execute_error_names_the_render() {
        let template = Named("_default/single.html".into());
        let mut out = Vec::new();
        let err = render_for_template(
            &Engine,
            "sitemap",
            "xml",
            &json!({"fail": true}),
            &mut out,
            Some(&template),
            true,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "render of \"sitemap\" failed");
        assert!(err.chain().ends_with("can't evaluate field Title"));
    }
}
