//! Tera-backed template engine.
//!
//! Besides Tera's builtins, templates can use these filters:
//!
//! - `ts_type`: a parameter type → its TypeScript type
//! - `ts_return`: a list of output parameters → the promised TypeScript type
//! - `camel_case`, `pascal_case`, `snake_case`: identifier case conversion

use std::collections::HashMap;

use jsbind_core::{to_camel_case, to_pascal_case, to_snake_case};
use jsbind_ir::{ParamType, Parameter};
use serde_json::Value;
use tera::{Context, Tera};

use super::{Renderer, TemplateEngine, TemplateError};
use crate::typescript::{TypeMapper, TypeScriptTypeMapper};

/// Template engine using [Tera](https://keats.github.io/tera/).
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraEngine;

impl TemplateEngine for TeraEngine {
    fn name(&self) -> &'static str {
        "tera"
    }

    fn load(&self, name: &str, text: &str) -> Result<Box<dyn Renderer>, TemplateError> {
        let mut tera = Tera::default();
        tera.register_filter("ts_type", ts_type);
        tera.register_filter("ts_return", ts_return);
        tera.register_filter("camel_case", camel_case);
        tera.register_filter("pascal_case", pascal_case);
        tera.register_filter("snake_case", snake_case);
        tera.add_raw_template(name, text)
            .map_err(TemplateError::new)?;

        Ok(Box::new(TeraRenderer {
            tera,
            name: name.to_string(),
        }))
    }
}

struct TeraRenderer {
    tera: Tera,
    name: String,
}

impl Renderer for TeraRenderer {
    fn render(&self, context: &Value) -> Result<Vec<u8>, TemplateError> {
        let context = Context::from_value(context.clone()).map_err(TemplateError::new)?;
        self.tera
            .render(&self.name, &context)
            .map(String::into_bytes)
            .map_err(TemplateError::new)
    }
}

fn ts_type(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let ty: ParamType = serde_json::from_value(value.clone())
        .map_err(|e| tera::Error::msg(format!("ts_type expects a parameter type: {}", e)))?;
    Ok(Value::String(TypeScriptTypeMapper.map_type(&ty)))
}

fn ts_return(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let outputs: Vec<Parameter> = serde_json::from_value(value.clone())
        .map_err(|e| tera::Error::msg(format!("ts_return expects a parameter list: {}", e)))?;
    Ok(Value::String(TypeScriptTypeMapper.map_returns(&outputs)))
}

fn camel_case(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("camel_case", "value", String, value);
    Ok(Value::String(to_camel_case(&s)))
}

fn pascal_case(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("pascal_case", "value", String, value);
    Ok(Value::String(to_pascal_case(&s)))
}

fn snake_case(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("snake_case", "value", String, value);
    Ok(Value::String(to_snake_case(&s)))
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use serde_json::json;

    use super::*;

    fn render(template: &str, context: Value) -> Result<String, TemplateError> {
        let renderer = TeraEngine.load("test", template)?;
        renderer
            .render(&context)
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn test_substitution() {
        let out = render(
            "{{ packageName }}.{{ struct.name }}",
            json!({ "packageName": "mypackage", "struct": { "name": "Greeter" } }),
        )
        .unwrap();
        assert_eq!(out, "mypackage.Greeter");
    }

    #[test]
    fn test_type_filters() {
        let out = render(
            "{{ a | ts_type }} / {{ b | ts_type }} / {{ outs | ts_return }}",
            json!({
                "a": { "kind": "uint", "bits": 8 },
                "b": { "kind": "slice", "of": { "kind": "string" } },
                "outs": [{ "name": "ok", "type": { "kind": "bool" } }],
            }),
        )
        .unwrap();
        assert_eq!(out, "number / Array<string> / Promise<boolean>");
    }

    #[test]
    fn test_case_filters() {
        let out = render(
            "{{ name | camel_case }} {{ name | pascal_case }} {{ method | snake_case }}",
            json!({ "name": "say_hello", "method": "SayHello" }),
        )
        .unwrap();
        assert_eq!(out, "sayHello SayHello say_hello");
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let err = render("{{ struct.missing }}", json!({ "struct": { "name": "Greeter" } }))
            .unwrap_err();

        let mut chain = vec![err.to_string()];
        let mut source = err.source();
        while let Some(e) = source {
            chain.push(e.to_string());
            source = e.source();
        }
        assert!(chain.iter().any(|m| m.contains("struct.missing")));
    }

    #[test]
    fn test_bad_type_value_is_an_error() {
        assert!(render("{{ a | ts_type }}", json!({ "a": "string" })).is_err());
    }

    #[test]
    fn test_syntax_error_fails_to_load() {
        assert!(TeraEngine.load("broken", "{% for x in %}").is_err());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = TeraEngine
            .load("t", "{% for p in packages %}{{ p.name }},{% endfor %}")
            .unwrap();
        let context = json!({ "packages": [{ "name": "a" }, { "name": "b" }] });

        let first = renderer.render(&context).unwrap();
        let second = renderer.render(&context).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, b"a,b,");
    }
}
