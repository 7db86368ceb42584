//! Literal extraction from JavaScript sources.
//!
//! The source is parsed as an ES module with `oxc`; the resulting tree is
//! walked once and every literal node is recorded as a [`LiteralValue`].
//! Callers consume the non-empty string literals through [`Literals`].

use oxc::allocator::Allocator;
use oxc::ast::ast::{
    AssignmentTargetPropertyProperty, BindingProperty, BooleanLiteral, MethodDefinition,
    MethodDefinitionKind, ModuleExportName, NullLiteral, NumericLiteral, ObjectProperty,
    PropertyDefinition, StringLiteral, WithClause,
};
use oxc::ast_visit::Visit;
use oxc::parser::Parser;
use oxc::span::SourceType;
use oxc::syntax::scope::ScopeFlags;
use thiserror::Error;

use crate::model::{LiteralValue, SourceLiteral};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The source is not syntactically valid JavaScript.
    #[error("Failed to parse JavaScript: {message}")]
    Parse { message: String },
}

/// Finite, single-pass stream of string literals in source order.
#[derive(Debug)]
pub struct Literals {
    values: std::vec::IntoIter<LiteralValue>,
}

impl Literals {
    fn new(values: Vec<LiteralValue>) -> Self {
        Self { values: values.into_iter() }
    }
}

impl Iterator for Literals {
    type Item = SourceLiteral;

    fn next(&mut self) -> Option<SourceLiteral> {
        self.values.by_ref().find_map(LiteralValue::into_source_literal)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.values.size_hint().1)
    }
}

/// Parse `source` and return every literal value in traversal order,
/// including non-string literals.
pub fn literal_values(source: &str) -> Result<Vec<LiteralValue>, ExtractError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(ExtractError::Parse { message });
    }

    let mut collector = LiteralCollector::default();
    collector.visit_program(&ret.program);
    Ok(collector.values)
}

/// Parse `source` and stream its non-empty string literals.
pub fn extract_literals(source: &str) -> Result<Literals, ExtractError> {
    literal_values(source).map(Literals::new)
}

#[derive(Default)]
struct LiteralCollector {
    values: Vec<LiteralValue>,
}

impl<'a> Visit<'a> for LiteralCollector {
    fn visit_string_literal(&mut self, it: &StringLiteral<'a>) {
        self.values.push(LiteralValue::Str(it.value.to_string()));
    }

    fn visit_numeric_literal(&mut self, it: &NumericLiteral<'a>) {
        self.values.push(LiteralValue::Number(it.value));
    }

    fn visit_boolean_literal(&mut self, it: &BooleanLiteral) {
        self.values.push(LiteralValue::Boolean(it.value));
    }

    fn visit_null_literal(&mut self, _it: &NullLiteral) {
        self.values.push(LiteralValue::Null);
    }

    // Plain `{ "key": value }` keys are property names, not values.
    fn visit_object_property(&mut self, it: &ObjectProperty<'a>) {
        if it.computed {
            self.visit_property_key(&it.key);
        }
        self.visit_expression(&it.value);
    }

    fn visit_method_definition(&mut self, it: &MethodDefinition<'a>) {
        for decorator in it.decorators.iter() {
            self.visit_decorator(decorator);
        }
        if it.computed {
            self.visit_property_key(&it.key);
        }
        let flags = match it.kind {
            MethodDefinitionKind::Get => ScopeFlags::Function | ScopeFlags::GetAccessor,
            MethodDefinitionKind::Set => ScopeFlags::Function | ScopeFlags::SetAccessor,
            MethodDefinitionKind::Constructor => ScopeFlags::Function | ScopeFlags::Constructor,
            MethodDefinitionKind::Method => ScopeFlags::Function,
        };
        self.visit_function(&it.value, flags);
    }

    fn visit_property_definition(&mut self, it: &PropertyDefinition<'a>) {
        for decorator in it.decorators.iter() {
            self.visit_decorator(decorator);
        }
        if it.computed {
            self.visit_property_key(&it.key);
        }
        if let Some(value) = &it.value {
            self.visit_expression(value);
        }
    }

    // `const { "key": x } = o`
    fn visit_binding_property(&mut self, it: &BindingProperty<'a>) {
        if it.computed {
            self.visit_property_key(&it.key);
        }
        self.visit_binding_pattern(&it.value);
    }

    // `({ "key": x } = o)`
    fn visit_assignment_target_property_property(
        &mut self,
        it: &AssignmentTargetPropertyProperty<'a>,
    ) {
        if it.computed {
            self.visit_property_key(&it.name);
        }
        self.visit_assignment_target_maybe_default(&it.binding);
    }

    // Import/export specifier names, e.g. `export { x as "name" }`.
    fn visit_module_export_name(&mut self, _it: &ModuleExportName<'a>) {}

    // Import attributes, e.g. `with { type: "json" }`.
    fn visit_with_clause(&mut self, _it: &WithClause<'a>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(source: &str) -> Vec<String> {
        extract_literals(source).expect("parse").map(|l| l.raw).collect()
    }

    #[test]
    fn yields_string_literals_in_source_order() {
        let src = r#"const a = "first"; function f() { return 'second'; } f("third");"#;
        assert_eq!(strings(src), vec!["first", "second", "third"]);
    }

    #[test]
    fn skips_non_string_and_empty_literals() {
        let src = r#"const x = [1, true, null, "", "kept", 2.5];"#;
        assert_eq!(strings(src), vec!["kept"]);

        let values = literal_values(src).unwrap();
        assert!(values.contains(&LiteralValue::Number(1.0)));
        assert!(values.contains(&LiteralValue::Boolean(true)));
        assert!(values.contains(&LiteralValue::Null));
    }

    #[test]
    fn ignores_plain_object_keys_but_keeps_values() {
        let src = r#"const o = { "name": "value", ["computed"]: 1 };"#;
        assert_eq!(strings(src), vec!["value", "computed"]);
    }

    #[test]
    fn name_positions_are_skipped_outside_object_literals() {
        let src = r#"
            import z from "./m.js" with { type: "json" };
            export { z as "exp-name" };
            class A {
                "cls-key"() { return "body"; }
                "field" = "init";
                ["computed"] = 1;
            }
            const { "pat-key": x = "fallback" } = o;
            ({ "target-key": y } = o);
        "#;
        assert_eq!(strings(src), vec!["./m.js", "body", "init", "computed", "fallback"]);
    }

    #[test]
    fn computed_pattern_keys_are_values() {
        let src = r#"const { ["dyn"]: a } = o; ({ ["dyn2"]: b } = o);"#;
        assert_eq!(strings(src), vec!["dyn", "dyn2"]);
    }

    #[test]
    fn module_syntax_is_accepted() {
        let src = r#"import icon from "./icon.js"; export const p = "M0 0 L1 1";"#;
        assert_eq!(strings(src), vec!["./icon.js", "M0 0 L1 1"]);
    }

    #[test]
    fn template_literals_are_not_literals() {
        let src = "const t = `M0 0 L10 10`;";
        assert!(strings(src).is_empty());
    }

    #[test]
    fn invalid_source_reports_parse_error() {
        let err = extract_literals("const = ;").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse JavaScript"));
    }

    #[test]
    fn stream_is_single_pass() {
        let mut literals = extract_literals(r#"f("a", "b")"#).unwrap();
        assert_eq!(literals.next().map(|l| l.raw), Some("a".into()));
        assert_eq!(literals.next().map(|l| l.raw), Some("b".into()));
        assert!(literals.next().is_none());
        assert!(literals.next().is_none());
    }
}
