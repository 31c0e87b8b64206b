//! Fixed-point unpacking of type expressions into primitive tokens.

use crate::errors::SchemaError;
use crate::expr::{closing_delim, parse_type_expr, ContainerKind, TypeExpr};

/// Applies one rewrite step to a type expression.
///
/// `schema:` references collapse to the literal token `"schema"`; a
/// recognized container wrapper is stripped to its inner substring;
/// anything else is already a fixed point and is returned unchanged.
pub fn unpack(expr: &str) -> String {
    let trimmed = expr.trim();
    if trimmed.starts_with("schema:") {
        return "schema".to_string();
    }
    match strip_wrapper(trimmed) {
        Some(inner) => inner.to_string(),
        None => trimmed.to_string(),
    }
}

/// Reduces a type expression to its flat primitive-token list.
///
/// Children of a container recurse independently and concatenate in
/// written order; `schema:` references contribute the literal token
/// `"schema"`. Malformed or over-deep expressions are rejected rather
/// than looped on.
pub fn unpack_fully(expr: &str) -> Result<Vec<String>, SchemaError> {
    let parsed = parse_type_expr(expr)?;
    let mut tokens = Vec::new();
    flatten(&parsed, &mut tokens);
    Ok(tokens)
}

fn flatten(expr: &TypeExpr, tokens: &mut Vec<String>) {
    match expr {
        TypeExpr::Primitive(token) => tokens.push(token.clone()),
        TypeExpr::SchemaRef(_) => tokens.push("schema".to_string()),
        TypeExpr::Container { children, .. } => {
            for child in children {
                flatten(child, tokens);
            }
        }
    }
}

fn strip_wrapper(expr: &str) -> Option<&str> {
    let open_idx = expr.find(['[', '(', '{'])?;
    let kind = ContainerKind::from_name(expr[..open_idx].trim_end())?;
    let open = expr[open_idx..].chars().next()?;
    if !kind.accepts(open) {
        return None;
    }
    let rest = &expr[open_idx + 1..];
    let inner = rest.strip_suffix(closing_delim(open))?.trim();
    if kind == ContainerKind::FrozenSet && open == '(' {
        if let Some(braced) = inner
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        {
            return Some(braced.trim());
        }
    }
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_strips_one_wrapper() {
        assert_eq!(unpack("list[dict[string, int]]"), "dict[string, int]");
        assert_eq!(unpack("dict[string, int]"), "string, int");
        assert_eq!(unpack("frozenset({int})"), "int");
        assert_eq!(unpack("set{str}"), "str");
    }

    #[test]
    fn schema_references_collapse_to_the_schema_token() {
        assert_eq!(unpack("schema:user"), "schema");
        assert_eq!(unpack("schema:"), "schema");
    }

    #[test]
    fn fixed_points_are_returned_unchanged() {
        assert_eq!(unpack("int"), "int");
        assert_eq!(unpack("string100"), "string100");
        assert_eq!(unpack("string, int"), "string, int");
    }

    #[test]
    fn full_reduction_flattens_nested_wrappers() {
        assert_eq!(
            unpack_fully("list[dict[string, list[int]]]").unwrap(),
            vec!["string", "int"]
        );
        assert_eq!(unpack_fully("list[string100]").unwrap(), vec!["string100"]);
        assert_eq!(
            unpack_fully("dict[str, schema:user]").unwrap(),
            vec!["str", "schema"]
        );
    }

    #[test]
    fn full_reduction_rejects_unbalanced_input() {
        assert!(unpack_fully("list[dict[string, int]").is_err());
    }

    #[test]
    fn reduction_reaches_a_fixed_point_stepwise() {
        let mut expr = "list[set[bool]]".to_string();
        loop {
            let next = unpack(&expr);
            if next == expr {
                break;
            }
            expr = next;
        }
        assert_eq!(expr, "bool");
    }
}
