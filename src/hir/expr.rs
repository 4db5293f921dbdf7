//! Expression simplification for annotation values and field initializers.
//!
//! The parser hands over flat [`Leaf`] sequences. They are lowered to
//! [`Expression`]s and then reduced with a fixed list of rules, tried in
//! order and re-applied until none matches:
//!
//! 1. `( ... )` drops the enclosing parentheses
//! 2. `+ n` / `- n` folds the sign into a numeric literal
//! 3. `new C(...)` drops the `new` token
//! 4. `"a" + "b" ...` concatenates two leading string literals
//!
//! A single remaining element is the result; several elements become an
//! [`Expression::List`]. Unrecognized shapes survive as names, tokens or
//! [`Expression::Unknown`]; only malformed literal text is an error.

use smol_str::SmolStr;

use super::error::ExprError;
use super::literal::Literal;
use super::model::{Annotation, AnnotationValue, Container};
use super::types::{TypeRef, lower_type};
use crate::syntax::{AnnotationSyntax, Leaf};

/// A simplified expression.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub enum Expression {
    /// Array initializers and sequences that did not reduce to one value.
    List(Vec<Expression>),
    Annotation(Box<Annotation>),
    Literal(Literal),
    Constructor(ConstructorInvocation),
    Name(SmolStr),
    Token(SmolStr),
    Unknown(String),
}

/// `new Foo(1, 2)` or `new int[3]`, without the `new`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct ConstructorInvocation {
    pub target: TypeRef,
    pub arguments: Vec<Expression>,
}

impl Expression {
    /// Re-run the reduction on an already lowered value.
    pub fn simplify(self) -> Expression {
        collapse(reduce(vec![self]))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expression::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_literal().and_then(Literal::as_str)
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Expression::Name(n) => Some(n),
            _ => None,
        }
    }

    fn is_token(&self, text: &str) -> bool {
        matches!(self, Expression::Token(t) if t == text)
    }
}

/// Lower and reduce a leaf sequence; types inside it belong to `container`.
pub fn simplify(leaves: &[Leaf], container: Container) -> Result<Expression, ExprError> {
    let mut items = Vec::with_capacity(leaves.len());
    for leaf in leaves {
        lower_leaf(leaf, container, &mut items)?;
    }
    Ok(collapse(reduce(items)))
}

/// Lower an annotation usage found in `container`.
pub(crate) fn lower_annotation(
    syntax: &AnnotationSyntax,
    container: Container,
) -> Result<Annotation, ExprError> {
    let mut annotation = Annotation::new(container, syntax.name.clone());
    for pair in &syntax.values {
        annotation.values.push(AnnotationValue {
            name: pair.name.clone(),
            value: simplify(&pair.value, container)?,
        });
    }
    Ok(annotation)
}

fn lower_leaf(leaf: &Leaf, container: Container, out: &mut Vec<Expression>) -> Result<(), ExprError> {
    match leaf {
        Leaf::Literal(text) => out.push(Expression::Literal(Literal::parse(text)?)),
        Leaf::Name(name) => out.push(Expression::Name(name.clone())),
        Leaf::Token(token) => out.push(Expression::Token(token.clone())),
        Leaf::Creation(creation) => {
            let arguments = creation
                .arguments
                .iter()
                .map(|arg| simplify(arg, container))
                .collect::<Result<_, _>>()?;
            out.push(Expression::Constructor(ConstructorInvocation {
                target: lower_type(&creation.ty, container),
                arguments,
            }));
        }
        Leaf::Group(inner) => {
            // sub-sequences that do not reduce to one value are spliced
            let mut items = Vec::with_capacity(inner.len());
            for leaf in inner {
                lower_leaf(leaf, container, &mut items)?;
            }
            out.extend(reduce(items));
        }
        Leaf::ArrayInit(elements) => {
            let elements = elements
                .iter()
                .map(|element| simplify(element, container))
                .collect::<Result<_, _>>()?;
            out.push(Expression::List(elements));
        }
        Leaf::Annotation(syntax) => {
            out.push(Expression::Annotation(Box::new(lower_annotation(syntax, container)?)));
        }
        Leaf::Unknown(code) => out.push(Expression::Unknown(code.clone())),
    }
    Ok(())
}

fn collapse(mut items: Vec<Expression>) -> Expression {
    if items.len() == 1 {
        if let Some(only) = items.pop() {
            return only;
        }
    }
    Expression::List(items)
}

fn reduce(mut items: Vec<Expression>) -> Vec<Expression> {
    while let Some(next) = reduce_once(&items) {
        items = next;
    }
    items
}

/// Apply the first matching rule, if any.
fn reduce_once(items: &[Expression]) -> Option<Vec<Expression>> {
    if let [first, inner @ .., last] = items {
        if first.is_token("(") && last.is_token(")") && is_balanced(inner) {
            tracing::trace!("dropped enclosing parentheses");
            return Some(inner.to_vec());
        }
    }

    if let [sign, Expression::Literal(literal)] = items {
        if literal.is_numeric() {
            if sign.is_token("+") {
                return Some(vec![Expression::Literal(literal.clone())]);
            }
            if sign.is_token("-") {
                return literal.negate().map(|neg| vec![Expression::Literal(neg)]);
            }
        }
    }

    if let [new, ctor @ Expression::Constructor(_)] = items {
        if new.is_token("new") {
            return Some(vec![ctor.clone()]);
        }
    }

    if let [Expression::Literal(Literal::String(a)), plus, Expression::Literal(Literal::String(b)), rest @ ..] =
        items
    {
        if plus.is_token("+") {
            let mut next = Vec::with_capacity(rest.len() + 1);
            next.push(Expression::Literal(Literal::String(format!("{a}{b}"))));
            next.extend_from_slice(rest);
            return Some(next);
        }
    }

    None
}

/// Whether the parentheses inside `items` pair up on their own, so that an
/// enclosing `(` and `)` belong together.
fn is_balanced(items: &[Expression]) -> bool {
    let mut depth = 0usize;
    for item in items {
        if item.is_token("(") {
            depth += 1;
        } else if item.is_token(")") {
            match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            }
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CreationSyntax, TypeSyntax};

    fn run(leaves: Vec<Leaf>) -> Expression {
        simplify(&leaves, Container::Unit).expect("simplify")
    }

    #[test]
    fn test_parenthesized_negative() {
        let expr = run(vec![
            Leaf::token("("),
            Leaf::token("-"),
            Leaf::literal("5"),
            Leaf::token(")"),
        ]);
        assert_eq!(expr, Expression::Literal(Literal::Int(-5)));
    }

    #[test]
    fn test_unary_plus() {
        let expr = run(vec![Leaf::token("+"), Leaf::literal("2.5")]);
        assert_eq!(expr, Expression::Literal(Literal::Float(2.5)));
    }

    #[test]
    fn test_string_concatenation_chain() {
        let expr = run(vec![
            Leaf::literal("\"a\""),
            Leaf::token("+"),
            Leaf::literal("\"b\""),
            Leaf::token("+"),
            Leaf::literal("\"c\""),
        ]);
        assert_eq!(expr.as_str(), Some("abc"));
    }

    #[test]
    fn test_concatenation_stops_at_non_literal() {
        let expr = run(vec![
            Leaf::literal("\"a\""),
            Leaf::token("+"),
            Leaf::name("SUFFIX"),
        ]);
        let Expression::List(items) = expr else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_constructor_invocation() {
        let expr = run(vec![
            Leaf::token("new"),
            Leaf::Creation(CreationSyntax {
                ty: TypeSyntax::named("Foo"),
                arguments: vec![vec![Leaf::literal("1")], vec![Leaf::literal("2")]],
            }),
        ]);
        let Expression::Constructor(ctor) = expr else {
            panic!("expected constructor invocation");
        };
        assert_eq!(ctor.target.name(), "Foo");
        assert_eq!(
            ctor.arguments,
            vec![
                Expression::Literal(Literal::Int(1)),
                Expression::Literal(Literal::Int(2))
            ]
        );
    }

    #[test]
    fn test_unbalanced_parentheses_are_kept() {
        // (a) + (b): the outer tokens do not enclose one group
        let expr = run(vec![
            Leaf::token("("),
            Leaf::name("a"),
            Leaf::token(")"),
            Leaf::token("+"),
            Leaf::token("("),
            Leaf::name("b"),
            Leaf::token(")"),
        ]);
        assert!(matches!(expr, Expression::List(ref items) if items.len() == 7));
    }

    #[test]
    fn test_group_is_reduced_in_place() {
        let expr = run(vec![
            Leaf::token("-"),
            Leaf::Group(vec![Leaf::token("("), Leaf::literal("7"), Leaf::token(")")]),
        ]);
        assert_eq!(expr, Expression::Literal(Literal::Int(-7)));
    }

    #[test]
    fn test_array_initializer() {
        let expr = run(vec![Leaf::ArrayInit(vec![
            vec![Leaf::literal("\"x\"")],
            vec![Leaf::name("Y")],
        ])]);
        assert_eq!(
            expr,
            Expression::List(vec![
                Expression::Literal(Literal::String("x".to_string())),
                Expression::Name(SmolStr::new("Y")),
            ])
        );
    }

    #[test]
    fn test_single_element_array_stays_a_list() {
        let expr = run(vec![Leaf::ArrayInit(vec![vec![Leaf::literal("1")]])]);
        assert_eq!(expr.clone().simplify(), expr);
        assert!(matches!(expr, Expression::List(ref items) if items.len() == 1));
    }

    #[test]
    fn test_unknown_and_names_pass_through() {
        assert_eq!(
            run(vec![Leaf::Unknown("a ? b : c".to_string())]),
            Expression::Unknown("a ? b : c".to_string())
        );
        assert_eq!(run(vec![Leaf::name("Mode.FAST")]).as_name(), Some("Mode.FAST"));
    }

    #[test]
    fn test_malformed_literal_is_an_error() {
        let err = simplify(&[Leaf::literal("0x")], Container::Unit).unwrap_err();
        assert!(matches!(err, ExprError::MalformedLiteral { .. }));
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let expr = run(vec![
            Leaf::token("("),
            Leaf::literal("\"a\""),
            Leaf::token("+"),
            Leaf::literal("\"b\""),
            Leaf::token(")"),
        ]);
        assert_eq!(expr.as_str(), Some("ab"));
        assert_eq!(expr.clone().simplify(), expr);
    }
}
