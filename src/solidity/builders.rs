//! Smart constructors for the Solidity AST.
//!
//! Declarations start from `new` with every optional part empty and are
//! filled in with `with_*` methods; expressions and statements are plain
//! functions so generator code reads close to the Solidity it produces.

use super::ast::*;

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn with_pragma(mut self, pragma: impl Into<String>) -> Self {
        self.pragma = Some(pragma.into());
        self
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = strings(imports);
        self
    }

    pub fn with_body(mut self, body: Vec<ProgramItem>) -> Self {
        self.body = body;
        self
    }
}

impl ContractDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_bases<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bases = strings(bases);
        self
    }

    pub fn with_body(mut self, body: Vec<ContractMember>) -> Self {
        self.body = body;
        self
    }
}

impl VariableDeclaration {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            modifiers: Vec::new(),
            name: name.into(),
            initializer: None,
        }
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = strings(modifiers);
        self
    }

    pub fn with_initializer(mut self, initializer: Expression) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            modifiers: Vec::new(),
            returns: None,
            body: Vec::new(),
        }
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = strings(arguments);
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = strings(modifiers);
        self
    }

    pub fn returns(mut self, returns: impl Into<String>) -> Self {
        self.returns = Some(returns.into());
        self
    }

    pub fn with_body(mut self, body: Vec<Statement>) -> Self {
        self.body = body;
        self
    }
}

impl ConstructorDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = strings(arguments);
        self
    }

    pub fn with_super_call(mut self, super_call: Expression) -> Self {
        self.super_call = Some(super_call);
        self
    }

    pub fn with_body(mut self, body: Vec<Statement>) -> Self {
        self.body = body;
        self
    }
}

impl StructDeclaration {
    pub fn new(name: impl Into<String>, members: Vec<VariableDeclaration>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }
}

impl UsingDeclaration {
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }
}

impl BlockComment {
    pub fn banner(value: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Banner,
            value: value.into(),
        }
    }

    pub fn line(value: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Line,
            value: value.into(),
        }
    }
}

macro_rules! impl_from {
    ($target:ident :: $variant:ident, $source:ty) => {
        impl From<$source> for $target {
            fn from(value: $source) -> Self {
                $target::$variant(value)
            }
        }
    };
}

impl_from!(Declaration::Variable, VariableDeclaration);
impl_from!(Declaration::Function, FunctionDeclaration);
impl_from!(Declaration::Constructor, ConstructorDeclaration);
impl_from!(Declaration::Struct, StructDeclaration);
impl_from!(Declaration::Using, UsingDeclaration);
impl_from!(ContractMember::Declaration, Declaration);
impl_from!(ContractMember::Comment, BlockComment);
impl_from!(ProgramItem::Contract, ContractDeclaration);
impl_from!(ProgramItem::Comment, BlockComment);
impl_from!(Statement::Expression, Expression);
impl_from!(Statement::Declaration, VariableDeclaration);

macro_rules! impl_member_from {
    ($($source:ty),*) => {
        $(
            impl From<$source> for ContractMember {
                fn from(value: $source) -> Self {
                    ContractMember::Declaration(value.into())
                }
            }
        )*
    };
}

impl_member_from!(
    VariableDeclaration,
    FunctionDeclaration,
    ConstructorDeclaration,
    StructDeclaration,
    UsingDeclaration
);

pub fn identifier(name: impl Into<String>) -> Expression {
    Expression::Identifier(name.into())
}

pub fn number(value: impl ToString) -> Expression {
    Expression::Literal(Literal::Number(value.to_string()))
}

pub fn string(value: impl Into<String>) -> Expression {
    Expression::Literal(Literal::String(value.into()))
}

pub fn boolean(value: bool) -> Expression {
    Expression::Literal(Literal::Boolean(value))
}

pub fn member(object: Expression, member: impl Into<String>) -> Expression {
    Expression::Member {
        object: Box::new(object),
        member: member.into(),
    }
}

pub fn index(object: Expression, index: Expression) -> Expression {
    Expression::IndexAccess {
        object: Box::new(object),
        index: Box::new(index),
    }
}

pub fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::FunctionCall {
        callee: Box::new(callee),
        arguments: CallArguments::Positional(arguments),
    }
}

pub fn call_named<I, S>(callee: Expression, arguments: I) -> Expression
where
    I: IntoIterator<Item = (S, Expression)>,
    S: Into<String>,
{
    Expression::FunctionCall {
        callee: Box::new(callee),
        arguments: CallArguments::Named(
            arguments
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        ),
    }
}

/// `object.method(arguments)`
pub fn method_call(object: Expression, method: &str, arguments: Vec<Expression>) -> Expression {
    call(member(object, method), arguments)
}

/// A parenthesized list, e.g. a multi-value `return (a, b)`.
pub fn tuple(elements: Vec<Expression>) -> Expression {
    call(identifier(""), elements)
}

pub fn assign(left: Expression, right: Expression) -> Expression {
    assign_with(left, "=", right)
}

pub fn assign_with(left: Expression, operator: &str, right: Expression) -> Expression {
    Expression::Assignment {
        left: Box::new(left),
        operator: operator.to_string(),
        right: Box::new(right),
    }
}

pub fn binary(left: Expression, operator: &str, right: Expression) -> Expression {
    Expression::Binary {
        left: Box::new(left),
        operator: operator.to_string(),
        right: Box::new(right),
    }
}

pub fn expression_statement(expression: Expression) -> Statement {
    Statement::Expression(expression)
}

pub fn return_statement(expression: Option<Expression>) -> Statement {
    Statement::Return(expression)
}

pub fn if_statement(
    condition: Expression,
    body: Vec<Statement>,
    alternate: Option<Vec<Statement>>,
) -> Statement {
    Statement::If {
        condition,
        body,
        alternate,
    }
}

pub fn for_statement(
    init: impl Into<String>,
    condition: impl Into<String>,
    update: impl Into<String>,
    body: Vec<Statement>,
) -> Statement {
    Statement::For {
        init: init.into(),
        condition: condition.into(),
        update: update.into(),
        body,
    }
}

/// `require(condition, "message");`
pub fn require(condition: Expression, message: &str) -> Statement {
    expression_statement(call(
        identifier("require"),
        vec![condition, string(message)],
    ))
}

/// Classifies a single token: `true`/`false` are booleans, a leading digit
/// makes a number, anything else is kept as an identifier.
pub fn parse_expression(text: &str) -> Expression {
    let text = text.trim();
    match text {
        "true" => boolean(true),
        "false" => boolean(false),
        _ if text.starts_with(|c: char| c.is_ascii_digit()) => number(text),
        _ => identifier(text),
    }
}

/// Splits `"uint256 public constant MAX_SUPPLY = 2000"` into type,
/// modifiers, name and initializer.
///
/// Malformed input is not rejected: missing parts come back empty and an
/// unrecognized initializer becomes an identifier.
pub fn parse_variable_declaration(text: &str) -> VariableDeclaration {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let (head, initializer) = match tokens.iter().position(|token| *token == "=") {
        Some(position) => (
            tokens[..position].join(" "),
            Some(parse_expression(&tokens[position + 1..].join(" "))),
        ),
        None => (tokens.join(" "), None),
    };

    let (type_name, rest) = split_type(&head);
    let mut words: Vec<&str> = rest.split_whitespace().collect();
    let name = words.pop().unwrap_or_default();

    VariableDeclaration {
        type_name: type_name.to_string(),
        modifiers: strings(words),
        name: name.to_string(),
        initializer,
    }
}

// `mapping(address => uint256)` contains spaces, so it is taken up to its
// balancing parenthesis instead of the first whitespace.
fn split_type(head: &str) -> (&str, &str) {
    if head.starts_with("mapping(") {
        let mut depth = 0usize;
        for (position, c) in head.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return head.split_at(position + 1);
                    }
                }
                _ => {}
            }
        }
        return (head, "");
    }

    match head.split_once(char::is_whitespace) {
        Some((type_name, rest)) => (type_name, rest),
        None => (head, ""),
    }
}

/// Ordered collector for module output.
///
/// Every optional item goes through `push_if`/`push_some`, so the order
/// in which items are listed is the order in which they are printed.
#[derive(Debug)]
pub struct Emitter<T> {
    items: Vec<T>,
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: impl Into<T>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    pub fn push_if<U, F>(&mut self, condition: bool, item: F) -> &mut Self
    where
        U: Into<T>,
        F: FnOnce() -> U,
    {
        if condition {
            self.items.push(item().into());
        }
        self
    }

    pub fn push_some<U: Into<T>>(&mut self, item: Option<U>) -> &mut Self {
        if let Some(item) = item {
            self.items.push(item.into());
        }
        self
    }

    pub fn extend<I, U>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = U>,
        U: Into<T>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn finish(self) -> Vec<T> {
        self.items
    }
}
