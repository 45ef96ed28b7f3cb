#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub license: Option<String>,
    pub pragma: Option<String>,
    pub imports: Vec<String>,
    pub body: Vec<ProgramItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgramItem {
    Contract(ContractDeclaration),
    Comment(BlockComment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractDeclaration {
    pub name: String,
    pub bases: Vec<String>,
    pub body: Vec<ContractMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContractMember {
    Declaration(Declaration),
    Comment(BlockComment),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
    Constructor(ConstructorDeclaration),
    Struct(StructDeclaration),
    Using(UsingDeclaration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub type_name: String,
    pub modifiers: Vec<String>,
    pub name: String,
    pub initializer: Option<Expression>,
}

/// Arguments are kept as raw source (`"uint256[] calldata ids"`); the
/// generator never needs to look inside them.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub arguments: Vec<String>,
    pub modifiers: Vec<String>,
    pub returns: Option<String>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructorDeclaration {
    pub arguments: Vec<String>,
    pub super_call: Option<Expression>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclaration {
    pub name: String,
    pub members: Vec<VariableDeclaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsingDeclaration {
    pub alias: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `/** TEXT **/`
    Banner,
    /// `// TEXT`, one per line
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockComment {
    pub kind: CommentKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Expression),
    Declaration(VariableDeclaration),
    Return(Option<Expression>),
    If {
        condition: Expression,
        body: Vec<Statement>,
        alternate: Option<Vec<Statement>>,
    },
    For {
        init: String,
        condition: String,
        update: String,
        body: Vec<Statement>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Raw source token, also used for snippets not worth structuring.
    Identifier(String),
    Literal(Literal),
    Member {
        object: Box<Expression>,
        member: String,
    },
    IndexAccess {
        object: Box<Expression>,
        index: Box<Expression>,
    },
    FunctionCall {
        callee: Box<Expression>,
        arguments: CallArguments,
    },
    Assignment {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(String),
    String(String),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallArguments {
    /// `f(a, b)`
    Positional(Vec<Expression>),
    /// `f({a: x, b: y})`
    Named(Vec<(String, Expression)>),
}
