//! Solidity source printer.
//!
//! Every AST node maps to a [`Doc`]; the document is rendered at
//! [`PRINT_WIDTH`] columns. Printing is a pure function of the AST.

pub mod doc;

use crate::solidity::ast::*;
use doc::Doc;

pub const PRINT_WIDTH: usize = 80;

pub fn print_program(program: &Program) -> String {
    doc::render(&program_doc(program), PRINT_WIDTH)
}

pub fn print_contract(contract: &ContractDeclaration) -> String {
    doc::render(&contract_doc(contract), PRINT_WIDTH)
}

pub fn print_declaration(declaration: &Declaration) -> String {
    doc::render(&declaration_doc(declaration), PRINT_WIDTH)
}

pub fn print_statement(statement: &Statement) -> String {
    doc::render(&statement_doc(statement), PRINT_WIDTH)
}

pub fn print_expression(expression: &Expression) -> String {
    doc::render(&expression_doc(expression), PRINT_WIDTH)
}

fn program_doc(program: &Program) -> Doc {
    let header: Vec<Doc> = program
        .license
        .iter()
        .map(|license| Doc::text(format!("// SPDX-License-Identifier: {}", license)))
        .chain(
            program
                .pragma
                .iter()
                .map(|pragma| Doc::text(format!("pragma solidity {};", pragma))),
        )
        .collect();

    let imports: Vec<Doc> = program
        .imports
        .iter()
        .map(|path| Doc::text(format!("import {};", quote(path))))
        .collect();

    let body: Vec<Doc> = program
        .body
        .iter()
        .map(|item| match item {
            ProgramItem::Contract(contract) => contract_doc(contract),
            ProgramItem::Comment(comment) => comment_doc(comment),
        })
        .collect();

    let sections = [
        (Doc::hardline(), header),
        (Doc::hardline(), imports),
        (Doc::blankline(), body),
    ]
    .into_iter()
    .filter(|(_, section)| !section.is_empty())
    .map(|(separator, section)| Doc::join(separator, section));

    Doc::concat(vec![Doc::join(Doc::blankline(), sections), Doc::hardline()])
}

fn contract_doc(contract: &ContractDeclaration) -> Doc {
    let mut header = vec![Doc::text(format!("contract {}", contract.name))];
    if !contract.bases.is_empty() {
        header.push(Doc::text(" is"));
        header.push(Doc::indent(Doc::concat(vec![
            Doc::line(),
            Doc::join(
                Doc::concat(vec![Doc::text(","), Doc::line()]),
                contract.bases.iter().map(Doc::text),
            ),
        ])));
    }
    header.push(open_brace());

    let members = contract.body.iter().map(|member| match member {
        ContractMember::Declaration(declaration) => declaration_doc(declaration),
        ContractMember::Comment(comment) => comment_doc(comment),
    });

    Doc::concat(vec![
        Doc::group(Doc::concat(header)),
        block_tail(Doc::blankline(), members.collect()),
    ])
}

/// ` {` after a signature that fits, `{` on its own line after one that
/// broke.
fn open_brace() -> Doc {
    Doc::if_break(
        Doc::concat(vec![Doc::line(), Doc::text("{")]),
        Doc::text(" {"),
    )
}

/// The part of a block after its opening brace.
fn block_tail(separator: Doc, items: Vec<Doc>) -> Doc {
    if items.is_empty() {
        return Doc::text("}");
    }

    Doc::concat(vec![
        Doc::indent(Doc::concat(vec![Doc::hardline(), Doc::join(separator, items)])),
        Doc::hardline(),
        Doc::text("}"),
    ])
}

fn block(statements: &[Statement]) -> Doc {
    Doc::concat(vec![
        Doc::text("{"),
        block_tail(Doc::blankline(), statements.iter().map(statement_doc).collect()),
    ])
}

fn comment_doc(comment: &BlockComment) -> Doc {
    match comment.kind {
        CommentKind::Banner => Doc::text(format!("/** {} **/", comment.value)),
        CommentKind::Line => Doc::join(
            Doc::hardline(),
            comment.value.split('\n').map(|line| {
                let line = line.trim_end();
                if line.is_empty() {
                    Doc::text("//")
                } else {
                    Doc::text(format!("// {}", line))
                }
            }),
        ),
    }
}

fn declaration_doc(declaration: &Declaration) -> Doc {
    match declaration {
        Declaration::Variable(variable) => {
            Doc::concat(vec![variable_doc(variable), Doc::text(";")])
        }
        Declaration::Function(function) => function_doc(function),
        Declaration::Constructor(constructor) => constructor_doc(constructor),
        Declaration::Struct(structure) => {
            let members = structure
                .members
                .iter()
                .map(|member| Doc::concat(vec![variable_doc(member), Doc::text(";")]));
            Doc::concat(vec![
                Doc::text(format!("struct {} {{", structure.name)),
                block_tail(Doc::hardline(), members.collect()),
            ])
        }
        Declaration::Using(using) => {
            Doc::text(format!("using {} for {};", using.alias, using.target))
        }
    }
}

fn variable_doc(variable: &VariableDeclaration) -> Doc {
    let mut words = vec![variable.type_name.as_str()];
    words.extend(variable.modifiers.iter().map(String::as_str));
    if !variable.name.is_empty() {
        words.push(&variable.name);
    }

    let mut parts = vec![Doc::text(words.join(" "))];
    if let Some(initializer) = &variable.initializer {
        parts.push(Doc::text(" ="));
        parts.push(Doc::group(Doc::indent(Doc::concat(vec![
            Doc::line(),
            expression_doc(initializer),
        ]))));
    }

    Doc::concat(parts)
}

fn arguments_doc(arguments: &[String]) -> Doc {
    if arguments.is_empty() {
        return Doc::text("()");
    }

    Doc::group(Doc::concat(vec![
        Doc::text("("),
        Doc::indent(Doc::concat(vec![
            Doc::softline(),
            Doc::join(
                Doc::concat(vec![Doc::text(","), Doc::line()]),
                arguments.iter().map(Doc::text),
            ),
        ])),
        Doc::softline(),
        Doc::text(")"),
    ]))
}

fn function_doc(function: &FunctionDeclaration) -> Doc {
    let mut trailer: Vec<Doc> = function
        .modifiers
        .iter()
        .map(|modifier| Doc::concat(vec![Doc::line(), Doc::text(modifier.as_str())]))
        .collect();
    if let Some(returns) = &function.returns {
        trailer.push(Doc::line());
        trailer.push(Doc::text(format!("returns ({})", returns)));
    }

    let signature = Doc::group(Doc::concat(vec![
        Doc::text(format!("function {}", function.name)),
        arguments_doc(&function.arguments),
        Doc::indent(Doc::concat(trailer)),
        open_brace(),
    ]));

    Doc::concat(vec![signature, body_doc(&function.body)])
}

fn constructor_doc(constructor: &ConstructorDeclaration) -> Doc {
    let super_call = match &constructor.super_call {
        Some(call) => Doc::indent(Doc::concat(vec![Doc::line(), expression_doc(call)])),
        None => Doc::Nil,
    };

    let signature = Doc::group(Doc::concat(vec![
        Doc::text("constructor"),
        arguments_doc(&constructor.arguments),
        super_call,
        open_brace(),
    ]));

    Doc::concat(vec![signature, body_doc(&constructor.body)])
}

fn body_doc(statements: &[Statement]) -> Doc {
    block_tail(Doc::blankline(), statements.iter().map(statement_doc).collect())
}

fn statement_doc(statement: &Statement) -> Doc {
    match statement {
        Statement::Expression(expression) => {
            Doc::concat(vec![expression_doc(expression), Doc::text(";")])
        }
        Statement::Declaration(variable) => {
            Doc::concat(vec![variable_doc(variable), Doc::text(";")])
        }
        Statement::Return(None) => Doc::text("return;"),
        Statement::Return(Some(expression)) => Doc::concat(vec![
            Doc::text("return "),
            expression_doc(expression),
            Doc::text(";"),
        ]),
        Statement::If {
            condition,
            body,
            alternate,
        } => {
            let mut parts = vec![
                Doc::group(Doc::concat(vec![
                    Doc::text("if ("),
                    expression_doc(condition),
                    Doc::text(")"),
                ])),
                Doc::text(" "),
                block(body),
            ];
            match alternate.as_deref() {
                None => {}
                Some([nested @ Statement::If { .. }]) => {
                    parts.push(Doc::text(" else "));
                    parts.push(statement_doc(nested));
                }
                Some(alternate) => {
                    parts.push(Doc::text(" else "));
                    parts.push(block(alternate));
                }
            }
            Doc::concat(parts)
        }
        Statement::For {
            init,
            condition,
            update,
            body,
        } => Doc::concat(vec![
            Doc::text(format!("for ({}; {}; {}) ", init, condition, update)),
            block(body),
        ]),
    }
}

fn expression_doc(expression: &Expression) -> Doc {
    match expression {
        Expression::Identifier(name) => Doc::text(name.as_str()),
        Expression::Literal(literal) => Doc::text(literal_source(literal)),
        Expression::Member { object, member } => {
            let object_doc = expression_doc(object);
            if matches!(**object, Expression::FunctionCall { .. }) {
                Doc::group(Doc::concat(vec![
                    object_doc,
                    Doc::indent(Doc::concat(vec![
                        Doc::softline(),
                        Doc::text(format!(".{}", member)),
                    ])),
                ]))
            } else {
                Doc::concat(vec![object_doc, Doc::text(format!(".{}", member))])
            }
        }
        Expression::IndexAccess { object, index } => Doc::concat(vec![
            expression_doc(object),
            Doc::text("["),
            expression_doc(index),
            Doc::text("]"),
        ]),
        Expression::FunctionCall { callee, arguments } => {
            Doc::concat(vec![expression_doc(callee), call_arguments_doc(arguments)])
        }
        Expression::Assignment {
            left,
            operator,
            right,
        } => Doc::group(Doc::concat(vec![
            expression_doc(left),
            Doc::text(format!(" {}", operator)),
            Doc::indent(Doc::concat(vec![Doc::line(), expression_doc(right)])),
        ])),
        Expression::Binary {
            left,
            operator,
            right,
        } => Doc::group(Doc::concat(vec![
            operand_doc(left),
            Doc::text(format!(" {}", operator)),
            Doc::indent(Doc::concat(vec![Doc::line(), operand_doc(right)])),
        ])),
    }
}

/// Nested binary and assignment operands are parenthesized so precedence
/// never depends on the reader.
fn operand_doc(expression: &Expression) -> Doc {
    match expression {
        Expression::Binary { .. } | Expression::Assignment { .. } => Doc::concat(vec![
            Doc::text("("),
            expression_doc(expression),
            Doc::text(")"),
        ]),
        _ => expression_doc(expression),
    }
}

fn call_arguments_doc(arguments: &CallArguments) -> Doc {
    let (open, close, items): (&str, &str, Vec<Doc>) = match arguments {
        CallArguments::Positional(arguments) => {
            ("(", ")", arguments.iter().map(expression_doc).collect())
        }
        CallArguments::Named(arguments) => (
            "({",
            "})",
            arguments
                .iter()
                .map(|(name, value)| {
                    Doc::concat(vec![Doc::text(format!("{}: ", name)), expression_doc(value)])
                })
                .collect(),
        ),
    };

    if items.is_empty() {
        return Doc::text(format!("{}{}", open, close));
    }

    Doc::group(Doc::concat(vec![
        Doc::text(open),
        Doc::indent(Doc::concat(vec![
            Doc::softline(),
            Doc::join(Doc::concat(vec![Doc::text(","), Doc::line()]), items),
        ])),
        Doc::softline(),
        Doc::text(close),
    ]))
}

fn literal_source(literal: &Literal) -> String {
    match literal {
        Literal::Number(value) => value.clone(),
        Literal::Boolean(value) => value.to_string(),
        Literal::String(value) => quote(value),
    }
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
