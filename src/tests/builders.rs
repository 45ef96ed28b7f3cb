use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::solidity::builders::*;
use crate::solidity::*;

#[test]
fn test_declaration_defaults() {
    let function = FunctionDeclaration::new("withdraw");
    assert!(function.arguments.is_empty());
    assert!(function.modifiers.is_empty());
    assert_eq!(function.returns, None);
    assert!(function.body.is_empty());

    let constructor = ConstructorDeclaration::new();
    assert_eq!(constructor.super_call, None);

    let program = Program::new();
    assert_eq!(program.license, None);
    assert!(program.imports.is_empty());
}

#[test]
fn test_parse_constant_declaration() -> Result<()> {
    let declaration = parse_variable_declaration("uint256 public constant MAX_SUPPLY = 2000");
    assert_eq!(declaration.type_name, "uint256");
    assert_eq!(declaration.modifiers, vec!["public", "constant"]);
    assert_eq!(declaration.name, "MAX_SUPPLY");
    assert_eq!(declaration.initializer, Some(number(2000)));
    Ok(())
}

#[test]
fn test_parse_mapping_declaration() -> Result<()> {
    let declaration = parse_variable_declaration("mapping(address => uint256) private mintCountMap");
    assert_eq!(declaration.type_name, "mapping(address => uint256)");
    assert_eq!(declaration.modifiers, vec!["private"]);
    assert_eq!(declaration.name, "mintCountMap");
    assert_eq!(declaration.initializer, None);

    let nested =
        parse_variable_declaration("mapping(address => mapping(uint256 => bool)) public approvals");
    assert_eq!(nested.type_name, "mapping(address => mapping(uint256 => bool))");
    assert_eq!(nested.name, "approvals");
    Ok(())
}

#[test]
fn test_parse_declaration_with_boolean_initializer() -> Result<()> {
    let declaration = parse_variable_declaration("bool public saleIsActive = false");
    assert_eq!(declaration.initializer, Some(boolean(false)));
    Ok(())
}

#[test]
fn test_parse_malformed_declarations() -> Result<()> {
    let empty = parse_variable_declaration("");
    assert_eq!(empty.type_name, "");
    assert!(empty.modifiers.is_empty());
    assert_eq!(empty.name, "");
    assert_eq!(empty.initializer, None);

    let headless = parse_variable_declaration("= 5");
    assert_eq!(headless.type_name, "");
    assert_eq!(headless.name, "");
    assert_eq!(headless.initializer, Some(number(5)));

    let unbalanced = parse_variable_declaration("mapping(address => uint256");
    assert_eq!(unbalanced.type_name, "mapping(address => uint256");
    assert_eq!(unbalanced.name, "");

    let garbage = parse_variable_declaration("uint256 x = foo bar");
    assert_eq!(garbage.name, "x");
    assert_eq!(garbage.initializer, Some(identifier("foo bar")));
    Ok(())
}

#[test]
fn test_parse_expression() {
    assert_eq!(parse_expression("true"), boolean(true));
    assert_eq!(parse_expression("false"), boolean(false));
    assert_eq!(parse_expression(" 42 "), number(42));
    assert_eq!(parse_expression("0x1f"), number("0x1f"));
    assert_eq!(parse_expression("True"), identifier("True"));
    assert_eq!(parse_expression("ProxyRegistry(a)"), identifier("ProxyRegistry(a)"));
    assert_eq!(parse_expression(""), identifier(""));
}

#[test]
fn test_emitter_keeps_listed_order() {
    let mut emitter: Emitter<Statement> = Emitter::new();
    assert!(emitter.is_empty());

    emitter
        .push(identifier("first"))
        .push_if(false, || identifier("skipped"))
        .push_some(None::<Expression>)
        .push_if(true, || identifier("second"))
        .extend(vec![identifier("third"), identifier("fourth")])
        .push_some(Some(identifier("fifth")));

    let names: Vec<Statement> = ["first", "second", "third", "fourth", "fifth"]
        .iter()
        .map(|name| expression_statement(identifier(*name)))
        .collect();
    assert_eq!(emitter.finish(), names);
}

#[test]
fn test_member_conversions() {
    let member: ContractMember = UsingDeclaration::new("Counters", "Counters.Counter").into();
    assert_eq!(
        member,
        ContractMember::Declaration(Declaration::Using(UsingDeclaration {
            alias: "Counters".to_string(),
            target: "Counters.Counter".to_string(),
        }))
    );

    let comment: ProgramItem = BlockComment::line("done").into();
    assert_eq!(
        comment,
        ProgramItem::Comment(BlockComment {
            kind: CommentKind::Line,
            value: "done".to_string(),
        })
    );
}
