use pretty_assertions::assert_eq;

use crate::printer::doc::{render, Doc};
use crate::printer::*;
use crate::solidity::builders::*;
use crate::solidity::*;

#[test]
fn test_group_breaks_when_too_wide() {
    let doc = Doc::group(Doc::concat(vec![Doc::text("a"), Doc::line(), Doc::text("b")]));
    assert_eq!(render(&doc, 80), "a b");
    assert_eq!(render(&doc, 2), "a\nb");
}

#[test]
fn test_group_measures_rest_of_line() {
    let doc = Doc::concat(vec![
        Doc::group(Doc::concat(vec![Doc::text("aaaa"), Doc::line(), Doc::text("b")])),
        Doc::text("cccc"),
    ]);
    assert_eq!(render(&doc, 10), "aaaa bcccc");
    assert_eq!(render(&doc, 8), "aaaa\nbcccc");
}

#[test]
fn test_hard_line_breaks_enclosing_group() {
    let doc = Doc::group(Doc::concat(vec![
        Doc::text("a"),
        Doc::hardline(),
        Doc::if_break(Doc::text("broken"), Doc::text("flat")),
    ]));
    assert_eq!(render(&doc, 80), "a\nbroken");

    let flat = Doc::group(Doc::concat(vec![
        Doc::text("a"),
        Doc::if_break(Doc::text("broken"), Doc::text("flat")),
    ]));
    assert_eq!(render(&flat, 80), "aflat");
}

#[test]
fn test_indent_and_trailing_spaces() {
    let doc = Doc::concat(vec![
        Doc::text("{ "),
        Doc::indent(Doc::concat(vec![Doc::hardline(), Doc::text("x")])),
        Doc::blankline(),
        Doc::text("}"),
    ]);
    assert_eq!(render(&doc, 80), "{\n  x\n\n}");
}

#[test]
fn test_print_expressions() {
    assert_eq!(
        print_expression(&binary(
            binary(identifier("a"), "+", identifier("b")),
            "*",
            identifier("c")
        )),
        "(a + b) * c"
    );
    assert_eq!(
        print_expression(&method_call(call(identifier("f"), vec![]), "g", vec![number(1)])),
        "f().g(1)"
    );
    assert_eq!(
        print_expression(&index(identifier("tokenURIMap"), identifier("tokenId"))),
        "tokenURIMap[tokenId]"
    );
    assert_eq!(
        print_expression(&tuple(vec![identifier("a"), boolean(true)])),
        "(a, true)"
    );
    assert_eq!(
        print_expression(&assign_with(identifier("total"), "+=", number(2))),
        "total += 2"
    );
    assert_eq!(
        print_expression(&string("say \"hi\"\\")),
        r#""say \"hi\"\\""#
    );
}

#[test]
fn test_print_named_arguments() {
    let settings = call_named(
        identifier("ConfigSettings"),
        [("royaltyBps", number(500)), ("hasTransferHook", boolean(false))],
    );
    assert_eq!(
        print_expression(&settings),
        "ConfigSettings({royaltyBps: 500, hasTransferHook: false})"
    );
    assert_eq!(
        print_expression(&call_named(identifier("Empty"), Vec::<(String, Expression)>::new())),
        "Empty({})"
    );
}

#[test]
fn test_long_call_breaks_arguments() {
    let long = call(
        identifier("someFunction"),
        vec![identifier("a".repeat(40)), identifier("b".repeat(40))],
    );
    assert_eq!(
        print_expression(&long),
        format!("someFunction(\n  {},\n  {}\n)", "a".repeat(40), "b".repeat(40))
    );
}

#[test]
fn test_print_setter_function() {
    let function = FunctionDeclaration::new("setSaleIsActive")
        .with_arguments(["bool saleIsActive_"])
        .with_modifiers(["external", "onlyOwner"])
        .with_body(vec![assign(identifier("saleIsActive"), identifier("saleIsActive_")).into()]);

    assert_eq!(
        print_declaration(&function.into()),
        r#"function setSaleIsActive(bool saleIsActive_) external onlyOwner {
  saleIsActive = saleIsActive_;
}"#
    );
}

#[test]
fn test_print_broken_signature() {
    let function = FunctionDeclaration::new("royaltyInfo")
        .with_arguments(["uint256", "uint256 salePrice"])
        .with_modifiers(["external", "view", "override"])
        .returns("address receiver, uint256 royaltyAmount")
        .with_body(vec![return_statement(Some(tuple(vec![
            call(identifier("address"), vec![identifier("this")]),
            binary(
                binary(identifier("salePrice"), "*", number(500)),
                "/",
                number(10_000),
            ),
        ])))]);

    assert_eq!(
        print_declaration(&function.into()),
        r#"function royaltyInfo(uint256, uint256 salePrice)
  external
  view
  override
  returns (address receiver, uint256 royaltyAmount)
{
  return (address(this), (salePrice * 500) / 10000);
}"#
    );
}

#[test]
fn test_print_statements_separated_by_blank_lines() {
    let function = FunctionDeclaration::new("totalSupply")
        .with_modifiers(["public", "view"])
        .returns("uint256")
        .with_body(vec![
            VariableDeclaration::new("uint256", "count")
                .with_initializer(number(0))
                .into(),
            return_statement(Some(identifier("count"))),
        ]);

    assert_eq!(
        print_declaration(&function.into()),
        r#"function totalSupply() public view returns (uint256) {
  uint256 count = 0;

  return count;
}"#
    );
}

#[test]
fn test_print_if_else_chain() {
    let statement = if_statement(
        identifier("a"),
        vec![return_statement(Some(boolean(true)))],
        Some(vec![if_statement(
            identifier("b"),
            vec![return_statement(None)],
            Some(vec![require(identifier("c"), "failed")]),
        )]),
    );

    assert_eq!(
        print_statement(&statement),
        r#"if (a) {
  return true;
} else if (b) {
  return;
} else {
  require(c, "failed");
}"#
    );
}

#[test]
fn test_print_for_loop() {
    let statement = for_statement(
        "uint256 i = 0",
        "i < count",
        "i++",
        vec![expression_statement(call(identifier("mintOne"), vec![identifier("i")]))],
    );

    assert_eq!(
        print_statement(&statement),
        "for (uint256 i = 0; i < count; i++) {\n  mintOne(i);\n}"
    );
}

#[test]
fn test_print_struct_and_using() {
    let structure = StructDeclaration::new(
        "TokenParameters",
        vec![
            VariableDeclaration::new("uint8", "level"),
            VariableDeclaration::new("string", "name"),
        ],
    );
    assert_eq!(
        print_declaration(&structure.into()),
        "struct TokenParameters {\n  uint8 level;\n  string name;\n}"
    );
    assert_eq!(
        print_declaration(&UsingDeclaration::new("Counters", "Counters.Counter").into()),
        "using Counters for Counters.Counter;"
    );
}

#[test]
fn test_print_contract_with_long_bases() {
    let contract = ContractDeclaration::new("VeryLongContractNameForTesting").with_bases([
        "ERC721Enumerable",
        "IERC2981",
        "ReentrancyGuard",
        "Ownable",
    ]);

    assert_eq!(
        print_contract(&contract),
        r#"contract VeryLongContractNameForTesting is
  ERC721Enumerable,
  IERC2981,
  ReentrancyGuard,
  Ownable
{}"#
    );
    assert_eq!(
        print_contract(&ContractDeclaration::new("OwnableDelegateProxy")),
        "contract OwnableDelegateProxy {}"
    );
}

#[test]
fn test_print_program() {
    let program = Program::new()
        .with_license("MIT")
        .with_pragma("^0.8.9")
        .with_imports(["a.sol", "b.sol"])
        .with_body(vec![
            ContractDeclaration::new("X")
                .with_bases(["A", "B"])
                .with_body(vec![
                    BlockComment::banner("STATE").into(),
                    parse_variable_declaration("bool public flag = true").into(),
                ])
                .into(),
            BlockComment::line("one\n\ntwo").into(),
        ]);

    assert_eq!(
        print_program(&program),
        r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.9;

import "a.sol";
import "b.sol";

contract X is A, B {
  /** STATE **/

  bool public flag = true;
}

// one
//
// two
"#
    );
}

#[test]
fn test_print_empty_program() {
    assert_eq!(print_program(&Program::new()), "\n");
}
