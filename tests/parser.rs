use lolz::{
    ast::{BinaryOperator, Expr, Literal, NaryOperator, Operand, Program, Statement},
    error::{Diagnostic, Phase},
    interpreter::{
        lexer::scan,
        parser::core::{MAX_NESTING, parse},
        value::core::ValueType,
    },
};

fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
    parse(&scan(source))
}

fn parse_body(body: &str) -> (Vec<Statement>, Vec<Diagnostic>) {
    let (program, diagnostics) = parse_source(&format!("HAI\n{body}\nKTHXBYE"));
    (program.body, diagnostics)
}

fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}

fn literal(value: i64, line: usize) -> Expr {
    Expr::Operand { operand: Operand::Literal(Literal::Numbr(value)),
                    line }
}

#[test]
fn program_structure() {
    let (program, diagnostics) =
        parse_source("HAI 1.2\nWAZZUP\nI HAS A x ITZ 1\nI HAS A y\nBUHBYE\nVISIBLE x\nKTHXBYE\n");

    assert!(diagnostics.is_empty());
    assert_eq!(program.version.as_deref(), Some("1.2"));

    let block = program.var_block.expect("declaration block");
    assert_eq!(block.line, 2);
    assert_eq!(block.declarations.len(), 2);
    assert_eq!(program.body.len(), 1);
}

#[test]
fn version_must_be_on_hai_line() {
    let (program, diagnostics) = parse_source("HAI\n1\nKTHXBYE");

    assert!(diagnostics.is_empty());
    assert_eq!(program.version, None);
    assert_eq!(program.body.len(), 1);
}

#[test]
fn nested_binary_expression() {
    let (body, diagnostics) = parse_body("SUM OF PRODUKT OF 2 AN 3 AN 4");
    assert!(diagnostics.is_empty());

    let expected = Expr::BinaryOp { op:    BinaryOperator::Sum,
                                    left:  Box::new(Expr::BinaryOp { op:    BinaryOperator::Produkt,
                                                                     left:  Box::new(literal(2, 2)),
                                                                     right: Box::new(literal(3, 2)),
                                                                     line:  2, }),
                                    right: Box::new(literal(4, 2)),
                                    line:  2, };
    assert_eq!(body, [Statement::Expression { expr: expected,
                                              line: 2, }]);
}

#[test]
fn declarations() {
    let (body, diagnostics) = parse_body("I HAS A a\nI HAS A b ITZ \"x\"\nI HAS A c ITZ A NUMBAR");
    assert!(diagnostics.is_empty());

    assert!(matches!(&body[0], Statement::VarDecl { name, value: None, declared_type: None, .. } if name == "a"));
    assert!(matches!(&body[1], Statement::VarDecl { value: Some(_), .. }));
    assert!(matches!(&body[2],
                     Statement::VarDecl { declared_type: Some(ValueType::Numbar),
                                          value: None,
                                          .. }));
}

#[test]
fn assignment_and_recast() {
    let (body, diagnostics) = parse_body("x R 5\nx IS NOW A YARN\nx");
    assert!(diagnostics.is_empty());

    assert!(matches!(&body[0], Statement::Assignment { name, .. } if name == "x"));
    assert!(matches!(&body[1],
                     Statement::TypeCast { target: ValueType::Yarn,
                                           line: 3,
                                           .. }));
    assert!(matches!(&body[2], Statement::Expression { .. }));
}

#[test]
fn nary_operators_with_and_without_mkay() {
    let (body, diagnostics) = parse_body("SMOOSH \"a\" AN \"b\" AN \"c\" MKAY\nALL OF WIN AN FAIL");
    assert!(diagnostics.is_empty());
    assert_eq!(body.len(), 2);

    match &body[0] {
        Statement::Expression { expr: Expr::NaryOp { op, operands, .. },
                                .. } => {
            assert_eq!(*op, NaryOperator::Smoosh);
            assert_eq!(operands.len(), 3);
        },
        other => panic!("Expected SMOOSH, got {other:?}"),
    }
}

#[test]
fn visible_arguments() {
    let (body, diagnostics) = parse_body("VISIBLE \"a\" AN \"b\" + \"c\" x\nVISIBLE y");
    assert!(diagnostics.is_empty());
    assert_eq!(body.len(), 2);

    match &body[0] {
        Statement::Visible { arguments, .. } => assert_eq!(arguments.len(), 4),
        other => panic!("Expected VISIBLE, got {other:?}"),
    }
}

#[test]
fn expression_on_next_line_is_a_new_statement() {
    let (body, diagnostics) = parse_body("VISIBLE x\ny");
    assert!(diagnostics.is_empty());
    assert!(matches!(body.as_slice(), [Statement::Visible { .. }, Statement::Expression { .. }]));
}

#[test]
fn function_definition_and_call() {
    let (body, diagnostics) =
        parse_body("HOW IZ I add YR a AN YR b\nFOUND YR SUM OF a AN b\nIF U SAY SO\nI IZ add YR 1 AN YR 2 MKAY");
    assert!(diagnostics.is_empty());

    match &body[0] {
        Statement::FuncDef(def) => {
            assert_eq!(def.name, "add");
            assert_eq!(def.params, ["a", "b"]);
            assert!(matches!(def.body.as_slice(), [Statement::Return { .. }]));
        },
        other => panic!("Expected a function, got {other:?}"),
    }
    match &body[1] {
        Statement::Expression { expr: Expr::FuncCall { name, arguments, .. },
                                .. } => {
            assert_eq!(name, "add");
            assert_eq!(arguments.len(), 2);
        },
        other => panic!("Expected a call, got {other:?}"),
    }
}

#[test]
fn conditionals_and_switches() {
    let (body, diagnostics) = parse_body("O RLY?\nYA RLY\nVISIBLE 1\nMEBBE WIN\nVISIBLE 2\nMEBBE FAIL\nNO WAI\nOIC\n\
                                          WTF?\nOMG 1\nGTFO\nOMG \"a\"\nOMGWTF\nVISIBLE 3\nOIC");
    assert!(diagnostics.is_empty());

    match &body[0] {
        Statement::If { else_ifs,
                        else_branch,
                        .. } => {
            assert_eq!(else_ifs.len(), 2);
            assert_eq!(else_branch.as_deref(), Some(&[][..]));
        },
        other => panic!("Expected O RLY?, got {other:?}"),
    }
    match &body[1] {
        Statement::Switch { cases, default, .. } => {
            assert_eq!(cases.len(), 2);
            assert_eq!(cases[1].literal, Literal::Yarn("a".to_string()));
            assert!(default.is_some());
        },
        other => panic!("Expected WTF?, got {other:?}"),
    }
}

#[test]
fn loops() {
    let (body, diagnostics) =
        parse_body("IM IN YR l NERFIN YR i WILE i\nVISIBLE i\nIM OUTTA YR l\nIM IN YR forever\nGTFO\nIM OUTTA YR forever");
    assert!(diagnostics.is_empty());
    assert_eq!(body.len(), 2);

    assert!(matches!(&body[0], Statement::Loop { operation: Some(_), condition: Some(_), .. }));
    assert!(matches!(&body[1],
                     Statement::Loop { operation: None,
                                       condition: None,
                                       .. }));
}

#[test]
fn missing_an_is_reported_and_recovered() {
    let (body, diagnostics) = parse_body("VISIBLE SUM OF 1 2");

    assert_eq!(messages(&diagnostics), ["Expected 'AN' between operands of 'SUM OF'"]);
    assert_eq!(diagnostics[0].phase, Phase::Syntactic);
    assert_eq!(diagnostics[0].lexeme, "2");
    assert_eq!(body.len(), 1);
}

#[test]
fn missing_oic_is_reported() {
    let (_, diagnostics) = parse_body("WIN\nO RLY?\nYA RLY\nVISIBLE 1");
    assert_eq!(messages(&diagnostics), ["Missing 'OIC' to close 'O RLY?' on line 3"]);
}

#[test]
fn missing_kthxbye_is_reported() {
    let (program, diagnostics) = parse_source("HAI\nVISIBLE 1\n");

    assert_eq!(messages(&diagnostics), ["Missing 'KTHXBYE' at end of program, found end of input"]);
    assert_eq!(diagnostics[0].line, 2);
    assert_eq!(program.body.len(), 1);
}

#[test]
fn missing_hai_is_reported() {
    let (program, diagnostics) = parse_source("VISIBLE 1\nKTHXBYE");
    assert_eq!(messages(&diagnostics), ["Expected 'HAI' at start of program"]);
    assert_eq!(program.body.len(), 1);
}

#[test]
fn trailing_tokens_are_reported() {
    let (_, diagnostics) = parse_source("HAI\nKTHXBYE\nVISIBLE 1");
    assert_eq!(messages(&diagnostics), ["Unexpected tokens after 'KTHXBYE'"]);
}

#[test]
fn loop_label_mismatch_is_reported() {
    let (_, diagnostics) = parse_body("IM IN YR a\nGTFO\nIM OUTTA YR b");
    assert_eq!(messages(&diagnostics), ["Loop label 'b' does not match 'a'"]);
}

#[test]
fn stray_closer_is_reported() {
    let (body, diagnostics) = parse_body("VISIBLE 1\nOIC\nVISIBLE 2");

    assert_eq!(messages(&diagnostics), ["Unexpected Control Flow End outside of its block"]);
    assert_eq!(body.len(), 2);
}

#[test]
fn unknown_characters_are_lexical_errors() {
    let (body, diagnostics) = parse_body("VISIBLE 1 $\nVISIBLE 2");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].phase, Phase::Lexical);
    assert_eq!(diagnostics[0].to_string(),
               "Line 2: lexical error: Unrecognized character (token: '$')");
    assert_eq!(body.len(), 2);
}

#[test]
fn keyword_glued_to_a_name_is_a_lexical_error() {
    let (body, diagnostics) = parse_body("I HAS Apple\nVISIBLE 1");

    assert_eq!(diagnostics[0].phase, Phase::Lexical);
    assert_eq!(diagnostics[0].lexeme, "I HAS A");
    assert!(body.iter().all(|s| !matches!(s, Statement::VarDecl { .. })));
}

#[test]
fn deeply_nested_expression_is_reported_once() {
    let (body, diagnostics) = parse_body(&format!("VISIBLE {}WIN\nVISIBLE 2", "NOT ".repeat(1000)));

    assert_eq!(messages(&diagnostics), ["Expression nested too deeply"]);
    assert_eq!(diagnostics[0].line, 2);
    assert!(matches!(body.as_slice(), [Statement::Visible { line: 3, .. }]));
}

#[test]
fn nesting_below_the_limit_parses() {
    let depth = MAX_NESTING - 1;
    let (body, diagnostics) = parse_body(&format!("{}WIN", "NOT ".repeat(depth)));

    assert!(diagnostics.is_empty());
    assert_eq!(body.len(), 1);
}

#[test]
fn parser_reports_every_error() {
    let (body, diagnostics) = parse_body("VISIBLE SUM OF 1 2\nI HAS A\nVISIBLE DIFF OF 3 4\nVISIBLE 5");

    assert_eq!(diagnostics.len(), 3);
    assert!(matches!(body.last(), Some(Statement::Visible { line: 5, .. })));
}

#[test]
fn empty_input_still_parses() {
    let (program, diagnostics) = parse_source("");

    assert_eq!(program, Program::default());
    assert_eq!(messages(&diagnostics),
               ["Expected 'HAI' at start of program, found end of input",
                "Missing 'KTHXBYE' at end of program, found end of input"]);
}

#[test]
fn ast_serializes_with_node_tags() {
    let (body, _) = parse_body("GTFO");
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json, serde_json::json!([{ "node": "Break", "line": 2 }]));
}
