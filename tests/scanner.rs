use lolz::interpreter::lexer::{Token, TokenKind, scan};

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).into_iter().map(|token| token.kind).collect()
}

#[test]
fn multi_word_keywords_are_single_tokens() {
    use TokenKind::*;

    assert_eq!(kinds("I HAS A x ITZ SUM OF 1 AN 2"),
               [IHasA, Identifier, Itz, SumOf, NumbrLiteral, An, NumbrLiteral]);
    assert_eq!(kinds("IM IN YR l UPPIN YR i TIL BOTH SAEM i AN 3"),
               [ImInYr, Identifier, Uppin, Yr, Identifier, Til, BothSaem, Identifier, An, NumbrLiteral]);
    assert_eq!(kinds("HOW IZ I f YR x\nIF U SAY SO\nI IZ f YR 1 MKAY"),
               [HowIzI, Identifier, Yr, Identifier, IfUSaySo, IIz, Identifier, Yr, NumbrLiteral, Mkay]);
    assert_eq!(kinds("O RLY?\nYA RLY\nNO WAI\nOIC"), [ORly, YaRly, NoWai, Oic]);
    assert_eq!(kinds("WTF?\nOMG 1\nOMGWTF\nOIC"), [Wtf, Omg, NumbrLiteral, Omgwtf, Oic]);
}

#[test]
fn keywords_allow_tabs_between_words() {
    assert_eq!(kinds("SUM\t OF"), [TokenKind::SumOf]);
    assert_eq!(scan("I  HAS\tA")[0].lexeme, "I  HAS\tA");
}

#[test]
fn keywords_do_not_span_lines() {
    assert_eq!(kinds("SUM\nOF"), [TokenKind::Identifier, TokenKind::Identifier]);
}

#[test]
fn identifiers_that_contain_keywords() {
    assert_eq!(kinds("ITZY AN_2 Rate WINNER OICU"), [TokenKind::Identifier; 5]);
    assert_eq!(kinds("IT ITZ"), [TokenKind::It, TokenKind::Itz]);
}

#[test]
fn single_letter_keywords_beat_identifiers() {
    use TokenKind::*;

    assert_eq!(kinds("x R 1"), [Identifier, R, NumbrLiteral]);
    assert_eq!(kinds("I HAS A x ITZ A NUMBR"), [IHasA, Identifier, Itz, A, TypeLiteral]);
    assert_eq!(kinds("MAEK x A YARN"), [Maek, Identifier, A, TypeLiteral]);
    assert_eq!(kinds("Rx Ab"), [Identifier, Identifier]);
}

#[test]
fn keyword_glued_to_next_word_is_unknown() {
    let tokens = scan("I HAS Apple");

    assert_eq!(tokens[0].kind, TokenKind::Unknown);
    assert_eq!(tokens[0].lexeme, "I HAS A");
    assert!(tokens.iter().all(|t| t.kind != TokenKind::IHasA));

    assert_eq!(kinds("SUM OF_x")[0], TokenKind::Unknown);
    assert_eq!(kinds("SUM OF x"), [TokenKind::SumOf, TokenKind::Identifier]);
}

#[test]
fn literals() {
    let tokens = scan("42 -7 3.14 -0.5 \"HAI :)\" WIN FAIL NUMBAR NOOB");
    let expected = [(TokenKind::NumbrLiteral, "42"),
                    (TokenKind::NumbrLiteral, "-7"),
                    (TokenKind::NumbarLiteral, "3.14"),
                    (TokenKind::NumbarLiteral, "-0.5"),
                    (TokenKind::YarnLiteral, "\"HAI :)\""),
                    (TokenKind::TroofLiteral, "WIN"),
                    (TokenKind::TroofLiteral, "FAIL"),
                    (TokenKind::TypeLiteral, "NUMBAR"),
                    (TokenKind::TypeLiteral, "NOOB")];

    let actual: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect();
    assert_eq!(actual, expected);
}

#[test]
fn escaped_quote_does_not_end_yarn() {
    let tokens = scan("\"say :\"hi:\"\" AN");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::YarnLiteral);
    assert_eq!(tokens[0].lexeme, "\"say :\"hi:\"\"");
}

#[test]
fn unterminated_yarn_is_unknown() {
    let tokens = scan("VISIBLE \"oops\nVISIBLE 1");
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Unknown));
    assert_eq!(tokens.last().map(|t| (t.kind, t.line)), Some((TokenKind::NumbrLiteral, 2)));
}

#[test]
fn comments_are_dropped() {
    assert_eq!(kinds("VISIBLE 1 BTW VISIBLE 2\nBTW\nVISIBLE 3"),
               [TokenKind::Visible, TokenKind::NumbrLiteral, TokenKind::Visible, TokenKind::NumbrLiteral]);
    assert_eq!(kinds("OBTW\nVISIBLE 1\nTLDR\nVISIBLE 2"),
               [TokenKind::Visible, TokenKind::NumbrLiteral]);
}

#[test]
fn block_comments_keep_line_numbers() {
    let tokens = scan("HAI\nOBTW one\ntwo\nthree TLDR\nVISIBLE x");
    let visible = &tokens[1];

    assert_eq!(visible.kind, TokenKind::Visible);
    assert_eq!(visible.line, 5);
    assert_eq!(visible.column, 1);
}

#[test]
fn unterminated_block_comment_runs_to_end() {
    assert_eq!(kinds("VISIBLE 1\nOBTW\nVISIBLE 2"), [TokenKind::Visible, TokenKind::NumbrLiteral]);
}

#[test]
fn lines_and_columns() {
    let tokens = scan("HAI 1.2\n  VISIBLE \"x\"\r\nKTHXBYE");

    let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(positions, [(1, 1), (1, 5), (2, 3), (2, 11), (3, 1)]);
}

#[test]
fn columns_count_characters() {
    let tokens = scan("VISIBLE \"ünïcødé\" x");
    assert_eq!(tokens[2].column, 19);
}

#[test]
fn unknown_input_is_kept() {
    let tokens = scan("VISIBLE 1 $ 2");

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[2],
               Token { kind:   TokenKind::Unknown,
                       lexeme: "$".to_string(),
                       line:   1,
                       column: 11, });
}

#[test]
fn labels_describe_tokens() {
    assert_eq!(TokenKind::Hai.label(), "Code Delimiter");
    assert_eq!(TokenKind::SumOf.label(), "Arithmetic Operator");
    assert_eq!(TokenKind::Identifier.label(), "Variable Identifier");
}

#[test]
fn tokens_serialize_to_json() {
    let json = serde_json::to_value(scan("VISIBLE")).unwrap();
    assert_eq!(json,
               serde_json::json!([{ "kind": "Visible", "lexeme": "VISIBLE", "line": 1, "column": 1 }]));
}
