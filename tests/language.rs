use std::fs;

use lolz::{
    RunOptions,
    error::{LolzError, RuntimeError},
    get_output,
    interpreter::{
        evaluator::{core::Interpreter, io::ScriptedIo},
        lexer::scan,
        parser::core::parse,
        value::core::Value,
    },
    run,
};
use walkdir::WalkDir;

#[test]
fn sample_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "lol"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out"))
            .unwrap_or_else(|e| panic!("Missing expected output for {path:?}: {e}"));
        let input = fs::read_to_string(path.with_extension("in")).unwrap_or_default();

        count += 1;
        let report = run(&source, ScriptedIo::new(input.lines()), RunOptions::default());

        assert!(report.diagnostics.is_empty(),
                "{path:?} has diagnostics: {:#?}",
                report.diagnostics);
        assert_eq!(report.records(), expected.lines().collect::<Vec<_>>(), "{path:?}");
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn program(body: &str) -> String {
    format!("HAI 1.2\n{body}\nKTHXBYE\n")
}

fn output(body: &str) -> Vec<String> {
    get_output(&program(body), &[]).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn assert_output(body: &str, expected: &[&str]) {
    assert_eq!(output(body), expected, "for program:\n{body}");
}

fn runtime_error(body: &str) -> RuntimeError {
    match get_output(&program(body), &[]) {
        Err(LolzError::Runtime(e)) => e,
        other => panic!("Expected a runtime error, got {other:?}"),
    }
}

#[test]
fn declaration_and_output() {
    assert_output("WAZZUP\nI HAS A x ITZ 17\nBUHBYE\nVISIBLE x", &["17"]);
}

#[test]
fn mixed_arithmetic_promotes_to_numbar() {
    assert_output("VISIBLE SUM OF 3 AN 2.5", &["5.5"]);
    assert_output("VISIBLE SUM OF 3 AN 2", &["5"]);
    assert_output("VISIBLE PRODUKT OF 2.0 AN 3", &["6.0"]);
    assert_output("VISIBLE DIFF OF 1 AN 3", &["-2"]);
}

#[test]
fn division_always_yields_numbar() {
    assert_output("VISIBLE QUOSHUNT OF 10 AN 4", &["2.5"]);
    assert_output("VISIBLE QUOSHUNT OF 10 AN 5", &["2.0"]);
    assert_output("VISIBLE MOD OF 10 AN 4", &["2"]);
}

#[test]
fn conditional_follows_it() {
    let source = |lhs| {
        format!("BOTH SAEM {lhs} AN 1\nO RLY?\nYA RLY\nVISIBLE \"yes\"\nNO WAI\nVISIBLE \"no\"\nOIC")
    };
    assert_output(&source(1), &["yes"]);
    assert_output(&source(2), &["no"]);
}

#[test]
fn mebbe_evaluates_into_it() {
    assert_output("FAIL\nO RLY?\nYA RLY\nVISIBLE \"a\"\nMEBBE SUM OF 1 AN 1\nVISIBLE IT\nOIC",
                  &["2"]);
}

#[test]
fn loop_with_break_skips_the_update() {
    assert_output("WAZZUP\nI HAS A i ITZ 0\nBUHBYE\n\
                   IM IN YR l UPPIN YR i TIL BOTH SAEM i AN 5\nVISIBLE \"body\"\nGTFO\nIM OUTTA YR l\n\
                   VISIBLE i",
                  &["body", "0"]);
}

#[test]
fn loop_without_condition_stops_at_gtfo() {
    assert_output("WAZZUP\nI HAS A i ITZ 0\nBUHBYE\n\
                   IM IN YR l UPPIN YR i\nVISIBLE \"body\"\nGTFO\nIM OUTTA YR l\nVISIBLE i",
                  &["body", "0"]);
}

#[test]
fn loop_runs_until_condition() {
    assert_output("WAZZUP\nI HAS A i ITZ 0\nBUHBYE\n\
                   IM IN YR l UPPIN YR i WILE DIFFRINT i AN 3\nVISIBLE i\nIM OUTTA YR l",
                  &["0", "1", "2"]);
}

#[test]
fn switch_without_match_runs_default_only() {
    assert_output("7\nWTF?\nOMG 1\nVISIBLE \"one\"\nOMG 2\nVISIBLE \"two\"\nOMGWTF\nVISIBLE \"other\"\nOIC",
                  &["other"]);
}

#[test]
fn switch_does_not_fall_through() {
    assert_output("1\nWTF?\nOMG 1\nVISIBLE \"one\"\nOMG 2\nVISIBLE \"two\"\nOIC", &["one"]);
}

#[test]
fn switch_compares_without_coercion() {
    assert_output("3.0\nWTF?\nOMG 3\nVISIBLE \"numbr\"\nOMGWTF\nVISIBLE \"no match\"\nOIC",
                  &["no match"]);
}

#[test]
fn equality_coerces_loosely() {
    assert_output("VISIBLE BOTH SAEM \"3\" AN 3", &["WIN"]);
    assert_output("VISIBLE BOTH SAEM 3 AN 3.0", &["WIN"]);
    assert_output("VISIBLE BOTH SAEM \"abc\" AN 3", &["FAIL"]);
    assert_output("VISIBLE DIFFRINT \"abc\" AN 3", &["WIN"]);
}

#[test]
fn boolean_operators() {
    assert_output("VISIBLE BOTH OF WIN AN 0", &["FAIL"]);
    assert_output("VISIBLE EITHER OF \"\" AN 1", &["WIN"]);
    assert_output("VISIBLE WON OF WIN AN WIN", &["FAIL"]);
    assert_output("VISIBLE NOT 0", &["WIN"]);
    assert_output("VISIBLE ALL OF WIN AN 1 AN \"x\" MKAY", &["WIN"]);
    assert_output("VISIBLE ANY OF FAIL AN 0 AN \"\" MKAY", &["FAIL"]);
}

#[test]
fn uninitialized_variable_prints_noob() {
    assert_output("WAZZUP\nI HAS A x\nBUHBYE\nVISIBLE x", &["NOOB"]);
}

#[test]
fn typed_declaration_uses_default_value() {
    assert_output("WAZZUP\nI HAS A x ITZ A NUMBAR\nI HAS A y ITZ A TROOF\nBUHBYE\nVISIBLE x \" \" y",
                  &["0.0 FAIL"]);
}

#[test]
fn numbers_round_trip_through_yarn() {
    assert_output("WAZZUP\nI HAS A n ITZ -42\nBUHBYE\nn IS NOW A YARN\nn IS NOW A NUMBR\nVISIBLE SUM OF n AN 0",
                  &["-42"]);
    assert_output("WAZZUP\nI HAS A f ITZ 2.5\nBUHBYE\nf IS NOW A YARN\nf IS NOW A NUMBAR\nVISIBLE f",
                  &["2.5"]);
}

#[test]
fn function_return_goes_to_it() {
    assert_output("HOW IZ I twice YR x\nFOUND YR PRODUKT OF x AN 2\nIF U SAY SO\nI IZ twice YR 21 MKAY\nVISIBLE IT",
                  &["42"]);
}

#[test]
fn function_can_be_called_before_definition() {
    assert_output("VISIBLE I IZ one MKAY\nHOW IZ I one\nFOUND YR 1\nIF U SAY SO", &["1"]);
}

#[test]
fn gtfo_in_function_returns_noob() {
    assert_output("HOW IZ I f\nGTFO\nVISIBLE \"unreachable\"\nIF U SAY SO\nVISIBLE I IZ f MKAY",
                  &["NOOB"]);
}

#[test]
fn top_level_gtfo_ends_program() {
    assert_output("VISIBLE 1\nGTFO\nVISIBLE 2", &["1"]);
}

#[test]
fn function_locals_are_gone_after_return() {
    let error = runtime_error("HOW IZ I f YR a\nI HAS A local ITZ a\nFOUND YR local\nIF U SAY SO\n\
                               I IZ f YR 1 MKAY\nVISIBLE local");
    assert_eq!(error,
               RuntimeError::UnknownVariable { name: "local".to_string(),
                                               line: 7, });
}

#[test]
fn division_by_zero_is_error() {
    assert!(matches!(runtime_error("VISIBLE QUOSHUNT OF 1 AN 0"),
                     RuntimeError::DivisionByZero { line: 2 }));
    assert!(matches!(runtime_error("VISIBLE MOD OF 1.5 AN 0"),
                     RuntimeError::DivisionByZero { .. }));
}

#[test]
fn unknown_variable_is_error() {
    assert!(matches!(runtime_error("VISIBLE foo"), RuntimeError::UnknownVariable { .. }));
    assert!(matches!(runtime_error("foo R 1"), RuntimeError::UnknownVariable { .. }));
}

#[test]
fn wrong_function_arity_is_error() {
    let error = runtime_error("HOW IZ I f YR a AN YR b\nFOUND YR a\nIF U SAY SO\nI IZ f YR 1 MKAY");
    assert!(matches!(error,
                     RuntimeError::ArgumentCountMismatch { expected: 2,
                                                           found: 1,
                                                           .. }));
}

#[test]
fn failed_explicit_cast_is_error() {
    assert!(matches!(runtime_error("VISIBLE MAEK \"cat\" A NUMBR"),
                     RuntimeError::CastFailed { .. }));
}

#[test]
fn integer_overflow_is_error() {
    assert!(matches!(runtime_error("VISIBLE SUM OF 9223372036854775807 AN 1"),
                     RuntimeError::Overflow { .. }));
}

#[test]
fn runaway_recursion_is_error() {
    assert!(matches!(runtime_error("HOW IZ I f\nFOUND YR I IZ f MKAY\nIF U SAY SO\nI IZ f MKAY"),
                     RuntimeError::CallDepthExceeded { .. }));
}

#[test]
fn deep_recursion_within_the_limit_works() {
    assert_output("HOW IZ I total YR n\nBOTH SAEM n AN 0\nO RLY?\nYA RLY\nFOUND YR 0\nOIC\n\
                   FOUND YR SUM OF n AN I IZ total YR DIFF OF n AN 1 MKAY\nIF U SAY SO\n\
                   VISIBLE I IZ total YR 150 MKAY",
                  &["11325"]);
}

#[test]
fn large_numbr_casts_to_nearest_numbar() {
    assert_output("VISIBLE MAEK 9007199254740993 A NUMBAR", &["9007199254740992.0"]);
    assert_output("VISIBLE MAEK \"9007199254740993\" A NUMBAR", &["9007199254740992.0"]);
    assert_output("VISIBLE SUM OF 9007199254740993 AN 0.0", &["9007199254740992.0"]);
}

#[test]
fn nesting_limit_blocks_execution() {
    let deep = program(&format!("VISIBLE {}WIN", "NOT ".repeat(1000)));
    assert!(matches!(get_output(&deep, &[]), Err(LolzError::Syntax(_))));

    assert_output(&format!("VISIBLE {}WIN", "NOT ".repeat(200)), &["WIN"]);
}

#[test]
fn output_before_error_is_kept() {
    let report = run(&program("VISIBLE \"one\"\nVISIBLE QUOSHUNT OF 1 AN 0"),
                     ScriptedIo::default(),
                     RunOptions::default());

    assert!(report.executed);
    assert_eq!(report.output, ["one"]);
    assert_eq!(report.records(), ["one", "Error on line 3: Division by zero."]);
}

#[test]
fn gimmeh_at_end_of_input_stores_empty_yarn() {
    let source = program("WAZZUP\nI HAS A x\nBUHBYE\nGIMMEH x\nVISIBLE \"[\" x \"]\"");
    assert_eq!(get_output(&source, &[]).unwrap(), ["[]"]);
    assert_eq!(get_output(&source, &["meow"]).unwrap(), ["[meow]"]);
}

#[test]
fn syntax_errors_block_execution() {
    let source = program("VISIBLE \"before\"\nVISIBLE SUM OF 1 2");
    assert!(matches!(get_output(&source, &[]), Err(LolzError::Syntax(_))));

    let forced = run(&source,
                     ScriptedIo::default(),
                     RunOptions { analyze: false,
                                  force:   true, });
    assert!(forced.executed);
    assert_eq!(forced.output, ["before", "3"]);
}

#[test]
fn semantic_errors_do_not_block_execution() {
    let report = run(&program("I HAS A x ITZ 1\nVISIBLE x"),
                     ScriptedIo::default(),
                     RunOptions::default());

    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.is_success());
    assert_eq!(report.output, ["1"]);
}

#[test]
fn execution_is_deterministic_and_resets_state() {
    let (program, diagnostics) = parse(&scan(&program("WAZZUP\nI HAS A n ITZ 2\nBUHBYE\n\
                                                       n R PRODUKT OF n AN n\nVISIBLE n")));
    assert!(diagnostics.is_empty());

    let mut interpreter = Interpreter::new(ScriptedIo::default());
    interpreter.execute(&program).unwrap();
    let first = interpreter.output().to_vec();
    interpreter.execute(&program).unwrap();

    assert_eq!(first, ["4"]);
    assert_eq!(interpreter.output(), first);
    assert_eq!(interpreter.global("n"), Some(&Value::Numbr(4)));
    assert_eq!(interpreter.it(), &Value::Numbr(4));
    assert_eq!(interpreter.into_io().records(), ["4", "4"]);
}
