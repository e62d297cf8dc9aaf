//! End-to-end tests: source text in, output queue and final variables out.

use selang_core::{compile, Error, ExecutionContext, LexError, RuntimeError, SyntaxError, Value};

fn run(source: &str, inputs: &[&str]) -> Vec<String> {
    compile(source)
        .unwrap_or_else(|e| panic!("compile failed: {e}\n{source}"))
        .run(inputs.iter().copied())
        .unwrap_or_else(|e| panic!("run failed: {e}\n{source}"))
}

fn final_value(source: &str, name: &str) -> Value {
    let program = compile(source).unwrap();
    let mut ctx = ExecutionContext::new(Vec::<String>::new());
    program.execute(&mut ctx).unwrap();
    ctx.environment()
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("'{name}' not bound"))
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(run("tulis 10 + 2 * (5 + 8) - 8", &[]), ["28"]);
    assert_eq!(run("tulis 10 * 5 / 8", &[]), ["6.25"]);
    assert_eq!(run("tulis 100 % 8", &[]), ["4"]);
    assert_eq!(run("tulis 10 - 5 - 8", &[]), ["-3"]);
    assert_eq!(run("tulis -(2 + 3) * 2", &[]), ["-10"]);
}

#[test]
fn assignment_round_trips() {
    assert_eq!(final_value("foo itu 10", "foo"), Value::Number(10.0));
    assert_eq!(run("foo itu 10\ntulis foo", &[]), ["10"]);
}

#[test]
fn boolean_composition() {
    assert_eq!(
        final_value("x itu bukan ((2 > 3 atau 4 >= 3) == (2 < 3 dan 4 <= 3))", "x"),
        Value::Bool(true)
    );
}

#[test]
fn chained_conditional_selects_one_branch() {
    let source = r#"
kalo salah
    tulis "if"
kalogak benar
    tulis "elseif"
lainnya
    tulis "else"
yaudah
"#;
    assert_eq!(run(source, &[]), ["elseif"]);
}

#[test]
fn chained_conditional_falls_through_to_else() {
    let source = r#"
x itu 7
kalo x < 0
    tulis "negatif"
kalogak x == 0
    tulis "nol"
lainnya
    tulis "positif"
yaudah
"#;
    assert_eq!(run(source, &[]), ["positif"]);
}

#[test]
fn for_loop_sums_inclusive_range() {
    let source = r#"
sum itu 0
ulangin i dari 1 sampe 10
    sum itu sum + i
yaudah
"#;
    assert_eq!(final_value(source, "sum"), Value::Number(55.0));
}

#[test]
fn while_loop_counts_to_ten() {
    let source = r#"
i itu 0
selama i < 10
    i itu i + 1
yaudah
"#;
    assert_eq!(final_value(source, "i"), Value::Number(10.0));
}

#[test]
fn input_print_round_trip() {
    assert_eq!(run("baca foo\ntulis foo", &["10"]), ["10"]);
}

#[test]
fn inputs_are_read_in_order() {
    assert_eq!(run("baca a\nbaca b\ntulis a - b", &["10", "3"]), ["7"]);
}

#[test]
fn text_input_concatenates() {
    assert_eq!(run(r#"baca nama
tulis "halo " + nama"#, &["dunia"]), ["halo dunia"]);
}

#[test]
fn fizz_buzz() {
    let source = r#"
baca n
ulangin i dari 1 sampe n
	kalo i % 3 == 0 dan i % 5 == 0
		tulis "FizzBuzz"
	kalogak i % 3 == 0
		tulis "Fizz"
	kalogak i % 5 == 0
		tulis "Buzz"
	lainnya
		tulis i
	yaudah
yaudah
"#;
    assert_eq!(
        run(source, &["15"]),
        [
            "1", "2", "Fizz", "4", "Buzz", "Fizz", "7", "8", "Fizz", "Buzz", "11", "Fizz", "13",
            "14", "FizzBuzz",
        ]
    );
}

#[test]
fn nested_loops_share_one_frame() {
    let source = r#"
ulangin i dari 1 sampe 2
    ulangin j dari 1 sampe 2
        last itu i * 10 + j
    yaudah
yaudah
tulis last
tulis j
"#;
    assert_eq!(run(source, &[]), ["22", "2"]);
}

#[test]
fn unterminated_string_is_lexical_error() {
    let err = compile("tulis \"halo").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::MissingClosingQuote { .. })));
}

#[test]
fn invalid_character_is_lexical_error() {
    let err = compile("x itu 1 & 2").unwrap_err();
    assert_eq!(err, Error::Lex(LexError::InvalidToken { ch: '&', line: 1 }));
}

#[test]
fn missing_terminator_is_syntax_error() {
    let err = compile("selama benar\n    tulis 1\n").unwrap_err();
    assert_eq!(
        err,
        Error::Syntax(SyntaxError::MissingTerminator { construct: "selama", line: 1 })
    );
    assert!(err.to_string().contains("'yaudah'"));
}

#[test]
fn syntax_errors_prevent_any_execution() {
    // the parse fails before the first tulis could run
    assert!(compile("tulis 1\nkalo benar").is_err());
}

#[test]
fn empty_input_queue_is_runtime_error() {
    let program = compile("baca n").unwrap();
    let err = program.run(Vec::<String>::new()).unwrap_err();
    assert_eq!(err, RuntimeError::MissingInput { target: "n".to_string() });
}

#[test]
fn unknown_identifier_is_runtime_error() {
    let program = compile("tulis 1\ntulis y").unwrap();
    let mut ctx = ExecutionContext::new(Vec::<String>::new());
    let err = program.execute(&mut ctx).unwrap_err();
    assert_eq!(err, RuntimeError::UnknownIdentifier { name: "y".to_string() });
    assert_eq!(ctx.output(), ["1"]);
}

#[test]
fn cross_type_equality_is_false() {
    assert_eq!(run(r#"tulis 1 == "1""#, &[]), ["salah"]);
    assert_eq!(run(r#"tulis 1 != "1""#, &[]), ["benar"]);
}
