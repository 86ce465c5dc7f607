//! FILENAME: tests/test_expressions.rs
//! Integration tests for parsing and evaluating expressions end to end.

mod common;

use common::{eval, eval_with, AttributeLookup, EmptyLookup, RootLookup};
use engine::{EvalError, ExpEngine, ExpError, MapVarTable, SyntaxError};

fn syntax_error_position(engine: &ExpEngine, source: &str) -> Option<usize> {
    engine.parse_expression(source).err().map(|e| e.position())
}

// ============================================================================
// ARITHMETIC & PRECEDENCE
// ============================================================================

#[test]
fn test_mixed_arithmetic() {
    assert_eq!(eval("2*5 + 3*5*(3-1)+2"), 42.0);
}

#[test]
fn test_left_associative_division() {
    assert_eq!(eval("50/2/5"), 5.0);
}

#[test]
fn test_right_associative_power() {
    assert_eq!(eval("2^2^3"), 256.0);
}

#[test]
fn test_power_precedence() {
    assert_eq!(eval("1 + 2^2*4 + 2*[foo]"), 25.0);
    assert_eq!(eval("1 + 2^(2*4) + 2"), 259.0);
    assert_eq!(eval("-2^2"), -4.0);
    assert_eq!(eval("2^-1"), 0.5);
}

#[test]
fn test_unary_chains() {
    assert_eq!(eval("2----2"), 4.0);
    assert_eq!(eval("2---+-2"), 4.0);
    assert_eq!(eval("---2"), -2.0);
    assert_eq!(eval("!!5"), 1.0);
}

#[test]
fn test_nested_parentheses() {
    assert_eq!(eval("(((((1+1)))*5))"), 10.0);
}

#[test]
fn test_number_formats() {
    assert_eq!(eval("12.5e1"), 125.0);
    assert_eq!(eval("-42.3E-1"), -4.23);
    assert_eq!(eval("1e3 + 0.5"), 1000.5);
}

// ============================================================================
// FUNCTIONS
// ============================================================================

#[test]
fn test_builtin_functions() {
    assert_eq!(eval("max(3, 42)"), 42.0);
    assert_eq!(eval("min(3, 42)"), 3.0);
    assert_eq!(eval("abs(-42)"), 42.0);
    assert_eq!(eval("abs(+42)"), 42.0);
    assert_eq!(eval("floor(2.5) + ceil(2.5)"), 5.0);
    assert_eq!(eval("sqrt([foo])"), 2.0);
}

#[test]
fn test_unknown_function_is_eval_error() {
    let engine = ExpEngine::new();
    let err = engine.evaluate_str("nope(1)", &RootLookup).unwrap_err();
    assert_eq!(
        err,
        ExpError::Eval(EvalError::UnknownFunction {
            name: "nope".to_string()
        })
    );
}

#[test]
fn test_wrong_arity_is_eval_error() {
    let engine = ExpEngine::new();
    let err = engine.evaluate_str("max(1, 2, 3)", &RootLookup).unwrap_err();
    assert_eq!(
        err,
        ExpError::Eval(EvalError::ArgumentCount {
            name: "max".to_string(),
            expected: 2,
            found: 3,
        })
    );
}

#[test]
fn test_host_function() {
    let mut engine = ExpEngine::new();
    engine
        .registry_mut()
        .register("clamp", 3, |args| args[0].max(args[1]).min(args[2]));

    let result = engine.evaluate_str("clamp([foo] * 10, 0, 25)", &RootLookup).unwrap();
    assert_eq!(result.value, 25.0);
}

// ============================================================================
// LOGICAL & RELATIONAL
// ============================================================================

#[test]
fn test_not() {
    assert_eq!(eval("!42"), 0.0);
    assert_eq!(eval("!0"), 1.0);
    assert_eq!(eval("!(1&&42)"), 0.0);
    assert_eq!(eval("!!(1&&42)"), 1.0);
}

#[test]
fn test_equality() {
    assert_eq!(eval("42 == 42"), 1.0);
    assert_eq!(eval("42 == 41"), 0.0);
    assert_eq!(eval("42 != 42"), 0.0);
    assert_eq!(eval("42 != 41"), 1.0);
}

#[test]
fn test_or_and() {
    assert_eq!(eval("42 || 0"), 1.0);
    assert_eq!(eval("0 || 42"), 1.0);
    assert_eq!(eval("0 || 0"), 0.0);
    assert_eq!(eval("42 && 0"), 0.0);
    assert_eq!(eval("0 && 42"), 0.0);
    assert_eq!(eval("1 && 2"), 1.0);
}

#[test]
fn test_relational() {
    let cases = [
        ("42<41", 0.0),
        ("41<42", 1.0),
        ("42>41", 1.0),
        ("41>42", 0.0),
        ("42<=41", 0.0),
        ("41<=42", 1.0),
        ("42>=41", 1.0),
        ("41>=42", 0.0),
        ("42>=42", 1.0),
        ("42>42", 0.0),
    ];
    for (source, expected) in cases {
        assert_eq!(eval(source), expected, "{}", source);
    }
}

#[test]
fn test_comparison_of_arithmetic() {
    assert_eq!(eval("1 + 1 == 2 && 3 * 2 > 5"), 1.0);
    assert_eq!(eval("[foo] > [bar] || 0"), 1.0);
}

// ============================================================================
// VARIABLES
// ============================================================================

#[test]
fn test_quoted_roots() {
    assert_eq!(eval("[foo]*[bar]"), 12.0);
}

#[test]
fn test_attribute_paths() {
    assert_eq!(eval_with("[foo].bar.baz", &AttributeLookup), 4.0);
    assert_eq!(eval_with("[foo].bar.baz*4", &AttributeLookup), 16.0);
    assert_eq!(eval_with("[foo].bonk", &AttributeLookup), 5.0);
    assert_eq!(eval_with("[bob].is.your.uncle", &AttributeLookup), 0.0);
    assert_eq!(eval_with("[foo]", &AttributeLookup), -1.0);
}

#[test]
fn test_bare_identifier_paths() {
    assert_eq!(eval_with("foo.bar.baz + foo.bonk", &AttributeLookup), 9.0);
}

#[test]
fn test_map_table_with_spaces_in_root() {
    let mut vars = MapVarTable::new();
    vars.set(&["Server 1", "Utilisation"], 0.75);

    assert_eq!(eval_with("[Server 1].Utilisation * 100", &vars), 75.0);
}

#[test]
fn test_closure_table() {
    let lookup = |path: &[String]| -> Result<engine::ExpResult, EvalError> {
        Ok(engine::ExpResult::new(path.len() as f64))
    };
    assert_eq!(eval_with("a.b.c + [d]", &lookup), 4.0);
}

#[test]
fn test_lookup_failure_propagates() {
    let engine = ExpEngine::new();
    let err = engine.evaluate_str("1 + [Queue].Length", &EmptyLookup).unwrap_err();
    assert_eq!(
        err,
        ExpError::Eval(EvalError::UnresolvedVariable {
            path: "Queue.Length".to_string(),
            reason: "empty table".to_string(),
        })
    );
}

// ============================================================================
// ASSIGNMENTS
// ============================================================================

#[test]
fn test_assignment() {
    let engine = ExpEngine::new();
    let assign = engine.parse_assignment("[foo].bar = 40 + 2").unwrap();

    assert_eq!(assign.destination.len(), 2);
    assert_eq!(assign.destination[0], "foo");
    assert_eq!(assign.destination[1], "bar");
    assert_eq!(engine.evaluate(&assign.value, &EmptyLookup).unwrap().value, 42.0);
}

#[test]
fn test_assignment_reads_variables() {
    let engine = ExpEngine::new();
    let assign = engine.parse_assignment("[foo].total = [foo] * [bar]").unwrap();
    let evaluated = engine.evaluate_assignment(&assign, &RootLookup).unwrap();

    assert_eq!(evaluated.destination, vec!["foo", "total"]);
    assert_eq!(evaluated.value.value, 12.0);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_malformed_input_errors() {
    let engine = ExpEngine::new();

    let cases = [
        ("(1 + 2", "parse"),
        ("1 + 2 3", "parse"),
        ("", "parse"),
        ("max(1,", "parse"),
        ("[foo", "tokenize"),
        ("2 # 3", "parse"),
    ];

    for (source, kind) in cases {
        let err = engine.evaluate_str(source, &RootLookup).unwrap_err();
        let actual = match err {
            ExpError::Syntax(SyntaxError::Parse(_)) => "parse",
            ExpError::Syntax(SyntaxError::Tokenize(_)) => "tokenize",
            ExpError::Eval(_) => "eval",
        };
        assert_eq!(actual, kind, "{:?}", source);
    }
}

#[test]
fn test_error_positions() {
    let engine = ExpEngine::new();
    assert_eq!(syntax_error_position(&engine, "1 + * 2"), Some(4));
    assert_eq!(syntax_error_position(&engine, "abc [def"), Some(4));
    assert_eq!(syntax_error_position(&engine, "1 + 2"), None);
}

#[test]
fn test_long_operator_chain_is_rejected() {
    let engine = ExpEngine::new();

    for count in [5000, 20000] {
        let source = format!("1{}", "+1".repeat(count));
        let err = engine.evaluate_str(&source, &RootLookup).unwrap_err();
        assert!(
            matches!(err, ExpError::Syntax(SyntaxError::Parse(_))),
            "chain of {}",
            count
        );
    }
}

#[test]
fn test_chain_within_depth_limit_evaluates() {
    let source = format!("1{}", "+1".repeat(100));
    assert_eq!(eval(&source), 101.0);
}

#[test]
fn test_chain_limit_follows_config() {
    let engine = ExpEngine::with_config(engine::EngineConfig {
        max_depth: 8,
        ..engine::EngineConfig::default()
    });

    assert!(engine.parse_expression("1+2+3+4").is_ok());
    assert!(engine.parse_expression("1+2+3+4+5+6+7+8+9+10").is_err());
}

// ============================================================================
// DETERMINISM
// ============================================================================

#[test]
fn test_repeated_evaluation_is_deterministic() {
    let engine = ExpEngine::new();
    let expr = engine
        .parse_expression("max([foo], 2) ^ 2 / [bar] - !0 + (1 < 2)")
        .unwrap();

    let first = engine.evaluate(&expr, &RootLookup).unwrap();
    for _ in 0..100 {
        assert_eq!(engine.evaluate(&expr, &RootLookup).unwrap(), first);
    }
}
