//! aardvark-eval - Tree-walking evaluation for aardvark source.
//!
//! Owns the value stack, frame pointer, and scope tables the reference
//! implementation kept as process-wide globals, and performs name
//! resolution lazily as part of evaluation (see [`Interpreter`]). This is
//! roughly 35% of the core's budget, with the lazy resolver folded into
//! it contributing another 10%.

mod error;
mod interpreter;
mod value;

pub use error::EvalError;
pub use interpreter::Interpreter;
pub use value::Value;

use aardvark_par::Ast;
use aardvark_util::Limits;

/// Evaluates a parsed program to completion using the reference resource
/// ceilings.
///
/// Mutates `ast` in place (the resolver rewrites `Identifier`/`Call`
/// nodes as it encounters them) and returns the top-level result, which
/// is `Value::None` unless a `return` at the top level short-circuited
/// it.
pub fn eval(ast: &mut Ast) -> Result<Value, EvalError> {
    eval_with_limits(ast, Limits::default())
}

/// Same as [`eval`], with caller-supplied resource ceilings.
pub fn eval_with_limits(ast: &mut Ast, limits: Limits) -> Result<Value, EvalError> {
    Interpreter::with_limits(ast, limits).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aardvark_lex::tokenize;
    use aardvark_par::parse_program;

    // The grammar has no bare-expression statement: a line is a
    // declaration, assignment, call, or return. Tests that want a plain
    // expression's value wrap it in a top-level `return`, which the
    // Program pass short-circuits on exactly like any other propagating
    // return.
    fn run_source(src: &str) -> Result<Value, EvalError> {
        let tokens = tokenize(src.as_bytes()).expect("lex");
        let mut ast = parse_program(&tokens).expect("parse");
        eval(&mut ast)
    }

    fn as_integer(src: &str) -> i64 {
        match run_source(src).expect("eval") {
            Value::Integer(v) => v,
            other => panic!("expected integer result, got {other:?}"),
        }
    }

    #[test]
    fn arithmetic_precedence_is_respected() {
        assert_eq!(as_integer("return 1 + 2 * 3"), 7);
        assert_eq!(as_integer("return (1 + 2) * 3"), 9);
    }

    #[test]
    fn declaration_then_assignment_then_reference() {
        assert_eq!(as_integer("var x = 10  x = x - 4  return x"), 6);
    }

    #[test]
    fn user_function_call_evaluates_body() {
        // A bare call at the top level is itself a valid line, and its
        // non-none result propagates out of the Program pass the same
        // way an explicit `return` would.
        assert_eq!(as_integer("fn add(a, b) return a + b end  add(2, 3)"), 5);
    }

    #[test]
    fn recursive_function_unwinds_correctly() {
        assert_eq!(
            as_integer("fn fact(n) if n == 0 then return 1 end  return n * fact(n - 1) end  fact(5)"),
            120
        );
    }

    #[test]
    fn if_else_if_else_picks_the_right_branch() {
        let result = run_source(
            r#"if 1 == 2 then return "a" else if 2 == 2 then return "b" else return "c" end"#,
        )
        .expect("eval");
        match result {
            Value::String(s) => assert_eq!(&*s, "b"),
            other => panic!("expected string result, got {other:?}"),
        }
    }

    #[test]
    fn while_loop_runs_until_condition_is_false() {
        let src = "var i = 0  var total = 0  while i < 3 do total = total + i  i = i + 1 end  return total";
        assert_eq!(as_integer(src), 0 + 1 + 2);
    }

    #[test]
    fn unary_not_negates_truthiness() {
        assert_eq!(as_integer("return !0"), 1);
        assert_eq!(as_integer("return !1"), 0);
    }

    #[test]
    fn comparisons_produce_zero_or_one() {
        assert_eq!(as_integer("return 1 == 1"), 1);
        assert_eq!(as_integer("return 1 != 1"), 0);
        assert_eq!(as_integer("return 2 > 1"), 1);
        assert_eq!(as_integer("return 2 < 1"), 0);
    }

    #[test]
    fn reference_to_unknown_variable_is_fatal() {
        let err = run_source("print(y)").unwrap_err();
        assert_eq!(err, EvalError::VariableNotInScope);
        assert!(err.to_string().contains("Variable not in scope"));
    }

    #[test]
    fn call_to_unknown_function_is_fatal() {
        let err = run_source("foo()").unwrap_err();
        assert_eq!(err, EvalError::FunctionNotFound);
        assert!(err.to_string().contains("Function not found"));
    }

    #[test]
    fn frame_discipline_holds_after_a_successful_eval() {
        let tokens = tokenize(b"var a = 1\nvar b = 2\nfn f(x) return x end\nf(a)").unwrap();
        let mut ast = parse_program(&tokens).unwrap();
        let mut interp = Interpreter::new(&mut ast);
        interp.run().expect("eval");
        assert_eq!(interp.stack_len(), interp.global_count());
        assert_eq!(interp.frame_start(), 0);
    }

    #[test]
    fn resolution_happens_at_most_once_per_node() {
        // A loop body re-enters the same identifier node every iteration;
        // if resolution ran more than once it would still produce the
        // same answer, but a second resolver visit would mean the fast
        // path over the resolved kind isn't actually being taken.
        let src = "var i = 0\nvar seen = 0\nwhile i < 2 do seen = seen + i  i = i + 1 end\nreturn seen";
        assert_eq!(as_integer(src), 1);
    }

    #[test]
    fn resource_limit_exceeded_on_too_many_globals() {
        let src = "var a = 1\nvar b = 1\nvar c = 1";
        let tokens = tokenize(src.as_bytes()).unwrap();
        let mut ast = parse_program(&tokens).unwrap();
        let limits = Limits { max_globals: 2, ..Limits::default() };
        let err = eval_with_limits(&mut ast, limits).unwrap_err();
        assert_eq!(err, EvalError::ResourceLimitExceeded { resource: "globals", limit: 2 });
    }

    #[test]
    fn string_values_flow_through_a_call_unchanged() {
        let result = run_source(r#"fn echo(s) return s end  echo("hi")"#).expect("eval");
        match result {
            Value::String(s) => assert_eq!(&*s, "hi"),
            other => panic!("expected string result, got {other:?}"),
        }
    }
}
