use rox::lox::Lox;
use rox::value::Value;

/// Runs source as a whole program; returns captured (stdout, diagnostics).
fn run(source: &str) -> (String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut diagnostics: Vec<u8> = Vec::new();

    {
        let mut lox = Lox::new(&mut out, &mut diagnostics);
        lox.run(source, false);
    }

    (
        String::from_utf8(out).expect("program output should be UTF-8"),
        String::from_utf8(diagnostics).expect("diagnostics should be UTF-8"),
    )
}

/// Runs source and asserts it produced no diagnostics at all.
fn run_ok(source: &str) -> String {
    let (output, diagnostics) = run(source);

    assert!(diagnostics.is_empty(), "unexpected diagnostics: {}", diagnostics);

    output
}

/// Feeds each line to one session in REPL mode, like interactive use.
fn repl(lines: &[&str]) -> (String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut diagnostics: Vec<u8> = Vec::new();

    {
        let mut lox = Lox::new(&mut out, &mut diagnostics);
        for line in lines {
            lox.run(line, true);
            lox.clear_error();
        }
    }

    (
        String::from_utf8(out).expect("program output should be UTF-8"),
        String::from_utf8(diagnostics).expect("diagnostics should be UTF-8"),
    )
}

// ─────────────────────────────────────────────────────────────────────────
// Expressions & statements
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn print_stringifies_values() {
    let output = run_ok("print 1; print 1.5; print \"hi\"; print true; print nil;");

    assert_eq!(output, "1\n1.5\nhi\ntrue\nnil\n");
}

#[test]
fn integer_valued_numbers_print_without_trailing_zero() {
    assert_eq!(run_ok("print 10 / 4; print 10 / 5;"), "2.5\n2\n");
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(run_ok("print 1 + 2 * 3 - 4 / 2;"), "5\n");
}

#[test]
fn string_concatenation_stringifies_either_side() {
    let output = run_ok("print \"a\" + \"b\"; print \"n=\" + 1; print 2 + \"x\"; print \"\" + nil;");

    assert_eq!(output, "ab\nn=1\n2x\nnil\n");
}

#[test]
fn plus_on_incompatible_operands_is_a_runtime_error() {
    let (_, diagnostics) = run("print true + 1;");

    assert!(diagnostics.contains("Operands must be two numbers or either of them a string."));
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let (output, diagnostics) = run("print 1 / 0;");

    assert!(output.is_empty());
    assert_eq!(diagnostics, "[line 1] Division by zero.\n");
}

#[test]
fn comparisons_require_numbers() {
    let (_, diagnostics) = run("print 1 < \"a\";");

    assert!(diagnostics.contains("Operands must be numbers."));
}

#[test]
fn unary_minus_requires_a_number() {
    let (_, diagnostics) = run("print -\"a\";");

    assert!(diagnostics.contains("Operand must be a number."));
}

#[test]
fn truthiness_only_rejects_nil_and_false() {
    let output = run_ok("print !nil; print !false; print !0; print !\"\"; print !true;");

    assert_eq!(output, "true\ntrue\nfalse\nfalse\nfalse\n");
}

#[test]
fn equality_follows_corrected_nil_semantics() {
    let output = run_ok(
        "print nil == nil; print nil == false; print nil == 0; \
         print 1 == 1; print \"a\" == \"a\"; print \"a\" == \"b\"; print 1 == \"1\";",
    );

    assert_eq!(output, "true\nfalse\nfalse\ntrue\ntrue\nfalse\nfalse\n");
}

#[test]
fn nan_equals_nan_by_design() {
    // NaN is unreachable from Lox source (0/0 raises), so the rule is
    // checked on the value type directly.
    assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    assert_ne!(Value::Number(f64::NAN), Value::Number(1.0));
}

#[test]
fn logical_operators_return_operands() {
    let output = run_ok("print nil or \"yes\"; print nil and \"no\"; print 1 or 2; print 1 and 2;");

    assert_eq!(output, "yes\nnil\n1\n2\n");
}

#[test]
fn logical_operators_short_circuit_side_effects() {
    let output = run_ok(
        "var x = 0;
         fun bump() { x = x + 1; return true; }
         true or bump();
         false and bump();
         print x;",
    );

    assert_eq!(output, "0\n");
}

// ─────────────────────────────────────────────────────────────────────────
// Variables & scope
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn global_redeclaration_overwrites() {
    assert_eq!(run_ok("var a = 1; var a = 2; print a;"), "2\n");
}

#[test]
fn uninitialized_variables_are_nil() {
    assert_eq!(run_ok("var a; print a;"), "nil\n");
}

#[test]
fn global_self_reference_reads_previous_binding() {
    assert_eq!(run_ok("var a = 1; var a = a + 1; print a;"), "2\n");
}

#[test]
fn global_self_reference_without_previous_binding_fails_at_runtime() {
    let (_, diagnostics) = run("var a = a;");

    assert_eq!(diagnostics, "[line 1] Undefined variable 'a'.\n");
}

#[test]
fn blocks_shadow_and_restore() {
    let output = run_ok(
        "var a = \"global a\";
         var b = \"global b\";
         {
             var a = \"outer a\";
             {
                 var a = \"inner a\";
                 print a;
                 print b;
             }
             print a;
         }
         print a;",
    );

    assert_eq!(output, "inner a\nglobal b\nouter a\nglobal a\n");
}

#[test]
fn assignment_writes_through_to_outer_scope() {
    assert_eq!(run_ok("var a = 1; { a = 2; } print a;"), "2\n");
}

#[test]
fn undefined_variable_read_is_a_runtime_error() {
    let (output, diagnostics) = run("print 1; print missing; print 2;");

    // The failing statement unwinds; the next one still runs.
    assert_eq!(output, "1\n2\n");
    assert_eq!(diagnostics, "[line 1] Undefined variable 'missing'.\n");
}

#[test]
fn closures_over_globals_are_late_bound() {
    let output = run_ok("var x = 1; fun f() { return x; } var x = 2; print f();");

    assert_eq!(output, "2\n");
}

#[test]
fn lexical_scope_is_fixed_at_resolution() {
    let output = run_ok(
        "var a = \"global\";
         {
             fun show() { print a; }
             show();
             var a = \"local\";
             show();
         }",
    );

    assert_eq!(output, "global\nglobal\n");
}

// ─────────────────────────────────────────────────────────────────────────
// Functions & control flow
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn functions_without_return_yield_nil() {
    assert_eq!(run_ok("fun f() {} print f();"), "nil\n");
}

#[test]
fn return_exits_early() {
    let output = run_ok(
        "fun f() {
             return 82;
             print \"unreachable\";
         }
         print f();",
    );

    assert_eq!(output, "82\n");
}

#[test]
fn recursion_computes_fibonacci() {
    let output = run_ok(
        "fun fib(n) { if (n <= 1) return n; return fib(n - 2) + fib(n - 1); }
         print fib(10);",
    );

    assert_eq!(output, "55\n");
}

#[test]
fn functions_are_first_class() {
    assert_eq!(
        run_ok("fun say(n) { print n; } var alias = say; alias(\"hi\");"),
        "hi\n"
    );
}

#[test]
fn closures_capture_their_environment() {
    let output = run_ok(
        "fun makeCounter() {
             var i = 0;
             fun count() { i = i + 1; print i; }
             return count;
         }
         var counter = makeCounter();
         counter();
         counter();",
    );

    assert_eq!(output, "1\n2\n");
}

#[test]
fn while_loop_runs_to_completion() {
    assert_eq!(
        run_ok("var i = 0; while (i < 3) { print i; i = i + 1; }"),
        "0\n1\n2\n"
    );
}

#[test]
fn for_loop_desugaring_executes_in_order() {
    assert_eq!(run_ok("for (var i = 0; i < 3; i = i + 1) print i;"), "0\n1\n2\n");
}

#[test]
fn break_exits_only_the_innermost_loop() {
    let output = run_ok(
        "var i = 0;
         while (i < 3) {
             var j = 0;
             while (j < 3) {
                 if (j == 1) break;
                 j = j + 1;
             }
             i = i + 1;
         }
         print i;",
    );

    assert_eq!(output, "3\n");
}

#[test]
fn return_passes_through_enclosing_loops() {
    let output = run_ok(
        "fun find() {
             var i = 0;
             while (true) {
                 if (i == 2) return i;
                 i = i + 1;
             }
         }
         print find();",
    );

    assert_eq!(output, "2\n");
}

#[test]
fn calling_a_non_callable_is_a_runtime_error() {
    let (_, diagnostics) = run("\"hi\"();");

    assert!(diagnostics.contains("Can only call functions and classes."));
}

#[test]
fn arity_is_checked_before_the_call() {
    let (_, diagnostics) = run("fun f(a) {} f();");

    assert!(diagnostics.contains("Expected 1 arguments but got 0."));
}

#[test]
fn arguments_evaluate_left_to_right() {
    let output = run_ok(
        "fun side(n) { print n; return n; }
         fun sum(a, b, c) { return a + b + c; }
         print sum(side(1), side(2), side(3));",
    );

    assert_eq!(output, "1\n2\n3\n6\n");
}

// ─────────────────────────────────────────────────────────────────────────
// Classes
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn class_call_constructs_an_instance() {
    assert_eq!(run_ok("class C {} print C; print C();"), "C\nC instance\n");
}

#[test]
fn initializer_binds_fields_through_this() {
    let output = run_ok(
        "class C {
             init(x) { this.x = x; }
             get() { return this.x; }
         }
         print C(7).get();",
    );

    assert_eq!(output, "7\n");
}

#[test]
fn class_arity_follows_the_initializer() {
    let (_, diagnostics) = run("class C { init(x) {} } C();");

    assert!(diagnostics.contains("Expected 1 arguments but got 0."));
}

#[test]
fn initializer_returns_the_instance_even_on_bare_return() {
    let output = run_ok(
        "class C { init() { this.x = 1; return; this.x = 2; } }
         print C();",
    );

    assert_eq!(output, "C instance\n");
}

#[test]
fn fields_are_created_on_first_assignment() {
    let output = run_ok(
        "class Box {}
         var b = Box();
         b.contents = \"thing\";
         print b.contents;
         b.contents = \"other\";
         print b.contents;",
    );

    assert_eq!(output, "thing\nother\n");
}

#[test]
fn fields_shadow_methods() {
    let output = run_ok(
        "class C { m() { return \"method\"; } }
         var c = C();
         print c.m();
         c.m = 1;
         print c.m;",
    );

    assert_eq!(output, "method\n1\n");
}

#[test]
fn undefined_property_is_a_runtime_error() {
    let (_, diagnostics) = run("class C {} print C().missing;");

    assert!(diagnostics.contains("Undefined property 'missing'."));
}

#[test]
fn property_access_on_non_instance_is_a_runtime_error() {
    let (_, diagnostics) = run("var a = 1; print a.x;");

    assert!(diagnostics.contains("Only instances have properties."));
}

#[test]
fn field_assignment_on_non_instance_is_a_runtime_error() {
    let (_, diagnostics) = run("var a = 1; a.x = 2;");

    assert!(diagnostics.contains("Only instances have fields."));
}

#[test]
fn bound_methods_remember_their_instance() {
    let output = run_ok(
        "class C {
             init() { this.x = 1; }
             get() { return this.x; }
         }
         var m = C().get;
         print m();",
    );

    assert_eq!(output, "1\n");
}

#[test]
fn methods_can_reference_the_class_by_name() {
    let output = run_ok(
        "class C {
             make() { return C(); }
         }
         print C().make();",
    );

    assert_eq!(output, "C instance\n");
}

#[test]
fn instance_equality_is_identity() {
    let output = run_ok(
        "class C {}
         var a = C();
         var b = C();
         print a == a;
         print a == b;",
    );

    assert_eq!(output, "true\nfalse\n");
}

// ─────────────────────────────────────────────────────────────────────────
// Inheritance
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn methods_are_inherited_through_the_chain() {
    let output = run_ok(
        "class A { m() { return \"A.m\"; } }
         class B < A {}
         class C < B {}
         print C().m();",
    );

    assert_eq!(output, "A.m\n");
}

#[test]
fn subclass_methods_shadow_superclass_methods() {
    let output = run_ok(
        "class A { m() { return \"A\"; } }
         class B < A { m() { return \"B\"; } }
         print B().m();",
    );

    assert_eq!(output, "B\n");
}

#[test]
fn super_calls_the_superclass_method_on_this() {
    let output = run_ok(
        "class A { hi() { return \"A\"; } }
         class B < A { hi() { return super.hi() + \"B\"; } }
         print B().hi();",
    );

    assert_eq!(output, "AB\n");
}

#[test]
fn super_resolves_above_the_method_owner_not_the_instance() {
    let output = run_ok(
        "class A { m() { return \"A\"; } }
         class B < A { m() { return super.m(); } }
         class C < B {}
         print C().m();",
    );

    assert_eq!(output, "A\n");
}

#[test]
fn unknown_super_method_is_a_runtime_error() {
    let (_, diagnostics) = run(
        "class A {}
         class B < A { m() { return super.missing(); } }
         B().m();",
    );

    assert!(diagnostics.contains("Undefined property 'missing'."));
}

#[test]
fn superclass_must_be_a_class() {
    let (_, diagnostics) = run("var notClass = 1; class B < notClass {}");

    assert!(diagnostics.contains("Superclass must be a class."));
}

// ─────────────────────────────────────────────────────────────────────────
// Stringification & natives
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn functions_print_with_their_name() {
    assert_eq!(run_ok("fun f() {} print f;"), "<fn f>\n");
}

#[test]
fn natives_print_generically() {
    assert_eq!(run_ok("print clock;"), "<native fn>\n");
}

#[test]
fn clock_returns_seconds_as_a_number() {
    assert_eq!(run_ok("print clock() > 0;"), "true\n");
}

// ─────────────────────────────────────────────────────────────────────────
// REPL semantics
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn repl_echoes_a_lone_expression_statement() {
    let (output, diagnostics) = repl(&["1 + 2;"]);

    assert!(diagnostics.is_empty(), "unexpected diagnostics: {}", diagnostics);
    assert_eq!(output, "3\n");
}

#[test]
fn repl_does_not_echo_other_statements() {
    let (output, _) = repl(&["print 7;", "var a = 1;"]);

    assert_eq!(output, "7\n");
}

#[test]
fn repl_state_persists_across_inputs() {
    let (output, diagnostics) = repl(&["var a = 1;", "a + 1;"]);

    assert!(diagnostics.is_empty(), "unexpected diagnostics: {}", diagnostics);
    assert_eq!(output, "2\n");
}

#[test]
fn repl_functions_survive_their_source_line() {
    let (output, diagnostics) = repl(&["fun add(a, b) { return a + b; }", "add(1, 2);"]);

    assert!(diagnostics.is_empty(), "unexpected diagnostics: {}", diagnostics);
    assert_eq!(output, "3\n");
}

#[test]
fn repl_recovers_after_errors() {
    let (output, diagnostics) = repl(&["var x = missing;", "var y = 2;", "print y;"]);

    assert!(diagnostics.contains("Undefined variable 'missing'."));
    assert_eq!(output, "2\n");
}

#[test]
fn repl_syntax_error_does_not_poison_later_inputs() {
    let (output, diagnostics) = repl(&["print (;", "print 1;"]);

    assert!(diagnostics.contains("Expect expression."));
    assert_eq!(output, "1\n");
}
