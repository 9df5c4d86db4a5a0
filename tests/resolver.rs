use rox::lox::Lox;

/// Runs source through the full pipeline, returning captured
/// (stdout, diagnostics). Static errors surface on the diagnostics stream
/// and suppress execution entirely.
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

#[test]
fn return_at_top_level_is_rejected() {
    let (_, diagnostics) = run("return;");

    assert_eq!(
        diagnostics,
        "[line 1] Error at 'return': Can't return from top-level code.\n"
    );
}

#[test]
fn returning_a_value_from_an_initializer_is_rejected() {
    let (_, diagnostics) = run("class C { init() { return 1; } }");

    assert!(diagnostics.contains("Can't return a value from an initializer."));
}

#[test]
fn bare_return_in_an_initializer_is_allowed() {
    let (_, diagnostics) = run("class C { init() { return; } }");

    assert!(diagnostics.is_empty(), "unexpected diagnostics: {}", diagnostics);
}

#[test]
fn this_outside_a_class_is_rejected() {
    let (_, diagnostics) = run("print this;");

    assert_eq!(
        diagnostics,
        "[line 1] Error at 'this': Can't use 'this' outside of a class.\n"
    );
}

#[test]
fn this_in_a_standalone_function_is_rejected() {
    let (_, diagnostics) = run("fun f() { return this; }");

    assert!(diagnostics.contains("Can't use 'this' outside of a class."));
}

#[test]
fn super_outside_a_class_is_rejected() {
    let (_, diagnostics) = run("print super.m;");

    assert!(diagnostics.contains("Can't use 'super' outside of a class."));
}

#[test]
fn super_without_a_superclass_is_rejected() {
    let (_, diagnostics) = run("class C { m() { return super.m(); } }");

    assert!(diagnostics.contains("Can't use 'super' in a class with no superclass."));
}

#[test]
fn a_class_cannot_inherit_from_itself() {
    let (_, diagnostics) = run("class A < A {}");

    assert_eq!(
        diagnostics,
        "[line 1] Error at 'A': A class can't inherit from itself.\n"
    );
}

#[test]
fn local_redeclaration_is_rejected() {
    let (_, diagnostics) = run("{ var a = 1; var a = 2; }");

    assert!(diagnostics.contains("Already a variable with this name in this scope."));
}

#[test]
fn duplicate_parameters_are_rejected() {
    let (_, diagnostics) = run("fun f(a, a) {}");

    assert!(diagnostics.contains("Already a variable with this name in this scope."));
}

#[test]
fn reading_a_local_in_its_own_initializer_is_rejected() {
    let (_, diagnostics) = run("var a = 1; { var a = a; }");

    assert!(diagnostics.contains("Can't read local variable in its own initializer."));
}

#[test]
fn multiple_static_errors_surface_in_one_pass() {
    let (_, diagnostics) = run("return;\nprint this;");

    assert_eq!(diagnostics.lines().count(), 2);
    assert!(diagnostics.contains("Can't return from top-level code."));
    assert!(diagnostics.contains("Can't use 'this' outside of a class."));
}

#[test]
fn static_errors_suppress_execution() {
    let (output, diagnostics) = run("print 1; return;");

    assert!(output.is_empty(), "nothing should execute, got: {}", output);
    assert!(diagnostics.contains("Can't return from top-level code."));
}

#[test]
fn syntax_errors_suppress_resolution_and_execution() {
    let (output, diagnostics) = run("print 1; print (;");

    assert!(output.is_empty());
    assert!(diagnostics.contains("Expect expression."));
}

#[test]
fn shadowing_in_an_inner_scope_is_allowed() {
    let (_, diagnostics) = run("{ var a = 1; { var a = 2; } }");

    assert!(diagnostics.is_empty(), "unexpected diagnostics: {}", diagnostics);
}
