use std::io::Write;

use crate::error::LoxError;
use crate::expr::ExprIdGen;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::stmt::Stmt;
use crate::token::Token;

/// Pipeline driver: scan, parse, resolve, interpret, with sticky error
/// flags deciding which phases run. The flags live here rather than in
/// process globals so sessions are reentrant; interpreter state (globals,
/// the resolution table) persists for the lifetime of the value.
pub struct Lox<'w> {
    interpreter: Interpreter<'w>,
    diagnostics: &'w mut dyn Write,
    ids: ExprIdGen,
    had_error: bool,
    had_runtime_error: bool,
}

impl<'w> Lox<'w> {
    /// `out` receives `print` output and REPL echoes; `diagnostics`
    /// receives every error report.
    pub fn new(out: &'w mut dyn Write, diagnostics: &'w mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(out),
            diagnostics,
            ids: ExprIdGen::new(),
            had_error: false,
            had_runtime_error: false,
        }
    }

    /// Runs one source text through the pipeline. Scan and parse
    /// diagnostics suppress resolution and interpretation; resolve
    /// diagnostics suppress interpretation. In REPL mode a program that is
    /// exactly one expression statement has its value echoed to the output
    /// sink.
    pub fn run(&mut self, source: &str, repl: bool) {
        let tokens = self.scan(source);

        let (statements, errors) = Parser::new(tokens, &mut self.ids).parse();
        for error in errors {
            self.report(error);
        }

        if self.had_error {
            return;
        }

        let errors = Resolver::new(&mut self.interpreter).resolve(&statements);
        if !errors.is_empty() {
            for error in errors {
                self.report(error);
            }
            return;
        }

        match statements.as_slice() {
            [Stmt::Expression(expr)] if repl => match self.interpreter.evaluate(expr) {
                Ok(value) => {
                    if let Err(error) = self.interpreter.show(&value) {
                        self.report(error);
                    }
                }

                Err(error) => self.report(error),
            },

            _ => {
                for statement in &statements {
                    // A runtime error unwinds one top-level statement;
                    // execution continues with the next.
                    if let Err(error) = self.interpreter.interpret(statement) {
                        self.report(error);
                    }
                }
            }
        }
    }

    /// Scanning reports lexical errors but still hands every recognizable
    /// token to the parser, so later diagnostics are not masked.
    fn scan(&mut self, source: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();

        for item in Scanner::new(source) {
            match item {
                Ok(token) => tokens.push(token),

                Err(error) => self.report(error),
            }
        }

        tokens
    }

    /// Emits a diagnostic and sets the matching sticky flag.
    fn report(&mut self, error: LoxError) {
        match &error {
            LoxError::Runtime { .. } | LoxError::Io(_) => self.had_runtime_error = true,

            _ => self.had_error = true,
        }

        let _ = writeln!(self.diagnostics, "{}", error);
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// REPL inputs get a fresh syntax slate; interpreter state persists.
    pub fn clear_error(&mut self) {
        self.had_error = false;
    }
}
