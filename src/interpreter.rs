use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::expr::{Expr, ExprId};
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};
use crate::value::{Callable, LoxClass, LoxFunction, LoxInstance, NativeFunction, Value};

/// Non-local exits threaded through statement execution. `Return` and
/// `Break` unwind the evaluator without being errors; neither escapes this
/// module's public API.
#[derive(Debug)]
pub(crate) enum Unwind {
    Return(Value),
    Break,
    Error(LoxError),
}

impl From<LoxError> for Unwind {
    fn from(error: LoxError) -> Self {
        Unwind::Error(error)
    }
}

pub(crate) type Execution = std::result::Result<(), Unwind>;

pub struct Interpreter<'w> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    out: &'w mut dyn Write,
}

impl<'w> Interpreter<'w> {
    pub fn new(out: &'w mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));

        globals.borrow_mut().define(
            "clock",
            Value::Native(Rc::new(NativeFunction {
                name: "clock",
                arity: 0,
                func: clock_native,
            })),
        );

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Records the scope distance of a resolved local. Called by the
    /// resolver; absent entries mean the global environment.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Runs one top-level statement. A runtime error unwinds only the
    /// statement it occurred in.
    pub fn interpret(&mut self, statement: &Stmt) -> Result<()> {
        match self.execute(statement) {
            Ok(()) => Ok(()),

            Err(Unwind::Error(error)) => Err(error),

            // The parser and resolver reject top-level `break` and `return`.
            Err(Unwind::Return(_)) | Err(Unwind::Break) => Ok(()),
        }
    }

    /// Writes a value to the program output sink (REPL echo).
    pub fn show(&mut self, value: &Value) -> Result<()> {
        writeln!(self.out, "{}", value)?;
        Ok(())
    }

    fn execute(&mut self, statement: &Stmt) -> Execution {
        match statement {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(())
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;

                writeln!(self.out, "{}", value).map_err(LoxError::from)?;

                Ok(())
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                self.environment.borrow_mut().define(&name.lexeme, value);

                Ok(())
            }

            Stmt::Block(statements) => {
                let inner = Environment::with_enclosing(Rc::clone(&self.environment));

                self.execute_block(statements, Rc::new(RefCell::new(inner)))
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                while is_truthy(&self.evaluate(condition)?) {
                    match self.execute(body) {
                        // `break` terminates the nearest loop; `return`
                        // keeps unwinding through it.
                        Err(Unwind::Break) => break,
                        other => other?,
                    }
                }

                Ok(())
            }

            Stmt::Break => Err(Unwind::Break),

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Err(Unwind::Return(value))
            }

            Stmt::Function(declaration) => {
                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );

                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));

                Ok(())
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.class_statement(name, superclass, methods),
        }
    }

    /// Executes `statements` with `environment` as the current frame,
    /// restoring the previous frame on every exit path, including `return`
    /// and `break` unwinds.
    pub(crate) fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Execution {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result: Execution = Ok(());
        for statement in statements {
            result = self.execute(statement);

            if result.is_err() {
                break;
            }
        }

        self.environment = previous;

        result
    }

    fn class_statement(
        &mut self,
        name: &Token,
        superclass: &Option<Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> Execution {
        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),

                _ => {
                    let anchor = superclass_name(expr).unwrap_or(name);

                    return Err(LoxError::runtime(anchor, "Superclass must be a class.").into());
                }
            },

            None => None,
        };

        // Declare first, assign after construction, so methods can refer to
        // the class by name.
        self.environment.borrow_mut().define(&name.lexeme, Value::Nil);

        let enclosing = Rc::clone(&self.environment);

        // Methods close over an extra frame holding `super` when inheriting.
        if let Some(class) = &superclass {
            let mut frame = Environment::with_enclosing(Rc::clone(&self.environment));
            frame.define("super", Value::Class(Rc::clone(class)));

            self.environment = Rc::new(RefCell::new(frame));
        }

        let mut method_map: HashMap<String, Rc<LoxFunction>> = HashMap::new();
        for declaration in methods {
            let is_initializer = declaration.name.lexeme == "init";

            let function = LoxFunction::new(
                Rc::clone(declaration),
                Rc::clone(&self.environment),
                is_initializer,
            );

            method_map.insert(declaration.name.lexeme.clone(), Rc::new(function));
        }

        let class = LoxClass::new(name.lexeme.clone(), superclass, method_map);

        self.environment = enclosing;

        self.environment
            .borrow_mut()
            .assign(name, Value::Class(Rc::new(class)))?;

        Ok(())
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(token) => literal_value(token),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => self.evaluate_logical(left, operator, right),

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id).copied() {
                    Some(distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone());
                    }

                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => self.evaluate_call(callee, paren, arguments),

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => LoxInstance::get(&instance, name),

                _ => Err(LoxError::runtime(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => match self.evaluate(object)? {
                // The object is checked before the value is evaluated; that
                // ordering is user visible.
                Value::Instance(instance) => {
                    let value: Value = self.evaluate(value)?;

                    instance.set(name, value.clone());

                    Ok(value)
                }

                _ => Err(LoxError::runtime(name, "Only instances have fields.")),
            },

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(distance) => Environment::get_at(&self.environment, *distance, &name.lexeme)
                .ok_or_else(|| {
                    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
                }),

            // Absent from the side table means global; globals are
            // late-bound.
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let value: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match value {
                Value::Number(n) => Ok(Value::Number(-n)),

                _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
            },

            TokenType::BANG => Ok(Value::Bool(!is_truthy(&value))),

            _ => Err(LoxError::runtime(operator, "Invalid unary operator.")),
        }
    }

    fn evaluate_logical(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left: Value = self.evaluate(left)?;

        // Short-circuiting hands back the operand itself, not a coerced
        // boolean.
        match operator.token_type {
            TokenType::OR if is_truthy(&left) => Ok(left),

            TokenType::AND if !is_truthy(&left) => Ok(left),

            _ => self.evaluate(right),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left: Value = self.evaluate(left)?;
        let right: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),

                // One string operand stringifies the other side.
                (Value::String(a), b) => Ok(Value::String(format!("{}{}", a, b))),

                (a, Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),

                _ => Err(LoxError::runtime(
                    operator,
                    "Operands must be two numbers or either of them a string.",
                )),
            },

            TokenType::MINUS => {
                let (a, b) = check_number_operands(operator, &left, &right)?;

                Ok(Value::Number(a - b))
            }

            TokenType::STAR => {
                let (a, b) = check_number_operands(operator, &left, &right)?;

                Ok(Value::Number(a * b))
            }

            TokenType::SLASH => {
                let (a, b) = check_number_operands(operator, &left, &right)?;

                if b == 0.0 {
                    Err(LoxError::runtime(operator, "Division by zero."))
                } else {
                    Ok(Value::Number(a / b))
                }
            }

            TokenType::GREATER => {
                let (a, b) = check_number_operands(operator, &left, &right)?;

                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = check_number_operands(operator, &left, &right)?;

                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = check_number_operands(operator, &left, &right)?;

                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = check_number_operands(operator, &left, &right)?;

                Ok(Value::Bool(a <= b))
            }

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),

            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

            _ => Err(LoxError::runtime(operator, "Invalid binary operator.")),
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> Result<Value> {
        let callee: Value = self.evaluate(callee)?;

        let mut evaluated: Vec<Value> = Vec::with_capacity(arguments.len());
        for argument in arguments {
            evaluated.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Value::Function(function) => function.as_ref(),

            Value::Class(class) => class,

            Value::Native(native) => native.as_ref(),

            _ => {
                return Err(LoxError::runtime(
                    paren,
                    "Can only call functions and classes.",
                ));
            }
        };

        // Arity is checked here once rather than in each callable.
        if evaluated.len() != callable.arity() {
            return Err(LoxError::runtime(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    evaluated.len()
                ),
            ));
        }

        callable.call(self, evaluated)
    }

    fn evaluate_super(&mut self, id: ExprId, keyword: &Token, method: &Token) -> Result<Value> {
        let distance: usize = match self.locals.get(&id) {
            Some(distance) => *distance,

            None => {
                return Err(LoxError::runtime(
                    keyword,
                    "Cannot use 'super' outside of a class.",
                ));
            }
        };

        let superclass: Rc<LoxClass> =
            match Environment::get_at(&self.environment, distance, "super") {
                Some(Value::Class(class)) => class,

                _ => return Err(LoxError::runtime(keyword, "Superclass must be a class.")),
            };

        // `this` lives one frame inside the `super` frame.
        let instance: Rc<LoxInstance> =
            match Environment::get_at(&self.environment, distance - 1, "this") {
                Some(Value::Instance(instance)) => instance,

                _ => {
                    return Err(LoxError::runtime(
                        keyword,
                        "Cannot use 'super' outside of a method.",
                    ));
                }
            };

        let found = superclass.find_method(&method.lexeme).ok_or_else(|| {
            LoxError::runtime(method, format!("Undefined property '{}'.", method.lexeme))
        })?;

        Ok(Value::Function(Rc::new(found.bind(instance))))
    }
}

fn literal_value(token: &Token) -> Result<Value> {
    match &token.token_type {
        TokenType::NUMBER(n) => Ok(Value::Number(*n)),

        TokenType::STRING(s) => Ok(Value::String(s.clone())),

        TokenType::TRUE => Ok(Value::Bool(true)),

        TokenType::FALSE => Ok(Value::Bool(false)),

        TokenType::NIL => Ok(Value::Nil),

        _ => Err(LoxError::runtime(token, "Invalid literal.")),
    }
}

/// Only `nil` and `false` are falsey.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,

        Value::Bool(b) => *b,

        _ => true,
    }
}

fn check_number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),

        _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
    }
}

fn superclass_name(expr: &Expr) -> Option<&Token> {
    match expr {
        Expr::Variable { name, .. } => Some(name),

        _ => None,
    }
}

fn clock_native(_args: &[Value]) -> Result<Value> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    Ok(Value::Number(now.as_secs_f64()))
}
