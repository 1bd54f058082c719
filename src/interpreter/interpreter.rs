use std::{io::Write, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{
        expressions::{CallExpr, Expr},
        operators::Operator,
        statements::{BlockStmt, ElseBranch, FnDeclStmt, ForStmt, IfStmt, Stmt},
    },
    builtins::builtins::Builtin,
    errors::{errors::FlightError, fault::Fault},
    scope::scope::{FrameHandle, Scope},
};

use super::{storage::Location, value::Value};

/// How a statement finished. `Return` unwinds to the nearest call.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Tree-walking evaluator over a type checked program.
pub struct Interpreter<'a> {
    scope: Scope<Value>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let builtins = Builtin::ALL
            .iter()
            .map(|builtin| (String::from(builtin.name()), Value::Builtin(*builtin)));

        Interpreter {
            scope: Scope::new(builtins),
            output,
        }
    }

    /// Binds every top-level function, runs the remaining top-level
    /// statements in order and then calls `main`.
    pub fn run(&mut self, program: &[Stmt]) -> Result<(), FlightError> {
        for stmt in program {
            if let Stmt::FnDecl(function) = stmt {
                self.declare(function);
            }
        }

        for stmt in program {
            if matches!(stmt, Stmt::FnDecl(_)) {
                continue;
            }

            if let Flow::Return(_) = self.execute_stmt(stmt)? {
                return Err(Fault::ReturnOutsideFunction.into());
            }
        }

        let (main, frame) = match self.scope.get("main") {
            Some(Value::Function(main, frame)) if main.parameters.is_empty() => (main, frame),
            _ => return Err(FlightError::NoMainFunction),
        };

        debug!("calling main");
        self.call_function(&main, frame, vec![])?;
        self.output.flush().map_err(Fault::from)?;

        Ok(())
    }

    /// Binds `function` in the current frame, closing over that frame.
    fn declare(&mut self, function: &Rc<FnDeclStmt>) {
        let frame = self.scope.handle(self.scope.current());
        self.scope.insert(
            function.identifier.clone(),
            Value::Function(Rc::clone(function), frame),
        );
    }

    /// Runs `function` in a new frame whose parent is the frame it was
    /// declared in.
    pub fn call_function(
        &mut self,
        function: &Rc<FnDeclStmt>,
        declared_in: FrameHandle,
        args: Vec<Value>,
    ) -> Result<Value, Fault> {
        if args.len() != function.parameters.len() {
            return Err(Fault::ArityMismatch {
                function: function.identifier.clone(),
                expected: function.parameters.len(),
                received: args.len(),
            });
        }

        trace!(function = %function.identifier, depth = self.scope.depth(), "call");

        let parent = self
            .scope
            .resolve(declared_in)
            .ok_or_else(|| Fault::FrameExpired(function.identifier.clone()))?;
        self.scope.push(parent, None);

        for ((name, _), arg) in function.parameters.iter().zip(args) {
            self.scope.insert(name.clone(), arg);
        }

        let result = self.execute_block(&function.body);
        self.scope.pop()?;

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Void),
        }
    }

    pub fn execute_stmt(&mut self, stmt: &Stmt) -> Result<Flow, Fault> {
        match stmt {
            Stmt::FnDecl(function) => {
                self.declare(function);
                Ok(Flow::Normal)
            }
            Stmt::Return(stmt) => Ok(Flow::Return(self.evaluate(&stmt.value)?)),
            Stmt::VarDecl(stmt) => {
                let value = self.evaluate(&stmt.assigned_value)?;
                self.scope.insert(stmt.identifier.clone(), value);
                Ok(Flow::Normal)
            }
            Stmt::Expression(stmt) => {
                self.evaluate(&stmt.expression)?;
                Ok(Flow::Normal)
            }
            Stmt::If(stmt) => self.execute_if(stmt),
            Stmt::While(stmt) => {
                while self.condition(&stmt.condition)? {
                    if let Flow::Return(value) = self.execute_block(&stmt.body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::For(stmt) => self.execute_for(stmt),
            Stmt::Block(block) => self.execute_block(block),
        }
    }

    /// Blocks share the frame of the enclosing function.
    pub fn execute_block(&mut self, block: &BlockStmt) -> Result<Flow, Fault> {
        for stmt in block.iter() {
            if let Flow::Return(value) = self.execute_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    fn execute_if(&mut self, stmt: &IfStmt) -> Result<Flow, Fault> {
        if self.condition(&stmt.condition)? {
            return self.execute_block(&stmt.then_body);
        }

        match &stmt.else_body {
            Some(ElseBranch::Else(block)) => self.execute_block(block),
            Some(ElseBranch::ElseIf(else_if)) => self.execute_if(else_if),
            None => Ok(Flow::Normal),
        }
    }

    fn execute_for(&mut self, stmt: &ForStmt) -> Result<Flow, Fault> {
        let lower = self.integer(&stmt.lower)?;
        let upper = self.integer(&stmt.upper)?;

        for i in lower..upper {
            self.scope.insert(stmt.variable.clone(), Value::Int(i));

            if let Flow::Return(value) = self.execute_block(&stmt.body)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    fn condition(&mut self, expr: &Expr) -> Result<bool, Fault> {
        match self.evaluate(expr)? {
            Value::Bool(value) => Ok(value),
            other => Err(Fault::TypeCheckerMissed(format!(
                "a {} condition",
                other.type_name()
            ))),
        }
    }

    fn integer(&mut self, expr: &Expr) -> Result<i64, Fault> {
        match self.evaluate(expr)? {
            Value::Int(value) => Ok(value),
            other => Err(Fault::TypeCheckerMissed(format!(
                "a {} where an int was required",
                other.type_name()
            ))),
        }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, Fault> {
        match expr {
            Expr::Int(expr) => Ok(Value::Int(expr.value)),
            Expr::Float(expr) => Ok(Value::Float(expr.value)),
            Expr::String(expr) => Ok(Value::String(expr.value.clone())),
            Expr::Bool(expr) => Ok(Value::Bool(expr.value)),
            Expr::Array(array) => array
                .elements
                .iter()
                .map(|element| self.evaluate(element))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Expr::Symbol(_) | Expr::Subscript(_) => self.location_for(expr)?.read(&self.scope),
            Expr::Call(call) => self.evaluate_call(call),
            Expr::Binary(binary) => {
                let left = self.evaluate(&binary.left)?;
                let right = self.evaluate(&binary.right)?;
                evaluate_binary(binary.operator, left, right)
            }
            Expr::Assignment(assignment) => {
                let location = self.location_for(&assignment.assignee)?;
                let value = self.evaluate(&assignment.value)?;
                location.write(&mut self.scope, value)?;
                Ok(Value::Void)
            }
        }
    }

    /// Resolves the storage an expression reads from. Index expressions are
    /// evaluated here, outermost base first.
    pub fn location_for(&mut self, expr: &Expr) -> Result<Location, Fault> {
        match expr {
            Expr::Symbol(symbol) => Ok(Location::Variable(symbol.value.clone())),
            Expr::Subscript(subscript) => {
                let base = self.location_for(&subscript.value)?;
                let index = self.integer(&subscript.index)?;
                Ok(base.at(index))
            }
            other => Ok(Location::Temporary(self.evaluate(other)?)),
        }
    }

    fn evaluate_call(&mut self, call: &CallExpr) -> Result<Value, Fault> {
        let callee = self.scope.get(&call.callee).ok_or_else(|| {
            Fault::TypeCheckerMissed(format!("call to unbound '{}'", call.callee))
        })?;

        let args = call
            .arguments
            .iter()
            .map(|argument| self.evaluate(argument))
            .collect::<Result<Vec<_>, _>>()?;

        match callee {
            Value::Builtin(builtin) => builtin.execute(&args, &mut *self.output),
            Value::Function(function, frame) => self.call_function(&function, frame, args),
            _ => Err(Fault::NotCallable(call.callee.clone())),
        }
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(value) => Some(*value as f64),
        Value::Float(value) => Some(*value),
        _ => None,
    }
}

pub fn evaluate_binary(operator: Operator, left: Value, right: Value) -> Result<Value, Fault> {
    match operator {
        Operator::Equal => Ok(Value::Bool(left == right)),
        Operator::NotEqual => Ok(Value::Bool(left != right)),
        Operator::Plus => add(left, right),
        Operator::Minus | Operator::Multiply | Operator::Divide => {
            arithmetic(operator, left, right)
        }
        Operator::Lt | Operator::LtOrEq | Operator::Gt | Operator::GtOrEq => {
            compare(operator, left, right)
        }
    }
}

fn add(left: Value, right: Value) -> Result<Value, Fault> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => l.checked_add(r).map(Value::Int).ok_or(Fault::IntegerOverflow),
        (left @ (Value::Int(_) | Value::Float(_)), right @ (Value::Int(_) | Value::Float(_))) => {
            arithmetic(Operator::Plus, left, right)
        }
        (Value::String(mut l), right) => {
            l.push_str(&right.to_string());
            Ok(Value::String(l))
        }
        (left, Value::String(r)) => Ok(Value::String(format!("{}{}", left, r))),
        (Value::Array(mut values), right) => {
            values.push(right);
            Ok(Value::Array(values))
        }
        (left, right) => Err(Fault::TypeCheckerMissed(format!(
            "{} + {}",
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn arithmetic(operator: Operator, left: Value, right: Value) -> Result<Value, Fault> {
    if let (Value::Int(l), Value::Int(r)) = (&left, &right) {
        let (l, r) = (*l, *r);
        let result = match operator {
            Operator::Plus => l.checked_add(r),
            Operator::Minus => l.checked_sub(r),
            Operator::Multiply => l.checked_mul(r),
            Operator::Divide if r == 0 => return Err(Fault::DivisionByZero),
            Operator::Divide => l.checked_div(r),
            _ => None,
        };
        return result.map(Value::Int).ok_or(Fault::IntegerOverflow);
    }

    let (Some(l), Some(r)) = (as_float(&left), as_float(&right)) else {
        return Err(Fault::TypeCheckerMissed(format!(
            "{} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )));
    };

    let result = match operator {
        Operator::Plus => l + r,
        Operator::Minus => l - r,
        Operator::Multiply => l * r,
        _ => l / r,
    };
    Ok(Value::Float(result))
}

fn compare(operator: Operator, left: Value, right: Value) -> Result<Value, Fault> {
    let ordering = match (&left, &right) {
        (Value::Int(l), Value::Int(r)) => l.partial_cmp(r),
        _ => match (as_float(&left), as_float(&right)) {
            (Some(l), Some(r)) => l.partial_cmp(&r),
            _ => {
                return Err(Fault::TypeCheckerMissed(format!(
                    "{} {} {}",
                    left.type_name(),
                    operator,
                    right.type_name()
                )))
            }
        },
    };

    let Some(ordering) = ordering else {
        // NaN is unordered.
        return Ok(Value::Bool(false));
    };

    let result = match operator {
        Operator::Lt => ordering.is_lt(),
        Operator::LtOrEq => ordering.is_le(),
        Operator::Gt => ordering.is_gt(),
        _ => ordering.is_ge(),
    };
    Ok(Value::Bool(result))
}
