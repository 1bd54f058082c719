use tracing::trace;

use crate::{
    ast::{
        expressions::{ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, Expr, SubscriptExpr},
        operators::Operator,
        statements::{BlockStmt, ElseBranch, FnDeclStmt, ForStmt, IfStmt, ReturnStmt, Stmt},
        types::Type,
    },
    builtins::builtins::Builtin,
    errors::{diagnostics::Diagnostics, errors::ErrorImpl, fault::Fault},
    scope::scope::{Context, Scope},
    Span,
};

use super::flow_analysis::validate_paths;

/// Walks a parsed program over the `Type` domain. Violations are recorded in
/// `diagnostics` and checking carries on; only broken scope bookkeeping
/// stops it.
pub struct TypeChecker<'a> {
    scope: Scope<Type>,
    diagnostics: &'a mut Diagnostics,
}

pub fn type_check(program: &[Stmt], diagnostics: &mut Diagnostics) -> Result<(), Fault> {
    let mut checker = TypeChecker::new(diagnostics);
    checker.declare_functions(program);

    for stmt in program {
        checker.check_stmt(stmt)?;
    }

    Ok(())
}

impl<'a> TypeChecker<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        let builtins = Builtin::ALL
            .iter()
            .map(|builtin| (String::from(builtin.name()), builtin.signature()));

        TypeChecker {
            scope: Scope::new(builtins),
            diagnostics,
        }
    }

    fn error(&mut self, error: ErrorImpl, span: &Span) {
        self.diagnostics.add(error, span);
    }

    /// Binds every top-level signature up front so bodies can call functions
    /// declared after them.
    pub fn declare_functions(&mut self, program: &[Stmt]) {
        for stmt in program {
            let Stmt::FnDecl(function) = stmt else {
                continue;
            };

            if self.scope.get_local(&function.identifier).is_some() {
                self.error(
                    ErrorImpl::FunctionAlreadyDeclared {
                        function: function.identifier.clone(),
                    },
                    &function.span,
                );
                continue;
            }

            self.scope
                .insert(function.identifier.clone(), function.signature());
        }
    }

    pub fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), Fault> {
        match stmt {
            Stmt::FnDecl(function) => {
                if self.scope.current() != self.scope.global() {
                    if self.scope.get_local(&function.identifier).is_some() {
                        self.error(
                            ErrorImpl::AlreadyInScope {
                                ident: function.identifier.clone(),
                            },
                            &function.span,
                        );
                    }
                    self.scope
                        .insert(function.identifier.clone(), function.signature());
                }

                self.check_function(function)
            }
            Stmt::Return(stmt) => {
                self.check_return(stmt);
                Ok(())
            }
            Stmt::VarDecl(stmt) => {
                if self.scope.get_local(&stmt.identifier).is_some() {
                    self.error(
                        ErrorImpl::AlreadyInScope {
                            ident: stmt.identifier.clone(),
                        },
                        &stmt.span,
                    );
                }

                let ty = self.check_expr(&stmt.assigned_value);
                self.scope.insert(stmt.identifier.clone(), ty);
                Ok(())
            }
            Stmt::Expression(stmt) => {
                self.check_expr(&stmt.expression);
                Ok(())
            }
            Stmt::If(stmt) => self.check_if(stmt),
            Stmt::While(stmt) => {
                self.expect_type(Type::Bool, &stmt.condition, &stmt.span);
                self.check_block(&stmt.body)
            }
            Stmt::For(stmt) => self.check_for(stmt),
            Stmt::Block(block) => self.check_block(block),
        }
    }

    fn check_function(&mut self, function: &FnDeclStmt) -> Result<(), Fault> {
        trace!(function = %function.identifier, "checking function");

        // Bodies see the frame they are declared in.
        let parent = self.scope.current();
        self.scope.push(
            parent,
            Some(Context::Function {
                return_type: function.return_type.clone(),
            }),
        );

        for (name, ty) in &function.parameters {
            if self.scope.get_local(name).is_some() {
                self.error(ErrorImpl::AlreadyInScope { ident: name.clone() }, &function.span);
            }
            self.scope.insert(name.clone(), ty.clone());
        }

        let result = self.check_block(&function.body);
        self.scope.pop()?;
        result?;

        validate_paths(function, self.diagnostics);
        Ok(())
    }

    fn check_block(&mut self, block: &BlockStmt) -> Result<(), Fault> {
        for stmt in block.iter() {
            self.check_stmt(stmt)?;
        }

        Ok(())
    }

    fn check_return(&mut self, stmt: &ReturnStmt) {
        let received = self.check_expr(&stmt.value);
        let expected = self
            .scope
            .context()
            .map(|Context::Function { return_type }| return_type.clone());

        match expected {
            Some(expected) if expected != received => {
                self.error(ErrorImpl::IncorrectType { expected, received }, &stmt.span)
            }
            Some(_) => {}
            None => self.error(ErrorImpl::CannotReturnHere, &stmt.span),
        }
    }

    fn check_if(&mut self, stmt: &IfStmt) -> Result<(), Fault> {
        self.expect_type(Type::Bool, &stmt.condition, &stmt.span);
        self.check_block(&stmt.then_body)?;

        match &stmt.else_body {
            Some(ElseBranch::Else(block)) => self.check_block(block),
            Some(ElseBranch::ElseIf(else_if)) => self.check_if(else_if),
            None => Ok(()),
        }
    }

    fn check_for(&mut self, stmt: &ForStmt) -> Result<(), Fault> {
        self.expect_type(Type::Int, &stmt.lower, stmt.lower.get_span());
        self.expect_type(Type::Int, &stmt.upper, stmt.upper.get_span());
        self.scope.insert(stmt.variable.clone(), Type::Int);
        self.check_block(&stmt.body)
    }

    /// Checks `expr` and records `IncorrectType` at `span` unless it has
    /// type `expected`.
    fn expect_type(&mut self, expected: Type, expr: &Expr, span: &Span) {
        let received = self.check_expr(expr);

        if received != expected {
            self.error(ErrorImpl::IncorrectType { expected, received }, span);
        }
    }

    pub fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Int(_) => Type::Int,
            Expr::Float(_) => Type::Float,
            Expr::String(_) => Type::String,
            Expr::Bool(_) => Type::Bool,
            Expr::Array(array) => self.check_array(array),
            Expr::Symbol(symbol) => match self.scope.get(&symbol.value) {
                Some(ty) => ty,
                None => {
                    self.error(
                        ErrorImpl::DoesNotExist {
                            ident: symbol.value.clone(),
                        },
                        &symbol.span,
                    );
                    Type::Void
                }
            },
            Expr::Call(call) => self.check_call(call),
            Expr::Subscript(subscript) => self.check_subscript(subscript),
            Expr::Binary(binary) => self.check_binary(binary),
            Expr::Assignment(assignment) => self.check_assignment(assignment),
        }
    }

    fn check_array(&mut self, array: &ArrayExpr) -> Type {
        let mut elements = array.elements.iter();

        let Some(first) = elements.next() else {
            return Type::array_of(Type::Void);
        };
        let element_type = self.check_expr(first);

        for element in elements {
            self.expect_type(element_type.clone(), element, element.get_span());
        }

        Type::array_of(element_type)
    }

    fn check_call(&mut self, call: &CallExpr) -> Type {
        let callee = self.scope.get(&call.callee);
        let arguments = call
            .arguments
            .iter()
            .map(|argument| self.check_expr(argument))
            .collect::<Vec<_>>();

        match callee {
            Some(Type::Function(parameters, returns)) => {
                match parameters {
                    Some(parameters) if parameters.len() != arguments.len() => self.error(
                        ErrorImpl::IncorrectNumberOfArgs {
                            expected: parameters.len(),
                            received: arguments.len(),
                        },
                        &call.span,
                    ),
                    Some(parameters) => {
                        for ((expected, received), argument) in
                            parameters.into_iter().zip(arguments).zip(&call.arguments)
                        {
                            if expected != received {
                                self.error(
                                    ErrorImpl::IncorrectType { expected, received },
                                    argument.get_span(),
                                );
                            }
                        }
                    }
                    None => {}
                }

                *returns
            }
            Some(_) => {
                self.error(
                    ErrorImpl::CannotExecute {
                        ident: call.callee.clone(),
                    },
                    &call.callee_span,
                );
                Type::Void
            }
            None => {
                self.error(
                    ErrorImpl::DoesNotExist {
                        ident: call.callee.clone(),
                    },
                    &call.callee_span,
                );
                Type::Void
            }
        }
    }

    fn check_subscript(&mut self, subscript: &SubscriptExpr) -> Type {
        let value = self.check_expr(&subscript.value);
        self.expect_type(Type::Int, &subscript.index, subscript.index.get_span());

        match value {
            Type::Array(element) => *element,
            Type::String => Type::String,
            ty => {
                self.error(ErrorImpl::CannotIndexInto { ty: ty.clone() }, &subscript.span);
                ty
            }
        }
    }

    fn check_binary(&mut self, binary: &BinaryExpr) -> Type {
        let left = self.check_expr(&binary.left);
        let right = self.check_expr(&binary.right);
        let operator = binary.operator;

        if operator.is_equality() {
            return Type::Bool;
        }

        if operator == Operator::Plus && !(left.is_numeric() && right.is_numeric()) {
            return match (&left, &right) {
                (Type::String, _) | (_, Type::String) => Type::String,
                (Type::Array(element), _) if **element == right => left.clone(),
                _ => {
                    self.error(ErrorImpl::InvalidOperator { operator }, &binary.span);
                    Type::Int
                }
            };
        }

        let mut numeric = true;
        for (ty, operand) in [(&left, &binary.left), (&right, &binary.right)] {
            if !ty.is_numeric() {
                self.error(ErrorImpl::NumericValuesOnly, operand.get_span());
                numeric = false;
            }
        }

        if operator.is_ordering() {
            Type::Bool
        } else if numeric && (left == Type::Float || right == Type::Float) {
            Type::Float
        } else {
            Type::Int
        }
    }

    fn check_assignment(&mut self, assignment: &AssignmentExpr) -> Type {
        if !assignment.assignee.is_assignable() {
            self.error(
                ErrorImpl::InvalidAssignmentTarget,
                assignment.assignee.get_span(),
            );
            self.check_expr(&assignment.value);
            return Type::Void;
        }

        let receiver = self.check_expr(&assignment.assignee);
        let value = self.check_expr(&assignment.value);

        if receiver != value {
            self.error(
                ErrorImpl::IncorrectType {
                    expected: receiver,
                    received: value,
                },
                &assignment.span,
            );
        }

        Type::Void
    }
}
