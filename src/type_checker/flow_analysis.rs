use crate::{
    ast::{
        statements::{BlockStmt, ElseBranch, FnDeclStmt, IfStmt, Stmt},
        types::Type,
    },
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowResult {
    Returns,
    MayFallThrough,
}

impl FlowResult {
    /// Both branches must return for the pair to return.
    pub fn merging(self, other: FlowResult) -> FlowResult {
        match (self, other) {
            (FlowResult::Returns, FlowResult::Returns) => FlowResult::Returns,
            _ => FlowResult::MayFallThrough,
        }
    }
}

/// Records `NotAllCodePathsReturn` at the function when a non-void body can
/// reach its end.
pub fn validate_paths(function: &FnDeclStmt, diagnostics: &mut Diagnostics) {
    if function.return_type == Type::Void {
        return;
    }

    if analyze_block(&function.body) == FlowResult::MayFallThrough {
        diagnostics.add(ErrorImpl::NotAllCodePathsReturn, &function.span);
    }
}

pub fn analyze_block(block: &BlockStmt) -> FlowResult {
    if block
        .iter()
        .any(|stmt| analyze_stmt(stmt) == FlowResult::Returns)
    {
        FlowResult::Returns
    } else {
        FlowResult::MayFallThrough
    }
}

pub fn analyze_stmt(stmt: &Stmt) -> FlowResult {
    match stmt {
        Stmt::Return(_) => FlowResult::Returns,
        Stmt::VarDecl(_) | Stmt::Expression(_) | Stmt::FnDecl(_) => FlowResult::MayFallThrough,
        Stmt::If(stmt) => analyze_if(stmt),
        // Loop bodies are treated as running at least once.
        Stmt::While(stmt) => analyze_block(&stmt.body),
        Stmt::For(stmt) => analyze_block(&stmt.body),
        Stmt::Block(block) => analyze_block(block),
    }
}

fn analyze_if(stmt: &IfStmt) -> FlowResult {
    let then_result = analyze_block(&stmt.then_body);

    match &stmt.else_body {
        Some(ElseBranch::Else(block)) => then_result.merging(analyze_block(block)),
        Some(ElseBranch::ElseIf(else_if)) => then_result.merging(analyze_if(else_if)),
        None => FlowResult::MayFallThrough,
    }
}
