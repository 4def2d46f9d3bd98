//! The tree-walking evaluator.
//!
//! Holds the value stack, frame pointer, scope tables, and function table
//! that the reference implementation kept as process-wide globals. Here
//! they live on one `Interpreter` instance instead, per the re-architecture
//! recommended for reentrancy: nothing stops two `Interpreter`s from
//! existing at once, each over its own [`Ast`].
//!
//! Name resolution is not a separate pass. [`Interpreter::eval`] rewrites
//! `Identifier` and `Call` nodes into their resolved variants the first
//! time it visits them (see [`aardvark_par::SyntaxKind`]); every later
//! visit to that same node dispatches directly on the resolved kind
//! without repeating the scope-table walk.

use aardvark_par::{Ast, NodeId, Payload, SyntaxKind};
use aardvark_util::{Fingerprint, Limits, PRINT_FINGERPRINT};

use crate::error::EvalError;
use crate::value::Value;

pub struct Interpreter<'a> {
    ast: &'a mut Ast,
    stack: Vec<Value>,
    frame_start: usize,
    /// Frame-relative (fingerprint, slot) pairs, newest last.
    locals: Vec<(Fingerprint, i64)>,
    /// Absolute (fingerprint, slot) pairs, never truncated.
    globals: Vec<(Fingerprint, usize)>,
    functions: Vec<(Fingerprint, NodeId)>,
    limits: Limits,
}

impl<'a> Interpreter<'a> {
    pub fn new(ast: &'a mut Ast) -> Self {
        Interpreter::with_limits(ast, Limits::default())
    }

    pub fn with_limits(ast: &'a mut Ast, limits: Limits) -> Self {
        Interpreter {
            ast,
            stack: Vec::new(),
            frame_start: 0,
            locals: Vec::new(),
            globals: Vec::new(),
            functions: Vec::new(),
            limits,
        }
    }

    /// Evaluates the program from its root. This is the only entry point
    /// that runs the Program node's two-pass registration step; every
    /// other node kind is reached only through recursion from here.
    pub fn run(&mut self) -> Result<Value, EvalError> {
        let root = self.ast.root;
        self.eval(root)
    }

    pub fn eval(&mut self, node: NodeId) -> Result<Value, EvalError> {
        match self.ast.kind(node) {
            SyntaxKind::Program => self.eval_program(node),
            SyntaxKind::Block => self.eval_block(node),
            SyntaxKind::Declaration => self.eval_declaration(node),
            SyntaxKind::Assignment => self.eval_assignment(node),
            SyntaxKind::Function => Ok(Value::None),
            SyntaxKind::Identifier => self.eval_identifier(node),
            SyntaxKind::KnownLocal => self.eval_known_local(node),
            SyntaxKind::KnownGlobal => self.eval_known_global(node),
            SyntaxKind::ReturnStmt => self.eval_return(node),
            SyntaxKind::Call => self.eval_call(node),
            SyntaxKind::StandardCall => self.eval_standard_call(node),
            SyntaxKind::KnownCall => self.eval_known_call(node),
            SyntaxKind::IfStmt => self.eval_if(node),
            SyntaxKind::WhileStmt => self.eval_while(node),
            SyntaxKind::Integer => self.eval_integer_literal(node),
            SyntaxKind::String => self.eval_string_literal(node),
            SyntaxKind::Plus
            | SyntaxKind::Minus
            | SyntaxKind::Star
            | SyntaxKind::Slash
            | SyntaxKind::Equal
            | SyntaxKind::NotEqual
            | SyntaxKind::Greater
            | SyntaxKind::Less
            | SyntaxKind::GreaterEqual
            | SyntaxKind::LessEqual => self.eval_binary(node),
            SyntaxKind::Not => self.eval_not(node),
            other => Err(EvalError::InvalidSyntax {
                detail: format!("unexpected node kind in eval: {other:?}"),
            }),
        }
    }

    fn eval_program(&mut self, program: NodeId) -> Result<Value, EvalError> {
        let children = self.ast.children(program).to_vec();
        let mut remaining = Vec::with_capacity(children.len());
        for child in children {
            match self.ast.kind(child) {
                SyntaxKind::Declaration => self.register_global(child)?,
                SyntaxKind::Function => self.register_function(child)?,
                _ => remaining.push(child),
            }
        }
        for child in remaining {
            let value = self.eval(child)?;
            if !value.is_none() {
                return Ok(value);
            }
        }
        Ok(Value::None)
    }

    fn register_global(&mut self, decl: NodeId) -> Result<(), EvalError> {
        let children = self.ast.children(decl).to_vec();
        let name = self.identifier_fingerprint(children[0]);
        let value = match children.get(1) {
            Some(&init) => self.eval(init)?,
            None => Value::None,
        };
        if self.globals.len() >= self.limits.max_globals {
            return Err(EvalError::resource_limit("globals", self.limits.max_globals));
        }
        let slot = self.stack.len();
        self.push_stack(value)?;
        self.globals.push((name, slot));
        Ok(())
    }

    fn register_function(&mut self, func: NodeId) -> Result<(), EvalError> {
        let name_node = self.ast.children(func)[0];
        let name = self.identifier_fingerprint(name_node);
        if self.functions.len() >= self.limits.max_functions {
            return Err(EvalError::resource_limit("functions", self.limits.max_functions));
        }
        self.functions.push((name, func));
        Ok(())
    }

    fn eval_block(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let saved_stack = self.stack.len();
        let saved_locals = self.locals.len();
        let children = self.ast.children(node).to_vec();
        let mut result = Value::None;
        for child in children {
            let value = self.eval(child)?;
            if !value.is_none() {
                result = value;
                break;
            }
        }
        self.stack.truncate(saved_stack);
        self.locals.truncate(saved_locals);
        Ok(result)
    }

    fn eval_declaration(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let children = self.ast.children(node).to_vec();
        let name = self.identifier_fingerprint(children[0]);
        let value = match children.get(1) {
            Some(&init) => self.eval(init)?,
            None => Value::None,
        };
        if self.locals.len() >= self.limits.max_locals {
            return Err(EvalError::resource_limit("locals", self.limits.max_locals));
        }
        let slot = self.stack.len() as i64 - self.frame_start as i64;
        self.push_stack(value)?;
        self.locals.push((name, slot));
        Ok(Value::None)
    }

    fn eval_assignment(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let children = self.ast.children(node).to_vec();
        let (target, rhs) = (children[0], children[1]);
        self.resolve_lvalue(target)?;
        let value = self.eval(rhs)?;
        match self.ast.node(target).payload {
            Payload::LocalSlot(slot) => {
                let index = (self.frame_start as i64 + slot) as usize;
                self.stack[index] = value;
            }
            Payload::GlobalSlot(slot) => {
                self.stack[slot] = value;
            }
            _ => unreachable!("assignment target resolved to a non-slot payload"),
        }
        Ok(Value::None)
    }

    fn resolve_lvalue(&mut self, node: NodeId) -> Result<(), EvalError> {
        match self.ast.kind(node) {
            SyntaxKind::KnownLocal | SyntaxKind::KnownGlobal => Ok(()),
            SyntaxKind::Identifier => {
                let name = self.identifier_fingerprint(node);
                if let Some(slot) = self.lookup_local(name) {
                    self.ast.node_mut(node).kind = SyntaxKind::KnownLocal;
                    self.ast.node_mut(node).payload = Payload::LocalSlot(slot);
                    Ok(())
                } else if let Some(slot) = self.lookup_global(name) {
                    self.ast.node_mut(node).kind = SyntaxKind::KnownGlobal;
                    self.ast.node_mut(node).payload = Payload::GlobalSlot(slot);
                    Ok(())
                } else {
                    Err(EvalError::VariableNotInScope)
                }
            }
            other => unreachable!("lvalue resolution on non-identifier kind {other:?}"),
        }
    }

    fn eval_identifier(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let name = self.identifier_fingerprint(node);
        if let Some(slot) = self.lookup_local(name) {
            self.ast.node_mut(node).kind = SyntaxKind::KnownLocal;
            self.ast.node_mut(node).payload = Payload::LocalSlot(slot);
            return self.eval_known_local(node);
        }
        if let Some(slot) = self.lookup_global(name) {
            self.ast.node_mut(node).kind = SyntaxKind::KnownGlobal;
            self.ast.node_mut(node).payload = Payload::GlobalSlot(slot);
            return self.eval_known_global(node);
        }
        Err(EvalError::VariableNotInScope)
    }

    fn eval_known_local(&self, node: NodeId) -> Result<Value, EvalError> {
        let slot = match self.ast.node(node).payload {
            Payload::LocalSlot(s) => s,
            _ => unreachable!("KnownLocal node without a local slot payload"),
        };
        let index = (self.frame_start as i64 + slot) as usize;
        Ok(self.stack[index].clone())
    }

    fn eval_known_global(&self, node: NodeId) -> Result<Value, EvalError> {
        let slot = match self.ast.node(node).payload {
            Payload::GlobalSlot(s) => s,
            _ => unreachable!("KnownGlobal node without a global slot payload"),
        };
        Ok(self.stack[slot].clone())
    }

    fn eval_return(&mut self, node: NodeId) -> Result<Value, EvalError> {
        match self.ast.children(node).first() {
            Some(&expr) => self.eval(expr),
            None => Ok(Value::Void),
        }
    }

    fn eval_call(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let callee = self.ast.children(node)[0];
        let name = self.identifier_fingerprint(callee);
        if name == PRINT_FINGERPRINT {
            self.ast.node_mut(node).kind = SyntaxKind::StandardCall;
            self.ast.node_mut(node).payload = Payload::Identifier(name);
            return self.eval_standard_call(node);
        }
        if let Some(&(_, func)) = self.functions.iter().rev().find(|(fp, _)| *fp == name) {
            self.ast.node_mut(node).kind = SyntaxKind::KnownCall;
            self.ast.node_mut(node).payload = Payload::Function(func);
            return self.eval_known_call(node);
        }
        Err(EvalError::FunctionNotFound)
    }

    fn eval_standard_call(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let name = match self.ast.node(node).payload {
            Payload::Identifier(fp) => fp,
            _ => unreachable!("StandardCall node without an identifier payload"),
        };
        if name != PRINT_FINGERPRINT {
            return Err(EvalError::UnknownStandardFunction);
        }
        let args = self.ast.children(node)[1];
        let arg_nodes = self.ast.children(args).to_vec();
        let mut rendered = String::new();
        for (i, arg) in arg_nodes.into_iter().enumerate() {
            let value = self.eval(arg)?;
            if i > 0 {
                rendered.push(' ');
            }
            match value {
                Value::Integer(v) => rendered.push_str(&v.to_string()),
                Value::String(s) => rendered.push_str(&s),
                Value::None | Value::Void => rendered.push_str("None"),
            }
        }
        println!("{rendered}");
        Ok(Value::None)
    }

    fn eval_known_call(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let func = match self.ast.node(node).payload {
            Payload::Function(f) => f,
            _ => unreachable!("KnownCall node without a function payload"),
        };
        let args = self.ast.children(node)[1];
        let arg_nodes = self.ast.children(args).to_vec();

        // Everything from here down — argument slots and any locals the
        // body declares — must be gone from the stack by the time this
        // call returns, so the pre-call length is what `stack_count`
        // unwinds to, not the new frame's own base.
        let pre_call_stack = self.stack.len();

        // Arguments are evaluated and pushed in reverse order, so argument
        // i lands at stack index `new_frame_start - (i + 1)`.
        for &arg in arg_nodes.iter().rev() {
            let value = self.eval(arg)?;
            self.push_stack(value)?;
        }

        let param_list = self.ast.children(func)[1];
        let param_count = self.ast.children(param_list).len();
        let saved_locals = self.locals.len();
        for i in 0..param_count {
            if self.locals.len() >= self.limits.max_locals {
                return Err(EvalError::resource_limit("locals", self.limits.max_locals));
            }
            let param_node = self.ast.children(param_list)[i];
            let name = self.identifier_fingerprint(param_node);
            self.locals.push((name, -((i + 1) as i64)));
        }

        let saved_frame_start = self.frame_start;
        self.frame_start = self.stack.len();
        let body = self.ast.children(func)[2];
        let result = self.eval(body);

        self.locals.truncate(saved_locals);
        self.stack.truncate(pre_call_stack);
        self.frame_start = saved_frame_start;

        match result? {
            Value::Void => Ok(Value::None),
            other => Ok(other),
        }
    }

    fn eval_if(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let children = self.ast.children(node).to_vec();
        let has_trailing_else = children.len() % 2 == 1;
        let pair_count = children.len() / 2;
        for i in 0..pair_count {
            let (cond, branch) = (children[i * 2], children[i * 2 + 1]);
            if self.eval(cond)?.truthy()? {
                return self.eval(branch);
            }
        }
        if has_trailing_else {
            return self.eval(children[children.len() - 1]);
        }
        Ok(Value::None)
    }

    fn eval_while(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let children = self.ast.children(node).to_vec();
        let (cond, body) = (children[0], children[1]);
        loop {
            if !self.eval(cond)?.truthy()? {
                return Ok(Value::None);
            }
            let result = self.eval(body)?;
            if !result.is_none() {
                return Ok(result);
            }
        }
    }

    fn eval_integer_literal(&self, node: NodeId) -> Result<Value, EvalError> {
        match self.ast.node(node).payload {
            Payload::Integer(v) => Ok(Value::Integer(v)),
            _ => unreachable!("Integer node without an integer payload"),
        }
    }

    fn eval_string_literal(&self, node: NodeId) -> Result<Value, EvalError> {
        match &self.ast.node(node).payload {
            Payload::Str(s) => Ok(Value::String(s.clone())),
            _ => unreachable!("String node without a string payload"),
        }
    }

    fn eval_not(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let operand = self.ast.children(node)[0];
        let value = self.eval(operand)?.as_integer()?;
        Ok(Value::Integer(if value == 0 { 1 } else { 0 }))
    }

    fn eval_binary(&mut self, node: NodeId) -> Result<Value, EvalError> {
        let kind = self.ast.kind(node);
        let children = self.ast.children(node).to_vec();
        let lhs = self.eval(children[0])?.as_integer()?;
        let rhs = self.eval(children[1])?.as_integer()?;
        let result = match kind {
            SyntaxKind::Plus => lhs.wrapping_add(rhs),
            SyntaxKind::Minus => lhs.wrapping_sub(rhs),
            SyntaxKind::Star => lhs.wrapping_mul(rhs),
            SyntaxKind::Slash => lhs.checked_div(rhs).ok_or_else(|| EvalError::InvalidSyntax {
                detail: "division by zero".to_string(),
            })?,
            SyntaxKind::Equal => (lhs == rhs) as i64,
            SyntaxKind::NotEqual => (lhs != rhs) as i64,
            SyntaxKind::Greater => (lhs > rhs) as i64,
            SyntaxKind::Less => (lhs < rhs) as i64,
            SyntaxKind::GreaterEqual => (lhs >= rhs) as i64,
            SyntaxKind::LessEqual => (lhs <= rhs) as i64,
            other => unreachable!("eval_binary called with non-binary kind {other:?}"),
        };
        Ok(Value::Integer(result))
    }

    fn identifier_fingerprint(&self, node: NodeId) -> Fingerprint {
        match self.ast.node(node).payload {
            Payload::Identifier(fp) => fp,
            _ => unreachable!("identifier leaf without an identifier payload"),
        }
    }

    fn lookup_local(&self, name: Fingerprint) -> Option<i64> {
        self.locals.iter().rev().find(|(fp, _)| *fp == name).map(|&(_, slot)| slot)
    }

    fn lookup_global(&self, name: Fingerprint) -> Option<usize> {
        self.globals.iter().rev().find(|(fp, _)| *fp == name).map(|&(_, slot)| slot)
    }

    fn push_stack(&mut self, value: Value) -> Result<(), EvalError> {
        if self.stack.len() >= self.limits.max_stack {
            return Err(EvalError::resource_limit("stack", self.limits.max_stack));
        }
        self.stack.push(value);
        Ok(())
    }

    /// Number of globals registered, and the frame pointer's current
    /// value; exposed for the frame-discipline invariant the test suite
    /// checks after a successful top-level evaluation.
    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn global_count(&self) -> usize {
        self.globals.len()
    }

    pub fn frame_start(&self) -> usize {
        self.frame_start
    }
}
