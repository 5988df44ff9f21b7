use crate::value::{Record, Result, RuntimeError, Value};
use std::collections::{HashMap, HashSet};

type Scope = HashMap<String, Value>;

/// The record being built by the innermost running `obj` body.
#[derive(Debug, Clone)]
struct ObjectFrame {
    record: Record,
    declared: HashSet<String>,
    /// Declaration blocks already open when the object started.
    block_depth: usize,
}

/// A block-style initializer. Names bound inside it stay readable from an
/// object body, like declared fields.
#[derive(Debug, Clone)]
struct DeclarationBlock {
    base_depth: usize,
    declared: HashSet<String>,
    last: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
    object: Option<ObjectFrame>,
    blocks: Vec<DeclarationBlock>,
    loop_depth: usize,
    output: Vec<Record>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            scopes: vec![Scope::new()],
            object: None,
            blocks: vec![],
            loop_depth: 0,
            output: vec![],
        }
    }
}

fn lookup<'a>(scopes: &'a [Scope], name: &str) -> Option<&'a Value> {
    scopes.iter().rev().find_map(|scope| scope.get(name))
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Plain scope lookup, ignoring any object under construction.
    pub fn get(&self, name: &str) -> Option<Value> {
        lookup(&self.scopes, name).cloned()
    }

    /// Resolves an identifier read.
    ///
    /// Inside an `obj` body only names bound by a declaration block of this
    /// object and declared fields resolve; any other name, a loop iterator
    /// included, reads as a string of itself.
    pub fn resolve(&self, name: &str) -> Result<Value> {
        match &self.object {
            Some(frame) => {
                let blocks = self.blocks.get(frame.block_depth..).unwrap_or(&[]);
                if let Some(first) = blocks.first() {
                    if blocks.iter().any(|block| block.declared.contains(name)) {
                        if let Some(value) = lookup(&self.scopes[first.base_depth..], name) {
                            return Ok(value.clone());
                        }
                    }
                }
                if frame.declared.contains(name) {
                    if let Some(value) = frame.record.get(name) {
                        return Ok(value.clone());
                    }
                }
                Ok(Value::from(name))
            }
            None => self.get(name).ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_owned(),
            }),
        }
    }

    /// Binds in the innermost scope, bypassing object fields.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_owned(), value);
        }
    }

    /// `name = value`: a field inside an object body, otherwise a binding in
    /// the innermost scope. Outer bindings of the same name are shadowed, never
    /// updated.
    pub fn assign(&mut self, name: &str, value: Value) {
        if self.writes_to_object() {
            self.set_field(name, value);
            return;
        }

        if let Some(block) = self.blocks.last_mut() {
            block.declared.insert(name.to_owned());
        }
        self.define(name, value);
    }

    /// `num(name) {...}`: a field inside an object body, otherwise a binding in
    /// the innermost scope that also becomes the enclosing declaration block's
    /// result.
    pub fn declare(&mut self, name: &str, value: Value) {
        if self.writes_to_object() {
            self.set_field(name, value);
            return;
        }

        if let Some(block) = self.blocks.last_mut() {
            block.declared.insert(name.to_owned());
            block.last = Some(value.clone());
        }
        self.define(name, value);
    }

    fn writes_to_object(&self) -> bool {
        self.object
            .as_ref()
            .map_or(false, |frame| frame.block_depth == self.blocks.len())
    }

    fn set_field(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.object.as_mut() {
            frame.record.set(name, value);
            frame.declared.insert(name.to_owned());
        }
    }

    pub fn in_object(&self) -> bool {
        self.object.is_some()
    }

    /// Starts a record and pushes the scope its body runs in.
    pub fn open_object(&mut self, class_name: &str, id: Value) -> Result<()> {
        if self.in_object() {
            return Err(RuntimeError::NestedObject {
                class: class_name.to_owned(),
            });
        }

        self.object = Some(ObjectFrame {
            record: Record::new(class_name, id),
            declared: HashSet::new(),
            block_depth: self.blocks.len(),
        });
        self.push_scope();
        Ok(())
    }

    pub fn close_object(&mut self) -> Option<Record> {
        self.pop_scope();
        self.object.take().map(|frame| frame.record)
    }

    /// Opens the private scope of a block-style declaration.
    pub fn begin_declaration_block(&mut self) {
        self.push_scope();
        self.blocks.push(DeclarationBlock {
            base_depth: self.scopes.len() - 1,
            declared: HashSet::new(),
            last: None,
        });
    }

    /// Discards the private scope and returns the last declared value.
    pub fn end_declaration_block(&mut self) -> Option<Value> {
        self.pop_scope();
        self.blocks.pop().and_then(|block| block.last)
    }

    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
    }

    pub fn exit_loop(&mut self) {
        self.loop_depth = self.loop_depth.saturating_sub(1);
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }

    pub fn emit(&mut self, record: Record) {
        self.output.push(record);
    }

    pub fn output(&self) -> &[Record] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.output)
    }

    /// Drops records emitted after `committed` and any half-finished state.
    pub fn rollback(&mut self, committed: usize) {
        self.output.truncate(committed);
        self.scopes.truncate(1);
        self.object = None;
        self.blocks.clear();
        self.loop_depth = 0;
    }
}
