use std::collections::HashMap;

use crate::interpreter::value::core::{Value, ValueType};

/// Index of a scope inside a [`ScopeArena`].
pub type ScopeId = usize;

/// A variable record.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The type the variable was declared or last cast with.
    pub declared_type: ValueType,
    /// The current value.
    pub value:         Value,
    /// Whether a value has been stored since the declaration.
    pub initialized:   bool,
}

impl Variable {
    /// A variable declared without a value, `I HAS A name`.
    #[must_use]
    pub const fn uninitialized() -> Self {
        Self { declared_type: ValueType::Noob,
               value:         Value::Noob,
               initialized:   false, }
    }

    /// A variable holding `value`.
    #[must_use]
    pub const fn with_value(value: Value) -> Self {
        Self { declared_type: value.value_type(),
               value,
               initialized: true }
    }
}

/// One level of the scope stack.
#[derive(Debug, Default)]
pub struct Scope {
    variables: HashMap<String, Variable>,
}

/// Storage for all scopes of one interpreter.
///
/// Scopes live in slots and are referred to by index. The active chain is a
/// stack of indices; slots of popped scopes go on a free list and are reused,
/// so a popped scope can never be reached again through the stack. The
/// global scope sits in slot 0 and is never popped.
#[derive(Debug)]
pub struct ScopeArena {
    slots: Vec<Option<Scope>>,
    free:  Vec<ScopeId>,
    stack: Vec<ScopeId>,
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeArena {
    /// The slot of the global scope.
    pub const GLOBAL: ScopeId = 0;

    /// Creates an arena holding only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: vec![Some(Scope::default())],
               free:  Vec::new(),
               stack: vec![Self::GLOBAL], }
    }

    /// Drops every scope and variable, leaving an empty global scope.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pushes a fresh scope on top of the stack.
    pub fn push(&mut self) {
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(Scope::default());
                id
            },
            None => {
                self.slots.push(Some(Scope::default()));
                self.slots.len() - 1
            },
        };
        self.stack.push(id);
    }

    /// Pops the innermost scope. The global scope stays.
    pub fn pop(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(id) = self.stack.pop() {
            self.slots[id] = None;
            self.free.push(id);
        }
    }

    /// Declares `name` in the innermost scope, replacing any variable of the
    /// same name in that scope.
    pub fn declare(&mut self, name: &str, variable: Variable) {
        if let Some(scope) = self.stack.last().and_then(|&id| self.slots[id].as_mut()) {
            scope.variables.insert(name.to_string(), variable);
        }
    }

    /// Finds `name`, searching from the innermost scope outwards.
    ///
    /// # Example
    /// ```
    /// use lolz::interpreter::{
    ///     evaluator::scope::{ScopeArena, Variable},
    ///     value::core::Value,
    /// };
    ///
    /// let mut scopes = ScopeArena::new();
    /// scopes.declare("x", Variable::with_value(Value::Numbr(1)));
    /// scopes.push();
    /// scopes.declare("x", Variable::with_value(Value::Numbr(2)));
    /// assert_eq!(scopes.lookup("x").map(|v| &v.value), Some(&Value::Numbr(2)));
    ///
    /// scopes.pop();
    /// assert_eq!(scopes.lookup("x").map(|v| &v.value), Some(&Value::Numbr(1)));
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.stack
            .iter()
            .rev()
            .filter_map(|&id| self.slots[id].as_ref())
            .find_map(|scope| scope.variables.get(name))
    }

    /// Mutable version of [`ScopeArena::lookup`].
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let id = self.stack.iter().rev().copied().find(|&id| {
                     self.slots[id].as_ref().is_some_and(|scope| scope.variables.contains_key(name))
                 })?;
        self.slots[id].as_mut().and_then(|scope| scope.variables.get_mut(name))
    }

    /// The variables of the global scope.
    pub fn globals(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.slots[Self::GLOBAL].iter().flat_map(|scope| scope.variables.iter())
    }
}
