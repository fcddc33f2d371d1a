use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::{
    ast::{FunctionDef, Program, Statement},
    error::Diagnostic,
    interpreter::value::core::ValueType,
};

/// The static type of an expression as far as the analyzer can tell.
///
/// Besides the runtime types there are two analysis-only members: `Any` for
/// values whose type depends on runtime data, and `Wtf` for expressions that
/// already produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SemType {
    Noob,
    Numbr,
    Numbar,
    Yarn,
    Troof,
    Any,
    Wtf,
}

impl SemType {
    /// Flexible types accept assignments of any type.
    #[must_use]
    pub const fn is_flexible(self) -> bool {
        matches!(self, Self::Noob | Self::Any)
    }

    /// Types that carry no usable information.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Any | Self::Wtf)
    }

    /// The runtime type, if this is one.
    #[must_use]
    pub const fn runtime(self) -> Option<ValueType> {
        match self {
            Self::Noob => Some(ValueType::Noob),
            Self::Numbr => Some(ValueType::Numbr),
            Self::Numbar => Some(ValueType::Numbar),
            Self::Yarn => Some(ValueType::Yarn),
            Self::Troof => Some(ValueType::Troof),
            Self::Any | Self::Wtf => None,
        }
    }
}

impl From<ValueType> for SemType {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::Noob => Self::Noob,
            ValueType::Numbr => Self::Numbr,
            ValueType::Numbar => Self::Numbar,
            ValueType::Yarn => Self::Yarn,
            ValueType::Troof => Self::Troof,
        }
    }
}

impl std::fmt::Display for SemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.runtime() {
            Some(ty) => write!(f, "{ty}"),
            None if *self == Self::Any => write!(f, "ANY"),
            None => write!(f, "WTF"),
        }
    }
}

/// What the analyzer knows about a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// The type assignments are checked against.
    pub declared:    SemType,
    /// The type of the last value stored.
    pub current:     SemType,
    /// Whether a value has been stored.
    pub initialized: bool,
    /// Line of the declaration.
    pub line:        usize,
}

/// The result of semantic analysis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    /// Problems found, in source order of discovery.
    pub diagnostics: Vec<Diagnostic>,
    /// The global scope after analysis.
    pub symbols:     BTreeMap<String, Symbol>,
}

#[derive(Debug, Clone)]
pub(super) struct Signature {
    pub(super) arity:   usize,
    pub(super) returns: SemType,
}

/// State saved while analyzing a function body.
#[derive(Debug, Default)]
struct FunctionContext {
    name:    String,
    returns: BTreeSet<SemType>,
}

/// Walks the AST once, tracking scopes, the type of `IT`, and what kind of
/// block the current statement sits in.
pub struct Analyzer {
    scopes:           Vec<HashMap<String, Symbol>>,
    pub(super) functions: HashMap<String, Signature>,
    pub(super) it:    SemType,
    diagnostics:      Vec<Diagnostic>,
    in_var_block:     bool,
    pub(super) in_visible: bool,
    loop_depth:       usize,
    switch_depth:     usize,
    function:         Option<FunctionContext>,
}

/// Checks a program without running it.
///
/// Semantic diagnostics are advisory; they never stop execution.
///
/// # Example
/// ```
/// use lolz::interpreter::{analyzer::core::analyze, lexer::scan, parser::core::parse};
///
/// let source = "HAI\nWAZZUP\nI HAS A x ITZ 1\nBUHBYE\nVISIBLE y\nKTHXBYE";
/// let (program, _) = parse(&scan(source));
/// let diagnostics = analyze(&program);
///
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].message, "Undeclared variable 'y'");
/// ```
#[must_use]
pub fn analyze(program: &Program) -> Vec<Diagnostic> {
    analyze_program(program).diagnostics
}

/// Checks a program and also returns the resulting global symbol table.
#[must_use]
pub fn analyze_program(program: &Program) -> Analysis {
    let mut analyzer = Analyzer::new();
    analyzer.run(program);

    debug!(diagnostics = analyzer.diagnostics.len(), "analyzed program");

    let symbols = analyzer.scopes
                          .first()
                          .map(|scope| scope.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                          .unwrap_or_default();

    Analysis { diagnostics: analyzer.diagnostics,
               symbols }
}

impl Analyzer {
    fn new() -> Self {
        Self { scopes:       vec![HashMap::new()],
               functions:    HashMap::new(),
               it:           SemType::Noob,
               diagnostics:  Vec::new(),
               in_var_block: false,
               in_visible:   false,
               loop_depth:   0,
               switch_depth: 0,
               function:     None, }
    }

    fn run(&mut self, program: &Program) {
        if let Some(block) = &program.var_block {
            self.hoist_functions(&block.declarations);
        }
        self.hoist_functions(&program.body);

        if let Some(block) = &program.var_block {
            self.in_var_block = true;
            self.analyze_block(&block.declarations);
            self.in_var_block = false;
        }
        self.analyze_block(&program.body);
    }

    /// Registers every function in the program before any body is checked,
    /// so calls may appear above their definition.
    fn hoist_functions(&mut self, statements: &[Statement]) {
        for statement in statements {
            for_each_block(statement, &mut |block| self.hoist_functions(block));

            if let Statement::FuncDef(def) = statement {
                if self.functions.contains_key(&def.name) {
                    self.report(def.line, format!("Function '{}' already defined", def.name), &def.name);
                    continue;
                }
                self.functions.insert(def.name.clone(),
                                      Signature { arity:   def.params.len(),
                                                  returns: SemType::Any, });
            }
        }
    }

    pub(super) fn report(&mut self, line: usize, message: String, lexeme: &str) {
        self.diagnostics.push(Diagnostic::semantic(line, message, lexeme));
    }

    fn analyze_block(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.analyze_statement(statement);
        }
    }

    fn analyze_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDecl { name,
                                 value,
                                 declared_type,
                                 line, } => {
                if !self.in_var_block && self.function.is_none() {
                    self.report(*line, format!("Variable '{name}' declared outside 'WAZZUP'"), name);
                }
                let init = value.as_ref().map(|expr| self.expr_type(expr));
                self.declare(name, init, declared_type.map(SemType::from), *line);
            },
            Statement::Assignment { name, value, line } => {
                let ty = self.expr_type(value);
                self.assign(name, ty, *line);
                self.it = ty;
            },
            Statement::TypeCast { name, target, line } => {
                let from = self.lookup(name).map(|symbol| symbol.current);
                match from {
                    None => self.report(*line, format!("Undeclared variable '{name}'"), name),
                    Some(from) => {
                        self.check_cast(from, *target, *line, name);
                        if let Some(symbol) = self.lookup_mut(name) {
                            symbol.declared = SemType::from(*target);
                            symbol.current = SemType::from(*target);
                            symbol.initialized = true;
                        }
                    },
                }
            },
            Statement::Visible { arguments, .. } => {
                self.in_visible = true;
                for argument in arguments {
                    self.expr_type(argument);
                }
                self.in_visible = false;
            },
            Statement::Input { name, line } => match self.lookup_mut(name) {
                Some(symbol) => {
                    symbol.current = SemType::Yarn;
                    symbol.initialized = true;
                },
                None => self.report(*line, format!("Undeclared variable '{name}'"), name),
            },
            Statement::If { then_branch,
                            else_ifs,
                            else_branch,
                            .. } => {
                self.analyze_block(then_branch);
                for branch in else_ifs {
                    self.it = self.expr_type(&branch.condition);
                    self.analyze_block(&branch.body);
                }
                if let Some(body) = else_branch {
                    self.analyze_block(body);
                }
            },
            Statement::Switch { cases, default, .. } => {
                self.switch_depth += 1;
                let mut seen = HashSet::new();
                for case in cases {
                    if !seen.insert(&case.literal) {
                        self.report(case.line,
                                    format!("Duplicate 'OMG' literal {} in switch", case.literal),
                                    &case.literal.to_string());
                    }
                    self.analyze_block(&case.body);
                }
                if let Some(body) = default {
                    self.analyze_block(body);
                }
                self.switch_depth -= 1;
            },
            Statement::Loop { operation,
                              condition,
                              body,
                              line,
                              .. } => {
                if let Some(operation) = operation {
                    self.variable_type(&operation.variable, *line);
                }
                if let Some(condition) = condition {
                    self.expr_type(&condition.expr);
                }
                self.loop_depth += 1;
                self.analyze_block(body);
                self.loop_depth -= 1;
            },
            Statement::FuncDef(def) => self.analyze_function(def),
            Statement::Return { value, line } => {
                let ty = self.expr_type(value);
                match &mut self.function {
                    Some(function) => {
                        if !ty.is_unknown() {
                            function.returns.insert(ty);
                        }
                    },
                    None => self.report(*line, "'FOUND YR' outside of a function".to_string(), "FOUND YR"),
                }
            },
            Statement::Break { line } => {
                if self.loop_depth == 0 && self.switch_depth == 0 && self.function.is_none() {
                    self.report(*line,
                                "'GTFO' outside of a loop, switch or function".to_string(),
                                "GTFO");
                }
            },
            Statement::Expression { expr, .. } => {
                self.it = self.expr_type(expr);
            },
        }
    }

    /// Analyzes a function body in its own scope and records its return type.
    fn analyze_function(&mut self, def: &FunctionDef) {
        let outer = self.function.replace(FunctionContext { name:    def.name.clone(),
                                                            returns: BTreeSet::new(), });
        let outer_loops = std::mem::take(&mut self.loop_depth);
        let outer_switches = std::mem::take(&mut self.switch_depth);
        let outer_var_block = std::mem::take(&mut self.in_var_block);
        let outer_it = std::mem::replace(&mut self.it, SemType::Noob);

        let params = def.params
                        .iter()
                        .map(|param| {
                            (param.clone(),
                             Symbol { declared:    SemType::Any,
                                      current:     SemType::Any,
                                      initialized: true,
                                      line:        def.line, })
                        })
                        .collect();
        self.scopes.push(params);
        self.analyze_block(&def.body);
        self.scopes.pop();

        let context = std::mem::replace(&mut self.function, outer).unwrap_or_default();
        self.loop_depth = outer_loops;
        self.switch_depth = outer_switches;
        self.in_var_block = outer_var_block;
        self.it = outer_it;

        let returns = match context.returns.len() {
            0 => SemType::Noob,
            1 => context.returns.first().copied().unwrap_or(SemType::Any),
            _ => {
                let types: Vec<_> = context.returns.iter().map(ToString::to_string).collect();
                self.report(def.line,
                            format!("Inconsistent return types in function '{}': {}",
                                    context.name,
                                    types.join(", ")),
                            &def.name);
                SemType::Any
            },
        };

        if let Some(signature) = self.functions.get_mut(&def.name) {
            signature.returns = returns;
        }
    }

    fn declare(&mut self, name: &str, init: Option<SemType>, declared: Option<SemType>, line: usize) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        if scope.contains_key(name) {
            self.report(line, format!("Variable '{name}' already declared in this scope"), name);
            return;
        }

        let symbol = match (init, declared) {
            (_, Some(declared)) => Symbol { declared,
                                            current: declared,
                                            initialized: true,
                                            line },
            (Some(ty), None) => Symbol { declared: if ty == SemType::Wtf { SemType::Any } else { ty },
                                         current: ty,
                                         initialized: true,
                                         line },
            (None, None) => Symbol { declared: SemType::Noob,
                                     current: SemType::Noob,
                                     initialized: false,
                                     line },
        };
        scope.insert(name.to_string(), symbol);
    }

    fn assign(&mut self, name: &str, ty: SemType, line: usize) {
        let Some(symbol) = self.lookup_mut(name) else {
            self.report(line, format!("Assignment to undeclared variable '{name}'"), name);
            return;
        };

        symbol.initialized = true;
        if ty == SemType::Wtf {
            return;
        }

        let declared = symbol.declared;
        let compatible = declared.is_flexible()
                         || ty.is_unknown()
                         || declared == ty
                         || (declared == SemType::Numbar && ty == SemType::Numbr);

        if compatible {
            if declared.is_flexible() {
                symbol.declared = ty;
            }
            symbol.current = ty;
        } else {
            self.report(line,
                        format!("Type mismatch assigning {ty} to {declared} ('{name}')"),
                        name);
        }
    }

    pub(super) fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.scopes.iter_mut().rev().find_map(|scope| scope.get_mut(name))
    }
}

/// Calls `f` on every nested statement list of `statement`.
fn for_each_block(statement: &Statement, f: &mut impl FnMut(&[Statement])) {
    match statement {
        Statement::If { then_branch,
                        else_ifs,
                        else_branch,
                        .. } => {
            f(then_branch);
            for branch in else_ifs {
                f(&branch.body);
            }
            if let Some(body) = else_branch {
                f(body);
            }
        },
        Statement::Switch { cases, default, .. } => {
            for case in cases {
                f(&case.body);
            }
            if let Some(body) = default {
                f(body);
            }
        },
        Statement::Loop { body, .. } => f(body),
        Statement::FuncDef(def) => f(&def.body),
        _ => {},
    }
}
