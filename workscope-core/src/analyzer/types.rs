use serde::Serialize;

/// Structural index of one source file: module level declarations only,
/// plus whatever is declared directly inside those classes.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ModuleIndex {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub constants: Vec<ConstantInfo>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub docstring: Option<String>,
    pub lineno: usize,
    pub end_lineno: Option<usize>,
    pub args: Vec<ParameterInfo>,
    pub returns: Option<String>,
    pub is_async: bool,
    /// Decorator expressions without the leading `@`.
    pub decorators: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub docstring: Option<String>,
    pub lineno: usize,
    pub end_lineno: Option<usize>,
    /// Source text of each entry in the class header's argument list.
    pub bases: Vec<String>,
    pub decorators: Vec<String>,
    pub methods: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConstantInfo {
    pub name: String,
    pub lineno: usize,
    /// Right hand side exactly as written.
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub annotation: Option<String>,
    pub default: Option<String>,
    pub kind: ParameterKind,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    PositionalOnly,
    Positional,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

/// Where the parser first gave up, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxPosition {
    pub line: usize,
    pub column: usize,
}
