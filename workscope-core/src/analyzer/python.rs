//! Python structural index built on the tree-sitter Python grammar.
//!
//! Two passes, both deliberately shallow:
//! - the module pass looks at direct children of the module only
//! - the class pass looks at the direct body of one class
//!
//! Function bodies are never entered, so helpers defined inside a function do
//! not show up in the index.

use std::path::Path;
use tree_sitter::{Language, Node, Parser};

use super::types::{
    ClassInfo, ConstantInfo, FunctionInfo, ModuleIndex, ParameterInfo, ParameterKind,
    SyntaxPosition,
};
use crate::error::{ToolError, ToolResult};

/// Parse `source` and build its structural index. Any error or missing node
/// in the tree fails the whole analysis, and so does anything the grammar
/// tolerates but Python 3 does not. There is no partial result.
pub fn analyze_source(source: &str, path: &Path) -> ToolResult<ModuleIndex> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_python::LANGUAGE.into();
    parser
        .set_language(&language)
        .map_err(|e| ToolError::ParserUnavailable(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ToolError::ParserUnavailable("parse was cancelled".to_string()))?;

    let root = tree.root_node();
    if let Some(position) = first_error(root).or_else(|| first_rejected(root)) {
        return Err(ToolError::ParseSyntax {
            path: path.to_path_buf(),
            line: position.line,
            column: position.column,
        });
    }

    Ok(visit_module(root, source))
}

enum Definition<'t> {
    Function(Node<'t>),
    Class(Node<'t>),
}

/// Recognizes a function or class definition, looking through decorators.
fn definition<'t>(node: Node<'t>, src: &str) -> Option<(Definition<'t>, Vec<String>)> {
    match node.kind() {
        "function_definition" => Some((Definition::Function(node), Vec::new())),
        "class_definition" => Some((Definition::Class(node), Vec::new())),
        "decorated_definition" => {
            let inner = node.child_by_field_name("definition")?;
            let mut cursor = node.walk();
            let decorators = node
                .named_children(&mut cursor)
                .filter(|child| child.kind() == "decorator")
                .map(|child| text(child, src).trim_start_matches('@').trim().to_string())
                .collect();
            match inner.kind() {
                "function_definition" => Some((Definition::Function(inner), decorators)),
                "class_definition" => Some((Definition::Class(inner), decorators)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn visit_module(root: Node, src: &str) -> ModuleIndex {
    let mut index = ModuleIndex::default();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() == "expression_statement" {
            collect_constants(child, src, &mut index.constants);
            continue;
        }
        match definition(child, src) {
            Some((Definition::Function(node), decorators)) => {
                index.functions.push(function_info(node, src, decorators));
            }
            Some((Definition::Class(node), decorators)) => {
                index.classes.push(class_info(node, src, decorators));
            }
            None => {}
        }
    }
    index
}

fn class_info(node: Node, src: &str, decorators: Vec<String>) -> ClassInfo {
    let mut info = ClassInfo {
        name: field_text(node, "name", src).unwrap_or_default(),
        docstring: None,
        lineno: start_line(node),
        end_lineno: Some(last_line(node)),
        bases: Vec::new(),
        decorators,
        methods: Vec::new(),
        classes: Vec::new(),
    };

    if let Some(superclasses) = node.child_by_field_name("superclasses") {
        let mut cursor = superclasses.walk();
        info.bases = superclasses
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| text(child, src).to_string())
            .collect();
    }

    let Some(body) = node.child_by_field_name("body") else {
        return info;
    };
    info.docstring = docstring(body, src);

    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match definition(member, src) {
            Some((Definition::Function(node), decorators)) => {
                info.methods.push(function_info(node, src, decorators));
            }
            Some((Definition::Class(node), decorators)) => {
                info.classes.push(class_info(node, src, decorators));
            }
            None => {}
        }
    }
    info
}

fn function_info(node: Node, src: &str, decorators: Vec<String>) -> FunctionInfo {
    let mut cursor = node.walk();
    let is_async = node.children(&mut cursor).any(|child| child.kind() == "async");

    FunctionInfo {
        name: field_text(node, "name", src).unwrap_or_default(),
        docstring: node
            .child_by_field_name("body")
            .and_then(|body| docstring(body, src)),
        lineno: start_line(node),
        end_lineno: Some(last_line(node)),
        args: node
            .child_by_field_name("parameters")
            .map(|params| parameters(params, src))
            .unwrap_or_default(),
        returns: field_text(node, "return_type", src),
        is_async,
        decorators,
    }
}

fn parameters(params: Node, src: &str) -> Vec<ParameterInfo> {
    let mut out: Vec<ParameterInfo> = Vec::new();
    let mut keyword_only = false;

    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        let plain = if keyword_only {
            ParameterKind::KeywordOnly
        } else {
            ParameterKind::Positional
        };

        let parameter = match param.kind() {
            "identifier" => parameter(text(param, src), None, None, plain),
            "default_parameter" => parameter(
                &field_text(param, "name", src).unwrap_or_default(),
                None,
                field_text(param, "value", src),
                plain,
            ),
            "typed_default_parameter" => parameter(
                &field_text(param, "name", src).unwrap_or_default(),
                field_text(param, "type", src),
                field_text(param, "value", src),
                plain,
            ),
            "typed_parameter" => {
                let Some(inner) = param.named_child(0) else {
                    continue;
                };
                let annotation = field_text(param, "type", src);
                let kind = match inner.kind() {
                    "list_splat_pattern" => {
                        keyword_only = true;
                        ParameterKind::VarPositional
                    }
                    "dictionary_splat_pattern" => ParameterKind::VarKeyword,
                    _ => plain,
                };
                parameter(splat_name(inner, src), annotation, None, kind)
            }
            "list_splat_pattern" => {
                keyword_only = true;
                parameter(splat_name(param, src), None, None, ParameterKind::VarPositional)
            }
            "dictionary_splat_pattern" => {
                parameter(splat_name(param, src), None, None, ParameterKind::VarKeyword)
            }
            "keyword_separator" => {
                keyword_only = true;
                continue;
            }
            "positional_separator" => {
                for earlier in out.iter_mut() {
                    if earlier.kind == ParameterKind::Positional {
                        earlier.kind = ParameterKind::PositionalOnly;
                    }
                }
                continue;
            }
            _ => continue,
        };
        out.push(parameter);
    }
    out
}

fn parameter(
    name: &str,
    annotation: Option<String>,
    default: Option<String>,
    kind: ParameterKind,
) -> ParameterInfo {
    ParameterInfo {
        name: name.to_string(),
        annotation,
        default,
        kind,
    }
}

fn splat_name<'s>(node: Node, src: &'s str) -> &'s str {
    text(node, src).trim_start_matches('*').trim()
}

/// `NAME = value` statements, including every name of a chained
/// `A = B = value`. Annotated assignments are skipped.
fn collect_constants(statement: Node, src: &str, out: &mut Vec<ConstantInfo>) {
    let Some(mut assignment) = statement
        .named_child(0)
        .filter(|node| node.kind() == "assignment")
    else {
        return;
    };

    let mut targets = Vec::new();
    let value = loop {
        if assignment.child_by_field_name("type").is_some() {
            return;
        }
        let (Some(left), Some(right)) = (
            assignment.child_by_field_name("left"),
            assignment.child_by_field_name("right"),
        ) else {
            return;
        };
        targets.push(left);
        if right.kind() == "assignment" {
            assignment = right;
        } else {
            break right;
        }
    };

    let lineno = start_line(statement);
    for target in targets {
        if target.kind() != "identifier" {
            continue;
        }
        let name = text(target, src);
        if is_upper(name) {
            out.push(ConstantInfo {
                name: name.to_string(),
                lineno,
                value: text(value, src).to_string(),
            });
        }
    }
}

/// Same rule as `str.isupper`: at least one cased character and no
/// lowercase ones.
fn is_upper(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

/// The first statement of a body, when it is a plain string literal.
fn docstring(body: Node, src: &str) -> Option<String> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")?;
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }
    let literal = first.named_child(0)?;
    let value = string_value(literal, src)?;
    Some(clean_docstring(&value))
}

/// Value of a str literal. Bytes, f-strings and t-strings are not docstrings.
fn string_value(node: Node, src: &str) -> Option<String> {
    match node.kind() {
        "string" => {
            let raw = text(node, src);
            let prefix_len = raw
                .find(|c: char| c == '"' || c == '\'')
                .unwrap_or(raw.len());
            let prefix = raw[..prefix_len].to_ascii_lowercase();
            if prefix.contains(['f', 'b', 't']) {
                return None;
            }

            let quoted = &raw[prefix_len..];
            let quote_len = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
                3
            } else {
                1
            };
            if quoted.len() < quote_len * 2 {
                return None;
            }
            let body = &quoted[quote_len..quoted.len() - quote_len];
            if prefix.contains('r') {
                Some(body.to_string())
            } else {
                Some(unescape(body))
            }
        }
        "concatenated_string" => {
            let mut cursor = node.walk();
            let parts: Option<Vec<String>> = node
                .named_children(&mut cursor)
                .filter(|child| child.kind() != "comment")
                .map(|child| string_value(child, src))
                .collect();
            Some(parts?.concat())
        }
        _ => None,
    }
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.clone().next().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            'N' => {
                let rest = chars.as_str();
                let named = rest
                    .strip_prefix('{')
                    .and_then(|inner| inner.find('}').map(|end| &inner[..end]));
                match named.and_then(unicode_names2::character) {
                    Some(decoded) => {
                        out.push(decoded);
                        let consumed = named.map_or(0, |name| name.len() + 2);
                        chars = rest[consumed..].chars();
                    }
                    None => {
                        out.push('\\');
                        out.push('N');
                    }
                }
            }
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.by_ref().take(width).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == width => out.push(decoded),
                    _ => {
                        out.push('\\');
                        out.push(next);
                        out.push_str(&digits);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

/// Dedent the way `inspect.cleandoc` does: the first line loses its leading
/// whitespace, later lines lose their common indentation, blank lines at
/// either end are dropped.
pub fn clean_docstring(doc: &str) -> String {
    let expanded = expand_tabs(doc);
    let lines: Vec<&str> = expanded.split('\n').collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start();
            if content.is_empty() {
                None
            } else {
                Some(line.chars().count() - content.chars().count())
            }
        })
        .min();

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            cleaned.push(line.trim_start().to_string());
        } else {
            cleaned.push(line.chars().skip(margin.unwrap_or(0)).collect());
        }
    }

    while cleaned.last().is_some_and(|line| line.trim().is_empty()) {
        cleaned.pop();
    }
    let leading = cleaned
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();
    cleaned.drain(..leading);

    cleaned.join("\n")
}

fn expand_tabs(text: &str) -> String {
    const TAB_SIZE: usize = 8;
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

fn first_error(root: Node) -> Option<SyntaxPosition> {
    let node = first_error_node(root)?;
    let start = node.start_position();
    Some(SyntaxPosition {
        line: start.row + 1,
        column: start.column + 1,
    })
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error_node)
        .or(Some(node))
}

/// First construct, in source order, that the grammar accepts but Python 3
/// rejects: statement forms from Python 2 and malformed parameter lists.
fn first_rejected(root: Node) -> Option<SyntaxPosition> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if let Some(rejected) = rejected_construct(node) {
            let start = rejected.start_position();
            return Some(SyntaxPosition {
                line: start.row + 1,
                column: start.column + 1,
            });
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn rejected_construct(node: Node) -> Option<Node> {
    match node.kind() {
        "exec_statement" => Some(node),
        "print_statement" => {
            let mut cursor = node.walk();
            let has_chevron = node
                .named_children(&mut cursor)
                .any(|child| child.kind() == "chevron");
            (!has_chevron).then_some(node)
        }
        "parameters" | "lambda_parameters" => invalid_parameter(node),
        _ => None,
    }
}

/// Ordering rules of a parameter list: no required positional after a
/// defaulted one, a single `*`, a bare `*` followed by a named parameter,
/// `/` only once and before `*`, nothing after `**kwargs`.
fn invalid_parameter(params: Node) -> Option<Node> {
    let mut seen_default = false;
    let mut seen_star = false;
    let mut bare_star_open = false;
    let mut seen_slash = false;
    let mut seen_kwargs = false;
    let mut positional = 0usize;

    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        if param.kind() == "comment" {
            continue;
        }
        if seen_kwargs {
            return Some(param);
        }

        let kind = match param.kind() {
            "typed_parameter" => param.named_child(0).map_or("identifier", |inner| inner.kind()),
            other => other,
        };
        match kind {
            "identifier" => {
                if seen_default && !seen_star {
                    return Some(param);
                }
                bare_star_open = false;
                positional += 1;
            }
            "default_parameter" | "typed_default_parameter" => {
                if !seen_star {
                    seen_default = true;
                }
                bare_star_open = false;
                positional += 1;
            }
            "list_splat_pattern" | "keyword_separator" => {
                if seen_star {
                    return Some(param);
                }
                seen_star = true;
                bare_star_open = kind == "keyword_separator";
            }
            "dictionary_splat_pattern" => {
                if bare_star_open {
                    return Some(param);
                }
                seen_kwargs = true;
            }
            "positional_separator" => {
                if seen_slash || seen_star || positional == 0 {
                    return Some(param);
                }
                seen_slash = true;
            }
            _ => return Some(param),
        }
    }

    bare_star_open.then_some(params)
}

fn text<'s>(node: Node, src: &'s str) -> &'s str {
    &src[node.byte_range()]
}

fn field_text(node: Node, field: &str, src: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|child| text(child, src).to_string())
}

fn start_line(node: Node) -> usize {
    node.start_position().row + 1
}

/// Last line of actual code in the node. Comments trailing the final
/// statement sit inside the block but do not extend the node.
fn last_line(node: Node) -> usize {
    let mut current = node;
    loop {
        let mut cursor = current.walk();
        let last = current
            .children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .last();
        match last {
            Some(child) => current = child,
            None => return end_line(current),
        }
    }
}

/// Last line the node occupies. A node that ends right after a newline ends
/// on the previous line.
fn end_line(node: Node) -> usize {
    let end = node.end_position();
    if end.column == 0 && end.row > node.start_position().row {
        end.row
    } else {
        end.row + 1
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze_source, clean_docstring, is_upper, unescape};
    use crate::analyzer::types::{ModuleIndex, ParameterKind};
    use crate::error::ToolError;
    use rstest::rstest;
    use std::path::Path;

    fn analyze(source: &str) -> ModuleIndex {
        analyze_source(source, Path::new("test.py")).unwrap()
    }

    #[test]
    fn test_structural_index() {
        let source = r#"MAX = 10

def f(a, b=1):
    return a + b

class C:
    class D:
        pass

    def m(self):
        pass
"#;
        let index = analyze(source);

        assert_eq!(index.functions.len(), 1);
        let f = &index.functions[0];
        assert_eq!(f.name, "f");
        assert_eq!((f.lineno, f.end_lineno), (3, Some(4)));
        assert_eq!(f.args.len(), 2);
        assert_eq!(f.args[0].name, "a");
        assert_eq!(f.args[0].default, None);
        assert_eq!(f.args[1].name, "b");
        assert_eq!(f.args[1].default.as_deref(), Some("1"));

        assert_eq!(index.classes.len(), 1);
        let c = &index.classes[0];
        assert_eq!(c.name, "C");
        assert_eq!((c.lineno, c.end_lineno), (6, Some(11)));
        assert_eq!(c.methods.len(), 1);
        assert_eq!(c.methods[0].name, "m");
        assert_eq!(c.classes.len(), 1);
        assert_eq!(c.classes[0].name, "D");
        assert_eq!((c.classes[0].lineno, c.classes[0].end_lineno), (7, Some(8)));

        assert_eq!(index.constants.len(), 1);
        assert_eq!(index.constants[0].name, "MAX");
        assert_eq!(index.constants[0].value, "10");
        assert_eq!(index.constants[0].lineno, 1);
    }

    #[test]
    fn test_signatures() {
        let source = r#"
async def fetch(url: str, *, timeout: float = 1.5, **kwargs) -> bytes:
    ...

def split(a, b: int = 2, /, c=3, *args: str, d, **kw: dict):
    pass
"#;
        let index = analyze(source);
        assert_eq!(index.functions.len(), 2);

        let fetch = &index.functions[0];
        assert!(fetch.is_async);
        assert_eq!(fetch.returns.as_deref(), Some("bytes"));
        let names: Vec<&str> = fetch.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["url", "timeout", "kwargs"]);
        assert_eq!(fetch.args[0].annotation.as_deref(), Some("str"));
        assert_eq!(fetch.args[0].kind, ParameterKind::Positional);
        assert_eq!(fetch.args[1].kind, ParameterKind::KeywordOnly);
        assert_eq!(fetch.args[1].annotation.as_deref(), Some("float"));
        assert_eq!(fetch.args[1].default.as_deref(), Some("1.5"));
        assert_eq!(fetch.args[2].kind, ParameterKind::VarKeyword);

        let split = &index.functions[1];
        assert!(!split.is_async);
        let kinds: Vec<ParameterKind> = split.args.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParameterKind::PositionalOnly,
                ParameterKind::PositionalOnly,
                ParameterKind::Positional,
                ParameterKind::VarPositional,
                ParameterKind::KeywordOnly,
                ParameterKind::VarKeyword,
            ]
        );
        assert_eq!(split.args[3].name, "args");
        assert_eq!(split.args[3].annotation.as_deref(), Some("str"));
        assert_eq!(split.args[5].name, "kw");
    }

    #[test]
    fn test_scope_is_shallow() {
        let source = r#"
def outer():
    def inner():
        pass
    class Hidden:
        pass
    LIMIT = 3

if True:
    def conditional():
        pass
    FLAG = 1

class Box:
    SIZE = 4
    def method(self):
        def helper():
            pass
"#;
        let index = analyze(source);

        assert_eq!(index.functions.len(), 1);
        assert_eq!(index.functions[0].name, "outer");
        assert!(index.constants.is_empty());
        assert_eq!(index.classes[0].methods.len(), 1);
        assert!(index.classes[0].classes.is_empty());
    }

    #[test]
    fn test_constants() {
        let source = r#"
A = B = 5
lower = 1
Mixed = 2
HTTP_2 = "h2"
TIMEOUT: int = 30
RETRIES += 1
X, Y = 1, 2
_ = None
CONFIG = {
    "a": 1,
}
"#;
        let index = analyze(source);
        let found: Vec<(&str, &str, usize)> = index
            .constants
            .iter()
            .map(|c| (c.name.as_str(), c.value.as_str(), c.lineno))
            .collect();
        assert_eq!(
            found,
            vec![
                ("A", "5", 2),
                ("B", "5", 2),
                ("HTTP_2", "\"h2\"", 5),
                ("CONFIG", "{\n    \"a\": 1,\n}", 10),
            ]
        );
    }

    #[test]
    fn test_decorators_and_bases() {
        let source = r#"
@dataclass(frozen=True)
class Point(Base, metaclass=Meta):
    """A point."""

    @property
    def norm(self) -> float:
        """Length
        of the vector.
        """
        return 0.0

@app.route("/")
def index():
    pass
"#;
        let index = analyze(source);

        let point = &index.classes[0];
        assert_eq!(point.decorators, vec!["dataclass(frozen=True)"]);
        assert_eq!(point.bases, vec!["Base", "metaclass=Meta"]);
        assert_eq!(point.docstring.as_deref(), Some("A point."));
        assert_eq!(point.lineno, 3);

        let norm = &point.methods[0];
        assert_eq!(norm.decorators, vec!["property"]);
        assert_eq!(norm.docstring.as_deref(), Some("Length\nof the vector."));
        assert_eq!(norm.lineno, 7);

        assert_eq!(index.functions[0].decorators, vec!["app.route(\"/\")"]);
    }

    #[test]
    fn test_docstring_variants() {
        let source = r#"
def plain():
    'single'

def not_first():
    x = 1
    """too late"""

def fstring():
    f"{1}"

def escaped():
    "tab\there"

def raw():
    r"tab\there"

def commented():
    # leading comment
    """after comment"""
"#;
        let index = analyze(source);
        let docs: Vec<Option<&str>> = index
            .functions
            .iter()
            .map(|f| f.docstring.as_deref())
            .collect();
        assert_eq!(
            docs,
            vec![
                Some("single"),
                None,
                None,
                Some("tab\there"),
                Some("tab\\there"),
                Some("after comment"),
            ]
        );
    }

    #[test]
    fn test_syntax_error() {
        let err = analyze_source("def broken(:\n    pass\n", Path::new("bad.py")).unwrap_err();
        match err {
            ToolError::ParseSyntax { path, line, .. } => {
                assert_eq!(path, Path::new("bad.py"));
                assert_eq!(line, 1);
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[rstest]
    #[case::default_before_required("def f(a=1, b):\n    pass\n", 1)]
    #[case::after_kwargs("def f(**k, a):\n    pass\n", 1)]
    #[case::two_stars("def f(*a, *b):\n    pass\n", 1)]
    #[case::bare_star_last("def f(a, *):\n    pass\n", 1)]
    #[case::bare_star_then_kwargs("def f(*, **k):\n    pass\n", 1)]
    #[case::slash_after_star("def f(*, a, /):\n    pass\n", 1)]
    #[case::nested_function("def outer():\n    def inner(a=1, b):\n        pass\n", 2)]
    #[case::lambda("handler = lambda a=1, b: a\n", 1)]
    #[case::print_statement("print 'x'\n", 1)]
    #[case::exec_statement("exec 'x = 1'\n", 1)]
    fn test_rejects_what_python3_rejects(#[case] source: &str, #[case] line: usize) {
        match analyze_source(source, Path::new("bad.py")) {
            Err(ToolError::ParseSyntax { line: found, .. }) => assert_eq!(found, line),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_valid_signatures() {
        let source = "def a(x, y=1, *args, z, w=2, **kw):\n    pass\n\ndef b(x=1, /, y=2, *, z):\n    pass\n\nprint('py3')\n";
        let index = analyze(source);
        assert_eq!(index.functions.len(), 2);
    }

    #[test]
    fn test_trailing_comment_does_not_extend_end_line() {
        let source = "class C:\n    def m(self):\n        pass\n    # trailing\n\n# after\n";
        let index = analyze(source);
        let c = &index.classes[0];
        assert_eq!(c.end_lineno, Some(3));
        assert_eq!(c.methods[0].end_lineno, Some(3));
    }

    #[test]
    fn test_empty_module() {
        assert_eq!(analyze(""), ModuleIndex::default());
    }

    #[test]
    fn test_clean_docstring() {
        assert_eq!(clean_docstring("  Summary.\n\n    Detail\n      more\n    "), "Summary.\n\nDetail\n  more");
        assert_eq!(clean_docstring("\n    Indented first\n    "), "Indented first");
        assert_eq!(clean_docstring(""), "");
    }

    #[test]
    fn test_helpers() {
        assert!(is_upper("MAX"));
        assert!(is_upper("HTTP_2"));
        assert!(!is_upper("_"));
        assert!(!is_upper("Max"));
        assert_eq!(unescape(r"a\nb\\c\x41\q"), "a\nb\\cA\\q");
        assert_eq!(unescape(r"\a\b\f\v"), "\x07\x08\x0c\x0b");
        assert_eq!(unescape(r"\012\0\1018"), "\n\0A8");
        assert_eq!(unescape(r"\N{BULLET} \N{NO SUCH NAME}"), "\u{2022} \\N{NO SUCH NAME}");
    }
}
