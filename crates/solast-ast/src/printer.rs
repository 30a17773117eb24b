//! Solidity source printer
//!
//! Renders the typed tree back to Solidity text. Every node kind has a
//! textual form, so rendering has no failure path.

use serde::{Deserialize, Serialize};

use crate::*;

/// Quote character used for string literals and import paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotePreference {
    #[default]
    Double,
    Single,
}

impl QuotePreference {
    pub fn as_char(self) -> char {
        match self {
            QuotePreference::Double => '"',
            QuotePreference::Single => '\'',
        }
    }
}

/// Formatting options for the printer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(alias = "quote_preference")]
    pub quote: QuotePreference,
    /// Spaces per nesting level
    pub indent_width: usize,
}

impl Default for Style {
    fn default() -> Self {
        Self { quote: QuotePreference::Double, indent_width: 4 }
    }
}

/// Trait for converting nodes to Solidity text.
pub trait ToSol {
    /// Render at nesting depth `indent`. The first line carries no
    /// indentation of its own; any further lines are indented relative to
    /// `indent`. Statement terminators are added by the enclosing container.
    fn to_sol(&self, p: &Printer, indent: usize) -> String;
}

/// Rendering context: the style plus the helpers derived from it.
#[derive(Debug, Clone)]
pub struct Printer {
    style: Style,
}

impl Printer {
    pub fn new(style: &Style) -> Self {
        Self { style: style.clone() }
    }

    fn indent_str(&self, level: usize) -> String {
        " ".repeat(self.style.indent_width * level)
    }

    /// Quote and escape a string literal. Non-ASCII characters are escaped
    /// byte-wise unless `unicode` is set.
    fn quote(&self, s: &str, unicode: bool) -> String {
        let q = self.style.quote.as_char();
        let mut result = String::with_capacity(s.len() + 2);
        result.push(q);
        for c in s.chars() {
            match c {
                '\\' => result.push_str("\\\\"),
                '\n' => result.push_str("\\n"),
                '\t' => result.push_str("\\t"),
                '\r' => result.push_str("\\r"),
                c if c == q => {
                    result.push('\\');
                    result.push(c);
                }
                c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                    result.push_str(&format!("\\x{:02x}", c as u32));
                }
                c if !c.is_ascii() && !unicode => {
                    let mut buf = [0u8; 4];
                    for byte in c.encode_utf8(&mut buf).bytes() {
                        result.push_str(&format!("\\x{:02x}", byte));
                    }
                }
                c => result.push(c),
            }
        }
        result.push(q);
        result
    }

    fn hex_literal(&self, hex: &str) -> String {
        let q = self.style.quote.as_char();
        format!("hex{q}{hex}{q}")
    }
}

/// Render any node with the given style.
pub fn render(node: NodeRef<'_>, style: &Style) -> String {
    render_ref(node, &Printer::new(style), 0)
}

/// Render a whole source unit to Solidity text.
pub fn to_solidity(unit: &SourceUnit, style: &Style) -> String {
    unit.to_sol(&Printer::new(style), 0)
}

fn render_ref(node: NodeRef<'_>, p: &Printer, indent: usize) -> String {
    match node {
        NodeRef::SourceUnit(n) => n.to_sol(p, indent),
        NodeRef::PragmaDirective(n) => n.to_sol(p, indent),
        NodeRef::ImportDirective(n) => n.to_sol(p, indent),
        NodeRef::ContractDefinition(n) => n.to_sol(p, indent),
        NodeRef::InheritanceSpecifier(n) => n.to_sol(p, indent),
        NodeRef::UsingForDirective(n) => n.to_sol(p, indent),
        NodeRef::StructDefinition(n) => n.to_sol(p, indent),
        NodeRef::EnumDefinition(n) => n.to_sol(p, indent),
        NodeRef::EnumValue(n) => n.name.clone(),
        NodeRef::UserDefinedValueTypeDefinition(n) => n.to_sol(p, indent),
        NodeRef::ParameterList(n) => n.to_sol(p, indent),
        NodeRef::OverrideSpecifier(n) => n.to_sol(p, indent),
        NodeRef::FunctionDefinition(n) => n.to_sol(p, indent),
        NodeRef::VariableDeclaration(n) => n.to_sol(p, indent),
        NodeRef::ModifierDefinition(n) => n.to_sol(p, indent),
        NodeRef::ModifierInvocation(n) => n.to_sol(p, indent),
        NodeRef::EventDefinition(n) => n.to_sol(p, indent),
        NodeRef::ErrorDefinition(n) => n.to_sol(p, indent),
        NodeRef::IdentifierPath(n) => n.name.clone(),
        NodeRef::StructuredDocumentation(n) => doc_lines(n).join("\n"),
        NodeRef::ElementaryTypeName(n) => n.to_sol(p, indent),
        NodeRef::UserDefinedTypeName(n) => n.display_name().to_string(),
        NodeRef::FunctionTypeName(n) => n.to_sol(p, indent),
        NodeRef::Mapping(n) => n.to_sol(p, indent),
        NodeRef::ArrayTypeName(n) => n.to_sol(p, indent),
        NodeRef::Block(n) => n.to_sol(p, indent),
        NodeRef::UncheckedBlock(n) => format!("unchecked {}", braced(&n.statements, p, indent, false)),
        NodeRef::PlaceholderStatement(_) => "_".to_string(),
        NodeRef::IfStatement(n) => n.to_sol(p, indent),
        NodeRef::TryCatchClause(n) => n.to_sol(p, indent),
        NodeRef::TryStatement(n) => n.to_sol(p, indent),
        NodeRef::WhileStatement(n) => {
            format!("while ({}){}", n.condition.to_sol(p, indent), body_text(&n.body, p, indent))
        }
        NodeRef::DoWhileStatement(n) => format!(
            "do{} while ({});",
            body_text(&n.body, p, indent),
            n.condition.to_sol(p, indent)
        ),
        NodeRef::ForStatement(n) => n.to_sol(p, indent),
        NodeRef::Continue(_) => "continue".to_string(),
        NodeRef::Break(_) => "break".to_string(),
        NodeRef::Return(n) => match &n.expression {
            Some(expr) => format!("return {}", expr.to_sol(p, indent)),
            None => "return".to_string(),
        },
        NodeRef::Throw(_) => "throw".to_string(),
        NodeRef::EmitStatement(n) => format!("emit {}", n.event_call.to_sol(p, indent)),
        NodeRef::RevertStatement(n) => format!("revert {}", n.error_call.to_sol(p, indent)),
        NodeRef::VariableDeclarationStatement(n) => n.to_sol(p, indent),
        NodeRef::ExpressionStatement(n) => n.expression.to_sol(p, indent),
        NodeRef::InlineAssembly(n) => n.to_sol(p, indent),
        NodeRef::Conditional(n) => format!(
            "{} ? {} : {}",
            n.condition.to_sol(p, indent),
            n.true_expression.to_sol(p, indent),
            n.false_expression.to_sol(p, indent)
        ),
        NodeRef::Assignment(n) => format!(
            "{} {} {}",
            n.left_hand_side.to_sol(p, indent),
            n.operator,
            n.right_hand_side.to_sol(p, indent)
        ),
        NodeRef::TupleExpression(n) => n.to_sol(p, indent),
        NodeRef::UnaryOperation(n) => n.to_sol(p, indent),
        NodeRef::BinaryOperation(n) => format!(
            "{} {} {}",
            n.left_expression.to_sol(p, indent),
            n.operator,
            n.right_expression.to_sol(p, indent)
        ),
        NodeRef::FunctionCall(n) => n.to_sol(p, indent),
        NodeRef::FunctionCallOptions(n) => {
            let options: Vec<String> = n
                .names
                .iter()
                .zip(&n.options)
                .map(|(name, value)| format!("{}: {}", name, value.to_sol(p, indent)))
                .collect();
            format!("{}{{{}}}", n.expression.to_sol(p, indent), options.join(", "))
        }
        NodeRef::NewExpression(n) => format!("new {}", n.type_name.to_sol(p, indent)),
        NodeRef::MemberAccess(n) => format!("{}.{}", n.expression.to_sol(p, indent), n.member_name),
        NodeRef::IndexAccess(n) => format!(
            "{}[{}]",
            n.base_expression.to_sol(p, indent),
            n.index_expression.as_ref().map(|e| e.to_sol(p, indent)).unwrap_or_default()
        ),
        NodeRef::IndexRangeAccess(n) => format!(
            "{}[{}:{}]",
            n.base_expression.to_sol(p, indent),
            n.start_expression.as_ref().map(|e| e.to_sol(p, indent)).unwrap_or_default(),
            n.end_expression.as_ref().map(|e| e.to_sol(p, indent)).unwrap_or_default()
        ),
        NodeRef::Identifier(n) => n.name.clone(),
        NodeRef::ElementaryTypeNameExpression(n) => {
            if n.type_name.is_payable_address() {
                "payable".to_string()
            } else {
                n.type_name.to_sol(p, indent)
            }
        }
        NodeRef::Literal(n) => n.to_sol(p, indent),
        NodeRef::YulBlock(n) => n.to_sol(p, indent),
        NodeRef::YulTypedName(n) => n.name.clone(),
        NodeRef::YulLiteral(n) => n.to_sol(p, indent),
        NodeRef::YulIdentifier(n) => n.name.clone(),
        NodeRef::YulBuiltinName(n) => n.name.clone(),
        NodeRef::YulAssignment(n) => {
            let names: Vec<&str> = n.variable_names.iter().map(|v| v.name.as_str()).collect();
            match &n.value {
                Some(value) => format!("{} := {}", names.join(", "), value.to_sol(p, indent)),
                None => names.join(", "),
            }
        }
        NodeRef::YulFunctionCall(n) => format!(
            "{}({})",
            n.function_name.to_sol(p, indent),
            join(&n.arguments, p, indent)
        ),
        NodeRef::YulExpressionStatement(n) => n.expression.to_sol(p, indent),
        NodeRef::YulVariableDeclaration(n) => {
            let names: Vec<&str> = n.variables.iter().map(|v| v.name.as_str()).collect();
            match &n.value {
                Some(value) => format!("let {} := {}", names.join(", "), value.to_sol(p, indent)),
                None => format!("let {}", names.join(", ")),
            }
        }
        NodeRef::YulFunctionDefinition(n) => n.to_sol(p, indent),
        NodeRef::YulIf(n) => format!("if {} {}", n.condition.to_sol(p, indent), n.body.to_sol(p, indent)),
        NodeRef::YulCase(n) => n.to_sol(p, indent),
        NodeRef::YulSwitch(n) => {
            let mut out = format!("switch {}", n.expression.to_sol(p, indent));
            for case in &n.cases {
                out.push('\n');
                out.push_str(&p.indent_str(indent));
                out.push_str(&case.to_sol(p, indent));
            }
            out
        }
        NodeRef::YulForLoop(n) => format!(
            "for {} {} {} {}",
            n.pre.to_sol(p, indent),
            n.condition.to_sol(p, indent),
            n.post.to_sol(p, indent),
            n.body.to_sol(p, indent)
        ),
        NodeRef::YulBreak(_) => "break".to_string(),
        NodeRef::YulContinue(_) => "continue".to_string(),
        NodeRef::YulLeave(_) => "leave".to_string(),
    }
}

macro_rules! delegate_to_sol {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToSol for $ty {
                fn to_sol(&self, p: &Printer, indent: usize) -> String {
                    render_ref(self.node_ref(), p, indent)
                }
            }
        )*
    };
}

delegate_to_sol!(Declaration, Statement, Expression, TypeName, YulStatement, YulExpression);

/// A node printed on its own line inside a container body.
trait LineItem: ToSol {
    fn line_comments(&self) -> Option<&Comments>;
    fn terminator(&self) -> &'static str;
}

impl LineItem for Declaration {
    fn line_comments(&self) -> Option<&Comments> {
        Slot::node(self).comments()
    }

    fn terminator(&self) -> &'static str {
        match self {
            Declaration::VariableDeclaration(_) => ";",
            _ => "",
        }
    }
}

impl LineItem for Statement {
    fn line_comments(&self) -> Option<&Comments> {
        Slot::node(self).comments()
    }

    fn terminator(&self) -> &'static str {
        if self.is_brace_delimited() {
            ""
        } else {
            ";"
        }
    }
}

impl LineItem for VariableDeclaration {
    fn line_comments(&self) -> Option<&Comments> {
        Some(&self.comments)
    }

    fn terminator(&self) -> &'static str {
        ";"
    }
}

fn render_item<T: LineItem>(item: &T, p: &Printer, indent: usize) -> String {
    let ind = p.indent_str(indent);
    let mut out = String::new();
    let comments = item.line_comments();
    for comment in comments.map(|c| c.leading.as_slice()).unwrap_or_default() {
        out.push_str(&ind);
        out.push_str(&comment.text);
        out.push('\n');
    }
    out.push_str(&ind);
    out.push_str(&item.to_sol(p, indent));
    out.push_str(item.terminator());
    for comment in comments.map(|c| c.trailing.as_slice()).unwrap_or_default() {
        out.push(' ');
        out.push_str(&comment.text);
    }
    out.push('\n');
    out
}

/// Render a body list one item per line. With `spaced`, items spanning
/// several lines are set off by blank lines.
fn render_members<T: LineItem>(items: &[T], p: &Printer, indent: usize, spaced: bool) -> String {
    let mut out = String::new();
    let mut prev_multiline = false;
    for (i, item) in items.iter().enumerate() {
        let text = render_item(item, p, indent);
        let multiline = text.matches('\n').count() > 1;
        if spaced && i > 0 && (multiline || prev_multiline) {
            out.push('\n');
        }
        out.push_str(&text);
        prev_multiline = multiline;
    }
    out
}

fn braced<T: LineItem>(items: &[T], p: &Printer, indent: usize, spaced: bool) -> String {
    if items.is_empty() {
        return "{}".to_string();
    }
    format!(
        "{{\n{}{}}}",
        render_members(items, p, indent + 1, spaced),
        p.indent_str(indent)
    )
}

/// The body of an `if` or loop, including the separating space.
fn body_text(body: &Statement, p: &Printer, indent: usize) -> String {
    format!(" {}{}", body.to_sol(p, indent), body.terminator())
}

fn join<T: ToSol>(items: &[T], p: &Printer, indent: usize) -> String {
    items.iter().map(|item| item.to_sol(p, indent)).collect::<Vec<_>>().join(", ")
}

fn doc_lines(doc: &StructuredDocumentation) -> Vec<String> {
    doc.text
        .lines()
        .map(|line| match line.trim() {
            "" => "///".to_string(),
            text => format!("/// {}", text),
        })
        .collect()
}

/// NatSpec lines followed by the indentation of the declaration they precede.
fn doc_prefix(doc: &Option<StructuredDocumentation>, p: &Printer, indent: usize) -> String {
    let Some(doc) = doc else {
        return String::new();
    };
    let ind = p.indent_str(indent);
    doc_lines(doc)
        .into_iter()
        .map(|line| format!("{}\n{}", line, ind))
        .collect()
}

/// Join space-separated words, skipping empty ones.
fn words(parts: &[&str]) -> String {
    parts.iter().filter(|w| !w.is_empty()).copied().collect::<Vec<_>>().join(" ")
}

// ===== Declarations =====

impl ToSol for SourceUnit {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        render_members(&self.nodes, p, indent, true)
    }
}

impl ToSol for PragmaDirective {
    fn to_sol(&self, _p: &Printer, _indent: usize) -> String {
        let mut literals = self.literals.iter();
        let Some(first) = literals.next() else {
            return "pragma;".to_string();
        };
        let is_operator = |c: char| matches!(c, '<' | '>' | '=' | '^' | '~' | '|');
        let mut rest = String::new();
        for literal in literals {
            let starts_op = literal.starts_with(is_operator);
            let after_op = rest.ends_with(is_operator);
            if starts_op && !rest.is_empty() && !after_op {
                rest.push(' ');
            }
            rest.push_str(literal);
        }
        if rest.is_empty() {
            format!("pragma {};", first)
        } else {
            format!("pragma {} {};", first, rest)
        }
    }
}

impl ToSol for ImportDirective {
    fn to_sol(&self, p: &Printer, _indent: usize) -> String {
        let file = p.quote(&self.file, true);
        if !self.symbol_aliases.is_empty() {
            let aliases: Vec<String> = self
                .symbol_aliases
                .iter()
                .map(|alias| match &alias.local {
                    Some(local) if *local != alias.foreign.name => format!("{} as {}", alias.foreign.name, local),
                    _ => alias.foreign.name.clone(),
                })
                .collect();
            format!("import {{{}}} from {};", aliases.join(", "), file)
        } else if !self.unit_alias.is_empty() {
            format!("import {} as {};", file, self.unit_alias)
        } else {
            format!("import {};", file)
        }
    }
}

impl ToSol for ContractDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let mut out = doc_prefix(&self.documentation, p, indent);
        if self.r#abstract {
            out.push_str("abstract ");
        }
        out.push_str(self.contract_kind.as_str());
        out.push(' ');
        out.push_str(&self.name);
        if !self.base_contracts.is_empty() {
            out.push_str(" is ");
            out.push_str(&join_nodes(&self.base_contracts, p, indent));
        }
        out.push(' ');
        out.push_str(&braced(&self.nodes, p, indent, true));
        out
    }
}

fn join_nodes<T: AstNode>(items: &[T], p: &Printer, indent: usize) -> String {
    items
        .iter()
        .map(|item| render_ref(item.node_ref(), p, indent))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ToSol for InheritanceSpecifier {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        match &self.arguments {
            Some(args) => format!("{}({})", self.base_name.name, join(args, p, indent)),
            None => self.base_name.name.clone(),
        }
    }
}

impl ToSol for UsingForDirective {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let library = match (&self.library_name, &self.function_list) {
            (Some(library), _) => library.name.clone(),
            (None, Some(functions)) => {
                let entries: Vec<String> = functions
                    .iter()
                    .filter_map(|entry| {
                        let path = entry.function.as_ref().or(entry.definition.as_ref())?;
                        Some(match &entry.operator {
                            Some(op) => format!("{} as {}", path.name, op),
                            None => path.name.clone(),
                        })
                    })
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            (None, None) => String::new(),
        };
        let target = match &self.type_name {
            Some(type_name) => type_name.to_sol(p, indent),
            None => "*".to_string(),
        };
        let global = if self.global { " global" } else { "" };
        format!("using {} for {}{};", library, target, global)
    }
}

impl ToSol for StructDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        format!(
            "{}struct {} {}",
            doc_prefix(&self.documentation, p, indent),
            self.name,
            braced(&self.members, p, indent, false)
        )
    }
}

impl ToSol for EnumDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let doc = doc_prefix(&self.documentation, p, indent);
        if self.members.is_empty() {
            return format!("{}enum {} {{}}", doc, self.name);
        }
        let inner = p.indent_str(indent + 1);
        let members: Vec<String> = self.members.iter().map(|m| format!("{}{}", inner, m.name)).collect();
        format!(
            "{}enum {} {{\n{}\n{}}}",
            doc,
            self.name,
            members.join(",\n"),
            p.indent_str(indent)
        )
    }
}

impl ToSol for UserDefinedValueTypeDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        format!("type {} is {};", self.name, self.underlying_type.to_sol(p, indent))
    }
}

impl ToSol for ParameterList {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        join_nodes(&self.parameters, p, indent)
    }
}

impl ToSol for OverrideSpecifier {
    fn to_sol(&self, _p: &Printer, _indent: usize) -> String {
        if self.overrides.is_empty() {
            "override".to_string()
        } else {
            let names: Vec<&str> = self.overrides.iter().map(|o| o.name.as_str()).collect();
            format!("override({})", names.join(", "))
        }
    }
}

impl ToSol for FunctionDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let head = match self.kind {
            FunctionKind::Constructor => "constructor".to_string(),
            FunctionKind::Receive => "receive".to_string(),
            FunctionKind::Fallback => "fallback".to_string(),
            FunctionKind::Function | FunctionKind::FreeFunction => format!("function {}", self.name),
        };
        let visibility = match self.kind {
            FunctionKind::Constructor | FunctionKind::FreeFunction => "",
            _ => self.visibility.as_str(),
        };
        let mutability = match self.state_mutability {
            StateMutability::NonPayable => "",
            other => other.as_str(),
        };
        let overrides = self.overrides.as_ref().map(|o| o.to_sol(p, indent)).unwrap_or_default();
        let modifiers: Vec<String> = self.modifiers.iter().map(|m| m.to_sol(p, indent)).collect();
        let returns = if self.return_parameters.is_empty() {
            String::new()
        } else {
            format!("returns ({})", self.return_parameters.to_sol(p, indent))
        };

        let mut attrs = vec![visibility, mutability];
        if self.r#virtual {
            attrs.push("virtual");
        }
        attrs.push(&overrides);
        attrs.extend(modifiers.iter().map(String::as_str));
        attrs.push(&returns);

        let signature = format!("{}({})", head, self.parameters.to_sol(p, indent));
        let header = words(&[signature.as_str(), words(&attrs).as_str()]);
        let body = match &self.body {
            Some(body) => format!(" {}", body.to_sol(p, indent)),
            None => ";".to_string(),
        };
        format!("{}{}{}", doc_prefix(&self.documentation, p, indent), header, body)
    }
}

impl ToSol for VariableDeclaration {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let type_text = match &self.type_name {
            Some(type_name) => type_name.to_sol(p, indent),
            None => "var".to_string(),
        };
        let visibility = match self.visibility {
            Visibility::Internal => "",
            other => other.as_str(),
        };
        let mutability = match self.mutability {
            Mutability::Constant => "constant",
            Mutability::Immutable => "immutable",
            Mutability::Mutable if self.constant => "constant",
            Mutability::Mutable => "",
        };
        let overrides = self.overrides.as_ref().map(|o| o.to_sol(p, indent)).unwrap_or_default();
        let indexed = if self.indexed == Some(true) { "indexed" } else { "" };
        let location = match self.storage_location {
            StorageLocation::Default => "",
            other => other.as_str(),
        };

        let decl = words(&[
            type_text.as_str(),
            visibility,
            mutability,
            overrides.as_str(),
            indexed,
            location,
            self.name.as_str(),
        ]);
        let doc = doc_prefix(&self.documentation, p, indent);
        match &self.value {
            Some(value) => format!("{}{} = {}", doc, decl, value.to_sol(p, indent)),
            None => format!("{}{}", doc, decl),
        }
    }
}

impl ToSol for ModifierDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let overrides = self.overrides.as_ref().map(|o| o.to_sol(p, indent)).unwrap_or_default();
        let signature = format!("modifier {}({})", self.name, self.parameters.to_sol(p, indent));
        let header = words(&[signature.as_str(), if self.r#virtual { "virtual" } else { "" }, overrides.as_str()]);
        let body = match &self.body {
            Some(body) => format!(" {}", body.to_sol(p, indent)),
            None => ";".to_string(),
        };
        format!("{}{}{}", doc_prefix(&self.documentation, p, indent), header, body)
    }
}

impl ToSol for ModifierInvocation {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        match &self.arguments {
            Some(args) => format!("{}({})", self.modifier_name.name, join(args, p, indent)),
            None => self.modifier_name.name.clone(),
        }
    }
}

impl ToSol for EventDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        format!(
            "{}event {}({}){};",
            doc_prefix(&self.documentation, p, indent),
            self.name,
            self.parameters.to_sol(p, indent),
            if self.anonymous { " anonymous" } else { "" }
        )
    }
}

impl ToSol for ErrorDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        format!(
            "{}error {}({});",
            doc_prefix(&self.documentation, p, indent),
            self.name,
            self.parameters.to_sol(p, indent)
        )
    }
}

// ===== Type names =====

impl ToSol for ElementaryTypeName {
    fn to_sol(&self, _p: &Printer, _indent: usize) -> String {
        if self.is_payable_address() {
            "address payable".to_string()
        } else {
            self.name.clone()
        }
    }
}

impl ToSol for FunctionTypeName {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let visibility = match self.visibility {
            Visibility::Internal => "",
            other => other.as_str(),
        };
        let mutability = match self.state_mutability {
            StateMutability::NonPayable => "",
            other => other.as_str(),
        };
        let returns = if self.return_parameter_types.is_empty() {
            String::new()
        } else {
            format!("returns ({})", self.return_parameter_types.to_sol(p, indent))
        };
        let signature = format!("function({})", self.parameter_types.to_sol(p, indent));
        words(&[signature.as_str(), visibility, mutability, returns.as_str()])
    }
}

impl ToSol for Mapping {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let key = words(&[self.key_type.to_sol(p, indent).as_str(), self.key_name.as_deref().unwrap_or("")]);
        let value = words(&[self.value_type.to_sol(p, indent).as_str(), self.value_name.as_deref().unwrap_or("")]);
        format!("mapping({} => {})", key, value)
    }
}

impl ToSol for ArrayTypeName {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let length = self.length.as_ref().map(|l| l.to_sol(p, indent)).unwrap_or_default();
        format!("{}[{}]", self.base_type.to_sol(p, indent), length)
    }
}

// ===== Statements =====

impl ToSol for Block {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        braced(&self.statements, p, indent, false)
    }
}

impl ToSol for IfStatement {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let mut out = format!(
            "if ({}){}",
            self.condition.to_sol(p, indent),
            body_text(&self.true_body, p, indent)
        );
        match &self.false_body {
            Some(Statement::IfStatement(chained)) => {
                out.push_str(" else ");
                out.push_str(&chained.to_sol(p, indent));
            }
            Some(other) => {
                out.push_str(" else");
                out.push_str(&body_text(other, p, indent));
            }
            None => {}
        }
        out
    }
}

impl ToSol for TryStatement {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let mut out = format!("try {}", self.external_call.to_sol(p, indent));
        let mut clauses = self.clauses.iter();
        if let Some(success) = clauses.next() {
            if let Some(params) = success.parameters.as_ref().filter(|params| !params.is_empty()) {
                out.push_str(&format!(" returns ({})", params.to_sol(p, indent)));
            }
            out.push(' ');
            out.push_str(&success.block.to_sol(p, indent));
        }
        for clause in clauses {
            out.push(' ');
            out.push_str(&clause.to_sol(p, indent));
        }
        out
    }
}

impl ToSol for TryCatchClause {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let params = match &self.parameters {
            Some(params) => format!("({})", params.to_sol(p, indent)),
            None => String::new(),
        };
        let head = words(&["catch", format!("{}{}", self.error_name, params).as_str()]);
        format!("{} {}", head, self.block.to_sol(p, indent))
    }
}

impl ToSol for ForStatement {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let init = self
            .initialization_expression
            .as_ref()
            .map(|s| s.to_sol(p, indent))
            .unwrap_or_default();
        let condition = self.condition.as_ref().map(|c| c.to_sol(p, indent)).unwrap_or_default();
        let step = self
            .loop_expression
            .as_ref()
            .map(|s| s.expression.to_sol(p, indent))
            .unwrap_or_default();
        format!(
            "for ({}; {}; {}){}",
            init,
            condition,
            step,
            body_text(&self.body, p, indent)
        )
    }
}

impl ToSol for VariableDeclarationStatement {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let decls = match self.declarations.as_slice() {
            [Some(single)] => single.to_sol(p, indent),
            many => {
                let parts: Vec<String> = many
                    .iter()
                    .map(|d| d.as_ref().map(|d| d.to_sol(p, indent)).unwrap_or_default())
                    .collect();
                format!("({})", parts.join(", "))
            }
        };
        match &self.initial_value {
            Some(value) => format!("{} = {}", decls, value.to_sol(p, indent)),
            None => decls,
        }
    }
}

impl ToSol for InlineAssembly {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let flags = match &self.flags {
            Some(flags) if !flags.is_empty() => {
                let quoted: Vec<String> = flags.iter().map(|f| p.quote(f, false)).collect();
                format!("({}) ", quoted.join(", "))
            }
            _ => String::new(),
        };
        format!("assembly {}{}", flags, self.ast.to_sol(p, indent))
    }
}

// ===== Expressions =====

impl ToSol for TupleExpression {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let parts: Vec<String> = self
            .components
            .iter()
            .map(|c| c.as_ref().map(|c| c.to_sol(p, indent)).unwrap_or_default())
            .collect();
        if self.is_inline_array {
            format!("[{}]", parts.join(", "))
        } else {
            format!("({})", parts.join(", "))
        }
    }
}

impl ToSol for UnaryOperation {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let operand = self.sub_expression.to_sol(p, indent);
        if !self.prefix {
            format!("{}{}", operand, self.operator)
        } else if self.operator.chars().all(|c| c.is_ascii_alphabetic()) {
            format!("{} {}", self.operator, operand)
        } else {
            format!("{}{}", self.operator, operand)
        }
    }
}

impl ToSol for FunctionCall {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let callee = self.expression.to_sol(p, indent);
        if self.names.is_empty() {
            format!("{}({})", callee, join(&self.arguments, p, indent))
        } else {
            let named: Vec<String> = self
                .names
                .iter()
                .zip(&self.arguments)
                .map(|(name, arg)| format!("{}: {}", name, arg.to_sol(p, indent)))
                .collect();
            format!("{}({{{}}})", callee, named.join(", "))
        }
    }
}

impl ToSol for Literal {
    fn to_sol(&self, p: &Printer, _indent: usize) -> String {
        let value = self.value.as_deref().unwrap_or_default();
        match self.kind {
            LiteralKind::Number => match &self.subdenomination {
                Some(unit) => format!("{} {}", value, unit),
                None => value.to_string(),
            },
            LiteralKind::Bool => value.to_string(),
            LiteralKind::HexString => p.hex_literal(self.hex_value.as_deref().unwrap_or_default()),
            LiteralKind::String => match (&self.value, &self.hex_value) {
                (None, Some(hex)) => p.hex_literal(hex),
                _ => p.quote(value, false),
            },
            LiteralKind::UnicodeString => format!("unicode{}", p.quote(value, true)),
        }
    }
}

// ===== Inline assembly =====

impl ToSol for YulBlock {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        if self.statements.is_empty() {
            return "{ }".to_string();
        }
        let inner = p.indent_str(indent + 1);
        let mut out = String::from("{\n");
        for stmt in &self.statements {
            out.push_str(&inner);
            out.push_str(&stmt.to_sol(p, indent + 1));
            out.push('\n');
        }
        out.push_str(&p.indent_str(indent));
        out.push('}');
        out
    }
}

impl ToSol for YulLiteral {
    fn to_sol(&self, p: &Printer, _indent: usize) -> String {
        match (&self.value, &self.hex_value) {
            (Some(value), _) if self.kind == "string" => p.quote(value, false),
            (Some(value), _) => value.clone(),
            (None, Some(hex)) => p.hex_literal(hex),
            (None, None) => String::new(),
        }
    }
}

impl ToSol for YulFunctionDefinition {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        let params: Vec<&str> = self.parameters.iter().map(|v| v.name.as_str()).collect();
        let mut out = format!("function {}({})", self.name, params.join(", "));
        if !self.return_variables.is_empty() {
            let returns: Vec<&str> = self.return_variables.iter().map(|v| v.name.as_str()).collect();
            out.push_str(&format!(" -> {}", returns.join(", ")));
        }
        out.push(' ');
        out.push_str(&self.body.to_sol(p, indent));
        out
    }
}

impl ToSol for YulCase {
    fn to_sol(&self, p: &Printer, indent: usize) -> String {
        match &self.value {
            YulCaseValue::Literal(literal) => {
                format!("case {} {}", literal.to_sol(p, indent), self.body.to_sol(p, indent))
            }
            YulCaseValue::Default(_) => format!("default {}", self.body.to_sol(p, indent)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::*;
    use crate::testing::sample_unit;
    use indoc::indoc;

    #[test]
    fn test_render_sample_unit() {
        let text = to_solidity(&sample_unit(), &Style::default());
        assert_eq!(
            text,
            indoc! {"
                contract Counter {
                    uint256 total;

                    function bump() public {
                        total = 1;
                    }
                }
            "}
        );
    }

    #[test]
    fn test_indent_width_is_respected() {
        let style = Style { indent_width: 2, ..Style::default() };
        let text = to_solidity(&sample_unit(), &style);
        assert!(text.contains("\n  uint256 total;\n"));
        assert!(text.contains("\n    total = 1;\n"));
    }

    #[test]
    fn test_quote_preference() {
        let mut ids = IdGen::starting_at(1);
        let lit = literal(&mut ids, LiteralKind::String, "it's \"here\"");
        let double = render(lit.node_ref(), &Style::default());
        assert_eq!(double, r#""it's \"here\"""#);

        let single = Style { quote: QuotePreference::Single, ..Style::default() };
        assert_eq!(render(lit.node_ref(), &single), r#"'it\'s "here"'"#);
    }

    #[test]
    fn test_style_deserializes_with_defaults() {
        let style: Style = serde_json::from_str(r#"{"quote_preference": "single"}"#).unwrap();
        assert_eq!(style.quote, QuotePreference::Single);
        assert_eq!(style.indent_width, 4);
    }

    #[test]
    fn test_leading_and_trailing_comments() {
        let mut unit = sample_unit();
        let Declaration::ContractDefinition(contract) = &mut unit.nodes[0] else {
            panic!("expected contract");
        };
        let Declaration::VariableDeclaration(total) = &mut contract.nodes[0] else {
            panic!("expected variable");
        };
        total.comments.leading.push(Comment {
            src: SourceRange::new(0, 8, 0),
            text: "// hello".to_string(),
            style: CommentStyle::Line,
            placement: Placement::Standalone,
        });
        total.comments.trailing.push(Comment {
            src: SourceRange::new(30, 6, 0),
            text: "/* x */".to_string(),
            style: CommentStyle::Block,
            placement: Placement::Trailing,
        });
        let text = to_solidity(&unit, &Style::default());
        assert!(text.contains("    // hello\n    uint256 total; /* x */\n"));
    }

    #[test]
    fn test_address_payable_positions() {
        let mut ids = IdGen::starting_at(1);
        let TypeName::ElementaryTypeName(mut addr) = elementary_type(&mut ids, "address") else {
            panic!("expected elementary type");
        };
        addr.state_mutability = Some(StateMutability::Payable);
        let decl = variable(&mut ids, "to", TypeName::ElementaryTypeName(addr.clone()));
        assert_eq!(render(decl.node_ref(), &Style::default()), "address payable to");

        let conversion = Expression::from(ElementaryTypeNameExpression {
            id: ids.fresh(),
            src: SourceRange::synthetic(),
            type_name: *addr,
            annotations: ExprAnnotations::default(),
        });
        let arg = identifier(&mut ids, "owner");
        let converted = Expression::from(call(&mut ids, conversion, vec![arg]));
        assert_eq!(render(converted.node_ref(), &Style::default()), "payable(owner)");
    }

    #[test]
    fn test_pragma_literals_are_joined() {
        let mut ids = IdGen::starting_at(1);
        let caret = pragma(&mut ids, &["solidity", "^", "0.8", ".0"]);
        assert_eq!(render(caret.node_ref(), &Style::default()), "pragma solidity ^0.8.0;");

        let range = pragma(&mut ids, &["solidity", ">=", "0.8", ".0", "<", "0.9", ".0"]);
        assert_eq!(render(range.node_ref(), &Style::default()), "pragma solidity >=0.8.0 <0.9.0;");
    }

    #[test]
    fn test_named_arguments_and_else_if() {
        let mut ids = IdGen::starting_at(1);
        let callee = identifier(&mut ids, "f");
        let a = number(&mut ids, "1");
        let mut named = call(&mut ids, callee, vec![a]);
        named.names = vec!["a".to_string()];
        assert_eq!(render(named.node_ref(), &Style::default()), "f({a: 1})");

        let x = identifier(&mut ids, "x");
        let y = identifier(&mut ids, "y");
        let inner_ret = return_statement(&mut ids, None);
        let inner = IfStatement {
            id: ids.fresh(),
            src: SourceRange::synthetic(),
            condition: y,
            true_body: inner_ret,
            false_body: None,
            comments: Comments::default(),
        };
        let outer_body = block(&mut ids, Vec::new());
        let outer = IfStatement {
            id: ids.fresh(),
            src: SourceRange::synthetic(),
            condition: x,
            true_body: outer_body.into(),
            false_body: Some(inner.into()),
            comments: Comments::default(),
        };
        assert_eq!(render(outer.node_ref(), &Style::default()), "if (x) {} else if (y) return;");
    }

    #[test]
    fn test_documentation_renders_as_natspec() {
        let mut ids = IdGen::starting_at(1);
        let body = block(&mut ids, Vec::new());
        let mut f = function(&mut ids, "run", Vec::new(), Some(body), None);
        f.visibility = Visibility::External;
        f.documentation = Some(StructuredDocumentation {
            id: ids.fresh(),
            src: SourceRange::synthetic(),
            text: "@notice Runs it\n@dev twice".to_string(),
        });
        let c = contract(&mut ids, "Job", vec![f.into()]);
        let text = render(c.node_ref(), &Style::default());
        assert_eq!(
            text,
            indoc! {"
                contract Job {
                    /// @notice Runs it
                    /// @dev twice
                    function run() external {}
                }"}
        );
    }

    #[test]
    fn test_yul_rendering() {
        let block = YulBlock {
            id: None,
            src: SourceRange::synthetic(),
            native_src: None,
            statements: vec![YulStatement::from(YulVariableDeclaration {
                id: None,
                src: SourceRange::synthetic(),
                native_src: None,
                variables: vec![YulTypedName {
                    id: None,
                    src: SourceRange::synthetic(),
                    native_src: None,
                    name: "x".to_string(),
                    r#type: String::new(),
                }],
                value: Some(YulExpression::from(YulFunctionCall {
                    id: None,
                    src: SourceRange::synthetic(),
                    native_src: None,
                    function_name: YulExpression::from(YulIdentifier {
                        id: None,
                        src: SourceRange::synthetic(),
                        native_src: None,
                        name: "sload".to_string(),
                    }),
                    arguments: vec![YulExpression::from(YulLiteral {
                        id: None,
                        src: SourceRange::synthetic(),
                        native_src: None,
                        kind: "number".to_string(),
                        value: Some("0".to_string()),
                        hex_value: None,
                        r#type: String::new(),
                    })],
                })),
            })],
        };
        assert_eq!(render(block.node_ref(), &Style::default()), "{\n    let x := sload(0)\n}");
    }
}
