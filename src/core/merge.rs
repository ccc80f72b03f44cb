//! Concatenation merger.
//!
//! Turns the literal tokens of one file into final templated strings. Every
//! interpolated, non-literal segment becomes a single [`PLACEHOLDER`].
//!
//! Three shapes are recognized, in precedence order:
//!
//! 1. `String.format(...)` / `MessageFormat.format(...)`: the first argument is
//!    the template and is kept as written, its own `{0}`/`%s` markers included.
//! 2. `append(...)` chains on a builder, including `new StringBuilder(...)` and
//!    `new StringBuffer(...)` receivers.
//! 3. Binary `+` chains, across any number of lines.
//!
//! A literal owned by a format call is never folded into an enclosing chain;
//! the call shows up there as one placeholder. Merging stops at `;`, `{` and
//! `}` and never reaches into a call's argument list.

use super::lexer::{Token, TokenKind};

pub const PLACEHOLDER: &str = "{}";

const FORMAT_RECEIVERS: &[&str] = &["String", "MessageFormat"];
const BUILDER_TYPES: &[&str] = &["StringBuilder", "StringBuffer"];

/// Operators that end an operand of a `+` chain at nesting depth 0.
const OPERAND_STOPS: &[&str] = &[
    "+", ",", "?", ":", "=", "==", "!=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=",
    ">>=", ">>>=", "&&", "||", "->",
];

/// Which shape produced a merged literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// A lone literal passed through unchanged.
    Plain,
    Format,
    Builder,
    Concat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLiteral {
    pub value: String,
    /// Line of the first contributing literal.
    pub line: usize,
    /// Token index of the first contributing literal.
    pub token: usize,
    pub rule: MergeRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Placeholder,
}

#[derive(Debug, Clone, Default)]
struct Template {
    parts: Vec<Part>,
    /// Token indices of the string literals in this template.
    literals: Vec<usize>,
}

impl Template {
    fn push_literal(&mut self, token: usize, value: &str) {
        self.parts.push(Part::Text(value.to_string()));
        self.literals.push(token);
    }

    fn push_text(&mut self, text: &str) {
        self.parts.push(Part::Text(text.to_string()));
    }

    fn push_placeholder(&mut self) {
        self.parts.push(Part::Placeholder);
    }

    /// Fold one builder argument into the chain.
    ///
    /// Arguments carrying text are spliced in; any other argument becomes a
    /// single placeholder however many operands it has.
    fn push_argument(&mut self, argument: Template) {
        let all_text = argument.parts.iter().all(|p| matches!(p, Part::Text(_)));
        if !argument.literals.is_empty() || (all_text && !argument.parts.is_empty()) {
            self.parts.extend(argument.parts);
            self.literals.extend(argument.literals);
        } else if !argument.parts.is_empty() {
            self.push_placeholder();
        }
    }

    fn contains(&self, token: usize) -> bool {
        self.literals.contains(&token)
    }

    fn is_single_literal(&self) -> bool {
        self.parts.len() == 1 && self.literals.len() == 1
    }

    /// Render the template. Whitespace right after a placeholder is dropped.
    fn render(&self) -> String {
        let mut out = String::new();
        let mut after_placeholder = false;
        for part in &self.parts {
            match part {
                Part::Text(text) if after_placeholder => out.push_str(text.trim_start()),
                Part::Text(text) => out.push_str(text),
                Part::Placeholder => out.push_str(PLACEHOLDER),
            }
            after_placeholder = matches!(part, Part::Placeholder);
        }
        out
    }
}

#[derive(Debug)]
enum Operand {
    Literal(usize),
    Char(String),
    Opaque,
    Empty,
}

struct Merger<'a> {
    tokens: &'a [Token],
    /// Literal tokens already merged and `.append` dots already chained.
    consumed: Vec<bool>,
    out: Vec<MergedLiteral>,
}

/// Merge the literal tokens of one file into templated strings.
///
/// Results are ordered by the position of their first literal.
pub fn merge_literals(tokens: &[Token]) -> Vec<MergedLiteral> {
    let mut merger = Merger {
        tokens,
        consumed: vec![false; tokens.len()],
        out: Vec::new(),
    };

    for idx in 0..tokens.len() {
        if merger.consumed[idx] {
            continue;
        }
        if merger.is_format_call(idx) {
            merger.merge_format(idx);
        } else if merger.is_builder_start(idx) {
            merger.merge_builder(idx);
        } else if tokens[idx].string_value().is_some() {
            merger.merge_concat(idx);
        }
    }

    let mut out = merger.out;
    out.sort_by_key(|m| m.token);
    out
}

impl Merger<'_> {
    fn punct_at(&self, idx: usize, p: &str) -> bool {
        self.tokens.get(idx).is_some_and(|t| t.is_punct(p))
    }

    fn ident_in(&self, idx: usize, names: &[&str]) -> bool {
        matches!(self.tokens.get(idx).map(|t| &t.kind), Some(TokenKind::Ident(n)) if names.contains(&n.as_str()))
    }

    fn is_format_call(&self, idx: usize) -> bool {
        self.ident_in(idx, FORMAT_RECEIVERS)
            && self.punct_at(idx + 1, ".")
            && self.ident_in(idx + 2, &["format"])
            && self.punct_at(idx + 3, "(")
    }

    fn is_append_call(&self, idx: usize) -> bool {
        self.punct_at(idx, ".") && self.ident_in(idx + 1, &["append"]) && self.punct_at(idx + 2, "(")
    }

    fn is_builder_start(&self, idx: usize) -> bool {
        let constructed = self.ident_in(idx, &["new"])
            && self.ident_in(idx + 1, BUILDER_TYPES)
            && self.punct_at(idx + 2, "(");
        constructed || self.is_append_call(idx)
    }

    fn commit(&mut self, template: Template, rule: MergeRule) {
        let Some(&first) = template.literals.iter().min() else {
            return;
        };
        for &token in &template.literals {
            self.consumed[token] = true;
        }
        let rule = if rule == MergeRule::Concat && template.is_single_literal() {
            MergeRule::Plain
        } else {
            rule
        };
        self.out.push(MergedLiteral {
            value: template.render(),
            line: self.tokens[first].line,
            token: first,
            rule,
        });
    }

    // ============================================================
    // Rule 1: format methods
    // ============================================================

    fn merge_format(&mut self, idx: usize) {
        let arg_start = idx + 4;
        let (mut template, next) = self.parse_concat(arg_start);

        // String.format(Locale.X, "template", ...)
        if template.literals.is_empty()
            && self.ident_in(arg_start, &["Locale"])
            && self.punct_at(next, ",")
        {
            template = self.parse_concat(next + 1).0;
        }

        self.commit(template, MergeRule::Format);
    }

    // ============================================================
    // Rule 2: builder chains
    // ============================================================

    fn merge_builder(&mut self, idx: usize) {
        let mut template = Template::default();
        let mut pos = idx;

        if self.ident_in(idx, &["new"]) {
            let arg_start = idx + 3;
            if self.punct_at(arg_start, ")") {
                pos = arg_start + 1;
            } else {
                let (argument, next) = self.parse_concat(arg_start);
                if !self.punct_at(next, ")") {
                    return;
                }
                let is_capacity = next == arg_start + 1
                    && matches!(self.tokens[arg_start].kind, TokenKind::Number);
                if !is_capacity {
                    template.push_argument(argument);
                }
                pos = next + 1;
            }
        }

        while self.is_append_call(pos) {
            let (argument, next) = self.parse_concat(pos + 3);
            if !self.punct_at(next, ")") {
                break;
            }
            self.consumed[pos] = true;
            template.push_argument(argument);
            pos = next + 1;
        }

        self.commit(template, MergeRule::Builder);
    }

    // ============================================================
    // Rule 3: `+` chains
    // ============================================================

    fn merge_concat(&mut self, idx: usize) {
        let start = self.chain_start(idx);
        for candidate in [start, idx] {
            let (template, _) = self.parse_concat(candidate);
            if template.contains(idx) {
                self.commit(template, MergeRule::Concat);
                return;
            }
        }

        let mut template = Template::default();
        if let Some(value) = self.tokens[idx].string_value() {
            template.push_literal(idx, value);
        }
        self.commit(template, MergeRule::Plain);
    }

    /// Walk left over `operand +` pairs to find where the chain around the
    /// literal at `idx` begins.
    fn chain_start(&self, idx: usize) -> usize {
        let mut start = idx;
        while start > 0 && self.punct_at(start - 1, "+") {
            match self.operand_start_before(start - 1) {
                Some(operand_start) => start = operand_start,
                None => break,
            }
        }
        start
    }

    /// Start of the operand ending right before the `+` at `plus`.
    fn operand_start_before(&self, plus: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut pos = plus;

        while pos > 0 {
            let token = &self.tokens[pos - 1];
            match &token.kind {
                TokenKind::Punct(")" | "]") => depth += 1,
                TokenKind::Punct("(" | "[") => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Punct("{" | "}" | ";") => break,
                _ if depth > 0 => {}
                TokenKind::Ident(_)
                | TokenKind::Number
                | TokenKind::StringLit(_)
                | TokenKind::CharLit(_)
                | TokenKind::Punct(".") => {}
                _ => break,
            }
            pos -= 1;
        }

        (pos < plus).then_some(pos)
    }

    /// Parse `operand (+ operand)*` starting at `start`.
    ///
    /// Returns the template and the index of the first token after the chain.
    fn parse_concat(&self, start: usize) -> (Template, usize) {
        let mut template = Template::default();
        let mut pos = start;

        loop {
            let (operand, next) = self.parse_operand(pos);
            match operand {
                Operand::Literal(token) => {
                    let value = self.tokens[token].string_value().unwrap_or_default();
                    template.push_literal(token, value);
                }
                Operand::Char(text) => template.push_text(&text),
                Operand::Opaque => template.push_placeholder(),
                Operand::Empty => break,
            }
            pos = next;

            if self.punct_at(pos, "+") {
                pos += 1;
            } else {
                break;
            }
        }

        (template, pos)
    }

    fn parse_operand(&self, start: usize) -> (Operand, usize) {
        let Some(first) = self.tokens.get(start) else {
            return (Operand::Empty, start);
        };

        // "literal".method(...) contributes the literal alone.
        if first.string_value().is_some() && self.punct_at(start + 1, ".") {
            return (Operand::Literal(start), start + 1);
        }

        let mut depth = 0usize;
        let mut pos = start;
        while let Some(token) = self.tokens.get(pos) {
            match &token.kind {
                TokenKind::Punct("(" | "[") => depth += 1,
                TokenKind::Punct(")" | "]") => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Punct("{" | "}" | ";") => break,
                TokenKind::Punct(p) if depth == 0 && OPERAND_STOPS.contains(p) => break,
                _ => {}
            }
            pos += 1;
        }

        let operand = match pos - start {
            0 => Operand::Empty,
            1 => match &first.kind {
                TokenKind::StringLit(_) => Operand::Literal(start),
                TokenKind::CharLit(c) => Operand::Char(c.clone()),
                _ => Operand::Opaque,
            },
            _ => Operand::Opaque,
        };
        (operand, pos)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::lexer::{classify_regions, tokenize},
        utils::build_line_index,
    };

    fn merge(source: &str) -> Vec<MergedLiteral> {
        let regions = classify_regions(source);
        let tokens = tokenize(source, &regions.regions, &build_line_index(source));
        merge_literals(&tokens)
    }

    fn values(source: &str) -> Vec<String> {
        merge(source).into_iter().map(|m| m.value).collect()
    }

    #[test]
    fn test_concat_across_lines() {
        let source = r#"
String msg = "处理开始: "
        + processId
        + " 状态更新";
"#;
        let merged = merge(source);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].value, "处理开始: {}状态更新");
        assert_eq!(merged[0].line, 2);
        assert_eq!(merged[0].rule, MergeRule::Concat);
    }

    #[test]
    fn test_leading_operand() {
        assert_eq!(
            values(r#"log.info(userId + " 已创建");"#),
            vec!["{}已创建"]
        );
    }

    #[test]
    fn test_adjacent_literals_join_without_placeholder() {
        assert_eq!(values(r#"s = "你" + "好" + name;"#), vec!["你好{}"]);
    }

    #[test]
    fn test_each_operand_is_one_placeholder() {
        assert_eq!(
            values(r#"s = "共" + list.size() + "条, 耗时" + (end - start) + "毫秒";"#),
            vec!["共{}条, 耗时{}毫秒"]
        );
    }

    #[test]
    fn test_lone_literal_passes_through() {
        let merged = merge(r#"throw new IllegalStateException("  权限验证失败 ");"#);
        assert_eq!(merged[0].value, "  权限验证失败 ");
        assert_eq!(merged[0].rule, MergeRule::Plain);
    }

    #[test]
    fn test_statement_boundaries() {
        assert_eq!(
            values(r#"a = "一"; b = "二" + c; { d("三"); }"#),
            vec!["一", "二{}", "三"]
        );
    }

    #[test]
    fn test_call_argument_literal_stays_separate() {
        assert_eq!(
            values(r#"throw new BizException("错误: " + getMessage("未知"));"#),
            vec!["错误: {}", "未知"]
        );
    }

    #[test]
    fn test_ternary_branches() {
        assert_eq!(
            values(r#"label = "结果: " + (ok ? "成功" : "失败");"#),
            vec!["结果: {}", "成功", "失败"]
        );
    }

    #[test]
    fn test_literal_receiver() {
        assert_eq!(
            values(r#"if ("确定".equals(action) || x) { y = "取消".trim() + "键"; }"#),
            vec!["确定", "取消", "键"]
        );
    }

    #[test]
    fn test_char_operand_is_text() {
        assert_eq!(values(r#"s = "姓名" + ':' + name;"#), vec!["姓名:{}"]);
    }

    #[test]
    fn test_string_format_keeps_template() {
        let merged = merge(r#"String s = String.format("用户%s不存在, 编号{0}", name, "附加");"#);
        assert_eq!(merged[0].value, "用户%s不存在, 编号{0}");
        assert_eq!(merged[0].rule, MergeRule::Format);
        assert_eq!(merged[1].value, "附加");
    }

    #[test]
    fn test_message_format_and_locale() {
        assert_eq!(
            values(
                r#"a = MessageFormat.format("第{0}页", n); b = String.format(Locale.CHINA, "共%d项", n);"#
            ),
            vec!["第{0}页", "共%d项"]
        );
    }

    #[test]
    fn test_builder_chain() {
        let source = r#"
String s = new StringBuilder()
        .append("用户")
        .append(user.getName())
        .append(" 登录成功")
        .toString();
"#;
        let merged = merge(source);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].value, "用户{}登录成功");
        assert_eq!(merged[0].rule, MergeRule::Builder);
        assert_eq!(merged[0].line, 3);
    }

    #[test]
    fn test_builder_with_initial_literal_and_receiver() {
        assert_eq!(
            values(
                r#"StringBuffer b = new StringBuffer("总计: "); sb.append(a + b).append('件').append("商品");"#
            ),
            vec!["总计: ", "{}件商品"]
        );
    }

    #[test]
    fn test_builder_capacity_is_ignored() {
        assert_eq!(
            values(r#"new StringBuilder(64).append("前缀").append(x);"#),
            vec!["前缀{}"]
        );
    }

    #[test]
    fn test_format_inside_builder_stays_dominant() {
        assert_eq!(
            values(r#"sb.append(String.format("%d条", n)).append("记录");"#),
            vec!["%d条", "{}记录"]
        );
    }

    #[test]
    fn test_format_inside_concat() {
        assert_eq!(
            values(r#"s = "前缀" + String.format("%s个", n);"#),
            vec!["前缀{}", "%s个"]
        );
    }

    #[test]
    fn test_separate_append_statements_do_not_merge() {
        assert_eq!(
            values(r#"sb.append("第一"); sb.append("第二");"#),
            vec!["第一", "第二"]
        );
    }

    #[test]
    fn test_compound_assignment_is_a_boundary() {
        assert_eq!(values(r#"msg += "追加" + x;"#), vec!["追加{}"]);
    }
}
