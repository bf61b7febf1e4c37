//! SCSS syntax parser using the `cssparser` crate.
//!
//! This module turns stylesheet text into a forest of [`StyleNode`]s. It
//! understands as much SCSS as resolution needs: nested rules, `@apply`,
//! `@extend`, `@include`, imports, block at-rules, declarations and
//! variables. Values are kept as raw text; nothing is evaluated.

use std::borrow::Cow;

use cssparser::{
    ParseError as CssParseError, ParseErrorKind, Parser, ParserInput, ToCss, Token,
};

use crate::rules::{
    AtBlockNode, CustomNode, Declaration, DirectiveNode, ExtendNode, ImportNode, IncludeNode,
    RuleNode, SourceLocation, StyleNode,
};
use crate::selector::{PathToken, SelectorGroup, SelectorPath};
use crate::{Error, Result};

type ParseResult<'i, T> = std::result::Result<T, CssParseError<'i, Error>>;

/// Parse SCSS text into its top-level nodes.
///
/// Comments (both `/* */` and `//`) are dropped before tokenizing, so they
/// never reach directive operands. `#{...}` interpolation is kept as part of
/// the surrounding selector, prelude or value text. Statement at-rules become
/// [`StyleNode::Directive`], [`StyleNode::Extend`], [`StyleNode::Include`] or
/// [`StyleNode::Import`]; `name: value` pairs become [`StyleNode::Assign`]
/// unless they are custom properties, which become [`StyleNode::Custom`].
///
/// # Errors
///
/// Returns [`Error::Parse`] for structural problems such as a stray `}` or
/// a rule without a selector.
///
/// # Example
///
/// ```ignore
/// let nodes = parse_scss(".card { @apply p-4 rounded; }")?;
/// assert_eq!(nodes.len(), 1);
/// ```
pub fn parse_scss(scss: &str) -> Result<Vec<StyleNode>> {
    let source = strip_comments(scss);
    let mut input = ParserInput::new(&source);
    let mut parser = Parser::new(&mut input);

    let nodes = parse_items(&mut parser).map_err(into_error)?;
    tracing::debug!(nodes = nodes.len(), "parsed stylesheet");
    Ok(nodes)
}

/// Parse a sequence of rules and body items until the input (or the
/// enclosing block) is exhausted.
fn parse_items<'i>(parser: &mut Parser<'i, '_>) -> ParseResult<'i, Vec<StyleNode>> {
    let mut nodes = vec![];

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let location = location_of(parser);
        let state = parser.state();
        let token = parser.next()?.clone();

        match token {
            Token::Semicolon | Token::CDO | Token::CDC => continue,
            Token::CloseCurlyBracket => {
                return Err(parser.new_custom_error(Error::parse(
                    "unexpected '}'",
                    location.line,
                    location.column,
                )));
            }
            Token::AtKeyword(name) => {
                let node = parse_at_rule(parser, &name, location)?;
                nodes.push(node);
            }
            _ => {
                parser.reset(&state);
                nodes.push(parse_rule_or_declaration(parser, location)?);
            }
        }
    }

    Ok(nodes)
}

/// Parse the remainder of an at-rule whose keyword was just consumed.
fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
    name: &str,
    location: SourceLocation,
) -> ParseResult<'i, StyleNode> {
    let name = name.to_ascii_lowercase();
    let (prelude, has_block) = read_prelude(parser);
    let prelude = prelude.trim();

    if has_block {
        if name == "include" {
            // Mixin content blocks are not descended into.
            return Ok(StyleNode::Include(IncludeNode {
                mixin: mixin_name(prelude),
                location,
            }));
        }

        let children = parser.parse_nested_block(|p| parse_items(p))?;
        return Ok(StyleNode::AtBlock(AtBlockNode {
            name,
            prelude: prelude.to_string(),
            children,
            location,
        }));
    }

    let node = match name.as_str() {
        "extend" => {
            let targets = parse_extend_targets(prelude, location)
                .map_err(|e| parser.new_custom_error(e))?;
            StyleNode::Extend(ExtendNode { targets, location })
        }
        "include" => StyleNode::Include(IncludeNode {
            mixin: mixin_name(prelude),
            location,
        }),
        "import" | "use" | "forward" => StyleNode::Import(ImportNode {
            keyword: name,
            target: unquote(prelude).to_string(),
            location,
        }),
        _ => StyleNode::Directive(DirectiveNode {
            name,
            operand: unquote(prelude).to_string(),
            location,
        }),
    };

    Ok(node)
}

/// Consume tokens up to the end of an at-rule prelude.
///
/// Returns the prelude text and whether it ended in a `{}` block. When it
/// did, the block is the last token returned and may be entered with
/// `parse_nested_block`.
fn read_prelude<'i>(parser: &mut Parser<'i, '_>) -> (&'i str, bool) {
    let start = parser.position();
    let mut after_hash = false;

    loop {
        match parser.next_including_whitespace() {
            Ok(Token::Semicolon) => return (without_terminator(parser.slice_from(start)), false),
            Ok(Token::CurlyBracketBlock) if after_hash => after_hash = false,
            Ok(Token::CurlyBracketBlock) => {
                return (without_terminator(parser.slice_from(start)), true);
            }
            Ok(token) => after_hash = is_interpolation_start(token),
            Err(_) => return (parser.slice_from(start), false),
        }
    }
}

/// Whether a `{}` block directly after this token is `#{...}` interpolation.
fn is_interpolation_start(token: &Token<'_>) -> bool {
    matches!(token, Token::Delim('#'))
}

/// Drop the `;` or `{` that ended a slice taken right after that token.
fn without_terminator(text: &str) -> &str {
    text.strip_suffix([';', '{']).unwrap_or(text)
}

/// Parse either a nested rule (`selector { ... }`) or a declaration
/// (`name: value;`), deciding by whichever of `{` or `;` comes first.
/// Interpolation blocks do not count.
fn parse_rule_or_declaration<'i>(
    parser: &mut Parser<'i, '_>,
    location: SourceLocation,
) -> ParseResult<'i, StyleNode> {
    let start = parser.position();
    let mut after_hash = false;

    loop {
        match parser.next_including_whitespace() {
            Ok(Token::CurlyBracketBlock) if after_hash => after_hash = false,
            Ok(Token::CurlyBracketBlock) => {
                let selector_text = without_terminator(parser.slice_from(start));
                let selectors = parse_selector_groups(selector_text, location)
                    .map_err(|e| parser.new_custom_error(e))?;
                let children = parser.parse_nested_block(|p| parse_items(p))?;

                return Ok(StyleNode::Rule(RuleNode {
                    selectors,
                    children,
                    location,
                }));
            }
            Ok(Token::Semicolon) => {
                return Ok(declaration(without_terminator(parser.slice_from(start)), location));
            }
            Ok(token) => after_hash = is_interpolation_start(token),
            Err(_) => return Ok(declaration(parser.slice_from(start), location)),
        }
    }
}

/// Classify a `name: value` statement.
fn declaration(text: &str, location: SourceLocation) -> StyleNode {
    let text = text.trim();

    if let Some((property, value)) = text.split_once(':') {
        let property = property.trim();
        if is_property_name(property) {
            return StyleNode::Assign(Declaration {
                property: property.to_string(),
                value: value.trim().to_string(),
                location,
            });
        }
    }

    StyleNode::Custom(CustomNode {
        text: text.to_string(),
        location,
    })
}

/// Plain property or `$variable` names. Custom properties (`--x`) are not.
fn is_property_name(name: &str) -> bool {
    let body = name.strip_prefix('$').unwrap_or(name);
    !body.is_empty()
        && !name.starts_with("--")
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Split selector text into comma-separated groups of compound selectors.
///
/// Compounds containing `#{...}` interpolation have no static class name
/// and are left out. A selector made only of such compounds yields no
/// groups rather than an error.
pub(crate) fn parse_selector_groups(
    text: &str,
    location: SourceLocation,
) -> Result<Vec<SelectorGroup>> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    let mut groups = vec![];
    let mut alternatives = vec![];
    let mut path = PathBuilder::default();
    let mut skipped_interpolated = false;

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) | Token::Delim('>') | Token::Delim('+') | Token::Delim('~') => {
                skipped_interpolated |= path.flush(&mut alternatives);
            }
            Token::Comma => {
                skipped_interpolated |= path.flush(&mut alternatives);
                if !alternatives.is_empty() {
                    groups.push(SelectorGroup::new(std::mem::take(&mut alternatives)));
                }
            }
            Token::CurlyBracketBlock if path.tokens.last() == Some(&PathToken::Punct('#')) => {
                path.tokens.pop();
                path.interpolated = true;
            }
            Token::Delim('.') => path.tokens.push(PathToken::ClassMarker),
            Token::Ident(name) => path.tokens.push(PathToken::Name(name.to_string())),
            Token::IDHash(id) | Token::Hash(id) => {
                path.tokens.push(PathToken::Punct('#'));
                path.tokens.push(PathToken::Name(id.to_string()));
            }
            Token::Colon => path.tokens.push(PathToken::Punct(':')),
            // Arguments of functional pseudo-classes are skipped with the block.
            Token::Function(name) => path.tokens.push(PathToken::Name(name.to_string())),
            Token::SquareBracketBlock => path.tokens.push(PathToken::Punct('[')),
            Token::Delim(c) => path.tokens.push(PathToken::Punct(c)),
            other => path.tokens.push(PathToken::Name(other.to_css_string())),
        }
    }

    skipped_interpolated |= path.flush(&mut alternatives);
    if !alternatives.is_empty() {
        groups.push(SelectorGroup::new(alternatives));
    }

    if groups.is_empty() && skipped_interpolated {
        tracing::trace!(selector = text, "interpolated selector skipped");
    } else if groups.is_empty() {
        return Err(Error::parse(
            "missing selector before '{'",
            location.line,
            location.column,
        ));
    }

    Ok(groups)
}

/// Tokens of the compound selector being read.
#[derive(Default)]
struct PathBuilder {
    tokens: Vec<PathToken>,
    interpolated: bool,
}

impl PathBuilder {
    /// End the current compound. Returns whether it was dropped for
    /// containing interpolation.
    fn flush(&mut self, alternatives: &mut Vec<SelectorPath>) -> bool {
        let tokens = std::mem::take(&mut self.tokens);
        if std::mem::take(&mut self.interpolated) {
            return true;
        }
        if !tokens.is_empty() {
            alternatives.push(SelectorPath::new(tokens));
        }
        false
    }
}

/// Parse the selector list of an `@extend`, dropping `!optional`.
fn parse_extend_targets(prelude: &str, location: SourceLocation) -> Result<Vec<SelectorPath>> {
    let prelude = prelude.trim();
    let prelude = prelude.strip_suffix("!optional").unwrap_or(prelude).trim();

    if prelude.is_empty() {
        return Err(Error::parse(
            "@extend requires a selector",
            location.line,
            location.column,
        ));
    }

    Ok(parse_selector_groups(prelude, location)?
        .into_iter()
        .flat_map(|group| group.alternatives)
        .collect())
}

fn mixin_name(prelude: &str) -> String {
    prelude
        .split(['(', ';'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Remove one pair of matching surrounding quotes.
fn unquote(text: &str) -> &str {
    let text = text.trim();
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Blank out `//` line comments and `/* */` block comments.
///
/// Comment bytes are replaced with spaces (newlines are kept) so reported
/// lines and columns stay valid and comments never end up inside operand
/// text. `//` directly after a `:` (as in `http://`) and anything inside
/// strings is kept.
fn strip_comments(source: &str) -> Cow<'_, str> {
    if !source.contains("//") && !source.contains("/*") {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;
    let mut prev = '\0';

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q && prev != '\\' {
                quote = None;
            }
        } else if c == '"' || c == '\'' {
            quote = Some(c);
            out.push(c);
        } else if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            out.push_str("  ");
            let mut last = '\0';
            for next in chars.by_ref() {
                out.push(blank(next));
                if last == '*' && next == '/' {
                    break;
                }
                last = next;
            }
        } else if c == '/' && chars.peek() == Some(&'/') && prev != ':' {
            out.push(' ');
            while let Some(&next) = chars.peek() {
                if next == '\n' {
                    break;
                }
                out.push(' ');
                chars.next();
            }
        } else {
            out.push(c);
        }
        prev = c;
    }

    Cow::Owned(out)
}

/// Space for a blanked comment character, keeping line structure.
fn blank(c: char) -> char {
    if c == '\n' || c == '\r' { c } else { ' ' }
}

fn location_of(parser: &Parser<'_, '_>) -> SourceLocation {
    let location = parser.current_source_location();
    SourceLocation::new(location.line + 1, location.column)
}

fn into_error(err: CssParseError<'_, Error>) -> Error {
    match err.kind {
        ParseErrorKind::Custom(error) => error,
        ParseErrorKind::Basic(kind) => {
            Error::parse(format!("{:?}", kind), err.location.line + 1, err.location.column)
        }
    }
}
