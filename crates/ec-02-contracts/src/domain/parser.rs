//! Contract source parser.
//!
//! Structural scan over the token stream: every well-formed
//! `function name(params) modifiers` declaration becomes a `FunctionDecl`.
//! Anything malformed is skipped, so unparseable source yields an AST with
//! an empty function list rather than an error. This is a known precision
//! limit of the sandbox, not a crash path.

use super::ast::{ContractAst, FunctionDecl, Param, Visibility};
use super::lexer::{lex, Token};

/// Parses contract source into its AST.
pub fn parse_source(source: &str) -> ContractAst {
    let tokens = lex(source);
    let mut functions = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        if tokens[pos].as_ident() == Some("function") {
            if let Some((decl, next)) = parse_function(&tokens, pos + 1) {
                functions.push(decl);
                pos = next;
                continue;
            }
        }
        pos += 1;
    }

    ContractAst { functions }
}

/// Parses one declaration starting after the `function` keyword.
///
/// Returns the declaration and the position after its header, or `None`
/// if the tokens do not form a declaration.
fn parse_function(tokens: &[Token], start: usize) -> Option<(FunctionDecl, usize)> {
    let mut pos = start;

    let name = tokens.get(pos)?.as_ident()?.to_string();
    pos += 1;

    if tokens.get(pos) != Some(&Token::Punct('(')) {
        return None;
    }
    pos += 1;

    let (params, after_params) = parse_params(tokens, pos)?;
    pos = after_params;

    // Modifiers run until the body, a terminator, or the next declaration.
    let mut visibility = Visibility::default();
    let mut payable = false;
    while let Some(token) = tokens.get(pos) {
        match token {
            Token::Punct('{') | Token::Punct(';') => break,
            Token::Ident(word) => match word.as_str() {
                "function" => break,
                "public" => visibility = Visibility::Public,
                "private" => visibility = Visibility::Private,
                "internal" => visibility = Visibility::Internal,
                "external" => visibility = Visibility::External,
                "payable" => payable = true,
                // view/pure/returns/custom modifiers carry no meaning here
                _ => {}
            },
            Token::Punct(_) => {}
        }
        pos += 1;
    }

    Some((
        FunctionDecl {
            name,
            params,
            visibility,
            payable,
        },
        pos,
    ))
}

/// Parses a comma-separated parameter list up to the closing parenthesis.
///
/// Each group is read as `type [name]`: the first identifier is the type,
/// a trailing identifier is the name. Returns `None` if the list never
/// closes (malformed declaration).
fn parse_params(tokens: &[Token], start: usize) -> Option<(Vec<Param>, usize)> {
    let mut params = Vec::new();
    let mut group: Vec<String> = Vec::new();
    let mut pos = start;
    let mut depth = 0usize;

    loop {
        match tokens.get(pos)? {
            Token::Punct(')') if depth == 0 => {
                push_group(&mut params, &mut group);
                return Some((params, pos + 1));
            }
            Token::Punct(',') if depth == 0 => push_group(&mut params, &mut group),
            Token::Punct('(') | Token::Punct('[') => depth += 1,
            Token::Punct(')') | Token::Punct(']') => depth = depth.saturating_sub(1),
            Token::Ident(word) => group.push(word.clone()),
            Token::Punct(_) => {}
        }
        pos += 1;
    }
}

fn push_group(params: &mut Vec<Param>, group: &mut Vec<String>) {
    if group.is_empty() {
        return;
    }
    let (type_name, name) = if group.len() == 1 {
        (group[0].clone(), String::new())
    } else {
        // Memory-location words sit between type and name; the name is
        // always last and the type is first.
        (group[0].clone(), group[group.len() - 1].clone())
    };
    params.push(Param { type_name, name });
    group.clear();
}
