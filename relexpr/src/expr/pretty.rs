//! RcDoc-based pretty-printer with termcolor annotations for [`Expr`].
//!
//! Role
//! - Convert an expression into an annotated document suitable for width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs, tests,
//!   and diagnostics.
//!
//! The concrete syntax follows the modelling language: `all x: A | f`, `a.b`, `A -> B`,
//! `p && q`, `f[x, y]`. Parentheses left by the parser ([`UnaryOp::Noop`]) are transparent;
//! the printer inserts its own parentheses from a precedence table.

use std::io::{self, Write};

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::expr::ops::{BinaryOp, QuantOp, UnaryOp};
use crate::expr::{BoundVar, Expr, ExprKind};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, bars, colons, brackets
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // all, some, let, else, ...
    Operator, // &&, ||, ->, in, ...
    Ident,    // variables, fields, functions
    Sig,      // signature names
    Literal,  // numbers, strings, builtin constants
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Sig => {
                s.set_fg(Some(Color::Magenta));
            }
            Style::Literal => {
                s.set_fg(Some(Color::Red));
            }
        }
        s
    }
}

fn styled(style: Style, s: impl ToString) -> RcDoc<'static, Style> {
    RcDoc::as_string(s.to_string()).annotate(style)
}

fn punct(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Punct, s)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn kw(s: impl ToString) -> RcDoc<'static, Style> {
    styled(Style::Keyword, s)
}

fn op(s: impl ToString) -> RcDoc<'static, Style> {
    styled(Style::Operator, s)
}

fn ident(s: &str) -> RcDoc<'static, Style> {
    styled(Style::Ident, s)
}

/// Binding strength of the outermost operator; higher binds tighter.
fn precedence(e: &Expr) -> u8 {
    use BinaryOp as B;

    match e.deparen().kind() {
        ExprKind::Quant { .. } | ExprKind::Let { .. } => 1,
        ExprKind::Binary { op, .. } => match op {
            B::Or => 2,
            B::Iff => 3,
            B::Implies => 4,
            B::And => 5,
            op if op.is_comparison() => 7,
            B::Shl | B::Sha | B::Shr => 9,
            B::Plus | B::Minus | B::IPlus | B::IMinus => 10,
            B::Override => 12,
            B::Intersect => 13,
            op if op.is_product() => 14,
            B::DomainRestrict | B::RangeRestrict => 15,
            _ => 16,
        },
        ExprKind::Ite { .. } => 4,
        ExprKind::Unary { op, .. } => match op {
            UnaryOp::Not => 6,
            UnaryOp::No | UnaryOp::Some | UnaryOp::Lone | UnaryOp::One => 8,
            op if op.is_multiplicity_marker() => 8,
            UnaryOp::Cardinality => 11,
            UnaryOp::Transpose | UnaryOp::Closure | UnaryOp::ReflexiveClosure => 18,
            _ => 255,
        },
        ExprKind::Join { .. } => 17,
        ExprKind::Call { .. }
        | ExprKind::Builtin { .. }
        | ExprKind::Constant(_)
        | ExprKind::Variable { .. }
        | ExprKind::Sig { .. }
        | ExprKind::Field { .. } => 255,
    }
}

fn child(e: &Expr, parent_prec: u8, same_shape: bool, depth: u8) -> RcDoc<'static, Style> {
    let prec = precedence(e);
    if prec < parent_prec || (prec == parent_prec && !same_shape && prec != 255) {
        lparen(depth)
            .append(to_doc_with_depth(e, depth.wrapping_add(1)))
            .append(rparen(depth))
            .group()
    } else {
        to_doc_with_depth(e, depth)
    }
}

fn same_binary(e: &Expr, parent: BinaryOp) -> bool {
    matches!(e.deparen().kind(), ExprKind::Binary { op, .. } if *op == parent)
}

fn bracketed<'e>(
    head: RcDoc<'static, Style>,
    args: impl IntoIterator<Item = &'e Expr>,
    depth: u8,
) -> RcDoc<'static, Style> {
    head.append(punct("["))
        .append(RcDoc::intersperse(
            args.into_iter().map(|a| to_doc_with_depth(a, depth)),
            punct(",").append(RcDoc::space()),
        ))
        .append(punct("]"))
        .group()
}

fn decls(vars: &[BoundVar], depth: u8) -> RcDoc<'static, Style> {
    RcDoc::intersperse(
        vars.iter().map(|v| {
            ident(&v.name)
                .append(punct(":"))
                .append(RcDoc::space())
                .append(to_doc_with_depth(&v.bound, depth))
        }),
        punct(",").append(RcDoc::space()),
    )
}

/// Depth-aware variant that colors parentheses by nesting level.
fn to_doc_with_depth(e: &Expr, depth: u8) -> RcDoc<'static, Style> {
    let prec = precedence(e);
    match e.kind() {
        ExprKind::Binary { op: o, left, right } => child(left, prec, same_binary(left, *o), depth)
            .append(RcDoc::space())
            .append(op(o))
            .append(RcDoc::line())
            .append(child(
                right,
                prec,
                o.is_associative() && same_binary(right, *o),
                depth,
            ))
            .group(),
        ExprKind::Join { left, right } => child(left, prec, true, depth)
            .append(punct("."))
            .append(child(right, prec, true, depth))
            .group(),
        ExprKind::Unary { op: o, sub } => match o {
            UnaryOp::Noop => to_doc_with_depth(sub, depth),
            UnaryOp::Not | UnaryOp::Transpose | UnaryOp::Closure | UnaryOp::ReflexiveClosure => {
                op(o).append(child(sub, prec, true, depth))
            }
            UnaryOp::Cardinality => op(o).append(child(sub, prec, true, depth)),
            UnaryOp::CastToInt | UnaryOp::CastToSigint => bracketed(kw(o), [&**sub], depth),
            _ => kw(o)
                .append(RcDoc::space())
                .append(child(sub, prec, true, depth))
                .group(),
        },
        ExprKind::Quant {
            op: QuantOp::Comprehension,
            vars,
            body,
        } => punct("{")
            .append(decls(vars, depth))
            .append(RcDoc::space())
            .append(punct("|"))
            .append(RcDoc::line())
            .append(to_doc_with_depth(body, depth))
            .append(punct("}"))
            .group()
            .nest(2),
        ExprKind::Quant { op: q, vars, body } => kw(q)
            .append(RcDoc::space())
            .append(decls(vars, depth))
            .append(RcDoc::space())
            .append(punct("|"))
            .append(RcDoc::line())
            .append(to_doc_with_depth(body, depth))
            .group()
            .nest(2),
        ExprKind::Ite {
            condition,
            then_branch,
            else_branch,
        } => child(condition, prec + 1, true, depth)
            .append(RcDoc::space())
            .append(op("=>"))
            .append(RcDoc::line())
            .append(child(then_branch, prec + 1, true, depth))
            .append(RcDoc::line())
            .append(kw("else"))
            .append(RcDoc::space())
            .append(child(else_branch, prec, true, depth))
            .group()
            .nest(2),
        ExprKind::Let { var, value, body } => kw("let")
            .append(RcDoc::space())
            .append(ident(var))
            .append(RcDoc::space())
            .append(op("="))
            .append(RcDoc::space())
            .append(to_doc_with_depth(value, depth))
            .append(RcDoc::space())
            .append(punct("|"))
            .append(RcDoc::line())
            .append(to_doc_with_depth(body, depth))
            .group()
            .nest(2),
        ExprKind::Call { func, args } => bracketed(ident(func), args, depth),
        ExprKind::Builtin { op: b, args } => bracketed(kw(b), args, depth),
        ExprKind::Constant(c) => styled(Style::Literal, c),
        ExprKind::Variable { name } => ident(name),
        ExprKind::Sig { label } => styled(Style::Sig, label),
        ExprKind::Field { label, .. } => ident(label),
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Convenience: retrieve the width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for expressions.
pub trait PrettyExpr {
    /// Build an RcDoc representation with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print to stdout with colors (TTY-aware), at auto-detected width (or 80 if not a TTY).
    fn pretty_print(&self) -> io::Result<()>;

    /// Format into a plain string (no colors) at width 80.
    fn pretty_string(&self) -> String;
}

impl PrettyExpr for Expr {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0)
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)
    }

    #[inline]
    fn pretty_string(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}
