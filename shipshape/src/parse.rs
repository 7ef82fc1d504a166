//! Reader for the instruction text produced by [`Shape::to_css`].
//!
//! Accepts the `shape(...)` wrapper or a bare instruction list, any layout of
//! whitespace and newlines, and an optional fill rule before `from`. Values
//! are `<n>%`, `<n>px` or `calc(100% - <n>px)`.

use crate::error::{Result, ShapeError};
use crate::geometry::limits;
use crate::geometry::tolerance::format_number;
use crate::geometry::vector::Size;
use crate::instruction::{Command, FillRule, Shape};
use crate::length::{percent, px, raw, CoordinatePair, LengthPercentage};
use tracing::debug;

struct Cursor<'a> {
    bytes: &'a [u8],
    i: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            i: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b' ' | b'\n' | b'\t' | b'\r' => self.i += 1,
                _ => break,
            }
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.i >= self.bytes.len()
    }

    fn err(&self, message: impl Into<String>) -> ShapeError {
        ShapeError::parse(self.i, message)
    }

    /// Consumes `lit` after optional whitespace.
    fn eat(&mut self, lit: &str) -> bool {
        self.skip_ws();
        if self.bytes[self.i..].starts_with(lit.as_bytes()) {
            self.i += lit.len();
            true
        } else {
            false
        }
    }

    /// Like [`Cursor::eat`] but only at a word boundary.
    fn eat_keyword(&mut self, kw: &str) -> bool {
        let start = self.i;
        if !self.eat(kw) {
            return false;
        }
        match self.bytes.get(self.i) {
            Some(c) if c.is_ascii_alphanumeric() || *c == b'-' => {
                self.i = start;
                false
            }
            _ => true,
        }
    }

    fn expect(&mut self, lit: &str) -> Result<()> {
        if self.eat(lit) {
            Ok(())
        } else {
            Err(self.err(format!("expected \"{}\"", lit)))
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(self.err(format!("expected \"{}\"", kw)))
        }
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_ws();
        let start = self.i;
        while self.i < self.bytes.len() {
            let c = self.bytes[self.i];
            let exponent_sign = (c == b'-' || c == b'+')
                && self.i > start
                && matches!(self.bytes[self.i - 1], b'e' | b'E');
            if c.is_ascii_digit() || c == b'.' || c == b'e' || c == b'E' || exponent_sign {
                self.i += 1;
            } else if (c == b'-' || c == b'+') && self.i == start {
                self.i += 1;
            } else {
                break;
            }
        }
        if start == self.i {
            return Err(self.err("expected a number"));
        }
        let s = std::str::from_utf8(&self.bytes[start..self.i])
            .map_err(|_| self.err("invalid utf-8"))?;
        match s.parse::<f64>() {
            Ok(v) if limits::in_coord_bounds(v) => Ok(v),
            Ok(_) => Err(ShapeError::parse(start, format!("number out of range: {}", s))),
            Err(_) => Err(ShapeError::parse(start, format!("invalid number: {}", s))),
        }
    }

    fn length(&mut self, max_px: f64) -> Result<LengthPercentage> {
        if self.eat("calc(") {
            self.expect("100%")?;
            self.expect("-")?;
            let n = self.number()?;
            self.expect("px")?;
            self.expect(")")?;
            return Ok(raw(format!("calc(100% - {}px)", format_number(n)), px(max_px - n)));
        }
        let n = self.number()?;
        if self.eat("%") {
            Ok(percent(n))
        } else if self.eat("px") {
            Ok(px(n))
        } else {
            Err(self.err("expected \"%\" or \"px\""))
        }
    }

    fn pair(&mut self, max: Size) -> Result<CoordinatePair> {
        let x = self.length(max.width)?;
        let y = self.length(max.height)?;
        Ok(CoordinatePair::new(x, y))
    }

    fn command(&mut self, max: Size) -> Result<Command> {
        if self.eat_keyword("line") {
            self.expect_keyword("to")?;
            return Ok(Command::line(self.pair(max)?));
        }
        if self.eat_keyword("curve") {
            self.expect_keyword("to")?;
            let to = self.pair(max)?;
            self.expect_keyword("with")?;
            let control1 = self.pair(max)?;
            let control2 = if self.eat("/") {
                Some(self.pair(max)?)
            } else {
                None
            };
            return Ok(Command::curve(to, control1, control2));
        }
        if self.eat_keyword("close") {
            return Ok(Command::Close);
        }
        Err(self.err("expected \"line\", \"curve\" or \"close\""))
    }
}

/// Parses instruction text. `max` resolves the pixel value of
/// `calc(100% - <n>px)` coordinates.
pub fn parse_shape(text: &str, max: Size) -> Result<Shape> {
    if text.len() > limits::MAX_SHAPE_TEXT {
        return Err(ShapeError::parse(0, "input too large"));
    }
    let mut c = Cursor::new(text);
    let wrapped = c.eat_keyword("shape");
    if wrapped {
        c.expect("(")?;
    }

    let fill_rule = if c.eat_keyword("nonzero") {
        Some(FillRule::Nonzero)
    } else if c.eat_keyword("evenodd") {
        Some(FillRule::Evenodd)
    } else {
        None
    };

    c.expect_keyword("from")?;
    let from = c.pair(max)?;

    let mut commands = Vec::new();
    loop {
        if wrapped && c.eat(")") {
            break;
        }
        if c.at_end() {
            if wrapped {
                return Err(c.err("expected \")\""));
            }
            break;
        }
        c.expect(",")?;
        commands.push(c.command(max)?);
        if commands.len() > limits::MAX_COMMANDS {
            return Err(c.err("too many commands"));
        }
    }
    if !c.at_end() {
        return Err(c.err("unexpected trailing input"));
    }
    debug!(commands = commands.len(), "parsed shape");
    Ok(Shape {
        fill_rule,
        from,
        commands,
    })
}

/// Recognises the `calc(100% - <n>px)` form and returns `n`.
pub(crate) fn px_from_end_offset(text: &str) -> Option<f64> {
    let mut c = Cursor::new(text);
    c.expect("calc(").ok()?;
    c.expect("100%").ok()?;
    c.expect("-").ok()?;
    let n = c.number().ok()?;
    c.expect("px").ok()?;
    c.expect(")").ok()?;
    c.at_end().then_some(n)
}
