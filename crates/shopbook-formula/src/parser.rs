//! Arithmetic expression parser
//!
//! A recursive descent parser for the substituted form of a formula:
//! decimal literals, `+ - * /`, parentheses and unary signs.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};

/// Default limit on tree height: nested parentheses, unary signs and
/// chained binary operators
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parse an arithmetic expression into an AST
///
/// # Example
/// ```rust
/// use shopbook_formula::{evaluate_expr, parse_expression};
///
/// let ast = parse_expression("1 + 2 * 3").unwrap();
/// assert_eq!(evaluate_expr(&ast), 7.0);
///
/// assert!(parse_expression("1 +").is_err());
/// ```
pub fn parse_expression(input: &str) -> FormulaResult<Expr> {
    parse_expression_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Parse an arithmetic expression with a custom nesting limit
pub fn parse_expression_with_depth(input: &str, max_depth: usize) -> FormulaResult<Expr> {
    let mut parser = ExpressionParser::new(input, max_depth);
    let expr = parser.parse_additive()?;

    // Make sure we consumed all input
    if parser.current_token != Token::Eof {
        return Err(FormulaError::Parse(format!(
            "Unexpected {} after expression",
            parser.current_token
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Invalid(char),
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
            Token::Invalid(c) => write!(f, "character '{}'", c),
            Token::Eof => f.write_str("end of expression"),
        }
    }
}

/// Expression parser
struct ExpressionParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Token,
    depth: usize,
    max_depth: usize,
}

impl<'a> ExpressionParser<'a> {
    fn new(input: &'a str, max_depth: usize) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: Token::Eof,
            depth: 0,
            max_depth,
        };
        parser.advance_token();
        parser
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        self.current_token = self.scan_token();
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Token::Eof,
        };

        // Number: digits with optional fraction, or a leading '.'
        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        self.advance();
        match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            other => Token::Invalid(other),
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part; a bare trailing '.' is allowed ("5.")
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let num_str = &self.input[start..self.pos];
        match num_str.parse::<f64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::Invalid('.'),
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn consume(&mut self) -> Token {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token();
        token
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if &self.current_token == expected {
            self.consume();
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {}, got {}",
                expected, self.current_token
            )))
        }
    }

    fn enter(&mut self) -> FormulaResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(FormulaError::TooDeep(self.max_depth));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // === Expression parsing with precedence ===
    // Every chained operator, paren and unary sign counts toward the depth
    // limit, which bounds the height of the resulting tree.
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary: -, +
    // 4. Primary: numbers, parentheses

    fn parse_additive(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        let mut chained = 0;

        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            self.enter()?;
            chained += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        self.depth -= chained;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_unary()?;
        let mut chained = 0;

        loop {
            let op = match self.current_token {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume();
            self.enter()?;
            chained += 1;
            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        self.depth -= chained;
        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        let op = match self.current_token {
            Token::Minus => UnaryOperator::Negate,
            Token::Plus => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };

        self.consume();
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();

        Ok(Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        match self.current_token {
            Token::Number(n) => {
                self.consume();
                Ok(Expr::Number(n))
            }

            Token::LeftParen => {
                self.consume();
                self.enter()?;
                let expr = self.parse_additive()?;
                self.leave();
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            _ => Err(FormulaError::Parse(format!(
                "Unexpected {}",
                self.current_token
            ))),
        }
    }
}
