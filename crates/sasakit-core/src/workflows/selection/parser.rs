use super::SyntaxError;
use super::lexer::{Keyword, Token, TokenKind};
use crate::core::models::atom::ResidueNumber;

/// Inclusive residue-number range. A single number is a range of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueRange {
    pub start: ResidueNumber,
    pub end: ResidueNumber,
}

impl ResidueRange {
    pub fn contains(&self, number: ResidueNumber) -> bool {
        self.start <= number && number <= self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    ResidueName(Vec<String>),
    ResidueNumber(Vec<ResidueRange>),
    AtomName(Vec<String>),
    Symbol(Vec<String>),
    Chain(Vec<char>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

/// Parses a token stream into an expression. `end` is the position reported for
/// errors at the end of input.
pub fn parse(tokens: &[Token], end: usize) -> Result<Expr, SyntaxError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        end,
    };
    let expr = parser.parse_or()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(SyntaxError::new(
            format!("unexpected {}", describe(&token.kind)),
            token.position,
        )),
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Keyword(k) => format!("keyword '{}'", format!("{:?}", k).to_lowercase()),
        TokenKind::Word(w) => format!("'{}'", w),
        TokenKind::Plus => "'+'".into(),
        TokenKind::Minus => "'-'".into(),
        TokenKind::LParen => "'('".into(),
        TokenKind::RParen => "')'".into(),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|t| &t.kind == kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |t| t.position)
    }

    fn error<T>(&self, expected: &str) -> Result<T, SyntaxError> {
        let message = match self.peek() {
            Some(token) => format!("expected {}, found {}", expected, describe(&token.kind)),
            None => format!("expected {}, found end of input", expected),
        };
        Err(SyntaxError::new(message, self.position()))
    }

    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Keyword(Keyword::Or)) {
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_not()?;
        while self.eat(&TokenKind::Keyword(Keyword::And)) {
            let right = self.parse_not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, SyntaxError> {
        if self.eat(&TokenKind::Keyword(Keyword::Not)) {
            return Ok(Expr::Not(Box::new(self.parse_not()?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let Some(token) = self.peek() else {
            return self.error("a selector");
        };
        match &token.kind {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_or()?;
                if !self.eat(&TokenKind::RParen) {
                    return self.error("')'");
                }
                Ok(expr)
            }
            TokenKind::Keyword(Keyword::Resn) => {
                self.advance();
                Ok(Expr::ResidueName(self.parse_words()?))
            }
            TokenKind::Keyword(Keyword::Name) => {
                self.advance();
                Ok(Expr::AtomName(self.parse_words()?))
            }
            TokenKind::Keyword(Keyword::Symbol) => {
                self.advance();
                Ok(Expr::Symbol(self.parse_words()?))
            }
            TokenKind::Keyword(Keyword::Chain) => {
                self.advance();
                Ok(Expr::Chain(self.parse_chains()?))
            }
            TokenKind::Keyword(Keyword::Resi) => {
                self.advance();
                Ok(Expr::ResidueNumber(self.parse_ranges()?))
            }
            _ => self.error("a selector (resn, resi, name, symbol, chain) or '('"),
        }
    }

    fn parse_word(&mut self) -> Result<(String, usize), SyntaxError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Word(word),
                position,
            }) => {
                self.advance();
                Ok((word.clone(), *position))
            }
            _ => self.error("a name"),
        }
    }

    fn parse_words(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut words = vec![self.parse_word()?.0];
        while self.eat(&TokenKind::Plus) {
            words.push(self.parse_word()?.0);
        }
        Ok(words)
    }

    fn parse_chains(&mut self) -> Result<Vec<char>, SyntaxError> {
        let mut chains = Vec::new();
        loop {
            let (word, position) = self.parse_word()?;
            let mut chars = word.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => chains.push(c),
                _ => {
                    return Err(SyntaxError::new(
                        format!("chain label '{}' must be a single character", word),
                        position,
                    ));
                }
            }
            if !self.eat(&TokenKind::Plus) {
                return Ok(chains);
            }
        }
    }

    fn parse_number(&mut self) -> Result<ResidueNumber, SyntaxError> {
        let start = self.position();
        let negative = self.eat(&TokenKind::Minus);
        let (word, position) = match self.peek() {
            Some(Token {
                kind: TokenKind::Word(word),
                position,
            }) => (word.clone(), *position),
            _ => return self.error("a residue number"),
        };
        let text = if negative { format!("-{}", word) } else { word };
        let number = text.parse::<ResidueNumber>().map_err(|_| {
            SyntaxError::new(
                format!("'{}' is not a residue number", text),
                if negative { start } else { position },
            )
        })?;
        self.advance();
        Ok(number)
    }

    fn parse_ranges(&mut self) -> Result<Vec<ResidueRange>, SyntaxError> {
        let mut ranges = Vec::new();
        loop {
            let position = self.position();
            let start = self.parse_number()?;
            let end = if self.eat(&TokenKind::Minus) {
                self.parse_number()?
            } else {
                start
            };
            if end < start {
                return Err(SyntaxError::new(
                    format!("range {}-{} is empty", start, end),
                    position,
                ));
            }
            ranges.push(ResidueRange { start, end });
            if !self.eat(&TokenKind::Plus) {
                return Ok(ranges);
            }
        }
    }
}
