use super::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Resn,
    Resi,
    Name,
    Symbol,
    Chain,
    And,
    Or,
    Not,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "resn" => Some(Keyword::Resn),
            "resi" => Some(Keyword::Resi),
            "name" => Some(Keyword::Name),
            "symbol" => Some(Keyword::Symbol),
            "chain" => Some(Keyword::Chain),
            "and" => Some(Keyword::And),
            "or" => Some(Keyword::Or),
            "not" => Some(Keyword::Not),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    /// A name or number; the parser decides which it needs.
    Word(String),
    Plus,
    Minus,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token's first character.
    pub position: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '\'')
}

/// Splits an expression into tokens. Positions are offset by `base`.
pub fn tokenize(input: &str, base: usize) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let single = match c {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            _ => None,
        };
        if let Some(kind) = single {
            tokens.push(Token {
                kind,
                position: base + pos,
            });
            chars.next();
            continue;
        }

        if is_word_char(c) {
            let mut end = pos;
            while let Some(&(p, ch)) = chars.peek() {
                if !is_word_char(ch) {
                    break;
                }
                end = p + ch.len_utf8();
                chars.next();
            }
            let word = &input[pos..end];
            let kind = Keyword::from_word(word)
                .map_or_else(|| TokenKind::Word(word.to_string()), TokenKind::Keyword);
            tokens.push(Token {
                kind,
                position: base + pos,
            });
            continue;
        }

        return Err(SyntaxError::new(
            format!("unexpected character '{}'", c),
            base + pos,
        ));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input, 0).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("RESN ala AnD Not"),
            vec![
                TokenKind::Keyword(Keyword::Resn),
                TokenKind::Word("ala".into()),
                TokenKind::Keyword(Keyword::And),
                TokenKind::Keyword(Keyword::Not),
            ]
        );
    }

    #[test]
    fn punctuation_and_words() {
        assert_eq!(
            kinds("resi 1-5+82A (name O5')"),
            vec![
                TokenKind::Keyword(Keyword::Resi),
                TokenKind::Word("1".into()),
                TokenKind::Minus,
                TokenKind::Word("5".into()),
                TokenKind::Plus,
                TokenKind::Word("82A".into()),
                TokenKind::LParen,
                TokenKind::Keyword(Keyword::Name),
                TokenKind::Word("O5'".into()),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn positions_are_offset_by_base() {
        let tokens = tokenize("resn  ala", 10).unwrap();
        assert_eq!(tokens[0].position, 10);
        assert_eq!(tokens[1].position, 16);
    }

    #[test]
    fn unexpected_character_reports_position() {
        assert_eq!(
            tokenize("resn ala & name CA", 3),
            Err(SyntaxError::new("unexpected character '&'", 12))
        );
    }
}
