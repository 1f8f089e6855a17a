//! Minimal lexer for controller source files.
//!
//! Produces only what type-name extraction needs: names (possibly
//! namespace-qualified), variables and punctuation. Whitespace, comments,
//! quoted strings and heredocs are consumed without producing tokens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Identifier or qualified name, e.g. `class`, `App\Http`, `\Foo`
    Name(&'a str),
    /// `$name`
    Variable(&'a str),
    /// Operators and delimiters; multi-char for `::`, `->`, `?->`, `#[`
    Punct(&'a str),
}

impl Token<'_> {
    #[inline]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Name(name) if name.eq_ignore_ascii_case(keyword))
    }
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

#[inline]
fn is_name_start(c: char) -> bool {
    c == '_' || c == '\\' || c.is_ascii_alphabetic() || !c.is_ascii()
}

#[inline]
fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0 }
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn skip_line(&mut self) {
        match self.rest().find('\n') {
            Some(offset) => self.pos += offset + 1,
            None => self.pos = self.src.len(),
        }
    }

    fn skip_block_comment(&mut self) {
        // Positioned on "/*"
        match self.rest()[2..].find("*/") {
            Some(offset) => self.pos += 2 + offset + 2,
            None => self.pos = self.src.len(),
        }
    }

    fn skip_quoted(&mut self, quote: char) {
        self.pos += quote.len_utf8();
        let mut escaped = false;
        while let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                return;
            }
        }
    }

    /// Skip `<<<ID`, `<<<"ID"` or `<<<'ID'` up to the closing identifier line.
    fn skip_heredoc(&mut self) {
        self.pos += 3;
        self.take_while(|c| c == ' ' || c == '\t');
        let quoted = matches!(self.peek(), Some('\'') | Some('"'));
        if quoted {
            self.pos += 1;
        }
        let label = self.take_while(|c| c == '_' || c.is_ascii_alphanumeric());
        if label.is_empty() {
            return;
        }
        self.skip_line();
        while self.pos < self.src.len() {
            let line_start = self.pos;
            self.skip_line();
            let line = self.src[line_start..self.pos].trim_start();
            if let Some(after) = line.strip_prefix(label) {
                if !after.starts_with(|c: char| c == '_' || c.is_ascii_alphanumeric()) {
                    // Resume right after the closing label so `;` is still lexed.
                    let indent = self.src[line_start..].len() - self.src[line_start..].trim_start().len();
                    self.pos = line_start + indent + label.len();
                    return;
                }
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let rest = self.rest();
            let c = rest.chars().next()?;

            if c.is_whitespace() {
                self.take_while(char::is_whitespace);
                continue;
            }
            if rest.starts_with("#[") {
                self.pos += 2;
                return Some(Token::Punct("#["));
            }
            if c == '#' || rest.starts_with("//") {
                self.skip_line();
                continue;
            }
            if rest.starts_with("/*") {
                self.skip_block_comment();
                continue;
            }
            if c == '\'' || c == '"' || c == '`' {
                self.skip_quoted(c);
                continue;
            }
            if rest.starts_with("<<<") {
                self.skip_heredoc();
                continue;
            }
            if c == '$' {
                self.pos += 1;
                let name = self.take_while(|c| c == '_' || c.is_alphanumeric());
                return Some(Token::Variable(name));
            }
            if is_name_start(c) {
                return Some(Token::Name(self.take_while(is_name_char)));
            }
            if c.is_ascii_digit() {
                self.take_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
                continue;
            }
            for op in ["?->", "::", "->"] {
                if rest.starts_with(op) {
                    self.pos += op.len();
                    return Some(Token::Punct(op));
                }
            }
            let start = self.pos;
            self.pos += c.len_utf8();
            return Some(Token::Punct(&self.src[start..self.pos]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token<'_>> {
        Lexer::new(src).collect()
    }

    #[test]
    fn test_qualified_names_are_single_tokens() {
        assert_eq!(
            tokens("namespace App\\Http;"),
            vec![
                Token::Name("namespace"),
                Token::Name("App\\Http"),
                Token::Punct(";"),
            ]
        );
    }

    #[test]
    fn test_comments_and_strings_are_skipped() {
        let src = "// class A\n# class B\n/* class C */ 'class D' \"class E\" class F";
        assert_eq!(tokens(src), vec![Token::Name("class"), Token::Name("F")]);
    }

    #[test]
    fn test_attribute_opener_is_not_a_comment() {
        let src = "#[Route(['GET'], '/x')] class F";
        let toks = tokens(src);
        assert_eq!(toks[0], Token::Punct("#["));
        assert!(toks.contains(&Token::Name("F")));
    }

    #[test]
    fn test_heredoc_body_is_skipped() {
        let src = "$x = <<<'PHP'\nclass Inner {}\nPHP;\nclass Outer {}";
        let names: Vec<_> = tokens(src)
            .into_iter()
            .filter_map(|t| match t {
                Token::Name(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["class", "Outer"]);
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(
            tokens("Foo::class $a?->b"),
            vec![
                Token::Name("Foo"),
                Token::Punct("::"),
                Token::Name("class"),
                Token::Variable("a"),
                Token::Punct("?->"),
                Token::Name("b"),
            ]
        );
    }

    #[test]
    fn test_unterminated_comment_ends_input() {
        assert!(tokens("/* class A").is_empty());
    }
}
