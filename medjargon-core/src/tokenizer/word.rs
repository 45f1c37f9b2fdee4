//! # Word-level Parsers
//!
//! nom parsers used by [`Tokenizer`](super::token::Tokenizer). Each parser
//! recognizes one token at the head of the input and returns the rest.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{digit1, one_of, satisfy},
    combinator::{map, not, recognize},
    error::{VerboseError, context},
    multi::{many0, many1},
    sequence::{pair, terminated, tuple},
};

use super::token::{Token, TokenKind};

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '’'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Consumes a run of whitespace.
pub fn parse_whitespace(input: &str) -> ParserResult<&str> {
    context("whitespace", take_while1(char::is_whitespace))(input)
}

/// Parses numbers with decimal or thousands separators (`2.5`, `1,000`).
///
/// Plain digit runs are left to [`parse_word`] so that `19-year-old` stays
/// one token.
pub fn parse_decimal(input: &str) -> ParserResult<Token> {
    context(
        "decimal",
        map(
            recognize(pair(digit1, many1(pair(one_of(".,"), digit1)))),
            |number: &str| Token::new(TokenKind::Number, number),
        ),
    )(input)
}

/// Parses a contraction suffix: `n't`, `'s`, `'re`, `'ve`, `'ll`, `'d`, `'m`.
pub fn parse_clitic(input: &str) -> ParserResult<Token> {
    context(
        "clitic",
        map(
            terminated(
                alt((
                    recognize(tuple((
                        tag_no_case("n"),
                        satisfy(is_apostrophe),
                        tag_no_case("t"),
                    ))),
                    recognize(pair(
                        satisfy(is_apostrophe),
                        alt((
                            tag_no_case("s"),
                            tag_no_case("re"),
                            tag_no_case("ve"),
                            tag_no_case("ll"),
                            tag_no_case("d"),
                            tag_no_case("m"),
                        )),
                    )),
                )),
                not(satisfy(is_word_char)),
            ),
            |clitic: &str| Token::new(TokenKind::Clitic, clitic),
        ),
    )(input)
}

/// Parses a word: alphanumeric runs joined by `-` or `_`.
///
/// A trailing `n` that begins a negation (`don't`) is left in the input for
/// [`parse_clitic`]. Words made only of digits are tagged as numbers.
pub fn parse_word(input: &str) -> ParserResult<Token> {
    let (rest, word) = context(
        "word",
        recognize(pair(
            take_while1(is_word_char),
            many0(pair(one_of("-_"), take_while1(is_word_char))),
        )),
    )(input)?;

    let (rest, word) = match negation_stem(word, rest) {
        Some(stem) => (&input[stem.len()..], stem),
        None => (rest, word),
    };

    let kind = if word.chars().all(|c| c.is_ascii_digit()) {
        TokenKind::Number
    } else {
        TokenKind::Word
    };
    Ok((rest, Token::new(kind, word)))
}

fn negation_stem<'a>(word: &'a str, rest: &str) -> Option<&'a str> {
    let stem = word.strip_suffix(['n', 'N'])?;
    if stem.is_empty() || stem.ends_with(['-', '_']) {
        return None;
    }
    let mut chars = rest.chars();
    let apostrophe = chars.next().is_some_and(is_apostrophe);
    let t = chars.next().is_some_and(|c| c.eq_ignore_ascii_case(&'t'));
    let boundary = chars.next().is_none_or(|c| !is_word_char(c));
    (apostrophe && t && boundary).then_some(stem)
}

/// Parses punctuation or any other symbol. A run of the same character is
/// kept together.
pub fn parse_punctuation(input: &str) -> ParserResult<Token> {
    let (_, first) = context("punctuation", satisfy(|c: char| !c.is_whitespace()))(input)?;
    let (rest, run) = take_while1(|c: char| c == first)(input)?;
    Ok((rest, Token::new(TokenKind::Punctuation, run)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word() {
        let (rest, token) = parse_word("emphysema and").unwrap();
        assert_eq!(token, Token::new(TokenKind::Word, "emphysema"));
        assert_eq!(rest, " and");

        let (rest, token) = parse_word("covid-19,").unwrap();
        assert_eq!(token.text, "covid-19");
        assert_eq!(rest, ",");

        let (_, token) = parse_word("120 mg").unwrap();
        assert_eq!(token.kind, TokenKind::Number);
    }

    #[test]
    fn test_parse_word_trailing_hyphen() {
        let (rest, token) = parse_word("pre- and").unwrap();
        assert_eq!(token.text, "pre");
        assert_eq!(rest, "- and");
    }

    #[test]
    fn test_parse_word_negation() {
        let (rest, token) = parse_word("doesn't").unwrap();
        assert_eq!(token.text, "does");
        assert_eq!(rest, "n't");

        // no split without the apostrophe-t boundary
        let (rest, token) = parse_word("Lyn'tam").unwrap();
        assert_eq!(token.text, "Lyn");
        assert_eq!(rest, "'tam");

        // a lone "n" is never reduced to nothing
        let (_, token) = parse_word("n't").unwrap();
        assert_eq!(token.text, "n");
    }

    #[test]
    fn test_parse_clitic() {
        let (rest, token) = parse_clitic("'s disease").unwrap();
        assert_eq!(token, Token::new(TokenKind::Clitic, "'s"));
        assert_eq!(rest, " disease");

        let (_, token) = parse_clitic("N'T!").unwrap();
        assert_eq!(token.text, "N'T");

        assert!(parse_clitic("'sup").is_err());
        assert!(parse_clitic("'x").is_err());
    }

    #[test]
    fn test_parse_decimal() {
        let (rest, token) = parse_decimal("2.5mg").unwrap();
        assert_eq!(token.text, "2.5");
        assert_eq!(rest, "mg");

        let (rest, token) = parse_decimal("37.5. Next").unwrap();
        assert_eq!(token, Token::new(TokenKind::Number, "37.5"));
        assert_eq!(rest, ". Next");

        assert!(parse_decimal("12 units").is_err());
    }

    #[test]
    fn test_parse_punctuation() {
        let (rest, token) = parse_punctuation("...)").unwrap();
        assert_eq!(token, Token::new(TokenKind::Punctuation, "..."));
        assert_eq!(rest, ")");
        assert!(parse_punctuation(" x").is_err());
    }

    #[test]
    fn test_parse_whitespace() {
        let (rest, ws) = parse_whitespace(" \t\n x").unwrap();
        assert_eq!(ws, " \t\n ");
        assert_eq!(rest, "x");
        assert!(parse_whitespace("x").is_err());
    }
}
