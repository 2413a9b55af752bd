use std::cmp::Ordering;

/// Orders granule URIs the way a human would: runs of digits compare by
/// numeric value rather than lexicographically, so `_9_` sorts before
/// `_10_`. Non-digit runs compare as plain text.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_tokens = tokenize(a).into_iter();
    let mut b_tokens = tokenize(b).into_iter();

    loop {
        match (a_tokens.next(), b_tokens.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Token::Digits(x)), Some(Token::Digits(y))) => match x.cmp(&y) {
                Ordering::Equal => continue,
                other => return other,
            },
            (Some(Token::Text(x)), Some(Token::Text(y))) => match x.cmp(&y) {
                Ordering::Equal => continue,
                other => return other,
            },
            // A digit run and a text run at the same position: text sorts first.
            (Some(Token::Digits(_)), Some(Token::Text(_))) => return Ordering::Greater,
            (Some(Token::Text(_)), Some(Token::Digits(_))) => return Ordering::Less,
        }
    }
}

pub fn natural_sort(items: &mut [String]) {
    items.sort_by(|a, b| natural_cmp(a, b));
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Digits(u64),
    Text(String),
}

fn tokenize(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut digits = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    digits.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Digits(digits.parse().unwrap_or(u64::MAX)));
        } else {
            let mut text = String::new();
            while let Some(&t) = chars.peek() {
                if t.is_ascii_digit() {
                    break;
                }
                text.push(t);
                chars.next();
            }
            tokens.push(Token::Text(text));
        }
    }

    tokens
}
