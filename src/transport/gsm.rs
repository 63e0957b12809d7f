//! Conversion of arbitrary text into the GSM 7-bit default alphabet.
//!
//! Output characters are GSM code points carried as `char`s (`'\x1B'` introduces the
//! extension table), ready to be percent-encoded onto the wire.

/// Encode `text` for the normal/flash (non-binary, non-UCS2) coding schemes.
///
/// Letters, digits and a fixed punctuation set pass through untouched; known accented and
/// symbol characters are substituted; anything else becomes a single space.
pub fn encode_gsm(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if is_passthrough(ch) {
            out.push(ch);
        } else {
            out.push_str(substitute(ch).unwrap_or(" "));
        }
    }
    out
}

fn is_passthrough(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '/'
                | '#'
                | '%'
                | '&'
                | '"'
                | '\''
                | '='
                | '-'
                | '<'
                | '>'
                | '?'
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | '.'
                | ';'
                | ':'
        )
}

fn substitute(ch: char) -> Option<&'static str> {
    Some(match ch {
        '\n' => "\n",
        '\r' => "\r",
        '$' => "\x02",
        '@' => "\x00",

        // Greek capitals already sitting on their GSM positions.
        '\x10' => "\x10",
        '\x12' => "\x12",
        '\x13' => "\x13",
        '\x14' => "\x14",
        '\x15' => "\x15",
        '\x16' => "\x16",
        '\x17' => "\x17",
        '\x18' => "\x18",
        '\x19' => "\x19",
        '\x1A' => "\x1A",

        '[' => "\x1B<",
        '\\' => "\x1B/",
        ']' => "\x1B>",
        '^' => "\x1B\x14",
        '_' => "\x11",
        '{' => "\x1B(",
        '|' => "\x1B@",
        '}' => "\x1B)",
        '~' => "\x1B=",

        '\u{80}' | '¤' | '€' => "\x1Be",

        '¡' => "@",
        '£' => "\x01",
        '¥' => "\x03",
        '§' => "_",
        '¿' => "`",

        'À' | 'Á' | 'Â' | 'Ã' => "A",
        'Ä' => "[",
        'Å' => "\x0E",
        'Æ' => "\x1C",
        'Ç' => "\x09",
        'È' | 'Ê' | 'Ë' => "E",
        'É' => "\x1F",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'Ð' => "D",
        'Ñ' => "]",
        'Ò' | 'Ó' | 'Ô' | 'Õ' => "O",
        'Ö' => "\\",
        'Ø' => "\x0B",
        'Ù' | 'Ú' | 'Û' => "U",
        'Ü' => "^",
        'Ý' => "Y",
        'ß' => "\x1E",

        'à' => "\x7F",
        'á' | 'â' | 'ã' => "a",
        'ä' => "{",
        'å' => "\x0F",
        'æ' => "\x1D",
        'ç' => "c",
        'è' => "\x04",
        'é' => "\x05",
        'ê' | 'ë' => "e",
        'ì' => "\x07",
        'í' | 'î' | 'ï' => "i",
        'ð' => "d",
        'ñ' => "}",
        'ò' => "\x08",
        'ó' | 'ô' | 'õ' => "o",
        'ö' => "|",
        'ø' => "\x0C",
        'ù' => "\x06",
        'ú' | 'û' => "u",
        'ü' => "~",
        'ý' => "y",
        _ => return None,
    })
}
