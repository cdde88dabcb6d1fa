//! `printf`-style message formatting
//!
//! Mirrors the familiar `console.log` behaviour so existing format strings
//! keep working: `%s` (string), `%d` (number), `%j` (JSON) and `%%`.

use super::args::{number_to_string, Arg};

/// Render a list of log arguments into a single message.
///
/// When the first argument is text it is scanned for `%s`, `%d`, `%j` and
/// `%%`. Each of the first three consumes one of the following arguments;
/// `%%` becomes a literal `%`. As soon as the arguments run out every remaining
/// token, `%%` included, is copied through untouched. Leftover arguments are
/// appended separated by a single space.
///
/// When the first argument is not text every argument is inspected and the
/// results are joined with spaces.
///
/// ```
/// use devnull_logger::core::format::format;
/// use devnull_logger::Arg;
///
/// let args = [Arg::from("%d + %d = %d"), Arg::from(1), Arg::from(2), Arg::from(3)];
/// assert_eq!(format(&args), "1 + 2 = 3");
/// ```
pub fn format(args: &[Arg]) -> String {
    let Some(first) = args.first() else {
        return String::new();
    };

    let Some(template) = first.as_text() else {
        return args
            .iter()
            .map(Arg::inspect)
            .collect::<Vec<_>>()
            .join(" ");
    };

    let mut next = 1;
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let token = match chars.peek() {
            Some(&(_, t @ ('s' | 'd' | 'j' | '%'))) => t,
            _ => {
                out.push('%');
                continue;
            }
        };
        chars.next();

        if next >= args.len() {
            out.push('%');
            out.push(token);
            continue;
        }

        match token {
            's' => {
                out.push_str(&args[next].to_string());
                next += 1;
            }
            'd' => {
                out.push_str(&number_to_string(args[next].to_number()));
                next += 1;
            }
            'j' => {
                let json = serde_json::to_string(&args[next].to_json_value())
                    .unwrap_or_else(|_| "null".to_string());
                out.push_str(&json);
                next += 1;
            }
            _ => out.push('%'),
        }
    }

    for arg in &args[next..] {
        out.push(' ');
        if arg.is_composite() {
            out.push_str(&arg.inspect());
        } else {
            out.push_str(&arg.to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args<const N: usize>(values: [Arg; N]) -> Vec<Arg> {
        values.to_vec()
    }

    #[test]
    fn test_format_strings() {
        assert_eq!(format(&args(["foo %s".into(), "bar".into()])), "foo bar");
        assert_eq!(
            format(&args(["foo %s baz %s".into(), "bar".into(), "lol".into()])),
            "foo bar baz lol"
        );
        assert_eq!(format(&args(["foo %s".into(), 1.into()])), "foo 1");
    }

    #[test]
    fn test_format_json() {
        let arr = json!([1, 2]);
        let obj = json!({ "foo": "bar" });
        let nest = json!({ "arr": [1, 2] });

        assert_eq!(format(&args(["hi %j".into(), arr.into()])), "hi [1,2]");
        assert_eq!(format(&args(["hi %j".into(), obj.into()])), "hi {\"foo\":\"bar\"}");
        assert_eq!(
            format(&args(["hi %j".into(), nest.into()])),
            "hi {\"arr\":[1,2]}"
        );
        assert_eq!(format(&args(["%j".into(), "x".into()])), "\"x\"");
    }

    #[test]
    fn test_format_digits() {
        assert_eq!(
            format(&args(["%d + %d = %d".into(), 1.into(), 2.into(), 3.into()])),
            "1 + 2 = 3"
        );
        assert_eq!(format(&args(["%d".into(), "nope".into()])), "NaN");
        assert_eq!(format(&args(["%d".into(), "2.5".into()])), "2.5");
    }

    #[test]
    fn test_escape_percent() {
        assert_eq!(format(&args(["wassup %".into()])), "wassup %");
        assert_eq!(format(&args(["wassup %%".into()])), "wassup %%");
        assert_eq!(
            format(&args(["100%% %s".into(), "done".into()])),
            "100% done"
        );
    }

    #[test]
    fn test_unmatched_tokens_pass_through() {
        assert_eq!(format(&args(["%s and %s".into(), "one".into()])), "one and %s");
        assert_eq!(format(&args(["%x %s".into(), "y".into()])), "%x y");
    }

    #[test]
    fn test_leftover_arguments() {
        assert_eq!(
            format(&args(["foo".into(), "bar".into(), 1.into(), Arg::Null])),
            "foo bar 1 null"
        );
        assert_eq!(
            format(&args(["foo".into(), json!({ "a": 1 }).into()])),
            "foo { a: 1 }"
        );
    }

    #[test]
    fn test_non_string_first_argument() {
        assert_eq!(
            format(&args([json!({ "a": 1 }).into(), "b".into(), 2.into()])),
            "{ a: 1 } 'b' 2"
        );
        assert_eq!(format(&args([42.into()])), "42");
    }

    #[test]
    fn test_empty() {
        assert_eq!(format(&[]), "");
        assert_eq!(format(&args(["".into()])), "");
    }
}
