//! `:shortcode:` to emoji substitution.

const SHORTCODES: &[(&str, &str)] = &[
    ("+1", "👍"),
    ("-1", "👎"),
    ("bug", "🐛"),
    ("bulb", "💡"),
    ("check", "✔️"),
    ("clap", "👏"),
    ("coffee", "☕"),
    ("construction", "🚧"),
    ("warning", "⚠️"),
    ("fire", "🔥"),
    ("heart", "❤️"),
    ("heavy_check_mark", "✔️"),
    ("information_source", "ℹ️"),
    ("joy", "😂"),
    ("memo", "📝"),
    ("ok_hand", "👌"),
    ("pencil", "📝"),
    ("point_right", "👉"),
    ("pray", "🙏"),
    ("question", "❓"),
    ("rocket", "🚀"),
    ("smile", "😄"),
    ("smiley", "😃"),
    ("sparkles", "✨"),
    ("star", "⭐"),
    ("tada", "🎉"),
    ("thinking", "🤔"),
    ("thumbsdown", "👎"),
    ("thumbsup", "👍"),
    ("white_check_mark", "✅"),
    ("wink", "😉"),
    ("wrench", "🔧"),
    ("x", "❌"),
    ("zap", "⚡"),
];

fn lookup(name: &str) -> Option<&'static str> {
    SHORTCODES
        .iter()
        .find(|(code, _)| *code == name)
        .map(|(_, emoji)| *emoji)
}

fn is_shortcode_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')
}

/// Replaces known `:shortcode:` sequences with their emoji.
///
/// Unknown codes and lone colons (`10:30`, `key: value`) are left untouched.
pub fn replace_shortcodes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let name_len = after
            .find(|c: char| !is_shortcode_char(c))
            .unwrap_or(after.len());

        if name_len > 0
            && after[name_len..].starts_with(':')
            && let Some(emoji) = lookup(&after[..name_len])
        {
            out.push_str(emoji);
            rest = &after[name_len + 1..];
        } else {
            out.push(':');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_known_shortcodes() {
        assert_eq!(replace_shortcodes(":tada: shipped :rocket:"), "🎉 shipped 🚀");
        assert_eq!(replace_shortcodes(":+1:"), "👍");
    }

    #[test]
    fn test_leaves_unknown_shortcodes() {
        assert_eq!(replace_shortcodes(":not_an_emoji:"), ":not_an_emoji:");
    }

    #[test]
    fn test_leaves_plain_colons() {
        assert_eq!(replace_shortcodes("at 10:30: done"), "at 10:30: done");
        assert_eq!(replace_shortcodes("key: value"), "key: value");
        assert_eq!(replace_shortcodes("::"), "::");
        assert_eq!(replace_shortcodes("trailing:"), "trailing:");
    }

    #[test]
    fn test_adjacent_shortcodes() {
        assert_eq!(replace_shortcodes(":fire::fire:"), "🔥🔥");
    }

    #[test]
    fn test_multibyte_text_around_shortcodes() {
        assert_eq!(replace_shortcodes("完了 :sparkles: です"), "完了 ✨ です");
    }
}
