use serenity::all::UserId;

/// Format a user mention
pub fn mention_user(user_id: UserId) -> String {
    format!("<@{}>", user_id)
}

/// Format a channel mention
pub fn mention_channel(channel_id: u64) -> String {
    format!("<#{}>", channel_id)
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format phrases for display
pub fn format_phrases(phrases: &[String]) -> String {
    if phrases.is_empty() {
        "None".to_string()
    } else {
        phrases
            .iter()
            .map(|p| format!("`{}`", p.replace('`', "'")))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Quote every line of a message
pub fn blockquote(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer message", 8), "a lon...");
        assert_eq!(truncate("abcdef", 2), "ab");
        // Counts characters, not bytes
        assert_eq!(truncate("ééééé", 5), "ééééé");
    }

    #[test]
    fn test_format_phrases() {
        assert_eq!(format_phrases(&[]), "None");
        assert_eq!(
            format_phrases(&["foo".to_string(), "bar `baz`".to_string()]),
            "`foo`, `bar 'baz'`"
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(blockquote("one\ntwo"), "> one\n> two");
    }
}
