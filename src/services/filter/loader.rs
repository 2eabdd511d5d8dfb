use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::constants::filter::COMMENT_PREFIX;

/// Parse a phrase dictionary: one phrase per line, `#` starts a comment line
pub fn parse_phrase_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(|line| line.to_lowercase())
        .collect()
}

/// Parse a comma-separated phrase list such as `BANNED_WORDS` or a command argument
pub fn parse_phrase_csv(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(|phrase| phrase.trim())
        .filter(|phrase| !phrase.is_empty())
        .map(|phrase| phrase.to_lowercase())
        .collect()
}

/// Read a phrase dictionary from disk. A missing file is an empty dictionary.
pub async fn load_phrase_file(path: impl AsRef<Path>) -> Result<Vec<String>, std::io::Error> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let phrases = parse_phrase_lines(&content);
            info!("Loaded {} phrases from {}", phrases.len(), path.display());
            Ok(phrases)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Phrase file {} not found, using an empty list", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_skips_comments_and_blanks() {
        let content = "# hard list\nFoo\n\n   bar baz  \n  # indented comment\r\nQUX\r\n";
        assert_eq!(parse_phrase_lines(content), vec!["foo", "bar baz", "qux"]);
    }

    #[test]
    fn test_parse_csv() {
        assert_eq!(
            parse_phrase_csv(" Spoiler , leak,, ,Big Reveal"),
            vec!["spoiler", "leak", "big reveal"]
        );
        assert!(parse_phrase_csv("").is_empty());
        assert!(parse_phrase_csv(" , ,").is_empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let phrases =
            tokio_test::block_on(load_phrase_file("/definitely/not/here/.slurlist")).unwrap();
        assert!(phrases.is_empty());
    }

    #[tokio::test]
    async fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("tripwire-phrases-{}", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "# comment\nAlpha\nbeta gamma\n").await.unwrap();

        let phrases = load_phrase_file(&path).await.unwrap();
        assert_eq!(phrases, vec!["alpha", "beta gamma"]);

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
