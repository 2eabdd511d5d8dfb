use crate::db::models::FlagAction;
use crate::services::filter::MatchResult;

/// The single action taken for a message. Stronger verdicts suppress weaker ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// Soft tier: notify moderators and record for review
    Flag { phrases: Vec<String> },
    /// Channel-specific ban: delete and tell the author which phrase
    ChannelBan { phrases: Vec<String> },
    /// Hard tier: auto-delete, notify moderators, warn the author
    Delete { phrases: Vec<String> },
}

impl Verdict {
    pub fn from_result(result: &MatchResult) -> Self {
        let hard = result.hard();
        if !hard.is_empty() {
            return Verdict::Delete { phrases: owned(hard) };
        }

        let scoped = result.scoped();
        if !scoped.is_empty() {
            return Verdict::ChannelBan {
                phrases: owned(scoped),
            };
        }

        let soft = result.soft();
        if !soft.is_empty() {
            return Verdict::Flag { phrases: owned(soft) };
        }

        Verdict::Allow
    }

    /// Whether the message gets removed
    pub fn deletes(&self) -> bool {
        matches!(self, Verdict::Delete { .. } | Verdict::ChannelBan { .. })
    }

    pub fn action(&self) -> Option<FlagAction> {
        match self {
            Verdict::Allow => None,
            Verdict::Flag { .. } => Some(FlagAction::Flagged),
            Verdict::ChannelBan { .. } => Some(FlagAction::ChannelBan),
            Verdict::Delete { .. } => Some(FlagAction::Deleted),
        }
    }

    pub fn phrases(&self) -> &[String] {
        match self {
            Verdict::Allow => &[],
            Verdict::Flag { phrases }
            | Verdict::ChannelBan { phrases }
            | Verdict::Delete { phrases } => phrases,
        }
    }
}

fn owned(phrases: Vec<&str>) -> Vec<String> {
    phrases.into_iter().map(String::from).collect()
}
