//! Display-name parsing for enemies whose structured identity was lost
//!
//! Hosts that persisted only the rendered name (older progress data) can
//! recover an approximate identity here. The parse is lossy for multi-word
//! species or prefixes, so freshly generated enemies always carry their
//! [`EnemyIdentity`] instead.
//!
//! Rules:
//! - one token: species only
//! - contains the token `of`: tokens before it are `[prefix] species`
//!   (the first is the prefix when there are two or more), `of ...` is the suffix
//! - otherwise: first token is the prefix, the rest is the species

use super::EnemyIdentity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEnemyName {
    pub prefix: Option<String>,
    pub enemy_type: String,
    pub suffix: Option<String>,
}

/// Split a rendered enemy name back into prefix, species and suffix
pub fn parse_enemy_name(name: &str) -> ParsedEnemyName {
    let tokens: Vec<&str> = name.split_whitespace().collect();

    match tokens.as_slice() {
        [] => ParsedEnemyName {
            prefix: None,
            enemy_type: String::new(),
            suffix: None,
        },
        [only] => ParsedEnemyName {
            prefix: None,
            enemy_type: only.to_string(),
            suffix: None,
        },
        _ => match tokens.iter().position(|t| *t == "of") {
            // A leading "of" leaves nothing for the species; treat the whole thing as one
            Some(0) => ParsedEnemyName {
                prefix: None,
                enemy_type: tokens.join(" "),
                suffix: None,
            },
            Some(of) => {
                let head = &tokens[..of];
                let suffix = Some(tokens[of..].join(" "));
                if head.len() >= 2 {
                    ParsedEnemyName {
                        prefix: Some(head[0].to_string()),
                        enemy_type: head[1..].join(" "),
                        suffix,
                    }
                } else {
                    ParsedEnemyName {
                        prefix: None,
                        enemy_type: head.join(" "),
                        suffix,
                    }
                }
            }
            None => ParsedEnemyName {
                prefix: Some(tokens[0].to_string()),
                enemy_type: tokens[1..].join(" "),
                suffix: None,
            },
        },
    }
}

impl From<ParsedEnemyName> for EnemyIdentity {
    /// The group is unknown after parsing; the species stands in for both
    fn from(parsed: ParsedEnemyName) -> Self {
        EnemyIdentity {
            prefix: parsed.prefix,
            group: parsed.enemy_type.clone(),
            variant: parsed.enemy_type,
            suffix: parsed.suffix,
        }
    }
}
