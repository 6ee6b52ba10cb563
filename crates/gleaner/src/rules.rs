//! Named, ordered pattern rules.
//!
//! Each parser reads its patterns from a list of [`PatternRule`]s instead of inlining regexes. A
//! list is tried in order and the first rule that matches wins, so precedence is simply position
//! in the list. Supporting another journal's conventions means adding or reordering rules in the
//! configuration file.
//!
//! Rules live in TOML as a name plus a regex string:
//!
//! ```toml
//! [[doi_rules]]
//! name = "doi-url"
//! pattern = 'https://doi\.org/(\S+)'
//! ```

use regex::Captures;

use super::*;

/// A regular expression with a name for logging and configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRule {
  /// Short identifier shown in logs when the rule matches
  pub name:    String,
  /// Pattern to search for; the consuming parser decides which capture groups it reads
  #[serde(deserialize_with = "deserialize_regex", serialize_with = "serialize_regex")]
  pub pattern: Regex,
}

impl PatternRule {
  /// Compiles a rule from a name and a regex string.
  pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
    Ok(Self { name: name.into(), pattern: Regex::new(pattern)? })
  }

  /// Number of capture groups in the pattern, not counting the implicit whole-match group.
  pub fn capture_groups(&self) -> usize { self.pattern.captures_len() - 1 }

  /// Fails with [`GleanerError::RuleCaptures`] unless the pattern has at least `required` capture
  /// groups.
  pub fn require_captures(&self, required: usize) -> Result<()> {
    if self.capture_groups() < required {
      return Err(GleanerError::RuleCaptures(self.name.clone(), required));
    }
    Ok(())
  }
}

/// Returns the first rule in `rules` that matches `text`, together with its captures.
pub fn first_match<'r, 't>(
  rules: &'r [PatternRule],
  text: &'t str,
) -> Option<(&'r PatternRule, Captures<'t>)> {
  rules.iter().find_map(|rule| {
    let captures = rule.pattern.captures(text)?;
    trace!("Rule \"{}\" matched {:?}", rule.name, captures.get(0).map(|m| m.as_str()));
    Some((rule, captures))
  })
}

/// Deserializes a [`Regex`] from its string form.
fn deserialize_regex<'de, D>(deserializer: D) -> std::result::Result<Regex, D::Error>
where D: serde::Deserializer<'de> {
  let s: String = String::deserialize(deserializer)?;
  Regex::new(&s).map_err(serde::de::Error::custom)
}

/// Serializes a [`Regex`] as the string it was compiled from.
fn serialize_regex<S>(regex: &Regex, serializer: S) -> std::result::Result<S::Ok, S::Error>
where S: serde::Serializer {
  serializer.serialize_str(regex.as_str())
}
