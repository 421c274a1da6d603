//! Fact rows and the plain-text fact format.
//!
//! Facts travel as line-oriented text (`"Population: 2.1 million"`). This
//! module owns the parsing rule and the renderings built back from stored
//! rows.

use serde::{Deserialize, Serialize};

/// One labelled fact about a city, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityFact {
  pub fact_id:    i64,
  pub city_id:    i64,
  /// Short label, e.g. `"Population"` or `"History"`.
  pub fact_type:  String,
  pub fact_value: String,
}

/// Input to [`crate::store::CityStore::replace_facts`].
/// Ids and ownership are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFact {
  pub fact_type:  String,
  pub fact_value: String,
}

impl NewFact {
  pub fn new(
    fact_type: impl Into<String>,
    fact_value: impl Into<String>,
  ) -> Self {
    Self {
      fact_type:  fact_type.into(),
      fact_value: fact_value.into(),
    }
  }
}

/// Label given to lines that carry no explicit `type:` prefix.
pub const DEFAULT_FACT_TYPE: &str = "Fact";

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Split free text into `(fact_type, fact_value)` pairs, one per non-blank
/// line.
///
/// The text before the first colon (trimmed) is the type and the remainder
/// (trimmed) the value; a line without a colon gets the literal type
/// [`DEFAULT_FACT_TYPE`] and the whole trimmed line as value. Blank lines
/// produce nothing.
pub fn parse_facts(text: &str) -> Vec<NewFact> {
  text
    .lines()
    .filter_map(|line| {
      let line = line.trim();
      if line.is_empty() {
        return None;
      }
      Some(match line.split_once(':') {
        Some((fact_type, fact_value)) => {
          NewFact::new(fact_type.trim(), fact_value.trim())
        }
        None => NewFact::new(DEFAULT_FACT_TYPE, line),
      })
    })
    .collect()
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Rebuild the line-per-fact text block served for a cached city.
pub fn render_facts(city_name: &str, facts: &[CityFact]) -> String {
  let mut out = format!("Facts about {city_name}:\n\n");
  for fact in facts {
    out.push_str(&fact.fact_type);
    out.push_str(": ");
    out.push_str(&fact.fact_value);
    out.push('\n');
  }
  out
}

/// Decorate raw fact text for display: an upper-cased banner followed by
/// re-numbered non-blank lines. Purely textual.
pub fn render_display(city_name: &str, facts_text: &str) -> String {
  let mut out = format!("✨ {} ✨\n\n", city_name.to_uppercase());
  out.push_str("Here are some interesting facts:\n\n");
  for (i, line) in facts_text
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .enumerate()
  {
    out.push_str(&format!("{}. {line}\n", i + 1));
  }
  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
