//! Result Parser
//!
//! Turns the model's free-form reply into a total [`OptimizationResult`].
//!
//! Extraction runs as a chain of typed extractors, first success wins:
//!
//! 1. **Strict**: the greedy span from the first `{` to the last `}` parsed
//!    as JSON. Accepted when `optimizedPrompt` is a non-empty string; missing
//!    sub-fields are backfilled with defaults.
//! 2. **Targeted**: independent regex extraction of `optimizedPrompt` and
//!    `improvements` from the raw text.
//! 3. **Default**: fixed fallbacks; `optimizedPrompt` falls back to the
//!    original prompt so optimization degrades to a no-op.
//!
//! Parsing never fails. Degradation is reported through [`ParseReport`]
//! for server-side logging only.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::{Analysis, OptimizationResult};

pub const DEFAULT_IMPROVEMENT: &str = "Improved structure and clarity";
pub const DEFAULT_ORIGINAL_SCORE: u8 = 60;
pub const DEFAULT_OPTIMIZED_SCORE: u8 = 85;

static OPTIMIZED_PROMPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"optimizedPrompt"\s*:\s*"((?:[^"\\]|\\.)*)""#)
        .expect("optimizedPrompt pattern is valid")
});

static IMPROVEMENTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"improvements"\s*:\s*\[(.*?)\]"#).expect("improvements pattern is valid")
});

static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"((?:[^"\\]|\\.)*)""#).expect("quoted string pattern is valid")
});

/// Which extraction tier produced a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Strict,
    Targeted,
    Default,
}

/// Per-field provenance of a parsed reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub optimized_prompt: Tier,
    pub improvements: Tier,
    pub analysis: Tier,
    /// Why strict extraction was rejected, if it was
    pub strict_failure: Option<String>,
}

impl ParseReport {
    pub fn is_degraded(&self) -> bool {
        self.strict_failure.is_some()
            || [self.optimized_prompt, self.improvements, self.analysis]
                .iter()
                .any(|tier| *tier != Tier::Strict)
    }
}

/// Parser output: the total result and how it was obtained
#[derive(Debug, Clone)]
pub struct ParsedReply {
    pub result: OptimizationResult,
    pub report: ParseReport,
}

/// Parse a raw model reply. Never fails.
pub fn parse_reply(raw_text: &str, original_prompt: &str) -> ParsedReply {
    match strict_extract(raw_text) {
        Ok(strict) => from_strict(strict),
        Err(reason) => from_targeted(raw_text, original_prompt, reason),
    }
}

// ============================================
// Tier 1: strict
// ============================================

struct StrictReply {
    optimized_prompt: String,
    improvements: Option<Vec<String>>,
    analysis: Option<Analysis>,
}

/// Greedy span from the first `{` to the last `}`
fn json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn strict_extract(raw: &str) -> Result<StrictReply, String> {
    let span = json_span(raw).ok_or_else(|| "no JSON object span in reply".to_string())?;

    let value: Value =
        serde_json::from_str(span).map_err(|e| format!("JSON span did not parse: {e}"))?;

    let object = value
        .as_object()
        .ok_or_else(|| "JSON span is not an object".to_string())?;

    let optimized_prompt = non_empty_string(object.get("optimizedPrompt"))
        .ok_or_else(|| "JSON object has no usable optimizedPrompt".to_string())?;

    Ok(StrictReply {
        optimized_prompt,
        improvements: string_list(object.get("improvements")),
        analysis: object
            .get("analysis")
            .and_then(Value::as_object)
            .map(analysis_from_object),
    })
}

fn from_strict(strict: StrictReply) -> ParsedReply {
    let (improvements, improvements_tier) = match strict.improvements {
        Some(list) => (list, Tier::Strict),
        None => (default_improvements(), Tier::Default),
    };
    let (analysis, analysis_tier) = match strict.analysis {
        Some(analysis) => (analysis, Tier::Strict),
        None => (default_analysis(), Tier::Default),
    };

    ParsedReply {
        result: OptimizationResult {
            optimized_prompt: strict.optimized_prompt,
            improvements,
            analysis,
        },
        report: ParseReport {
            optimized_prompt: Tier::Strict,
            improvements: improvements_tier,
            analysis: analysis_tier,
            strict_failure: None,
        },
    }
}

/// Build an analysis from a JSON object, defaulting each missing sub-field
fn analysis_from_object(object: &Map<String, Value>) -> Analysis {
    let defaults = default_analysis();
    Analysis {
        original_score: score(object.get("originalScore")).unwrap_or(defaults.original_score),
        optimized_score: score(object.get("optimizedScore")).unwrap_or(defaults.optimized_score),
        key_strengths: string_list(object.get("keyStrengths")).unwrap_or(defaults.key_strengths),
        main_improvements: string_list(object.get("mainImprovements"))
            .unwrap_or(defaults.main_improvements),
        recommended_usage: non_empty_string(object.get("recommendedUsage"))
            .unwrap_or(defaults.recommended_usage),
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items: Vec<String> = value?
        .as_array()?
        .iter()
        .filter_map(|item| non_empty_string(Some(item)))
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Accepts integers, floats and numeric strings; clamps to 0..=100
fn score(value: Option<&Value>) -> Option<u8> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(0.0, 100.0) as u8)
}

// ============================================
// Tier 2: targeted
// ============================================

fn targeted_optimized_prompt(raw: &str) -> Option<String> {
    let captured = OPTIMIZED_PROMPT_RE.captures(raw)?.get(1)?.as_str();
    let text = unescape(captured);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn targeted_improvements(raw: &str) -> Option<Vec<String>> {
    let body = IMPROVEMENTS_RE.captures(raw)?.get(1)?.as_str();

    let quoted: Vec<String> = QUOTED_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let items = if quoted.is_empty() {
        body.split(',')
            .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        quoted
    };

    (!items.is_empty()).then_some(items)
}

/// Decode JSON string escapes, tolerating content that is not strictly valid JSON
fn unescape(captured: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{captured}\"")).unwrap_or_else(|_| {
        captured
            .replace("\\n", "\n")
            .replace("\\t", "\t")
            .replace("\\\"", "\"")
            .replace("\\\\", "\\")
    })
}

fn from_targeted(raw: &str, original_prompt: &str, strict_failure: String) -> ParsedReply {
    let (optimized_prompt, prompt_tier) = match targeted_optimized_prompt(raw) {
        Some(prompt) => (prompt, Tier::Targeted),
        None => (original_prompt.to_string(), Tier::Default),
    };
    let (improvements, improvements_tier) = match targeted_improvements(raw) {
        Some(list) => (list, Tier::Targeted),
        None => (default_improvements(), Tier::Default),
    };

    ParsedReply {
        result: OptimizationResult {
            optimized_prompt,
            improvements,
            analysis: default_analysis(),
        },
        report: ParseReport {
            optimized_prompt: prompt_tier,
            improvements: improvements_tier,
            analysis: Tier::Default,
            strict_failure: Some(strict_failure),
        },
    }
}

// ============================================
// Tier 3: defaults
// ============================================

pub fn default_improvements() -> Vec<String> {
    vec![DEFAULT_IMPROVEMENT.to_string()]
}

pub fn default_analysis() -> Analysis {
    Analysis {
        original_score: DEFAULT_ORIGINAL_SCORE,
        optimized_score: DEFAULT_OPTIMIZED_SCORE,
        key_strengths: vec![
            "Clear objective".to_string(),
            "Structured instructions".to_string(),
        ],
        main_improvements: vec!["Enhanced clarity and specificity".to_string()],
        recommended_usage: "Use this prompt with your target AI model for best results"
            .to_string(),
    }
}
