use crate::models::ocr_result::{OcrLine, OcrResult, TextBounds};
use crate::models::parsed_stat::{EvaluatedStat, ParsedStat};
use crate::models::stat_rule::RuleSet;
use crate::utils::text::replace_at;
use regex::Regex;
use tracing::trace;

/// Words at or below this confidence are OCR noise and get dropped
const MIN_WORD_CONFIDENCE: f64 = 40.0;

/// Characters the recognizer tends to produce for the bullet glyph that
/// leads every rollable stat line
const BULLET_CHARS: &[char] = &['©', '@', '%', '+', 'o', '0', '£', 'O', '•'];

/// Characters commonly misread for the brackets around `min - max`
const BRACKET_PATTERN: &str = r"[\[|{(1l!\\/:;]\d+\.\d\s?-\s?\d+\.\d[\]|)}1l!\\/:;]";

/// One reassembled tooltip paragraph with the union of its line bounds
#[derive(Debug, Clone)]
struct Paragraph {
    text: String,
    bounds: TextBounds,
}

fn is_bullet_char(c: char) -> bool {
    BULLET_CHARS.contains(&c)
}

/// A recognized line opening with a bullet-like character or a digit
/// begins a new stat paragraph; anything else continues a wrapped one.
fn starts_new_paragraph(line: &str) -> bool {
    match line.trim_start().chars().next() {
        Some(c) => is_bullet_char(c) || c.is_ascii_digit(),
        None => false,
    }
}

/// Line text rebuilt from its words with the low-confidence ones dropped.
/// Falls back to the raw line text when the engine gave no word detail.
fn clean_line_text(line: &OcrLine) -> String {
    if line.words.is_empty() {
        return line.text.replace('\n', " ").trim().to_string();
    }
    line.words
        .iter()
        .filter(|w| w.confidence() > MIN_WORD_CONFIDENCE)
        .map(|w| w.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_paragraphs(result: &OcrResult) -> Vec<Paragraph> {
    let mut paragraphs: Vec<Paragraph> = Vec::new();

    for line in &result.lines {
        let cleaned = clean_line_text(line);
        if paragraphs.is_empty() || starts_new_paragraph(&line.text) {
            paragraphs.push(Paragraph {
                text: cleaned,
                bounds: line.bbox,
            });
        } else if let Some(last) = paragraphs.last_mut() {
            if !cleaned.is_empty() {
                if !last.text.is_empty() {
                    last.text.push(' ');
                }
                last.text.push_str(&cleaned);
            }
            last.bounds = last.bounds.union(&line.bbox);
        }
    }

    paragraphs
}

/// Drop a lone leading bullet token; the value that follows must survive
fn strip_leading_bullet(text: &str) -> &str {
    let trimmed = text.trim_start();
    if let Some(first) = trimmed.split_whitespace().next() {
        if first.chars().count() <= 2 && first.chars().all(is_bullet_char) {
            return trimmed[first.len()..].trim_start();
        }
    }
    trimmed
}

/// The brackets around `min - max` often come back as 1, l, ! and
/// friends; when the shape matches, force them back to real brackets.
fn force_range_brackets(text: &str) -> String {
    let re = Regex::new(BRACKET_PATTERN).unwrap();
    if let Some(m) = re.find(text) {
        let start = text[..m.start()].chars().count();
        let len = m.as_str().chars().count();
        let fixed = replace_at(text, start, "[");
        return replace_at(&fixed, start + len - 1, "]");
    }
    text.to_string()
}

/// Evaluate one stat line's OCR output against the configured rules.
///
/// Best-effort by design: an unmatched pattern, an unknown stat name, or
/// a non-evaluable range all yield None, never an error.
pub fn evaluate_result(result: &OcrResult, rules: &RuleSet) -> Option<EvaluatedStat> {
    if rules.is_empty() {
        return None;
    }

    let pattern = format!(
        r"(?i).*?(\d+\.?\d*).*?\s.*?({}).*?\[?(\d+\.?\d*)(?:\s?-\s?(\d+\.?\d*))?\]?",
        rules.names_pattern()
    );
    let re = Regex::new(&pattern).ok()?;

    build_paragraphs(result)
        .iter()
        .find_map(|p| evaluate_paragraph(p, &re, rules))
}

fn evaluate_paragraph(paragraph: &Paragraph, re: &Regex, rules: &RuleSet) -> Option<EvaluatedStat> {
    let text = force_range_brackets(strip_leading_bullet(&paragraph.text));
    trace!(text = %text, "evaluating paragraph");

    let caps = re.captures(&text)?;
    let value_str = caps.get(1)?.as_str();
    let name = caps.get(2)?.as_str();
    let min: f64 = caps.get(3)?.as_str().parse().ok()?;
    let max: f64 = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => min,
    };
    // a misread pair comes back inverted now and then
    let (min, max) = if max < min { (max, min) } else { (min, max) };

    let rule = rules.find(name)?;

    let mut value: f64 = value_str.parse().ok()?;
    // a bracket misread as a digit folds into the value; exactly one
    // leading character comes off, and only when the value overshoots
    if value > max {
        value = value_str.get(1..)?.parse().ok()?;
    }

    if max == min {
        return None;
    }
    let percent_to_max = 100.0 * (value - min) / (max - min);
    if !percent_to_max.is_finite() {
        return None;
    }

    Some(EvaluatedStat {
        stat: ParsedStat {
            value,
            name: Some(rule.name.clone()),
            min,
            max,
            bounds: paragraph.bounds,
        },
        percent_to_max,
        qualifies: percent_to_max >= rule.percentage,
    })
}
