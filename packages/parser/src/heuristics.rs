//! Keyword tier.
//!
//! Deterministic and total: every instruction maps to at least one
//! operation. Branches are tried in a fixed order (add, delete, heading,
//! table) and the first keyword hit decides the kind, even if the content
//! extracted for it turns out empty.

use regex::Regex;
use scribe_common::{Operation, TableSpec, MAX_TABLE_COLS, MAX_TABLE_ROWS};
use std::sync::OnceLock;
use tracing::debug;

const ADD_KEYWORDS: &[&str] = &["添加", "加入", "插入"];
const DELETE_KEYWORDS: &[&str] = &["删除", "移除", "去掉"];
const HEADING_KEYWORDS: &[&str] = &["标题", "题目", "章节"];
const TABLE_KEYWORDS: &[&str] = &["表格", "表"];
const LIST_KEYWORDS: &[&str] = &["列表"];

const DEFAULT_TABLE_ROWS: usize = 3;
const DEFAULT_TABLE_COLS: usize = 2;

const LIST_SEPARATORS: &[char] = &['、', '，', ',', ';', '；'];
const COLONS: &[char] = &['：', ':'];
const CLOSING_PUNCTUATION: &[char] = &['。', '.', '!', '！'];

struct Patterns {
    add: Regex,
    delete: Regex,
    heading: Regex,
    table: Regex,
    list: Regex,
    ordered: Regex,
    unordered: Regex,
    level_two: Regex,
    level_three: Regex,
    rows: Regex,
    cols: Regex,
    /// Tried in order; first capture wins
    content: Vec<Regex>,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        add: Regex::new(r"\b(add|insert|append)\b").unwrap(),
        delete: Regex::new(r"\b(delete|remove)\b").unwrap(),
        heading: Regex::new(r"\b(heading|title|section)\b").unwrap(),
        table: Regex::new(r"\btable\b").unwrap(),
        list: Regex::new(r"\blist\b").unwrap(),
        ordered: Regex::new(r"有序|编号|\b(numbered|ordered)\b").unwrap(),
        unordered: Regex::new(r"无序|\bunordered\b").unwrap(),
        level_two: Regex::new(r"二级|2级|level\s*2|\bh2\b").unwrap(),
        level_three: Regex::new(r"三级|3级|level\s*3|\bh3\b").unwrap(),
        rows: Regex::new(r"(\d+)\s*(?:行|rows?\b)").unwrap(),
        cols: Regex::new(r"(\d+)\s*(?:列|columns?\b|cols?\b)").unwrap(),
        content: vec![
            Regex::new(r#""([^"]+)""#).unwrap(),
            Regex::new(r"“([^”]+)”").unwrap(),
            Regex::new(r"「([^」]+)」").unwrap(),
            Regex::new(r"内容[是为][:：]?\s*(.+)").unwrap(),
            Regex::new(r"添加[:：]?\s*(.+)").unwrap(),
            Regex::new(r"插入[:：]?\s*(.+)").unwrap(),
        ],
    })
}

fn mentions(lowered: &str, keywords: &[&str], english: &Regex) -> bool {
    keywords.iter().any(|k| lowered.contains(k)) || english.is_match(lowered)
}

/// Text the instruction talks about: quoted text first, then the tail after
/// a lead-in phrase, else the whole instruction.
pub fn extract_content(instruction: &str) -> String {
    patterns()
        .content
        .iter()
        .find_map(|re| re.captures(instruction).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| instruction.trim().to_string())
}

/// Items enumerated after the last colon, e.g. `包含：甲、乙、丙`
fn list_items(instruction: &str) -> Option<Vec<String>> {
    let (_, tail) = instruction.rsplit_once(COLONS)?;
    let items: Vec<String> = tail
        .split(LIST_SEPARATORS)
        .map(|item| item.trim().trim_end_matches(CLOSING_PUNCTUATION).trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

fn heading_level(lowered: &str) -> u8 {
    let p = patterns();
    if p.level_two.is_match(lowered) {
        2
    } else if p.level_three.is_match(lowered) {
        3
    } else {
        1
    }
}

/// Count captured by `re`, capped at `max`; zero or unparseable means `default`
fn count(re: &Regex, lowered: &str, default: usize, max: usize) -> usize {
    re.captures(lowered)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map_or(default, |n| n.min(max))
}

fn add_operation(instruction: &str, lowered: &str) -> Option<Operation> {
    let p = patterns();
    if mentions(lowered, LIST_KEYWORDS, &p.list) {
        if let Some(items) = list_items(instruction) {
            let ordered = p.ordered.is_match(lowered) && !p.unordered.is_match(lowered);
            return Some(Operation::add_list(items, ordered));
        }
    }

    let content = extract_content(instruction);
    (!content.is_empty()).then(|| Operation::add_text(content))
}

fn classify(instruction: &str) -> Option<Operation> {
    let p = patterns();
    let lowered = instruction.to_lowercase();

    if mentions(&lowered, ADD_KEYWORDS, &p.add) {
        return add_operation(instruction, &lowered);
    }

    if mentions(&lowered, DELETE_KEYWORDS, &p.delete) {
        let content = extract_content(instruction);
        return (!content.is_empty()).then(|| Operation::delete_text(content));
    }

    if mentions(&lowered, HEADING_KEYWORDS, &p.heading) {
        let content = extract_content(instruction);
        let level = heading_level(&lowered);
        return (!content.is_empty()).then(|| Operation::add_heading(content, level));
    }

    if mentions(&lowered, TABLE_KEYWORDS, &p.table) {
        let rows = count(&p.rows, &lowered, DEFAULT_TABLE_ROWS, MAX_TABLE_ROWS);
        let cols = count(&p.cols, &lowered, DEFAULT_TABLE_COLS, MAX_TABLE_COLS);
        return Some(Operation::add_table(TableSpec::new(rows, cols)));
    }

    None
}

/// Map `instruction` to operations without a model. Never empty.
pub fn parse(instruction: &str) -> Vec<Operation> {
    let operation = classify(instruction).unwrap_or_else(|| {
        debug!("No keyword matched, adding instruction as text");
        Operation::add_text(instruction)
    });
    vec![operation]
}
