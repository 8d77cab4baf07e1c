//! parse a task document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4"
//! into sections of key - list-of-values pairs, e.g.
//! ```text
//! integrand
//!   function: cosh
//! interval
//!   a: 0.0 b: 1.0
//! partitions
//!   n: 10, 1000, 100000
//! ```
//! Lines starting with `//` or `#` are comments.
use crate::Utils::errors::TaskError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

type SectionMap = HashMap<String, Vec<Value>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl Value {
    /// integers are accepted where a float is expected (`a: 0`)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// word starting with a letter or underscore; used for titles and keys
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    // everything up to a separator: comma, whitespace or semicolon
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\r' | '\n' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if let Ok(val) = s.parse::<f64>() {
            Ok(Value::Float(val))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    });
    value_parser.parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let separator_comma = delimited(space0, tag(","), space0);
    separated_list1(separator_comma, parse_value).parse(input)
}

/// `key: value1, value2`, trailing whitespace (newlines included) is consumed
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_identifier, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim_start(), result))
}

/// title followed by one or more key-value pairs
fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, title) = parse_identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, space0)).parse(input)?;
    let mut section_map = HashMap::new();
    for (key, values) in pairs {
        section_map.insert(key, values);
    }
    Ok((input, (title, section_map)))
}

fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with('#') && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parsed task document: section title -> key -> values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDocument {
    pub sections: HashMap<String, SectionMap>,
}

impl TaskDocument {
    pub fn parse(input: &str) -> Result<TaskDocument, TaskError> {
        let filtered = filter_comments(input);
        if filtered.trim().is_empty() {
            return Ok(TaskDocument::default());
        }
        let mut parser = many1(delimited(multispace0, parse_section, multispace0));
        match parser.parse(filtered.as_str()) {
            Ok((remaining, sections)) => {
                if !remaining.trim().is_empty() {
                    return Err(TaskError::MalformedDocument(format!(
                        "failed to parse entire document, remaining: '{}'",
                        remaining
                    )));
                }
                let mut result: HashMap<String, SectionMap> = HashMap::new();
                // a repeated title extends the earlier section
                for (title, section_map) in sections {
                    result.entry(title).or_default().extend(section_map);
                }
                Ok(TaskDocument { sections: result })
            }
            Err(e) => Err(TaskError::MalformedDocument(format!("{:?}", e))),
        }
    }

    pub fn from_file(path: &Path) -> Result<TaskDocument, TaskError> {
        let content = fs::read_to_string(path)?;
        TaskDocument::parse(&content)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&[Value]> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(|v| v.as_slice())
    }

    fn invalid(section: &str, key: &str, expected: &'static str) -> TaskError {
        TaskError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            expected,
        }
    }

    fn single(&self, section: &str, key: &str, expected: &'static str) -> Result<Option<&Value>, TaskError> {
        match self.get(section, key) {
            None => Ok(None),
            Some([value]) => Ok(Some(value)),
            Some(_) => Err(Self::invalid(section, key, expected)),
        }
    }

    pub fn get_float(&self, section: &str, key: &str) -> Result<Option<f64>, TaskError> {
        const EXPECTED: &str = "a single number";
        self.single(section, key, EXPECTED)?
            .map(|v| v.as_float().ok_or_else(|| Self::invalid(section, key, EXPECTED)))
            .transpose()
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, TaskError> {
        const EXPECTED: &str = "true or false";
        self.single(section, key, EXPECTED)?
            .map(|v| v.as_boolean().ok_or_else(|| Self::invalid(section, key, EXPECTED)))
            .transpose()
    }

    /// any single value rendered back to text (file names, identifiers)
    pub fn get_string(&self, section: &str, key: &str) -> Result<Option<String>, TaskError> {
        Ok(self.single(section, key, "a single value")?.map(|v| v.to_string()))
    }

    pub fn get_integer_list(&self, section: &str, key: &str) -> Result<Option<Vec<i64>>, TaskError> {
        match self.get(section, key) {
            None => Ok(None),
            Some(values) => values
                .iter()
                .map(|v| v.as_integer().ok_or_else(|| Self::invalid(section, key, "a list of integers")))
                .collect::<Result<Vec<i64>, TaskError>>()
                .map(Some),
        }
    }
}
