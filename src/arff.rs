//! Parsing and rewriting of ARFF-style dataset text.
//!
//! A dataset is read in a single forward pass:
//!
//! - **Relation header**: the first line, carried through untouched.
//! - **Header section**: `@ATTRIBUTE`, `@INPUTS`, `@OUTPUT(S)` and `@DATA`
//!   directives, matched case-insensitively by prefix. Anything else is ignored.
//! - **Data section**: every line after `@DATA`, split on commas.
//!
//! An attribute survives cleaning when it has no explicit type token and its
//! base name (the part before any `{...}` value list) is referenced by the
//! `@INPUTS` or `@OUTPUT(S)` directives. Rows keep only the matching columns.
//!
//! Tokenization splits on single spaces and never collapses runs of
//! whitespace, so `@attribute a  {x}` yields an empty type token.

use std::collections::BTreeSet;

use itertools::Itertools;
use log::debug;

pub const DATA_MARKER: &str = "@DATA\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Attribute,
    Inputs,
    Outputs,
    Data,
}

impl Directive {
    const PREFIXES: [(&'static str, Directive); 4] = [
        ("@ATTRIBUTE", Directive::Attribute),
        ("@INPUTS", Directive::Inputs),
        // Prefix match, so `@OUTPUTS` lands here too.
        ("@OUTPUT", Directive::Outputs),
        ("@DATA", Directive::Data),
    ];

    pub fn classify(line: &str) -> Option<Self> {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| starts_with_ignore_ascii_case(line, prefix))
            .map(|(_, directive)| *directive)
    }
}

fn starts_with_ignore_ascii_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDeclaration {
    pub name: String,
    pub type_suffix: String,
    /// Declaration line as it will be written, with a space before each `{`.
    pub line: String,
    pub index: usize,
}

impl AttributeDeclaration {
    pub fn parse(line: &str, index: usize) -> Self {
        let mut tokens = line.split(' ').skip(1);
        let name = tokens.next().unwrap_or("").trim_end().to_string();
        let type_suffix = tokens.next().unwrap_or("").trim_end().to_string();
        AttributeDeclaration {
            name,
            type_suffix,
            line: space_value_lists(line),
            index,
        }
    }

    /// Name with any trailing `{...}` value list removed.
    pub fn base_name(&self) -> &str {
        self.name
            .split_once('{')
            .map_or(self.name.as_str(), |(base, _)| base)
    }

    pub fn is_nominal(&self) -> bool {
        self.type_suffix.is_empty()
    }
}

fn space_value_lists(line: &str) -> String {
    line.replace('{', " {")
}

/// Comma-separated names following the directive keyword.
pub fn parse_name_list(line: &str) -> Vec<String> {
    let rest = line.split_once(' ').map_or("", |(_, rest)| rest);
    rest.split(',')
        .map(|name| name.trim_start().trim_end().to_string())
        .collect()
}

/// Fields keep their trailing text, including the line terminator.
pub fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| field.trim_start().to_string())
        .collect()
}

/// Fields whose column index is in `permitted`, joined with commas.
pub fn project_row(row: &[String], permitted: &BTreeSet<usize>) -> String {
    row.iter()
        .enumerate()
        .filter(|(idx, _)| permitted.contains(idx))
        .map(|(_, field)| field)
        .join(",")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub relation: String,
    pub attributes: Vec<AttributeDeclaration>,
    pub used_attributes: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub attributes_declared: usize,
    pub attributes_kept: usize,
    pub rows: usize,
}

impl Dataset {
    pub fn parse(text: &str) -> Self {
        let mut lines = text.split_inclusive('\n');
        let mut dataset = Dataset {
            relation: lines.next().unwrap_or("").to_string(),
            ..Dataset::default()
        };

        let mut in_data = false;
        for line in lines {
            if in_data {
                dataset.rows.push(split_row(line));
                continue;
            }
            match Directive::classify(line) {
                Some(Directive::Attribute) => {
                    let index = dataset.attributes.len();
                    dataset
                        .attributes
                        .push(AttributeDeclaration::parse(line, index));
                }
                Some(Directive::Inputs) => dataset.used_attributes = parse_name_list(line),
                Some(Directive::Outputs) => {
                    dataset.used_attributes.extend(parse_name_list(line));
                }
                Some(Directive::Data) => in_data = true,
                None => {}
            }
        }
        debug!(
            "Parsed {} attribute(s), {} used name(s), {} row(s)",
            dataset.attributes.len(),
            dataset.used_attributes.len(),
            dataset.rows.len()
        );
        dataset
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used_attributes.iter().any(|used| used == name)
    }

    pub fn permitted_attributes(&self) -> Vec<&AttributeDeclaration> {
        self.attributes
            .iter()
            .filter(|attribute| attribute.is_nominal() && self.is_used(attribute.base_name()))
            .collect()
    }

    pub fn permitted_indexes(&self) -> BTreeSet<usize> {
        self.permitted_attributes()
            .into_iter()
            .map(|attribute| attribute.index)
            .collect()
    }

    /// Cleaned dataset text. Rows are not separated beyond the line
    /// terminator that survives in their last kept field.
    pub fn render(&self) -> String {
        let permitted = self.permitted_indexes();
        let mut output = self.relation.clone();
        for attribute in self.permitted_attributes() {
            output.push_str(&attribute.line);
        }
        output.push_str(DATA_MARKER);
        for row in &self.rows {
            output.push_str(&project_row(row, &permitted));
        }
        output
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            attributes_declared: self.attributes.len(),
            attributes_kept: self.permitted_indexes().len(),
            rows: self.rows.len(),
        }
    }
}
