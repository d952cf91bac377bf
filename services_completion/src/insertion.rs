//! Insertion plans for parameterized completions
//!
//! A plan is the text to insert plus the ranges to track, with offsets
//! relative to the insertion point. Building a plan never touches the
//! buffer.

use completion_types::{
    Completion, CompletionKind, ParamListDelimiters, Parameter, Template, TemplatePiece,
};
use editor_core::RangeTag;

/// A parameter range to register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRange {
    pub start: usize,
    pub end: usize,
    /// Parameter name; `None` for the terminal range
    pub name: Option<String>,
    pub tag: RangeTag,
}

/// A copy that mirrors the parameter named `source`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    pub source: String,
    pub start: usize,
    pub end: usize,
}

/// Text plus the ranges a session will track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPlan {
    pub text: String,
    /// Start of the session window
    pub min_offset: usize,
    /// Parameter ranges in logical order; the terminal range is always last
    pub ranges: Vec<PlannedRange>,
    pub copies: Vec<PlannedCopy>,
}

impl InsertionPlan {
    /// Length of `text` in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset of the terminal range
    pub fn terminal_offset(&self) -> usize {
        self.ranges
            .iter()
            .find(|r| r.tag == RangeTag::ParameterEnd)
            .map_or_else(|| self.len(), |r| r.start)
    }

    /// Range selected when the session starts: the first parameter, or the
    /// terminal range when there are none
    pub fn initial_selection(&self) -> (usize, usize) {
        self.ranges
            .first()
            .map_or((self.len(), self.len()), |r| (r.start, r.end))
    }

    /// Number of non-terminal parameter ranges
    pub fn param_count(&self) -> usize {
        self.ranges
            .iter()
            .filter(|r| r.tag == RangeTag::Parameter)
            .count()
    }
}

struct PlanBuilder {
    text: String,
    len: usize,
    ranges: Vec<PlannedRange>,
    copies: Vec<PlannedCopy>,
}

impl PlanBuilder {
    fn new() -> Self {
        Self {
            text: String::new(),
            len: 0,
            ranges: Vec::new(),
            copies: Vec::new(),
        }
    }

    fn push_str(&mut self, text: &str) -> (usize, usize) {
        let start = self.len;
        self.text.push_str(text);
        self.len += text.chars().count();
        (start, self.len)
    }

    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
        self.len += 1;
    }

    fn push_param(&mut self, name: &str) {
        let (start, end) = self.push_str(name);
        self.ranges.push(PlannedRange {
            start,
            end,
            name: Some(name.to_string()),
            tag: RangeTag::Parameter,
        });
    }

    fn finish(mut self, min_offset: usize, terminal: usize) -> InsertionPlan {
        self.ranges.push(PlannedRange {
            start: terminal,
            end: terminal,
            name: None,
            tag: RangeTag::ParameterEnd,
        });
        InsertionPlan {
            text: self.text,
            min_offset,
            ranges: self.ranges,
            copies: self.copies,
        }
    }
}

/// Plan for a function's parameter list
///
/// When `typed_list_start` is set the opening delimiter is already in the
/// buffer and is left out.
pub fn plan_function(
    params: &[Parameter],
    delimiters: &ParamListDelimiters,
    typed_list_start: bool,
) -> InsertionPlan {
    let mut builder = PlanBuilder::new();
    if !typed_list_start {
        builder.push_char(delimiters.start());
    }
    let min_offset = builder.len;

    for (index, param) in params.iter().enumerate() {
        if index > 0 {
            builder.push_str(delimiters.separator());
        }
        builder.push_param(param.placeholder_text());
    }
    builder.push_char(delimiters.end());

    let terminal = builder.len;
    builder.finish(min_offset, terminal)
}

/// Plan for a template, re-applying `indent` after every newline
pub fn plan_template(template: &Template, indent: &str) -> InsertionPlan {
    let mut builder = PlanBuilder::new();
    let mut terminal = None;

    for (index, piece) in template.pieces().iter().enumerate() {
        if template.end_marker() == Some(index) {
            terminal = Some(builder.len);
        }
        match piece {
            TemplatePiece::Text(text) => {
                for ch in text.chars() {
                    builder.push_char(ch);
                    if ch == '\n' {
                        builder.push_str(indent);
                    }
                }
            }
            TemplatePiece::Param(name) => builder.push_param(name),
            TemplatePiece::ParamCopy(name) => {
                let (start, end) = builder.push_str(name);
                builder.copies.push(PlannedCopy {
                    source: name.clone(),
                    start,
                    end,
                });
            }
        }
    }

    let terminal = terminal.unwrap_or(builder.len);
    builder.finish(0, terminal)
}

/// Plan for any parameterized completion
///
/// Returns `None` for completions without a parameter list, and for
/// functions when no delimiters are available.
pub fn plan_insertion(
    completion: &Completion,
    delimiters: Option<&ParamListDelimiters>,
    typed_list_start: bool,
    indent: &str,
) -> Option<InsertionPlan> {
    match &completion.kind {
        CompletionKind::Function { params, .. } => {
            delimiters.map(|d| plan_function(params, d, typed_list_start))
        }
        CompletionKind::Template { template, .. } => Some(plan_template(template, indent)),
        _ => None,
    }
}

/// Text a template inserts without parameter assistance, and the caret
/// offset (relative) it leaves behind
pub fn expand_template(template: &Template, indent: &str) -> (String, usize) {
    let plan = plan_template(template, indent);
    let terminal = plan.terminal_offset();
    (plan.text, terminal)
}
