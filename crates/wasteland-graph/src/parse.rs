use wasteland_core::errors::{ErrorInfo, WastelandError};

use crate::instructions::InstructionSequence;
use crate::store::GraphStore;

/// Parses the full puzzle text into a [`GraphStore`].
///
/// The first non-blank line holds the instruction symbols; every following
/// non-blank line is a node definition accepted by [`parse_node_line`].
pub fn parse_network(text: &str) -> Result<GraphStore, WastelandError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((sequence_line, symbols)) = lines.next() else {
        return Err(WastelandError::Parse(ErrorInfo::new(
            "missing-sequence",
            "input does not contain an instruction line",
        )));
    };
    let instructions = InstructionSequence::from_symbols(symbols)
        .map_err(|err| err.with_context("line", sequence_line))?;
    let mut store = GraphStore::new(instructions);

    for (line_no, line) in lines {
        let (label, left, right) =
            parse_node_line(line).map_err(|err| err.with_context("line", line_no))?;
        store.insert(label, left, right);
    }

    tracing::debug!(
        nodes = store.len(),
        sequence_len = store.instructions().len(),
        "parsed network"
    );
    Ok(store)
}

/// Splits a `LABEL = (LEFT, RIGHT)` line into its three labels.
///
/// Punctuation around the edge targets acts as a separator: every character
/// that is neither alphanumeric nor whitespace counts as a space, so
/// `(BBB, CCC)`, `(BBB,CCC)` and `[BBB;CCC]` all yield the same targets.
pub fn parse_node_line(line: &str) -> Result<(String, String, String), WastelandError> {
    let Some((label, targets)) = line.split_once('=') else {
        return Err(WastelandError::Parse(
            ErrorInfo::new("missing-separator", "node definition must contain `=`")
                .with_context("text", line),
        ));
    };
    let label = label.trim();
    if label.is_empty() {
        return Err(WastelandError::Parse(
            ErrorInfo::new("empty-label", "node definition has no label").with_context("text", line),
        ));
    }

    let cleaned: String = targets
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    match parts.as_slice() {
        [left, right] => Ok((label.to_string(), left.to_string(), right.to_string())),
        _ => Err(WastelandError::Parse(
            ErrorInfo::new("malformed-node", "expected exactly two edge targets")
                .with_context("text", line)
                .with_context("targets", parts.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_line_strips_punctuation() {
        let (label, left, right) = parse_node_line("AAA = (BBB, CCC)").unwrap();
        assert_eq!((label.as_str(), left.as_str(), right.as_str()), ("AAA", "BBB", "CCC"));
    }

    #[test]
    fn node_line_tolerates_odd_delimiters() {
        let (_, left, right) = parse_node_line("11A=[11B;XXX]").unwrap();
        assert_eq!((left.as_str(), right.as_str()), ("11B", "XXX"));
    }

    #[test]
    fn comma_without_space_still_separates_targets() {
        let (label, left, right) = parse_node_line("AAA = (BBB,CCC)").unwrap();
        assert_eq!((label.as_str(), left.as_str(), right.as_str()), ("AAA", "BBB", "CCC"));
    }

    #[test]
    fn node_line_with_one_target_fails() {
        let err = parse_node_line("AAA = (BBB)").unwrap_err();
        assert_eq!(err.code(), "malformed-node");
        assert_eq!(err.info().context["targets"], "1");
    }

    #[test]
    fn node_line_without_separator_fails() {
        let err = parse_node_line("AAA (BBB, CCC)").unwrap_err();
        assert_eq!(err.code(), "missing-separator");
    }

    #[test]
    fn node_line_with_three_targets_fails() {
        let err = parse_node_line("AAA = (BBB, CCC, DDD)").unwrap_err();
        assert_eq!(err.code(), "malformed-node");
        assert_eq!(err.info().context["targets"], "3");
    }
}
