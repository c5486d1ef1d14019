use crate::model::MatchLine;
use crate::tokenizer;
use std::collections::BTreeSet;

/// Resolve matched token positions to line-level context.
///
/// Positions index the document's post-stopword token stream, so the map
/// from position to line is rebuilt with the same tokenizer, line by line.
/// Each matched line is emitted once, followed by the next line for
/// context; whitespace-only lines are skipped; output is ascending by
/// 1-based line number.
pub fn extract_matches(content: &str, positions: &[u32]) -> Vec<MatchLine> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut line_of_token: Vec<usize> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let tokens = tokenizer::token_stream(line).len();
        line_of_token.extend(std::iter::repeat(idx + 1).take(tokens));
    }

    let mut emitted: BTreeSet<usize> = BTreeSet::new();
    for &position in positions {
        let Some(&line_no) = line_of_token.get(position as usize) else {
            continue;
        };
        emit(&mut emitted, &lines, line_no);
        emit(&mut emitted, &lines, line_no + 1);
    }

    emitted
        .into_iter()
        .map(|line_no| {
            let line = lines[line_no - 1];
            // split('\n') leaves the '\r' of CRLF delimiters on the line
            let text = line.strip_suffix('\r').unwrap_or(line).to_string();
            MatchLine {
                text,
                position: line_no,
            }
        })
        .collect()
}

fn emit(emitted: &mut BTreeSet<usize>, lines: &[&str], line_no: usize) {
    if line_no == 0 || line_no > lines.len() {
        return;
    }
    if lines[line_no - 1].trim().is_empty() {
        return;
    }
    emitted.insert(line_no);
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "alpha line one\nbeta line two\n\ngamma line four\nlast";

    #[test]
    fn emits_matched_line_and_following_context() {
        // position 0 = "alpha" on line 1
        let matches = extract_matches(CONTENT, &[0]);
        let lines: Vec<usize> = matches.iter().map(|m| m.position).collect();
        assert_eq!(lines, vec![1, 2]);
        assert_eq!(matches[0].text, "alpha line one");
    }

    #[test]
    fn lines_are_emitted_at_most_once() {
        // all three tokens of line 1 plus one of line 2
        let matches = extract_matches(CONTENT, &[0, 1, 2, 3]);
        let lines: Vec<usize> = matches.iter().map(|m| m.position).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        // "beta line two" is line 2; its context line 3 is blank.
        let matches = extract_matches(CONTENT, &[3]);
        let lines: Vec<usize> = matches.iter().map(|m| m.position).collect();
        assert_eq!(lines, vec![2]);
    }

    #[test]
    fn output_is_sorted_ascending() {
        // match "last" (line 5) then "alpha" (line 1)
        let matches = extract_matches(CONTENT, &[9, 0]);
        let lines: Vec<usize> = matches.iter().map(|m| m.position).collect();
        assert_eq!(lines, vec![1, 2, 5]);
    }

    #[test]
    fn out_of_range_positions_are_ignored() {
        let matches = extract_matches(CONTENT, &[500]);
        assert!(matches.is_empty());
    }

    #[test]
    fn crlf_delimiters_are_stripped_from_emitted_text() {
        let content = "alpha first\r\nbeta second\r\nlast";
        let matches = extract_matches(content, &[0]);
        let lines: Vec<usize> = matches.iter().map(|m| m.position).collect();
        assert_eq!(lines, vec![1, 2]);
        assert_eq!(matches[0].text, "alpha first");
        assert_eq!(matches[1].text, "beta second");
    }
}
