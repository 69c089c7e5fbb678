//! Edge-list input parsing and writing
//!
//! The format is line oriented: the first line holds the edge count `m`,
//! each of the next `m` lines holds two node ids `u v`. Blank lines are
//! skipped and anything after the `m`-th edge is ignored.

use std::io::{BufRead, Write};

use crate::error::{AppError, AppResult};
use crate::models::{Edge, EdgeList};

/// Parse an edge list, validating every node id against `node_space`
pub fn parse_edges<R: BufRead>(reader: R, node_space: usize) -> AppResult<EdgeList> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()));

    let (count_line, raw) = lines
        .next()
        .ok_or_else(|| AppError::invalid_input(1, "missing edge count"))?;
    let raw = raw?;
    let count: usize = raw
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_input(count_line, format!("invalid edge count '{}'", raw.trim())))?;

    // grows with the lines actually read, the count is untrusted
    let mut edges = Vec::new();
    for _ in 0..count {
        let (line_no, raw) = lines.next().ok_or_else(|| {
            AppError::invalid_input(
                count_line,
                format!("expected {} edges, found {}", count, edges.len()),
            )
        })?;
        edges.push(parse_edge(&raw?, line_no, node_space)?);
    }

    Ok(EdgeList::new(edges))
}

fn parse_edge(raw: &str, line: usize, node_space: usize) -> AppResult<Edge> {
    let mut tokens = raw.split_whitespace();
    let (Some(u), Some(v), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(AppError::invalid_input(line, "expected exactly two node ids"));
    };

    Ok(Edge::new(
        parse_node(u, line, node_space)?,
        parse_node(v, line, node_space)?,
    ))
}

fn parse_node(token: &str, line: usize, node_space: usize) -> AppResult<usize> {
    let node: i64 = token
        .parse()
        .map_err(|_| AppError::invalid_input(line, format!("invalid node id '{}'", token)))?;

    match usize::try_from(node) {
        Ok(index) if index < node_space => Ok(index),
        _ => Err(AppError::NodeOutOfRange {
            node,
            line,
            node_space,
        }),
    }
}

/// Write an edge list in the same format `parse_edges` reads
pub fn write_edges<W: Write>(mut writer: W, edges: &EdgeList) -> AppResult<()> {
    writeln!(writer, "{}", edges.len())?;
    for edge in edges.as_slice() {
        writeln!(writer, "{} {}", edge.u, edge.v)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const NODE_SPACE: usize = 100_010;

    fn parse(input: &str) -> AppResult<EdgeList> {
        parse_edges(Cursor::new(input), NODE_SPACE)
    }

    #[test]
    fn test_parse_edges() {
        let edges = parse("3\n0 1\n1 2\n2 2\n").unwrap();
        assert_eq!(
            edges.as_slice(),
            &[Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 2)]
        );
    }

    #[test]
    fn test_parse_zero_edges() {
        assert!(parse("0\n").unwrap().is_empty());
        assert!(parse("0").unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_and_trailing_data() {
        let edges = parse("\n2\n\n0 1\n   \n5 6\n7 8\n").unwrap();
        assert_eq!(edges.as_slice(), &[Edge::new(0, 1), Edge::new(5, 6)]);
    }

    #[test]
    fn test_rejects_out_of_range_nodes() {
        let err = parse("2\n0 1\n1 100010\n").unwrap_err();
        assert!(matches!(
            err,
            AppError::NodeOutOfRange {
                node: 100_010,
                line: 3,
                ..
            }
        ));

        let err = parse("1\n-1 0\n").unwrap_err();
        assert!(matches!(err, AppError::NodeOutOfRange { node: -1, .. }));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(matches!(parse(""), Err(AppError::InvalidInput { line: 1, .. })));
        assert!(matches!(parse("x\n"), Err(AppError::InvalidInput { line: 1, .. })));
        assert!(matches!(parse("1\n0\n"), Err(AppError::InvalidInput { line: 2, .. })));
        assert!(matches!(parse("1\n0 1 2\n"), Err(AppError::InvalidInput { line: 2, .. })));
        assert!(matches!(parse("1\n0 a\n"), Err(AppError::InvalidInput { line: 2, .. })));
        assert!(matches!(parse("3\n0 1\n"), Err(AppError::InvalidInput { line: 1, .. })));
    }

    #[test]
    fn test_huge_edge_count_is_a_validation_error() {
        assert!(matches!(
            parse("18446744073709551615\n0 1\n"),
            Err(AppError::InvalidInput { line: 1, .. })
        ));
        assert!(matches!(
            parse("100000000000000000\n0 1\n1 2\n"),
            Err(AppError::InvalidInput { line: 1, .. })
        ));
        assert!(matches!(
            parse("18446744073709551616\n"),
            Err(AppError::InvalidInput { line: 1, .. })
        ));
    }

    #[test]
    fn test_write_then_parse_preserves_order() {
        let edges = EdgeList::from(vec![Edge::new(9, 4), Edge::new(4, 9), Edge::new(0, 0)]);
        let mut buf = Vec::new();
        write_edges(&mut buf, &edges).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "3\n9 4\n4 9\n0 0\n");
        assert_eq!(parse_edges(Cursor::new(buf), NODE_SPACE).unwrap(), edges);
    }
}
