//! DIMACS-style edge-list parser.
//!
//! ```text
//! c comment lines start with 'c'
//! p edge 4 3
//! e 1 2
//! e 2 3
//! e 3 4
//! ```
//!
//! Vertex ids in the file are 1-based; [`parse`] returns 0-based edges.

use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

use crate::error::{CliqueError, CliqueResult};

/// Contents of an edge-list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EdgeList {
    /// Vertex count declared by the problem line.
    pub vertices: usize,
    /// Edge count declared by the problem line (informational only).
    pub declared_edges: usize,
    /// Edges as 0-based vertex pairs, in file order.
    pub edges: Vec<(usize, usize)>,
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// `p <format> <vertices> <edges>`
fn problem_line(input: &str) -> IResult<&str, (usize, usize)> {
    let (input, _) = tag("p")(input)?;
    let (input, _format) = preceded(space1, take_till1(|c: char| c.is_whitespace()))(input)?;
    let (input, (_, vertices, _, edges)) =
        terminated(tuple((space1, number, space1, number)), space0)(input)?;
    Ok((input, (vertices, edges)))
}

/// `e <u> <v>`
fn edge_line(input: &str) -> IResult<&str, (usize, usize)> {
    let (input, _) = tag("e")(input)?;
    let (input, (_, u, _, v)) = terminated(tuple((space1, number, space1, number)), space0)(input)?;
    Ok((input, (u, v)))
}

/// Parses edge-list text.
///
/// Blank lines, comment lines and unknown line kinds are skipped. The problem
/// line must precede every edge, and each endpoint must lie in
/// `[1, vertices]`.
pub(crate) fn parse(text: &str) -> CliqueResult<EdgeList> {
    let mut header: Option<(usize, usize)> = None;
    let mut edges = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        match line.chars().next() {
            None | Some('c') => continue,
            Some('p') => {
                if header.is_some() {
                    return Err(CliqueError::Parse {
                        line: line_no,
                        message: "duplicate problem line".into(),
                    });
                }
                let (_, parsed) =
                    all_consuming(problem_line)(line).map_err(|_| CliqueError::Parse {
                        line: line_no,
                        message: format!("malformed problem line `{line}`"),
                    })?;
                header = Some(parsed);
            }
            Some('e') => {
                let (vertices, _) = header.ok_or(CliqueError::MissingHeader)?;
                let (_, (u, v)) =
                    all_consuming(edge_line)(line).map_err(|_| CliqueError::Parse {
                        line: line_no,
                        message: format!("malformed edge line `{line}`"),
                    })?;
                for endpoint in [u, v] {
                    if endpoint == 0 || endpoint > vertices {
                        return Err(CliqueError::VertexOutOfRange {
                            vertex: endpoint,
                            vertices,
                        });
                    }
                }
                edges.push((u - 1, v - 1));
            }
            Some(_) => continue,
        }
    }

    let (vertices, declared_edges) = header.ok_or(CliqueError::MissingHeader)?;
    Ok(EdgeList {
        vertices,
        declared_edges,
        edges,
    })
}
