use crate::error::{Result, SubarchError};
use crate::{Graph, Vertex};
use itertools::Itertools;
use nom::{
    character::complete::{char, digit1, multispace0, space0, space1},
    combinator::{all_consuming, map_res, opt},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, separated_pair, terminated},
    IResult,
};
use std::path::Path;

/// Parse a single unsigned integer
fn parse_vertex(input: &str) -> IResult<&str, Vertex> {
    map_res(digit1, |s: &str| s.parse::<Vertex>())(input)
}

/// Wrap a parser so that it skips surrounding whitespace, newlines included
fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

/// Parse one line of the line-based format: `u v` or a lone vertex `v`
fn parse_line(input: &str) -> IResult<&str, (Vertex, Option<Vertex>)> {
    all_consuming(delimited(
        space0,
        pair(parse_vertex, opt(preceded(space1, parse_vertex))),
        space0,
    ))(input)
}

/// Parse a tuple `(u, v)`
fn parse_tuple(input: &str) -> IResult<&str, (Vertex, Vertex)> {
    delimited(
        char('('),
        separated_pair(ws(parse_vertex), char(','), ws(parse_vertex)),
        char(')'),
    )(input)
}

/// Parse a bracketed edge list such as `[(0, 1), (1, 2)]`
fn parse_edge_list(input: &str) -> IResult<&str, Vec<(Vertex, Vertex)>> {
    all_consuming(ws(delimited(
        char('['),
        terminated(
            separated_list0(char(','), ws(parse_tuple)),
            multispace0,
        ),
        char(']'),
    )))(input)
}

fn line_of(content: &str, rest: &str) -> usize {
    let offset = content.len() - rest.len();
    content[..offset].matches('\n').count() + 1
}

/// Parse a topology in either the line-based or the bracketed edge-list form
pub fn parse_graph(content: &str) -> Result<Graph> {
    if content.trim_start().starts_with('[') {
        return match parse_edge_list(content) {
            Ok((_, edges)) => Ok(Graph::from_edges([], edges)),
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(SubarchError::Parse {
                line: line_of(content, e.input),
                message: format!("malformed edge list ({:?})", e.code),
            }),
            Err(nom::Err::Incomplete(_)) => Err(SubarchError::Parse {
                line: line_of(content, ""),
                message: "unexpected end of edge list".to_string(),
            }),
        };
    }

    let mut graph = Graph::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default();
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok((_, (u, Some(v)))) => graph.add_edge(u, v),
            Ok((_, (v, None))) => graph.add_vertex(v),
            Err(_) => {
                return Err(SubarchError::Parse {
                    line: idx + 1,
                    message: format!("expected `u v` or `v`, found {:?}", raw.trim()),
                })
            }
        }
    }
    Ok(graph)
}

/// Parse a topology file
pub fn parse_graph_file(path: &Path) -> Result<Graph> {
    let content = std::fs::read_to_string(path)?;
    parse_graph(&content)
}

/// Render the normalized edge list in bracketed form, e.g. `[(0, 1), (1, 2)]`
pub fn format_edge_list(graph: &Graph) -> String {
    let edges = graph
        .edge_view()
        .into_iter()
        .map(|(u, v)| format!("({u}, {v})"))
        .join(", ");
    format!("[{edges}]")
}

/// Render a graph in the line-based form, isolated vertices included
pub fn format_lines(graph: &Graph) -> String {
    let mut out = String::new();
    for v in graph.vertices().filter(|&v| graph.degree(v) == 0) {
        out.push_str(&format!("{v}\n"));
    }
    for (u, v) in graph.edges() {
        out.push_str(&format!("{u} {v}\n"));
    }
    out
}
