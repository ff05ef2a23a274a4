use crate::error::{Error, ErrorKind};
use crate::util::pagination::{LinkHeader, LinkHeaderType};
use nom::branch::alt;
use nom::bytes::complete::{take_until, take_while1};
use nom::character::complete::{char, multispace0};
use nom::combinator::all_consuming;
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, preceded, separated_pair, terminated, tuple};
use nom::IResult;
use reqwest::Url;
use std::str::FromStr;

/// Parses a Link HTTP Header
/// Link headers look like this:
///     <https://canvas.instructure.com/api/v1/planner/items?page=bookmark:WzE&per_page=10>; rel="next",
///     <https://canvas.instructure.com/api/v1/planner/items?page=first&per_page=10>; rel="first"
pub(crate) fn link_header(s: &str) -> Result<Vec<LinkHeader>, Error> {
    if s.trim().is_empty() {
        return Ok(vec![]);
    }

    let (_, raw) = parse_link_header(s)
        .map_err(|e| ErrorKind::LinkHeader(format!("could not parse {:?}: {}", s, e)))?;

    raw.into_iter().map(into_link_header).collect()
}

type RawLink<'a> = (&'a str, Vec<(&'a str, &'a str)>);

/// Parses an encapsulated <url> in a link-header
fn parse_url(s: &str) -> IResult<&str, &str> {
    delimited(char('<'), take_until(">"), char('>'))(s)
}

fn is_token(c: char) -> bool {
    !c.is_whitespace() && !"=;,\"<>".contains(c)
}

/// Parses a single link-header argument, `key="value"` or `key=value`
fn parse_argument(s: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_while1(is_token),
        delimited(multispace0, char('='), multispace0),
        alt((
            delimited(char('"'), take_until("\""), char('"')),
            take_while1(is_token),
        )),
    )(s)
}

/// Parses one `<url>; key="value"; ...` entry
fn parse_link(s: &str) -> IResult<&str, RawLink> {
    tuple((
        preceded(multispace0, parse_url),
        many0(preceded(
            delimited(multispace0, char(';'), multispace0),
            parse_argument,
        )),
    ))(s)
}

/// Parses a comma separated list of links
fn parse_link_header(s: &str) -> IResult<&str, Vec<RawLink>> {
    all_consuming(terminated(
        separated_list1(preceded(multispace0, char(',')), parse_link),
        multispace0,
    ))(s)
}

fn into_link_header((url, args): RawLink) -> Result<LinkHeader, Error> {
    let url = Url::parse(url.trim())
        .map_err(|e| ErrorKind::LinkHeader(format!("bad url {:?}: {}", url, e)))?;
    let rel: LinkHeaderType = get_arg(&args, "rel")
        .ok_or_else(|| ErrorKind::LinkHeader(format!("missing rel for {}", url)))?;

    Ok(LinkHeader {
        page: get_param(&url, "page"),
        per_page: get_param(&url, "per_page"),
        rel,
        url,
    })
}

fn get_param<T: FromStr>(url: &Url, key: &str) -> Option<T> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .and_then(|(_, val)| val.parse().ok())
}

fn get_arg<T: FromStr>(args: &[(&str, &str)], key: &str) -> Option<T> {
    args.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, val)| val.parse().ok())
}
