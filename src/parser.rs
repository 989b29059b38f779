use std::path::PathBuf;

use thiserror::Error;

use crate::types::Pipeline;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	#[error("missing command")]
	EmptyStage,
	#[error("missing target for `{0}`")]
	MissingRedirectTarget(char),
	#[error("duplicate `{0}` redirection")]
	DuplicateRedirect(char),
	#[error("`&` must be the last word")]
	BackgroundNotLast,
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
	Word(String),
	Pipe,
	RedirectIn,
	RedirectOut,
	Background,
}

fn tokenize(line: &str) -> Vec<Token> {
	line.split_whitespace()
		.map(|w| match w {
			"|" => Token::Pipe,
			"<" => Token::RedirectIn,
			">" => Token::RedirectOut,
			"&" => Token::Background,
			_ => Token::Word(w.to_owned()),
		})
		.collect()
}

/// Parse one command line into a `Pipeline`.
///
/// Words are whitespace-separated; `|` splits stages, `<`/`>` name the
/// pipeline's input/output files (at most one each, applying to the whole
/// chain), and a trailing `&` marks the pipeline as background. No quoting.
pub fn parse(line: &str) -> Result<Pipeline, ParseError> {
	let mut tokens = tokenize(line).into_iter();
	let mut stages: Vec<Vec<String>> = vec![];
	let mut stage: Vec<String> = vec![];
	let mut input: Option<PathBuf> = None;
	let mut output: Option<PathBuf> = None;
	let mut background = false;

	while let Some(token) = tokens.next() {
		if background {
			return Err(ParseError::BackgroundNotLast);
		}
		match token {
			Token::Word(w) => stage.push(w),
			Token::Pipe => {
				if stage.is_empty() {
					return Err(ParseError::EmptyStage);
				}
				stages.push(std::mem::take(&mut stage));
			},
			Token::RedirectIn => {
				if input.is_some() {
					return Err(ParseError::DuplicateRedirect('<'));
				}
				input = Some(redirect_target(tokens.next(), '<')?);
			},
			Token::RedirectOut => {
				if output.is_some() {
					return Err(ParseError::DuplicateRedirect('>'));
				}
				output = Some(redirect_target(tokens.next(), '>')?);
			},
			Token::Background => background = true,
		}
	}
	if stage.is_empty() {
		return Err(ParseError::EmptyStage);
	}
	stages.push(stage);

	Ok(Pipeline { stages, input, output, background })
}

fn redirect_target(token: Option<Token>, sigil: char) -> Result<PathBuf, ParseError> {
	match token {
		Some(Token::Word(w)) => Ok(PathBuf::from(w)),
		_ => Err(ParseError::MissingRedirectTarget(sigil)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn argv(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn single_command() {
		let p = parse("ls -l /tmp").unwrap();
		assert_eq!(p.stages, vec![argv(&["ls", "-l", "/tmp"])]);
		assert_eq!(p.input, None);
		assert_eq!(p.output, None);
		assert!(!p.background);
	}

	#[test]
	fn pipeline_with_redirects() {
		let p = parse("sort < in.txt | uniq -c | wc -l > out.txt").unwrap();
		assert_eq!(p.stages.len(), 3);
		assert_eq!(p.stages[0], argv(&["sort"]));
		assert_eq!(p.stages[2], argv(&["wc", "-l"]));
		assert_eq!(p.input, Some(PathBuf::from("in.txt")));
		assert_eq!(p.output, Some(PathBuf::from("out.txt")));
	}

	#[test]
	fn background_marker() {
		let p = parse("sleep 10 &").unwrap();
		assert!(p.background);
		assert_eq!(p.stages, vec![argv(&["sleep", "10"])]);
	}

	#[test]
	fn background_must_be_last() {
		assert_eq!(parse("sleep 10 & echo hi"), Err(ParseError::BackgroundNotLast));
	}

	#[test]
	fn empty_stage_rejected() {
		assert_eq!(parse("ls |"), Err(ParseError::EmptyStage));
		assert_eq!(parse("| ls"), Err(ParseError::EmptyStage));
		assert_eq!(parse("ls | | wc"), Err(ParseError::EmptyStage));
	}

	#[test]
	fn missing_redirect_target() {
		assert_eq!(parse("ls >"), Err(ParseError::MissingRedirectTarget('>')));
		assert_eq!(parse("wc < | ls"), Err(ParseError::MissingRedirectTarget('<')));
	}

	#[test]
	fn duplicate_redirect() {
		assert_eq!(parse("ls > a > b"), Err(ParseError::DuplicateRedirect('>')));
	}
}
