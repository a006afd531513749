use crate::core::models::average::AverageConfig;
use crate::core::models::config::Config;
use crate::core::models::shell::Subshell;
use crate::core::quantum::{MAX_PRINCIPAL, QuantumError, l_from_symbol};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Configuration string is empty")]
    Empty,

    #[error("Malformed subshell token '{token}': {reason}")]
    Syntax { token: String, reason: &'static str },

    #[error("Invalid subshell in token '{token}': {source}")]
    Symbol {
        token: String,
        #[source]
        source: QuantumError,
    },

    #[error("Occupation {nq} in '{token}' exceeds the maximum of {max}")]
    OccupationOutOfRange { token: String, nq: f64, max: u32 },

    #[error("Principal quantum number n = {n} in '{token}' cannot host l = {l}")]
    InvalidPrincipal { token: String, n: u32, l: u32 },

    #[error("Subshell '{0}' is specified more than once")]
    DuplicateSubshell(String),

    #[error("Configuration string '{spec}' expands to {count} configurations, expected exactly one")]
    Ambiguous { spec: String, count: usize },
}

/// Which `j = l ± 1/2` branches a token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Both,
    Minus,
    Plus,
}

/// One lexed `<n><symbol>[+|-][<occupation>]` token.
struct Token<'a> {
    text: &'a str,
    n: u32,
    l: u32,
    branch: Branch,
    occupation: &'a str,
}

impl Token<'_> {
    fn max_occupation(&self) -> u32 {
        match self.branch {
            Branch::Both => 4 * self.l + 2,
            Branch::Plus => 2 * self.l + 2,
            Branch::Minus => 2 * self.l,
        }
    }

    fn syntax(&self, reason: &'static str) -> ParseError {
        ParseError::Syntax {
            token: self.text.to_string(),
            reason,
        }
    }

    fn subshell(&self, kappa: i32, nq: u32) -> Result<Subshell, ParseError> {
        Subshell::new(self.n, kappa, nq).map_err(|source| ParseError::Symbol {
            token: self.text.to_string(),
            source,
        })
    }
}

fn tokens(spec: &str) -> impl Iterator<Item = &str> {
    spec.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

fn lex(text: &str) -> Result<Token<'_>, ParseError> {
    let syntax = |reason| ParseError::Syntax {
        token: text.to_string(),
        reason,
    };

    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| syntax("missing orbital symbol"))?;
    if digits_end == 0 {
        return Err(syntax("missing principal quantum number"));
    }
    let n: u32 = text[..digits_end]
        .parse()
        .map_err(|_| syntax("principal quantum number is out of range"))?;
    if n == 0 {
        return Err(syntax("principal quantum number must be positive"));
    }
    if n > MAX_PRINCIPAL {
        return Err(ParseError::Symbol {
            token: text.to_string(),
            source: QuantumError::PrincipalOutOfRange(n),
        });
    }

    let mut rest = text[digits_end..].chars();
    let symbol = rest.next().ok_or_else(|| syntax("missing orbital symbol"))?;
    let l = l_from_symbol(symbol).map_err(|source| ParseError::Symbol {
        token: text.to_string(),
        source,
    })?;
    if l >= n {
        return Err(ParseError::InvalidPrincipal {
            token: text.to_string(),
            n,
            l,
        });
    }

    let remainder = rest.as_str();
    let (branch, occupation) = if let Some(r) = remainder.strip_prefix('+') {
        (Branch::Plus, r)
    } else if let Some(r) = remainder.strip_prefix('-') {
        (Branch::Minus, r)
    } else {
        (Branch::Both, remainder)
    };
    if branch == Branch::Minus && l == 0 {
        return Err(syntax("s subshells have no j = l - 1/2 branch"));
    }
    if !occupation.is_empty() && !occupation.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(syntax("occupation must start with a digit"));
    }

    Ok(Token {
        text,
        n,
        l,
        branch,
        occupation,
    })
}

/// Rejects a token whose `(n, l)` branch overlaps one seen earlier.
fn check_unique(
    seen: &mut HashMap<(u32, u32), Vec<Branch>>,
    token: &Token<'_>,
) -> Result<(), ParseError> {
    let branches = seen.entry((token.n, token.l)).or_default();
    let overlaps = branches
        .iter()
        .any(|&b| b == token.branch || b == Branch::Both || token.branch == Branch::Both);
    if overlaps {
        return Err(ParseError::DuplicateSubshell(token.text.to_string()));
    }
    branches.push(token.branch);
    Ok(())
}

/// Every way the electrons of one token can be placed in its subshells.
fn distributions(token: &Token<'_>, nq: u32) -> Result<Vec<Vec<Subshell>>, ParseError> {
    let l = token.l;
    let plus = -(l as i32) - 1;
    let minus = l as i32;
    let single = |kappa| -> Result<Vec<Vec<Subshell>>, ParseError> {
        if nq == 0 {
            Ok(vec![Vec::new()])
        } else {
            Ok(vec![vec![token.subshell(kappa, nq)?]])
        }
    };

    match token.branch {
        Branch::Plus => single(plus),
        Branch::Minus => single(minus),
        Branch::Both if l == 0 => single(plus),
        Branch::Both => {
            let high = nq.min(2 * l);
            let low = nq.saturating_sub(2 * l + 2);
            (low..=high)
                .rev()
                .map(|q_minus| {
                    let q_plus = nq - q_minus;
                    let mut shells = Vec::with_capacity(2);
                    if q_minus > 0 {
                        shells.push(token.subshell(minus, q_minus)?);
                    }
                    if q_plus > 0 {
                        shells.push(token.subshell(plus, q_plus)?);
                    }
                    Ok(shells)
                })
                .collect()
        }
    }
}

/// Parses a configuration string such as `"1s2 2p3"`.
///
/// Tokens have the form `<n><symbol>[+|-][<occupation>]`, separated by
/// whitespace or commas. `+` and `-` select `j = l + 1/2` and `j = l - 1/2`;
/// a bare token such as `2p3` is distributed over both branches, giving one
/// configuration per distribution (lower `j` filled first). The full result is
/// the product of the alternatives of every token. Omitted occupations default
/// to one and zero-occupation subshells are dropped.
///
/// # Errors
///
/// Returns [`ParseError`] for malformed tokens, unknown symbols, occupations
/// beyond the subshell capacity and repeated subshells.
pub fn parse_configs(spec: &str) -> Result<Vec<Config>, ParseError> {
    let mut seen = HashMap::new();
    let mut alternatives = Vec::new();

    for text in tokens(spec) {
        let token = lex(text)?;
        check_unique(&mut seen, &token)?;

        let nq: u32 = if token.occupation.is_empty() {
            1
        } else {
            token
                .occupation
                .parse()
                .map_err(|_| token.syntax("occupation must be a non-negative integer"))?
        };
        if nq > token.max_occupation() {
            return Err(ParseError::OccupationOutOfRange {
                token: text.to_string(),
                nq: f64::from(nq),
                max: token.max_occupation(),
            });
        }
        alternatives.push(distributions(&token, nq)?);
    }

    if alternatives.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut partial: Vec<Vec<Subshell>> = vec![Vec::new()];
    for options in &alternatives {
        partial = partial
            .iter()
            .flat_map(|prefix| {
                options.iter().map(move |option| {
                    let mut shells = prefix.clone();
                    shells.extend_from_slice(option);
                    shells
                })
            })
            .collect();
    }

    Ok(partial.into_iter().map(Config::new).collect())
}

/// Parses a configuration string that must describe exactly one configuration.
pub fn parse_config(spec: &str) -> Result<Config, ParseError> {
    match <[Config; 1]>::try_from(parse_configs(spec)?) {
        Ok([config]) => Ok(config),
        Err(configs) => Err(ParseError::Ambiguous {
            spec: spec.to_string(),
            count: configs.len(),
        }),
    }
}

/// Parses a fractional-occupation configuration string such as `"1s2 2p5.5"`.
///
/// Bare `nl` tokens are shared between the two `j` branches in proportion to
/// their degeneracies.
pub fn parse_average_config(spec: &str) -> Result<AverageConfig, ParseError> {
    let mut seen = HashMap::new();
    let mut acfg = AverageConfig::new();
    let mut any = false;

    for text in tokens(spec) {
        let token = lex(text)?;
        check_unique(&mut seen, &token)?;
        any = true;

        let nq: f64 = if token.occupation.is_empty() {
            1.0
        } else {
            token
                .occupation
                .parse()
                .map_err(|_| token.syntax("occupation must be a non-negative number"))?
        };
        if !nq.is_finite() || nq < 0.0 {
            return Err(token.syntax("occupation must be a non-negative number"));
        }
        if nq > f64::from(token.max_occupation()) {
            return Err(ParseError::OccupationOutOfRange {
                token: text.to_string(),
                nq,
                max: token.max_occupation(),
            });
        }

        match token.branch {
            Branch::Plus => acfg.accumulate(token.n, -(token.l as i32) - 1, nq),
            Branch::Minus => acfg.accumulate(token.n, token.l as i32, nq),
            Branch::Both => acfg.accumulate_nl(token.n, token.l, nq),
        }
    }

    if !any {
        return Err(ParseError::Empty);
    }
    acfg.add_contributors(1);
    acfg.finish();
    Ok(acfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(config: &Config) -> Vec<String> {
        config.shells().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn closed_1s_parses_to_one_configuration() {
        let configs = parse_configs("1s2").unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(labels(&configs[0]), vec!["1s2"]);
        assert_eq!(configs[0].n_electrons(), 2);
    }

    #[test]
    fn bare_p_token_is_distributed_over_both_branches() {
        let configs = parse_configs("2p3").unwrap();
        let all: Vec<Vec<String>> = configs.iter().map(labels).collect();
        assert_eq!(
            all,
            vec![
                vec!["2p+1".to_string(), "2p-2".to_string()],
                vec!["2p+2".to_string(), "2p-1".to_string()],
                vec!["2p+3".to_string()],
            ]
        );
        assert!(configs.iter().all(|c| c.n_electrons() == 3));
    }

    #[test]
    fn explicit_branches_select_a_single_subshell() {
        let config = parse_config("2p+3").unwrap();
        assert_eq!(labels(&config), vec!["2p+3"]);
        let config = parse_config("2p-2").unwrap();
        assert_eq!(labels(&config), vec!["2p-2"]);
    }

    #[test]
    fn tokens_combine_as_a_product_and_are_sorted_outermost_first() {
        let configs = parse_configs("1s2 2p1").unwrap();
        let all: Vec<Vec<String>> = configs.iter().map(labels).collect();
        assert_eq!(
            all,
            vec![
                vec!["2p-1".to_string(), "1s2".to_string()],
                vec!["2p+1".to_string(), "1s2".to_string()],
            ]
        );
        let configs = parse_configs("2p2 3d1").unwrap();
        assert_eq!(configs.len(), 3 * 2);
    }

    #[test]
    fn commas_and_missing_occupations_are_accepted() {
        let config = parse_config("1s2, 2s").unwrap();
        assert_eq!(labels(&config), vec!["2s1", "1s2"]);
    }

    #[test]
    fn zero_occupations_are_dropped() {
        let config = parse_config("1s2 2s0 2p-0").unwrap();
        assert_eq!(labels(&config), vec!["1s2"]);
    }

    #[test]
    fn displayed_shells_parse_back_to_the_same_multiset() {
        for spec in ["1s2 2s2 2p3", "3d4 4s1", "1s1 2p-2 4f+3"] {
            for config in parse_configs(spec).unwrap() {
                let reparsed = parse_config(&config.to_string()).unwrap();
                assert_eq!(reparsed.shells(), config.shells());
            }
        }
    }

    #[test]
    fn unknown_symbol_is_reported() {
        let err = parse_configs("1s2 2j1").unwrap_err();
        assert_eq!(
            err,
            ParseError::Symbol {
                token: "2j1".to_string(),
                source: QuantumError::InvalidSymbol('j'),
            }
        );
    }

    #[test]
    fn occupation_beyond_two_times_2l_plus_1_is_rejected() {
        assert!(matches!(
            parse_configs("2p7"),
            Err(ParseError::OccupationOutOfRange { max: 6, .. })
        ));
        assert!(matches!(
            parse_configs("2p+5"),
            Err(ParseError::OccupationOutOfRange { max: 4, .. })
        ));
        assert!(matches!(
            parse_configs("2p-3"),
            Err(ParseError::OccupationOutOfRange { max: 2, .. })
        ));
    }

    #[test]
    fn malformed_tokens_are_syntax_errors() {
        for spec in ["s2", "12", "0s1", "2p1x", "1s-1", "2p+-1", "2p++1", "2p-+1"] {
            assert!(
                matches!(parse_configs(spec), Err(ParseError::Syntax { .. })),
                "spec {:?}",
                spec
            );
        }
    }

    #[test]
    fn signed_occupations_are_rejected_for_average_configs() {
        for spec in ["2p++1", "2p-+0.5", "3d.5"] {
            assert!(
                matches!(parse_average_config(spec), Err(ParseError::Syntax { .. })),
                "spec {:?}",
                spec
            );
        }
    }

    #[test]
    fn principal_numbers_beyond_the_packable_range_are_rejected() {
        for spec in ["70000s1", "65537p1", "99999999999s1"] {
            assert!(parse_configs(spec).is_err(), "spec {:?}", spec);
        }
        assert!(matches!(
            parse_configs("70000s1"),
            Err(ParseError::Symbol {
                source: QuantumError::PrincipalOutOfRange(70000),
                ..
            })
        ));
        assert!(parse_average_config("70000s1").is_err());
    }

    #[test]
    fn l_must_be_below_n() {
        assert!(matches!(
            parse_configs("2d1"),
            Err(ParseError::InvalidPrincipal { n: 2, l: 2, .. })
        ));
    }

    #[test]
    fn repeated_subshells_are_rejected() {
        assert!(matches!(
            parse_configs("2p1 2p-1"),
            Err(ParseError::DuplicateSubshell(_))
        ));
        assert!(matches!(
            parse_configs("1s1 1s1"),
            Err(ParseError::DuplicateSubshell(_))
        ));
        assert!(parse_configs("2p-1 2p+1").is_ok());
    }

    #[test]
    fn empty_string_is_rejected() {
        assert_eq!(parse_configs("  ,  "), Err(ParseError::Empty));
        assert_eq!(parse_average_config(""), Err(ParseError::Empty));
    }

    #[test]
    fn parse_config_rejects_expanding_strings() {
        assert_eq!(
            parse_config("2p2"),
            Err(ParseError::Ambiguous {
                spec: "2p2".to_string(),
                count: 3
            })
        );
    }

    #[test]
    fn average_config_keeps_fractional_occupations() {
        let acfg = parse_average_config("1s2 2s1.5 2p1.5").unwrap();
        assert_eq!(acfg.n_cfgs(), 1);
        assert_eq!(acfg.occupation(1, -1), Some(2.0));
        assert_eq!(acfg.occupation(2, -1), Some(1.5));
        assert_eq!(acfg.occupation(2, 1), Some(0.5));
        assert_eq!(acfg.occupation(2, -2), Some(1.0));
        assert_eq!(acfg.n_electrons(), 5.0);
    }

    #[test]
    fn average_config_accepts_explicit_branches() {
        let acfg = parse_average_config("2p+2.5").unwrap();
        assert_eq!(acfg.occupation(2, -2), Some(2.5));
        assert_eq!(acfg.occupation(2, 1), None);
    }

    #[test]
    fn average_config_rejects_out_of_range_occupations() {
        assert!(matches!(
            parse_average_config("2s2.5"),
            Err(ParseError::OccupationOutOfRange { .. })
        ));
        assert!(matches!(
            parse_average_config("2s-0.5"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse_average_config("2snan"),
            Err(ParseError::Syntax { .. })
        ));
    }
}
