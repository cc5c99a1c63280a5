use log::debug;
use regex::Regex;
use std::collections::HashMap;

use crate::config::*;

#[derive(Debug, Clone)]
enum Matcher {
    Title(Regex),
    Login(String),
}

/// A single exclusion rule of the filter stage.
///
/// A record is dropped if any rule matches it. A missing title or login never matches.
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    kind: ExclusionKind,
    matcher: Matcher,
}

impl ExclusionRule {
    /// Versus maps of the competition itself: the prefix, an optional dash, a space and an
    /// optional "VS".
    pub fn competition_versus(prefix: &str) -> Result<ExclusionRule, AnalysisErrors> {
        ExclusionRule::title(
            ExclusionKind::CompetitionVersus,
            &format!(r"^{}( -)? (VS)?", regex::escape(prefix)),
        )
    }

    pub fn map_pack(prefix: &str) -> Result<ExclusionRule, AnalysisErrors> {
        ExclusionRule::title(ExclusionKind::MapPack, &format!("^{}", regex::escape(prefix)))
    }

    /// The word "by" between two spaces, in any case.
    ///
    /// This also catches legitimate titles such as "Stand by me".
    pub fn attribution() -> Result<ExclusionRule, AnalysisErrors> {
        ExclusionRule::title(ExclusionKind::Attribution, r"(?i)^.* by .*$")
    }

    pub fn map_category(prefix: &str) -> Result<ExclusionRule, AnalysisErrors> {
        ExclusionRule::title(
            ExclusionKind::MapCategory,
            &format!(r"(?i)^{} .*$", regex::escape(prefix)),
        )
    }

    pub fn excluded_author(login: &str) -> ExclusionRule {
        ExclusionRule {
            kind: ExclusionKind::ExcludedAuthor,
            matcher: Matcher::Login(login.to_string()),
        }
    }

    fn title(kind: ExclusionKind, pattern: &str) -> Result<ExclusionRule, AnalysisErrors> {
        let re = Regex::new(pattern)
            .map_err(|e| AnalysisErrors::InvalidRules(format!("{:?}: {}", kind, e)))?;
        Ok(ExclusionRule {
            kind,
            matcher: Matcher::Title(re),
        })
    }

    pub fn kind(&self) -> ExclusionKind {
        self.kind
    }

    pub fn matches(&self, record: &Record) -> bool {
        match (&self.matcher, record) {
            (
                Matcher::Title(re),
                Record {
                    name: Some(name), ..
                },
            ) => re.is_match(name),
            (
                Matcher::Login(login),
                Record {
                    author_login: Some(l),
                    ..
                },
            ) => l == login,
            _ => false,
        }
    }
}

/// The exclusion rules described by the analysis rules, in order.
pub fn exclusion_rules(rules: &AnalysisRules) -> Result<Vec<ExclusionRule>, AnalysisErrors> {
    let mut res = vec![
        ExclusionRule::competition_versus(&rules.competition_prefix)?,
        ExclusionRule::map_pack(&rules.pack_prefix)?,
        ExclusionRule::attribution()?,
        ExclusionRule::map_category(&rules.category_prefix)?,
    ];
    if let Some(login) = rules.excluded_login.as_deref() {
        res.push(ExclusionRule::excluded_author(login));
    }
    Ok(res)
}

/// Removes the excluded records and rewrites the nicknames so that every login has a
/// single nickname.
///
/// The order of the records is preserved.
pub fn filter_records(
    records: &[Record],
    rules: &[ExclusionRule],
    policy: NicknamePolicy,
) -> (Vec<Record>, FilterStats) {
    let mut removed: HashMap<ExclusionKind, usize> = HashMap::new();
    let mut kept: Vec<Record> = Vec::new();
    for r in records.iter() {
        if let Some(rule) = rules.iter().find(|rule| rule.matches(r)) {
            debug!(
                "filter_records: row {}: dropping {:?} ({})",
                r.row,
                r.name,
                rule.kind().label()
            );
            *removed.entry(rule.kind()).or_insert(0) += 1;
        } else {
            kept.push(r.clone());
        }
    }

    let canonical = canonicalize_nicknames(kept, policy);

    let mut removed: Vec<(ExclusionKind, usize)> = removed.into_iter().collect();
    removed.sort();
    let stats = FilterStats {
        input_rows: records.len(),
        kept_rows: canonical.len(),
        removed,
        incomplete_rows: canonical.iter().filter(|r| !r.is_complete()).count(),
        anonymous_rows: canonical
            .iter()
            .filter(|r| r.author_nickname.is_none())
            .count(),
    };
    (canonical, stats)
}

/// Assigns to every record the canonical nickname of its login.
///
/// Records without a login cannot be attributed: their nickname is dropped. Missing nicknames
/// are never picked.
pub fn canonicalize_nicknames(records: Vec<Record>, policy: NicknamePolicy) -> Vec<Record> {
    let canonical = canonical_nicknames(&records, policy);
    records
        .into_iter()
        .map(|r| match r.author_login.as_ref().map(|l| canonical.get(l)) {
            None if r.author_nickname.is_some() => {
                debug!(
                    "canonicalize_nicknames: row {}: no login, dropping {:?}",
                    r.row, r.author_nickname
                );
                Record {
                    author_nickname: None,
                    ..r
                }
            }
            Some(Some(nickname)) if r.author_nickname.as_ref() != Some(nickname) => {
                debug!(
                    "canonicalize_nicknames: row {}: {:?} -> {:?}",
                    r.row, r.author_nickname, nickname
                );
                Record {
                    author_nickname: Some(nickname.clone()),
                    ..r
                }
            }
            _ => r,
        })
        .collect()
}

fn canonical_nicknames(records: &[Record], policy: NicknamePolicy) -> HashMap<String, String> {
    // For each login: nickname -> (first position, number of uses)
    let mut seen: HashMap<&str, HashMap<&str, (usize, usize)>> = HashMap::new();
    for (idx, r) in records.iter().enumerate() {
        if let (Some(login), Some(nickname)) = (&r.author_login, &r.author_nickname) {
            let e = seen
                .entry(login.as_str())
                .or_default()
                .entry(nickname.as_str())
                .or_insert((idx, 0));
            e.1 += 1;
        }
    }

    let mut res: HashMap<String, String> = HashMap::new();
    for (login, nicknames) in seen.iter() {
        let picked = match policy {
            NicknamePolicy::First => nicknames.iter().min_by_key(|(_, (first, _))| *first),
            NicknamePolicy::MostFrequent => nicknames
                .iter()
                .max_by(|(_, (f1, c1)), (_, (f2, c2))| c1.cmp(c2).then(f2.cmp(f1))),
            NicknamePolicy::Last => None,
        };
        if let Some((nickname, _)) = picked {
            res.insert(login.to_string(), nickname.to_string());
        }
    }

    if policy == NicknamePolicy::Last {
        for r in records.iter() {
            if let (Some(login), Some(nickname)) = (&r.author_login, &r.author_nickname) {
                res.insert(login.clone(), nickname.clone());
            }
        }
    }
    res
}
