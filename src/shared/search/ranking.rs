//! Search Ranking
//!
//! Relevance re-sort over a page of user candidates already fetched from
//! the datastore. Username matches dominate display-name matches, and exact
//! beats prefix beats substring within each field.
//!
//! The ranker only reorders the page it is given: a strong match sitting on
//! a later page is never pulled forward.

/// Points awarded per field and match kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub username_exact: u32,
    pub username_prefix: u32,
    pub username_contains: u32,
    pub display_name_exact: u32,
    pub display_name_prefix: u32,
    pub display_name_contains: u32,
}

/// The weights clients have always been ranked with
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    username_exact: 1000,
    username_prefix: 100,
    username_contains: 10,
    display_name_exact: 50,
    display_name_prefix: 5,
    display_name_contains: 1,
};

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Anything that can be ranked by username and display name
pub trait Candidate {
    fn username(&self) -> &str;
    fn display_name(&self) -> Option<&str>;
}

/// How a query matched one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Prefix,
    Contains,
    None,
}

impl MatchKind {
    /// Classify `field` against an already normalized query
    pub fn classify(field: &str, query: &str) -> Self {
        let field = field.to_lowercase();
        if field == query {
            MatchKind::Exact
        } else if field.starts_with(query) {
            MatchKind::Prefix
        } else if field.contains(query) {
            MatchKind::Contains
        } else {
            MatchKind::None
        }
    }
}

impl ScoreWeights {
    /// Score one candidate against an already normalized query
    pub fn score<C: Candidate + ?Sized>(&self, candidate: &C, query: &str) -> u32 {
        let username = match MatchKind::classify(candidate.username(), query) {
            MatchKind::Exact => self.username_exact,
            MatchKind::Prefix => self.username_prefix,
            MatchKind::Contains => self.username_contains,
            MatchKind::None => 0,
        };

        let display_name = match candidate
            .display_name()
            .filter(|name| !name.is_empty())
            .map(|name| MatchKind::classify(name, query))
        {
            Some(MatchKind::Exact) => self.display_name_exact,
            Some(MatchKind::Prefix) => self.display_name_prefix,
            Some(MatchKind::Contains) => self.display_name_contains,
            Some(MatchKind::None) | None => 0,
        };

        username + display_name
    }

    /// Stable sort by descending score; equal scores keep their input order
    pub fn rank<C: Candidate>(&self, candidates: Vec<C>, query: &str) -> Vec<C> {
        let query = normalize(query);
        let mut scored: Vec<(u32, C)> = candidates
            .into_iter()
            .map(|candidate| (self.score(&candidate, &query), candidate))
            .collect();

        // `sort_by` is stable, which is what preserves the upstream order on ties
        scored.sort_by(|(a, _), (b, _)| b.cmp(a));
        scored.into_iter().map(|(_, candidate)| candidate).collect()
    }
}

/// Score with [`DEFAULT_WEIGHTS`]; `query` is normalized first
pub fn score<C: Candidate + ?Sized>(candidate: &C, query: &str) -> u32 {
    DEFAULT_WEIGHTS.score(candidate, &normalize(query))
}

/// Rank with [`DEFAULT_WEIGHTS`]
pub fn rank<C: Candidate>(candidates: Vec<C>, query: &str) -> Vec<C> {
    DEFAULT_WEIGHTS.rank(candidates, query)
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}
