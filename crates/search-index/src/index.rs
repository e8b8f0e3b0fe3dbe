use dashboard_core::StockRecord;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Tuning for the external approximate matcher.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub symbol_weight: f64,
    pub title_weight: f64,
    pub industry_weight: f64,
    /// Weighted score below which a record is dropped.
    pub min_score: f64,
    /// Maximum number of ranked results returned.
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            symbol_weight: 2.0,
            title_weight: 1.0,
            industry_weight: 0.5,
            min_score: 1.0,
            limit: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Symbol,
    Title,
    Industry,
}

/// One matched field with the inclusive character ranges that matched,
/// for highlighting.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: MatchField,
    pub score: f64,
    pub ranges: Vec<(usize, usize)>,
}

/// A ranked match of the query against one stock record.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Index into [`SearchIndex::records`].
    pub record: usize,
    /// Best weighted field score; results are ordered by this descending.
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

impl SearchResult {
    pub fn field_match(&self, field: MatchField) -> Option<&FieldMatch> {
        self.matches.iter().find(|m| m.field == field)
    }
}

/// Compress sorted matched character positions into inclusive ranges:
/// `[0, 1, 2, 5]` becomes `[(0, 2), (5, 5)]`.
pub fn compress_ranges(positions: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &pos in positions {
        match ranges.last_mut() {
            Some((_, end)) if pos == *end + 1 => *end = pos,
            _ => ranges.push((pos, pos)),
        }
    }
    ranges
}

/// Fuzzy search over the static stock list, wrapping the skim matcher
/// behind per-field weights.
pub struct SearchIndex {
    records: Vec<StockRecord>,
    matcher: SkimMatcherV2,
    options: SearchOptions,
}

impl SearchIndex {
    pub fn new(records: Vec<StockRecord>, options: SearchOptions) -> Self {
        Self {
            records,
            matcher: SkimMatcherV2::default(),
            options,
        }
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&StockRecord> {
        self.records.get(index)
    }

    /// Ranked results for `query`. An empty or whitespace-only query
    /// yields no results, never the whole list.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| self.match_record(index, record, query))
            .collect();

        // Stable sort keeps input order for equal scores.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(self.options.limit);
        results
    }

    fn match_record(&self, index: usize, record: &StockRecord, query: &str) -> Option<SearchResult> {
        let fields = [
            (MatchField::Symbol, record.symbol.as_str(), self.options.symbol_weight),
            (MatchField::Title, record.title.as_str(), self.options.title_weight),
            (MatchField::Industry, record.industry.as_str(), self.options.industry_weight),
        ];

        let mut matches = Vec::new();
        let mut best = f64::NEG_INFINITY;
        for (field, text, weight) in fields {
            if text.is_empty() {
                continue;
            }
            if let Some((raw, positions)) = self.matcher.fuzzy_indices(text, query) {
                let score = raw as f64 * weight;
                if score < self.options.min_score {
                    continue;
                }
                best = best.max(score);
                matches.push(FieldMatch {
                    field,
                    score,
                    ranges: compress_ranges(&positions),
                });
            }
        }

        if matches.is_empty() {
            return None;
        }
        Some(SearchResult {
            record: index,
            score: best,
            matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn stocks() -> Vec<StockRecord> {
        let mk = |symbol: &str, title: &str, industry: &str| StockRecord {
            symbol: symbol.to_string(),
            title: title.to_string(),
            industry: industry.to_string(),
        };
        vec![
            mk("AAPL", "Apple Inc.", "Consumer Electronics"),
            mk("MSFT", "Microsoft Corporation", "Software"),
            mk("GOOG", "Alphabet Inc.", "Internet Content"),
            mk("XOM", "Exxon Mobil Corporation", "Oil & Gas"),
            mk("KO", "The Coca-Cola Company", "Beverages"),
        ]
    }

    #[test]
    fn empty_query_yields_nothing() {
        let index = SearchIndex::new(stocks(), SearchOptions::default());
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn exact_symbol_ranks_first_with_full_range() {
        let index = SearchIndex::new(stocks(), SearchOptions::default());
        let results = index.search("AAPL");
        assert!(!results.is_empty());
        let top = &results[0];
        assert_eq!(index.record(top.record).unwrap().symbol, "AAPL");
        let sym = top.field_match(MatchField::Symbol).unwrap();
        assert_eq!(sym.ranges, vec![(0, 3)]);
    }

    #[test]
    fn title_matches_are_found() {
        let index = SearchIndex::new(stocks(), SearchOptions::default());
        let results = index.search("microsoft");
        let symbols: Vec<_> = results
            .iter()
            .map(|r| index.record(r.record).unwrap().symbol.as_str())
            .collect();
        assert!(symbols.contains(&"MSFT"));
    }

    #[test]
    fn limit_caps_the_result_count() {
        let records: Vec<StockRecord> = (0..50)
            .map(|i| StockRecord {
                symbol: format!("AB{i}"),
                title: format!("Abundant Company {i}"),
                industry: String::new(),
            })
            .collect();
        let index = SearchIndex::new(records, SearchOptions::default());
        assert!(index.search("ab").len() <= 30);
    }

    #[test]
    fn compresses_positions_into_inclusive_ranges() {
        assert_eq!(compress_ranges(&[0, 1, 2, 5]), vec![(0, 2), (5, 5)]);
        assert_eq!(compress_ranges(&[3]), vec![(3, 3)]);
        assert!(compress_ranges(&[]).is_empty());
    }

    #[test]
    fn empty_industry_field_is_skipped() {
        let records = vec![StockRecord {
            symbol: "TST".to_string(),
            title: "Test Co".to_string(),
            industry: String::new(),
        }];
        let index = SearchIndex::new(records, SearchOptions::default());
        let results = index.search("tst");
        assert_eq!(results.len(), 1);
        assert!(results[0].field_match(MatchField::Industry).is_none());
    }
}
