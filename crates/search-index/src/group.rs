use crate::index::{MatchField, SearchResult};

/// Display buckets, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    TopMatches,
    Companies,
    Industries,
}

impl Bucket {
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::TopMatches => "Top Matches",
            Bucket::Companies => "Companies",
            Bucket::Industries => "Industries",
        }
    }
}

/// Ranked results partitioned by which field matched. Within each bucket
/// the engine's rank order is preserved.
#[derive(Debug, Clone, Default)]
pub struct GroupedResults {
    pub top_matches: Vec<SearchResult>,
    pub companies: Vec<SearchResult>,
    pub industries: Vec<SearchResult>,
}

impl GroupedResults {
    pub fn is_empty(&self) -> bool {
        self.top_matches.is_empty() && self.companies.is_empty() && self.industries.is_empty()
    }

    /// Non-empty buckets in render order.
    pub fn buckets(&self) -> Vec<(Bucket, &[SearchResult])> {
        [
            (Bucket::TopMatches, self.top_matches.as_slice()),
            (Bucket::Companies, self.companies.as_slice()),
            (Bucket::Industries, self.industries.as_slice()),
        ]
        .into_iter()
        .filter(|(_, results)| !results.is_empty())
        .collect()
    }
}

/// Partition ranked results: a symbol match starting at character 0 is a
/// top match, otherwise any title match files under companies, otherwise
/// an industry match under industries. Companies is the default bucket.
pub fn group_results(results: Vec<SearchResult>) -> GroupedResults {
    let mut grouped = GroupedResults::default();
    for result in results {
        let symbol_at_start = result
            .field_match(MatchField::Symbol)
            .and_then(|m| m.ranges.first())
            .is_some_and(|range| range.0 == 0);

        if symbol_at_start {
            grouped.top_matches.push(result);
        } else if result.field_match(MatchField::Title).is_some() {
            grouped.companies.push(result);
        } else if result.field_match(MatchField::Industry).is_some() {
            grouped.industries.push(result);
        } else {
            grouped.companies.push(result);
        }
    }
    grouped
}

/// One run of characters, either plain or part of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Split `text` into alternating plain/highlighted runs according to the
/// inclusive character ranges of a field match.
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let highlighted = ranges.iter().any(|&(start, end)| i >= start && i <= end);
        match segments.last_mut() {
            Some(seg) if seg.highlighted == highlighted => seg.text.push(c),
            _ => segments.push(Segment {
                text: c.to_string(),
                highlighted,
            }),
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{SearchIndex, SearchOptions};
    use dashboard_core::StockRecord;

    fn index() -> SearchIndex {
        let mk = |symbol: &str, title: &str, industry: &str| StockRecord {
            symbol: symbol.to_string(),
            title: title.to_string(),
            industry: industry.to_string(),
        };
        SearchIndex::new(
            vec![
                mk("AAPL", "Apple Inc.", "Consumer Electronics"),
                mk("APP", "Applovin Corp", "Software"),
                mk("SFTW", "Plain Holdings", "Apple Orchards"),
            ],
            SearchOptions::default(),
        )
    }

    #[test]
    fn symbol_at_offset_zero_is_a_top_match() {
        let idx = index();
        let grouped = group_results(idx.search("AAPL"));
        let top_symbols: Vec<_> = grouped
            .top_matches
            .iter()
            .map(|r| idx.record(r.record).unwrap().symbol.as_str())
            .collect();
        assert!(top_symbols.contains(&"AAPL"), "got {top_symbols:?}");
    }

    #[test]
    fn buckets_render_in_fixed_order() {
        let idx = index();
        let grouped = group_results(idx.search("app"));
        let order: Vec<Bucket> = grouped.buckets().iter().map(|(b, _)| *b).collect();
        let mut sorted = order.clone();
        sorted.sort_by_key(|b| match b {
            Bucket::TopMatches => 0,
            Bucket::Companies => 1,
            Bucket::Industries => 2,
        });
        assert_eq!(order, sorted);
        assert!(!grouped.is_empty());
    }

    #[test]
    fn industry_only_match_falls_through_to_industries() {
        let idx = index();
        let grouped = group_results(idx.search("orchards"));
        assert_eq!(grouped.industries.len(), 1);
        assert!(grouped.top_matches.is_empty());
        assert!(grouped.companies.is_empty());
    }

    #[test]
    fn rank_order_survives_grouping() {
        let idx = index();
        let flat = idx.search("app");
        let grouped = group_results(flat.clone());
        for bucket in [&grouped.top_matches, &grouped.companies, &grouped.industries] {
            let positions: Vec<usize> = bucket
                .iter()
                .map(|r| flat.iter().position(|f| f.record == r.record).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn highlight_merges_adjacent_runs() {
        let segments = highlight_segments("AAPL", &[(0, 1)]);
        assert_eq!(
            segments,
            vec![
                Segment { text: "AA".to_string(), highlighted: true },
                Segment { text: "PL".to_string(), highlighted: false },
            ]
        );
    }

    #[test]
    fn highlight_without_ranges_is_one_plain_run() {
        let segments = highlight_segments("Apple", &[]);
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].highlighted);
        assert_eq!(segments[0].text, "Apple");
    }
}
