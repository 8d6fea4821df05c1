use std::collections::HashSet;

use crate::scan::Candidate;

/// Orders candidates best-first and keeps one per unit number.
///
/// Higher score wins; equal scores prefer the shorter, more specific text.
/// The sort is stable, so remaining ties keep document order.
pub fn rank_and_dedupe(mut candidates: Vec<Candidate<'_>>) -> Vec<Candidate<'_>> {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.text_len.cmp(&b.text_len))
    });

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::rank_and_dedupe;
    use crate::scan::Candidate;

    fn candidate<'a>(doc: &'a Html, id: &str, text: &str, score: f64) -> Candidate<'a> {
        Candidate {
            element: doc.root_element(),
            text: text.to_string(),
            text_len: text.chars().count(),
            score,
            id: id.to_string(),
        }
    }

    #[test]
    fn highest_score_survives_per_identifier() {
        let doc = Html::parse_document("<p></p>");
        let ranked = rank_and_dedupe(vec![
            candidate(&doc, "2", "wrapper No.2 空き and more", 10.0),
            candidate(&doc, "2", "No.2 空き", 15.0),
            candidate(&doc, "4", "No.4 乾燥", 14.0),
        ]);
        let kept: Vec<_> = ranked.iter().map(|c| (c.id.as_str(), c.score)).collect();
        assert_eq!(kept, vec![("2", 15.0), ("4", 14.0)]);
    }

    #[test]
    fn score_ties_prefer_shorter_text() {
        let doc = Html::parse_document("<p></p>");
        let ranked = rank_and_dedupe(vec![
            candidate(&doc, "1", "No.1 洗濯 空き padded", 12.0),
            candidate(&doc, "1", "No.1 洗濯 空き", 12.0),
        ]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].text, "No.1 洗濯 空き");
    }

    #[test]
    fn full_ties_keep_document_order() {
        let doc = Html::parse_document("<p></p>");
        let ranked = rank_and_dedupe(vec![
            candidate(&doc, "3", "No.3 first", 12.0),
            candidate(&doc, "3", "No.3 other", 12.0),
        ]);
        assert_eq!(ranked[0].text, "No.3 first");
    }
}
