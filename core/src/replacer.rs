/// Ordered literal substitution over an in-memory document
use serde::{Deserialize, Serialize};

/// A single `search -> replace` pair. Both sides are literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub search: String,
    pub replace: String,
}

impl Substitution {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }
}

/// Ordered list of substitutions. Later rules see the output of earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionTable {
    rules: Vec<Substitution>,
}

impl SubstitutionTable {
    pub fn new(rules: Vec<Substitution>) -> Self {
        Self { rules }
    }

    pub fn from_pairs<S, R>(pairs: impl IntoIterator<Item = (S, R)>) -> Self
    where
        S: Into<String>,
        R: Into<String>,
    {
        Self {
            rules: pairs
                .into_iter()
                .map(|(search, replace)| Substitution::new(search, replace))
                .collect(),
        }
    }

    pub fn rules(&self) -> &[Substitution] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index pairs `(earlier, later)` where the earlier rule's replacement
    /// contains the later rule's search literal. Matches that only form
    /// across the edge of an inserted replacement are not detected.
    pub fn chains(&self) -> Vec<(usize, usize)> {
        let mut chains = Vec::new();
        for (i, earlier) in self.rules.iter().enumerate() {
            for (j, later) in self.rules.iter().enumerate().skip(i + 1) {
                if !later.search.is_empty() && earlier.replace.contains(&later.search) {
                    chains.push((i, j));
                }
            }
        }
        chains
    }

    /// True when no replacement contains any search literal.
    ///
    /// This is a containment check only. A replacement can still combine
    /// with neighbouring text into a search literal, so a second run over
    /// the output is not guaranteed to be a no-op.
    pub fn is_stable(&self) -> bool {
        self.rules.iter().all(|rule| {
            self.rules
                .iter()
                .all(|other| other.search.is_empty() || !rule.replace.contains(&other.search))
        })
    }
}

/// Hit count for one rule of a table run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleHit {
    pub index: usize,
    pub search: String,
    pub replace: String,
    pub count: usize,
}

/// Output of [`apply_table`].
#[derive(Debug, Clone)]
pub struct Replacement {
    pub text: String,
    pub hits: Vec<RuleHit>,
}

impl Replacement {
    pub fn total(&self) -> usize {
        self.hits.iter().map(|hit| hit.count).sum()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &RuleHit> {
        self.hits.iter().filter(|hit| hit.count == 0)
    }
}

/// Apply every rule of `table` to `document` in order and return the result.
pub fn replace_all(document: &str, table: &SubstitutionTable) -> String {
    apply_table(document, table).text
}

/// Like [`replace_all`], also counting how many occurrences each rule replaced.
pub fn apply_table(document: &str, table: &SubstitutionTable) -> Replacement {
    let mut text = document.to_string();
    let mut hits = Vec::with_capacity(table.len());

    for (index, rule) in table.rules().iter().enumerate() {
        // An empty needle would match between every character.
        let count = if rule.search.is_empty() {
            0
        } else {
            text.matches(rule.search.as_str()).count()
        };

        if count > 0 {
            text = text.replace(rule.search.as_str(), &rule.replace);
        }

        log::debug!("rule #{index} {:?} -> {:?}: {count} hit(s)", rule.search, rule.replace);
        hits.push(RuleHit {
            index,
            search: rule.search.clone(),
            replace: rule.replace.clone(),
            count,
        });
    }

    Replacement { text, hits }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_identity() {
        let doc = "<p>Tất cả</p>\n";
        assert_eq!(replace_all(doc, &SubstitutionTable::default()), doc);
    }

    #[test]
    fn absent_pattern_is_noop() {
        let table = SubstitutionTable::from_pairs([(">CN<", ">Sun<")]);
        let doc = "<span>Mon</span>";
        let result = apply_table(doc, &table);
        assert_eq!(result.text, doc);
        assert_eq!(result.total(), 0);
        assert_eq!(result.unmatched().count(), 1);
    }

    #[test]
    fn replaces_every_occurrence_in_place() {
        let table = SubstitutionTable::from_pairs([(">đơn<", ">orders<")]);
        let doc = "<b>>đơn<</b> x <i>>đơn<</i> >đơn<";
        let result = apply_table(doc, &table);
        assert_eq!(result.text, "<b>>orders<</b> x <i>>orders<</i> >orders<");
        assert_eq!(result.hits[0].count, 3);
        assert!(!result.text.contains(">đơn<"));
    }

    #[test]
    fn occurrences_do_not_overlap() {
        let table = SubstitutionTable::from_pairs([("aa", "b")]);
        assert_eq!(replace_all("aaa", &table), "ba");
        assert_eq!(apply_table("aaaa", &table).hits[0].count, 2);
    }

    #[test]
    fn replacement_containing_pattern_is_not_rematched() {
        let table = SubstitutionTable::from_pairs([("Calo", "Calo Calo")]);
        assert_eq!(replace_all("Calo", &table), "Calo Calo");
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let forward =
            SubstitutionTable::from_pairs([("Đạt", "Đạt 85%"), ("85%", "eighty-five")]);
        let reversed =
            SubstitutionTable::from_pairs([("85%", "eighty-five"), ("Đạt", "Đạt 85%")]);
        assert_eq!(replace_all("Đạt", &forward), "Đạt eighty-five");
        assert_eq!(replace_all("Đạt", &reversed), "Đạt 85%");
    }

    #[test]
    fn empty_search_is_skipped() {
        let table = SubstitutionTable::from_pairs([("", "x")]);
        assert_eq!(replace_all("abc", &table), "abc");
    }

    #[test]
    fn duplicate_rules_are_harmless() {
        let table = SubstitutionTable::from_pairs([
            ("'Đã hủy'", "'Cancelled'"),
            ("'Đã hủy'", "'Cancelled'"),
        ]);
        let result = apply_table("status === 'Đã hủy'", &table);
        assert_eq!(result.text, "status === 'Cancelled'");
        assert_eq!(result.hits[1].count, 0);
    }

    #[test]
    fn quoted_all_tab() {
        let table = SubstitutionTable::from_pairs([("'Tất cả'", "'All'")]);
        assert_eq!(replace_all("'Tất cả'", &table), "'All'");
    }

    #[test]
    fn weekday_labels() {
        let table = SubstitutionTable::from_pairs([(">T2<", ">Mon<"), (">T3<", ">Tue<")]);
        let doc = "<span>T1</span><span>>T2<</span>\n<span>>T3<</span>";
        assert_eq!(
            replace_all(doc, &table),
            "<span>T1</span><span>>Mon<</span>\n<span>>Tue<</span>"
        );
    }

    #[test]
    fn detects_chains_and_stability() {
        let chained = SubstitutionTable::from_pairs([("a", "xb"), ("b", "c"), ("c", "d")]);
        assert_eq!(chained.chains(), vec![(0, 1), (1, 2)]);
        assert!(!chained.is_stable());

        let stable = SubstitutionTable::from_pairs([(">T2<", ">Mon<"), (">T3<", ">Tue<")]);
        assert!(stable.chains().is_empty());
        assert!(stable.is_stable());
    }

    #[test]
    fn stable_table_reruns_cleanly_on_page_text() {
        let table = SubstitutionTable::from_pairs([("Calo", "Calories"), ("đơn", "orders")]);
        // "Calories" contains "Calo", so this table is not stable.
        assert!(!table.is_stable());

        let table = SubstitutionTable::from_pairs([("Chi tiết", "Details"), ("đơn", "orders")]);
        assert!(table.is_stable());
        let once = replace_all("Chi tiết đơn", &table);
        assert_eq!(replace_all(&once, &table), once);
    }

    #[test]
    fn stability_ignores_matches_formed_across_boundaries() {
        // "c" -> "a" puts an "a" right before the existing "b"
        let table = SubstitutionTable::from_pairs([("ab", "x"), ("c", "a")]);
        assert!(table.is_stable());
        assert!(table.chains().is_empty());

        let once = replace_all("cb", &table);
        assert_eq!(once, "ab");
        assert_eq!(replace_all(&once, &table), "x");
    }
}
