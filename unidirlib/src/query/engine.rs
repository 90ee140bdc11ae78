//! The query engine: filter and order a slice of universities.
//!
//! `evaluate` is a pure function of its inputs. It never touches the source
//! slice and returns a fresh, ordered list of borrowed records on every call.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};

use crate::data::{RegionMapping, University};

use super::options::{FilterSortSpec, SortKey};

/// Rank assumed for unranked universities when ordering by ranking.
pub const UNRANKED_SORT_RANK: u32 = 9999;

/// Run a query over `source`.
///
/// With `SortKey::Unranked` the four filters are ignored and the result is
/// every unranked university of `source`, in source order. Any other key
/// filters first (all predicates ANDed) and then orders with a stable sort.
pub fn evaluate<'a>(
    source: &'a [University],
    regions: &RegionMapping,
    spec: &FilterSortSpec,
) -> Vec<&'a University> {
    if spec.sort.is_filter_override() {
        let items: Vec<&University> = source.iter().filter(|u| !u.is_ranked()).collect();
        tracing::debug!(
            source = source.len(),
            matched = items.len(),
            "unranked override"
        );
        return items;
    }

    let needle = spec.search_needle();
    let stream = spec.stream.as_deref().map(str::to_lowercase);

    let mut items: Vec<&University> = source
        .iter()
        .filter(|u| matches_search(u, &needle))
        .filter(|u| matches_region(u, regions, spec.region.as_deref()))
        .filter(|u| matches_country(u, spec.country.as_deref()))
        .filter(|u| matches_stream(u, stream.as_deref()))
        .collect();

    sort_items(&mut items, spec.sort);

    tracing::debug!(
        source = source.len(),
        matched = items.len(),
        sort = %spec.sort,
        "evaluated query"
    );
    items
}

/// Empty needle passes; otherwise a substring of name, location, country or programs.
fn matches_search(uni: &University, needle: &str) -> bool {
    needle.is_empty()
        || [&uni.name, &uni.location, &uni.country, &uni.programs]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

fn matches_region(uni: &University, regions: &RegionMapping, region: Option<&str>) -> bool {
    region.is_none_or(|key| regions.contains(key, &uni.country))
}

fn matches_country(uni: &University, country: Option<&str>) -> bool {
    country.is_none_or(|c| uni.country == c)
}

/// `stream` is already lower-cased.
fn matches_stream(uni: &University, stream: Option<&str>) -> bool {
    stream.is_none_or(|s| uni.programs.to_lowercase().contains(s))
}

/// Rank used for ordering
fn sort_rank(uni: &University) -> u32 {
    uni.rank().unwrap_or(UNRANKED_SORT_RANK)
}

thread_local! {
    static COLLATOR: Option<Collator> = root_collator();
}

/// Root-locale collator at tertiary strength (base letters, then accents, then case).
fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            tracing::warn!(error = %err, "collator unavailable, falling back to case-folded order");
            None
        }
    }
}

/// Compare two strings the way a directory listing should read: Unicode
/// collation for the root locale, so `École` sorts with the e's, and the
/// exact bytes as tie-break so the order stays total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => {
                let folded_a = a.chars().flat_map(char::to_lowercase);
                let folded_b = b.chars().flat_map(char::to_lowercase);
                folded_a.cmp(folded_b)
            }
        })
        .then_with(|| a.cmp(b))
}

/// Sort in place. `Vec::sort_by` is stable, so equal keys keep source order.
fn sort_items(items: &mut [&University], sort: SortKey) {
    match sort {
        SortKey::Name => items.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortKey::Country => items.sort_by(|a, b| locale_cmp(&a.country, &b.country)),
        SortKey::Ranking => items.sort_by_key(|u| sort_rank(u)),
        SortKey::None | SortKey::Unranked => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::university::tests::uni;

    fn ids(items: &[&University]) -> Vec<u32> {
        items.iter().map(|u| u.id).collect()
    }

    fn sample() -> Vec<University> {
        let mut items = vec![
            uni(1, "Oxford", "UK", Some(3)),
            uni(2, "MIT", "USA", Some(1)),
            uni(3, "cambridge", "UK", Some(5)),
            uni(4, "Tokyo", "Japan", None),
            uni(5, "Lagos", "Nigeria", None),
        ];
        items[3].programs = "Engineering, Robotics".to_string();
        items[4].programs = "Law, Medicine".to_string();
        items
    }

    #[test]
    fn test_no_filters_keeps_source_order() {
        let source = sample();
        let result = evaluate(&source, &RegionMapping::standard(), &FilterSortSpec::new());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_country_filter_exact() {
        let source = vec![
            uni(1, "A", "US", None),
            uni(2, "B", "US", None),
            uni(3, "C", "UK", None),
        ];
        let regions = RegionMapping::standard();
        let result = evaluate(&source, &regions, &FilterSortSpec::new().country("UK"));
        assert_eq!(ids(&result), vec![3]);

        // Case-sensitive
        let result = evaluate(&source, &regions, &FilterSortSpec::new().country("uk"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_ranking_sort_puts_unranked_last() {
        let source = vec![
            uni(1, "A", "US", Some(5)),
            uni(2, "B", "US", None),
            uni(3, "C", "US", Some(2)),
        ];
        let spec = FilterSortSpec::new().sort(SortKey::Ranking);
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        let ranks: Vec<Option<u32>> = result.iter().map(|u| u.rank()).collect();
        assert_eq!(ranks, vec![Some(2), Some(5), None]);
    }

    #[test]
    fn test_ranking_sort_keeps_unranked_in_source_order() {
        let source = sample();
        let spec = FilterSortSpec::new().sort(SortKey::Ranking);
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        assert_eq!(ids(&result), vec![2, 1, 3, 4, 5]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let source = sample();
        let spec = FilterSortSpec::new().sort(SortKey::Name);
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        assert_eq!(ids(&result), vec![3, 5, 2, 1, 4]);
    }

    #[test]
    fn test_name_sort_collates_accents() {
        let source = vec![
            uni(1, "Yale University", "USA", None),
            uni(2, "École Polytechnique", "France", None),
            uni(3, "University of Zurich", "Switzerland", None),
            uni(4, "Universität Wien", "Austria", None),
        ];
        let spec = FilterSortSpec::new().sort(SortKey::Name);
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        let names: Vec<&str> = result.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "École Polytechnique",
                "Universität Wien",
                "University of Zurich",
                "Yale University",
            ]
        );
    }

    #[test]
    fn test_country_sort_is_stable() {
        let source = sample();
        let spec = FilterSortSpec::new().sort(SortKey::Country);
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        // Japan, Nigeria, UK (1 before 3), USA
        assert_eq!(ids(&result), vec![4, 5, 1, 3, 2]);
    }

    #[test]
    fn test_search_matches_any_field_case_insensitive() {
        let source = sample();
        let regions = RegionMapping::standard();

        let by_name = evaluate(&source, &regions, &FilterSortSpec::new().search("OXF"));
        assert_eq!(ids(&by_name), vec![1]);

        let by_location = evaluate(&source, &regions, &FilterSortSpec::new().search("japan city"));
        assert_eq!(ids(&by_location), vec![4]);

        let by_program = evaluate(&source, &regions, &FilterSortSpec::new().search("robotics"));
        assert_eq!(ids(&by_program), vec![4]);

        let padded = evaluate(&source, &regions, &FilterSortSpec::new().search("  mit  "));
        assert_eq!(ids(&padded), vec![2]);
    }

    #[test]
    fn test_region_filter() {
        let source = sample();
        let spec = FilterSortSpec::new().region("europe");
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn test_unknown_region_matches_nothing() {
        let source = sample();
        let spec = FilterSortSpec::new()
            .region("nonexistent-key")
            .sort(SortKey::Name);
        assert!(evaluate(&source, &RegionMapping::standard(), &spec).is_empty());
    }

    #[test]
    fn test_stream_filter_case_insensitive() {
        let source = sample();
        let spec = FilterSortSpec::new().stream("LAW");
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        assert_eq!(ids(&result), vec![5]);
    }

    #[test]
    fn test_filters_are_anded() {
        let source = sample();
        let spec = FilterSortSpec::new()
            .region("europe")
            .search("oxford")
            .stream("medicine");
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        assert_eq!(ids(&result), vec![1]);

        let spec = spec.country("USA");
        assert!(evaluate(&source, &RegionMapping::standard(), &spec).is_empty());
    }

    #[test]
    fn test_membership_matches_predicates() {
        let source = sample();
        let regions = RegionMapping::standard();
        let spec = FilterSortSpec::new().stream("engineering").region("europe");
        let result = evaluate(&source, &regions, &spec);
        for u in &source {
            let expected = u.programs.to_lowercase().contains("engineering")
                && regions.contains("europe", &u.country);
            assert_eq!(result.iter().any(|r| r.id == u.id), expected);
        }
    }

    #[test]
    fn test_unranked_ignores_other_filters() {
        let source = sample();
        let regions = RegionMapping::standard();
        let plain = evaluate(&source, &regions, &FilterSortSpec::new().sort(SortKey::Unranked));
        let filtered = evaluate(
            &source,
            &regions,
            &FilterSortSpec::new()
                .search("x")
                .region("nonexistent-key")
                .country("UK")
                .stream("law")
                .sort(SortKey::Unranked),
        );
        assert_eq!(ids(&plain), vec![4, 5]);
        assert_eq!(ids(&plain), ids(&filtered));
    }

    #[test]
    fn test_unranked_treats_zero_rank_as_unranked() {
        let source = vec![uni(1, "A", "US", Some(0)), uni(2, "B", "US", Some(7))];
        let spec = FilterSortSpec::new().sort(SortKey::Unranked);
        let result = evaluate(&source, &RegionMapping::standard(), &spec);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let source = sample();
        let regions = RegionMapping::standard();
        let spec = FilterSortSpec::new().search("a").sort(SortKey::Ranking);
        let first = evaluate(&source, &regions, &spec);
        let second = evaluate(&source, &regions, &spec);
        assert_eq!(first, second);
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zurich", "aachen"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
        assert_ne!(locale_cmp("Same", "same"), Ordering::Equal);
        assert_eq!(locale_cmp("école", "ecole"), Ordering::Greater);
        assert_eq!(locale_cmp("école", "ensae"), Ordering::Less);
    }
}
