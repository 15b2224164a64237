use crate::core::models::selection::ClashFreeChains;

/// Keeps only subsets that are not contained in a larger accepted subset.
///
/// Candidates are ordered by descending size, ties broken by the lexicographic order of
/// their sorted chain ids, and accepted greedily unless an already accepted subset contains
/// them. Duplicates collapse onto one entry. The output is sorted the same way.
pub fn filter_maximal(mut subsets: Vec<ClashFreeChains>) -> Vec<ClashFreeChains> {
    subsets.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    subsets.dedup();

    let mut accepted: Vec<ClashFreeChains> = Vec::new();
    for candidate in subsets {
        if !accepted.iter().any(|kept| kept.contains_all(&candidate)) {
            accepted.push(candidate);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(ids: &[&str]) -> ClashFreeChains {
        ids.iter().copied().collect()
    }

    fn names(subsets: &[ClashFreeChains]) -> Vec<String> {
        subsets.iter().map(ClashFreeChains::name).collect()
    }

    #[test]
    fn drops_subsets_of_accepted_sets() {
        let input = vec![sel(&[]), sel(&["B"]), sel(&["C"])];
        assert_eq!(names(&filter_maximal(input)), vec!["B", "C"]);
    }

    #[test]
    fn output_is_an_antichain() {
        let input = vec![
            sel(&["A"]),
            sel(&["A", "C"]),
            sel(&["B"]),
            sel(&["C"]),
            sel(&["B", "D"]),
            sel(&["D"]),
            sel(&[]),
            sel(&["A", "D"]),
        ];

        let output = filter_maximal(input);

        assert_eq!(names(&output), vec!["A-C", "A-D", "B-D"]);
        for (i, a) in output.iter().enumerate() {
            for (j, b) in output.iter().enumerate() {
                if i != j {
                    assert!(!a.contains_all(b), "{a} contains {b}");
                }
            }
        }
    }

    #[test]
    fn order_of_input_does_not_change_output() {
        let forward = vec![sel(&["C"]), sel(&["A", "B"]), sel(&["A"]), sel(&["B", "C"])];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(filter_maximal(forward), filter_maximal(backward));
    }

    #[test]
    fn duplicates_collapse() {
        let input = vec![sel(&["A", "B"]), sel(&["B", "A"]), sel(&["A"])];
        assert_eq!(names(&filter_maximal(input)), vec!["A-B"]);
    }

    #[test]
    fn empty_input_and_lone_empty_set() {
        assert!(filter_maximal(Vec::new()).is_empty());
        assert_eq!(filter_maximal(vec![sel(&[])]), vec![sel(&[])]);
    }
}
