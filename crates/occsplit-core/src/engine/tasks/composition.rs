use crate::core::models::selection::ClashFreeChains;

/// Combines per-component selections into whole-structure selections.
///
/// Computes the Cartesian product over any number of components: every result is the
/// union of exactly one selection from each component, so the result count is the product
/// of the input lengths. Zero components yield one empty selection; a component with no
/// selections yields no results.
pub fn compose(per_component: &[Vec<ClashFreeChains>]) -> Vec<ClashFreeChains> {
    per_component
        .iter()
        .fold(vec![ClashFreeChains::new()], |partials, choices| {
            partials
                .iter()
                .flat_map(|partial| {
                    choices.iter().map(move |choice| {
                        let mut combined = partial.clone();
                        combined.extend(choice);
                        combined
                    })
                })
                .collect()
        })
}
