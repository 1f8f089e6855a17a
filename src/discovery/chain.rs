use crate::attributes::{Middleware, WithoutMiddleware};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Maximum middleware entries per route before heap allocation.
pub const MAX_INLINE_MIDDLEWARE: usize = 8;

/// Effective middleware chain of one route, in attachment order.
pub type MiddlewareChain = SmallVec<[String; MAX_INLINE_MIDDLEWARE]>;

/// Flatten stacked middleware declarations, keeping order and duplicates.
pub fn declared_middleware(declarations: &[Middleware]) -> impl Iterator<Item = &str> {
    declarations
        .iter()
        .flat_map(|d| d.classes.iter().map(String::as_str))
}

/// Flatten stacked exclusion declarations.
pub fn declared_exclusions(declarations: &[WithoutMiddleware]) -> impl Iterator<Item = &str> {
    declarations
        .iter()
        .flat_map(|d| d.classes.iter().map(String::as_str))
}

/// Compute the effective chain from the combined (type then operation)
/// middleware and exclusions.
///
/// Every excluded class is removed wherever it was declared, then duplicates
/// collapse to their first occurrence. Identifiers are compared verbatim.
pub fn effective_chain<'s, M, E>(middleware: M, excluded: E) -> MiddlewareChain
where
    M: IntoIterator<Item = &'s str>,
    E: IntoIterator<Item = &'s str>,
{
    let excluded: HashSet<&str> = excluded.into_iter().collect();
    let mut seen: HashSet<&str> = HashSet::new();

    middleware
        .into_iter()
        .filter(|class| !excluded.contains(class))
        .filter(|class| seen.insert(*class))
        .map(str::to_string)
        .collect()
}
