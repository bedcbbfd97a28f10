//! # Dependency Resolver
//!
//! Computes the transitive import closure of a file in dependency-first order, the order a
//! reflection client needs to register descriptors one by one without forward references.
use super::store::DescriptorStore;
use std::collections::HashSet;

/// Returns the positions of `root` and all of its locally known transitive dependencies.
///
/// The traversal is a depth-first post-order over `dependency` lists, in declaration order:
///
/// * every file appears after all of its own dependencies,
/// * every file appears exactly once, no matter how many paths lead to it,
/// * imports that are not part of the store are skipped,
/// * cycles (including self imports) terminate because a file is never entered twice.
///
/// The walk uses an explicit stack, so long import chains cannot overflow the thread stack.
pub(crate) fn collect_with_dependencies(store: &DescriptorStore, root: usize) -> Vec<usize> {
    let mut ordered = Vec::new();
    let mut visited = HashSet::from([root]);
    // (file position, next dependency to visit)
    let mut stack = vec![(root, 0usize)];

    while let Some(frame) = stack.last_mut() {
        let (current, next) = *frame;
        frame.1 += 1;

        match store.file(current).dependency.get(next) {
            Some(dependency) => {
                if let Some(dep) = store.position(dependency)
                    && visited.insert(dep)
                {
                    stack.push((dep, 0));
                }
            }
            None => {
                stack.pop();
                ordered.push(current);
            }
        }
    }

    ordered
}
