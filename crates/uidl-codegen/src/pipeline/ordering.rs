//! Stable topological ordering of chunks over `link_after`.

use super::chunk::Chunk;
use crate::error::{CodegenError, Result};
use std::collections::{BTreeSet, HashMap};

/// Order chunks so each follows everything in its `link_after` list.
///
/// Among chunks whose predecessors are all placed, the earliest inserted
/// goes first, so an already ordered list is returned unchanged. Links to
/// names no chunk carries are ignored.
pub fn order_chunks(chunks: Vec<Chunk>) -> Result<Vec<Chunk>> {
    let count = chunks.len();
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, chunk) in chunks.iter().enumerate() {
        positions.entry(chunk.name.as_str()).or_default().push(i);
    }

    let mut successors = vec![Vec::new(); count];
    let mut pending = vec![0usize; count];
    for (i, chunk) in chunks.iter().enumerate() {
        let predecessors = chunk
            .link_after
            .iter()
            .filter_map(|name| positions.get(name.as_str()))
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>();
        for predecessor in predecessors {
            successors[predecessor].push(i);
            pending[i] += 1;
        }
    }

    let mut ready = (0..count).filter(|&i| pending[i] == 0).collect::<BTreeSet<_>>();
    let mut order = Vec::with_capacity(count);
    while let Some(next) = ready.pop_first() {
        order.push(next);
        for &successor in &successors[next] {
            pending[successor] -= 1;
            if pending[successor] == 0 {
                ready.insert(successor);
            }
        }
    }

    if order.len() < count {
        return Err(CodegenError::ChunkOrdering {
            cycle: find_cycle(&chunks, &successors, &pending),
        });
    }

    let mut slots = chunks.into_iter().map(Some).collect::<Vec<_>>();
    Ok(order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect())
}

/// Names along one cycle among the chunks that could not be placed,
/// starting and ending with the same chunk.
fn find_cycle(chunks: &[Chunk], successors: &[Vec<usize>], pending: &[usize]) -> Vec<String> {
    let blocked = |i: usize| pending[i] > 0;
    let Some(start) = (0..chunks.len()).find(|&i| blocked(i)) else {
        return Vec::new();
    };

    // Every blocked chunk has a blocked predecessor, so walking predecessors
    // must revisit a chunk.
    let mut predecessor_of = vec![None; chunks.len()];
    for (from, targets) in successors.iter().enumerate() {
        for &to in targets {
            if blocked(from) && predecessor_of[to].is_none() {
                predecessor_of[to] = Some(from);
            }
        }
    }

    let mut seen = vec![None; chunks.len()];
    let mut walk = Vec::new();
    let mut current = start;
    loop {
        if let Some(position) = seen[current] {
            let mut cycle = walk[position..]
                .iter()
                .rev()
                .map(|&i: &usize| chunks[i].name.clone())
                .collect::<Vec<_>>();
            if let Some(first) = cycle.first().cloned() {
                cycle.push(first);
            }
            return cycle;
        }
        seen[current] = Some(walk.len());
        walk.push(current);
        match predecessor_of[current] {
            Some(previous) => current = previous,
            None => return walk.iter().map(|&i| chunks[i].name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FileType;
    use proptest::prelude::*;

    fn chunk(name: &str, after: &[&str]) -> Chunk {
        Chunk::text(name, FileType::Js, "").link_after(after)
    }

    fn names(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_links_reorder() {
        let ordered = order_chunks(vec![
            chunk("component", &["import-lib", "import-local"]),
            chunk("export", &["component"]),
            chunk("import-lib", &[]),
            chunk("import-local", &["import-lib"]),
        ])
        .unwrap();
        assert_eq!(
            names(&ordered),
            ["import-lib", "import-local", "component", "export"]
        );
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let ordered = order_chunks(vec![chunk("b", &[]), chunk("a", &[]), chunk("c", &["missing"])])
            .unwrap();
        assert_eq!(names(&ordered), ["b", "a", "c"]);
    }

    #[test]
    fn test_cycle_is_reported() {
        let err = order_chunks(vec![
            chunk("free", &[]),
            chunk("a", &["c"]),
            chunk("b", &["a"]),
            chunk("c", &["b"]),
        ])
        .unwrap_err();
        match err {
            CodegenError::ChunkOrdering { cycle } => {
                assert_eq!(cycle.len(), 4);
                assert_eq!(cycle.first(), cycle.last());
                assert!(!cycle.contains(&"free".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_self_link_is_a_cycle() {
        assert!(order_chunks(vec![chunk("loop", &["loop"])]).is_err());
    }

    proptest! {
        #[test]
        fn prop_acyclic_links_are_respected(links in prop::collection::vec(prop::collection::vec(0usize..12, 0..4), 1..12)) {
            // Only link to earlier indices so the graph is acyclic, then
            // present the chunks reversed.
            let chunks = links
                .iter()
                .enumerate()
                .map(|(i, targets)| {
                    let after = targets
                        .iter()
                        .filter(|&&t| t < i)
                        .map(|t| format!("c{t}"))
                        .collect::<Vec<_>>();
                    let after = after.iter().map(String::as_str).collect::<Vec<_>>();
                    chunk(&format!("c{i}"), &after)
                })
                .rev()
                .collect::<Vec<_>>();

            let ordered = order_chunks(chunks).unwrap();
            let position = |name: &str| ordered.iter().position(|c| c.name == name).unwrap();
            for c in &ordered {
                for before in &c.link_after {
                    prop_assert!(position(before) < position(&c.name));
                }
            }
        }
    }
}
