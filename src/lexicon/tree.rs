//! [`Tree`]: the set of languages and edges reachable from a root.

use crate::lexicon::language::{LanguageId, Phylogeny};

/// A discovered edge: `(parent, child, distance)`.
pub type TreeEdge = (LanguageId, LanguageId, f64);

/// A read-only view over the languages descending from `root` within a
/// [`Phylogeny`], discovered by a depth-first walk from `root`.
pub struct Tree<'a> {
    phylogeny: &'a Phylogeny,
    root: LanguageId,
    languages: Vec<LanguageId>,
    leaves: Vec<LanguageId>,
    edges: Vec<TreeEdge>,
}

impl<'a> Tree<'a> {
    pub fn new(phylogeny: &'a Phylogeny, root: LanguageId) -> Self {
        let mut languages = vec![root];
        let mut leaves = Vec::new();
        let mut edges = Vec::new();
        Self::discover(phylogeny, root, &mut languages, &mut leaves, &mut edges);
        if phylogeny.get(root).is_leaf() {
            leaves.push(root);
        }
        Tree { phylogeny, root, languages, leaves, edges }
    }

    fn discover(
        phylogeny: &Phylogeny,
        node: LanguageId,
        languages: &mut Vec<LanguageId>,
        leaves: &mut Vec<LanguageId>,
        edges: &mut Vec<TreeEdge>,
    ) {
        for &(child, distance) in phylogeny.get(node).children() {
            edges.push((node, child, distance));
            languages.push(child);
            Self::discover(phylogeny, child, languages, leaves, edges);
            if phylogeny.get(child).is_leaf() {
                leaves.push(child);
            }
        }
    }

    pub fn root(&self) -> LanguageId {
        self.root
    }

    pub fn languages(&self) -> &[LanguageId] {
        &self.languages
    }

    pub fn leaves(&self) -> &[LanguageId] {
        &self.leaves
    }

    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    pub fn phylogeny(&self) -> &Phylogeny {
        self.phylogeny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::language::Language;

    #[test]
    fn discovers_all_descendants_and_leaves() {
        let mut phylogeny = Phylogeny::new();
        let root = phylogeny.insert(Language::new("Root", "r", vec![]));
        let mid = phylogeny.insert(Language::new("Mid", "m", vec![]));
        let leaf_a = phylogeny.insert(Language::new("A", "a", vec![]));
        let leaf_b = phylogeny.insert(Language::new("B", "b", vec![]));
        phylogeny.connect(root, mid, 0.1);
        phylogeny.connect(root, leaf_a, 0.2);
        phylogeny.connect(mid, leaf_b, 0.3);

        let tree = Tree::new(&phylogeny, root);
        assert_eq!(tree.languages().len(), 4);
        assert_eq!(tree.edges().len(), 3);
        let mut leaves = tree.leaves().to_vec();
        leaves.sort();
        let mut expected = vec![leaf_a, leaf_b];
        expected.sort();
        assert_eq!(leaves, expected);
    }
}
