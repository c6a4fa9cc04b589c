//! JSON tree serialization for reconstruction output.

use serde::Serialize;

use crate::lexicon::language::LanguageId;
use crate::lexicon::tree::Tree;

/// One node of the output tree: a language plus its children, and
/// optionally its full reconstructed/attested vocabulary.
#[derive(Debug, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<std::collections::BTreeMap<String, String>>,
    pub children: Vec<TreeNode>,
}

/// Render `tree` as a [`TreeNode`] suitable for `serde_json` serialization.
/// With `with_vocabulary`, every node carries its full meaning -> IPA
/// representation map; without it, just `name`/`children`.
pub fn tree_to_node(tree: &Tree, with_vocabulary: bool) -> TreeNode {
    build_node(tree, tree.root(), with_vocabulary)
}

fn build_node(tree: &Tree, id: LanguageId, with_vocabulary: bool) -> TreeNode {
    let language = tree.phylogeny().get(id);
    let vocabulary = with_vocabulary.then(|| {
        language
            .entries()
            .iter()
            .map(|entry| (entry.meaning().to_string(), entry.representation().to_string()))
            .collect()
    });
    let children = language
        .children()
        .iter()
        .map(|&(child_id, _distance)| build_node(tree, child_id, with_vocabulary))
        .collect();
    TreeNode { name: language.name().to_string(), vocabulary, children }
}
