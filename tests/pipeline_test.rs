//! End-to-end seed scenarios for the phylo reconstruction pipeline: one
//! phoneme/lexeme/language pair at a time, through neighbor-joining and
//! ancestral reconstruction.

use std::collections::{BTreeSet, HashMap};

use phylo::distance::matrix::NamedMatrix;
use phylo::distance::{language as language_distance, lexeme as lexeme_distance, phoneme as phoneme_distance};
use phylo::lexicon::language::{Language, Phylogeny};
use phylo::lexicon::lexeme::{Entry, Lexeme};
use phylo::lexicon::tree::Tree;
use phylo::nj;
use phylo::phon::feature::{Feature, FeatureCategory, FeatureTable};
use phylo::phon::phoneme::Phoneme;
use phylo::reconstruct::{self, ConcatenateMerge};

fn feature(code: &str, index: u32) -> Feature {
    Feature::new(code, code, FeatureCategory::Place, index)
}

fn phoneme(glyph: &str, code: &str, index: u32) -> Phoneme {
    let mut features = BTreeSet::new();
    features.insert(feature(code, index));
    Phoneme::new(features, Some(glyph.to_string()))
}

fn flat_table() -> FeatureTable {
    FeatureTable::new(&HashMap::new(), &HashMap::new())
}

fn pdm_for(phonemes: &[Phoneme], empty: &Phoneme) -> NamedMatrix<Phoneme, f64> {
    let mut names: Vec<Phoneme> = phonemes.to_vec();
    names.push(empty.clone());
    NamedMatrix::build(names.clone(), names, |a, b| if a == b { 0.0 } else { 1.0 })
}

fn language(name: &str, code: &str, entries: Vec<Entry>) -> Language {
    Language::new(name, code, entries)
}

fn entry(meaning: &str, phonemes: Vec<Phoneme>, code: &str) -> Entry {
    Entry::Single(Lexeme::new(phonemes, meaning.to_string(), code.to_string()))
}

/// S1: two leaves with one identical meaning collapse to zero distance
/// everywhere, and a root joined directly by two zero-length edges.
#[test]
fn s1_single_identical_pair() {
    let empty = Phoneme::empty(&flat_table());
    let t = phoneme("t", "T", 1);
    let a = phoneme("a", "A", 2);
    let pdm = pdm_for(&[t.clone(), a.clone()], &empty);

    let lang_a = language("A", "a", vec![entry("one", vec![t.clone(), a.clone()], "a")]);
    let lang_b = language("B", "b", vec![entry("one", vec![t.clone(), a.clone()], "b")]);

    let lexeme_a = lang_a.entry("one").unwrap().representative();
    let lexeme_b = lang_b.entry("one").unwrap().representative();
    assert_eq!(lexeme_distance::distance(lexeme_a, lexeme_b, &empty, &pdm), 0.0);
    assert_eq!(language_distance::distance(&lang_a, &lang_b, &empty, &pdm), 0.0);

    let mut phylogeny = Phylogeny::new();
    let a_id = phylogeny.insert(lang_a);
    let b_id = phylogeny.insert(lang_b);
    let codes = vec!["a".to_string(), "b".to_string()];
    let distances = NamedMatrix::build(codes.clone(), codes, |_, _| 0.0);

    let root = nj::build_tree(&mut phylogeny, &[("a".to_string(), a_id), ("b".to_string(), b_id)], &distances).unwrap();
    let children = phylogeny.get(root).children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].1, 0.0);
    assert_eq!(children[1].1, 0.0);

    reconstruct::reconstruct_protolanguages(&mut phylogeny, root, &pdm, &empty, 2.0, &ConcatenateMerge);
    let reconstructed = phylogeny.get(root).entry("one").expect("root must have a reconstructed entry for \"one\"");
    match reconstructed {
        Entry::Single(lexeme) => assert_eq!(lexeme.representation(), "tata"),
        Entry::Multiple(_) => panic!("identical cognates must merge, not bundle as synonyms"),
    }
}

/// S2: disjoint vocabularies have no comparable evidence, so language
/// distance is +inf and NJ must not silently treat the pair as close.
#[test]
fn s2_disjoint_meanings_are_infinitely_distant() {
    let empty = Phoneme::empty(&flat_table());
    let t = phoneme("t", "T", 1);
    let a = phoneme("a", "A", 2);
    let m = phoneme("m", "M", 3);
    let o = phoneme("o", "O", 4);
    let pdm = pdm_for(&[t.clone(), a.clone(), m.clone(), o.clone()], &empty);

    let lang_a = language("A", "a", vec![entry("one", vec![t, a], "a")]);
    let lang_b = language("B", "b", vec![entry("two", vec![m, o], "b")]);

    assert_eq!(language_distance::distance(&lang_a, &lang_b, &empty, &pdm), f64::INFINITY);

    let mut phylogeny = Phylogeny::new();
    let a_id = phylogeny.insert(lang_a);
    let b_id = phylogeny.insert(lang_b);
    let codes = vec!["a".to_string(), "b".to_string()];
    let distances = NamedMatrix::build(codes.clone(), codes, |r, c| if r == c { 0.0 } else { f64::INFINITY });

    let root = nj::build_tree(&mut phylogeny, &[("a".to_string(), a_id), ("b".to_string(), b_id)], &distances).unwrap();
    let children = phylogeny.get(root).children();
    assert_eq!(children.len(), 2);
    assert!(children[0].1.is_infinite() || children[1].1.is_infinite());
}

/// S3: A and B are identical, C differs by one feature substitution; NJ
/// must group A and B under a node that then joins C.
#[test]
fn s3_three_leaf_rooted_topology() {
    let mut phylogeny = Phylogeny::new();
    let a = phylogeny.insert(language("A", "a", Vec::new()));
    let b = phylogeny.insert(language("B", "b", Vec::new()));
    let c = phylogeny.insert(language("C", "c", Vec::new()));

    let codes = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let raw = [[0.0, 0.0, 2.0], [0.0, 0.0, 2.0], [2.0, 2.0, 0.0]];
    let distances = NamedMatrix::build(codes.clone(), codes.clone(), |r, col| {
        let ri = codes.iter().position(|x| x == r).unwrap();
        let ci = codes.iter().position(|x| x == col).unwrap();
        raw[ri][ci]
    });

    let root = nj::build_tree(&mut phylogeny, &[("a".to_string(), a), ("b".to_string(), b), ("c".to_string(), c)], &distances).unwrap();
    let tree = Tree::new(&phylogeny, root);
    assert_eq!(tree.leaves().len(), 3);

    let root_children = phylogeny.get(root).children();
    assert_eq!(root_children.len(), 2);
    let inner_ab = root_children.iter().find(|&&(id, _)| phylogeny.get(id).children().len() == 2).map(|&(id, _)| id);
    let inner_ab = inner_ab.expect("A and B must join under a shared internal node before joining C");
    let ab_children: Vec<_> = phylogeny.get(inner_ab).children().iter().map(|&(id, _)| id).collect();
    assert!(ab_children.contains(&a) && ab_children.contains(&b));
}

/// S4: below threshold, the reconstructor merges; above threshold, it
/// bundles the two lexemes as synonyms instead.
#[test]
fn s4_reconstruction_threshold_decides_merge_vs_synonymy() {
    let empty = Phoneme::empty(&flat_table());
    let t = phoneme("t", "T", 1);
    let d = phoneme("d", "D", 2);

    let build = |threshold: f64, lexeme_distance_scale: f64| {
        let mut names = vec![t.clone(), d.clone(), empty.clone()];
        names.dedup();
        let pdm = NamedMatrix::build(names.clone(), names, move |a, b| {
            if a == b {
                0.0
            } else {
                lexeme_distance_scale
            }
        });

        let mut phylogeny = Phylogeny::new();
        let child0 = phylogeny.insert(language("A", "a", vec![entry("one", vec![t.clone()], "a")]));
        let child1 = phylogeny.insert(language("B", "b", vec![entry("one", vec![d.clone()], "b")]));
        let root = phylogeny.insert(language("Proto", "proto", Vec::new()));
        phylogeny.connect(root, child0, 0.1);
        phylogeny.connect(root, child1, 0.1);

        reconstruct::reconstruct_protolanguages(&mut phylogeny, root, &pdm, &empty, threshold, &ConcatenateMerge);
        phylogeny.get(root).entry("one").expect("root must have an entry for \"one\"").clone()
    };

    // branch_sum = 0.2, threshold 2.0: 0.3 > 0.4 is false -> merge.
    assert!(matches!(build(2.0, 0.6), Entry::Single(_)));
    // same branch_sum/threshold, larger raw substitution cost -> 0.5 > 0.4 -> synonymy.
    assert!(matches!(build(2.0, 1.0), Entry::Multiple(_)));
}

/// S5: once reconstruction picks a winning pair out of a synonym bundle, the
/// resulting proto-lexeme is pushed back down into that bundle, collapsing it
/// to a single entry.
#[test]
fn s5_synonymy_propagates_down_to_the_matched_descendant() {
    let empty = Phoneme::empty(&flat_table());
    let fir = phoneme("fir", "FIR", 1);
    let pir = phoneme("pir", "PIR", 2);
    let pdm = pdm_for(&[fir.clone(), pir.clone()], &empty);

    let mut phylogeny = Phylogeny::new();
    let synonyms = phylo::lexicon::lexeme::Synonyms::new(vec![
        Lexeme::new(vec![pir], "fire".into(), "a".into()),
        Lexeme::new(vec![fir.clone()], "fire".into(), "a".into()),
    ]);
    let child_a = phylogeny.insert(language("A", "a", vec![Entry::Multiple(synonyms)]));
    let child_b = phylogeny.insert(language("B", "b", vec![entry("fire", vec![fir], "b")]));
    let root = phylogeny.insert(language("Proto", "proto", Vec::new()));
    phylogeny.connect(root, child_a, 0.1);
    phylogeny.connect(root, child_b, 0.1);

    reconstruct::reconstruct_protolanguages(&mut phylogeny, root, &pdm, &empty, 2.0, &ConcatenateMerge);

    // B's lexeme ("fir") is the closer match against A's bundle, so the two
    // surviving "fir" forms concatenate into the proto-lexeme, and that same
    // proto-lexeme is what collapses A's bundle (the entry that was still
    // ambiguous), not B's already-resolved entry.
    match phylogeny.get(child_a).entry("fire") {
        Some(Entry::Single(lexeme)) => assert_eq!(lexeme.representation(), "firfir"),
        other => panic!("A's synonym bundle should have collapsed to a single entry, got {other:?}"),
    }
    match phylogeny.get(child_b).entry("fire") {
        Some(Entry::Single(lexeme)) => assert_eq!(lexeme.representation(), "fir"),
        other => panic!("B's entry was never ambiguous and must be left untouched, got {other:?}"),
    }
}

/// S6: an asymmetric feature-distance pair stays asymmetric through
/// phoneme distance and survives into lexeme distance.
///
/// `p1`/`p2` differ by one feature each way, and the oracle rates `F1->F2`
/// cheaper than `F2->F1`. The phoneme-distance assignment pads both sides
/// with an extra empty-feature slot before solving, so the oracle also needs
/// entries for pairing a real feature against that padding slot; tabulated
/// high enough to lose to the direct `F1<->F2` pairing, the assignment still
/// picks the direct match and the observed distances come out to the bare
/// `1.0`/`3.0` the oracle names.
#[test]
fn s6_asymmetric_feature_distance_is_observable() {
    let mut features_info = HashMap::new();
    features_info.insert("F1".to_string(), (1u32, "F1".to_string(), "place".to_string()));
    features_info.insert("F2".to_string(), (2u32, "F2".to_string(), "place".to_string()));
    let mut asymmetric = HashMap::new();
    asymmetric.insert("F1,F2".to_string(), 1.0);
    asymmetric.insert("F2,F1".to_string(), 3.0);
    asymmetric.insert("F1,X".to_string(), 5.0);
    asymmetric.insert("X,F1".to_string(), 5.0);
    asymmetric.insert("F2,X".to_string(), 5.0);
    asymmetric.insert("X,F2".to_string(), 5.0);
    asymmetric.insert("X,X".to_string(), 0.0);
    let table = FeatureTable::new(&features_info, &asymmetric);

    let mut set1 = BTreeSet::new();
    set1.insert(table.get("F1").clone());
    let p1 = Phoneme::new(set1, Some("p1".into()));
    let mut set2 = BTreeSet::new();
    set2.insert(table.get("F2").clone());
    let p2 = Phoneme::new(set2, Some("p2".into()));

    let config = phylo::distance::phoneme::PhonemeDistanceConfig::default();
    let forward = phoneme_distance::distance(&p1, &p2, &table, &config);
    let backward = phoneme_distance::distance(&p2, &p1, &table, &config);
    assert_eq!(forward, 1.0);
    assert_eq!(backward, 3.0);
    assert!(forward < backward, "the cheaper F1->F2 pairing must stay cheaper than F2->F1");

    let empty = Phoneme::empty(&table);
    let names = vec![p1.clone(), p2.clone(), empty.clone()];
    let pdm = NamedMatrix::build(names.clone(), names, |a, b| phoneme_distance::distance(a, b, &table, &config));

    let lex1 = Lexeme::new(vec![p1], "x".into(), "a".into());
    let lex2 = Lexeme::new(vec![p2], "x".into(), "b".into());
    let lexeme_forward = lexeme_distance::distance(&lex1, &lex2, &empty, &pdm);
    let lexeme_backward = lexeme_distance::distance(&lex2, &lex1, &empty, &pdm);
    assert!(lexeme_forward < lexeme_backward, "the phoneme-level asymmetry must survive alignment");
}
