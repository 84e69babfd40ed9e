use std::collections::BTreeSet;
use taxassign::model::Tree;
use taxassign::propagation::{TaxAssigner, find_split_edge, root_by_outgroup};
use taxassign::taxonomy::{PartialLabeling, Taxopath};
use taxassign::TaxassignError;

/// Unrooted `(A,B,(C,D));` with leaves 0..4, `(C,D)` at 4 and the root at 5.
fn unrooted_quartet() -> Tree {
    let mut tree = Tree::new(4);
    let a = tree.add_leaf("A", None);
    let b = tree.add_leaf("B", None);
    let c = tree.add_leaf("C", None);
    let d = tree.add_leaf("D", None);
    let cd = tree.add_internal_vertex(&[c, d], None);
    tree.add_root(&[a, b, cd]);
    tree
}

/// Unrooted `((A,B),(C,D),(E,F));`
fn unrooted_three_cherries() -> Tree {
    let mut tree = Tree::new(6);
    let leaves: Vec<_> = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|name| tree.add_leaf(*name, None))
        .collect();
    let ab = tree.add_internal_vertex(&[leaves[0], leaves[1]], None);
    let cd = tree.add_internal_vertex(&[leaves[2], leaves[3]], None);
    let ef = tree.add_internal_vertex(&[leaves[4], leaves[5]], None);
    tree.add_root(&[ab, cd, ef]);
    tree
}

/// Leaf names below `index`, sorted.
fn leaf_names_below(tree: &Tree, index: usize) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack = vec![index];
    while let Some(current) = stack.pop() {
        let vertex = &tree[current];
        if let Some(name) = vertex.name() {
            names.push(name.to_string());
        }
        stack.extend(vertex.children());
    }
    names.sort();
    names
}

#[test]
fn test_single_leaf_outgroup_roots_on_its_edge() {
    let mut tree = unrooted_quartet();
    let root = root_by_outgroup(&mut tree, &["B"]).unwrap();

    assert!(tree.is_valid());
    assert!(tree.is_rooted());
    assert_eq!(tree.root_index(), root);
    assert!(tree.root().children().contains(&1));
    assert_eq!(tree[1].parent(), Some(root));
}

#[test]
fn test_monophyletic_outgroup_below_root() {
    let mut tree = unrooted_quartet();
    root_by_outgroup(&mut tree, &["C", "D"]).unwrap();

    assert!(tree.is_valid());
    let (first, second) = (tree.root().children()[0], tree.root().children()[1]);
    assert_eq!(leaf_names_below(&tree, first), ["C", "D"]);
    assert_eq!(leaf_names_below(&tree, second), ["A", "B"]);
}

#[test]
fn test_outgroup_on_root_side() {
    // {A,B} is split off by the edge above (C,D)
    let mut tree = unrooted_quartet();
    root_by_outgroup(&mut tree, &["B", "A"]).unwrap();

    assert!(tree.is_valid());
    let children = tree.root().children();
    assert_eq!(leaf_names_below(&tree, children[0]), ["C", "D"]);
    assert_eq!(leaf_names_below(&tree, children[1]), ["A", "B"]);
}

#[test]
fn test_outgroup_of_all_but_one_leaf() {
    let mut tree = unrooted_three_cherries();
    root_by_outgroup(&mut tree, &["A", "B", "C", "D", "E"]).unwrap();

    let children = tree.root().children();
    assert_eq!(leaf_names_below(&tree, children[0]), ["F"]);
    assert_eq!(leaf_names_below(&tree, children[1]), ["A", "B", "C", "D", "E"]);
}

#[test]
fn test_non_monophyletic_outgroup() {
    let mut tree = unrooted_three_cherries();
    assert_eq!(
        root_by_outgroup(&mut tree, &["A", "C"]),
        Err(TaxassignError::NonMonophyleticOutgroup { size: 2 })
    );
    assert!(!tree.is_rooted());
}

#[test]
fn test_outgroup_of_all_leaves_is_not_a_split() {
    let mut tree = unrooted_quartet();
    assert_eq!(
        root_by_outgroup(&mut tree, &["A", "B", "C", "D"]),
        Err(TaxassignError::NonMonophyleticOutgroup { size: 4 })
    );
}

#[test]
fn test_repeated_outgroup_names_count_once() {
    let mut tree = unrooted_quartet();
    root_by_outgroup(&mut tree, &["A", "A"]).unwrap();
    assert!(tree.root().children().contains(&0));
}

#[test]
fn test_rooting_tree_without_root() {
    let mut tree = Tree::new(3);
    let a = tree.add_leaf("A", None);
    let b = tree.add_leaf("B", None);
    tree.add_leaf("C", None);
    tree.add_internal_vertex(&[a, b], None);

    assert_eq!(
        root_by_outgroup(&mut tree, &["A"]),
        Err(TaxassignError::InvalidTree)
    );
    assert_eq!(tree.num_vertices(), 4);
}

#[test]
fn test_already_rooted() {
    let mut tree = Tree::new(2);
    let a = tree.add_leaf("A", None);
    let b = tree.add_leaf("B", None);
    tree.add_root(&[a, b]);

    assert_eq!(
        root_by_outgroup(&mut tree, &["A"]),
        Err(TaxassignError::AlreadyRooted)
    );
}

#[test]
fn test_rooting_twice_is_already_rooted() {
    let mut tree = unrooted_quartet();
    root_by_outgroup(&mut tree, &["A"]).unwrap();
    assert_eq!(
        root_by_outgroup(&mut tree, &["C"]),
        Err(TaxassignError::AlreadyRooted)
    );
}

#[test]
fn test_unknown_outgroup_name() {
    let mut tree = unrooted_quartet();
    assert_eq!(
        root_by_outgroup(&mut tree, &["A", "Moa"]),
        Err(TaxassignError::UnknownLeafName("Moa".to_string()))
    );
}

#[test]
fn test_empty_outgroup() {
    let mut tree = unrooted_quartet();
    let empty: &[&str] = &[];
    assert_eq!(root_by_outgroup(&mut tree, empty), Err(TaxassignError::EmptyOutgroup));
}

#[test]
fn test_find_split_edge() {
    let tree = unrooted_three_cherries();
    let cd: BTreeSet<_> = [2, 3].into_iter().collect();
    assert_eq!(find_split_edge(&tree, &cd), Some(7));

    let abcd: BTreeSet<_> = [0, 1, 2, 3].into_iter().collect();
    assert_eq!(find_split_edge(&tree, &abcd), Some(8));

    let bc: BTreeSet<_> = [1, 2].into_iter().collect();
    assert_eq!(find_split_edge(&tree, &bc), None);
}

#[test]
fn test_rooting_changes_consensus_at_former_root() {
    // (A,Q,(B,C)) unrooted: the consensus at the trifurcation mixes in A
    let build = || {
        let mut tree = Tree::new(4);
        let a = tree.add_leaf("A", None);
        let q = tree.add_leaf("Q", None);
        let b = tree.add_leaf("B", None);
        let c = tree.add_leaf("C", None);
        let bc = tree.add_internal_vertex(&[b, c], None);
        tree.add_root(&[a, q, bc]);
        tree
    };
    let labeling: PartialLabeling = [
        ("A", Taxopath::new(["Archaea"])),
        ("B", Taxopath::new(["Bacteria", "X"])),
        ("C", Taxopath::new(["Bacteria", "Y"])),
    ]
    .into_iter()
    .collect();

    let mut unrooted = build();
    let resolution = TaxAssigner::new().assign(&mut unrooted, &labeling).unwrap();
    assert!(resolution.assignments()[0].taxopath.is_undetermined());

    let mut rooted = build();
    let resolution = TaxAssigner::new()
        .with_outgroup(["A"])
        .assign(&mut rooted, &labeling)
        .unwrap();
    assert_eq!(resolution.assignments()[0].name, "Q");
    assert_eq!(resolution.assignments()[0].taxopath, Taxopath::new(["Bacteria"]));
}

#[test]
fn test_assign_reports_rooting_errors() {
    let mut tree = unrooted_three_cherries();
    let labeling: PartialLabeling = [("A", Taxopath::new(["K"]))].into_iter().collect();
    let result = TaxAssigner::new()
        .with_outgroup(["A", "F"])
        .assign(&mut tree, &labeling);
    assert_eq!(
        result.err(),
        Some(TaxassignError::NonMonophyleticOutgroup { size: 2 })
    );
}
