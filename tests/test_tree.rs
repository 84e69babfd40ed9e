use taxassign::model::{BranchLength, LeafNameMap, TaxTreeBuilder, Tree, TreeBuilder};

/// Unrooted `(A:4,B:5,(C:1,D:2):3);`
fn unrooted_quartet() -> Tree {
    let mut tree = Tree::new(4);
    let a = tree.add_leaf("A", Some(BranchLength::new(4.0)));
    let b = tree.add_leaf("B", Some(BranchLength::new(5.0)));
    let c = tree.add_leaf("C", Some(BranchLength::new(1.0)));
    let d = tree.add_leaf("D", Some(BranchLength::new(2.0)));
    let cd = tree.add_internal_vertex(&[c, d], Some(BranchLength::new(3.0)));
    tree.add_root(&[a, b, cd]);
    tree
}

#[test]
fn test_building_tree() {
    let mut tree = Tree::new(3);
    let index_l1 = tree.add_leaf("Apteryx haastii", Some(BranchLength::new(1.0)));
    let index_l2 = tree.add_leaf("Apteryx owenii", Some(BranchLength::new(1.0)));
    let index_l3 = tree.add_leaf("Apteryx mantelli", Some(BranchLength::new(0.5)));
    let index_i1 = tree.add_internal_vertex(&[index_l1, index_l2], Some(BranchLength::new(1.5)));
    let index_root = tree.add_root(&[index_l3, index_i1]);

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(tree.num_edges(), 4);
    assert!(tree.is_valid());
    assert!(tree.is_rooted());

    // Root
    let root = tree.root();
    assert_eq!(root.index(), index_root);
    assert!(root.is_root());
    assert_eq!(root.children(), [index_l3, index_i1]);

    // Leaf
    let l2 = &tree[index_l2];
    assert!(l2.is_leaf());
    assert_eq!(l2.name(), Some("Apteryx owenii"));
    assert_eq!(l2.parent(), Some(index_i1));

    // Internal
    let inti = &tree[index_i1];
    assert!(inti.is_internal());
    assert_eq!(inti.branch_length().unwrap(), BranchLength::new(1.5));
    assert_eq!(inti.neighbors().collect::<Vec<_>>(), vec![index_root, index_l1, index_l2]);
}

#[test]
fn test_unrooted_tree_has_trifurcating_root() {
    let tree = unrooted_quartet();
    assert!(tree.is_valid());
    assert!(!tree.is_rooted());
    assert_eq!(tree.root().num_children(), 3);
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = Tree::new(2);
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = Tree::new(2);
    let _ = &tree[55];
}

#[test]
#[should_panic]
fn test_negative_branch_length_panics() {
    BranchLength::new(-0.1);
}

#[test]
fn test_invalid_without_root() {
    let mut tree = Tree::new(2);
    tree.add_leaf("A", None);
    tree.add_leaf("B", None);
    assert!(!tree.is_valid());
}

#[test]
fn test_invalid_with_empty_leaf_name() {
    let mut tree = Tree::new(2);
    let a = tree.add_leaf("", None);
    let b = tree.add_leaf("B", None);
    tree.add_root(&[a, b]);
    assert!(!tree.is_valid());
}

#[test]
fn test_leaf_lookup() {
    let tree = unrooted_quartet();
    assert_eq!(tree.find_leaf("C"), Some(2));
    assert_eq!(tree.find_leaf("E"), None);
    assert_eq!(tree.leaf_indices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
}

#[test]
fn test_leaf_name_map_first_leaf_wins() {
    let mut tree = Tree::new(3);
    let a = tree.add_leaf("Nestor", None);
    let b = tree.add_leaf("Strigops", None);
    let c = tree.add_leaf("Nestor", None);
    tree.add_root(&[a, b, c]);

    let names = LeafNameMap::from_tree(&tree);
    assert_eq!(names.num_names(), 2);
    assert_eq!(names.get_index("Nestor"), Some(a));
    assert!(names.contains_name("Strigops"));
    assert!(!names.contains_name("Cyanoramphus"));
}

// --- ITERATORS ---
#[test]
fn test_post_and_pre_order() {
    let tree = unrooted_quartet();
    let post: Vec<_> = tree.post_order_iter().map(|v| v.index()).collect();
    assert_eq!(post, vec![0, 1, 2, 3, 4, 5]);

    let pre: Vec<_> = tree.pre_order_iter().map(|v| v.index()).collect();
    assert_eq!(pre, vec![5, 0, 1, 4, 2, 3]);
}

#[test]
fn test_pre_order_from_leaf() {
    let tree = unrooted_quartet();
    let visits: Vec<_> = tree
        .pre_order_from(2)
        .map(|(v, from)| (v.index(), from))
        .collect();

    // C, then its parent, which expands to the root before D
    assert_eq!(
        visits,
        vec![
            (2, None),
            (4, Some(2)),
            (5, Some(4)),
            (0, Some(5)),
            (1, Some(5)),
            (3, Some(4)),
        ]
    );
}

#[test]
fn test_pre_order_from_visits_every_vertex_once() {
    let tree = unrooted_quartet();
    for start in 0..tree.num_vertices() {
        let mut seen: Vec<_> = tree.pre_order_from(start).map(|(v, _)| v.index()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..tree.num_vertices()).collect::<Vec<_>>());
    }
}

// --- REROOTING ---
#[test]
fn test_root_on_edge() {
    let mut tree = unrooted_quartet();
    let new_root = tree.root_on_edge(2); // edge above C

    assert!(tree.is_valid());
    assert!(tree.is_rooted());
    assert_eq!(tree.num_vertices(), 7);
    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.root_index(), new_root);
    assert_eq!(tree.root().children(), [2, 4]);

    // Former parent of C now leads to the former root
    assert_eq!(tree[4].parent(), Some(new_root));
    assert_eq!(tree[4].children(), [3, 5]);

    // Former root is an internal vertex below it
    assert!(tree[5].is_internal());
    assert_eq!(tree[5].parent(), Some(4));
    assert_eq!(tree[5].children(), [0, 1]);
}

#[test]
fn test_root_on_edge_moves_branch_lengths() {
    let mut tree = unrooted_quartet();
    tree.root_on_edge(2);

    assert_eq!(tree[2].branch_length(), Some(BranchLength::new(0.5)));
    assert_eq!(tree[4].branch_length(), Some(BranchLength::new(0.5)));
    assert_eq!(tree[5].branch_length(), Some(BranchLength::new(3.0)));
    assert_eq!(tree[3].branch_length(), Some(BranchLength::new(2.0)));
    assert_eq!(tree[0].branch_length(), Some(BranchLength::new(4.0)));
}

#[test]
fn test_root_on_root_child_edge() {
    let mut tree = unrooted_quartet();
    let new_root = tree.root_on_edge(0); // edge above A

    assert!(tree.is_valid());
    assert_eq!(tree.root().children(), [0, 5]);
    assert_eq!(tree[5].parent(), Some(new_root));
    assert_eq!(tree[5].children(), [1, 4]);
}

#[test]
#[should_panic]
fn test_root_on_edge_of_root_panics() {
    let mut tree = unrooted_quartet();
    let root = tree.root_index();
    tree.root_on_edge(root);
}

// --- BUILDER ---
#[test]
fn test_builder_lifecycle() {
    let mut builder = TaxTreeBuilder::new();
    assert!(builder.finish_tree().is_none());

    builder.init_next(3);
    let a = builder.add_leaf(Some(1.0), "A");
    let b = builder.add_leaf(Some(1.0), "B");
    let ab = builder.add_internal(&[a, b], Some(0.5));
    let c = builder.add_leaf(None, "C");
    builder.add_root(&[ab, c]);
    builder.set_name("kiwi".to_string());

    let tree = builder.finish_tree().unwrap();
    assert!(tree.is_valid());
    assert!(tree.is_rooted());
    assert_eq!(tree.name().map(String::as_str), Some("kiwi"));
    assert_eq!(tree[ab].branch_length(), Some(BranchLength::new(0.5)));

    // Back to empty
    assert!(builder.finish_tree().is_none());
}
