//! Navigation data tests against the generated site data

use pretty_assertions::assert_eq;

use anchors_navdata::*;

/// The `NAVTREE` array exactly as the site generator emitted it.
const GENERATED_NAVTREE: &str = r#"
[
  [ "Anchors", "index.html", [
    [ "Usage", "index.html#autotoc_md1", [
      [ "More Examples", "index.html#autotoc_md2", null ],
      [ "String Concatenation", "index.html#autotoc_md3", [
        [ "Using an Input of a Different Type", "index.html#autotoc_md4", null ],
        [ "Verifying That It Avoids Needless Computations", "index.html#autotoc_md5", null ]
      ] ],
      [ "Note", "index.html#autotoc_md6", null ]
    ] ],
    [ "Installation", "index.html#autotoc_md7", null ],
    [ "Roadmap", "index.html#autotoc_md8", null ],
    [ "Classes", "annotated.html", [
      [ "Class List", "annotated.html", "annotated_dup" ],
      [ "Class Index", "classes.html", null ],
      [ "Class Hierarchy", "hierarchy.html", "hierarchy" ],
      [ "Class Members", "functions.html", [
        [ "All", "functions.html", null ],
        [ "Functions", "functions_func.html", null ],
        [ "Typedefs", "functions_type.html", null ]
      ] ]
    ] ],
    [ "Files", "files.html", [
      [ "File List", "files.html", "files_dup" ]
    ] ]
  ] ]
]
"#;

/// The `NAVTREEINDEX` array exactly as the site generator emitted it.
const GENERATED_NAVTREEINDEX: &str = r#"
[
".html"
]
"#;

#[test]
fn test_site_tree_matches_generated_data() {
    let generated = NavTree::from_json(GENERATED_NAVTREE).unwrap();

    assert_eq!(site::nav_tree(), generated);
}

#[test]
fn test_site_index_matches_generated_data() {
    let generated = NavIndex::from_json(GENERATED_NAVTREEINDEX).unwrap();

    assert_eq!(site::nav_index(), generated);
}

#[test]
fn test_site_tree_is_well_formed() {
    assert!(site::nav_tree().validate().is_ok());
}

#[test]
fn test_site_index_covers_the_single_page_chunk() {
    assert!(site::nav_index().validate_for_pages(1).is_ok());
}

#[test]
fn test_site_tree_visits_entries_in_document_order() {
    let tree = site::nav_tree();
    let titles: Vec<&str> = tree.iter().map(|node| node.title.as_str()).collect();

    assert_eq!(
        titles,
        [
            "Anchors",
            "Usage",
            "More Examples",
            "String Concatenation",
            "Using an Input of a Different Type",
            "Verifying That It Avoids Needless Computations",
            "Note",
            "Installation",
            "Roadmap",
            "Classes",
            "Class List",
            "Class Index",
            "Class Hierarchy",
            "Class Members",
            "All",
            "Functions",
            "Typedefs",
            "Files",
            "File List",
        ]
    );
}

#[test]
fn test_site_tree_shape() {
    let tree = site::nav_tree();

    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.roots()[0].title, "Anchors");
    assert_eq!(tree.node_count(), 19);
    assert_eq!(tree.max_depth(), 4);
}

#[test]
fn test_site_tree_references_external_subtrees() {
    let tree = site::nav_tree();

    let externals: Vec<(&str, &str)> = tree
        .iter()
        .filter_map(|node| match &node.children {
            NavChildren::External(subtree) => Some((node.title.as_str(), subtree.as_str())),
            _ => None,
        })
        .collect();

    assert_eq!(
        externals,
        [
            ("Class List", "annotated_dup"),
            ("Class Hierarchy", "hierarchy"),
            ("File List", "files_dup"),
        ]
    );
}

#[test]
fn test_site_tree_round_trips_through_json() {
    let tree = site::nav_tree();

    let json = tree.to_json().unwrap();
    let parsed = NavTree::from_json(&json).unwrap();

    assert_eq!(tree, parsed);
}

#[test]
fn test_rendered_script_carries_the_sync_messages() {
    let script = render_script(&site::nav_tree(), &site::nav_index()).unwrap();

    assert_eq!(SYNC_ON_MESSAGE, "click to disable panel synchronisation");
    assert_eq!(SYNC_OFF_MESSAGE, "click to enable panel synchronisation");
    assert!(script.contains("var SYNCONMSG = 'click to disable panel synchronisation';"));
    assert!(script.contains("var SYNCOFFMSG = 'click to enable panel synchronisation';"));
}

#[test]
fn test_validation_catches_blank_entries_anywhere() {
    let mut tree = site::nav_tree();
    tree.push_root(NavNode::leaf("Dangling", ""));

    assert!(tree.validate().is_err());
}
