use rstest::rstest;
use treebrowser::managers::sidebar_tree::{SidebarTree, SidebarTreeTrait, DEFAULT_TAB_NAME};
use treebrowser::types::errors::SidebarError;
use treebrowser::types::settings::SeedItem;
use treebrowser::types::sidebar::{Icon, ItemId, Placement, SidebarItem, SidebarNode};

/// Builds `[TabA, FolderF{TabB}]` and returns (tree, a, f, b).
fn tab_and_folder() -> (SidebarTree, ItemId, ItemId, ItemId) {
    let mut tree = SidebarTree::new();
    let f = tree.create_folder("F", None);
    let b = tree.add_tab("https://b.com", None, Some(f));
    let a = tree.add_tab("https://a.com", None, None);
    (tree, a, f, b)
}

fn names(tree: &SidebarTree, ids: &[ItemId]) -> Vec<String> {
    ids.iter()
        .map(|id| tree.get(*id).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_add_tab_to_empty_forest() {
    let mut tree = SidebarTree::new();
    let id = tree.add_tab("https://x.com", None, None);

    assert_eq!(tree.root_ids(), &[id]);
    assert_eq!(tree.len(), 1);
    let tab = tree.find_tab(id).unwrap();
    assert_eq!(tab.name, "x.com");
    assert_eq!(tab.url(), "https://x.com");
    assert!(!tab.has_loaded);
    assert!(!tab.is_loading());
}

#[test]
fn test_add_tab_explicit_name_and_placeholder() {
    let mut tree = SidebarTree::new();
    let named = tree.add_tab("https://x.com", Some("Docs"), None);
    let hostless = tree.add_tab("about:blank", None, None);

    assert_eq!(tree.find_tab(named).unwrap().name, "Docs");
    assert_eq!(tree.find_tab(hostless).unwrap().name, DEFAULT_TAB_NAME);

    tree.set_placeholder_name("Untitled");
    let other = tree.add_tab("not a url", None, None);
    assert_eq!(tree.find_tab(other).unwrap().name, "Untitled");
}

#[test]
fn test_root_tabs_insert_at_front() {
    let mut tree = SidebarTree::new();
    let first = tree.add_tab("https://one.com", None, None);
    let second = tree.add_tab("https://two.com", None, None);
    assert_eq!(tree.root_ids(), &[second, first]);
}

#[test]
fn test_root_folders_append_at_end() {
    let mut tree = SidebarTree::new();
    let f1 = tree.create_folder("One", None);
    let tab = tree.add_tab("https://x.com", None, None);
    let f2 = tree.create_folder("Two", None);
    assert_eq!(tree.root_ids(), &[tab, f1, f2]);
}

#[test]
fn test_items_append_inside_folder() {
    let mut tree = SidebarTree::new();
    let folder = tree.create_folder("F", None);
    let t1 = tree.add_tab("https://one.com", None, Some(folder));
    let t2 = tree.add_tab("https://two.com", None, Some(folder));
    let sub = tree.create_folder("Sub", Some(folder));

    assert_eq!(tree.children_of(folder).unwrap(), &[t1, t2, sub]);
    assert_eq!(tree.parent_of(t2), Some(folder));
    assert_eq!(tree.parent_of(folder), None);
    assert_eq!(tree.index_in_parent(sub), Some(2));
}

#[test]
fn test_missing_parent_falls_back_to_root() {
    let mut tree = SidebarTree::new();
    let existing = tree.create_folder("F", None);
    let tab = tree.add_tab("https://x.com", None, Some(ItemId::new()));
    let folder = tree.create_folder("G", Some(ItemId::new()));

    assert_eq!(tree.root_ids(), &[tab, existing, folder]);
    assert_eq!(tree.parent_of(tab), None);
}

#[test]
fn test_tab_as_parent_falls_back_to_root() {
    let mut tree = SidebarTree::new();
    let host = tree.add_tab("https://host.com", None, None);
    let tab = tree.add_tab("https://x.com", None, Some(host));
    assert_eq!(tree.root_ids(), &[tab, host]);
}

#[test]
fn test_new_folder_defaults() {
    let mut tree = SidebarTree::new();
    let id = tree.create_folder("F", None);
    let folder = tree.find_folder(id).unwrap();
    assert!(folder.is_expanded);
    assert!(folder.children.is_empty());
    assert_eq!(
        tree.get(id).unwrap().icon(),
        Some(Icon::Glyph("folder".to_string()))
    );
}

#[test]
fn test_ids_are_unique() {
    let mut tree = SidebarTree::new();
    let ids: Vec<ItemId> = (0..50)
        .map(|i| {
            if i % 3 == 0 {
                tree.create_folder("F", None)
            } else {
                tree.add_tab("https://x.com", None, None)
            }
        })
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
}

#[test]
fn test_close_tab_returns_it() {
    let (mut tree, a, _f, _b) = tab_and_folder();
    let removed = tree.close_or_delete(a).unwrap();

    assert_eq!(removed.id(), a);
    assert!(removed.descendants.is_empty());
    assert!(!tree.contains(a));
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_delete_folder_removes_subtree() {
    let mut tree = SidebarTree::new();
    let outer = tree.create_folder("Outer", None);
    let inner = tree.create_folder("Inner", Some(outer));
    let t1 = tree.add_tab("https://one.com", None, Some(inner));
    let t2 = tree.add_tab("https://two.com", None, Some(outer));
    let keep = tree.add_tab("https://keep.com", None, None);

    let removed = tree.close_or_delete(outer).unwrap();
    assert_eq!(removed.ids(), vec![outer, inner, t1, t2]);
    assert!(removed.contains(t1));

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root_ids(), &[keep]);
    for gone in [outer, inner, t1, t2] {
        assert!(tree.get(gone).is_none());
        assert_eq!(tree.parent_of(gone), None);
    }
}

#[test]
fn test_delete_nested_item() {
    let (mut tree, _a, f, b) = tab_and_folder();
    assert!(tree.close_or_delete(b).is_some());
    assert!(tree.children_of(f).unwrap().is_empty());
}

#[test]
fn test_close_twice_is_noop() {
    let (mut tree, a, _f, _b) = tab_and_folder();
    assert!(tree.close_or_delete(a).is_some());
    let before = tree.outline();
    assert!(tree.close_or_delete(a).is_none());
    assert_eq!(tree.outline(), before);
}

#[test]
fn test_rename_tab_and_folder() {
    let (mut tree, a, f, _b) = tab_and_folder();
    assert!(tree.rename(a, "Alpha"));
    assert!(tree.rename(f, "Folder"));
    assert_eq!(names(&tree, &[a, f]), vec!["Alpha", "Folder"]);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn test_rename_blank_is_ignored(#[case] blank: &str) {
    let (mut tree, a, _f, _b) = tab_and_folder();
    assert!(!tree.rename(a, blank));
    assert_eq!(tree.find_tab(a).unwrap().name, "a.com");
}

#[test]
fn test_rename_unknown_is_ignored() {
    let (mut tree, _a, _f, _b) = tab_and_folder();
    let before = tree.outline();
    assert!(!tree.rename(ItemId::new(), "Name"));
    assert_eq!(tree.outline(), before);
}

#[test]
fn test_toggle_expansion() {
    let (mut tree, a, f, _b) = tab_and_folder();
    assert!(tree.toggle_expansion(f));
    assert!(!tree.find_folder(f).unwrap().is_expanded);
    assert!(tree.toggle_expansion(f));
    assert!(tree.find_folder(f).unwrap().is_expanded);

    assert!(!tree.toggle_expansion(a));
    assert!(!tree.toggle_expansion(ItemId::new()));
}

#[test]
fn test_move_into_folder_at_index() {
    let (mut tree, a, f, b) = tab_and_folder();
    let placement = tree.move_item(a, Some(f), 0).unwrap();

    assert_eq!(placement, Placement { parent: Some(f), index: 0 });
    assert_eq!(tree.children_of(f).unwrap(), &[a, b]);
    assert_eq!(tree.root_ids(), &[f]);
    assert_eq!(tree.parent_of(a), Some(f));
}

#[test]
fn test_move_out_of_folder_to_root() {
    let (mut tree, a, f, b) = tab_and_folder();
    tree.move_item(b, None, 1).unwrap();

    assert_eq!(tree.root_ids(), &[a, b, f]);
    assert!(tree.children_of(f).unwrap().is_empty());
    assert_eq!(tree.parent_of(b), None);
}

#[test]
fn test_move_index_is_clamped() {
    let (mut tree, a, f, _b) = tab_and_folder();
    let placement = tree.move_item(f, None, 5).unwrap();

    assert_eq!(placement, Placement { parent: None, index: 1 });
    assert_eq!(tree.root_ids(), &[a, f]);
}

#[test]
fn test_move_clamps_on_root_of_three() {
    let mut tree = SidebarTree::new();
    let f = tree.create_folder("F", None);
    let t1 = tree.add_tab("https://one.com", None, None);
    let t2 = tree.add_tab("https://two.com", None, None);
    // Root is [t2, t1, f]; with f lifted out the list has two entries.
    let placement = tree.move_item(f, None, 5).unwrap();
    assert_eq!(placement.index, 2);
    assert_eq!(tree.root_ids(), &[t2, t1, f]);
}

#[test]
fn test_move_nested_folder_to_root_appends() {
    let mut tree = SidebarTree::new();
    let outer = tree.create_folder("Outer", None);
    let inner = tree.create_folder("Inner", Some(outer));
    let tab = tree.add_tab("https://x.com", None, None);
    assert_eq!(tree.root_ids().len(), 2);

    let placement = tree.move_item(inner, None, 5).unwrap();
    assert_eq!(placement, Placement { parent: None, index: 2 });
    assert_eq!(tree.root_ids(), &[tab, outer, inner]);
}

#[test]
fn test_move_within_same_parent() {
    let mut tree = SidebarTree::new();
    let folder = tree.create_folder("F", None);
    let t1 = tree.add_tab("https://one.com", None, Some(folder));
    let t2 = tree.add_tab("https://two.com", None, Some(folder));
    let t3 = tree.add_tab("https://three.com", None, Some(folder));

    tree.move_item(t1, Some(folder), 2).unwrap();
    assert_eq!(tree.children_of(folder).unwrap(), &[t2, t3, t1]);

    tree.move_item(t1, Some(folder), 0).unwrap();
    assert_eq!(tree.children_of(folder).unwrap(), &[t1, t2, t3]);
}

#[test]
fn test_move_onto_self_is_rejected() {
    let (mut tree, _a, f, _b) = tab_and_folder();
    let before = tree.outline();
    assert_eq!(tree.move_item(f, Some(f), 0), Err(SidebarError::SelfParent(f)));
    assert_eq!(tree.outline(), before);
}

#[test]
fn test_move_into_descendant_is_rejected() {
    let mut tree = SidebarTree::new();
    let outer = tree.create_folder("Outer", None);
    let middle = tree.create_folder("Middle", Some(outer));
    let inner = tree.create_folder("Inner", Some(middle));
    let before = tree.outline();

    assert_eq!(
        tree.move_item(outer, Some(inner), 0),
        Err(SidebarError::IntoDescendant {
            dragged: outer,
            target: inner
        })
    );
    assert_eq!(
        tree.move_item(outer, Some(middle), 0),
        Err(SidebarError::IntoDescendant {
            dragged: outer,
            target: middle
        })
    );
    assert_eq!(tree.outline(), before);

    // Moving a descendant up and out is fine.
    tree.move_item(inner, None, 0).unwrap();
    assert_eq!(tree.root_ids(), &[inner, outer]);
}

#[test]
fn test_move_unknown_item_is_rejected() {
    let (mut tree, _a, f, _b) = tab_and_folder();
    let before = tree.outline();
    let ghost = ItemId::new();
    assert_eq!(tree.move_item(ghost, Some(f), 0), Err(SidebarError::NotFound(ghost)));
    assert_eq!(tree.outline(), before);
}

#[test]
fn test_move_to_missing_folder_lands_at_root() {
    let (mut tree, a, f, b) = tab_and_folder();
    let placement = tree.move_item(b, Some(ItemId::new()), 1).unwrap();

    assert_eq!(placement, Placement { parent: None, index: 1 });
    assert_eq!(tree.root_ids(), &[a, b, f]);
    assert!(tree.contains(b));
}

#[test]
fn test_move_onto_tab_lands_at_root() {
    let (mut tree, a, f, b) = tab_and_folder();
    tree.move_item(b, Some(a), 0).unwrap();
    assert_eq!(tree.root_ids(), &[b, a, f]);
}

#[test]
fn test_traversal_is_depth_first_preorder() {
    let mut tree = SidebarTree::new();
    let f1 = tree.create_folder("F1", None);
    let f2 = tree.create_folder("F2", None);
    let t_root = tree.add_tab("https://root.com", None, None);
    let t_f1 = tree.add_tab("https://f1.com", None, Some(f1));
    let nested = tree.create_folder("Nested", Some(f1));
    let t_nested = tree.add_tab("https://nested.com", None, Some(nested));
    let t_f2 = tree.add_tab("https://f2.com", None, Some(f2));

    let order: Vec<ItemId> = tree.iter().map(SidebarItem::id).collect();
    assert_eq!(order, vec![t_root, f1, t_f1, nested, t_nested, f2, t_f2]);

    let tabs: Vec<ItemId> = tree.all_tabs().iter().map(|tab| tab.id).collect();
    assert_eq!(tabs, vec![t_root, t_f1, t_nested, t_f2]);
    assert_eq!(tree.tab_count(), 4);
}

#[test]
fn test_first_tab_searches_into_folders() {
    let (mut tree, a, _f, b) = tab_and_folder();
    assert_eq!(tree.first_tab().unwrap().id, a);
    tree.close_or_delete(a);
    assert_eq!(tree.first_tab().unwrap().id, b);
    tree.close_or_delete(b);
    assert!(tree.first_tab().is_none());
}

#[test]
fn test_find_tab_ignores_folders() {
    let (tree, a, f, b) = tab_and_folder();
    assert!(tree.find_tab(a).is_some());
    assert!(tree.find_tab(b).is_some());
    assert!(tree.find_tab(f).is_none());
    assert!(tree.find_tab(ItemId::new()).is_none());
}

#[test]
fn test_visible_rows_skip_collapsed_children() {
    let (mut tree, a, f, b) = tab_and_folder();
    let rows: Vec<(ItemId, usize)> = tree.visible_rows().iter().map(|r| (r.id, r.depth)).collect();
    assert_eq!(rows, vec![(a, 0), (f, 0), (b, 1)]);

    tree.toggle_expansion(f);
    let rows: Vec<ItemId> = tree.visible_rows().iter().map(|r| r.id).collect();
    assert_eq!(rows, vec![a, f]);
}

#[test]
fn test_outline_mirrors_structure() {
    let (tree, a, f, b) = tab_and_folder();
    assert_eq!(
        tree.outline(),
        vec![
            SidebarNode::Tab {
                id: a,
                name: "a.com".to_string(),
                url: "https://a.com".to_string(),
            },
            SidebarNode::Folder {
                id: f,
                name: "F".to_string(),
                expanded: true,
                children: vec![SidebarNode::Tab {
                    id: b,
                    name: "b.com".to_string(),
                    url: "https://b.com".to_string(),
                }],
            },
        ]
    );
}

#[test]
fn test_from_seed_preserves_order() {
    let seed = vec![
        SeedItem::Tab {
            url: "https://first.com".to_string(),
            name: None,
        },
        SeedItem::Folder {
            name: "Reading".to_string(),
            expanded: false,
            children: vec![
                SeedItem::Tab {
                    url: "https://a.com".to_string(),
                    name: Some("A".to_string()),
                },
                SeedItem::Tab {
                    url: "https://b.com".to_string(),
                    name: None,
                },
            ],
        },
        SeedItem::Tab {
            url: "https://last.com".to_string(),
            name: None,
        },
    ];
    let tree = SidebarTree::from_seed(&seed);

    let roots = tree.root_ids().to_vec();
    assert_eq!(names(&tree, &roots), vec!["first.com", "Reading", "last.com"]);
    let folder = tree.find_folder(roots[1]).unwrap();
    assert!(!folder.is_expanded);
    assert_eq!(names(&tree, &folder.children), vec!["A", "b.com"]);
}

#[test]
fn test_create_then_delete_folder_round_trip() {
    let mut tree = SidebarTree::new();
    let x = tree.create_folder("X", None);
    let tab = tree.add_tab("https://inside.com", None, Some(x));
    assert!(tree.all_tabs().iter().any(|t| t.id == tab));

    tree.close_or_delete(x);
    assert!(!tree.all_tabs().iter().any(|t| t.id == tab));
}

#[test]
fn test_set_url_resets_has_loaded() {
    let (mut tree, a, _f, _b) = tab_and_folder();
    let tab = tree.find_tab_mut(a).unwrap();
    tab.has_loaded = true;
    tab.set_url("https://elsewhere.com");
    assert_eq!(tab.url(), "https://elsewhere.com");
    assert!(!tab.has_loaded);
}
